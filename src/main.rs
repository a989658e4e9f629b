use clap::error::ErrorKind;
use clap::{Arg, ArgAction, Command};
use loxpp::repl;
use loxpp::runner::{self, Outcome, RunOptions};
use std::fs;
use std::path::Path;
use std::process::ExitCode;

// sysexits.h
const EX_USAGE: u8 = 64;
const EX_DATAERR: u8 = 65;
const EX_NOINPUT: u8 = 66;
const EX_SOFTWARE: u8 = 70;

fn main() -> ExitCode {
    let matches = match command().try_get_matches() {
        Ok(matches) => matches,
        Err(error) => {
            if let Err(print_error) = error.print() {
                eprintln!("Error printing usage: {}", print_error);
            }
            return match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(EX_USAGE),
            };
        }
    };

    let options = RunOptions {
        pretty: matches.get_flag("pretty"),
        print_tokens: matches.get_flag("print-tokens"),
        print_ast: matches.get_flag("print-ast"),
    };

    let mut code = ExitCode::SUCCESS;

    if let Some(file_path) = matches.get_one::<String>("file") {
        code = run_file(file_path, options);
        if !matches.get_flag("interactive") {
            return code;
        }
    }

    repl::start(options);
    code
}

fn command() -> Command {
    Command::new("loxpp")
        .about("A tree-walking interpreter for a small Lox dialect")
        .version(repl::VERSION)
        .arg(
            Arg::new("file")
                .help("The script file to execute")
                .value_name("FILE")
                .index(1),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Start the REPL (after running FILE, if given)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("pretty")
                .long("pretty")
                .help("Render errors as annotated reports")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("print-tokens")
                .long("print-tokens")
                .help("Dump scanned tokens to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("print-ast")
                .long("print-ast")
                .help("Dump each parsed statement to stderr")
                .action(ArgAction::SetTrue),
        )
}

fn run_file(path: &str, options: RunOptions) -> ExitCode {
    let path = Path::new(path);

    if !path.exists() {
        eprintln!("Error: File '{}' not found", path.display());
        return ExitCode::from(EX_NOINPUT);
    }

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            return ExitCode::from(EX_NOINPUT);
        }
    };

    let filename = path.display().to_string();
    match runner::run_with(&source, Some(&filename), options) {
        Outcome::Ok => ExitCode::SUCCESS,
        Outcome::StaticError => ExitCode::from(EX_DATAERR),
        Outcome::RuntimeError => ExitCode::from(EX_SOFTWARE),
    }
}
