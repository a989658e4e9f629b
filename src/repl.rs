use crate::runner::{RunOptions, Session};
use crate::scanner::scan;
use crate::token::TokenKind;
use std::io::{self, BufRead, Write};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP: &str = "\
Commands:
  .exit      leave the prompt (also 'exit' or 'quit')
  .help      show this message
  .version   show the interpreter version

Anything else is run as code. A missing trailing ';' is added.";

/// Interactive prompt on stdin/stdout. Variables persist between lines.
pub fn start(options: RunOptions) {
    let stdin = io::stdin();
    if let Err(error) = run_prompt(stdin.lock(), io::stdout(), options) {
        eprintln!("Error reading input: {}", error);
    }
}

/// The prompt loop over any input and output. Returns when the input ends
/// or an exit command is read.
pub fn run_prompt<R: BufRead, W: Write>(
    mut input: R,
    output: W,
    options: RunOptions,
) -> io::Result<W> {
    let mut session = Session::new(output, options).echoing();

    writeln!(session.output_mut(), "Lox++ Interpreter v{}", VERSION)?;
    writeln!(session.output_mut(), "Type '.help' for commands, '.exit' to quit")?;
    writeln!(session.output_mut())?;

    loop {
        write!(session.output_mut(), "> ")?;
        session.output_mut().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // EOF (Ctrl+D or piped input ended)
            writeln!(session.output_mut())?;
            break;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            ".exit" | "exit" | "quit" => {
                writeln!(session.output_mut(), "Goodbye!")?;
                break;
            }
            ".help" => writeln!(session.output_mut(), "{}", HELP)?,
            ".version" => writeln!(session.output_mut(), "v{}", VERSION)?,
            command if command.starts_with('.') => {
                writeln!(
                    session.output_mut(),
                    "Unknown command '{}'. Type '.help' for commands.",
                    command
                )?;
            }
            source => {
                let source = with_terminator(source);
                session.run_source(&source, None);
            }
        }
    }

    Ok(session.into_output())
}

/// Insert the missing ';' right after the last code token, ahead of any
/// trailing comment. Lines that fail to scan are left for the scanner to
/// report.
fn with_terminator(line: &str) -> String {
    let (tokens, errors) = scan(line);
    if !errors.is_empty() {
        return format!("{};", line);
    }

    let last = tokens
        .iter()
        .rev()
        .find(|token| !matches!(token.kind, TokenKind::Comment | TokenKind::Eof));

    match last {
        Some(token) if token.kind != TokenKind::Semicolon => {
            let (code, rest) = line.split_at(token.column_end);
            format!("{};{}", code, rest)
        }
        _ => line.to_string(),
    }
}
