use crate::ast::Stmt;
use crate::environment::Environment;
use crate::error::{Diagnostic, RuntimeError};
use crate::interpreter::Interpreter;
use crate::parser::parse;
use crate::scanner::scan;
use crate::value::Value;
use std::io::{self, Write};

/// Switches set from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Render diagnostics with ariadne instead of the caret format.
    pub pretty: bool,
    pub print_tokens: bool,
    pub print_ast: bool,
}

/// How far a piece of source got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    /// Scan or parse errors; nothing was executed.
    StaticError,
    /// Execution stopped at a runtime error.
    RuntimeError,
}

/// Run a whole script against a fresh environment, printing to stdout.
pub fn run(source: &str, filename: Option<&str>) -> Outcome {
    run_with(source, filename, RunOptions::default())
}

pub fn run_with(source: &str, filename: Option<&str>, options: RunOptions) -> Outcome {
    Session::new(io::stdout(), options).run_source(source, filename)
}

/// An interpreter and the environment it runs in, kept alive across any
/// number of `run_source` calls.
pub struct Session<W: Write> {
    interpreter: Interpreter<W>,
    environment: Environment,
    options: RunOptions,
    echo: bool,
}

impl<W: Write> Session<W> {
    pub fn new(out: W, options: RunOptions) -> Self {
        Self {
            interpreter: Interpreter::new(out),
            environment: Environment::new(),
            options,
            echo: false,
        }
    }

    /// Also write the value of every expression statement, as a prompt does.
    pub fn echoing(mut self) -> Self {
        self.echo = true;
        self
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn output_mut(&mut self) -> &mut W {
        self.interpreter.output_mut()
    }

    pub fn into_output(self) -> W {
        self.interpreter.into_output()
    }

    /// Scan, parse and execute `source`. Every scan error is reported, and
    /// if there were any nothing runs. Parse errors are handled the same way.
    /// Execution stops at the first runtime error.
    pub fn run_source(&mut self, source: &str, filename: Option<&str>) -> Outcome {
        let (tokens, scan_errors) = scan(source);

        if self.options.print_tokens {
            for token in &tokens {
                eprintln!("{}", token);
            }
        }

        if !scan_errors.is_empty() {
            for error in &scan_errors {
                self.report(error.diagnostic(), source, filename);
            }
            return Outcome::StaticError;
        }

        let parsed = parse(tokens);
        if !parsed.is_ok() {
            for error in &parsed.errors {
                self.report(error.diagnostic(), source, filename);
            }
            return Outcome::StaticError;
        }

        for statement in &parsed.statements {
            if self.options.print_ast {
                eprintln!("{}", statement);
            }

            if let Err(error) = self.execute(statement) {
                self.report(error.diagnostic(), source, filename);
                return Outcome::RuntimeError;
            }
        }

        Outcome::Ok
    }

    fn execute(&mut self, statement: &Stmt) -> Result<(), RuntimeError> {
        let value = self
            .interpreter
            .interpret(statement, &mut self.environment)?;

        if self.echo && matches!(statement, Stmt::Expression(_)) && value != Value::Unset {
            writeln!(self.interpreter.output_mut(), "{}", value).map_err(|error| {
                RuntimeError::Output {
                    message: error.to_string(),
                }
            })?;
        }

        Ok(())
    }

    fn report(&self, diagnostic: Diagnostic, source: &str, filename: Option<&str>) {
        if self.options.pretty {
            diagnostic.report(source, filename);
        } else {
            eprint!("{}", diagnostic.render());
        }
    }
}
