// Lox++ interpreter library
//
// Scanner, parser and tree-walking interpreter for a small Lox dialect with
// a ternary operator, plus the file runner and REPL built on top of them.

pub mod ast;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod printer;
pub mod repl;
pub mod runner;
pub mod scanner;
pub mod token;
pub mod value;

// Re-export commonly used items
pub use ast::{Expr, Stmt};
pub use environment::Environment;
pub use error::{Diagnostic, ErrorKind, ParseError, RuntimeError, ScanError, ScanErrorKind, Span};
pub use interpreter::{interpret, Interpreter};
pub use parser::{parse, Parsed, Parser};
pub use printer::{print_expr, print_stmt};
pub use scanner::{scan, Scanner};
pub use token::{Token, TokenKind};
pub use value::Value;

// Re-export driver entry points
pub use repl::start as start_repl;
pub use runner::{run, run_with, Outcome, RunOptions, Session};
