use crate::token::Token;
use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ScanError,
    ParseError,
    RuntimeError,
}

impl ErrorKind {
    fn label(self) -> &'static str {
        match self {
            ErrorKind::ScanError => "Scan Error",
            ErrorKind::ParseError => "Parse Error",
            ErrorKind::RuntimeError => "Runtime Error",
        }
    }

    fn color(self) -> Color {
        match self {
            ErrorKind::ScanError => Color::Red,
            ErrorKind::ParseError => Color::Yellow,
            ErrorKind::RuntimeError => Color::Magenta,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanErrorKind {
    #[error("Unterminated string.")]
    UnterminatedString,
    #[error("Unknown token '{0}'.")]
    UnknownToken(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ScanError {
    pub kind: ScanErrorKind,
    pub line: usize,
    pub span: Span,
    pub line_start: usize,
    pub source_line: String,
}

impl ScanError {
    pub fn diagnostic(&self) -> Diagnostic {
        let offset = self.span.start.saturating_sub(self.line_start);
        let column = self
            .source_line
            .get(..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(offset);

        Diagnostic {
            kind: ErrorKind::ScanError,
            message: self.to_string(),
            line: self.line,
            column,
            source_line: self.source_line.clone(),
            span: self.span,
        }
    }
}

/// A syntax error, anchored at the token where the parser noticed it.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl ParseError {
    pub fn new(token: Token, message: impl Into<String>) -> Self {
        Self {
            token,
            message: message.into(),
        }
    }

    pub fn diagnostic(&self) -> Diagnostic {
        Diagnostic::at_token(ErrorKind::ParseError, &self.token, self.to_string())
    }
}

/// Aborts the statement being evaluated. The token locates the failing
/// operator or name.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("{message}")]
    TypeError { token: Token, message: String },
    #[error("Division by zero.")]
    DivisionByZero { token: Token },
    #[error("Undefined variable '{}'.", .token.lexeme)]
    UndefinedVariable { token: Token },
    #[error("Variable '{}' is already declared.", .token.lexeme)]
    Redeclaration { token: Token },
    #[error("Cannot write output: {message}")]
    Output { message: String },
}

impl RuntimeError {
    pub fn type_error(token: &Token, message: impl Into<String>) -> Self {
        RuntimeError::TypeError {
            token: token.clone(),
            message: message.into(),
        }
    }

    /// The token the error points at. Output failures have none.
    pub fn token(&self) -> Option<&Token> {
        match self {
            RuntimeError::TypeError { token, .. } => Some(token),
            RuntimeError::DivisionByZero { token } => Some(token),
            RuntimeError::UndefinedVariable { token } => Some(token),
            RuntimeError::Redeclaration { token } => Some(token),
            RuntimeError::Output { .. } => None,
        }
    }

    pub fn diagnostic(&self) -> Diagnostic {
        match self.token() {
            Some(token) => {
                Diagnostic::at_token(ErrorKind::RuntimeError, token, self.to_string())
            }
            None => Diagnostic {
                kind: ErrorKind::RuntimeError,
                message: self.to_string(),
                line: 0,
                column: 0,
                source_line: String::new(),
                span: Span::new(0, 0),
            },
        }
    }
}

/// Everything needed to point at an error in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub message: String,
    /// Zero-based line number.
    pub line: usize,
    /// Character column within `source_line`.
    pub column: usize,
    pub source_line: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn at_token(kind: ErrorKind, token: &Token, message: String) -> Self {
        Self {
            kind,
            message,
            line: token.line,
            column: token.column(),
            source_line: token.source_line.clone(),
            span: token.span(),
        }
    }

    /// The stable caret format:
    ///
    /// ```text
    /// Error: <message>
    /// 1   | <source line>
    ///       ^-- Here
    /// ```
    pub fn render(&self) -> String {
        let prefix = format!("{:<4}| ", self.line + 1);
        let padding = " ".repeat(prefix.len() + self.column);
        format!(
            "Error: {}\n{}{}\n{}^-- Here\n",
            self.message, prefix, self.source_line, padding
        )
    }

    /// Print an ariadne report for this diagnostic to stderr. Falls back to
    /// the caret format if the report cannot be written.
    pub fn report(&self, source: &str, filename: Option<&str>) {
        let filename = filename.unwrap_or("<repl>");
        let color = self.kind.color();

        let (start, end) = char_range(source, self.span);

        let result = Report::build(ReportKind::Error, filename, start)
            .with_message(format!("{}: {}", self.kind.label().fg(color), self.message))
            .with_label(
                Label::new((filename, start..end))
                    .with_message(&self.message)
                    .with_color(color),
            )
            .finish()
            .eprint((filename, Source::from(source)));

        if result.is_err() {
            eprint!("{}", self.render());
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.render())
    }
}

// ariadne counts characters, spans count bytes.
fn char_range(source: &str, span: Span) -> (usize, usize) {
    let to_chars = |offset: usize| {
        let offset = offset.min(source.len());
        source
            .get(..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(offset)
    };

    let total = source.chars().count();
    let mut start = to_chars(span.start);
    let mut end = to_chars(span.end).max(start);

    if start == end {
        end = (start + 1).min(total);
        if start == end && start > 0 {
            start -= 1;
        }
    }

    (start, end)
}
