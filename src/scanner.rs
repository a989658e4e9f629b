use crate::error::{ScanError, ScanErrorKind, Span};
use crate::token::{keyword, Token, TokenKind};
use crate::value::Value;

/// Scan `source` into tokens. Scanning keeps going past unknown characters so
/// that every bad character in the input is reported in one pass.
pub fn scan(source: &str) -> (Vec<Token>, Vec<ScanError>) {
    Scanner::new(source).scan_tokens()
}

pub struct Scanner<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    errors: Vec<ScanError>,
    start: usize,
    current: usize,
    line: usize,
    /// Line the current lexeme starts on.
    start_line: usize,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            errors: Vec::new(),
            start: 0,
            current: 0,
            line: 0,
            start_line: 0,
        }
    }

    pub fn scan_tokens(mut self) -> (Vec<Token>, Vec<ScanError>) {
        while !self.is_at_end() {
            self.start = self.current;
            self.start_line = self.line;
            if !self.scan_token() {
                // Unterminated string: nothing sensible follows, and no
                // end-of-file marker is emitted.
                return (self.tokens, self.errors);
            }
        }

        self.start = self.current;
        self.start_line = self.line;
        self.add_token_with_literal(TokenKind::Eof, String::new(), Value::Unset);

        (self.tokens, self.errors)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    /// Returns false when scanning has to stop.
    fn scan_token(&mut self) -> bool {
        let c = self.advance();

        match c {
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            '-' => self.add_token(TokenKind::Minus),
            '+' => self.add_token(TokenKind::Plus),
            ';' => self.add_token(TokenKind::Semicolon),
            '*' => self.add_token(TokenKind::Star),
            '?' => self.add_token(TokenKind::Question),
            ':' => self.add_token(TokenKind::Colon),
            '!' => {
                let kind = if self.match_char('=') {
                    TokenKind::BangEqual
                } else {
                    TokenKind::Bang
                };
                self.add_token(kind);
            }
            '=' => {
                let kind = if self.match_char('=') {
                    TokenKind::EqualEqual
                } else {
                    TokenKind::Equal
                };
                self.add_token(kind);
            }
            '<' => {
                let kind = if self.match_char('=') {
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                };
                self.add_token(kind);
            }
            '>' => {
                let kind = if self.match_char('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                };
                self.add_token(kind);
            }
            '/' => {
                if self.match_char('/') {
                    self.line_comment();
                } else if self.match_char('*') {
                    self.block_comment();
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }
            ' ' | '\r' | '\t' => {
                // Ignore whitespace
            }
            '\n' => self.line += 1,
            '"' => return self.string(),
            c if c.is_ascii_digit() => self.number(),
            c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),
            _ => self.error(ScanErrorKind::UnknownToken(c)),
        }

        true
    }

    fn advance(&mut self) -> char {
        match self.source[self.current..].chars().next() {
            Some(c) => {
                self.current += c.len_utf8();
                c
            }
            None => '\0',
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() != expected || self.is_at_end() {
            false
        } else {
            self.advance();
            true
        }
    }

    fn peek(&self) -> char {
        self.source[self.current..].chars().next().unwrap_or('\0')
    }

    fn peek_next(&self) -> char {
        let mut chars = self.source[self.current..].chars();
        chars.next();
        chars.next().unwrap_or('\0')
    }

    fn line_comment(&mut self) {
        while self.peek() != '\n' && !self.is_at_end() {
            self.advance();
        }

        let interior = self.source[self.start + 2..self.current].to_string();
        self.add_comment(interior);
    }

    /// Block comments do not nest. An unterminated one runs to the end of
    /// the input and is still emitted.
    fn block_comment(&mut self) {
        let interior_start = self.current;
        let mut interior_end = None;

        while !self.is_at_end() {
            if self.peek() == '*' && self.peek_next() == '/' {
                interior_end = Some(self.current);
                self.advance();
                self.advance();
                break;
            }
            if self.advance() == '\n' {
                self.line += 1;
            }
        }

        let interior_end = interior_end.unwrap_or(self.current);
        let interior = self.source[interior_start..interior_end].to_string();
        self.add_comment(interior);
    }

    /// Returns false if the input ends before the closing quote.
    fn string(&mut self) -> bool {
        while self.peek() != '"' && !self.is_at_end() {
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            self.error(ScanErrorKind::UnterminatedString);
            return false;
        }

        // The closing quote
        self.advance();

        let content = self.source[self.start + 1..self.current - 1].to_string();
        self.add_token_with_literal(
            TokenKind::String,
            self.lexeme().to_string(),
            Value::String(content),
        );
        true
    }

    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        // Fractional part needs at least one digit after the dot
        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance();
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let text = self.lexeme();
        // Digits with at most one inner dot always parse.
        let value = text.parse::<f64>().unwrap_or_default();
        self.add_token_with_literal(TokenKind::Number, text.to_string(), Value::Number(value));
    }

    fn identifier(&mut self) {
        while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let text = self.lexeme();
        let kind = keyword(text).unwrap_or(TokenKind::Identifier);
        let literal = match kind {
            TokenKind::True => Value::Boolean(true),
            TokenKind::False => Value::Boolean(false),
            TokenKind::Nil => Value::Null,
            _ => Value::Unset,
        };

        self.add_token_with_literal(kind, text.to_string(), literal);
    }

    fn lexeme(&self) -> &'src str {
        &self.source[self.start..self.current]
    }

    /// Byte range of the line the current lexeme starts on.
    fn line_bounds(&self) -> (usize, usize) {
        let line_start = self.source[..self.start]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        let line_end = self.source[self.start..]
            .find('\n')
            .map(|i| self.start + i)
            .unwrap_or(self.source.len());
        (line_start, line_end)
    }

    fn add_token(&mut self, kind: TokenKind) {
        self.add_token_with_literal(kind, self.lexeme().to_string(), Value::Unset);
    }

    fn add_comment(&mut self, interior: String) {
        self.add_token_with_literal(
            TokenKind::Comment,
            self.lexeme().to_string(),
            Value::String(interior),
        );
    }

    fn add_token_with_literal(&mut self, kind: TokenKind, lexeme: String, literal: Value) {
        let (line_start, line_end) = self.line_bounds();
        self.tokens.push(Token {
            kind,
            lexeme,
            literal,
            line: self.start_line,
            column_start: self.start,
            column_end: self.current,
            line_start,
            source_line: self.source[line_start..line_end].to_string(),
        });
    }

    fn error(&mut self, kind: ScanErrorKind) {
        let (line_start, line_end) = self.line_bounds();
        self.errors.push(ScanError {
            kind,
            line: self.start_line,
            span: Span::new(self.start, self.current),
            line_start,
            source_line: self.source[line_start..line_end].to_string(),
        });
    }
}
