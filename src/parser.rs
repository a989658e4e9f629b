use crate::ast::{Expr, Stmt};
use crate::error::ParseError;
use crate::token::{Token, TokenKind};
use crate::value::Value;

/// Statements that parsed, plus every syntax error met on the way. A
/// statement whose parse failed hard is left out of `statements`.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub statements: Vec<Stmt>,
    pub errors: Vec<ParseError>,
}

impl Parsed {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

pub fn parse(tokens: Vec<Token>) -> Parsed {
    Parser::new(tokens).parse()
}

type ParseResult<T> = Result<T, ParseError>;

/// How deep prefix operators, groups, ternary branches and assignments may
/// nest before parsing gives up on the statement.
pub const MAX_NESTING: usize = 128;

/// Recursive descent parser.
///
/// Two recovery strategies are used. Soft errors (bad assignment target,
/// incomplete ternary, missing `)`) are recorded and parsing carries on from
/// where it is. Hard errors come back as `Err` through `?` up to
/// `declaration`, which records them and skips to the next statement.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    depth: usize,
    errors: Vec<ParseError>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        let mut tokens: Vec<Token> = tokens
            .into_iter()
            .filter(|token| token.kind != TokenKind::Comment)
            .collect();

        // A scan that stopped early leaves no end marker.
        if tokens.last().map(|token| token.kind) != Some(TokenKind::Eof) {
            let eof = end_of_file_after(tokens.last());
            tokens.push(eof);
        }

        Self {
            tokens,
            current: 0,
            depth: 0,
            errors: Vec::new(),
        }
    }

    pub fn parse(mut self) -> Parsed {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            if let Some(statement) = self.declaration() {
                statements.push(statement);
            }
        }

        Parsed {
            statements,
            errors: self.errors,
        }
    }

    fn declaration(&mut self) -> Option<Stmt> {
        let start = self.current;

        let result = if self.match_kinds(&[TokenKind::Var]) {
            self.var_declaration()
        } else {
            self.statement()
        };

        match result {
            Ok(statement) => Some(statement),
            Err(error) => {
                self.errors.push(error);
                self.synchronize(start);
                None
            }
        }
    }

    fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self
            .consume(TokenKind::Identifier, "Expected a variable name.")?
            .clone();

        let initializer = if self.match_kinds(&[TokenKind::Equal]) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(
            TokenKind::Semicolon,
            "Expected ';' after variable declaration.",
        )?;
        Ok(Stmt::Var { name, initializer })
    }

    fn statement(&mut self) -> ParseResult<Stmt> {
        if self.match_kinds(&[TokenKind::Print]) {
            let value = self.expression()?;
            self.consume(TokenKind::Semicolon, "Expected ';' after value.")?;
            return Ok(Stmt::Print(value));
        }

        let expr = self.expression()?;
        self.consume(TokenKind::Semicolon, "Expected ';' after expression.")?;
        Ok(Stmt::Expression(expr))
    }

    fn expression(&mut self) -> ParseResult<Expr> {
        self.assignment()
    }

    fn assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.ternary()?;

        if self.match_kinds(&[TokenKind::Equal]) {
            let equals = self.previous().clone();
            let value = self.nested(Self::assignment)?;

            if let Expr::Variable(name) = expr {
                return Ok(Expr::assignment(name, value));
            }

            // The target is dropped and the value stands on its own.
            self.errors
                .push(ParseError::new(equals, "Invalid assignment target."));
            return Ok(value);
        }

        Ok(expr)
    }

    fn ternary(&mut self) -> ParseResult<Expr> {
        let condition = self.equality()?;

        if !self.match_kinds(&[TokenKind::Question]) {
            return Ok(condition);
        }

        let then_branch = group_nested_ternary(self.nested(Self::ternary)?);
        let else_branch = if self.match_kinds(&[TokenKind::Colon]) {
            group_nested_ternary(self.nested(Self::ternary)?)
        } else {
            let token = self.peek().clone();
            self.errors.push(ParseError::new(
                token,
                "Expected ':' to finish the ternary operator.",
            ));
            Expr::placeholder()
        };

        Ok(Expr::ternary(condition, then_branch, else_branch))
    }

    fn equality(&mut self) -> ParseResult<Expr> {
        let mut expr = self.comparison()?;

        while self.match_kinds(&[TokenKind::BangEqual, TokenKind::EqualEqual]) {
            let operator = self.previous().clone();
            let right = self.right_operand(&operator, Self::comparison)?;
            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn comparison(&mut self) -> ParseResult<Expr> {
        let mut expr = self.term()?;

        while self.match_kinds(&[
            TokenKind::Greater,
            TokenKind::GreaterEqual,
            TokenKind::Less,
            TokenKind::LessEqual,
        ]) {
            let operator = self.previous().clone();
            let right = self.right_operand(&operator, Self::term)?;
            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn term(&mut self) -> ParseResult<Expr> {
        let mut expr = self.factor()?;

        while self.match_kinds(&[TokenKind::Minus, TokenKind::Plus]) {
            let operator = self.previous().clone();
            let right = self.right_operand(&operator, Self::factor)?;
            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn factor(&mut self) -> ParseResult<Expr> {
        let mut expr = self.unary()?;

        while self.match_kinds(&[TokenKind::Slash, TokenKind::Star]) {
            let operator = self.previous().clone();
            let right = self.right_operand(&operator, Self::unary)?;
            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn unary(&mut self) -> ParseResult<Expr> {
        if self.match_kinds(&[TokenKind::Bang, TokenKind::Minus]) {
            let operator = self.previous().clone();
            let right = self.nested(|parser| parser.right_operand(&operator, Self::unary))?;
            return Ok(Expr::unary(operator, right));
        }

        self.primary()
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        if self.match_kinds(&[TokenKind::False]) {
            return Ok(Expr::Literal(Value::Boolean(false)));
        }
        if self.match_kinds(&[TokenKind::True]) {
            return Ok(Expr::Literal(Value::Boolean(true)));
        }
        if self.match_kinds(&[TokenKind::Nil]) {
            return Ok(Expr::Literal(Value::Null));
        }
        if self.match_kinds(&[TokenKind::Number, TokenKind::String]) {
            return Ok(Expr::Literal(self.previous().literal.clone()));
        }
        if self.match_kinds(&[TokenKind::Identifier]) {
            return Ok(Expr::Variable(self.previous().clone()));
        }

        if self.match_kinds(&[TokenKind::LeftParen]) {
            let expr = self.nested(Self::ternary)?;
            if !self.match_kinds(&[TokenKind::RightParen]) {
                let token = self.peek().clone();
                self.errors
                    .push(ParseError::new(token, "Expected ')' after expression."));
            }
            return Ok(Expr::grouping(expr));
        }

        Err(ParseError::new(self.peek().clone(), "Expected expression."))
    }

    /// Run one level of recursive parsing, failing hard once the nesting
    /// limit is reached.
    fn nested(&mut self, parse: impl FnOnce(&mut Self) -> ParseResult<Expr>) -> ParseResult<Expr> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::new(
                self.peek().clone(),
                "Expression nested too deeply.",
            ));
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Parse the operand to the right of `operator`. When nothing at all
    /// could be parsed the error is reported against the operator.
    fn right_operand(
        &mut self,
        operator: &Token,
        operand: fn(&mut Self) -> ParseResult<Expr>,
    ) -> ParseResult<Expr> {
        let start = self.current;
        operand(self).map_err(|error| {
            if self.current == start {
                ParseError::new(
                    operator.clone(),
                    format!("Expected expression after '{}'.", operator.lexeme),
                )
            } else {
                error
            }
        })
    }

    /// Skip the rest of a failed statement. Stops after a `;` or in front of
    /// a keyword that starts a statement, so the next statement is kept
    /// intact. At least one token is skipped if the failed statement consumed
    /// none.
    fn synchronize(&mut self, start: usize) {
        if self.current == start {
            self.advance();
        }

        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }
            if self.peek().kind.starts_statement() {
                return;
            }
            self.advance();
        }
    }

    fn match_kinds(&mut self, kinds: &[TokenKind]) -> bool {
        for kind in kinds {
            if self.check(*kind) {
                self.advance();
                return true;
            }
        }
        false
    }

    fn check(&self, kind: TokenKind) -> bool {
        if self.is_at_end() {
            false
        } else {
            self.peek().kind == kind
        }
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    fn consume(&mut self, kind: TokenKind, message: &str) -> ParseResult<&Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::new(self.peek().clone(), message))
        }
    }
}

/// A ternary used as a branch of another ternary keeps its own boundary.
fn group_nested_ternary(expr: Expr) -> Expr {
    match expr {
        Expr::Ternary { .. } => Expr::grouping(expr),
        other => other,
    }
}

fn end_of_file_after(last: Option<&Token>) -> Token {
    match last {
        Some(token) => Token {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            literal: Value::Unset,
            line: token.line,
            column_start: token.column_end,
            column_end: token.column_end,
            line_start: token.line_start,
            source_line: token.source_line.clone(),
        },
        None => Token {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            literal: Value::Unset,
            line: 0,
            column_start: 0,
            column_end: 0,
            line_start: 0,
            source_line: String::new(),
        },
    }
}
