//! Parenthesized rendering of syntax trees, for debugging.
//!
//! `1 + 2 * 3` prints as `(+ 1 (* 2 3))`.

use crate::ast::{Expr, Stmt};
use std::fmt;

pub fn print_expr(expr: &Expr) -> String {
    expr.to_string()
}

pub fn print_stmt(stmt: &Stmt) -> String {
    stmt.to_string()
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(value) => write!(f, "{}", value),
            Expr::Grouping(inner) => write!(f, "(group {})", inner),
            Expr::Unary { operator, right } => write!(f, "({} {})", operator.lexeme, right),
            Expr::Binary {
                left,
                operator,
                right,
            } => write!(f, "({} {} {})", operator.lexeme, left, right),
            Expr::Ternary {
                condition,
                then_branch,
                else_branch,
            } => write!(f, "(?: {} {} {})", condition, then_branch, else_branch),
            Expr::Variable(name) => write!(f, "{}", name.lexeme),
            Expr::Assignment { name, value } => write!(f, "(= {} {})", name.lexeme, value),
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Stmt::Expression(expr) => write!(f, "(expr {})", expr),
            Stmt::Print(expr) => write!(f, "(print {})", expr),
            Stmt::Var {
                name,
                initializer: Some(initializer),
            } => write!(f, "(var {} {})", name.lexeme, initializer),
            Stmt::Var {
                name,
                initializer: None,
            } => write!(f, "(var {})", name.lexeme),
        }
    }
}
