use crate::token::Token;
use crate::value::Value;

/// Expression nodes. Every node owns its children; the tree is never
/// aliased, so two trees compare equal when their structure does.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    Grouping(Box<Expr>),
    Unary {
        operator: Token,
        right: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Ternary {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    Variable(Token),
    Assignment {
        name: Token,
        value: Box<Expr>,
    },
}

impl Expr {
    pub fn literal(value: impl Into<Value>) -> Self {
        Expr::Literal(value.into())
    }

    pub fn grouping(expr: Expr) -> Self {
        Expr::Grouping(Box::new(expr))
    }

    pub fn unary(operator: Token, right: Expr) -> Self {
        Expr::Unary {
            operator,
            right: Box::new(right),
        }
    }

    pub fn binary(left: Expr, operator: Token, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn ternary(condition: Expr, then_branch: Expr, else_branch: Expr) -> Self {
        Expr::Ternary {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    pub fn assignment(name: Token, value: Expr) -> Self {
        Expr::Assignment {
            name,
            value: Box::new(value),
        }
    }

    /// Stand-in for a sub-expression the parser could not build.
    pub fn placeholder() -> Self {
        Expr::Literal(Value::Unset)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(Expr),
    Print(Expr),
    Var {
        name: Token,
        initializer: Option<Expr>,
    },
}
