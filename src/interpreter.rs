use crate::ast::{Expr, Stmt};
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::token::{Token, TokenKind};
use crate::value::Value;
use std::io::{self, Write};

/// Evaluate one statement, sending `print` output to stdout.
pub fn interpret(statement: &Stmt, environment: &mut Environment) -> Result<Value, RuntimeError> {
    Interpreter::new(io::stdout()).interpret(statement, environment)
}

/// Tree-walking evaluator. `out` receives whatever `print` writes.
///
/// A runtime error aborts the statement it happened in. Anything the
/// statement already did to the environment before the failing
/// sub-expression stays done.
pub struct Interpreter<W: Write> {
    out: W,
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn interpret(
        &mut self,
        statement: &Stmt,
        environment: &mut Environment,
    ) -> Result<Value, RuntimeError> {
        match statement {
            Stmt::Expression(expr) => self.evaluate(expr, environment),
            Stmt::Print(expr) => {
                let text = self.evaluate(expr, environment)?.to_string();
                writeln!(self.out, "{}", text)
                    .and_then(|_| self.out.flush())
                    .map_err(|error| RuntimeError::Output {
                        message: error.to_string(),
                    })?;
                Ok(Value::String(text))
            }
            Stmt::Var { name, initializer } => {
                if environment.contains_local(&name.lexeme) {
                    return Err(RuntimeError::Redeclaration {
                        token: name.clone(),
                    });
                }

                let value = match initializer {
                    Some(expr) => self.evaluate(expr, environment)?,
                    None => Value::Null,
                };

                environment.define(name.lexeme.clone(), value.clone());
                Ok(value)
            }
        }
    }

    pub fn evaluate(
        &mut self,
        expr: &Expr,
        environment: &mut Environment,
    ) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Grouping(inner) => self.evaluate(inner, environment),
            Expr::Variable(name) => environment.get(name),
            Expr::Assignment { name, value } => {
                let value = self.evaluate(value, environment)?;
                environment.assign(name, value.clone())?;
                Ok(value)
            }
            Expr::Unary { operator, right } => {
                let right = self.evaluate(right, environment)?;
                evaluate_unary(operator, right)
            }
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left, environment)?;
                let right = self.evaluate(right, environment)?;
                evaluate_binary(operator, left, right)
            }
            Expr::Ternary {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition, environment)?.is_truthy() {
                    self.evaluate(then_branch, environment)
                } else {
                    self.evaluate(else_branch, environment)
                }
            }
        }
    }
}

fn evaluate_unary(operator: &Token, right: Value) -> Result<Value, RuntimeError> {
    match operator.kind {
        TokenKind::Minus => match right {
            Value::Number(n) => Ok(Value::Number(-n)),
            _ => Err(RuntimeError::type_error(operator, "Operand must be a number.")),
        },
        TokenKind::Bang => Ok(Value::Boolean(!right.is_truthy())),
        _ => Err(RuntimeError::type_error(
            operator,
            format!("Unknown unary operator '{}'.", operator.lexeme),
        )),
    }
}

fn evaluate_binary(operator: &Token, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match operator.kind {
        TokenKind::Minus => {
            let (l, r) = number_operands(operator, &left, &right)?;
            Ok(Value::Number(l - r))
        }
        TokenKind::Star => {
            let (l, r) = number_operands(operator, &left, &right)?;
            Ok(Value::Number(l * r))
        }
        TokenKind::Slash => {
            let (l, r) = number_operands(operator, &left, &right)?;
            if r == 0.0 {
                return Err(RuntimeError::DivisionByZero {
                    token: operator.clone(),
                });
            }
            Ok(Value::Number(l / r))
        }
        TokenKind::Plus => match (left, right) {
            (Value::Number(l), Value::Number(r)) => Ok(Value::Number(l + r)),
            (l @ (Value::String(_) | Value::Number(_)), r @ (Value::String(_) | Value::Number(_))) => {
                Ok(Value::String(format!("{}{}", l, r)))
            }
            _ => Err(RuntimeError::type_error(
                operator,
                "Operands must be two numbers or strings.",
            )),
        },
        TokenKind::Greater => {
            let (l, r) = number_operands(operator, &left, &right)?;
            Ok(Value::Boolean(l > r))
        }
        TokenKind::GreaterEqual => {
            let (l, r) = number_operands(operator, &left, &right)?;
            Ok(Value::Boolean(l >= r))
        }
        TokenKind::Less => {
            let (l, r) = number_operands(operator, &left, &right)?;
            Ok(Value::Boolean(l < r))
        }
        TokenKind::LessEqual => {
            let (l, r) = number_operands(operator, &left, &right)?;
            Ok(Value::Boolean(l <= r))
        }
        TokenKind::EqualEqual => Ok(Value::Boolean(left == right)),
        TokenKind::BangEqual => Ok(Value::Boolean(left != right)),
        _ => Err(RuntimeError::type_error(
            operator,
            format!("Unknown binary operator '{}'.", operator.lexeme),
        )),
    }
}

fn number_operands(operator: &Token, left: &Value, right: &Value) -> Result<(f64, f64), RuntimeError> {
    match (left.as_number(), right.as_number()) {
        (Some(l), Some(r)) => Ok((l, r)),
        _ => Err(RuntimeError::type_error(operator, "Operands must be numbers.")),
    }
}
