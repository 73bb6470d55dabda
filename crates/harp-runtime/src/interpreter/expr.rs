//! Expression evaluation

use crate::ast::*;
use crate::environment::Environment;
use crate::interpreter::{ControlFlow, Interpreter};
use crate::span::Span;
use crate::value::{Callable, RuntimeError, Value};
use std::rc::Rc;

/// Numeric domain an arithmetic or comparison operator runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Domain {
    Int,
    Double,
}

impl Interpreter {
    pub(super) fn evaluate(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal(lit, _) => Ok(literal_value(lit)),
            Expr::Group(group) => self.evaluate(&group.expr),
            Expr::Variable(id) => self.environment.borrow().get(&id.name, id.span),
            Expr::Assign(assign) => {
                let value = self.evaluate(&assign.value)?;
                self.environment
                    .borrow_mut()
                    .assign(&assign.name.name, value.clone(), assign.name.span)?;
                Ok(value)
            }
            Expr::Logical(logical) => {
                let left = self.evaluate(&logical.left)?;
                let short_circuit = match logical.op {
                    LogicalOp::Or => left.is_truthy(),
                    LogicalOp::And => !left.is_truthy(),
                };
                if short_circuit {
                    Ok(left)
                } else {
                    self.evaluate(&logical.right)
                }
            }
            Expr::Unary(unary) => {
                let operand = self.evaluate(&unary.expr)?;
                eval_unary(unary.op, &operand, unary.span)
            }
            Expr::Binary(binary) => {
                let left = self.evaluate(&binary.left)?;
                let right = self.evaluate(&binary.right)?;
                eval_binary(binary.op, &left, &right, binary.span)
            }
            Expr::Call(call) => self.eval_call(call),
        }
    }

    fn eval_call(&mut self, call: &CallExpr) -> Result<Value, RuntimeError> {
        let callee = self.evaluate(&call.callee)?;
        let Value::Function(callable) = callee else {
            return Err(RuntimeError::NotCallable {
                type_name: callee.type_name().to_string(),
                span: call.paren,
            });
        };

        let mut args = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            args.push(self.evaluate(arg)?);
        }

        if !callable.arity().accepts(args.len()) {
            return Err(RuntimeError::ArityMismatch {
                name: callable.name().to_string(),
                expected: callable.arity(),
                found: args.len(),
                span: call.paren,
            });
        }

        tracing::trace!(function = callable.name(), args = args.len(), "call");

        match callable {
            Callable::Native(native) => (native.func)(self.out.as_mut(), &args, call.paren),
            Callable::User(function) => {
                let mut scope = Environment::with_parent(Rc::clone(&function.closure));
                for (param, arg) in function.decl.params.iter().zip(args) {
                    scope.define(param.name.name.clone(), arg);
                }

                match self.execute_block(&function.decl.body, scope.into_scope())? {
                    ControlFlow::Return(value) => Ok(value),
                    ControlFlow::Normal => Ok(Value::Null),
                }
            }
        }
    }
}

fn literal_value(lit: &Literal) -> Value {
    match lit {
        Literal::Int(n) => Value::Int(*n),
        Literal::Double(n) => Value::Double(*n),
        Literal::String(s) => Value::string(s.as_str()),
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Null => Value::Null,
    }
}

fn eval_unary(op: UnaryOp, operand: &Value, span: Span) -> Result<Value, RuntimeError> {
    match op {
        UnaryOp::Not => Ok(Value::Bool(!operand.is_truthy())),
        UnaryOp::Negate => match domain_of(operand) {
            Domain::Double => Ok(Value::Double(-as_double(operand, span)?)),
            Domain::Int => as_int(operand, span)?
                .checked_neg()
                .map(Value::Int)
                .ok_or_else(|| RuntimeError::IntegerOverflow {
                    op: op.to_string(),
                    span,
                }),
        },
    }
}

fn eval_binary(op: BinaryOp, left: &Value, right: &Value, span: Span) -> Result<Value, RuntimeError> {
    match op {
        BinaryOp::Eq => return Ok(Value::Bool(left == right)),
        BinaryOp::Ne => return Ok(Value::Bool(left != right)),
        _ => {}
    }

    let domain = if domain_of(left) == Domain::Double || domain_of(right) == Domain::Double {
        Domain::Double
    } else {
        Domain::Int
    };

    match domain {
        Domain::Int => int_op(op, as_int(left, span)?, as_int(right, span)?, span),
        Domain::Double => double_op(op, as_double(left, span)?, as_double(right, span)?, span),
    }
}

fn int_op(op: BinaryOp, a: i64, b: i64, span: Span) -> Result<Value, RuntimeError> {
    let overflow = || RuntimeError::IntegerOverflow {
        op: op.to_string(),
        span,
    };

    let value = match op {
        BinaryOp::Add => Value::Int(a.checked_add(b).ok_or_else(overflow)?),
        BinaryOp::Sub => Value::Int(a.checked_sub(b).ok_or_else(overflow)?),
        BinaryOp::Mul => Value::Int(a.checked_mul(b).ok_or_else(overflow)?),
        BinaryOp::Div => {
            if b == 0 {
                return Err(RuntimeError::DivisionByZero { span });
            }
            Value::Int(a.checked_div(b).ok_or_else(overflow)?)
        }
        BinaryOp::Lt => Value::Bool(a < b),
        BinaryOp::Le => Value::Bool(a <= b),
        BinaryOp::Gt => Value::Bool(a > b),
        BinaryOp::Ge => Value::Bool(a >= b),
        BinaryOp::Eq => Value::Bool(a == b),
        BinaryOp::Ne => Value::Bool(a != b),
    };
    Ok(value)
}

fn double_op(op: BinaryOp, a: f64, b: f64, span: Span) -> Result<Value, RuntimeError> {
    let value = match op {
        BinaryOp::Add => Value::Double(a + b),
        BinaryOp::Sub => Value::Double(a - b),
        BinaryOp::Mul => Value::Double(a * b),
        BinaryOp::Div => {
            if b == 0.0 {
                return Err(RuntimeError::DivisionByZero { span });
            }
            Value::Double(a / b)
        }
        BinaryOp::Lt => Value::Bool(a < b),
        BinaryOp::Le => Value::Bool(a <= b),
        BinaryOp::Gt => Value::Bool(a > b),
        BinaryOp::Ge => Value::Bool(a >= b),
        BinaryOp::Eq => Value::Bool(a == b),
        BinaryOp::Ne => Value::Bool(a != b),
    };
    Ok(value)
}

/// Doubles, and text that reads as a finite non-integral number, select the
/// floating-point domain; everything else selects integers.
fn domain_of(value: &Value) -> Domain {
    match value {
        Value::Double(_) => Domain::Double,
        Value::String(s)
            if s.parse::<i64>().is_err() && s.parse::<f64>().is_ok_and(f64::is_finite) =>
        {
            Domain::Double
        }
        _ => Domain::Int,
    }
}

fn as_int(value: &Value, span: Span) -> Result<i64, RuntimeError> {
    match value {
        Value::Int(n) => Ok(*n),
        Value::String(s) => s.parse().map_err(|_| coercion_failure(value, "int", span)),
        _ => Err(coercion_failure(value, "int", span)),
    }
}

fn as_double(value: &Value, span: Span) -> Result<f64, RuntimeError> {
    match value {
        Value::Int(n) => Ok(*n as f64),
        Value::Double(n) => Ok(*n),
        Value::String(s) => s.parse().map_err(|_| coercion_failure(value, "double", span)),
        _ => Err(coercion_failure(value, "double", span)),
    }
}

fn coercion_failure(value: &Value, domain: &'static str, span: Span) -> RuntimeError {
    let operand = match value {
        Value::String(s) => format!("'{}'", s),
        other => other.type_name().to_string(),
    };
    RuntimeError::CoercionFailure {
        operand,
        domain,
        span,
    }
}
