//! AST evaluation against a variable scope and the formula library.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::functions::FunctionTable;
use crate::parser::{BinaryOp, Expr, UnaryOp};
use crate::value;

/// A source of variable values for evaluation.
///
/// Returning `None` means the name is unbound, which surfaces as
/// [`Error::UnknownVariable`]. A bound-but-null variable returns
/// `Some(Value::Null)`.
pub trait VarScope {
    /// Resolve a bare variable name.
    fn var(&self, name: &str) -> Option<Value>;
}

/// Scope binding positional arguments to an ordered variable-name list, used
/// by compiled expressions.
pub struct PositionalScope<'a> {
    names: &'a [String],
    args: &'a [Value],
}

impl<'a> PositionalScope<'a> {
    /// Bind `args` to `names` in order. Missing trailing arguments read as
    /// `null`.
    pub fn new(names: &'a [String], args: &'a [Value]) -> Self {
        Self { names, args }
    }
}

impl VarScope for PositionalScope<'_> {
    fn var(&self, name: &str) -> Option<Value> {
        let index = self.names.iter().position(|n| n == name)?;
        Some(self.args.get(index).cloned().unwrap_or(Value::Null))
    }
}

/// Evaluate an expression tree.
pub fn evaluate(expr: &Expr, scope: &dyn VarScope, functions: &FunctionTable) -> Result<Value> {
    match expr {
        Expr::Number(n) => value::number(*n),
        Expr::String(s) => Ok(Value::String(s.clone())),
        Expr::Bool(b) => Ok(Value::Bool(*b)),
        Expr::Null => Ok(Value::Null),
        Expr::Array(items) => {
            let values = items
                .iter()
                .map(|item| evaluate(item, scope, functions))
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::Array(values))
        }
        Expr::Var(name) => scope
            .var(name)
            .ok_or_else(|| Error::UnknownVariable { name: name.clone() }),
        Expr::Member(object, name) => {
            let object = evaluate(object, scope, functions)?;
            Ok(member(&object, name))
        }
        Expr::Index(object, index) => {
            let object = evaluate(object, scope, functions)?;
            let index = evaluate(index, scope, functions)?;
            Ok(indexed(&object, &index))
        }
        Expr::Unary(op, operand) => {
            let operand = evaluate(operand, scope, functions)?;
            match op {
                UnaryOp::Not => Ok(Value::Bool(!value::truthy(&operand))),
                UnaryOp::Neg => {
                    let n = value::coerce_number(&operand).ok_or_else(|| {
                        Error::eval(format!("cannot negate {}", value::kind(&operand)))
                    })?;
                    value::number(-n)
                }
            }
        }
        Expr::Binary(op, left, right) => binary(*op, left, right, scope, functions),
        Expr::Conditional {
            cond,
            then_branch,
            else_branch,
        } => {
            let cond = evaluate(cond, scope, functions)?;
            if value::truthy(&cond) {
                evaluate(then_branch, scope, functions)
            } else {
                evaluate(else_branch, scope, functions)
            }
        }
        Expr::Call { function, args } => {
            let f = functions.get(function).ok_or_else(|| Error::UnknownFunction {
                name: function.clone(),
            })?;
            let args = args
                .iter()
                .map(|arg| evaluate(arg, scope, functions))
                .collect::<Result<Vec<_>>>()?;
            f(&args)
        }
    }
}

fn binary(
    op: BinaryOp,
    left: &Expr,
    right: &Expr,
    scope: &dyn VarScope,
    functions: &FunctionTable,
) -> Result<Value> {
    // Logical operators short-circuit and return the deciding operand.
    match op {
        BinaryOp::And => {
            let left = evaluate(left, scope, functions)?;
            return if value::truthy(&left) {
                evaluate(right, scope, functions)
            } else {
                Ok(left)
            };
        }
        BinaryOp::Or => {
            let left = evaluate(left, scope, functions)?;
            return if value::truthy(&left) {
                Ok(left)
            } else {
                evaluate(right, scope, functions)
            };
        }
        _ => {}
    }

    let left = evaluate(left, scope, functions)?;
    let right = evaluate(right, scope, functions)?;
    match op {
        BinaryOp::Add => value::add(&left, &right),
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => {
            let (Some(x), Some(y)) = (value::coerce_number(&left), value::coerce_number(&right))
            else {
                return Err(Error::eval(format!(
                    "arithmetic on {} and {}",
                    value::kind(&left),
                    value::kind(&right)
                )));
            };
            match op {
                BinaryOp::Sub => value::number(x - y),
                BinaryOp::Mul => value::number(x * y),
                BinaryOp::Div => {
                    if y == 0.0 {
                        Err(Error::eval("division by zero"))
                    } else {
                        value::number(x / y)
                    }
                }
                BinaryOp::Rem => {
                    if y == 0.0 {
                        Err(Error::eval("division by zero"))
                    } else {
                        value::number(x % y)
                    }
                }
                _ => unreachable!(),
            }
        }
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            let ordering = value::compare(&left, &right)?;
            let result = match op {
                BinaryOp::Lt => ordering.is_lt(),
                BinaryOp::Le => ordering.is_le(),
                BinaryOp::Gt => ordering.is_gt(),
                BinaryOp::Ge => ordering.is_ge(),
                _ => unreachable!(),
            };
            Ok(Value::Bool(result))
        }
        BinaryOp::LooseEq => Ok(Value::Bool(value::loose_eq(&left, &right))),
        BinaryOp::LooseNe => Ok(Value::Bool(!value::loose_eq(&left, &right))),
        BinaryOp::StrictEq => Ok(Value::Bool(value::strict_eq(&left, &right))),
        BinaryOp::StrictNe => Ok(Value::Bool(!value::strict_eq(&left, &right))),
        BinaryOp::And | BinaryOp::Or => unreachable!(),
    }
}

/// Member access is null-safe: a missing field reads as `null` rather than
/// failing, because schemas routinely probe optional data.
fn member(object: &Value, name: &str) -> Value {
    match object {
        Value::Object(map) => map.get(name).cloned().unwrap_or(Value::Null),
        Value::Array(items) if name == "length" => Value::from(items.len()),
        Value::String(s) if name == "length" => Value::from(s.chars().count()),
        _ => Value::Null,
    }
}

fn indexed(object: &Value, index: &Value) -> Value {
    match (object, index) {
        (Value::Array(items), _) => value::coerce_number(index)
            .filter(|n| *n >= 0.0 && n.fract() == 0.0)
            .and_then(|n| items.get(n as usize))
            .cloned()
            .unwrap_or(Value::Null),
        (Value::Object(map), Value::String(key)) => {
            map.get(key).cloned().unwrap_or(Value::Null)
        }
        _ => Value::Null,
    }
}
