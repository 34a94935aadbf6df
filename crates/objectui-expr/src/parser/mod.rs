//! Expression parsing: lexer, AST, and recursive-descent parser.
//!
//! The expression language is a small, closed subset of JavaScript expression
//! syntax — literals, member/index access, the formula function calls, the
//! usual arithmetic/comparison/logical operators, and the ternary. There is
//! no assignment, no statement forms, and no way to reach anything outside
//! the evaluation scope and the formula library, which keeps the sandbox
//! auditable.

mod ast;
mod expr_parser;
mod lexer;

pub use ast::{BinaryOp, Expr, UnaryOp};
pub use expr_parser::parse_expression;
