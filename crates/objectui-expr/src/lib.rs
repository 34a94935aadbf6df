//! Expression evaluation for ObjectUI.
//!
//! Schemas carry logic as strings — `"${data.amount > 1000}"` on a
//! `visibleOn` prop, `"SUM(data.items, 'price')"` in a computed column. This
//! crate turns those strings into values, safely:
//!
//! - A small closed expression language (JavaScript-flavored operators,
//!   member/index access, ternary) parsed into an AST — never `eval`.
//! - The formula function library (`SUM`, `IF`, `UPPER`, `PERCENT`, ...) as
//!   the only callable surface.
//! - A hit-count-bounded cache of compiled expressions keyed by source text
//!   plus variable-name list.
//! - The standard context (`data`, `record`, `form`, `user`, ...) feeding
//!   evaluation, with `record` aliasing `data`.
//!
//! # Example
//!
//! ```
//! use objectui_expr::{ContextInput, ExpressionEngine, build_standard_context};
//! use serde_json::json;
//!
//! let engine = ExpressionEngine::new();
//! let ctx = build_standard_context(
//!     ContextInput::new().with_data(json!({"amount": 1500})),
//! );
//!
//! let v = engine.evaluate("data.amount > 1000", &ctx).unwrap();
//! assert_eq!(v, json!(true));
//!
//! let label = engine
//!     .evaluate_template("Total: ${FIXED(data.amount / 1000, 1)}k", &ctx)
//!     .unwrap();
//! assert_eq!(label, json!("Total: 1.5k"));
//! ```

pub mod cache;
pub mod context;
mod error;
pub mod eval;
pub mod functions;
pub mod parser;
pub mod value;

mod engine;

pub use cache::{CacheEntry, CacheStats, CompiledExpression, DEFAULT_CACHE_CAPACITY, ExpressionCache};
pub use context::{ContextInput, StandardContext, build_standard_context};
pub use engine::{ExpressionEngine, SharedEngine};
pub use error::{Error, Result};
pub use eval::{PositionalScope, VarScope, evaluate};
pub use functions::{FormulaFn, FunctionTable};
pub use parser::{BinaryOp, Expr, UnaryOp, parse_expression};
