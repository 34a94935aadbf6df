//! The formula function library.
//!
//! Formula functions are the spreadsheet-flavored names — `SUM`, `IF`,
//! `UPPER`, `PERCENT` — that expressions can call. They are grouped by
//! category and registered into a [`FunctionTable`], which an engine shares
//! across every compiled expression.
//!
//! All functions take a value slice and return a value. Arguments are already
//! evaluated; missing trailing arguments read as absent rather than failing,
//! so `FIXED(x)` and `FIXED(x, 2)` both work.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::Result;

mod aggregate;
mod datetime;
mod format;
mod logic;
mod math;
mod string;

/// A formula function: evaluated arguments in, value out.
pub type FormulaFn = fn(&[Value]) -> Result<Value>;

/// Named collection of formula functions.
///
/// Lookup is case-sensitive; the standard library registers uppercase names.
#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    entries: BTreeMap<String, FormulaFn>,
}

impl FunctionTable {
    /// An empty table with no functions registered.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard formula library: aggregates, date/time, logic, string,
    /// math, and formatting functions.
    pub fn standard() -> Self {
        let mut table = Self::default();
        aggregate::register(&mut table);
        datetime::register(&mut table);
        logic::register(&mut table);
        string::register(&mut table);
        math::register(&mut table);
        format::register(&mut table);
        table
    }

    /// Register a function, replacing any previous binding for `name`.
    pub fn insert(&mut self, name: impl Into<String>, function: FormulaFn) {
        self.entries.insert(name.into(), function);
    }

    /// Look up a function by name.
    pub fn get(&self, name: &str) -> Option<FormulaFn> {
        self.entries.get(name).copied()
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Number of registered functions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_has_core_names() {
        let table = FunctionTable::standard();
        for name in ["SUM", "IF", "UPPER", "ROUND", "TODAY", "PERCENT"] {
            assert!(table.contains(name), "missing {name}");
        }
    }

    #[test]
    fn insert_overrides() {
        let mut table = FunctionTable::standard();
        fn always_one(_: &[Value]) -> Result<Value> {
            Ok(Value::from(1))
        }
        table.insert("SUM", always_one);
        let f = table.get("SUM").unwrap();
        assert_eq!(f(&[]).unwrap(), Value::from(1));
    }
}
