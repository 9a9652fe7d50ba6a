//! Value kind tags.
//!
//! A `ValueKind` describes what kind of value an argument produces. It is
//! exported as part of strategy metadata so that external tooling can
//! render or type-check vectors without executing any generator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind tag for the values an argument produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Boolean values
    Bool,
    /// Integer values
    Int,
    /// Floating point values
    Float,
    /// String values
    String,
    /// Enum member names
    Enum,
    /// Lists of values
    List,
    /// The null value
    Null,
    /// Heterogeneous or unknown
    Any,
}

impl ValueKind {
    /// Common kind of a slice of values, or `Any` when they disagree.
    ///
    /// Integers and floats unify to `Float`. An empty slice is `Any`.
    pub fn unify<'a>(kinds: impl IntoIterator<Item = &'a ValueKind>) -> ValueKind {
        let mut iter = kinds.into_iter();
        let Some(first) = iter.next() else {
            return ValueKind::Any;
        };
        iter.fold(*first, |acc, k| match (acc, *k) {
            (a, b) if a == b => a,
            (ValueKind::Int, ValueKind::Float) | (ValueKind::Float, ValueKind::Int) => {
                ValueKind::Float
            }
            _ => ValueKind::Any,
        })
    }

    /// Get the tag name as used in exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Enum => "enum",
            ValueKind::List => "list",
            ValueKind::Null => "null",
            ValueKind::Any => "any",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
