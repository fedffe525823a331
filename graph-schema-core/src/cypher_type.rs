//! Cypher type tags and the join lattice.
//!
//! `CypherType` classifies one property value into a small lattice of
//! categories; `join` computes the least upper bound of two categories and
//! is the single source of truth for reconciling conflicting observations
//! of the same property. No other component re-derives type compatibility.
//!
//! Lattice shape: `ANY` is the top element and dominates everything;
//! `NUMBER` dominates `INTEGER` and `FLOAT`; every other pair of distinct
//! categories joins straight to `ANY`.

use crate::value::PropertyValue;
use std::fmt;

/// Inferred data category of a property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CypherType {
    /// Explicit null observation.
    Null,
    /// Boolean.
    Boolean,
    /// Integral number.
    Integer,
    /// Floating-point number.
    Float,
    /// Join of Integer and Float.
    Number,
    /// Character string.
    String,
    /// Top element: join of any two incompatible categories, and the
    /// category of any value kind the inferencer does not recognize.
    Any,
}

impl CypherType {
    /// Every lattice element, for exhaustive law tests.
    pub const ALL: [CypherType; 7] = [
        CypherType::Null,
        CypherType::Boolean,
        CypherType::Integer,
        CypherType::Float,
        CypherType::Number,
        CypherType::String,
        CypherType::Any,
    ];

    /// Classify one runtime property value.
    ///
    /// Total: value kinds without a dedicated category (lists today)
    /// degrade to `Any` rather than erroring.
    pub fn of(value: &PropertyValue) -> CypherType {
        match value {
            PropertyValue::Null => CypherType::Null,
            PropertyValue::Boolean(_) => CypherType::Boolean,
            PropertyValue::Integer(_) => CypherType::Integer,
            PropertyValue::Float(_) => CypherType::Float,
            PropertyValue::String(_) => CypherType::String,
            PropertyValue::List(_) => CypherType::Any,
        }
    }

    /// Least upper bound of two categories.
    ///
    /// Commutative, associative, idempotent. Integer and Float (and either
    /// with Number) join to Number; any other pair of distinct categories
    /// joins to Any.
    pub fn join(self, other: CypherType) -> CypherType {
        use CypherType::*;
        match (self, other) {
            (a, b) if a == b => a,
            (Integer, Float) | (Float, Integer) => Number,
            (Number, Integer) | (Integer, Number) => Number,
            (Number, Float) | (Float, Number) => Number,
            _ => Any,
        }
    }

    /// Canonical name as it appears in output rows.
    pub fn name(self) -> &'static str {
        match self {
            CypherType::Null => "NULL",
            CypherType::Boolean => "BOOLEAN",
            CypherType::Integer => "INTEGER",
            CypherType::Float => "FLOAT",
            CypherType::Number => "NUMBER",
            CypherType::String => "STRING",
            CypherType::Any => "ANY",
        }
    }
}

impl fmt::Display for CypherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CypherType::*;

    #[test]
    fn join_numeric_pairs() {
        assert_eq!(Integer.join(Float), Number);
        assert_eq!(Float.join(Integer), Number);
        assert_eq!(Number.join(Integer), Number);
        assert_eq!(Number.join(Float), Number);
    }

    #[test]
    fn join_incompatible_pairs() {
        assert_eq!(String.join(Boolean), Any);
        assert_eq!(Boolean.join(Float), Any);
        assert_eq!(Null.join(Integer), Any);
        assert_eq!(String.join(Number), Any);
        assert_eq!(Any.join(Integer), Any);
        assert_eq!(Any.join(Any), Any);
    }

    #[test]
    fn join_idempotent() {
        for t in CypherType::ALL {
            assert_eq!(t.join(t), t);
        }
    }

    #[test]
    fn join_commutative() {
        for a in CypherType::ALL {
            for b in CypherType::ALL {
                assert_eq!(a.join(b), b.join(a), "join({a}, {b})");
            }
        }
    }

    #[test]
    fn join_associative() {
        for a in CypherType::ALL {
            for b in CypherType::ALL {
                for c in CypherType::ALL {
                    assert_eq!(
                        a.join(b).join(c),
                        a.join(b.join(c)),
                        "join({a}, {b}, {c})"
                    );
                }
            }
        }
    }

    #[test]
    fn inference_per_kind() {
        assert_eq!(CypherType::of(&PropertyValue::Null), Null);
        assert_eq!(CypherType::of(&PropertyValue::Boolean(true)), Boolean);
        assert_eq!(CypherType::of(&PropertyValue::Integer(1)), Integer);
        assert_eq!(CypherType::of(&PropertyValue::Float(1.2)), Float);
        assert_eq!(
            CypherType::of(&PropertyValue::String("s".into())),
            String
        );
        // Structured values have no lattice category of their own.
        assert_eq!(
            CypherType::of(&PropertyValue::List(vec![PropertyValue::Integer(1)])),
            Any
        );
    }

    #[test]
    fn names() {
        assert_eq!(Number.name(), "NUMBER");
        assert_eq!(Any.to_string(), "ANY");
    }
}
