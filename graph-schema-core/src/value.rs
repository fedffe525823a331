//! Property values read from a graph source.
//!
//! A property map holds values of a small fixed set of primitive kinds:
//! null, boolean, 64-bit integer, 64-bit float, string, plus lists of the
//! same. Lists have no dedicated category in the type lattice and degrade
//! to `ANY` under inference.
//!
//! The serde representation is untagged, so a JSON graph document maps
//! directly: `null`, `true`, `42`, `1.5`, `"s"`, `[..]`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Property map of one entity: name → value, names unique.
pub type PropertyMap = FxHashMap<String, PropertyValue>;

/// Polymorphic property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Explicit null value.
    Null,
    /// Boolean value.
    Boolean(bool),
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(String),
    /// Homogeneous or mixed list of values.
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    /// Check if this is any numeric kind (Integer, Float).
    pub fn is_numeric(&self) -> bool {
        matches!(self, PropertyValue::Integer(_) | PropertyValue::Float(_))
    }

    /// Check if this is a string.
    pub fn is_string(&self) -> bool {
        matches!(self, PropertyValue::String(_))
    }

    /// Try to get as i64.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f64 (converts Integer to f64).
    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(v) => Some(*v),
            PropertyValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Try to get as string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Null => write!(f, "null"),
            PropertyValue::Boolean(b) => write!(f, "{}", b),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Float(d) => write!(f, "{}", d),
            PropertyValue::String(s) => write!(f, "\"{}\"", s),
            PropertyValue::List(vs) => {
                write!(f, "[")?;
                for (i, v) in vs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
        }
    }
}

// === Convenient From implementations ===

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        PropertyValue::Integer(i as i64)
    }
}

impl From<f64> for PropertyValue {
    fn from(d: f64) -> Self {
        PropertyValue::Float(d)
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(vs: Vec<PropertyValue>) -> Self {
        PropertyValue::List(vs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_json_round_trip() {
        let parsed: PropertyValue = serde_json::from_str("null").unwrap();
        assert_eq!(parsed, PropertyValue::Null);

        let parsed: PropertyValue = serde_json::from_str("true").unwrap();
        assert_eq!(parsed, PropertyValue::Boolean(true));

        // Integral JSON numbers parse as Integer, not Float.
        let parsed: PropertyValue = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, PropertyValue::Integer(42));

        let parsed: PropertyValue = serde_json::from_str("1.5").unwrap();
        assert_eq!(parsed, PropertyValue::Float(1.5));

        let parsed: PropertyValue = serde_json::from_str("\"s\"").unwrap();
        assert_eq!(parsed, PropertyValue::String("s".to_string()));

        let parsed: PropertyValue = serde_json::from_str("[1, \"a\"]").unwrap();
        assert_eq!(
            parsed,
            PropertyValue::List(vec![
                PropertyValue::Integer(1),
                PropertyValue::String("a".to_string())
            ])
        );
    }

    #[test]
    fn from_impls() {
        assert_eq!(PropertyValue::from(true), PropertyValue::Boolean(true));
        assert_eq!(PropertyValue::from(7i64), PropertyValue::Integer(7));
        assert_eq!(PropertyValue::from(7i32), PropertyValue::Integer(7));
        assert_eq!(PropertyValue::from(2.5), PropertyValue::Float(2.5));
        assert_eq!(
            PropertyValue::from("x"),
            PropertyValue::String("x".to_string())
        );
    }

    #[test]
    fn as_float_widens_integer() {
        assert_eq!(PropertyValue::Integer(3).as_float(), Some(3.0));
        assert_eq!(PropertyValue::Float(3.5).as_float(), Some(3.5));
        assert_eq!(PropertyValue::Boolean(true).as_float(), None);
    }
}
