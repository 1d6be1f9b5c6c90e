//! The closed set of value shapes a comparison can report on.
//!
//! Validators classify their values once, at the boundary, into a [`Value`].
//! The context generator then matches on the variant instead of inspecting
//! runtime types.

use std::fmt;

/// A value under comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Array(Vec<Value>),
}

impl Value {
    /// Whether a character-level diff says anything useful about this value.
    ///
    /// Booleans are reported flat: `true` vs `false` has nothing to align.
    pub const fn is_diffable(&self) -> bool {
        !matches!(self, Self::Boolean(_))
    }

    /// The elements of an array value.
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(elements) => Some(elements),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
            Self::Array(elements) => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    Self::Integer(i64::from(i))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(elements: Vec<T>) -> Self {
        Self::Array(elements.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Boolean(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Self::Integer)
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or_else(|| Self::Text(n.to_string())),
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(elements) => {
                Self::Array(elements.into_iter().map(Self::from).collect())
            }
            object @ serde_json::Value::Object(_) => Self::Text(object.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(-3).to_string(), "-3");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::from("text").to_string(), "text");
        assert_eq!(Value::from(vec![1, 2, 3]).to_string(), "[1, 2, 3]");
    }

    #[test]
    fn test_diffable() {
        assert!(!Value::from(false).is_diffable());
        assert!(Value::from("false").is_diffable());
        assert!(Value::Null.is_diffable());
    }

    #[test]
    fn test_from_json() {
        let value = Value::from(json!([1, "two", null, true, 2.5, {"k": 1}]));
        assert_eq!(
            value,
            Value::Array(vec![
                Value::Integer(1),
                Value::Text("two".to_owned()),
                Value::Null,
                Value::Boolean(true),
                Value::Float(2.5),
                Value::Text(r#"{"k":1}"#.to_owned()),
            ])
        );
    }
}
