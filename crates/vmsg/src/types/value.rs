use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// The value of a single attribute of a violated constraint.
///
/// Attribute values are substituted into `{name}` terms by their textual form.
/// A [`AttributeValue::Null`] attribute has no textual form, so the term it
/// would replace is left untouched.
///
/// # Example
///
/// ```
/// use vmsg::AttributeValue;
///
/// let max: AttributeValue = 10.into();
/// let groups: AttributeValue = vec!["a", "b"].into();
///
/// assert_eq!(max.render().as_deref(), Some("10"));
/// assert_eq!(groups.render().as_deref(), Some("[a, b]"));
/// assert_eq!(AttributeValue::Null.render(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// An absent value.
    Null,

    /// A boolean flag.
    Bool(bool),

    /// An integer number.
    Integer(i64),

    /// A floating-point number.
    Float(f64),

    /// A string value.
    String(String),

    /// A single character.
    ///
    /// Never produced by deserialization: a one-character JSON string decodes
    /// as [`AttributeValue::String`], which renders the same.
    #[serde(skip_deserializing)]
    Char(char),

    /// A list of values, rendered as `[a, b, c]`.
    List(Vec<AttributeValue>),
}

impl AttributeValue {
    /// The text substituted for a `{name}` term, if this value has one.
    pub fn render(&self) -> Option<String> {
        match self {
            AttributeValue::Null => None,
            other => Some(other.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    /// Get this value as an integer, if it is one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Get this value as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Display for AttributeValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AttributeValue::Null => write!(f, "null"),
            AttributeValue::Bool(b) => write!(f, "{b}"),
            AttributeValue::Integer(n) => write!(f, "{n}"),
            AttributeValue::Float(n) => write!(f, "{n}"),
            AttributeValue::String(s) => write!(f, "{s}"),
            AttributeValue::Char(c) => write!(f, "{c}"),
            AttributeValue::List(items) => {
                write!(f, "[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

// From implementations for common types

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Bool(b)
    }
}

impl From<char> for AttributeValue {
    fn from(c: char) -> Self {
        AttributeValue::Char(c)
    }
}

impl From<i8> for AttributeValue {
    fn from(n: i8) -> Self {
        AttributeValue::Integer(i64::from(n))
    }
}

impl From<i16> for AttributeValue {
    fn from(n: i16) -> Self {
        AttributeValue::Integer(i64::from(n))
    }
}

impl From<i32> for AttributeValue {
    fn from(n: i32) -> Self {
        AttributeValue::Integer(i64::from(n))
    }
}

impl From<i64> for AttributeValue {
    fn from(n: i64) -> Self {
        AttributeValue::Integer(n)
    }
}

impl From<u8> for AttributeValue {
    fn from(n: u8) -> Self {
        AttributeValue::Integer(i64::from(n))
    }
}

impl From<u16> for AttributeValue {
    fn from(n: u16) -> Self {
        AttributeValue::Integer(i64::from(n))
    }
}

impl From<u32> for AttributeValue {
    fn from(n: u32) -> Self {
        AttributeValue::Integer(i64::from(n))
    }
}

impl From<u64> for AttributeValue {
    fn from(n: u64) -> Self {
        AttributeValue::Integer(n as i64)
    }
}

impl From<usize> for AttributeValue {
    fn from(n: usize) -> Self {
        AttributeValue::Integer(n as i64)
    }
}

impl From<f32> for AttributeValue {
    fn from(n: f32) -> Self {
        // Go through the shortest decimal form so 10.1f32 renders as "10.1".
        AttributeValue::Float(n.to_string().parse().unwrap_or(f64::from(n)))
    }
}

impl From<f64> for AttributeValue {
    fn from(n: f64) -> Self {
        AttributeValue::Float(n)
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::String(s)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::String(s.to_string())
    }
}

impl<T: Into<AttributeValue>> From<Vec<T>> for AttributeValue {
    fn from(items: Vec<T>) -> Self {
        AttributeValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(AttributeValue::Null, Into::into)
    }
}
