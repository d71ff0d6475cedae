//! Constraint-violation message interpolation.
//!
//! A message descriptor such as `"{constraints.Size.message}"` is turned into
//! `"size must be between 2 and 10"` by resolving bundle keys, substituting
//! the attributes of the violated constraint and evaluating `${...}`
//! expressions. See [`MessageInterpolator`].

pub mod interpreter;
pub mod parser;
pub mod types;

pub use icu_locale_core::Locale;
pub use interpreter::{
    BundleWarning, EvaluationContext, ExpressionEvaluator, IllegalIteratorUse, InterpolationError,
    LoadError, MessageBundle, MessageInterpolator, ResourceBundle, TokenIterator,
    VariableEvaluator,
};
pub use parser::{FormatError, ParseError};
pub use types::{AttributeValue, ExpressionLanguageFeatureLevel, Token, TokenKind};

/// Creates a `HashMap<String, AttributeValue>` of constraint attributes.
///
/// Values are converted via `Into<AttributeValue>`, so integers, floats,
/// strings, lists and `Option`s can be passed directly.
///
/// # Example
///
/// ```
/// use vmsg::{AttributeValue, attributes};
///
/// let a = attributes! { "min" => 2, "max" => 10, "regexp" => "[a-z]+" };
/// assert_eq!(a.len(), 3);
/// assert_eq!(a["max"].as_integer(), Some(10));
/// assert_eq!(a["regexp"].as_str(), Some("[a-z]+"));
/// ```
#[macro_export]
macro_rules! attributes {
    {} => {
        ::std::collections::HashMap::<String, $crate::AttributeValue>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, $crate::AttributeValue>::new();
            $(
                map.insert(
                    $key.to_string(),
                    ::std::convert::Into::<$crate::AttributeValue>::into($value),
                );
            )+
            map
        }
    };
}
