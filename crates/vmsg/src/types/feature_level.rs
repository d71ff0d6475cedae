use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How much of the expression language a message may use.
///
/// Only the distinction between [`ExpressionLanguageFeatureLevel::None`] and
/// every other level matters to the interpolator: `None` disables the
/// expression-language pass entirely. Finer restrictions are enforced by the
/// [`ExpressionEvaluator`](crate::ExpressionEvaluator) in use.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ExpressionLanguageFeatureLevel {
    /// `${...}` terms are never recognized.
    None,
    /// Only variables such as `${validatedValue}` may be referenced.
    Variables,
    /// Variables plus property access.
    #[default]
    BeanProperties,
    /// Everything, including method invocation.
    BeanMethods,
}

impl ExpressionLanguageFeatureLevel {
    /// Whether `${...}` terms are recognized at all.
    pub fn is_enabled(self) -> bool {
        self != ExpressionLanguageFeatureLevel::None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExpressionLanguageFeatureLevel::None => "none",
            ExpressionLanguageFeatureLevel::Variables => "variables",
            ExpressionLanguageFeatureLevel::BeanProperties => "bean-properties",
            ExpressionLanguageFeatureLevel::BeanMethods => "bean-methods",
        }
    }
}

impl Display for ExpressionLanguageFeatureLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpressionLanguageFeatureLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "none" => Ok(ExpressionLanguageFeatureLevel::None),
            "variables" => Ok(ExpressionLanguageFeatureLevel::Variables),
            "bean-properties" => Ok(ExpressionLanguageFeatureLevel::BeanProperties),
            "bean-methods" => Ok(ExpressionLanguageFeatureLevel::BeanMethods),
            other => Err(format!(
                "unknown expression language feature level '{other}', expected one of: none, variables, bean-properties, bean-methods"
            )),
        }
    }
}
