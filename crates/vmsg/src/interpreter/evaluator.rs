//! Expression-language evaluation.
//!
//! The interpolator does not interpret `${...}` terms itself. Each term is
//! handed to an [`ExpressionEvaluator`], which either produces the text to
//! substitute or declines, leaving the term in the message as written.

use crate::interpreter::EvaluationContext;
use crate::types::ExpressionLanguageFeatureLevel;

/// Resolves `${...}` expression terms.
pub trait ExpressionEvaluator: Send + Sync {
    /// Evaluate `expression`, the full term text including `${` and `}`.
    ///
    /// Returns `None` to leave the term untouched.
    fn evaluate(&self, expression: &str, context: &EvaluationContext<'_>) -> Option<String>;
}

/// Resolves `${name}` against the constraint attributes.
///
/// Only bare names are understood; operators, method calls and property
/// paths are declined. Requires [`ExpressionLanguageFeatureLevel::Variables`]
/// or above.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
///
/// use vmsg::{
///     AttributeValue, EvaluationContext, ExpressionEvaluator, ExpressionLanguageFeatureLevel,
///     Locale, VariableEvaluator,
/// };
///
/// let attributes = HashMap::from([("max".to_string(), AttributeValue::from(10))]);
/// let locale: Locale = "en".parse().unwrap();
/// let context =
///     EvaluationContext::new(&attributes, &locale, ExpressionLanguageFeatureLevel::Variables);
///
/// assert_eq!(VariableEvaluator.evaluate("${max}", &context).as_deref(), Some("10"));
/// assert_eq!(VariableEvaluator.evaluate("${max + 1}", &context), None);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct VariableEvaluator;

impl ExpressionEvaluator for VariableEvaluator {
    fn evaluate(&self, expression: &str, context: &EvaluationContext<'_>) -> Option<String> {
        if context.feature_level() < ExpressionLanguageFeatureLevel::Variables {
            return None;
        }
        let name = expression
            .strip_prefix("${")
            .and_then(|rest| rest.strip_suffix('}'))?
            .trim();
        if !is_identifier(name) {
            return None;
        }
        context.attribute(name).and_then(|value| value.render())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}
