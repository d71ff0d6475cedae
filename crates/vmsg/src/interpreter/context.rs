//! Evaluation context handed to expression evaluators.

use std::collections::HashMap;

use icu_locale_core::Locale;

use crate::types::{AttributeValue, ExpressionLanguageFeatureLevel};

/// What an expression evaluator may see while resolving a `${...}` term.
///
/// The context borrows the attributes and locale of a single
/// [`interpolate`](crate::MessageInterpolator::interpolate) call.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    attributes: &'a HashMap<String, AttributeValue>,
    locale: &'a Locale,
    feature_level: ExpressionLanguageFeatureLevel,
}

impl<'a> EvaluationContext<'a> {
    pub fn new(
        attributes: &'a HashMap<String, AttributeValue>,
        locale: &'a Locale,
        feature_level: ExpressionLanguageFeatureLevel,
    ) -> Self {
        Self {
            attributes,
            locale,
            feature_level,
        }
    }

    /// Get an attribute of the violated constraint.
    pub fn attribute(&self, name: &str) -> Option<&'a AttributeValue> {
        self.attributes.get(name)
    }

    /// All attributes of the violated constraint.
    pub fn attributes(&self) -> &'a HashMap<String, AttributeValue> {
        self.attributes
    }

    /// Locale the message is being interpolated for.
    pub fn locale(&self) -> &'a Locale {
        self.locale
    }

    /// How much of the expression language the evaluator may use.
    pub fn feature_level(&self) -> ExpressionLanguageFeatureLevel {
        self.feature_level
    }
}
