//! The message interpolator.
//!
//! Interpolating a message descriptor runs in four steps:
//!
//! 1. Bundle resolution: `{key}` terms are replaced by bundle messages. The
//!    user bundle is searched first, recursively, then the contributor bundle
//!    (recursively, only when the user bundle changed nothing), then the
//!    default bundle (once, not recursively). Passes repeat until the default
//!    bundle has been consulted and a pass leaves the message unchanged. The
//!    outcome is cached per descriptor and locale.
//! 2. Attribute substitution: remaining `{name}` terms are replaced by the
//!    textual form of the constraint attribute `name`.
//! 3. Expression evaluation: in the same pass, `${...}` terms are handed to
//!    the configured [`ExpressionEvaluator`], unless expression language is
//!    disabled, in which case they are left as written.
//! 4. Unescaping: `\{`, `\}`, `\\` and `\$` become plain characters.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use bon::Builder;
use dashmap::DashMap;
use icu_locale_core::{Locale, locale};

use crate::interpreter::cache::LocalizedMessage;
use crate::interpreter::escape::{escape_meta_characters, unescape_literals};
use crate::interpreter::{
    EvaluationContext, ExpressionEvaluator, InterpolationError, MessageBundle, ResourceBundle,
    TokenIterator, VariableEvaluator,
};
use crate::parser::{InterpolationMode, tokenize};
use crate::types::{AttributeValue, ExpressionLanguageFeatureLevel, TokenKind};

/// Turns message descriptors into human-readable messages.
///
/// The interpolator is `Send + Sync` and meant to be shared. Its only mutable
/// state is the cache of bundle-resolved messages.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use std::sync::Arc;
///
/// use vmsg::{ExpressionLanguageFeatureLevel, Locale, MessageInterpolator, attributes};
///
/// let user = HashMap::from([(
///     "order.quantity".to_string(),
///     "quantity must be at most {max}".to_string(),
/// )]);
/// let interpolator = MessageInterpolator::builder()
///     .user_bundle(Arc::new(user))
///     .build();
///
/// let locale: Locale = "en".parse().unwrap();
/// let message = interpolator
///     .interpolate(
///         "{order.quantity}",
///         &attributes! { "max" => 10 },
///         &locale,
///         ExpressionLanguageFeatureLevel::None,
///     )
///     .unwrap();
/// assert_eq!(message, "quantity must be at most 10");
/// ```
#[derive(Builder)]
pub struct MessageInterpolator {
    /// Messages supplied by the application. Searched first.
    user_bundle: Option<Arc<dyn MessageBundle>>,

    /// Messages supplied by constraint libraries.
    contributor_bundle: Option<Arc<dyn MessageBundle>>,

    /// Messages for the built-in constraints.
    #[builder(default = builtin_bundle())]
    default_bundle: Arc<dyn MessageBundle>,

    /// Evaluator for `${...}` terms.
    #[builder(default = default_evaluator())]
    evaluator: Arc<dyn ExpressionEvaluator>,

    /// Whether bundle resolutions are cached.
    #[builder(default = true)]
    caching_enabled: bool,

    /// Locale used by [`MessageInterpolator::interpolate_default`].
    #[builder(default = locale!("en"))]
    default_locale: Locale,

    /// Upper bound on bundle resolution passes for one descriptor.
    #[builder(default = 64)]
    max_passes: usize,

    #[builder(skip)]
    resolved_messages: DashMap<LocalizedMessage, Arc<str>>,
}

impl Default for MessageInterpolator {
    fn default() -> Self {
        MessageInterpolator::builder().build()
    }
}

impl MessageInterpolator {
    /// Create an interpolator with the built-in bundle and no user bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpolate `template` for `locale`.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor, or a bundle message spliced into
    /// it, is malformed, or if bundle resolution does not settle.
    #[tracing::instrument(level = "debug", skip_all, fields(template = template, locale = %locale))]
    pub fn interpolate(
        &self,
        template: &str,
        attributes: &HashMap<String, AttributeValue>,
        locale: &Locale,
        level: ExpressionLanguageFeatureLevel,
    ) -> Result<String, InterpolationError> {
        let resolved = self.resolve_message(template, locale)?;
        let context = EvaluationContext::new(attributes, locale, level);
        let substituted = self.substitute_terms(&resolved, &context)?;
        Ok(unescape_literals(&substituted).into_owned())
    }

    /// Interpolate `template` for the configured default locale.
    pub fn interpolate_default(
        &self,
        template: &str,
        attributes: &HashMap<String, AttributeValue>,
        level: ExpressionLanguageFeatureLevel,
    ) -> Result<String, InterpolationError> {
        self.interpolate(template, attributes, &self.default_locale, level)
    }

    /// Interpolate `template`, falling back to the descriptor itself.
    ///
    /// Errors are logged at `warn` level and otherwise swallowed.
    pub fn interpolate_or_original(
        &self,
        template: &str,
        attributes: &HashMap<String, AttributeValue>,
        locale: &Locale,
        level: ExpressionLanguageFeatureLevel,
    ) -> String {
        self.interpolate(template, attributes, locale, level)
            .unwrap_or_else(|error| {
                tracing::warn!(%error, template, "returning message descriptor uninterpolated");
                template.to_string()
            })
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    pub fn caching_enabled(&self) -> bool {
        self.caching_enabled
    }

    /// Number of cached bundle resolutions.
    pub fn cached_messages(&self) -> usize {
        self.resolved_messages.len()
    }

    /// Drop all cached bundle resolutions.
    ///
    /// Call this after reloading a bundle the interpolator reads from.
    pub fn clear_cache(&self) {
        self.resolved_messages.clear();
    }

    // =========================================================================
    // Bundle resolution
    // =========================================================================

    /// Bundle-resolve `template`, going through the cache when enabled.
    ///
    /// Concurrent misses on the same key all resolve; the first insert wins
    /// and every caller returns the winning value.
    fn resolve_message(&self, template: &str, locale: &Locale) -> Result<Arc<str>, InterpolationError> {
        if !self.caching_enabled {
            return self.resolve_bundles(template, locale).map(Arc::from);
        }

        let key = LocalizedMessage::new(template, locale);
        if let Some(cached) = self.resolved_messages.get(&key) {
            tracing::debug!("resolved message cache hit");
            return Ok(Arc::clone(cached.value()));
        }
        tracing::debug!("resolved message cache miss");

        let resolved: Arc<str> = Arc::from(self.resolve_bundles(template, locale)?);
        let winner = self.resolved_messages.entry(key).or_insert(resolved);
        Ok(Arc::clone(winner.value()))
    }

    fn resolve_bundles(&self, template: &str, locale: &Locale) -> Result<String, InterpolationError> {
        let mut resolved = template.to_string();
        let mut consulted_default = false;

        for pass in 1..=self.max_passes {
            let mut from_user = replace_from_bundle(
                &resolved,
                self.user_bundle.as_deref(),
                locale,
                Recursion::Recursive,
            )?
            .into_owned();
            if from_user == resolved {
                from_user = replace_from_bundle(
                    &resolved,
                    self.contributor_bundle.as_deref(),
                    locale,
                    Recursion::Recursive,
                )?
                .into_owned();
            }

            if consulted_default && from_user == resolved {
                tracing::debug!(pass, "bundle resolution settled");
                return Ok(resolved);
            }

            let from_default = replace_from_bundle(
                &from_user,
                Some(self.default_bundle.as_ref()),
                locale,
                Recursion::Single,
            )?
            .into_owned();
            tracing::trace!(pass, message = %from_default, "bundle pass");
            resolved = from_default;
            consulted_default = true;
        }

        Err(InterpolationError::MaxPassesExceeded {
            template: template.to_string(),
            passes: self.max_passes,
        })
    }

    // =========================================================================
    // Term substitution
    // =========================================================================

    /// Replace `{name}` terms by attributes and `${...}` terms by the
    /// evaluator's result.
    ///
    /// Expression terms are always recognized, so a `${...}` span is never
    /// mistaken for `$` followed by a `{name}` term. They are only evaluated
    /// when expression language is enabled. Substituted values are escaped so
    /// they are never read as terms later.
    fn substitute_terms<'m>(
        &self,
        message: &'m str,
        context: &EvaluationContext<'_>,
    ) -> Result<Cow<'m, str>, InterpolationError> {
        let tokens = tokenize(message, InterpolationMode::ExpressionLanguage)?;
        let mut terms = TokenIterator::new(&tokens, message);
        while terms.has_more_terms() {
            let term = terms.current_term()?;
            let value = match terms.current_kind()? {
                TokenKind::ExpressionLanguage if context.feature_level().is_enabled() => {
                    let value = self.evaluator.evaluate(term, context);
                    if value.is_none() {
                        tracing::debug!(term, "expression left unevaluated");
                    }
                    value
                }
                TokenKind::Parameter => context
                    .attribute(strip_braces(term))
                    .and_then(AttributeValue::render),
                _ => None,
            };
            if let Some(value) = value {
                tracing::trace!(term, %value, "substituted term");
                terms.replace_current_term(&escape_meta_characters(&value))?;
            }
        }
        Ok(terms.finish()?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Recursion {
    /// Messages found in the bundle are themselves resolved against it.
    Recursive,
    /// Messages found in the bundle are spliced in as they are.
    Single,
}

/// Replace every `{key}` term of `message` that `bundle` defines.
fn replace_from_bundle<'m>(
    message: &'m str,
    bundle: Option<&dyn MessageBundle>,
    locale: &Locale,
    recursion: Recursion,
) -> Result<Cow<'m, str>, InterpolationError> {
    let Some(bundle) = bundle else {
        return Ok(Cow::Borrowed(message));
    };
    let mut chain = Vec::new();
    resolve_terms(message, bundle, locale, recursion, &mut chain)
}

/// `chain` holds the keys whose messages are being resolved, outermost first.
fn resolve_terms<'m>(
    message: &'m str,
    bundle: &dyn MessageBundle,
    locale: &Locale,
    recursion: Recursion,
    chain: &mut Vec<String>,
) -> Result<Cow<'m, str>, InterpolationError> {
    let tokens = tokenize(message, InterpolationMode::Parameter)?;
    let mut terms = TokenIterator::new(&tokens, message);
    while terms.has_more_terms() {
        let term = terms.current_term()?;
        let key = strip_braces(term);
        let Some(value) = bundle.lookup(key, locale) else {
            continue;
        };

        if recursion == Recursion::Single || value == term {
            terms.replace_current_term(&value)?;
            continue;
        }
        if chain.iter().any(|k| k == key) {
            let mut cycle = chain.clone();
            cycle.push(key.to_string());
            return Err(InterpolationError::CyclicBundleReference { chain: cycle });
        }
        chain.push(key.to_string());
        let nested = resolve_terms(&value, bundle, locale, recursion, chain)?;
        chain.pop();
        terms.replace_current_term(&nested)?;
    }
    Ok(terms.finish()?)
}

/// `{key}` -> `key`.
fn strip_braces(term: &str) -> &str {
    term.strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .unwrap_or(term)
}

fn builtin_bundle() -> Arc<dyn MessageBundle> {
    ResourceBundle::builtin()
}

fn default_evaluator() -> Arc<dyn ExpressionEvaluator> {
    Arc::new(VariableEvaluator)
}
