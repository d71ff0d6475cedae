//! Key of the resolved-message cache.

use icu_locale_core::Locale;

/// A message descriptor as requested for one locale.
///
/// Bundle resolution depends only on the descriptor and the locale, so the
/// pair identifies a cached resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct LocalizedMessage {
    message: String,
    locale: Locale,
}

impl LocalizedMessage {
    pub(crate) fn new(message: &str, locale: &Locale) -> Self {
        Self {
            message: message.to_string(),
            locale: locale.clone(),
        }
    }
}
