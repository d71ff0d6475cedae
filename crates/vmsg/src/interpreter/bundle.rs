//! Resource bundles: locale-keyed message tables.
//!
//! The interpolator only sees the [`MessageBundle`] trait. [`ResourceBundle`]
//! is the bundled implementation, backed by `.properties` files or strings.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use icu_locale_core::{Locale, locale};

use crate::interpreter::error::{BundleWarning, LoadError};
use crate::parser::{ParseError, parse_properties};

const DEFAULT_MESSAGES: &str = include_str!("../../resources/ValidationMessages.properties");
const DEFAULT_MESSAGES_DE: &str = include_str!("../../resources/ValidationMessages_de.properties");

static BUILTIN: LazyLock<Arc<ResourceBundle>> = LazyLock::new(|| Arc::new(load_builtin()));

/// A source of message text keyed by message key and locale.
pub trait MessageBundle: Send + Sync {
    /// Look up the message for `key` in `locale`, falling back as the bundle
    /// sees fit. Returns `None` if the bundle has no such key.
    fn lookup(&self, key: &str, locale: &Locale) -> Option<String>;
}

/// A flat table that ignores the locale.
impl MessageBundle for HashMap<String, String> {
    fn lookup(&self, key: &str, _locale: &Locale) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Locale-scoped message tables with `lang-REGION` → `lang` → root fallback.
///
/// Loading the same locale twice **replaces** all of its previous messages.
///
/// # Example
///
/// ```
/// use icu_locale_core::locale;
/// use vmsg::{MessageBundle, ResourceBundle};
///
/// let mut bundle = ResourceBundle::new();
/// bundle.load_str(None, "greeting = hello").unwrap();
/// bundle.load_str(Some(&locale!("de")), "greeting = hallo").unwrap();
///
/// assert_eq!(bundle.lookup("greeting", &locale!("de-AT")).as_deref(), Some("hallo"));
/// assert_eq!(bundle.lookup("greeting", &locale!("fr")).as_deref(), Some("hello"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResourceBundle {
    /// Message tables keyed by bundle tag; the root table has the empty tag.
    tables: HashMap<String, HashMap<String, String>>,

    /// File paths for reload support: bundle tag -> PathBuf.
    /// Only populated for file-loaded tables.
    loaded_paths: HashMap<String, PathBuf>,
}

impl ResourceBundle {
    /// Create an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in catalog of standard constraint messages (English root,
    /// German).
    ///
    /// Parsed on first use and shared afterwards.
    pub fn builtin() -> Arc<Self> {
        Arc::clone(&BUILTIN)
    }

    /// Load every `<base_name>[_<locale>].properties` file in `dir`.
    ///
    /// `ValidationMessages.properties` becomes the root table,
    /// `ValidationMessages_de_CH.properties` the `de-CH` table.
    pub fn load_dir(dir: impl AsRef<Path>, base_name: &str) -> Result<Self, LoadError> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|e| LoadError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let mut bundle = Self::new();
        for entry in entries {
            let path = entry
                .map_err(|e| LoadError::Io {
                    path: dir.to_path_buf(),
                    source: e,
                })?
                .path();
            let Some(suffix) = bundle_suffix(&path, base_name) else {
                continue;
            };
            let locale = if suffix.is_empty() {
                None
            } else {
                let locale = suffix.replace('_', "-").parse::<Locale>().map_err(|_| {
                    LoadError::InvalidLocale {
                        path: path.clone(),
                        suffix: suffix.to_string(),
                    }
                })?;
                Some(locale)
            };
            let count = bundle.load_file(locale.as_ref(), &path)?;
            tracing::debug!(path = %path.display(), count, "loaded bundle file");
        }
        Ok(bundle)
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Load messages from a file into the table for `locale` (`None` for the
    /// root table).
    ///
    /// The file path is stored for later [`ResourceBundle::reload`] support.
    pub fn load_file(
        &mut self,
        locale: Option<&Locale>,
        path: impl AsRef<Path>,
    ) -> Result<usize, LoadError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let content = String::from_utf8(bytes)
            .map_err(|_| parse_load_error(path.to_path_buf(), ParseError::InvalidUtf8))?;

        let tag = table_tag(locale);
        let count = self.load_table(&tag, &content, Some(path))?;
        self.loaded_paths.insert(tag, path.to_path_buf());
        Ok(count)
    }

    /// Load messages from a string into the table for `locale` (`None` for
    /// the root table).
    ///
    /// Tables loaded this way cannot be reloaded.
    pub fn load_str(&mut self, locale: Option<&Locale>, content: &str) -> Result<usize, LoadError> {
        let tag = table_tag(locale);
        self.loaded_paths.remove(&tag);
        self.load_table(&tag, content, None)
    }

    /// Reload the table for `locale` from the file it was loaded from.
    pub fn reload(&mut self, locale: Option<&Locale>) -> Result<usize, LoadError> {
        let tag = table_tag(locale);
        let path = self
            .loaded_paths
            .get(&tag)
            .cloned()
            .ok_or_else(|| LoadError::NoPathForReload {
                locale: display_tag(&tag).to_string(),
            })?;
        self.load_file(locale, path)
    }

    /// Insert a single message into the table for `locale`.
    pub fn insert(&mut self, locale: Option<&Locale>, key: impl Into<String>, value: impl Into<String>) {
        self.tables
            .entry(table_tag(locale))
            .or_default()
            .insert(key.into(), value.into());
    }

    fn load_table(&mut self, tag: &str, content: &str, path: Option<&Path>) -> Result<usize, LoadError> {
        let entries = parse_properties(content).map_err(|e| {
            let default_path = PathBuf::from(format!("<{}>", display_tag(tag)));
            parse_load_error(path.map(Path::to_path_buf).unwrap_or(default_path), e)
        })?;

        let table: HashMap<String, String> = entries
            .into_iter()
            .map(|entry| (entry.key, entry.value))
            .collect();
        let count = table.len();
        self.tables.insert(tag.to_string(), table);
        Ok(count)
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Tags of all loaded tables, sorted; the root table is `""`.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Keys defined directly in the table for `tag`, sorted.
    pub fn keys(&self, tag: &str) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .tables
            .get(tag)
            .map(|table| table.keys().map(String::as_str).collect())
            .unwrap_or_default();
        keys.sort_unstable();
        keys
    }

    /// Look up `key` in exactly the table for `tag`, without fallback.
    pub fn get(&self, tag: &str, key: &str) -> Option<&str> {
        self.tables
            .get(tag)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }

    /// Compare the table for `tag` against the root table.
    ///
    /// Reports root keys the table lacks and table keys the root does not
    /// define. Returns an empty vector if either table is not loaded.
    pub fn validate(&self, tag: &str) -> Vec<BundleWarning> {
        let (Some(root), Some(table)) = (self.tables.get(""), self.tables.get(tag)) else {
            return Vec::new();
        };
        let locale = display_tag(tag).to_string();

        let root_keys: BTreeSet<&String> = root.keys().collect();
        let table_keys: BTreeSet<&String> = table.keys().collect();

        let missing = root_keys
            .difference(&table_keys)
            .map(|key| BundleWarning::MissingKey {
                key: (*key).clone(),
                locale: locale.clone(),
            });
        let unknown = table_keys
            .difference(&root_keys)
            .map(|key| BundleWarning::UnknownKey {
                key: (*key).clone(),
                locale: locale.clone(),
            });
        missing.chain(unknown).collect()
    }
}

impl MessageBundle for ResourceBundle {
    fn lookup(&self, key: &str, locale: &Locale) -> Option<String> {
        fallback_chain(locale)
            .iter()
            .find_map(|tag| self.get(tag, key))
            .map(str::to_string)
    }
}

/// Table tags to search for `locale`, most specific first.
pub fn fallback_chain(locale: &Locale) -> Vec<String> {
    let language = locale.id.language.as_str();
    let mut chain = Vec::with_capacity(3);
    if language != "und" {
        if let Some(region) = locale.id.region {
            chain.push(format!("{language}-{}", region.as_str()));
        }
        chain.push(language.to_string());
    }
    chain.push(String::new());
    chain
}

/// Table tag for a locale: `lang` or `lang-REGION`, `""` for the root.
fn table_tag(locale: Option<&Locale>) -> String {
    locale
        .and_then(|locale| fallback_chain(locale).into_iter().next())
        .unwrap_or_default()
}

fn display_tag(tag: &str) -> &str {
    if tag.is_empty() { "root" } else { tag }
}

/// The locale suffix of a bundle file name, `""` for the root file.
fn bundle_suffix<'p>(path: &'p Path, base_name: &str) -> Option<&'p str> {
    if path.extension().and_then(|ext| ext.to_str()) != Some("properties") {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let rest = stem.strip_prefix(base_name)?;
    if rest.is_empty() {
        Some(rest)
    } else {
        rest.strip_prefix('_').filter(|suffix| !suffix.is_empty())
    }
}

fn load_builtin() -> ResourceBundle {
    let mut bundle = ResourceBundle::new();
    let tables = [(None, DEFAULT_MESSAGES), (Some(locale!("de")), DEFAULT_MESSAGES_DE)];
    for (locale, content) in tables {
        if let Err(error) = bundle.load_str(locale.as_ref(), content) {
            tracing::error!(%error, "skipping malformed built-in catalog table");
        }
    }
    bundle
}

fn parse_load_error(path: PathBuf, error: ParseError) -> LoadError {
    match error {
        ParseError::Syntax {
            line,
            column,
            message,
        } => LoadError::Parse {
            path,
            line,
            column,
            message,
        },
        ParseError::UnexpectedEof { line, column } => LoadError::Parse {
            path,
            line,
            column,
            message: "unexpected end of file".to_string(),
        },
        ParseError::InvalidUtf8 => LoadError::Parse {
            path,
            line: 0,
            column: 0,
            message: "invalid UTF-8".to_string(),
        },
    }
}
