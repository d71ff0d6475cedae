//! Error types for the interpolator.

use std::path::PathBuf;

use thiserror::Error;

use crate::parser::FormatError;

/// Errors that occur while loading a resource bundle.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading a bundle file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Parse error with file location context.
    #[error("{path}:{line}:{column}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// A bundle file name carries a locale suffix that is not a valid locale.
    #[error("'{path}' has an invalid locale suffix '{suffix}'")]
    InvalidLocale { path: PathBuf, suffix: String },

    /// Attempted to reload a locale that was loaded from a string.
    #[error("cannot reload '{locale}': was loaded from string, not file")]
    NoPathForReload { locale: String },
}

/// A discrepancy between a locale's table and the root table of a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BundleWarning {
    /// The root table defines a key the locale's table lacks.
    #[error("'{locale}' is missing key '{key}'")]
    MissingKey { key: String, locale: String },

    /// The locale's table defines a key the root table does not.
    #[error("'{locale}' defines key '{key}' which the root bundle does not")]
    UnknownKey { key: String, locale: String },
}

/// A call on a token or token iterator made out of the required sequence.
///
/// This is a programming error in the caller, not a template defect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal call to `{operation}`: {reason}")]
pub struct IllegalIteratorUse {
    pub operation: &'static str,
    pub reason: &'static str,
}

/// An error that occurred during message interpolation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpolationError {
    /// The message descriptor, or a bundle value spliced into it, is malformed.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// A token or token iterator was driven out of sequence.
    #[error(transparent)]
    IllegalIteratorUse(#[from] IllegalIteratorUse),

    /// A user or contributor bundle value refers back to itself.
    #[error("cyclic bundle reference detected: {}", chain.join(" -> "))]
    CyclicBundleReference { chain: Vec<String> },

    /// Bundle resolution kept changing the message.
    #[error("bundle resolution of '{template}' did not settle after {passes} passes")]
    MaxPassesExceeded { template: String, passes: usize },
}
