//! Miette diagnostic wrapper for bundle errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;
use vmsg::{FormatError, ParseError};

/// A miette-compatible diagnostic for a defect in a bundle file.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(vmsg::bundle))]
pub struct BundleDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("{label}")]
    span: SourceSpan,

    message: String,

    label: String,

    #[help]
    help: Option<String>,
}

impl BundleDiagnostic {
    /// Create a diagnostic from a properties ParseError with source context.
    pub fn from_parse_error(path: &Path, content: &str, err: &ParseError) -> Self {
        let (line, column, message) = match err {
            ParseError::Syntax {
                line,
                column,
                message,
            } => (*line, *column, message.clone()),
            ParseError::UnexpectedEof { line, column } => {
                (*line, *column, "unexpected end of file".into())
            }
            ParseError::InvalidUtf8 => (1, 1, "invalid UTF-8".into()),
        };

        // Clamp offset to content length to avoid miette panic on out-of-bounds
        let offset = (line_offset(content, line) + column.saturating_sub(1)).min(content.len());

        BundleDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, 1).into(),
            message: format!("syntax error: {message}"),
            label: "error here".to_string(),
            help: None,
        }
    }

    /// Create a diagnostic for a malformed message stored under `key`, whose
    /// entry starts on `line`.
    pub fn from_format_error(
        path: &Path,
        content: &str,
        line: usize,
        key: &str,
        err: &FormatError,
    ) -> Self {
        let offset = line_offset(content, line).min(content.len());
        let length = content[offset..].lines().next().map_or(0, str::len);

        let help = match err {
            FormatError::UnbalancedEndTerm { .. } | FormatError::NestedTerm { .. } => {
                Some(r"write literal braces as \\{ and \\} in bundle files".to_string())
            }
            FormatError::UnterminatedTerm { .. } => {
                Some("close the term with '}' or escape its '{'".to_string())
            }
        };

        BundleDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, length).into(),
            message: format!("malformed message '{key}': {err}"),
            label: format!("character {} of this message", err.position()),
            help,
        }
    }
}

/// Byte offset of the start of 1-based `line`.
fn line_offset(content: &str, line: usize) -> usize {
    content
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_offset_counts_bytes() {
        let content = "a = ä\nb = 2\nc = 3";
        assert_eq!(line_offset(content, 1), 0);
        assert_eq!(line_offset(content, 2), 7);
        assert_eq!(line_offset(content, 3), 13);
    }
}
