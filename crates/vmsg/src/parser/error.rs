//! Parse error types for message descriptors and bundle files.

use thiserror::Error;

/// A malformed message descriptor.
///
/// Every variant carries the original, untokenized template so the failure can
/// point at the exact descriptor. Positions are character offsets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Input ended inside an interpolation term.
    #[error("the message descriptor '{template}' contains an unterminated term starting at position {position}")]
    UnterminatedTerm { position: usize, template: String },

    /// A `}` appeared outside of an interpolation term.
    #[error("the message descriptor '{template}' contains an unbalanced '{character}' at position {position}")]
    UnbalancedEndTerm {
        character: char,
        position: usize,
        template: String,
    },

    /// A `{` appeared inside an interpolation term.
    #[error("the message descriptor '{template}' contains a nested '{character}' at position {position}")]
    NestedTerm {
        character: char,
        position: usize,
        template: String,
    },
}

impl FormatError {
    /// The template that failed to tokenize.
    pub fn template(&self) -> &str {
        match self {
            FormatError::UnterminatedTerm { template, .. }
            | FormatError::UnbalancedEndTerm { template, .. }
            | FormatError::NestedTerm { template, .. } => template,
        }
    }

    /// Character offset of the offending character.
    pub fn position(&self) -> usize {
        match self {
            FormatError::UnterminatedTerm { position, .. }
            | FormatError::UnbalancedEndTerm { position, .. }
            | FormatError::NestedTerm { position, .. } => *position,
        }
    }
}

/// An error that occurred while parsing a `.properties` bundle.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A syntax error with location information.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// Unexpected end of input.
    #[error("unexpected end of input at {line}:{column}")]
    UnexpectedEof { line: usize, column: usize },

    /// Invalid UTF-8 in input.
    #[error("invalid UTF-8 in input")]
    InvalidUtf8,
}
