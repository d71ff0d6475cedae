//! Message descriptor tokenizer and bundle file parser.
//!
//! The tokenizer splits a message descriptor into literal and term tokens; the
//! properties parser reads `.properties` resource bundles.

pub mod error;
mod properties;
mod tokenizer;

pub use error::{FormatError, ParseError};
pub use properties::{PropertyEntry, parse_properties};
pub use tokenizer::{InterpolationMode, tokenize};
