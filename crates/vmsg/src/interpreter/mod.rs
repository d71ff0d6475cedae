//! Message interpolation.
//!
//! This module resolves message descriptors into messages: it walks their
//! terms with a [`TokenIterator`], looks keys up in [`MessageBundle`]s,
//! substitutes constraint attributes and hands expression terms to an
//! [`ExpressionEvaluator`].

mod bundle;
mod cache;
mod context;
mod error;
mod escape;
mod evaluator;
mod resolver;
mod token_iterator;

pub use bundle::{MessageBundle, ResourceBundle, fallback_chain};
pub use context::EvaluationContext;
pub use error::{BundleWarning, IllegalIteratorUse, InterpolationError, LoadError};
pub use escape::{escape_meta_characters, unescape_literals};
pub use evaluator::{ExpressionEvaluator, VariableEvaluator};
pub use resolver::MessageInterpolator;
pub use token_iterator::TokenIterator;
