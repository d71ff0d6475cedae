//! Forward-only cursor over the interpolation terms of a token list.

use std::borrow::Cow;

use crate::interpreter::IllegalIteratorUse;
use crate::types::{Token, TokenKind};

/// Visits the interpolation terms of a token list and reassembles the message.
///
/// The output buffer is only allocated once a replacement actually differs
/// from the term it replaces. Until then [`TokenIterator::finish`] hands back
/// the original message without copying it.
///
/// # Example
///
/// ```
/// use vmsg::TokenIterator;
/// use vmsg::parser::{InterpolationMode, tokenize};
///
/// let message = "must be at least {min}";
/// let tokens = tokenize(message, InterpolationMode::Parameter).unwrap();
/// let mut terms = TokenIterator::new(&tokens, message);
///
/// while terms.has_more_terms() {
///     assert_eq!(terms.current_term().unwrap(), "{min}");
///     terms.replace_current_term("5").unwrap();
/// }
/// assert_eq!(terms.finish().unwrap(), "must be at least 5");
/// ```
#[derive(Debug)]
pub struct TokenIterator<'t, 'm> {
    tokens: &'t [Token],
    original: &'m str,
    /// Index of the next token to inspect.
    position: usize,
    /// Index of the term returned by the last `has_more_terms`, until it is
    /// replaced.
    current: Option<usize>,
    buffer: Option<String>,
    finished: bool,
}

impl<'t, 'm> TokenIterator<'t, 'm> {
    /// Create an iterator over `tokens`, which must be the tokenization of
    /// `original`.
    pub fn new(tokens: &'t [Token], original: &'m str) -> Self {
        Self {
            tokens,
            original,
            position: 0,
            current: None,
            buffer: None,
            finished: false,
        }
    }

    /// Advance to the next interpolation term.
    ///
    /// Literal tokens passed over are copied into the output buffer if one
    /// exists. Returns `false` once the token list is exhausted, after which
    /// [`TokenIterator::finish`] may be called.
    pub fn has_more_terms(&mut self) -> bool {
        self.keep_current_term();
        while let Some(token) = self.tokens.get(self.position) {
            self.position += 1;
            if token.is_term() {
                self.current = Some(self.position - 1);
                return true;
            }
            if let Some(buffer) = self.buffer.as_mut() {
                buffer.push_str(token.raw());
            }
        }
        self.finished = true;
        false
    }

    /// Value of the current term, braces included.
    ///
    /// Expression-language terms have their escaped braces unescaped. The
    /// reassembled message keeps the term as written.
    pub fn current_term(&self) -> Result<&'t str, IllegalIteratorUse> {
        self.current_token("current_term").map(Token::unescaped)
    }

    /// Kind of the current term.
    pub fn current_kind(&self) -> Result<TokenKind, IllegalIteratorUse> {
        self.current_token("current_kind").map(Token::kind)
    }

    /// Replace the current term with `value`.
    pub fn replace_current_term(&mut self, value: &str) -> Result<(), IllegalIteratorUse> {
        let index = self.current.take().ok_or(IllegalIteratorUse {
            operation: "replace_current_term",
            reason: "has_more_terms did not return true before this call",
        })?;
        let tokens = self.tokens;
        let term = tokens[index].raw();
        if value == term {
            if let Some(buffer) = self.buffer.as_mut() {
                buffer.push_str(term);
            }
            return Ok(());
        }

        let buffer = self
            .buffer
            .get_or_insert_with(|| tokens[..index].iter().map(Token::raw).collect());
        buffer.push_str(value);
        Ok(())
    }

    /// Whether a replacement forced the message to be rebuilt.
    pub fn is_rebuilt(&self) -> bool {
        self.buffer.is_some()
    }

    /// The reassembled message.
    ///
    /// Fails unless [`TokenIterator::has_more_terms`] has returned `false`.
    pub fn finish(self) -> Result<Cow<'m, str>, IllegalIteratorUse> {
        if !self.finished {
            return Err(IllegalIteratorUse {
                operation: "finish",
                reason: "interpolation terms remain to be visited",
            });
        }
        Ok(match self.buffer {
            Some(buffer) => Cow::Owned(buffer),
            None => Cow::Borrowed(self.original),
        })
    }

    fn current_token(&self, operation: &'static str) -> Result<&'t Token, IllegalIteratorUse> {
        let tokens = self.tokens;
        self.current
            .map(|index| &tokens[index])
            .ok_or(IllegalIteratorUse {
                operation,
                reason: "has_more_terms did not return true before this call",
            })
    }

    /// A term left without replacement keeps its own text.
    fn keep_current_term(&mut self) {
        let tokens = self.tokens;
        if let (Some(index), Some(buffer)) = (self.current.take(), self.buffer.as_mut()) {
            buffer.push_str(tokens[index].raw());
        }
    }
}
