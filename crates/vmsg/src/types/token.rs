use serde::{Deserialize, Serialize};

use crate::interpreter::IllegalIteratorUse;

/// The role a token plays in a message descriptor.
///
/// A token starts out as a literal and may be promoted exactly once, either to
/// a parameter (`{name}`) or to an expression-language term (`${expr}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TokenKind {
    /// Plain message text.
    #[default]
    Literal,
    /// A `{name}` term resolved by bundle or attribute lookup.
    Parameter,
    /// A `${expr}` term handed to an expression evaluator.
    ExpressionLanguage,
}

/// A unit of message text produced by the tokenizer.
///
/// Text can only be appended while the token is open. Once [`Token::terminate`]
/// has been called the value is frozen; expression-language tokens have their
/// escaped braces (`\{`, `\}`) unescaped at that moment, exactly once. The
/// source text is kept alongside, so a message can be reassembled as written.
///
/// # Example
///
/// ```
/// use vmsg::{Token, TokenKind};
///
/// let mut token = Token::new();
/// for c in "{min}".chars() {
///     token.append(c);
/// }
/// token.mark_parameter();
/// token.terminate();
///
/// assert_eq!(token.kind(), TokenKind::Parameter);
/// assert_eq!(token.value().unwrap(), "{min}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Token {
    text: String,
    /// Brace-unescaped value of a terminated expression-language token.
    unescaped: Option<String>,
    kind: TokenKind,
    terminated: bool,
}

impl Token {
    /// Create an empty, open literal token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a terminated literal token holding `text`.
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            unescaped: None,
            kind: TokenKind::Literal,
            terminated: true,
        }
    }

    /// Append a character. Characters appended after termination are ignored.
    pub fn append(&mut self, c: char) {
        if !self.terminated {
            self.text.push(c);
        }
    }

    /// Promote a literal token to a parameter term.
    pub fn mark_parameter(&mut self) {
        if self.kind == TokenKind::Literal {
            self.kind = TokenKind::Parameter;
        }
    }

    /// Promote the token to an expression-language term.
    pub fn mark_expression_language(&mut self) {
        self.kind = TokenKind::ExpressionLanguage;
    }

    /// Freeze the token value. Calling this more than once has no effect.
    pub fn terminate(&mut self) {
        if self.terminated {
            return;
        }
        if self.kind == TokenKind::ExpressionLanguage {
            self.unescaped = Some(unescape_braces(&self.text));
        }
        self.terminated = true;
    }

    /// The frozen token value.
    ///
    /// Fails if the token has not been terminated yet.
    pub fn value(&self) -> Result<&str, IllegalIteratorUse> {
        if self.terminated {
            Ok(self.unescaped())
        } else {
            Err(IllegalIteratorUse {
                operation: "Token::value",
                reason: "the token has not been terminated",
            })
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Whether this token is an interpolation term of either kind.
    pub fn is_term(&self) -> bool {
        self.kind != TokenKind::Literal
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Source text accumulated so far, escapes intact.
    pub(crate) fn raw(&self) -> &str {
        &self.text
    }

    /// The value with expression-language braces unescaped, once terminated.
    pub(crate) fn unescaped(&self) -> &str {
        self.unescaped.as_deref().unwrap_or(&self.text)
    }
}

/// `\{` -> `{` and `\}` -> `}`. Any other escape pair, `\\` included, is kept
/// as written.
fn unescape_braces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        let escaped = if c == '\\' { chars.next() } else { None };
        match escaped {
            Some(next @ ('{' | '}')) => out.push(next),
            Some(next) => {
                out.push(c);
                out.push(next);
            }
            None => out.push(c),
        }
    }
    out
}
