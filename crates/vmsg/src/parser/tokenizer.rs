//! Finite-state tokenizer for message descriptors.
//!
//! A message descriptor is plain text with `{name}` parameter terms and, when
//! expression language is enabled, `${expr}` terms. `\` escapes the next
//! character. The escape character is kept in the token text; it is removed
//! only by the final unescape pass of the interpolator, so that text can be
//! tokenized repeatedly without losing its escapes.
//!
//! The scanner has five states:
//! - `Begin`: at the start of the input or right after a term
//! - `Message`: inside literal text
//! - `InterpolationTerm`: between `{` and `}`
//! - `El`: just after an unescaped `$` (expression-language mode only)
//! - `Escaped`: just after `\`, remembering which state to return to

use crate::parser::error::FormatError;
use crate::types::Token;

const BEGIN_TERM: char = '{';
const END_TERM: char = '}';
const EL_DESIGNATOR: char = '$';
const ESCAPE: char = '\\';

/// Which kinds of interpolation term the tokenizer recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterpolationMode {
    /// Only `{name}` terms. `$` is an ordinary character.
    Parameter,
    /// `{name}` and `${expr}` terms.
    ExpressionLanguage,
}

/// Tokenize a message descriptor.
///
/// Returns the ordered token list. Concatenating the token values reproduces
/// the input, except that expression-language tokens have `\{` and `\}`
/// unescaped.
///
/// # Errors
///
/// Returns a [`FormatError`] for an unterminated term, a `}` outside a term,
/// or a `{` nested inside a term.
///
/// # Example
///
/// ```
/// use vmsg::TokenKind;
/// use vmsg::parser::{InterpolationMode, tokenize};
///
/// let tokens = tokenize("size must be between {min} and {max}", InterpolationMode::Parameter).unwrap();
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind()).collect();
/// assert_eq!(
///     kinds,
///     vec![TokenKind::Literal, TokenKind::Parameter, TokenKind::Literal, TokenKind::Parameter]
/// );
/// ```
pub fn tokenize(template: &str, mode: InterpolationMode) -> Result<Vec<Token>, FormatError> {
    Scanner::new(template, mode).run()
}

/// Scanner state. `Escaped` records where to go once the escaped character
/// has been consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Begin,
    Message,
    InterpolationTerm,
    El,
    Escaped { return_to: Resume },
}

/// States an escape sequence can return to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resume {
    Begin,
    Message,
    InterpolationTerm,
}

impl Resume {
    fn state(self) -> State {
        match self {
            Resume::Begin => State::Begin,
            Resume::Message => State::Message,
            Resume::InterpolationTerm => State::InterpolationTerm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    BeginTerm,
    EndTerm,
    ElDesignator,
    Escape,
    Plain,
}

impl CharClass {
    fn of(c: char) -> Self {
        match c {
            BEGIN_TERM => CharClass::BeginTerm,
            END_TERM => CharClass::EndTerm,
            EL_DESIGNATOR => CharClass::ElDesignator,
            ESCAPE => CharClass::Escape,
            _ => CharClass::Plain,
        }
    }
}

/// State owned by a single tokenizer run.
struct Scanner<'a> {
    template: &'a str,
    mode: InterpolationMode,
    state: State,
    position: usize,
    current: Option<Token>,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    fn new(template: &'a str, mode: InterpolationMode) -> Self {
        Self {
            template,
            mode,
            state: State::Begin,
            position: 0,
            current: None,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>, FormatError> {
        for (position, c) in self.template.chars().enumerate() {
            self.position = position;
            self.state = self.transition(c)?;
        }
        self.position = self.template.chars().count();
        self.finish(self.state)?;
        Ok(self.tokens)
    }

    fn transition(&mut self, c: char) -> Result<State, FormatError> {
        let class = CharClass::of(c);
        match self.state {
            State::Begin => self.begin(c, class),
            State::Message => self.message(c, class),
            State::InterpolationTerm => self.interpolation_term(c, class),
            State::El => self.el(c, class),
            State::Escaped { return_to } => {
                self.append(c);
                Ok(return_to.state())
            }
        }
    }

    fn begin(&mut self, c: char, class: CharClass) -> Result<State, FormatError> {
        match class {
            CharClass::Plain => {
                self.append(c);
                Ok(State::Message)
            }
            CharClass::BeginTerm => {
                self.start_parameter();
                Ok(State::InterpolationTerm)
            }
            CharClass::EndTerm => Err(self.unbalanced(c)),
            CharClass::ElDesignator => Ok(self.el_designator(c)),
            CharClass::Escape => {
                self.append(c);
                Ok(State::Escaped {
                    return_to: Resume::Begin,
                })
            }
        }
    }

    fn message(&mut self, c: char, class: CharClass) -> Result<State, FormatError> {
        match class {
            CharClass::Plain => {
                self.append(c);
                Ok(State::Message)
            }
            CharClass::BeginTerm => {
                self.start_parameter();
                Ok(State::InterpolationTerm)
            }
            CharClass::EndTerm => Err(self.unbalanced(c)),
            CharClass::ElDesignator => Ok(self.el_designator(c)),
            CharClass::Escape => {
                self.append(c);
                Ok(State::Escaped {
                    return_to: Resume::Message,
                })
            }
        }
    }

    fn interpolation_term(&mut self, c: char, class: CharClass) -> Result<State, FormatError> {
        match class {
            CharClass::Plain | CharClass::ElDesignator => {
                self.append(c);
                Ok(State::InterpolationTerm)
            }
            CharClass::BeginTerm => Err(FormatError::NestedTerm {
                character: c,
                position: self.position,
                template: self.template.to_string(),
            }),
            CharClass::EndTerm => {
                self.append(c);
                self.terminate_token();
                Ok(State::Begin)
            }
            CharClass::Escape => {
                self.append(c);
                Ok(State::Escaped {
                    return_to: Resume::InterpolationTerm,
                })
            }
        }
    }

    /// A `$` was seen; `c` is the character after it.
    fn el(&mut self, c: char, class: CharClass) -> Result<State, FormatError> {
        match class {
            CharClass::Plain | CharClass::ElDesignator => {
                self.append(EL_DESIGNATOR);
                self.append(c);
                Ok(State::Message)
            }
            CharClass::BeginTerm => {
                self.terminate_token();
                self.append(EL_DESIGNATOR);
                self.append(c);
                if let Some(token) = self.current.as_mut() {
                    token.mark_expression_language();
                }
                Ok(State::InterpolationTerm)
            }
            CharClass::EndTerm => Err(self.unbalanced(c)),
            CharClass::Escape => {
                self.append(EL_DESIGNATOR);
                self.append(c);
                Ok(State::Escaped {
                    return_to: Resume::Message,
                })
            }
        }
    }

    fn el_designator(&mut self, c: char) -> State {
        match self.mode {
            InterpolationMode::Parameter => {
                self.append(c);
                State::Message
            }
            InterpolationMode::ExpressionLanguage => State::El,
        }
    }

    fn finish(&mut self, state: State) -> Result<(), FormatError> {
        match state {
            State::Begin | State::Message => {
                self.terminate_token();
                Ok(())
            }
            State::El => {
                self.append(EL_DESIGNATOR);
                self.terminate_token();
                Ok(())
            }
            State::Escaped { return_to } => self.finish(return_to.state()),
            State::InterpolationTerm => Err(FormatError::UnterminatedTerm {
                position: self.term_start(),
                template: self.template.to_string(),
            }),
        }
    }

    fn start_parameter(&mut self) {
        self.terminate_token();
        self.append(BEGIN_TERM);
        if let Some(token) = self.current.as_mut() {
            token.mark_parameter();
        }
    }

    fn append(&mut self, c: char) {
        self.current.get_or_insert_with(Token::new).append(c);
    }

    fn terminate_token(&mut self) {
        if let Some(mut token) = self.current.take() {
            token.terminate();
            self.tokens.push(token);
        }
    }

    /// Character offset where the open term began.
    fn term_start(&self) -> usize {
        let open = self
            .current
            .as_ref()
            .map_or(0, |token| token.raw().chars().count());
        self.position.saturating_sub(open)
    }

    fn unbalanced(&self, c: char) -> FormatError {
        FormatError::UnbalancedEndTerm {
            character: c,
            position: self.position,
            template: self.template.to_string(),
        }
    }
}
