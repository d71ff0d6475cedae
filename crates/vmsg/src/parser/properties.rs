//! `.properties` bundle parser using winnow.
//!
//! Handles the subset of the format used by message bundles:
//! - `key=value`, `key: value` and `key value` entries
//! - `#` and `!` comment lines
//! - Backslash escapes: `\t \n \r \f \uXXXX`, any other escaped character
//!   stands for itself
//! - Line continuation with a trailing backslash

use winnow::combinator::{alt, cut_err, opt, preceded, repeat};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{any, none_of, one_of, take_while};

use super::error::ParseError;

/// A single `key=value` entry of a properties file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEntry {
    pub key: String,
    pub value: String,
    /// 1-based line on which the entry starts.
    pub line: usize,
}

/// Characters that end a key.
const KEY_TERMINATORS: [char; 8] = ['=', ':', ' ', '\t', '\x0C', '\r', '\n', '\\'];

/// Inline whitespace (no line breaks).
const BLANKS: [char; 3] = [' ', '\t', '\x0C'];

/// Parse a properties file into its entries, in file order.
///
/// # Example
///
/// ```
/// use vmsg::parser::parse_properties;
///
/// let entries = parse_properties("# comment\nsize.message = size must be between {min} and {max}\n").unwrap();
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].key, "size.message");
/// assert_eq!(entries[0].value, "size must be between {min} and {max}");
/// assert_eq!(entries[0].line, 2);
/// ```
pub fn parse_properties(input: &str) -> Result<Vec<PropertyEntry>, ParseError> {
    let mut remaining = input;
    let mut entries = Vec::new();
    loop {
        skip_blank_and_comments(&mut remaining).map_err(|e| to_parse_error(input, remaining, e))?;
        if remaining.is_empty() {
            return Ok(entries);
        }
        let (line, column) = calculate_position(input, remaining);
        let before = remaining.len();
        let (key, value) = entry(&mut remaining).map_err(|e| to_parse_error(input, remaining, e))?;
        if remaining.len() == before {
            // Only a dangling backslash can stop an entry from consuming input.
            return Err(ParseError::UnexpectedEof { line, column });
        }
        entries.push(PropertyEntry { key, value, line });
    }
}

fn to_parse_error(
    original: &str,
    remaining: &str,
    error: ErrMode<ContextError>,
) -> ParseError {
    let (line, column) = calculate_position(original, remaining);
    if remaining.is_empty() {
        ParseError::UnexpectedEof { line, column }
    } else {
        ParseError::Syntax {
            line,
            column,
            message: format!("parse error: {error}"),
        }
    }
}

/// Calculate line and column from original input and remaining input.
fn calculate_position(original: &str, remaining: &str) -> (usize, usize) {
    let consumed = original.len() - remaining.len();
    let consumed_str = &original[..consumed];
    let line = consumed_str.chars().filter(|&c| c == '\n').count() + 1;
    let last_newline = consumed_str.rfind('\n');
    let column = match last_newline {
        Some(pos) => consumed - pos,
        None => consumed + 1,
    };
    (line, column)
}

/// Skip whitespace, blank lines and comment lines.
fn skip_blank_and_comments(input: &mut &str) -> ModalResult<()> {
    let _: Vec<()> = repeat(
        0..,
        alt((
            take_while(1.., char::is_whitespace).void(),
            comment_line.void(),
        )),
    )
    .parse_next(input)?;
    Ok(())
}

/// Parse a comment line: `#` or `!` up to the end of the line.
fn comment_line<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    preceded(one_of(['#', '!']), take_while(0.., |c| c != '\n')).parse_next(input)
}

/// Parse one entry: key, separator, value.
fn entry(input: &mut &str) -> ModalResult<(String, String)> {
    let key: String = repeat(0.., key_char).parse_next(input)?;
    separator(input)?;
    let value = value(input)?;
    Ok((key, value))
}

fn key_char(input: &mut &str) -> ModalResult<char> {
    alt((escape_sequence, none_of(KEY_TERMINATORS))).parse_next(input)
}

/// Parse the separator between key and value: blanks, an optional `=` or
/// `:`, then more blanks.
fn separator(input: &mut &str) -> ModalResult<()> {
    (
        take_while(0.., BLANKS),
        opt(one_of(['=', ':'])),
        take_while(0.., BLANKS),
    )
        .void()
        .parse_next(input)
}

/// Parse a value up to the end of its (possibly continued) line.
fn value(input: &mut &str) -> ModalResult<String> {
    repeat(0.., value_piece)
        .fold(String::new, |mut acc, piece: Option<char>| {
            if let Some(c) = piece {
                acc.push(c);
            }
            acc
        })
        .parse_next(input)
}

/// A value character, or `None` for a line continuation.
fn value_piece(input: &mut &str) -> ModalResult<Option<char>> {
    alt((
        line_continuation.value(None),
        escape_sequence.map(Some),
        none_of(['\\', '\r', '\n']).map(Some),
    ))
    .parse_next(input)
}

/// A backslash at the end of a line joins it with the next one, dropping the
/// next line's leading blanks.
fn line_continuation(input: &mut &str) -> ModalResult<()> {
    ('\\', opt('\r'), '\n', take_while(0.., BLANKS))
        .void()
        .parse_next(input)
}

/// Parse a backslash escape.
fn escape_sequence(input: &mut &str) -> ModalResult<char> {
    preceded(
        '\\',
        alt((
            preceded(
                'u',
                cut_err(take_while(4, |c: char| c.is_ascii_hexdigit()).verify_map(
                    |hex: &str| u32::from_str_radix(hex, 16).ok().and_then(char::from_u32),
                )),
            ),
            any.map(|c: char| match c {
                't' => '\t',
                'n' => '\n',
                'r' => '\r',
                'f' => '\x0C',
                other => other,
            }),
        )),
    )
    .parse_next(input)
}
