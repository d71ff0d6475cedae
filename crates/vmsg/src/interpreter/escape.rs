//! Escaping of message meta-characters.

use std::borrow::Cow;

const META_CHARACTERS: [char; 4] = ['{', '}', '$', '\\'];

/// Remove the escapes from `\{`, `\}`, `\\` and `\$`.
///
/// This runs once, after every substitution, so escaped meta-characters reach
/// the final message as plain characters. A backslash before any other
/// character is kept as is.
pub fn unescape_literals(message: &str) -> Cow<'_, str> {
    if !message.contains('\\') {
        return Cow::Borrowed(message);
    }
    let mut output = String::with_capacity(message.len());
    let mut chars = message.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            output.push(c);
            continue;
        }
        match chars.next() {
            Some(next) if META_CHARACTERS.contains(&next) => output.push(next),
            Some(next) => {
                output.push(c);
                output.push(next);
            }
            None => output.push(c),
        }
    }
    Cow::Owned(output)
}

/// Escape meta-characters so a substituted value is never read as a term.
///
/// [`unescape_literals`] turns the result back into `value`.
pub fn escape_meta_characters(value: &str) -> Cow<'_, str> {
    if !value.contains(META_CHARACTERS) {
        return Cow::Borrowed(value);
    }
    let mut output = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        if META_CHARACTERS.contains(&c) {
            output.push('\\');
        }
        output.push(c);
    }
    Cow::Owned(output)
}
