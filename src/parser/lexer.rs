//! Lexical analysis for BibTeX

use super::PResult;
use winnow::prelude::*;
use winnow::{ascii::digit1, token::take_while};

/// Characters legal in a BibTeX identifier: printable ASCII except the
/// grammar's own punctuation. Digits are legal everywhere but first.
fn is_id_char(c: char) -> bool {
    matches!(c, '\x21'..='\x7f')
        && !matches!(
            c,
            '"' | '#' | '%' | '\'' | '(' | ')' | ',' | '=' | '{' | '}'
        )
}

/// Parse an identifier (entry type, macro name, or field name).
pub(crate) fn identifier<'a>(input: &mut &'a str) -> PResult<&'a str> {
    take_while(1.., is_id_char)
        .verify(|s: &str| !s.starts_with(|c: char| c.is_ascii_digit()))
        .parse_next(input)
}

/// Parse a run of ASCII digits.
pub(crate) fn digits<'a>(input: &mut &'a str) -> PResult<&'a str> {
    digit1.parse_next(input)
}

/// Parse an entry key inside `{ … }`: anything up to a comma, whitespace,
/// or closing brace. May be empty.
pub(crate) fn key_brace<'a>(input: &mut &'a str) -> PResult<&'a str> {
    take_while(0.., |c: char| {
        !matches!(c, ',' | ' ' | '\t' | '\r' | '\n' | '}')
    })
    .parse_next(input)
}

/// Parse an entry key inside `( … )`: anything up to a comma or whitespace.
/// May be empty and may contain a closing paren.
pub(crate) fn key_paren<'a>(input: &mut &'a str) -> PResult<&'a str> {
    take_while(0.., |c: char| !matches!(c, ',' | ' ' | '\t' | '\r' | '\n'))
        .parse_next(input)
}

/// Skip BibTeX whitespace (space, tab, newline; carriage returns are
/// tolerated for CRLF inputs).
pub(crate) fn skip_whitespace(input: &mut &str) {
    let bytes = input.as_bytes();
    let mut pos = 0;
    while pos < bytes.len() && matches!(bytes[pos], b' ' | b'\t' | b'\n' | b'\r') {
        pos += 1;
    }
    *input = &input[pos..];
}

/// Why a balanced-text scan failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BalanceError {
    /// A `}` closed a group that was never opened, at this byte offset
    /// relative to the start of the scan.
    UnexpectedClose(usize),
    /// The input ended before the terminator.
    Unterminated,
}

/// Scan brace-balanced text up to `term` (`}` or `"`) at brace depth 0.
///
/// On success the terminator is consumed and the text before it returned,
/// braces intact.
pub(crate) fn balanced_text<'a>(input: &mut &'a str, term: u8) -> Result<&'a str, BalanceError> {
    let bytes = input.as_bytes();
    let mut level = 0usize;
    let mut pos = 0;

    loop {
        let found = if term == b'}' {
            memchr::memchr2(b'{', b'}', &bytes[pos..])
        } else {
            memchr::memchr3(b'{', b'}', term, &bytes[pos..])
        };
        let Some(i) = found else {
            return Err(BalanceError::Unterminated);
        };
        let at = pos + i;
        match bytes[at] {
            c if c == term && level == 0 => {
                let text = &input[..at];
                *input = &input[at + 1..];
                return Ok(text);
            }
            b'{' => level += 1,
            b'}' => {
                if level == 0 {
                    return Err(BalanceError::UnexpectedClose(at));
                }
                level -= 1;
            }
            _ => {} // terminator nested inside braces is plain content
        }
        pos = at + 1;
    }
}
