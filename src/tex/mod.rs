//! TeX → Unicode translation
//!
//! Replaces accent commands, named control symbols, dashes, quote ligatures,
//! and math-mode symbols with their Unicode equivalents, and strips the
//! braces that survive. Unknown control sequences are emitted literally
//! (without the backslash) and reported to the diagnostics sink.
//!
//! The same machinery backs [`first_alphabetic`], the letter-classification
//! hook used by name parsing and title casing.

pub(crate) mod lexer;
mod tables;

use crate::diag::Diagnostics;
use crate::pos::Pos;

/// Translate a TeX-markup string into plain Unicode.
///
/// Diagnostics (unknown control sequences, unknown accent combinations) are
/// anchored at `pos`, the source position of the field value.
#[must_use]
pub fn tex_to_unicode(value: &str, pos: &Pos, diag: &mut Diagnostics) -> String {
    translate(value, pos, Some(diag))
}

/// The first alphabetic character `value` exposes after translation.
///
/// Used to decide whether a brace group or control sequence counts as a
/// letter, and of which case. Never emits diagnostics.
#[must_use]
pub fn first_alphabetic(value: &str) -> Option<char> {
    translate(value, &Pos::default(), None)
        .chars()
        .find(|c| c.is_alphabetic())
}

fn warn(diag: &mut Option<&mut Diagnostics>, pos: &Pos, message: String) {
    if let Some(d) = diag.as_deref_mut() {
        d.warn(pos.clone(), message);
    }
}

fn translate(value: &str, pos: &Pos, diag: Option<&mut Diagnostics>) -> String {
    let mut diag = diag;
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    let mut math = false;

    while let Some(c) = rest.chars().next() {
        match c {
            '{' | '}' => rest = &rest[1..],
            '$' => {
                math = !math;
                rest = &rest[1..];
            }
            '\\' => {
                if let Some((cs, after)) = lexer::control_sequence(rest) {
                    rest = control(&cs[1..], after, math, &mut out, pos, &mut diag);
                } else {
                    rest = &rest[1..];
                }
            }
            '-' if !math => {
                if let Some(r) = rest.strip_prefix("---") {
                    out.push('\u{2014}');
                    rest = r;
                } else if let Some(r) = rest.strip_prefix("--") {
                    out.push('\u{2013}');
                    rest = r;
                } else {
                    out.push('-');
                    rest = &rest[1..];
                }
            }
            '`' if !math => {
                if let Some(r) = rest.strip_prefix("``") {
                    out.push('\u{201c}');
                    rest = r;
                } else {
                    out.push('\u{2018}');
                    rest = &rest[1..];
                }
            }
            '\'' if !math => {
                if let Some(r) = rest.strip_prefix("''") {
                    out.push('\u{201d}');
                    rest = r;
                } else {
                    out.push('\'');
                    rest = &rest[1..];
                }
            }
            '~' if !math => {
                out.push('\u{00a0}');
                rest = &rest[1..];
            }
            _ => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    out
}

/// Handle one control sequence; `name` excludes the backslash. Returns the
/// remaining input, which may shrink further when the sequence takes an
/// argument or an argument separator.
fn control<'a>(
    name: &str,
    rest: &'a str,
    math: bool,
    out: &mut String,
    pos: &Pos,
    diag: &mut Option<&mut Diagnostics>,
) -> &'a str {
    // Control symbols: backslash followed by a single non-letter.
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if !c.is_ascii_alphabetic() {
            return match c {
                '`' | '\'' | '^' | '"' | '~' | '=' | '.' => accent(c, rest, out, pos, diag),
                '-' => rest, // discretionary hyphen
                '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                    out.push(c);
                    rest
                }
                ' ' | '\\' => {
                    out.push(' ');
                    rest
                }
                _ => {
                    warn(diag, pos, format!("unknown control sequence `\\{c}'"));
                    out.push(c);
                    rest
                }
            };
        }
    }

    if math {
        if let Some(sub) = tables::lookup(tables::MATH_SYMBOLS, name) {
            out.push_str(sub);
        } else {
            // Unknown math stays literal, backslash included.
            out.push('\\');
            out.push_str(name);
        }
        return rest;
    }

    if name.len() == 1 {
        let c = name.chars().next().unwrap_or_default();
        if tables::WORD_ACCENTS.contains(&c) {
            return accent(c, rest, out, pos, diag);
        }
    }

    if let Some(sub) = tables::lookup(tables::CONTROL_SYMBOLS, name) {
        out.push_str(sub);
        return eat_separator(rest);
    }

    warn(diag, pos, format!("unknown control sequence `\\{name}'"));
    out.push_str(name);
    rest
}

/// Consume the usual TeX argument separator after a control word: an empty
/// group or one whitespace character.
fn eat_separator(rest: &str) -> &str {
    if let Some(r) = rest.strip_prefix("{}") {
        r
    } else if rest.starts_with([' ', '\t', '\n']) {
        &rest[1..]
    } else {
        rest
    }
}

/// Apply the accent `achar` to the argument at the front of `rest`: the next
/// non-space character, a brace group, or a control-sequence name.
fn accent<'a>(
    achar: char,
    rest: &'a str,
    out: &mut String,
    pos: &Pos,
    diag: &mut Option<&mut Diagnostics>,
) -> &'a str {
    let rest = rest.trim_start_matches([' ', '\t', '\n']);

    let (base, extra, remainder) = if let Some((contents, after)) = lexer::brace_group(rest) {
        let contents = contents.trim();
        if let Some((cs, tail)) = lexer::control_sequence(contents) {
            (accent_base(&cs[1..]), tail, after)
        } else {
            let mut inner = contents.chars();
            (inner.next(), inner.as_str(), after)
        }
    } else if let Some((cs, after)) = lexer::control_sequence(rest) {
        (accent_base(&cs[1..]), "", eat_separator(after))
    } else if let Some(c) = rest.chars().next() {
        (Some(c), "", &rest[c.len_utf8()..])
    } else {
        warn(diag, pos, format!("accent `\\{achar}' has no argument"));
        return rest;
    };

    match base {
        Some(b) => match tables::compose_accent(achar, b) {
            Some(s) => out.push_str(&s),
            None => {
                warn(
                    diag,
                    pos,
                    format!("unknown accent combination `\\{achar}{b}'"),
                );
                out.push(b);
            }
        },
        None => warn(diag, pos, format!("accent `\\{achar}' has no argument")),
    }
    out.push_str(extra);
    remainder
}

/// The base letter a control sequence stands for when used under an accent,
/// e.g. `\i` in `\'{\i}`.
fn accent_base(name: &str) -> Option<char> {
    match name {
        "i" => Some('i'),
        "j" => Some('j'),
        _ => tables::lookup(tables::CONTROL_SYMBOLS, name).and_then(|s| s.chars().next()),
    }
}
