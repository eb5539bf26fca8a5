//! BibTeX name parsing
//!
//! Splits an `author`/`editor` field into names on the word `and` at brace
//! depth 0, then partitions each name into the four BibTeX parts (First,
//! von, Last, Jr) according to the number of top-level commas and the case
//! classification of each word token.

use crate::diag::Diagnostics;
use crate::pos::Pos;
use crate::tex;
use std::fmt;

/// One parsed name. Empty parts are empty strings, never absent; braces from
/// the input are retained, and whitespace within a part is a single space.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Name {
    /// Given name(s).
    pub first: String,
    /// The lowercase "von" particle(s), e.g. `de la`.
    pub von: String,
    /// Family name(s).
    pub last: String,
    /// Generational suffix, e.g. `Jr.`.
    pub jr: String,
}

impl Name {
    /// Render the name in the unambiguous `von Last, Jr, First` form, the
    /// spelling that re-parses to the same partition.
    #[must_use]
    pub fn to_field(&self) -> String {
        let mut out = String::new();
        if !self.von.is_empty() {
            out.push_str(&self.von);
            out.push(' ');
        }
        out.push_str(&self.last);
        if !self.jr.is_empty() {
            out.push_str(", ");
            out.push_str(&self.jr);
        }
        if !self.first.is_empty() {
            out.push_str(", ");
            out.push_str(&self.first);
        }
        out
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_field())
    }
}

/// Case classification of a word token at its first classifiable letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenCase {
    Upper,
    Lower,
    Caseless,
}

/// Parse a name-list field value into its names, in input order.
///
/// `pos` anchors diagnostics (currently only the too-many-commas warning).
#[must_use]
pub fn parse_names(value: &str, pos: &Pos, diag: &mut Diagnostics) -> Vec<Name> {
    split_on_and(value)
        .into_iter()
        .filter(|name| !name.trim().is_empty())
        .map(|name| parse_name(name, pos, diag))
        .collect()
}

/// Split a field value on the word `and` at brace depth 0 (case-insensitive,
/// bounded by whitespace). `and` inside braces never separates.
fn split_on_and(value: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut start = 0;
    for (tok_start, tok_end) in depth0_tokens(value) {
        if value[tok_start..tok_end].eq_ignore_ascii_case("and") {
            names.push(&value[start..tok_start]);
            start = tok_end;
        }
    }
    names.push(&value[start..]);
    names
}

/// Word tokens of `s`: maximal runs not broken by whitespace at brace
/// depth 0. Returned as byte ranges; braces stay inside their token.
fn depth0_tokens(s: &str) -> Vec<(usize, usize)> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start = None;
    for (i, c) in s.char_indices() {
        match c {
            '{' => {
                depth += 1;
                start.get_or_insert(i);
            }
            '}' => {
                depth = depth.saturating_sub(1);
                start.get_or_insert(i);
            }
            c if depth == 0 && c.is_whitespace() => {
                if let Some(st) = start.take() {
                    tokens.push((st, i));
                }
            }
            _ => {
                start.get_or_insert(i);
            }
        }
    }
    if let Some(st) = start {
        tokens.push((st, s.len()));
    }
    tokens
}

/// Split one name into comma sections at brace depth 0.
fn comma_sections(name: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in name.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                sections.push(&name[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    sections.push(&name[start..]);
    sections
}

fn tokens_of(section: &str) -> Vec<&str> {
    depth0_tokens(section)
        .into_iter()
        .map(|(a, b)| &section[a..b])
        .collect()
}

fn join(tokens: &[&str]) -> String {
    tokens.join(" ")
}

fn parse_name(name: &str, pos: &Pos, diag: &mut Diagnostics) -> Name {
    let sections = comma_sections(name);
    match sections.as_slice() {
        [only] => first_von_last(&tokens_of(only)),
        [before, first] => {
            let (von, last) = von_last(&tokens_of(before));
            Name {
                first: join(&tokens_of(first)),
                von,
                last,
                jr: String::new(),
            }
        }
        [before, jr, first] => {
            let (von, last) = von_last(&tokens_of(before));
            Name {
                first: join(&tokens_of(first)),
                von,
                last,
                jr: join(&tokens_of(jr)),
            }
        }
        [before, middle @ .., first] => {
            diag.warn(pos.clone(), format!("too many commas in name `{name}'"));
            let (von, last) = von_last(&tokens_of(before));
            let jr = middle
                .iter()
                .map(|s| join(&tokens_of(s)))
                .collect::<Vec<_>>()
                .join(", ");
            Name {
                first: join(&tokens_of(first)),
                von,
                last,
                jr,
            }
        }
        [] => Name::default(),
    }
}

/// Partition the 0-comma `First von Last` form. The von part spans from the
/// first lowercase token through the last lowercase token that is not the
/// final token; without lowercase tokens the final token alone is the Last.
fn first_von_last(tokens: &[&str]) -> Name {
    let n = tokens.len();
    if n == 0 {
        return Name::default();
    }
    let cases: Vec<TokenCase> = tokens.iter().map(|t| classify(t)).collect();
    let lower = |i: usize| cases[i] == TokenCase::Lower;

    let first_lower = (0..n.saturating_sub(1)).find(|&i| lower(i));
    match first_lower {
        None => Name {
            first: join(&tokens[..n - 1]),
            last: tokens[n - 1].to_string(),
            ..Name::default()
        },
        Some(lo) => {
            let hi = (0..n - 1).rev().find(|&i| lower(i)).unwrap_or(lo);
            Name {
                first: join(&tokens[..lo]),
                von: join(&tokens[lo..=hi]),
                last: join(&tokens[hi + 1..]),
                jr: String::new(),
            }
        }
    }
}

/// Partition the pre-comma part of a comma form into von and Last: the
/// leading run of lowercase tokens is the von part, capped so the final
/// token always lands in Last.
fn von_last(tokens: &[&str]) -> (String, String) {
    let n = tokens.len();
    if n == 0 {
        return (String::new(), String::new());
    }
    let mut von_end = 0;
    while von_end < n - 1 && classify(tokens[von_end]) == TokenCase::Lower {
        von_end += 1;
    }
    (join(&tokens[..von_end]), join(&tokens[von_end..]))
}

/// Classify a token at its first letter. Characters inside brace groups are
/// skipped, except that a group opening with a control sequence is probed
/// through the TeX translator for a classifiable letter.
fn classify(token: &str) -> TokenCase {
    let mut rest = token;
    while let Some(c) = rest.chars().next() {
        match c {
            '{' => {
                if let Some((group, after)) = tex::lexer::brace_group(rest) {
                    if group.starts_with('\\') {
                        if let Some(case) = case_of(tex::first_alphabetic(group)) {
                            return case;
                        }
                    }
                    rest = after;
                } else {
                    rest = &rest[1..];
                }
            }
            '}' => rest = &rest[1..],
            c if c.is_ascii_uppercase() => return TokenCase::Upper,
            c if c.is_ascii_lowercase() => return TokenCase::Lower,
            _ => rest = &rest[c.len_utf8()..],
        }
    }
    TokenCase::Caseless
}

fn case_of(letter: Option<char>) -> Option<TokenCase> {
    let c = letter?;
    if c.is_uppercase() {
        Some(TokenCase::Upper)
    } else if c.is_lowercase() {
        Some(TokenCase::Lower)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(value: &str) -> Vec<Name> {
        let mut diag = Diagnostics::new();
        parse_names(value, &Pos::default(), &mut diag)
    }

    fn name(first: &str, von: &str, last: &str, jr: &str) -> Name {
        Name {
            first: first.to_string(),
            von: von.to_string(),
            last: last.to_string(),
            jr: jr.to_string(),
        }
    }

    #[test]
    fn test_first_last() {
        assert_eq!(parse("Jane Doe"), vec![name("Jane", "", "Doe", "")]);
        assert_eq!(parse("Doe"), vec![name("", "", "Doe", "")]);
    }

    #[test]
    fn test_first_von_last() {
        assert_eq!(
            parse("Jean de La Fontaine"),
            vec![name("Jean", "de", "La Fontaine", "")]
        );
        assert_eq!(
            parse("Charles Louis Xavier Joseph de la Vall{\\'e}e Poussin"),
            vec![name(
                "Charles Louis Xavier Joseph",
                "de la",
                "Vall{\\'e}e Poussin",
                ""
            )]
        );
    }

    #[test]
    fn test_all_lowercase_keeps_a_last() {
        assert_eq!(
            parse("jean de la fontaine"),
            vec![name("", "jean de la", "fontaine", "")]
        );
    }

    #[test]
    fn test_von_last_first() {
        assert_eq!(
            parse("de la Vall{\\'e}e Poussin, Charles"),
            vec![name("Charles", "de la", "Vall{\\'e}e Poussin", "")]
        );
        assert_eq!(parse("Doe, Jane"), vec![name("Jane", "", "Doe", "")]);
    }

    #[test]
    fn test_jr_form() {
        assert_eq!(
            parse("Smith, Jr., John"),
            vec![name("John", "", "Smith", "Jr.")]
        );
    }

    #[test]
    fn test_too_many_commas() {
        let mut diag = Diagnostics::new();
        let names = parse_names("Smith, Jr, III, John", &Pos::default(), &mut diag);
        assert_eq!(names, vec![name("John", "", "Smith", "Jr, III")]);
        assert_eq!(diag.len(), 1);
        assert!(!diag.has_errors());
    }

    #[test]
    fn test_and_separation() {
        assert_eq!(
            parse("Jane Doe and John Smith"),
            vec![name("Jane", "", "Doe", ""), name("John", "", "Smith", "")]
        );
        // Case-insensitive separator.
        assert_eq!(parse("A B AND C D").len(), 2);
        // No whitespace boundary, no split.
        assert_eq!(parse("Sandy Sand").len(), 1);
    }

    #[test]
    fn test_and_inside_braces_is_not_a_separator() {
        assert_eq!(
            parse("{Barnes and Noble, Inc.}"),
            vec![name("", "", "{Barnes and Noble, Inc.}", "")]
        );
    }

    #[test]
    fn test_caseless_tokens_lean_toward_first() {
        // The digit token is caseless and joins the leading First run.
        assert_eq!(
            parse("J. 8. Smith"),
            vec![name("J. 8.", "", "Smith", "")]
        );
    }

    #[test]
    fn test_special_controls_classification() {
        // {\'e}cole exposes a lowercase letter through the translator, so
        // the token is a von word.
        assert_eq!(
            parse("Jean {\\'e}cole Smith"),
            vec![name("Jean", "{\\'e}cole", "Smith", "")]
        );
        // A braced token without a control sequence hides its case.
        assert_eq!(
            parse("{de} Smith, J."),
            vec![name("J.", "", "{de} Smith", "")]
        );
    }

    #[test]
    fn test_whitespace_collapsing() {
        assert_eq!(
            parse("  Jane   van \t der  Doe  "),
            vec![name("Jane", "van der", "Doe", "")]
        );
    }

    #[test]
    fn test_round_trip() {
        for input in [
            "Jean de La Fontaine",
            "de la Vall{\\'e}e Poussin, Charles",
            "Smith, Jr., John",
            "Doe, Jane",
        ] {
            let parsed = parse(input);
            let rendered = parsed[0].to_field();
            assert_eq!(parse(&rendered), parsed, "round-trip of `{input}'");
        }
    }
}
