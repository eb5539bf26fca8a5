//! Title casing under BibTeX's `t` format
//!
//! Lowercases letters outside braces while keeping the case of the first
//! character and of the character following sentence-ending punctuation.
//! Brace groups are copied verbatim unless they open with a control sequence
//! (a "special"), in which case the control sequence survives and its
//! argument is re-cased.

use crate::diag::Diagnostics;
use crate::pos::Pos;
use crate::tex;

/// Re-case a field value under BibTeX title rules.
///
/// Lowercasing is ASCII-only; non-ASCII characters pass through unchanged.
/// Unbalanced braces are reported once per call and leave the remainder of
/// the string untouched.
#[must_use]
pub fn title_case(value: &str, pos: &Pos, diag: &mut Diagnostics) -> String {
    let mut out = String::with_capacity(value.len());
    let mut warned = false;
    case_segment(value, true, &mut out, pos, diag, &mut warned);
    out
}

/// Walk one depth-0 segment. `protect` is whether the next non-whitespace
/// character keeps its case.
fn case_segment(
    s: &str,
    protect: bool,
    out: &mut String,
    pos: &Pos,
    diag: &mut Diagnostics,
    warned: &mut bool,
) {
    let mut protect = protect;
    let mut after_punct = false;
    let mut rest = s;

    while let Some(c) = rest.chars().next() {
        if c.is_whitespace() {
            out.push(c);
            rest = &rest[c.len_utf8()..];
            if after_punct {
                protect = true;
                after_punct = false;
            }
            continue;
        }
        after_punct = false;
        match c {
            '{' => {
                let Some((group, after)) = tex::lexer::brace_group(rest) else {
                    warn_unbalanced(pos, diag, warned);
                    out.push_str(rest);
                    return;
                };
                out.push('{');
                if !protect && group.starts_with('\\') {
                    // A special: the control sequence survives as written,
                    // the argument is re-cased.
                    if let Some((cs, arg)) = tex::lexer::control_sequence(group) {
                        out.push_str(cs);
                        case_segment(arg, false, out, pos, diag, warned);
                    }
                } else {
                    out.push_str(group);
                }
                out.push('}');
                rest = after;
                protect = false;
            }
            '}' => {
                warn_unbalanced(pos, diag, warned);
                out.push('}');
                rest = &rest[1..];
                protect = false;
            }
            '\\' => {
                // A bare control sequence is preserved as written.
                if let Some((cs, after)) = tex::lexer::control_sequence(rest) {
                    out.push_str(cs);
                    rest = after;
                } else {
                    out.push('\\');
                    rest = &rest[1..];
                }
                protect = false;
            }
            _ => {
                if protect || !c.is_ascii_uppercase() {
                    out.push(c);
                } else {
                    out.push(c.to_ascii_lowercase());
                }
                protect = false;
                after_punct = matches!(c, ':' | '.' | '?' | '!');
                rest = &rest[c.len_utf8()..];
            }
        }
    }
}

fn warn_unbalanced(pos: &Pos, diag: &mut Diagnostics, warned: &mut bool) {
    if !*warned {
        diag.warn(pos.clone(), "unbalanced braces");
        *warned = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recase(input: &str) -> String {
        let mut diag = Diagnostics::new();
        title_case(input, &Pos::default(), &mut diag)
    }

    #[test]
    fn test_lowercases_after_first_character() {
        assert_eq!(
            recase("The TCP/IP Guide to Hello World"),
            "The tcp/ip guide to hello world"
        );
    }

    #[test]
    fn test_first_character_keeps_case() {
        assert_eq!(recase("IEEE Standards"), "Ieee standards");
        assert_eq!(recase("  Leading Space"), "  Leading space");
    }

    #[test]
    fn test_case_kept_after_sentence_punctuation() {
        assert_eq!(
            recase("Systems: A New Hope? Yes. REALLY! Sure"),
            "Systems: A new hope? Yes. Really! Sure"
        );
        // No whitespace after the first period, so `B` is not protected;
        // the second period is followed by whitespace, so `Testing` is.
        assert_eq!(recase("A.B. Testing"), "A.b. Testing");
    }

    #[test]
    fn test_braced_groups_are_verbatim() {
        assert_eq!(
            recase("The {TCP/IP} Guide and {LaTeX} Tricks"),
            "The {TCP/IP} guide and {LaTeX} tricks"
        );
        assert_eq!(recase("{Whole Braced Title}"), "{Whole Braced Title}");
    }

    #[test]
    fn test_specials_recase_their_argument() {
        assert_eq!(recase("An {\\'E}tude"), "An {\\'e}tude");
        assert_eq!(recase("On {\\TeX Macros}"), "On {\\TeX macros}");
        // Specials at the protected first position are untouched.
        assert_eq!(recase("{\\'E}cole Study"), "{\\'E}cole study");
    }

    #[test]
    fn test_bare_control_sequences_survive() {
        assert_eq!(recase("The \\TeX Book"), "The \\TeX book");
    }

    #[test]
    fn test_non_ascii_passes_through() {
        assert_eq!(recase("Das Üben Der Tonleitern"), "Das Üben der tonleitern");
    }

    #[test]
    fn test_unbalanced_braces_warn_once() {
        let mut diag = Diagnostics::new();
        let out = title_case("A {Broken Title", &Pos::default(), &mut diag);
        assert_eq!(out, "A {Broken Title");
        assert_eq!(diag.len(), 1);
    }

    #[test]
    fn test_idempotent() {
        for input in [
            "The TCP/IP Guide to Hello World",
            "Systems: A New Hope? Yes.",
            "An {\\'E}tude in {BibTeX}",
        ] {
            let once = recase(input);
            assert_eq!(recase(&once), once);
        }
    }
}
