//! Field-value scanning for BibTeX
//!
//! A value is one or more pieces joined by `#`: a digit run, a braced
//! group, a quoted string, or a macro name. Macros are expanded as they are
//! read, so stored values are always plain text.

use super::{Cursor, Scan};
use ahash::AHashMap;

use crate::diag::Diagnostics;
use crate::pos::SourceMap;

/// Scan a complete field value and normalize its whitespace: runs of
/// space/tab/newline become one space, and surrounding spaces are stripped.
pub(super) fn scan_field_value(
    cur: &mut Cursor<'_>,
    macros: &AHashMap<String, String>,
    map: &SourceMap<'_>,
    diag: &mut Diagnostics,
) -> Scan<String> {
    let mut value = scan_field_piece(cur, macros, map, diag)?;
    loop {
        cur.skip_space();
        if !cur.eat('#') {
            break;
        }
        cur.skip_space();
        value.push_str(&scan_field_piece(cur, macros, map, diag)?);
    }
    Ok(compress_space(&value))
}

fn scan_field_piece(
    cur: &mut Cursor<'_>,
    macros: &AHashMap<String, String>,
    map: &SourceMap<'_>,
    diag: &mut Diagnostics,
) -> Scan<String> {
    let start = cur.offset();
    match cur.peek() {
        Some(c) if c.is_ascii_digit() => Ok(cur.digits()?.to_string()),
        Some('{') => {
            cur.advance(1);
            Ok(cur.balanced(b'}')?.to_string())
        }
        Some('"') => {
            cur.advance(1);
            Ok(cur.balanced(b'"')?.to_string())
        }
        _ => {
            let Ok(name) = cur.identifier() else {
                return Cursor::err(start, "expected string, number, or macro name");
            };
            macros.get(&name.to_ascii_lowercase()).map_or_else(
                || {
                    diag.warn(map.pos(start), format!("unknown macro `{name}'"));
                    Ok(String::new())
                },
                |expansion| Ok(expansion.clone()),
            )
        }
    }
}

/// Compress interior whitespace to single spaces and strip it at the ends,
/// the way BibTeX stores field values.
fn compress_space(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending = false;
    for c in s.chars() {
        if matches!(c, ' ' | '\t' | '\n' | '\r') {
            pending = true;
        } else {
            if pending && !out.is_empty() {
                out.push(' ');
            }
            pending = false;
            out.push(c);
        }
    }
    out
}
