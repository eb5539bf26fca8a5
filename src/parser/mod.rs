//! BibTeX `.bib` parsing
//!
//! The parser follows BibTeX's own reading of database files: everything
//! outside an `@` construct is comment text, commands and entry types match
//! case-insensitively, `@string` macros expand while values are read, and a
//! malformed construct is reported to the sink before scanning resumes at
//! the next top-level `@`.

mod lexer;
mod value;

use ahash::AHashMap;

use crate::database::Database;
use crate::diag::{Diagnostics, Severity};
use crate::error::{Error, Result};
use crate::model::Entry;
use crate::pos::SourceMap;

/// Internal parser result type
pub(crate) type PResult<O> = winnow::PResult<O, winnow::error::ContextError>;

/// Which month macros a fresh parser starts with.
///
/// BibTeX gets these from the style file; standalone parsing has to choose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MonthStyle {
    /// Full English month names, `jan` → `January`.
    #[default]
    Full,
    /// abbrv.bst-style names, `jan` → `Jan.`.
    Abbrv,
    /// No month macros at all.
    None,
}

const FULL_MONTHS: [(&str, &str); 12] = [
    ("jan", "January"),
    ("feb", "February"),
    ("mar", "March"),
    ("apr", "April"),
    ("may", "May"),
    ("jun", "June"),
    ("jul", "July"),
    ("aug", "August"),
    ("sep", "September"),
    ("oct", "October"),
    ("nov", "November"),
    ("dec", "December"),
];

const ABBRV_MONTHS: [(&str, &str); 12] = [
    ("jan", "Jan."),
    ("feb", "Feb."),
    ("mar", "Mar."),
    ("apr", "Apr."),
    ("may", "May"),
    ("jun", "June"),
    ("jul", "July"),
    ("aug", "Aug."),
    ("sep", "Sept."),
    ("oct", "Oct."),
    ("nov", "Nov."),
    ("dec", "Dec."),
];

/// A resumable parser for `.bib` database files.
///
/// Feed it one or more input streams with [`parse`](Self::parse); later
/// streams see macros defined by earlier ones. Recoverable problems go to
/// the [`Diagnostics`] sink and parsing continues at the next top-level
/// `@`. [`finalize`](Self::finalize) returns the database, or the single
/// fatal error if anything error-severity was logged along the way.
#[derive(Debug)]
pub struct Parser {
    macros: AHashMap<String, String>,
    entries: Vec<Entry>,
    index: AHashMap<String, usize>,
    preamble: String,
    comments: Vec<String>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Create a parser seeded with the full month macros.
    #[must_use]
    pub fn new() -> Self {
        Self::with_months(MonthStyle::Full)
    }

    /// Create a parser with the chosen month macro style.
    #[must_use]
    pub fn with_months(style: MonthStyle) -> Self {
        let seed = |table: &[(&str, &str); 12]| {
            table
                .iter()
                .map(|&(name, value)| (name.to_string(), value.to_string()))
                .collect()
        };
        let macros = match style {
            MonthStyle::Full => seed(&FULL_MONTHS),
            MonthStyle::Abbrv => seed(&ABBRV_MONTHS),
            MonthStyle::None => AHashMap::new(),
        };
        Self {
            macros,
            entries: Vec::new(),
            index: AHashMap::new(),
            preamble: String::new(),
            comments: Vec::new(),
        }
    }

    /// Declare a macro, just as an `@string` command would.
    pub fn define_string(&mut self, name: &str, value: &str) {
        self.macros
            .insert(name.to_ascii_lowercase(), value.to_string());
    }

    /// Parse one input stream. `name` labels positions in diagnostics.
    ///
    /// May be called repeatedly; entry order is preserved across streams
    /// and `@string` definitions carry over.
    pub fn parse(&mut self, input: &str, name: &str, diag: &mut Diagnostics) -> &mut Self {
        let map = SourceMap::new(name, input);
        let mut cur = Cursor::new(input);
        loop {
            if let Err(e) = self.scan_command_or_entry(&mut cur, &map, diag) {
                diag.error(map.pos(e.offset), e.message);
            }
            if cur.at_eof() {
                break;
            }
        }
        self
    }

    /// Perform final checks and return the database.
    ///
    /// Fails with [`Error::Input`] if any error-severity diagnostic was
    /// logged; warnings never prevent finalization.
    pub fn finalize(self, diag: &Diagnostics) -> Result<Database> {
        if diag.has_errors() {
            return Err(Error::Input {
                errors: diag
                    .iter()
                    .filter(|d| d.severity == Severity::Error)
                    .cloned()
                    .collect(),
            });
        }
        Ok(Database::from_parts(
            self.entries,
            self.index,
            self.macros,
            self.preamble,
            self.comments,
        ))
    }

    fn scan_command_or_entry(
        &mut self,
        cur: &mut Cursor<'_>,
        map: &SourceMap<'_>,
        diag: &mut Diagnostics,
    ) -> Scan<()> {
        // Everything up to the next `@` is inter-entry comment text.
        let comment = cur.skip_to_at();
        let comment = comment.trim();
        if !comment.is_empty() {
            self.comments.push(comment.to_string());
        }

        let entry_off = cur.offset();
        if !cur.eat('@') {
            return Ok(());
        }
        cur.skip_space();

        let typ = cur.identifier()?.to_ascii_lowercase();
        cur.skip_space();

        if typ == "comment" {
            // BibTeX does nothing with what follows an @comment; it is
            // inter-entry noise like any other.
            return Ok(());
        }

        let right = match cur.peek() {
            Some('{') => {
                cur.advance(1);
                '}'
            }
            Some('(') => {
                cur.advance(1);
                ')'
            }
            _ => return Cursor::err(cur.offset(), "expected { or ( after entry type"),
        };
        cur.skip_space();

        match typ.as_str() {
            "preamble" => {
                let piece = value::scan_field_value(cur, &self.macros, map, diag)?;
                cur.skip_space();
                expect(cur, right, &format!("expected {right}"))?;
                self.preamble.push_str(&piece);
                Ok(())
            }
            "string" => {
                let name_off = cur.offset();
                let name = cur.identifier()?.to_ascii_lowercase();
                if self.macros.contains_key(&name) {
                    diag.warn(map.pos(name_off), format!("macro `{name}' redefined"));
                }
                cur.skip_space();
                expect(cur, '=', "expected = after string name")?;
                cur.skip_space();
                let val = value::scan_field_value(cur, &self.macros, map, diag)?;
                cur.skip_space();
                expect(cur, right, &format!("expected {right}"))?;
                self.macros.insert(name, val);
                Ok(())
            }
            _ => self.scan_entry(cur, map, diag, typ, right, entry_off),
        }
    }

    fn scan_entry(
        &mut self,
        cur: &mut Cursor<'_>,
        map: &SourceMap<'_>,
        diag: &mut Diagnostics,
        typ: String,
        right: char,
        entry_off: usize,
    ) -> Scan<()> {
        // Inside parens the key may contain `}` (and even `)`); inside
        // braces it may not contain `}`. Either way it can be empty.
        let key = if right == ')' {
            cur.key_paren()
        } else {
            cur.key_brace()
        };
        let mut entry = Entry::new(typ, key.to_string(), map.pos(entry_off));
        cur.skip_space();

        loop {
            if cur.eat(right) {
                break;
            }
            expect(cur, ',', &format!("expected {right} or ,"))?;
            cur.skip_space();
            if cur.eat(right) {
                break;
            }

            let field_off = cur.offset();
            let field = cur.identifier()?.to_ascii_lowercase();
            cur.skip_space();
            expect(cur, '=', "expected = after field name")?;
            cur.skip_space();
            let value_off = cur.offset();
            let val = value::scan_field_value(cur, &self.macros, map, diag)?;
            cur.skip_space();

            if entry.contains(&field) {
                diag.warn(map.pos(field_off), format!("repeated field `{field}'"));
            } else {
                entry.push_field(field, val, map.pos(value_off));
            }
        }

        let key_lc = entry.key().to_ascii_lowercase();
        if self.index.contains_key(&key_lc) {
            diag.error(
                map.pos(entry_off),
                format!("repeated entry `{}'", entry.key()),
            );
        } else {
            self.index.insert(key_lc, self.entries.len());
            self.entries.push(entry);
        }
        Ok(())
    }
}

fn expect(cur: &mut Cursor<'_>, c: char, message: &str) -> Scan<()> {
    if cur.eat(c) {
        Ok(())
    } else {
        Cursor::err(cur.offset(), message)
    }
}

/// A structural error: where it happened and what was expected. The caller
/// converts it into an error diagnostic and resynchronizes.
struct SyntaxError {
    offset: usize,
    message: String,
}

type Scan<T> = std::result::Result<T, SyntaxError>;

/// A cursor over one input stream, tracking the byte offset into the
/// original buffer for position reporting.
struct Cursor<'a> {
    full: &'a str,
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            full: input,
            rest: input,
        }
    }

    fn offset(&self) -> usize {
        self.full.len() - self.rest.len()
    }

    fn at_eof(&self) -> bool {
        self.rest.is_empty()
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn advance(&mut self, bytes: usize) {
        self.rest = &self.rest[bytes..];
    }

    fn skip_space(&mut self) {
        lexer::skip_whitespace(&mut self.rest);
    }

    fn eat(&mut self, c: char) -> bool {
        if self.rest.starts_with(c) {
            self.advance(c.len_utf8());
            true
        } else {
            false
        }
    }

    /// Skip to the next top-level `@` (or EOF) and return the skipped text.
    fn skip_to_at(&mut self) -> &'a str {
        match memchr::memchr(b'@', self.rest.as_bytes()) {
            Some(i) => {
                let (before, after) = self.rest.split_at(i);
                self.rest = after;
                before
            }
            None => std::mem::take(&mut self.rest),
        }
    }

    fn identifier(&mut self) -> Scan<&'a str> {
        let start = self.offset();
        lexer::identifier(&mut self.rest).map_err(|_| SyntaxError {
            offset: start,
            message: "expected identifier".to_string(),
        })
    }

    fn digits(&mut self) -> Scan<&'a str> {
        let start = self.offset();
        lexer::digits(&mut self.rest).map_err(|_| SyntaxError {
            offset: start,
            message: "expected number".to_string(),
        })
    }

    fn key_brace(&mut self) -> &'a str {
        lexer::key_brace(&mut self.rest).unwrap_or_default()
    }

    fn key_paren(&mut self) -> &'a str {
        lexer::key_paren(&mut self.rest).unwrap_or_default()
    }

    fn balanced(&mut self, term: u8) -> Scan<&'a str> {
        let start = self.offset();
        lexer::balanced_text(&mut self.rest, term).map_err(|e| match e {
            lexer::BalanceError::UnexpectedClose(rel) => SyntaxError {
                offset: start + rel,
                message: "unexpected }".to_string(),
            },
            lexer::BalanceError::Unterminated => SyntaxError {
                offset: self.full.len(),
                message: "unterminated string".to_string(),
            },
        })
    }

    fn err<T>(offset: usize, message: impl Into<String>) -> Scan<T> {
        Err(SyntaxError {
            offset,
            message: message.into(),
        })
    }
}
