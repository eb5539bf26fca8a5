//! Data model for parsed BibTeX entries

use crate::diag::Diagnostics;
use crate::names::{parse_names, Name};
use crate::pos::Pos;

/// A field of an entry: lowercased name, fully expanded value, and the
/// source position of the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field name, lowercased.
    pub name: String,
    /// Field value with macros expanded, pieces concatenated, and
    /// whitespace compressed; interior braces are kept byte-for-byte.
    pub value: String,
    /// Source position of the value, for anchoring downstream diagnostics.
    pub pos: Pos,
}

/// A BibTeX entry: type, citation key, and ordered fields.
///
/// The type is lowercased; the key is preserved verbatim (lookup is
/// case-sensitive even though duplicate detection is not). Field names are
/// lowercased and unique within an entry, in source order. Entries are not
/// mutated after parsing; [`Database::resolve_crossref`](crate::Database::resolve_crossref)
/// returns a new entry rather than touching the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    typ: String,
    key: String,
    fields: Vec<Field>,
    pos: Pos,
}

impl Entry {
    pub(crate) fn new(typ: String, key: String, pos: Pos) -> Self {
        Self {
            typ,
            key,
            fields: Vec::new(),
            pos,
        }
    }

    pub(crate) fn push_field(&mut self, name: String, value: String, pos: Pos) {
        self.fields.push(Field { name, value, pos });
    }

    pub(crate) fn remove_field(&mut self, name: &str) {
        self.fields.retain(|f| f.name != name);
    }

    /// The entry type, lowercased (e.g. `article`).
    #[must_use]
    pub fn typ(&self) -> &str {
        &self.typ
    }

    /// The citation key, exactly as written.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Where the entry starts in its input stream.
    #[must_use]
    pub const fn pos(&self) -> &Pos {
        &self.pos
    }

    /// All fields, in source order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Whether the entry has a field of this name (case-insensitive).
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Get a field value by name (case-insensitive).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.field(name).map(|f| f.value.as_str())
    }

    /// The source position of a field's value.
    #[must_use]
    pub fn field_pos(&self, name: &str) -> Option<&Pos> {
        self.field(name).map(|f| &f.pos)
    }

    /// Parse the `author` field into names; an absent field yields an empty
    /// list.
    #[must_use]
    pub fn authors(&self, diag: &mut Diagnostics) -> Vec<Name> {
        self.names("author", diag)
    }

    /// Parse the `editor` field into names; an absent field yields an empty
    /// list.
    #[must_use]
    pub fn editors(&self, diag: &mut Diagnostics) -> Vec<Name> {
        self.names("editor", diag)
    }

    /// Parse any name-list field into names.
    #[must_use]
    pub fn names(&self, field: &str, diag: &mut Diagnostics) -> Vec<Name> {
        self.field(field)
            .map(|f| parse_names(&f.value, &f.pos, diag))
            .unwrap_or_default()
    }

    /// The month of this entry as a number in `1..=12`.
    ///
    /// Accepts every standard month macro style and then some: the value is
    /// trimmed, trailing periods dropped, and matched as a prefix (at least
    /// three characters) of the English month names. Returns `None` without
    /// complaint when the field is absent, and with a warning when it is
    /// present but unintelligible.
    #[must_use]
    pub fn month_num(&self, diag: &mut Diagnostics) -> Option<u32> {
        let field = self.field("month")?;
        let num = month_number(&field.value);
        if num.is_none() {
            diag.warn(
                field.pos.clone(),
                format!("invalid month `{}'", field.value),
            );
        }
        num
    }

    /// A sort key for ordering entries by date: numeric year and month.
    ///
    /// A malformed year and a month without a year are each reported to the
    /// sink and excluded from the key.
    #[must_use]
    pub fn date_key(&self, diag: &mut Diagnostics) -> (Option<i64>, Option<u32>) {
        let Some(year) = self.field("year") else {
            if let Some(f) = self.field("month") {
                diag.warn(f.pos.clone(), "month without year");
            }
            return (None, None);
        };
        let parsed = (!year.value.is_empty() && year.value.chars().all(|c| c.is_ascii_digit()))
            .then(|| year.value.parse::<i64>().ok())
            .flatten();
        if parsed.is_none() {
            diag.warn(year.pos.clone(), format!("invalid year `{}'", year.value));
            return (None, None);
        }
        (parsed, self.month_num(diag))
    }

    /// Format this entry as a canonical BibTeX record: type lowercased, one
    /// field per line, braced values, trailing comma, and the month rendered
    /// as its standard macro when recognizable.
    #[must_use]
    pub fn to_bib(&self) -> String {
        let mut buf = Vec::new();
        crate::writer::Writer::new(&mut buf)
            .write_entry(self)
            .expect("writing to a Vec cannot fail");
        String::from_utf8(buf).expect("valid UTF-8")
    }
}

/// English month names, lowercased, January first.
pub(crate) const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// The standard month macro names, January first.
pub(crate) const MONTH_MACROS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Fuzzy month-name recognition: trimmed, trailing dots stripped, and
/// prefix-matched (at least three characters) against the month names.
pub(crate) fn month_number(value: &str) -> Option<u32> {
    let val = value.trim().trim_end_matches('.').to_ascii_lowercase();
    if val.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|m| m.starts_with(&val))
        .and_then(|i| u32::try_from(i + 1).ok())
}
