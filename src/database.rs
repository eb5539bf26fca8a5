//! BibTeX database representation

use crate::diag::Diagnostics;
use crate::model::Entry;
use ahash::AHashMap;

/// A parsed BibTeX database: entries in first-seen order across every input
/// stream, plus the preamble text, the sealed macro table, and any
/// inter-entry comment text.
///
/// Keys compare case-sensitively for lookup; duplicates were already
/// detected case-insensitively during parsing, so each lowercased key maps
/// to exactly one entry.
#[derive(Debug, Clone, Default)]
pub struct Database {
    entries: Vec<Entry>,
    index: AHashMap<String, usize>,
    macros: AHashMap<String, String>,
    preamble: String,
    comments: Vec<String>,
}

impl Database {
    pub(crate) fn from_parts(
        entries: Vec<Entry>,
        index: AHashMap<String, usize>,
        macros: AHashMap<String, String>,
        preamble: String,
        comments: Vec<String>,
    ) -> Self {
        Self {
            entries,
            index,
            macros,
            preamble,
            comments,
        }
    }

    /// All entries, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the database holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by key, exact match.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.get_ci(key).filter(|e| e.key() == key)
    }

    /// Whether an entry with exactly this key exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Case-insensitive lookup, used for duplicate detection during parsing
    /// and for crossref targets (BibTeX compares keywords without case).
    fn get_ci(&self, key: &str) -> Option<&Entry> {
        self.index
            .get(&key.to_ascii_lowercase())
            .map(|&i| &self.entries[i])
    }

    /// The concatenated `@preamble` text of all input streams.
    #[must_use]
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// The macro table as sealed at finalization: lowercased names mapped to
    /// their expanded values, including the month macros.
    #[must_use]
    pub const fn macros(&self) -> &AHashMap<String, String> {
        &self.macros
    }

    /// Inter-entry comment text, in input order.
    #[must_use]
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// Return a new entry with crossref-ed fields incorporated.
    ///
    /// Every field present in the crossref target and absent in `entry` is
    /// appended with the target's raw value and position; the `crossref`
    /// field itself is removed. Chains resolve one hop only, and resolving
    /// an already-resolved entry returns it unchanged. A missing target is
    /// reported as a warning.
    #[must_use]
    pub fn resolve_crossref(&self, entry: &Entry, diag: &mut Diagnostics) -> Entry {
        let mut resolved = entry.clone();
        let Some(target_key) = entry.get("crossref").map(str::to_owned) else {
            return resolved;
        };
        match self.get_ci(&target_key) {
            Some(target) => {
                for field in target.fields() {
                    if !resolved.contains(&field.name) {
                        resolved.push_field(
                            field.name.clone(),
                            field.value.clone(),
                            field.pos.clone(),
                        );
                    }
                }
            }
            None => {
                let pos = entry
                    .field_pos("crossref")
                    .cloned()
                    .unwrap_or_else(|| entry.pos().clone());
                diag.warn(pos, format!("unknown crossref `{target_key}'"));
            }
        }
        resolved.remove_field("crossref");
        resolved
    }
}

impl<'a> IntoIterator for &'a Database {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
