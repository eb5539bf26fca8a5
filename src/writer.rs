//! Canonical BibTeX output for databases and entries

use crate::database::Database;
use crate::error::Result;
use crate::model::{month_number, Entry, MONTH_MACROS};
use std::io::{self, Write};

/// Configuration for writing BibTeX
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Indentation in front of each field line (default: two spaces)
    pub indent: String,
    /// Column width field names are padded to (default: 12)
    pub name_width: usize,
    /// Replace recognizable month values with their standard macro
    /// (default: true)
    pub month_to_macro: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            name_width: 12,
            month_to_macro: true,
        }
    }
}

/// Writes entries in the canonical form: type lowercased, one field per
/// line, braced values, trailing comma.
#[derive(Debug)]
pub struct Writer<W: Write> {
    writer: W,
    config: WriterConfig,
}

impl<W: Write> Writer<W> {
    /// Create a writer with the default configuration.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            config: WriterConfig::default(),
        }
    }

    /// Create a writer with a custom configuration.
    pub const fn with_config(writer: W, config: WriterConfig) -> Self {
        Self { writer, config }
    }

    /// Write a complete database: the preamble (if any), then every entry
    /// in insertion order, blank-line separated.
    pub fn write_database(&mut self, db: &Database) -> io::Result<()> {
        if !db.preamble().is_empty() {
            writeln!(self.writer, "@preamble{{{{{}}}}}", db.preamble())?;
            writeln!(self.writer)?;
        }
        for (i, entry) in db.entries().iter().enumerate() {
            if i > 0 {
                writeln!(self.writer)?;
            }
            self.write_entry(entry)?;
        }
        Ok(())
    }

    /// Write a single entry.
    pub fn write_entry(&mut self, entry: &Entry) -> io::Result<()> {
        writeln!(self.writer, "@{}{{{},", entry.typ(), entry.key())?;
        for field in entry.fields() {
            if self.config.month_to_macro && field.name == "month" {
                if let Some(month) = month_number(&field.value) {
                    writeln!(
                        self.writer,
                        "{}{:<width$} = {},",
                        self.config.indent,
                        field.name,
                        MONTH_MACROS[month as usize - 1],
                        width = self.config.name_width
                    )?;
                    continue;
                }
            }
            writeln!(
                self.writer,
                "{}{:<width$} = {{{}}},",
                self.config.indent,
                field.name,
                field.value,
                width = self.config.name_width
            )?;
        }
        writeln!(self.writer, "}}")?;
        Ok(())
    }
}

/// Render a database to a string.
pub fn to_string(db: &Database) -> Result<String> {
    let mut buf = Vec::new();
    let mut writer = Writer::new(&mut buf);
    writer.write_database(db)?;
    Ok(String::from_utf8(buf).expect("valid UTF-8"))
}

/// Write a database to a file.
pub fn to_file(db: &Database, path: impl AsRef<std::path::Path>) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = Writer::new(file);
    writer.write_database(db)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn test_entry_format() {
        let db = parse("@ARTICLE{Key99, TITLE = {A} # { Title}, year = 1999}").unwrap();
        let out = db.get("Key99").unwrap().to_bib();
        assert_eq!(
            out,
            "@article{Key99,\n  title        = {A Title},\n  year         = {1999},\n}\n"
        );
    }

    #[test]
    fn test_month_becomes_macro() {
        let db = parse("@misc{m, month = {September}}").unwrap();
        let out = db.get("m").unwrap().to_bib();
        assert!(out.contains("month        = sep,"));

        let mut buf = Vec::new();
        let config = WriterConfig {
            month_to_macro: false,
            ..WriterConfig::default()
        };
        Writer::with_config(&mut buf, config)
            .write_entry(db.get("m").unwrap())
            .unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("{September}"));
    }

    #[test]
    fn test_database_roundtrips_through_writer() {
        let db = parse(
            "@preamble{\"p\"}\n\
             @article{a, title = {One}}\n\
             @book{b, title = {Two}, month = jan}",
        )
        .unwrap();
        let rendered = to_string(&db).unwrap();
        let again = parse(&rendered).unwrap();

        assert_eq!(again.len(), db.len());
        assert_eq!(again.preamble(), db.preamble());
        assert_eq!(
            again.get("a").unwrap().get("title"),
            db.get("a").unwrap().get("title")
        );
        assert_eq!(again.get("b").unwrap().get("month"), Some("January"));
    }
}
