//! # bibdb
//!
//! A `.bib` database parser faithful to the BibTeX program itself, plus the
//! field transforms BibTeX styles apply: name splitting, title casing, and
//! TeX-to-Unicode translation.
//!
//! ## Features
//!
//! - BibTeX's own grammar, including `@string` macro expansion, `@preamble`
//!   accumulation, both `{…}` and `(…)` entry delimiters, and recovery at
//!   the next `@` after a malformed construct
//! - Location-tagged diagnostics collected in a caller-owned sink, with a
//!   single fatal condition raised at finalization
//! - Name-field parsing into the four BibTeX parts (First, von, Last, Jr)
//! - Title casing under the `t` format rules
//! - Accent and control-sequence translation to plain Unicode
//! - Cross-reference resolution with BibTeX's one-hop semantics
//!
//! ## Example
//!
//! ```
//! use bibdb::{Diagnostics, Parser};
//!
//! let input = r#"
//!     @string{ap = "Annalen der Physik"}
//!     @article{einstein1905,
//!         author = "Albert Einstein",
//!         title = {Zur Elektrodynamik bewegter K{\"o}rper},
//!         journal = ap,
//!         year = 1905
//!     }
//! "#;
//!
//! let mut diag = Diagnostics::new();
//! let mut parser = Parser::new();
//! parser.parse(input, "example.bib", &mut diag);
//! let db = parser.finalize(&diag)?;
//!
//! let entry = db.get("einstein1905").unwrap();
//! assert_eq!(entry.get("journal"), Some("Annalen der Physik"));
//!
//! let authors = entry.authors(&mut diag);
//! assert_eq!(authors[0].last, "Einstein");
//! # Ok::<(), bibdb::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    missing_docs,
    missing_debug_implementations
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod case;
pub mod diag;
pub mod error;
pub mod model;
pub mod names;
pub mod parser;
pub mod pos;
pub mod tex;

mod database;
mod writer;

pub use case::title_case;
pub use database::Database;
pub use diag::{Diagnostic, Diagnostics, Severity};
pub use error::{Error, Result};
pub use model::{Entry, Field};
pub use names::{parse_names, Name};
pub use parser::{MonthStyle, Parser};
pub use pos::Pos;
pub use tex::{first_alphabetic, tex_to_unicode};
pub use writer::{to_file, to_string, Writer, WriterConfig};

/// Re-export of the most common types
pub mod prelude {
    pub use crate::{Database, Diagnostics, Entry, Error, Name, Parser, Result};
}

/// Parse a BibTeX database from a string.
///
/// Convenience wrapper that discards warnings; thread your own
/// [`Diagnostics`] through [`Parser`] to inspect them.
pub fn parse(input: &str) -> Result<Database> {
    let mut diag = Diagnostics::new();
    let mut parser = Parser::new();
    parser.parse(input, "<string>", &mut diag);
    parser.finalize(&diag)
}

/// Parse a BibTeX database from a file.
pub fn parse_file(path: impl AsRef<std::path::Path>) -> Result<Database> {
    let path = path.as_ref();
    let input = std::fs::read_to_string(path)?;
    let mut diag = Diagnostics::new();
    let mut parser = Parser::new();
    parser.parse(&input, &path.display().to_string(), &mut diag);
    parser.finalize(&diag)
}
