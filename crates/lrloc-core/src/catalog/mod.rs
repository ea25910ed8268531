//! Catalog building module.
//!
//! A [`Catalog`] accumulates `(key, value, source file)` triples in the order
//! documents are scanned and renders them as the line-oriented
//! `TranslatedStrings_xx.txt` format used by Lightroom plug-ins:
//!
//! ```text
//! # Info.lua
//! "$$$/iNat/PluginName=iNaturalist Identifier"
//!
//! # Dialog.lua
//! # DUPLICATE: "$$$/iNat/PluginName=iNaturalist Identifier"
//! # CONFLICT: "$$$/iNat/PluginName=iNat" (previous: iNaturalist Identifier)
//!
//! ```
//!
//! The first value recorded for a key is the accepted one. Later occurrences
//! are kept as comments so a reviewer can see and resolve them.

pub mod translate;

use crate::scanner::ScanStrategy;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

pub use translate::{
    parse_line, translate_lines, DictionaryTranslator, TranslateStats, Translator,
};

/// An accepted catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationEntry {
    /// Translation key
    pub key: String,
    /// Normalized value
    pub value: String,
    /// Document the entry was first seen in
    pub source_file: String,
}

/// One line of a rendered catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLine {
    /// `# <sourceFile>`
    Header(String),
    /// `"<key>=<value>"`
    Entry {
        /// Translation key
        key: String,
        /// Accepted value
        value: String,
    },
    /// `# DUPLICATE: "<key>=<value>"`
    Duplicate {
        /// Translation key
        key: String,
        /// Repeated value, identical to the accepted one
        value: String,
    },
    /// `# CONFLICT: "<key>=<value>" (previous: <firstValue>)`
    Conflict {
        /// Translation key
        key: String,
        /// Conflicting value
        value: String,
        /// Value accepted earlier for the same key
        previous: String,
    },
    /// Group separator
    Blank,
}

impl fmt::Display for CatalogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogLine::Header(file) => write!(f, "# {}", file),
            CatalogLine::Entry { key, value } => write!(f, "\"{}={}\"", key, value),
            CatalogLine::Duplicate { key, value } => {
                write!(f, "# DUPLICATE: \"{}={}\"", key, value)
            }
            CatalogLine::Conflict {
                key,
                value,
                previous,
            } => write!(f, "# CONFLICT: \"{}={}\" (previous: {})", key, value, previous),
            CatalogLine::Blank => Ok(()),
        }
    }
}

/// What [`Catalog::record`] did with an occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// First occurrence of the key; a live entry was added
    Accepted,
    /// Same key and byte-identical value as the accepted entry
    Duplicate,
    /// Same key with a different value
    Conflict,
}

/// Counters collected while recording
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogStats {
    /// Number of source groups
    pub documents: usize,
    /// Accepted entries
    pub entries: usize,
    /// Duplicate annotations
    pub duplicates: usize,
    /// Conflict annotations
    pub conflicts: usize,
}

#[derive(Debug, Clone)]
struct Group {
    source_file: String,
    lines: Vec<CatalogLine>,
}

/// Deduplicating, file-grouped translation catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Index into `entries` of the accepted entry for each key
    first_seen: HashMap<String, usize>,
    /// Accepted entries in acceptance order
    entries: Vec<TranslationEntry>,
    /// Emission list, one group per contiguous run of a source file
    groups: Vec<Group>,
    stats: CatalogStats,
}

impl Catalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of `key` found in `source_file`.
    ///
    /// Must be called in scan order, document by document.
    pub fn record(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        source_file: &str,
    ) -> RecordOutcome {
        let key = key.into();
        let value = value.into();

        let (outcome, line) = match self.first_seen.get(&key) {
            None => {
                self.first_seen.insert(key.clone(), self.entries.len());
                self.entries.push(TranslationEntry {
                    key: key.clone(),
                    value: value.clone(),
                    source_file: source_file.to_string(),
                });
                self.stats.entries += 1;
                (RecordOutcome::Accepted, CatalogLine::Entry { key, value })
            }
            Some(&index) => {
                let first = &self.entries[index];
                if first.value == value {
                    debug!(
                        "Duplicate {} in {} (first in {})",
                        key, source_file, first.source_file
                    );
                    self.stats.duplicates += 1;
                    (RecordOutcome::Duplicate, CatalogLine::Duplicate { key, value })
                } else {
                    debug!(
                        "Conflict {} in {}: {:?} vs {:?} from {}",
                        key, source_file, value, first.value, first.source_file
                    );
                    let previous = first.value.clone();
                    self.stats.conflicts += 1;
                    (
                        RecordOutcome::Conflict,
                        CatalogLine::Conflict {
                            key,
                            value,
                            previous,
                        },
                    )
                }
            }
        };

        self.group_for(source_file).lines.push(line);
        outcome
    }

    /// Scans `text` with `scanner` and records every pair under
    /// `source_file`, returning the number of pairs recorded.
    pub fn record_document(
        &mut self,
        scanner: &dyn ScanStrategy,
        source_file: &str,
        text: &str,
    ) -> usize {
        let results = scanner.scan(text);
        let count = results.len();
        for result in results {
            self.record(result.key, result.value, source_file);
        }
        debug!("Recorded {} pairs from {}", count, source_file);
        count
    }

    /// Returns the open group for `source_file`, starting a new one when the
    /// source changes.
    fn group_for(&mut self, source_file: &str) -> &mut Group {
        let continues = self
            .groups
            .last()
            .is_some_and(|group| group.source_file == source_file);

        if !continues {
            self.stats.documents += 1;
            self.groups.push(Group {
                source_file: source_file.to_string(),
                lines: Vec::new(),
            });
        }

        let last = self.groups.len() - 1;
        &mut self.groups[last]
    }

    /// Returns the accepted entry for `key`
    pub fn get(&self, key: &str) -> Option<&TranslationEntry> {
        self.first_seen.get(key).map(|&index| &self.entries[index])
    }

    /// Iterates accepted entries in acceptance order
    pub fn entries(&self) -> impl Iterator<Item = &TranslationEntry> + '_ {
        self.entries.iter()
    }

    /// Returns true when nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of accepted entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the recording statistics
    pub fn stats(&self) -> CatalogStats {
        self.stats
    }

    /// Iterates the catalog lines: each group is a header, its lines, and a
    /// closing blank line.
    pub fn lines(&self) -> impl Iterator<Item = CatalogLine> + '_ {
        self.groups.iter().flat_map(|group| {
            std::iter::once(CatalogLine::Header(group.source_file.clone()))
                .chain(group.lines.iter().cloned())
                .chain(std::iter::once(CatalogLine::Blank))
        })
    }

    /// Renders the catalog as output lines, empty when nothing was recorded
    pub fn render(&self) -> Vec<String> {
        self.lines().map(|line| line.to_string()).collect()
    }

    /// Renders the catalog as file content, lines joined with `\n`
    pub fn render_text(&self) -> String {
        self.render().join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_line_grammar() {
        assert_eq!(CatalogLine::Header("Info.lua".into()).to_string(), "# Info.lua");
        assert_eq!(
            CatalogLine::Entry {
                key: "$$$/a".into(),
                value: "A".into()
            }
            .to_string(),
            "\"$$$/a=A\""
        );
        assert_eq!(
            CatalogLine::Duplicate {
                key: "$$$/a".into(),
                value: "A".into()
            }
            .to_string(),
            "# DUPLICATE: \"$$$/a=A\""
        );
        assert_eq!(
            CatalogLine::Conflict {
                key: "$$$/a".into(),
                value: "B".into(),
                previous: "A".into()
            }
            .to_string(),
            "# CONFLICT: \"$$$/a=B\" (previous: A)"
        );
        assert_eq!(CatalogLine::Blank.to_string(), "");
    }

    #[test]
    fn test_same_triple_twice() {
        let mut catalog = Catalog::new();
        assert_eq!(catalog.record("$$$/k", "A", "f.lua"), RecordOutcome::Accepted);
        assert_eq!(catalog.record("$$$/k", "A", "f.lua"), RecordOutcome::Duplicate);

        assert_eq!(
            catalog.render(),
            vec!["# f.lua", "\"$$$/k=A\"", "# DUPLICATE: \"$$$/k=A\"", ""]
        );
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_conflict_keeps_first_value() {
        let mut catalog = Catalog::new();
        catalog.record("$$$/k", "A", "f1.lua");
        assert_eq!(catalog.record("$$$/k", "B", "f2.lua"), RecordOutcome::Conflict);

        assert_eq!(
            catalog.render(),
            vec![
                "# f1.lua",
                "\"$$$/k=A\"",
                "",
                "# f2.lua",
                "# CONFLICT: \"$$$/k=B\" (previous: A)",
                "",
            ]
        );

        let entry = catalog.get("$$$/k").unwrap();
        assert_eq!(entry.value, "A");
        assert_eq!(entry.source_file, "f1.lua");
    }

    #[test]
    fn test_conflict_compares_with_first_not_latest() {
        let mut catalog = Catalog::new();
        catalog.record("$$$/k", "A", "f.lua");
        catalog.record("$$$/k", "B", "f.lua");
        assert_eq!(catalog.record("$$$/k", "B", "f.lua"), RecordOutcome::Conflict);
        assert_eq!(catalog.record("$$$/k", "A", "f.lua"), RecordOutcome::Duplicate);
    }

    #[test]
    fn test_exact_equality_only() {
        let mut catalog = Catalog::new();
        catalog.record("$$$/k", "Photo", "f.lua");
        assert_eq!(catalog.record("$$$/k", "photo", "f.lua"), RecordOutcome::Conflict);
        assert_eq!(catalog.record("$$$/k", "Photo ", "f.lua"), RecordOutcome::Conflict);
    }

    #[test]
    fn test_groups_follow_input_order() {
        let mut catalog = Catalog::new();
        catalog.record("$$$/b", "2", "b.lua");
        catalog.record("$$$/a", "1", "a.lua");
        catalog.record("$$$/c", "3", "a.lua");

        assert_eq!(
            catalog.render(),
            vec![
                "# b.lua",
                "\"$$$/b=2\"",
                "",
                "# a.lua",
                "\"$$$/a=1\"",
                "\"$$$/c=3\"",
                "",
            ]
        );
        assert_eq!(
            catalog.entries().map(|e| e.key.as_str()).collect::<Vec<_>>(),
            vec!["$$$/b", "$$$/a", "$$$/c"]
        );
    }

    #[test]
    fn test_stats() {
        let mut catalog = Catalog::new();
        catalog.record("$$$/a", "1", "a.lua");
        catalog.record("$$$/a", "1", "b.lua");
        catalog.record("$$$/a", "2", "b.lua");
        catalog.record("$$$/b", "3", "b.lua");

        assert_eq!(
            catalog.stats(),
            CatalogStats {
                documents: 2,
                entries: 2,
                duplicates: 1,
                conflicts: 1,
            }
        );
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::new();
        assert!(catalog.is_empty());
        assert!(catalog.render().is_empty());
        assert_eq!(catalog.render_text(), "");
        assert!(catalog.get("$$$/missing").is_none());
    }

    #[test]
    fn test_render_text_ends_with_newline() {
        let mut catalog = Catalog::new();
        catalog.record("$$$/a", "Line1\\n\\nLine2", "a.lua");
        assert_eq!(catalog.render_text(), "# a.lua\n\"$$$/a=Line1\\n\\nLine2\"\n");
    }

    #[test]
    fn test_record_document() {
        let scanner = crate::scanner::Scanner::new();
        let mut catalog = Catalog::new();
        let count = catalog.record_document(
            &scanner,
            "Info.lua",
            r#"LrPluginName = LOC "$$$/iNat/Name=iNat", LOC("$$$/iNat/Name=iNat")"#,
        );
        assert_eq!(count, 2);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.stats().duplicates, 1);

        let count = catalog.record_document(&scanner, "Empty.lua", "return {}");
        assert_eq!(count, 0);
        assert_eq!(catalog.stats().documents, 1);
    }

    #[test]
    fn test_independent_catalogs() {
        let mut first = Catalog::new();
        let mut second = Catalog::new();
        first.record("$$$/k", "A", "f.lua");
        assert_eq!(second.record("$$$/k", "B", "f.lua"), RecordOutcome::Accepted);
    }
}
