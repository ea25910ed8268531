//! Per-language catalog variants.
//!
//! A variant is produced from a rendered catalog by substituting the value of
//! every live `"key=value"` line through a [`Translator`]. Headers, comments
//! and blank lines pass through untouched, so the variant keeps the same
//! grouping and annotations as the source catalog.

use super::CatalogLine;
use crate::error::{Error, Result};
use crate::scanner::read_document;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, trace};

/// Source of translated values.
///
/// Implement this trait to plug in another translation backend. Returning
/// `None` keeps the original value.
///
/// # Example
///
/// ```
/// use lrloc_core::catalog::Translator;
///
/// struct Shouting;
///
/// impl Translator for Shouting {
///     fn translate(&mut self, _key: &str, value: &str) -> Option<String> {
///         Some(value.to_uppercase())
///     }
/// }
/// ```
pub trait Translator {
    /// Returns the translated value for `key`, or `None` to keep `value`
    fn translate(&mut self, key: &str, value: &str) -> Option<String>;
}

/// Translator backed by an existing translated catalog
#[derive(Debug, Clone, Default)]
pub struct DictionaryTranslator {
    values: HashMap<String, String>,
}

impl DictionaryTranslator {
    /// Creates an empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dictionary from catalog text such as a previously written
    /// `TranslatedStrings_fr.txt`.
    ///
    /// The first value of a repeated key wins, as in the catalog itself.
    pub fn from_catalog_text(text: &str) -> Result<Self> {
        let mut dictionary = Self::new();
        for (index, line) in text.lines().enumerate() {
            if let Some((key, value)) = parse_line(index + 1, line)? {
                dictionary
                    .values
                    .entry(key.to_string())
                    .or_insert_with(|| value.to_string());
            }
        }
        debug!("Loaded {} translations", dictionary.len());
        Ok(dictionary)
    }

    /// Reads a translated catalog from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = read_document(path)?;
        Self::from_catalog_text(&text)
    }

    /// Adds or replaces a translation
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Number of known translations
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when the dictionary holds no translations
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Translator for DictionaryTranslator {
    fn translate(&mut self, key: &str, _value: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Counters for a translation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslateStats {
    /// Live entries whose value was replaced
    pub translated: usize,
    /// Live entries left in the source language
    pub untranslated: usize,
}

/// Parses one catalog line.
///
/// Comments and blank lines yield `None`. Live entries yield `(key, value)`;
/// the surrounding double quotes are optional since older catalogs were
/// written without them. `line_number` is 1-based and only used for errors.
pub fn parse_line(line_number: usize, line: &str) -> Result<Option<(&str, &str)>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let body = trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(trimmed);

    match body.split_once('=') {
        Some((key, value)) if !key.is_empty() && !key.contains(char::is_whitespace) => {
            Ok(Some((key, value)))
        }
        _ => Err(Error::invalid_catalog_line(line_number, line)),
    }
}

/// Rewrites the live entries of a rendered catalog through `translator`.
///
/// Only lines of the quoted `"key=value"` shape are live entries; every other
/// line is copied verbatim.
pub fn translate_lines<I, S>(
    lines: I,
    translator: &mut impl Translator,
) -> (Vec<String>, TranslateStats)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut stats = TranslateStats::default();
    let mut out = Vec::new();

    for line in lines {
        let line = line.as_ref();
        let Some((key, value)) = live_entry(line) else {
            out.push(line.to_string());
            continue;
        };

        match translator.translate(key, value) {
            Some(translated) => {
                stats.translated += 1;
                let entry = CatalogLine::Entry {
                    key: key.to_string(),
                    value: translated,
                };
                out.push(entry.to_string());
            }
            None => {
                trace!("No translation for {}", key);
                stats.untranslated += 1;
                out.push(line.to_string());
            }
        }
    }

    (out, stats)
}

fn live_entry(line: &str) -> Option<(&str, &str)> {
    if line.len() < 2 || !line.starts_with('"') || !line.ends_with('"') {
        return None;
    }
    parse_line(0, line).ok().flatten()
}
