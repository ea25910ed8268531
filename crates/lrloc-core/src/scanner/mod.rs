//! Source scanning module for finding LOC translation strings.
//!
//! This module locates `LOC("$$$/namespace/key=Text")` invocations (and the
//! `LOC "..."` shorthand) in arbitrary text and reconstructs each value from
//! its chain of concatenated literal fragments.
//!
//! ## Algorithm Overview
//!
//! 1. Search for the call name, check it is a whole word, then skip optional
//!    whitespace and `(` up to an opening quote
//! 2. Read the key up to the first unescaped `=`; reject the candidate if it
//!    does not look like `$$$/...`
//! 3. Read literal fragments joined by `..`, each one closed by its own
//!    opening quote character, resolving escapes as they are consumed
//! 4. Stop at the first non-literal concatenand and keep what was read
//! 5. Normalize the assembled value and yield `(key, value)`
//!
//! Each step is a transition of a small state machine driven by a
//! [`Cursor`](cursor::Cursor); there is no backtracking beyond returning to
//! the opening quote of a rejected candidate.
//!
//! ## Extensibility
//!
//! The [`ScanStrategy`] trait allows custom scanning algorithms:
//!
//! ```
//! use lrloc_core::scanner::{ScanResult, ScanStrategy};
//!
//! struct NothingScanner;
//!
//! impl ScanStrategy for NothingScanner {
//!     fn scan(&self, _text: &str) -> Vec<ScanResult> {
//!         Vec::new()
//!     }
//! }
//! ```

mod cursor;

use crate::error::{Error, Result};
use crate::normalize::normalize_value;
use cursor::{is_ident_char, is_quote, Cursor};
use std::ops::Range;
use std::path::Path;
use tracing::{debug, trace};

/// Default name of the localization function
pub const DEFAULT_CALL_NAME: &str = "LOC";

/// Prefix every translation key starts with
pub const DEFAULT_KEY_PREFIX: &str = "$$$/";

/// Lua string concatenation operator
const CONCAT: &str = "..";

/// A single extracted `(key, value)` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// Translation key, e.g. `$$$/iNat/PluginName`
    pub key: String,
    /// Normalized value
    pub value: String,
    /// Byte range of the consumed invocation, from the call name to the end
    /// of the last fragment read
    pub range: Range<usize>,
    /// True when the fragment chain stopped at a non-literal concatenand
    pub truncated: bool,
}

impl ScanResult {
    /// Returns the pair as borrowed strings
    pub fn pair(&self) -> (&str, &str) {
        (&self.key, &self.value)
    }
}

/// Configuration for the scanner
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Name of the localization function
    pub call_name: String,
    /// Required prefix of every key
    pub key_prefix: String,
    /// Maximum number of pairs to extract per document (0 = unlimited)
    pub max_results: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            call_name: DEFAULT_CALL_NAME.to_string(),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            max_results: 0,
        }
    }
}

impl ScannerConfig {
    /// Creates a new scanner config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the localization function name
    pub fn call_name(mut self, name: impl Into<String>) -> Self {
        self.call_name = name.into();
        self
    }

    /// Sets the required key prefix
    pub fn key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Sets the maximum number of results to return
    pub fn max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }
}

/// Trait for implementing custom scanning strategies
pub trait ScanStrategy: Send + Sync {
    /// Scan one document for translation strings, in source order
    fn scan(&self, text: &str) -> Vec<ScanResult>;
}

/// Primary scanner for LOC invocations
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    config: ScannerConfig,
}

impl Scanner {
    /// Creates a new scanner with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new scanner with custom configuration
    pub fn with_config(config: ScannerConfig) -> Self {
        Self { config }
    }

    /// Returns the scanner configuration
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Returns a lazy iterator over the pairs found in `text`
    pub fn matches<'a>(&'a self, text: &'a str) -> Matches<'a> {
        Matches {
            config: &self.config,
            cursor: Cursor::new(text),
            yielded: 0,
        }
    }
}

impl ScanStrategy for Scanner {
    fn scan(&self, text: &str) -> Vec<ScanResult> {
        debug!("Starting scan of {} bytes", text.len());
        let results: Vec<ScanResult> = self.matches(text).collect();
        debug!("Scan complete: found {} translation strings", results.len());
        results
    }
}

/// States of the key/value reconstruction machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Inside the opening literal, before the first `=`
    ReadingKey { quote: char },
    /// Inside a value fragment delimited by `quote`
    ReadingFragment { quote: char },
    /// Just consumed a fragment's closing quote
    AfterFragmentQuote,
    /// Past any whitespace after a fragment, looking at `..` or the end
    SeekingConcatOrEnd,
}

/// How a value chain ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChainEnd {
    /// Next token after the last fragment was not `..`
    Complete,
    /// `..` was followed by something other than a string literal
    Truncated,
}

/// Iterator over the translation strings of one document.
///
/// Created by [`Scanner::matches`]. The iterator is fused: once the
/// document is exhausted it keeps returning `None`.
#[derive(Debug, Clone)]
pub struct Matches<'a> {
    config: &'a ScannerConfig,
    cursor: Cursor<'a>,
    yielded: usize,
}

impl<'a> Matches<'a> {
    /// Advances to the next call site and positions the cursor just after
    /// its opening quote.
    ///
    /// Returns the byte offset of the call name and the quote character.
    fn next_call_site(&mut self) -> Option<(usize, char)> {
        let name = self.config.call_name.as_str();
        if name.is_empty() {
            return None;
        }

        loop {
            let offset = self.cursor.rest().find(name)?;
            let start = self.cursor.pos() + offset;
            self.cursor.reset(start);
            let standalone = !self.cursor.prev_char().is_some_and(is_ident_char);
            self.cursor.reset(start + name.len());

            if !standalone {
                continue;
            }

            self.cursor.skip_whitespace();
            if self.cursor.eat('(') {
                self.cursor.skip_whitespace();
            }

            match self.cursor.peek() {
                Some(quote) if is_quote(quote) => {
                    self.cursor.bump();
                    trace!("Found call site at offset {}", start);
                    return Some((start, quote));
                }
                _ => {
                    // Not a literal argument; resume right after the name
                    self.cursor.reset(start + name.len());
                }
            }
        }
    }

    /// Runs the reconstruction machine for the call site whose opening quote
    /// was just consumed.
    ///
    /// On rejection the cursor is put back just past the opening quote so
    /// the rest of the document is still scanned.
    fn reconstruct(&mut self, call_start: usize, quote: char) -> Option<ScanResult> {
        let key_start = self.cursor.pos();
        let mut key = String::new();
        let mut raw_value = String::new();
        let mut state = State::ReadingKey { quote };

        let end = loop {
            state = match state {
                State::ReadingKey { quote } => match self.cursor.bump() {
                    Some('=') => {
                        if !self.is_valid_key(&key) {
                            trace!("Rejected key {:?} at offset {}", key, call_start);
                            return self.reject(key_start);
                        }
                        State::ReadingFragment { quote }
                    }
                    Some('\\') => {
                        if !self.cursor.push_escape(&mut key) {
                            return self.reject(key_start);
                        }
                        State::ReadingKey { quote }
                    }
                    Some(c) if c == quote || c.is_whitespace() => {
                        trace!("No key at offset {}", call_start);
                        return self.reject(key_start);
                    }
                    Some(c) => {
                        key.push(c);
                        State::ReadingKey { quote }
                    }
                    None => return self.reject(key_start),
                },
                State::ReadingFragment { quote } => match self.cursor.bump() {
                    Some('\\') => {
                        if !self.cursor.push_escape(&mut raw_value) {
                            return self.unterminated(key_start, &key);
                        }
                        State::ReadingFragment { quote }
                    }
                    Some(c) if c == quote => State::AfterFragmentQuote,
                    Some(c) => {
                        raw_value.push(c);
                        State::ReadingFragment { quote }
                    }
                    None => return self.unterminated(key_start, &key),
                },
                State::AfterFragmentQuote => {
                    let before_whitespace = self.cursor.pos();
                    self.cursor.skip_whitespace();
                    if !self.cursor.rest().starts_with(CONCAT) {
                        // Leave trailing whitespace for the next search
                        self.cursor.reset(before_whitespace);
                        break ChainEnd::Complete;
                    }
                    State::SeekingConcatOrEnd
                }
                State::SeekingConcatOrEnd => {
                    self.cursor.eat_str(CONCAT);
                    self.cursor.skip_whitespace();
                    match self.cursor.peek() {
                        Some(next) if is_quote(next) => {
                            self.cursor.bump();
                            State::ReadingFragment { quote: next }
                        }
                        _ => {
                            trace!(
                                "Non-literal concatenand for {:?} at offset {}",
                                key,
                                self.cursor.pos()
                            );
                            break ChainEnd::Truncated;
                        }
                    }
                }
            };
        };

        let value = normalize_value(&raw_value);
        if value.is_empty() {
            trace!("Empty value for {:?}, skipping", key);
            return None;
        }

        Some(ScanResult {
            key,
            value,
            range: call_start..self.cursor.pos(),
            truncated: end == ChainEnd::Truncated,
        })
    }

    fn is_valid_key(&self, key: &str) -> bool {
        let prefix = self.config.key_prefix.as_str();
        key.len() > prefix.len()
            && key.starts_with(prefix)
            && !key.contains(|c: char| c.is_whitespace() || c == '=')
    }

    fn reject(&mut self, key_start: usize) -> Option<ScanResult> {
        self.cursor.reset(key_start);
        None
    }

    fn unterminated(&mut self, key_start: usize, key: &str) -> Option<ScanResult> {
        trace!("Unterminated value for {:?}", key);
        self.reject(key_start)
    }
}

impl<'a> Iterator for Matches<'a> {
    type Item = ScanResult;

    fn next(&mut self) -> Option<ScanResult> {
        if self.config.max_results > 0 && self.yielded >= self.config.max_results {
            return None;
        }

        while !self.cursor.is_eof() {
            let (call_start, quote) = self.next_call_site()?;
            if let Some(result) = self.reconstruct(call_start, quote) {
                self.yielded += 1;
                return Some(result);
            }
        }

        None
    }
}

impl std::iter::FusedIterator for Matches<'_> {}

/// Reads a document, replacing invalid UTF-8 sequences instead of failing
pub fn read_document(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| Error::file_read(path, e))?;
    Ok(decode_lossy(data))
}

/// Decodes bytes as UTF-8, substituting U+FFFD for invalid sequences
pub fn decode_lossy(data: Vec<u8>) -> String {
    match String::from_utf8(data) {
        Ok(text) => text,
        Err(e) => {
            debug!("Replacing invalid UTF-8 at byte {}", e.utf8_error().valid_up_to());
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}

/// Scan a file for translation strings
///
/// This is a convenience function that reads the file and scans it.
pub fn scan_file(path: impl AsRef<Path>) -> Result<Vec<ScanResult>> {
    scan_file_with_config(path, ScannerConfig::default())
}

/// Scan a file with custom configuration
pub fn scan_file_with_config(
    path: impl AsRef<Path>,
    config: ScannerConfig,
) -> Result<Vec<ScanResult>> {
    let text = read_document(path)?;
    Ok(Scanner::with_config(config).scan(&text))
}
