//! # lrloc-core
//!
//! A library for extracting `LOC` translation strings from Lightroom plug-in
//! sources and building a deduplicated `TranslatedStrings` catalog.
//!
//! This crate provides the core functionality for:
//! - Scanning Lua text for `LOC("$$$/namespace/key=Text")` invocations
//! - Reconstructing values split across concatenated literal fragments
//! - Recording pairs into a file-grouped catalog with duplicate and conflict
//!   annotations
//! - Producing per-language catalog variants
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`scanner`]: Call-site location and value reconstruction
//! - [`normalize`]: Value cleanup (placeholders, whitespace, paragraphs)
//! - [`catalog`]: Catalog building, rendering and translation
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```
//! use lrloc_core::{Catalog, Scanner};
//!
//! let source = r#"
//! local title = LOC "$$$/iNat/Title=Identify ^1"
//! local help = LOC("$$$/iNat/Help=Select a photo, " ..
//!     "then run the identifier.")
//! "#;
//!
//! let scanner = Scanner::new();
//! let mut catalog = Catalog::new();
//! catalog.record_document(&scanner, "Dialog.lua", source);
//!
//! assert_eq!(
//!     catalog.render(),
//!     vec![
//!         "# Dialog.lua",
//!         "\"$$$/iNat/Title=Identify {1}\"",
//!         "\"$$$/iNat/Help=Select a photo, then run the identifier.\"",
//!         "",
//!     ]
//! );
//! ```
//!
//! ## Extensibility
//!
//! - [`ScanStrategy`]: Customize how pairs are found in a document
//! - [`Translator`]: Customize where translated values come from
//!

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod catalog;
pub mod error;
pub mod normalize;
pub mod scanner;

// Re-export primary types for convenience
pub use catalog::{
    translate_lines, Catalog, CatalogLine, CatalogStats, DictionaryTranslator, RecordOutcome,
    TranslateStats, TranslationEntry, Translator,
};
pub use error::{Error, Result};
pub use normalize::normalize_value;
pub use scanner::{read_document, ScanResult, ScanStrategy, Scanner, ScannerConfig};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default name of the generated source-language catalog
pub const DEFAULT_CATALOG_NAME: &str = "TranslatedStrings_en.txt";

/// File name of the catalog for `lang`, e.g. `TranslatedStrings_fr.txt`
pub fn catalog_file_name(lang: &str) -> String {
    format!("TranslatedStrings_{}.txt", lang)
}
