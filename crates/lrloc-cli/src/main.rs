//! lrloc - Build a TranslatedStrings catalog from Lightroom plug-in sources
//!
//! This tool scans Lua sources for `LOC("$$$/...=Text")` strings and writes
//! a deduplicated, file-grouped `TranslatedStrings_en.txt` catalog, with
//! optional per-language variants built from an existing translation.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, ValueEnum};
use lrloc_core::{
    catalog_file_name, read_document, translate_lines, Catalog, DictionaryTranslator, Error,
    Scanner, ScannerConfig, DEFAULT_CATALOG_NAME,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn, Level};
use tracing_subscriber::EnvFilter;
use walkdir::{DirEntry, WalkDir};

/// Build a TranslatedStrings catalog from Lightroom plug-in sources
#[derive(Parser, Debug)]
#[command(name = "lrloc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    input: InputMode,

    /// Catalog file to write
    #[arg(short, long, default_value = DEFAULT_CATALOG_NAME)]
    output: PathBuf,

    /// Source file extensions to scan (repeatable)
    #[arg(short, long = "extension", default_value = "lua")]
    extensions: Vec<String>,

    /// Only scan the top level of the directory
    #[arg(long)]
    no_recurse: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output format
    #[arg(long, value_enum, default_value = "catalog")]
    format: OutputFormat,

    /// Maximum number of strings to extract per file (0 = unlimited)
    #[arg(long, default_value = "0")]
    max_per_file: usize,

    /// Dry run - print the catalog instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// Overwrite an existing catalog that differs from the new one
    #[arg(long)]
    force: bool,

    /// Existing translated catalog used to build a language variant
    #[arg(long, requires = "lang")]
    translations: Option<PathBuf>,

    /// Language code of the variant, e.g. `fr`
    #[arg(long, requires = "translations")]
    lang: Option<String>,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct InputMode {
    /// Path to a single source file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Path to a plug-in directory to scan
    #[arg(short, long)]
    directory: Option<PathBuf>,
}

/// Output format for extracted strings
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// TranslatedStrings catalog
    Catalog,
    /// Just the accepted keys (for scripting)
    Keys,
}

/// A source document together with its header label
#[derive(Debug, Clone, PartialEq, Eq)]
struct Document {
    path: PathBuf,
    label: String,
}

/// Result of writing a catalog file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteOutcome {
    Written,
    Unchanged,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .init();

    // Dispatch based on input mode
    let documents = if let Some(ref file) = cli.input.file {
        single_document(file)?
    } else if let Some(ref directory) = cli.input.directory {
        collect_documents(directory, &cli.extensions, !cli.no_recurse)?
    } else {
        bail!("Either --file or --directory must be specified")
    };

    if documents.is_empty() {
        let root = cli.input.directory.as_deref().unwrap_or(Path::new("."));
        warn!("{}", Error::no_documents_found(root));
        return Ok(());
    }

    let catalog = build_catalog(&cli, &documents);
    if catalog.is_empty() {
        warn!("{}", Error::NothingExtracted);
        return Ok(());
    }

    match cli.format {
        OutputFormat::Keys => {
            for entry in catalog.entries() {
                println!("{}", entry.key);
            }
        }
        OutputFormat::Catalog => emit_catalog(&cli, &catalog)?,
    }

    Ok(())
}

/// Validate a single input file and label it by file name
fn single_document(file: &Path) -> Result<Vec<Document>> {
    if !file.exists() {
        bail!("Input file does not exist: {}", file.display());
    }
    if !file.is_file() {
        bail!("Input path is not a file: {}", file.display());
    }

    let label = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    Ok(vec![Document {
        path: file.to_path_buf(),
        label,
    }])
}

/// Walk a plug-in directory in file name order and collect source documents
fn collect_documents(
    directory: &Path,
    extensions: &[String],
    recurse: bool,
) -> Result<Vec<Document>> {
    if !directory.exists() {
        bail!("Directory does not exist: {}", directory.display());
    }
    if !directory.is_dir() {
        bail!("Path is not a directory: {}", directory.display());
    }

    info!("Scanning directory: {}", directory.display());

    let mut walker = WalkDir::new(directory)
        .follow_links(false)
        .sort_by_file_name();
    if !recurse {
        walker = walker.max_depth(1);
    }

    let mut documents = Vec::new();
    for entry in walker
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        if !has_extension(path, extensions) {
            trace!("Skipping non-source file: {}", path.display());
            continue;
        }

        documents.push(Document {
            path: path.to_path_buf(),
            label: source_label(directory, path),
        });
    }

    info!("Found {} source documents", documents.len());
    Ok(documents)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}

/// Case-insensitive extension match
fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            extensions
                .iter()
                .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Header label for a document: its path relative to the scanned root,
/// always with `/` separators
fn source_label(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Scan every document in order into a fresh catalog
fn build_catalog(cli: &Cli, documents: &[Document]) -> Catalog {
    let config = ScannerConfig::new().max_results(cli.max_per_file);
    let scanner = Scanner::with_config(config);
    let mut catalog = Catalog::new();

    for document in documents {
        debug!("Processing document: {}", document.path.display());
        match read_document(&document.path) {
            Ok(text) => {
                let count = catalog.record_document(&scanner, &document.label, &text);
                trace!("{} strings in {}", count, document.label);
            }
            Err(e) => {
                // Log error but continue with other documents
                warn!("Error processing {}: {}", document.path.display(), e);
            }
        }
    }

    let stats = catalog.stats();
    info!(
        "Summary: {} documents with strings, {} entries, {} duplicates, {} conflicts",
        stats.documents, stats.entries, stats.duplicates, stats.conflicts
    );

    catalog
}

/// Write (or print) the catalog and the optional language variant
fn emit_catalog(cli: &Cli, catalog: &Catalog) -> Result<()> {
    let lines = catalog.render();
    let content = lines.join("\n");

    if cli.dry_run {
        println!("{}", content);
    } else {
        report_write(&cli.output, write_catalog(&cli.output, &content, cli.force)?);
    }

    let (Some(translations), Some(lang)) = (&cli.translations, &cli.lang) else {
        return Ok(());
    };

    let mut dictionary = DictionaryTranslator::from_file(translations)
        .with_context(|| format!("Failed to load translations: {}", translations.display()))?;
    let (variant, stats) = translate_lines(&lines, &mut dictionary);
    info!(
        "Variant {}: {} translated, {} untranslated",
        lang, stats.translated, stats.untranslated
    );

    let variant_path = variant_path(&cli.output, lang);
    let variant_content = variant.join("\n");
    if cli.dry_run {
        println!("Would write: {}", variant_path.display());
    } else {
        let outcome = write_catalog(&variant_path, &variant_content, cli.force)?;
        report_write(&variant_path, outcome);
    }

    Ok(())
}

/// Path of the language variant, next to the main catalog
fn variant_path(output: &Path, lang: &str) -> PathBuf {
    output.with_file_name(catalog_file_name(lang))
}

fn report_write(path: &Path, outcome: WriteOutcome) {
    match outcome {
        WriteOutcome::Written => println!("Wrote {}", path.display()),
        WriteOutcome::Unchanged => println!("Unchanged {}", path.display()),
    }
}

/// Write catalog content verbatim, skipping the write when the existing
/// file already has the same content
fn write_catalog(output_path: &Path, content: &str, force: bool) -> Result<WriteOutcome> {
    if output_path.exists() {
        let existing = fs::read(output_path)
            .with_context(|| format!("Failed to read file: {}", output_path.display()))?;
        if blake3::hash(&existing) == blake3::hash(content.as_bytes()) {
            debug!("Catalog unchanged: {}", output_path.display());
            return Ok(WriteOutcome::Unchanged);
        }
        if !force {
            bail!(
                "File already exists: {} (use --force to overwrite)",
                output_path.display()
            );
        }
    }

    // Create parent directories
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::directory_create(parent, e))?;
    }

    fs::write(output_path, content).map_err(|e| Error::file_write(output_path, e))?;

    Ok(WriteOutcome::Written)
}
