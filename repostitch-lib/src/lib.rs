#![doc = include_str!("../README.md")]

use std::io;

use chrono::Local;
use log::{debug, info};

mod config;
mod errors;
mod filter;
mod listing;
mod processing;
mod rules;
mod tree;
mod utils;

pub use config::{OutputFormat, StitchConfig, TextEncoding, DEFAULT_MAX_FILE_SIZE};
pub use errors::{StitchError, StitchResult};
pub use listing::StitchEntry;
pub use utils::{is_probably_binary, parse_size, BINARY_SAMPLE_LEN};

use filter::VisibilityFilter;
use rules::IgnoreRules;

/// Performs a stitch operation and returns the rendered document.
///
/// This is the primary entry point of the library. It canonicalizes the
/// configured root, compiles the ignore pattern set once, walks the tree
/// a single time to collect the visible entries, renders the folder tree
/// and assembles the final Markdown or plain-text document. The same
/// entry sequence feeds the tree and the per-file sections, so the two
/// views always agree on what is visible.
///
/// Binary and unreadable files are represented by a placeholder rather
/// than aborting the run, and bytes invalid under the configured encoding
/// are substituted. Only configuration-level problems return an error.
///
/// # Errors
///
/// * [`StitchError::RootNotFound`] / [`StitchError::RootNotADirectory`]
///   when the root is missing or not a directory.
/// * [`StitchError::UnknownPreset`] for an unrecognized preset name.
/// * [`StitchError::PatternBuildError`] when the combined pattern set
///   cannot be compiled.
/// * [`StitchError::IoError`] for I/O failures while resolving the root.
///
/// # Examples
///
/// ```no_run
/// use repostitch_lib::{
///     stitch_contents, OutputFormat, StitchConfig, TextEncoding, DEFAULT_MAX_FILE_SIZE,
/// };
///
/// let config = StitchConfig {
///     root: "./my_project".into(),
///     format: OutputFormat::Markdown,
///     gitignore_path: None,
///     use_gitignore: true,
///     preset: None,
///     extra_ignores: Vec::new(),
///     include_hidden: false,
///     max_file_size: DEFAULT_MAX_FILE_SIZE,
///     follow_symlinks: false,
///     absolute_paths: false,
///     encoding: TextEncoding::Utf8,
///     quiet: false,
/// };
///
/// let document = stitch_contents(&config).expect("stitch failed");
/// assert!(document.starts_with("# Repostitch Output"));
/// ```
pub fn stitch_contents(config: &StitchConfig) -> StitchResult<String> {
    info!("Starting stitch operation with config: {:?}", config);

    let root = config.root.canonicalize().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            StitchError::RootNotFound(config.root.clone())
        } else {
            StitchError::IoError {
                path: config.root.clone(),
                source: e,
            }
        }
    })?;
    if !root.is_dir() {
        return Err(StitchError::RootNotADirectory(root));
    }
    debug!("Canonical root: {:?}", root);

    let rules = IgnoreRules::build(&root, config)?;
    let filter = VisibilityFilter::new(&rules, config);
    let entries = listing::collect_entries(&root, config, &filter);
    info!("Collected {} visible entries.", entries.len());

    let tree = tree::render_tree(&root, &entries);
    let generated = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    Ok(processing::assemble_document(
        &root, &entries, &tree, &generated, config,
    ))
}
