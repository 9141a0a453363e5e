use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::config::StitchConfig;
use crate::filter::VisibilityFilter;

/// A filesystem entry that survived the visibility filter.
#[derive(Debug, Clone)]
pub struct StitchEntry {
    /// Absolute filesystem path, used for reading content.
    pub path: PathBuf,
    /// Repository-relative path with `/` separators on every platform.
    pub rel_path: String,
    /// Whether the entry is a directory.
    pub is_dir: bool,
}

/// Walks `root` once and returns the visible entries in the walk's
/// natural order.
///
/// Directories failing the visibility filter are pruned before descent,
/// so nothing inside them is ever visited. Both the tree renderer and the
/// content sections consume this one sequence, which is what keeps the
/// two views of the repository in agreement. Walk errors (unreadable
/// directories, symlink loops) are logged and skipped.
pub(crate) fn collect_entries(
    root: &Path,
    config: &StitchConfig,
    filter: &VisibilityFilter,
) -> Vec<StitchEntry> {
    debug!("Collecting entries under {:?}", root);
    let mut entries = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(config.follow_symlinks)
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            match relative_path(root, entry.path()) {
                Some(rel) => filter.is_visible(
                    entry.path(),
                    &rel,
                    entry.file_type().is_dir(),
                    entry.path_is_symlink(),
                ),
                None => false,
            }
        });

    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping path due to error during walk: {}", e);
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }
        let rel_path = match relative_path(root, entry.path()) {
            Some(rel) => rel,
            None => continue,
        };
        entries.push(StitchEntry {
            path: entry.path().to_path_buf(),
            rel_path,
            is_dir: entry.file_type().is_dir(),
        });
    }

    entries
}

/// Repository-relative rendering of `path` with forward-slash separators.
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let segments: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(segments.join("/"))
}
