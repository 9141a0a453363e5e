use std::fs;
use std::path::Path;

use log::debug;

use crate::config::StitchConfig;
use crate::rules::IgnoreRules;

/// Decides, per filesystem entry, whether it appears in the output.
///
/// One predicate gates both directory descent and file collection, so the
/// tree view and the content sections can never disagree about what is
/// visible.
pub(crate) struct VisibilityFilter<'a> {
    rules: &'a IgnoreRules,
    include_hidden: bool,
    max_file_size: u64,
    follow_symlinks: bool,
}

impl<'a> VisibilityFilter<'a> {
    pub(crate) fn new(rules: &'a IgnoreRules, config: &StitchConfig) -> Self {
        Self {
            rules,
            include_hidden: config.include_hidden,
            max_file_size: config.max_file_size,
            follow_symlinks: config.follow_symlinks,
        }
    }

    /// First matching rule wins: hidden segments, ignore patterns, file
    /// size, symlink policy. An entry whose metadata cannot be read at
    /// all is skipped (fail safe). The root itself is never tested.
    pub(crate) fn is_visible(
        &self,
        path: &Path,
        rel_path: &str,
        is_dir: bool,
        is_symlink: bool,
    ) -> bool {
        if !self.include_hidden && has_hidden_segment(rel_path) {
            debug!("Skipping hidden entry: {}", rel_path);
            return false;
        }
        if self.rules.matches(rel_path, is_dir) {
            debug!("Skipping ignored entry: {}", rel_path);
            return false;
        }
        if !is_dir {
            match fs::metadata(path) {
                Ok(meta) => {
                    if meta.is_file() && meta.len() > self.max_file_size {
                        debug!(
                            "Skipping oversized file ({} bytes): {}",
                            meta.len(),
                            rel_path
                        );
                        return false;
                    }
                }
                Err(e) => {
                    debug!("Skipping unreadable entry {}: {}", rel_path, e);
                    return false;
                }
            }
        }
        if is_symlink && !self.follow_symlinks {
            debug!("Skipping symlink: {}", rel_path);
            return false;
        }
        true
    }
}

/// Whether any `/`-separated segment is a dotfile name. The special `.`
/// and `..` segments do not count.
fn has_hidden_segment(rel_path: &str) -> bool {
    rel_path
        .split('/')
        .any(|seg| seg.starts_with('.') && seg != "." && seg != "..")
}
