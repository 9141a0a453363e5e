use std::fs;
use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::Match;
use log::{debug, warn};

use crate::config::StitchConfig;
use crate::errors::{StitchError, StitchResult};

/// Patterns excluded in every run, before presets and gitignore files.
const GLOBAL_IGNORES: &[&str] = &[
    ".git/",
    ".svn/",
    ".hg/",
    ".DS_Store",
    "Thumbs.db",
    ".idea/",
    ".vscode/",
    "*.exe",
    "*.dll",
];

const PYTHON_PRESET: &[&str] = &[
    "__pycache__/",
    "*.py[cod]",
    ".mypy_cache/",
    ".pytest_cache/",
    ".tox/",
    ".venv/",
    "venv/",
    "env/",
    "build/",
    "dist/",
    "*.egg-info/",
];

const NODE_PRESET: &[&str] = &[
    "node_modules/",
    "dist/",
    "build/",
    ".next/",
    ".nuxt/",
    ".cache/",
    "coverage/",
    "*.log",
];

fn preset_patterns(name: &str) -> Option<&'static [&'static str]> {
    match name.to_ascii_lowercase().as_str() {
        "python" => Some(PYTHON_PRESET),
        "node" => Some(NODE_PRESET),
        _ => None,
    }
}

/// The compiled ignore pattern set.
///
/// Combines the built-in global ignores, optional preset patterns,
/// optional gitignore-file lines and user-supplied patterns, in that
/// order, into a single gitignore-dialect matcher. Later patterns
/// override earlier ones, so user patterns have the last word. Immutable
/// after construction.
pub(crate) struct IgnoreRules {
    matcher: Gitignore,
}

impl IgnoreRules {
    /// Assembles and compiles the pattern set for one run.
    ///
    /// An unknown preset name fails before any pattern is added. A
    /// gitignore file that exists but cannot be read contributes no
    /// patterns; individual malformed pattern lines are skipped with a
    /// warning.
    pub(crate) fn build(root: &Path, config: &StitchConfig) -> StitchResult<Self> {
        let mut builder = GitignoreBuilder::new(root);

        for pattern in GLOBAL_IGNORES {
            add_pattern(&mut builder, pattern);
        }

        if let Some(name) = &config.preset {
            let patterns =
                preset_patterns(name).ok_or_else(|| StitchError::UnknownPreset(name.clone()))?;
            debug!("Applying '{}' preset ignore patterns", name);
            for pattern in patterns {
                add_pattern(&mut builder, pattern);
            }
        }

        if config.use_gitignore {
            let path = config
                .gitignore_path
                .clone()
                .unwrap_or_else(|| root.join(".gitignore"));
            match fs::read_to_string(&path) {
                Ok(contents) => {
                    debug!("Loading ignore patterns from {:?}", path);
                    for line in contents.lines() {
                        if line.trim().is_empty() {
                            continue;
                        }
                        add_pattern(&mut builder, line);
                    }
                }
                Err(e) if path.exists() => {
                    warn!("Could not read ignore file {:?}: {}", path, e);
                }
                Err(_) => {
                    debug!("No ignore file at {:?}", path);
                }
            }
        }

        for pattern in &config.extra_ignores {
            add_pattern(&mut builder, pattern);
        }

        let matcher = builder.build().map_err(StitchError::PatternBuildError)?;
        Ok(Self { matcher })
    }

    /// Whether `rel_path` is excluded by the pattern set.
    ///
    /// Directory-only patterns (trailing `/`) are honored through
    /// `is_dir`; a whitelist (`!pattern`) match keeps the entry.
    pub(crate) fn matches(&self, rel_path: &str, is_dir: bool) -> bool {
        matches!(self.matcher.matched(rel_path, is_dir), Match::Ignore(_))
    }
}

fn add_pattern(builder: &mut GitignoreBuilder, pattern: &str) {
    if let Err(e) = builder.add_line(None, pattern) {
        warn!("Skipping invalid ignore pattern '{}': {}", pattern, e);
    }
}
