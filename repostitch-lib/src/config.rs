use std::path::PathBuf;

use crate::errors::{StitchError, StitchResult};

/// Default maximum file size (1 MiB) applied when no limit is configured.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Output document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Markdown with fenced, syntax-tagged code blocks.
    Markdown,
    /// Plain text with `BEGIN FILE`/`END FILE` delimiters.
    Text,
}

impl OutputFormat {
    /// File extension conventionally used for this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Text => "txt",
        }
    }
}

/// Text encoding used to decode file contents.
///
/// Both supported encodings decode totally: UTF-8 substitutes U+FFFD for
/// invalid sequences and Latin-1 maps every byte to a scalar value, so
/// decoding can never abort a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Latin1,
}

impl TextEncoding {
    /// Resolves an encoding label such as `utf-8` or `latin1`.
    pub fn from_name(name: &str) -> StitchResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" => Ok(TextEncoding::Latin1),
            _ => Err(StitchError::UnknownEncoding(name.to_string())),
        }
    }

    /// Decodes `bytes`, substituting rather than failing on invalid input.
    pub(crate) fn decode(self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            TextEncoding::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
        }
    }
}

/// Configuration for a stitch operation.
///
/// This struct holds all the settings that control which filesystem
/// entries are visible and how the output document is rendered. It is
/// typically constructed by the calling application (e.g. the CLI) based
/// on user input, and is never mutated after construction.
#[derive(Debug, Clone)]
pub struct StitchConfig {
    /// Root directory to walk. Canonicalized internally; must exist and
    /// be a directory.
    pub root: PathBuf,

    /// Output document format.
    pub format: OutputFormat,

    /// Explicit ignore-file path. When `None` and `use_gitignore` is
    /// set, `<root>/.gitignore` is consulted if present.
    pub gitignore_path: Option<PathBuf>,

    /// Whether gitignore-file patterns are honored at all.
    pub use_gitignore: bool,

    /// Optional named preset (`"python"` or `"node"`) adding a bundle of
    /// ecosystem ignore patterns. Validated when the pattern set is
    /// built; an unknown name is a configuration error.
    pub preset: Option<String>,

    /// Extra ignore patterns in gitignore syntax. Appended after every
    /// other pattern source, so they take precedence under the last-match
    /// semantics of the matcher.
    pub extra_ignores: Vec<String>,

    /// Include dotfiles and dot-directories.
    pub include_hidden: bool,

    /// Files strictly larger than this many bytes are skipped entirely.
    pub max_file_size: u64,

    /// Follow symbolic links while walking.
    pub follow_symlinks: bool,

    /// Render absolute filesystem paths in per-file sections instead of
    /// repository-relative ones.
    pub absolute_paths: bool,

    /// Encoding used to decode file contents.
    pub encoding: TextEncoding,

    /// Suppress informational console output. The engine itself never
    /// prints; this travels with the options for the caller's benefit.
    pub quiet: bool,
}
