use std::fs;
use std::path::Path;

use log::{debug, warn};

use crate::config::{OutputFormat, StitchConfig, TextEncoding};
use crate::listing::StitchEntry;
use crate::utils::{is_probably_binary, BINARY_SAMPLE_LEN};

/// Text substituted for content that cannot or should not be emitted
/// verbatim (binary files, devices, vanished or unreadable files).
pub(crate) const SKIPPED_PLACEHOLDER: &str = "[Skipped: binary or unreadable]";

/// Reads a file as text under the configured encoding.
///
/// Returns `None` for anything that is not a readable regular text file.
/// Decoding never fails; invalid byte sequences are substituted. Each
/// file handle is dropped as soon as its read completes.
pub(crate) fn read_file_text(path: &Path, encoding: TextEncoding) -> Option<String> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => {
            debug!("Skipping non-regular file: {:?}", path);
            return None;
        }
        Err(e) => {
            warn!("Skipping file due to stat error: {:?} - {}", path, e);
            return None;
        }
    }
    if is_probably_binary(path, BINARY_SAMPLE_LEN) {
        debug!("Emitting placeholder for binary file: {:?}", path);
        return None;
    }
    match fs::read(path) {
        Ok(bytes) => Some(encoding.decode(&bytes)),
        Err(e) => {
            warn!("Skipping file due to read error: {:?} - {}", path, e);
            None
        }
    }
}

/// Builds the final document from the collected entries and the rendered
/// tree. Pure string assembly; writing the result anywhere is the
/// caller's responsibility.
pub(crate) fn assemble_document(
    root: &Path,
    entries: &[StitchEntry],
    tree: &str,
    generated: &str,
    config: &StitchConfig,
) -> String {
    let files: Vec<&StitchEntry> = entries.iter().filter(|e| !e.is_dir).collect();
    debug!("Assembling document with {} file sections", files.len());
    match config.format {
        OutputFormat::Markdown => render_markdown(root, &files, tree, generated, config),
        OutputFormat::Text => render_text(root, &files, tree, generated, config),
    }
}

fn render_markdown(
    root: &Path,
    files: &[&StitchEntry],
    tree: &str,
    generated: &str,
    config: &StitchConfig,
) -> String {
    let mut doc = String::new();
    doc.push_str("# Repostitch Output\n\n");
    doc.push_str(&format!("- **Root**: `{}`\n", root.display()));
    doc.push_str(&format!("- **Generated**: {}\n", generated));
    doc.push_str(&format!("- **Files included**: {}\n\n", files.len()));

    doc.push_str("## Folder Tree\n\n");
    doc.push_str("```text\n");
    doc.push_str(tree);
    doc.push_str("```\n\n");

    doc.push_str("## Files\n\n");
    for entry in files {
        doc.push_str(&format!("### `{}`\n\n", display_path(entry, config)));
        let lang = language_for(&entry.path);
        if lang.is_empty() {
            doc.push_str("```\n");
        } else {
            doc.push_str(&format!("```{}\n", lang));
        }
        match read_file_text(&entry.path, config.encoding) {
            Some(content) => {
                doc.push_str(&content);
                if !content.ends_with('\n') {
                    doc.push('\n');
                }
            }
            None => {
                doc.push_str(SKIPPED_PLACEHOLDER);
                doc.push('\n');
            }
        }
        doc.push_str("```\n\n");
    }
    doc
}

fn render_text(
    root: &Path,
    files: &[&StitchEntry],
    tree: &str,
    generated: &str,
    config: &StitchConfig,
) -> String {
    let mut doc = String::new();
    doc.push_str("Repostitch output\n");
    doc.push_str(&format!("Root: {}\n", root.display()));
    doc.push_str(&format!("Generated: {}\n", generated));
    doc.push_str(&"=".repeat(80));
    doc.push_str("\n\n");

    doc.push_str("FOLDER TREE\n");
    doc.push_str(&"-".repeat(80));
    doc.push('\n');
    doc.push_str(tree);
    doc.push('\n');

    doc.push_str("FILES\n");
    doc.push_str(&"-".repeat(80));
    doc.push('\n');
    for entry in files {
        let display = display_path(entry, config);
        doc.push_str(&format!("--- BEGIN FILE: {} ---\n", display));
        match read_file_text(&entry.path, config.encoding) {
            Some(content) => {
                doc.push_str(&content);
                if !content.ends_with('\n') {
                    doc.push('\n');
                }
            }
            None => {
                doc.push_str(SKIPPED_PLACEHOLDER);
                doc.push('\n');
            }
        }
        doc.push_str(&format!("--- END FILE: {} ---\n\n", display));
    }
    doc
}

fn display_path(entry: &StitchEntry, config: &StitchConfig) -> String {
    if config.absolute_paths {
        entry.path.display().to_string()
    } else {
        entry.rel_path.clone()
    }
}

/// Maps a file extension to a Markdown fence language tag. Unknown
/// extensions (and `txt`) get an untagged fence.
fn language_for(path: &Path) -> &'static str {
    let ext = match path.extension() {
        Some(ext) => ext.to_string_lossy().to_ascii_lowercase(),
        None => return "",
    };
    match ext.as_str() {
        "py" => "python",
        "js" => "javascript",
        "ts" => "typescript",
        "tsx" => "tsx",
        "jsx" => "jsx",
        "json" => "json",
        "yml" | "yaml" => "yaml",
        "toml" => "toml",
        "ini" | "cfg" => "ini",
        "md" => "markdown",
        "sh" | "zsh" => "bash",
        "ps1" => "powershell",
        "rb" => "ruby",
        "go" => "go",
        "rs" => "rust",
        "java" => "java",
        "kt" => "kotlin",
        "c" | "h" => "c",
        "cpp" | "hpp" => "cpp",
        "cs" => "csharp",
        "php" => "php",
        "sql" => "sql",
        "html" => "html",
        "css" => "css",
        "vue" => "vue",
        "sv" => "verilog",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_get_language_tags() {
        assert_eq!(language_for(Path::new("src/main.rs")), "rust");
        assert_eq!(language_for(Path::new("app.PY")), "python");
        assert_eq!(language_for(Path::new("conf/settings.yml")), "yaml");
    }

    #[test]
    fn unknown_extensions_get_untagged_fences() {
        assert_eq!(language_for(Path::new("notes.txt")), "");
        assert_eq!(language_for(Path::new("Makefile")), "");
        assert_eq!(language_for(Path::new("data.xyz")), "");
    }
}
