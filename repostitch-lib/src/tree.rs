use std::collections::HashMap;
use std::path::Path;

use crate::listing::StitchEntry;

/// Renders the collected entries as a sorted, box-drawing directory tree.
///
/// Within each directory, subdirectories come before files and ties break
/// case-insensitively by name. The input is the collector's entry
/// sequence rather than a fresh walk, so the tree shows exactly the files
/// whose content follows in the document.
pub(crate) fn render_tree(root: &Path, entries: &[StitchEntry]) -> String {
    let root_label = root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());

    let mut children: HashMap<&str, Vec<&StitchEntry>> = HashMap::new();
    for entry in entries {
        children
            .entry(parent_of(&entry.rel_path))
            .or_default()
            .push(entry);
    }
    for siblings in children.values_mut() {
        siblings.sort_by_key(|e| (!e.is_dir, entry_name(e).to_lowercase()));
    }

    let mut out = format!("{}/\n", root_label);
    render_level(&children, "", "", &mut out);
    out
}

fn render_level(
    children: &HashMap<&str, Vec<&StitchEntry>>,
    dir: &str,
    prefix: &str,
    out: &mut String,
) {
    let siblings = match children.get(dir) {
        Some(siblings) => siblings,
        None => return,
    };
    for (i, entry) in siblings.iter().enumerate() {
        let last = i == siblings.len() - 1;
        let branch = if last { "└── " } else { "├── " };
        let name = entry_name(entry);
        if entry.is_dir {
            out.push_str(&format!("{}{}{}/\n", prefix, branch, name));
            let continuation = if last { "    " } else { "│   " };
            render_level(
                children,
                &entry.rel_path,
                &format!("{}{}", prefix, continuation),
                out,
            );
        } else {
            out.push_str(&format!("{}{}{}\n", prefix, branch, name));
        }
    }
}

fn parent_of(rel_path: &str) -> &str {
    rel_path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

fn entry_name(entry: &StitchEntry) -> &str {
    entry
        .rel_path
        .rsplit_once('/')
        .map(|(_, name)| name)
        .unwrap_or(&entry.rel_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entry(rel_path: &str, is_dir: bool) -> StitchEntry {
        StitchEntry {
            path: PathBuf::from("/proj").join(rel_path),
            rel_path: rel_path.to_string(),
            is_dir,
        }
    }

    #[test]
    fn directories_sort_before_files_case_insensitively() {
        let entries = vec![
            entry("Zed.txt", false),
            entry("beta", true),
            entry("beta/inner.txt", false),
            entry("alpha", true),
            entry("apple.txt", false),
        ];
        let rendered = render_tree(Path::new("/proj"), &entries);
        let expected = "\
proj/
├── alpha/
├── beta/
│   └── inner.txt
├── apple.txt
└── Zed.txt
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn nesting_switches_continuation_prefixes() {
        let entries = vec![
            entry("a", true),
            entry("a/one.txt", false),
            entry("a/two.txt", false),
            entry("b", true),
            entry("b/deep", true),
            entry("b/deep/leaf.txt", false),
        ];
        let rendered = render_tree(Path::new("/proj"), &entries);
        let expected = "\
proj/
├── a/
│   ├── one.txt
│   └── two.txt
└── b/
    └── deep/
        └── leaf.txt
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn empty_entry_list_renders_only_the_root() {
        let rendered = render_tree(Path::new("/proj"), &[]);
        assert_eq!(rendered, "proj/\n");
    }
}
