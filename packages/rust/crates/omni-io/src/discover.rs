//! UI source discovery.
//!
//! Enumerates component sources under a project root with `ignore`, so
//! `.gitignore`d build output is skipped along with dependency directories.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

/// Options for source discovery.
#[derive(Debug, Clone)]
pub struct DiscoverOptions {
    /// File extensions to include, with or without a leading dot.
    pub extensions: Vec<String>,
    /// Directory names never descended into.
    pub skip_dirs: Vec<String>,
    /// Skip hidden files and directories.
    pub skip_hidden: bool,
}

impl Default for DiscoverOptions {
    fn default() -> Self {
        Self {
            extensions: ["tsx", "jsx", "ts", "js"].map(String::from).to_vec(),
            skip_dirs: ["node_modules", ".git", "dist", "build"]
                .map(String::from)
                .to_vec(),
            skip_hidden: true,
        }
    }
}

/// Discover UI source files under `root`, sorted by path.
///
/// Unreadable entries are skipped. A missing root yields an empty list.
#[must_use]
pub fn discover_sources<P: AsRef<Path>>(root: P, options: &DiscoverOptions) -> Vec<PathBuf> {
    let root = root.as_ref();
    if !root.is_dir() {
        tracing::debug!(root = %root.display(), "discovery root is not a directory");
        return Vec::new();
    }

    let skip_dirs = options.skip_dirs.clone();
    let mut files: Vec<PathBuf> = WalkBuilder::new(root)
        .hidden(options.skip_hidden)
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            !(is_dir && entry.depth() > 0 && skip_dirs.iter().any(|d| entry.file_name() == d.as_str()))
        })
        .build()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
        .map(ignore::DirEntry::into_path)
        .filter(|path| has_extension(path, &options.extensions))
        .collect();

    files.sort();
    files
}

/// Whether `path` ends in one of `extensions` (case-insensitive).
#[must_use]
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|want| want.trim_start_matches('.').eq_ignore_ascii_case(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_extension() {
        let exts = vec![".tsx".to_string(), "jsx".to_string()];
        assert!(has_extension(Path::new("src/App.tsx"), &exts));
        assert!(has_extension(Path::new("src/App.JSX"), &exts));
        assert!(!has_extension(Path::new("src/App.css"), &exts));
        assert!(!has_extension(Path::new("Makefile"), &exts));
    }
}
