//! Input discovery for the CLI.
//!
//! Files are taken as given; directories are walked recursively for
//! configuration dumps (`.conf`, `.cfg`, `.txt`).

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// File extensions treated as configuration dumps.
pub const CONFIG_EXTENSIONS: [&str; 3] = ["conf", "cfg", "txt"];

/// Check whether a path looks like a configuration dump.
pub fn is_config_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| CONFIG_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Expand input paths into a sorted list of files.
///
/// Explicit files are kept regardless of extension. Paths that do not
/// exist are returned unchanged so reading them reports the error.
pub fn collect_inputs(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }

        let mut found: Vec<PathBuf> = WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && is_config_file(e.path()))
            .map(|e| e.into_path())
            .collect();
        found.sort();
        files.extend(found);
    }

    files
}
