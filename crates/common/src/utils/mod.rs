use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Collect every file under `root` with the given extension, sorted so the
/// result is stable across platforms and repeated runs.
pub fn paths_with_ext(root: &Path, ext: &str) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().map(|e| e == ext).unwrap_or(false))
        .collect();
    paths.sort();
    paths
}
