//! Input discovery

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::Result;
use crate::processing::formats::has_supported_extension;

/// Expand the given files and directories into the list of images to resize.
///
/// Missing paths are skipped with a warning. Directories contribute their
/// direct children, or their whole tree when `recursive` is set. The result
/// is sorted and free of duplicates.
pub fn collect_files<P: AsRef<Path>>(paths: &[P], recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();

    for path in paths {
        let path = path.as_ref();

        if path.is_file() {
            if has_supported_extension(path) {
                files.insert(path.to_path_buf());
            } else {
                debug!("Skipping {:?}: unsupported extension", path);
            }
        } else if path.is_dir() {
            let walker = WalkDir::new(path).min_depth(1);
            let walker = if recursive { walker } else { walker.max_depth(1) };

            for entry in walker {
                let entry = entry?;
                if entry.file_type().is_file() && has_supported_extension(entry.path()) {
                    files.insert(entry.into_path());
                }
            }
        } else {
            warn!("Input path does not exist: {}", path.display());
        }
    }

    debug!("Discovered {} input files", files.len());
    Ok(files.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    fn tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in ["b.jpg", "a.PNG", "c.jpeg", "notes.txt", "nested/d.jpg"] {
            touch(&dir.path().join(name));
        }
        dir
    }

    #[test]
    fn test_direct_children_only() {
        let dir = tree();
        let files = collect_files(&[dir.path()], false).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.PNG", "b.jpg", "c.jpeg"]);
    }

    #[test]
    fn test_recursive() {
        let dir = tree();
        let files = collect_files(&[dir.path()], true).unwrap();
        assert_eq!(files.len(), 4);
        assert!(files.contains(&dir.path().join("nested/d.jpg")));
    }

    #[test]
    fn test_missing_and_duplicate_paths() {
        let dir = tree();
        let file = dir.path().join("b.jpg");
        let missing = dir.path().join("missing.jpg");

        let files = collect_files(&[file.clone(), missing, file.clone()], false).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_unsupported_file_is_skipped() {
        let dir = tree();
        let files = collect_files(&[dir.path().join("notes.txt")], false).unwrap();
        assert!(files.is_empty());
    }
}
