use crate::errors::{Error, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Resolves one input path into the ordered list of files to process.
///
/// A file resolves to a one-element set. A directory resolves to every
/// non-directory descendant, depth-first, in the order the filesystem lists
/// siblings (not sorted). Symlinks and special files are collected like any
/// other entry. Unlike a gitignore-aware walk, nothing is filtered out: the
/// dictionary applies to every file under the root.
///
/// Any traversal error aborts the whole resolution; there are no partial
/// file sets.
pub fn resolve(path: &Path) -> Result<Vec<PathBuf>> {
    let meta = fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::PathNotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => Error::PermissionDenied(path.to_path_buf()),
        _ => Error::Io(e),
    })?;

    let root = std::path::absolute(path)?;

    if !meta.is_dir() {
        return Ok(vec![root]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&root) {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_single_file_resolves_to_itself() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("some-file.txt");
        fs::write(&file, "master blacklist").unwrap();

        let set = resolve(&file).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set[0].is_absolute());
        assert!(set[0].ends_with("some-file.txt"));
    }

    #[test]
    fn test_directory_resolves_recursively() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("some-file.txt"), "master").unwrap();
        fs::create_dir(temp_dir.path().join("empty-dir")).unwrap();
        let nested = temp_dir.path().join("another-dir").join("deeper");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("test.json"), "blah master blah").unwrap();

        let set = resolve(temp_dir.path()).unwrap();

        // The empty subdirectory contributes nothing; the file two levels
        // down is included.
        assert_eq!(set.len(), 2);
        assert!(set.iter().any(|p| p.ends_with("some-file.txt")));
        assert!(set.iter().any(|p| p.ends_with("another-dir/deeper/test.json")));
        assert!(set.iter().all(|p| p.is_absolute()));
    }

    #[test]
    fn test_missing_path_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let err = resolve(&temp_dir.path().join("no-such-entry")).unwrap_err();
        assert!(matches!(err, Error::PathNotFound(_)));
    }
}
