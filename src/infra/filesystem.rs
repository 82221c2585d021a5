//! Filesystem operations
//!
//! Handles file and directory operations.

use std::path::Path;

use walkdir::WalkDir;

use crate::error::FilesystemError;

/// Create a directory and all parent directories
pub fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    std::fs::create_dir_all(path).map_err(|e| FilesystemError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Remove a directory and all its contents
pub fn remove_dir_all(path: &Path) -> Result<(), FilesystemError> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(|e| FilesystemError::RemoveDir {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
    }
    Ok(())
}

/// Write content to a file, creating parent directories as needed
pub fn write_file(path: &Path, content: &str) -> Result<(), FilesystemError> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    std::fs::write(path, content).map_err(|e| FilesystemError::WriteFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Read content from a file
pub fn read_file(path: &Path) -> Result<String, FilesystemError> {
    std::fs::read_to_string(path).map_err(|e| FilesystemError::ReadFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Copy a single file, creating the destination's parent directories
pub fn copy_file(from: &Path, to: &Path) -> Result<(), FilesystemError> {
    if let Some(parent) = to.parent() {
        create_dir_all(parent)?;
    }
    std::fs::copy(from, to).map_err(|e| FilesystemError::CopyFile {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        error: e.to_string(),
    })?;
    Ok(())
}

/// Recursively copy a directory tree
pub fn copy_dir_all(from: &Path, to: &Path) -> Result<(), FilesystemError> {
    create_dir_all(to)?;
    for entry in WalkDir::new(from).min_depth(1) {
        let entry = entry.map_err(|e| FilesystemError::ReadFile {
            path: from.to_path_buf(),
            error: e.to_string(),
        })?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .expect("walkdir yields children of its root");
        let target = to.join(relative);
        if entry.file_type().is_dir() {
            create_dir_all(&target)?;
        } else {
            copy_file(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/c.txt");
        write_file(&path, "hello").unwrap();
        assert_eq!(read_file(&path).unwrap(), "hello");
    }

    #[test]
    fn test_copy_dir_all_preserves_tree() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        write_file(&src.join("top.txt"), "top").unwrap();
        write_file(&src.join("nested/inner.txt"), "inner").unwrap();

        let dst = dir.path().join("dst");
        copy_dir_all(&src, &dst).unwrap();

        assert_eq!(read_file(&dst.join("top.txt")).unwrap(), "top");
        assert_eq!(read_file(&dst.join("nested/inner.txt")).unwrap(), "inner");
    }

    #[test]
    fn test_remove_missing_dir_is_ok() {
        let dir = TempDir::new().unwrap();
        assert!(remove_dir_all(&dir.path().join("absent")).is_ok());
    }
}
