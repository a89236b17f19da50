//! File system abstraction for testability.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// Abstraction over the file system operations the downloader needs.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Checks whether a regular file exists at the given path.
    async fn file_exists(&self, path: &Path) -> bool;

    /// Creates all directories in the given path. Existing directories are fine.
    async fn create_dir_all(&self, path: &Path) -> std::io::Result<()>;

    /// Moves `from` to `to`. Both must be on the same file system.
    async fn rename_file(&self, from: &Path, to: &Path) -> std::io::Result<()>;

    /// Removes a file.
    async fn remove_file(&self, path: &Path) -> std::io::Result<()>;
}

/// Default file system implementation using `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileSystem;

impl TokioFileSystem {
    /// Creates a new `TokioFileSystem` instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileSystem for TokioFileSystem {
    async fn file_exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok_and(|m| m.is_file())
    }

    async fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        tokio::fs::create_dir_all(path).await
    }

    async fn rename_file(&self, from: &Path, to: &Path) -> std::io::Result<()> {
        tokio::fs::rename(from, to).await
    }

    async fn remove_file(&self, path: &Path) -> std::io::Result<()> {
        tokio::fs::remove_file(path).await
    }
}

/// Returns a unique temporary path next to `destination`.
///
/// The file lives in the destination's own directory so the final rename
/// never crosses a file system boundary.
#[must_use]
pub fn temp_path_for(destination: &Path) -> PathBuf {
    let name = destination
        .file_name()
        .map_or_else(|| "download".into(), |n| n.to_string_lossy());
    let tmp_name = format!(".{name}.{}.part", uuid::Uuid::new_v4().simple());
    destination.with_file_name(tmp_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn tokio_fs_file_exists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.txt");
        std::fs::File::create(&path).unwrap();

        let fs = TokioFileSystem::new();
        assert!(fs.file_exists(&path).await);
        assert!(!fs.file_exists(&dir.path().join("nonexistent.txt")).await);
    }

    #[tokio::test]
    async fn tokio_fs_directory_is_not_a_file() {
        let dir = TempDir::new().unwrap();
        let fs = TokioFileSystem::new();
        assert!(!fs.file_exists(dir.path()).await);
    }

    #[tokio::test]
    async fn tokio_fs_create_dir_all_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a/b/c");

        let fs = TokioFileSystem::new();
        fs.create_dir_all(&nested).await.unwrap();
        fs.create_dir_all(&nested).await.unwrap();
        assert!(nested.is_dir());
    }

    #[tokio::test]
    async fn tokio_fs_rename_and_remove() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("from.bin");
        let to = dir.path().join("to.bin");
        std::fs::write(&from, b"payload").unwrap();

        let fs = TokioFileSystem::new();
        fs.rename_file(&from, &to).await.unwrap();
        assert!(!from.exists());
        assert_eq!(std::fs::read(&to).unwrap(), b"payload");

        fs.remove_file(&to).await.unwrap();
        assert!(!to.exists());
    }

    #[test]
    fn temp_path_is_colocated_and_unique() {
        let dest = Path::new("/data/discrete/images/val/front/img.zip");
        let a = temp_path_for(dest);
        let b = temp_path_for(dest);

        assert_eq!(a.parent(), dest.parent());
        assert_ne!(a, b);
        let name = a.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(".img.zip."));
        assert!(name.ends_with(".part"));
    }
}
