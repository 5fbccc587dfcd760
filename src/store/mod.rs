//! Flat-file persistence for the inventory and billing tables.
//!
//! Both tables live in CSV files with a header row. Every save replaces the
//! whole file through a temporary sibling and a rename, so readers never see
//! a half-written table.

pub mod billing;
pub mod inventory;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use billing::*;
pub use inventory::*;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Malformed table in {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn malformed(path: &Path, reason: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// Writes `bytes` to `path` via a `<name>.tmp` sibling and a rename.
pub(crate) async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let tmp = temp_sibling(path);
    tokio::fs::write(&tmp, bytes)
        .await
        .map_err(|e| StoreError::io(&tmp, e))?;
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(StoreError::io(path, e));
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("table"));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_sibling() {
        assert_eq!(
            temp_sibling(Path::new("/data/sweets.csv")),
            PathBuf::from("/data/sweets.csv.tmp")
        );
    }

    #[tokio::test]
    async fn test_write_atomic_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        write_atomic(&path, b"old\n").await.unwrap();
        write_atomic(&path, b"new\n").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"new\n");
        assert!(!temp_sibling(&path).exists());
    }

    #[tokio::test]
    async fn test_write_atomic_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("table.csv");
        let err = write_atomic(&path, b"x").await.unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
