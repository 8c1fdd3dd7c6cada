//! File Transfer
//!
//! Single-file delete-then-copy between the client directory and a
//! profile folder.

use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("Error copying file from {} to {}: {cause}", .source_path.display(), .destination.display())]
    CopyFailed {
        source_path: PathBuf,
        destination: PathBuf,
        #[source]
        cause: io::Error,
    },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FileTransferer;

impl FileTransferer {
    pub fn new() -> Self {
        Self
    }

    /// Replace `destination` with a copy of `source`, removing any
    /// existing destination first.
    pub async fn copy(&self, source: &Path, destination: &Path) -> Result<(), TransferError> {
        let fail = |cause: io::Error| TransferError::CopyFailed {
            source_path: source.to_path_buf(),
            destination: destination.to_path_buf(),
            cause,
        };

        match tokio::fs::remove_file(destination).await {
            Ok(()) => debug!("Removed existing {:?}", destination),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(fail(e)),
        }

        tokio::fs::copy(source, destination).await.map_err(fail)?;
        debug!("Copied {:?} -> {:?}", source, destination);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_copy_overwrites_destination() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("game.cfg");
        let dst = dir.path().join("copy.cfg");
        std::fs::write(&src, "new").unwrap();
        std::fs::write(&dst, "old contents that are longer").unwrap();

        FileTransferer::new().copy(&src, &dst).await.unwrap();
        assert_eq!(std::fs::read_to_string(&dst).unwrap(), "new");
    }

    #[tokio::test]
    async fn test_missing_source_names_both_paths() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("absent.cfg");
        let dst = dir.path().join("out.cfg");

        let err = FileTransferer::new().copy(&src, &dst).await.unwrap_err();
        let TransferError::CopyFailed {
            source_path,
            destination,
            cause,
        } = err;
        assert_eq!(source_path, src);
        assert_eq!(destination, dst);
        assert_eq!(cause.kind(), io::ErrorKind::NotFound);
    }
}
