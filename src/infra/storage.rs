use crate::domain::ports::ImageStore;
use crate::error::AppError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::error;

/// Writes uploads under the configured public directory. Filenames are
/// generated by the caller; only the basename is ever used, so a crafted
/// filename cannot escape the upload root.
pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn store(&self, filename: &str, bytes: &[u8]) -> Result<String, AppError> {
        let basename = Path::new(filename)
            .file_name()
            .ok_or_else(|| AppError::Validation("Invalid file name".to_string()))?;

        fs::create_dir_all(&self.root).await.map_err(|e| {
            error!("Failed to create upload dir: {}", e);
            AppError::Internal
        })?;

        let target = self.root.join(basename);
        fs::write(&target, bytes).await.map_err(|e| {
            error!("Failed to store upload {:?}: {}", target, e);
            AppError::Internal
        })?;

        Ok(basename.to_string_lossy().into_owned())
    }

    async fn remove(&self, path: &str) -> Result<(), AppError> {
        let Some(basename) = Path::new(path).file_name() else {
            return Ok(());
        };
        let target = self.root.join(basename);
        if let Err(e) = fs::remove_file(&target).await {
            // Missing files are fine; the row is the source of truth.
            if e.kind() != std::io::ErrorKind::NotFound {
                error!("Failed to remove upload {:?}: {}", target, e);
                return Err(AppError::Internal);
            }
        }
        Ok(())
    }
}
