use crate::core::AssetLoader;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Assets read from a directory on disk.
#[derive(Debug, Clone)]
pub struct LocalAssets {
    base_path: PathBuf,
}

impl LocalAssets {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl AssetLoader for LocalAssets {
    async fn load(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(path);
        tracing::debug!("Reading {}", full_path.display());
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    fn describe(&self, path: &str) -> String {
        self.base_path.join(path).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::CatalogError;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_relative_to_base_path() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("flows")).unwrap();
        std::fs::write(dir.path().join("flows/patents.json"), br#"{"domain":"Patents"}"#).unwrap();

        let assets = LocalAssets::new(dir.path());
        assert_eq!(assets.base_path(), dir.path());
        let data = assets.load("flows/patents.json").await.unwrap();
        assert_eq!(data, br#"{"domain":"Patents"}"#);
        assert!(assets.describe("flows/patents.json").ends_with("patents.json"));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let assets = LocalAssets::new(dir.path());
        assert!(matches!(
            assets.load("missing.json").await,
            Err(CatalogError::Io(_))
        ));
    }
}
