use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn resolve(&self, path: &str) -> PathBuf {
        if path.is_empty() || path == "." {
            self.base_path.clone()
        } else {
            self.base_path.join(path)
        }
    }
}

impl Storage for LocalStorage {
    /// Only regular files are read. FIFOs, sockets and devices report
    /// `NotFound` so a read can never block on them.
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.resolve(path);
        let metadata = tokio::fs::metadata(&full_path).await?;
        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} is not a regular file", full_path.display()),
            )
            .into());
        }

        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }

    async fn list_dir(&self, dir: &str) -> Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(self.resolve(dir)).await?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        names.sort();
        Ok(names)
    }

    async fn is_dir(&self, path: &str) -> bool {
        tokio::fs::metadata(self.resolve(path))
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }

    fn describe(&self) -> String {
        self.base_path.display().to_string()
    }
}
