use crate::config::STDIO_PATH;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

/// 本機檔案系統；路徑為 `-` 時改用 stdin / stdout
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        if path == STDIO_PATH {
            let mut data = Vec::new();
            std::io::stdin().lock().read_to_end(&mut data)?;
            return Ok(data);
        }

        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        if path == STDIO_PATH {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()?;
            return Ok(());
        }

        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_then_read_nested_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        storage
            .write_file("reports/today.txt", b"PKG1 0 175 0.07\n")
            .await
            .unwrap();
        let data = storage.read_file("reports/today.txt").await.unwrap();

        assert_eq!(data, b"PKG1 0 175 0.07\n");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        let err = storage.read_file("absent.txt").await.unwrap_err();
        assert!(matches!(err, crate::utils::error::CourierError::IoError(_)));
    }
}
