use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncReadExt;

/// Extensions accepted for saved model responses; files without one are read too
const SUPPORTED_EXTENSIONS: [&str; 4] = ["txt", "md", "json", "log"];

pub struct FileReader;

impl FileReader {
    pub fn is_supported(path: &Path) -> bool {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => SUPPORTED_EXTENSIONS.contains(&ext),
            None => true,
        }
    }

    pub async fn read_file(path: &Path) -> Result<String> {
        if !Self::is_supported(path) {
            let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            anyhow::bail!("Unsupported file format: {}", extension);
        }

        fs::read_to_string(path)
            .await
            .context(format!("Failed to read file: {:?}", path))
    }

    /// Supported files directly inside `dir`, sorted by path
    pub async fn list_directory(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        let mut entries = fs::read_dir(dir)
            .await
            .context(format!("Failed to read directory: {:?}", dir))?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.is_file() && Self::is_supported(&path) {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    pub async fn read_stdin() -> Result<String> {
        let mut content = String::new();
        tokio::io::stdin()
            .read_to_string(&mut content)
            .await
            .context("Failed to read stdin")?;
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        assert!(FileReader::is_supported(Path::new("response.txt")));
        assert!(FileReader::is_supported(Path::new("response.json")));
        assert!(FileReader::is_supported(Path::new("response")));
        assert!(!FileReader::is_supported(Path::new("image.png")));
    }

    #[tokio::test]
    async fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reply.txt");
        std::fs::write(&path, "Idea 1: Bakery").unwrap();

        let content = FileReader::read_file(&path).await.unwrap();
        assert_eq!(content, "Idea 1: Bakery");
    }

    #[tokio::test]
    async fn test_read_file_rejects_unsupported_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reply.png");
        std::fs::write(&path, "binary").unwrap();

        let err = FileReader::read_file(&path).await.unwrap_err();
        assert!(err.to_string().contains("Unsupported file format: png"));
    }

    #[tokio::test]
    async fn test_read_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = FileReader::read_file(&dir.path().join("missing.txt")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_list_directory_is_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "b").unwrap();
        std::fs::write(dir.path().join("a.json"), "a").unwrap();
        std::fs::write(dir.path().join("skip.png"), "x").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let files = FileReader::list_directory(dir.path()).await.unwrap();
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();

        assert_eq!(names, ["a.json", "b.txt"]);
    }
}
