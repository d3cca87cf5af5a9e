//! # File Management Module
//!
//! Questo modulo gestisce tutte le operazioni sui file e la discovery delle immagini.
//!
//! ## Responsabilità:
//! - Discovery dei file immagine nella directory di input (solo primo livello)
//! - Classificazione dei formati per famiglia (JPEG, PNG, SVG, copy-only)
//! - Creazione idempotente di directory
//! - Utilità per calcoli dimensioni e formattazione human-readable
//!
//! ## Formati riconosciuti:
//! - **Comprimibili**: JPG, JPEG, PNG, SVG
//! - **Copy-only**: GIF, ICO, WebP (nessun codec dedicato, copiati verbatim)
//!
//! Le estensioni sono confrontate case-insensitive; i file con estensioni
//! sconosciute vengono ignorati silenziosamente.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;
use walkdir::WalkDir;

/// Manages file operations and image discovery
pub struct FileManager;

impl FileManager {
    /// Create a directory if it doesn't exist (no-op when already present)
    pub async fn ensure_dir(path: &Path) -> Result<()> {
        if fs::metadata(path).await.is_err() {
            fs::create_dir_all(path).await?;
            info!("📁 Created directory: {}", path.display());
        }
        Ok(())
    }

    /// Find all recognized image files directly inside a directory.
    ///
    /// The scan is flat (subdirectories are not entered) and fails when the
    /// directory itself cannot be read, so callers decide whether that is
    /// fatal for their phase.
    pub fn scan_images(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if Self::is_known_image(path) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    fn extension_lowercase(path: &Path) -> Option<String> {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }

    /// Check if a file belongs to the JPEG family
    pub fn is_jpeg(path: &Path) -> bool {
        matches!(
            Self::extension_lowercase(path).as_deref(),
            Some("jpg") | Some("jpeg")
        )
    }

    /// Check if a file is a PNG
    pub fn is_png(path: &Path) -> bool {
        matches!(Self::extension_lowercase(path).as_deref(), Some("png"))
    }

    /// Check if a file is an SVG
    pub fn is_svg(path: &Path) -> bool {
        matches!(Self::extension_lowercase(path).as_deref(), Some("svg"))
    }

    /// Check if a file has no dedicated codec and is copied verbatim
    pub fn is_copy_only(path: &Path) -> bool {
        matches!(
            Self::extension_lowercase(path).as_deref(),
            Some("gif") | Some("ico") | Some("webp")
        )
    }

    /// Check if a file is part of the backup set (the site's source formats)
    pub fn is_backup_candidate(path: &Path) -> bool {
        matches!(
            Self::extension_lowercase(path).as_deref(),
            Some("jpg") | Some("jpeg") | Some("png") | Some("svg") | Some("gif")
        )
    }

    /// Check if a file matches any recognized image extension
    pub fn is_known_image(path: &Path) -> bool {
        matches!(
            Self::extension_lowercase(path).as_deref(),
            Some("jpg") | Some("jpeg") | Some("png") | Some("svg") | Some("gif") | Some("ico")
                | Some("webp")
        )
    }

    /// Get a file's size in bytes
    pub async fn file_size(path: &Path) -> Result<u64> {
        Ok(fs::metadata(path).await?.len())
    }

    /// Get a file's size in KB rounded to two decimals, 0.0 when unreadable
    pub async fn file_size_kb(path: &Path) -> f64 {
        match fs::metadata(path).await {
            Ok(metadata) => (metadata.len() as f64 / 1024.0 * 100.0).round() / 100.0,
            Err(_) => 0.0,
        }
    }

    /// Get human-readable file size
    pub fn format_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        File::create(&path).unwrap();
        path
    }

    #[test]
    fn test_format_classification() {
        assert!(FileManager::is_jpeg(Path::new("photo.jpg")));
        assert!(FileManager::is_jpeg(Path::new("photo.JPEG")));
        assert!(FileManager::is_png(Path::new("logo.png")));
        assert!(FileManager::is_svg(Path::new("icon.SVG")));
        assert!(FileManager::is_copy_only(Path::new("anim.gif")));
        assert!(FileManager::is_copy_only(Path::new("favicon.ico")));
        assert!(FileManager::is_copy_only(Path::new("hero.webp")));

        assert!(!FileManager::is_jpeg(Path::new("logo.png")));
        assert!(!FileManager::is_known_image(Path::new("notes.txt")));
        assert!(!FileManager::is_known_image(Path::new("noextension")));
    }

    #[test]
    fn test_backup_candidates_exclude_ico_and_webp() {
        assert!(FileManager::is_backup_candidate(Path::new("a.jpg")));
        assert!(FileManager::is_backup_candidate(Path::new("a.svg")));
        assert!(FileManager::is_backup_candidate(Path::new("a.gif")));
        assert!(!FileManager::is_backup_candidate(Path::new("a.ico")));
        assert!(!FileManager::is_backup_candidate(Path::new("a.webp")));
    }

    #[test]
    fn test_scan_images_filters_and_stays_flat() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "a.jpg");
        touch(temp_dir.path(), "b.PNG");
        touch(temp_dir.path(), "c.svg");
        touch(temp_dir.path(), "d.txt");
        std::fs::create_dir(temp_dir.path().join("nested")).unwrap();
        touch(&temp_dir.path().join("nested"), "e.jpg");

        let files = FileManager::scan_images(temp_dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["a.jpg", "b.PNG", "c.svg"]);
    }

    #[test]
    fn test_scan_images_missing_dir_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");
        assert!(FileManager::scan_images(&missing).is_err());
    }

    #[tokio::test]
    async fn test_ensure_dir_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("deep/nested/dir");

        FileManager::ensure_dir(&target).await.unwrap();
        assert!(target.is_dir());

        // Second call is a no-op
        FileManager::ensure_dir(&target).await.unwrap();
        assert!(target.is_dir());
    }

    #[tokio::test]
    async fn test_file_size_kb_rounding() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.bin");
        let mut file = File::create(&path).unwrap();
        file.write_all(&vec![0u8; 1536]).unwrap();

        assert_eq!(FileManager::file_size_kb(&path).await, 1.5);
        assert_eq!(FileManager::file_size(&path).await.unwrap(), 1536);
    }

    #[tokio::test]
    async fn test_file_size_kb_unreadable_is_zero() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(
            FileManager::file_size_kb(&temp_dir.path().join("missing.jpg")).await,
            0.0
        );
    }

    #[test]
    fn test_format_size() {
        assert_eq!(FileManager::format_size(512), "512 B");
        assert_eq!(FileManager::format_size(2048), "2.00 KB");
        assert_eq!(FileManager::format_size(5 * 1024 * 1024), "5.00 MB");
    }
}
