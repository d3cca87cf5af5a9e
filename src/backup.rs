//! # Backup Module
//!
//! Questo modulo gestisce il backup degli originali prima dell'ottimizzazione.
//!
//! ## Responsabilità:
//! - Copia ogni immagine sorgente riconosciuta nella directory di backup
//! - Semantica "first backup wins": un backup esistente non viene mai sovrascritto
//! - La directory di input illeggibile è un errore fatale per il run (propagato)
//!
//! Il set di backup copre i formati sorgente del sito (JPG, JPEG, PNG, SVG,
//! GIF); ICO e WebP preesistenti vengono copiati in output ma mai backuppati.

use crate::config::Config;
use crate::file_manager::FileManager;
use anyhow::Result;
use tokio::fs;
use tracing::info;

/// Copy every recognized original into the backup directory.
///
/// Files already present in the backup directory are left untouched, so
/// re-running the tool after editing a source image never loses the first
/// backed-up version. Returns the number of files copied this run.
pub async fn backup_originals(config: &Config) -> Result<usize> {
    info!("💾 Creating backup of original images...");

    FileManager::ensure_dir(&config.backup_dir).await?;

    // An unreadable input directory aborts the whole run
    let files = FileManager::scan_images(&config.input_dir)?;

    let mut copied = 0;
    for source in files {
        if !FileManager::is_backup_candidate(&source) {
            continue;
        }

        let name = match source.file_name() {
            Some(name) => name.to_owned(),
            None => continue,
        };
        let backup_path = config.backup_dir.join(&name);

        if fs::metadata(&backup_path).await.is_ok() {
            info!("⏭️  Backup already exists: {}", name.to_string_lossy());
        } else {
            fs::copy(&source, &backup_path).await?;
            copied += 1;
            info!("📋 Backed up: {}", name.to_string_lossy());
        }
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn test_config(root: &Path) -> Config {
        Config {
            input_dir: root.join("images"),
            output_dir: root.join("dist/images"),
            backup_dir: root.join("images-backup"),
            ..Default::default()
        }
    }

    async fn write(path: &PathBuf, content: &str) {
        fs::write(path, content).await.unwrap();
    }

    #[tokio::test]
    async fn test_backup_copies_recognized_originals() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(temp_dir.path());
        fs::create_dir_all(&config.input_dir).await.unwrap();

        write(&config.input_dir.join("a.jpg"), "jpeg data").await;
        write(&config.input_dir.join("b.svg"), "<svg/>").await;
        write(&config.input_dir.join("c.ico"), "icon").await;
        write(&config.input_dir.join("notes.txt"), "not an image").await;

        let copied = backup_originals(&config).await.unwrap();
        assert_eq!(copied, 2);
        assert!(config.backup_dir.join("a.jpg").exists());
        assert!(config.backup_dir.join("b.svg").exists());
        // copy-only and unknown formats stay out of the backup set
        assert!(!config.backup_dir.join("c.ico").exists());
        assert!(!config.backup_dir.join("notes.txt").exists());
    }

    #[tokio::test]
    async fn test_backup_never_overwrites_existing_backup() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(temp_dir.path());
        fs::create_dir_all(&config.input_dir).await.unwrap();

        let source = config.input_dir.join("a.jpg");
        write(&source, "original").await;

        assert_eq!(backup_originals(&config).await.unwrap(), 1);

        // Edit the source, then run the backup again
        write(&source, "edited").await;
        assert_eq!(backup_originals(&config).await.unwrap(), 0);

        let backed_up = fs::read_to_string(config.backup_dir.join("a.jpg"))
            .await
            .unwrap();
        assert_eq!(backed_up, "original");
    }

    #[tokio::test]
    async fn test_backup_unreadable_input_dir_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(temp_dir.path());
        // input_dir is never created

        assert!(backup_originals(&config).await.is_err());
    }
}
