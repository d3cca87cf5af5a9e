//! # Configuration Management Module
//!
//! Questo modulo gestisce tutta la configurazione dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con tutti i parametri di ottimizzazione
//! - Fornisce validazione robusta dei parametri di input
//! - Supporta caricamento/salvataggio configurazione da/verso file JSON
//! - Fornisce valori di default sensati per tutti i parametri
//!
//! ## Parametri di configurazione:
//! - `input_dir`: Directory delle immagini sorgente (default: `images`)
//! - `output_dir`: Directory delle immagini ottimizzate (default: `dist/images`)
//! - `backup_dir`: Directory dei backup degli originali (default: `images-backup`)
//! - `quality`: Qualità JPEG/PNG/WebP (1-100, default: 85/90/90)
//! - `create_webp`: Genera varianti WebP da JPEG/PNG (default: true)
//! - `create_backup`: Crea backup degli originali prima del run (default: true)
//!
//! ## Immutabilità:
//! La configurazione viene costruita una sola volta da default + file JSON +
//! flag CLI, poi passata per riferimento a ogni operazione. Nessuna mutazione
//! durante il run.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Per-format quality settings (1-100 scales)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Quality {
    /// JPEG quality (1-100)
    pub jpeg: u8,
    /// PNG quality upper bound (1-100)
    pub png: u8,
    /// WebP quality (1-100)
    pub webp: u8,
}

impl Default for Quality {
    fn default() -> Self {
        Self {
            jpeg: 85,
            png: 90,
            webp: 90,
        }
    }
}

/// Configuration for a single optimization run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory containing the source images
    pub input_dir: PathBuf,
    /// Directory receiving the optimized images
    pub output_dir: PathBuf,
    /// Directory receiving backups of the originals
    pub backup_dir: PathBuf,
    /// Per-format quality settings
    pub quality: Quality,
    /// Derive WebP versions of JPEG/PNG images
    pub create_webp: bool,
    /// Back up original images before processing
    pub create_backup: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("images"),
            output_dir: PathBuf::from("dist/images"),
            backup_dir: PathBuf::from("images-backup"),
            quality: Quality::default(),
            create_webp: true,
            create_backup: true,
        }
    }
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("JPEG", self.quality.jpeg),
            ("PNG", self.quality.png),
            ("WebP", self.quality.webp),
        ] {
            if value == 0 || value > 100 {
                return Err(anyhow::anyhow!("{} quality must be between 1 and 100", name));
            }
        }

        if self.input_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("Input directory must not be empty"));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("Output directory must not be empty"));
        }
        if self.backup_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("Backup directory must not be empty"));
        }

        Ok(())
    }

    /// Apply a uniform quality override to all three formats.
    ///
    /// Out-of-range values are silently ignored and the per-format defaults
    /// survive, matching the lenient flag handling the site tooling always had.
    pub fn with_uniform_quality(mut self, quality: Option<u8>) -> Self {
        if let Some(value) = quality {
            if (1..=100).contains(&value) {
                self.quality = Quality {
                    jpeg: value,
                    png: value,
                    webp: value,
                };
            } else {
                debug!("Ignoring out-of-range quality value: {}", value);
            }
        }
        self
    }

    /// Load configuration from a JSON file, falling back to defaults when missing
    pub async fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub async fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}
