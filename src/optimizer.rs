//! # Image Optimizer Main Orchestrator
//!
//! Orchestratore principale del processo di ottimizzazione.
//!
//! ## Responsabilità:
//! - Prepara la directory di output e il backup degli originali
//! - Avvia i cinque job indipendenti (JPEG, PNG, SVG, WebP, copy) in fan-out
//!   concorrente sullo stesso event loop
//! - Cattura i fallimenti per-famiglia al punto di join (fail-soft, non
//!   fail-fast): una famiglia rotta non cancella le sorelle
//! - Unisce tutti i risultati e produce il report finale
//!
//! ## Flusso di esecuzione:
//! 1. Valida la configurazione e crea la directory di output (fatale se fallisce)
//! 2. Backup degli originali se abilitato (input dir illeggibile = fatale)
//! 3. Fan-out dei cinque job con `futures::join!`
//! 4. Join di tutti i risultati, famiglie fallite sostituite con liste vuote
//! 5. Report di risparmio dimensioni

use crate::{
    backup,
    codec::ImageCodec,
    config::Config,
    file_manager::FileManager,
    progress::ProgressManager,
    report::{OptimizationReport, OptimizedFile},
};
use anyhow::Result;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Orchestrates one optimization run over the configured input directory
pub struct ImageOptimizer {
    config: Config,
    codec: ImageCodec,
}

impl ImageOptimizer {
    /// Create a new optimizer from a validated configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let codec = ImageCodec::new(config.clone());

        Ok(Self { config, codec })
    }

    /// Execute the optimization run and return the final report
    pub async fn run(&self) -> Result<OptimizationReport> {
        info!("🚀 Starting image optimization...");
        self.log_configuration();

        FileManager::ensure_dir(&self.config.output_dir).await?;

        if self.config.create_backup {
            backup::backup_originals(&self.config).await?;
        }

        ImageCodec::log_available_tools().await;

        info!("🔄 Processing images...");
        let progress = ProgressManager::new(5);
        progress.set_message("running format jobs");

        // The five jobs share the event loop; all are awaited before the
        // report phase and each failure is handled individually at the join.
        let (jpeg, png, svg, webp, other) = futures::join!(
            self.compress_jpeg_batch(&progress),
            self.compress_png_batch(&progress),
            self.optimize_svg_batch(&progress),
            self.derive_webp_batch(&progress),
            self.copy_other_images(&progress),
        );

        let webp = Self::soften("WebP", webp);
        let webp_count = webp.len();

        let mut all_files = Self::soften("JPEG", jpeg);
        all_files.extend(Self::soften("PNG", png));
        all_files.extend(Self::soften("SVG", svg));
        all_files.extend(webp);
        all_files.extend(other);

        progress.finish("format jobs complete");

        let report = OptimizationReport::build(&all_files).await;
        report.emit();

        info!("✅ Image optimization completed successfully!");
        info!(
            "📍 Optimized images saved to: {}",
            self.config.output_dir.display()
        );
        if self.config.create_backup {
            info!(
                "💾 Original images backed up to: {}",
                self.config.backup_dir.display()
            );
        }
        if self.config.create_webp && webp_count > 0 {
            info!("🚀 {} WebP versions created for modern browsers", webp_count);
        }

        Ok(report)
    }

    fn log_configuration(&self) {
        info!("Input directory: {}", self.config.input_dir.display());
        info!("Output directory: {}", self.config.output_dir.display());

        if self.config.create_backup {
            info!("Backup directory: {}", self.config.backup_dir.display());
        } else {
            info!("Backup: disabled");
        }

        if self.config.create_webp {
            info!(
                "WebP derivation enabled (quality: {})",
                self.config.quality.webp
            );
        } else {
            info!("WebP derivation: disabled");
        }

        info!(
            "Quality: JPEG {} | PNG {} | WebP {}",
            self.config.quality.jpeg, self.config.quality.png, self.config.quality.webp
        );
    }

    /// Replace a failed format family with an empty result set at the join
    fn soften(format: &str, result: Result<Vec<OptimizedFile>>) -> Vec<OptimizedFile> {
        match result {
            Ok(files) => files,
            Err(error) => {
                warn!("⚠️  {} optimization warning: {:#}", format, error);
                Vec::new()
            }
        }
    }

    async fn compress_jpeg_batch(&self, progress: &ProgressManager) -> Result<Vec<OptimizedFile>> {
        info!("🖼️  Optimizing JPEG images...");

        let files = self.scan_matching(FileManager::is_jpeg)?;
        let mut results = Vec::new();
        for source in files {
            let dest = self.output_path_for(&source)?;
            self.codec.compress_jpeg(&source, &dest).await?;
            results.push(OptimizedFile {
                source_path: source,
                dest_path: dest,
            });
        }

        progress.update("JPEG images done");
        Ok(results)
    }

    async fn compress_png_batch(&self, progress: &ProgressManager) -> Result<Vec<OptimizedFile>> {
        info!("🎨 Optimizing PNG images...");

        let files = self.scan_matching(FileManager::is_png)?;
        let mut results = Vec::new();
        for source in files {
            let dest = self.output_path_for(&source)?;
            self.codec.compress_png(&source, &dest).await?;
            results.push(OptimizedFile {
                source_path: source,
                dest_path: dest,
            });
        }

        progress.update("PNG images done");
        Ok(results)
    }

    async fn optimize_svg_batch(&self, progress: &ProgressManager) -> Result<Vec<OptimizedFile>> {
        info!("🎯 Optimizing SVG images...");

        let files = self.scan_matching(FileManager::is_svg)?;
        let mut results = Vec::new();
        for source in files {
            let dest = self.output_path_for(&source)?;
            self.codec.optimize_svg(&source, &dest).await?;
            results.push(OptimizedFile {
                source_path: source,
                dest_path: dest,
            });
        }

        progress.update("SVG images done");
        Ok(results)
    }

    /// Derive WebP versions of every JPEG/PNG input, when enabled
    async fn derive_webp_batch(&self, progress: &ProgressManager) -> Result<Vec<OptimizedFile>> {
        if !self.config.create_webp {
            debug!("WebP derivation disabled");
            progress.update("WebP derivation skipped");
            return Ok(Vec::new());
        }

        info!("🚀 Creating WebP versions...");

        let files = self.scan_matching(|path| {
            FileManager::is_jpeg(path) || FileManager::is_png(path)
        })?;
        let mut results = Vec::new();
        for source in files {
            let dest = self.webp_path_for(&source)?;
            self.codec.encode_webp(&source, &dest).await?;
            results.push(OptimizedFile {
                source_path: source,
                dest_path: dest,
            });
        }

        progress.update("WebP versions done");
        Ok(results)
    }

    /// Copy the formats no codec covers; degrades to an empty result on error
    async fn copy_other_images(&self, progress: &ProgressManager) -> Vec<OptimizedFile> {
        info!("📄 Copying other image formats...");

        let copied = match self.copy_other_images_inner().await {
            Ok(copied) => copied,
            Err(error) => {
                warn!("⚠️  No other image formats to copy: {:#}", error);
                Vec::new()
            }
        };

        progress.update("other formats done");
        copied
    }

    async fn copy_other_images_inner(&self) -> Result<Vec<OptimizedFile>> {
        let files = self.scan_matching(FileManager::is_copy_only)?;

        let mut copied = Vec::new();
        for source in files {
            let dest = self.output_path_for(&source)?;
            fs::copy(&source, &dest).await?;
            info!(
                "📋 Copied: {}",
                source.file_name().unwrap_or_default().to_string_lossy()
            );
            copied.push(OptimizedFile {
                source_path: source,
                dest_path: dest,
            });
        }

        Ok(copied)
    }

    fn scan_matching(&self, matches: fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
        Ok(FileManager::scan_images(&self.config.input_dir)?
            .into_iter()
            .filter(|path| matches(path))
            .collect())
    }

    fn output_path_for(&self, source: &Path) -> Result<PathBuf> {
        let name = source
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("Invalid input path: {}", source.display()))?;
        Ok(self.config.output_dir.join(name))
    }

    fn webp_path_for(&self, source: &Path) -> Result<PathBuf> {
        let stem = source
            .file_stem()
            .ok_or_else(|| anyhow::anyhow!("Invalid input path: {}", source.display()))?;
        Ok(self
            .config
            .output_dir
            .join(format!("{}.webp", stem.to_string_lossy())))
    }
}
