//! # Report Module
//!
//! Questo modulo calcola e stampa il report di risparmio dimensioni.
//!
//! ## Responsabilità:
//! - Risolve le dimensioni sorgente/destinazione di ogni risultato
//! - Calcola risparmio per-file (KB e percentuale arrotondata)
//! - Accumula i totali complessivi del run
//!
//! ## Degradazione:
//! Le dimensioni vengono risolte al momento del report; un file illeggibile
//! vale 0 e viene escluso dai totali senza abortire il report.

use crate::file_manager::FileManager;
use std::path::PathBuf;
use tracing::info;

/// A single source → destination pair produced by one of the format jobs
#[derive(Debug, Clone)]
pub struct OptimizedFile {
    /// Original file in the input directory
    pub source_path: PathBuf,
    /// Written file in the output directory
    pub dest_path: PathBuf,
}

/// Per-file savings line of the final report
#[derive(Debug, Clone)]
pub struct ReportEntry {
    pub file_name: String,
    pub original_kb: f64,
    pub optimized_kb: f64,
    pub savings_kb: f64,
    pub savings_percent: i64,
}

/// Aggregated before/after sizes for a whole run
#[derive(Debug, Default)]
pub struct OptimizationReport {
    pub entries: Vec<ReportEntry>,
    pub total_original_kb: f64,
    pub total_optimized_kb: f64,
}

impl OptimizationReport {
    /// Build the report by resolving sizes for every optimized file.
    ///
    /// Files whose source or destination size cannot be read (or is zero) are
    /// skipped from the totals.
    pub async fn build(files: &[OptimizedFile]) -> Self {
        let mut report = Self::default();

        for file in files {
            let original_kb = FileManager::file_size_kb(&file.source_path).await;
            let optimized_kb = FileManager::file_size_kb(&file.dest_path).await;

            if original_kb > 0.0 && optimized_kb > 0.0 {
                let file_name = file
                    .source_path
                    .file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_else(|| file.source_path.display().to_string());
                report.add_entry(file_name, original_kb, optimized_kb);
            }
        }

        report
    }

    fn add_entry(&mut self, file_name: String, original_kb: f64, optimized_kb: f64) {
        let savings_kb = original_kb - optimized_kb;
        let savings_percent = (savings_kb / original_kb * 100.0).round() as i64;

        self.entries.push(ReportEntry {
            file_name,
            original_kb,
            optimized_kb,
            savings_kb,
            savings_percent,
        });

        self.total_original_kb += original_kb;
        self.total_optimized_kb += optimized_kb;
    }

    /// Number of files that contributed to the totals
    pub fn file_count(&self) -> usize {
        self.entries.len()
    }

    pub fn total_savings_kb(&self) -> f64 {
        self.total_original_kb - self.total_optimized_kb
    }

    pub fn total_savings_percent(&self) -> i64 {
        if self.total_original_kb > 0.0 {
            (self.total_savings_kb() / self.total_original_kb * 100.0).round() as i64
        } else {
            0
        }
    }

    /// Print the per-file lines and the grand total
    pub fn emit(&self) {
        info!("📊 Optimization Report");
        info!("{}", "=".repeat(50));

        for entry in &self.entries {
            info!(
                "📁 {}: {}KB → {}KB ({}% saved)",
                entry.file_name, entry.original_kb, entry.optimized_kb, entry.savings_percent
            );
        }

        if self.entries.is_empty() {
            info!("ℹ️  No files processed or no size data available");
            return;
        }

        info!("{}", "=".repeat(50));
        info!(
            "📈 Total: {}KB → {}KB",
            self.total_original_kb, self.total_optimized_kb
        );
        info!(
            "💾 Total savings: {}KB ({}%)",
            self.total_savings_kb(),
            self.total_savings_percent()
        );
        info!("🗂️  Files processed: {}", self.file_count());
    }
}
