//! # Site Image Optimizer - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Costruzione della configurazione immutabile (default + file + flag)
//! - Avvio dell'optimizer e gestione dell'exit code
//!
//! ## Flusso di esecuzione:
//! 1. Parsa i flag CLI (--no-backup, --no-webp, --quality, --config, --verbose)
//! 2. Configura il logging (INFO o DEBUG a seconda del flag verbose)
//! 3. Costruisce la configurazione una sola volta, poi la passa all'optimizer
//! 4. Un errore fatale viene loggato e il processo esce con codice 1
//!
//! ## Esempio di utilizzo:
//! ```bash
//! optimize-images --no-backup --quality 90
//! optimize-images --no-webp --verbose
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::error;

use site_image_optimizer::{Config, ImageOptimizer};

#[derive(Parser)]
#[command(name = "optimize-images")]
#[command(about = "Optimize the website's images through external codecs")]
struct Args {
    /// Skip creating a backup of the original images
    #[arg(long)]
    no_backup: bool,

    /// Skip creating WebP versions of JPEG/PNG images
    #[arg(long)]
    no_webp: bool,

    /// Set JPEG, PNG and WebP quality uniformly (1-100, out-of-range values are ignored)
    #[arg(short, long)]
    quality: Option<u8>,

    /// Load the configuration record from a JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize logging
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(args).await {
        error!("❌ Image optimization failed: {:?}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    // Build the immutable configuration once: defaults, then the optional
    // JSON record, then the CLI overrides.
    let mut config = match args.config {
        Some(ref path) => Config::from_file(path).await?,
        None => Config::default(),
    };

    if args.no_backup {
        config.create_backup = false;
    }
    if args.no_webp {
        config.create_webp = false;
    }
    let config = config.with_uniform_quality(args.quality);

    let optimizer = ImageOptimizer::new(config)?;
    optimizer.run().await?;

    Ok(())
}
