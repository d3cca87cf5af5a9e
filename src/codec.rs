//! # Codec Invocation Module
//!
//! Questo modulo gestisce la compressione di tutti i formati immagine
//! supportati utilizzando esclusivamente codec esterni.
//!
//! ## Architettura
//!
//! Nessuna elaborazione in-memory: ogni famiglia di formati è servita da una
//! catena di tool esterni specializzati, provati in ordine di priorità. Un
//! tool mancante fa scattare il fallback al successivo; una famiglia senza
//! alcun tool disponibile produce un errore a livello di famiglia (catturato
//! fail-soft al punto di join del fan-out).
//!
//! ## Formati e catene di tool
//!
//! | Famiglia | Tool (priorità decrescente)      |
//! |----------|----------------------------------|
//! | JPEG     | mozjpeg, jpegoptim, jpegtran     |
//! | PNG      | pngquant, oxipng, optipng        |
//! | SVG      | svgo, svgcleaner                 |
//! | WebP     | cwebp (derivazione da JPEG/PNG)  |
//!
//! ## Configurazione qualità
//!
//! - **JPEG**: `quality.jpeg` usato da mozjpeg (`-quality`) e jpegoptim
//!   (`--max=`); jpegtran è solo lossless
//! - **PNG**: `quality.png` come limite superiore del range pngquant
//!   (`--quality=65-N`); oxipng/optipng sono lossless
//! - **WebP**: `quality.webp` usato da cwebp (`-q`), metodo di encoding 6
//!
//! ## Concorrenza
//!
//! Tutte le invocazioni usano `tokio::process::Command` e `tokio::fs`, quindi
//! restano non-bloccanti sull'event loop condiviso dal fan-out.

use crate::args;
use crate::config::{Config, Quality};
use crate::error::OptimizeError;
use crate::platform::PlatformCommands;
use crate::utils::to_string_vec;
use anyhow::Result;
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// How a codec tool delivers its result
#[derive(Debug, Clone, Copy, PartialEq)]
enum CodecOutput {
    /// The tool writes the destination file itself
    File,
    /// The tool writes to stdout; the output file is written from the capture
    Stdout,
}

type ArgsBuilder = fn(&str, &str, &Quality) -> Vec<String>;

fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid path: {:?}", path))
}

/// Runs external compression tools for each image family.
///
/// Every method takes a single input file and the destination path, tries the
/// family's tool chain in order of preference, and returns an error only when
/// every available tool failed or none is installed.
pub struct ImageCodec {
    config: Config,
}

impl ImageCodec {
    /// Create a codec runner bound to the run's quality settings
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Compress a JPEG image into the destination path.
    ///
    /// **Tool priority:**
    /// 1. **mozjpeg**: best compression, quality control, progressive encoding
    /// 2. **jpegoptim**: quality control, outputs on stdout
    /// 3. **jpegtran**: lossless optimization only
    pub async fn compress_jpeg(&self, input: &Path, output: &Path) -> Result<()> {
        let tools: &[(&'static str, CodecOutput, ArgsBuilder)] = &[
            ("mozjpeg", CodecOutput::File, |input, output, quality| {
                let q = quality.jpeg.to_string();
                to_string_vec([
                    "-quality",
                    q.as_str(),
                    "-optimize",
                    "-progressive",
                    "-outfile",
                    output,
                    input,
                ])
            }),
            ("jpegoptim", CodecOutput::Stdout, |input, _output, quality| {
                let max = format!("--max={}", quality.jpeg);
                to_string_vec([max.as_str(), "--stdout", input])
            }),
            ("jpegtran", CodecOutput::File, |input, output, _quality| {
                to_string_vec(["-optimize", "-progressive", "-outfile", output, input])
            }),
        ];

        self.try_codec_chain(input, output, tools, "JPEG").await
    }

    /// Compress a PNG image into the destination path.
    ///
    /// **Tool priority:**
    /// 1. **pngquant**: quality-aware lossy quantization, strips metadata
    /// 2. **oxipng**: fast lossless compression
    /// 3. **optipng**: aggressive lossless compression
    pub async fn compress_png(&self, input: &Path, output: &Path) -> Result<()> {
        let tools: &[(&'static str, CodecOutput, ArgsBuilder)] = &[
            ("pngquant", CodecOutput::File, |input, output, quality| {
                let range = format!("65-{}", quality.png);
                to_string_vec([
                    "--quality",
                    range.as_str(),
                    "--strip",
                    "--force",
                    "--output",
                    output,
                    input,
                ])
            }),
            ("oxipng", CodecOutput::File, |input, output, _quality| {
                to_string_vec(["-o", "6", "--strip", "all", "--out", output, input])
            }),
            ("optipng", CodecOutput::File, |input, output, _quality| {
                to_string_vec(["-o7", "-strip", "all", "-out", output, input])
            }),
        ];

        self.try_codec_chain(input, output, tools, "PNG").await
    }

    /// Optimize an SVG into the destination path.
    ///
    /// svgo keeps the viewBox and reduces numeric precision; svgcleaner is the
    /// fallback when svgo is not installed.
    pub async fn optimize_svg(&self, input: &Path, output: &Path) -> Result<()> {
        let tools: &[(&'static str, CodecOutput, ArgsBuilder)] = &[
            ("svgo", CodecOutput::File, |input, output, _quality| {
                args!["--input", input, "--output", output, "--precision", "2"]
            }),
            ("svgcleaner", CodecOutput::File, |input, output, _quality| {
                args![input, output]
            }),
        ];

        self.try_codec_chain(input, output, tools, "SVG").await
    }

    /// Encode a JPEG/PNG source into a WebP destination.
    ///
    /// Uses cwebp with the configured WebP quality and the slowest, most
    /// effective compression method (`-m 6`).
    pub async fn encode_webp(&self, input: &Path, output: &Path) -> Result<()> {
        let tools: &[(&'static str, CodecOutput, ArgsBuilder)] = &[
            ("cwebp", CodecOutput::File, |input, output, quality| {
                let q = quality.webp.to_string();
                to_string_vec(["-q", q.as_str(), "-m", "6", "-mt", input, "-o", output])
            }),
        ];

        self.try_codec_chain(input, output, tools, "WebP").await
    }

    /// Log which codec categories are available, warning about missing ones.
    ///
    /// A missing category does not abort the run: the corresponding format
    /// family simply fails soft when its job executes.
    pub async fn log_available_tools() {
        let platform = PlatformCommands::instance();
        let categories: &[(&str, &[&str])] = &[
            ("JPEG compression", &["mozjpeg", "jpegoptim", "jpegtran"]),
            ("PNG compression", &["pngquant", "oxipng", "optipng"]),
            ("SVG optimization", &["svgo", "svgcleaner"]),
            ("WebP encoding", &["cwebp"]),
        ];

        info!("🔧 Checking available codec tools:");
        for (category, tools) in categories {
            let mut found = None;
            for tool in tools.iter() {
                if platform.is_command_available(tool).await {
                    found = Some(*tool);
                    break;
                }
            }

            match found {
                Some(tool) => info!("  ✅ {} - using {}", category, tool),
                None => warn!(
                    "  ❌ {} - no tool available (install one of: {})",
                    category,
                    tools.join(", ")
                ),
            }
        }
    }

    /// Try a family's tools in order of preference until one succeeds.
    ///
    /// Returns `OptimizeError::MissingTools` when no tool in the chain is
    /// installed, `OptimizeError::Codec` when every installed tool failed.
    async fn try_codec_chain(
        &self,
        input: &Path,
        output: &Path,
        tools: &[(&'static str, CodecOutput, ArgsBuilder)],
        format: &'static str,
    ) -> Result<()> {
        let input_str = path_str(input)?;
        let output_str = path_str(output)?;
        let platform = PlatformCommands::instance();
        let mut any_tool_available = false;

        for (tool_name, output_mode, args_builder) in tools {
            if !platform.is_command_available(tool_name).await {
                continue;
            }
            any_tool_available = true;

            debug!("Attempting {} compression with {}", format, tool_name);
            let args = args_builder(input_str, output_str, &self.config.quality);
            debug!("Command arguments: {:?}", args);

            let command_name = platform.get_command(tool_name);
            let succeeded = match output_mode {
                CodecOutput::File => Command::new(command_name)
                    .args(&args)
                    .status()
                    .await?
                    .success(),
                CodecOutput::Stdout => {
                    let result = Command::new(command_name).args(&args).output().await?;
                    if result.status.success() {
                        tokio::fs::write(output, result.stdout).await?;
                        true
                    } else {
                        false
                    }
                }
            };

            if succeeded {
                debug!("{} compressed successfully with {}", format, tool_name);
                return Ok(());
            }
            warn!(
                "{} failed on {}, trying next {} tool",
                tool_name,
                input.display(),
                format
            );
        }

        if any_tool_available {
            Err(OptimizeError::Codec {
                format,
                reason: format!("all tools failed for {}", input.display()),
            }
            .into())
        } else {
            let candidates = tools
                .iter()
                .map(|(name, _, _)| *name)
                .collect::<Vec<_>>()
                .join(", ");
            Err(OptimizeError::MissingTools { format, candidates }.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_chain_with_no_installed_tool_reports_missing_tools() {
        let codec = ImageCodec::new(Config::default());
        let tools: &[(&'static str, CodecOutput, ArgsBuilder)] = &[
            ("surely-not-an-installed-codec-a", CodecOutput::File, |_, _, _| Vec::new()),
            ("surely-not-an-installed-codec-b", CodecOutput::Stdout, |_, _, _| Vec::new()),
        ];

        let err = codec
            .try_codec_chain(Path::new("in.jpg"), Path::new("out.jpg"), tools, "JPEG")
            .await
            .unwrap_err();

        match err.downcast::<OptimizeError>().unwrap() {
            OptimizeError::MissingTools { format, candidates } => {
                assert_eq!(format, "JPEG");
                assert!(candidates.contains("surely-not-an-installed-codec-a"));
                assert!(candidates.contains("surely-not-an-installed-codec-b"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
