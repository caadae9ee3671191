mod config;
mod errors;
mod extract;
mod loader;
mod merge;
mod models;
mod pipeline;
mod provider;
mod repair;
mod segment;
mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::pipeline::Pipeline;
use crate::provider::select_provider;

const SUPPORTED_EXTENSIONS: [&str; 4] = ["pdf", "docx", "doc", "txt"];

/// Batch CV extraction: structure every supported document in the input
/// into one JSON result per file.
#[derive(Debug, Parser)]
#[command(name = "extractor", version)]
struct Cli {
    /// A CV file, or a directory containing CV files (pdf, docx, txt)
    input: PathBuf,

    /// Directory for output JSON files
    #[arg(long, default_value = "outputs")]
    output_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV extractor v{}", env!("CARGO_PKG_VERSION"));

    // One-time provider selection, read-only for the process lifetime
    let provider = select_provider(&config).await;
    info!("Active structuring provider: {}", provider.name());
    let pipeline = Pipeline::new(provider, config);

    let files = collect_input_files(&cli.input)?;
    if files.is_empty() {
        info!("No supported files found in {}", cli.input.display());
        return Ok(());
    }
    info!("Found {} file(s)", files.len());

    std::fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("Cannot create output directory {}", cli.output_dir.display()))?;

    let total = files.len();
    for (i, path) in files.iter().enumerate() {
        info!("[{}/{}] Processing {}", i + 1, total, path.display());
        match pipeline.process_file(path).await {
            Ok(result) => {
                let out_path = output_path(&cli.output_dir, path);
                let json = serde_json::to_string_pretty(&result)?;
                std::fs::write(&out_path, json)
                    .with_context(|| format!("Cannot write {}", out_path.display()))?;
                info!(
                    "Saved {} (provenance: {})",
                    out_path.display(),
                    result.provenance
                );
            }
            Err(e) => {
                error!("Skipping {}: {e}", path.display());
            }
        }
    }

    info!("Extraction complete");
    Ok(())
}

/// A single file is taken as-is; a directory is scanned one level deep
/// for supported extensions, in sorted order for reproducible runs.
fn collect_input_files(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(input)
        .with_context(|| format!("Cannot read directory {}", input.display()))?
    {
        let path = entry?.path();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        if path.is_file() && SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn output_path(output_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    output_dir.join(format!("{stem}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_collect_skips_unsupported_extensions() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.pdf", "b.txt", "c.odt", "d.docx"] {
            let mut f = std::fs::File::create(dir.path().join(name)).unwrap();
            writeln!(f, "x").unwrap();
        }
        let files = collect_input_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.pdf", "b.txt", "d.docx"]);
    }

    #[test]
    fn test_single_file_input_is_passed_through() {
        let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        let files = collect_input_files(file.path()).unwrap();
        assert_eq!(files, vec![file.path().to_path_buf()]);
    }

    #[test]
    fn test_output_path_uses_input_stem() {
        let out = output_path(Path::new("outputs"), Path::new("cvs/jane_doe.pdf"));
        assert_eq!(out, Path::new("outputs/jane_doe.json"));
    }
}
