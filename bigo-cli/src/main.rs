//! Bigo CLI - structural complexity estimation for Python, C, C++, and Java

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output ordering
// - Identical input yields byte-for-byte identical output

use anyhow::Context;
use bigo_core::{
    analyze_path, render_json, render_summary_text, render_text, summarize, BigoConfig,
    ResolvedConfig,
};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bigo")]
#[command(about = "Structural asymptotic complexity estimation (Python, C, C++, Java)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a source file or directory
    Analyze {
        /// Path to source file or directory
        path: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Append a directory-level summary after the per-file results
        #[arg(long)]
        summary: bool,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Validate a configuration file
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without running analysis
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, PartialEq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            format,
            summary,
            config: config_path,
        } => {
            // Normalize path to absolute
            let normalized_path = if path.is_relative() {
                std::env::current_dir()?.join(&path)
            } else {
                path
            };

            if !normalized_path.exists() {
                anyhow::bail!("Path does not exist: {}", normalized_path.display());
            }

            let root = project_root(&normalized_path);
            let resolved = load_config(config_path.as_deref(), &root)?;

            let results = analyze_path(&normalized_path, Some(&resolved))?;

            match format {
                OutputFormat::Text => {
                    print!("{}", render_text(&results));
                    if summary {
                        println!();
                        print!("{}", render_summary_text(&summarize(&results)));
                    }
                }
                OutputFormat::Json => {
                    if summary {
                        let combined = serde_output(&results)?;
                        println!("{combined}");
                    } else {
                        println!("{}", render_json(&results));
                    }
                }
            }
        }
        Commands::Config {
            action: ConfigAction::Validate { path },
        } => {
            let root = std::env::current_dir()?;
            match BigoConfig::load(path.as_deref(), &root)? {
                Some(config) => {
                    config
                        .resolve(&root)
                        .context("Config loaded but patterns failed to compile")?;
                    println!("Config is valid");
                }
                None => println!("No config file found, defaults apply"),
            }
        }
    }

    Ok(())
}

/// Results plus summary as one JSON document
fn serde_output(results: &[bigo_core::AnalysisResult]) -> anyhow::Result<String> {
    let document = serde_json::json!({
        "files": results,
        "summary": summarize(results),
    });
    serde_json::to_string_pretty(&document).context("Failed to serialize results")
}

/// Config discovery root: the directory itself, or the file's parent
fn project_root(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.to_path_buf()
    } else {
        path.parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

fn load_config(explicit: Option<&Path>, root: &Path) -> anyhow::Result<ResolvedConfig> {
    match BigoConfig::load(explicit, root).context("failed to load configuration")? {
        Some(config) => config.resolve(root),
        None => ResolvedConfig::default_for(root),
    }
}
