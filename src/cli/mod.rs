//! # CLI Module
//!
//! Command-line interface for the capture quality gate.
//!
//! ## Usage
//! ```bash
//! # Check a single capture
//! capture-qa check receipt.jpg
//!
//! # Check a whole directory of captures
//! capture-qa check ~/Captures
//!
//! # JSON output for scripting
//! capture-qa check ~/Captures --output json
//!
//! # Custom threshold table
//! capture-qa check receipt.jpg --config thresholds.json
//! ```
//!
//! Exits with code 1 when any capture fails the gate, so the binary can sit
//! in a batch or CI pipeline.

use capture_quality::core::provider::FsPixelBufferProvider;
use capture_quality::core::thresholds::format_bytes;
use capture_quality::core::{MetricStatus, QualityAssessor, QualityResult, ThresholdConfig};
use capture_quality::error::{ConfigError, Result};
use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Capture Quality - Gate low-quality captures before they reach OCR
#[derive(Parser, Debug)]
#[command(name = "capture-qa")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assess image files or directories of captures
    Check {
        /// Image files or directories to assess
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Threshold table override (JSON file)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Maximum long edge for analysis (0 = analyze full size)
        #[arg(long, default_value = "512")]
        max_edge: u32,

        /// Include hidden files
        #[arg(long)]
        include_hidden: bool,

        /// Verbose output (per-metric breakdown)
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output (failing paths only)
    Minimal,
}

/// One assessed capture
struct FileVerdict {
    path: PathBuf,
    result: QualityResult,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            paths,
            output,
            config,
            max_edge,
            include_hidden,
            verbose,
        } => run_check(paths, output, config, max_edge, include_hidden, verbose),
    }
}

fn run_check(
    paths: Vec<PathBuf>,
    output: OutputFormat,
    config_path: Option<PathBuf>,
    max_edge: u32,
    include_hidden: bool,
    verbose: bool,
) -> Result<()> {
    let term = Term::stderr();

    if matches!(output, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("Capture Quality").bold().cyan(),
            style("v0.1.0").dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    let config = load_config(config_path)?;
    let assessor = QualityAssessor::new(config);
    let provider =
        FsPixelBufferProvider::new().with_max_edge(if max_edge == 0 { None } else { Some(max_edge) });

    let captures = collect_captures(&paths, include_hidden);

    let progress = if matches!(output, OutputFormat::Pretty) && captures.len() > 1 {
        let pb = ProgressBar::new(captures.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    // Assess in parallel; every capture gets a verdict, even unreadable ones
    let mut verdicts: Vec<FileVerdict> = captures
        .par_iter()
        .map(|path| {
            let result = assessor.assess(&provider, path);
            if let Some(ref pb) = progress {
                pb.inc(1);
                if verbose {
                    pb.set_message(
                        path.file_name()
                            .unwrap_or_default()
                            .to_string_lossy()
                            .to_string(),
                    );
                }
            }
            FileVerdict {
                path: path.clone(),
                result,
            }
        })
        .collect();

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    // Parallel collection order is nondeterministic; keep output stable
    verdicts.sort_by(|a, b| a.path.cmp(&b.path));

    match output {
        OutputFormat::Pretty => print_pretty_results(&term, &verdicts, verbose),
        OutputFormat::Json => print_json_results(&verdicts),
        OutputFormat::Minimal => print_minimal_results(&verdicts),
    }

    if verdicts.iter().any(|v| !v.result.is_valid) {
        std::process::exit(1);
    }

    Ok(())
}

/// Load the threshold table, or the defaults when no override is given
fn load_config(path: Option<PathBuf>) -> Result<ThresholdConfig> {
    let Some(path) = path else {
        return Ok(ThresholdConfig::default());
    };

    let text = fs::read_to_string(&path).map_err(|e| ConfigError::ReadFailed {
        path: path.clone(),
        source: e,
    })?;

    let config = serde_json::from_str(&text).map_err(|e| ConfigError::ParseFailed {
        path,
        reason: e.to_string(),
    })?;

    Ok(config)
}

/// Expand files and directories into the list of captures to assess
fn collect_captures(paths: &[PathBuf], include_hidden: bool) -> Vec<PathBuf> {
    let extensions: HashSet<&str> = [
        "jpg", "jpeg", "png", "webp", "gif", "bmp", "tiff", "tif",
    ]
    .into_iter()
    .collect();

    let is_image = |path: &Path| {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| extensions.contains(e.to_lowercase().as_str()))
            .unwrap_or(false)
    };

    let is_hidden = |path: &Path| {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.starts_with('.'))
            .unwrap_or(false)
    };

    let mut captures = Vec::new();

    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
                let entry_path = entry.path();
                if entry_path.is_dir() {
                    continue;
                }
                if !include_hidden && is_hidden(entry_path) {
                    continue;
                }
                if is_image(entry_path) {
                    captures.push(entry_path.to_path_buf());
                }
            }
        } else {
            // Explicitly named files are assessed even with odd extensions;
            // an unreadable one still yields the fallback verdict
            captures.push(path.clone());
        }
    }

    captures
}

fn print_pretty_results(term: &Term, verdicts: &[FileVerdict], verbose: bool) {
    let passed = verdicts.iter().filter(|v| v.result.is_valid).count();
    let failed = verdicts.len() - passed;

    for verdict in verdicts {
        let result = &verdict.result;

        let marker = if result.is_valid {
            style("✓").green().bold().to_string()
        } else {
            style("✗").red().bold().to_string()
        };

        term.write_line(&format!(
            "{} {} {} {}",
            marker,
            style(format!("{:>3}", result.score)).cyan(),
            verdict.path.display(),
            style(&result.feedback).dim()
        ))
        .ok();

        for (issue, suggestion) in result.issues.iter().zip(result.suggestions.iter()) {
            term.write_line(&format!(
                "    {} {}",
                style("issue:").yellow(),
                issue
            ))
            .ok();
            term.write_line(&format!("    {} {}", style("fix:  ").dim(), suggestion))
                .ok();
        }

        if verbose {
            print_metric_breakdown(term, result);
        }
    }

    term.write_line("").ok();
    term.write_line(&format!(
        "  {} passed, {} failed",
        style(passed).green(),
        if failed > 0 {
            style(failed).red().to_string()
        } else {
            style(failed).dim().to_string()
        }
    ))
    .ok();
}

fn print_metric_breakdown(term: &Term, result: &QualityResult) {
    let details = &result.details;
    let mut rows = vec![
        ("brightness", &details.brightness),
        ("contrast", &details.contrast),
        ("sharpness", &details.sharpness),
        ("resolution", &details.resolution),
    ];
    if let Some(ref file_size) = details.file_size {
        rows.push(("file size", file_size));
    }

    for (name, classification) in rows {
        let status = match classification.status {
            MetricStatus::Good => style("good").green(),
            MetricStatus::Fair => style("fair").yellow(),
            MetricStatus::Poor => style("poor").red(),
        };
        let value = if name == "file size" {
            format_bytes(classification.raw_value as u64)
        } else {
            format!("{:.3}", classification.raw_value)
        };
        term.write_line(&format!(
            "    {:<10} {} ({})",
            style(name).dim(),
            status,
            value
        ))
        .ok();
    }
}

fn print_json_results(verdicts: &[FileVerdict]) {
    let output: Vec<_> = verdicts
        .iter()
        .map(|v| {
            serde_json::json!({
                "path": v.path,
                "result": v.result,
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

fn print_minimal_results(verdicts: &[FileVerdict]) {
    for verdict in verdicts {
        if !verdict.result.is_valid {
            println!("{}", verdict.path.display());
        }
    }
}
