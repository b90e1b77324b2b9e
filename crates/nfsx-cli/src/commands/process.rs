//! Process command - one-shot scan of the input folder.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use nfsx_core::pdf::is_supported_document;
use nfsx_core::ProcessingOutcome;

use super::{build_pipeline, load_config};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Suppress the progress bar
    #[arg(long)]
    no_progress: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let pipeline = build_pipeline(&config)?;

    // Directory-listing order, same as the pipeline's own scan.
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(&pipeline.layout().input)? {
        let path = entry?.path();
        if path.is_file() && is_supported_document(&path) {
            files.push(path);
        }
    }

    if files.is_empty() {
        println!(
            "{} No document files found in input folder",
            style("ℹ").blue()
        );
        return Ok(());
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let pb = if args.no_progress {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(files.len() as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut outcomes = Vec::with_capacity(files.len());
    for path in &files {
        let outcome = pipeline.process_file(path);
        debug!("{}: {:?}", path.display(), outcome);
        outcomes.push((path.clone(), outcome));
        pb.inc(1);
    }
    pb.finish_with_message("Complete");

    let successful = outcomes.iter().filter(|(_, o)| o.is_success()).count();
    let failed: Vec<_> = outcomes
        .iter()
        .filter_map(|(path, o)| match o {
            ProcessingOutcome::Failure { reason } => Some((path, reason)),
            ProcessingOutcome::Success { .. } => None,
        })
        .collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        outcomes.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files (moved to quarantine):").red());
        for (path, reason) in failed {
            println!("  - {}: {}", path.display(), reason);
        }
    }

    Ok(())
}
