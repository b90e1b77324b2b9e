//! CLI subcommands.

pub mod config;
pub mod process;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Local};

use nfsx_core::pipeline::StatusSink;
use nfsx_core::{ArchiveLayout, ConvertConfig, ConvertPipeline};

/// Load the pipeline configuration: explicit `--config` file, else
/// `nfsx.json` in the working directory if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ConvertConfig> {
    if let Some(path) = config_path {
        return Ok(ConvertConfig::from_file(Path::new(path))?);
    }
    let default = default_config_path();
    if default.exists() {
        return Ok(ConvertConfig::from_file(&default)?);
    }
    Ok(ConvertConfig::default())
}

/// Implicit config file location.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("nfsx.json")
}

/// Build the pipeline for a config: resolve the folder layout against the
/// working directory, create the four directories, attach the console sink.
pub fn build_pipeline(config: &ConvertConfig) -> anyhow::Result<ConvertPipeline> {
    let base = std::env::current_dir()?;
    let layout = ArchiveLayout::from_config(config, &base);
    layout.ensure_layout()?;
    Ok(ConvertPipeline::new(layout).with_sink(Arc::new(ConsoleSink)))
}

/// Status sink printing `YYYY-MM-DD HH:MM:SS - message` lines to stdout.
pub struct ConsoleSink;

impl StatusSink for ConsoleSink {
    fn emit(&self, at: DateTime<Local>, message: &str) {
        println!("{} - {}", at.format("%Y-%m-%d %H:%M:%S"), message);
    }
}
