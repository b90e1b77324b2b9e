//! Watch command - continuous folder monitoring.

use clap::Args;
use console::style;
use tracing::info;

use nfsx_core::FolderWatcher;

use super::{build_pipeline, load_config};

/// Arguments for the watch command.
#[derive(Args)]
pub struct WatchArgs {
    /// Skip the initial pass over files already in the input folder
    #[arg(long)]
    no_initial_scan: bool,
}

pub async fn run(args: WatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let pipeline = build_pipeline(&config)?;

    if !args.no_initial_scan {
        pipeline.process_existing()?;
    }

    let mut watcher = FolderWatcher::start(&pipeline.layout().input, &config.watch)?;

    println!(
        "{} Monitoring {} (Ctrl-C to stop)",
        style("ℹ").blue(),
        pipeline.layout().input.display()
    );

    // One file at a time: archive moves and output writes are not safe to
    // interleave on the same filename.
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown requested");
                break;
            }
            arrival = watcher.next() => {
                match arrival {
                    Some(path) => {
                        pipeline.process_file(&path);
                    }
                    None => break,
                }
            }
        }
    }

    println!("{} Monitoring stopped", style("✓").green());
    Ok(())
}
