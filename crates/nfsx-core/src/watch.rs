//! Watched-folder event source with arrival debouncing.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::config::WatchConfig;
use crate::error::Result;
use crate::pdf::is_supported_document;

/// Stream of debounced file-arrival paths for one input directory.
///
/// The OS watcher runs on its own thread; events cross into tokio through a
/// channel. On each create event for an eligible document the forwarder
/// waits the configured debounce before handing the path on, to avoid
/// racing a writer that has not yet closed the file. This is a heuristic,
/// not a guarantee: very large or slowly-written files may still be read
/// prematurely.
///
/// Dropping the watcher is a clean shutdown: the OS watch is released and no
/// new events are accepted; paths still queued in the channel are dropped
/// with it.
pub struct FolderWatcher {
    rx: mpsc::Receiver<PathBuf>,
    _watcher: RecommendedWatcher,
}

impl FolderWatcher {
    /// Bind a watcher to the input directory. Must be called inside a tokio
    /// runtime. Fails if the directory cannot be watched; this is fatal at
    /// startup, there is no retry loop.
    pub fn start(dir: &Path, config: &WatchConfig) -> Result<Self> {
        let (raw_tx, mut raw_rx) = mpsc::channel::<notify::Result<notify::Event>>(config.channel_capacity);
        let (out_tx, out_rx) = mpsc::channel::<PathBuf>(config.channel_capacity);
        let debounce = Duration::from_millis(config.debounce_ms);

        let mut watcher = notify::recommended_watcher(move |res| {
            if let Err(e) = raw_tx.blocking_send(res) {
                error!("Failed to send file event: {:?}", e);
            }
        })?;
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        info!("Watching input folder: {}", dir.display());

        tokio::spawn(async move {
            while let Some(res) = raw_rx.recv().await {
                match res {
                    Ok(event) => {
                        if !event.kind.is_create() {
                            continue;
                        }
                        for path in event.paths {
                            if !is_supported_document(&path) {
                                continue;
                            }
                            info!("New document detected: {}", path.display());
                            // Wait for the writer to finish before handing
                            // the path downstream.
                            tokio::time::sleep(debounce).await;
                            if out_tx.send(path).await.is_err() {
                                return;
                            }
                        }
                    }
                    Err(e) => warn!("Watch error: {:?}", e),
                }
            }
        });

        Ok(Self {
            rx: out_rx,
            _watcher: watcher,
        })
    }

    /// Next debounced arrival, or `None` once the source has shut down.
    pub async fn next(&mut self) -> Option<PathBuf> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tokio::time::timeout;

    fn fast_watch_config() -> WatchConfig {
        WatchConfig {
            debounce_ms: 10,
            channel_capacity: 16,
        }
    }

    #[tokio::test]
    async fn test_new_document_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut watcher = FolderWatcher::start(dir.path(), &fast_watch_config()).unwrap();

        let path = dir.path().join("nota.txt");
        fs::write(&path, "Número da Nota: 1\n").unwrap();

        let arrived = timeout(Duration::from_secs(5), watcher.next())
            .await
            .expect("no arrival event")
            .expect("watcher closed");
        assert_eq!(arrived.file_name(), path.file_name());
    }

    #[tokio::test]
    async fn test_ineligible_files_are_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let mut watcher = FolderWatcher::start(dir.path(), &fast_watch_config()).unwrap();

        fs::write(dir.path().join("ignore.xml"), "<x/>").unwrap();
        fs::write(dir.path().join("nota.txt"), "text").unwrap();

        // Only the eligible document comes through.
        let arrived = timeout(Duration::from_secs(5), watcher.next())
            .await
            .expect("no arrival event")
            .expect("watcher closed");
        assert_eq!(arrived.extension().and_then(|e| e.to_str()), Some("txt"));
    }

    #[tokio::test]
    async fn test_missing_directory_fails_at_startup() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(FolderWatcher::start(&missing, &fast_watch_config()).is_err());
    }
}
