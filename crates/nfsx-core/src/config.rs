//! Configuration structures for the conversion pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the nfsx pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Folder layout configuration.
    pub folders: FolderConfig,

    /// Folder watching configuration.
    pub watch: WatchConfig,

    /// Archive behavior configuration.
    pub archive: ArchiveConfig,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            folders: FolderConfig::default(),
            watch: WatchConfig::default(),
            archive: ArchiveConfig::default(),
        }
    }
}

/// The four well-known directories of the intake layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderConfig {
    /// Directory watched for incoming documents.
    pub input: PathBuf,

    /// Directory receiving rendered XML files.
    pub output: PathBuf,

    /// Archive for successfully converted documents.
    pub processed: PathBuf,

    /// Quarantine for documents that failed conversion.
    pub failed: PathBuf,
}

impl Default for FolderConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("pdf_input"),
            output: PathBuf::from("xml_output"),
            processed: PathBuf::from("processed_pdf"),
            failed: PathBuf::from("failed"),
        }
    }
}

/// Folder watching configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Delay between a file-arrival notification and processing, in
    /// milliseconds. A heuristic guard against readers racing a writer that
    /// has not yet closed the file; very large or slowly-written files may
    /// still be read prematurely.
    pub debounce_ms: u64,

    /// Capacity of the arrival event channel.
    pub channel_capacity: usize,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 1000,
            channel_capacity: 100,
        }
    }
}

/// Archive behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// What to do when an archive destination filename is already taken.
    pub collision_policy: CollisionPolicy,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            collision_policy: CollisionPolicy::Uniquify,
        }
    }
}

/// Policy for archive destination filename collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Suffix the destination name with a timestamp (and a counter if still
    /// taken). Never loses data. The default.
    Uniquify,
    /// Replace the existing file.
    Overwrite,
    /// Propagate an error and leave the source in place.
    Fail,
}

impl ConvertConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
