//! Archive directory layout and terminal file moves.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info};

use crate::config::{CollisionPolicy, ConvertConfig};
use crate::error::ArchiveError;

/// Result type for archive operations.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// The four well-known directories of the intake layout, plus the collision
/// policy for moves into them. Created once at startup, never mutated.
#[derive(Debug, Clone)]
pub struct ArchiveLayout {
    /// Directory watched for incoming documents.
    pub input: PathBuf,
    /// Directory receiving rendered XML files.
    pub output: PathBuf,
    /// Archive for successfully converted documents.
    pub processed: PathBuf,
    /// Quarantine for failed documents.
    pub failed: PathBuf,
    collision_policy: CollisionPolicy,
}

impl ArchiveLayout {
    /// Build a layout from configuration, resolving relative paths against
    /// the given base directory.
    pub fn from_config(config: &ConvertConfig, base: &Path) -> Self {
        let resolve = |p: &PathBuf| if p.is_absolute() { p.clone() } else { base.join(p) };
        Self {
            input: resolve(&config.folders.input),
            output: resolve(&config.folders.output),
            processed: resolve(&config.folders.processed),
            failed: resolve(&config.folders.failed),
            collision_policy: config.archive.collision_policy,
        }
    }

    /// Create the four directories if absent. Idempotent, safe to call on
    /// every startup.
    pub fn ensure_layout(&self) -> Result<()> {
        for dir in [&self.input, &self.output, &self.processed, &self.failed] {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(|source| ArchiveError::CreateDir {
                    path: dir.clone(),
                    source,
                })?;
                info!("Created folder: {}", dir.display());
            }
        }
        Ok(())
    }

    /// Output path for a given input: `<output>/<base>.xml`.
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("document");
        self.output.join(format!("{}.xml", stem))
    }

    /// Move a successfully converted source file into the processed archive.
    pub fn move_to_processed(&self, path: &Path) -> Result<PathBuf> {
        self.move_into(path, &self.processed)
    }

    /// Move a failed source file into the quarantine archive.
    pub fn move_to_failed(&self, path: &Path) -> Result<PathBuf> {
        self.move_into(path, &self.failed)
    }

    fn move_into(&self, path: &Path, dir: &Path) -> Result<PathBuf> {
        let name = path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("document"));
        let mut dest = dir.join(&name);

        if dest.exists() {
            dest = match self.collision_policy {
                CollisionPolicy::Overwrite => dest,
                CollisionPolicy::Fail => return Err(ArchiveError::Collision(dest)),
                CollisionPolicy::Uniquify => uniquify(dir, &name),
            };
        }

        move_file(path, &dest)?;
        debug!("Moved {} to {}", path.display(), dest.display());
        Ok(dest)
    }
}

/// Rename within the same volume when possible, falling back to
/// copy-then-delete across volumes.
fn move_file(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }

    fs::copy(from, to)
        .and_then(|_| fs::remove_file(from))
        .map_err(|source| ArchiveError::Move {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        })?;
    Ok(())
}

/// Pick a free destination name by suffixing the stem with a UTC timestamp,
/// then a numeric counter if that is also taken.
fn uniquify(dir: &Path, name: &Path) -> PathBuf {
    let stem = name
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    let ext = name.extension().and_then(|e| e.to_str());
    let stamp = Utc::now().format("%Y%m%d%H%M%S");

    let with_ext = |base: String| match ext {
        Some(ext) => dir.join(format!("{}.{}", base, ext)),
        None => dir.join(base),
    };

    let candidate = with_ext(format!("{}-{}", stem, stamp));
    if !candidate.exists() {
        return candidate;
    }

    let mut counter = 1u32;
    loop {
        let candidate = with_ext(format!("{}-{}-{}", stem, stamp, counter));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConvertConfig;

    fn layout_in(dir: &Path, policy: CollisionPolicy) -> ArchiveLayout {
        let mut config = ConvertConfig::default();
        config.archive.collision_policy = policy;
        let layout = ArchiveLayout::from_config(&config, dir);
        layout.ensure_layout().unwrap();
        layout
    }

    #[test]
    fn test_ensure_layout_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path(), CollisionPolicy::Uniquify);
        layout.ensure_layout().unwrap();
        assert!(layout.input.is_dir());
        assert!(layout.output.is_dir());
        assert!(layout.processed.is_dir());
        assert!(layout.failed.is_dir());
    }

    #[test]
    fn test_output_path_substitutes_extension() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path(), CollisionPolicy::Uniquify);
        let out = layout.output_path_for(Path::new("/tmp/in/nota-123.pdf"));
        assert_eq!(out, layout.output.join("nota-123.xml"));
    }

    #[test]
    fn test_move_to_processed_preserves_name() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path(), CollisionPolicy::Uniquify);
        let src = layout.input.join("nota.pdf");
        fs::write(&src, b"data").unwrap();

        let dest = layout.move_to_processed(&src).unwrap();
        assert_eq!(dest, layout.processed.join("nota.pdf"));
        assert!(!src.exists());
        assert!(dest.exists());
    }

    #[test]
    fn test_collision_uniquify_keeps_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path(), CollisionPolicy::Uniquify);
        fs::write(layout.failed.join("nota.pdf"), b"earlier").unwrap();

        let src = layout.input.join("nota.pdf");
        fs::write(&src, b"later").unwrap();

        let dest = layout.move_to_failed(&src).unwrap();
        assert_ne!(dest, layout.failed.join("nota.pdf"));
        assert!(layout.failed.join("nota.pdf").exists());
        assert!(dest.exists());
        assert_eq!(fs::read(&dest).unwrap(), b"later");
    }

    #[test]
    fn test_collision_fail_leaves_source_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path(), CollisionPolicy::Fail);
        fs::write(layout.processed.join("nota.pdf"), b"earlier").unwrap();

        let src = layout.input.join("nota.pdf");
        fs::write(&src, b"later").unwrap();

        let err = layout.move_to_processed(&src).unwrap_err();
        assert!(matches!(err, ArchiveError::Collision(_)));
        assert!(src.exists());
    }

    #[test]
    fn test_collision_overwrite_replaces_destination() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path(), CollisionPolicy::Overwrite);
        fs::write(layout.processed.join("nota.pdf"), b"earlier").unwrap();

        let src = layout.input.join("nota.pdf");
        fs::write(&src, b"later").unwrap();

        let dest = layout.move_to_processed(&src).unwrap();
        assert_eq!(dest, layout.processed.join("nota.pdf"));
        assert_eq!(fs::read(&dest).unwrap(), b"later");
    }
}
