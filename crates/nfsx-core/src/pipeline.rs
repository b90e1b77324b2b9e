//! Intake pipeline: read, extract, render, write, archive.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::{error, info};

use crate::archive::ArchiveLayout;
use crate::error::NfsxError;
use crate::fields::FieldExtractor;
use crate::pdf::{is_supported_document, DocumentReader, PdfReader};
use crate::xml::NfseRenderer;

/// Terminal outcome of processing one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingOutcome {
    /// Conversion succeeded; the rendered XML lives at `output` and the
    /// source file was archived to the processed directory.
    Success { output: PathBuf },
    /// Conversion failed; the source file was quarantined to the failed
    /// directory. Never retried automatically.
    Failure { reason: String },
}

impl ProcessingOutcome {
    /// Whether this outcome is a success.
    pub fn is_success(&self) -> bool {
        matches!(self, ProcessingOutcome::Success { .. })
    }
}

/// Sink for human-readable status messages.
///
/// The pipeline mirrors every message to the tracing log; the sink only
/// drives operator-facing display.
pub trait StatusSink: Send + Sync {
    /// Consume one timestamped status message.
    fn emit(&self, at: DateTime<Local>, message: &str);
}

/// Sink that discards messages. Status still reaches the tracing log.
#[derive(Debug, Default)]
pub struct NullSink;

impl StatusSink for NullSink {
    fn emit(&self, _at: DateTime<Local>, _message: &str) {}
}

/// Single-item conversion pipeline over a fixed archive layout.
///
/// Processing is strictly serial: `process_file` takes `&self` but callers
/// must not interleave two calls for the same layout, because archive moves
/// and output writes are not designed for concurrent execution on the same
/// filename. The watch drain loop and the one-shot scan both call it from a
/// single task.
pub struct ConvertPipeline {
    layout: ArchiveLayout,
    reader: PdfReader,
    extractor: FieldExtractor,
    renderer: NfseRenderer,
    sink: Arc<dyn StatusSink>,
}

impl ConvertPipeline {
    /// Create a pipeline over the given layout with no display sink.
    pub fn new(layout: ArchiveLayout) -> Self {
        Self {
            layout,
            reader: PdfReader::new(),
            extractor: FieldExtractor::new(),
            renderer: NfseRenderer::new(),
            sink: Arc::new(NullSink),
        }
    }

    /// Attach a display sink for status messages.
    pub fn with_sink(mut self, sink: Arc<dyn StatusSink>) -> Self {
        self.sink = sink;
        self
    }

    /// The archive layout this pipeline operates on.
    pub fn layout(&self) -> &ArchiveLayout {
        &self.layout
    }

    fn report(&self, message: &str) {
        info!("{}", message);
        self.sink.emit(Local::now(), message);
    }

    fn report_error(&self, message: &str) {
        error!("{}", message);
        self.sink.emit(Local::now(), message);
    }

    /// Process one input file to its terminal outcome.
    ///
    /// All conversion errors are caught here, converted into a `Failure`
    /// outcome and quarantined; one bad file never halts the pipeline.
    pub fn process_file(&self, path: &Path) -> ProcessingOutcome {
        self.report(&format!("Processing: {}", path.display()));

        match self.convert(path) {
            Ok(output) => {
                if let Err(e) = self.layout.move_to_processed(path) {
                    // The XML was written but the source is stuck in the
                    // input directory; surface this as a failure so the
                    // operator intervenes before the file is picked up again.
                    let reason = format!("converted but could not archive source: {}", e);
                    self.report_error(&format!("Error processing {}: {}", path.display(), reason));
                    return ProcessingOutcome::Failure { reason };
                }
                self.report(&format!("Successfully converted: {}", path.display()));
                self.report(&format!("XML saved to: {}", output.display()));
                ProcessingOutcome::Success { output }
            }
            Err(e) => {
                let reason = e.to_string();
                self.report_error(&format!("Error processing {}: {}", path.display(), reason));
                if let Err(move_err) = self.layout.move_to_failed(path) {
                    self.report_error(&format!(
                        "Could not quarantine {}: {}",
                        path.display(),
                        move_err
                    ));
                }
                ProcessingOutcome::Failure { reason }
            }
        }
    }

    /// read -> extract -> render -> write. Returns the output path.
    fn convert(&self, path: &Path) -> Result<PathBuf, NfsxError> {
        let text = self.reader.read_text(path)?;
        let fields = self.extractor.extract(&text);
        let xml = self.renderer.render(&fields)?;

        let output = self.layout.output_path_for(path);
        write_atomic(&output, xml.as_bytes())?;
        Ok(output)
    }

    /// Scan the input directory once and process every eligible file found,
    /// in directory-listing order. An empty directory is reported and leaves
    /// all directories unchanged.
    pub fn process_existing(&self) -> Result<Vec<ProcessingOutcome>, NfsxError> {
        let mut candidates = Vec::new();
        for entry in fs::read_dir(&self.layout.input)? {
            let path = entry?.path();
            if path.is_file() && is_supported_document(&path) {
                candidates.push(path);
            }
        }

        if candidates.is_empty() {
            self.report("No document files found in input folder");
            return Ok(Vec::new());
        }

        self.report(&format!("Found {} document files to process", candidates.len()));

        let outcomes = candidates
            .iter()
            .map(|path| self.process_file(path))
            .collect();
        Ok(outcomes)
    }
}

/// Write through a sibling temp file and rename over the destination, so a
/// crash mid-write never leaves a truncated output. Rename overwrites any
/// prior file of the same name; reprocessing a same-named input is
/// idempotent by design.
fn write_atomic(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let tmp = path.with_extension("xml.tmp");
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)
}
