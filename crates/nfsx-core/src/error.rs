//! Error types for the nfsx-core library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the nfsx library.
#[derive(Error, Debug)]
pub enum NfsxError {
    /// Document reading error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// XML rendering error.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Archive move error.
    #[error("archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// Failed to bind the filesystem watch source.
    #[error("watch error: {0}")]
    Watch(#[from] notify::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to reading input documents.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The file extension is not a supported document type.
    #[error("unsupported document type: {0}")]
    UnsupportedType(String),

    /// Failed to read the file from disk.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors related to XML rendering.
///
/// Rendering only fails on an internal serialization fault; a well-formed
/// field set always renders. Treated as a defect, not a user-facing
/// condition.
#[derive(Error, Debug)]
pub enum RenderError {
    /// XML writer failure.
    #[error("XML serialization failed: {0}")]
    Xml(String),
}

/// Errors related to archive directory management and file moves.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Failed to create an archive directory.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to move a file into an archive directory.
    #[error("failed to move {from} to {to}: {source}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    /// Destination already exists and the collision policy forbids overwrite.
    #[error("destination already exists: {0}")]
    Collision(PathBuf),
}

/// Result type for the nfsx library.
pub type Result<T> = std::result::Result<T, NfsxError>;
