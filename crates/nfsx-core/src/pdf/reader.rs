//! PDF and plain-text document reading using lopdf and pdf-extract.

use std::fs;
use std::path::Path;

use lopdf::Document;
use tracing::debug;

use super::{DocumentReader, Result};
use crate::error::PdfError;

/// Document reader backed by lopdf (structure validation) and pdf-extract
/// (text extraction).
#[derive(Debug, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new document reader.
    pub fn new() -> Self {
        Self
    }

    fn read_pdf_text(&self, path: &Path) -> Result<String> {
        let data = fs::read(path).map_err(|source| PdfError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut doc = Document::load_mem(&data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption.
        let raw_data = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data
        };

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }
        debug!("Loaded PDF with {} pages", page_count);

        let text = pdf_extract::extract_text_from_mem(&raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        Ok(text)
    }

    fn read_plain_text(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|source| PdfError::Read {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl DocumentReader for PdfReader {
    fn read_text(&self, path: &Path) -> Result<String> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "pdf" => self.read_pdf_text(path),
            "txt" => self.read_plain_text(path),
            other => Err(PdfError::UnsupportedType(other.to_string())),
        }
    }
}
