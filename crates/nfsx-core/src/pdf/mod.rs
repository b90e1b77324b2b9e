//! Document reading module.

mod reader;

pub use reader::PdfReader;

use crate::error::PdfError;
use std::path::Path;

/// Result type for document reading operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for document text readers.
pub trait DocumentReader {
    /// Read a document from disk and extract its full text.
    ///
    /// An empty string is a valid result: a scanned or image-only document
    /// carries no extractable text but is not a read failure.
    fn read_text(&self, path: &Path) -> Result<String>;
}

/// Whether a path looks like a document this pipeline accepts.
///
/// PDFs are the primary input; plain `.txt` files are accepted as
/// equivalent text-bearing documents.
pub fn is_supported_document(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    matches!(ext.as_str(), "pdf" | "txt")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_document(Path::new("nota.pdf")));
        assert!(is_supported_document(Path::new("NOTA.PDF")));
        assert!(is_supported_document(Path::new("nota.txt")));
        assert!(!is_supported_document(Path::new("nota.xml")));
        assert!(!is_supported_document(Path::new("nota")));
    }
}
