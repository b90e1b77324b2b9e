//! Rule-based field extraction from raw document text.

use regex::Regex;
use tracing::debug;

use super::patterns::{
    ISSUE_DATE, NOTA_NUMBER, NOTA_SERIES, PROVIDER_CNPJ, SERVICE_DESCRIPTION, SERVICE_VALUE,
};
use super::ExtractedFields;

/// Applies the fixed NFSe pattern set to raw text.
///
/// Extraction never fails: a pattern that does not match yields an empty
/// string for its field. Patterns are applied independently, in fixed order,
/// and do not share match state.
#[derive(Debug, Default)]
pub struct FieldExtractor;

impl FieldExtractor {
    /// Create a new field extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract all NFSe fields from raw document text.
    pub fn extract(&self, text: &str) -> ExtractedFields {
        let fields = ExtractedFields {
            number: first_capture(&NOTA_NUMBER, text),
            series: first_capture(&NOTA_SERIES, text),
            issue_date: first_capture(&ISSUE_DATE, text),
            service_value: first_capture(&SERVICE_VALUE, text),
            provider_tax_id: first_capture(&PROVIDER_CNPJ, text),
            description: first_capture(&SERVICE_DESCRIPTION, text),
        };

        if fields.is_empty() {
            debug!("No fields matched in {} characters of text", text.len());
        }
        fields
    }
}

/// First match of the pattern, first capture group, trimmed. Empty string if
/// the pattern does not match.
fn first_capture(pattern: &Regex, text: &str) -> String {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}
