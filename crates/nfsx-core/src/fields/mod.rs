//! NFSe field extraction module.

mod extractor;
pub mod patterns;

pub use extractor::FieldExtractor;

/// Fields extracted from one document.
///
/// The field set is closed. An empty string is the defined value for "not
/// found" — downstream rendering never branches on presence, it only
/// substitutes defaults for a documented subset of fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    /// Invoice number ("Número da Nota").
    pub number: String,
    /// Invoice series ("Série").
    pub series: String,
    /// Issue date ("Data Emissão"), DD/MM/YYYY.
    pub issue_date: String,
    /// Total service value ("Valor dos Serviços"), verbatim digits/separators.
    pub service_value: String,
    /// Provider tax id (CNPJ), formatted.
    pub provider_tax_id: String,
    /// Service description block, up to the first blank line.
    pub description: String,
}

impl ExtractedFields {
    /// Whether nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        self.number.is_empty()
            && self.series.is_empty()
            && self.issue_date.is_empty()
            && self.service_value.is_empty()
            && self.provider_tax_id.is_empty()
            && self.description.is_empty()
    }
}
