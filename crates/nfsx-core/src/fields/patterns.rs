//! Regex patterns for NFSe field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Invoice number: "Número da Nota: 42"
    pub static ref NOTA_NUMBER: Regex = Regex::new(
        r"Número da Nota: (\d+)"
    ).unwrap();

    /// Invoice series: "Série: A"
    pub static ref NOTA_SERIES: Regex = Regex::new(
        r"Série: (\w+)"
    ).unwrap();

    /// Issue date: "Data Emissão: 01/03/2024"
    pub static ref ISSUE_DATE: Regex = Regex::new(
        r"Data Emissão: (\d{2}/\d{2}/\d{4})"
    ).unwrap();

    /// Service value: "Valor dos Serviços: R$ 150,00"
    pub static ref SERVICE_VALUE: Regex = Regex::new(
        r"Valor dos Serviços: R\$ ([\d.,]+)"
    ).unwrap();

    /// Provider tax id: "CNPJ: 12.345.678/0001-99"
    pub static ref PROVIDER_CNPJ: Regex = Regex::new(
        r"CNPJ: (\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2})"
    ).unwrap();

    /// Service description block: everything after the label up to the first
    /// blank line. Dot-matches-newline mode; the blank-line boundary is
    /// consumed, not captured (the regex crate has no lookahead).
    pub static ref SERVICE_DESCRIPTION: Regex = Regex::new(
        r"(?s)Descrição dos Serviços:(.*?)\n[ \t]*\n"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_pattern() {
        let caps = NOTA_NUMBER.captures("Número da Nota: 42\n").unwrap();
        assert_eq!(&caps[1], "42");
    }

    #[test]
    fn test_series_pattern() {
        let caps = NOTA_SERIES.captures("Série: A").unwrap();
        assert_eq!(&caps[1], "A");
    }

    #[test]
    fn test_cnpj_pattern_requires_full_format() {
        assert!(PROVIDER_CNPJ.is_match("CNPJ: 12.345.678/0001-99"));
        assert!(!PROVIDER_CNPJ.is_match("CNPJ: 12345678000199"));
    }

    #[test]
    fn test_description_stops_at_blank_line() {
        let text = "Descrição dos Serviços:\nlinha um\nlinha dois\n\nValor dos Serviços: R$ 1,00";
        let caps = SERVICE_DESCRIPTION.captures(text).unwrap();
        assert_eq!(&caps[1], "\nlinha um\nlinha dois");
    }

    #[test]
    fn test_description_requires_blank_line_boundary() {
        // No blank line after the block: no match, field degrades to empty.
        let text = "Descrição dos Serviços:\nlinha um\nlinha dois";
        assert!(SERVICE_DESCRIPTION.captures(text).is_none());
    }
}
