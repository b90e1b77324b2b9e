//! Deterministic rendering of extracted fields into GerarNfseEnvio XML.
//!
//! Output is compared byte-for-byte in regression tests, so the whitespace
//! rules are fixed here rather than left to writer defaults: two-space
//! indentation, one element per line, text content inline with its tags,
//! UTF-8 declaration, no trailing newline.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::Result;
use crate::error::RenderError;
use crate::fields::ExtractedFields;

/// Document schema namespace of the envelope.
const NFSE_NAMESPACE: &str = "http://www.abrasf.org.br/nfse.xsd";
/// XML Schema instance namespace.
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// RPS type code, constant for this document class.
const RPS_TYPE: &str = "1";
/// ISS withholding indicator, constant ("not withheld").
const ISS_WITHHELD: &str = "2";
/// Service list item code, constant.
const SERVICE_ITEM: &str = "01.01";
/// IBGE municipality code (São Paulo), constant.
const MUNICIPALITY_CODE: &str = "3550308";

/// Renders an [`ExtractedFields`] map into the fixed GerarNfseEnvio
/// hierarchy.
///
/// Defaults are substituted only for number ("1"), series ("1") and service
/// value ("0.00") when their fields are empty; the description is rendered
/// verbatim, including the empty string.
#[derive(Debug, Default)]
pub struct NfseRenderer;

impl NfseRenderer {
    /// Create a new renderer.
    pub fn new() -> Self {
        Self
    }

    /// Render the fields as a deterministic XML string.
    pub fn render(&self, fields: &ExtractedFields) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .map_err(xml_err)?;

        let mut envelope = BytesStart::new("GerarNfseEnvio");
        envelope.push_attribute(("xmlns", NFSE_NAMESPACE));
        envelope.push_attribute(("xmlns:xsi", XSI_NAMESPACE));
        writer.write_event(Event::Start(envelope)).map_err(xml_err)?;

        open(&mut writer, "Rps")?;
        open(&mut writer, "InfDeclaracaoPrestacaoServico")?;

        open(&mut writer, "Rps")?;
        open(&mut writer, "IdentificacaoRps")?;
        text_element(&mut writer, "Numero", or_default(&fields.number, "1"))?;
        text_element(&mut writer, "Serie", or_default(&fields.series, "1"))?;
        text_element(&mut writer, "Tipo", RPS_TYPE)?;
        close(&mut writer, "IdentificacaoRps")?;
        close(&mut writer, "Rps")?;

        open(&mut writer, "Servico")?;
        open(&mut writer, "Valores")?;
        text_element(
            &mut writer,
            "ValorServicos",
            or_default(&fields.service_value, "0.00"),
        )?;
        text_element(&mut writer, "IssRetido", ISS_WITHHELD)?;
        close(&mut writer, "Valores")?;
        text_element(&mut writer, "ItemListaServico", SERVICE_ITEM)?;
        text_element(&mut writer, "Discriminacao", &fields.description)?;
        text_element(&mut writer, "CodigoMunicipio", MUNICIPALITY_CODE)?;
        close(&mut writer, "Servico")?;

        close(&mut writer, "InfDeclaracaoPrestacaoServico")?;
        close(&mut writer, "Rps")?;
        close(&mut writer, "GerarNfseEnvio")?;

        String::from_utf8(writer.into_inner()).map_err(xml_err)
    }
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() { default } else { value }
}

fn open(writer: &mut Writer<Vec<u8>>, name: &str) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(xml_err)
}

fn close(writer: &mut Writer<Vec<u8>>, name: &str) -> Result<()> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_err)
}

fn text_element(writer: &mut Writer<Vec<u8>>, name: &str, value: &str) -> Result<()> {
    open(writer, name)?;
    writer
        .write_event(Event::Text(BytesText::new(value)))
        .map_err(xml_err)?;
    close(writer, name)
}

fn xml_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Xml(e.to_string())
}
