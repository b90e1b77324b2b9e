//! Core library for watched-folder NFSe conversion.
//!
//! This crate provides:
//! - Document text extraction (PDF via lopdf/pdf-extract, plain text)
//! - Rule-based NFSe field extraction (number, series, dates, values, CNPJ)
//! - Deterministic GerarNfseEnvio XML rendering
//! - The intake pipeline: read, extract, render, write, archive
//! - A debounced folder watch source feeding the pipeline

pub mod archive;
pub mod config;
pub mod error;
pub mod fields;
pub mod pdf;
pub mod pipeline;
pub mod watch;
pub mod xml;

pub use archive::ArchiveLayout;
pub use config::{CollisionPolicy, ConvertConfig};
pub use error::{NfsxError, Result};
pub use fields::{ExtractedFields, FieldExtractor};
pub use pdf::{DocumentReader, PdfReader};
pub use pipeline::{ConvertPipeline, NullSink, ProcessingOutcome, StatusSink};
pub use watch::FolderWatcher;
pub use xml::NfseRenderer;
