//! XML rendering module.

mod renderer;

pub use renderer::NfseRenderer;

use crate::error::RenderError;

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
