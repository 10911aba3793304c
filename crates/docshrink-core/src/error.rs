//! Top-level error type for processing invocations.
//!
//! Each collaborator keeps its own error enum; `ProcessError` aggregates
//! them at the pipeline boundary so hosts deal with one type. Every variant
//! renders as human-readable text. A size ceiling that could not be met is
//! deliberately NOT an error; it is the `met_requirement` annotation on
//! [`crate::search::ProcessedOutput`].

use thiserror::Error;

use crate::decode::DecodeError;
use crate::dimensions::DimensionError;
use crate::document::assemble::AssembleError;
use crate::document::RenderError;
use crate::encode::EncodeError;
use crate::raster::RasterError;
use crate::settings::SettingsError;

/// Errors that abort a processing invocation.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The settings describe an invalid invocation.
    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsError),

    /// A dimension computation failed.
    #[error("Invalid dimensions: {0}")]
    Dimensions(#[from] DimensionError),

    /// The source could not be decoded.
    #[error("Failed to decode source: {0}")]
    Decode(#[from] DecodeError),

    /// A raster surface operation failed.
    #[error("Raster operation failed: {0}")]
    Raster(#[from] RasterError),

    /// An encode attempt produced no buffer.
    #[error("Failed to encode: {0}")]
    Encode(#[from] EncodeError),

    /// A document page could not be rendered.
    #[error("Failed to render page: {0}")]
    Render(#[from] RenderError),

    /// The output document could not be assembled or serialized.
    #[error("Failed to assemble document: {0}")]
    Assemble(#[from] AssembleError),

    /// The source document has no pages.
    #[error("Document has no pages")]
    EmptyDocument,
}
