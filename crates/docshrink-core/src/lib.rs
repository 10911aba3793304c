//! Docshrink Core - Size-constrained re-encoding library
//!
//! This crate implements the shared algorithm behind Docshrink's image and
//! document pipelines: given a decoded source and a size ceiling, search a
//! quality parameter for the largest-quality output that still fits (or the
//! closest achievable within a fixed attempt budget).
//!
//! # Architecture
//!
//! Two pipelines share one shape:
//!
//! - [`process_image`] - decode → stretch onto a target-size surface →
//!   encode → measure → retry at lower quality.
//! - [`process_document`] - per page: render at a fit scale → JPEG-encode →
//!   embed into a fresh document; the retry loop measures the *whole*
//!   serialized document.
//!
//! Rendering document pages is a host capability injected through the
//! [`document::PageRenderer`] port, so the core runs and tests without a
//! real rendering environment.

pub mod decode;
pub mod dimensions;
pub mod document;
pub mod encode;
pub mod error;
pub mod pipeline;
pub mod raster;
pub mod search;
pub mod settings;

pub use decode::decode_image;
pub use dimensions::{fit_scale, resolve_dimensions, scaled_size, DimensionEdit};
pub use document::{process_document, PageRenderer};
pub use error::ProcessError;
pub use pipeline::process_image;
pub use raster::RasterSurface;
pub use search::{ProcessedOutput, MAX_ATTEMPTS, MIN_QUALITY, QUALITY_STEP};
pub use settings::{DocumentSettings, ImageSettings, OutputFormat};
