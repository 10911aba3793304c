//! Docshrink WASM - WebAssembly bindings for Docshrink
//!
//! This crate exposes the docshrink-core re-encoding pipelines to
//! JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for rasters and results
//! - `image` - Image pipeline bindings (decode, re-encode, dimension edits)
//! - `document` - Document pipeline bindings (page scale, page set,
//!   re-encode)
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, process_image } from '@docshrink/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const output = process_image(bytes, settings);
//! const blob = new Blob([output.bytes()], { type: 'image/jpeg' });
//! ```

use wasm_bindgen::prelude::*;

mod document;
mod image;
mod types;

// Re-export public types
pub use document::{compute_page_scale, process_document, JsPageSet};
pub use image::{decode_image, process_image, resolve_dimensions};
pub use types::{JsProcessedOutput, JsRasterSurface, ResolvedDimensions};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
