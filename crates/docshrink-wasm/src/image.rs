//! Image pipeline WASM bindings.
//!
//! This module exposes the docshrink-core image pipeline to JavaScript:
//! decoding a source for preview/settings seeding, running the
//! size-constrained re-encode, and resolving aspect-locked dimension edits
//! for the settings form.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, process_image } from '@docshrink/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const decoded = decode_image(bytes);
//!
//! const output = process_image(bytes, {
//!   width: decoded.width,
//!   height: decoded.height,
//!   keep_aspect_ratio: true,
//!   format: 'jpeg',
//!   max_size_kb: 50,
//!   quality: 0.9,
//! });
//! const blob = new Blob([output.bytes()], { type: 'image/jpeg' });
//! ```

use docshrink_core::dimensions::DimensionEdit;
use docshrink_core::settings::ImageSettings;
use wasm_bindgen::prelude::*;

use crate::types::{JsProcessedOutput, JsRasterSurface, ResolvedDimensions};

/// Decode an image from bytes.
///
/// The format is guessed from the content; EXIF orientation is applied so
/// the reported dimensions match what the user sees. Hosts use this to seed
/// the settings form with the source's dimensions.
///
/// # Errors
///
/// Returns an error if the bytes are not a supported image or are corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRasterSurface, JsValue> {
    docshrink_core::decode_image(bytes)
        .map(JsRasterSurface::from_surface)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Re-encode an image to fit a size ceiling.
///
/// # Arguments
///
/// * `bytes` - The original file bytes
/// * `settings` - An `ImageSettings` object: `{ width, height,
///   keep_aspect_ratio, format, max_size_kb, quality }` with format one of
///   `"jpeg" | "png" | "webp"`
///
/// # Returns
///
/// A [`JsProcessedOutput`] with the encoded bytes, the achieved size in KB,
/// and whether the ceiling was met. When the retry budget is exhausted the
/// best-achieved output is still returned, `met_requirement` is false, and
/// a warning is mirrored to the browser console.
///
/// # Errors
///
/// Returns an error for invalid settings, undecodable sources, or encoder
/// failures.
#[wasm_bindgen]
pub fn process_image(bytes: &[u8], settings: JsValue) -> Result<JsProcessedOutput, JsValue> {
    let settings: ImageSettings =
        serde_wasm_bindgen::from_value(settings).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let output = docshrink_core::process_image(bytes, &settings)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    if !output.met_requirement {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "Could not meet the size requirement. Final size: {:.1} KB.",
            output.size_kb
        )));
    }

    Ok(JsProcessedOutput::from_output(output))
}

/// Resolve a dimension edit into a consistent (width, height) pair.
///
/// With the aspect lock on, the untouched axis is derived from the
/// *original* source dimensions so repeated edits never drift; with the
/// lock off, the untouched axis keeps its current value.
///
/// # Arguments
///
/// * `original_width`/`original_height` - The source image's dimensions
/// * `current_width`/`current_height` - The values currently in the form
/// * `edit_width` - True if the width field was edited, false for height
/// * `value` - The edited field's new value
/// * `keep_aspect_ratio` - Whether the aspect lock is on
///
/// # Errors
///
/// Returns an error for a zero edit value, or when the lock is on and the
/// original dimensions cannot supply an aspect ratio.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn resolve_dimensions(
    original_width: u32,
    original_height: u32,
    current_width: u32,
    current_height: u32,
    edit_width: bool,
    value: u32,
    keep_aspect_ratio: bool,
) -> Result<ResolvedDimensions, JsValue> {
    let edit = if edit_width {
        DimensionEdit::Width(value)
    } else {
        DimensionEdit::Height(value)
    };

    docshrink_core::resolve_dimensions(
        (original_width, original_height),
        (current_width, current_height),
        edit,
        keep_aspect_ratio,
    )
    .map(|(width, height)| ResolvedDimensions::new(width, height))
    .map_err(|e| JsValue::from_str(&e.to_string()))
}
