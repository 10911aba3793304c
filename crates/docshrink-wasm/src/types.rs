//! WASM-compatible wrapper types.
//!
//! This module provides JavaScript-friendly types that wrap the core
//! Docshrink types, handling the conversion between Rust and JavaScript
//! data representations.

use docshrink_core::search::ProcessedOutput;
use docshrink_core::RasterSurface;
use wasm_bindgen::prelude::*;

/// A raster surface wrapper for JavaScript.
///
/// Hosts typically build one of these from canvas `ImageData` (dropping the
/// alpha channel) or receive one from [`crate::decode_image`].
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy
/// is made to JavaScript memory as a `Uint8Array`. The `free()` method can
/// be called to explicitly release WASM memory, but this is optional as
/// wasm-bindgen's finalizer will handle cleanup automatically.
#[wasm_bindgen]
pub struct JsRasterSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRasterSurface {
    /// Create a new JsRasterSurface from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Surface width in pixels
    /// * `height` - Surface height in pixels
    /// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRasterSurface {
        JsRasterSurface {
            width,
            height,
            pixels,
        }
    }

    /// Get the surface width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the surface height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup
    /// automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsRasterSurface {
    /// Create a JsRasterSurface from a core RasterSurface.
    pub(crate) fn from_surface(surface: RasterSurface) -> Self {
        Self {
            width: surface.width,
            height: surface.height,
            pixels: surface.pixels,
        }
    }

    /// Convert back to a core RasterSurface.
    ///
    /// Note: This clones the pixel data.
    pub(crate) fn to_surface(&self) -> RasterSurface {
        RasterSurface {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// The result of a processing invocation, for JavaScript.
///
/// Wraps the encoded bytes together with the measured size and whether the
/// size ceiling was met. When `met_requirement` is false the bytes are still
/// the best output achieved and remain usable.
#[wasm_bindgen]
pub struct JsProcessedOutput {
    bytes: Vec<u8>,
    size_kb: f64,
    met_requirement: bool,
}

#[wasm_bindgen]
impl JsProcessedOutput {
    /// The encoded output as a Uint8Array.
    ///
    /// Note: This creates a copy; hand it straight to a Blob for preview or
    /// download.
    pub fn bytes(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(&self.bytes[..])
    }

    /// Output size in kilobytes (byte length / 1024, unrounded).
    #[wasm_bindgen(getter)]
    pub fn size_kb(&self) -> f64 {
        self.size_kb
    }

    /// Whether the size ceiling was satisfied (always true for lossless
    /// formats, which are exempt).
    #[wasm_bindgen(getter)]
    pub fn met_requirement(&self) -> bool {
        self.met_requirement
    }
}

impl JsProcessedOutput {
    /// Create a JsProcessedOutput from a core ProcessedOutput.
    pub(crate) fn from_output(output: ProcessedOutput) -> Self {
        Self {
            bytes: output.bytes,
            size_kb: output.size_kb,
            met_requirement: output.met_requirement,
        }
    }
}

/// A resolved (width, height) pair from a dimension edit.
#[wasm_bindgen]
pub struct ResolvedDimensions {
    width: u32,
    height: u32,
}

#[wasm_bindgen]
impl ResolvedDimensions {
    /// Resolved width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Resolved height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl ResolvedDimensions {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}
