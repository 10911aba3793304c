//! Document pipeline WASM bindings.
//!
//! The browser host owns page rasterization (pdf.js), so the bindings take
//! pre-rendered pages: the host asks [`compute_page_scale`] how large to
//! render each page, draws it on a canvas, and adds the pixels to a
//! [`JsPageSet`]. [`process_document`] then runs the document-global quality
//! search over the set and assembles the output PDF in WASM memory.
//!
//! Because the fit scale depends only on the target box and the page's
//! natural size - never on quality - serving the same raster for every
//! retry is indistinguishable from re-rendering, and the page set checks
//! that each raster matches the dimensions its scale implies.
//!
//! # Example
//!
//! ```typescript
//! import { JsPageSet, compute_page_scale, process_document } from '@docshrink/wasm';
//!
//! const pages = new JsPageSet();
//! for (let i = 1; i <= pdf.numPages; i++) {
//!   const page = await pdf.getPage(i);
//!   const natural = page.getViewport({ scale: 1.0 });
//!   const scale = compute_page_scale(595, 842, natural.width, natural.height);
//!   const viewport = page.getViewport({ scale });
//!   // ... render to canvas, read back RGB pixels ...
//!   pages.add_page(natural.width, natural.height, surface);
//! }
//! const output = process_document(pages, { width: 595, height: 842,
//!   keep_aspect_ratio: true, max_size_kb: 100, quality: 0.8 });
//! ```

use docshrink_core::document::{PageRenderer, RenderError};
use docshrink_core::settings::DocumentSettings;
use docshrink_core::{scaled_size, RasterSurface};
use wasm_bindgen::prelude::*;

use crate::types::{JsProcessedOutput, JsRasterSurface};

/// Compute the uniform scale that fits a page inside a target box.
///
/// `min(target_width / natural_width, target_height / natural_height)`;
/// the host renders the page at this scale so the raster matches the page
/// box the output document will use.
///
/// # Errors
///
/// Returns an error if either natural dimension is zero or negative.
#[wasm_bindgen]
pub fn compute_page_scale(
    target_width: f32,
    target_height: f32,
    natural_width: f32,
    natural_height: f32,
) -> Result<f32, JsValue> {
    docshrink_core::fit_scale(target_width, target_height, natural_width, natural_height)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// An ordered set of host-rendered document pages.
#[wasm_bindgen]
pub struct JsPageSet {
    pages: Vec<StoredPage>,
}

struct StoredPage {
    natural_width: f32,
    natural_height: f32,
    surface: RasterSurface,
}

#[wasm_bindgen]
impl JsPageSet {
    /// Create an empty page set.
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsPageSet {
        JsPageSet { pages: Vec::new() }
    }

    /// Append a page in document order.
    ///
    /// # Arguments
    /// * `natural_width`/`natural_height` - The page's unscaled viewport in
    ///   points
    /// * `surface` - The page rendered at the scale
    ///   [`compute_page_scale`] returned for it
    pub fn add_page(&mut self, natural_width: f32, natural_height: f32, surface: &JsRasterSurface) {
        self.pages.push(StoredPage {
            natural_width,
            natural_height,
            surface: surface.to_surface(),
        });
    }

    /// Number of pages added so far
    #[wasm_bindgen(getter)]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

impl Default for JsPageSet {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRenderer for JsPageSet {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn natural_size(&self, index: usize) -> Result<(f32, f32), RenderError> {
        let page = self.page(index)?;
        Ok((page.natural_width, page.natural_height))
    }

    fn render_page(&self, index: usize, scale: f32) -> Result<RasterSurface, RenderError> {
        let page = self.page(index)?;
        let expected = scaled_size(page.natural_width, page.natural_height, scale);
        let actual = (page.surface.width, page.surface.height);
        if actual != expected {
            return Err(RenderError::RenderFailed {
                index,
                message: format!(
                    "rendered raster is {}x{} but scale {} implies {}x{}",
                    actual.0, actual.1, scale, expected.0, expected.1
                ),
            });
        }
        Ok(page.surface.clone())
    }
}

impl JsPageSet {
    fn page(&self, index: usize) -> Result<&StoredPage, RenderError> {
        self.pages.get(index).ok_or(RenderError::PageOutOfRange {
            index,
            count: self.pages.len(),
        })
    }
}

/// Re-encode a document to fit a size ceiling.
///
/// # Arguments
///
/// * `pages` - Host-rendered pages in document order
/// * `settings` - A `DocumentSettings` object: `{ width, height,
///   keep_aspect_ratio, max_size_kb, quality }` (width/height in PDF points)
///
/// # Returns
///
/// A [`JsProcessedOutput`] whose bytes are a complete PDF with one page per
/// input page. When the retry budget is exhausted the best-achieved document
/// is still returned, `met_requirement` is false, and a warning is mirrored
/// to the browser console.
///
/// # Errors
///
/// Returns an error for invalid settings, an empty page set, or a raster
/// whose dimensions do not match its page's fit scale.
#[wasm_bindgen]
pub fn process_document(pages: &JsPageSet, settings: JsValue) -> Result<JsProcessedOutput, JsValue> {
    let settings: DocumentSettings =
        serde_wasm_bindgen::from_value(settings).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let output = docshrink_core::process_document(pages, &settings)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    if !output.met_requirement {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "Could not meet the size requirement. Final size: {:.1} KB.",
            output.size_kb
        )));
    }

    Ok(JsProcessedOutput::from_output(output))
}
