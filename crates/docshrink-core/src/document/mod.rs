//! The document re-encoding pipeline.
//!
//! A document is processed page by page: each page is rasterized at the
//! scale that fits it inside the target page box, encoded as a JPEG at the
//! attempt's quality, and embedded into a brand-new output document. The
//! size ceiling applies to the *whole* serialized document, so the quality
//! search re-renders and re-assembles every page per attempt — quality is
//! document-global, never per-page.
//!
//! Page rendering is a host capability (a browser host hands it to pdf.js);
//! the core only sees the [`PageRenderer`] port.

pub mod assemble;

use thiserror::Error;

use crate::dimensions::{fit_scale, scaled_size};
use crate::encode::encode_raster;
use crate::error::ProcessError;
use crate::raster::RasterSurface;
use crate::search::{search_quality, ProcessedOutput};
use crate::settings::{DocumentSettings, OutputFormat};

use assemble::{assemble_document, PageImage};

/// Errors from a host-supplied page renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The page index does not exist in the document.
    #[error("Page index {index} out of range ({count} pages)")]
    PageOutOfRange { index: usize, count: usize },

    /// The renderer failed to produce a raster for the page.
    #[error("Page {index}: {message}")]
    RenderFailed { index: usize, message: String },
}

/// Capability port for rasterizing document pages.
///
/// Implementations must be able to report each page's natural (scale 1.0)
/// viewport before rendering, and render any page at an arbitrary scale.
/// Rendering the same page at the same scale twice must produce rasters of
/// identical dimensions; the search relies on that to re-render pages across
/// attempts.
pub trait PageRenderer {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Natural (unscaled) viewport dimensions of a page, in points.
    fn natural_size(&self, index: usize) -> Result<(f32, f32), RenderError>;

    /// Rasterize one page at the given scale.
    ///
    /// The raster must be `round(natural * scale)` pixels on each axis.
    fn render_page(&self, index: usize, scale: f32) -> Result<RasterSurface, RenderError>;
}

/// Re-encode a document to fit the settings' size ceiling.
///
/// Runs the size-constrained quality search over the whole document: every
/// attempt renders each page in order at its own fit scale, encodes it as a
/// JPEG at the attempt's quality, assembles a fresh output document, and
/// measures the serialized size. The output has exactly one page per source
/// page, in source order.
///
/// # Errors
///
/// Invalid settings and empty documents abort immediately; a render, encode,
/// or assembly failure aborts the search mid-way.
pub fn process_document<R: PageRenderer>(
    renderer: &R,
    settings: &DocumentSettings,
) -> Result<ProcessedOutput, ProcessError> {
    settings.validate()?;

    let page_count = renderer.page_count();
    if page_count == 0 {
        return Err(ProcessError::EmptyDocument);
    }

    let target_width = settings.width as f32;
    let target_height = settings.height as f32;

    search_quality(settings.quality, settings.max_size_kb, |quality| {
        let mut pages = Vec::with_capacity(page_count);
        for index in 0..page_count {
            let (natural_width, natural_height) = renderer.natural_size(index)?;
            let scale = fit_scale(target_width, target_height, natural_width, natural_height)?;
            let surface = renderer.render_page(index, scale)?;
            let jpeg = encode_raster(&surface, OutputFormat::Jpeg, quality)?;
            pages.push(PageImage {
                jpeg,
                width: surface.width,
                height: surface.height,
            });
        }
        Ok(assemble_document(&pages)?)
    })
}

/// Pixel dimensions a page will occupy after fitting into the target box.
///
/// Convenience for hosts that rasterize pages themselves and need to size
/// their canvas before rendering.
pub fn fitted_page_size(
    settings: &DocumentSettings,
    natural_width: f32,
    natural_height: f32,
) -> Result<(u32, u32), ProcessError> {
    let scale = fit_scale(
        settings.width as f32,
        settings.height as f32,
        natural_width,
        natural_height,
    )?;
    Ok(scaled_size(natural_width, natural_height, scale))
}
