//! Dimension resolution for raster targets and document page boxes.
//!
//! Two small pieces of geometry shared by the pipelines and the host UI:
//!
//! - Aspect-locked dimension edits: when the user edits one axis, the other
//!   is derived from the *original* source aspect ratio, so repeated edits
//!   never accumulate rounding drift.
//! - Page fit scale: the uniform factor that fits a page's natural viewport
//!   inside a target box while preserving the page's own aspect ratio.

use thiserror::Error;

/// Errors from dimension computations.
#[derive(Debug, Error)]
pub enum DimensionError {
    /// An edited dimension was zero.
    #[error("Invalid dimension edit: value must be a positive integer")]
    InvalidEdit,

    /// The source dimensions used for the aspect ratio contain a zero axis.
    #[error("Cannot derive aspect ratio: source dimensions {width}x{height} contain a zero axis")]
    ZeroAspectSource { width: u32, height: u32 },

    /// A natural page viewport dimension was zero or negative.
    #[error("Invalid page viewport: {width}x{height} (dimensions must be positive)")]
    InvalidViewport { width: f32, height: f32 },
}

/// A single-axis edit made by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionEdit {
    /// The width field was set to this value.
    Width(u32),
    /// The height field was set to this value.
    Height(u32),
}

/// Resolve a dimension edit into a consistent (width, height) pair.
///
/// # Arguments
///
/// * `original` - The source image's (width, height); the aspect ratio is
///   always taken from here, never from previously derived values
/// * `current` - The (width, height) currently in the settings form
/// * `edit` - The axis the user changed and its new value
/// * `keep_aspect_ratio` - Whether the untouched axis should be derived
///
/// # Returns
///
/// The new (width, height) pair. With the lock off, the untouched axis keeps
/// its current value verbatim.
///
/// # Errors
///
/// Returns `DimensionError::InvalidEdit` for a zero edit value, and
/// `DimensionError::ZeroAspectSource` if the lock is on but the original
/// axis needed for the ratio is zero (rather than dividing by zero).
pub fn resolve_dimensions(
    original: (u32, u32),
    current: (u32, u32),
    edit: DimensionEdit,
    keep_aspect_ratio: bool,
) -> Result<(u32, u32), DimensionError> {
    let value = match edit {
        DimensionEdit::Width(v) | DimensionEdit::Height(v) => v,
    };
    if value == 0 {
        return Err(DimensionError::InvalidEdit);
    }

    if !keep_aspect_ratio {
        return Ok(match edit {
            DimensionEdit::Width(v) => (v, current.1),
            DimensionEdit::Height(v) => (current.0, v),
        });
    }

    let (original_width, original_height) = original;
    match edit {
        DimensionEdit::Width(v) => {
            let derived = derive_axis(v, original_height, original_width, original)?;
            Ok((v, derived))
        }
        DimensionEdit::Height(v) => {
            let derived = derive_axis(v, original_width, original_height, original)?;
            Ok((derived, v))
        }
    }
}

/// Derive the untouched axis as `round(edited * original_other / original_edited)`.
fn derive_axis(
    edited: u32,
    original_other: u32,
    original_edited: u32,
    original: (u32, u32),
) -> Result<u32, DimensionError> {
    if original_edited == 0 || original_other == 0 {
        return Err(DimensionError::ZeroAspectSource {
            width: original.0,
            height: original.1,
        });
    }
    let derived = (edited as f64 * original_other as f64 / original_edited as f64).round() as u32;
    Ok(derived.max(1))
}

/// Compute the uniform scale that fits a page inside a target box.
///
/// The scale is `min(target_width / natural_width, target_height /
/// natural_height)`, applied independently per page so documents with
/// heterogeneous page sizes each keep their own aspect ratio.
///
/// # Errors
///
/// Returns `DimensionError::InvalidViewport` if either natural dimension is
/// zero or negative.
pub fn fit_scale(
    target_width: f32,
    target_height: f32,
    natural_width: f32,
    natural_height: f32,
) -> Result<f32, DimensionError> {
    if !(natural_width > 0.0 && natural_height > 0.0) {
        return Err(DimensionError::InvalidViewport {
            width: natural_width,
            height: natural_height,
        });
    }
    Ok((target_width / natural_width).min(target_height / natural_height))
}

/// Pixel dimensions of a page rendered at the given scale.
///
/// Each axis is `round(natural * scale)` with no further rounding, clamped
/// to at least one pixel.
pub fn scaled_size(natural_width: f32, natural_height: f32, scale: f32) -> (u32, u32) {
    let width = (natural_width as f64 * scale as f64).round() as u32;
    let height = (natural_height as f64 * scale as f64).round() as u32;
    (width.max(1), height.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_edit_derives_height() {
        // 2000x1000 source, width set to 800 -> height 400
        let result = resolve_dimensions((2000, 1000), (2000, 1000), DimensionEdit::Width(800), true);
        assert_eq!(result.unwrap(), (800, 400));
    }

    #[test]
    fn test_height_edit_derives_width() {
        let result = resolve_dimensions((2000, 1000), (800, 400), DimensionEdit::Height(250), true);
        assert_eq!(result.unwrap(), (500, 250));
    }

    #[test]
    fn test_round_trip_uses_original_ratio() {
        // Setting width then restoring height must land back on the source
        // width because the ratio always comes from the original dimensions.
        let original = (2000, 1000);
        let (w1, h1) =
            resolve_dimensions(original, original, DimensionEdit::Width(777), true).unwrap();
        assert_eq!((w1, h1), (777, 389)); // round(777 * 1000 / 2000)

        let (w2, h2) = resolve_dimensions(original, (w1, h1), DimensionEdit::Height(1000), true)
            .unwrap();
        assert_eq!((w2, h2), (2000, 1000));
    }

    #[test]
    fn test_lock_off_takes_values_verbatim() {
        let result =
            resolve_dimensions((2000, 1000), (640, 480), DimensionEdit::Width(333), false);
        assert_eq!(result.unwrap(), (333, 480));

        let result =
            resolve_dimensions((2000, 1000), (640, 480), DimensionEdit::Height(77), false);
        assert_eq!(result.unwrap(), (640, 77));
    }

    #[test]
    fn test_zero_edit_rejected() {
        let result = resolve_dimensions((2000, 1000), (2000, 1000), DimensionEdit::Width(0), true);
        assert!(matches!(result, Err(DimensionError::InvalidEdit)));
    }

    #[test]
    fn test_zero_original_axis_rejected() {
        let result = resolve_dimensions((0, 1000), (100, 100), DimensionEdit::Width(800), true);
        assert!(matches!(result, Err(DimensionError::ZeroAspectSource { .. })));

        // With the lock off the original ratio is never consulted
        let result = resolve_dimensions((0, 0), (100, 100), DimensionEdit::Width(800), false);
        assert_eq!(result.unwrap(), (800, 100));
    }

    #[test]
    fn test_derived_axis_never_zero() {
        // Extreme ratio: 10000x1, width set to 1 -> height rounds to 0 and
        // must be clamped to 1
        let result = resolve_dimensions((10000, 1), (10000, 1), DimensionEdit::Width(1), true);
        assert_eq!(result.unwrap(), (1, 1));
    }

    #[test]
    fn test_fit_scale_constrained_by_width() {
        // Landscape page into an A4 portrait box
        let scale = fit_scale(595.0, 842.0, 1190.0, 842.0).unwrap();
        assert!((scale - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_fit_scale_constrained_by_height() {
        let scale = fit_scale(595.0, 842.0, 595.0, 1684.0).unwrap();
        assert!((scale - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_fit_scale_can_upscale() {
        // Small page grows to fill the box
        let scale = fit_scale(595.0, 842.0, 100.0, 100.0).unwrap();
        assert!((scale - 5.95).abs() < 1e-6);
    }

    #[test]
    fn test_fit_scale_zero_viewport_rejected() {
        assert!(matches!(
            fit_scale(595.0, 842.0, 0.0, 792.0),
            Err(DimensionError::InvalidViewport { .. })
        ));
        assert!(matches!(
            fit_scale(595.0, 842.0, 612.0, 0.0),
            Err(DimensionError::InvalidViewport { .. })
        ));
    }

    #[test]
    fn test_scaled_size_rounds_each_axis_once() {
        let scale = fit_scale(595.0, 842.0, 612.0, 792.0).unwrap();
        let (w, h) = scaled_size(612.0, 792.0, scale);
        assert_eq!(w, (612.0f64 * scale as f64).round() as u32);
        assert_eq!(h, (792.0f64 * scale as f64).round() as u32);
    }

    #[test]
    fn test_scaled_size_minimum_one_pixel() {
        assert_eq!(scaled_size(10.0, 10.0, 0.001), (1, 1));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the derived axis always matches the rounding formula.
        #[test]
        fn prop_derived_axis_matches_formula(
            original_width in 1u32..=10_000,
            original_height in 1u32..=10_000,
            edited in 1u32..=10_000,
        ) {
            let (w, h) = resolve_dimensions(
                (original_width, original_height),
                (original_width, original_height),
                DimensionEdit::Width(edited),
                true,
            ).unwrap();

            prop_assert_eq!(w, edited);
            let expected = (edited as f64 * original_height as f64
                / original_width as f64).round() as u32;
            prop_assert_eq!(h, expected.max(1));
        }

        /// Property: resolved dimensions are always positive.
        #[test]
        fn prop_dimensions_always_positive(
            original_width in 1u32..=10_000,
            original_height in 1u32..=10_000,
            edited in 1u32..=10_000,
            edit_width in any::<bool>(),
            keep_aspect_ratio in any::<bool>(),
        ) {
            let edit = if edit_width {
                DimensionEdit::Width(edited)
            } else {
                DimensionEdit::Height(edited)
            };
            let (w, h) = resolve_dimensions(
                (original_width, original_height),
                (original_width, original_height),
                edit,
                keep_aspect_ratio,
            ).unwrap();
            prop_assert!(w >= 1);
            prop_assert!(h >= 1);
        }

        /// Property: the fit scale never overflows either box axis beyond
        /// the tolerance of one rounding step.
        #[test]
        fn prop_fit_scale_fits_box(
            target_width in 1.0f32..=2000.0,
            target_height in 1.0f32..=2000.0,
            natural_width in 1.0f32..=5000.0,
            natural_height in 1.0f32..=5000.0,
        ) {
            let scale = fit_scale(target_width, target_height, natural_width, natural_height)
                .unwrap();
            prop_assert!(scale > 0.0);
            // Scaled page fits inside the box (up to f32 arithmetic noise)
            prop_assert!(natural_width * scale <= target_width * 1.0001);
            prop_assert!(natural_height * scale <= target_height * 1.0001);
            // The scale is tight: one axis touches its box edge
            let w_ratio = (natural_width * scale) / target_width;
            let h_ratio = (natural_height * scale) / target_height;
            prop_assert!(w_ratio > 0.9999 || h_ratio > 0.9999);
        }
    }
}
