//! Size-constrained quality search.
//!
//! The shared control loop behind both pipelines: encode at the current
//! quality, measure, and step the quality down until the output fits under
//! the size ceiling or the attempt budget runs out. The encode step is a
//! closure so the same loop drives a single-image encode and a full
//! render-and-assemble pass over a document.
//!
//! Exhausting the budget is not an error: the last buffer is still returned,
//! annotated with `met_requirement = false` so the host can warn the user.

use log::{debug, warn};

/// Maximum number of retries after the initial encode.
pub const MAX_ATTEMPTS: u32 = 10;

/// Amount the quality drops on each retry.
pub const QUALITY_STEP: f32 = 0.1;

/// Floor the quality is clamped to when a step would reach zero or below.
pub const MIN_QUALITY: f32 = 0.01;

/// The result of a processing invocation.
#[derive(Debug, Clone)]
pub struct ProcessedOutput {
    /// The encoded output.
    pub bytes: Vec<u8>,
    /// Size of `bytes` in kilobytes (byte length / 1024, unrounded).
    pub size_kb: f64,
    /// Whether the size ceiling was satisfied. Lossless outputs are exempt
    /// from the ceiling and always report true.
    pub met_requirement: bool,
}

impl ProcessedOutput {
    fn new(bytes: Vec<u8>, met_requirement: bool) -> Self {
        let size_kb = size_kb(&bytes);
        Self {
            bytes,
            size_kb,
            met_requirement,
        }
    }
}

/// Size of a buffer in kilobytes, without rounding.
#[inline]
pub fn size_kb(bytes: &[u8]) -> f64 {
    bytes.len() as f64 / 1024.0
}

/// Search for the highest quality whose output fits under the ceiling.
///
/// Encodes once at `start_quality`; while the result exceeds `max_size_kb`
/// and retries remain, drops the quality by [`QUALITY_STEP`] (clamping to
/// [`MIN_QUALITY`] if the step would reach zero or below) and encodes again.
/// At most [`MAX_ATTEMPTS`] retries follow the initial encode.
///
/// Each call to `encode` owns its attempt completely; the previous attempt's
/// buffer is dropped before the next one is produced. An encode error aborts
/// the search immediately rather than returning a stale buffer.
pub fn search_quality<F, E>(
    start_quality: f32,
    max_size_kb: f64,
    mut encode: F,
) -> Result<ProcessedOutput, E>
where
    F: FnMut(f32) -> Result<Vec<u8>, E>,
{
    let mut quality = start_quality;
    let mut bytes = encode(quality)?;
    let mut attempt = 0u32;
    debug!(
        "attempt 0: {:.1} KB at quality {:.2} (ceiling {:.1} KB)",
        size_kb(&bytes),
        quality,
        max_size_kb
    );

    while size_kb(&bytes) > max_size_kb && attempt < MAX_ATTEMPTS {
        quality -= QUALITY_STEP;
        if quality <= 0.0 {
            quality = MIN_QUALITY;
        }
        bytes = encode(quality)?;
        attempt += 1;
        debug!(
            "attempt {}: {:.1} KB at quality {:.2}",
            attempt,
            size_kb(&bytes),
            quality
        );
    }

    let met_requirement = size_kb(&bytes) <= max_size_kb;
    if !met_requirement {
        warn!(
            "size requirement not met after {} attempts: {:.1} KB > {:.1} KB",
            attempt + 1,
            size_kb(&bytes),
            max_size_kb
        );
    }

    Ok(ProcessedOutput::new(bytes, met_requirement))
}

/// Encode exactly once, outside the quality search.
///
/// For formats with no quality dimension the search is meaningless: the
/// single encode is the result, exempt from the ceiling and never flagged.
pub fn encode_once<F, E>(quality: f32, mut encode: F) -> Result<ProcessedOutput, E>
where
    F: FnMut(f32) -> Result<Vec<u8>, E>,
{
    let bytes = encode(quality)?;
    debug!("single encode: {:.1} KB", size_kb(&bytes));
    Ok(ProcessedOutput::new(bytes, true))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
