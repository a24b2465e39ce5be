//! Histogram based auto levels.
//!
//! A plane is auto-leveled by discarding the sparsely populated tails of its histogram and
//! stretching the remaining range `[bmin, bmax]` to the full `[0, 255]` scale:
//!
//! ```text
//! threshold = total * 0.0005
//! bmin      = first bin with count > threshold
//! bmax      = last bin with count > threshold
//! out       = (clamp(in, bmin, bmax) - bmin) / (bmax - bmin) * 255
//! ```

use decast_image::ChannelPlane;

use crate::error::AdjustError;
use crate::histogram::{compute_histogram, Histogram};
use crate::parallel;

/// Fraction of the pixel count a bin must exceed to be part of the effective range.
pub const NOISE_FRACTION: f64 = 0.0005;

/// Find the effective dynamic range `[bmin, bmax]` of a histogram.
///
/// Only the bins whose own count exceeds `total * NOISE_FRACTION` are considered.
///
/// # Errors
///
/// Returns [`AdjustError::DegenerateHistogram`] if no bin exceeds the threshold or if the
/// range collapses to a single bin.
pub fn level_bounds(histogram: &Histogram) -> Result<(u8, u8), AdjustError> {
    let threshold = histogram.total() as f64 * NOISE_FRACTION;

    let mut above = histogram.bins_above(threshold);
    let Some(bmin) = above.next() else {
        return Err(AdjustError::DegenerateHistogram { bmin: 0, bmax: 0 });
    };
    let bmax = above.last().unwrap_or(bmin);

    // bins are indexed by an 8-bit sample value
    let (bmin, bmax) = (bmin as u8, bmax as u8);
    if bmax == bmin {
        return Err(AdjustError::DegenerateHistogram { bmin, bmax });
    }

    Ok((bmin, bmax))
}

/// Stretch the effective dynamic range of a plane to the full 8-bit scale.
///
/// The result is truncated to the lower integer level.
///
/// # Errors
///
/// Returns [`AdjustError::DegenerateHistogram`] if the plane has no usable dynamic range,
/// see [`level_bounds`].
///
/// # Example
///
/// ```
/// use decast_image::{ChannelPlane, ImageSize};
/// use decast_imgproc::levels::normalize_levels;
///
/// let plane = ChannelPlane::new(
///     ImageSize { width: 3, height: 1 },
///     vec![50, 100, 150],
/// ).unwrap();
///
/// let leveled = normalize_levels(&plane).unwrap();
/// assert_eq!(leveled.as_slice(), &[0, 127, 255]);
/// ```
pub fn normalize_levels(src: &ChannelPlane) -> Result<ChannelPlane, AdjustError> {
    let (bmin, bmax) = level_bounds(&compute_histogram(src))?;

    let lut = stretch_lut(bmin, bmax);
    let mut dst = ChannelPlane::from_size_val(src.size(), 0)?;
    parallel::par_iter_rows_val(src, &mut dst, |&src_pixel, dst_pixel| {
        *dst_pixel = lut[src_pixel as usize];
    });

    Ok(dst)
}

/// Auto level a plane, leaving planes without usable dynamic range untouched.
///
/// This is [`normalize_levels`] with an identity fallback for
/// [`AdjustError::DegenerateHistogram`], e.g. for a uniformly colored plane.
pub fn auto_level(src: &ChannelPlane) -> Result<ChannelPlane, AdjustError> {
    match normalize_levels(src) {
        Err(AdjustError::DegenerateHistogram { bmin, bmax }) => {
            log::debug!("degenerate histogram [{bmin}, {bmax}], keeping plane unchanged");
            Ok(src.clone())
        }
        res => res,
    }
}

fn stretch_lut(bmin: u8, bmax: u8) -> [u8; 256] {
    let range = (bmax - bmin) as u32;
    std::array::from_fn(|v| {
        let clipped = (v as u32).clamp(bmin as u32, bmax as u32);
        ((clipped - bmin as u32) * 255 / range) as u8
    })
}
