use decast_image::ChannelPlane;

use crate::error::AdjustError;
use crate::parallel;

/// Map a color balance value to a gamma exponent.
///
/// ```text
/// gamma = 0.00005 * balance^2 - 0.01 * balance + 1
/// ```
///
/// Positive balances give `gamma < 1` which brightens the channel, negative balances give
/// `gamma > 1` which darkens it. `balance = 0` maps to exactly `1.0`.
///
/// # Example
///
/// ```
/// use decast_imgproc::gamma::balance_to_gamma;
///
/// assert_eq!(balance_to_gamma(0), 1.0);
/// assert!((balance_to_gamma(100) - 0.5).abs() < 1e-12);
/// assert!((balance_to_gamma(-100) - 2.0).abs() < 1e-12);
/// ```
pub fn balance_to_gamma(balance: i32) -> f64 {
    let balance = balance as f64;
    0.00005 * balance * balance - 0.01 * balance + 1.0
}

/// Apply a gamma curve to a channel plane.
///
/// ```text
/// out = floor(255 * (in / 255) ^ gamma)
/// ```
///
/// A gamma of exactly `1.0` returns an identical copy of the plane.
///
/// # Arguments
///
/// * `src` - The input plane.
/// * `gamma` - The gamma exponent, must be finite and positive.
///
/// # Errors
///
/// Returns [`AdjustError::InvalidArgument`] if `gamma` is not finite or not positive.
pub fn apply_gamma(src: &ChannelPlane, gamma: f64) -> Result<ChannelPlane, AdjustError> {
    if !gamma.is_finite() || gamma <= 0.0 {
        return Err(AdjustError::InvalidArgument(format!(
            "gamma must be finite and positive, got {gamma}"
        )));
    }

    if gamma == 1.0 {
        return Ok(src.clone());
    }

    let lut = gamma_lut(gamma);
    let mut dst = ChannelPlane::from_size_val(src.size(), 0)?;
    parallel::par_iter_rows_val(src, &mut dst, |&src_pixel, dst_pixel| {
        *dst_pixel = lut[src_pixel as usize];
    });

    Ok(dst)
}

fn gamma_lut(gamma: f64) -> [u8; 256] {
    std::array::from_fn(|v| {
        let out = (v as f64 / 255.0).powf(gamma) * 255.0;
        out.clamp(0.0, 255.0) as u8
    })
}
