//! The automatic color-cast correction pipeline.
//!
//! Stages run in a fixed order on fresh buffers:
//!
//! 1. auto-level the planes selected by the [`ProcessingMode`],
//! 2. per-channel gamma balance (skipped in [`ProcessingMode::Mono`]),
//! 3. brightness, contrast and saturation enhancement,
//! 4. normal blend of the result over the original at `strength` opacity,
//! 5. reattach the original alpha plane.

use rayon::prelude::*;

use decast_image::{ChannelPlane, Image, RasterImage};

use crate::blend::{blend_rgb, BlendMode};
use crate::color::{gray_from_rgb_u8, merge, rgb_from_gray, split, ColorSpace};
use crate::enhance::enhance;
use crate::error::AdjustError;
use crate::gamma::{apply_gamma, balance_to_gamma};
use crate::levels::auto_level;
use crate::params::{AdjustmentParams, ProcessingMode};

/// Index of the saturation plane of [`ColorSpace::Hsv`].
const HSV_SATURATION: usize = 1;

/// Index of the luminance plane of [`ColorSpace::Lab`].
const LAB_LUMINANCE: usize = 0;

/// Automatically correct the color cast of an image.
///
/// The parameters are clamped to their valid ranges first. The output has the size and the
/// alpha presence of the input; with `strength = 0` it is identical to the input.
///
/// # Arguments
///
/// * `image` - The image to correct.
/// * `params` - The adjustment parameters.
///
/// # Example
///
/// ```
/// use decast_image::{ColorMode, ImageSize, RasterImage};
/// use decast_imgproc::{auto_adjust, AdjustmentParams};
///
/// let image = RasterImage::new(
///     ImageSize { width: 2, height: 1 },
///     ColorMode::Rgba,
///     vec![10, 20, 30, 255, 110, 120, 130, 128],
/// ).unwrap();
///
/// let adjusted = auto_adjust(&image, &AdjustmentParams::default()).unwrap();
/// assert_eq!(adjusted.as_slice(), &[0, 0, 0, 255, 255, 255, 255, 128]);
/// ```
pub fn auto_adjust(
    image: &RasterImage,
    params: &AdjustmentParams,
) -> Result<RasterImage, AdjustError> {
    let params = params.clamped();
    log::debug!(
        "auto adjust {}x{} {} image with {params:?}",
        image.width(),
        image.height(),
        image.mode()
    );

    let original = image.to_rgb();

    let leveled = normalize(&original, params.mode)?;
    log::debug!("normalized levels in mode '{}'", params.mode);

    let balanced = match params.mode {
        ProcessingMode::Mono => leveled,
        _ => balance(leveled, [params.red, params.green, params.blue])?,
    };

    let enhanced = enhance(
        &balanced,
        params.brightness,
        params.contrast,
        params.saturation,
    )?;
    log::debug!(
        "enhanced brightness {}, contrast {}, saturation {}",
        params.brightness,
        params.contrast,
        params.saturation
    );

    let mut blended = Image::<u8, 3>::from_size_val(original.size(), 0)?;
    blend_rgb(
        &original,
        &enhanced,
        BlendMode::Normal,
        params.strength as f32,
        &mut blended,
    )?;
    log::debug!("blended over original at strength {}", params.strength);

    match image.alpha() {
        Some(alpha) => Ok(RasterImage::from(blended).with_alpha(&alpha)?),
        None => Ok(RasterImage::Rgb(blended)),
    }
}

/// Stage 1: auto-level the planes selected by `mode`.
fn normalize(rgb: &Image<u8, 3>, mode: ProcessingMode) -> Result<Image<u8, 3>, AdjustError> {
    match mode {
        ProcessingMode::Rgb => {
            let mut planes = split(&RasterImage::Rgb(rgb.clone()), ColorSpace::Rgb)?;
            planes.planes.par_iter_mut().try_for_each(|plane| {
                *plane = auto_level(plane)?;
                Ok::<_, AdjustError>(())
            })?;
            Ok(merge(&planes, ColorSpace::Rgb)?.into_rgb())
        }
        ProcessingMode::LumSat => {
            let saturated = level_plane(rgb, ColorSpace::Hsv, HSV_SATURATION)?;
            level_plane(&saturated, ColorSpace::Lab, LAB_LUMINANCE)
        }
        ProcessingMode::Luminance => level_plane(rgb, ColorSpace::Lab, LAB_LUMINANCE),
        ProcessingMode::Saturation => level_plane(rgb, ColorSpace::Hsv, HSV_SATURATION),
        ProcessingMode::Mono => {
            let mut gray = ChannelPlane::from_size_val(rgb.size(), 0)?;
            gray_from_rgb_u8(rgb, &mut gray)?;
            let gray = auto_level(&gray)?;

            let mut out = Image::<u8, 3>::from_size_val(rgb.size(), 0)?;
            rgb_from_gray(&gray, &mut out)?;
            Ok(out)
        }
    }
}

/// Auto-level a single plane of `space` and convert the result back to RGB.
fn level_plane(
    rgb: &Image<u8, 3>,
    space: ColorSpace,
    index: usize,
) -> Result<Image<u8, 3>, AdjustError> {
    let mut planes = split(&RasterImage::Rgb(rgb.clone()), space)?;
    planes.planes[index] = auto_level(&planes.planes[index])?;
    Ok(merge(&planes, space)?.into_rgb())
}

/// Stage 2: gamma balance of the red, green and blue channels.
fn balance(rgb: Image<u8, 3>, balances: [i32; 3]) -> Result<Image<u8, 3>, AdjustError> {
    if balances.iter().all(|&b| b == 0) {
        return Ok(rgb);
    }

    let mut planes = rgb.split_channels();
    planes
        .par_iter_mut()
        .zip(balances.par_iter())
        .try_for_each(|(plane, &balance)| {
            if balance != 0 {
                let gamma = balance_to_gamma(balance);
                log::trace!("channel balance {balance}, gamma {gamma}");
                *plane = apply_gamma(plane, gamma)?;
            }
            Ok::<_, AdjustError>(())
        })?;

    let [r, g, b] = &planes;
    Ok(Image::from_channels([r, g, b])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use decast_image::{ColorMode, ImageSize};

    fn ramp() -> Result<Image<u8, 3>, AdjustError> {
        let data = (0..=255u8).flat_map(|v| [v, v, v]).collect();
        Ok(Image::new(
            ImageSize {
                width: 256,
                height: 1,
            },
            data,
        )?)
    }

    /// A warm, low contrast gradient: LAB L in about `[99, 160]`, HSV S in about `[76, 97]`.
    fn warm_ramp() -> Result<Image<u8, 3>, AdjustError> {
        let data = (0..64u8)
            .flat_map(|v| [100 + v, 90 + v, 70 + v / 2])
            .collect();
        Ok(Image::new(
            ImageSize {
                width: 64,
                height: 1,
            },
            data,
        )?)
    }

    /// Minimum and maximum of one plane of `space`.
    fn plane_span(
        rgb: &Image<u8, 3>,
        space: ColorSpace,
        index: usize,
    ) -> Result<(u8, u8), AdjustError> {
        let planes = split(&RasterImage::Rgb(rgb.clone()), space)?;
        let plane = planes.planes[index].as_slice();
        let min = plane.iter().copied().min().unwrap_or(0);
        let max = plane.iter().copied().max().unwrap_or(0);
        Ok((min, max))
    }

    #[test]
    fn test_normalize_rgb_stretches_each_channel() -> Result<(), AdjustError> {
        let rgb = Image::<u8, 3>::new([2, 1].into(), vec![10, 50, 0, 20, 150, 0])?;
        let out = normalize(&rgb, ProcessingMode::Rgb)?;
        // blue is uniform and left unchanged
        assert_eq!(out.as_slice(), &[0, 0, 0, 255, 255, 0]);
        Ok(())
    }

    #[test]
    fn test_normalize_mono_is_gray() -> Result<(), AdjustError> {
        let rgb = Image::<u8, 3>::new([2, 1].into(), vec![200, 10, 10, 10, 200, 10])?;
        let out = normalize(&rgb, ProcessingMode::Mono)?;
        for px in out.as_slice().chunks_exact(3) {
            assert!(px[0] == px[1] && px[1] == px[2]);
        }
        assert_eq!(out.as_slice(), &[0, 0, 0, 255, 255, 255]);
        Ok(())
    }

    #[test]
    fn test_normalize_gray_ramp_all_modes() -> Result<(), AdjustError> {
        let rgb = ramp()?;
        for mode in [
            ProcessingMode::Rgb,
            ProcessingMode::Saturation,
            ProcessingMode::Mono,
        ] {
            assert_eq!(normalize(&rgb, mode)?, rgb, "mode {mode}");
        }
        Ok(())
    }

    #[test]
    fn test_normalize_luminance_stretches_lab_l() -> Result<(), AdjustError> {
        let rgb = warm_ramp()?;
        let (lo, hi) = plane_span(&rgb, ColorSpace::Lab, LAB_LUMINANCE)?;
        assert!(lo >= 90 && hi <= 170, "input L span [{lo}, {hi}]");

        let out = normalize(&rgb, ProcessingMode::Luminance)?;
        let (lo, hi) = plane_span(&out, ColorSpace::Lab, LAB_LUMINANCE)?;
        assert!(lo <= 8, "output L min {lo}");
        assert!(hi >= 245, "output L max {hi}");

        // darkest and brightest pixels move towards black and white
        assert!(out.as_slice()[..3].iter().all(|&v| v <= 30));
        assert!(out.as_slice()[63 * 3..63 * 3 + 2].iter().all(|&v| v >= 245));
        Ok(())
    }

    #[test]
    fn test_normalize_lum_sat_levels_saturation_then_luminance() -> Result<(), AdjustError> {
        let rgb = warm_ramp()?;

        let saturated = level_plane(&rgb, ColorSpace::Hsv, HSV_SATURATION)?;
        let (lo, hi) = plane_span(&saturated, ColorSpace::Hsv, HSV_SATURATION)?;
        assert!(lo <= 8 && hi >= 245, "saturation span [{lo}, {hi}]");

        let out = normalize(&rgb, ProcessingMode::LumSat)?;
        assert_eq!(
            out,
            level_plane(&saturated, ColorSpace::Lab, LAB_LUMINANCE)?
        );
        assert_ne!(out, normalize(&rgb, ProcessingMode::Luminance)?);

        let (lo, hi) = plane_span(&out, ColorSpace::Lab, LAB_LUMINANCE)?;
        assert!(lo <= 8 && hi >= 240, "output L span [{lo}, {hi}]");
        Ok(())
    }

    #[test]
    fn test_balance_only_touches_nonzero_channels() -> Result<(), AdjustError> {
        let rgb = ramp()?;
        let out = balance(rgb.clone(), [0, -100, 0])?;

        let src_pixels = rgb.as_slice().chunks_exact(3);
        let dst_pixels = out.as_slice().chunks_exact(3);
        for (src, dst) in src_pixels.zip(dst_pixels) {
            assert_eq!(src[0], dst[0]);
            assert!(dst[1] <= src[1]);
            assert_eq!(src[2], dst[2]);
        }
        assert_eq!(balance(rgb.clone(), [0, 0, 0])?, rgb);
        Ok(())
    }

    #[test]
    fn test_auto_adjust_mono_keeps_alpha() -> Result<(), AdjustError> {
        let image = RasterImage::new(
            [2, 1].into(),
            ColorMode::Rgba,
            vec![200, 10, 10, 3, 10, 200, 10, 250],
        )?;
        let params = AdjustmentParams::default().with_mode(ProcessingMode::Mono);
        let out = auto_adjust(&image, &params)?;
        assert_eq!(out.mode(), ColorMode::Rgba);
        assert_eq!(out.as_slice(), &[0, 0, 0, 3, 255, 255, 255, 250]);
        Ok(())
    }
}
