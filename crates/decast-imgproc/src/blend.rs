use std::str::FromStr;

use serde::{Deserialize, Serialize};

use decast_image::{Image, RasterImage};

use crate::error::{ensure_same_size, AdjustError};
use crate::parallel;

/// Rule used to combine a layer with the background before the opacity blend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    /// The layer replaces the background.
    #[default]
    Normal,
    /// `background * layer / 255`, always darker.
    Multiply,
    /// Inverse of multiplying the inverted images, always lighter.
    Screen,
    /// Multiply in the shadows of the background, screen in its highlights.
    Overlay,
}

impl BlendMode {
    /// Canonical name of the blend mode.
    pub const fn name(&self) -> &'static str {
        match self {
            BlendMode::Normal => "normal",
            BlendMode::Multiply => "multiply",
            BlendMode::Screen => "screen",
            BlendMode::Overlay => "overlay",
        }
    }

    /// Combine a background sample with a layer sample.
    #[inline]
    fn combine(&self, bg: u8, layer: u8) -> u8 {
        let (bg, layer) = (bg as u32, layer as u32);
        let out = match self {
            BlendMode::Normal => layer,
            BlendMode::Multiply => bg * layer / 255,
            BlendMode::Screen => 255 - (255 - bg) * (255 - layer) / 255,
            BlendMode::Overlay if bg < 128 => 2 * bg * layer / 255,
            BlendMode::Overlay => 255 - 2 * (255 - bg) * (255 - layer) / 255,
        };
        out as u8
    }
}

impl std::fmt::Display for BlendMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlendMode {
    type Err = AdjustError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(BlendMode::Normal),
            "multiply" => Ok(BlendMode::Multiply),
            "screen" => Ok(BlendMode::Screen),
            "overlay" => Ok(BlendMode::Overlay),
            _ => Err(AdjustError::InvalidArgument(format!(
                "unknown blend mode '{s}'"
            ))),
        }
    }
}

/// Linear interpolation between two samples, truncated and clamped to `[0, 255]`.
///
/// `alpha = 0` yields `a` and `alpha = 1` yields `b`; factors outside `[0, 1]` extrapolate.
#[inline]
pub(crate) fn lerp_u8(a: u8, b: u8, alpha: f32) -> u8 {
    let a = a as f32;
    (a + alpha * (b as f32 - a)).clamp(0.0, 255.0) as u8
}

/// Blend a layer over a background RGB image.
///
/// Each sample is first combined with the blend mode rule and the combination is then mixed
/// with the background at `alpha = opacity / 100`:
///
/// dst = background + alpha * (mode(background, layer) - background)
///
/// # Arguments
///
/// * `background` - The background image.
/// * `layer` - The layer image, same size as the background.
/// * `mode` - The blend mode.
/// * `opacity` - The layer opacity in `[0, 100]`; values outside are clamped.
/// * `dst` - The output image, same size as the background.
///
/// # Errors
///
/// Returns [`AdjustError::DimensionMismatch`] if the sizes differ and
/// [`AdjustError::InvalidArgument`] if `opacity` is NaN.
pub fn blend_rgb(
    background: &Image<u8, 3>,
    layer: &Image<u8, 3>,
    mode: BlendMode,
    opacity: f32,
    dst: &mut Image<u8, 3>,
) -> Result<(), AdjustError> {
    ensure_same_size(background.size(), layer.size())?;
    ensure_same_size(background.size(), dst.size())?;

    if opacity.is_nan() {
        return Err(AdjustError::InvalidArgument(
            "opacity must not be NaN".to_string(),
        ));
    }
    let alpha = opacity.clamp(0.0, 100.0) / 100.0;

    parallel::par_iter_rows_val_two(background, layer, dst, |&bg, &fg, out| {
        *out = lerp_u8(bg, mode.combine(bg, fg), alpha);
    });

    Ok(())
}

/// Blend a layer over a background image.
///
/// Images with alpha are reduced to RGB before blending and the result is always RGB. See
/// [`blend_rgb`] for the blending rule.
///
/// # Example
///
/// ```
/// use decast_image::{ColorMode, ImageSize, RasterImage};
/// use decast_imgproc::blend::{blend, BlendMode};
///
/// let size = ImageSize { width: 1, height: 1 };
/// let bg = RasterImage::new(size, ColorMode::Rgb, vec![0, 100, 200]).unwrap();
/// let layer = RasterImage::new(size, ColorMode::Rgb, vec![200, 100, 0]).unwrap();
///
/// let out = blend(&bg, &layer, BlendMode::Normal, 50.0).unwrap();
/// assert_eq!(out.as_slice(), &[100, 100, 100]);
/// ```
pub fn blend(
    background: &RasterImage,
    layer: &RasterImage,
    mode: BlendMode,
    opacity: f32,
) -> Result<RasterImage, AdjustError> {
    ensure_same_size(background.size(), layer.size())?;

    let background = background.to_rgb();
    let layer = layer.to_rgb();

    let mut dst = Image::<u8, 3>::from_size_val(background.size(), 0)?;
    blend_rgb(&background, &layer, mode, opacity, &mut dst)?;

    Ok(RasterImage::Rgb(dst))
}
