//! Splitting raster images into 8-bit channel planes of a color space and merging them back.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use decast_image::{ChannelPlane, Image, RasterImage};

use super::{hsv_from_rgb, lab_from_rgb, rgb_from_hsv, rgb_from_lab, rgb_from_ycbcr, ycbcr_from_rgb};
use crate::error::{ensure_same_size, AdjustError};

/// Color space used to split an image into channel planes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorSpace {
    /// Red, green, blue.
    #[serde(rename = "RGB")]
    Rgb,
    /// Red, green, blue; merging produces an image with alpha.
    #[serde(rename = "RGBA")]
    Rgba,
    /// Hue, saturation, value.
    #[serde(rename = "HSV")]
    Hsv,
    /// CIE L*a*b*, D65.
    #[serde(rename = "LAB")]
    Lab,
    /// Full range luma and chroma differences.
    #[serde(rename = "YCbCr")]
    YCbCr,
}

impl ColorSpace {
    /// Canonical name of the color space.
    pub const fn name(&self) -> &'static str {
        match self {
            ColorSpace::Rgb => "RGB",
            ColorSpace::Rgba => "RGBA",
            ColorSpace::Hsv => "HSV",
            ColorSpace::Lab => "LAB",
            ColorSpace::YCbCr => "YCbCr",
        }
    }
}

impl std::fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorSpace {
    type Err = AdjustError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RGB" => Ok(ColorSpace::Rgb),
            "RGBA" => Ok(ColorSpace::Rgba),
            "HSV" => Ok(ColorSpace::Hsv),
            "LAB" => Ok(ColorSpace::Lab),
            "YCBCR" => Ok(ColorSpace::YCbCr),
            _ => Err(AdjustError::InvalidArgument(format!(
                "unknown color space '{s}'"
            ))),
        }
    }
}

/// The three color planes of an image in some color space plus its alpha plane.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelPlanes {
    /// The color planes, in the channel order of the color space.
    pub planes: [ChannelPlane; 3],
    /// The alpha plane; fully opaque when the source image had no alpha.
    pub alpha: ChannelPlane,
}

/// Split an image into the channel planes of a color space.
///
/// The alpha channel is passed through unconverted. Images without alpha get an opaque
/// (255) alpha plane.
///
/// # Arguments
///
/// * `image` - The image to split.
/// * `space` - The color space of the resulting planes.
///
/// # Example
///
/// ```
/// use decast_image::{ColorMode, ImageSize, RasterImage};
/// use decast_imgproc::color::{split, ColorSpace};
///
/// let image = RasterImage::new(
///     ImageSize { width: 1, height: 1 },
///     ColorMode::Rgb,
///     vec![255, 0, 0],
/// ).unwrap();
///
/// let hsv = split(&image, ColorSpace::Hsv).unwrap();
/// assert_eq!(hsv.planes[1].as_slice(), &[255]);
/// assert_eq!(hsv.alpha.as_slice(), &[255]);
/// ```
pub fn split(image: &RasterImage, space: ColorSpace) -> Result<ChannelPlanes, AdjustError> {
    let alpha = match image.alpha() {
        Some(alpha) => alpha,
        None => ChannelPlane::from_size_val(image.size(), 255)?,
    };

    let rgb = image.to_rgb();
    let converted = match space {
        ColorSpace::Rgb | ColorSpace::Rgba => rgb,
        ColorSpace::Hsv => convert(&rgb, hsv_from_rgb)?,
        ColorSpace::Lab => convert(&rgb, lab_from_rgb)?,
        ColorSpace::YCbCr => convert(&rgb, ycbcr_from_rgb)?,
    };

    Ok(ChannelPlanes {
        planes: converted.split_channels(),
        alpha,
    })
}

/// Merge channel planes of a color space back into an image.
///
/// Non RGB color spaces are converted back to RGB. Merging in [`ColorSpace::Rgba`] produces
/// an image with the alpha plane attached; every other color space produces an RGB image.
///
/// # Errors
///
/// Returns [`AdjustError::DimensionMismatch`] if the planes do not share the same size.
pub fn merge(planes: &ChannelPlanes, space: ColorSpace) -> Result<RasterImage, AdjustError> {
    let size = planes.planes[0].size();
    for plane in planes.planes.iter().chain(std::iter::once(&planes.alpha)) {
        ensure_same_size(size, plane.size())?;
    }

    let [c1, c2, c3] = &planes.planes;
    let merged = Image::<u8, 3>::from_channels([c1, c2, c3])?;

    let rgb = match space {
        ColorSpace::Rgb | ColorSpace::Rgba => merged,
        ColorSpace::Hsv => convert(&merged, rgb_from_hsv)?,
        ColorSpace::Lab => convert(&merged, rgb_from_lab)?,
        ColorSpace::YCbCr => convert(&merged, rgb_from_ycbcr)?,
    };

    match space {
        ColorSpace::Rgba => Ok(RasterImage::from(rgb).with_alpha(&planes.alpha)?),
        _ => Ok(RasterImage::Rgb(rgb)),
    }
}

fn convert(
    src: &Image<u8, 3>,
    f: fn(&Image<u8, 3>, &mut Image<u8, 3>) -> Result<(), decast_image::ImageError>,
) -> Result<Image<u8, 3>, AdjustError> {
    let mut dst = Image::<u8, 3>::from_size_val(src.size(), 0)?;
    f(src, &mut dst)?;
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use decast_image::{ColorMode, ImageSize};

    fn raster(width: usize, height: usize, mode: ColorMode, data: Vec<u8>) -> RasterImage {
        match RasterImage::new(ImageSize { width, height }, mode, data) {
            Ok(image) => image,
            Err(e) => panic!("invalid test image: {e}"),
        }
    }

    fn assert_close(a: &RasterImage, b: &RasterImage, tol: i32) {
        assert_eq!(a.size(), b.size());
        assert_eq!(a.mode(), b.mode());
        for (i, (x, y)) in a.as_slice().iter().zip(b.as_slice()).enumerate() {
            assert!(
                (*x as i32 - *y as i32).abs() <= tol,
                "sample {i}: {x} vs {y} (tolerance {tol})"
            );
        }
    }

    #[test]
    fn color_space_from_str() -> Result<(), AdjustError> {
        assert_eq!("rgb".parse::<ColorSpace>()?, ColorSpace::Rgb);
        assert_eq!("RGBA".parse::<ColorSpace>()?, ColorSpace::Rgba);
        assert_eq!("HSV".parse::<ColorSpace>()?, ColorSpace::Hsv);
        assert_eq!("Lab".parse::<ColorSpace>()?, ColorSpace::Lab);
        assert_eq!("YCbCr".parse::<ColorSpace>()?, ColorSpace::YCbCr);
        assert!(matches!(
            "CMYK".parse::<ColorSpace>(),
            Err(AdjustError::InvalidArgument(_))
        ));
        assert_eq!(ColorSpace::YCbCr.to_string(), "YCbCr");
        Ok(())
    }

    #[test]
    fn split_rgb_defaults_alpha_to_opaque() -> Result<(), AdjustError> {
        let image = raster(2, 1, ColorMode::Rgb, vec![1, 2, 3, 4, 5, 6]);
        let planes = split(&image, ColorSpace::Rgb)?;
        assert_eq!(planes.planes[0].as_slice(), &[1, 4]);
        assert_eq!(planes.planes[1].as_slice(), &[2, 5]);
        assert_eq!(planes.planes[2].as_slice(), &[3, 6]);
        assert_eq!(planes.alpha.as_slice(), &[255, 255]);
        Ok(())
    }

    #[test]
    fn split_passes_alpha_through() -> Result<(), AdjustError> {
        let image = raster(2, 1, ColorMode::Rgba, vec![10, 20, 30, 40, 50, 60, 70, 80]);
        for space in [ColorSpace::Rgba, ColorSpace::Hsv, ColorSpace::Lab] {
            let planes = split(&image, space)?;
            assert_eq!(planes.alpha.as_slice(), &[40, 80], "space {space}");
        }
        Ok(())
    }

    #[test]
    fn rgba_round_trip_is_exact() -> Result<(), AdjustError> {
        let image = raster(2, 1, ColorMode::Rgba, vec![10, 20, 30, 40, 50, 60, 70, 80]);
        let merged = merge(&split(&image, ColorSpace::Rgba)?, ColorSpace::Rgba)?;
        assert_eq!(merged, image);
        Ok(())
    }

    #[test]
    fn rgb_round_trip_is_exact() -> Result<(), AdjustError> {
        let data: Vec<u8> = (0..48u8).map(|v| v.wrapping_mul(37)).collect();
        let image = raster(4, 4, ColorMode::Rgb, data);
        let merged = merge(&split(&image, ColorSpace::Rgb)?, ColorSpace::Rgb)?;
        assert_eq!(merged, image);
        Ok(())
    }

    #[test]
    fn ycbcr_round_trip() -> Result<(), AdjustError> {
        let data: Vec<u8> = (0..(16 * 16 * 3)).map(|v| ((v * 97) % 256) as u8).collect();
        let image = raster(16, 16, ColorMode::Rgb, data);
        let merged = merge(&split(&image, ColorSpace::YCbCr)?, ColorSpace::YCbCr)?;
        assert_close(&merged, &image, 1);
        Ok(())
    }

    #[test]
    fn hsv_round_trip() -> Result<(), AdjustError> {
        // neutral, primary and low chroma colors survive the 8-bit hue quantization
        let image = raster(
            4,
            2,
            ColorMode::Rgb,
            vec![
                0, 0, 0, 128, 128, 128, 255, 255, 255, 255, 0, 0, //
                0, 255, 0, 0, 0, 255, 130, 128, 126, 90, 94, 92,
            ],
        );
        let merged = merge(&split(&image, ColorSpace::Hsv)?, ColorSpace::Hsv)?;
        assert_close(&merged, &image, 1);
        Ok(())
    }

    #[test]
    fn lab_round_trip_neutral() -> Result<(), AdjustError> {
        let data: Vec<u8> = (0..=255u8).flat_map(|v| [v, v, v]).collect();
        let image = raster(16, 16, ColorMode::Rgb, data);
        let merged = merge(&split(&image, ColorSpace::Lab)?, ColorSpace::Lab)?;
        assert_close(&merged, &image, 1);
        Ok(())
    }

    #[test]
    fn lab_round_trip_chromatic() -> Result<(), AdjustError> {
        // 16 levels per channel, 4096 colors
        let levels: Vec<u8> = (0..16u8).map(|v| v * 17).collect();
        let data: Vec<u8> = levels
            .iter()
            .flat_map(|&r| levels.iter().map(move |&g| (r, g)))
            .flat_map(|(r, g)| levels.iter().flat_map(move |&b| [r, g, b]))
            .collect();
        let image = raster(64, 64, ColorMode::Rgb, data);
        let merged = merge(&split(&image, ColorSpace::Lab)?, ColorSpace::Lab)?;

        let src_pixels = image.as_slice().chunks_exact(3);
        let dst_pixels = merged.as_slice().chunks_exact(3);
        for (src, dst) in src_pixels.zip(dst_pixels) {
            let err = src
                .iter()
                .zip(dst)
                .map(|(&x, &y)| (x as i32 - y as i32).abs())
                .max()
                .unwrap_or(0);
            // quantized L, a and b are amplified by the steep sRGB curve near black
            assert!(err <= 26, "{src:?} -> {dst:?}");
            if src.iter().all(|&v| v >= 170) {
                assert!(err <= 2, "{src:?} -> {dst:?}");
            }
        }
        Ok(())
    }

    #[test]
    fn merge_rejects_mismatched_planes() -> Result<(), AdjustError> {
        let image = raster(2, 2, ColorMode::Rgb, vec![0; 12]);
        let mut planes = split(&image, ColorSpace::Rgb)?;
        planes.planes[1] = ChannelPlane::from_size_val([3, 2].into(), 0)?;

        assert_eq!(
            merge(&planes, ColorSpace::Rgb),
            Err(AdjustError::DimensionMismatch {
                expected: [2, 2].into(),
                actual: [3, 2].into(),
            })
        );
        Ok(())
    }

    #[test]
    fn merge_non_rgb_space_returns_rgb() -> Result<(), AdjustError> {
        let image = raster(1, 1, ColorMode::Rgba, vec![10, 200, 30, 99]);
        let merged = merge(&split(&image, ColorSpace::YCbCr)?, ColorSpace::YCbCr)?;
        assert_eq!(merged.mode(), ColorMode::Rgb);
        Ok(())
    }
}
