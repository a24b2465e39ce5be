use crate::{
    error::ImageError,
    image::{Image, ImageSize},
};

/// A single 8-bit channel plane, e.g. the red plane or the hue plane of an image.
pub type ChannelPlane = Image<u8, 1>;

/// Pixel layout of a [`RasterImage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    /// Three 8-bit channels: red, green, blue.
    Rgb,
    /// Four 8-bit channels: red, green, blue, alpha.
    Rgba,
}

impl ColorMode {
    /// Number of channels stored per pixel.
    pub fn num_channels(&self) -> usize {
        match self {
            ColorMode::Rgb => 3,
            ColorMode::Rgba => 4,
        }
    }
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ColorMode::Rgb => write!(f, "RGB"),
            ColorMode::Rgba => write!(f, "RGBA"),
        }
    }
}

/// An 8-bit raster image, either RGB or RGBA.
///
/// # Examples
///
/// ```
/// use decast_image::{ColorMode, Image, ImageSize, RasterImage};
///
/// let rgba = Image::<u8, 4>::new(
///     ImageSize { width: 1, height: 1 },
///     vec![10, 20, 30, 40],
/// ).unwrap();
///
/// let raster = RasterImage::from(rgba);
/// assert_eq!(raster.mode(), ColorMode::Rgba);
/// assert_eq!(raster.to_rgb().as_slice(), &[10, 20, 30]);
/// assert_eq!(raster.alpha().unwrap().as_slice(), &[40]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum RasterImage {
    /// An image without alpha channel.
    Rgb(Image<u8, 3>),
    /// An image with alpha channel.
    Rgba(Image<u8, 4>),
}

impl RasterImage {
    /// Create a raster image from interleaved samples in the given mode.
    ///
    /// # Errors
    ///
    /// Returns an error if `data.len() != width * height * mode.num_channels()`.
    pub fn new(size: ImageSize, mode: ColorMode, data: Vec<u8>) -> Result<Self, ImageError> {
        Ok(match mode {
            ColorMode::Rgb => RasterImage::Rgb(Image::new(size, data)?),
            ColorMode::Rgba => RasterImage::Rgba(Image::new(size, data)?),
        })
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        match self {
            RasterImage::Rgb(img) => img.size(),
            RasterImage::Rgba(img) => img.size(),
        }
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size().width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size().height
    }

    /// Get the color mode of the image.
    pub fn mode(&self) -> ColorMode {
        match self {
            RasterImage::Rgb(_) => ColorMode::Rgb,
            RasterImage::Rgba(_) => ColorMode::Rgba,
        }
    }

    /// Get the interleaved samples of the image.
    pub fn as_slice(&self) -> &[u8] {
        match self {
            RasterImage::Rgb(img) => img.as_slice(),
            RasterImage::Rgba(img) => img.as_slice(),
        }
    }

    /// Get the RGB part of the image, dropping the alpha channel if any.
    pub fn to_rgb(&self) -> Image<u8, 3> {
        match self {
            RasterImage::Rgb(img) => img.clone(),
            RasterImage::Rgba(img) => img.map_pixels(|px| [px[0], px[1], px[2]]),
        }
    }

    /// Consume the image and return its RGB part, dropping the alpha channel if any.
    pub fn into_rgb(self) -> Image<u8, 3> {
        match self {
            RasterImage::Rgb(img) => img,
            RasterImage::Rgba(img) => img.map_pixels(|px| [px[0], px[1], px[2]]),
        }
    }

    /// Get a copy of the alpha plane, if the image has one.
    pub fn alpha(&self) -> Option<ChannelPlane> {
        match self {
            RasterImage::Rgb(_) => None,
            RasterImage::Rgba(img) => Some(img.map_pixels(|px| [px[3]])),
        }
    }

    /// Attach an alpha plane to the RGB part of this image, replacing any existing alpha.
    ///
    /// # Errors
    ///
    /// Returns an error if the alpha plane does not match the image size.
    pub fn with_alpha(&self, alpha: &ChannelPlane) -> Result<RasterImage, ImageError> {
        let rgb = self.to_rgb();
        let [r, g, b] = rgb.split_channels();
        Ok(RasterImage::Rgba(Image::from_channels([&r, &g, &b, alpha])?))
    }
}

impl From<Image<u8, 3>> for RasterImage {
    fn from(image: Image<u8, 3>) -> Self {
        RasterImage::Rgb(image)
    }
}

impl From<Image<u8, 4>> for RasterImage {
    fn from(image: Image<u8, 4>) -> Self {
        RasterImage::Rgba(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba_2x1() -> Result<RasterImage, ImageError> {
        RasterImage::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            ColorMode::Rgba,
            vec![1, 2, 3, 4, 5, 6, 7, 8],
        )
    }

    #[test]
    fn raster_mode_and_size() -> Result<(), ImageError> {
        let image = rgba_2x1()?;
        assert_eq!(image.mode(), ColorMode::Rgba);
        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 1);
        assert_eq!(image.mode().num_channels(), 4);
        assert_eq!(image.mode().to_string(), "RGBA");

        Ok(())
    }

    #[test]
    fn raster_drop_and_attach_alpha() -> Result<(), ImageError> {
        let image = rgba_2x1()?;
        let rgb = image.to_rgb();
        assert_eq!(rgb.as_slice(), &[1, 2, 3, 5, 6, 7]);

        let alpha = ChannelPlane::new([2, 1].into(), vec![4, 8])?;
        assert_eq!(image.alpha(), Some(alpha.clone()));

        let rebuilt = RasterImage::from(rgb).with_alpha(&alpha)?;
        assert_eq!(rebuilt, image);

        Ok(())
    }

    #[test]
    fn raster_rgb_has_no_alpha() -> Result<(), ImageError> {
        let image = RasterImage::new([1, 1].into(), ColorMode::Rgb, vec![9, 8, 7])?;
        assert!(image.alpha().is_none());
        assert_eq!(image.as_slice(), &[9, 8, 7]);

        Ok(())
    }

    #[test]
    fn raster_alpha_size_mismatch() -> Result<(), ImageError> {
        let image = rgba_2x1()?;
        let alpha = ChannelPlane::from_size_val([3, 1].into(), 255)?;
        assert!(image.with_alpha(&alpha).is_err());

        Ok(())
    }
}
