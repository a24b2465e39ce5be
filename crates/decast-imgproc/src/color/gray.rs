use crate::parallel;
use decast_image::{Image, ImageError};

/// Fixed point RGB weights (16 bit) for the grayscale conversion.
const RW: u32 = 19595;
const GW: u32 = 38470;
const BW: u32 = 7471;

/// Convert an RGB8 image to grayscale using the formula:
///
/// Y = (19595 * R + 38470 * G + 7471 * B + 2^15) >> 16
///
/// which is the ITU-R 601 luma `0.299 R + 0.587 G + 0.114 B` rounded to nearest.
///
/// # Arguments
///
/// * `src` - The input RGB8 image.
/// * `dst` - The output grayscale image.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use decast_image::{Image, ImageSize};
/// use decast_imgproc::color::gray_from_rgb_u8;
///
/// let image = Image::<u8, 3>::new(
///     ImageSize {
///         width: 2,
///         height: 1,
///     },
///     vec![255, 255, 255, 255, 0, 0],
/// )
/// .unwrap();
///
/// let mut gray = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
///
/// gray_from_rgb_u8(&image, &mut gray).unwrap();
/// assert_eq!(gray.as_slice(), &[255, 76]);
/// ```
pub fn gray_from_rgb_u8(src: &Image<u8, 3>, dst: &mut Image<u8, 1>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel[0] = luma_u8(src_pixel[0], src_pixel[1], src_pixel[2]);
    });

    Ok(())
}

/// Convert a grayscale image to an RGB image by replicating the grayscale value across all three channels.
///
/// # Arguments
///
/// * `src` - The input grayscale image.
/// * `dst` - The output RGB image.
///
/// Precondition: the input and output images must have the same size.
pub fn rgb_from_gray<T>(src: &Image<T, 1>, dst: &mut Image<T, 3>) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let gray = src_pixel[0];
        dst_pixel.iter_mut().for_each(|dst_pixel| *dst_pixel = gray);
    });

    Ok(())
}

/// Luma of a single RGB8 pixel.
#[inline]
pub(crate) fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * RW + g as u32 * GW + b as u32 * BW + 0x8000) >> 16) as u8
}

#[cfg(test)]
mod tests {
    use decast_image::{Image, ImageError, ImageSize};

    #[test]
    fn gray_from_rgb_u8() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0, 0, 0, 0, 255, 0, 0, 0, 255, 200, 150, 50],
        )?;

        let mut gray = Image::<u8, 1>::from_size_val(image.size(), 0)?;
        super::gray_from_rgb_u8(&image, &mut gray)?;

        // 0.587 * 255 = 149.7, 0.114 * 255 = 29.07, 59.8 + 88.05 + 5.7 = 153.55
        assert_eq!(gray.as_slice(), &[0, 150, 29, 154]);

        Ok(())
    }

    #[test]
    fn gray_is_identity_on_neutral() -> Result<(), ImageError> {
        for v in 0..=255u8 {
            assert_eq!(super::luma_u8(v, v, v), v);
        }
        Ok(())
    }

    #[test]
    fn rgb_from_gray() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![7, 250],
        )?;

        let mut rgb = Image::<u8, 3>::from_size_val(image.size(), 0)?;
        super::rgb_from_gray(&image, &mut rgb)?;

        assert_eq!(rgb.as_slice(), &[7, 7, 7, 250, 250, 250]);

        Ok(())
    }

    #[test]
    fn gray_size_mismatch() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val([2, 2].into(), 0)?;
        let mut gray = Image::<u8, 1>::from_size_val([1, 2].into(), 0)?;
        assert_eq!(
            super::gray_from_rgb_u8(&image, &mut gray),
            Err(ImageError::InvalidImageSize(2, 2, 1, 2))
        );
        Ok(())
    }
}
