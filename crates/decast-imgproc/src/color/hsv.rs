use crate::parallel;
use decast_image::{Image, ImageError};

/// Convert an RGB8 image to an HSV8 image.
///
/// The input image is assumed to have 3 channels in the order R, G, B.
///
/// # Arguments
///
/// * `src` - The input RGB image assumed to have 3 channels.
/// * `dst` - The output HSV image.
///
/// # Returns
///
/// The HSV image with the following channels:
///
/// * H: The hue channel in the range [0, 255] (0-360 degrees).
/// * S: The saturation channel in the range [0, 255].
/// * V: The value channel in the range [0, 255].
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use decast_image::{Image, ImageSize};
/// use decast_imgproc::color::hsv_from_rgb;
///
/// let image = Image::<u8, 3>::new(
///     ImageSize {
///        width: 1,
///        height: 1,
///     },
///     vec![0, 255, 0],
/// )
/// .unwrap();
///
/// let mut hsv = Image::<u8, 3>::from_size_val(image.size(), 0).unwrap();
///
/// hsv_from_rgb(&image, &mut hsv).unwrap();
///
/// assert_eq!(hsv.as_slice(), &[85, 255, 255]);
/// ```
pub fn hsv_from_rgb(src: &Image<u8, 3>, dst: &mut Image<u8, 3>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    // compute the HSV values
    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        // Normalize the input to the range [0, 1]
        let r = src_pixel[0] as f32 / 255.;
        let g = src_pixel[1] as f32 / 255.;
        let b = src_pixel[2] as f32 / 255.;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let h = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * (((g - b) / delta) % 6.0)
        } else if max == g {
            60.0 * (((b - r) / delta) + 2.0)
        } else {
            60.0 * (((r - g) / delta) + 4.0)
        };

        // Ensure h is in the range [0, 360)
        let h = if h < 0.0 { h + 360.0 } else { h };

        let s = if max == 0.0 { 0.0 } else { delta / max };

        dst_pixel[0] = to_u8(h / 360.0 * 255.0);
        dst_pixel[1] = to_u8(s * 255.0);
        dst_pixel[2] = src_pixel[0].max(src_pixel[1]).max(src_pixel[2]);
    });

    Ok(())
}

/// Convert an HSV8 image back to an RGB8 image.
///
/// The hue channel is interpreted as `[0, 255] -> [0, 360)` degrees, which is the inverse
/// of [`hsv_from_rgb`].
///
/// Precondition: the input and output images must have the same size.
pub fn rgb_from_hsv(src: &Image<u8, 3>, dst: &mut Image<u8, 3>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let h = src_pixel[0] as f32 / 255.0 * 360.0;
        let s = src_pixel[1] as f32 / 255.0;
        let v = src_pixel[2] as f32 / 255.0;

        let c = v * s;
        let hp = h / 60.0;
        let x = c * (1.0 - ((hp % 2.0) - 1.0).abs());
        let m = v - c;

        let (r, g, b) = match (hp.floor() as u32) % 6 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        dst_pixel[0] = to_u8((r + m) * 255.0);
        dst_pixel[1] = to_u8((g + m) * 255.0);
        dst_pixel[2] = to_u8((b + m) * 255.0);
    });

    Ok(())
}

#[inline]
fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
