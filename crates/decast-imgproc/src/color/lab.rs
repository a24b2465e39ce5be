use palette::{FromColor, Lab, LinSrgb, Srgb};

use crate::parallel;
use decast_image::{Image, ImageError};

/// Offset applied to the signed a*/b* components so they fit an unsigned byte.
const AB_OFFSET: f32 = 128.0;

/// Scale from the L* range [0, 100] to [0, 255].
const L_SCALE: f32 = 255.0 / 100.0;

/// Convert an sRGB8 image to an 8-bit CIE L*a*b* image (D65 white point).
///
/// The channels of the output image are encoded as:
///
/// * L: `L* * 255 / 100`, in the range [0, 255].
/// * a: `a* + 128`, clamped to [0, 255].
/// * b: `b* + 128`, clamped to [0, 255].
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use decast_image::{Image, ImageSize};
/// use decast_imgproc::color::lab_from_rgb;
///
/// let image = Image::<u8, 3>::new(
///     ImageSize {
///         width: 2,
///         height: 1,
///     },
///     vec![0, 0, 0, 255, 255, 255],
/// )
/// .unwrap();
///
/// let mut lab = Image::<u8, 3>::from_size_val(image.size(), 0).unwrap();
///
/// lab_from_rgb(&image, &mut lab).unwrap();
/// assert_eq!(lab.as_slice(), &[0, 128, 128, 255, 128, 128]);
/// ```
pub fn lab_from_rgb(src: &Image<u8, 3>, dst: &mut Image<u8, 3>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let srgb = Srgb::new(src_pixel[0], src_pixel[1], src_pixel[2]).into_format::<f32>();
        let linear: LinSrgb<f32> = srgb.into_linear();
        let lab: Lab = Lab::from_color(linear);

        dst_pixel[0] = to_u8(lab.l * L_SCALE);
        dst_pixel[1] = to_u8(lab.a + AB_OFFSET);
        dst_pixel[2] = to_u8(lab.b + AB_OFFSET);
    });

    Ok(())
}

/// Convert an 8-bit CIE L*a*b* image, encoded as by [`lab_from_rgb`], back to sRGB8.
///
/// Colors outside of the sRGB gamut are clamped.
///
/// Precondition: the input and output images must have the same size.
pub fn rgb_from_lab(src: &Image<u8, 3>, dst: &mut Image<u8, 3>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let lab: Lab = Lab::new(
            src_pixel[0] as f32 / L_SCALE,
            src_pixel[1] as f32 - AB_OFFSET,
            src_pixel[2] as f32 - AB_OFFSET,
        );
        let linear = LinSrgb::<f32>::from_color(lab);
        let srgb: Srgb<f32> = Srgb::from_linear(linear);

        dst_pixel[0] = to_u8(srgb.red * 255.0);
        dst_pixel[1] = to_u8(srgb.green * 255.0);
        dst_pixel[2] = to_u8(srgb.blue * 255.0);
    });

    Ok(())
}

#[inline]
fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
