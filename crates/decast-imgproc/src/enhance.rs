use decast_image::{Image, ImageError};

use crate::blend::lerp_u8;
use crate::color::luma_u8;
use crate::parallel;

/// Map a signed enhancement value in `[-100, 100]` to a multiplicative factor.
///
/// ```text
/// value < 0:  factor = value / 100 + 1   // (0, 1)
/// value >= 0: factor = value / 50 + 1    // [1, 3]
/// ```
///
/// # Example
///
/// ```
/// use decast_imgproc::enhance::enhance_factor;
///
/// assert_eq!(enhance_factor(-100), 0.0);
/// assert_eq!(enhance_factor(0), 1.0);
/// assert_eq!(enhance_factor(100), 3.0);
/// ```
pub fn enhance_factor(value: i32) -> f32 {
    if value < 0 {
        value as f32 / 100.0 + 1.0
    } else {
        value as f32 / 50.0 + 1.0
    }
}

/// Adjust the brightness of an image.
///
/// Interpolates between black and the source image:
///
/// dst(x,y,c) = factor * src(x,y,c)
///
/// A factor of `0.0` gives a black image and `1.0` the source image. The result is truncated
/// and clamped to `[0, 255]`.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `factor` - The brightness factor.
/// * `dst` - The output image to store the result.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn adjust_brightness(
    src: &Image<u8, 3>,
    factor: f32,
    dst: &mut Image<u8, 3>,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    parallel::par_iter_rows_val(src, dst, |&src_pixel, dst_pixel| {
        *dst_pixel = lerp_u8(0, src_pixel, factor);
    });

    Ok(())
}

/// Adjust the contrast of an image.
///
/// Interpolates between a uniform gray image at the mean luminance of `src` and the source
/// image:
///
/// dst(x,y,c) = mean + factor * (src(x,y,c) - mean)
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn adjust_contrast(
    src: &Image<u8, 3>,
    factor: f32,
    dst: &mut Image<u8, 3>,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    let mean = mean_luma(src);

    parallel::par_iter_rows_val(src, dst, |&src_pixel, dst_pixel| {
        *dst_pixel = lerp_u8(mean, src_pixel, factor);
    });

    Ok(())
}

/// Adjust the saturation of an image.
///
/// Interpolates between the gray equivalent of each pixel and the pixel itself:
///
/// dst(x,y,c) = gray(x,y) + factor * (src(x,y,c) - gray(x,y))
///
/// A factor of `0.0` gives a grayscale image.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn adjust_saturation(
    src: &Image<u8, 3>,
    factor: f32,
    dst: &mut Image<u8, 3>,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let gray = luma_u8(src_pixel[0], src_pixel[1], src_pixel[2]);
        for (dst_c, &src_c) in dst_pixel.iter_mut().zip(src_pixel.iter()) {
            *dst_c = lerp_u8(gray, src_c, factor);
        }
    });

    Ok(())
}

/// Apply brightness, contrast and saturation adjustments in that order.
///
/// Each value is in `[-100, 100]` and mapped with [`enhance_factor`]. A value of `0` skips
/// the corresponding stage; every stage works on the output of the previous one.
pub fn enhance(
    src: &Image<u8, 3>,
    brightness: i32,
    contrast: i32,
    saturation: i32,
) -> Result<Image<u8, 3>, ImageError> {
    type Stage = fn(&Image<u8, 3>, f32, &mut Image<u8, 3>) -> Result<(), ImageError>;

    let stages: [(&str, i32, Stage); 3] = [
        ("brightness", brightness, adjust_brightness),
        ("contrast", contrast, adjust_contrast),
        ("saturation", saturation, adjust_saturation),
    ];

    let mut current = src.clone();
    for (name, value, stage) in stages {
        if value == 0 {
            continue;
        }
        let factor = enhance_factor(value);
        log::trace!("enhance {name}: value {value}, factor {factor}");

        let mut dst = Image::<u8, 3>::from_size_val(current.size(), 0)?;
        stage(&current, factor, &mut dst)?;
        current = dst;
    }

    Ok(current)
}

/// Mean luminance of an image, rounded to the nearest level.
fn mean_luma(src: &Image<u8, 3>) -> u8 {
    let count = src.size().area();
    if count == 0 {
        return 0;
    }

    let sum: u64 = src
        .as_slice()
        .chunks_exact(3)
        .map(|px| luma_u8(px[0], px[1], px[2]) as u64)
        .sum();

    ((sum as f64 / count as f64) + 0.5) as u8
}
