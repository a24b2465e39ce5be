use decast_image::Image;
use rayon::prelude::*;

/// Number of bins of an 8-bit histogram.
pub const NUM_BINS: usize = 256;

/// Pixel intensity histogram of an 8-bit single channel image.
///
/// The bins always sum to the number of pixels of the source plane.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Histogram {
    bins: [usize; NUM_BINS],
}

impl Histogram {
    /// Get the bin counts.
    pub fn bins(&self) -> &[usize; NUM_BINS] {
        &self.bins
    }

    /// Total number of samples counted.
    pub fn total(&self) -> usize {
        self.bins.iter().sum()
    }

    /// Indices of the bins whose own count is strictly greater than `threshold`.
    pub fn bins_above(&self, threshold: f64) -> impl Iterator<Item = usize> + '_ {
        self.bins
            .iter()
            .enumerate()
            .filter(move |(_, &count)| count as f64 > threshold)
            .map(|(i, _)| i)
    }
}

/// Compute the pixel intensity histogram of an image.
///
/// NOTE: this is limited to 8-bit 1-channel images.
///
/// # Arguments
///
/// * `src` - The input image to compute the histogram.
///
/// # Returns
///
/// A histogram with 256 bins, one per intensity level.
///
/// # Example
///
/// ```
/// use decast_image::{Image, ImageSize};
/// use decast_imgproc::histogram::compute_histogram;
///
/// let image = Image::<u8, 1>::new(
///   ImageSize {
///     width: 3,
///     height: 3,
///   },
///   vec![0, 2, 4, 128, 130, 132, 254, 255, 255],
/// ).unwrap();
///
/// let histogram = compute_histogram(&image);
/// assert_eq!(histogram.bins()[255], 2);
/// assert_eq!(histogram.total(), 9);
/// ```
pub fn compute_histogram(src: &Image<u8, 1>) -> Histogram {
    let counts = src
        .as_slice()
        .par_chunks(4096)
        .fold(
            || [0usize; NUM_BINS],
            |mut local, chunk| {
                for &px in chunk {
                    local[px as usize] += 1;
                }
                local
            },
        )
        .reduce(
            || [0usize; NUM_BINS],
            |mut a, b| {
                for (i, val) in b.iter().enumerate() {
                    a[i] += val;
                }
                a
            },
        );

    Histogram { bins: counts }
}
