use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use decast_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by this size.
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Represents an image with pixel data.
///
/// The pixels are stored interleaved in row-major order with shape (H, W, C), where H is the
/// height of the image, W the width and C the number of channels.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Returns
    ///
    /// A new image with the given pixel data.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use decast_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::new(
    ///    ImageSize {
    ///       width: 10,
    ///       height: 20,
    ///    },
    ///    vec![0u8; 10 * 20 * 3],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        // check if the data length matches the image size
        if data.len() != size.width * size.height * CHANNELS {
            return Err(ImageError::InvalidChannelShape(
                data.len(),
                size.width * size.height * CHANNELS,
            ));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size and default pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `val` - The default value of the pixel data.
    ///
    /// # Examples
    ///
    /// ```
    /// use decast_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 1>::from_size_val(
    ///   ImageSize {
    ///     width: 10,
    ///     height: 20,
    ///   }, 255u8).unwrap();
    ///
    /// assert_eq!(image.as_slice().len(), 200);
    /// assert!(image.as_slice().iter().all(|&v| v == 255));
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let data = vec![val; size.width * size.height * CHANNELS];
        Image::new(size, data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Get the pixel data as a flat slice in (H, W, C) order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the pixel data as a mutable flat slice in (H, W, C) order.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Split the image into its channels.
    ///
    /// # Returns
    ///
    /// An array of images, each containing one channel of the original image.
    ///
    /// # Examples
    ///
    /// ```
    /// use decast_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 2>::new(
    ///   ImageSize {
    ///     width: 2,
    ///     height: 1,
    ///   },
    ///   vec![1, 2, 3, 4],
    /// ).unwrap();
    ///
    /// let [a, b] = image.split_channels();
    /// assert_eq!(a.as_slice(), &[1, 3]);
    /// assert_eq!(b.as_slice(), &[2, 4]);
    /// ```
    pub fn split_channels(&self) -> [Image<T, 1>; CHANNELS]
    where
        T: Copy,
    {
        std::array::from_fn(|c| Image {
            size: self.size,
            data: self.data.chunks_exact(CHANNELS).map(|px| px[c]).collect(),
        })
    }

    /// Merge single channel images into one interleaved image.
    ///
    /// # Errors
    ///
    /// Returns an error if the channels do not share the same size.
    pub fn from_channels(channels: [&Image<T, 1>; CHANNELS]) -> Result<Self, ImageError>
    where
        T: Copy,
    {
        let size = match channels.first() {
            Some(first) => first.size(),
            None => return Image::new(ImageSize::from([0, 0]), Vec::new()),
        };

        for ch in channels.iter() {
            if ch.size() != size {
                return Err(ImageError::InvalidImageSize(
                    ch.width(),
                    ch.height(),
                    size.width,
                    size.height,
                ));
            }
        }

        let mut data = Vec::with_capacity(size.area() * CHANNELS);
        for i in 0..size.area() {
            for ch in channels.iter() {
                data.push(ch.data[i]);
            }
        }

        Image::new(size, data)
    }

    /// Apply a function to every pixel, producing a new image with `C2` channels.
    ///
    /// # Examples
    ///
    /// ```
    /// use decast_image::{Image, ImageSize};
    ///
    /// let rgb = Image::<u8, 3>::new(ImageSize { width: 1, height: 1 }, vec![1, 2, 3]).unwrap();
    /// let bgr = rgb.map_pixels(|px| [px[2], px[1], px[0]]);
    /// assert_eq!(bgr.as_slice(), &[3, 2, 1]);
    /// ```
    pub fn map_pixels<U, const C2: usize>(&self, f: impl Fn(&[T]) -> [U; C2]) -> Image<U, C2> {
        Image {
            size: self.size,
            data: self.data.chunks_exact(CHANNELS).flat_map(f).collect(),
        }
    }
}
