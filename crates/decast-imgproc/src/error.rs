use decast_image::{ImageError, ImageSize};

/// An error type for the color adjustment operations.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum AdjustError {
    /// A parameter or name could not be interpreted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Planes or images that must share a size do not.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The size of the reference plane or image.
        expected: ImageSize,
        /// The size of the offending plane or image.
        actual: ImageSize,
    },

    /// The plane has no usable dynamic range to stretch.
    #[error("Degenerate histogram: no dynamic range between bins {bmin} and {bmax}")]
    DegenerateHistogram {
        /// Lowest populated bin above the noise threshold.
        bmin: u8,
        /// Highest populated bin above the noise threshold.
        bmax: u8,
    },

    /// Error from the underlying image container.
    #[error(transparent)]
    Image(#[from] ImageError),
}

/// Check that two sizes match, reporting a [`AdjustError::DimensionMismatch`] otherwise.
pub(crate) fn ensure_same_size(expected: ImageSize, actual: ImageSize) -> Result<(), AdjustError> {
    if expected != actual {
        return Err(AdjustError::DimensionMismatch { expected, actual });
    }
    Ok(())
}
