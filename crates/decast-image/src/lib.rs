#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// image representation for pixel processing.
pub mod image;

/// Error types for the image module.
pub mod error;

/// 8-bit raster images with or without an alpha channel.
pub mod raster;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
pub use crate::raster::{ChannelPlane, ColorMode, RasterImage};
