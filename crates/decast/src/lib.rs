#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use decast_image as image;

#[doc(inline)]
pub use decast_imgproc as imgproc;
