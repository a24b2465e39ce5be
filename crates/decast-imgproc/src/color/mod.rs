mod codec;
mod gray;
mod hsv;
mod lab;
mod ycbcr;

pub use codec::{merge, split, ChannelPlanes, ColorSpace};
pub use gray::{gray_from_rgb_u8, rgb_from_gray};
pub use hsv::{hsv_from_rgb, rgb_from_hsv};
pub use lab::{lab_from_rgb, rgb_from_lab};
pub use ycbcr::{rgb_from_ycbcr, ycbcr_from_rgb};

pub(crate) use gray::luma_u8;
