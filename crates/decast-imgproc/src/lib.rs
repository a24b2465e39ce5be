#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// the automatic adjustment pipeline.
pub mod adjust;

/// compositing of two images under a blend mode.
pub mod blend;

/// color transformations and channel split/merge module.
pub mod color;

/// image enhancement module.
pub mod enhance;

/// error types for the image processing operations.
pub mod error;

/// per-channel gamma correction.
pub mod gamma;

/// compute image histogram module.
pub mod histogram;

/// histogram based auto levels.
pub mod levels;

/// module containing parallization utilities.
pub mod parallel;

/// parameters of the automatic adjustment pipeline.
pub mod params;

pub use crate::adjust::auto_adjust;
pub use crate::error::AdjustError;
pub use crate::params::{AdjustmentParams, ProcessingMode};
