use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AdjustError;

/// Which planes the normalization stage of [`crate::auto_adjust`] auto-levels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessingMode {
    /// Red, green and blue independently.
    #[default]
    #[serde(rename = "RGB")]
    Rgb,
    /// HSV saturation, then LAB luminance of the result.
    #[serde(rename = "lum + sat", alias = "lum+sat")]
    LumSat,
    /// LAB luminance only.
    #[serde(rename = "luminance")]
    Luminance,
    /// HSV saturation only.
    #[serde(rename = "saturation")]
    Saturation,
    /// Grayscale, the output is a gray RGB image.
    #[serde(rename = "mono")]
    Mono,
}

impl ProcessingMode {
    /// Canonical name of the processing mode.
    pub const fn name(&self) -> &'static str {
        match self {
            ProcessingMode::Rgb => "RGB",
            ProcessingMode::LumSat => "lum + sat",
            ProcessingMode::Luminance => "luminance",
            ProcessingMode::Saturation => "saturation",
            ProcessingMode::Mono => "mono",
        }
    }
}

impl std::fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProcessingMode {
    type Err = AdjustError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "RGB" => Ok(ProcessingMode::Rgb),
            "lum + sat" | "lum+sat" => Ok(ProcessingMode::LumSat),
            "luminance" => Ok(ProcessingMode::Luminance),
            "saturation" => Ok(ProcessingMode::Saturation),
            "mono" => Ok(ProcessingMode::Mono),
            _ => Err(AdjustError::InvalidArgument(format!(
                "unknown processing mode '{s}'"
            ))),
        }
    }
}

/// Parameters of the automatic color adjustment.
///
/// `strength` is in `[0, 100]`, every other numeric parameter in `[-100, 100]`. Values out
/// of range are accepted here and clamped by [`AdjustmentParams::clamped`] before use.
///
/// # Example
///
/// ```
/// use decast_imgproc::{AdjustmentParams, ProcessingMode};
///
/// let params = AdjustmentParams::default()
///     .with_mode(ProcessingMode::LumSat)
///     .with_strength(80)
///     .with_red(-20);
///
/// assert_eq!(params.strength, 80);
/// assert_eq!(params.contrast, 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentParams {
    /// Opacity of the adjusted image over the original.
    pub strength: i32,
    /// Brightness enhancement.
    pub brightness: i32,
    /// Contrast enhancement.
    pub contrast: i32,
    /// Saturation enhancement.
    pub saturation: i32,
    /// Gamma balance of the red channel.
    pub red: i32,
    /// Gamma balance of the green channel.
    pub green: i32,
    /// Gamma balance of the blue channel.
    pub blue: i32,
    /// Planes to auto-level.
    pub mode: ProcessingMode,
}

impl Default for AdjustmentParams {
    fn default() -> Self {
        Self {
            strength: 100,
            brightness: 0,
            contrast: 0,
            saturation: 0,
            red: 0,
            green: 0,
            blue: 0,
            mode: ProcessingMode::Rgb,
        }
    }
}

impl AdjustmentParams {
    /// Set the strength.
    pub fn with_strength(mut self, strength: i32) -> Self {
        self.strength = strength;
        self
    }

    /// Set the brightness.
    pub fn with_brightness(mut self, brightness: i32) -> Self {
        self.brightness = brightness;
        self
    }

    /// Set the contrast.
    pub fn with_contrast(mut self, contrast: i32) -> Self {
        self.contrast = contrast;
        self
    }

    /// Set the saturation.
    pub fn with_saturation(mut self, saturation: i32) -> Self {
        self.saturation = saturation;
        self
    }

    /// Set the red balance.
    pub fn with_red(mut self, red: i32) -> Self {
        self.red = red;
        self
    }

    /// Set the green balance.
    pub fn with_green(mut self, green: i32) -> Self {
        self.green = green;
        self
    }

    /// Set the blue balance.
    pub fn with_blue(mut self, blue: i32) -> Self {
        self.blue = blue;
        self
    }

    /// Set the processing mode.
    pub fn with_mode(mut self, mode: ProcessingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Return a copy with every value clamped to its valid range.
    ///
    /// Each clamped value is reported with a warning.
    pub fn clamped(&self) -> Self {
        Self {
            strength: clamp_param("strength", self.strength, 0, 100),
            brightness: clamp_param("brightness", self.brightness, -100, 100),
            contrast: clamp_param("contrast", self.contrast, -100, 100),
            saturation: clamp_param("saturation", self.saturation, -100, 100),
            red: clamp_param("red", self.red, -100, 100),
            green: clamp_param("green", self.green, -100, 100),
            blue: clamp_param("blue", self.blue, -100, 100),
            mode: self.mode,
        }
    }
}

fn clamp_param(name: &str, value: i32, min: i32, max: i32) -> i32 {
    let clamped = value.clamp(min, max);
    if clamped != value {
        log::warn!("{name} {value} out of range [{min}, {max}], clamped to {clamped}");
    }
    clamped
}
