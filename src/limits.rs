use alloc::format;

use crate::error::PrepError;
use crate::pixel::TargetLayout;

/// Caps on the frames a [`crate::PrepareRequest`] accepts.
///
/// Every cap is optional. [`Limits::NONE`] (also the `Default`) accepts any
/// frame whose buffer can be addressed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size of an expanded encoder buffer. Pass-through frames
    /// borrow the source and are not counted.
    pub max_output_bytes: Option<u64>,
}

impl Limits {
    pub const NONE: Self = Self {
        max_width: None,
        max_height: None,
        max_pixels: None,
        max_output_bytes: None,
    };

    pub fn with_max_dimensions(mut self, width: u32, height: u32) -> Self {
        self.max_width = Some(width);
        self.max_height = Some(height);
        self
    }

    pub fn with_max_pixels(mut self, pixels: u64) -> Self {
        self.max_pixels = Some(pixels);
        self
    }

    pub fn with_max_output_bytes(mut self, bytes: u64) -> Self {
        self.max_output_bytes = Some(bytes);
        self
    }

    /// Reject frames over the width, height or pixel caps.
    pub(crate) fn check_dimensions(&self, width: u32, height: u32) -> Result<(), PrepError> {
        if let Some(max_w) = self.max_width.filter(|&m| width > m) {
            return Err(PrepError::LimitExceeded(format!(
                "width {width} exceeds limit {max_w}"
            )));
        }
        if let Some(max_h) = self.max_height.filter(|&m| height > m) {
            return Err(PrepError::LimitExceeded(format!(
                "height {height} exceeds limit {max_h}"
            )));
        }
        let pixels = u64::from(width) * u64::from(height);
        if let Some(max_px) = self.max_pixels.filter(|&m| pixels > m) {
            return Err(PrepError::LimitExceeded(format!(
                "pixel count {pixels} exceeds limit {max_px}"
            )));
        }
        Ok(())
    }

    /// Size of the expanded buffer for a `width`×`height` frame in `target`,
    /// checked against the output cap.
    pub(crate) fn check_output(
        &self,
        target: TargetLayout,
        width: u32,
        height: u32,
    ) -> Result<usize, PrepError> {
        let bytes = target
            .frame_bytes(width, height)
            .ok_or(PrepError::DimensionsTooLarge { width, height })?;
        if let Some(max) = self.max_output_bytes.filter(|&m| bytes as u64 > m) {
            return Err(PrepError::LimitExceeded(format!(
                "{width}x{height} {:?} needs {bytes} bytes, limit {max}",
                target.format
            )));
        }
        Ok(bytes)
    }
}
