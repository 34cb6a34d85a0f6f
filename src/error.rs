use alloc::string::String;
use enough::StopReason;

/// Errors from pixel transcoding, tile planning and export.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PrepError {
    #[error("image has a zero dimension: {width}x{height}")]
    ZeroDimensions { width: u32, height: u32 },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("pixel layout mismatch: expected {expected:?}, got {actual:?}")]
    LayoutMismatch {
        expected: crate::TargetLayout,
        actual: crate::TargetLayout,
    },

    #[error("unsupported sample bit depth: {0}")]
    UnsupportedDepth(u32),

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("out of memory allocating {bytes} bytes")]
    OutOfMemory { bytes: usize },

    #[error("encoder failed: {0}")]
    EncodeFailed(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for PrepError {
    fn from(r: StopReason) -> Self {
        PrepError::Cancelled(r)
    }
}
