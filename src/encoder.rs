//! Hand-off to an external AV1 encoder.
//!
//! The encoder itself lives outside this crate. It receives a
//! [`PreparedFrame`] and the clamped [`EncodeParams`] and returns the
//! encoded file bytes.

use alloc::string::ToString;
use alloc::vec::Vec;
use core::fmt::Display;
use enough::Stop;

use crate::error::PrepError;
use crate::prepare::{PrepareRequest, PreparedFrame};
use crate::settings::{EncodeParams, EncoderSettings, HostPrecision};

/// An AV1/AVIF encoder that consumes prepared frames.
pub trait FrameEncoder {
    type Error: Display;

    /// Encode one frame. Implementations convert RGB to YUV, apply the
    /// tile grid and quantizers from `params`, and return the file bytes.
    fn encode(
        &mut self,
        frame: &PreparedFrame<'_>,
        params: &EncodeParams,
    ) -> Result<Vec<u8>, Self::Error>;
}

/// Prepare a raster and encode it.
///
/// `precision` is the host image's sample precision; together with
/// `settings.wide_depth` it fixes the output bit depth reported to the
/// encoder. The request's layout must use the matching sample depth.
pub fn export<E: FrameEncoder>(
    request: PrepareRequest<'_>,
    precision: HostPrecision,
    settings: &EncoderSettings,
    encoder: &mut E,
    stop: impl Stop,
) -> Result<Vec<u8>, PrepError> {
    let depth = settings.output_depth(precision);
    let expected = depth.sample_depth();
    let layout = request.layout();
    if layout.depth() != expected {
        return Err(PrepError::LayoutMismatch {
            expected: crate::TargetLayout {
                format: layout.target().format,
                depth: expected,
            },
            actual: layout.target(),
        });
    }

    stop.check()?;
    let frame = request.prepare(stop)?;
    let params = settings.params(frame.tiles, depth, frame.has_alpha());

    tracing::debug!(
        min_quantizer = params.min_quantizer,
        max_quantizer = params.max_quantizer,
        speed = params.speed,
        threads = params.max_threads,
        bits = depth.bits(),
        "encoding frame"
    );

    let bytes = encoder
        .encode(&frame, &params)
        .map_err(|e| PrepError::EncodeFailed(e.to_string()))?;

    tracing::debug!(bytes = bytes.len(), "frame encoded");
    Ok(bytes)
}
