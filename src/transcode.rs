//! Source raster → encoder-ready interleaved RGB/RGBA.
//!
//! Gray sources are expanded by replicating the luminance sample into R, G
//! and B (alpha copied through). RGB and RGBA sources are already in the
//! encoder's layout and are handed on as a borrowed view. Sample values are
//! never rescaled; wide samples are moved as opaque 2-byte units, so native
//! byte order is preserved.

use alloc::vec::Vec;
use enough::Stop;

use crate::buffer::EncoderBuffer;
use crate::error::PrepError;
use crate::limits::Limits;
use crate::pixel::SourceLayout;

/// Per-pixel work for one source layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TranscodePath {
    /// `S → S S S`, 1-byte samples.
    Gray8,
    /// `S A → S S S A`, 1-byte samples.
    GrayAlpha8,
    /// `S → S S S`, 2-byte samples.
    GrayWide,
    /// `S A → S S S A`, 2-byte samples.
    GrayAlphaWide,
    /// Source is already RGB/RGBA; no copy.
    PassThrough,
}

impl TranscodePath {
    pub(crate) fn for_layout(layout: SourceLayout) -> Self {
        match layout {
            SourceLayout::Gray8 => Self::Gray8,
            SourceLayout::GrayAlpha8 => Self::GrayAlpha8,
            SourceLayout::Gray16 => Self::GrayWide,
            SourceLayout::GrayAlpha16 => Self::GrayAlphaWide,
            SourceLayout::Rgb8
            | SourceLayout::Rgba8
            | SourceLayout::Rgb16
            | SourceLayout::Rgba16 => Self::PassThrough,
        }
    }
}

/// Normalize a raster into the encoder's interleaved RGB/RGBA layout.
///
/// `pixels` holds `width * height` tightly packed pixels in `layout`; wide
/// samples are native-endian `u16`. Extra trailing bytes are ignored. The
/// output has the same dimensions, the source's alpha presence and sample
/// width, and a row stride of `width * channels * bytes_per_sample`.
///
/// ```
/// use zenavif_prep::{transcode, SourceLayout};
///
/// let out = transcode(&[200], 1, 1, SourceLayout::Gray8)?;
/// assert_eq!(out.pixels(), &[200, 200, 200]);
/// # Ok::<(), zenavif_prep::PrepError>(())
/// ```
pub fn transcode(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: SourceLayout,
) -> Result<EncoderBuffer<'_>, PrepError> {
    transcode_with(pixels, width, height, layout, None, &enough::Unstoppable)
}

pub(crate) fn transcode_with<'a>(
    pixels: &'a [u8],
    width: u32,
    height: u32,
    layout: SourceLayout,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<EncoderBuffer<'a>, PrepError> {
    if width == 0 || height == 0 {
        return Err(PrepError::ZeroDimensions { width, height });
    }
    let limits = limits.unwrap_or(&Limits::NONE);
    limits.check_dimensions(width, height)?;

    let w = width as usize;
    let h = height as usize;
    let expected = w
        .checked_mul(h)
        .and_then(|wh| wh.checked_mul(layout.bytes_per_pixel()))
        .ok_or(PrepError::DimensionsTooLarge { width, height })?;
    if pixels.len() < expected {
        return Err(PrepError::BufferTooSmall {
            needed: expected,
            actual: pixels.len(),
        });
    }

    let target = layout.target();
    let path = TranscodePath::for_layout(layout);

    if path == TranscodePath::PassThrough {
        tracing::debug!(?layout, width, height, "pass-through, no copy");
        return Ok(EncoderBuffer::borrowed(
            &pixels[..expected],
            width,
            height,
            target,
        ));
    }

    let out_bytes = limits.check_output(target, width, height)?;

    stop.check()?;

    let mut out = Vec::new();
    out.try_reserve_exact(out_bytes)
        .map_err(|_| PrepError::OutOfMemory { bytes: out_bytes })?;

    tracing::debug!(?layout, ?path, width, height, out_bytes, "expanding gray");

    let src = &pixels[..expected];
    let src_stride = w * layout.bytes_per_pixel();
    match path {
        TranscodePath::Gray8 => expand_gray8(src, src_stride, &mut out, stop)?,
        TranscodePath::GrayAlpha8 => expand_gray_alpha8(src, src_stride, &mut out, stop)?,
        TranscodePath::GrayWide => expand_gray_wide(src, src_stride, &mut out, stop)?,
        TranscodePath::GrayAlphaWide => {
            expand_gray_alpha_wide(src, src_stride, &mut out, stop)?
        }
        TranscodePath::PassThrough => unreachable!("pass-through returns early"),
    }

    debug_assert_eq!(out.len(), out_bytes);
    Ok(EncoderBuffer::owned(out, width, height, target))
}

fn expand_gray8(
    src: &[u8],
    src_stride: usize,
    out: &mut Vec<u8>,
    stop: &dyn Stop,
) -> Result<(), PrepError> {
    for (row_idx, row) in src.chunks_exact(src_stride).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for &g in row {
            out.extend_from_slice(&[g, g, g]);
        }
    }
    Ok(())
}

#[cfg(not(feature = "simd"))]
fn expand_gray_alpha8(
    src: &[u8],
    src_stride: usize,
    out: &mut Vec<u8>,
    stop: &dyn Stop,
) -> Result<(), PrepError> {
    for (row_idx, row) in src.chunks_exact(src_stride).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for px in row.chunks_exact(2) {
            out.extend_from_slice(&[px[0], px[0], px[0], px[1]]);
        }
    }
    Ok(())
}

#[cfg(feature = "simd")]
fn expand_gray_alpha8(
    src: &[u8],
    src_stride: usize,
    out: &mut Vec<u8>,
    stop: &dyn Stop,
) -> Result<(), PrepError> {
    // Capacity was reserved exactly; resize does not reallocate.
    let dst_stride = src_stride * 2;
    out.resize(src.len() * 2, 0);
    for (row_idx, (row, dst)) in src
        .chunks_exact(src_stride)
        .zip(out.chunks_exact_mut(dst_stride))
        .enumerate()
    {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        garb::bytes::gray_alpha_to_rgba(row, dst).map_err(|_| PrepError::BufferTooSmall {
            needed: dst_stride,
            actual: dst.len(),
        })?;
    }
    Ok(())
}

fn expand_gray_wide(
    src: &[u8],
    src_stride: usize,
    out: &mut Vec<u8>,
    stop: &dyn Stop,
) -> Result<(), PrepError> {
    for (row_idx, row) in src.chunks_exact(src_stride).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for s in row.chunks_exact(2) {
            let (lo, hi) = (s[0], s[1]);
            out.extend_from_slice(&[lo, hi, lo, hi, lo, hi]);
        }
    }
    Ok(())
}

fn expand_gray_alpha_wide(
    src: &[u8],
    src_stride: usize,
    out: &mut Vec<u8>,
    stop: &dyn Stop,
) -> Result<(), PrepError> {
    for (row_idx, row) in src.chunks_exact(src_stride).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for px in row.chunks_exact(4) {
            let (g0, g1, a0, a1) = (px[0], px[1], px[2], px[3]);
            out.extend_from_slice(&[g0, g1, g0, g1, g0, g1, a0, a1]);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::{RgbFormat, SampleDepth, TargetLayout};
    use alloc::vec;
    use core::sync::atomic::{AtomicUsize, Ordering};
    use enough::{StopReason, Unstoppable};

    fn wide(samples: &[u16]) -> Vec<u8> {
        samples.iter().flat_map(|s| s.to_ne_bytes()).collect()
    }

    #[test]
    fn every_layout_has_a_path() {
        assert_eq!(
            TranscodePath::for_layout(SourceLayout::Gray8),
            TranscodePath::Gray8
        );
        assert_eq!(
            TranscodePath::for_layout(SourceLayout::GrayAlpha8),
            TranscodePath::GrayAlpha8
        );
        assert_eq!(
            TranscodePath::for_layout(SourceLayout::Gray16),
            TranscodePath::GrayWide
        );
        assert_eq!(
            TranscodePath::for_layout(SourceLayout::GrayAlpha16),
            TranscodePath::GrayAlphaWide
        );
        for layout in [
            SourceLayout::Rgb8,
            SourceLayout::Rgba8,
            SourceLayout::Rgb16,
            SourceLayout::Rgba16,
        ] {
            assert_eq!(TranscodePath::for_layout(layout), TranscodePath::PassThrough);
        }
    }

    #[test]
    fn gray8_single_pixel() {
        let out = transcode(&[200], 1, 1, SourceLayout::Gray8).unwrap();
        assert_eq!(out.pixels(), &[200, 200, 200]);
        assert_eq!(out.layout, TargetLayout::RGB8);
        assert_eq!(out.row_stride(), 3);
    }

    #[test]
    fn gray_alpha8_keeps_alpha() {
        let src = [10, 255, 20, 128, 30, 0];
        let out = transcode(&src, 3, 1, SourceLayout::GrayAlpha8).unwrap();
        assert_eq!(
            out.pixels(),
            &[10, 10, 10, 255, 20, 20, 20, 128, 30, 30, 30, 0]
        );
        assert_eq!(out.format(), RgbFormat::Rgba);
        assert_eq!(out.row_stride(), 12);
    }

    #[test]
    fn gray_wide_replicates_u16() {
        let src = wide(&[1023, 4095]);
        let out = transcode(&src, 1, 2, SourceLayout::Gray16).unwrap();
        let samples: Vec<u16> = out.samples_u16().unwrap().collect();
        assert_eq!(samples, [1023, 1023, 1023, 4095, 4095, 4095]);
        assert_eq!(out.depth(), SampleDepth::Wide);
        assert_eq!(out.row_stride(), 6);
    }

    #[test]
    fn gray_alpha_wide_replicates_u16() {
        let src = wide(&[700, 65535, 3, 9]);
        let out = transcode(&src, 2, 1, SourceLayout::GrayAlpha16).unwrap();
        let samples: Vec<u16> = out.samples_u16().unwrap().collect();
        assert_eq!(samples, [700, 700, 700, 65535, 3, 3, 3, 9]);
        assert_eq!(out.row_stride(), 16);
    }

    #[test]
    fn rgb_passes_through_borrowed() {
        let src = [1, 2, 3, 4, 5, 6, 99];
        let out = transcode(&src, 2, 1, SourceLayout::Rgb8).unwrap();
        assert!(out.is_borrowed());
        assert_eq!(out.pixels(), &src[..6]);
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert!(matches!(
            transcode(&[], 0, 4, SourceLayout::Gray8),
            Err(PrepError::ZeroDimensions { width: 0, height: 4 })
        ));
    }

    #[test]
    fn short_buffer_rejected() {
        let err = transcode(&[0; 5], 3, 2, SourceLayout::Gray8).unwrap_err();
        assert!(matches!(
            err,
            PrepError::BufferTooSmall {
                needed: 6,
                actual: 5
            }
        ));
    }

    #[test]
    fn memory_limit_applies_to_expansion() {
        let limits = Limits::NONE.with_max_output_bytes(8);
        let src = [0u8; 4];
        let err = transcode_with(&src, 2, 2, SourceLayout::Gray8, Some(&limits), &Unstoppable)
            .unwrap_err();
        assert!(matches!(err, PrepError::LimitExceeded(_)));
    }

    #[test]
    fn cancelled_before_allocation() {
        struct Cancelled;
        impl Stop for Cancelled {
            fn check(&self) -> Result<(), StopReason> {
                Err(StopReason::Cancelled)
            }
        }
        let src = vec![0u8; 16];
        let err = transcode_with(&src, 4, 4, SourceLayout::Gray8, None, &Cancelled).unwrap_err();
        assert!(matches!(err, PrepError::Cancelled(_)));
    }

    /// Cancels on the `n`th check, counting from 1.
    struct CancelOnCall {
        n: usize,
        calls: AtomicUsize,
    }

    impl CancelOnCall {
        fn new(n: usize) -> Self {
            Self {
                n,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::Relaxed)
        }
    }

    impl Stop for CancelOnCall {
        fn check(&self) -> Result<(), StopReason> {
            let call = self.calls.fetch_add(1, Ordering::Relaxed) + 1;
            if call >= self.n {
                Err(StopReason::Cancelled)
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn cancelled_between_rows() {
        // 40 rows: one check before allocating, then rows 0, 16 and 32.
        let src = vec![1u8; 3 * 40];
        let stop = CancelOnCall::new(3);
        let err = transcode_with(&src, 3, 40, SourceLayout::Gray8, None, &stop).unwrap_err();
        assert!(matches!(err, PrepError::Cancelled(StopReason::Cancelled)));
        assert_eq!(stop.calls(), 3);

        let src = vec![0u8; 2 * 4 * 40];
        let stop = CancelOnCall::new(4);
        let err = transcode_with(&src, 2, 40, SourceLayout::GrayAlpha16, None, &stop).unwrap_err();
        assert!(matches!(err, PrepError::Cancelled(_)));
        assert_eq!(stop.calls(), 4);
    }

    #[test]
    fn rows_checked_every_sixteen() {
        let stop = CancelOnCall::new(usize::MAX);
        for (layout, bpp) in [(SourceLayout::Gray8, 1), (SourceLayout::GrayAlpha8, 2)] {
            let src = vec![0u8; bpp * 40];
            transcode_with(&src, 1, 40, layout, None, &stop).unwrap();
        }
        // Per frame: before allocating, then rows 0, 16 and 32.
        assert_eq!(stop.calls(), 8);
    }
}
