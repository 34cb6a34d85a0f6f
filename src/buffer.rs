use alloc::borrow::Cow;
use alloc::vec::Vec;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::pixel::{RgbFormat, SampleDepth, TargetLayout};

/// Interleaved RGB/RGBA pixels ready for the encoder's RGB→YUV stage.
///
/// Pixels are borrowed when the source already had the target layout
/// (RGB/RGBA pass-through) and owned when gray data had to be expanded.
#[derive(Clone, Debug)]
pub struct EncoderBuffer<'a> {
    pixels: Cow<'a, [u8]>,
    pub width: u32,
    pub height: u32,
    pub layout: TargetLayout,
}

impl<'a> EncoderBuffer<'a> {
    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take the pixel data out of the buffer.
    pub fn into_pixels(self) -> Cow<'a, [u8]> {
        self.pixels
    }

    /// Take ownership of the pixel data (copies if borrowed).
    pub fn into_owned(self) -> EncoderBuffer<'static> {
        EncoderBuffer {
            pixels: Cow::Owned(self.pixels.into_owned()),
            width: self.width,
            height: self.height,
            layout: self.layout,
        }
    }

    /// Whether the pixel data is borrowed (zero-copy from the source raster).
    pub fn is_borrowed(&self) -> bool {
        matches!(self.pixels, Cow::Borrowed(_))
    }

    pub fn format(&self) -> RgbFormat {
        self.layout.format
    }

    pub fn depth(&self) -> SampleDepth {
        self.layout.depth
    }

    /// Bits per sample slot: 8, or 16 for wide samples.
    pub fn sample_bits(&self) -> u32 {
        self.layout.depth.slot_bits()
    }

    pub fn has_alpha(&self) -> bool {
        self.layout.format == RgbFormat::Rgba
    }

    /// Bytes per row. Rows are tightly packed.
    pub fn row_stride(&self) -> usize {
        self.layout.row_stride(self.width)
    }

    /// Iterate rows of pixel bytes.
    pub fn rows(&self) -> core::slice::ChunksExact<'_, u8> {
        // max(1) keeps chunks_exact valid for zero-width buffers, which
        // transcoding never produces.
        self.pixels.chunks_exact(self.row_stride().max(1))
    }

    /// Iterate wide samples as native-endian `u16`.
    ///
    /// Returns [`crate::PrepError::LayoutMismatch`] for 8-bit buffers.
    pub fn samples_u16(
        &self,
    ) -> Result<impl Iterator<Item = u16> + '_, crate::PrepError> {
        if self.layout.depth != SampleDepth::Wide {
            return Err(crate::PrepError::LayoutMismatch {
                expected: TargetLayout {
                    format: self.layout.format,
                    depth: SampleDepth::Wide,
                },
                actual: self.layout,
            });
        }
        Ok(self
            .pixels
            .chunks_exact(2)
            .map(|pair| u16::from_ne_bytes([pair[0], pair[1]])))
    }

    pub(crate) fn borrowed(data: &'a [u8], width: u32, height: u32, layout: TargetLayout) -> Self {
        Self {
            pixels: Cow::Borrowed(data),
            width,
            height,
            layout,
        }
    }

    pub(crate) fn owned(data: Vec<u8>, width: u32, height: u32, layout: TargetLayout) -> Self {
        Self {
            pixels: Cow::Owned(data),
            width,
            height,
            layout,
        }
    }

    /// Reinterpret 8-bit pixel data as a typed pixel slice.
    ///
    /// Returns [`crate::PrepError::LayoutMismatch`] if the layout doesn't match `P`.
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: crate::EncodePixel>(&self) -> Result<&[P], crate::PrepError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        if self.layout != P::layout() {
            return Err(crate::PrepError::LayoutMismatch {
                expected: P::layout(),
                actual: self.layout,
            });
        }
        Ok(self.pixels().as_pixels())
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of typed pixels.
    ///
    /// Returns [`crate::PrepError::LayoutMismatch`] if the layout doesn't match `P`.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: crate::EncodePixel>(
        &self,
    ) -> Result<imgref::ImgRef<'_, P>, crate::PrepError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgRef::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }

    /// Copy into an [`imgref::ImgVec`] of typed pixels.
    ///
    /// Returns [`crate::PrepError::LayoutMismatch`] if the layout doesn't match `P`.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec<P: crate::EncodePixel>(&self) -> Result<imgref::ImgVec<P>, crate::PrepError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgVec::new(
            pixels.to_vec(),
            self.width as usize,
            self.height as usize,
        ))
    }
}
