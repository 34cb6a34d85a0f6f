/// Channel arrangement of a host raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelShape {
    /// Single luminance channel.
    Gray,
    /// Luminance followed by alpha.
    GrayAlpha,
    /// Interleaved R, G, B.
    Rgb,
    /// Interleaved R, G, B, A.
    Rgba,
}

impl ChannelShape {
    /// Number of channels per pixel.
    pub fn channels(&self) -> usize {
        match self {
            Self::Gray => 1,
            Self::GrayAlpha => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Whether the last channel is alpha.
    pub fn has_alpha(&self) -> bool {
        matches!(self, Self::GrayAlpha | Self::Rgba)
    }

    /// Whether this shape carries a single luminance channel.
    pub fn is_gray(&self) -> bool {
        matches!(self, Self::Gray | Self::GrayAlpha)
    }
}

/// Storage width of one sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SampleDepth {
    /// One byte per sample.
    Eight,
    /// Two bytes per sample (native endian). Holds 9- to 16-bit values;
    /// 10- and 12-bit data is stored unscaled in the 16-bit slot.
    Wide,
}

impl SampleDepth {
    /// Pick the storage width for a bit depth.
    ///
    /// 1..=8 bits map to [`SampleDepth::Eight`], 9..=16 bits to
    /// [`SampleDepth::Wide`].
    pub fn from_bits(bits: u32) -> Result<Self, crate::PrepError> {
        match bits {
            1..=8 => Ok(Self::Eight),
            9..=16 => Ok(Self::Wide),
            _ => Err(crate::PrepError::UnsupportedDepth(bits)),
        }
    }

    /// Bytes per sample.
    pub fn bytes_per_sample(&self) -> usize {
        match self {
            Self::Eight => 1,
            Self::Wide => 2,
        }
    }

    /// Bits per sample slot as reported to the encoder (8 or 16).
    pub fn slot_bits(&self) -> u32 {
        match self {
            Self::Eight => 8,
            Self::Wide => 16,
        }
    }
}

/// Memory layout of a source raster: channel shape and sample depth.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceLayout {
    /// 8-bit grayscale.
    Gray8,
    /// 8-bit grayscale + alpha.
    GrayAlpha8,
    /// Wide grayscale (u16, native endian).
    Gray16,
    /// Wide grayscale + alpha (u16, native endian).
    GrayAlpha16,
    /// 8-bit RGB.
    Rgb8,
    /// 8-bit RGBA.
    Rgba8,
    /// Wide RGB (u16, native endian).
    Rgb16,
    /// Wide RGBA (u16, native endian).
    Rgba16,
}

impl SourceLayout {
    /// Combine a channel shape and sample depth.
    pub fn new(shape: ChannelShape, depth: SampleDepth) -> Self {
        match (shape, depth) {
            (ChannelShape::Gray, SampleDepth::Eight) => Self::Gray8,
            (ChannelShape::GrayAlpha, SampleDepth::Eight) => Self::GrayAlpha8,
            (ChannelShape::Rgb, SampleDepth::Eight) => Self::Rgb8,
            (ChannelShape::Rgba, SampleDepth::Eight) => Self::Rgba8,
            (ChannelShape::Gray, SampleDepth::Wide) => Self::Gray16,
            (ChannelShape::GrayAlpha, SampleDepth::Wide) => Self::GrayAlpha16,
            (ChannelShape::Rgb, SampleDepth::Wide) => Self::Rgb16,
            (ChannelShape::Rgba, SampleDepth::Wide) => Self::Rgba16,
        }
    }

    pub fn shape(&self) -> ChannelShape {
        match self {
            Self::Gray8 | Self::Gray16 => ChannelShape::Gray,
            Self::GrayAlpha8 | Self::GrayAlpha16 => ChannelShape::GrayAlpha,
            Self::Rgb8 | Self::Rgb16 => ChannelShape::Rgb,
            Self::Rgba8 | Self::Rgba16 => ChannelShape::Rgba,
        }
    }

    pub fn depth(&self) -> SampleDepth {
        match self {
            Self::Gray8 | Self::GrayAlpha8 | Self::Rgb8 | Self::Rgba8 => SampleDepth::Eight,
            Self::Gray16 | Self::GrayAlpha16 | Self::Rgb16 | Self::Rgba16 => SampleDepth::Wide,
        }
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        self.shape().channels()
    }

    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        self.channels() * self.depth().bytes_per_sample()
    }

    pub fn has_alpha(&self) -> bool {
        self.shape().has_alpha()
    }

    /// The interleaved layout the encoder receives for this source.
    pub fn target(&self) -> TargetLayout {
        let format = if self.has_alpha() {
            RgbFormat::Rgba
        } else {
            RgbFormat::Rgb
        };
        TargetLayout {
            format,
            depth: self.depth(),
        }
    }
}

/// Channel order of an encoder-ready buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RgbFormat {
    Rgb,
    Rgba,
}

impl RgbFormat {
    pub fn channels(&self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// Layout of an encoder-ready buffer: RGB or RGBA at 8-bit or wide samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TargetLayout {
    pub format: RgbFormat,
    pub depth: SampleDepth,
}

impl TargetLayout {
    pub const RGB8: Self = Self {
        format: RgbFormat::Rgb,
        depth: SampleDepth::Eight,
    };
    pub const RGBA8: Self = Self {
        format: RgbFormat::Rgba,
        depth: SampleDepth::Eight,
    };
    pub const RGB16: Self = Self {
        format: RgbFormat::Rgb,
        depth: SampleDepth::Wide,
    };
    pub const RGBA16: Self = Self {
        format: RgbFormat::Rgba,
        depth: SampleDepth::Wide,
    };

    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        self.format.channels() * self.depth.bytes_per_sample()
    }

    /// Row stride in bytes. Rows are never padded.
    pub fn row_stride(&self, width: u32) -> usize {
        width as usize * self.bytes_per_pixel()
    }

    /// Bytes in a `width`×`height` frame, or `None` if not addressable.
    pub fn frame_bytes(&self, width: u32, height: u32) -> Option<usize> {
        (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(self.bytes_per_pixel())
    }
}

/// Typed pixels an 8-bit encoder buffer can be viewed as.
#[cfg(feature = "rgb")]
pub trait EncodePixel: Copy {
    fn layout() -> TargetLayout;
}

#[cfg(feature = "rgb")]
impl EncodePixel for rgb::Rgb<u8> {
    fn layout() -> TargetLayout {
        TargetLayout::RGB8
    }
}

#[cfg(feature = "rgb")]
impl EncodePixel for rgb::Rgba<u8> {
    fn layout() -> TargetLayout {
        TargetLayout::RGBA8
    }
}
