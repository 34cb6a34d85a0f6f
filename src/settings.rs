//! Caller-supplied encoder configuration and the parameter set handed to
//! the AV1 encoder.

use crate::pixel::SampleDepth;
use crate::tiles::TileGrid;

/// Best (lowest) quantizer.
pub const QUANTIZER_BEST_QUALITY: u8 = 0;
/// Worst (highest) quantizer.
pub const QUANTIZER_WORST_QUALITY: u8 = 63;
/// Quantizer that makes a plane lossless.
pub const QUANTIZER_LOSSLESS: u8 = 0;
/// Slowest encoder speed preset.
pub const SPEED_SLOWEST: u8 = 0;
/// Fastest encoder speed preset.
pub const SPEED_FASTEST: u8 = 10;

/// YUV chroma subsampling of the encoded image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChromaSubsampling {
    Yuv444,
    Yuv422,
    #[default]
    Yuv420,
    /// Monochrome.
    Yuv400,
}

/// Which AV1 encoder implementation to ask for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CodecChoice {
    #[default]
    Auto,
    Aom,
    Rav1e,
    Svt,
}

/// Bit depth used for precision above 8 bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WideDepth {
    #[default]
    Ten,
    Twelve,
}

/// Sample precision of the host image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostPrecision {
    U8,
    U16,
    U32,
    Half,
    Float,
    Double,
}

/// Bit depth of the encoded image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputDepth {
    Eight,
    Ten,
    Twelve,
}

impl OutputDepth {
    /// 8-bit hosts stay 8-bit; everything else is saved at `wide`.
    pub fn for_precision(precision: HostPrecision, wide: WideDepth) -> Self {
        match (precision, wide) {
            (HostPrecision::U8, _) => Self::Eight,
            (_, WideDepth::Ten) => Self::Ten,
            (_, WideDepth::Twelve) => Self::Twelve,
        }
    }

    pub fn bits(&self) -> u32 {
        match self {
            Self::Eight => 8,
            Self::Ten => 10,
            Self::Twelve => 12,
        }
    }

    /// Storage width the host should fetch pixels in.
    pub fn sample_depth(&self) -> SampleDepth {
        match self {
            Self::Eight => SampleDepth::Eight,
            Self::Ten | Self::Twelve => SampleDepth::Wide,
        }
    }
}

/// Export settings as the user chose them. Out-of-range values are allowed
/// here and clamped by [`EncoderSettings::params`].
#[derive(Clone, Debug, PartialEq)]
pub struct EncoderSettings {
    pub min_quantizer: i32,
    pub max_quantizer: i32,
    /// Upper quantizer for the alpha plane.
    pub alpha_quantizer: i32,
    pub speed: i32,
    pub chroma: ChromaSubsampling,
    pub codec: CodecChoice,
    pub wide_depth: WideDepth,
    pub save_color_profile: bool,
    pub save_exif: bool,
    pub save_xmp: bool,
    /// Encoder worker threads.
    pub threads: i32,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            min_quantizer: i32::from(QUANTIZER_BEST_QUALITY),
            max_quantizer: 40,
            alpha_quantizer: i32::from(QUANTIZER_BEST_QUALITY),
            speed: 6,
            chroma: ChromaSubsampling::default(),
            codec: CodecChoice::default(),
            wide_depth: WideDepth::default(),
            save_color_profile: true,
            save_exif: false,
            save_xmp: false,
            threads: 1,
        }
    }
}

impl EncoderSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quantizers(mut self, min: i32, max: i32) -> Self {
        self.min_quantizer = min;
        self.max_quantizer = max;
        self
    }

    pub fn with_alpha_quantizer(mut self, q: i32) -> Self {
        self.alpha_quantizer = q;
        self
    }

    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_chroma(mut self, chroma: ChromaSubsampling) -> Self {
        self.chroma = chroma;
        self
    }

    pub fn with_codec(mut self, codec: CodecChoice) -> Self {
        self.codec = codec;
        self
    }

    pub fn with_wide_depth(mut self, wide: WideDepth) -> Self {
        self.wide_depth = wide;
        self
    }

    pub fn with_metadata(mut self, color_profile: bool, exif: bool, xmp: bool) -> Self {
        self.save_color_profile = color_profile;
        self.save_exif = exif;
        self.save_xmp = xmp;
        self
    }

    pub fn with_threads(mut self, threads: i32) -> Self {
        self.threads = threads;
        self
    }

    /// Output depth for a host image of `precision`.
    pub fn output_depth(&self, precision: HostPrecision) -> OutputDepth {
        OutputDepth::for_precision(precision, self.wide_depth)
    }

    /// Clamp the settings into encoder parameters for one frame.
    ///
    /// The color quantizer range is clamped to
    /// [`QUANTIZER_BEST_QUALITY`]..=[`QUANTIZER_WORST_QUALITY`] with
    /// `min <= max`; speed to [`SPEED_SLOWEST`]..=[`SPEED_FASTEST`]; threads
    /// to at least one. Alpha quantizers are only set when the frame has
    /// alpha, with the lower bound at [`QUANTIZER_LOSSLESS`].
    pub fn params(&self, tiles: TileGrid, depth: OutputDepth, has_alpha: bool) -> EncodeParams {
        let best = i32::from(QUANTIZER_BEST_QUALITY);
        let worst = i32::from(QUANTIZER_WORST_QUALITY);

        let max_quantizer = self.max_quantizer.clamp(best, worst);
        let min_quantizer = self.min_quantizer.clamp(best, max_quantizer);
        let speed = self
            .speed
            .clamp(i32::from(SPEED_SLOWEST), i32::from(SPEED_FASTEST));

        let alpha_quantizers = has_alpha.then(|| AlphaQuantizers {
            min: QUANTIZER_LOSSLESS,
            max: self.alpha_quantizer.clamp(best, worst) as u8,
        });

        EncodeParams {
            min_quantizer: min_quantizer as u8,
            max_quantizer: max_quantizer as u8,
            alpha_quantizers,
            speed: speed as u8,
            tiles,
            max_threads: self.threads.max(1) as u32,
            codec: self.codec,
            chroma: self.chroma,
            depth,
            save_color_profile: self.save_color_profile,
            save_exif: self.save_exif,
            save_xmp: self.save_xmp,
        }
    }
}

/// Quantizer range for the alpha plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlphaQuantizers {
    pub min: u8,
    pub max: u8,
}

/// Everything the AV1 encoder needs besides the pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodeParams {
    pub min_quantizer: u8,
    pub max_quantizer: u8,
    /// `None` when the frame has no alpha plane.
    pub alpha_quantizers: Option<AlphaQuantizers>,
    pub speed: u8,
    pub tiles: TileGrid,
    pub max_threads: u32,
    pub codec: CodecChoice,
    pub chroma: ChromaSubsampling,
    pub depth: OutputDepth,
    pub save_color_profile: bool,
    pub save_exif: bool,
    pub save_xmp: bool,
}
