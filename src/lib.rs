//! # zenavif-prep
//!
//! Frame preparation for AV1/AVIF encoders: tile grid planning and
//! gray/RGB pixel transcoding.
//!
//! ## Tile planning
//!
//! [`plan_tiles`] picks `tile_cols_log2`/`tile_rows_log2` so that every tile
//! stays within AV1's 4096-pixel width and 4096×2304 area bounds with as few
//! tiles as possible, matching the reference encoder's choice exactly.
//! Bounds are named in [`policy`] and can be replaced with
//! [`plan_tiles_with`].
//!
//! ## Transcoding
//!
//! [`transcode`] turns a Gray, GrayAlpha, RGB or RGBA raster (8-bit or wide
//! 16-bit samples) into the interleaved RGB/RGBA buffer the encoder's
//! RGB→YUV conversion consumes:
//!
//! - Gray: `S → S S S`; GrayAlpha: `S A → S S S A` (one allocation).
//! - RGB/RGBA: zero-copy, the output borrows the input.
//!
//! Sample values are never rescaled.
//!
//! ## Non-Goals
//!
//! - The AV1 encoder itself (plug one in through [`FrameEncoder`])
//! - Metadata (ICC/EXIF/XMP) handling
//! - File I/O
//!
//! ## Usage
//!
//! ```
//! use zenavif_prep::{PrepareRequest, SourceLayout, Unstoppable};
//!
//! let (w, h) = (5000u32, 3000u32);
//! let gray = vec![0u8; (w * h) as usize];
//!
//! let frame = PrepareRequest::new(&gray, w, h, SourceLayout::Gray8)
//!     .prepare(Unstoppable)?;
//! assert_eq!(frame.buffer.row_stride(), w as usize * 3);
//! assert!(frame.tiles.cols_log2 >= 1);
//! # Ok::<(), zenavif_prep::PrepError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod buffer;
mod encoder;
mod error;
mod limits;
mod pixel;
pub mod policy;
mod prepare;
mod settings;
mod tiles;
mod transcode;

// Re-exports
pub use buffer::EncoderBuffer;
pub use encoder::{FrameEncoder, export};
pub use enough::{Stop, Unstoppable};
pub use error::PrepError;
pub use limits::Limits;
#[cfg(feature = "rgb")]
pub use pixel::EncodePixel;
pub use pixel::{ChannelShape, RgbFormat, SampleDepth, SourceLayout, TargetLayout};
pub use policy::TilingPolicy;
pub use prepare::{PrepareRequest, PreparedFrame};
pub use settings::{
    AlphaQuantizers, ChromaSubsampling, CodecChoice, EncodeParams, EncoderSettings, HostPrecision,
    OutputDepth, QUANTIZER_BEST_QUALITY, QUANTIZER_LOSSLESS, QUANTIZER_WORST_QUALITY,
    SPEED_FASTEST, SPEED_SLOWEST, WideDepth,
};
pub use tiles::{TileBounds, TileGrid, plan_tiles, plan_tiles_with};
pub use transcode::transcode;
