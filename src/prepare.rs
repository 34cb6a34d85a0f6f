use enough::Stop;

use crate::buffer::EncoderBuffer;
use crate::error::PrepError;
use crate::limits::Limits;
use crate::pixel::SourceLayout;
use crate::policy::TilingPolicy;
use crate::tiles::{TileGrid, plan_tiles_with};
use crate::transcode::transcode_with;

/// A frame ready for the encoder: normalized pixels plus tile grid.
#[derive(Clone, Debug)]
pub struct PreparedFrame<'a> {
    pub buffer: EncoderBuffer<'a>,
    pub tiles: TileGrid,
}

impl PreparedFrame<'_> {
    pub fn width(&self) -> u32 {
        self.buffer.width
    }

    pub fn height(&self) -> u32 {
        self.buffer.height
    }

    pub fn has_alpha(&self) -> bool {
        self.buffer.has_alpha()
    }
}

/// Builder for preparing one raster for encoding.
///
/// ```
/// use zenavif_prep::{PrepareRequest, SourceLayout, TileGrid, Unstoppable};
///
/// let gray = vec![128u8; 64 * 64];
/// let frame = PrepareRequest::new(&gray, 64, 64, SourceLayout::Gray8)
///     .prepare(Unstoppable)?;
/// assert_eq!(frame.tiles, TileGrid::SINGLE);
/// assert_eq!(frame.buffer.pixels().len(), 64 * 64 * 3);
/// # Ok::<(), zenavif_prep::PrepError>(())
/// ```
#[derive(Clone, Debug)]
pub struct PrepareRequest<'a> {
    pixels: &'a [u8],
    width: u32,
    height: u32,
    layout: SourceLayout,
    limits: Option<&'a Limits>,
    policy: TilingPolicy,
}

impl<'a> PrepareRequest<'a> {
    pub fn new(pixels: &'a [u8], width: u32, height: u32, layout: SourceLayout) -> Self {
        Self {
            pixels,
            width,
            height,
            layout,
            limits: None,
            policy: TilingPolicy::AV1,
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_policy(mut self, policy: TilingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn layout(&self) -> SourceLayout {
        self.layout
    }

    /// Transcode the raster and plan its tiles.
    ///
    /// `stop` is checked before allocation and every 16 rows; cancellation
    /// returns an error and discards the partial buffer.
    pub fn prepare(self, stop: impl Stop) -> Result<PreparedFrame<'a>, PrepError> {
        let buffer = transcode_with(
            self.pixels,
            self.width,
            self.height,
            self.layout,
            self.limits,
            &stop,
        )?;
        let tiles = plan_tiles_with(&self.policy, self.width, self.height);
        tracing::debug!(
            width = self.width,
            height = self.height,
            layout = ?self.layout,
            borrowed = buffer.is_borrowed(),
            cols_log2 = tiles.cols_log2,
            rows_log2 = tiles.rows_log2,
            "frame prepared"
        );
        Ok(PreparedFrame { buffer, tiles })
    }
}
