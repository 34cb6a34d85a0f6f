//! Codec tiling constants.
//!
//! AV1 bounds a tile's width and area and caps the number of tile columns and
//! rows. These values live here as named policy instead of literals in the
//! planner so other codec profiles can supply their own.

/// Edge of a minimal coding (mode-info) block in pixels, as log2.
pub const MI_SIZE_LOG2: u32 = 2;

/// Edge of an AV1 superblock in pixels, as log2 (128 px).
pub const SUPERBLOCK_SIZE_LOG2: u32 = 7;

/// Maximum tile width in pixels.
pub const MAX_TILE_WIDTH: u32 = 4096;

/// Maximum tile area in pixels.
pub const MAX_TILE_AREA: u32 = 4096 * 2304;

/// Maximum number of tile columns.
pub const MAX_TILE_COLS: u32 = 64;

/// Maximum number of tile rows.
pub const MAX_TILE_ROWS: u32 = 64;

/// Structural tiling bounds of a block-based codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TilingPolicy {
    /// Superblock edge in pixels, as log2.
    pub superblock_size_log2: u32,
    /// Maximum tile width in pixels.
    pub max_tile_width: u32,
    /// Maximum tile area in pixels.
    pub max_tile_area: u32,
    /// Maximum tile columns.
    pub max_tile_cols: u32,
    /// Maximum tile rows.
    pub max_tile_rows: u32,
}

impl TilingPolicy {
    /// AV1 main-profile bounds with 128×128 superblocks.
    pub const AV1: Self = Self {
        superblock_size_log2: SUPERBLOCK_SIZE_LOG2,
        max_tile_width: MAX_TILE_WIDTH,
        max_tile_area: MAX_TILE_AREA,
        max_tile_cols: MAX_TILE_COLS,
        max_tile_rows: MAX_TILE_ROWS,
    };

    /// Maximum tile width in superblocks. Zero when a superblock is wider
    /// than the limit.
    pub fn max_tile_width_sb(&self) -> u64 {
        u64::from(self.max_tile_width)
            .checked_shr(self.superblock_size_log2)
            .unwrap_or(0)
    }

    /// Maximum tile area in superblocks.
    pub fn max_tile_area_sb(&self) -> u64 {
        u64::from(self.max_tile_area)
            .checked_shr(self.superblock_size_log2.saturating_mul(2))
            .unwrap_or(0)
    }

    /// Mode-info blocks per superblock edge, as log2.
    pub(crate) fn mi_per_superblock_log2(&self) -> u32 {
        self.superblock_size_log2.saturating_sub(MI_SIZE_LOG2)
    }
}

impl Default for TilingPolicy {
    fn default() -> Self {
        Self::AV1
    }
}
