//! Tile grid planning.
//!
//! Picks `tile_cols_log2`/`tile_rows_log2` for a frame so that no tile is
//! wider than the policy's maximum tile width and no tile covers more than
//! the maximum tile area, using as few tiles as that allows. Splits beyond
//! the width-driven column minimum go to whichever dimension of the current
//! tile is longer, so tiles stay close to square.
//!
//! The result must match the reference encoder's decision exactly: two
//! encoders given the same frame produce the same partition.

use crate::policy::TilingPolicy;

/// Tile partition, as log2 counts of columns and rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TileGrid {
    pub cols_log2: u32,
    pub rows_log2: u32,
}

impl TileGrid {
    pub const SINGLE: Self = Self {
        cols_log2: 0,
        rows_log2: 0,
    };

    /// Number of tile columns, saturating at `u32::MAX`.
    pub fn cols(&self) -> u32 {
        1u32.checked_shl(self.cols_log2).unwrap_or(u32::MAX)
    }

    /// Number of tile rows, saturating at `u32::MAX`.
    pub fn rows(&self) -> u32 {
        1u32.checked_shl(self.rows_log2).unwrap_or(u32::MAX)
    }

    /// Total tile count.
    pub fn tile_count(&self) -> u64 {
        u64::from(self.cols()) * u64::from(self.rows())
    }
}

/// Intermediate quantities of one planning run, in superblock units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileBounds {
    /// Frame width in superblocks.
    pub sb_cols: u64,
    /// Frame height in superblocks.
    pub sb_rows: u64,
    /// Column splits needed to keep every tile within the width bound.
    pub min_cols_log2: u32,
    /// Column splits allowed by the frame width and column cap.
    pub max_cols_log2: u32,
    /// Row splits allowed by the frame height and row cap.
    pub max_rows_log2: u32,
    /// Total splits needed to keep every tile within the width and area bounds.
    pub min_tiles_log2: u32,
}

impl TileBounds {
    /// Derive the bounds for a `width`×`height` frame.
    pub fn compute(policy: &TilingPolicy, width: u32, height: u32) -> Self {
        let mi_cols = mi_units(width);
        let mi_rows = mi_units(height);
        let shift = policy.mi_per_superblock_log2().min(u64::BITS - 1);
        let round = (1u64 << shift) - 1;
        let sb_cols = (mi_cols + round) >> shift;
        let sb_rows = (mi_rows + round) >> shift;

        let min_cols_log2 = tile_log2(policy.max_tile_width_sb(), sb_cols);
        let max_cols_log2 = tile_log2(1, sb_cols.min(u64::from(policy.max_tile_cols)));
        let max_rows_log2 = tile_log2(1, sb_rows.min(u64::from(policy.max_tile_rows)));
        let min_tiles_log2 =
            min_cols_log2.max(tile_log2(policy.max_tile_area_sb(), sb_cols * sb_rows));

        Self {
            sb_cols,
            sb_rows,
            min_cols_log2,
            max_cols_log2,
            max_rows_log2,
            min_tiles_log2,
        }
    }

    /// Whether the whole frame fits in one tile.
    pub fn fits_single_tile(&self) -> bool {
        self.min_tiles_log2 == 0
    }
}

/// Plan the tile grid for a frame under AV1 bounds.
///
/// ```
/// use zenavif_prep::{plan_tiles, TileGrid};
///
/// assert_eq!(plan_tiles(64, 64), TileGrid::SINGLE);
/// assert!(plan_tiles(5000, 3000).cols_log2 >= 1);
/// ```
pub fn plan_tiles(width: u32, height: u32) -> TileGrid {
    plan_tiles_with(&TilingPolicy::AV1, width, height)
}

/// Plan the tile grid for a frame under explicit bounds.
///
/// Frames too large for any legal grid get the most splits the caps allow.
/// A frame with a zero dimension is a single tile.
pub fn plan_tiles_with(policy: &TilingPolicy, width: u32, height: u32) -> TileGrid {
    if width == 0 || height == 0 {
        return TileGrid::SINGLE;
    }

    let bounds = TileBounds::compute(policy, width, height);

    let mut grid = TileGrid {
        cols_log2: bounds.min_cols_log2.min(bounds.max_cols_log2),
        rows_log2: 0,
    };

    let mut remaining = bounds.min_tiles_log2.saturating_sub(grid.cols_log2);
    let mut tile_w = u64::from(width) >> grid.cols_log2;
    let mut tile_h = u64::from(height);

    while remaining > 0 {
        let cols_free = grid.cols_log2 < bounds.max_cols_log2;
        let rows_free = grid.rows_log2 < bounds.max_rows_log2;

        let split_cols = if tile_w >= tile_h {
            match (cols_free, rows_free) {
                (true, _) => true,
                (false, true) => false,
                (false, false) => break,
            }
        } else {
            match (rows_free, cols_free) {
                (true, _) => false,
                (false, true) => true,
                (false, false) => break,
            }
        };

        if split_cols {
            grid.cols_log2 += 1;
            tile_w >>= 1;
        } else {
            grid.rows_log2 += 1;
            tile_h >>= 1;
        }
        remaining -= 1;
        tracing::trace!(split_cols, tile_w, tile_h, remaining, "tile split");
    }

    tracing::debug!(
        width,
        height,
        cols_log2 = grid.cols_log2,
        rows_log2 = grid.rows_log2,
        min_tiles_log2 = bounds.min_tiles_log2,
        "planned tile grid"
    );
    grid
}

/// Frame extent in 4-px mode-info units, aligned to 8 px.
fn mi_units(px: u32) -> u64 {
    2 * ((u64::from(px) + 7) >> 3)
}

/// Smallest `k` such that `blk << k >= target`.
fn tile_log2(blk: u64, target: u64) -> u32 {
    let mut k = 0;
    while k < u64::BITS - 1 && (blk << k) < target {
        k += 1;
    }
    k
}
