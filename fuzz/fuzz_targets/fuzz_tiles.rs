#![no_main]
use libfuzzer_sys::fuzz_target;
use zenavif_prep::*;

fuzz_target!(|dims: (u32, u32)| {
    let (width, height) = dims;
    let grid = plan_tiles(width, height);
    if width == 0 || height == 0 {
        assert_eq!(grid, TileGrid::SINGLE);
        return;
    }

    let bounds = TileBounds::compute(&TilingPolicy::AV1, width, height);
    assert!(grid.cols_log2 <= bounds.max_cols_log2);
    assert!(grid.rows_log2 <= bounds.max_rows_log2);
    if grid.cols_log2 + grid.rows_log2 < bounds.min_tiles_log2 {
        assert_eq!(grid.cols_log2, bounds.max_cols_log2);
        assert_eq!(grid.rows_log2, bounds.max_rows_log2);
    }
});
