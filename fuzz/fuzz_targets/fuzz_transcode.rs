#![no_main]
use libfuzzer_sys::fuzz_target;
use zenavif_prep::*;

const LAYOUTS: [SourceLayout; 8] = [
    SourceLayout::Gray8,
    SourceLayout::GrayAlpha8,
    SourceLayout::Gray16,
    SourceLayout::GrayAlpha16,
    SourceLayout::Rgb8,
    SourceLayout::Rgba8,
    SourceLayout::Rgb16,
    SourceLayout::Rgba16,
];

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }
    let layout = LAYOUTS[data[0] as usize % LAYOUTS.len()];
    let width = u32::from(data[1] % 64);
    let height = u32::from(data[2] % 64);
    let pixels = &data[3..];

    // Must never panic, whatever the buffer length
    let Ok(out) = transcode(pixels, width, height, layout) else {
        return;
    };

    let bps = layout.depth().bytes_per_sample();
    let in_px = layout.bytes_per_pixel();
    let out_px = out.layout.bytes_per_pixel();
    let count = width as usize * height as usize;
    assert_eq!(out.pixels().len(), count * out_px);

    for (src, dst) in pixels
        .chunks_exact(in_px)
        .zip(out.pixels().chunks_exact(out_px))
        .take(count)
    {
        let src: Vec<&[u8]> = src.chunks_exact(bps).collect();
        let dst: Vec<&[u8]> = dst.chunks_exact(bps).collect();
        match layout.shape() {
            ChannelShape::Gray => assert!(dst.iter().all(|d| *d == src[0])),
            ChannelShape::GrayAlpha => {
                assert!(dst[..3].iter().all(|d| *d == src[0]));
                assert_eq!(dst[3], src[1]);
            }
            ChannelShape::Rgb | ChannelShape::Rgba => assert_eq!(src, dst),
        }
    }
});
