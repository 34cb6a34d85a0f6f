use enough::Unstoppable;
use zenavif_prep::*;

fn wide_bytes(samples: &[u16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_ne_bytes()).collect()
}

#[test]
fn gray8_single_pixel_replicates() {
    let out = transcode(&[200], 1, 1, SourceLayout::Gray8).unwrap();
    assert_eq!(out.pixels(), &[200, 200, 200]);
    assert_eq!(out.layout, TargetLayout::RGB8);
    assert!(!out.is_borrowed());
}

#[test]
fn rgba_wide_known_pattern_passes_through() {
    // 2x2, every sample distinct
    let samples: Vec<u16> = (0..16).map(|i| 1000 + i * 257).collect();
    let src = wide_bytes(&samples);

    let out = transcode(&src, 2, 2, SourceLayout::Rgba16).unwrap();
    assert_eq!(out.layout, TargetLayout::RGBA16);
    assert_eq!(out.row_stride(), 2 * 4 * 2);
    assert!(out.is_borrowed());
    let got: Vec<u16> = out.samples_u16().unwrap().collect();
    assert_eq!(got, samples);
}

#[test]
fn gray_alpha_wide_known_pattern() {
    // 2x2 of (gray, alpha)
    let src_samples = [100u16, 1, 200, 2, 300, 3, 4095, 4];
    let src = wide_bytes(&src_samples);

    let out = transcode(&src, 2, 2, SourceLayout::GrayAlpha16).unwrap();
    assert_eq!(out.layout, TargetLayout::RGBA16);

    let mut expected = Vec::new();
    for px in src_samples.chunks_exact(2) {
        expected.extend_from_slice(&[px[0], px[0], px[0], px[1]]);
    }
    let got: Vec<u16> = out.samples_u16().unwrap().collect();
    assert_eq!(got, expected);
}

#[test]
fn gray_wide_values_are_not_rescaled() {
    // 10-bit data in 16-bit slots stays 10-bit
    let src = wide_bytes(&[0, 512, 1023]);
    let out = transcode(&src, 3, 1, SourceLayout::Gray16).unwrap();
    let got: Vec<u16> = out.samples_u16().unwrap().collect();
    assert_eq!(got, [0, 0, 0, 512, 512, 512, 1023, 1023, 1023]);
}

#[test]
fn rgb8_is_zero_copy() {
    let src = [1u8, 2, 3, 4, 5, 6];
    let out = transcode(&src, 2, 1, SourceLayout::Rgb8).unwrap();
    assert!(out.is_borrowed());
    assert_eq!(out.pixels().as_ptr(), src.as_ptr());
    assert_eq!(out.pixels(), &src);
}

#[test]
fn trailing_bytes_are_ignored() {
    let src = [9u8, 8, 7, 6, 0xFF, 0xFF];
    let out = transcode(&src, 1, 1, SourceLayout::Rgba8).unwrap();
    assert_eq!(out.pixels(), &[9, 8, 7, 6]);

    let out = transcode(&src[..3], 3, 1, SourceLayout::Gray8).unwrap();
    assert_eq!(out.pixels().len(), 9);
}

#[test]
fn source_is_not_mutated() {
    let src = vec![10u8, 20, 30, 40];
    let copy = src.clone();
    let out = transcode(&src, 2, 1, SourceLayout::GrayAlpha8).unwrap();
    assert_eq!(out.pixels(), &[10, 10, 10, 20, 30, 30, 30, 40]);
    drop(out);
    assert_eq!(src, copy);
}

#[test]
fn owned_buffer_outlives_source() {
    let out = {
        let src = vec![5u8; 4];
        transcode(&src, 4, 1, SourceLayout::Gray8)
            .unwrap()
            .into_owned()
    };
    assert_eq!(out.pixels(), &[5u8; 12]);
}

#[test]
fn rows_have_unpadded_stride() {
    let src: Vec<u8> = (0..6).collect();
    let out = transcode(&src, 3, 2, SourceLayout::Gray8).unwrap();
    let rows: Vec<&[u8]> = out.rows().collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], &[0, 0, 0, 1, 1, 1, 2, 2, 2]);
    assert_eq!(rows[1], &[3, 3, 3, 4, 4, 4, 5, 5, 5]);
}

#[test]
fn zero_dimensions_rejected() {
    assert!(matches!(
        transcode(&[], 0, 4, SourceLayout::Gray8),
        Err(PrepError::ZeroDimensions { width: 0, height: 4 })
    ));
    assert!(matches!(
        transcode(&[], 4, 0, SourceLayout::Rgb16),
        Err(PrepError::ZeroDimensions { .. })
    ));
}

#[test]
fn short_buffer_rejected() {
    let err = transcode(&[0u8; 5], 2, 1, SourceLayout::Rgb8).unwrap_err();
    assert!(matches!(
        err,
        PrepError::BufferTooSmall {
            needed: 6,
            actual: 5
        }
    ));
}

#[test]
fn depth_from_bits() {
    assert_eq!(SampleDepth::from_bits(8).unwrap(), SampleDepth::Eight);
    assert_eq!(SampleDepth::from_bits(10).unwrap(), SampleDepth::Wide);
    assert_eq!(SampleDepth::from_bits(12).unwrap(), SampleDepth::Wide);
    assert!(matches!(
        SampleDepth::from_bits(32),
        Err(PrepError::UnsupportedDepth(32))
    ));
    let layout = SourceLayout::new(ChannelShape::GrayAlpha, SampleDepth::from_bits(12).unwrap());
    assert_eq!(layout, SourceLayout::GrayAlpha16);
}

#[test]
fn prepare_applies_limits() {
    let src = vec![0u8; 100 * 100];
    let limits = Limits {
        max_pixels: Some(1000),
        ..Default::default()
    };
    let err = PrepareRequest::new(&src, 100, 100, SourceLayout::Gray8)
        .with_limits(&limits)
        .prepare(Unstoppable)
        .unwrap_err();
    assert!(matches!(err, PrepError::LimitExceeded(_)));

    let limits = Limits {
        max_output_bytes: Some(100 * 100 * 3 - 1),
        ..Default::default()
    };
    let err = PrepareRequest::new(&src, 100, 100, SourceLayout::Gray8)
        .with_limits(&limits)
        .prepare(Unstoppable)
        .unwrap_err();
    assert!(matches!(err, PrepError::LimitExceeded(_)));
}

#[test]
fn prepare_plans_tiles_for_frame() {
    let (w, h) = (5000u32, 3000u32);
    let src = vec![0u8; (w * h * 3) as usize];
    let frame = PrepareRequest::new(&src, w, h, SourceLayout::Rgb8)
        .prepare(Unstoppable)
        .unwrap();
    assert_eq!(frame.tiles, plan_tiles(w, h));
    assert!(frame.buffer.is_borrowed());
    assert!(!frame.has_alpha());
}

#[cfg(feature = "rgb")]
#[test]
fn typed_pixel_view() {
    use rgb::Rgba;
    let out = transcode(&[50, 60], 1, 1, SourceLayout::GrayAlpha8).unwrap();
    let px: &[Rgba<u8>] = out.as_pixels().unwrap();
    assert_eq!(px, &[Rgba::new(50, 50, 50, 60)]);
    assert!(out.as_pixels::<rgb::Rgb<u8>>().is_err());
}

#[cfg(feature = "imgref")]
#[test]
fn imgref_view_matches_dimensions() {
    use rgb::Rgb;
    let src: Vec<u8> = (0..6).collect();
    let out = transcode(&src, 3, 2, SourceLayout::Gray8).unwrap();
    let img = out.as_imgref::<Rgb<u8>>().unwrap();
    assert_eq!((img.width(), img.height()), (3, 2));
    assert_eq!(img.buf()[4], Rgb::new(4, 4, 4));
}
