//! Color conversion through the full pipeline.

use crate::support::{dims, reference_rgb, InterleavedFrame};
use edgeview_color::{YuvToRgb, NEUTRAL_CHROMA};
use edgeview_pipeline::EdgePipeline;
use proptest::prelude::*;

fn pixel(rgba: &[u8], width: usize, x: usize, y: usize) -> [u8; 4] {
    let i = (y * width + x) * 4;
    [rgba[i], rgba[i + 1], rgba[i + 2], rgba[i + 3]]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn solid_color_frames_convert_exactly(
        half_w in 1u32..40,
        half_h in 1u32..30,
        padding in 0usize..17,
        y in any::<u8>(),
        u in any::<u8>(),
        v in any::<u8>(),
    ) {
        let d = dims(half_w * 2, half_h * 2);
        let camera = InterleavedFrame::solid(d, padding, y, u, v);
        let mut pipeline = EdgePipeline::default();
        pipeline.process_frame(&camera.frame(), false).unwrap();

        let expected = reference_rgb(y, u, v);
        prop_assert_eq!(pipeline.rgba().len(), d.pixel_count() * 4);
        for px in pipeline.rgba().chunks_exact(4) {
            for c in 0..3 {
                prop_assert!((f64::from(px[c]) - expected[c]).abs() <= 1.0,
                    "channel {} got {} want {}", c, px[c], expected[c]);
            }
            prop_assert_eq!(px[3], 255);
        }
    }

    #[test]
    fn interleaved_and_planar_layouts_agree(
        half_w in 1u32..16,
        half_h in 1u32..16,
        padding in 0usize..9,
        seed in any::<u8>(),
    ) {
        let d = dims(half_w * 2, half_h * 2);
        let camera = InterleavedFrame::from_fn(
            d,
            padding,
            |x, y| seed.wrapping_add((x * 7 + y * 13) as u8),
            |x, y| (seed.wrapping_mul(3).wrapping_add(x as u8), 255 - (y as u8)),
        );
        let planar = camera.to_planar();

        let mut a = EdgePipeline::default();
        let mut b = EdgePipeline::default();
        a.process_frame(&camera.frame(), false).unwrap();
        b.process_frame(&planar.frame(), false).unwrap();
        prop_assert_eq!(a.rgba(), b.rgba());
    }
}

#[test]
fn each_chroma_pair_covers_a_2x2_block() {
    let d = dims(4, 4);
    let camera = InterleavedFrame::from_fn(
        d,
        3,
        |_, _| 128,
        |x, y| match (x, y) {
            (0, 0) => (128, 255),
            (1, 0) => (255, 128),
            (0, 1) => (0, 128),
            _ => (128, 0),
        },
    );
    let mut pipeline = EdgePipeline::default();
    pipeline.process_frame(&camera.frame(), false).unwrap();
    let rgba = pipeline.rgba();

    for (bx, by) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        let first = pixel(rgba, 4, bx * 2, by * 2);
        for (dx, dy) in [(1, 0), (0, 1), (1, 1)] {
            assert_eq!(pixel(rgba, 4, bx * 2 + dx, by * 2 + dy), first);
        }
    }
    // V drives red, U drives blue.
    let m = YuvToRgb::BT601_FULL;
    assert_eq!(pixel(rgba, 4, 0, 0)[..3], m.to_rgb(128, 128, 255));
    assert_eq!(pixel(rgba, 4, 2, 0)[..3], m.to_rgb(128, 255, 128));
    assert!(pixel(rgba, 4, 0, 0)[0] > 200);
    assert!(pixel(rgba, 4, 2, 0)[2] > 200);
}

#[test]
fn odd_dimensions_drop_the_trailing_chroma() {
    // 5x3: chroma covers the 2x1 pair grid; column 4 and row 2 have no pair
    // of their own and reuse the nearest one.
    let d = dims(5, 3);
    let camera = InterleavedFrame::from_fn(
        d,
        2,
        |_, _| 100,
        |x, _| if x == 0 { (60, 200) } else { (200, 60) },
    );
    let mut pipeline = EdgePipeline::default();
    pipeline.process_frame(&camera.frame(), false).unwrap();
    let rgba = pipeline.rgba();

    let left = pixel(rgba, 5, 0, 0);
    let right = pixel(rgba, 5, 2, 0);
    assert_ne!(left, right);
    for y in 0..3 {
        assert_eq!(pixel(rgba, 5, 1, y), left);
        assert_eq!(pixel(rgba, 5, 3, y), right);
        assert_eq!(pixel(rgba, 5, 4, y), right);
    }
}

#[test]
fn single_row_frame_has_no_chroma() {
    let d = dims(6, 1);
    let camera = InterleavedFrame::from_fn(d, 0, |x, _| (x * 40) as u8, |_, _| (0, 255));
    let mut pipeline = EdgePipeline::default();
    pipeline.process_frame(&camera.frame(), false).unwrap();

    for (x, px) in pipeline.rgba().chunks_exact(4).enumerate() {
        let expected = YuvToRgb::BT601_FULL.to_rgb((x * 40) as u8, NEUTRAL_CHROMA, NEUTRAL_CHROMA);
        assert_eq!(px[..3], expected);
        assert_eq!(px[3], 255);
    }
}
