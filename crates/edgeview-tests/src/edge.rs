//! Edge mode end to end.

use crate::support::{dims, InterleavedFrame};
use edgeview_effects::{EdgeDetector, EdgeParams, EdgeScratch};
use edgeview_pipeline::{EdgePipeline, PipelineConfig};

fn edge_columns(rgba: &[u8], width: usize, row: usize) -> Vec<usize> {
    (0..width)
        .filter(|&x| rgba[(row * width + x) * 4] == 255)
        .collect()
}

fn noisy_scene(w: u32, h: u32) -> InterleavedFrame {
    InterleavedFrame::from_fn(
        dims(w, h),
        24,
        |x, y| {
            let square = (20..44).contains(&x) && (10..30).contains(&y);
            let base: u8 = if square { 220 } else { 30 };
            base.wrapping_add(((x * 31 + y * 17) % 7) as u8)
        },
        |x, y| ((120 + x % 8) as u8, (124 + y % 8) as u8),
    )
}

#[test]
fn edge_output_is_deterministic() {
    let camera = noisy_scene(64, 40);
    let mut first = EdgePipeline::default();
    first.process_frame(&camera.frame(), true).unwrap();
    let reference = first.rgba().to_vec();

    for _ in 0..4 {
        first.process_frame(&camera.frame(), true).unwrap();
        assert_eq!(first.rgba(), &reference[..]);
    }
    let mut fresh = EdgePipeline::default();
    fresh.process_frame(&camera.frame(), true).unwrap();
    assert_eq!(fresh.rgba(), &reference[..]);
}

#[test]
fn edge_output_is_binary_and_opaque() {
    let camera = noisy_scene(64, 40);
    let mut pipeline = EdgePipeline::default();
    pipeline.process_frame(&camera.frame(), true).unwrap();

    let mut edges = 0;
    for px in pipeline.rgba().chunks_exact(4) {
        assert!(px[0] == 0 || px[0] == 255, "non-binary value {}", px[0]);
        assert_eq!(px[0], px[1]);
        assert_eq!(px[0], px[2]);
        assert_eq!(px[3], 255);
        edges += usize::from(px[0] == 255);
    }
    // The square outline is found; the low-amplitude texture is not.
    assert!(edges >= 60, "only {} edge pixels", edges);
    assert!(edges < 64 * 40 / 4);
}

#[test]
fn vertical_boundary_gives_one_line() {
    let camera = InterleavedFrame::from_fn(
        dims(40, 16),
        8,
        |x, _| if x < 20 { 16 } else { 235 },
        |_, _| (128, 128),
    );
    let mut pipeline = EdgePipeline::default();
    pipeline.process_frame(&camera.frame(), true).unwrap();

    for row in 0..16 {
        let cols = edge_columns(pipeline.rgba(), 40, row);
        assert_eq!(cols.len(), 1, "row {}: {:?}", row, cols);
        assert!((18..=21).contains(&cols[0]), "row {}: {:?}", row, cols);
    }
}

#[test]
fn flat_frame_has_no_edges() {
    let camera = InterleavedFrame::solid(dims(32, 32), 0, 140, 90, 170);
    let mut pipeline = EdgePipeline::default();
    pipeline.process_frame(&camera.frame(), true).unwrap();
    assert!(pipeline
        .rgba()
        .chunks_exact(4)
        .all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn edge_mode_can_toggle_per_frame() {
    let camera = InterleavedFrame::solid(dims(16, 16), 4, 180, 128, 128);
    let mut pipeline = EdgePipeline::default();
    pipeline.process_frame(&camera.frame(), true).unwrap();
    assert!(pipeline.rgba().chunks_exact(4).all(|px| px[0] == 0));

    pipeline.process_frame(&camera.frame(), false).unwrap();
    assert!(pipeline.rgba().chunks_exact(4).all(|px| px == [180, 180, 180, 255]));
}

#[test]
fn thresholds_come_from_config() {
    // A luma step of 24 stays below the default high threshold everywhere.
    let camera = InterleavedFrame::from_fn(
        dims(24, 8),
        0,
        |x, _| if x < 12 { 100 } else { 124 },
        |_, _| (128, 128),
    );

    let mut defaults = EdgePipeline::default();
    defaults.process_frame(&camera.frame(), true).unwrap();
    assert!(defaults.rgba().chunks_exact(4).all(|px| px[0] == 0));

    let mut config = PipelineConfig::default();
    config.edge.low_threshold = 10;
    config.edge.high_threshold = 30;
    let mut sensitive = EdgePipeline::new(&config).unwrap();
    sensitive.process_frame(&camera.frame(), true).unwrap();
    assert_eq!(edge_columns(sensitive.rgba(), 24, 4).len(), 1);
}

#[test]
fn detector_matches_pipeline_edge_mode() {
    let camera = noisy_scene(48, 36);
    let mut color = EdgePipeline::default();
    color.process_frame(&camera.frame(), false).unwrap();
    let mut rgba = color.rgba().to_vec();

    let d = dims(48, 36);
    let mut scratch = EdgeScratch::with_dimensions(d);
    EdgeDetector::new(EdgeParams::default())
        .unwrap()
        .apply(&mut rgba, d, &mut scratch)
        .unwrap();

    let mut edge = EdgePipeline::default();
    edge.process_frame(&camera.frame(), true).unwrap();
    assert_eq!(edge.rgba(), &rgba[..]);
}
