//! Texture upload path selection.

use crate::support::{dims, InterleavedFrame};
use edgeview_gpu::{HeadlessBackend, TextureCall, TextureHandle, UploadOutcome};
use edgeview_pipeline::{boundary, EdgePipeline};

#[test]
fn size_changes_select_full_allocation() {
    let w1 = dims(32, 24);
    let w2 = dims(48, 32);
    let mut pipeline = EdgePipeline::default();
    let mut backend = HeadlessBackend::new();
    pipeline.bind_texture(TextureHandle(4));

    let mut outcomes = Vec::new();
    for (i, d) in [w1, w1, w2, w1].into_iter().enumerate() {
        let camera = InterleavedFrame::solid(d, 16, 40 * i as u8, 128, 128);
        pipeline.process_frame(&camera.frame(), false).unwrap();
        outcomes.push(pipeline.upload_texture(&mut backend).unwrap());

        assert_eq!(backend.dimensions(TextureHandle(4)), Some(d));
        assert_eq!(backend.pixels(TextureHandle(4)), Some(pipeline.rgba()));
    }

    assert_eq!(
        outcomes,
        [
            UploadOutcome::Allocated,
            UploadOutcome::Updated,
            UploadOutcome::Allocated,
            UploadOutcome::Allocated,
        ]
    );
    let kinds: Vec<&str> = backend
        .calls()
        .iter()
        .filter_map(|c| match c {
            TextureCall::Bind(_) => None,
            TextureCall::Allocate { .. } => Some("allocate"),
            TextureCall::Update { .. } => Some("update"),
        })
        .collect();
    assert_eq!(kinds, ["allocate", "update", "allocate", "allocate"]);
}

#[test]
fn upload_before_bind_is_a_noop() {
    let d = dims(8, 8);
    let camera = InterleavedFrame::solid(d, 0, 99, 128, 128);
    let mut pipeline = EdgePipeline::default();
    let mut backend = HeadlessBackend::new();
    pipeline.process_frame(&camera.frame(), false).unwrap();

    assert_eq!(pipeline.upload_texture(&mut backend).unwrap(), UploadOutcome::Skipped);
    assert!(backend.calls().is_empty());
}

#[test]
fn steady_stream_allocates_once() {
    let d = dims(16, 16);
    let mut pipeline = EdgePipeline::default();
    let mut backend = HeadlessBackend::new();

    for i in 0..50u8 {
        let camera = InterleavedFrame::solid(d, 0, i, 128, 128);
        pipeline.process_frame(&camera.frame(), i % 3 == 0).unwrap();
        boundary::upload_to_texture(&mut pipeline, &mut backend, 2);
    }
    assert_eq!(backend.allocation_count(), 1);
    assert_eq!(backend.pixels(TextureHandle(2)), Some(pipeline.rgba()));
}

#[test]
fn switching_textures_keeps_each_size() {
    let d = dims(4, 4);
    let camera = InterleavedFrame::solid(d, 0, 10, 128, 128);
    let mut pipeline = EdgePipeline::default();
    let mut backend = HeadlessBackend::new();
    pipeline.process_frame(&camera.frame(), false).unwrap();

    let mut upload = |handle| boundary::upload_to_texture(&mut pipeline, &mut backend, handle);
    assert_eq!(upload(1), UploadOutcome::Allocated);
    assert_eq!(upload(1), UploadOutcome::Updated);
    assert_eq!(upload(2), UploadOutcome::Allocated);
    assert_eq!(upload(0), UploadOutcome::Skipped);
    assert_eq!(upload(2), UploadOutcome::Updated);
    assert_eq!(upload(1), UploadOutcome::Updated);

    assert_eq!(backend.allocation_count(), 2);
    assert_eq!(backend.pixels(TextureHandle(1)), backend.pixels(TextureHandle(2)));
}

#[test]
fn unbinding_does_not_force_reallocation() {
    let d = dims(8, 6);
    let mut pipeline = EdgePipeline::default();
    let mut backend = HeadlessBackend::new();

    let mut outcomes = Vec::new();
    for (i, handle) in [1u32, 0, 1, 1].into_iter().enumerate() {
        let camera = InterleavedFrame::solid(d, 8, 30 * i as u8, 128, 128);
        pipeline.process_frame(&camera.frame(), false).unwrap();
        pipeline.bind_texture(TextureHandle(handle));
        outcomes.push(pipeline.upload_texture(&mut backend).unwrap());
    }

    assert_eq!(
        outcomes,
        [
            UploadOutcome::Allocated,
            UploadOutcome::Skipped,
            UploadOutcome::Updated,
            UploadOutcome::Updated,
        ]
    );
    assert_eq!(backend.pixels(TextureHandle(1)), Some(pipeline.rgba()));
}
