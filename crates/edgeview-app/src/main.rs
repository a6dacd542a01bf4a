//! EdgeView - camera preview pipeline simulator
//!
//! Plays the camera thread and the render loop against one pipeline:
//! synthetic frames go in through the frame processor, and each one is
//! drained to a texture straight after.

mod synthetic;

use anyhow::{Context, Result};
use clap::Parser;
use edgeview_core::{FrameDimensions, ProcessingTimestamp};
use edgeview_gpu::{GpuContext, HeadlessBackend, TextureBackend, TextureHandle, WgpuBackend};
use edgeview_pipeline::{EdgePipeline, FrameProcessor, PipelineConfig};
use std::path::PathBuf;
use synthetic::SyntheticCamera;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "edgeview")]
#[command(about = "Run synthetic camera frames through the EdgeView pipeline")]
#[command(version)]
struct Cli {
    /// Frame width in pixels
    #[arg(long, default_value = "640")]
    width: u32,

    /// Frame height in pixels
    #[arg(long, default_value = "480")]
    height: u32,

    /// Number of frames to process
    #[arg(short, long, default_value = "120")]
    frames: u32,

    /// Show detected edges instead of color
    #[arg(short, long)]
    edge: bool,

    /// Bytes of padding after each camera row
    #[arg(long, default_value = "32")]
    row_padding: usize,

    /// Pipeline configuration (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Upload to a real GPU texture instead of CPU memory
    #[arg(long)]
    gpu: bool,
}

fn main() -> Result<()> {
    // RUST_LOG overrides, e.g. RUST_LOG=edgeview_pipeline=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();
    info!("EdgeView starting...");

    let config = match &cli.config {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    let dims = FrameDimensions::new(cli.width, cli.height)?;
    let processor = FrameProcessor::new(EdgePipeline::new(&config)?.into_shared());
    {
        let pipeline = processor.pipeline().lock();
        let params = pipeline.edge_params();
        info!(
            low = params.low_threshold,
            high = params.high_threshold,
            sigma = params.blur_sigma,
            "Edge detector configured"
        );
    }

    if cli.gpu {
        let context = GpuContext::new_blocking().context("GPU unavailable")?;
        info!(adapter = %context.adapter_info().name, "Uploading to wgpu textures");
        let mut backend = WgpuBackend::new(context);
        let handle = backend.create_texture()?;
        run(&cli, dims, &processor, &mut backend, handle);
    } else {
        let mut backend = HeadlessBackend::new();
        run(&cli, dims, &processor, &mut backend, TextureHandle(1));
        info!(
            allocations = backend.allocation_count(),
            calls = backend.calls().len(),
            "Headless texture summary"
        );
    }

    Ok(())
}

fn run<B: TextureBackend>(
    cli: &Cli,
    dims: FrameDimensions,
    processor: &FrameProcessor,
    backend: &mut B,
    handle: TextureHandle,
) {
    let mut camera = SyntheticCamera::new(dims, cli.row_padding);
    processor.start(dims);

    let mut shown = 0u32;
    let mut latency_total = 0i64;
    for index in 0..cli.frames {
        camera.capture(index);
        let ts = processor.process(
            camera.planes(),
            camera.pixel_stride(),
            camera.row_stride(),
            cli.edge,
        );
        if ts.is_failure() {
            continue;
        }

        let fps = processor.drain_to_texture(backend, handle);
        let latency = ProcessingTimestamp::now().nanos_since(ts);
        latency_total += latency;
        shown += 1;
        debug!(frame = index, latency_us = latency / 1_000, fps, "Frame displayed");
    }
    processor.stop();

    let avg_latency_us = if shown > 0 {
        latency_total / i64::from(shown) / 1_000
    } else {
        0
    };
    info!(
        %dims,
        edge_mode = cli.edge,
        frames = cli.frames,
        shown,
        avg_latency_us,
        last_fps = processor.last_fps(),
        "Preview run finished"
    );
}
