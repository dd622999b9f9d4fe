//! Motion Extraction CLI
//!
//! Opens a video source, runs the frame-delay difference pipeline, and
//! renders the result until the stream ends or the user interrupts.

use clap::Parser;
use motion_extract::{
    config::FileConfig,
    control::{FixedController, Parameters},
    pipeline::{Pipeline, StopReason},
    render::{AsciiRenderer, NullRenderer, Renderer},
    source::{self, FrameSource, SourceDescriptor, SyntheticSource},
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "motion-extract", version, about = "Frame-delay motion visualization")]
struct Cli {
    /// Video source: camera index, image file/directory, URL, or
    /// `synthetic` for a generated test pattern. [default: 0]
    #[arg(long)]
    source: Option<String>,

    /// Initial frame delay before the comparison reference. [default: 5]
    #[arg(long)]
    delay: Option<usize>,

    /// Initial gain multiplier for the difference. [default: 10]
    #[arg(long)]
    gain: Option<f32>,

    /// TOML configuration file; command-line flags take precedence.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of frames a synthetic source produces before ending.
    #[arg(long)]
    frames: Option<u64>,

    /// Renderer to use: `ascii` or `null`.
    #[arg(long, default_value = "ascii")]
    renderer: String,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match FileConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        },
        None => FileConfig::default(),
    };

    let raw_source = cli
        .source
        .clone()
        .unwrap_or_else(|| config.source.descriptor.clone());
    let parameters = Parameters::new(
        cli.delay.unwrap_or(config.parameters.delay),
        cli.gain.unwrap_or(config.parameters.gain),
    );
    let frame_limit = cli.frames.or(config.source.frame_limit);

    info!("motion-extract v{}", motion_extract::VERSION);

    let source: Box<dyn FrameSource> = if raw_source == "synthetic" {
        let mut synthetic = SyntheticSource::new(frame_limit);
        // Open cannot fail for generated frames.
        if let Err(e) = synthetic.open(&SourceDescriptor::CameraIndex(0)) {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Box::new(synthetic)
    } else {
        let descriptor = SourceDescriptor::parse(&raw_source);
        info!("opening source: {descriptor}");
        match source::open_source(&descriptor) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    };

    let renderer: Box<dyn Renderer> = match cli.renderer.as_str() {
        "null" => Box::new(NullRenderer),
        "ascii" => Box::new(AsciiRenderer::default()),
        other => {
            warn!("unknown renderer '{other}', using ascii");
            Box::new(AsciiRenderer::default())
        }
    };

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        if let Err(e) = ctrlc::set_handler(move || {
            stop.store(true, Ordering::Relaxed);
        }) {
            warn!("could not install interrupt handler: {e}");
        }
    }

    info!(
        "running with delay {} and gain {} (ctrl-c to stop)",
        parameters.delay, parameters.gain
    );

    let controller = FixedController::new(parameters);
    let mut pipeline = Pipeline::new(source, controller, renderer);

    match pipeline.run(&stop) {
        StopReason::EndOfStream => info!("stream ended"),
        StopReason::ReadFailed => info!("stream aborted after a read failure"),
        StopReason::Interrupted => info!("stopped by user"),
    }
}
