//! Motion Extraction Library
//!
//! Visualizes motion in a video stream by differencing each frame
//! against a frame captured a configurable number of steps earlier,
//! amplified by a gain factor and saturated to the sample range.
//!
//! # Architecture
//!
//! The system is a single synchronous loop over thin collaborators:
//!
//! ```text
//! source -> difference -> renderer
//!               ^
//!         delay buffer <- parameters (delay, gain)
//! ```
//!
//! Per tick: parameters are read once, a frame is read, the
//! difference is computed against the oldest retained frame, the
//! result is rendered, and only then is the new frame pushed and the
//! buffer trimmed to the (possibly just-changed) delay. Comparing
//! before the push keeps the baseline one step older than the delay
//! value suggests; the original interactive tool behaved this way and
//! changing it would visibly shift the comparison baseline.
//!
//! # Example
//!
//! ```
//! use motion_extract::{
//!     control::{FixedController, Parameters},
//!     pipeline::Pipeline,
//!     render::NullRenderer,
//!     source::{FrameSource, SourceDescriptor, SyntheticSource},
//! };
//! use std::sync::atomic::AtomicBool;
//!
//! let mut source = SyntheticSource::new(Some(30)).with_dimensions(32, 24);
//! source.open(&SourceDescriptor::parse("0")).unwrap();
//!
//! let controller = FixedController::new(Parameters::new(5, 10.0));
//! let mut pipeline = Pipeline::new(source, controller, NullRenderer);
//!
//! let stop = AtomicBool::new(false);
//! pipeline.run(&stop);
//! assert_eq!(pipeline.ticks(), 30);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod config;
pub mod control;
pub mod motion;
pub mod pipeline;
pub mod render;
pub mod source;

// Re-export commonly used types at crate root
pub use config::FileConfig;
pub use control::{FixedController, ParameterController, Parameters, SharedController};
pub use motion::{difference, DelayBuffer};
pub use pipeline::{Pipeline, StopReason};
pub use render::{AsciiRenderer, NullRenderer, Renderer};
pub use source::{Frame, FrameSource, SourceDescriptor, SourceError, SyntheticSource};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
