//! Frame-delay motion core.
//!
//! The only stateful part of the system: a bounded history of recent
//! frames and the difference computation performed against the oldest
//! retained one. Everything around it (sources, controls, rendering)
//! is stateless glue.

mod delay;
mod diff;

pub use delay::DelayBuffer;
pub use diff::difference;
