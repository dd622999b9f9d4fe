//! Live-adjustable processing parameters.
//!
//! Delay and gain are user controls that can change at any moment. The
//! loop reads them once per tick through a [`ParameterController`] and
//! holds them fixed for that tick. Out-of-range values are clamped
//! rather than rejected; a slider must never crash the loop.

use std::sync::{Arc, Mutex};

/// Largest accepted frame delay.
pub const MAX_DELAY: usize = 100;
/// Largest accepted gain multiplier.
pub const MAX_GAIN: f32 = 50.0;

/// A snapshot of the live processing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    /// Number of frames retained before the comparison reference.
    pub delay: usize,
    /// Multiplier applied to raw pixel differences.
    pub gain: f32,
}

impl Parameters {
    /// Creates a parameter snapshot, clamping both values into range.
    pub fn new(delay: usize, gain: f32) -> Self {
        Self { delay, gain }.clamped()
    }

    /// Returns a copy with both values clamped into the accepted range.
    ///
    /// Non-finite gains collapse to zero so a broken control surface
    /// yields a black image instead of NaN arithmetic.
    pub fn clamped(self) -> Self {
        let gain = if self.gain.is_finite() {
            self.gain.clamp(0.0, MAX_GAIN)
        } else {
            0.0
        };
        Self {
            delay: self.delay.min(MAX_DELAY),
            gain,
        }
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            delay: 5,
            gain: 10.0,
        }
    }
}

/// Source of the current parameter values.
///
/// Reads are non-blocking and always return the last value set;
/// implementations decide whether that value can change between ticks.
pub trait ParameterController {
    /// Returns the current parameters, already clamped into range.
    fn current(&self) -> Parameters;
}

/// Controller whose parameters are fixed at construction.
#[derive(Debug, Clone)]
pub struct FixedController {
    parameters: Parameters,
}

impl FixedController {
    /// Creates a controller that always reports `parameters`.
    pub fn new(parameters: Parameters) -> Self {
        Self {
            parameters: parameters.clamped(),
        }
    }
}

impl ParameterController for FixedController {
    fn current(&self) -> Parameters {
        self.parameters
    }
}

/// Controller backed by a shared cell an external control surface can
/// update mid-run: the slider abstraction.
#[derive(Debug, Clone)]
pub struct SharedController {
    inner: Arc<Mutex<Parameters>>,
}

impl SharedController {
    /// Creates a shared controller starting from `parameters`.
    pub fn new(parameters: Parameters) -> Self {
        Self {
            inner: Arc::new(Mutex::new(parameters.clamped())),
        }
    }

    /// Returns a handle for adjusting the parameters externally.
    pub fn handle(&self) -> ParameterHandle {
        ParameterHandle {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl ParameterController for SharedController {
    fn current(&self) -> Parameters {
        match self.inner.lock() {
            Ok(guard) => *guard,
            // A poisoned lock still holds the last written snapshot.
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// Write side of a [`SharedController`].
#[derive(Debug, Clone)]
pub struct ParameterHandle {
    inner: Arc<Mutex<Parameters>>,
}

impl ParameterHandle {
    /// Replaces both parameters, clamping them into range.
    pub fn set(&self, parameters: Parameters) {
        let clamped = parameters.clamped();
        match self.inner.lock() {
            Ok(mut guard) => *guard = clamped,
            Err(poisoned) => *poisoned.into_inner() = clamped,
        }
    }

    /// Updates only the delay.
    pub fn set_delay(&self, delay: usize) {
        let mut current = self.snapshot();
        current.delay = delay;
        self.set(current);
    }

    /// Updates only the gain.
    pub fn set_gain(&self, gain: f32) {
        let mut current = self.snapshot();
        current.gain = gain;
        self.set(current);
    }

    fn snapshot(&self) -> Parameters {
        match self.inner.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamping_bounds() {
        let p = Parameters::new(400, 120.0);
        assert_eq!(p.delay, MAX_DELAY);
        assert_eq!(p.gain, MAX_GAIN);

        let p = Parameters::new(0, -3.0);
        assert_eq!(p.delay, 0);
        assert_eq!(p.gain, 0.0);
    }

    #[test]
    fn test_non_finite_gain_collapses_to_zero() {
        assert_eq!(Parameters::new(1, f32::NAN).gain, 0.0);
        assert_eq!(Parameters::new(1, f32::INFINITY).gain, 0.0);
    }

    #[test]
    fn test_fixed_controller_is_stable() {
        let controller = FixedController::new(Parameters::new(7, 2.5));
        assert_eq!(controller.current(), Parameters::new(7, 2.5));
        assert_eq!(controller.current(), Parameters::new(7, 2.5));
    }

    #[test]
    fn test_shared_controller_sees_latest_value() {
        let controller = SharedController::new(Parameters::default());
        let handle = controller.handle();

        handle.set_delay(9);
        assert_eq!(controller.current().delay, 9);

        handle.set_gain(3.0);
        let current = controller.current();
        assert_eq!(current.delay, 9);
        assert_eq!(current.gain, 3.0);
    }

    #[test]
    fn test_handle_clamps_on_write() {
        let controller = SharedController::new(Parameters::default());
        let handle = controller.handle();

        handle.set_delay(10_000);
        handle.set_gain(-1.0);
        let current = controller.current();
        assert_eq!(current.delay, MAX_DELAY);
        assert_eq!(current.gain, 0.0);
    }
}
