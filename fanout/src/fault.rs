//! Fault injection for write tasks.

use rand::Rng;
use rand::rngs::OsRng;

/// Default chance that a completed write reports a simulated failure.
pub const DEFAULT_FAILURE_PROBABILITY: f64 = 0.5;

/// Decides, per write, whether to raise a simulated failure.
///
/// Draws come from the OS random source. `0.0` never fails and `1.0` always
/// fails without touching the RNG, which makes both ends deterministic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaultInjector {
    probability: f64,
}

impl FaultInjector {
    /// Out-of-range values are clamped into `[0, 1]`; NaN disables injection.
    pub fn new(probability: f64) -> Self {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        Self { probability }
    }

    pub fn never() -> Self {
        Self::new(0.0)
    }

    pub fn always() -> Self {
        Self::new(1.0)
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn should_fail(&self) -> bool {
        if self.probability <= 0.0 {
            return false;
        }
        if self.probability >= 1.0 {
            return true;
        }
        OsRng.gen_bool(self.probability)
    }
}

impl Default for FaultInjector {
    fn default() -> Self {
        Self::new(DEFAULT_FAILURE_PROBABILITY)
    }
}
