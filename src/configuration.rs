//! Sampling configuration.
//!
//! [`SampleOptions`] is a builder that selects the sampling strategy and
//! tunes it, without widening the signature of
//! [`compute_sample_frames`](crate::compute_sample_frames).
//!
//! # Example
//!
//! ```
//! use framepick::{SampleOptions, SamplingStrategy, SplitPolicy};
//!
//! let options = SampleOptions::new()
//!     .with_strategy(SamplingStrategy::Rebalance(SplitPolicy::BalancedStep))
//!     .with_max_rebalance_steps(500);
//! assert_eq!(options.max_rebalance_steps(), 500);
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};

/// How deadzone-trapped images are divided between the two sides of a
/// deadzone by the rebalancing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitPolicy {
    /// Send images toward the sparser side, in proportion to the other
    /// side's density. This is the default.
    #[default]
    DensityRatio,
    /// Give the left side as many images as its space would hold at the
    /// step an even spread over all live frames would use.
    IdealStep,
    /// Try every split and keep the one whose left and right steps differ
    /// the least.
    BalancedStep,
}

impl Display for SplitPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            SplitPolicy::DensityRatio => "density",
            SplitPolicy::IdealStep => "ideal-step",
            SplitPolicy::BalancedStep => "balanced-step",
        };
        f.write_str(name)
    }
}

/// Which algorithm turns a deadzone list into a sample set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplingStrategy {
    /// Partition the timeline into livezones, allocate images to them by
    /// length, and sample each zone evenly. This is the default.
    #[default]
    Partition,
    /// Start from an even spread over the whole video and push samples out
    /// of deadzones, recursively respacing each side.
    Rebalance(SplitPolicy),
}

impl Display for SamplingStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SamplingStrategy::Partition => f.write_str("partition"),
            SamplingStrategy::Rebalance(policy) => write!(f, "rebalance ({policy})"),
        }
    }
}

/// Options for computing a sample set.
///
/// All fields have defaults; a default-constructed value gives the same
/// result as [`compute_sample_frames`](crate::compute_sample_frames).
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct SampleOptions {
    pub(crate) strategy: SamplingStrategy,
    pub(crate) deadzone_margin: bool,
    pub(crate) max_rebalance_steps: usize,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleOptions {
    /// Create options with default settings.
    ///
    /// Defaults: partition strategy, deadzone margin on, 10 000 rebalance
    /// steps.
    pub fn new() -> Self {
        Self {
            strategy: SamplingStrategy::Partition,
            deadzone_margin: true,
            max_rebalance_steps: 10_000,
        }
    }

    /// Select the sampling strategy.
    pub fn with_strategy(mut self, strategy: SamplingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Enable or disable the deadzone margin.
    ///
    /// With the margin on, each livezone's samples stay half a neighbouring
    /// deadzone away from it. Only the partition strategy uses this.
    pub fn with_deadzone_margin(mut self, enabled: bool) -> Self {
        self.deadzone_margin = enabled;
        self
    }

    /// Cap the number of worklist steps the rebalancing strategy may take.
    ///
    /// Clamped to a minimum of 1.
    pub fn with_max_rebalance_steps(mut self, steps: usize) -> Self {
        self.max_rebalance_steps = steps.max(1);
        self
    }

    /// The selected strategy.
    pub fn strategy(&self) -> SamplingStrategy {
        self.strategy
    }

    /// Whether the deadzone margin is applied.
    pub fn deadzone_margin(&self) -> bool {
        self.deadzone_margin
    }

    /// The rebalance step limit.
    pub fn max_rebalance_steps(&self) -> usize {
        self.max_rebalance_steps
    }
}
