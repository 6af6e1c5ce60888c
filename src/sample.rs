//! The sample set handed to montage assembly, and its spacing statistics.

use std::ops::Deref;

use crate::range::FrameRange;

/// Ordered frame numbers chosen for a montage.
///
/// Produced by [`compute_sample_frames`](crate::compute_sample_frames). The
/// set always holds exactly the requested number of frames, in strictly
/// increasing order, none of them inside a deadzone.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SampleSet {
    frames: Vec<u64>,
}

impl SampleSet {
    pub(crate) fn new(frames: Vec<u64>) -> Self {
        Self { frames }
    }

    /// The frame numbers, in order.
    pub fn frames(&self) -> &[u64] {
        &self.frames
    }

    /// Returns `true` if every frame is greater than its predecessor.
    pub fn is_strictly_increasing(&self) -> bool {
        self.frames.windows(2).all(|pair| pair[0] < pair[1])
    }

    /// The first frame that falls inside one of `deadzones`, if any.
    pub fn first_dead_frame(&self, deadzones: &[FrameRange]) -> Option<u64> {
        self.frames
            .iter()
            .copied()
            .find(|frame| deadzones.iter().any(|zone| zone.contains(*frame)))
    }

    /// Gap statistics for the set.
    pub fn spacing(&self) -> SpacingStats {
        SpacingStats::from_frames(&self.frames)
    }
}

impl Deref for SampleSet {
    type Target = [u64];

    fn deref(&self) -> &Self::Target {
        &self.frames
    }
}

/// How evenly a sample set is spread.
///
/// A gap is the number of skipped frames between two consecutive samples
/// (`next - previous - 1`). Lower variance means more even spacing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpacingStats {
    /// Skipped frames between each consecutive pair.
    pub gaps: Vec<u64>,
    /// Mean gap.
    pub mean_gap: f64,
    /// Population variance of the gaps.
    pub variance: f64,
}

impl SpacingStats {
    /// Compute gap statistics for a sorted frame list.
    ///
    /// Fewer than two frames yield no gaps and zero mean and variance.
    pub fn from_frames(frames: &[u64]) -> Self {
        let gaps: Vec<u64> = frames
            .windows(2)
            .map(|pair| pair[1].saturating_sub(pair[0]).saturating_sub(1))
            .collect();
        if gaps.is_empty() {
            return Self::default();
        }

        let count = gaps.len() as f64;
        let mean_gap = gaps.iter().map(|&gap| gap as f64).sum::<f64>() / count;
        let variance = gaps
            .iter()
            .map(|&gap| {
                let diff = gap as f64 - mean_gap;
                diff * diff
            })
            .sum::<f64>()
            / count;

        Self {
            gaps,
            mean_gap,
            variance,
        }
    }
}
