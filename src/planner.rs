//! Entry points that turn a deadzone list into a sample set.
//!
//! [`compute_sample_frames`] runs the whole pipeline: it partitions the
//! timeline, allocates images to livezones and samples each zone. The
//! `_with_options` variant can run the rebalancing strategy instead.

use crate::allocation::allocate;
use crate::configuration::{SampleOptions, SamplingStrategy};
use crate::error::FramePickError;
use crate::livezone::{Livezone, partition};
use crate::range::FrameRange;
use crate::rebalance::rebalance;
use crate::sample::SampleSet;
use crate::sampler::sample_zone;

/// Pick `total_images` frames from a video of `total_frames` frames,
/// avoiding `deadzones`.
///
/// `deadzones` must be sorted and non-overlapping, as kept by
/// [`DeadzoneSet`](crate::DeadzoneSet). A list that breaks this rule is
/// rejected rather than silently repaired. The result is deterministic.
///
/// # Errors
///
/// - [`FramePickError::InvalidImageCount`] if `total_images` is zero.
/// - [`FramePickError::InsufficientCapacity`] if there are more images than
///   frames, or than live frames once deadzones are removed.
/// - [`FramePickError::OverlappingDeadzone`] /
///   [`FramePickError::InvalidRange`] for a corrupt deadzone list.
///
/// # Example
///
/// ```
/// use framepick::{FrameRange, compute_sample_frames};
///
/// let deadzones = [FrameRange::new(40, 60)?];
/// let samples = compute_sample_frames(100, 10, &deadzones)?;
/// assert_eq!(samples.len(), 10);
/// assert!(samples.iter().all(|&frame| !(40..=60).contains(&frame)));
/// # Ok::<(), framepick::FramePickError>(())
/// ```
pub fn compute_sample_frames(
    total_frames: u64,
    total_images: u64,
    deadzones: &[FrameRange],
) -> Result<SampleSet, FramePickError> {
    compute_sample_frames_with_options(
        total_frames,
        total_images,
        deadzones,
        &SampleOptions::default(),
    )
}

/// Like [`compute_sample_frames`], with a choice of strategy and tuning.
pub fn compute_sample_frames_with_options(
    total_frames: u64,
    total_images: u64,
    deadzones: &[FrameRange],
    options: &SampleOptions,
) -> Result<SampleSet, FramePickError> {
    log::debug!(
        "Sampling {} images from {} frames around {} deadzones ({})",
        total_images,
        total_frames,
        deadzones.len(),
        options.strategy
    );

    let zones = plan_livezones(total_frames, total_images, deadzones)?;

    let frames = match options.strategy {
        SamplingStrategy::Partition => zones
            .iter()
            .flat_map(|zone| sample_zone(zone, options.deadzone_margin))
            .collect(),
        SamplingStrategy::Rebalance(policy) => rebalance(
            total_frames,
            total_images,
            deadzones,
            policy,
            options.max_rebalance_steps,
        )?,
    };

    Ok(SampleSet::new(frames))
}

/// Partition the timeline and allocate `total_images` across the livezones.
///
/// This is the first half of [`compute_sample_frames`], exposed so callers
/// can show how images are spread before sampling.
///
/// # Errors
///
/// Same as [`compute_sample_frames`].
pub fn plan_livezones(
    total_frames: u64,
    total_images: u64,
    deadzones: &[FrameRange],
) -> Result<Vec<Livezone>, FramePickError> {
    if total_images == 0 {
        return Err(FramePickError::InvalidImageCount(total_images));
    }
    if total_images > total_frames {
        return Err(FramePickError::InsufficientCapacity {
            requested: total_images,
            available: total_frames,
        });
    }

    let mut zones = partition(total_frames, deadzones)?;
    allocate(&mut zones, total_images)?;
    for zone in &zones {
        log::trace!(
            "Livezone {} (dead before {}, after {}) gets {} images",
            zone.range,
            zone.preceding_deadzone,
            zone.following_deadzone,
            zone.quota
        );
    }
    Ok(zones)
}
