//! Perturb-and-fix sampling.
//!
//! The rebalancing strategy starts from an even spread over the whole video
//! and then repairs it. Whenever samples land inside a deadzone, the samples
//! of that stretch are split between the live space on each side of the
//! deadzone and respaced there. Each side becomes a new, smaller task on an
//! explicit worklist, so the repair never recurses on the call stack. The
//! number of steps is capped.

use std::cmp::Reverse;
use std::collections::VecDeque;

use crate::configuration::SplitPolicy;
use crate::deadzone::{available_frames_in, is_dead};
use crate::error::FramePickError;
use crate::range::FrameRange;
use crate::sampler::evenly_spaced;

/// A stretch of timeline and the run of samples that belongs to it.
#[derive(Debug, Clone, Copy)]
struct Task {
    frames: FrameRange,
    first: usize,
    count: usize,
}

/// How the samples of one task sit around the deadzone being resolved.
#[derive(Debug, Clone, Copy)]
struct Split {
    left: u64,
    trapped: u64,
    right: u64,
    spaces_left: u64,
    spaces_right: u64,
}

/// Compute `total_images` samples over `0..total_frames` by rebalancing.
///
/// The caller must have validated `deadzones` (sorted, non-overlapping,
/// in bounds) and checked that enough live frames exist.
///
/// # Errors
///
/// Returns [`FramePickError::RebalanceDiverged`] if more than `max_steps`
/// tasks are processed or a sample is still dead when the worklist drains.
pub(crate) fn rebalance(
    total_frames: u64,
    total_images: u64,
    deadzones: &[FrameRange],
    policy: SplitPolicy,
    max_steps: usize,
) -> Result<Vec<u64>, FramePickError> {
    let whole = FrameRange::new(0, total_frames.saturating_sub(1))?;
    let mut samples = evenly_spaced(whole, total_images);
    let mut worklist = VecDeque::from([Task {
        frames: whole,
        first: 0,
        count: samples.len(),
    }]);
    let mut steps = 0;

    while let Some(task) = worklist.pop_front() {
        steps += 1;
        if steps > max_steps {
            log::warn!("Rebalancing gave up after {} steps", max_steps);
            return Err(FramePickError::RebalanceDiverged { steps: max_steps });
        }
        if task.count == 0 {
            continue;
        }

        let run = &samples[task.first..task.first + task.count];
        let Some(deadzone) = trapping_deadzone(task.frames, run, deadzones) else {
            continue;
        };

        let left = run.iter().filter(|&&frame| frame < deadzone.start()).count() as u64;
        let trapped = run.iter().filter(|&&frame| deadzone.contains(frame)).count() as u64;
        let right = task.count as u64 - left - trapped;

        let left_range = (deadzone.start() > task.frames.start())
            .then(|| FrameRange::new(task.frames.start(), deadzone.start() - 1))
            .transpose()?;
        let right_range = (deadzone.end() < task.frames.end())
            .then(|| FrameRange::new(deadzone.end() + 1, task.frames.end()))
            .transpose()?;

        let split = Split {
            left,
            trapped,
            right,
            spaces_left: left_range.map_or(0, |range| available_frames_in(deadzones, range)),
            spaces_right: right_range.map_or(0, |range| available_frames_in(deadzones, range)),
        };
        let move_left = choose_move_left(policy, &split);

        let total = task.count as u64;
        let lower = total.saturating_sub(split.spaces_right);
        let upper = split.spaces_left;
        if lower > upper {
            return Err(FramePickError::RebalanceDiverged { steps });
        }
        let left_total = (left + move_left).clamp(lower, upper);
        let right_total = total - left_total;

        log::debug!(
            "Deadzone {} in {}: left={} trapped={} right={} -> {} left, {} right",
            deadzone,
            task.frames,
            left,
            trapped,
            right,
            left_total,
            right_total
        );

        if let Some(range) = left_range {
            let count = left_total as usize;
            respace(&mut samples, task.first, count, range);
            worklist.push_back(Task {
                frames: range,
                first: task.first,
                count,
            });
        }
        if let Some(range) = right_range {
            let first = task.first + left_total as usize;
            let count = right_total as usize;
            respace(&mut samples, first, count, range);
            worklist.push_back(Task {
                frames: range,
                first,
                count,
            });
        }
    }

    if samples.iter().any(|&frame| is_dead(deadzones, frame)) {
        return Err(FramePickError::RebalanceDiverged { steps });
    }
    log::debug!("Rebalancing settled after {} steps", steps);
    Ok(samples)
}

/// The deadzone to resolve next within `frames`: the largest one that traps
/// at least one sample of `run`, preferring the one nearest the middle.
fn trapping_deadzone(
    frames: FrameRange,
    run: &[u64],
    deadzones: &[FrameRange],
) -> Option<FrameRange> {
    let center = frames.midpoint();
    let mut candidates: Vec<FrameRange> = deadzones
        .iter()
        .filter_map(|zone| zone.intersection(&frames))
        .collect();
    candidates.sort_by_key(|zone| {
        (
            Reverse(zone.len()),
            zone.midpoint().abs_diff(center),
            zone.start(),
        )
    });
    candidates
        .into_iter()
        .find(|zone| run.iter().any(|&frame| zone.contains(frame)))
}

fn respace(samples: &mut [u64], first: usize, count: usize, range: FrameRange) {
    if count == 0 {
        return;
    }
    let spaced = evenly_spaced(range, count as u64);
    samples[first..first + count].copy_from_slice(&spaced);
}

/// How many trapped samples move to the left side of the deadzone.
fn choose_move_left(policy: SplitPolicy, split: &Split) -> u64 {
    if split.spaces_left == 0 {
        return 0;
    }
    if split.spaces_right == 0 {
        return split.trapped;
    }

    match policy {
        SplitPolicy::DensityRatio => density_ratio(split),
        SplitPolicy::IdealStep => ideal_step(split),
        SplitPolicy::BalancedStep => balanced_step(split),
    }
}

fn density_ratio(split: &Split) -> u64 {
    let left_density = split.left as f64 / split.spaces_left as f64;
    let right_density = split.right as f64 / split.spaces_right as f64;
    let trapped = split.trapped as f64;

    let share = if left_density + right_density > 0.0 {
        trapped * right_density / (left_density + right_density)
    } else {
        trapped * split.spaces_left as f64 / (split.spaces_left + split.spaces_right) as f64
    };
    round_clamped(share, split.trapped)
}

fn ideal_step(split: &Split) -> u64 {
    let total_images = split.left + split.trapped + split.right;
    if total_images < 2 {
        return density_ratio(split);
    }
    let step = (split.spaces_left + split.spaces_right) as f64 / (total_images - 1) as f64;
    round_clamped(
        split.spaces_left as f64 / step - split.left as f64,
        split.trapped,
    )
}

fn balanced_step(split: &Split) -> u64 {
    let side_step = |images: u64, spaces: u64| {
        if images > 1 {
            spaces as f64 / (images - 1) as f64
        } else {
            spaces as f64 * 1.5
        }
    };

    let mut best_move = 0;
    let mut best_diff = f64::INFINITY;
    for move_left in 0..=split.trapped {
        let move_right = split.trapped - move_left;
        let left_step = side_step(split.left + move_left, split.spaces_left);
        let right_step = side_step(split.right + move_right, split.spaces_right);
        let diff = (left_step - right_step).powi(2);
        if diff < best_diff {
            best_diff = diff;
            best_move = move_left;
        }
    }
    best_move
}

/// Round half-up and clamp into `0..=max`.
fn round_clamped(value: f64, max: u64) -> u64 {
    let rounded = (value + 0.5).floor();
    if rounded <= 0.0 {
        0
    } else {
        (rounded as u64).min(max)
    }
}
