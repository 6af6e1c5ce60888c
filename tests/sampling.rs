//! Sample selection integration tests.
//!
//! Exact expectations for small timelines, plus ordering and deadzone
//! avoidance checked over many generated deadzone layouts.

mod common;

use common::generated_deadzones;
use framepick::{
    FramePickError, FrameRange, Livezone, SampleOptions, SamplingStrategy, SpacingStats,
    SplitPolicy, compute_sample_frames, compute_sample_frames_with_options, evenly_spaced,
    sample_zone,
};

fn range(start: u64, end: u64) -> FrameRange {
    FrameRange::new(start, end).expect("valid range")
}

fn rebalance(policy: SplitPolicy) -> SampleOptions {
    SampleOptions::new().with_strategy(SamplingStrategy::Rebalance(policy))
}

fn all_strategies() -> Vec<SampleOptions> {
    vec![
        SampleOptions::new(),
        SampleOptions::new().with_deadzone_margin(false),
        rebalance(SplitPolicy::DensityRatio),
        rebalance(SplitPolicy::IdealStep),
        rebalance(SplitPolicy::BalancedStep),
    ]
}

// ── Even spacing ─────────────────────────────────────────────────

#[test]
fn evenly_spaced_small_counts() {
    assert!(evenly_spaced(range(10, 20), 0).is_empty());
    assert_eq!(evenly_spaced(range(10, 20), 1), [15]);
    assert_eq!(evenly_spaced(range(10, 20), 2), [10, 20]);
}

#[test]
fn evenly_spaced_rounds_half_up() {
    assert_eq!(evenly_spaced(range(0, 29), 5), [0, 7, 15, 22, 29]);
}

#[test]
fn evenly_spaced_fills_range() {
    assert_eq!(evenly_spaced(range(5, 9), 5), [5, 6, 7, 8, 9]);
}

// ── Zone sampling ────────────────────────────────────────────────

#[test]
fn sample_zone_keeps_margin_from_deadzones() {
    let zone = Livezone {
        range: range(61, 99),
        quota: 5,
        preceding_deadzone: 21,
        following_deadzone: 0,
    };
    assert_eq!(sample_zone(&zone, true), [71, 78, 85, 92, 99]);
    assert_eq!(sample_zone(&zone, false), [61, 71, 80, 90, 99]);
}

#[test]
fn sample_zone_shrinks_margin_when_crowded() {
    let zone = Livezone {
        range: range(100, 109),
        quota: 8,
        preceding_deadzone: 50,
        following_deadzone: 50,
    };
    let frames = sample_zone(&zone, true);
    assert_eq!(frames.len(), 8);
    assert!(frames.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(frames.iter().all(|&frame| zone.range.contains(frame)));
}

#[test]
fn sample_zone_single_image_takes_midpoint() {
    let zone = Livezone {
        range: range(20, 30),
        quota: 1,
        preceding_deadzone: 10,
        following_deadzone: 0,
    };
    assert_eq!(sample_zone(&zone, true), [25]);
}

// ── Whole-video sampling ─────────────────────────────────────────

#[test]
fn no_deadzones_spreads_evenly() {
    let samples = compute_sample_frames(100, 10, &[]).unwrap();
    assert_eq!(samples.frames(), [0, 11, 22, 33, 44, 55, 66, 77, 88, 99]);
    assert!(samples.is_strictly_increasing());
}

#[test]
fn deadzone_in_the_middle() {
    let samples = compute_sample_frames(100, 10, &[range(40, 60)]).unwrap();
    assert_eq!(samples.frames(), [0, 7, 15, 22, 29, 71, 78, 85, 92, 99]);
}

#[test]
fn deadzone_in_the_middle_without_margin() {
    let options = SampleOptions::new().with_deadzone_margin(false);
    let samples = compute_sample_frames_with_options(100, 10, &[range(40, 60)], &options).unwrap();
    assert_eq!(samples.frames(), [0, 10, 20, 29, 39, 61, 71, 80, 90, 99]);
}

#[test]
fn every_live_frame_is_used_at_capacity() {
    let samples = compute_sample_frames(20, 10, &[range(5, 14)]).unwrap();
    assert_eq!(samples.frames(), [0, 1, 2, 3, 4, 15, 16, 17, 18, 19]);
}

#[test]
fn single_image_is_midpoint() {
    let samples = compute_sample_frames(100, 1, &[]).unwrap();
    assert_eq!(samples.frames(), [49]);
}

#[test]
fn rebalance_moves_trapped_samples() {
    for policy in [
        SplitPolicy::DensityRatio,
        SplitPolicy::IdealStep,
        SplitPolicy::BalancedStep,
    ] {
        let samples =
            compute_sample_frames_with_options(100, 10, &[range(40, 60)], &rebalance(policy))
                .unwrap();
        assert_eq!(
            samples.frames(),
            [0, 10, 20, 29, 39, 61, 71, 80, 90, 99],
            "policy {policy}"
        );
    }
}

#[test]
fn rebalance_without_deadzones_is_even() {
    let samples = compute_sample_frames_with_options(
        100,
        10,
        &[],
        &rebalance(SplitPolicy::BalancedStep),
    )
    .unwrap();
    assert_eq!(samples.frames(), evenly_spaced(range(0, 99), 10));
}

#[test]
fn rebalance_step_limit() {
    let options = rebalance(SplitPolicy::DensityRatio).with_max_rebalance_steps(1);
    let result = compute_sample_frames_with_options(100, 10, &[range(40, 60)], &options);
    assert!(matches!(
        result,
        Err(FramePickError::RebalanceDiverged { steps: 1 })
    ));

    let clean = compute_sample_frames_with_options(100, 10, &[], &options);
    assert!(clean.is_ok());
}

#[test]
fn results_are_deterministic() {
    let deadzones = generated_deadzones(5000, 7);
    for options in all_strategies() {
        let first =
            compute_sample_frames_with_options(5000, 24, deadzones.list(), &options).unwrap();
        let second =
            compute_sample_frames_with_options(5000, 24, deadzones.list(), &options).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn generated_layouts_hold_invariants() {
    for total_frames in [2, 7, 50, 97, 240, 1000] {
        for seed in 0..20 {
            let deadzones = generated_deadzones(total_frames, seed);
            let available = deadzones.available_frames();
            for images in 1..=available.min(40) {
                for options in all_strategies() {
                    let samples = compute_sample_frames_with_options(
                        total_frames,
                        images,
                        deadzones.list(),
                        &options,
                    )
                    .unwrap_or_else(|error| {
                        panic!(
                            "{} images over {total_frames} frames with {:?} ({}): {error}",
                            images,
                            deadzones.list(),
                            options.strategy()
                        )
                    });

                    assert_eq!(samples.len() as u64, images);
                    assert!(
                        samples.is_strictly_increasing(),
                        "not strictly increasing: {:?}",
                        samples.frames()
                    );
                    assert!(samples.iter().all(|&frame| frame < total_frames));
                    assert_eq!(samples.first_dead_frame(deadzones.list()), None);
                }
            }
        }
    }
}

#[test]
fn too_many_images_is_an_error() {
    let result = compute_sample_frames(100, 80, &[range(0, 29)]);
    assert!(matches!(
        result,
        Err(FramePickError::InsufficientCapacity {
            requested: 80,
            available: 70
        })
    ));
}

// ── Spacing statistics ───────────────────────────────────────────

#[test]
fn spacing_of_even_samples() {
    let stats = SpacingStats::from_frames(&[0, 10, 20]);
    assert_eq!(stats.gaps, [9, 9]);
    assert_eq!(stats.mean_gap, 9.0);
    assert_eq!(stats.variance, 0.0);
}

#[test]
fn spacing_of_uneven_samples() {
    let stats = SpacingStats::from_frames(&[0, 1, 11]);
    assert_eq!(stats.gaps, [0, 9]);
    assert_eq!(stats.mean_gap, 4.5);
    assert_eq!(stats.variance, 20.25);
}

#[test]
fn spacing_needs_two_frames() {
    assert_eq!(SpacingStats::from_frames(&[5]), SpacingStats::default());
}
