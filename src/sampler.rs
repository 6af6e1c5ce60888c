//! Frame selection inside a single livezone.
//!
//! Samples are spread evenly across the zone's usable span, rounding
//! half-up to whole frames. With the deadzone margin enabled the span is
//! pulled inward by half of each neighbouring deadzone, so samples near a
//! large deadzone stay clear of its edge.

use crate::livezone::Livezone;
use crate::range::FrameRange;

/// `count` frames spread evenly over `range`, endpoints included.
///
/// One frame lands on the midpoint. Otherwise frame `i` is
/// `start + round_half_up(i * (end - start) / (count - 1))`, computed in
/// integer arithmetic. The result is strictly increasing whenever
/// `count <= range.len()`.
///
/// # Example
///
/// ```
/// use framepick::{FrameRange, evenly_spaced};
///
/// let frames = evenly_spaced(FrameRange::new(0, 99)?, 10);
/// assert_eq!(frames, vec![0, 11, 22, 33, 44, 55, 66, 77, 88, 99]);
/// # Ok::<(), framepick::FramePickError>(())
/// ```
pub fn evenly_spaced(range: FrameRange, count: u64) -> Vec<u64> {
    match count {
        0 => Vec::new(),
        1 => vec![range.midpoint()],
        _ => {
            let span = range.end() - range.start();
            let mut frames: Vec<u64> = (0..count)
                .map(|index| range.start() + round_half_up(index as u128 * span as u128, count - 1))
                .collect();
            enforce_increasing(&mut frames, range.end());
            frames
        }
    }
}

/// Select `zone.quota` frames from `zone`.
///
/// When `deadzone_margin` is set, the usable span starts
/// `preceding_deadzone / 2` frames in and ends `following_deadzone / 2`
/// frames early. Both insets shrink proportionally when they would leave
/// fewer frames than the quota needs.
pub fn sample_zone(zone: &Livezone, deadzone_margin: bool) -> Vec<u64> {
    if zone.quota <= 1 {
        return evenly_spaced(zone.range, zone.quota);
    }

    let usable = if deadzone_margin {
        usable_span(zone)
    } else {
        zone.range
    };
    log::trace!(
        "Sampling {} frames from livezone {} over {}",
        zone.quota,
        zone.range,
        usable
    );

    let mut frames = evenly_spaced(usable, zone.quota);
    enforce_increasing(&mut frames, zone.range.end());
    frames
}

/// The zone's range with half of each neighbouring deadzone trimmed off.
fn usable_span(zone: &Livezone) -> FrameRange {
    let length = zone.len();
    let slack = length.saturating_sub(zone.quota);
    let mut head = zone.preceding_deadzone / 2;
    let mut tail = zone.following_deadzone / 2;

    let wanted = head as u128 + tail as u128;
    if wanted > slack as u128 {
        head = (head as u128 * slack as u128 / wanted) as u64;
        tail = (tail as u128 * slack as u128 / wanted) as u64;
    }

    let start = zone.range.start() + head;
    let end = zone.range.end() - tail;
    FrameRange::new(start, end).unwrap_or(zone.range)
}

/// `numerator / denominator` rounded half-up.
fn round_half_up(numerator: u128, denominator: u64) -> u64 {
    let denominator = denominator as u128;
    ((2 * numerator + denominator) / (2 * denominator)) as u64
}

/// Raise any sample that does not exceed its predecessor, capped at `limit`.
fn enforce_increasing(frames: &mut [u64], limit: u64) {
    for index in 1..frames.len() {
        let floor = frames[index - 1].saturating_add(1).min(limit);
        if frames[index] < floor {
            frames[index] = floor;
        }
    }
}
