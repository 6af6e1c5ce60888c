//! Image quota allocation across livezones.
//!
//! Images are handed out in two phases. The proportional phase gives each
//! zone its floor share of the images still unassigned, relative to the
//! frames still unassigned. The remainder phase then places any leftovers
//! one at a time in the least densely sampled zone.

use std::cmp::Ordering;

use crate::error::FramePickError;
use crate::livezone::Livezone;

/// Assign `total_images` images across `zones`, writing each zone's `quota`.
///
/// A zone never receives more images than it has frames, so the samples
/// drawn from it can all be distinct. On success the quotas sum to exactly
/// `total_images`.
///
/// Because each share is taken from the images and frames still unassigned,
/// the last zone absorbs every rounding leftover and the proportional pass
/// leaves nothing over. The least-density loop that follows only guards
/// that guarantee.
///
/// # Errors
///
/// Returns [`FramePickError::InsufficientCapacity`] if there are no zones or
/// the zones hold fewer frames than `total_images`.
///
/// # Example
///
/// ```
/// use framepick::{FrameRange, allocate, partition};
///
/// let mut zones = partition(100, &[FrameRange::new(40, 60)?])?;
/// allocate(&mut zones, 10)?;
/// assert_eq!(zones[0].quota, 5);
/// assert_eq!(zones[1].quota, 5);
/// # Ok::<(), framepick::FramePickError>(())
/// ```
pub fn allocate(zones: &mut [Livezone], total_images: u64) -> Result<(), FramePickError> {
    let capacity: u64 = zones.iter().map(Livezone::len).sum();
    if zones.is_empty() || total_images > capacity {
        return Err(FramePickError::InsufficientCapacity {
            requested: total_images,
            available: capacity,
        });
    }

    let mut remaining_images = total_images;
    let mut remaining_length = capacity;

    for zone in zones.iter_mut() {
        let length = zone.len();
        // `remaining_length >= length >= 1` here.
        let share = remaining_images as u128 * length as u128 / remaining_length as u128;
        zone.quota = (share as u64).min(length);
        remaining_images -= zone.quota;
        remaining_length -= length;
    }

    if remaining_images > 0 {
        log::debug!(
            "Proportional phase left {} images; assigning by density",
            remaining_images
        );
    }

    while remaining_images > 0 {
        let Some(index) = least_dense(zones) else {
            return Err(FramePickError::InsufficientCapacity {
                requested: total_images,
                available: capacity,
            });
        };
        zones[index].quota += 1;
        remaining_images -= 1;
    }

    Ok(())
}

/// Index of the open zone with the lowest `quota / length`.
///
/// Ties go to the longer zone, then to the earlier one.
fn least_dense(zones: &[Livezone]) -> Option<usize> {
    zones
        .iter()
        .enumerate()
        .filter(|(_, zone)| !zone.is_full())
        .min_by(|(left_index, left), (right_index, right)| {
            compare_density(left, right)
                .then_with(|| right.len().cmp(&left.len()))
                .then_with(|| left_index.cmp(right_index))
        })
        .map(|(index, _)| index)
}

/// Compare `quota / len` of two zones exactly, by cross-multiplying.
///
/// Livezones always hold at least one frame, so there is no zero divisor.
fn compare_density(left: &Livezone, right: &Livezone) -> Ordering {
    let left_scaled = left.quota as u128 * right.len() as u128;
    let right_scaled = right.quota as u128 * left.len() as u128;
    left_scaled.cmp(&right_scaled)
}
