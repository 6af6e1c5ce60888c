//! Livezone partitioning.
//!
//! Livezones are the maximal stretches of the timeline not covered by any
//! deadzone. They are always derived, never stored: [`partition`] rebuilds
//! them from the deadzone list whenever a sample set is computed.

use crate::error::FramePickError;
use crate::range::FrameRange;

/// A stretch of usable frames between deadzones.
///
/// Besides its range, a livezone records the sizes of the deadzones on
/// either side (0 at a timeline boundary) and the number of images the
/// allocator assigned to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Livezone {
    /// Frames covered by the zone.
    pub range: FrameRange,
    /// Number of images to sample from this zone.
    pub quota: u64,
    /// Length of the deadzone immediately before the zone.
    pub preceding_deadzone: u64,
    /// Length of the deadzone immediately after the zone.
    pub following_deadzone: u64,
}

impl Livezone {
    /// Number of frames in the zone.
    pub fn len(&self) -> u64 {
        self.range.len()
    }

    /// Always `false`; a livezone holds at least one frame.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns `true` if the zone has as many images as frames.
    pub fn is_full(&self) -> bool {
        self.quota >= self.len()
    }
}

/// Split `0..total_frames` into the livezones left between `deadzones`.
///
/// `deadzones` must be sorted and non-overlapping. Adjacent deadzones are
/// tolerated and simply leave no livezone between them. The result may be
/// empty when deadzones cover the whole timeline; the allocator reports that
/// as [`FramePickError::InsufficientCapacity`].
///
/// # Errors
///
/// Returns [`FramePickError::OverlappingDeadzone`] if a deadzone starts at or
/// before the end of the one before it, and
/// [`FramePickError::InvalidRange`] if a deadzone reaches past the video.
///
/// # Example
///
/// ```
/// use framepick::{FrameRange, partition};
///
/// let deadzones = [FrameRange::new(40, 60)?];
/// let zones = partition(100, &deadzones)?;
/// assert_eq!(zones.len(), 2);
/// assert_eq!(zones[0].range.to_string(), "0:39");
/// assert_eq!(zones[0].following_deadzone, 21);
/// assert_eq!(zones[1].range.to_string(), "61:99");
/// assert_eq!(zones[1].preceding_deadzone, 21);
/// # Ok::<(), framepick::FramePickError>(())
/// ```
pub fn partition(
    total_frames: u64,
    deadzones: &[FrameRange],
) -> Result<Vec<Livezone>, FramePickError> {
    let mut zones = Vec::with_capacity(deadzones.len() + 1);
    let mut previous: Option<FrameRange> = None;

    for deadzone in deadzones {
        deadzone.check_bounds(total_frames)?;

        let next_free = match previous {
            Some(prior) => {
                if deadzone.start() <= prior.end() {
                    return Err(FramePickError::OverlappingDeadzone {
                        previous: prior,
                        current: *deadzone,
                    });
                }
                prior.end() + 1
            }
            None => 0,
        };

        if deadzone.start() > next_free {
            zones.push(Livezone {
                range: FrameRange::new(next_free, deadzone.start() - 1)?,
                quota: 0,
                preceding_deadzone: previous.map_or(0, |prior| prior.len()),
                following_deadzone: deadzone.len(),
            });
        }
        previous = Some(*deadzone);
    }

    let next_free = previous.map_or(0, |prior| prior.end() + 1);
    if next_free < total_frames {
        zones.push(Livezone {
            range: FrameRange::new(next_free, total_frames - 1)?,
            quota: 0,
            preceding_deadzone: previous.map_or(0, |prior| prior.len()),
            following_deadzone: 0,
        });
    }

    log::debug!(
        "Partitioned {} frames around {} deadzones into {} livezones",
        total_frames,
        deadzones.len(),
        zones.len()
    );
    Ok(zones)
}
