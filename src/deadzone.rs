//! Deadzone storage and persistence.
//!
//! A deadzone is a frame range the user does not want sampled: fades to
//! black, title cards, logos. [`DeadzoneSet`] keeps them sorted and merged,
//! and reads/writes the plain-text `start:end` file that sits next to the
//! video.
//!
//! # Example
//!
//! ```
//! use framepick::DeadzoneSet;
//!
//! let mut deadzones = DeadzoneSet::new(100);
//! deadzones.add(10, Some(20))?;
//! deadzones.add(21, Some(25))?;
//! assert_eq!(deadzones.list().len(), 1);
//! assert_eq!(deadzones.list()[0].to_string(), "10:25");
//! # Ok::<(), framepick::FramePickError>(())
//! ```

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::error::FramePickError;
use crate::range::FrameRange;

/// The sorted, merged list of deadzones for one video.
///
/// Invariant: ranges are sorted by start, lie within `0..total_frames`, and
/// no two ranges overlap or touch. Every mutation restores it before
/// returning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadzoneSet {
    total_frames: u64,
    ranges: Vec<FrameRange>,
}

impl DeadzoneSet {
    /// Create an empty set for a video of `total_frames` frames.
    pub fn new(total_frames: u64) -> Self {
        Self {
            total_frames,
            ranges: Vec::new(),
        }
    }

    /// Build a set from arbitrary ranges, bounds-checking and merging them.
    ///
    /// # Errors
    ///
    /// Returns [`FramePickError::InvalidRange`] if any range ends at or past
    /// `total_frames`.
    pub fn from_ranges(
        total_frames: u64,
        ranges: impl IntoIterator<Item = FrameRange>,
    ) -> Result<Self, FramePickError> {
        let mut collected = Vec::new();
        for range in ranges {
            range.check_bounds(total_frames)?;
            collected.push(range);
        }
        Ok(Self {
            total_frames,
            ranges: merge_ranges(collected),
        })
    }

    /// Load the deadzone file at `path`.
    ///
    /// A missing file yields an empty set. Files that were edited by hand and
    /// are no longer sorted or merged are normalised, with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`FramePickError::DeadzoneParse`] for a malformed line,
    /// [`FramePickError::InvalidRange`] for a range outside the video, or an
    /// I/O error.
    pub fn load<P: AsRef<Path>>(path: P, total_frames: u64) -> Result<Self, FramePickError> {
        let path = path.as_ref();
        let raw = match read_deadzone_file(path) {
            Ok(raw) => raw,
            Err(FramePickError::IoError(error)) if error.kind() == ErrorKind::NotFound => {
                log::debug!("No deadzone file at {}", path.display());
                return Ok(Self::new(total_frames));
            }
            Err(error) => return Err(error),
        };

        let set = Self::from_ranges(total_frames, raw.iter().copied())?;
        if set.ranges != raw {
            log::warn!(
                "Deadzone file {} was not sorted and merged ({} ranges normalised to {})",
                path.display(),
                raw.len(),
                set.ranges.len()
            );
        }
        log::debug!(
            "Loaded {} deadzones ({} dead frames) from {}",
            set.ranges.len(),
            set.dead_frame_count(),
            path.display()
        );
        Ok(set)
    }

    /// Write the set to `path` in `start:end` form.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), FramePickError> {
        write_deadzone_file(path, &self.ranges)
    }

    /// Add a deadzone and merge it with any deadzone it touches.
    ///
    /// A missing `end` marks the single frame `start`.
    ///
    /// # Errors
    ///
    /// Returns [`FramePickError::InvalidRange`] if `start > end` or the range
    /// reaches past the end of the video. The set is unchanged on error.
    pub fn add(&mut self, start: u64, end: Option<u64>) -> Result<(), FramePickError> {
        self.ranges = add_deadzone(&self.ranges, self.total_frames, start, end)?;
        log::debug!(
            "Added deadzone {}:{}; now {} ranges",
            start,
            end.unwrap_or(start),
            self.ranges.len()
        );
        Ok(())
    }

    /// Remove a stored deadzone. Only whole ranges can be removed.
    ///
    /// Returns `true` if `range` was present.
    pub fn remove(&mut self, range: FrameRange) -> bool {
        let before = self.ranges.len();
        self.ranges.retain(|stored| *stored != range);
        before != self.ranges.len()
    }

    /// The current deadzones, sorted and merged.
    pub fn list(&self) -> &[FrameRange] {
        &self.ranges
    }

    /// Length of the timeline this set belongs to.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Returns `true` if no deadzones are defined.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Returns `true` if `frame` falls inside any deadzone.
    pub fn contains(&self, frame: u64) -> bool {
        is_dead(&self.ranges, frame)
    }

    /// Total number of frames covered by deadzones.
    pub fn dead_frame_count(&self) -> u64 {
        self.ranges.iter().map(FrameRange::len).sum()
    }

    /// Number of frames outside every deadzone.
    pub fn available_frames(&self) -> u64 {
        self.total_frames - self.dead_frame_count()
    }

    /// Number of frames within `range` that lie outside every deadzone.
    pub fn available_frames_in(&self, range: FrameRange) -> u64 {
        available_frames_in(&self.ranges, range)
    }
}

/// Insert `start..=end` into a deadzone list and return the merged result.
///
/// This is the pure form of [`DeadzoneSet::add`]. The input list should
/// already be sorted and merged; after the new range is pushed and the list
/// re-sorted, every range it touches is adjacent to it, so one linear merge
/// pass restores the invariant.
///
/// # Errors
///
/// Returns [`FramePickError::InvalidRange`] if `start > end` or
/// `end >= total_frames`.
pub fn add_deadzone(
    deadzones: &[FrameRange],
    total_frames: u64,
    start: u64,
    end: Option<u64>,
) -> Result<Vec<FrameRange>, FramePickError> {
    let range = match end {
        Some(end) => FrameRange::new(start, end)?,
        None => FrameRange::single(start),
    };
    range.check_bounds(total_frames)?;

    let mut ranges = deadzones.to_vec();
    ranges.push(range);
    Ok(merge_ranges(ranges))
}

/// Sort ranges by start and merge any pair that overlaps or touches.
pub(crate) fn merge_ranges(mut ranges: Vec<FrameRange>) -> Vec<FrameRange> {
    ranges.sort_unstable();
    let mut merged: Vec<FrameRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(current) if current.touches(&range) => {
                current.extend_to(range.end());
            }
            _ => merged.push(range),
        }
    }
    merged
}

pub(crate) fn is_dead(deadzones: &[FrameRange], frame: u64) -> bool {
    deadzones.iter().any(|zone| zone.contains(frame))
}

pub(crate) fn available_frames_in(deadzones: &[FrameRange], range: FrameRange) -> u64 {
    let dead: u64 = deadzones
        .iter()
        .filter_map(|zone| zone.intersection(&range))
        .map(|overlap| overlap.len())
        .sum();
    range.len().saturating_sub(dead)
}

/// Read a deadzone file without normalising it.
///
/// Each non-blank line must be `start:end`. The ranges are returned in file
/// order so callers can detect hand-edited files.
///
/// # Errors
///
/// Returns [`FramePickError::DeadzoneParse`] with the 1-based line number of
/// the first malformed line, or an I/O error.
pub fn read_deadzone_file<P: AsRef<Path>>(path: P) -> Result<Vec<FrameRange>, FramePickError> {
    let text = fs::read_to_string(path)?;
    let mut ranges = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let parse_error = || FramePickError::DeadzoneParse {
            line: index + 1,
            content: trimmed.to_string(),
        };
        // A bare number is valid on the command line but not in the file.
        if !trimmed.contains(':') {
            return Err(parse_error());
        }
        let range = trimmed.parse::<FrameRange>().map_err(|_| parse_error())?;
        ranges.push(range);
    }
    Ok(ranges)
}

/// Write ranges one per line as `start:end`.
pub fn write_deadzone_file<P: AsRef<Path>>(
    path: P,
    ranges: &[FrameRange],
) -> Result<(), FramePickError> {
    let mut text = String::new();
    for range in ranges {
        text.push_str(&range.to_string());
        text.push('\n');
    }
    fs::write(path, text)?;
    Ok(())
}

/// The deadzone file that belongs to `video`: `<stem>_deadzones.txt` in the
/// same directory.
pub fn deadzone_file_for<P: AsRef<Path>>(video: P) -> PathBuf {
    let video = video.as_ref();
    let stem = video
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    video.with_file_name(format!("{stem}_deadzones.txt"))
}
