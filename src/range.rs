//! Inclusive frame ranges.
//!
//! [`FrameRange`] is the shared value type for deadzones and livezones. Its
//! text form is `start:end`, the same form used one-per-line in deadzone
//! files.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::error::FramePickError;

/// A closed range of frame numbers, `start..=end`.
///
/// Construction through [`FrameRange::new`] guarantees `start <= end`, so a
/// range always holds at least one frame.
///
/// # Example
///
/// ```
/// use framepick::FrameRange;
///
/// let range: FrameRange = "40:60".parse()?;
/// assert_eq!(range.len(), 21);
/// assert!(range.contains(50));
/// # Ok::<(), framepick::FramePickError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameRange {
    start: u64,
    end: u64,
}

impl FrameRange {
    /// Create a range covering `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns [`FramePickError::InvalidRange`] if `start > end`.
    pub fn new(start: u64, end: u64) -> Result<Self, FramePickError> {
        if start > end {
            return Err(FramePickError::invalid_range(
                start,
                end,
                "start must not exceed end",
            ));
        }
        Ok(Self { start, end })
    }

    /// A range holding exactly one frame.
    pub fn single(frame: u64) -> Self {
        Self {
            start: frame,
            end: frame,
        }
    }

    /// First frame in the range.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Last frame in the range (inclusive).
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Number of frames covered. Never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Midpoint, rounded down.
    pub fn midpoint(&self) -> u64 {
        self.start + (self.end - self.start) / 2
    }

    /// Returns `true` if `frame` lies within the range.
    pub fn contains(&self, frame: u64) -> bool {
        self.start <= frame && frame <= self.end
    }

    /// Returns `true` if the two ranges overlap or sit next to each other,
    /// i.e. they would merge into one range.
    pub fn touches(&self, other: &FrameRange) -> bool {
        self.start <= other.end.saturating_add(1) && other.start <= self.end.saturating_add(1)
    }

    /// The frames shared by both ranges, if any.
    pub fn intersection(&self, other: &FrameRange) -> Option<FrameRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(FrameRange { start, end })
    }

    /// Check the range against a timeline of `total_frames` frames.
    ///
    /// # Errors
    ///
    /// Returns [`FramePickError::InvalidRange`] if the range ends at or past
    /// `total_frames`.
    pub fn check_bounds(&self, total_frames: u64) -> Result<(), FramePickError> {
        if self.end >= total_frames {
            return Err(FramePickError::invalid_range(
                self.start,
                self.end,
                format!("video has {total_frames} frames"),
            ));
        }
        Ok(())
    }

    pub(crate) fn extend_to(&mut self, end: u64) {
        self.end = self.end.max(end);
    }
}

impl Display for FrameRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}:{}", self.start, self.end)
    }
}

impl FromStr for FrameRange {
    type Err = FramePickError;

    /// Parse `start:end` or a bare `start`.
    ///
    /// Numbers are read as signed so that negative input is reported as an
    /// invalid range rather than a generic parse failure.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let (start_text, end_text) = trimmed.split_once(':').unwrap_or((trimmed, trimmed));
        let start = parse_frame(start_text, start_text, end_text)?;
        let end = parse_frame(end_text, start_text, end_text)?;
        FrameRange::new(start, end)
    }
}

fn parse_frame(text: &str, start: &str, end: &str) -> Result<u64, FramePickError> {
    let number: i64 = text
        .trim()
        .parse()
        .map_err(|_| FramePickError::invalid_range(start.trim(), end.trim(), "not an integer"))?;
    u64::try_from(number).map_err(|_| {
        FramePickError::invalid_range(start.trim(), end.trim(), "negative frame number")
    })
}
