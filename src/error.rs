//! Error types for the `framepick` crate.
//!
//! This module defines [`FramePickError`], the unified error type returned by
//! all fallible operations in the crate. Errors carry the offending ranges and
//! counts so a caller can report the problem without extra logging.

use std::io::Error as IoError;
#[cfg(feature = "ffmpeg")]
use std::path::PathBuf;

#[cfg(feature = "ffmpeg")]
use ffmpeg_next::Error as FfmpegError;
use thiserror::Error;

use crate::range::FrameRange;

/// The unified error type for all `framepick` operations.
///
/// Every public function that can fail returns `Result<T, FramePickError>`.
/// No operation produces partial output alongside an error: a caller either
/// receives a complete, valid result or one of these variants.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FramePickError {
    /// A frame range is malformed or lies outside the timeline.
    #[error("Invalid range {start}:{end}: {reason}")]
    InvalidRange {
        /// The start of the range, as given.
        start: String,
        /// The end of the range, as given.
        end: String,
        /// Why the range was rejected.
        reason: String,
    },

    /// Two deadzones overlap or are out of order.
    ///
    /// The store never produces this itself; it surfaces when a deadzone
    /// list was edited outside of [`DeadzoneSet`](crate::DeadzoneSet).
    #[error("Deadzone {current} overlaps or precedes deadzone {previous}")]
    OverlappingDeadzone {
        /// The deadzone that came first in the list.
        previous: FrameRange,
        /// The deadzone that starts at or before `previous` ends.
        current: FrameRange,
    },

    /// There are not enough live frames to place every requested image.
    #[error("Cannot place {requested} images in {available} available frames")]
    InsufficientCapacity {
        /// Number of images requested.
        requested: u64,
        /// Number of frames outside every deadzone.
        available: u64,
    },

    /// The requested image count is unusable (zero).
    #[error("Image count must be greater than zero (got {0})")]
    InvalidImageCount(u64),

    /// A grid specification could not be parsed or holds too few cells.
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// A line of a deadzone file is not a `start:end` pair.
    #[error("Malformed deadzone on line {line}: {content:?}")]
    DeadzoneParse {
        /// 1-based line number.
        line: usize,
        /// The offending line, trimmed.
        content: String,
    },

    /// The rebalancing strategy hit its step limit or left a sample inside
    /// a deadzone.
    #[error("Rebalancing did not converge after {steps} steps")]
    RebalanceDiverged {
        /// Number of worklist steps taken before giving up.
        steps: usize,
    },

    /// An I/O error occurred while reading or writing a deadzone file.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// The video file could not be opened for probing.
    #[cfg(feature = "ffmpeg")]
    #[error("Failed to open media file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to the probe.
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The file does not contain a video stream.
    #[cfg(feature = "ffmpeg")]
    #[error("No video stream found in file")]
    NoVideoStream,

    /// An error originating from the FFmpeg libraries.
    #[cfg(feature = "ffmpeg")]
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),
}

impl FramePickError {
    pub(crate) fn invalid_range(
        start: impl ToString,
        end: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        FramePickError::InvalidRange {
            start: start.to_string(),
            end: end.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(feature = "ffmpeg")]
impl From<FfmpegError> for FramePickError {
    fn from(error: FfmpegError) -> Self {
        FramePickError::FfmpegError(error.to_string())
    }
}
