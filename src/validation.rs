//! Deadzone and request validation.
//!
//! [`validate_request`] inspects a deadzone list (typically read straight
//! from a file) and an optional image count, and returns a
//! [`ValidationReport`] describing problems before any sampling is tried.
//!
//! # Example
//!
//! ```
//! use framepick::{FrameRange, validate_request};
//!
//! let deadzones = [FrameRange::new(10, 20)?, FrameRange::new(21, 30)?];
//! let report = validate_request(100, &deadzones, Some(12));
//! assert!(report.is_valid());
//! assert_eq!(report.warnings.len(), 1); // the two ranges should be merged
//! # Ok::<(), framepick::FramePickError>(())
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::deadzone::{available_frames_in, merge_ranges};
use crate::range::FrameRange;

/// Summary of a validation pass.
///
/// Contains lists of informational notices, warnings, and errors.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Informational notices (not problems).
    pub info: Vec<String>,
    /// Issues that sampling tolerates but that likely need attention.
    pub warnings: Vec<String>,
    /// Issues that will make sampling fail.
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// Returns `true` if no errors were found.
    ///
    /// Warnings do not affect this result.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of issues (info + warnings + errors).
    pub fn issue_count(&self) -> usize {
        self.info.len() + self.warnings.len() + self.errors.len()
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for item in &self.info {
            writeln!(f, "[INFO] {item}")?;
        }
        for item in &self.warnings {
            writeln!(f, "[WARN] {item}")?;
        }
        for item in &self.errors {
            writeln!(f, "[ERROR] {item}")?;
        }
        if self.issue_count() == 0 {
            writeln!(f, "No issues found.")?;
        }
        Ok(())
    }
}

/// Check `deadzones` against a video of `total_frames` frames and, if given,
/// whether `total_images` samples can be placed.
pub fn validate_request(
    total_frames: u64,
    deadzones: &[FrameRange],
    total_images: Option<u64>,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    if total_frames == 0 {
        report.errors.push("Video has no frames".to_string());
        return report;
    }

    // ── Deadzone structure ─────────────────────────────────────────
    for zone in deadzones {
        if zone.end() >= total_frames {
            report.errors.push(format!(
                "Deadzone {zone} reaches past the last frame ({})",
                total_frames - 1
            ));
        }
    }

    for pair in deadzones.windows(2) {
        let (previous, current) = (pair[0], pair[1]);
        if current.start() <= previous.end() {
            report.errors.push(format!(
                "Deadzone {current} overlaps or precedes {previous}"
            ));
        } else if current.start() == previous.end() + 1 {
            report.warnings.push(format!(
                "Deadzones {previous} and {current} are adjacent and should be merged"
            ));
        }
    }

    // ── Capacity ───────────────────────────────────────────────────
    let Ok(timeline) = FrameRange::new(0, total_frames - 1) else {
        return report;
    };
    let in_bounds = merge_ranges(
        deadzones
            .iter()
            .filter_map(|zone| zone.intersection(&timeline))
            .collect(),
    );
    let available = available_frames_in(&in_bounds, timeline);

    report.info.push(format!(
        "{} deadzones, {} of {} frames available",
        deadzones.len(),
        available,
        total_frames
    ));

    if available == 0 {
        report
            .errors
            .push("Deadzones cover the entire video".to_string());
    } else if available * 10 < total_frames {
        report.warnings.push(format!(
            "Only {:.1}% of the video is outside deadzones",
            available as f64 * 100.0 / total_frames as f64
        ));
    }

    if let Some(images) = total_images {
        if images < 2 {
            report
                .errors
                .push(format!("A montage needs at least 2 images (got {images})"));
        } else if images > available {
            report.errors.push(format!(
                "{images} images requested but only {available} frames are available"
            ));
        } else {
            report.info.push(format!(
                "{images} images, one every {:.1} available frames",
                available as f64 / images as f64
            ));
        }
    }

    report
}
