//! ASCII timeline rendering.
//!
//! Draws the video as one line of characters:
//!
//! | Char | Meaning |
//! |------|---------|
//! | `-`  | live frame |
//! | `#`  | deadzone |
//! | `x`  | sampled live frame |
//! | `X`  | sampled frame inside a deadzone (should never appear) |
//!
//! Long videos are compressed into a fixed number of columns; each column
//! shows the most significant mark among the frames it covers.

use crate::range::FrameRange;

/// Render a timeline of `total_frames` frames.
///
/// With `width` set, the line is compressed to at most that many columns.
/// Otherwise there is one column per frame.
///
/// # Example
///
/// ```
/// use framepick::{FrameRange, render_timeline};
///
/// let deadzones = [FrameRange::new(3, 5)?];
/// let line = render_timeline(10, &deadzones, &[0, 4, 9], None);
/// assert_eq!(line, "x--#X#---x");
/// # Ok::<(), framepick::FramePickError>(())
/// ```
pub fn render_timeline(
    total_frames: u64,
    deadzones: &[FrameRange],
    samples: &[u64],
    width: Option<usize>,
) -> String {
    if total_frames == 0 {
        return String::new();
    }

    let columns = width
        .filter(|&width| width > 0)
        .map_or(total_frames, |width| (width as u64).min(total_frames));
    let mut marks = vec![Mark::Live; columns as usize];

    let column_of = |frame: u64| (frame as u128 * columns as u128 / total_frames as u128) as usize;

    for zone in deadzones {
        let end = zone.end().min(total_frames - 1);
        if zone.start() > end {
            continue;
        }
        for column in column_of(zone.start())..=column_of(end) {
            marks[column] = marks[column].max(Mark::Dead);
        }
    }

    for &frame in samples.iter().filter(|&&frame| frame < total_frames) {
        let dead = deadzones.iter().any(|zone| zone.contains(frame));
        let column = column_of(frame);
        let mark = if dead { Mark::DeadSample } else { Mark::Sample };
        marks[column] = marks[column].max(mark);
    }

    marks.into_iter().map(Mark::symbol).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Mark {
    Live,
    Dead,
    Sample,
    DeadSample,
}

impl Mark {
    fn symbol(self) -> char {
        match self {
            Mark::Live => '-',
            Mark::Dead => '#',
            Mark::Sample => 'x',
            Mark::DeadSample => 'X',
        }
    }
}
