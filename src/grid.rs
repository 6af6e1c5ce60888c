//! Montage grid layout.
//!
//! A grid is written `COLUMNSxROWS`, e.g. `4x3`. Cells are filled row by row
//! in a serpentine order: even rows left to right, odd rows right to left.
//! Reading the montage then follows the timeline without jumping back to the
//! left edge at each row.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::error::FramePickError;

/// Columns and rows of a montage.
///
/// # Example
///
/// ```
/// use framepick::GridLayout;
///
/// let grid: GridLayout = "4x3".parse()?;
/// assert_eq!(grid.total_images(), 12);
/// # Ok::<(), framepick::FramePickError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridLayout {
    /// Number of columns.
    pub columns: u32,
    /// Number of rows.
    pub rows: u32,
}

impl GridLayout {
    /// Create a grid.
    ///
    /// # Errors
    ///
    /// Returns [`FramePickError::InvalidGrid`] if the grid holds fewer than
    /// two cells.
    pub fn new(columns: u32, rows: u32) -> Result<Self, FramePickError> {
        let grid = Self { columns, rows };
        if grid.total_images() < 2 {
            return Err(FramePickError::InvalidGrid(format!(
                "{grid} must allow for at least 2 images"
            )));
        }
        Ok(grid)
    }

    /// Number of cells, i.e. images to sample.
    pub fn total_images(&self) -> u64 {
        self.columns as u64 * self.rows as u64
    }

    /// Arrange `frames` into rows in serpentine order.
    ///
    /// Odd rows are reversed. Frames beyond the grid are ignored; a short
    /// final row is kept as is.
    pub fn serpentine<T: Copy>(&self, frames: &[T]) -> Vec<Vec<T>> {
        frames
            .chunks(self.columns.max(1) as usize)
            .take(self.rows as usize)
            .enumerate()
            .map(|(row, chunk)| {
                let mut cells = chunk.to_vec();
                if row % 2 == 1 {
                    cells.reverse();
                }
                cells
            })
            .collect()
    }
}

impl Display for GridLayout {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}x{}", self.columns, self.rows)
    }
}

impl FromStr for GridLayout {
    type Err = FramePickError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let invalid =
            || FramePickError::InvalidGrid(format!("expected COLUMNSxROWS, got {trimmed:?}"));
        let (columns, rows) = trimmed
            .to_ascii_lowercase()
            .split_once('x')
            .map(|(columns, rows)| (columns.trim().parse::<u32>(), rows.trim().parse::<u32>()))
            .ok_or_else(invalid)?;
        GridLayout::new(columns.map_err(|_| invalid())?, rows.map_err(|_| invalid())?)
    }
}
