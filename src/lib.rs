//! # framepick
//!
//! Pick the frames of a video for a grid montage: evenly spaced across the
//! video, never inside a user-declared deadzone, and with sampling density
//! kept balanced across the live stretches between deadzones.
//!
//! The crate is the selection core only. Extracting the chosen frames and
//! stacking them into an image is left to the caller (typically `ffmpeg`).
//!
//! ## Quick Start
//!
//! ### Sample a Video
//!
//! ```
//! use framepick::{GridLayout, compute_sample_frames};
//!
//! let grid: GridLayout = "5x2".parse()?;
//! let samples = compute_sample_frames(100, grid.total_images(), &[])?;
//! assert_eq!(samples.frames(), &[0, 11, 22, 33, 44, 55, 66, 77, 88, 99]);
//! # Ok::<(), framepick::FramePickError>(())
//! ```
//!
//! ### Avoid Deadzones
//!
//! ```
//! use framepick::{DeadzoneSet, compute_sample_frames};
//!
//! let mut deadzones = DeadzoneSet::new(100);
//! deadzones.add(40, Some(60))?; // a title card
//! let samples = compute_sample_frames(100, 10, deadzones.list())?;
//! assert!(samples.first_dead_frame(deadzones.list()).is_none());
//! # Ok::<(), framepick::FramePickError>(())
//! ```
//!
//! ### Persist Deadzones
//!
//! ```no_run
//! use framepick::{DeadzoneSet, deadzone_file_for};
//!
//! let path = deadzone_file_for("holiday.mp4"); // holiday_deadzones.txt
//! let mut deadzones = DeadzoneSet::load(&path, 5_000)?;
//! deadzones.add(0, Some(48))?;
//! deadzones.save(&path)?;
//! # Ok::<(), framepick::FramePickError>(())
//! ```
//!
//! ## Strategies
//!
//! - **Partition** (default): split the timeline into livezones, give each
//!   zone a share of the images proportional to its length, and spread each
//!   share evenly inside its zone.
//! - **Rebalance**: spread the images over the whole video, then push any
//!   that land in a deadzone to either side of it, respacing recursively.
//!   See [`SamplingStrategy`] and [`SplitPolicy`].
//!
//! ### Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `ffmpeg` | `VideoProbe` for reading frame count and dimensions via `ffmpeg-next` |
//! | `full` | Enables all of the above |

pub mod allocation;
pub mod configuration;
pub mod deadzone;
pub mod error;
pub mod grid;
pub mod livezone;
pub mod planner;
#[cfg(feature = "ffmpeg")]
pub mod probe;
pub mod range;
mod rebalance;
pub mod sample;
pub mod sampler;
pub mod timeline;
pub mod validation;

pub use allocation::allocate;
pub use configuration::{SampleOptions, SamplingStrategy, SplitPolicy};
pub use deadzone::{
    DeadzoneSet, add_deadzone, deadzone_file_for, read_deadzone_file, write_deadzone_file,
};
pub use error::FramePickError;
pub use grid::GridLayout;
pub use livezone::{Livezone, partition};
pub use planner::{compute_sample_frames, compute_sample_frames_with_options, plan_livezones};
#[cfg(feature = "ffmpeg")]
pub use probe::{VideoProbe, probe_dimensions, probe_total_frames};
pub use range::FrameRange;
pub use sample::{SampleSet, SpacingStats};
pub use sampler::{evenly_spaced, sample_zone};
pub use timeline::render_timeline;
pub use validation::{ValidationReport, validate_request};
