//! Video probing through FFmpeg.
//!
//! Sampling only needs to know how many frames a video has. [`VideoProbe`]
//! opens the file, counts the packets of its best video stream (the same
//! count `ffprobe -count_frames` reports for ordinary streams), reads the
//! frame dimensions, and closes the demuxer again.
//!
//! Only available with the `ffmpeg` feature.

use std::path::Path;

use ffmpeg_next::{codec::context::Context as CodecContext, media::Type, util::log::Level};

use crate::error::FramePickError;

/// Frame count and dimensions of a video file.
///
/// # Example
///
/// ```no_run
/// use framepick::VideoProbe;
///
/// let probe = VideoProbe::probe("input.mp4")?;
/// println!("{} frames at {}x{}", probe.frame_count, probe.width, probe.height);
/// # Ok::<(), framepick::FramePickError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoProbe {
    /// Number of frames in the best video stream.
    pub frame_count: u64,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
}

impl VideoProbe {
    /// Probe the video at `path`.
    ///
    /// Reads every packet of the file, so the cost grows with file size but
    /// no frame is decoded.
    ///
    /// # Errors
    ///
    /// Returns [`FramePickError::FileOpen`] if the file cannot be opened and
    /// [`FramePickError::NoVideoStream`] if it has no video.
    pub fn probe<P: AsRef<Path>>(path: P) -> Result<Self, FramePickError> {
        let path = path.as_ref();
        log::debug!("Probing video: {}", path.display());

        ffmpeg_next::init().map_err(|error| FramePickError::FileOpen {
            path: path.to_path_buf(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;
        ffmpeg_next::util::log::set_level(Level::Error);

        let mut input_context =
            ffmpeg_next::format::input(&path).map_err(|error| FramePickError::FileOpen {
                path: path.to_path_buf(),
                reason: error.to_string(),
            })?;

        let (stream_index, width, height) = {
            let stream = input_context
                .streams()
                .best(Type::Video)
                .ok_or(FramePickError::NoVideoStream)?;
            let decoder = CodecContext::from_parameters(stream.parameters())?
                .decoder()
                .video()?;
            (stream.index(), decoder.width(), decoder.height())
        };

        let frame_count = input_context
            .packets()
            .filter(|(stream, _)| stream.index() == stream_index)
            .count() as u64;

        log::info!(
            "{}: {} frames, {}x{}",
            path.display(),
            frame_count,
            width,
            height
        );
        Ok(Self {
            frame_count,
            width,
            height,
        })
    }
}

/// Number of frames in the video at `path`.
pub fn probe_total_frames<P: AsRef<Path>>(path: P) -> Result<u64, FramePickError> {
    Ok(VideoProbe::probe(path)?.frame_count)
}

/// `(width, height)` of the video at `path`.
pub fn probe_dimensions<P: AsRef<Path>>(path: P) -> Result<(u32, u32), FramePickError> {
    let probe = VideoProbe::probe(path)?;
    Ok((probe.width, probe.height))
}
