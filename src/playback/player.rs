//! `AudioPlayer` trait and the file-writing implementation.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

// ---------------------------------------------------------------------------
// PlaybackError
// ---------------------------------------------------------------------------

/// Errors raised when starting playback.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No usable output device, or the device refused the stream.
    #[error("audio device unavailable: {0}")]
    Device(String),

    /// The audio bytes could not be decoded.
    #[error("cannot decode audio: {0}")]
    Decode(String),

    /// Writing audio to disk failed.
    #[error("audio I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Called once when playback runs to completion.  Not called after
/// [`AudioPlayer::stop`].
pub type OnFinished = Box<dyn FnOnce() + Send + 'static>;

// ---------------------------------------------------------------------------
// AudioPlayer trait
// ---------------------------------------------------------------------------

/// Audio output backend.
///
/// `play` returns as soon as playback has started; completion is signalled
/// through `on_finished`.  Starting a new playback stops the current one.
/// `play` may block briefly while the device is opened, so async callers
/// should run it on the blocking pool.
pub trait AudioPlayer: Send + Sync {
    fn play(&self, audio: Vec<u8>, on_finished: OnFinished) -> Result<(), PlaybackError>;

    /// Silence current playback.  A no-op when nothing is playing.
    fn stop(&self);

    fn is_playing(&self) -> bool;
}

// ---------------------------------------------------------------------------
// WavFilePlayer
// ---------------------------------------------------------------------------

/// "Plays" audio by writing each clip to `readout-<n>.wav` in a directory.
///
/// Completion is reported immediately after the write, so the readout state
/// machine runs the same way it does with a real device.
pub struct WavFilePlayer {
    dir: PathBuf,
    counter: AtomicU64,
}

impl WavFilePlayer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            counter: AtomicU64::new(0),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl AudioPlayer for WavFilePlayer {
    fn play(&self, audio: Vec<u8>, on_finished: OnFinished) -> Result<(), PlaybackError> {
        std::fs::create_dir_all(&self.dir)?;
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let path = self.dir.join(format!("readout-{n}.wav"));
        std::fs::write(&path, &audio)?;
        log::info!("playback: wrote {} bytes to {}", audio.len(), path.display());
        on_finished();
        Ok(())
    }

    fn stop(&self) {}

    fn is_playing(&self) -> bool {
        false
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
