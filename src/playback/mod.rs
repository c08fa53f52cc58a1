//! Audio output.
//!
//! [`AudioPlayer`] is the seam between the readout orchestrator and the
//! sound card.  [`WavFilePlayer`] writes clips to disk and is always
//! available; `RodioPlayer` plays on the default device and is built with
//! the `rodio-playback` feature.

#[cfg(feature = "rodio-playback")]
pub mod device;
pub mod player;

#[cfg(feature = "rodio-playback")]
pub use device::RodioPlayer;
pub use player::{AudioPlayer, OnFinished, PlaybackError, WavFilePlayer};
