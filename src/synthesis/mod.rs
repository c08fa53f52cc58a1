//! Text-to-speech via a VOICEVOX-compatible engine.
//!
//! This module provides:
//! * [`SpeechSynthesizer`]: async trait implemented by synthesis backends.
//! * [`VoicevoxClient`]: HTTP backend for `/audio_query`, `/synthesis` and
//!   `/speakers`.
//! * [`AudioQuery`]: the engine's editable synthesis request, with
//!   [`AudioQuery::apply`] merging tuned [`SynthesisParameters`].
//! * [`SynthesisError`]: error variants for engine calls.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use yomiage::config::AppConfig;
//! use yomiage::synthesis::{SpeechSynthesizer, VoicevoxClient};
//! use yomiage::tuning::{SpeechTuner, SynthesisParameters};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::default();
//!     let client = VoicevoxClient::from_config(&config.synthesis)?;
//!
//!     let text = "ねがいましてははっせんえんなりではいくら";
//!     let params = SpeechTuner::new().tune(text, SynthesisParameters::default());
//!     let wav = client
//!         .synthesize_text(text, config.synthesis.speaker_id, &params)
//!         .await?;
//!     std::fs::write("readout.wav", wav)?;
//!     Ok(())
//! }
//! ```
//!
//! [`SynthesisParameters`]: crate::tuning::SynthesisParameters

pub mod client;
pub mod query;

pub use client::{Speaker, SpeakerStyle, SpeechSynthesizer, SynthesisError, VoicevoxClient};
pub use query::{AccentPhrase, AudioQuery, Mora};
