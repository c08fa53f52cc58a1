//! Readout orchestrator module.
//!
//! This module wires the phrase → tuner → synthesis → playback chain and
//! exposes the shared status that front-ends read.
//!
//! # Architecture
//!
//! ```text
//! ReadoutCommand (mpsc)
//!        │
//!        ▼
//! ReadoutOrchestrator::run()  ← async tokio task
//!        │
//!        ├─ Speak(text) → SpeechTuner::tune
//!        │                 └─ spawn(SpeechSynthesizer::synthesize_text)  → Synthesizing
//!        │                       └─ spawn_blocking(AudioPlayer::play)   → Playing
//!        │                             └─ on_finished                   → Idle
//!        │
//!        └─ Stop        → abort + AudioPlayer::stop                     → Idle
//!
//! SharedState (Arc<Mutex<ReadoutStatus>>) ←─── read by the front-end
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//! use yomiage::config::AppConfig;
//! use yomiage::drill::CalculationGenerator;
//! use yomiage::phrase::assemble;
//! use yomiage::pipeline::{new_shared_state, ReadoutCommand, ReadoutOrchestrator};
//! use yomiage::playback::WavFilePlayer;
//! use yomiage::synthesis::VoicevoxClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::default();
//!     let calc = CalculationGenerator::from_config(&config.drill)?.generate();
//!
//!     let state = new_shared_state();
//!     let orchestrator = ReadoutOrchestrator::new(
//!         state.clone(),
//!         Arc::new(VoicevoxClient::from_config(&config.synthesis)?),
//!         Arc::new(WavFilePlayer::new(config.output_dir())),
//!         &config,
//!     );
//!
//!     let (tx, rx) = mpsc::channel(8);
//!     tx.send(ReadoutCommand::Speak(assemble(&calc)?)).await?;
//!     drop(tx);
//!     orchestrator.run(rx).await;
//!
//!     println!("{}", state.lock().unwrap().state.label());
//!     Ok(())
//! }
//! ```

pub mod runner;
pub mod state;

pub use runner::{PipelineError, ReadoutCommand, ReadoutOrchestrator};
pub use state::{lock_status, new_shared_state, ReadoutState, ReadoutStatus, SharedState};
