//! Soroban-style mental arithmetic drills read aloud in Japanese.
//!
//! ```text
//! drill::CalculationGenerator ─▶ Calculation
//!        │
//!        ▼
//! phrase::assemble ──(numeral::verbalize per operand)──▶ kana phrase
//!        │
//!        ▼
//! tuning::SpeechTuner ─▶ SynthesisParameters
//!        │
//!        ▼
//! synthesis::SpeechSynthesizer ─▶ WAV ─▶ playback::AudioPlayer
//!        ▲
//! pipeline::ReadoutOrchestrator (Idle / Synthesizing / Playing)
//! ```

pub mod config;
pub mod drill;
pub mod numeral;
pub mod phrase;
pub mod pipeline;
pub mod playback;
pub mod synthesis;
pub mod tuning;
