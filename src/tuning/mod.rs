//! Speech parameter tuning.
//!
//! [`SpeechTuner`] scans a spoken phrase for acoustically risky substrings
//! and returns adjusted [`SynthesisParameters`]: slower speech, stronger
//! intonation, longer pauses and a stretched vowel after geminates.  The
//! adjustments live in the [`rules::RISK_RULES`] table.

pub mod rules;
pub mod tuner;

pub use rules::{RiskRule, RiskTier, RISK_RULES};
pub use tuner::{speed_for_duration, SpeechTuner, SynthesisParameters};
