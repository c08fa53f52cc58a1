//! VOICEVOX `AudioQuery` model and parameter merge.
//!
//! Only the fields the tuner touches are typed; everything else the engine
//! sends (pitch/volume scales, sampling rate, kana …) is kept in `extra` and
//! sent back unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::tuning::SynthesisParameters;

/// Mora text of a geminate consonant (促音).
const SOKUON: &str = "ッ";

/// Mora text of ち, whose vowel is stretched after は to keep はち distinct.
const CHI: &str = "チ";

/// Vowel symbol used by the engine for a pause mora.
const PAUSE_VOWEL: &str = "pau";

// ---------------------------------------------------------------------------
// Mora
// ---------------------------------------------------------------------------

/// A single mora with its phoneme timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mora {
    pub text: String,
    pub consonant: Option<String>,
    pub consonant_length: Option<f64>,
    pub vowel: String,
    pub vowel_length: f64,
    pub pitch: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Mora {
    /// A silent pause mora of the given length.
    pub fn pause(length: f64) -> Self {
        Self {
            text: "、".into(),
            consonant: None,
            consonant_length: None,
            vowel: PAUSE_VOWEL.into(),
            vowel_length: length,
            pitch: 0.0,
            extra: Map::new(),
        }
    }

    fn is_sokuon(&self) -> bool {
        self.text == SOKUON || self.vowel == "cl"
    }
}

// ---------------------------------------------------------------------------
// AccentPhrase
// ---------------------------------------------------------------------------

/// An accent phrase: moras sharing one pitch accent, plus an optional pause
/// after it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccentPhrase {
    pub moras: Vec<Mora>,
    pub accent: u32,
    pub pause_mora: Option<Mora>,
    #[serde(default)]
    pub is_interrogative: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AccentPhrase {
    fn has_risk_marker(&self) -> bool {
        self.moras.iter().any(|m| m.is_sokuon() || m.text == CHI)
    }
}

// ---------------------------------------------------------------------------
// AudioQuery
// ---------------------------------------------------------------------------

/// Synthesis request returned by `/audio_query` and posted to `/synthesis`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioQuery {
    pub accent_phrases: Vec<AccentPhrase>,
    #[serde(rename = "speedScale")]
    pub speed_scale: f64,
    #[serde(rename = "intonationScale")]
    pub intonation_scale: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AudioQuery {
    /// Merge tuned parameters into the query.
    ///
    /// - speed and intonation scales are replaced;
    /// - a pause of `min_pause_length` is added after each non-final phrase
    ///   containing a geminate or チ mora, and existing pauses on such a
    ///   phrase or its direct neighbours are raised to that length;
    /// - the vowel of each mora after a geminate, and of each チ mora, is
    ///   multiplied by `vowel_length_multiplier`.
    pub fn apply(&mut self, params: &SynthesisParameters) {
        self.speed_scale = params.speed_scale;
        self.intonation_scale = params.intonation_scale;

        let risky: Vec<bool> = self
            .accent_phrases
            .iter()
            .map(AccentPhrase::has_risk_marker)
            .collect();
        let last = risky.len().saturating_sub(1);
        let mut after_sokuon = false;

        for (i, phrase) in self.accent_phrases.iter_mut().enumerate() {
            let near_risk = risky[i]
                || (i > 0 && risky[i - 1])
                || risky.get(i + 1).copied().unwrap_or(false);

            if params.min_pause_length > 0.0 && near_risk {
                match phrase.pause_mora.as_mut() {
                    Some(pause) => {
                        pause.vowel_length = pause.vowel_length.max(params.min_pause_length);
                    }
                    None if i < last && risky[i] => {
                        phrase.pause_mora = Some(Mora::pause(params.min_pause_length));
                    }
                    None => {}
                }
            }

            for mora in &mut phrase.moras {
                if after_sokuon || mora.text == CHI {
                    mora.vowel_length *= params.vowel_length_multiplier;
                }
                after_sokuon = mora.is_sokuon();
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
