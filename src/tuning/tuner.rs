//! `SpeechTuner`: text-driven synthesis parameter adjustment.

use serde::{Deserialize, Serialize};

use super::rules::{
    RiskRule, DEFAULT_INTONATION_MULTIPLIER, DEFAULT_SPEED_MULTIPLIER, INTONATION_MAX,
    INTONATION_MIN, RISK_RULES,
};

// ---------------------------------------------------------------------------
// SynthesisParameters
// ---------------------------------------------------------------------------

/// Parameters merged into a synthesis request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SynthesisParameters {
    /// Speech rate; 1.0 is the voice's natural speed.
    pub speed_scale: f64,
    /// Pitch contour strength; 1.0 is neutral.
    pub intonation_scale: f64,
    /// Minimum pause length in seconds at accent-phrase boundaries.
    pub min_pause_length: f64,
    /// Vowel length multiplier for the mora following a geminate.
    pub vowel_length_multiplier: f64,
}

impl Default for SynthesisParameters {
    fn default() -> Self {
        Self {
            speed_scale: 1.0,
            intonation_scale: 1.0,
            min_pause_length: 0.0,
            vowel_length_multiplier: 1.0,
        }
    }
}

impl SynthesisParameters {
    /// Default parameters at the given base speed.
    pub fn with_speed(speed_scale: f64) -> Self {
        Self {
            speed_scale,
            ..Self::default()
        }
    }
}

/// Shortest readout duration the speed mapping distinguishes.
pub const DURATION_MIN_SECS: f64 = 3.0;
/// Longest readout duration the speed mapping distinguishes.
pub const DURATION_MAX_SECS: f64 = 30.0;

/// Map a desired total readout duration to a base speed scale.
///
/// `secs` is clamped to 3–30 s and the speed is inversely proportional to
/// it (5 s ↦ 1.0), so every duration in that range gives a distinct speed.
/// The result is kept within 0.1–2.0.
///
/// ```
/// use yomiage::tuning::speed_for_duration;
///
/// assert_eq!(speed_for_duration(5.0), 1.0);
/// assert_eq!(speed_for_duration(10.0), 0.5);
/// assert_eq!(speed_for_duration(1.0), speed_for_duration(3.0));
/// assert_eq!(speed_for_duration(60.0), speed_for_duration(30.0));
/// ```
pub fn speed_for_duration(secs: f64) -> f64 {
    let secs = secs.clamp(DURATION_MIN_SECS, DURATION_MAX_SECS);
    (5.0 / secs).clamp(0.1, 2.0)
}

// ---------------------------------------------------------------------------
// SpeechTuner
// ---------------------------------------------------------------------------

/// Applies a risk rule table to synthesis parameters.
///
/// When several rules match, the strongest value of each adjustment wins
/// (slowest speed, strongest intonation, longest pause, longest vowel).
///
/// ```
/// use yomiage::tuning::{SpeechTuner, SynthesisParameters};
///
/// let tuner = SpeechTuner::new();
/// let base = SynthesisParameters::default();
/// let risky = tuner.tune("はっせんえんなり", base);
/// let plain = tuner.tune("にせんえんなり", base);
/// assert!(risky.speed_scale < plain.speed_scale);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SpeechTuner {
    rules: &'static [RiskRule],
}

impl SpeechTuner {
    /// Tuner using the built-in rule table.
    pub fn new() -> Self {
        Self { rules: RISK_RULES }
    }

    /// Tuner using a custom rule table.
    pub fn with_rules(rules: &'static [RiskRule]) -> Self {
        Self { rules }
    }

    /// Rules whose pattern occurs in `text`, in table order.
    pub fn matching_rules<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'static RiskRule> + 'a {
        self.rules.iter().filter(move |r| text.contains(r.pattern))
    }

    /// Adjust `base` for `text`.
    pub fn tune(&self, text: &str, base: SynthesisParameters) -> SynthesisParameters {
        let strongest = self.matching_rules(text).fold(None, |acc: Option<RiskRule>, rule| {
            Some(match acc {
                None => *rule,
                Some(best) => RiskRule {
                    tier: best.tier.max(rule.tier),
                    speed_multiplier: best.speed_multiplier.min(rule.speed_multiplier),
                    intonation_multiplier: best
                        .intonation_multiplier
                        .max(rule.intonation_multiplier),
                    pause_floor: best.pause_floor.max(rule.pause_floor),
                    vowel_multiplier: best.vowel_multiplier.max(rule.vowel_multiplier),
                    ..best
                },
            })
        });

        let tuned = match strongest {
            Some(rule) => SynthesisParameters {
                speed_scale: base.speed_scale * rule.speed_multiplier,
                intonation_scale: clamp_intonation(base.intonation_scale * rule.intonation_multiplier),
                min_pause_length: base.min_pause_length.max(rule.pause_floor),
                vowel_length_multiplier: base.vowel_length_multiplier * rule.vowel_multiplier,
            },
            None => SynthesisParameters {
                speed_scale: base.speed_scale * DEFAULT_SPEED_MULTIPLIER,
                intonation_scale: clamp_intonation(base.intonation_scale * DEFAULT_INTONATION_MULTIPLIER),
                ..base
            },
        };

        log::debug!(
            "tuner: risk={:?} speed {:.3}→{:.3} intonation {:.3}→{:.3}",
            strongest.map(|r| r.tier),
            base.speed_scale,
            tuned.speed_scale,
            base.intonation_scale,
            tuned.intonation_scale
        );
        tuned
    }
}

impl Default for SpeechTuner {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_intonation(value: f64) -> f64 {
    value.clamp(INTONATION_MIN, INTONATION_MAX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::rules::RiskTier;

    fn base() -> SynthesisParameters {
        SynthesisParameters::default()
    }

    // --- default path ----------------------------------------------------------

    #[test]
    fn plain_text_gets_mild_adjustment() {
        let tuned = SpeechTuner::new().tune("にせんごひゃくえんなり", base());
        assert!((tuned.speed_scale - 0.95).abs() < 1e-9);
        assert!((tuned.intonation_scale - 1.1).abs() < 1e-9);
        assert_eq!(tuned.min_pause_length, 0.0);
        assert_eq!(tuned.vowel_length_multiplier, 1.0);
    }

    // --- risky substrings --------------------------------------------------------

    #[test]
    fn risky_text_is_slower_than_default_path() {
        let tuner = SpeechTuner::new();
        let plain = tuner.tune("にせん", base());
        for text in ["はっせん", "はちおく", "よんまん", "いっちょう"] {
            let tuned = tuner.tune(text, base());
            assert!(tuned.speed_scale < plain.speed_scale, "{text}");
            assert!((INTONATION_MIN..=INTONATION_MAX).contains(&tuned.intonation_scale));
        }
    }

    #[test]
    fn high_risk_slows_more_than_medium_risk() {
        let tuner = SpeechTuner::new();
        let high = tuner.tune("はっせん", base());
        let medium = tuner.tune("いっせん", base());
        assert!(high.speed_scale < medium.speed_scale);
    }

    #[test]
    fn geminated_six_hundred_is_medium_risk() {
        let tuner = SpeechTuner::new();
        let rules: Vec<_> = tuner.matching_rules("ろっぴゃくえんなり").collect();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].tier, RiskTier::Medium);

        let plain = tuner.tune("にひゃくえんなり", base());
        let tuned = tuner.tune("ろっぴゃくえんなり", base());
        assert!(tuned.speed_scale < plain.speed_scale);
        assert!(tuned.min_pause_length > 0.0);
        assert!(tuned.speed_scale > tuner.tune("はっぴゃく", base()).speed_scale);
    }

    #[test]
    fn risky_text_raises_pause_and_vowel_length() {
        let tuned = SpeechTuner::new().tune("よんまんえんなり", base());
        assert!((tuned.min_pause_length - 0.15).abs() < 1e-9);
        assert!((tuned.vowel_length_multiplier - 1.2).abs() < 1e-9);
    }

    #[test]
    fn pause_floor_never_lowers_a_longer_base_pause() {
        let mut b = base();
        b.min_pause_length = 0.4;
        let tuned = SpeechTuner::new().tune("はっせん", b);
        assert_eq!(tuned.min_pause_length, 0.4);
    }

    #[test]
    fn intonation_is_clamped_high() {
        let mut b = base();
        b.intonation_scale = 1.9;
        let tuned = SpeechTuner::new().tune("はっせん", b);
        assert_eq!(tuned.intonation_scale, INTONATION_MAX);
    }

    #[test]
    fn intonation_is_clamped_low() {
        let mut b = base();
        b.intonation_scale = 0.1;
        let tuned = SpeechTuner::new().tune("にせん", b);
        assert_eq!(tuned.intonation_scale, INTONATION_MIN);
    }

    #[test]
    fn strongest_rule_wins_when_several_match() {
        let tuned = SpeechTuner::new().tune("いっせんはっせん", base());
        assert!((tuned.speed_scale - 0.85).abs() < 1e-9);
        assert!((tuned.min_pause_length - 0.15).abs() < 1e-9);
    }

    #[test]
    fn tune_is_deterministic() {
        let tuner = SpeechTuner::new();
        let a = tuner.tune("ねがいましてははっせんえんなり", base());
        let b = tuner.tune("ねがいましてははっせんえんなり", base());
        assert_eq!(a, b);
    }

    // --- custom rules -------------------------------------------------------------

    static ONLY_SAN: &[RiskRule] = &[RiskRule {
        pattern: "さん",
        tier: RiskTier::Medium,
        speed_multiplier: 0.5,
        intonation_multiplier: 1.0,
        pause_floor: 0.3,
        vowel_multiplier: 1.0,
    }];

    #[test]
    fn custom_table_replaces_builtin_rules() {
        let tuner = SpeechTuner::with_rules(ONLY_SAN);
        assert_eq!(tuner.matching_rules("はっせん").count(), 0);
        let tuned = tuner.tune("さんぜん", base());
        assert!((tuned.speed_scale - 0.5).abs() < 1e-9);
        assert!((tuned.min_pause_length - 0.3).abs() < 1e-9);
    }

    // --- speed_for_duration -------------------------------------------------------

    #[test]
    fn duration_maps_inversely_to_speed() {
        assert!(speed_for_duration(5.0) > speed_for_duration(10.0));
        assert!(speed_for_duration(10.0) > speed_for_duration(15.0));
        assert_eq!(speed_for_duration(5.0), 1.0);
        assert_eq!(speed_for_duration(10.0), 0.5);
    }

    #[test]
    fn every_duration_in_range_changes_the_speed() {
        assert!(speed_for_duration(3.0) > speed_for_duration(4.0));
        assert!(speed_for_duration(4.0) > speed_for_duration(5.0));
        assert!(speed_for_duration(20.0) > speed_for_duration(25.0));
        assert!(speed_for_duration(25.0) > speed_for_duration(30.0));

        let mut previous = speed_for_duration(3.0);
        for tenth in 31..=300 {
            let speed = speed_for_duration(f64::from(tenth) / 10.0);
            assert!(speed < previous, "not decreasing at {} s", f64::from(tenth) / 10.0);
            previous = speed;
        }
    }

    #[test]
    fn durations_outside_the_range_are_clamped() {
        assert_eq!(speed_for_duration(0.0), speed_for_duration(3.0));
        assert_eq!(speed_for_duration(-4.0), speed_for_duration(3.0));
        assert_eq!(speed_for_duration(120.0), speed_for_duration(30.0));
        assert!(speed_for_duration(30.0) >= 0.1);
        assert!(speed_for_duration(3.0) <= 2.0);
    }
}
