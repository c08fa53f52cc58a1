//! Static disambiguation rule table.
//!
//! Geminated readings (はっせん, いっちょう …), はち and the contracted よんまん
//! are easily misheard as their neighbours (はち/いち, よんまん/ろくまん).
//! Each entry names a substring of the spoken phrase and the adjustments to
//! apply when it is present.  Adding a rule means adding a row here.

/// Severity of a risky substring.  Higher tiers slow speech down more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskTier {
    Medium,
    High,
}

/// One `{pattern, multipliers, floors}` row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskRule {
    /// Substring searched for in the spoken phrase.
    pub pattern: &'static str,
    pub tier: RiskTier,
    /// Applied to the speed scale (below 1.0 slows down).
    pub speed_multiplier: f64,
    /// Applied to the intonation scale before clamping.
    pub intonation_multiplier: f64,
    /// Minimum pause length in seconds at phrase boundaries.
    pub pause_floor: f64,
    /// Applied to the vowel length of the mora after a geminate.
    pub vowel_multiplier: f64,
}

pub static RISK_RULES: &[RiskRule] = &[
    RiskRule {
        pattern: "はっ",
        tier: RiskTier::High,
        speed_multiplier: 0.85,
        intonation_multiplier: 1.4,
        pause_floor: 0.15,
        vowel_multiplier: 1.2,
    },
    RiskRule {
        pattern: "はち",
        tier: RiskTier::High,
        speed_multiplier: 0.85,
        intonation_multiplier: 1.4,
        pause_floor: 0.15,
        vowel_multiplier: 1.2,
    },
    RiskRule {
        pattern: "よんまん",
        tier: RiskTier::High,
        speed_multiplier: 0.85,
        intonation_multiplier: 1.4,
        pause_floor: 0.15,
        vowel_multiplier: 1.2,
    },
    RiskRule {
        pattern: "いっ",
        tier: RiskTier::Medium,
        speed_multiplier: 0.9,
        intonation_multiplier: 1.25,
        pause_floor: 0.1,
        vowel_multiplier: 1.1,
    },
    RiskRule {
        pattern: "ろっ",
        tier: RiskTier::Medium,
        speed_multiplier: 0.9,
        intonation_multiplier: 1.25,
        pause_floor: 0.1,
        vowel_multiplier: 1.1,
    },
];

/// Speed multiplier when no rule matches.
pub const DEFAULT_SPEED_MULTIPLIER: f64 = 0.95;

/// Intonation multiplier when no rule matches.
pub const DEFAULT_INTONATION_MULTIPLIER: f64 = 1.1;

/// Intonation scale is always clamped into this band.
pub const INTONATION_MIN: f64 = 0.5;
pub const INTONATION_MAX: f64 = 2.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_tier_rules_slow_down_more_than_medium() {
        let slowest_medium = RISK_RULES
            .iter()
            .filter(|r| r.tier == RiskTier::Medium)
            .map(|r| r.speed_multiplier)
            .fold(f64::INFINITY, f64::min);
        for rule in RISK_RULES.iter().filter(|r| r.tier == RiskTier::High) {
            assert!(rule.speed_multiplier < slowest_medium, "{}", rule.pattern);
        }
    }

    #[test]
    fn every_rule_slows_below_the_default_path() {
        for rule in RISK_RULES {
            assert!(rule.speed_multiplier < DEFAULT_SPEED_MULTIPLIER, "{}", rule.pattern);
        }
    }
}
