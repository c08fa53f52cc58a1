//! Reading tables and irregular-reading rules.
//!
//! Every reading that a naive "digit + place word" concatenation gets wrong is
//! listed here as data.  Lookups are first-match over ordered static slices,
//! checked before the generic fallback in the group reader.

use super::group::Scale;

// ---------------------------------------------------------------------------
// Generic readings
// ---------------------------------------------------------------------------

/// Digit readings used in front of a place word and as the generic ones
/// reading.  Index 0 is never read.
pub const DIGITS: [&str; 10] = [
    "", "いち", "に", "さん", "し", "ご", "ろく", "なな", "はち", "きゅう",
];

/// Place words within a group, indexed by position (ones … thousands).
pub const PLACE_WORDS: [&str; 4] = ["", "じゅう", "ひゃく", "せん"];

// ---------------------------------------------------------------------------
// Place rules
// ---------------------------------------------------------------------------

/// Which groups a [`PlaceRule`] applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// Only the lowest-order group.
    Final,
    /// Only the まん / おく / ちょう groups.
    Higher,
    /// Every group.
    Any,
}

impl GroupKind {
    fn matches(self, is_final: bool) -> bool {
        match self {
            GroupKind::Final => is_final,
            GroupKind::Higher => !is_final,
            GroupKind::Any => true,
        }
    }
}

/// Irregular reading of one digit at one position inside a group.
#[derive(Debug, Clone, Copy)]
pub struct PlaceRule {
    pub position: usize,
    pub digit: u8,
    pub applies_to: GroupKind,
    /// Replaces both the digit reading and the place word.
    pub reading: &'static str,
}

pub static PLACE_RULES: &[PlaceRule] = &[
    // thousands
    PlaceRule { position: 3, digit: 1, applies_to: GroupKind::Final, reading: "いっせん" },
    PlaceRule { position: 3, digit: 3, applies_to: GroupKind::Final, reading: "さんぜん" },
    PlaceRule { position: 3, digit: 8, applies_to: GroupKind::Final, reading: "はっせん" },
    PlaceRule { position: 3, digit: 1, applies_to: GroupKind::Higher, reading: "せん" },
    // hundreds
    PlaceRule { position: 2, digit: 1, applies_to: GroupKind::Final, reading: "いっぴゃく" },
    PlaceRule { position: 2, digit: 1, applies_to: GroupKind::Higher, reading: "ひゃく" },
    PlaceRule { position: 2, digit: 3, applies_to: GroupKind::Any, reading: "さんびゃく" },
    PlaceRule { position: 2, digit: 6, applies_to: GroupKind::Any, reading: "ろっぴゃく" },
    PlaceRule { position: 2, digit: 8, applies_to: GroupKind::Any, reading: "はっぴゃく" },
    // tens
    PlaceRule { position: 1, digit: 1, applies_to: GroupKind::Final, reading: "いちじゅう" },
    PlaceRule { position: 1, digit: 1, applies_to: GroupKind::Higher, reading: "じゅう" },
    // ones: contracted four in every group (よんまん, じゅうよんおく), as
    // opposed to し in front of a place word
    PlaceRule { position: 0, digit: 4, applies_to: GroupKind::Any, reading: "よん" },
];

/// Irregular reading for `digit` at `position`, if one is listed.
pub fn place_override(position: usize, digit: u8, is_final: bool) -> Option<&'static str> {
    PLACE_RULES
        .iter()
        .find(|r| r.position == position && r.digit == digit && r.applies_to.matches(is_final))
        .map(|r| r.reading)
}

// ---------------------------------------------------------------------------
// Whole-group rules
// ---------------------------------------------------------------------------

/// Fused reading of a higher-order group holding a single-digit value,
/// scale word included.
#[derive(Debug, Clone, Copy)]
pub struct GroupRule {
    pub value: u16,
    pub scale: Scale,
    pub reading: &'static str,
}

pub static GROUP_RULES: &[GroupRule] = &[
    GroupRule { value: 1, scale: Scale::Chou, reading: "いっちょう" },
    GroupRule { value: 1, scale: Scale::Oku, reading: "いちおく" },
    GroupRule { value: 1, scale: Scale::Man, reading: "いちまん" },
    GroupRule { value: 8, scale: Scale::Chou, reading: "はっちょう" },
    GroupRule { value: 8, scale: Scale::Oku, reading: "はちおく" },
    GroupRule { value: 8, scale: Scale::Man, reading: "はちまん" },
];

/// Fused reading for a whole group, if one is listed.
pub fn group_override(value: u16, scale: Scale) -> Option<&'static str> {
    GROUP_RULES
        .iter()
        .find(|r| r.value == value && r.scale == scale)
        .map(|r| r.reading)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
