//! Japanese numeral verbalization.
//!
//! Turns a non-negative integer of up to 16 decimal digits into its fully
//! spoken hiragana form, as read aloud in a soroban drill.
//!
//! # Overview
//!
//! ```text
//! 12345678
//!    │  decompose()   right-aligned 4-digit groups
//!    ▼
//! [man: 1234] [final: 5678]
//!    │  group override table (whole-group values: いっちょう, よんまん …)
//!    │  place rule table     (さんびゃく, はっせん, いっせん …)
//!    │  generic fallback     (digit + place word)
//!    ▼
//! せんにひゃくさんじゅうよんまんごせんろっぴゃくななじゅうはち
//! ```
//!
//! # Quick start
//!
//! ```
//! use yomiage::numeral::verbalize;
//!
//! assert_eq!(verbalize(8000).unwrap(), "はっせん");
//! assert_eq!(verbalize(40_000).unwrap(), "よんまん");
//! ```

pub mod group;
pub mod table;
pub mod verbalize;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use group::{decompose, DigitGroup, Scale};
pub use verbalize::{verbalize, verbalize_signed};

use thiserror::Error;

/// Largest supported operand, in decimal digits.
pub const MAX_DIGITS: usize = 16;

/// Largest value [`verbalize`] accepts (`10^16 - 1`).
pub const MAX_VALUE: u64 = 9_999_999_999_999_999;

/// Reading of the value zero.
pub const ZERO: &str = "ゼロ";

/// Prefix used by [`verbalize_signed`] for negative values.
pub const MINUS: &str = "マイナス";

// ---------------------------------------------------------------------------
// NumeralError
// ---------------------------------------------------------------------------

/// Errors raised while verbalizing a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumeralError {
    /// The value has more decimal digits than the reading tables cover.
    #[error("{value} has {digits} digits; at most {MAX_DIGITS} digits can be read")]
    OutOfRange { value: String, digits: usize },
}
