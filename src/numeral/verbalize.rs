//! Group reader and the public `verbalize` entry points.

use super::group::{decompose, DigitGroup};
use super::table::{group_override, place_override, DIGITS, PLACE_WORDS};
use super::{NumeralError, MINUS, ZERO};

/// Verbalize `n` as spoken hiragana.
///
/// Pure and deterministic; the output never contains digit characters.
///
/// # Errors
///
/// [`NumeralError::OutOfRange`] when `n` has more than 16 decimal digits.
///
/// # Examples
///
/// ```
/// use yomiage::numeral::verbalize;
///
/// assert_eq!(verbalize(0).unwrap(), "ゼロ");
/// assert_eq!(verbalize(1000).unwrap(), "いっせん");
/// assert_eq!(verbalize(1_000_000_000_000).unwrap(), "いっちょう");
/// assert!(verbalize(10_000_000_000_000_000).is_err());
/// ```
pub fn verbalize(n: u64) -> Result<String, NumeralError> {
    if n == 0 {
        return Ok(ZERO.to_string());
    }

    let reading: String = decompose(n)?.iter().map(read_group).collect();
    log::trace!("verbalize: {n} → {reading}");
    Ok(reading)
}

/// Verbalize a signed value, reading negatives as `マイナス` + magnitude.
///
/// Used for reading a drill's answer, which may fall below zero.
///
/// ```
/// use yomiage::numeral::verbalize_signed;
///
/// assert_eq!(verbalize_signed(-300).unwrap(), "マイナスさんびゃく");
/// ```
pub fn verbalize_signed(n: i64) -> Result<String, NumeralError> {
    let magnitude = verbalize(n.unsigned_abs())?;
    if n < 0 {
        Ok(format!("{MINUS}{magnitude}"))
    } else {
        Ok(magnitude)
    }
}

/// Read one magnitude group including its scale word.
///
/// A group whose digits are all zero reads as the empty string and carries no
/// scale word.
fn read_group(group: &DigitGroup) -> String {
    if !group.is_final() {
        if let Some(fused) = group_override(group.value(), group.scale()) {
            return fused.to_string();
        }
    }

    let mut out = String::new();
    for (position, digit) in group.places() {
        if digit == 0 {
            continue;
        }
        match place_override(position, digit, group.is_final()) {
            Some(reading) => out.push_str(reading),
            None => {
                out.push_str(DIGITS[usize::from(digit)]);
                out.push_str(PLACE_WORDS[position]);
            }
        }
    }

    if !out.is_empty() {
        out.push_str(group.scale().suffix());
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn v(n: u64) -> String {
        verbalize(n).unwrap()
    }

    // --- fixed readings ------------------------------------------------------

    #[test]
    fn zero_reads_as_zero_token() {
        assert_eq!(v(0), ZERO);
    }

    #[test]
    fn geminated_and_compound_thousands() {
        assert_eq!(v(1000), "いっせん");
        assert_eq!(v(3000), "さんぜん");
        assert_eq!(v(8000), "はっせん");
    }

    #[test]
    fn single_digit_groups_fuse_with_scale_word() {
        assert_eq!(v(40_000), "よんまん");
        assert_eq!(v(800_000_000), "はちおく");
        assert_eq!(v(1_000_000_000_000), "いっちょう");
        assert_eq!(v(4_000_000_000_000), "よんちょう");
        assert_eq!(v(8_000_000_000_000), "はっちょう");
    }

    #[test]
    fn eight_digit_round_value_reads_thousands_of_man() {
        assert_eq!(v(80_000_000), "はちせんまん");
    }

    // --- final group ---------------------------------------------------------

    #[test]
    fn final_group_ones() {
        assert_eq!(v(1), "いち");
        assert_eq!(v(4), "よん");
        assert_eq!(v(7), "なな");
        assert_eq!(v(9), "きゅう");
    }

    #[test]
    fn final_group_reads_tens_one_explicitly() {
        assert_eq!(v(10), "いちじゅう");
        assert_eq!(v(14), "いちじゅうよん");
    }

    #[test]
    fn four_before_a_place_word_is_uncontracted() {
        assert_eq!(v(40), "しじゅう");
        assert_eq!(v(44), "しじゅうよん");
        assert_eq!(v(4000), "しせん");
    }

    #[test]
    fn hundreds_allomorphs() {
        assert_eq!(v(100), "いっぴゃく");
        assert_eq!(v(300), "さんびゃく");
        assert_eq!(v(600), "ろっぴゃく");
        assert_eq!(v(800), "はっぴゃく");
        assert_eq!(v(200), "にひゃく");
    }

    #[test]
    fn zero_digits_are_skipped() {
        assert_eq!(v(1001), "いっせんいち");
        assert_eq!(v(2020), "にせんにじゅう");
    }

    #[test]
    fn mixed_final_group() {
        assert_eq!(v(5678), "ごせんろっぴゃくななじゅうはち");
    }

    // --- higher groups -------------------------------------------------------

    #[test]
    fn leading_one_is_elided_above_the_final_group() {
        assert_eq!(v(100_000), "じゅうまん");
        assert_eq!(v(1_000_000), "ひゃくまん");
        assert_eq!(v(10_000_000), "せんまん");
    }

    #[test]
    fn ones_place_of_a_higher_group() {
        assert_eq!(v(10_000), "いちまん");
        assert_eq!(v(140_000), "じゅうよんまん");
        assert_eq!(v(21_000_000_000_000), "にじゅういちちょう");
    }

    #[test]
    fn four_in_ones_place_reads_yon_in_every_group() {
        assert_eq!(v(40_000), "よんまん");
        assert_eq!(v(140_000), "じゅうよんまん");
        assert_eq!(v(400_000_000), "よんおく");
        assert_eq!(v(2_400_000_000), "にじゅうよんおく");
        assert_eq!(v(4_000_000_000_000), "よんちょう");
        assert_eq!(v(440_000), "しじゅうよんまん");
    }

    #[test]
    fn empty_middle_groups_carry_no_scale_word() {
        assert_eq!(v(100_000_000), "いちおく");
        assert_eq!(v(100_000_001), "いちおくいち");
        assert_eq!(v(1_000_000_010_000), "いっちょういちまん");
    }

    #[test]
    fn eight_digit_number() {
        assert_eq!(
            v(12_345_678),
            "せんにひゃくさんじゅうよんまんごせんろっぴゃくななじゅうはち"
        );
    }

    #[test]
    fn largest_supported_value() {
        assert_eq!(
            v(9_999_999_999_999_999),
            "きゅうせんきゅうひゃくきゅうじゅうきゅうちょう\
             きゅうせんきゅうひゃくきゅうじゅうきゅうおく\
             きゅうせんきゅうひゃくきゅうじゅうきゅうまん\
             きゅうせんきゅうひゃくきゅうじゅうきゅう"
        );
    }

    // --- properties ----------------------------------------------------------

    #[test]
    fn output_is_deterministic_and_digit_free() {
        let samples = [
            1, 12, 105, 4444, 80_808, 1_234_567, 90_000_001, 4_040_404_040,
            8_000_000_000_000, 1_111_111_111_111_111,
        ];
        for n in samples {
            let first = v(n);
            assert_eq!(first, v(n));
            assert!(!first.is_empty());
            assert!(!first.chars().any(|c| c.is_ascii_digit()), "{n} → {first}");
        }
    }

    #[test]
    fn seventeen_digits_are_out_of_range() {
        assert!(matches!(
            verbalize(12_345_678_901_234_567),
            Err(NumeralError::OutOfRange { digits: 17, .. })
        ));
    }

    // --- signed ----------------------------------------------------------------

    #[test]
    fn signed_values() {
        assert_eq!(verbalize_signed(0).unwrap(), ZERO);
        assert_eq!(verbalize_signed(8000).unwrap(), "はっせん");
        assert_eq!(verbalize_signed(-4).unwrap(), "マイナスよん");
    }

    #[test]
    fn signed_minimum_is_out_of_range() {
        assert!(verbalize_signed(i64::MIN).is_err());
    }
}
