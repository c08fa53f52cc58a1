//! Decomposition of a number into magnitude groups.
//!
//! Japanese reads large numbers in groups of four digits, each group carrying
//! a scale word: 万 (まん, 10^4), 億 (おく, 10^8) and 兆 (ちょう, 10^12).  The
//! lowest group has no scale word and is called the *final* group.

use super::{NumeralError, MAX_DIGITS};

// ---------------------------------------------------------------------------
// Scale
// ---------------------------------------------------------------------------

/// Power-of-10,000 scale of a [`DigitGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scale {
    /// The final group (10^0).
    Ones,
    /// 万, 10^4.
    Man,
    /// 億, 10^8.
    Oku,
    /// 兆, 10^12.
    Chou,
}

impl Scale {
    /// All scales from most to least significant.
    pub const DESCENDING: [Scale; 4] = [Scale::Chou, Scale::Oku, Scale::Man, Scale::Ones];

    /// Scale word appended after a non-empty group.
    pub fn suffix(self) -> &'static str {
        match self {
            Scale::Ones => "",
            Scale::Man => "まん",
            Scale::Oku => "おく",
            Scale::Chou => "ちょう",
        }
    }

    /// Index of the group counted from the right (final group = 0).
    fn index(self) -> usize {
        match self {
            Scale::Ones => 0,
            Scale::Man => 1,
            Scale::Oku => 2,
            Scale::Chou => 3,
        }
    }
}

// ---------------------------------------------------------------------------
// DigitGroup
// ---------------------------------------------------------------------------

/// A slice of one to four decimal digits aligned to a [`Scale`].
///
/// Digits are stored most-significant first.  Only the most significant group
/// of a number can be shorter than four digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitGroup {
    scale: Scale,
    digits: Vec<u8>,
}

impl DigitGroup {
    /// The scale this group is read with.
    pub fn scale(&self) -> Scale {
        self.scale
    }

    /// `true` for the lowest-order group.
    pub fn is_final(&self) -> bool {
        self.scale == Scale::Ones
    }

    /// Numeric value of the group on its own (0 – 9999).
    pub fn value(&self) -> u16 {
        self.digits
            .iter()
            .fold(0u16, |acc, &d| acc * 10 + u16::from(d))
    }

    /// `(position, digit)` pairs from most to least significant, where
    /// position 0 is the ones place of the group and 3 the thousands place.
    pub fn places(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        let len = self.digits.len();
        self.digits
            .iter()
            .enumerate()
            .map(move |(i, &d)| (len - i - 1, d))
    }
}

/// Split `n` into its magnitude groups, most significant first.
///
/// Scales above the number's digit count are not emitted; groups that are
/// entirely zero (e.g. the `0000` in `10000`) are.
///
/// # Errors
///
/// [`NumeralError::OutOfRange`] when `n` has more than [`MAX_DIGITS`] digits.
///
/// ```
/// use yomiage::numeral::{decompose, Scale};
///
/// let groups = decompose(123_456).unwrap();
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].scale(), Scale::Man);
/// assert_eq!(groups[0].value(), 12);
/// assert_eq!(groups[1].value(), 3456);
/// ```
pub fn decompose(n: u64) -> Result<Vec<DigitGroup>, NumeralError> {
    let text = n.to_string();
    if text.len() > MAX_DIGITS {
        return Err(NumeralError::OutOfRange {
            digits: text.len(),
            value: text,
        });
    }

    let digits: Vec<u8> = text.bytes().map(|b| b - b'0').collect();
    let group_count = digits.len().div_ceil(4);

    let groups = Scale::DESCENDING
        .iter()
        .filter(|scale| scale.index() < group_count)
        .map(|&scale| {
            // Right-aligned window of this scale, clipped at the leading edge.
            let end = digits.len() - scale.index() * 4;
            let start = end.saturating_sub(4);
            DigitGroup {
                scale,
                digits: digits[start..end].to_vec(),
            }
        })
        .collect();

    Ok(groups)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_digit_is_one_final_group() {
        let groups = decompose(7).unwrap();
        assert_eq!(groups.len(), 1);
        assert!(groups[0].is_final());
        assert_eq!(groups[0].value(), 7);
    }

    #[test]
    fn four_digits_stay_in_final_group() {
        let groups = decompose(9999).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].scale(), Scale::Ones);
    }

    #[test]
    fn five_digits_open_the_man_group() {
        let groups = decompose(40_000).unwrap();
        let scales: Vec<Scale> = groups.iter().map(DigitGroup::scale).collect();
        assert_eq!(scales, vec![Scale::Man, Scale::Ones]);
        assert_eq!(groups[0].value(), 4);
        assert_eq!(groups[1].value(), 0);
    }

    #[test]
    fn sixteen_digits_fill_every_scale() {
        let groups = decompose(1_234_567_890_123_456).unwrap();
        let values: Vec<u16> = groups.iter().map(DigitGroup::value).collect();
        assert_eq!(values, vec![1234, 5678, 9012, 3456]);
        assert_eq!(groups[0].scale(), Scale::Chou);
    }

    #[test]
    fn thirteen_digits_have_a_one_digit_chou_group() {
        let groups = decompose(1_000_000_000_000).unwrap();
        assert_eq!(groups[0].scale(), Scale::Chou);
        assert_eq!(groups[0].value(), 1);
        assert_eq!(groups[0].places().collect::<Vec<_>>(), vec![(0, 1)]);
    }

    #[test]
    fn places_run_from_thousands_to_ones() {
        let groups = decompose(5678).unwrap();
        let places: Vec<(usize, u8)> = groups[0].places().collect();
        assert_eq!(places, vec![(3, 5), (2, 6), (1, 7), (0, 8)]);
    }

    #[test]
    fn seventeen_digits_are_rejected() {
        let err = decompose(10_000_000_000_000_000).unwrap_err();
        assert_eq!(
            err,
            NumeralError::OutOfRange {
                value: "10000000000000000".into(),
                digits: 17,
            }
        );
    }
}
