//! Random problem generation under digit-count constraints.
//!
//! Every generated problem contains at least one operand with exactly
//! `min_digits` digits and, when the range is wider than one digit count, at
//! least one with exactly `max_digits` digits.  Remaining operands draw their
//! digit count uniformly from the range.

use rand::Rng;

use crate::config::DrillConfig;
use crate::numeral::MAX_DIGITS;

use super::calculation::{Calculation, Operator};
use super::DrillError;

/// Most operands a single problem may hold.
pub const MAX_OPERANDS: usize = 100;

/// Produces random [`Calculation`]s for a fixed configuration.
///
/// The configuration is validated once in [`CalculationGenerator::new`], so
/// an invalid setting fails before any random draw.
///
/// ```
/// use yomiage::drill::CalculationGenerator;
///
/// let generator = CalculationGenerator::new(3, 2, 4).unwrap();
/// let calc = generator.generate();
/// assert_eq!(calc.numbers.len(), 3);
/// assert_eq!(calc.operators.len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculationGenerator {
    operand_count: usize,
    min_digits: u32,
    max_digits: u32,
}

impl CalculationGenerator {
    /// Validate the constraints and build a generator.
    ///
    /// # Errors
    ///
    /// [`DrillError::InvalidConfiguration`] when `operand_count` is outside
    /// `2..=MAX_OPERANDS`, `min_digits == 0`, `min_digits > max_digits` or `max_digits` exceeds
    /// the 16 readable digits.
    pub fn new(operand_count: usize, min_digits: u32, max_digits: u32) -> Result<Self, DrillError> {
        if operand_count < 2 {
            return Err(DrillError::InvalidConfiguration(format!(
                "operand count must be at least 2, got {operand_count}"
            )));
        }
        if operand_count > MAX_OPERANDS {
            return Err(DrillError::InvalidConfiguration(format!(
                "operand count {operand_count} exceeds the supported {MAX_OPERANDS}"
            )));
        }
        if min_digits == 0 {
            return Err(DrillError::InvalidConfiguration(
                "minimum digit count must be at least 1".into(),
            ));
        }
        if min_digits > max_digits {
            return Err(DrillError::InvalidConfiguration(format!(
                "minimum digit count {min_digits} exceeds maximum {max_digits}"
            )));
        }
        if max_digits as usize > MAX_DIGITS {
            return Err(DrillError::InvalidConfiguration(format!(
                "maximum digit count {max_digits} exceeds the supported {MAX_DIGITS}"
            )));
        }

        Ok(Self {
            operand_count,
            min_digits,
            max_digits,
        })
    }

    /// Build a generator from the `[drill]` section of the app config.
    pub fn from_config(config: &DrillConfig) -> Result<Self, DrillError> {
        Self::new(config.operand_count, config.min_digits, config.max_digits)
    }

    /// Generate a problem using the thread-local RNG.
    pub fn generate(&self) -> Calculation {
        self.generate_with(&mut rand::thread_rng())
    }

    /// Generate a problem drawing from `rng`.
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Calculation {
        let k = self.operand_count;

        let min_slot = rng.gen_range(0..k);
        let max_slot = (self.max_digits > self.min_digits).then(|| {
            // Uniform over the k - 1 slots other than min_slot.
            let slot = rng.gen_range(0..k - 1);
            if slot >= min_slot {
                slot + 1
            } else {
                slot
            }
        });

        let numbers = (0..k)
            .map(|i| {
                let digits = if i == min_slot {
                    self.min_digits
                } else if Some(i) == max_slot {
                    self.max_digits
                } else {
                    rng.gen_range(self.min_digits..=self.max_digits)
                };
                random_with_digits(&mut *rng, digits)
            })
            .collect();

        let operators = (0..k - 1)
            .map(|_| {
                if rng.gen_bool(0.5) {
                    Operator::Add
                } else {
                    Operator::Subtract
                }
            })
            .collect();

        log::debug!(
            "generator: {k} operands, digits {}..={}",
            self.min_digits,
            self.max_digits
        );

        Calculation { numbers, operators }
    }
}

/// Uniform draw from `[10^(digits-1), 10^digits - 1]`.
fn random_with_digits<R: Rng + ?Sized>(rng: &mut R, digits: u32) -> u64 {
    let low = 10u64.pow(digits - 1);
    let high = 10u64.pow(digits) - 1;
    rng.gen_range(low..=high)
}

/// Number of decimal digits in `n` (`0` counts as one digit).
pub fn digit_count(n: u64) -> u32 {
    n.checked_ilog10().map_or(1, |log| log + 1)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
