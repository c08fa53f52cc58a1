//! Arithmetic problem value types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DrillError;

// ---------------------------------------------------------------------------
// Operator
// ---------------------------------------------------------------------------

/// Operator applied between two consecutive operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
}

impl Operator {
    /// Display symbol (`+` / `-`).
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
        }
    }
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// A multi-operand addition/subtraction problem.
///
/// `operators[i]` sits between `numbers[i]` and `numbers[i + 1]`, so a valid
/// calculation always has exactly one operator fewer than operands and at
/// least two operands.  [`Calculation::new`] enforces this; the fields stay
/// public so callers holding a value built by hand can still be checked with
/// [`Calculation::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calculation {
    pub numbers: Vec<u64>,
    pub operators: Vec<Operator>,
}

impl Calculation {
    /// Build a calculation, checking the length invariant.
    ///
    /// # Errors
    ///
    /// [`DrillError::InvariantViolation`] when there are fewer than two
    /// operands or the operator count is not `numbers.len() - 1`.
    pub fn new(numbers: Vec<u64>, operators: Vec<Operator>) -> Result<Self, DrillError> {
        let calc = Self { numbers, operators };
        calc.validate()?;
        Ok(calc)
    }

    /// Check the length invariant.
    pub fn validate(&self) -> Result<(), DrillError> {
        if self.numbers.len() < 2 || self.operators.len() + 1 != self.numbers.len() {
            return Err(DrillError::InvariantViolation {
                numbers: self.numbers.len(),
                operators: self.operators.len(),
            });
        }
        Ok(())
    }

    /// `(operator, operand)` steps after the first operand.
    pub fn steps(&self) -> impl Iterator<Item = (Operator, u64)> + '_ {
        self.operators
            .iter()
            .copied()
            .zip(self.numbers.iter().skip(1).copied())
    }

    /// Left fold of the operands with their operators.
    ///
    /// # Errors
    ///
    /// - [`DrillError::InvariantViolation`] for a malformed calculation.
    /// - [`DrillError::Overflow`] when any partial sum leaves the `i64` range.
    ///
    /// ```
    /// use yomiage::drill::{Calculation, Operator};
    ///
    /// let calc = Calculation::new(vec![12, 34, 50], vec![Operator::Add, Operator::Subtract]).unwrap();
    /// assert_eq!(calc.result().unwrap(), -4);
    /// ```
    pub fn result(&self) -> Result<i64, DrillError> {
        self.validate()?;

        let first = i64::try_from(self.numbers[0]).map_err(|_| DrillError::Overflow)?;
        self.steps().try_fold(first, |total, (op, n)| {
            let n = i64::try_from(n).map_err(|_| DrillError::Overflow)?;
            let next = match op {
                Operator::Add => total.checked_add(n),
                Operator::Subtract => total.checked_sub(n),
            };
            next.ok_or(DrillError::Overflow)
        })
    }
}

impl fmt::Display for Calculation {
    /// Plain expression form, e.g. `12 + 34 - 5`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.numbers.first() else {
            return Ok(());
        };
        write!(f, "{first}")?;
        for (op, n) in self.steps() {
            write!(f, " {} {n}", op.symbol())?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use Operator::{Add, Subtract};

    #[test]
    fn new_accepts_matching_lengths() {
        let calc = Calculation::new(vec![1, 2, 3], vec![Add, Subtract]).unwrap();
        assert_eq!(calc.numbers.len(), 3);
    }

    #[test]
    fn new_rejects_mismatched_lengths() {
        let err = Calculation::new(vec![1, 2, 3], vec![Add]).unwrap_err();
        assert!(matches!(
            err,
            DrillError::InvariantViolation { numbers: 3, operators: 1 }
        ));
    }

    #[test]
    fn new_rejects_single_operand() {
        assert!(Calculation::new(vec![5], vec![]).is_err());
    }

    #[test]
    fn result_folds_left() {
        let calc = Calculation::new(vec![100, 30, 20, 5], vec![Subtract, Add, Subtract]).unwrap();
        assert_eq!(calc.result().unwrap(), 85);
    }

    #[test]
    fn result_can_go_negative() {
        let calc = Calculation::new(vec![10, 25], vec![Subtract]).unwrap();
        assert_eq!(calc.result().unwrap(), -15);
    }

    #[test]
    fn result_reports_overflow_instead_of_wrapping() {
        let calc = Calculation::new(vec![i64::MAX as u64, 1], vec![Add]).unwrap();
        assert!(matches!(calc.result(), Err(DrillError::Overflow)));
    }

    #[test]
    fn result_rejects_operand_above_i64() {
        let calc = Calculation::new(vec![u64::MAX, 1], vec![Subtract]).unwrap();
        assert!(matches!(calc.result(), Err(DrillError::Overflow)));
    }

    #[test]
    fn result_checks_hand_built_values() {
        let calc = Calculation {
            numbers: vec![1, 2],
            operators: vec![],
        };
        assert!(matches!(
            calc.result(),
            Err(DrillError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn display_uses_plain_digits() {
        let calc = Calculation::new(vec![12_345, 678, 9], vec![Add, Subtract]).unwrap();
        assert_eq!(calc.to_string(), "12345 + 678 - 9");
    }
}
