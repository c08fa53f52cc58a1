//! Drill problems: the [`Calculation`] value and its random generator.
//!
//! # Quick start
//!
//! ```
//! use yomiage::drill::CalculationGenerator;
//!
//! let generator = CalculationGenerator::new(3, 8, 16).unwrap();
//! let calc = generator.generate();
//! println!("{calc} = {}", calc.result().unwrap());
//! ```

pub mod calculation;
pub mod generator;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use calculation::{Calculation, Operator};
pub use generator::{digit_count, CalculationGenerator, MAX_OPERANDS};

use thiserror::Error;

// ---------------------------------------------------------------------------
// DrillError
// ---------------------------------------------------------------------------

/// Errors raised while building or evaluating a drill problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrillError {
    /// Generator constraints are unusable (bad operand or digit counts).
    #[error("invalid drill configuration: {0}")]
    InvalidConfiguration(String),

    /// Operand and operator counts do not line up.
    #[error("calculation has {numbers} operands but {operators} operators")]
    InvariantViolation { numbers: usize, operators: usize },

    /// The running total left the signed 64-bit range.
    #[error("calculation result overflows a 64-bit integer")]
    Overflow,
}
