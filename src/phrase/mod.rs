//! Spoken-form assembly of a whole drill problem.
//!
//! [`assemble`] produces the phrase handed to the synthesis service;
//! [`assemble_with`] with [`PhraseStyle::Display`] produces the same clauses
//! separated for on-screen display.

pub mod assembler;

pub use assembler::{
    assemble, assemble_with, spoken_operator, PhraseStyle, ADD_WORD, CLOSING, COUNTER, OPENING,
    SUBTRACT_WORD,
};

use thiserror::Error;

use crate::numeral::NumeralError;

/// Errors raised while assembling a phrase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhraseError {
    /// The calculation's operator count is not one less than its operand
    /// count (or it has fewer than two operands).
    #[error("cannot read a calculation with {numbers} operands and {operators} operators")]
    InvariantViolation { numbers: usize, operators: usize },

    /// An operand could not be verbalized.
    #[error(transparent)]
    Numeral(#[from] NumeralError),
}
