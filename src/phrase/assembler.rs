//! Expression assembly with operator elision.
//!
//! A drill is read as
//!
//! ```text
//! ねがいましては | <n0>えんなり | [op] <n1>えんなり | … | えんでは
//! ```
//!
//! An operator word is spoken only where the operator changes: a leading
//! addition is silent, a leading subtraction says ひいては, and after that a
//! word is emitted only when `operators[i] != operators[i - 1]`.  A run of
//! identical operators therefore carries exactly one word, on its first
//! member.

use crate::drill::{Calculation, Operator};
use crate::numeral::verbalize;

use super::PhraseError;

/// Opening phrase ("ready, set").
pub const OPENING: &str = "ねがいましては";
/// Counter particle after every operand.
pub const COUNTER: &str = "えんなり";
/// Closing phrase that asks for the answer.
pub const CLOSING: &str = "えんでは";
/// Spoken addition word.
pub const ADD_WORD: &str = "くわえて";
/// Spoken subtraction word.
pub const SUBTRACT_WORD: &str = "ひいては";

// ---------------------------------------------------------------------------
// PhraseStyle
// ---------------------------------------------------------------------------

/// Separator policy.  Both styles share the same clause structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhraseStyle {
    /// Clauses joined without punctuation; fed to the synthesis service.
    #[default]
    Speech,
    /// Clauses separated by `、` for on-screen display.
    Display,
}

impl PhraseStyle {
    fn separator(self) -> &'static str {
        match self {
            PhraseStyle::Speech => "",
            PhraseStyle::Display => "、",
        }
    }
}

// ---------------------------------------------------------------------------
// Operator elision
// ---------------------------------------------------------------------------

/// Word to speak before operand `i + 1`, or `None` when elided.
pub fn spoken_operator(operators: &[Operator], i: usize) -> Option<&'static str> {
    let current = *operators.get(i)?;
    let speak = match i {
        0 => current == Operator::Subtract,
        _ => operators[i - 1] != current,
    };
    speak.then_some(match current {
        Operator::Add => ADD_WORD,
        Operator::Subtract => SUBTRACT_WORD,
    })
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Assemble the speech phrase for `calc`.
///
/// ```
/// use yomiage::drill::{Calculation, Operator};
/// use yomiage::phrase::assemble;
///
/// let calc = Calculation::new(vec![1000, 8000], vec![Operator::Subtract]).unwrap();
/// assert_eq!(
///     assemble(&calc).unwrap(),
///     "ねがいましてはいっせんえんなりひいてははっせんえんなりえんでは"
/// );
/// ```
pub fn assemble(calc: &Calculation) -> Result<String, PhraseError> {
    assemble_with(calc, PhraseStyle::Speech)
}

/// Assemble `calc` using the given separator style.
///
/// # Errors
///
/// - [`PhraseError::InvariantViolation`] when operand and operator counts do
///   not line up; nothing is truncated.
/// - [`PhraseError::Numeral`] when an operand cannot be verbalized.
pub fn assemble_with(calc: &Calculation, style: PhraseStyle) -> Result<String, PhraseError> {
    let (numbers, operators) = (&calc.numbers, &calc.operators);
    if numbers.len() < 2 || operators.len() + 1 != numbers.len() {
        return Err(PhraseError::InvariantViolation {
            numbers: numbers.len(),
            operators: operators.len(),
        });
    }

    let mut clauses: Vec<String> = Vec::with_capacity(numbers.len() * 2 + 2);
    clauses.push(OPENING.to_string());
    clauses.push(format!("{}{COUNTER}", verbalize(numbers[0])?));

    for (i, &n) in numbers.iter().enumerate().skip(1) {
        if let Some(word) = spoken_operator(operators, i - 1) {
            clauses.push(word.to_string());
        }
        clauses.push(format!("{}{COUNTER}", verbalize(n)?));
    }

    clauses.push(CLOSING.to_string());
    Ok(clauses.join(style.separator()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
