//! Error taxonomy.
//!
//! The first four variants are validation failures on caller-supplied text and
//! are returned before any diagram state is created. [`Error::InvariantViolation`]
//! marks a defect in the builder itself and never fires on valid input.

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum Error {
    /// The formula or the order text is empty (after removing whitespace).
    #[error("neither the formula nor the order can be empty")]
    EmptyInput,

    /// A character outside the DNF grammar, or a malformed clause.
    #[error("unexpected {found:?} at position {position}; expected DNF such as `ABC + A!B!C`")]
    InvalidFormat { found: char, position: usize },

    /// The formula and the order range over different variable sets.
    #[error("formula variables `{formula}` do not correspond to order `{order}`")]
    VariableMismatch { formula: String, order: String },

    /// The assignment handed to an evaluation is malformed.
    #[error("invalid assignment: {reason}")]
    InvalidInput { reason: String },

    /// Internal defect: a terminal holding a non-constant, or an expansion that
    /// ran out of variables with a non-constant residual.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl Error {
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Error::InvariantViolation(_))
    }
}
