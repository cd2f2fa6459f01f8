use std::fmt::{Display, Formatter};
use std::ops::Neg;

use crate::types::Var;

/// A variable together with its polarity.
///
/// Literals are encoded as single characters: the uppercase letter for the
/// positive literal and the lowercase letter for the negated one, so no
/// separate negation marker is needed inside a residual formula.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Literal {
    var: Var,
    negated: bool,
}

impl Literal {
    pub const fn positive(var: Var) -> Self {
        Self { var, negated: false }
    }

    pub const fn negative(var: Var) -> Self {
        Self { var, negated: true }
    }

    pub const fn var(self) -> Var {
        self.var
    }

    pub const fn is_negated(self) -> bool {
        self.negated
    }

    /// Value of this literal when its variable is assigned `value`.
    pub const fn value_under(self, value: bool) -> bool {
        value != self.negated
    }

    /// Decodes the upper/lowercase encoding.
    pub fn from_encoded(c: char) -> Option<Self> {
        if c.is_ascii_lowercase() {
            Var::from_upper(c.to_ascii_uppercase()).map(Literal::negative)
        } else {
            Var::from_upper(c).map(Literal::positive)
        }
    }

    pub fn encoded(self) -> char {
        if self.negated {
            self.var.lower()
        } else {
            self.var.upper()
        }
    }
}

impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            var: self.var,
            negated: !self.negated,
        }
    }
}

/// Surface form: `A` or `!A`.
impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", if self.negated { "!" } else { "" }, self.var)
    }
}
