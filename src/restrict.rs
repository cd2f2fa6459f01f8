//! Clause simplification.
//!
//! Assigning a value to a variable turns each of its literals into a constant
//! term (`1` where the literal becomes true, `0` where it becomes false). The
//! resulting [`Substituted`] formula is folded back into a [`Residual`] by
//! [`restrict`]:
//!
//! 1. A clause containing a `0` is dropped.
//! 2. A `1` inside a surviving clause is dropped from it.
//! 3. A clause left without literals is true, so the whole formula is `1`.
//! 4. Clauses over the same literal set are kept once, at their first position.
//! 5. If no clause survives, the formula is `0`.
//!
//! Finally, a surviving unit clause `X` next to a unit clause `!X` makes the
//! formula `1`.
//!
//! ```
//! use dnf_bdd::restrict::{restrict, Substituted};
//!
//! let f = Substituted::parse("1A + 0B + A1 + c").unwrap();
//! assert_eq!(restrict(f).to_string(), "A+c");
//! ```

use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use crate::error::{Error, Result};
use crate::formula::{Cube, Formula};
use crate::literal::Literal;
use crate::types::Var;

/// A clause element after substitution.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Term {
    Const(bool),
    Lit(Literal),
}

impl Term {
    fn encoded(self) -> char {
        match self {
            Term::Const(false) => '0',
            Term::Const(true) => '1',
            Term::Lit(lit) => lit.encoded(),
        }
    }
}

/// A conjunction of terms, some of which may already be constants.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Clause(Vec<Term>);

impl Clause {
    pub fn new(terms: impl IntoIterator<Item = Term>) -> Self {
        Self(terms.into_iter().collect())
    }

    pub fn terms(&self) -> &[Term] {
        &self.0
    }
}

/// A formula in the middle of substitution: clauses over literals and digits.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Substituted(Vec<Clause>);

impl Substituted {
    /// Parses the digit-and-letter encoding, e.g. `1A+0b`. Whitespace is ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let mut clauses = Vec::new();
        let mut current = Vec::new();
        let mut last_plus = 0;
        for (position, c) in text.chars().enumerate().filter(|(_, c)| !c.is_whitespace()) {
            match c {
                '0' => current.push(Term::Const(false)),
                '1' => current.push(Term::Const(true)),
                '+' => {
                    if current.is_empty() {
                        return Err(Error::InvalidFormat { found: c, position });
                    }
                    clauses.push(Clause(std::mem::take(&mut current)));
                    last_plus = position;
                }
                _ => {
                    let lit = Literal::from_encoded(c).ok_or(Error::InvalidFormat { found: c, position })?;
                    current.push(Term::Lit(lit));
                }
            }
        }
        if current.is_empty() {
            return Err(if clauses.is_empty() {
                Error::EmptyInput
            } else {
                Error::InvalidFormat {
                    found: '+',
                    position: last_plus,
                }
            });
        }
        clauses.push(Clause(current));
        Ok(Self(clauses))
    }
}

impl IntoIterator for Substituted {
    type Item = Clause;
    type IntoIter = std::vec::IntoIter<Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Display for Substituted {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, clause) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "+")?;
            }
            for &term in clause.terms() {
                write!(f, "{}", term.encoded())?;
            }
        }
        Ok(())
    }
}

/// A simplified formula: either a constant or a non-empty list of distinct,
/// non-empty cubes.
///
/// Its encoded string (`0`, `1`, or e.g. `aB+C`) is the identity of a decision
/// node during construction; two residuals are equal exactly when their
/// encodings are.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Residual {
    Const(bool),
    Cubes(Vec<Cube>),
}

impl Residual {
    pub const ZERO: Residual = Residual::Const(false);
    pub const ONE: Residual = Residual::Const(true);

    /// Simplified form of a whole formula, before any assignment.
    pub fn from_formula(formula: &Formula) -> Self {
        restrict(
            formula
                .cubes()
                .iter()
                .map(|cube| Clause::new(cube.literals().iter().map(|&lit| Term::Lit(lit)))),
        )
    }

    pub fn as_const(&self) -> Option<bool> {
        match *self {
            Residual::Const(b) => Some(b),
            Residual::Cubes(_) => None,
        }
    }

    /// Whether `var` still occurs in this residual.
    pub fn mentions(&self, var: Var) -> bool {
        match self {
            Residual::Const(_) => false,
            Residual::Cubes(cubes) => cubes
                .iter()
                .any(|cube| cube.literals().iter().any(|lit| lit.var() == var)),
        }
    }

    /// Replaces every literal over `var` by the constant it takes under `value`.
    ///
    /// A constant residual substitutes to a single constant clause, so
    /// restricting it again yields the same constant.
    pub fn substitute(&self, var: Var, value: bool) -> Substituted {
        match self {
            &Residual::Const(b) => Substituted(vec![Clause(vec![Term::Const(b)])]),
            Residual::Cubes(cubes) => Substituted(
                cubes
                    .iter()
                    .map(|cube| {
                        Clause(
                            cube.literals()
                                .iter()
                                .map(|&lit| {
                                    if lit.var() == var {
                                        Term::Const(lit.value_under(value))
                                    } else {
                                        Term::Lit(lit)
                                    }
                                })
                                .collect(),
                        )
                    })
                    .collect(),
            ),
        }
    }

    /// Shannon cofactor: `restrict(substitute(self, var, value))`.
    pub fn cofactor(&self, var: Var, value: bool) -> Residual {
        restrict(self.substitute(var, value))
    }
}

impl Display for Residual {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Residual::Const(b) => write!(f, "{}", *b as u8),
            Residual::Cubes(cubes) => {
                for (i, cube) in cubes.iter().enumerate() {
                    if i > 0 {
                        write!(f, "+")?;
                    }
                    write!(f, "{}", cube)?;
                }
                Ok(())
            }
        }
    }
}

/// Simplifies a substituted formula into a residual. Pure and deterministic:
/// surviving clauses keep their first-occurrence order.
pub fn restrict(clauses: impl IntoIterator<Item = Clause>) -> Residual {
    let mut seen = HashSet::new();
    let mut survivors = Vec::new();

    for clause in clauses {
        if clause.terms().contains(&Term::Const(false)) {
            continue;
        }
        let cube = Cube::new(clause.terms().iter().filter_map(|&term| match term {
            Term::Lit(lit) => Some(lit),
            Term::Const(_) => None,
        }));
        if cube.is_empty() {
            return Residual::ONE;
        }
        if seen.insert(cube.clone()) {
            survivors.push(cube);
        }
    }

    if survivors.is_empty() {
        return Residual::ZERO;
    }

    let units: HashSet<Literal> = survivors
        .iter()
        .filter(|cube| cube.len() == 1)
        .map(|cube| cube.literals()[0])
        .collect();
    if units.iter().any(|&lit| units.contains(&-lit)) {
        return Residual::ONE;
    }

    Residual::Cubes(survivors)
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn simplify(text: &str) -> String {
        restrict(Substituted::parse(text).unwrap()).to_string()
    }

    fn var(c: char) -> Var {
        Var::from_upper(c).unwrap()
    }

    #[test]
    fn test_falsified_clauses_are_dropped() {
        assert_eq!(simplify("0A+B"), "B");
        assert_eq!(simplify("A0+0B"), "0");
    }

    #[test]
    fn test_satisfied_literals_are_stripped() {
        assert_eq!(simplify("1A+B1"), "A+B");
    }

    #[test]
    fn test_empty_clause_short_circuits() {
        assert_eq!(simplify("A+11+B"), "1");
        assert_eq!(simplify("0+1"), "1");
    }

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        assert_eq!(simplify("B+A1+1B+A+C"), "B+A+C");
        assert_eq!(simplify("AB+BA1"), "AB");
    }

    #[test]
    fn test_complementary_units() {
        assert_eq!(simplify("A+1a"), "1");
        assert_eq!(simplify("AB+ab"), "AB+ab");
    }

    #[test]
    fn test_constants_are_idempotent() {
        for value in [false, true] {
            assert_eq!(Residual::ZERO.cofactor(var('A'), value), Residual::ZERO);
            assert_eq!(Residual::ONE.cofactor(var('A'), value), Residual::ONE);
        }
    }

    #[test]
    fn test_substitute_matches_digit_encoding() {
        let formula = Formula::parse("A!B + !AC").unwrap();
        let residual = Residual::from_formula(&formula);
        assert_eq!(residual.to_string(), "Ab+aC");
        assert_eq!(residual.substitute(var('A'), false).to_string(), "0b+1C");
        assert_eq!(residual.substitute(var('A'), true).to_string(), "1b+0C");
        assert_eq!(residual.cofactor(var('A'), false).to_string(), "C");
        assert_eq!(residual.cofactor(var('A'), true).to_string(), "b");
    }

    #[test]
    fn test_contradictory_clause_dies_on_assignment() {
        let residual = Residual::from_formula(&Formula::parse("ABC + D!D").unwrap());
        assert!(residual.mentions(var('D')));
        assert_eq!(residual.cofactor(var('D'), false).to_string(), "ABC");
        assert_eq!(residual.cofactor(var('D'), true).to_string(), "ABC");
    }

    #[test]
    fn test_from_formula_simplifies() {
        let residual = Residual::from_formula(&Formula::parse("AB + BA + C").unwrap());
        assert_eq!(residual.to_string(), "AB+C");
        let residual = Residual::from_formula(&Formula::parse("A + !A + B").unwrap());
        assert_eq!(residual, Residual::ONE);
    }

    #[test]
    fn test_parse_substituted() {
        assert_eq!(Substituted::parse("1A + 0b").unwrap().to_string(), "1A+0b");
        assert_eq!(Substituted::parse(""), Err(Error::EmptyInput));
        assert!(matches!(Substituted::parse("A+"), Err(Error::InvalidFormat { found: '+', .. })));
        assert!(matches!(Substituted::parse("A*"), Err(Error::InvalidFormat { found: '*', .. })));
    }

    #[test]
    fn test_parse_substituted_trailing_plus_position() {
        let trailing = Error::InvalidFormat { found: '+', position: 1 };
        assert_eq!(Substituted::parse("A+"), Err(trailing.clone()));
        assert_eq!(Substituted::parse("A+ "), Err(trailing.clone()));
        assert_eq!(Substituted::parse("A+\t\n"), Err(trailing));
        assert_eq!(
            Substituted::parse("1A + 0b +  "),
            Err(Error::InvalidFormat { found: '+', position: 8 })
        );
    }
}
