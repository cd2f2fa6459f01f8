//! Formula normalization.
//!
//! Surface DNF text (`!AB + C`) is parsed into a [`Formula`]: a list of
//! [`Cube`]s, each a conjunction of [`Literal`]s. Whitespace is ignored
//! everywhere. The normalized encoding writes a negated variable as its
//! lowercase letter, so `!AB + C` encodes as `aB+C`.
//!
//! An [`Order`] is a permutation of exactly the formula's variables. The pair is
//! validated together by [`normalize`].

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use log::trace;

use crate::error::{Error, Result};
use crate::literal::Literal;
use crate::types::{Level, Var};

/// A conjunction of literals.
///
/// Literals are kept sorted by (variable, polarity) without repetitions, so two
/// cubes over the same literal set compare equal and encode identically.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Cube(Vec<Literal>);

impl Cube {
    pub fn new(literals: impl IntoIterator<Item = Literal>) -> Self {
        let mut literals: Vec<Literal> = literals.into_iter().collect();
        literals.sort();
        literals.dedup();
        Self(literals)
    }

    pub fn literals(&self) -> &[Literal] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// An empty cube is the constant `1`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A cube holding both polarities of some variable is always false.
    pub fn is_contradictory(&self) -> bool {
        self.0.windows(2).any(|w| w[0].var() == w[1].var())
    }
}

impl Display for Cube {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for lit in &self.0 {
            write!(f, "{}", lit.encoded())?;
        }
        Ok(())
    }
}

/// A parsed DNF formula together with the text it came from.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Formula {
    text: String,
    cubes: Vec<Cube>,
}

impl Formula {
    /// Parses surface DNF text.
    ///
    /// Grammar: `formula := clause ('+' clause)*`, `clause := literal+`,
    /// `literal := '!'? [A-Z]`, whitespace ignored anywhere.
    pub fn parse(text: &str) -> Result<Self> {
        let mut chars = text.chars().enumerate().filter(|(_, c)| !c.is_whitespace()).peekable();
        if chars.peek().is_none() {
            return Err(Error::EmptyInput);
        }

        let mut cubes = Vec::new();
        let mut current = Vec::new();
        let mut negation: Option<usize> = None;
        let mut last_plus = 0;

        for (position, c) in chars {
            match c {
                '!' => {
                    if negation.is_some() {
                        return Err(Error::InvalidFormat { found: c, position });
                    }
                    negation = Some(position);
                }
                'A'..='Z' => {
                    let var = Var::from_upper(c).ok_or(Error::InvalidFormat { found: c, position })?;
                    current.push(if negation.take().is_some() {
                        Literal::negative(var)
                    } else {
                        Literal::positive(var)
                    });
                }
                '+' => {
                    if let Some(at) = negation {
                        return Err(Error::InvalidFormat { found: '!', position: at });
                    }
                    if current.is_empty() {
                        return Err(Error::InvalidFormat { found: c, position });
                    }
                    cubes.push(Cube::new(current.drain(..)));
                    last_plus = position;
                }
                _ => return Err(Error::InvalidFormat { found: c, position }),
            }
        }

        if let Some(at) = negation {
            return Err(Error::InvalidFormat { found: '!', position: at });
        }
        if current.is_empty() {
            return Err(Error::InvalidFormat {
                found: '+',
                position: last_plus,
            });
        }
        cubes.push(Cube::new(current));

        let formula = Self {
            text: text.to_string(),
            cubes,
        };
        trace!("parsed {:?} as {}", text, formula);
        Ok(formula)
    }

    /// The text this formula was parsed from, verbatim.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cubes(&self) -> &[Cube] {
        &self.cubes
    }

    /// Every variable occurring in the formula, alphabetically.
    pub fn variables(&self) -> BTreeSet<Var> {
        self.cubes
            .iter()
            .flat_map(|cube| cube.literals().iter().map(|lit| lit.var()))
            .collect()
    }

    /// The formula's variables in alphabetical order.
    pub fn sorted_order(&self) -> Order {
        Order(self.variables().into_iter().collect())
    }
}

/// Normalized encoding, e.g. `aB+C`.
impl Display for Formula {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, cube) in self.cubes.iter().enumerate() {
            if i > 0 {
                write!(f, "+")?;
            }
            write!(f, "{}", cube)?;
        }
        Ok(())
    }
}

/// A variable order: every formula variable exactly once.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Order(Vec<Var>);

impl Order {
    /// Parses and validates `text` as an order for `formula`.
    pub fn for_formula(formula: &Formula, text: &str) -> Result<Self> {
        let vars = parse_letters(text)?;

        let expected: String = formula.variables().iter().map(|v| v.upper()).collect();
        let mut actual: Vec<char> = vars.iter().map(|v| v.upper()).collect();
        actual.sort_unstable();
        let actual: String = actual.into_iter().collect();

        if expected != actual {
            return Err(Error::VariableMismatch {
                formula: expected,
                order: actual,
            });
        }

        Ok(Self(vars))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn vars(&self) -> &[Var] {
        &self.0
    }

    /// Variable decided at `level`, or `None` below the last level.
    pub fn var_at(&self, level: Level) -> Option<Var> {
        self.0.get(level.index()).copied()
    }

    /// Level at which `var` is decided.
    pub fn level_of(&self, var: Var) -> Option<Level> {
        self.0.iter().position(|&v| v == var).map(Level::new)
    }

    /// This order rotated left by `k` positions (`ABC` by 1 is `BCA`).
    pub fn rotated(&self, k: usize) -> Self {
        let mut vars = self.0.clone();
        if !vars.is_empty() {
            let k = k % vars.len();
            vars.rotate_left(k);
        }
        Self(vars)
    }
}

impl Display for Order {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for var in &self.0 {
            write!(f, "{}", var)?;
        }
        Ok(())
    }
}

fn parse_letters(text: &str) -> Result<Vec<Var>> {
    let mut vars = Vec::new();
    for (position, c) in text.chars().enumerate().filter(|(_, c)| !c.is_whitespace()) {
        let var = Var::from_upper(c).ok_or(Error::InvalidFormat { found: c, position })?;
        vars.push(var);
    }
    if vars.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(vars)
}

/// Parses and cross-validates a formula and an order.
///
/// Checks run in this order: emptiness of either text, formula syntax, order
/// syntax, and finally that both range over the same variable set.
pub fn normalize(formula: &str, order: &str) -> Result<(Formula, Order)> {
    if formula.trim().is_empty() || order.trim().is_empty() {
        return Err(Error::EmptyInput);
    }
    let formula = Formula::parse(formula)?;
    let order = Order::for_formula(&formula, order)?;
    Ok((formula, order))
}
