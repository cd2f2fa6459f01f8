//! Type-safe wrappers for formula variables and order levels.
//!
//! A [`Var`] names one of the 26 uppercase letters a formula may use, while a
//! [`Level`] is a position in a variable order. Keeping them apart prevents
//! indexing an assignment by letter instead of by position.
use std::fmt;

/// Number of distinct variables available to a formula.
pub const ALPHABET_SIZE: usize = 26;

/// A formula variable, one of `A..=Z`.
///
/// # Invariants
///
/// - The wrapped index is always `< ALPHABET_SIZE`
/// - Ordering of `Var`s is alphabetical
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(u8);

impl Var {
    /// Creates a variable from its alphabet index (`0` is `A`).
    ///
    /// # Panics
    ///
    /// Panics if `index >= 26`.
    pub fn new(index: u8) -> Self {
        assert!((index as usize) < ALPHABET_SIZE, "Variable index must be < 26");
        Var(index)
    }

    /// Returns the variable for an uppercase letter, if `c` is one.
    pub fn from_upper(c: char) -> Option<Self> {
        if c.is_ascii_uppercase() {
            Some(Var(c as u8 - b'A'))
        } else {
            None
        }
    }

    /// Alphabet index of the variable (`A` is `0`).
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The uppercase letter naming this variable.
    pub fn upper(self) -> char {
        (b'A' + self.0) as char
    }

    /// The lowercase letter, used to encode the negated literal.
    pub fn lower(self) -> char {
        (b'a' + self.0) as char
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.upper())
    }
}

/// A level in the variable order (0-indexed).
///
/// # Invariants
///
/// - Level 0 is the topmost level (the root decides on `order[0]`)
/// - Levels increase downward toward terminals
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Level(usize);

impl Level {
    /// Creates a new level with the given index.
    pub fn new(index: usize) -> Self {
        Level(index)
    }

    /// Returns the raw level index as a `usize`.
    pub fn index(self) -> usize {
        self.0
    }

    /// Returns the next level down (index + 1).
    pub fn next(self) -> Self {
        Level(self.0 + 1)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}
