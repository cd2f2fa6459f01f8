//! Random DNF formulas for fuzzing.
//!
//! A formula over `n` variables picks `n` distinct letters in random order and
//! draws between [`MIN_CLAUSES`] and [`MAX_CLAUSES`] clauses. Each clause takes
//! a random-length prefix of the chosen letters, negating every literal with
//! probability [`NEGATION_PROBABILITY`] unless the positive variable already
//! stands alone as a clause. Duplicate clauses are dropped, and formulas that
//! end up missing one of the chosen variables are redrawn.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{Var, ALPHABET_SIZE};

pub const MIN_CLAUSES: usize = 15;
pub const MAX_CLAUSES: usize = 55;
pub const NEGATION_PROBABILITY: f64 = 0.15;

/// Generates a random DNF formula over exactly `variables` distinct variables.
///
/// # Panics
///
/// Panics if `variables` is not in `1..=26`.
pub fn random_dnf<R: Rng + ?Sized>(rng: &mut R, variables: usize) -> String {
    assert!(
        (1..=ALPHABET_SIZE).contains(&variables),
        "Variable count must be in the range 1..=26"
    );

    loop {
        let mut letters: Vec<Var> = (0..ALPHABET_SIZE as u8).map(Var::new).collect();
        letters.shuffle(rng);
        letters.truncate(variables);

        let count = rng.gen_range(MIN_CLAUSES..=MAX_CLAUSES);
        let mut clauses: Vec<String> = Vec::with_capacity(count);
        for _ in 0..count {
            let take = rng.gen_range(1..=variables);
            let clause: String = letters[..take]
                .iter()
                .map(|&v| {
                    let unit = v.upper().to_string();
                    if rng.gen_bool(NEGATION_PROBABILITY) && !clauses.contains(&unit) {
                        format!("!{}", v)
                    } else {
                        unit
                    }
                })
                .collect();
            if !clauses.contains(&clause) {
                clauses.push(clause);
            }
        }

        // The longest clause decides whether every chosen variable occurs.
        let longest = clauses.iter().map(|c| c.chars().filter(char::is_ascii_uppercase).count()).max();
        if longest == Some(variables) {
            return clauses.join(" + ");
        }
    }
}

/// Every `n`-bit assignment string, in counting order (`00`, `01`, `10`, `11`).
pub fn all_assignments(n: usize) -> impl Iterator<Item = String> {
    (0..(1u64 << n)).map(move |i| format!("{:0width$b}", i, width = n))
}
