//! Brute-force evaluation for cross-checking diagrams.
//!
//! The oracle never looks at diagram nodes: it substitutes an assignment into
//! the original formula one variable at a time and simplifies after each step,
//! until a constant remains.

use crate::diagram::{parse_assignment, Diagram};
use crate::error::{Error, Result};
use crate::formula::{normalize, Formula, Order};
use crate::restrict::Residual;

/// Evaluates `formula` under `bits`, where bit `i` assigns `order[i]`.
///
/// ```
/// use dnf_bdd::oracle::evaluate_direct;
///
/// assert!(evaluate_direct("A!B + C", "ABC", "100").unwrap());
/// assert!(!evaluate_direct("A!B + C", "ABC", "110").unwrap());
/// ```
pub fn evaluate_direct(formula: &str, order: &str, bits: &str) -> Result<bool> {
    let (formula, order) = normalize(formula, order)?;
    let assignment = parse_assignment(bits, order.len())?;
    evaluate_formula(&formula, &order, &assignment)
}

/// Evaluates an already parsed formula.
pub fn evaluate_formula(formula: &Formula, order: &Order, assignment: &[bool]) -> Result<bool> {
    if assignment.len() != order.len() {
        return Err(Error::InvalidInput {
            reason: format!("expected {} bits, got {}", order.len(), assignment.len()),
        });
    }

    let mut residual = Residual::from_formula(formula);
    for (&var, &value) in order.vars().iter().zip(assignment) {
        residual = residual.cofactor(var, value);
    }

    residual.as_const().ok_or_else(|| {
        Error::InvariantViolation(format!("residual {} survived a full assignment", residual))
    })
}

/// Outcome of checking a diagram against the oracle on every assignment.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Verification {
    /// Number of assignments checked
    pub checked: u64,
    /// Assignments (as bit strings) on which the diagram and the oracle disagree
    pub mismatches: Vec<String>,
}

impl Verification {
    pub fn is_ok(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Compares `diagram` with the oracle on all `2^n` assignments.
pub fn verify(diagram: &Diagram) -> Result<Verification> {
    let n = diagram.variable_count();
    let mut verification = Verification::default();
    let mut assignment = vec![false; n];

    for i in 0..(1u64 << n) {
        for (k, bit) in assignment.iter_mut().enumerate() {
            *bit = (i >> (n - 1 - k)) & 1 == 1;
        }
        let expected = evaluate_formula(diagram.formula(), diagram.order(), &assignment)?;
        let actual = diagram.evaluate_assignment(&assignment)?;
        if expected != actual {
            verification
                .mismatches
                .push(assignment.iter().map(|&b| if b { '1' } else { '0' }).collect());
        }
        verification.checked += 1;
    }

    Ok(verification)
}
