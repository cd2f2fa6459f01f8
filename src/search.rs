//! Variable order search.
//!
//! The size of a diagram depends heavily on its variable order, and finding the
//! optimal order is NP-complete. This module implements a cheap heuristic: start
//! from the alphabetically sorted order and try each of its `n` cyclic rotations
//! (`ABC`, `BCA`, `CAB`), keeping the smallest diagram. Ties go to the earliest
//! rotation.
//!
//! # Limitations
//!
//! Only `n` of the `n!` permutations are visited, so a smaller non-cyclic order
//! can be missed. The search guarantees minimality over its candidate set only.
//!
//! With the `parallel` feature the candidate builds run on the rayon thread
//! pool. Every build owns its own storage and subtables, and the selection rule
//! is the same, so both modes pick the same order.

use log::debug;

use crate::builder::build_normalized;
use crate::diagram::Diagram;
use crate::error::{Error, Result};
use crate::formula::{Formula, Order};

/// Statistics collected during an order search.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct SearchStats {
    /// Number of orders tried
    pub candidates: usize,
    /// Rotation index of the chosen order
    pub best_index: usize,
    /// Size of the chosen diagram
    pub best_size: usize,
    /// Size of the largest candidate diagram
    pub worst_size: usize,
}

impl SearchStats {
    /// Calculate the size reduction of the best candidate relative to the worst.
    pub fn reduction_ratio(&self) -> f64 {
        if self.worst_size == 0 {
            return 0.0;
        }
        1.0 - (self.best_size as f64 / self.worst_size as f64)
    }
}

/// All `n` cyclic rotations of `order`, starting with `order` itself.
pub fn rotations(order: &Order) -> Vec<Order> {
    (0..order.len()).map(|k| order.rotated(k)).collect()
}

/// Builds the smallest diagram among the rotations of the sorted variable order.
pub fn best_order(formula: &str) -> Result<Diagram> {
    best_order_with_stats(formula).map(|(diagram, _)| diagram)
}

/// Same as [`best_order`], also reporting how the candidates compared.
pub fn best_order_with_stats(formula: &str) -> Result<(Diagram, SearchStats)> {
    let formula = Formula::parse(formula)?;
    let candidates = rotations(&formula.sorted_order());

    let diagrams = build_all(&formula, candidates)?;

    let worst_size = diagrams.iter().map(Diagram::size).max().unwrap_or(0);
    let (best_index, best) = diagrams
        .into_iter()
        .enumerate()
        .min_by_key(|(i, d)| (d.size(), *i))
        .ok_or_else(|| Error::InvariantViolation("no candidate orders".to_string()))?;

    let stats = SearchStats {
        candidates: best.variable_count(),
        best_index,
        best_size: best.size(),
        worst_size,
    };
    debug!("best order {} of {:?}", best.order(), stats);
    Ok((best, stats))
}

#[cfg(not(feature = "parallel"))]
fn build_all(formula: &Formula, candidates: Vec<Order>) -> Result<Vec<Diagram>> {
    candidates
        .into_iter()
        .map(|order| build_normalized(formula.clone(), order))
        .collect()
}

#[cfg(feature = "parallel")]
fn build_all(formula: &Formula, candidates: Vec<Order>) -> Result<Vec<Diagram>> {
    use rayon::prelude::*;

    candidates
        .into_par_iter()
        .map(|order| build_normalized(formula.clone(), order))
        .collect()
}
