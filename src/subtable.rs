//! Per-level hash-consing table.
//!
//! During one construction the builder keeps one subtable per order level:
//!
//! ```text
//! subtables[0] → residuals decided on order[0] (only the root)
//! subtables[1] → residuals decided on order[1]
//! ...
//! ```
//!
//! Each subtable maps a residual formula to the node representing it at that
//! level, so a residual met twice on the same level is built once
//! (I-reduction). When a node is spliced out by S-reduction its entry is
//! redirected to the surviving child.

use std::collections::HashMap;

use crate::reference::NodeRef;
use crate::restrict::Residual;

#[derive(Debug, Clone, Default)]
pub struct Subtable {
    nodes: HashMap<Residual, NodeRef>,
}

impl Subtable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the node built for `residual`.
    pub fn find(&self, residual: &Residual) -> Option<NodeRef> {
        self.nodes.get(residual).copied()
    }

    /// Insert or redirect the node representing `residual`.
    pub fn insert(&mut self, residual: Residual, node: NodeRef) {
        self.nodes.insert(residual, node);
    }

    /// Get the number of residuals in this subtable.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the subtable is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
