use std::collections::BTreeSet;

use crate::reference::NodeRef;
use crate::restrict::Residual;
use crate::types::Level;

/// A diagram node.
///
/// Terminals carry a constant residual and no children. A decision node at
/// `level` tests the variable `order[level]`: `low` is taken when it is `0`,
/// `high` when it is `1`. `parents` records every node with an edge into this
/// one and is only consulted while reductions rewire the graph.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Node {
    pub residual: Residual,
    pub level: Level,
    pub low: Option<NodeRef>,
    pub high: Option<NodeRef>,
    pub parents: BTreeSet<NodeRef>,
}

impl Node {
    /// A terminal; it sits below the last level of an order of `depth` variables.
    pub fn terminal(value: bool, depth: usize) -> Self {
        Self {
            residual: Residual::Const(value),
            level: Level::new(depth),
            low: None,
            high: None,
            parents: BTreeSet::new(),
        }
    }

    /// A decision node whose children are not assigned yet.
    pub fn decision(residual: Residual, level: Level) -> Self {
        Self {
            residual,
            level,
            low: None,
            high: None,
            parents: BTreeSet::new(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.low.is_none() && self.high.is_none()
    }

    /// Both children, once the node is complete.
    pub fn children(&self) -> Option<(NodeRef, NodeRef)> {
        Some((self.low?, self.high?))
    }
}
