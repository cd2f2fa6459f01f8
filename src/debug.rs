//! Debug utilities for inspecting diagram structure.
//!
//! These are primarily useful in tests and during development.

use std::fmt::{Display, Formatter};

use crate::diagram::Diagram;
use crate::reference::NodeRef;
use crate::types::{Level, Var};

/// Detailed information about a single node.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NodeInfo {
    pub node_ref: NodeRef,
    /// Level of the node (None for terminals)
    pub level: Option<Level>,
    /// Variable tested at this node (None for terminals)
    pub variable: Option<Var>,
    pub low: Option<NodeRef>,
    pub high: Option<NodeRef>,
    /// Encoded residual formula the node was built for
    pub residual: String,
    pub parents: usize,
}

impl NodeInfo {
    pub fn is_terminal(&self) -> bool {
        self.level.is_none()
    }
}

impl Display for NodeInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.variable, self.low, self.high) {
            (Some(var), Some(low), Some(high)) => write!(
                f,
                "{}(var={}, level={}, low={}, high={}, f={})",
                self.node_ref,
                var,
                self.level.map_or("?".to_string(), |l| l.to_string()),
                low,
                high,
                self.residual,
            ),
            _ => write!(f, "{}({})", self.node_ref, self.residual),
        }
    }
}

/// Every reachable node of a diagram, top level first.
#[derive(Debug, Clone)]
pub struct DiagramTree {
    pub root: NodeRef,
    pub nodes: Vec<NodeInfo>,
}

impl DiagramTree {
    pub fn terminals(&self) -> impl Iterator<Item = &NodeInfo> + '_ {
        self.nodes.iter().filter(|info| info.is_terminal())
    }

    /// Decision nodes at `level`.
    pub fn at_level(&self, level: Level) -> impl Iterator<Item = &NodeInfo> + '_ {
        self.nodes.iter().filter(move |info| info.level == Some(level))
    }
}

impl Display for DiagramTree {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Diagram (root = {}):", self.root)?;
        for node in &self.nodes {
            writeln!(f, "  {}", node)?;
        }
        Ok(())
    }
}

impl Diagram {
    /// Get detailed information about a single node.
    pub fn node_info(&self, node_ref: NodeRef) -> NodeInfo {
        let node = self.node(node_ref);
        let decision = !node.is_terminal();
        NodeInfo {
            node_ref,
            level: decision.then_some(node.level),
            variable: if decision { self.order().var_at(node.level) } else { None },
            low: node.low,
            high: node.high,
            residual: node.residual.to_string(),
            parents: node.parents.len(),
        }
    }

    /// Snapshot of all reachable nodes, sorted by level and then by handle.
    pub fn tree(&self) -> DiagramTree {
        let mut nodes: Vec<NodeInfo> = self.descendants().into_iter().map(|r| self.node_info(r)).collect();
        nodes.sort_by_key(|info| (info.is_terminal(), info.level, info.node_ref));
        DiagramTree {
            root: self.root(),
            nodes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_info() {
        let d = Diagram::build("A", "A").unwrap();
        let root = d.node_info(d.root());
        assert_eq!(root.variable, Var::from_upper('A'));
        assert_eq!(root.level, Some(Level::new(0)));
        assert_eq!(root.low, Some(NodeRef::ZERO));
        assert_eq!(root.high, Some(NodeRef::ONE));
        assert_eq!(root.residual, "A");

        let one = d.node_info(NodeRef::ONE);
        assert!(one.is_terminal());
        assert_eq!(one.residual, "1");
        assert_eq!(one.to_string(), "@1(1)");
    }

    #[test]
    fn test_tree_lists_each_node_once() {
        let d = Diagram::build("AB + AC + BC", "ABC").unwrap();
        let tree = d.tree();
        assert_eq!(tree.nodes.len(), d.size());
        assert_eq!(tree.terminals().count(), 2);
        assert_eq!(tree.at_level(Level::new(0)).count(), 1);
        assert_eq!(tree.at_level(Level::new(1)).count(), 2);
        assert_eq!(tree.at_level(Level::new(2)).count(), 1);
        assert_eq!(tree.nodes[0].node_ref, d.root());
        assert!(tree.to_string().starts_with("Diagram (root = "));
    }
}
