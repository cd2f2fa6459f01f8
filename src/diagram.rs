//! The finished decision diagram.
//!
//! A [`Diagram`] owns the node storage produced by one construction, the root
//! handle and the order it was built under. It is never mutated after
//! construction: the only interior state is the node count, computed once on
//! first request and frozen afterwards, so a diagram can be shared between
//! threads for concurrent evaluation.

use std::collections::{HashSet, VecDeque};
use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::formula::{Formula, Order};
use crate::node::Node;
use crate::reference::NodeRef;
use crate::storage::Storage;

#[derive(Debug)]
pub struct Diagram {
    formula: Formula,
    order: Order,
    storage: Storage<Node>,
    root: NodeRef,
    size: OnceLock<usize>,
}

impl Diagram {
    pub(crate) fn new(formula: Formula, order: Order, storage: Storage<Node>, root: NodeRef) -> Self {
        Self {
            formula,
            order,
            storage,
            root,
            size: OnceLock::new(),
        }
    }

    /// Builds the diagram of `formula` under `order`. See [`crate::builder::build`].
    pub fn build(formula: &str, order: &str) -> Result<Self> {
        crate::builder::build(formula, order)
    }

    /// Builds the diagram with the formula's variables in alphabetical order.
    pub fn with_sorted_order(formula: &str) -> Result<Self> {
        let formula = Formula::parse(formula)?;
        let order = formula.sorted_order();
        crate::builder::build_normalized(formula, order)
    }

    /// Builds the smallest diagram over all rotations of the sorted order.
    /// See [`crate::search::best_order`].
    pub fn with_best_order(formula: &str) -> Result<Self> {
        crate::search::best_order(formula)
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    /// The order the diagram was built under.
    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn variable_count(&self) -> usize {
        self.order.len()
    }

    pub fn root(&self) -> NodeRef {
        self.root
    }

    pub fn node(&self, r: NodeRef) -> &Node {
        &self.storage[r.index()]
    }

    pub fn storage(&self) -> &Storage<Node> {
        &self.storage
    }

    pub fn is_zero(&self, r: NodeRef) -> bool {
        r == NodeRef::ZERO
    }
    pub fn is_one(&self, r: NodeRef) -> bool {
        r == NodeRef::ONE
    }

    /// The formula is true under every assignment.
    pub fn is_tautology(&self) -> bool {
        self.is_one(self.root)
    }

    /// The formula is false under every assignment.
    pub fn is_contradiction(&self) -> bool {
        self.is_zero(self.root)
    }

    /// Every node reachable from the root, terminals included.
    pub fn descendants(&self) -> HashSet<NodeRef> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([self.root]);

        while let Some(r) = queue.pop_front() {
            if visited.insert(r) {
                if let Some((low, high)) = self.node(r).children() {
                    queue.push_back(low);
                    queue.push_back(high);
                }
            }
        }

        visited
    }

    /// Number of distinct nodes reachable from the root.
    pub fn size(&self) -> usize {
        *self.size.get_or_init(|| self.descendants().len())
    }

    /// `1 - size / (2^(n+1) - 1)`: the share of the unreduced decision tree
    /// removed by the reductions.
    pub fn reduction_ratio(&self) -> f64 {
        1.0 - self.size() as f64 / full_node_count(self.variable_count()) as f64
    }

    /// Evaluates the function under `bits`, where bit `i` assigns `order[i]`.
    ///
    /// ```
    /// use dnf_bdd::Diagram;
    ///
    /// let d = Diagram::build("A!B + C", "CBA").unwrap();
    /// assert!(d.evaluate("001").unwrap());
    /// assert!(!d.evaluate("011").unwrap());
    /// assert!(d.evaluate("1").is_err());
    /// ```
    pub fn evaluate(&self, bits: &str) -> Result<bool> {
        let assignment = parse_assignment(bits, self.order.len())?;
        self.evaluate_assignment(&assignment)
    }

    /// Same as [`Diagram::evaluate`], with the assignment already decoded.
    pub fn evaluate_assignment(&self, assignment: &[bool]) -> Result<bool> {
        if assignment.len() != self.order.len() {
            return Err(Error::InvalidInput {
                reason: format!("expected {} bits, got {}", self.order.len(), assignment.len()),
            });
        }

        let mut current = self.root;
        loop {
            let node = self.node(current);
            if node.is_terminal() {
                return node.residual.as_const().ok_or_else(|| {
                    Error::InvariantViolation(format!("terminal {} holds {}", current, node.residual))
                });
            }
            let (low, high) = node
                .children()
                .ok_or_else(|| Error::InvariantViolation(format!("node {} has a single child", current)))?;
            let bit = assignment.get(node.level.index()).copied().ok_or_else(|| {
                Error::InvariantViolation(format!("node {} decides past the last level", current))
            })?;
            current = if bit { high } else { low };
        }
    }
}

/// Size of the unreduced decision tree over `variables` variables: `2^(n+1) - 1`.
pub fn full_node_count(variables: usize) -> u64 {
    (1u64 << (variables + 1)) - 1
}

/// Decodes a `0`/`1` string of exactly `len` characters.
pub fn parse_assignment(bits: &str, len: usize) -> Result<Vec<bool>> {
    let assignment = bits
        .chars()
        .enumerate()
        .map(|(i, c)| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            _ => Err(Error::InvalidInput {
                reason: format!("unexpected {:?} at position {}", c, i),
            }),
        })
        .collect::<Result<Vec<bool>>>()?;
    if assignment.len() != len {
        return Err(Error::InvalidInput {
            reason: format!("expected {} bits, got {}", len, assignment.len()),
        });
    }
    Ok(assignment)
}
