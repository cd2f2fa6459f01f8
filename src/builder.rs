//! Diagram construction by Shannon expansion.
//!
//! # Algorithm
//!
//! Starting from the simplified formula at level 0, each decision node at level
//! `k` is expanded on `v = order[k]` into its cofactors
//! `low = restrict(f[v := 0])` and `high = restrict(f[v := 1])`. A constant
//! cofactor becomes an edge to the shared terminal. Any other cofactor is
//! looked up in the subtable of level `k + 1`:
//!
//! - **I-reduction**: a residual already built on that level is reused, so the
//!   exponential expansion tree collapses into a DAG.
//! - Otherwise a fresh node is created, linked to its parent, registered in the
//!   subtable and expanded recursively.
//!
//! Once both children of a node are final, **S-reduction** checks whether they
//! are the same node. If so, the node is spliced out: every parent edge into it
//! is redirected to the shared child, the subtable entry is redirected as well,
//! and if the node was the root the child becomes the root. A splice only ever
//! merges a node with its immediate child; since each expansion checks its own
//! node after its children settle, reductions propagate upward one level per
//! call.
//!
//! # Example
//!
//! ```
//! use dnf_bdd::builder::build;
//!
//! let d = build("ABC + D!D + E!E", "DEABC").unwrap();
//! assert_eq!(d.size(), 5);
//! assert!(d.evaluate("00111").unwrap());
//! assert!(!d.evaluate("11011").unwrap());
//! ```

use log::debug;

use crate::diagram::Diagram;
use crate::error::{Error, Result};
use crate::formula::{normalize, Formula, Order};
use crate::node::Node;
use crate::reference::NodeRef;
use crate::restrict::Residual;
use crate::storage::Storage;
use crate::subtable::Subtable;
use crate::types::Level;

/// Builds the reduced diagram of `formula` under the variable `order`.
///
/// Fails with [`Error::EmptyInput`], [`Error::InvalidFormat`] or
/// [`Error::VariableMismatch`] before any node is created.
pub fn build(formula: &str, order: &str) -> Result<Diagram> {
    let (formula, order) = normalize(formula, order)?;
    build_normalized(formula, order)
}

/// Builds from an already validated formula and order.
pub(crate) fn build_normalized(formula: Formula, order: Order) -> Result<Diagram> {
    let (storage, root) = {
        let mut builder = Builder::new(&order);
        builder.run(Residual::from_formula(&formula))?;
        (builder.storage, builder.root)
    };
    debug!("built {} under {}: {} live nodes", formula, order, storage.real_size());
    Ok(Diagram::new(formula, order, storage, root))
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Edge {
    Low,
    High,
}

struct Builder<'a> {
    order: &'a Order,
    storage: Storage<Node>,
    subtables: Vec<Subtable>,
    root: NodeRef,
}

impl<'a> Builder<'a> {
    fn new(order: &'a Order) -> Self {
        let depth = order.len();
        let mut storage = Storage::with_capacity(2 * depth + 2);

        // Allocate the terminals first, so that they land on `NodeRef::ZERO` and `NodeRef::ONE`:
        let zero = storage.add(Node::terminal(false, depth));
        let one = storage.add(Node::terminal(true, depth));
        assert_eq!(zero, NodeRef::ZERO.index());
        assert_eq!(one, NodeRef::ONE.index());

        Self {
            order,
            storage,
            subtables: (0..=depth).map(|_| Subtable::new()).collect(),
            root: NodeRef::ZERO,
        }
    }

    fn node(&self, r: NodeRef) -> &Node {
        &self.storage[r.index()]
    }

    fn node_mut(&mut self, r: NodeRef) -> &mut Node {
        &mut self.storage[r.index()]
    }

    fn run(&mut self, residual: Residual) -> Result<()> {
        if let Some(value) = residual.as_const() {
            debug!("formula is constant {}", value as u8);
            self.root = NodeRef::terminal(value);
            return Ok(());
        }
        let level = Level::new(0);
        let root = self.mk(residual.clone(), level);
        self.subtables[level.index()].insert(residual, root);
        self.root = root;
        self.expand(root)
    }

    fn mk(&mut self, residual: Residual, level: Level) -> NodeRef {
        let r = NodeRef::new(self.storage.add(Node::decision(residual, level)) as u32);
        debug!("mk({}) at {} = {}", self.node(r).residual, level, r);
        r
    }

    /// Expands the decision node `r` into its two cofactors and reduces it.
    fn expand(&mut self, r: NodeRef) -> Result<()> {
        let level = self.node(r).level;
        let var = self.order.var_at(level).ok_or_else(|| {
            Error::InvariantViolation(format!(
                "order exhausted at {} with non-constant residual {}",
                level,
                self.node(r).residual
            ))
        })?;

        let residual = &self.node(r).residual;
        let low = residual.cofactor(var, false);
        let high = residual.cofactor(var, true);

        self.attach(r, Edge::Low, low, level.next())?;
        self.attach(r, Edge::High, high, level.next())?;

        self.reduce(r);
        Ok(())
    }

    /// Resolves `residual` at `level` and links it as the `edge` child of `parent`.
    fn attach(&mut self, parent: NodeRef, edge: Edge, residual: Residual, level: Level) -> Result<()> {
        if let Some(value) = residual.as_const() {
            self.link(parent, edge, NodeRef::terminal(value));
            return Ok(());
        }

        if let Some(existing) = self.subtables[level.index()].find(&residual) {
            debug!("hit: {} at {} -> {}", residual, level, existing);
            self.link(parent, edge, existing);
            return Ok(());
        }

        let child = self.mk(residual.clone(), level);
        self.subtables[level.index()].insert(residual, child);
        self.link(parent, edge, child);
        self.expand(child)
    }

    fn link(&mut self, parent: NodeRef, edge: Edge, child: NodeRef) {
        let node = self.node_mut(parent);
        match edge {
            Edge::Low => node.low = Some(child),
            Edge::High => node.high = Some(child),
        }
        self.node_mut(child).parents.insert(parent);
    }

    /// S-reduction: splices `r` out if both of its children are the same node.
    fn reduce(&mut self, r: NodeRef) {
        let child = match self.node(r).children() {
            Some((low, high)) if low == high => low,
            _ => return,
        };

        let Some(node) = self.storage.drop(r.index()) else {
            return;
        };
        debug!("splice {} ({}) into {}", r, node.residual, child);

        self.node_mut(child).parents.remove(&r);
        for &parent in &node.parents {
            let p = self.node_mut(parent);
            if p.low == Some(r) {
                p.low = Some(child);
            }
            if p.high == Some(r) {
                p.high = Some(child);
            }
            self.node_mut(child).parents.insert(parent);
        }

        if self.root == r {
            self.root = child;
        }
        self.subtables[node.level.index()].insert(node.residual, child);
    }
}
