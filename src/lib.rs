//! # dnf-bdd: reduced ordered decision diagrams from DNF formulas
//!
//! **`dnf-bdd`** compiles a Boolean formula in disjunctive normal form into a
//! **reduced ordered binary decision diagram** and evaluates it in time
//! proportional to the number of variables rather than the size of the formula.
//!
//! ## How a diagram is built
//!
//! The builder performs Shannon expansion along a fixed variable order. After
//! every assignment the residual formula is simplified (see [`restrict`]), and
//! two reductions keep the graph small:
//!
//! - **I-reduction**: the same residual met twice on one level is built once
//!   (hash consing, one table per level).
//! - **S-reduction**: a node whose two children are the same node is spliced
//!   out, and its parents are rewired to that child.
//!
//! The size of the result depends on the order. [`search::best_order`] tries
//! every cyclic rotation of the sorted order and keeps the smallest diagram.
//!
//! ## Basic Usage
//!
//! ```rust
//! use dnf_bdd::Diagram;
//!
//! // f = (A AND NOT B) OR C, decided in the order C, A, B
//! let d = Diagram::build("A!B + C", "CAB").unwrap();
//!
//! // Bit `i` assigns `order[i]`: C=0, A=1, B=0
//! assert!(d.evaluate("010").unwrap());
//! assert!(!d.evaluate("011").unwrap());
//!
//! // Let the search pick the order
//! let best = Diagram::with_best_order("A!B + C").unwrap();
//! assert!(best.size() <= d.size());
//! println!("order {} -> {} nodes", best.order(), best.size());
//! ```
//!
//! ## Core Components
//!
//! - **[`formula`]**: parsing and validating formulas and orders.
//! - **[`restrict`]**: clause simplification after an assignment.
//! - **[`builder`]**: diagram construction with both reductions.
//! - **[`diagram`]**: the immutable result: size, evaluation, queries.
//! - **[`search`]**: order search over rotations.
//! - **[`oracle`]**: brute-force evaluation for cross-checking.
//!
//! ## Features
//!
//! - `parallel`: build the order-search candidates on the rayon thread pool.
//!   The chosen order is the same as without the feature. Run the test suite
//!   both ways:
//!
//! ```bash
//! cargo test
//! cargo test --features parallel
//! ```

pub mod builder;
pub mod debug;
pub mod diagram;
pub mod dot;
pub mod error;
pub mod formula;
pub mod generate;
pub mod literal;
pub mod node;
pub mod oracle;
pub mod reference;
pub mod restrict;
pub mod search;
pub mod storage;
pub mod subtable;
pub mod types;

pub use builder::build;
pub use diagram::Diagram;
pub use error::{Error, Result};
pub use oracle::evaluate_direct;
pub use search::best_order;
