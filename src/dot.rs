//! Diagram to DOT (Graphviz) conversion.
//!
//! The generated DOT output follows these conventions:
//! - **Terminal nodes** (0 and 1) are rendered as squares at the bottom (sink rank)
//! - **Decision nodes** are rendered as circles labeled with their variable,
//!   grouped by level
//! - **Edges**: solid lines are high edges, dashed lines are low edges
//!
//! ```
//! use dnf_bdd::Diagram;
//!
//! let d = Diagram::build("AB + C", "ABC").unwrap();
//! let dot = d.to_dot().unwrap();
//! assert!(dot.starts_with("graph {"));
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! ```

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::diagram::Diagram;
use crate::reference::NodeRef;

/// Configuration options for DOT output generation.
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for decision nodes (default: "circle")
    pub node_shape: &'static str,
    /// Shape for terminal nodes (default: "square")
    pub terminal_shape: &'static str,
    /// Style for high edges (default: "solid")
    pub high_edge_style: &'static str,
    /// Style for low edges (default: "dashed")
    pub low_edge_style: &'static str,
    /// Whether to show each node's residual formula under its variable (default: false)
    pub show_residuals: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "circle",
            terminal_shape: "square",
            high_edge_style: "solid",
            low_edge_style: "dashed",
            show_residuals: false,
        }
    }
}

impl Diagram {
    /// Converts the diagram to DOT format with the default configuration.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    /// Converts the diagram to DOT format.
    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "graph {{")?;
        writeln!(dot, "node [shape={}];", config.node_shape)?;

        let nodes = self.descendants();

        writeln!(dot, "{{ rank=sink")?;
        for terminal in [NodeRef::ZERO, NodeRef::ONE] {
            if nodes.contains(&terminal) {
                writeln!(
                    dot,
                    "{} [shape={}, label=\"{}\"];",
                    terminal.index(),
                    config.terminal_shape,
                    terminal.index()
                )?;
            }
        }
        writeln!(dot, "}}")?;

        let mut levels = BTreeMap::<usize, Vec<NodeRef>>::new();
        for &r in nodes.iter().filter(|r| !r.is_terminal()) {
            levels.entry(self.node(r).level.index()).or_default().push(r);
        }

        for (&level, refs) in levels.iter_mut() {
            refs.sort();
            let var = self.order().vars()[level];
            writeln!(dot, "{{ rank=same")?;
            for &r in refs.iter() {
                if config.show_residuals {
                    writeln!(dot, "{} [label=\"{}\\n{}\"];", r.index(), var, self.node(r).residual)?;
                } else {
                    writeln!(dot, "{} [label=\"{}\"];", r.index(), var)?;
                }
            }
            writeln!(dot, "}}")?;
        }

        for refs in levels.values() {
            for &r in refs {
                let node = self.node(r);
                if let Some((low, high)) = node.children() {
                    writeln!(dot, "{} -- {} [style={}];", r.index(), high.index(), config.high_edge_style)?;
                    writeln!(dot, "{} -- {} [style={}];", r.index(), low.index(), config.low_edge_style)?;
                }
            }
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_dot_basic() {
        let d = Diagram::build("A!B", "AB").unwrap();
        let dot = d.to_dot().unwrap();

        assert!(dot.starts_with("graph {"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("label=\"A\""));
        assert!(dot.contains("label=\"B\""));
        assert_eq!(dot.matches(" -- ").count(), 4);
    }

    #[test]
    fn test_to_dot_constant() {
        let d = Diagram::build("A + !A", "A").unwrap();
        let dot = d.to_dot().unwrap();
        assert!(dot.contains("1 [shape=square, label=\"1\"];"));
        assert!(!dot.contains("0 [shape=square"));
        assert!(!dot.contains(" -- "));
    }

    #[test]
    fn test_to_dot_with_residuals() {
        let d = Diagram::build("AB + C", "ABC").unwrap();
        let config = DotConfig {
            show_residuals: true,
            ..DotConfig::default()
        };
        let dot = d.to_dot_with_config(&config).unwrap();
        assert!(dot.contains("AB+C"));
    }
}
