use std::fmt::{Display, Formatter};

/// Handle of a node inside a diagram's storage.
///
/// The two terminals always occupy the first two slots, so [`NodeRef::ZERO`]
/// and [`NodeRef::ONE`] are valid in every diagram.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeRef(u32);

impl NodeRef {
    pub const ZERO: NodeRef = NodeRef(0);
    pub const ONE: NodeRef = NodeRef(1);

    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub const fn terminal(value: bool) -> Self {
        if value {
            Self::ONE
        } else {
            Self::ZERO
        }
    }

    /// Return the storage index of the reference.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn is_terminal(self) -> bool {
        self.0 <= 1
    }
}

impl Display for NodeRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.0)
    }
}
