//! Registry tree nodes.
//!
//! Nodes live in the registry's arena and refer to their children by
//! `NodeId` index.

use crate::core::Player;

/// Index into the registry node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the arena slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// One entry of the name-ordered tree.
#[derive(Clone, Debug)]
pub struct Node {
    /// The player stored here. Owned by the registry.
    pub player: Player,

    /// Subtree with names ordered before this one.
    pub left: Option<NodeId>,

    /// Subtree with names ordered after this one.
    pub right: Option<NodeId>,
}

impl Node {
    /// Create a leaf node.
    #[must_use]
    pub fn leaf(player: Player) -> Self {
        Self {
            player,
            left: None,
            right: None,
        }
    }
}
