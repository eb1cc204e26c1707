//! Name-ordered player tree.
//!
//! `PlayerRegistry` is an unbalanced binary search tree keyed by player
//! name (byte-wise lexicographic order). Nodes are stored in a flat arena
//! and linked by `NodeId`; freed slots are recycled on the next insert.
//!
//! The registry is the single owner of every `Player`. Lookups hand out a
//! `PlayerHandle`, which stays valid until the next insert or remove. Two
//! handles are equal exactly when they refer to the same live player, so
//! rules that forbid self-targeting compare handles, not names.
//!
//! Worst-case depth is linear in the number of players; the tree is never
//! rebalanced.

use std::cmp::Ordering;

use tracing::trace;

use super::node::{Node, NodeId};
use crate::core::{Player, TeamMap};

/// Transient reference to a player stored in the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlayerHandle(NodeId);

/// Binary search tree of players keyed by name.
///
/// ## Example
///
/// ```
/// use wizard_league::core::{Player, TeamId};
/// use wizard_league::registry::PlayerRegistry;
///
/// let mut registry = PlayerRegistry::new();
/// registry.insert(Player::new("Merlin", TeamId::new(0), 300, true)).unwrap();
/// registry.insert(Player::new("Alda", TeamId::new(1), 200, true)).unwrap();
///
/// let merlin = registry.find("Merlin").unwrap();
/// registry.get_mut(merlin).unwrap().freeze();
/// assert!(registry.get(merlin).unwrap().is_frozen());
///
/// let names: Vec<_> = registry.iter().map(|p| p.name()).collect();
/// assert_eq!(names, vec!["Alda", "Merlin"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PlayerRegistry {
    /// Node arena. `None` marks a free slot.
    nodes: Vec<Option<Node>>,

    /// Free slots available for reuse.
    free: Vec<NodeId>,

    /// Root of the tree.
    root: Option<NodeId>,

    /// Number of live players.
    len: usize,
}

impl PlayerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // === Arena ===

    // Tree links only point at live slots, so a `None` from these
    // accessors is treated as the end of a path.

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index()).and_then(Option::as_mut)
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        if let Some(id) = self.free.pop() {
            if let Some(slot) = self.nodes.get_mut(id.index()) {
                *slot = Some(node);
                return id;
            }
        }

        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(Some(node));
        id
    }

    fn release(&mut self, id: NodeId) -> Option<Node> {
        let node = self.nodes.get_mut(id.index())?.take()?;
        self.free.push(id);
        Some(node)
    }

    // === Insert / Find ===

    /// Insert a player, taking ownership.
    ///
    /// If a player with the same name already exists the registry is left
    /// unchanged and the player is handed back in `Err`.
    pub fn insert(&mut self, player: Player) -> Result<PlayerHandle, Player> {
        let mut parent: Option<(NodeId, Ordering)> = None;
        let mut link = self.root;

        while let Some(id) = link {
            let Some(node) = self.node(id) else { break };
            let ord = player.name().cmp(node.player.name());
            link = match ord {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Err(player),
            };
            parent = Some((id, ord));
        }

        let id = self.alloc(Node::leaf(player));
        match parent {
            None => self.root = Some(id),
            Some((p, ord)) => {
                if let Some(node) = self.node_mut(p) {
                    if ord == Ordering::Less {
                        node.left = Some(id);
                    } else {
                        node.right = Some(id);
                    }
                }
            }
        }

        self.len += 1;
        Ok(PlayerHandle(id))
    }

    /// Find a player by exact name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<PlayerHandle> {
        let mut link = self.root;

        while let Some(id) = link {
            let node = self.node(id)?;
            link = match name.cmp(node.player.name()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(PlayerHandle(id)),
            };
        }

        None
    }

    /// Check if a player with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Borrow the player behind a handle.
    ///
    /// Returns `None` if the handle's node has since been removed.
    #[must_use]
    pub fn get(&self, handle: PlayerHandle) -> Option<&Player> {
        self.nodes
            .get(handle.0.index())
            .and_then(Option::as_ref)
            .map(|node| &node.player)
    }

    /// Mutably borrow the player behind a handle.
    pub fn get_mut(&mut self, handle: PlayerHandle) -> Option<&mut Player> {
        self.nodes
            .get_mut(handle.0.index())
            .and_then(Option::as_mut)
            .map(|node| &mut node.player)
    }

    /// Find a player by name and borrow it.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&Player> {
        self.find(name).and_then(|h| self.get(h))
    }

    // === Remove ===

    /// Remove the player with this name and return it.
    ///
    /// Uses standard BST deletion: a node with at most one child is
    /// replaced by that child; a node with two children takes the player of
    /// its in-order successor (the minimum of its right subtree), and the
    /// successor node is spliced out of the right subtree.
    ///
    /// Returns `None` and leaves the tree untouched if the name is absent.
    pub fn remove(&mut self, name: &str) -> Option<Player> {
        let mut removed = None;
        self.root = self.remove_from(self.root, name, &mut removed);

        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    fn remove_from(
        &mut self,
        link: Option<NodeId>,
        name: &str,
        removed: &mut Option<Player>,
    ) -> Option<NodeId> {
        let id = link?;
        let Some(node) = self.node(id) else { return link };
        let (left, right) = (node.left, node.right);

        match name.cmp(node.player.name()) {
            Ordering::Less => {
                let new_left = self.remove_from(left, name, removed);
                if let Some(node) = self.node_mut(id) {
                    node.left = new_left;
                }
                Some(id)
            }
            Ordering::Greater => {
                let new_right = self.remove_from(right, name, removed);
                if let Some(node) = self.node_mut(id) {
                    node.right = new_right;
                }
                Some(id)
            }
            Ordering::Equal => match (left, right) {
                (None, child) | (child, None) => {
                    *removed = self.release(id).map(|node| node.player);
                    child
                }
                (Some(_), Some(right)) => {
                    let (new_right, successor) = self.detach_min(right);
                    let promoted = self.release(successor).map(|node| node.player);
                    if let (Some(promoted), Some(node)) = (promoted, self.node_mut(id)) {
                        *removed = Some(std::mem::replace(&mut node.player, promoted));
                        node.right = new_right;
                    }
                    Some(id)
                }
            },
        }
    }

    /// Unlink the minimum node of a subtree.
    ///
    /// Returns the new subtree root and the detached node.
    fn detach_min(&mut self, id: NodeId) -> (Option<NodeId>, NodeId) {
        let Some(node) = self.node(id) else { return (None, id) };
        match (node.left, node.right) {
            (None, right) => (right, id),
            (Some(left), _) => {
                let (new_left, min) = self.detach_min(left);
                if let Some(node) = self.node_mut(id) {
                    node.left = new_left;
                }
                (Some(id), min)
            }
        }
    }

    // === Traversal ===

    fn leftmost(&self, from: NodeId) -> NodeId {
        let mut current = from;
        while let Some(left) = self.node(current).and_then(|node| node.left) {
            current = left;
        }
        current
    }

    fn rightmost(&self, from: NodeId) -> NodeId {
        let mut current = from;
        while let Some(right) = self.node(current).and_then(|node| node.right) {
            current = right;
        }
        current
    }

    /// Player with the smallest name.
    #[must_use]
    pub fn min(&self) -> Option<&Player> {
        let root = self.root?;
        self.node(self.leftmost(root)).map(|node| &node.player)
    }

    /// Player with the largest name.
    #[must_use]
    pub fn max(&self) -> Option<&Player> {
        let root = self.root?;
        self.node(self.rightmost(root)).map(|node| &node.player)
    }

    /// Add every player's power into its team's accumulator.
    ///
    /// Visits each live node exactly once. Players whose team has no slot in
    /// `teams` are skipped.
    pub fn collect_power(&self, teams: &mut TeamMap<u32>) {
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();

        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else { continue };
            if let Some(acc) = teams.get_mut(node.player.team()) {
                *acc += u32::from(node.player.power());
            }
            stack.extend(node.left);
            stack.extend(node.right);
        }
    }

    /// Iterate over players in ascending name order.
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter {
            registry: self,
            stack: Vec::new(),
        };
        iter.push_left(self.root);
        iter
    }

    /// Height of the tree (0 when empty).
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();

        while let Some((id, level)) = stack.pop() {
            deepest = deepest.max(level);
            let Some(node) = self.node(id) else { continue };
            stack.extend(node.left.map(|l| (l, level + 1)));
            stack.extend(node.right.map(|r| (r, level + 1)));
        }

        deepest
    }

    /// Emit the tree shape at trace level, one event per node in pre-order.
    pub fn trace_structure(&self) {
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|r| (r, 0)).into_iter().collect();

        while let Some((id, level)) = stack.pop() {
            let Some(node) = self.node(id) else { continue };
            trace!(name = node.player.name(), level, power = node.player.power(), "registry node");
            stack.extend(node.right.map(|r| (r, level + 1)));
            stack.extend(node.left.map(|l| (l, level + 1)));
        }
    }
}

/// In-order iterator over a registry.
pub struct Iter<'a> {
    registry: &'a PlayerRegistry,
    stack: Vec<NodeId>,
}

impl<'a> Iter<'a> {
    fn push_left(&mut self, mut link: Option<NodeId>) {
        let registry = self.registry;
        while let Some(id) = link {
            let Some(node) = registry.node(id) else { break };
            self.stack.push(id);
            link = node.left;
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Player;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let registry = self.registry;
        let node = registry.node(id)?;
        self.push_left(node.right);
        Some(&node.player)
    }
}

impl<'a> IntoIterator for &'a PlayerRegistry {
    type Item = &'a Player;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
