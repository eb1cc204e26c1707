//! Player registry: the name-ordered tree that owns every player.
//!
//! All lookups during an action go through `PlayerRegistry::find`, which
//! returns a `PlayerHandle` into the tree. The rules engine and the scoring
//! pass only borrow the registry for the duration of a call.

mod node;
mod tree;

pub use node::{Node, NodeId};
pub use tree::{Iter, PlayerHandle, PlayerRegistry};
