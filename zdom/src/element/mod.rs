mod builder;
mod data;

pub use builder::{el, ElementBuilder};
pub(crate) use data::ElementData;

/// Handle to an element stored in a [`Document`](crate::Document) arena.
///
/// Ids stay valid for the life of the document, including while the element
/// is detached from the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node#{}", self.0)
    }
}
