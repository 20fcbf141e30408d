use crate::NodeId;

pub type Result<T> = std::result::Result<T, DomError>;

/// Errors raised by tree mutation and selector parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Invalid selector: {0:?}")]
    InvalidSelector(String),

    #[error("Unknown node {0}")]
    UnknownNode(NodeId),

    /// The child is the parent itself or one of its ancestors.
    #[error("Cannot insert {child} into {parent}: would create a cycle")]
    HierarchyRequest { parent: NodeId, child: NodeId },
}
