use crate::NodeId;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DomError {
    UnknownNode(NodeId),
    /// The node was removed from the document and may not be reused.
    Removed(NodeId),
    WrongNodeKind(NodeId),
    InvalidParent(NodeId),
    CycleDetected { parent: NodeId, child: NodeId },
    /// Every slot index is taken.
    ArenaFull,
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomError::UnknownNode(id) => write!(f, "unknown node {}", id),
            DomError::Removed(id) => write!(f, "node {} was removed", id),
            DomError::WrongNodeKind(id) => write!(f, "node {} has the wrong kind", id),
            DomError::InvalidParent(id) => write!(f, "node {} cannot have children", id),
            DomError::CycleDetected { parent, child } => {
                write!(f, "appending {} to {} would create a cycle", child, parent)
            }
            DomError::ArenaFull => f.write_str("node arena is full"),
        }
    }
}

impl std::error::Error for DomError {}
