//! Arena-backed document model for the native page.

mod document;
mod error;

pub use document::Document;
pub use error::DomError;

use core_types::{EventKind, ListenerToken};
use css::Declaration;
use std::fmt;

/// Handle to a node: an arena slot plus the generation of its occupant.
///
/// Slots are reused after a node is removed; a handle to the old occupant
/// keeps answering [`DomError::Removed`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    slot: u32,
    generation: u32,
}

impl NodeId {
    pub(crate) const fn new(slot: u32, generation: u32) -> Self {
        Self { slot, generation }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.slot as usize
    }

    #[inline]
    pub(crate) fn slot_index(self) -> u32 {
        self.slot
    }

    #[inline]
    pub(crate) fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.generation == 0 {
            write!(f, "#{}", self.slot)
        } else {
            write!(f, "#{}.{}", self.slot, self.generation)
        }
    }
}

#[derive(Debug)]
pub enum NodeKind {
    Document,
    Element {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        /// Inline declarations, as written (shorthands unexpanded).
        style: Vec<Declaration>,
        /// Form control value; unused by other elements.
        value: String,
    },
    Text {
        text: String,
    },
}

/// One namespaced subscription on a node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Listener {
    pub namespace: String,
    pub events: Vec<EventKind>,
    pub token: ListenerToken,
}
