//! Host traits: the seam between the measurement core and a concrete
//! document plus layout engine.
//!
//! # Design Principles
//!
//! - Node handles are cheap clones owned by the host (`u32` arena ids,
//!   `web_sys::HtmlElement` references, ...)
//! - Sizes are CSS px in content-box terms: `width`/`set_width` behave like
//!   jQuery's `.width()`, so hosts convert for `box-sizing: border-box`
//! - Layout reads take `&self`; a host that lays out lazily keeps its caches
//!   behind interior mutability

use crate::error::Error;
use core_types::{EventKind, ListenerToken};
use std::fmt::Debug;

/// Where a style snapshot is read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleSource {
    /// Fully resolved values (`getComputedStyle`).
    Computed,
    /// Engine-specific cascaded snapshot (legacy `currentStyle`).
    Current,
    /// The element's own inline declarations.
    Inline,
}

impl StyleSource {
    /// Order in which sources are tried; the first one a host provides wins.
    pub const FALLBACK_ORDER: [StyleSource; 3] =
        [StyleSource::Computed, StyleSource::Current, StyleSource::Inline];
}

/// Read access to one style source of one element.
pub trait StyleDeclarations {
    /// Returns `Ok(None)` when the property is absent or not string-valued.
    ///
    /// Returns `Err` when the host refuses access to this property; callers
    /// skip it and continue with the rest.
    fn property_value(&self, name: &str) -> Result<Option<String>, Error>;
}

/// Document and layout operations needed to measure a control.
pub trait Host {
    type Node: Clone + PartialEq + Debug;

    /// Returns `None` when this source is unavailable for the node.
    fn style_declarations(
        &self,
        node: &Self::Node,
        source: StyleSource,
    ) -> Option<Box<dyn StyleDeclarations + '_>>;

    /// Create a detached, unstyled block element to measure with.
    fn create_probe(&mut self) -> Result<Self::Node, Error>;

    fn set_style_property(&mut self, node: &Self::Node, name: &str, value: &str)
    -> Result<(), Error>;

    /// Replace the node's content with literal text (never parsed as markup).
    fn set_text(&mut self, node: &Self::Node, text: &str) -> Result<(), Error>;

    /// Append the node to the document body so it takes part in layout.
    fn attach(&mut self, node: &Self::Node) -> Result<(), Error>;

    /// Remove the node from the document and release it.
    ///
    /// Must be infallible: it runs from `Drop`.
    fn discard(&mut self, node: &Self::Node);

    /// Content-box width in CSS px.
    fn width(&self, node: &Self::Node) -> f32;

    /// Content-box height in CSS px.
    fn height(&self, node: &Self::Node) -> f32;

    fn set_width(&mut self, node: &Self::Node, px: f32) -> Result<(), Error>;

    fn set_height(&mut self, node: &Self::Node, px: f32) -> Result<(), Error>;

    /// Current textual value of a control.
    fn value(&self, node: &Self::Node) -> String;
}

/// Event subscription on top of [`Host`].
pub trait EventHost: Host {
    /// Whether the engine fires a native content-change (`input`) event.
    fn supports_input_event(&self) -> bool;

    /// Register `token` for `events` on `node` under `namespace`.
    fn subscribe(
        &mut self,
        node: &Self::Node,
        namespace: &str,
        events: &[EventKind],
        token: ListenerToken,
    ) -> Result<(), Error>;

    /// Drop every subscription on `node` registered under `namespace`.
    fn unsubscribe(&mut self, node: &Self::Node, namespace: &str);
}
