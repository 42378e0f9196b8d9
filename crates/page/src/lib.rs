//! Native page: an in-memory document, its style and layout engine, and the
//! auto-size context bound to it.
//!
//! [`PageHost`] implements the `autosize` host traits on top of `dom`,
//! `css` and `layout`. [`EngineProfile`] switches between a modern engine
//! and a legacy one (no `input` event, no computed style, scrollbar
//! allowance defect). [`Page`] adds simulated typing and an explicit tick.

mod host;
mod page;
mod profile;

pub use host::{DEFAULT_VIEWPORT, PageHost, ProbeStats};
pub use page::{Key, MAX_IDLE_TICKS, Page};
pub use profile::EngineProfile;

pub use dom::NodeId;
