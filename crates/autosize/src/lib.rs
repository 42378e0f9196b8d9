//! # autosize
//!
//! Host-agnostic core for sizing text controls to their content.
//!
//! Given a single-line input or a multi-line text area, this crate measures
//! the width (or height) needed to show the control's current value plus a
//! padding allowance, and writes that size back to the control. Measurement
//! works by mirroring the control's style onto a throwaway offscreen probe
//! element, rendering the candidate text into it and reading the probe's
//! natural layout size.
//!
//! - [`AutoSize`]: per-page context that binds controls, reacts to value
//!   changes and owns the memoized [`Quirks`]
//! - [`measure`]: the width and height procedures themselves
//! - [`Host`] / [`EventHost`]: the seam to a document and its layout engine
//!
//! ## Design Principles
//!
//! The document, its style resolution and its layout engine are external
//! collaborators. This crate never touches a concrete DOM; the `page` crate
//! provides a native host and `autosize_web` provides a browser host.
//!
//! ## Example
//!
//! ```ignore
//! let mut sizer = AutoSize::new();
//! sizer.apply_auto_width(&mut host, &[input], WidthOverrides::default());
//! sizer.apply_auto_height(&mut host, &[textarea], HeightOverrides {
//!     padding_lines: Some(1),
//!     ..HeightOverrides::default()
//! });
//!
//! // Later, from the host's event loop:
//! if sizer.handle_event(&mut host, token, EventKind::KeyUp) == Dispatch::Deferred {
//!     // next tick
//!     sizer.run_deferred(&mut host);
//! }
//! ```

mod binder;
pub mod config;
mod error;
mod host;
pub mod measure;
pub mod mirror;
pub mod padding;
mod probe;
pub mod quirks;
mod schedule;

#[cfg(test)]
mod test_host;

pub use binder::{AutoSize, Dispatch, HEIGHT_NAMESPACE, Mode, TaskState, WIDTH_NAMESPACE};
pub use config::{HeightConfig, HeightOverrides, MAX_PADDING_COUNT, WidthConfig, WidthOverrides};
pub use error::Error;
pub use host::{EventHost, Host, StyleDeclarations, StyleSource};
pub use mirror::StyleSnapshot;
pub use probe::{OFFSCREEN_OFFSET, OffscreenProbe};
pub use quirks::{QuirkCache, Quirks};
pub use schedule::TickQueue;

pub use core_types::{EventKind, ListenerToken};
