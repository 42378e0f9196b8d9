//! Style mirroring: copy the text-metric-relevant style of a control onto a
//! probe so both render text identically.
//!
//! Properties come from an explicit allow-list instead of enumerating
//! whatever the host's style object happens to expose. Geometry the probe
//! sets for itself (position, offsets, width, height, display, white-space)
//! is deliberately absent.

use crate::host::{Host, StyleDeclarations, StyleSource};
use log::{debug, trace};

/// Properties that influence how text inside a box is laid out.
pub const MIRRORED_PROPERTIES: &[&str] = &[
    // fonts
    "font-family",
    "font-size",
    "font-style",
    "font-weight",
    "font-variant",
    "font-stretch",
    "font-kerning",
    "font-feature-settings",
    "font-variation-settings",
    "font-size-adjust",
    "line-height",
    // text
    "letter-spacing",
    "word-spacing",
    "text-transform",
    "text-indent",
    "text-rendering",
    "tab-size",
    "word-break",
    "overflow-wrap",
    "hyphens",
    "direction",
    "writing-mode",
    "unicode-bidi",
    // box
    "box-sizing",
    "padding-top",
    "padding-right",
    "padding-bottom",
    "padding-left",
    "border-top-width",
    "border-right-width",
    "border-bottom-width",
    "border-left-width",
    "border-top-style",
    "border-right-style",
    "border-bottom-style",
    "border-left-style",
    "overflow-x",
    "overflow-y",
];

/// Owned copy of the mirrored properties of one element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleSnapshot {
    source: Option<StyleSource>,
    entries: Vec<(&'static str, String)>,
}

impl StyleSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The source the snapshot was read from; `None` when no source existed.
    pub fn source(&self) -> Option<StyleSource> {
        self.source
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.entries.iter().map(|(n, v)| (*n, v.as_str()))
    }
}

/// Read the allow-listed properties from one style source.
///
/// Absent, empty and non-string values are skipped, as is any property the
/// host refuses to hand out.
pub fn snapshot_from(source: StyleSource, decls: &dyn StyleDeclarations) -> StyleSnapshot {
    let mut entries = Vec::with_capacity(MIRRORED_PROPERTIES.len());
    for &name in MIRRORED_PROPERTIES {
        match decls.property_value(name) {
            Ok(Some(value)) => {
                let value = value.trim();
                if !value.is_empty() {
                    entries.push((name, value.to_string()));
                }
            }
            Ok(None) => {}
            Err(err) => {
                trace!(target: "autosize.mirror", "skipping {name}: {err}");
            }
        }
    }
    StyleSnapshot {
        source: Some(source),
        entries,
    }
}

/// Snapshot `target`'s style from the first source the host provides.
pub fn capture<H: Host>(host: &H, target: &H::Node) -> StyleSnapshot {
    for source in StyleSource::FALLBACK_ORDER {
        if let Some(decls) = host.style_declarations(target, source) {
            let snapshot = snapshot_from(source, decls.as_ref());
            trace!(
                target: "autosize.mirror",
                "captured {} properties from {source:?} style of {target:?}",
                snapshot.len()
            );
            return snapshot;
        }
    }
    debug!(target: "autosize.mirror", "no style source for {target:?}; probe stays unstyled");
    StyleSnapshot::empty()
}

/// Write every snapshot entry onto `node`. Returns how many were applied.
pub fn apply<H: Host>(host: &mut H, node: &H::Node, snapshot: &StyleSnapshot) -> usize {
    let mut applied = 0;
    for (name, value) in snapshot.iter() {
        match host.set_style_property(node, name, value) {
            Ok(()) => applied += 1,
            Err(err) => trace!(target: "autosize.mirror", "cannot set {name}: {err}"),
        }
    }
    applied
}
