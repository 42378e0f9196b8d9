//! [`PageHost`]: the measurement host backed by the native document, style
//! engine and layout.

use crate::profile::EngineProfile;
use autosize::{Error, EventHost, Host, StyleDeclarations, StyleSource};
use core_types::{EventKind, ListenerToken};
use css::{BoxSizing, ComputedStyle, Position, cascade, compute_style, format_px, is_text_control};
use dom::{Document, DomError, NodeId, NodeKind};
use layout::{BlockInput, BlockLayout, LayoutOptions, Rect, TextMeasurer, content_size, layout_block};
use log::trace;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

pub const DEFAULT_VIEWPORT: Rect = Rect {
    x: 0.0,
    y: 0.0,
    width: 1024.0,
    height: 768.0,
};

/// Counters over the probes a page has seen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProbeStats {
    pub created: u32,
    pub discarded: u32,
    /// Layout reads (`width`/`height`) taken on a probe.
    pub layout_reads: u32,
    /// Layout reads taken while the probe overlapped the viewport.
    pub visible_reads: u32,
}

#[derive(Default)]
struct StyleCache {
    version: u64,
    entries: HashMap<NodeId, ComputedStyle>,
}

fn dom_error(err: DomError) -> Error {
    match err {
        DomError::UnknownNode(_) | DomError::Removed(_) => Error::DetachedNode,
        other => Error::Host(other.to_string()),
    }
}

pub struct PageHost {
    doc: Document,
    measurer: Box<dyn TextMeasurer>,
    profile: EngineProfile,
    viewport: Rect,
    styles: RefCell<StyleCache>,
    probes: HashSet<NodeId>,
    stats: Cell<ProbeStats>,
}

impl PageHost {
    pub fn new(profile: EngineProfile, measurer: Box<dyn TextMeasurer>) -> Self {
        Self {
            doc: Document::new(),
            measurer,
            profile,
            viewport: DEFAULT_VIEWPORT,
            styles: RefCell::new(StyleCache::default()),
            probes: HashSet::new(),
            stats: Cell::new(ProbeStats::default()),
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn profile(&self) -> &EngineProfile {
        &self.profile
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn stats(&self) -> ProbeStats {
        self.stats.get()
    }

    /// Probes created but not yet discarded.
    pub fn live_probes(&self) -> usize {
        self.probes.len()
    }

    fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            legacy_scrollbar_allowance: self.profile.legacy_scrollbar_allowance,
        }
    }

    /// Resolved style of an element, cached until the document changes.
    pub fn computed_style(&self, id: NodeId) -> Option<ComputedStyle> {
        {
            let mut cache = self.styles.borrow_mut();
            if cache.version != self.doc.version() {
                cache.version = self.doc.version();
                cache.entries.clear();
            }
            if let Some(style) = cache.entries.get(&id) {
                return Some(style.clone());
            }
        }
        let specified = self.specified_style(id)?;
        let parent = self.doc.parent(id).and_then(|p| self.computed_style(p));
        let style = compute_style(&specified, parent.as_ref());
        self.styles.borrow_mut().entries.insert(id, style.clone());
        Some(style)
    }

    /// Cascaded longhands of an element, before computation.
    fn specified_style(&self, id: NodeId) -> Option<Vec<(String, String)>> {
        match self.doc.kind(id).ok()? {
            NodeKind::Element {
                name,
                attributes,
                style,
                ..
            } => Some(cascade(name, attributes, style, self.doc.stylesheet())),
            _ => None,
        }
    }

    /// What the element renders: a control's value or its text content.
    fn rendered_text(&self, id: NodeId, tag: &str) -> String {
        if !is_text_control(tag) {
            return self.doc.text_content(id);
        }
        let mut text = self.doc.value(id).unwrap_or_default().to_string();
        // the caret line after a final break stays open in a text area
        if tag == "textarea" && text.ends_with('\n') {
            text.push(' ');
        }
        text
    }

    /// Width available to `id`'s box from its containing block.
    fn containing_width(&self, id: NodeId, style: &ComputedStyle) -> f32 {
        if style.position == Position::Absolute {
            return self.viewport.width;
        }
        match self.doc.parent(id) {
            Some(parent) => match self.computed_style(parent) {
                Some(ps) => self.available_width(parent, &ps),
                None => self.viewport.width,
            },
            None => self.viewport.width,
        }
    }

    // Ancestors with an auto width are treated as filling their container.
    fn available_width(&self, id: NodeId, style: &ComputedStyle) -> f32 {
        match style.width {
            Some(w) => content_size(w, style.horizontal_chrome(), style.box_sizing),
            None => (self.containing_width(id, style) - style.horizontal_chrome()).max(0.0),
        }
    }

    pub fn layout(&self, id: NodeId) -> Option<BlockLayout> {
        let tag = self.doc.tag_name(id)?.to_string();
        let style = self.computed_style(id)?;
        let text = self.rendered_text(id, &tag);
        let layout = layout_block(
            self.measurer.as_ref(),
            BlockInput {
                style: &style,
                text: &text,
                is_text_area: tag == "textarea",
                containing_width: self.containing_width(id, &style),
            },
            self.layout_options(),
        );
        if self.probes.contains(&id) {
            self.record_probe_read(&style, &layout);
        }
        Some(layout)
    }

    fn record_probe_read(&self, style: &ComputedStyle, layout: &BlockLayout) {
        let rect = Rect {
            x: style.left.unwrap_or(0.0),
            y: style.top.unwrap_or(0.0),
            width: layout.border_box_width(style),
            height: layout.border_box_height(style),
        };
        let mut stats = self.stats.get();
        stats.layout_reads += 1;
        if rect.intersects(&self.viewport) {
            trace!(target: "page", "probe read while on screen at {rect:?}");
            stats.visible_reads += 1;
        }
        self.stats.set(stats);
    }

    fn chrome(&self, id: NodeId, horizontal: bool) -> f32 {
        match self.computed_style(id) {
            Some(s) if s.box_sizing == BoxSizing::BorderBox => {
                if horizontal {
                    s.horizontal_chrome()
                } else {
                    s.vertical_chrome()
                }
            }
            _ => 0.0,
        }
    }
}

/// Style source handed to the measurement core.
enum PageDecls<'a> {
    Computed(ComputedStyle, &'a EngineProfile),
    Current {
        specified: Vec<(String, String)>,
        computed: ComputedStyle,
        profile: &'a EngineProfile,
    },
    Inline(Vec<css::Declaration>, &'a EngineProfile),
}

impl PageDecls<'_> {
    fn profile(&self) -> &EngineProfile {
        match self {
            PageDecls::Computed(_, p) | PageDecls::Inline(_, p) => p,
            PageDecls::Current { profile, .. } => profile,
        }
    }
}

impl StyleDeclarations for PageDecls<'_> {
    fn property_value(&self, name: &str) -> Result<Option<String>, Error> {
        if self.profile().throws_on(name) {
            return Err(Error::PropertyAccess {
                property: name.to_string(),
            });
        }
        Ok(match self {
            PageDecls::Computed(style, _) => style.property_value(name),
            PageDecls::Current {
                specified,
                computed,
                ..
            } => specified
                .iter()
                .rev()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.clone())
                .or_else(|| computed.property_value(name)),
            PageDecls::Inline(decls, _) => decls
                .iter()
                .rev()
                .find(|d| d.name == name)
                .map(|d| d.value.clone()),
        })
    }
}

impl Host for PageHost {
    type Node = NodeId;

    fn style_declarations(
        &self,
        node: &NodeId,
        source: StyleSource,
    ) -> Option<Box<dyn StyleDeclarations + '_>> {
        let decls = match source {
            StyleSource::Computed if self.profile.computed_style => {
                PageDecls::Computed(self.computed_style(*node)?, &self.profile)
            }
            StyleSource::Current if self.profile.current_style => PageDecls::Current {
                specified: self.specified_style(*node)?,
                computed: self.computed_style(*node)?,
                profile: &self.profile,
            },
            StyleSource::Inline => {
                self.doc.tag_name(*node)?;
                PageDecls::Inline(
                    css::expand_shorthands(self.doc.inline_style(*node)),
                    &self.profile,
                )
            }
            _ => return None,
        };
        Some(Box::new(decls))
    }

    fn create_probe(&mut self) -> Result<NodeId, Error> {
        let probe = self.doc.create_element("div").map_err(dom_error)?;
        self.probes.insert(probe);
        let mut stats = self.stats.get();
        stats.created += 1;
        self.stats.set(stats);
        trace!(target: "page", "created probe {probe}");
        Ok(probe)
    }

    fn set_style_property(&mut self, node: &NodeId, name: &str, value: &str) -> Result<(), Error> {
        self.doc
            .set_style_property(*node, name, value)
            .map_err(dom_error)
    }

    fn set_text(&mut self, node: &NodeId, text: &str) -> Result<(), Error> {
        self.doc.set_text_content(*node, text).map_err(dom_error)
    }

    fn attach(&mut self, node: &NodeId) -> Result<(), Error> {
        let body = self.doc.body();
        self.doc.append_child(body, *node).map_err(dom_error)
    }

    fn discard(&mut self, node: &NodeId) {
        let removed = self.doc.remove(*node).is_ok();
        if self.probes.remove(node) && removed {
            let mut stats = self.stats.get();
            stats.discarded += 1;
            self.stats.set(stats);
        }
    }

    fn width(&self, node: &NodeId) -> f32 {
        self.layout(*node).map_or(0.0, |l| l.content_width)
    }

    fn height(&self, node: &NodeId) -> f32 {
        self.layout(*node).map_or(0.0, |l| l.content_height)
    }

    fn set_width(&mut self, node: &NodeId, px: f32) -> Result<(), Error> {
        let specified = px + self.chrome(*node, true);
        self.doc
            .set_style_property(*node, "width", &format_px(specified))
            .map_err(dom_error)
    }

    fn set_height(&mut self, node: &NodeId, px: f32) -> Result<(), Error> {
        let specified = px + self.chrome(*node, false);
        self.doc
            .set_style_property(*node, "height", &format_px(specified))
            .map_err(dom_error)
    }

    fn value(&self, node: &NodeId) -> String {
        self.doc.value(*node).unwrap_or_default().to_string()
    }
}

impl EventHost for PageHost {
    fn supports_input_event(&self) -> bool {
        self.profile.input_event
    }

    fn subscribe(
        &mut self,
        node: &NodeId,
        namespace: &str,
        events: &[EventKind],
        token: ListenerToken,
    ) -> Result<(), Error> {
        self.doc
            .add_listener(*node, namespace, events, token)
            .map_err(dom_error)
    }

    fn unsubscribe(&mut self, node: &NodeId, namespace: &str) {
        let removed = self.doc.remove_listeners(*node, namespace);
        trace!(target: "page", "dropped {removed} `{namespace}` listeners on {node}");
    }
}
