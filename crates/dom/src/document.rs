use crate::error::DomError;
use crate::{Listener, NodeId, NodeKind};
use core_types::{EventKind, ListenerToken};
use css::{Declaration, Stylesheet, matches_selector, parse_declarations, parse_selector};
use log::trace;

struct NodeRecord {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    listeners: Vec<Listener>,
}

impl NodeRecord {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            listeners: Vec::new(),
        }
    }

    fn allows_children(&self) -> bool {
        !matches!(self.kind, NodeKind::Text { .. })
    }
}

/// One arena slot. `record` is `None` while the slot is vacant.
struct Slot {
    generation: u32,
    record: Option<NodeRecord>,
}

/// In-memory document: an arena of nodes plus the author stylesheet.
///
/// Removing a node drops its record and frees the slot for the next node
/// created. Ids carry the slot's generation, so a stale id answers every
/// access with [`DomError::Removed`] even after its slot is reused.
pub struct Document {
    nodes: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
    body: NodeId,
    stylesheet: Stylesheet,
    version: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document with a `<body>`.
    pub fn new() -> Self {
        let root = NodeId::new(0, 0);
        let body = NodeId::new(1, 0);
        let mut html = NodeRecord::new(NodeKind::Document);
        html.children.push(body);
        let mut body_record = NodeRecord::new(NodeKind::Element {
            name: "body".to_string(),
            attributes: Vec::new(),
            style: Vec::new(),
            value: String::new(),
        });
        body_record.parent = Some(root);
        Self {
            nodes: vec![
                Slot {
                    generation: 0,
                    record: Some(html),
                },
                Slot {
                    generation: 0,
                    record: Some(body_record),
                },
            ],
            free: Vec::new(),
            root,
            body,
            stylesheet: Stylesheet::default(),
            version: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Bumped on every mutation that can change style or layout.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }

    /// Append the rules of `css` to the author stylesheet.
    pub fn add_stylesheet(&mut self, css: &str) {
        self.stylesheet.extend(css::parse_stylesheet(css));
        self.touch();
    }

    pub fn create_element(&mut self, name: &str) -> Result<NodeId, DomError> {
        self.insert(NodeKind::Element {
            name: name.to_ascii_lowercase(),
            attributes: Vec::new(),
            style: Vec::new(),
            value: String::new(),
        })
    }

    pub fn create_text(&mut self, text: &str) -> Result<NodeId, DomError> {
        self.insert(NodeKind::Text {
            text: text.to_string(),
        })
    }

    fn insert(&mut self, kind: NodeKind) -> Result<NodeId, DomError> {
        let record = Some(NodeRecord::new(kind));
        if let Some(index) = self.free.pop() {
            let slot = &mut self.nodes[index as usize];
            slot.record = record;
            return Ok(NodeId::new(index, slot.generation));
        }
        let index = u32::try_from(self.nodes.len()).map_err(|_| DomError::ArenaFull)?;
        self.nodes.push(Slot {
            generation: 0,
            record,
        });
        Ok(NodeId::new(index, 0))
    }

    /// Nodes currently alive, the root and body included.
    pub fn live_count(&self) -> usize {
        self.nodes.iter().filter(|s| s.record.is_some()).count()
    }

    /// Slots the arena holds, live or vacant.
    pub fn slot_count(&self) -> usize {
        self.nodes.len()
    }

    fn touch(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    fn record(&self, id: NodeId) -> Result<&NodeRecord, DomError> {
        let slot = self.nodes.get(id.index()).ok_or(DomError::UnknownNode(id))?;
        if slot.generation != id.generation() {
            return Err(DomError::Removed(id));
        }
        slot.record.as_ref().ok_or(DomError::Removed(id))
    }

    fn record_mut(&mut self, id: NodeId) -> Result<&mut NodeRecord, DomError> {
        let slot = self
            .nodes
            .get_mut(id.index())
            .ok_or(DomError::UnknownNode(id))?;
        if slot.generation != id.generation() {
            return Err(DomError::Removed(id));
        }
        slot.record.as_mut().ok_or(DomError::Removed(id))
    }

    pub fn is_live(&self, id: NodeId) -> bool {
        self.record(id).is_ok()
    }

    /// Whether `id` is in the tree under the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == self.root {
                return true;
            }
            current = self.record(node).ok().and_then(|r| r.parent);
        }
        false
    }

    pub fn kind(&self, id: NodeId) -> Result<&NodeKind, DomError> {
        Ok(&self.record(id)?.kind)
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id).ok()? {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.record(id).ok()?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.record(id).map(|r| r.children.as_slice()).unwrap_or(&[])
    }

    /// Move `child` to the end of `parent`'s children, detaching it from
    /// its current parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if parent == child || self.is_descendant(child, parent) {
            return Err(DomError::CycleDetected { parent, child });
        }
        if !self.record(parent)?.allows_children() {
            return Err(DomError::InvalidParent(parent));
        }
        self.record(child)?;
        self.detach(child)?;
        self.record_mut(parent)?.children.push(child);
        self.record_mut(child)?.parent = Some(parent);
        self.touch();
        Ok(())
    }

    /// Take `id` out of its parent's children. The node stays usable.
    pub fn detach(&mut self, id: NodeId) -> Result<(), DomError> {
        let Some(parent) = self.record_mut(id)?.parent.take() else {
            return Ok(());
        };
        if let Ok(p) = self.record_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        self.touch();
        Ok(())
    }

    /// Detach `id` and retire it with its whole subtree, listeners included.
    pub fn remove(&mut self, id: NodeId) -> Result<(), DomError> {
        if id == self.root {
            return Err(DomError::InvalidParent(id));
        }
        self.detach(id)?;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(slot) = self.nodes.get_mut(current.index()) else {
                continue;
            };
            if slot.generation != current.generation() {
                continue;
            }
            let Some(record) = slot.record.take() else {
                continue;
            };
            stack.extend(record.children);
            // a slot whose generation cannot advance any further is retired
            if let Some(next) = slot.generation.checked_add(1) {
                slot.generation = next;
                self.free.push(current.slot_index());
            }
        }
        trace!(target: "dom", "removed subtree at {id}");
        self.touch();
        Ok(())
    }

    fn is_descendant(&self, ancestor: NodeId, maybe_descendant: NodeId) -> bool {
        let mut stack: Vec<NodeId> = self.children(ancestor).to_vec();
        while let Some(current) = stack.pop() {
            if current == maybe_descendant {
                return true;
            }
            stack.extend_from_slice(self.children(current));
        }
        false
    }

    /// Element ids of the subtree under `id`, in document order, `id` first.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if !self.is_live(current) {
                continue;
            }
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        match self.kind(id).ok()? {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .and_then(|(_, v)| v.as_deref()),
            _ => None,
        }
    }

    pub fn attributes(&self, id: NodeId) -> &[(String, Option<String>)] {
        match self.kind(id) {
            Ok(NodeKind::Element { attributes, .. }) => attributes,
            _ => &[],
        }
    }

    /// Set an attribute; `style` replaces the inline declarations.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let name = name.to_ascii_lowercase();
        let NodeKind::Element {
            attributes, style, ..
        } = &mut self.record_mut(id)?.kind
        else {
            return Err(DomError::WrongNodeKind(id));
        };
        if name == "style" {
            *style = parse_declarations(value);
        } else if let Some(slot) = attributes.iter_mut().find(|(k, _)| *k == name) {
            slot.1 = Some(value.to_string());
        } else {
            attributes.push((name, Some(value.to_string())));
        }
        self.touch();
        Ok(())
    }

    pub fn inline_style(&self, id: NodeId) -> &[Declaration] {
        match self.kind(id) {
            Ok(NodeKind::Element { style, .. }) => style,
            _ => &[],
        }
    }

    /// Serialized `style` attribute.
    pub fn style_attribute(&self, id: NodeId) -> String {
        css::serialize_declarations(self.inline_style(id))
    }

    /// Inline value of one property, as `element.style.getPropertyValue`.
    pub fn style_property(&self, id: NodeId, name: &str) -> Option<&str> {
        self.inline_style(id)
            .iter()
            .rev()
            .find(|d| d.name.eq_ignore_ascii_case(name))
            .map(|d| d.value.as_str())
    }

    /// `element.style.setProperty`: replaces in place, an empty value removes.
    pub fn set_style_property(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let NodeKind::Element { style, .. } = &mut self.record_mut(id)?.kind else {
            return Err(DomError::WrongNodeKind(id));
        };
        let decl = Declaration::new(name, value);
        if decl.value.is_empty() {
            style.retain(|d| d.name != decl.name);
        } else if let Some(slot) = style.iter_mut().find(|d| d.name == decl.name) {
            slot.value = decl.value;
        } else {
            style.push(decl);
        }
        self.touch();
        Ok(())
    }

    pub fn remove_style_property(&mut self, id: NodeId, name: &str) -> Result<(), DomError> {
        self.set_style_property(id, name, "")
    }

    /// Current value of a form control.
    pub fn value(&self, id: NodeId) -> Result<&str, DomError> {
        match self.kind(id)? {
            NodeKind::Element { value, .. } => Ok(value),
            _ => Err(DomError::WrongNodeKind(id)),
        }
    }

    pub fn set_value(&mut self, id: NodeId, text: &str) -> Result<(), DomError> {
        let NodeKind::Element { value, .. } = &mut self.record_mut(id)?.kind else {
            return Err(DomError::WrongNodeKind(id));
        };
        value.clear();
        value.push_str(text);
        self.touch();
        Ok(())
    }

    /// Concatenated text of every text node under `id`.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node in self.descendants(id) {
            if let Ok(NodeKind::Text { text }) = self.kind(node) {
                out.push_str(text);
            }
        }
        out
    }

    /// Replace the children of `id` with a single literal text node.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> Result<(), DomError> {
        if let NodeKind::Text { text: existing } = &mut self.record_mut(id)?.kind {
            existing.clear();
            existing.push_str(text);
            self.touch();
            return Ok(());
        }
        let old: Vec<NodeId> = self.children(id).to_vec();
        for child in old {
            self.remove(child)?;
        }
        if !text.is_empty() {
            let node = self.create_text(text)?;
            self.append_child(id, node)?;
        }
        self.touch();
        Ok(())
    }

    pub fn get_element_by_id(&self, wanted: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|n| self.attribute(*n, "id") == Some(wanted))
    }

    /// Connected elements matching a comma-separated list of simple
    /// selectors, in document order.
    pub fn query_selector_all(&self, selectors: &str) -> Vec<NodeId> {
        let parsed: Vec<_> = selectors.split(',').filter_map(parse_selector).collect();
        if parsed.is_empty() {
            return Vec::new();
        }
        self.descendants(self.root)
            .into_iter()
            .filter(|n| {
                let Some(name) = self.tag_name(*n) else {
                    return false;
                };
                let attrs = self.attributes(*n);
                parsed.iter().any(|s| matches_selector(name, attrs, s))
            })
            .collect()
    }

    pub fn add_listener(
        &mut self,
        id: NodeId,
        namespace: &str,
        events: &[EventKind],
        token: ListenerToken,
    ) -> Result<(), DomError> {
        self.record_mut(id)?.listeners.push(Listener {
            namespace: namespace.to_string(),
            events: events.to_vec(),
            token,
        });
        Ok(())
    }

    /// Drop every listener of `id` registered under `namespace`.
    pub fn remove_listeners(&mut self, id: NodeId, namespace: &str) -> usize {
        let Ok(record) = self.record_mut(id) else {
            return 0;
        };
        let before = record.listeners.len();
        record.listeners.retain(|l| l.namespace != namespace);
        before - record.listeners.len()
    }

    pub fn listeners(&self, id: NodeId) -> &[Listener] {
        self.record(id).map(|r| r.listeners.as_slice()).unwrap_or(&[])
    }

    /// Tokens to notify for `kind` on `id`, in registration order.
    pub fn listeners_for(&self, id: NodeId, kind: EventKind) -> Vec<ListenerToken> {
        self.listeners(id)
            .iter()
            .filter(|l| l.events.contains(&kind))
            .map(|l| l.token)
            .collect()
    }
}
