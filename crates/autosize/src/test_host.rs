//! Recording host used by the unit tests of this crate.
//!
//! Layout is deliberately crude: every character is `CHAR_WIDTH` wide, every
//! line `LINE_HEIGHT` tall, lines wrap on character count at a pinned width.

use crate::error::Error;
use crate::host::{EventHost, Host, StyleDeclarations, StyleSource};
use core_types::{EventKind, ListenerToken};
use std::cell::Cell;
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Op {
    CreateProbe(u32),
    Discard(u32),
    SetWidth(u32, f32),
    SetHeight(u32, f32),
    Subscribe(u32, String, Vec<EventKind>, ListenerToken),
    Unsubscribe(u32, String),
}

#[derive(Default)]
struct TestNode {
    probe: bool,
    attached: bool,
    discarded: bool,
    value: String,
    text: String,
    inline: Vec<(String, String)>,
    width: f32,
    height: f32,
}

pub(crate) struct TestHost {
    nodes: HashMap<u32, TestNode>,
    next_id: u32,
    ops: Vec<Op>,
    subscriptions: Vec<(u32, String, Vec<EventKind>, ListenerToken)>,
    probe_height_reads: Cell<u32>,
    last_probe: Option<u32>,
    pub computed_available: bool,
    pub current_available: bool,
    pub inline_available: bool,
    pub input_event: bool,
    pub scrollbar_bug: bool,
    pub fail_create_probe: bool,
    pub fail_attach: bool,
}

impl TestHost {
    pub const CHAR_WIDTH: f32 = 8.0;
    pub const LINE_HEIGHT: f32 = 16.0;

    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            next_id: 1,
            ops: Vec::new(),
            subscriptions: Vec::new(),
            probe_height_reads: Cell::new(0),
            last_probe: None,
            computed_available: true,
            current_available: true,
            inline_available: true,
            input_event: true,
            scrollbar_bug: false,
            fail_create_probe: false,
            fail_attach: false,
        }
    }

    fn alloc(&mut self, node: TestNode) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.insert(id, node);
        id
    }

    pub fn add_control(&mut self, value: &str) -> u32 {
        self.alloc(TestNode {
            value: value.to_string(),
            attached: true,
            width: 100.0,
            height: 20.0,
            ..TestNode::default()
        })
    }

    pub fn set_value(&mut self, node: u32, value: &str) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.value = value.to_string();
        }
    }

    pub fn set_inline(&mut self, node: u32, name: &str, value: &str) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.inline.retain(|(k, _)| k != name);
            n.inline.push((name.to_string(), value.to_string()));
        }
    }

    pub fn inline(&self, node: u32, name: &str) -> Option<&str> {
        self.nodes
            .get(&node)?
            .inline
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn probes_created(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::CreateProbe(_)))
            .count()
    }

    pub fn live_probes(&self) -> usize {
        self.nodes
            .values()
            .filter(|n| n.probe && !n.discarded)
            .count()
    }

    pub fn attached_probes(&self) -> usize {
        self.nodes
            .values()
            .filter(|n| n.probe && n.attached)
            .count()
    }

    pub fn probe_height_reads(&self) -> u32 {
        self.probe_height_reads.get()
    }

    pub fn last_probe_text(&self) -> Option<String> {
        Some(self.nodes.get(&self.last_probe?)?.text.clone())
    }

    pub fn last_probe_styles(&self) -> Vec<(String, String)> {
        self.last_probe
            .and_then(|id| self.nodes.get(&id))
            .map(|n| n.inline.clone())
            .unwrap_or_default()
    }

    pub fn last_probe_width(&self) -> Option<f32> {
        let id = self.last_probe?;
        let v = self.inline(id, "width")?;
        v.strip_suffix("px")?.parse().ok()
    }

    /// Tokens whose subscriptions match `kind` on `node`.
    pub fn fire(&self, node: u32, kind: EventKind) -> Vec<ListenerToken> {
        self.subscriptions
            .iter()
            .filter(|(n, _, events, _)| *n == node && events.contains(&kind))
            .map(|(_, _, _, t)| *t)
            .collect()
    }

    pub fn subscription_count(&self, node: u32) -> usize {
        self.subscriptions.iter().filter(|(n, ..)| *n == node).count()
    }

    fn probe_lines(&self, node: &TestNode) -> usize {
        let text = node.text.strip_suffix('\n').unwrap_or(&node.text);
        if node.text.is_empty() {
            return 0;
        }
        let pinned = node
            .inline
            .iter()
            .rev()
            .find(|(k, _)| k == "width")
            .and_then(|(_, v)| v.strip_suffix("px")?.parse::<f32>().ok());
        let per_line = pinned.map(|w| ((w / Self::CHAR_WIDTH).floor() as usize).max(1));
        let mut lines = 0;
        for line in text.split('\n') {
            let n = line.chars().count();
            lines += match per_line {
                Some(cap) if n > cap => n.div_ceil(cap),
                _ => 1,
            };
        }
        let scrolling = node
            .inline
            .iter()
            .any(|(k, v)| k == "overflow-y" && v == "scroll");
        // A defective engine wraps the extended detection string.
        if self.scrollbar_bug && scrolling && text.ends_with('.') {
            lines += 1;
        }
        lines
    }
}

struct InlineDecls<'a>(&'a [(String, String)]);

impl StyleDeclarations for InlineDecls<'_> {
    fn property_value(&self, name: &str) -> Result<Option<String>, Error> {
        Ok(self
            .0
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone()))
    }
}

impl Host for TestHost {
    type Node = u32;

    fn style_declarations(
        &self,
        node: &u32,
        source: StyleSource,
    ) -> Option<Box<dyn StyleDeclarations + '_>> {
        let available = match source {
            StyleSource::Computed => self.computed_available,
            StyleSource::Current => self.current_available,
            StyleSource::Inline => self.inline_available,
        };
        if !available {
            return None;
        }
        let n = self.nodes.get(node)?;
        Some(Box::new(InlineDecls(&n.inline)))
    }

    fn create_probe(&mut self) -> Result<u32, Error> {
        if self.fail_create_probe {
            return Err(Error::Unsupported("probe creation"));
        }
        let id = self.alloc(TestNode {
            probe: true,
            ..TestNode::default()
        });
        self.ops.push(Op::CreateProbe(id));
        self.last_probe = Some(id);
        Ok(id)
    }

    fn set_style_property(&mut self, node: &u32, name: &str, value: &str) -> Result<(), Error> {
        self.set_inline(*node, name, value);
        Ok(())
    }

    fn set_text(&mut self, node: &u32, text: &str) -> Result<(), Error> {
        let n = self.nodes.get_mut(node).ok_or(Error::DetachedNode)?;
        n.text = text.to_string();
        Ok(())
    }

    fn attach(&mut self, node: &u32) -> Result<(), Error> {
        if self.fail_attach {
            return Err(Error::Host("attach refused".into()));
        }
        let n = self.nodes.get_mut(node).ok_or(Error::DetachedNode)?;
        n.attached = true;
        Ok(())
    }

    fn discard(&mut self, node: &u32) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.attached = false;
            n.discarded = true;
        }
        self.ops.push(Op::Discard(*node));
    }

    fn width(&self, node: &u32) -> f32 {
        let Some(n) = self.nodes.get(node) else {
            return 0.0;
        };
        if !n.probe {
            return n.width;
        }
        if let Some(px) = self.inline(*node, "width").and_then(|v| v.strip_suffix("px")?.parse().ok()) {
            return px;
        }
        let widest = n.text.split('\n').map(|l| l.chars().count()).max().unwrap_or(0);
        widest as f32 * Self::CHAR_WIDTH
    }

    fn height(&self, node: &u32) -> f32 {
        let Some(n) = self.nodes.get(node) else {
            return 0.0;
        };
        if !n.probe {
            return n.height;
        }
        self.probe_height_reads.set(self.probe_height_reads.get() + 1);
        self.probe_lines(n) as f32 * Self::LINE_HEIGHT
    }

    fn set_width(&mut self, node: &u32, px: f32) -> Result<(), Error> {
        let probe = {
            let n = self.nodes.get_mut(node).ok_or(Error::DetachedNode)?;
            n.width = px;
            n.probe
        };
        if probe {
            self.set_inline(*node, "width", &format!("{px}px"));
        }
        self.ops.push(Op::SetWidth(*node, px));
        Ok(())
    }

    fn set_height(&mut self, node: &u32, px: f32) -> Result<(), Error> {
        let n = self.nodes.get_mut(node).ok_or(Error::DetachedNode)?;
        n.height = px;
        self.ops.push(Op::SetHeight(*node, px));
        Ok(())
    }

    fn value(&self, node: &u32) -> String {
        self.nodes
            .get(node)
            .map(|n| n.value.clone())
            .unwrap_or_default()
    }
}

impl EventHost for TestHost {
    fn supports_input_event(&self) -> bool {
        self.input_event
    }

    fn subscribe(
        &mut self,
        node: &u32,
        namespace: &str,
        events: &[EventKind],
        token: ListenerToken,
    ) -> Result<(), Error> {
        if !self.nodes.contains_key(node) {
            return Err(Error::DetachedNode);
        }
        self.subscriptions
            .push((*node, namespace.to_string(), events.to_vec(), token));
        self.ops.push(Op::Subscribe(
            *node,
            namespace.to_string(),
            events.to_vec(),
            token,
        ));
        Ok(())
    }

    fn unsubscribe(&mut self, node: &u32, namespace: &str) {
        self.subscriptions
            .retain(|(n, ns, ..)| !(*n == *node && ns == namespace));
        self.ops.push(Op::Unsubscribe(*node, namespace.to_string()));
    }
}
