use crate::host::{PageHost, ProbeStats};
use crate::profile::EngineProfile;
use autosize::{AutoSize, Dispatch, HeightOverrides, Quirks, WidthOverrides};
use core_types::{EventKind, ListenerToken};
use dom::{DomError, NodeId};
use layout::{BlockLayout, FixedAdvanceMeasurer, TextMeasurer};
use log::{debug, trace};

/// Upper bound on ticks `run_until_idle` drives before giving up.
pub const MAX_IDLE_TICKS: usize = 64;

/// A keystroke delivered to a focused text control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
}

impl Key {
    fn apply(self, value: &mut String) {
        match self {
            Key::Char(c) => value.push(c),
            Key::Enter => value.push('\n'),
            Key::Backspace => {
                value.pop();
            }
        }
    }
}

/// One native page: a document with its layout engine plus the auto-size
/// context bound to it.
///
/// Events are simulated: typing updates the control's value and fires the
/// key/input events an engine of the page's profile would fire, in order.
/// Deferred measurements wait until [`Page::tick`].
pub struct Page {
    host: PageHost,
    sizer: AutoSize<NodeId>,
}

impl Page {
    pub fn new(profile: EngineProfile) -> Self {
        Self::with_measurer(profile, Box::new(FixedAdvanceMeasurer::default()))
    }

    pub fn with_measurer(profile: EngineProfile, measurer: Box<dyn TextMeasurer>) -> Self {
        Self {
            host: PageHost::new(profile, measurer),
            sizer: AutoSize::new(),
        }
    }

    pub fn host(&self) -> &PageHost {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut PageHost {
        &mut self.host
    }

    pub fn sizer(&self) -> &AutoSize<NodeId> {
        &self.sizer
    }

    pub fn stats(&self) -> ProbeStats {
        self.host.stats()
    }

    pub fn quirks(&self) -> Option<Quirks> {
        self.sizer.quirks()
    }

    pub fn add_stylesheet(&mut self, css: &str) {
        self.host.document_mut().add_stylesheet(css);
    }

    /// Append an element to the body.
    pub fn add_element(&mut self, tag: &str) -> Result<NodeId, DomError> {
        let doc = self.host.document_mut();
        let id = doc.create_element(tag)?;
        let body = doc.body();
        doc.append_child(body, id)?;
        Ok(id)
    }

    pub fn add_input(&mut self, value: &str) -> Result<NodeId, DomError> {
        let id = self.add_element("input")?;
        self.host.document_mut().set_value(id, value)?;
        Ok(id)
    }

    pub fn add_textarea(&mut self, value: &str) -> Result<NodeId, DomError> {
        let id = self.add_element("textarea")?;
        self.host.document_mut().set_value(id, value)?;
        Ok(id)
    }

    pub fn set_style(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.host.document_mut().set_style_property(id, name, value)
    }

    /// Set a value without firing any event, as a script would.
    pub fn set_value(&mut self, id: NodeId, value: &str) -> Result<(), DomError> {
        self.host.document_mut().set_value(id, value)
    }

    pub fn value(&self, id: NodeId) -> String {
        self.host.document().value(id).unwrap_or_default().to_string()
    }

    pub fn apply_auto_width(&mut self, targets: &[NodeId], overrides: WidthOverrides) -> Vec<ListenerToken> {
        self.sizer.apply_auto_width(&mut self.host, targets, overrides)
    }

    pub fn apply_auto_height(
        &mut self,
        targets: &[NodeId],
        overrides: HeightOverrides,
    ) -> Vec<ListenerToken> {
        self.sizer.apply_auto_height(&mut self.host, targets, overrides)
    }

    pub fn unbind(&mut self, target: NodeId, namespace: &str) -> bool {
        self.sizer.unbind(&mut self.host, &target, namespace)
    }

    /// Fire `kind` on `id`, running every handler registered for it.
    pub fn dispatch(&mut self, id: NodeId, kind: EventKind) -> Vec<Dispatch> {
        let tokens = self.host.document().listeners_for(id, kind);
        trace!(target: "page", "{} on {id} reaches {} handlers", kind.as_str(), tokens.len());
        tokens
            .into_iter()
            .map(|token| self.sizer.handle_event(&mut self.host, token, kind))
            .collect()
    }

    /// Route `kind` to a single binding, bypassing the document's listeners.
    pub fn notify(&mut self, token: ListenerToken, kind: EventKind) -> Dispatch {
        self.sizer.handle_event(&mut self.host, token, kind)
    }

    /// Deliver one keystroke: `keydown` sees the old value, then the value
    /// changes, then `input` (when the engine has it) and `keyup` fire.
    pub fn type_key(&mut self, id: NodeId, key: Key) -> Result<(), DomError> {
        self.dispatch(id, EventKind::KeyDown);
        let mut value = self.host.document().value(id)?.to_string();
        key.apply(&mut value);
        self.host.document_mut().set_value(id, &value)?;
        if self.host.profile().input_event {
            self.dispatch(id, EventKind::Input);
        }
        self.dispatch(id, EventKind::KeyUp);
        Ok(())
    }

    /// Type `text` one character at a time; `'\n'` is Enter.
    pub fn type_text(&mut self, id: NodeId, text: &str) -> Result<(), DomError> {
        for c in text.chars() {
            let key = if c == '\n' { Key::Enter } else { Key::Char(c) };
            self.type_key(id, key)?;
        }
        Ok(())
    }

    /// The control lost focus after its value changed.
    pub fn change(&mut self, id: NodeId) -> Vec<Dispatch> {
        self.dispatch(id, EventKind::Change)
    }

    /// One scheduler turn: run the measurements deferred so far.
    pub fn tick(&mut self) -> usize {
        self.sizer.run_deferred(&mut self.host)
    }

    /// Tick until nothing is pending. Returns the number of ticks taken.
    pub fn run_until_idle(&mut self) -> usize {
        let mut ticks = 0;
        while self.sizer.has_pending() && ticks < MAX_IDLE_TICKS {
            self.tick();
            ticks += 1;
        }
        if self.sizer.has_pending() {
            debug!(target: "page", "still pending after {ticks} ticks");
        }
        ticks
    }

    pub fn layout(&self, id: NodeId) -> Option<BlockLayout> {
        self.host.layout(id)
    }

    /// Content-box width of `id`.
    pub fn width(&self, id: NodeId) -> f32 {
        self.layout(id).map_or(0.0, |l| l.content_width)
    }

    /// Content-box height of `id`.
    pub fn height(&self, id: NodeId) -> f32 {
        self.layout(id).map_or(0.0, |l| l.content_height)
    }
}
