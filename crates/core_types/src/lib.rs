/// Value-changing notifications a text control can emit.
///
/// `Input` is the native content-change event; the other three are the
/// fallback set used by engines that do not fire it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Input,
    KeyDown,
    KeyUp,
    Change,
}

impl EventKind {
    /// Fallback subscription set for engines without a native input event.
    pub const LEGACY: [EventKind; 3] = [EventKind::KeyDown, EventKind::KeyUp, EventKind::Change];

    /// DOM event type name.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Input => "input",
            EventKind::KeyDown => "keydown",
            EventKind::KeyUp => "keyup",
            EventKind::Change => "change",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            n if n.eq_ignore_ascii_case("input") => Some(EventKind::Input),
            n if n.eq_ignore_ascii_case("keydown") => Some(EventKind::KeyDown),
            n if n.eq_ignore_ascii_case("keyup") => Some(EventKind::KeyUp),
            n if n.eq_ignore_ascii_case("change") => Some(EventKind::Change),
            _ => None,
        }
    }

    /// Whether a handler must wait one scheduler tick before reading the value.
    pub fn is_deferred(self) -> bool {
        !matches!(self, EventKind::Input)
    }
}

/// Opaque handle that ties a host-side event subscription back to the
/// binding that owns it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerToken(pub u64);

impl ListenerToken {
    #[inline]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}
