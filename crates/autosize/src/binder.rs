//! Change binding: keep bound controls sized while their value changes.
//!
//! Each bound control gets one subscription per namespace. Native `input`
//! notifications measure immediately; the legacy key/change notifications
//! fire before some engines have updated the value, so they queue the
//! measurement for the next scheduler tick instead.

use crate::config::{HeightConfig, HeightOverrides, WidthConfig, WidthOverrides};
use crate::error::Error;
use crate::host::EventHost;
use crate::measure;
use crate::quirks::{QuirkCache, Quirks};
use crate::schedule::TickQueue;
use core_types::{EventKind, ListenerToken};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Subscription namespace for width bindings.
pub const WIDTH_NAMESPACE: &str = "autowidth";

/// Subscription namespace for height bindings.
pub const HEIGHT_NAMESPACE: &str = "autoheight";

/// What a binding measures, with the config captured at bind time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Width(WidthConfig),
    Height(HeightConfig),
}

impl Mode {
    pub fn namespace(&self) -> &'static str {
        match self {
            Mode::Width(_) => WIDTH_NAMESPACE,
            Mode::Height(_) => HEIGHT_NAMESPACE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskState {
    /// No measurement is waiting.
    Idle,
    /// At least one measurement is queued for the next tick.
    Pending,
}

/// Outcome of routing one notification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Dispatch {
    /// Measured synchronously; carries the applied size in px.
    Measured(f32),
    /// Queued; the host must run [`AutoSize::run_deferred`] on its next tick.
    Deferred,
    /// Measurement failed and was logged; the control keeps its size.
    Failed,
    /// The token does not belong to a live binding.
    Unbound,
}

#[derive(Clone, Debug)]
struct Binding<N> {
    target: N,
    mode: Mode,
}

/// Per-page auto-sizing context.
///
/// Owns every binding of one document, the deferred-measurement queue and
/// the page's memoized [`Quirks`].
#[derive(Debug)]
pub struct AutoSize<N> {
    bindings: BTreeMap<ListenerToken, Binding<N>>,
    next_token: ListenerToken,
    queue: TickQueue,
    quirks: QuirkCache,
}

impl<N> Default for AutoSize<N> {
    fn default() -> Self {
        Self {
            bindings: BTreeMap::new(),
            next_token: ListenerToken(1),
            queue: TickQueue::new(),
            quirks: QuirkCache::new(),
        }
    }
}

impl<N: Clone + PartialEq + Debug> AutoSize<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind live width sizing to each target and size it now.
    ///
    /// Returns one token per target that was bound.
    pub fn apply_auto_width<H>(
        &mut self,
        host: &mut H,
        targets: &[N],
        overrides: WidthOverrides,
    ) -> Vec<ListenerToken>
    where
        H: EventHost<Node = N>,
    {
        self.bind_all(host, targets, Mode::Width(WidthConfig::merged(overrides)))
    }

    /// Bind live height sizing to each target and size it now.
    pub fn apply_auto_height<H>(
        &mut self,
        host: &mut H,
        targets: &[N],
        overrides: HeightOverrides,
    ) -> Vec<ListenerToken>
    where
        H: EventHost<Node = N>,
    {
        self.bind_all(host, targets, Mode::Height(HeightConfig::merged(overrides)))
    }

    fn bind_all<H>(&mut self, host: &mut H, targets: &[N], mode: Mode) -> Vec<ListenerToken>
    where
        H: EventHost<Node = N>,
    {
        let mut tokens = Vec::with_capacity(targets.len());
        for target in targets {
            match self.bind(host, target, mode) {
                Ok(token) => tokens.push(token),
                Err(err) => {
                    warn!(target: "autosize.binder", "cannot bind {target:?}: {err}");
                }
            }
        }
        tokens
    }

    /// Bind one target, replacing any earlier binding in the same namespace.
    pub fn bind<H>(&mut self, host: &mut H, target: &N, mode: Mode) -> Result<ListenerToken, Error>
    where
        H: EventHost<Node = N>,
    {
        let namespace = mode.namespace();
        self.unbind(host, target, namespace);

        let events: &[EventKind] = if host.supports_input_event() {
            &[EventKind::Input]
        } else {
            &EventKind::LEGACY
        };

        let token = self.next_token;
        self.next_token = token.next();
        host.subscribe(target, namespace, events, token)?;
        self.bindings.insert(
            token,
            Binding {
                target: target.clone(),
                mode,
            },
        );
        debug!(target: "autosize.binder", "bound {target:?} as {namespace} ({token:?})");

        self.measure_binding(host, token);
        Ok(token)
    }

    /// Remove `target`'s binding in `namespace`, if any.
    ///
    /// Returns `true` if a binding was removed.
    pub fn unbind<H>(&mut self, host: &mut H, target: &N, namespace: &str) -> bool
    where
        H: EventHost<Node = N>,
    {
        let stale: Vec<ListenerToken> = self
            .bindings
            .iter()
            .filter(|(_, b)| b.target == *target && b.mode.namespace() == namespace)
            .map(|(t, _)| *t)
            .collect();
        if stale.is_empty() {
            return false;
        }
        host.unsubscribe(target, namespace);
        for token in stale {
            self.bindings.remove(&token);
            self.queue.forget(token);
        }
        true
    }

    /// Route one notification delivered by the host for `token`.
    pub fn handle_event<H>(&mut self, host: &mut H, token: ListenerToken, kind: EventKind) -> Dispatch
    where
        H: EventHost<Node = N>,
    {
        if !self.bindings.contains_key(&token) {
            return Dispatch::Unbound;
        }
        if kind.is_deferred() {
            self.queue.push(token);
            return Dispatch::Deferred;
        }
        self.measure_binding(host, token)
    }

    /// Run every measurement queued before this tick. Returns how many ran.
    pub fn run_deferred<H>(&mut self, host: &mut H) -> usize
    where
        H: EventHost<Node = N>,
    {
        let batch = self.queue.take_batch();
        let mut ran = 0;
        for token in batch {
            if self.measure_binding(host, token) != Dispatch::Unbound {
                ran += 1;
            }
        }
        ran
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn state(&self, token: ListenerToken) -> Option<TaskState> {
        if !self.bindings.contains_key(&token) {
            return None;
        }
        Some(if self.queue.pending_for(token) > 0 {
            TaskState::Pending
        } else {
            TaskState::Idle
        })
    }

    pub fn mode(&self, token: ListenerToken) -> Option<Mode> {
        self.bindings.get(&token).map(|b| b.mode)
    }

    pub fn target(&self, token: ListenerToken) -> Option<&N> {
        self.bindings.get(&token).map(|b| &b.target)
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Quirks of this page, if a height measurement already detected them.
    pub fn quirks(&self) -> Option<Quirks> {
        self.quirks.get()
    }

    fn measure_binding<H>(&self, host: &mut H, token: ListenerToken) -> Dispatch
    where
        H: EventHost<Node = N>,
    {
        let Some(binding) = self.bindings.get(&token) else {
            return Dispatch::Unbound;
        };
        let result = match binding.mode {
            Mode::Width(config) => measure::auto_width(host, &binding.target, &config),
            Mode::Height(config) => {
                let quirks = self.quirks.get_or_detect(host);
                measure::auto_height(host, &binding.target, &config, quirks)
            }
        };
        match result {
            Ok(px) => Dispatch::Measured(px),
            Err(err) => {
                warn!(target: "autosize.binder", "measuring {:?} failed: {err}", binding.target);
                Dispatch::Failed
            }
        }
    }
}
