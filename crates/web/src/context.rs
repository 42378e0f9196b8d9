//! The page-wide auto-size context and its tick scheduling.
//!
//! A wasm instance serves one page, so the context lives in a thread-local
//! and is created on first use. Event closures re-enter it through
//! [`dispatch`].

use crate::host::WebHost;
use autosize::{AutoSize, Dispatch};
use core_types::{EventKind, ListenerToken};
use log::{trace, warn};
use std::cell::RefCell;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::HtmlElement;

pub(crate) struct WebContext {
    pub host: WebHost,
    pub sizer: AutoSize<HtmlElement>,
    tick_scheduled: bool,
}

thread_local! {
    static CONTEXT: RefCell<Option<WebContext>> = const { RefCell::new(None) };
}

/// Run `f` against the context, creating it on first use.
///
/// Returns `None` when no DOM is available or when called re-entrantly.
pub(crate) fn with_context<R>(f: impl FnOnce(&mut WebContext) -> R) -> Option<R> {
    CONTEXT.with(|cell| {
        let Ok(mut slot) = cell.try_borrow_mut() else {
            warn!(target: "autosize.web", "context is busy; call ignored");
            return None;
        };
        if slot.is_none() {
            match WebHost::new() {
                Ok(host) => {
                    *slot = Some(WebContext {
                        host,
                        sizer: AutoSize::new(),
                        tick_scheduled: false,
                    });
                }
                Err(err) => {
                    warn!(target: "autosize.web", "no DOM to size controls in: {err}");
                    return None;
                }
            }
        }
        slot.as_mut().map(f)
    })
}

/// Route one DOM event to its binding.
pub(crate) fn dispatch(token: ListenerToken, kind: EventKind) {
    let needs_tick = with_context(|ctx| {
        let outcome = ctx.sizer.handle_event(&mut ctx.host, token, kind);
        outcome == Dispatch::Deferred && !std::mem::replace(&mut ctx.tick_scheduled, true)
    });
    if needs_tick == Some(true) {
        schedule_tick();
    }
}

fn schedule_tick() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = Closure::once_into_js(run_tick);
    let scheduled =
        window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0);
    if let Err(err) = scheduled {
        warn!(target: "autosize.web", "cannot schedule tick: {err:?}");
        with_context(|ctx| ctx.tick_scheduled = false);
    }
}

fn run_tick() {
    let ran = with_context(|ctx| {
        ctx.tick_scheduled = false;
        ctx.sizer.run_deferred(&mut ctx.host)
    });
    trace!(target: "autosize.web", "tick ran {} measurements", ran.unwrap_or(0));
}
