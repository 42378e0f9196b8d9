//! Browser backend: JS entry points over the `autosize` core.
//!
//! ```js
//! import init, { applyAutoWidth, applyAutoHeight } from "./autosize_web.js";
//! await init();
//! applyAutoWidth("input.grow", { paddingCharacterCount: 2 });
//! applyAutoHeight(document.querySelectorAll("textarea"), { paddingLineCount: 1 });
//! ```

mod config;
mod context;
mod host;

pub use host::WebHost;

use context::with_context;
use log::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

/// Elements named by `targets`: a selector string, a single element, or
/// any array-like of elements. Anything else names nothing.
fn resolve_targets(document: &Document, targets: &JsValue) -> Vec<HtmlElement> {
    if let Some(selector) = targets.as_string() {
        let Ok(list) = document.query_selector_all(&selector) else {
            debug!(target: "autosize.web", "invalid selector {selector:?}");
            return Vec::new();
        };
        return (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect();
    }
    if let Some(element) = targets.dyn_ref::<HtmlElement>() {
        return vec![element.clone()];
    }
    if targets.is_object() {
        return js_sys::Array::from(targets)
            .iter()
            .filter_map(|item| item.dyn_into::<HtmlElement>().ok())
            .collect();
    }
    Vec::new()
}

/// Size each target's width to its value and keep it sized as it changes.
/// Returns `targets` for chaining.
#[wasm_bindgen(js_name = applyAutoWidth)]
pub fn apply_auto_width(targets: JsValue, config: JsValue) -> JsValue {
    let overrides = config::width_overrides(&config);
    with_context(|ctx| {
        let elements = resolve_targets(ctx.host.document(), &targets);
        ctx.sizer.apply_auto_width(&mut ctx.host, &elements, overrides);
    });
    targets
}

/// Size each target's height to its value and keep it sized as it changes.
/// Returns `targets` for chaining.
#[wasm_bindgen(js_name = applyAutoHeight)]
pub fn apply_auto_height(targets: JsValue, config: JsValue) -> JsValue {
    let overrides = config::height_overrides(&config);
    with_context(|ctx| {
        let elements = resolve_targets(ctx.host.document(), &targets);
        ctx.sizer.apply_auto_height(&mut ctx.host, &elements, overrides);
    });
    targets
}
