//! [`WebHost`]: the measurement host backed by the browser DOM.

use autosize::{Error, EventHost, Host, StyleDeclarations, StyleSource};
use core_types::{EventKind, ListenerToken};
use log::trace;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{
    CssStyleDeclaration, Document, HtmlElement, HtmlInputElement, HtmlTextAreaElement, Window,
};

fn js_error(err: JsValue) -> Error {
    Error::Host(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// `font-size` to `fontSize`, for engines that only expose camel-cased
/// style properties.
pub(crate) fn camel_case(property: &str) -> String {
    let mut out = String::with_capacity(property.len());
    let mut upper = false;
    for ch in property.chars() {
        if ch == '-' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

fn px(value: &str) -> f32 {
    value
        .trim()
        .strip_suffix("px")
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0.0)
}

/// A `CSSStyleDeclaration` (computed or inline).
struct CssDecls(CssStyleDeclaration);

impl StyleDeclarations for CssDecls {
    fn property_value(&self, name: &str) -> Result<Option<String>, Error> {
        match self.0.get_property_value(name) {
            Ok(v) if v.is_empty() => Ok(None),
            Ok(v) => Ok(Some(v)),
            Err(_) => Err(Error::PropertyAccess {
                property: name.to_string(),
            }),
        }
    }
}

/// Legacy `currentStyle`: a plain object keyed by camel-cased names.
struct ReflectDecls(js_sys::Object);

impl StyleDeclarations for ReflectDecls {
    fn property_value(&self, name: &str) -> Result<Option<String>, Error> {
        let key = JsValue::from_str(&camel_case(name));
        match js_sys::Reflect::get(&self.0, &key) {
            Ok(v) => Ok(v.as_string().filter(|s| !s.is_empty())),
            Err(_) => Err(Error::PropertyAccess {
                property: name.to_string(),
            }),
        }
    }
}

struct Subscription {
    node: HtmlElement,
    namespace: String,
    handlers: Vec<(EventKind, Closure<dyn FnMut(web_sys::Event)>)>,
}

pub struct WebHost {
    window: Window,
    document: Document,
    input_event: bool,
    subscriptions: Vec<Subscription>,
}

impl WebHost {
    pub fn new() -> Result<Self, Error> {
        let window = web_sys::window().ok_or(Error::Unsupported("a window"))?;
        let document = window.document().ok_or(Error::Unsupported("a document"))?;
        // engines with the event expose an `oninput` slot on every input
        let input_event = document
            .create_element("input")
            .ok()
            .and_then(|el| js_sys::Reflect::has(&el, &JsValue::from_str("oninput")).ok())
            .unwrap_or(false);
        Ok(Self {
            window,
            document,
            input_event,
            subscriptions: Vec::new(),
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn computed(&self, node: &HtmlElement) -> Option<CssStyleDeclaration> {
        self.window.get_computed_style(node).ok().flatten()
    }

    /// Padding plus border along one axis, read from the computed style.
    fn chrome(&self, node: &HtmlElement, horizontal: bool) -> f32 {
        let Some(style) = self.computed(node) else {
            return 0.0;
        };
        let sides: [&str; 2] = if horizontal {
            ["left", "right"]
        } else {
            ["top", "bottom"]
        };
        sides
            .iter()
            .map(|side| {
                let padding = style.get_property_value(&format!("padding-{side}"));
                let border = style.get_property_value(&format!("border-{side}-width"));
                px(&padding.unwrap_or_default()) + px(&border.unwrap_or_default())
            })
            .sum()
    }

    fn is_border_box(&self, node: &HtmlElement) -> bool {
        self.computed(node)
            .and_then(|s| s.get_property_value("box-sizing").ok())
            .is_some_and(|v| v.trim() == "border-box")
    }

    fn set_size(&mut self, node: &HtmlElement, property: &str, px: f32) -> Result<(), Error> {
        let extra = if self.is_border_box(node) {
            self.chrome(node, property == "width")
        } else {
            0.0
        };
        node.style()
            .set_property(property, &format!("{}px", px + extra))
            .map_err(js_error)
    }
}

impl Host for WebHost {
    type Node = HtmlElement;

    fn style_declarations(
        &self,
        node: &HtmlElement,
        source: StyleSource,
    ) -> Option<Box<dyn StyleDeclarations + '_>> {
        match source {
            StyleSource::Computed => {
                let decls = self.computed(node)?;
                Some(Box::new(CssDecls(decls)))
            }
            StyleSource::Current => {
                let current = js_sys::Reflect::get(node, &JsValue::from_str("currentStyle")).ok()?;
                let object = current.dyn_into::<js_sys::Object>().ok()?;
                Some(Box::new(ReflectDecls(object)))
            }
            StyleSource::Inline => Some(Box::new(CssDecls(node.style()))),
        }
    }

    fn create_probe(&mut self) -> Result<HtmlElement, Error> {
        self.document
            .create_element("div")
            .map_err(js_error)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| Error::Unsupported("HTML elements"))
    }

    fn set_style_property(&mut self, node: &HtmlElement, name: &str, value: &str) -> Result<(), Error> {
        node.style().set_property(name, value).map_err(|_| Error::PropertyAccess {
            property: name.to_string(),
        })
    }

    fn set_text(&mut self, node: &HtmlElement, text: &str) -> Result<(), Error> {
        node.set_text_content(Some(text));
        Ok(())
    }

    fn attach(&mut self, node: &HtmlElement) -> Result<(), Error> {
        let body = self.document.body().ok_or(Error::Unsupported("a document body"))?;
        body.append_child(node).map_err(js_error)?;
        Ok(())
    }

    fn discard(&mut self, node: &HtmlElement) {
        node.remove();
    }

    fn width(&self, node: &HtmlElement) -> f32 {
        let border_box = node.get_bounding_client_rect().width() as f32;
        (border_box - self.chrome(node, true)).max(0.0)
    }

    fn height(&self, node: &HtmlElement) -> f32 {
        let border_box = node.get_bounding_client_rect().height() as f32;
        (border_box - self.chrome(node, false)).max(0.0)
    }

    fn set_width(&mut self, node: &HtmlElement, px: f32) -> Result<(), Error> {
        self.set_size(node, "width", px)
    }

    fn set_height(&mut self, node: &HtmlElement, px: f32) -> Result<(), Error> {
        self.set_size(node, "height", px)
    }

    fn value(&self, node: &HtmlElement) -> String {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            node.text_content().unwrap_or_default()
        }
    }
}

impl EventHost for WebHost {
    fn supports_input_event(&self) -> bool {
        self.input_event
    }

    fn subscribe(
        &mut self,
        node: &HtmlElement,
        namespace: &str,
        events: &[EventKind],
        token: ListenerToken,
    ) -> Result<(), Error> {
        let mut handlers: Vec<(EventKind, Closure<dyn FnMut(web_sys::Event)>)> = Vec::with_capacity(events.len());
        for &kind in events {
            let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
                crate::context::dispatch(token, kind);
            });
            let added =
                node.add_event_listener_with_callback(kind.as_str(), closure.as_ref().unchecked_ref());
            if let Err(err) = added {
                for (kind, closure) in handlers {
                    let _ = node.remove_event_listener_with_callback(
                        kind.as_str(),
                        closure.as_ref().unchecked_ref(),
                    );
                }
                return Err(js_error(err));
            }
            handlers.push((kind, closure));
        }
        self.subscriptions.push(Subscription {
            node: node.clone(),
            namespace: namespace.to_string(),
            handlers,
        });
        Ok(())
    }

    fn unsubscribe(&mut self, node: &HtmlElement, namespace: &str) {
        let (gone, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.subscriptions)
            .into_iter()
            .partition(|s| s.node == *node && s.namespace == namespace);
        self.subscriptions = kept;
        for sub in gone {
            for (kind, closure) in sub.handlers {
                let _ = sub
                    .node
                    .remove_event_listener_with_callback(kind.as_str(), closure.as_ref().unchecked_ref());
            }
            trace!(target: "autosize.web", "unsubscribed `{}`", sub.namespace);
        }
    }
}
