//! User-agent defaults for the handful of elements a form page uses.

/// Font size browsers give form controls (`13.333px`).
pub const CONTROL_FONT_SIZE: &str = "13.333px";

const INPUT: &[(&str, &str)] = &[
    ("display", "inline-block"),
    ("font-family", "sans-serif"),
    ("font-size", CONTROL_FONT_SIZE),
    ("line-height", "normal"),
    ("white-space", "pre"),
    ("padding", "1px 2px"),
    ("border", "2px inset"),
    ("width", "150px"),
    ("overflow-x", "hidden"),
    ("overflow-y", "hidden"),
];

const TEXTAREA: &[(&str, &str)] = &[
    ("display", "inline-block"),
    ("font-family", "monospace"),
    ("font-size", CONTROL_FONT_SIZE),
    ("line-height", "normal"),
    ("white-space", "pre-wrap"),
    ("overflow-wrap", "break-word"),
    ("padding", "2px"),
    ("border", "1px solid"),
    ("width", "180px"),
    ("height", "32px"),
    ("overflow-x", "hidden"),
    ("overflow-y", "auto"),
];

const BLOCK: &[(&str, &str)] = &[("display", "block")];

const INLINE: &[(&str, &str)] = &[("display", "inline")];

const BODY: &[(&str, &str)] = &[("display", "block"), ("padding", "8px")];

/// Declarations the user agent applies to `tag` before any author style.
pub fn ua_declarations(tag: &str) -> &'static [(&'static str, &'static str)] {
    match tag.to_ascii_lowercase().as_str() {
        "input" => INPUT,
        "textarea" => TEXTAREA,
        "body" => BODY,
        "span" | "a" | "b" | "i" | "em" | "strong" | "code" | "label" => INLINE,
        _ => BLOCK,
    }
}

/// Whether `tag` is a text control whose value is its rendered content.
pub fn is_text_control(tag: &str) -> bool {
    tag.eq_ignore_ascii_case("input") || tag.eq_ignore_ascii_case("textarea")
}
