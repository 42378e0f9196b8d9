pub mod syntax;
pub mod cascade;
pub mod values;
pub mod computed;
pub mod ua;

// Re-exports so other crates can just use `css::...` nicely.
pub use syntax::{
    Declaration, Rule, Selector, Stylesheet, expand_shorthands, parse_declarations,
    parse_selector, parse_stylesheet, serialize_declarations,
};
pub use cascade::{cascade, matches_selector};
pub use values::{
    BorderStyle, BoxSizing, Display, Length, LineHeight, Overflow, OverflowWrap, Position,
    TextTransform, WhiteSpace, WordBreak, format_px, parse_length,
};
pub use computed::{ComputedStyle, Edges, compute_style};
pub use ua::{is_text_control, ua_declarations};
