//! Box sizing for a single element holding one run of text.

use css::{BoxSizing, ComputedStyle, Display, Overflow, Position};
use log::trace;

use crate::lines::{Line, build_lines, max_line_width};
use crate::TextMeasurer;

/// Width of a classic vertical scrollbar, in px.
pub const SCROLLBAR_WIDTH: f32 = 18.0;

/// Extra allowance a legacy engine takes for scrollbars and text areas.
pub const LEGACY_SCROLLBAR_ALLOWANCE: f32 = 2.0;

/// Engine-wide layout switches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Emulate the legacy scrollbar allowance: `overflow-y: scroll` boxes
    /// reserve a wider gutter and text areas lose the same amount of line
    /// width.
    pub legacy_scrollbar_allowance: bool,
}

impl LayoutOptions {
    fn scroll_gutter(&self) -> f32 {
        if self.legacy_scrollbar_allowance {
            SCROLLBAR_WIDTH + LEGACY_SCROLLBAR_ALLOWANCE
        } else {
            SCROLLBAR_WIDTH
        }
    }

    fn text_area_inset(&self, is_text_area: bool) -> f32 {
        if self.legacy_scrollbar_allowance && is_text_area {
            LEGACY_SCROLLBAR_ALLOWANCE
        } else {
            0.0
        }
    }
}

/// What is being laid out.
#[derive(Clone, Copy, Debug)]
pub struct BlockInput<'a> {
    pub style: &'a ComputedStyle,
    pub text: &'a str,
    /// `<textarea>`: subject to the legacy line inset.
    pub is_text_area: bool,
    /// Content width of the containing block.
    pub containing_width: f32,
}

/// Resolved geometry of one box, content-box sizes in px.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockLayout {
    pub content_width: f32,
    pub content_height: f32,
    /// Width the lines were broken against.
    pub line_width: f32,
    /// Height of all lines, which may exceed `content_height`.
    pub scroll_height: f32,
    pub vertical_scrollbar: bool,
    pub lines: Vec<Line>,
}

impl BlockLayout {
    pub fn border_box_width(&self, style: &ComputedStyle) -> f32 {
        self.content_width + style.horizontal_chrome()
    }

    pub fn border_box_height(&self, style: &ComputedStyle) -> f32 {
        self.content_height + style.vertical_chrome()
    }
}

/// Convert a specified `width`/`height` to a content-box size.
pub fn content_size(specified: f32, chrome: f32, sizing: BoxSizing) -> f32 {
    match sizing {
        BoxSizing::ContentBox => specified,
        BoxSizing::BorderBox => (specified - chrome).max(0.0),
    }
}

fn shrinks_to_fit(style: &ComputedStyle) -> bool {
    style.position == Position::Absolute
        || matches!(style.display, Display::InlineBlock | Display::Inline)
}

/// Lay out `input` and size its box.
///
/// An `auto` width fills the containing block for in-flow blocks and shrinks
/// to the widest line for absolutely positioned and inline-level boxes. An
/// `auto` height is the height of the lines. `overflow-y: scroll` always
/// reserves a gutter; `auto` reserves one only once the lines overflow a
/// fixed height.
pub fn layout_block(
    measurer: &dyn TextMeasurer,
    input: BlockInput<'_>,
    options: LayoutOptions,
) -> BlockLayout {
    let style = input.style;
    let first = layout_pass(measurer, input, options, style.overflow_y == Overflow::Scroll);
    if style.overflow_y == Overflow::Auto
        && !first.vertical_scrollbar
        && first.scroll_height > first.content_height
    {
        trace!(target: "layout", "auto overflow engaged, relayout with gutter");
        return layout_pass(measurer, input, options, true);
    }
    first
}

fn layout_pass(
    measurer: &dyn TextMeasurer,
    input: BlockInput<'_>,
    options: LayoutOptions,
    scrollbar: bool,
) -> BlockLayout {
    let style = input.style;
    let gutter = if scrollbar { options.scroll_gutter() } else { 0.0 };
    let inset = options.text_area_inset(input.is_text_area);
    let reserved = gutter + inset;
    let line_height = measurer.line_height(style);

    let content_width = match style.width {
        Some(w) => content_size(w, style.horizontal_chrome(), style.box_sizing),
        None => {
            let available = (input.containing_width - style.horizontal_chrome()).max(0.0);
            if shrinks_to_fit(style) {
                let natural = build_lines(measurer, style, input.text, None);
                let natural = max_line_width(&natural) + reserved;
                // unbreakable content never shrinks below its own width
                if style.white_space.wraps() {
                    natural.min(available)
                } else {
                    natural
                }
            } else {
                available
            }
        }
    };

    let line_width = (content_width - reserved).max(0.0);
    let lines = build_lines(measurer, style, input.text, Some(line_width));
    let scroll_height = lines.len() as f32 * line_height;
    let content_height = match style.height {
        Some(h) => content_size(h, style.vertical_chrome(), style.box_sizing),
        None => scroll_height,
    };

    BlockLayout {
        content_width,
        content_height,
        line_width,
        scroll_height,
        vertical_scrollbar: scrollbar,
        lines,
    }
}
