use crate::values::{
    BorderStyle, BoxSizing, Display, Length, LineHeight, Overflow, OverflowWrap, Position,
    ROOT_FONT_SIZE_PX, TextTransform, WhiteSpace, WordBreak, format_px, parse_border_style,
    parse_border_width, parse_box_sizing, parse_display, parse_font_weight, parse_length,
    parse_line_height, parse_non_negative_length, parse_overflow, parse_overflow_wrap,
    parse_position, parse_text_transform, parse_white_space, parse_word_break,
};

/// Per-side px quantities (padding, border widths).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Computed style of one element, in CSS px.
#[derive(Clone, Debug, PartialEq)]
pub struct ComputedStyle {
    pub display: Display,
    pub position: Position,
    /// `None` is `auto`.
    pub top: Option<f32>,
    pub left: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub box_sizing: BoxSizing,
    pub padding: Edges,
    /// Used widths: zero on a side whose style is `none`/`hidden`.
    pub border: Edges,
    pub border_style: [BorderStyle; 4],
    pub overflow_x: Overflow,
    pub overflow_y: Overflow,

    // inherited
    pub font_family: String,
    pub font_size: f32,
    pub font_weight: u16,
    pub font_style: String,
    pub line_height: LineHeight,
    pub letter_spacing: f32,
    pub word_spacing: f32,
    pub text_transform: TextTransform,
    pub text_indent: f32,
    /// In space widths.
    pub tab_size: f32,
    pub white_space: WhiteSpace,
    pub overflow_wrap: OverflowWrap,
    pub word_break: WordBreak,
}

impl ComputedStyle {
    pub fn initial() -> Self {
        ComputedStyle {
            display: Display::Inline,
            position: Position::Static,
            top: None,
            left: None,
            width: None,
            height: None,
            box_sizing: BoxSizing::ContentBox,
            padding: Edges::default(),
            border: Edges::default(),
            border_style: [BorderStyle::None; 4],
            overflow_x: Overflow::Visible,
            overflow_y: Overflow::Visible,
            font_family: "serif".to_string(),
            font_size: ROOT_FONT_SIZE_PX,
            font_weight: 400,
            font_style: "normal".to_string(),
            line_height: LineHeight::Normal,
            letter_spacing: 0.0,
            word_spacing: 0.0,
            text_transform: TextTransform::None,
            text_indent: 0.0,
            tab_size: 8.0,
            white_space: WhiteSpace::Normal,
            overflow_wrap: OverflowWrap::Normal,
            word_break: WordBreak::Normal,
        }
    }

    /// Initial values for the non-inherited properties, inherited values
    /// from `parent` for the rest.
    fn inheriting(parent: &ComputedStyle) -> Self {
        ComputedStyle {
            font_family: parent.font_family.clone(),
            font_size: parent.font_size,
            font_weight: parent.font_weight,
            font_style: parent.font_style.clone(),
            line_height: parent.line_height,
            letter_spacing: parent.letter_spacing,
            word_spacing: parent.word_spacing,
            text_transform: parent.text_transform,
            text_indent: parent.text_indent,
            tab_size: parent.tab_size,
            white_space: parent.white_space,
            overflow_wrap: parent.overflow_wrap,
            word_break: parent.word_break,
            ..ComputedStyle::initial()
        }
    }

    pub fn line_height_px(&self) -> f32 {
        self.line_height.to_px(self.font_size)
    }

    /// Padding plus border, horizontally.
    pub fn horizontal_chrome(&self) -> f32 {
        self.padding.horizontal() + self.border.horizontal()
    }

    pub fn vertical_chrome(&self) -> f32 {
        self.padding.vertical() + self.border.vertical()
    }

    /// Serialized computed value of `name`, as `getComputedStyle` would
    /// report it. `None` for properties this engine does not model.
    pub fn property_value(&self, name: &str) -> Option<String> {
        let value = match name {
            "display" => self.display.as_str().to_string(),
            "position" => self.position.as_str().to_string(),
            "top" => auto_or_px(self.top),
            "left" => auto_or_px(self.left),
            "width" => auto_or_px(self.width),
            "height" => auto_or_px(self.height),
            "box-sizing" => self.box_sizing.as_str().to_string(),
            "overflow-x" => self.overflow_x.as_str().to_string(),
            "overflow-y" => self.overflow_y.as_str().to_string(),
            "font-family" => self.font_family.clone(),
            "font-size" => format_px(self.font_size),
            "font-weight" => self.font_weight.to_string(),
            "font-style" => self.font_style.clone(),
            "line-height" => self.line_height.serialize(),
            "letter-spacing" if self.letter_spacing == 0.0 => "normal".to_string(),
            "letter-spacing" => format_px(self.letter_spacing),
            "word-spacing" => format_px(self.word_spacing),
            "text-transform" => self.text_transform.as_str().to_string(),
            "text-indent" => format_px(self.text_indent),
            "tab-size" => format!("{}", self.tab_size),
            "white-space" => self.white_space.as_str().to_string(),
            "overflow-wrap" | "word-wrap" => self.overflow_wrap.as_str().to_string(),
            "word-break" => self.word_break.as_str().to_string(),
            _ => {
                if let Some(i) = side_of(name, "padding-", "") {
                    format_px(edge(&self.padding, i))
                } else if let Some(i) = side_of(name, "border-", "-width") {
                    format_px(edge(&self.border, i))
                } else if let Some(i) = side_of(name, "border-", "-style") {
                    self.border_style[i].as_str().to_string()
                } else {
                    return None;
                }
            }
        };
        Some(value)
    }
}

const SIDES: [&str; 4] = ["top", "right", "bottom", "left"];

fn edge(edges: &Edges, i: usize) -> f32 {
    match i {
        0 => edges.top,
        1 => edges.right,
        2 => edges.bottom,
        _ => edges.left,
    }
}

fn edge_mut(edges: &mut Edges, i: usize) -> &mut f32 {
    match i {
        0 => &mut edges.top,
        1 => &mut edges.right,
        2 => &mut edges.bottom,
        _ => &mut edges.left,
    }
}

fn auto_or_px(v: Option<f32>) -> String {
    v.map_or_else(|| "auto".to_string(), format_px)
}

fn side_of(name: &str, prefix: &str, suffix: &str) -> Option<usize> {
    let rest = name.strip_prefix(prefix)?.strip_suffix(suffix)?;
    SIDES.iter().position(|s| *s == rest)
}

/// Compute the final, inherited style for an element, given:
/// - its specified longhand declarations (output of `cascade`)
/// - an optional parent computed style.
///
/// Unknown properties and unparsable values are ignored.
pub fn compute_style(specified: &[(String, String)], parent: Option<&ComputedStyle>) -> ComputedStyle {
    let mut result = match parent {
        Some(p) => ComputedStyle::inheriting(p),
        None => ComputedStyle::initial(),
    };

    // font-size first: every other `em` resolves against it
    let parent_font = result.font_size;
    if let Some((_, v)) = specified.iter().find(|(n, _)| n == "font-size") {
        if let Some(len) = parse_non_negative_length(v) {
            result.font_size = len.to_px(parent_font);
        }
    }
    let em = result.font_size;
    let px = |value: &str| parse_length(value).map(|l: Length| l.to_px(em));
    let size = |value: &str| parse_non_negative_length(value).map(|l| l.to_px(em));

    // `medium` until specified
    let mut border_width = [3.0_f32; 4];

    for (name, value) in specified {
        let name = name.as_str();
        let value = value.as_str();
        let auto = value.trim().eq_ignore_ascii_case("auto");

        match name {
            "font-size" => {}
            "display" => {
                if let Some(d) = parse_display(value) {
                    result.display = d;
                }
            }
            "position" => {
                if let Some(p) = parse_position(value) {
                    result.position = p;
                }
            }
            "top" => result.top = if auto { None } else { px(value).or(result.top) },
            "left" => result.left = if auto { None } else { px(value).or(result.left) },
            "width" => result.width = if auto { None } else { size(value).or(result.width) },
            "height" => result.height = if auto { None } else { size(value).or(result.height) },
            "box-sizing" => {
                if let Some(b) = parse_box_sizing(value) {
                    result.box_sizing = b;
                }
            }
            "overflow-x" => {
                if let Some(o) = parse_overflow(value) {
                    result.overflow_x = o;
                }
            }
            "overflow-y" => {
                if let Some(o) = parse_overflow(value) {
                    result.overflow_y = o;
                }
            }
            "font-family" => {
                let v = value.trim();
                if !v.is_empty() {
                    result.font_family = v.to_string();
                }
            }
            "font-weight" => {
                if let Some(w) = parse_font_weight(value) {
                    result.font_weight = w;
                }
            }
            "font-style" => result.font_style = value.trim().to_ascii_lowercase(),
            "line-height" => {
                if let Some(lh) = parse_line_height(value) {
                    result.line_height = lh;
                } else if let Some(v) = size(value) {
                    result.line_height = LineHeight::Px(v);
                }
            }
            "letter-spacing" => {
                if value.trim().eq_ignore_ascii_case("normal") {
                    result.letter_spacing = 0.0;
                } else if let Some(v) = px(value) {
                    result.letter_spacing = v;
                }
            }
            "word-spacing" => {
                if value.trim().eq_ignore_ascii_case("normal") {
                    result.word_spacing = 0.0;
                } else if let Some(v) = px(value) {
                    result.word_spacing = v;
                }
            }
            "text-transform" => {
                if let Some(t) = parse_text_transform(value) {
                    result.text_transform = t;
                }
            }
            "text-indent" => {
                if let Some(v) = px(value) {
                    result.text_indent = v;
                }
            }
            "tab-size" => {
                if let Ok(n) = value.trim().parse::<f32>() {
                    if n.is_finite() && n >= 0.0 {
                        result.tab_size = n;
                    }
                }
            }
            "white-space" => {
                if let Some(ws) = parse_white_space(value) {
                    result.white_space = ws;
                }
            }
            "overflow-wrap" | "word-wrap" => {
                if let Some(ow) = parse_overflow_wrap(value) {
                    result.overflow_wrap = ow;
                }
            }
            "word-break" => {
                if let Some(wb) = parse_word_break(value) {
                    result.word_break = wb;
                }
            }
            _ => {
                if let Some(i) = side_of(name, "padding-", "") {
                    if let Some(v) = size(value) {
                        *edge_mut(&mut result.padding, i) = v;
                    }
                } else if let Some(i) = side_of(name, "border-", "-width") {
                    if let Some(len) = parse_border_width(value) {
                        border_width[i] = len.to_px(em);
                    }
                } else if let Some(i) = side_of(name, "border-", "-style") {
                    if let Some(s) = parse_border_style(value) {
                        result.border_style[i] = s;
                    }
                }
                // unsupported property → ignored
            }
        }
    }

    for (i, width) in border_width.into_iter().enumerate() {
        let used = if result.border_style[i].is_visible() {
            width
        } else {
            0.0
        };
        *edge_mut(&mut result.border, i) = used;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cascade::cascade;
    use crate::syntax::{Stylesheet, parse_declarations};

    fn specified(css: &str) -> Vec<(String, String)> {
        crate::syntax::expand_shorthands(&parse_declarations(css))
            .into_iter()
            .map(|d| (d.name, d.value))
            .collect()
    }

    #[test]
    fn text_properties_inherit_box_properties_do_not() {
        let parent = compute_style(&specified("font-size: 20px; padding: 4px; white-space: pre"), None);
        let child = compute_style(&[], Some(&parent));
        assert_eq!(child.font_size, 20.0);
        assert_eq!(child.white_space, WhiteSpace::Pre);
        assert_eq!(child.padding, Edges::default());
    }

    #[test]
    fn em_uses_own_font_size_except_for_font_size() {
        let parent = compute_style(&specified("font-size: 10px"), None);
        let child = compute_style(&specified("font-size: 2em; top: -999em"), Some(&parent));
        assert_eq!(child.font_size, 20.0);
        assert_eq!(child.top, Some(-19980.0));
    }

    #[test]
    fn border_width_needs_a_visible_style() {
        let s = compute_style(&specified("border-width: 4px"), None);
        assert_eq!(s.border, Edges::default());
        let s = compute_style(&specified("border: 4px solid"), None);
        assert_eq!(s.border.horizontal(), 8.0);
        let s = compute_style(&specified("border-style: inset"), None);
        assert_eq!(s.border.top, 3.0);
    }

    #[test]
    fn computed_values_serialize_like_a_browser() {
        let resolved = cascade("textarea", &[], &parse_declarations("padding-left: 1em"), &Stylesheet::default());
        let s = compute_style(&resolved, None);
        assert_eq!(s.property_value("white-space").as_deref(), Some("pre-wrap"));
        assert_eq!(s.property_value("padding-left").as_deref(), Some("13.333px"));
        assert_eq!(s.property_value("border-top-style").as_deref(), Some("solid"));
        assert_eq!(s.property_value("border-top-width").as_deref(), Some("1px"));
        assert_eq!(s.property_value("letter-spacing").as_deref(), Some("normal"));
        assert_eq!(s.property_value("line-height").as_deref(), Some("normal"));
        assert_eq!(s.property_value("color"), None);
    }

    #[test]
    fn auto_resets_sizes() {
        let s = compute_style(&specified("width: 10px; width: auto; height: -4px"), None);
        assert_eq!(s.width, None);
        assert_eq!(s.height, None);
        assert_eq!(s.property_value("width").as_deref(), Some("auto"));
    }
}
