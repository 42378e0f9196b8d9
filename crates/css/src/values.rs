/// CSS length value.
///
/// `em` resolves against the element's own font size (the parent's, when the
/// property being resolved is `font-size` itself).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Px(f32),
    Em(f32),
    Rem(f32),
    Pt(f32),
}

/// Root font size used to resolve `rem`.
pub const ROOT_FONT_SIZE_PX: f32 = 16.0;

impl Length {
    pub fn to_px(self, font_size: f32) -> f32 {
        match self {
            Length::Px(v) => v,
            Length::Em(v) => v * font_size,
            Length::Rem(v) => v * ROOT_FONT_SIZE_PX,
            Length::Pt(v) => v * 96.0 / 72.0,
        }
    }
}

/// CSS `display` value. Only what form controls and their probes need.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Display {
    Block,
    Inline,
    InlineBlock,
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    Static,
    Relative,
    Absolute,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WhiteSpace {
    Normal,
    Nowrap,
    Pre,
    PreWrap,
    PreLine,
}

impl WhiteSpace {
    /// Whether runs of spaces and tabs are kept as typed.
    pub fn preserves_spaces(self) -> bool {
        matches!(self, WhiteSpace::Pre | WhiteSpace::PreWrap)
    }

    /// Whether `'\n'` in the text forces a line break.
    pub fn preserves_newlines(self) -> bool {
        matches!(
            self,
            WhiteSpace::Pre | WhiteSpace::PreWrap | WhiteSpace::PreLine
        )
    }

    /// Whether lines may break at soft wrap opportunities.
    pub fn wraps(self) -> bool {
        !matches!(self, WhiteSpace::Pre | WhiteSpace::Nowrap)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverflowWrap {
    Normal,
    BreakWord,
    Anywhere,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordBreak {
    Normal,
    BreakAll,
    KeepAll,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overflow {
    Visible,
    Hidden,
    Scroll,
    Auto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoxSizing {
    ContentBox,
    BorderBox,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BorderStyle {
    None,
    Hidden,
    Solid,
    Dotted,
    Dashed,
    Double,
    Groove,
    Ridge,
    Inset,
    Outset,
}

impl BorderStyle {
    /// `none` and `hidden` force the used border width to zero.
    pub fn is_visible(self) -> bool {
        !matches!(self, BorderStyle::None | BorderStyle::Hidden)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextTransform {
    None,
    Uppercase,
    Lowercase,
    Capitalize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineHeight {
    Normal,
    /// Unitless multiplier of the font size.
    Number(f32),
    Px(f32),
}

/// Multiplier used for `line-height: normal`.
pub const NORMAL_LINE_HEIGHT: f32 = 1.2;

impl LineHeight {
    pub fn to_px(self, font_size: f32) -> f32 {
        match self {
            LineHeight::Normal => font_size * NORMAL_LINE_HEIGHT,
            LineHeight::Number(n) => font_size * n,
            LineHeight::Px(px) => px,
        }
    }
}

/// Parse a signed `<number><unit>` length. A bare `0` is accepted.
pub fn parse_length(value: &str) -> Option<Length> {
    let v = value.trim().to_ascii_lowercase();
    if v == "0" {
        return Some(Length::Px(0.0));
    }
    let (num, ctor): (&str, fn(f32) -> Length) = if let Some(n) = v.strip_suffix("rem") {
        (n, Length::Rem)
    } else if let Some(n) = v.strip_suffix("px") {
        (n, Length::Px)
    } else if let Some(n) = v.strip_suffix("em") {
        (n, Length::Em)
    } else if let Some(n) = v.strip_suffix("pt") {
        (n, Length::Pt)
    } else {
        return None;
    };
    let num = num.trim().parse::<f32>().ok()?;
    num.is_finite().then(|| ctor(num))
}

/// Like [`parse_length`] but rejects negative values (sizes, padding,
/// border widths).
pub fn parse_non_negative_length(value: &str) -> Option<Length> {
    let len = parse_length(value)?;
    let raw = match len {
        Length::Px(v) | Length::Em(v) | Length::Rem(v) | Length::Pt(v) => v,
    };
    (raw >= 0.0).then_some(len)
}

/// Border width keywords map to the usual 1/3/5 px.
pub fn parse_border_width(value: &str) -> Option<Length> {
    match value.trim().to_ascii_lowercase().as_str() {
        "thin" => Some(Length::Px(1.0)),
        "medium" => Some(Length::Px(3.0)),
        "thick" => Some(Length::Px(5.0)),
        other => parse_non_negative_length(other),
    }
}

pub fn parse_display(value: &str) -> Option<Display> {
    match value.trim().to_ascii_lowercase().as_str() {
        "block" => Some(Display::Block),
        "inline" => Some(Display::Inline),
        "inline-block" => Some(Display::InlineBlock),
        "none" => Some(Display::None),
        _ => None,
    }
}

pub fn parse_position(value: &str) -> Option<Position> {
    match value.trim().to_ascii_lowercase().as_str() {
        "static" => Some(Position::Static),
        "relative" => Some(Position::Relative),
        // fixed behaves like absolute for an unscrolled page
        "absolute" | "fixed" => Some(Position::Absolute),
        _ => None,
    }
}

pub fn parse_white_space(value: &str) -> Option<WhiteSpace> {
    match value.trim().to_ascii_lowercase().as_str() {
        "normal" => Some(WhiteSpace::Normal),
        "nowrap" => Some(WhiteSpace::Nowrap),
        "pre" => Some(WhiteSpace::Pre),
        "pre-wrap" => Some(WhiteSpace::PreWrap),
        "pre-line" => Some(WhiteSpace::PreLine),
        _ => None,
    }
}

pub fn parse_overflow_wrap(value: &str) -> Option<OverflowWrap> {
    match value.trim().to_ascii_lowercase().as_str() {
        "normal" => Some(OverflowWrap::Normal),
        "break-word" => Some(OverflowWrap::BreakWord),
        "anywhere" => Some(OverflowWrap::Anywhere),
        _ => None,
    }
}

pub fn parse_word_break(value: &str) -> Option<WordBreak> {
    match value.trim().to_ascii_lowercase().as_str() {
        "normal" => Some(WordBreak::Normal),
        "break-all" => Some(WordBreak::BreakAll),
        "keep-all" => Some(WordBreak::KeepAll),
        _ => None,
    }
}

pub fn parse_overflow(value: &str) -> Option<Overflow> {
    match value.trim().to_ascii_lowercase().as_str() {
        "visible" => Some(Overflow::Visible),
        "hidden" | "clip" => Some(Overflow::Hidden),
        "scroll" => Some(Overflow::Scroll),
        "auto" => Some(Overflow::Auto),
        _ => None,
    }
}

pub fn parse_box_sizing(value: &str) -> Option<BoxSizing> {
    match value.trim().to_ascii_lowercase().as_str() {
        "content-box" => Some(BoxSizing::ContentBox),
        "border-box" => Some(BoxSizing::BorderBox),
        _ => None,
    }
}

pub fn parse_border_style(value: &str) -> Option<BorderStyle> {
    match value.trim().to_ascii_lowercase().as_str() {
        "none" => Some(BorderStyle::None),
        "hidden" => Some(BorderStyle::Hidden),
        "solid" => Some(BorderStyle::Solid),
        "dotted" => Some(BorderStyle::Dotted),
        "dashed" => Some(BorderStyle::Dashed),
        "double" => Some(BorderStyle::Double),
        "groove" => Some(BorderStyle::Groove),
        "ridge" => Some(BorderStyle::Ridge),
        "inset" => Some(BorderStyle::Inset),
        "outset" => Some(BorderStyle::Outset),
        _ => None,
    }
}

pub fn parse_text_transform(value: &str) -> Option<TextTransform> {
    match value.trim().to_ascii_lowercase().as_str() {
        "none" => Some(TextTransform::None),
        "uppercase" => Some(TextTransform::Uppercase),
        "lowercase" => Some(TextTransform::Lowercase),
        "capitalize" => Some(TextTransform::Capitalize),
        _ => None,
    }
}

pub fn parse_line_height(value: &str) -> Option<LineHeight> {
    let v = value.trim().to_ascii_lowercase();
    if v == "normal" {
        return Some(LineHeight::Normal);
    }
    if let Ok(n) = v.parse::<f32>() {
        return (n.is_finite() && n >= 0.0).then_some(LineHeight::Number(n));
    }
    None
}

/// `font-weight` as a number; keywords map to 400/700.
pub fn parse_font_weight(value: &str) -> Option<u16> {
    match value.trim().to_ascii_lowercase().as_str() {
        "normal" => Some(400),
        "bold" => Some(700),
        other => other.parse::<u16>().ok().filter(|w| (1..=1000).contains(w)),
    }
}

/// Serialize a px quantity the way a computed style reports it.
pub fn format_px(px: f32) -> String {
    if px == 0.0 {
        // avoid "-0px"
        return "0px".to_string();
    }
    format!("{px}px")
}

impl Display {
    pub fn as_str(self) -> &'static str {
        match self {
            Display::Block => "block",
            Display::Inline => "inline",
            Display::InlineBlock => "inline-block",
            Display::None => "none",
        }
    }
}

impl Position {
    pub fn as_str(self) -> &'static str {
        match self {
            Position::Static => "static",
            Position::Relative => "relative",
            Position::Absolute => "absolute",
        }
    }
}

impl WhiteSpace {
    pub fn as_str(self) -> &'static str {
        match self {
            WhiteSpace::Normal => "normal",
            WhiteSpace::Nowrap => "nowrap",
            WhiteSpace::Pre => "pre",
            WhiteSpace::PreWrap => "pre-wrap",
            WhiteSpace::PreLine => "pre-line",
        }
    }
}

impl OverflowWrap {
    pub fn as_str(self) -> &'static str {
        match self {
            OverflowWrap::Normal => "normal",
            OverflowWrap::BreakWord => "break-word",
            OverflowWrap::Anywhere => "anywhere",
        }
    }
}

impl WordBreak {
    pub fn as_str(self) -> &'static str {
        match self {
            WordBreak::Normal => "normal",
            WordBreak::BreakAll => "break-all",
            WordBreak::KeepAll => "keep-all",
        }
    }
}

impl Overflow {
    pub fn as_str(self) -> &'static str {
        match self {
            Overflow::Visible => "visible",
            Overflow::Hidden => "hidden",
            Overflow::Scroll => "scroll",
            Overflow::Auto => "auto",
        }
    }
}

impl BoxSizing {
    pub fn as_str(self) -> &'static str {
        match self {
            BoxSizing::ContentBox => "content-box",
            BoxSizing::BorderBox => "border-box",
        }
    }
}

impl BorderStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            BorderStyle::None => "none",
            BorderStyle::Hidden => "hidden",
            BorderStyle::Solid => "solid",
            BorderStyle::Dotted => "dotted",
            BorderStyle::Dashed => "dashed",
            BorderStyle::Double => "double",
            BorderStyle::Groove => "groove",
            BorderStyle::Ridge => "ridge",
            BorderStyle::Inset => "inset",
            BorderStyle::Outset => "outset",
        }
    }
}

impl TextTransform {
    pub fn as_str(self) -> &'static str {
        match self {
            TextTransform::None => "none",
            TextTransform::Uppercase => "uppercase",
            TextTransform::Lowercase => "lowercase",
            TextTransform::Capitalize => "capitalize",
        }
    }
}

impl LineHeight {
    pub fn serialize(self) -> String {
        match self {
            LineHeight::Normal => "normal".to_string(),
            LineHeight::Number(n) => format!("{n}"),
            LineHeight::Px(px) => format_px(px),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths_accept_signed_units() {
        assert_eq!(parse_length("12px"), Some(Length::Px(12.0)));
        assert_eq!(parse_length("-999em"), Some(Length::Em(-999.0)));
        assert_eq!(parse_length("1.5rem"), Some(Length::Rem(1.5)));
        assert_eq!(parse_length("0"), Some(Length::Px(0.0)));
        assert_eq!(parse_length("12"), None);
        assert_eq!(parse_length("auto"), None);
    }

    #[test]
    fn em_resolves_against_font_size() {
        assert_eq!(Length::Em(-999.0).to_px(10.0), -9990.0);
        assert_eq!(Length::Pt(12.0).to_px(99.0), 16.0);
    }

    #[test]
    fn negative_sizes_are_rejected() {
        assert_eq!(parse_non_negative_length("-1px"), None);
        assert_eq!(parse_border_width("medium"), Some(Length::Px(3.0)));
    }

    #[test]
    fn white_space_capabilities() {
        assert!(WhiteSpace::Pre.preserves_spaces());
        assert!(!WhiteSpace::Pre.wraps());
        assert!(WhiteSpace::PreWrap.wraps());
        assert!(WhiteSpace::PreLine.preserves_newlines());
        assert!(!WhiteSpace::PreLine.preserves_spaces());
        assert!(!WhiteSpace::Nowrap.preserves_newlines());
    }

    #[test]
    fn px_serialization_drops_trailing_zeroes() {
        assert_eq!(format_px(12.0), "12px");
        assert_eq!(format_px(12.5), "12.5px");
        assert_eq!(format_px(-0.0), "0px");
    }
}
