use css::ComputedStyle;

/// Layout can depend on this without knowing about egui or any font stack.
pub trait TextMeasurer {
    /// Return the width of `text` in CSS px when rendered with `style`.
    fn measure(&self, text: &str, style: &ComputedStyle) -> f32;

    /// Return the line-height in CSS px for the given `style`.
    fn line_height(&self, style: &ComputedStyle) -> f32;
}

/// Average advance of a proportional sans-serif face, in em.
pub const DEFAULT_ADVANCE_EM: f32 = 0.45;

/// Advance of a monospace face, in em.
pub const MONOSPACE_ADVANCE_EM: f32 = 0.6;

/// Font-free measurer: every glyph advances by a fixed fraction of the font
/// size (`monospace` families use [`MONOSPACE_ADVANCE_EM`]).
///
/// Honors `letter-spacing`, `word-spacing` and `tab-size`, which is all the
/// headless page and the tests need.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvanceMeasurer {
    pub advance_em: f32,
}

impl Default for FixedAdvanceMeasurer {
    fn default() -> Self {
        Self {
            advance_em: DEFAULT_ADVANCE_EM,
        }
    }
}

impl FixedAdvanceMeasurer {
    pub fn new(advance_em: f32) -> Self {
        Self { advance_em }
    }

    fn advance(&self, style: &ComputedStyle) -> f32 {
        let em = if is_monospace(&style.font_family) {
            MONOSPACE_ADVANCE_EM
        } else {
            self.advance_em
        };
        em * style.font_size
    }
}

fn is_monospace(family: &str) -> bool {
    family
        .split(',')
        .next()
        .is_some_and(|first| first.trim().trim_matches(['"', '\'']).eq_ignore_ascii_case("monospace"))
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure(&self, text: &str, style: &ComputedStyle) -> f32 {
        let advance = self.advance(style);
        let mut glyphs = 0usize;
        let mut tabs = 0usize;
        let mut spaces = 0usize;
        for ch in text.chars() {
            match ch {
                '\t' => tabs += 1,
                ' ' => {
                    spaces += 1;
                    glyphs += 1;
                }
                _ => glyphs += 1,
            }
        }
        let chars = glyphs + tabs;
        glyphs as f32 * advance
            + tabs as f32 * style.tab_size * advance
            + chars as f32 * style.letter_spacing
            + spaces as f32 * style.word_spacing
    }

    fn line_height(&self, style: &ComputedStyle) -> f32 {
        style.line_height_px()
    }
}
