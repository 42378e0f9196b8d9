use std::cell::RefCell;
use std::collections::HashMap;

use css::ComputedStyle;
use egui::{Color32, Context, FontId};
use layout::TextMeasurer;

/// Fallback space advance, in em, when the font reports none.
const SPACE_FALLBACK_EM: f32 = 0.33;

/// `egui`-backed adapter for measuring probe text with real font metrics.
///
/// `monospace` families map to egui's monospace font, everything else to
/// the proportional one. The context must have run at least one frame so its
/// fonts are loaded.
pub struct EguiTextMeasurer {
    ctx: Context,
    space_width_cache: RefCell<HashMap<(u32, bool), f32>>,
}

impl EguiTextMeasurer {
    pub fn new(ctx: &Context) -> Self {
        Self {
            ctx: ctx.clone(),
            space_width_cache: RefCell::new(HashMap::new()),
        }
    }

    /// A context with fonts loaded, for headless use.
    pub fn headless() -> Self {
        let ctx = Context::default();
        let _ = ctx.run(egui::RawInput::default(), |_| {});
        Self::new(&ctx)
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    fn font_id(style: &ComputedStyle) -> FontId {
        if is_monospace(&style.font_family) {
            FontId::monospace(style.font_size)
        } else {
            FontId::proportional(style.font_size)
        }
    }

    fn raw_width(&self, text: &str, font_id: FontId) -> f32 {
        // `Color32` does not affect text metrics
        self.ctx.fonts(|f| {
            f.layout_no_wrap(text.to_owned(), font_id, Color32::BLACK)
                .rect
                .width()
        })
    }

    fn space_width(&self, style: &ComputedStyle) -> f32 {
        let font_id = Self::font_id(style);
        let key = (
            (style.font_size * 100.0).round().max(0.0) as u32,
            is_monospace(&style.font_family),
        );
        if let Some(w) = self.space_width_cache.borrow().get(&key).copied() {
            return w;
        }

        // NBSP is the most stable in egui; a plain space may lay out empty.
        let nbsp = "\u{00A0}";
        let w_nbsp = self.raw_width(nbsp, font_id.clone());
        let w = if w_nbsp.is_finite() && w_nbsp > 0.0 {
            w_nbsp
        } else {
            let w_with = self.raw_width(&format!("x{nbsp}x"), font_id.clone());
            let w_without = self.raw_width("xx", font_id);
            let w = (w_with - w_without).max(0.0);
            if w.is_finite() && w > 0.0 {
                w
            } else {
                (style.font_size * SPACE_FALLBACK_EM).max(1.0)
            }
        };

        self.space_width_cache.borrow_mut().insert(key, w);
        w
    }
}

fn is_monospace(family: &str) -> bool {
    family.split(',').any(|f| {
        let f = f.trim().trim_matches(['"', '\'']);
        f.eq_ignore_ascii_case("monospace") || f.eq_ignore_ascii_case("courier new")
    })
}

impl TextMeasurer for EguiTextMeasurer {
    fn measure(&self, text: &str, style: &ComputedStyle) -> f32 {
        if text.is_empty() {
            return 0.0;
        }

        let mut width = 0.0;
        let mut run = String::new();
        let mut chars = 0usize;
        let mut spaces = 0usize;
        let mut tabs = 0usize;
        for ch in text.chars() {
            chars += 1;
            match ch {
                // spaces and tabs are measured separately: egui trims them
                ' ' => spaces += 1,
                '\t' => tabs += 1,
                _ => {
                    run.push(ch);
                    continue;
                }
            }
            if !run.is_empty() {
                width += self.raw_width(&run, Self::font_id(style));
                run.clear();
            }
        }
        if !run.is_empty() {
            width += self.raw_width(&run, Self::font_id(style));
        }

        let space = self.space_width(style);
        width
            + spaces as f32 * (space + style.word_spacing)
            + tabs as f32 * space * style.tab_size
            + chars as f32 * style.letter_spacing
    }

    fn line_height(&self, style: &ComputedStyle) -> f32 {
        style.line_height_px()
    }
}
