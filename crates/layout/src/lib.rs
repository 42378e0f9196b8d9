//! Text layout for single boxes: line building under `white-space`,
//! break-word, and box sizing with a scrollbar model.

mod block;
mod breaker;
mod lines;
mod text;

pub use block::{
    BlockInput, BlockLayout, LEGACY_SCROLLBAR_ALLOWANCE, LayoutOptions, SCROLLBAR_WIDTH,
    content_size, layout_block,
};
pub use lines::{Line, apply_text_transform, build_lines, max_line_width};
pub use text::{DEFAULT_ADVANCE_EM, FixedAdvanceMeasurer, MONOSPACE_ADVANCE_EM, TextMeasurer};

/// Slack allowed when deciding whether text fits, to absorb float noise.
pub(crate) const FIT_EPSILON: f32 = 0.01;

/// A rectangle in CSS px units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Whether the two rectangles share any area.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn far_negative_offsets_do_not_intersect_the_viewport() {
        let viewport = Rect {
            x: 0.0,
            y: 0.0,
            width: 1024.0,
            height: 768.0,
        };
        let probe = Rect {
            x: -9990.0,
            y: -9990.0,
            width: 300.0,
            height: 40.0,
        };
        assert!(!probe.intersects(&viewport));
        assert!(!viewport.intersects(&Rect { x: 10.0, ..probe }));
        assert!(viewport.intersects(&Rect { x: 10.0, y: 10.0, ..probe }));
    }
}
