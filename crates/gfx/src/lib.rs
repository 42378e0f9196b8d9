//! Font-backed text metrics for the page's layout engine.

pub mod text_measurer;
pub use text_measurer::EguiTextMeasurer;
