//! Per-target configuration, merged from caller overrides atop defaults.
//!
//! One merged config is captured when a target is bound and reused for every
//! later measurement of that target.

use log::debug;

/// Extra `W` characters appended before measuring a width.
pub const DEFAULT_PADDING_CHARS: usize = 1;

/// Extra blank lines appended before measuring a height.
pub const DEFAULT_PADDING_LINES: usize = 0;

/// Largest padding count honored; larger overrides are capped to it.
pub const MAX_PADDING_COUNT: usize = 4096;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WidthConfig {
    pub padding_chars: usize,
}

impl Default for WidthConfig {
    fn default() -> Self {
        Self {
            padding_chars: DEFAULT_PADDING_CHARS,
        }
    }
}

impl WidthConfig {
    pub fn merged(overrides: WidthOverrides) -> Self {
        let defaults = Self::default();
        Self {
            padding_chars: overrides
                .padding_chars
                .map(|n| clamp_count("padding_chars", n))
                .unwrap_or(defaults.padding_chars),
        }
    }
}

/// Caller-supplied width settings; `None` keeps the default.
///
/// Counts are signed because they usually come from loosely typed callers;
/// negative values degrade to zero padding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WidthOverrides {
    pub padding_chars: Option<i64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeightConfig {
    pub padding_lines: usize,
    /// Read the probe height twice and keep the second reading.
    ///
    /// Some engines return a pre-reflow value on the first read after the
    /// probe's width is pinned.
    pub double_read: bool,
}

impl Default for HeightConfig {
    fn default() -> Self {
        Self {
            padding_lines: DEFAULT_PADDING_LINES,
            double_read: true,
        }
    }
}

impl HeightConfig {
    pub fn merged(overrides: HeightOverrides) -> Self {
        let defaults = Self::default();
        Self {
            padding_lines: overrides
                .padding_lines
                .map(|n| clamp_count("padding_lines", n))
                .unwrap_or(defaults.padding_lines),
            double_read: overrides.double_read.unwrap_or(defaults.double_read),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeightOverrides {
    pub padding_lines: Option<i64>,
    pub double_read: Option<bool>,
}

fn clamp_count(field: &str, raw: i64) -> usize {
    if raw < 0 {
        debug!(target: "autosize.config", "{field}={raw} is negative; using 0");
        return 0;
    }
    match usize::try_from(raw) {
        Ok(n) if n <= MAX_PADDING_COUNT => n,
        _ => {
            debug!(
                target: "autosize.config",
                "{field}={raw} is too large; using {MAX_PADDING_COUNT}"
            );
            MAX_PADDING_COUNT
        }
    }
}
