//! Padding strings appended to a control's value before it is measured.

/// Filler for width padding: a wide glyph in most proportional fonts.
pub const WIDTH_FILLER: char = 'W';

/// Filler for height padding: one extra line per unit.
pub const HEIGHT_FILLER: char = '\n';

/// Appended after a final line break so the engine does not collapse it.
pub const TRAILING_LINE_PLACEHOLDER: char = '.';

/// Exactly `count` copies of `filler`; `count == 0` yields an empty string.
pub fn padding_string(count: usize, filler: char) -> String {
    std::iter::repeat_n(filler, count).collect()
}
