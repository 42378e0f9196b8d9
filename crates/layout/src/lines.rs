//! White-space aware line building for a single block of text.

use css::{ComputedStyle, OverflowWrap, TextTransform, WhiteSpace, WordBreak};

use crate::breaker::break_word_prefix_end;
use crate::{FIT_EPSILON, TextMeasurer};

/// One laid-out line. `width` excludes trailing (hanging) spaces unless
/// `white-space: pre`, and includes `text-indent` on the first line.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub text: String,
    pub width: f32,
}

#[derive(Clone, Debug, PartialEq)]
enum Piece {
    Word(String),
    Space(String),
}

/// Split one hard line into words and spaces.
///
/// When spaces are not preserved, each run of spaces/tabs becomes a single
/// `" "` and a leading run is dropped.
fn tokenize(segment: &str, preserve_spaces: bool) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut word = String::new();
    let mut spaces = String::new();

    fn flush_spaces(spaces: &mut String, pieces: &mut Vec<Piece>, preserve: bool) {
        let run = std::mem::take(spaces);
        if preserve {
            pieces.push(Piece::Space(run));
        } else if !pieces.is_empty() {
            pieces.push(Piece::Space(" ".to_string()));
        }
    }

    for ch in segment.chars() {
        match ch {
            ' ' | '\t' => {
                if !word.is_empty() {
                    pieces.push(Piece::Word(std::mem::take(&mut word)));
                }
                spaces.push(ch);
            }
            _ => {
                if !spaces.is_empty() {
                    flush_spaces(&mut spaces, &mut pieces, preserve_spaces);
                }
                word.push(ch);
            }
        }
    }
    // trailing spaces still count when preserved (they hang)
    if preserve_spaces && !spaces.is_empty() {
        pieces.push(Piece::Space(spaces));
    }
    if !word.is_empty() {
        pieces.push(Piece::Word(word));
    }
    pieces
}

pub fn apply_text_transform(text: &str, transform: TextTransform) -> String {
    match transform {
        TextTransform::None => text.to_string(),
        TextTransform::Uppercase => text.to_uppercase(),
        TextTransform::Lowercase => text.to_lowercase(),
        TextTransform::Capitalize => {
            let mut out = String::with_capacity(text.len());
            let mut at_word_start = true;
            for ch in text.chars() {
                if ch.is_whitespace() {
                    at_word_start = true;
                    out.push(ch);
                } else if at_word_start {
                    at_word_start = false;
                    out.extend(ch.to_uppercase());
                } else {
                    out.push(ch);
                }
            }
            out
        }
    }
}

/// The hard lines of `text` under the style's `white-space`.
///
/// A final line break does not open a new (empty) line; empty text has no
/// lines at all.
fn hard_segments(text: &str, style: &ComputedStyle) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    if !style.white_space.preserves_newlines() {
        return vec![text.replace('\n', " ")];
    }
    let body = text.strip_suffix('\n').unwrap_or(&text);
    body.split('\n').map(str::to_string).collect()
}

struct LineSink<'m> {
    measurer: &'m dyn TextMeasurer,
    style: &'m ComputedStyle,
    lines: Vec<Line>,
}

impl LineSink<'_> {
    fn indent(&self) -> f32 {
        if self.lines.is_empty() {
            self.style.text_indent
        } else {
            0.0
        }
    }

    fn width_of(&self, text: &str) -> f32 {
        // trailing spaces hang, except under `pre`
        let counted = if self.style.white_space == WhiteSpace::Pre {
            text
        } else {
            text.trim_end_matches([' ', '\t'])
        };
        self.indent() + self.measurer.measure(counted, self.style)
    }

    fn push(&mut self, text: String) {
        let width = self.width_of(&text);
        self.lines.push(Line { text, width });
    }
}

/// Lay `text` out into lines no wider than `max_width` (when the style
/// wraps and a limit is given).
pub fn build_lines(
    measurer: &dyn TextMeasurer,
    style: &ComputedStyle,
    text: &str,
    max_width: Option<f32>,
) -> Vec<Line> {
    let text = apply_text_transform(text, style.text_transform);
    let preserve_spaces = style.white_space.preserves_spaces();
    let limit = max_width.filter(|_| style.white_space.wraps());
    let can_break_words = style.overflow_wrap != OverflowWrap::Normal
        || style.word_break == WordBreak::BreakAll;

    let mut sink = LineSink {
        measurer,
        style,
        lines: Vec::new(),
    };

    for segment in hard_segments(&text, style) {
        let pieces = tokenize(&segment, preserve_spaces);
        let Some(limit) = limit else {
            let joined: String = pieces
                .iter()
                .map(|p| match p {
                    Piece::Word(w) | Piece::Space(w) => w.as_str(),
                })
                .collect();
            sink.push(joined);
            continue;
        };

        let mut current = String::new();
        for piece in pieces {
            match piece {
                Piece::Space(s) => {
                    // a collapsed space never starts a wrapped line
                    if preserve_spaces || !current.is_empty() {
                        current.push_str(&s);
                    }
                }
                Piece::Word(word) => {
                    let mut candidate = current.clone();
                    candidate.push_str(&word);
                    if sink.width_of(&candidate) <= limit + FIT_EPSILON {
                        current = candidate;
                        continue;
                    }
                    if !current.trim_end_matches([' ', '\t']).is_empty() {
                        sink.push(std::mem::take(&mut current));
                    } else if !preserve_spaces {
                        current.clear();
                    }
                    let mut rest = word.as_str();
                    loop {
                        let mut candidate = current.clone();
                        candidate.push_str(rest);
                        if sink.width_of(&candidate) <= limit + FIT_EPSILON || !can_break_words {
                            current = candidate;
                            break;
                        }
                        let room = (limit - sink.width_of(&current)).max(0.0);
                        let cut = break_word_prefix_end(measurer, style, rest, room);
                        current.push_str(&rest[..cut]);
                        sink.push(std::mem::take(&mut current));
                        rest = &rest[cut..];
                        if rest.is_empty() {
                            break;
                        }
                    }
                }
            }
        }
        sink.push(current);
    }

    sink.lines
}

/// Widest line, in px.
pub fn max_line_width(lines: &[Line]) -> f32 {
    lines.iter().map(|l| l.width).fold(0.0, f32::max)
}
