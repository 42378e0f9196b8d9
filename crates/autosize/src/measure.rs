//! The width and height procedures.
//!
//! Both follow the same shape: snapshot the control's style, build an
//! offscreen probe mirroring it, inject the padded value as literal text,
//! read one layout metric, discard the probe, then size the control.

use crate::config::{HeightConfig, WidthConfig};
use crate::error::Error;
use crate::host::Host;
use crate::mirror;
use crate::padding::{HEIGHT_FILLER, TRAILING_LINE_PLACEHOLDER, WIDTH_FILLER, padding_string};
use crate::probe::OffscreenProbe;
use crate::quirks::Quirks;
use log::debug;

/// Text rendered into a width probe: the value followed by the padding
/// characters.
pub fn width_probe_text(value: &str, padding_chars: usize) -> String {
    let mut text = String::with_capacity(value.len().saturating_add(padding_chars));
    text.push_str(value);
    text.push_str(&padding_string(padding_chars, WIDTH_FILLER));
    text
}

/// Text rendered into a height probe.
///
/// Engines drop a final line break when laying out a block, so a value that
/// ends in `'\n'` gets one placeholder character after it to keep the last
/// (empty) line.
pub fn height_probe_text(value: &str, padding_lines: usize) -> String {
    let capacity = value.len().saturating_add(padding_lines).saturating_add(1);
    let mut text = String::with_capacity(capacity);
    text.push_str(value);
    text.push_str(&padding_string(padding_lines, HEIGHT_FILLER));
    if text.ends_with('\n') {
        text.push(TRAILING_LINE_PLACEHOLDER);
    }
    text
}

/// Size `target`'s width to its value plus `config.padding_chars` `W`s.
///
/// Returns the applied content width.
pub fn auto_width<H: Host>(
    host: &mut H,
    target: &H::Node,
    config: &WidthConfig,
) -> Result<f32, Error> {
    let text = width_probe_text(&host.value(target), config.padding_chars);
    let snapshot = mirror::capture(host, target);

    let width = {
        let mut probe = OffscreenProbe::create(host)?;
        probe.mirror(&snapshot);
        probe.set_style("display", "block")?;
        probe.set_style("width", "auto")?;
        probe.set_style("white-space", "pre")?;
        probe.set_text(&text)?;
        probe.attach()?;
        probe.width()
    };

    debug!(
        target: "autosize.measure",
        "width {width}px for {target:?} ({} chars incl. padding)",
        text.chars().count()
    );
    host.set_width(target, width)?;
    Ok(width)
}

/// Size `target`'s height to its value plus `config.padding_lines` blank
/// lines.
///
/// The probe wraps like a text area (`pre-wrap`, break long words) at the
/// control's current width, minus the quirk compensation. The control is
/// first set to twice the measured height so an existing vertical scrollbar
/// goes away, then to the measured height.
///
/// Returns the applied content height.
pub fn auto_height<H: Host>(
    host: &mut H,
    target: &H::Node,
    config: &HeightConfig,
    quirks: Quirks,
) -> Result<f32, Error> {
    let text = height_probe_text(&host.value(target), config.padding_lines);
    let snapshot = mirror::capture(host, target);

    let height = {
        let mut probe = OffscreenProbe::create(host)?;
        probe.mirror(&snapshot);
        probe.set_style("height", "auto")?;
        probe.set_style("white-space", "pre-wrap")?;
        probe.set_style("word-wrap", "break-word")?;
        probe.set_style("overflow-wrap", "break-word")?;
        probe.attach()?;
        probe.set_text(&text)?;

        // Without a pinned width the probe could grow a scrollbar of its own.
        let pinned = (probe.host().width(target) - quirks.width_compensation()).max(0.0);
        probe.set_width(pinned)?;

        let mut height = probe.height();
        if config.double_read {
            height = probe.height();
        }
        height
    };

    debug!(
        target: "autosize.measure",
        "height {height}px for {target:?} ({} lines incl. padding)",
        text.split('\n').count()
    );
    host.set_height(target, height * 2.0)?;
    host.set_height(target, height)?;
    Ok(height)
}
