//! One-time detection of the legacy scrollbar-allowance defect.
//!
//! Some engines reserve a slightly different scrollbar gutter for a plain
//! block with `overflow-y: scroll` than for a text area. A height probe then
//! wraps text earlier than the control does and overestimates the height.
//! The defect is detected once per page load by laying out a fixed string
//! that sits just below the wrapping point, then the same string plus one
//! character: a defective engine wraps (and grows) on the second layout.

use crate::error::Error;
use crate::host::Host;
use crate::probe::OffscreenProbe;
use log::{debug, warn};
use std::cell::OnceCell;

pub const QUIRK_PROBE_TEXT: &str = "asd asdlkjasd asdlk";
pub const QUIRK_PROBE_WIDTH: &str = "235px";
pub const QUIRK_PROBE_FONT_SIZE: &str = "24px";
pub const QUIRK_PROBE_FONT_FAMILY: &str = "Arial";

/// Width subtracted from a height probe when the defect is present.
pub const SCROLLBAR_ALLOWANCE_COMPENSATION: f32 = 2.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Quirks {
    pub scrollbar_allowance_bug: bool,
}

impl Quirks {
    pub fn width_compensation(self) -> f32 {
        if self.scrollbar_allowance_bug {
            SCROLLBAR_ALLOWANCE_COMPENSATION
        } else {
            0.0
        }
    }
}

/// Run the detection probe against `host`.
pub fn detect<H: Host>(host: &mut H) -> Result<Quirks, Error> {
    let mut probe = OffscreenProbe::create(host)?;
    probe.set_style("width", QUIRK_PROBE_WIDTH)?;
    probe.set_style("font-size", QUIRK_PROBE_FONT_SIZE)?;
    probe.set_style("font-family", QUIRK_PROBE_FONT_FAMILY)?;
    probe.set_style("overflow-y", "scroll")?;
    probe.attach()?;

    probe.set_text(QUIRK_PROBE_TEXT)?;
    let before = probe.height();

    let mut extended = String::with_capacity(QUIRK_PROBE_TEXT.len() + 1);
    extended.push_str(QUIRK_PROBE_TEXT);
    extended.push('.');
    probe.set_text(&extended)?;
    let after = probe.height();

    Ok(Quirks {
        scrollbar_allowance_bug: after > before,
    })
}

/// Write-once holder for the page's [`Quirks`].
///
/// The first height measurement runs [`detect`]; every later one reads the
/// stored value. A failed detection is stored as "no defect" so it is not
/// retried either.
#[derive(Debug, Default)]
pub struct QuirkCache {
    cell: OnceCell<Quirks>,
}

impl QuirkCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The detected quirks, if detection already ran.
    pub fn get(&self) -> Option<Quirks> {
        self.cell.get().copied()
    }

    pub fn get_or_detect<H: Host>(&self, host: &mut H) -> Quirks {
        if let Some(quirks) = self.cell.get() {
            return *quirks;
        }
        let quirks = match detect(host) {
            Ok(quirks) => {
                debug!(target: "autosize.quirks", "detected {quirks:?}");
                quirks
            }
            Err(err) => {
                warn!(target: "autosize.quirks", "quirk detection failed, assuming none: {err}");
                Quirks::default()
            }
        };
        *self.cell.get_or_init(|| quirks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_host::TestHost;

    #[test]
    fn compensation_is_two_px_only_with_the_bug() {
        assert_eq!(Quirks::default().width_compensation(), 0.0);
        let q = Quirks {
            scrollbar_allowance_bug: true,
        };
        assert_eq!(q.width_compensation(), 2.0);
    }

    #[test]
    fn detection_reports_growth_on_the_extended_string() {
        let mut host = TestHost::new();
        host.scrollbar_bug = true;
        assert!(detect(&mut host).expect("detect").scrollbar_allowance_bug);
        assert_eq!(host.live_probes(), 0);

        let mut host = TestHost::new();
        assert!(!detect(&mut host).expect("detect").scrollbar_allowance_bug);
    }

    #[test]
    fn cache_runs_detection_once() {
        let mut host = TestHost::new();
        host.scrollbar_bug = true;
        let cache = QuirkCache::new();
        assert_eq!(cache.get(), None);

        let first = cache.get_or_detect(&mut host);
        let probes_after_first = host.probes_created();
        let second = cache.get_or_detect(&mut host);

        assert_eq!(first, second);
        assert_eq!(host.probes_created(), probes_after_first);
        assert_eq!(cache.get(), Some(first));
    }

    #[test]
    fn failed_detection_is_cached_as_no_defect() {
        let mut host = TestHost::new();
        host.fail_create_probe = true;
        let cache = QuirkCache::new();
        assert_eq!(cache.get_or_detect(&mut host), Quirks::default());
        host.fail_create_probe = false;
        host.scrollbar_bug = true;
        assert_eq!(cache.get_or_detect(&mut host), Quirks::default());
    }
}
