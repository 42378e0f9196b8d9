//! The offscreen measurement probe and its discard-on-drop guard.

use crate::error::Error;
use crate::host::Host;
use crate::mirror::{self, StyleSnapshot};
use log::trace;

/// Offset used for `top` and `left` so the probe renders far outside the
/// viewport.
pub const OFFSCREEN_OFFSET: &str = "-999em";

/// A measurement probe that is discarded when dropped.
///
/// The probe is absolutely positioned offscreen from the moment it exists,
/// so attaching it never shifts page layout or flashes on screen. Every exit
/// path (normal return, `?`, unwinding) removes it from the document.
pub struct OffscreenProbe<'h, H: Host> {
    host: &'h mut H,
    node: H::Node,
}

impl<'h, H: Host> OffscreenProbe<'h, H> {
    pub fn create(host: &'h mut H) -> Result<Self, Error> {
        let node = host.create_probe()?;
        let mut probe = Self { host, node };
        probe.set_style("position", "absolute")?;
        probe.set_style("top", OFFSCREEN_OFFSET)?;
        probe.set_style("left", OFFSCREEN_OFFSET)?;
        Ok(probe)
    }

    pub fn node(&self) -> &H::Node {
        &self.node
    }

    /// Read-only access to the host while the probe is alive.
    pub fn host(&self) -> &H {
        self.host
    }

    pub fn mirror(&mut self, snapshot: &StyleSnapshot) -> usize {
        mirror::apply(self.host, &self.node, snapshot)
    }

    pub fn set_style(&mut self, name: &str, value: &str) -> Result<(), Error> {
        self.host.set_style_property(&self.node, name, value)
    }

    pub fn set_text(&mut self, text: &str) -> Result<(), Error> {
        self.host.set_text(&self.node, text)
    }

    pub fn attach(&mut self) -> Result<(), Error> {
        self.host.attach(&self.node)
    }

    /// Pin the content-box width.
    pub fn set_width(&mut self, px: f32) -> Result<(), Error> {
        self.host.set_width(&self.node, px)
    }

    pub fn width(&self) -> f32 {
        self.host.width(&self.node)
    }

    pub fn height(&self) -> f32 {
        self.host.height(&self.node)
    }
}

impl<H: Host> Drop for OffscreenProbe<'_, H> {
    fn drop(&mut self) {
        trace!(target: "autosize.probe", "discarding probe {:?}", self.node);
        self.host.discard(&self.node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_host::TestHost;

    #[test]
    fn probe_is_offscreen_from_creation() {
        let mut host = TestHost::new();
        let probe = OffscreenProbe::create(&mut host).expect("probe");
        let node = *probe.node();
        let host = probe.host();
        assert_eq!(host.inline(node, "position"), Some("absolute"));
        assert_eq!(host.inline(node, "top"), Some(OFFSCREEN_OFFSET));
        assert_eq!(host.inline(node, "left"), Some(OFFSCREEN_OFFSET));
    }

    #[test]
    fn drop_discards_even_after_an_error() {
        let mut host = TestHost::new();
        let result: Result<(), Error> = (|| {
            let mut probe = OffscreenProbe::create(&mut host)?;
            probe.attach()?;
            Err(Error::Host("boom".into()))
        })();
        assert!(result.is_err());
        assert_eq!(host.live_probes(), 0);
        assert_eq!(host.attached_probes(), 0);
    }
}
