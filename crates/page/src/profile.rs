//! Engine profiles: which capabilities and defects the native page emulates.

/// Capabilities and defects of the emulated engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineProfile {
    pub name: &'static str,
    /// The engine fires a native `input` event on every value change.
    pub input_event: bool,
    /// `getComputedStyle` is available.
    pub computed_style: bool,
    /// A legacy cascaded-style snapshot (`currentStyle`) is available.
    pub current_style: bool,
    /// Legacy scrollbar allowance (see `layout::LayoutOptions`).
    pub legacy_scrollbar_allowance: bool,
    /// Style properties whose read access throws.
    pub throwing_properties: &'static [&'static str],
}

impl EngineProfile {
    pub fn modern() -> Self {
        Self {
            name: "modern",
            input_event: true,
            computed_style: true,
            current_style: false,
            legacy_scrollbar_allowance: false,
            throwing_properties: &[],
        }
    }

    pub fn legacy() -> Self {
        Self {
            name: "legacy",
            input_event: false,
            computed_style: false,
            current_style: true,
            legacy_scrollbar_allowance: true,
            throwing_properties: &["font-feature-settings", "font-variation-settings"],
        }
    }

    /// Profile by name, as used on the command line and in scenario files.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "modern" => Some(Self::modern()),
            "legacy" => Some(Self::legacy()),
            _ => None,
        }
    }

    pub fn throws_on(&self, property: &str) -> bool {
        self.throwing_properties.contains(&property)
    }
}

impl Default for EngineProfile {
    fn default() -> Self {
        Self::modern()
    }
}
