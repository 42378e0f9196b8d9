use std::env;

/// Settings for a `fieldfit` run.
///
/// Environment variables:
/// - `FIELDFIT_PADDING_CHARS`: width padding characters (default: library default)
/// - `FIELDFIT_PADDING_LINES`: height padding lines (default: library default)
/// - `FIELDFIT_LEGACY`: emulate the legacy engine when `1` or `true` (default: false)
/// - `FIELDFIT_DOUBLE_READ`: read the probe height twice (default: true)
/// - `FIELDFIT_TEXTAREA_WIDTH`: textarea width in px (default: the UA width)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Settings {
    pub padding_chars: Option<i64>,
    pub padding_lines: Option<i64>,
    pub legacy: bool,
    pub double_read: Option<bool>,
    pub textarea_width: Option<f32>,
}

impl Settings {
    #[inline]
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    #[must_use]
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            padding_chars: lookup("FIELDFIT_PADDING_CHARS").and_then(|val| val.trim().parse().ok()),
            padding_lines: lookup("FIELDFIT_PADDING_LINES").and_then(|val| val.trim().parse().ok()),
            legacy: lookup("FIELDFIT_LEGACY").and_then(|val| parse_flag(&val)).unwrap_or(false),
            double_read: lookup("FIELDFIT_DOUBLE_READ").and_then(|val| parse_flag(&val)),
            textarea_width: lookup("FIELDFIT_TEXTAREA_WIDTH")
                .and_then(|val| val.trim().parse::<f32>().ok())
                .filter(|w| w.is_finite() && *w > 0.0),
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Settings {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_vars(|key| map.get(key).cloned())
    }

    #[test]
    fn empty_environment_keeps_defaults() {
        assert_eq!(settings(&[]), Settings::default());
    }

    #[test]
    fn reads_every_variable() {
        let s = settings(&[
            ("FIELDFIT_PADDING_CHARS", "3"),
            ("FIELDFIT_PADDING_LINES", "-2"),
            ("FIELDFIT_LEGACY", "TRUE"),
            ("FIELDFIT_DOUBLE_READ", "0"),
            ("FIELDFIT_TEXTAREA_WIDTH", "177"),
        ]);
        assert_eq!(s.padding_chars, Some(3));
        assert_eq!(s.padding_lines, Some(-2));
        assert!(s.legacy);
        assert_eq!(s.double_read, Some(false));
        assert_eq!(s.textarea_width, Some(177.0));
    }

    #[test]
    fn garbage_values_are_ignored() {
        let s = settings(&[
            ("FIELDFIT_PADDING_CHARS", "lots"),
            ("FIELDFIT_LEGACY", "maybe"),
            ("FIELDFIT_TEXTAREA_WIDTH", "-5"),
        ]);
        assert_eq!(s, Settings::default());
    }
}
