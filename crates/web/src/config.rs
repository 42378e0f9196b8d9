//! Reading loosely typed JS config objects into override structs.

use autosize::{HeightOverrides, WidthOverrides};
use wasm_bindgen::JsValue;

/// Current and legacy key for the width padding count.
const PADDING_CHARS_KEYS: [&str; 2] = ["paddingCharacterCount", "numPaddingChars"];
/// Current and legacy key for the height padding count.
const PADDING_LINES_KEYS: [&str; 2] = ["paddingLineCount", "numPaddingLines"];
const DOUBLE_READ_KEY: &str = "doubleRead";

/// Integer part of a JS number; `NaN` and infinities count as unset.
pub(crate) fn js_count(n: f64) -> Option<i64> {
    if n.is_finite() {
        Some(n.trunc() as i64)
    } else {
        None
    }
}

fn property(config: &JsValue, key: &str) -> Option<JsValue> {
    if !config.is_object() {
        return None;
    }
    js_sys::Reflect::get(config, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn count(config: &JsValue, keys: &[&str]) -> Option<i64> {
    keys.iter()
        .find_map(|key| property(config, key))
        .and_then(|v| v.as_f64())
        .and_then(js_count)
}

pub fn width_overrides(config: &JsValue) -> WidthOverrides {
    WidthOverrides {
        padding_chars: count(config, &PADDING_CHARS_KEYS),
    }
}

pub fn height_overrides(config: &JsValue) -> HeightOverrides {
    HeightOverrides {
        padding_lines: count(config, &PADDING_LINES_KEYS),
        double_read: property(config, DOUBLE_READ_KEY).and_then(|v| v.as_bool()),
    }
}
