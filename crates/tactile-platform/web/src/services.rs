use tactile_foundation::{CssVarReader, Haptics};
use wasm_bindgen::JsValue;

/// `navigator.vibrate`.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebHaptics;

impl Haptics for WebHaptics {
    fn is_supported(&self) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        let navigator: JsValue = window.navigator().into();
        has_property(&navigator, "vibrate")
    }

    fn vibrate(&self, duration_millis: u32) {
        if let Some(window) = web_sys::window() {
            if !window.navigator().vibrate_with_duration(duration_millis) {
                log::debug!("vibrate({duration_millis}) was rejected");
            }
        }
    }
}

fn has_property(target: &JsValue, property: &str) -> bool {
    js_sys::Reflect::has(target, &JsValue::from_str(property)).unwrap_or(false)
}

/// Reads custom properties from the computed style of `<html>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebCssReader;

impl CssVarReader for WebCssReader {
    fn read_css_var(&self, name: &str) -> Option<String> {
        let window = web_sys::window()?;
        let root = window.document()?.document_element()?;
        let style = match window.get_computed_style(&root) {
            Ok(style) => style?,
            Err(err) => {
                log::debug!("getComputedStyle failed: {err:?}");
                return None;
            }
        };
        let value = style.get_property_value(name).ok()?;
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_owned())
    }
}
