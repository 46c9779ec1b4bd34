// Small helpers shared by the component layer.

use wasm_bindgen::JsValue;

pub fn clog(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

/// Wall-clock seconds, used to derive per-tick dt.
pub fn now_secs() -> f64 {
    js_sys::Date::now() / 1000.0
}
