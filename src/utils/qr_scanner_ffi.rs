// ============================================================================
// QR SCANNER FFI - Foreign Function Interface para html5-qrcode
// ============================================================================
// Wrappers para la librería JS Html5QrcodeScanner - Sin estado, sin lógica
// ============================================================================

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[derive(Clone, Debug)]
    pub type Html5QrcodeScanner;

    #[wasm_bindgen(constructor)]
    pub fn new(element_id: &str, config: &JsValue, verbose: bool) -> Html5QrcodeScanner;

    /// on_success(decodedText, decodedResult) / on_error(errorMessage)
    #[wasm_bindgen(method)]
    pub fn render(
        this: &Html5QrcodeScanner,
        on_success: &js_sys::Function,
        on_error: &js_sys::Function,
    );

    /// Detiene la cámara y limpia el contenedor
    #[wasm_bindgen(method)]
    pub fn clear(this: &Html5QrcodeScanner) -> js_sys::Promise;
}

/// Construir `{ fps, qrbox: { width, height } }`
pub fn scanner_config(fps: u32, qrbox_size: u32) -> Result<JsValue, JsValue> {
    let qrbox = js_sys::Object::new();
    js_sys::Reflect::set(&qrbox, &"width".into(), &qrbox_size.into())?;
    js_sys::Reflect::set(&qrbox, &"height".into(), &qrbox_size.into())?;

    let config = js_sys::Object::new();
    js_sys::Reflect::set(&config, &"fps".into(), &fps.into())?;
    js_sys::Reflect::set(&config, &"qrbox".into(), &qrbox)?;
    Ok(config.into())
}
