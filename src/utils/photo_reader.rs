use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{File, FileReader, HtmlInputElement};

/// Primer archivo seleccionado en un <input type="file">
pub fn selected_file(input: &HtmlInputElement) -> Option<File> {
    input.files()?.get(0)
}

/// Leer un archivo como data URL; `on_loaded` recibe el contenido tal cual
pub fn read_as_data_url<F>(file: &File, on_loaded: F) -> Result<(), JsValue>
where
    F: FnOnce(String) + 'static,
{
    let reader = FileReader::new()?;
    let reader_clone = reader.clone();

    let onload = Closure::once(move |_e: web_sys::Event| {
        match reader_clone.result().ok().and_then(|r| r.as_string()) {
            Some(data_url) => on_loaded(data_url),
            None => log::warn!("⚠️ [PHOTO] FileReader terminó sin resultado"),
        }
    });
    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    // El reader se libera después de onload
    onload.forget();

    reader.read_as_data_url(file)
}
