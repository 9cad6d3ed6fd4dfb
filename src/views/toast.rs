// ============================================================================
// TOAST VIEW - Mensaje temporal
// ============================================================================

use std::cell::Cell;
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::config::CONFIG;
use crate::dom::{add_class, get_element_by_id, remove_class, set_text_content, ElementBuilder};
use crate::utils::TOAST_ID;

thread_local! {
    // Cada toast nuevo invalida el timeout del anterior
    static GENERATION: Cell<u64> = Cell::new(0);
}

pub fn render_toast() -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .id(TOAST_ID)?
        .class("toast")
        .attr("role", "status")?
        .build())
}

/// Mostrar un mensaje y ocultarlo tras `toast_duration_ms`
pub fn show_toast(message: &str) {
    let Some(toast) = get_element_by_id(TOAST_ID) else {
        log::warn!("⚠️ [TOAST] #{} no existe: {}", TOAST_ID, message);
        return;
    };

    set_text_content(&toast, message);
    if let Err(e) = add_class(&toast, "show") {
        log::warn!("⚠️ [TOAST] {:?}", e);
    }

    let generation = GENERATION.with(|g| {
        g.set(g.get() + 1);
        g.get()
    });
    Timeout::new(CONFIG.ui_config.toast_duration_ms, move || {
        if GENERATION.with(|g| g.get()) != generation {
            return;
        }
        if let Some(toast) = get_element_by_id(TOAST_ID) {
            let _ = remove_class(&toast, "show");
        }
    })
    .forget();
}
