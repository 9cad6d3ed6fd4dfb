// ============================================================================
// SCANNER VIEW - Lectura de códigos con html5-qrcode (Rust puro)
// ============================================================================

use std::rc::Rc;
use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Element;
use crate::config::CONFIG;
use crate::dom::{append_child, on_click, stop_click_propagation, ElementBuilder};
use crate::state::app_state::AppState;
use crate::utils::i18n::t;
use crate::utils::qr_scanner_ffi::{scanner_config, Html5QrcodeScanner};
use crate::utils::{SCANNER_MODAL_ID, SCANNER_READER_ID};
use crate::viewmodels::PackageViewModel;
use crate::views::apply_update;
use crate::views::register_form::fill_tracking;

/// Renderizar modal del scanner
pub fn render_scanner(state: &AppState) -> Result<Element, JsValue> {
    let lang = state.lang();
    let vm = Rc::new(PackageViewModel::new(state.clone()));

    let modal = ElementBuilder::new("div")?
        .id(SCANNER_MODAL_ID)?
        .class("scanner-modal active")
        .build();

    // Overlay (cierra al hacer click)
    let overlay = ElementBuilder::new("div")?
        .class("scanner-overlay")
        .build();
    {
        let vm = vm.clone();
        on_click(&overlay, move |_e| apply_update(Some(vm.close_scanner())))?;
    }
    append_child(&modal, &overlay)?;

    let close_btn = ElementBuilder::new("button")?
        .class("btn-close")
        .attr("type", "button")?
        .text("✕")
        .build();
    {
        let vm = vm.clone();
        on_click(&close_btn, move |_e| apply_update(Some(vm.close_scanner())))?;
    }

    let content = ElementBuilder::new("div")?
        .class("scanner-content")
        .child(
            ElementBuilder::new("div")?
                .class("scanner-header")
                .child(ElementBuilder::new("h2")?.text(&t("scanner_titulo", &lang)).build())?
                .child(close_btn)?
                .build(),
        )?
        // Contenedor que html5-qrcode llena con la cámara
        .child(
            ElementBuilder::new("div")?
                .id(SCANNER_READER_ID)?
                .class("scanner-reader")
                .build(),
        )?
        .build();
    stop_click_propagation(&content)?;
    append_child(&modal, &content)?;

    Ok(modal)
}

/// Arrancar la cámara cuando el modal ya está en el DOM
pub fn start_scanner(state: &AppState) {
    let state = state.clone();

    // Pequeño delay para que el contenedor tenga tamaño
    Timeout::new(100, move || {
        if !*state.show_scanner.borrow() || state.scanner.borrow().is_some() {
            return;
        }
        if let Err(e) = attach_scanner(&state) {
            log::error!("❌ [SCANNER] No se pudo iniciar: {:?}", e);
        }
    })
    .forget();
}

fn attach_scanner(state: &AppState) -> Result<(), JsValue> {
    log::info!("📷 [SCANNER] Inicializando html5-qrcode...");
    let config = scanner_config(CONFIG.scanner_config.fps, CONFIG.scanner_config.qrbox_size)?;
    let scanner = Html5QrcodeScanner::new(SCANNER_READER_ID, &config, false);

    let on_success = {
        let state = state.clone();
        Closure::wrap(Box::new(move |decoded: JsValue, _result: JsValue| {
            // La librería puede disparar varias lecturas antes de clear()
            if !*state.show_scanner.borrow() {
                return;
            }
            let Some(code) = decoded.as_string() else {
                return;
            };
            let (code, update) = PackageViewModel::new(state.clone()).scanned_code(code);
            fill_tracking(&code);
            apply_update(Some(update));
        }) as Box<dyn FnMut(JsValue, JsValue)>)
    };

    // Errores de lectura por frame: se ignoran
    let on_error = Closure::wrap(Box::new(move |_error: JsValue| {}) as Box<dyn FnMut(JsValue)>);

    scanner.render(on_success.as_ref().unchecked_ref(), on_error.as_ref().unchecked_ref());
    on_success.forget();
    on_error.forget();

    *state.scanner.borrow_mut() = Some(scanner);
    Ok(())
}

/// Detener la cámara (si está activa) sin bloquear la UI
pub fn stop_scanner(state: &AppState) {
    let Some(scanner) = state.scanner.borrow_mut().take() else {
        return;
    };
    let promise = scanner.clear();
    wasm_bindgen_futures::spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(_) => log::info!("🛑 [SCANNER] Cámara detenida"),
            Err(e) => log::warn!("⚠️ [SCANNER] Error deteniendo la cámara: {:?}", e),
        }
    });
}
