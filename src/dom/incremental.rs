// ============================================================================
// INCREMENTAL DOM UPDATES - Actualización incremental del DOM
// ============================================================================
// Solo reemplaza el bloque que cambió; si el bloque no existe en el DOM
// actual se devuelve NEEDS_FULL_RENDER y lib.rs hace un re-render completo.
// ============================================================================

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::config::CONFIG;
use crate::dom::{append_child, get_element_by_id, has_class, remove_class, scroll_to_top, set_inner_html};
use crate::state::app_state::AppState;
use crate::utils::{ACTION_SHEET_ID, PACKAGES_LIST_ID, PHOTO_PREVIEW_ID, ROOT_ID, SCANNER_MODAL_ID};
use crate::views::action_sheet::{mount_signature_pad, render_action_sheet};
use crate::views::register_form::render_photo_preview;
use crate::views::render_package_list;
use crate::views::scanner::{render_scanner, start_scanner, stop_scanner};

pub const NEEDS_FULL_RENDER: &str = "needs full render";

fn existing(id: &str) -> Result<Element, JsValue> {
    get_element_by_id(id).ok_or_else(|| {
        log::warn!("⚠️ [INCREMENTAL] #{} no existe", id);
        JsValue::from_str(NEEDS_FULL_RENDER)
    })
}

fn replace(old: &Element, new: &Element) -> Result<(), JsValue> {
    old.replace_with_with_node_1(new)
}

/// Lista de encomendas (búsqueda mientras se escribe)
pub fn update_package_list(state: &AppState) -> Result<(), JsValue> {
    let old = existing(PACKAGES_LIST_ID)?;
    let new = render_package_list(state)?;
    replace(&old, &new)?;
    scroll_to_top(&new);
    Ok(())
}

/// Abrir o cerrar el action sheet
pub fn update_action_sheet(state: &AppState) -> Result<(), JsValue> {
    let old = existing(ACTION_SHEET_ID)?;
    let is_open = state.active_package_id.borrow().is_some();

    if !is_open {
        // Animación de cierre antes de vaciar el contenedor
        if has_class(&old, "active") {
            remove_class(&old, "active")?;
            Timeout::new(CONFIG.ui_config.sheet_animation_ms, move || {
                if !has_class(&old, "active") {
                    set_inner_html(&old, "");
                }
            })
            .forget();
        }
        return Ok(());
    }

    let new = render_action_sheet(state)?;
    replace(&old, &new)?;
    mount_signature_pad(state)
}

/// Mostrar u ocultar el modal del scanner
pub fn update_scanner(state: &AppState) -> Result<(), JsValue> {
    let show = *state.show_scanner.borrow();
    let current = get_element_by_id(SCANNER_MODAL_ID);

    match (show, current) {
        (true, None) => {
            let root = existing(ROOT_ID)?;
            let app = root
                .first_element_child()
                .ok_or_else(|| JsValue::from_str(NEEDS_FULL_RENDER))?;
            append_child(&app, &render_scanner(state)?)?;
            start_scanner(state);
        }
        (false, Some(modal)) => {
            stop_scanner(state);
            modal.remove();
        }
        _ => {}
    }
    Ok(())
}

/// Preview de la foto del formulario
pub fn update_photo_preview(state: &AppState) -> Result<(), JsValue> {
    let old = existing(PHOTO_PREVIEW_ID)?;
    let new = render_photo_preview(state)?;
    replace(&old, &new)
}
