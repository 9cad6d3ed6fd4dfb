// ============================================================================
// APP - Aplicación principal
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::incremental::{
    update_action_sheet, update_package_list, update_photo_preview, update_scanner,
};
use crate::dom::{append_child, get_element_by_id, on_window_resize, set_inner_html};
use crate::state::app_state::{AppState, IncrementalUpdate};
use crate::utils::ROOT_ID;
use crate::views::action_sheet::mount_signature_pad;
use crate::views::render_app;
use crate::views::scanner::{start_scanner, stop_scanner};
use crate::views::toast::show_toast;

/// Aplicación principal
pub struct App {
    state: AppState,
    root: Element,
}

impl App {
    /// Crear nueva aplicación
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id(ROOT_ID)
            .ok_or_else(|| JsValue::from_str(&format!("No #{} element found", ROOT_ID)))?;

        let state = AppState::new();
        log::info!(
            "📦 [APP] {} encomendas cargadas",
            state.registry.borrow().len()
        );

        // El toast no re-renderiza nada: solo su propio nodo
        state.toast.subscribe(|message: &Option<String>| {
            if let Some(message) = message {
                show_toast(message);
            }
        });

        // El canvas de firma sigue al tamaño de su contenedor
        let pad_slot = state.signature_pad.clone();
        on_window_resize(move || {
            if let Some(pad) = pad_slot.borrow().as_ref() {
                pad.resize_to_parent();
            }
        })?;

        Ok(Self { state, root })
    }

    /// Renderizar aplicación
    pub fn render(&mut self) -> Result<(), JsValue> {
        // La cámara no sobrevive al DOM que se va a destruir
        stop_scanner(&self.state);

        set_inner_html(&self.root, "");
        let app_view = render_app(&self.state)?;
        append_child(&self.root, &app_view)?;

        mount_signature_pad(&self.state)?;
        if *self.state.show_scanner.borrow() {
            start_scanner(&self.state);
        }
        Ok(())
    }

    /// Actualización incremental del DOM (solo elementos específicos)
    pub fn update_incremental(&self, update_type: IncrementalUpdate) -> Result<(), JsValue> {
        match update_type {
            IncrementalUpdate::PackageList => update_package_list(&self.state),
            IncrementalUpdate::ActionSheet => update_action_sheet(&self.state),
            IncrementalUpdate::Scanner => update_scanner(&self.state),
            IncrementalUpdate::PhotoPreview => update_photo_preview(&self.state),
        }
    }
}
