// ============================================================================
// PORTARIA MAIL DESK - FRONTEND MVVM (RUST PURO)
// ============================================================================
// Arquitectura MVVM:
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Intenciones de la UI sobre el registro
// - Services: Persistencia (localStorage)
// - State: State Management con Rc<RefCell>
// - Models: Encomendas, máquina de estados y registro
// ============================================================================

mod config;
mod models;
mod services;
mod viewmodels;
mod state;
mod dom;
mod views;
mod utils;
mod app;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use crate::app::App;
use crate::config::CONFIG;
use crate::dom::incremental::NEEDS_FULL_RENDER;
use crate::state::app_state::UpdateType;

// Variable estática global para mantener la instancia de App
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Inicializar panic hook para mejor debugging
    console_error_panic_hook::set_once();

    // Inicializar logging
    let level = if CONFIG.is_logging_enabled() {
        log::Level::Info
    } else {
        log::Level::Warn
    };
    wasm_logger::init(wasm_logger::Config::new(level));
    log::info!("🚀 Portaria Mail Desk - Rust Puro + MVVM ({})", CONFIG.environment);

    // Crear y renderizar app
    let mut app = App::new()?;
    app.render()?;

    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    Ok(())
}

/// Función pública para re-renderizar la app (re-render completo)
pub fn rerender_app() {
    rerender_app_with_type(UpdateType::FullRender);
}

/// Función pública para actualizar la app con tipo específico
pub fn rerender_app_with_type(update_type: UpdateType) {
    APP.with(|app_cell| {
        let needs_full_render = match update_type {
            UpdateType::Incremental(inc_type) => {
                log::debug!("🔄 [UPDATE] Actualización incremental: {:?}", inc_type);
                match app_cell.borrow().as_ref() {
                    Some(app) => match app.update_incremental(inc_type) {
                        Ok(()) => false,
                        Err(e) if e.as_string().as_deref() == Some(NEEDS_FULL_RENDER) => {
                            log::info!("🔄 [UPDATE] Cambiando a re-render completo");
                            true
                        }
                        Err(e) => {
                            log::error!("❌ [UPDATE] Error en actualización incremental: {:?}", e);
                            false
                        }
                    },
                    None => {
                        log::warn!("⚠️ [UPDATE] App no está inicializada");
                        false
                    }
                }
            }
            UpdateType::FullRender => true,
        };

        if !needs_full_render {
            return;
        }

        // El borrow anterior ya se liberó
        match app_cell.borrow_mut().as_mut() {
            Some(app) => {
                if let Err(e) = app.render() {
                    log::error!("❌ [RERENDER] Error re-renderizando: {:?}", e);
                }
            }
            None => log::warn!("⚠️ [RERENDER] App no está inicializada"),
        }
    });
}

/// Función pública WASM para re-renderizar la app (llamable desde JavaScript)
#[wasm_bindgen]
pub fn rerender_app_wasm() {
    rerender_app();
}
