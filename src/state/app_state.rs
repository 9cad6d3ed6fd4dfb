// ============================================================================
// APP STATE - Estado de la aplicación
// ============================================================================
// El registro es el dueño de los datos; el resto es estado de UI.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::CONFIG;
use crate::models::{PackageQuery, PackageRegistry, StatusFilter};
use crate::services::offline_service::{InMemoryStore, LocalStorageStore};
use crate::state::ReactiveState;
use crate::utils::qr_scanner_ffi::Html5QrcodeScanner;
use crate::utils::signature_pad::SignaturePad;
use crate::utils::storage::{load_pref, save_pref, LANGUAGE_PREF_KEY};

/// Tipo de actualización del DOM
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateType {
    /// Actualización incremental (solo elementos específicos)
    Incremental(IncrementalUpdate),
    /// Re-render completo (navegación, registro, cambio de estado)
    FullRender,
}

/// Tipo de actualización incremental específica
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncrementalUpdate {
    /// Re-renderizar solo la lista (búsqueda mientras se escribe)
    PackageList,
    /// Abrir/cerrar el action sheet
    ActionSheet,
    /// Mostrar/ocultar el modal del scanner
    Scanner,
    /// Preview de la foto en el formulario
    PhotoPreview,
}

/// Pantalla activa
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ActiveView {
    #[default]
    Dashboard,
    Register,
}

#[derive(Clone)]
pub struct AppState {
    pub registry: Rc<RefCell<PackageRegistry>>,

    // UI State
    pub view: Rc<RefCell<ActiveView>>,
    pub search: Rc<RefCell<String>>,
    pub status_filter: Rc<RefCell<StatusFilter>>,
    pub language: Rc<RefCell<String>>,

    // Action sheet: encomenda abierta
    pub active_package_id: Rc<RefCell<Option<String>>>,

    // Capturas externas
    pub pending_photo: Rc<RefCell<Option<String>>>,
    pub signature_pad: Rc<RefCell<Option<SignaturePad>>>,
    pub show_scanner: Rc<RefCell<bool>>,
    pub scanner: Rc<RefCell<Option<Html5QrcodeScanner>>>,

    /// Mensaje del toast (None = oculto)
    pub toast: ReactiveState<Option<String>>,
}

impl AppState {
    /// Estado del navegador: colección desde localStorage (o memoria si no hay)
    pub fn new() -> Self {
        let registry = if LocalStorageStore::is_available() {
            PackageRegistry::load(Box::new(LocalStorageStore::new(CONFIG.storage_key.clone())))
        } else {
            log::warn!("⚠️ [STATE] localStorage no disponible, los datos no se conservarán");
            PackageRegistry::load(Box::new(InMemoryStore::new()))
        };
        let language = load_pref(LANGUAGE_PREF_KEY).unwrap_or_else(|| CONFIG.default_language.clone());

        Self::with_registry(registry, language)
    }

    /// Estado a partir de un registro ya cargado
    pub fn with_registry(registry: PackageRegistry, language: String) -> Self {
        Self {
            registry: Rc::new(RefCell::new(registry)),
            view: Rc::new(RefCell::new(ActiveView::Dashboard)),
            search: Rc::new(RefCell::new(String::new())),
            status_filter: Rc::new(RefCell::new(StatusFilter::All)),
            language: Rc::new(RefCell::new(language)),
            active_package_id: Rc::new(RefCell::new(None)),
            pending_photo: Rc::new(RefCell::new(None)),
            signature_pad: Rc::new(RefCell::new(None)),
            show_scanner: Rc::new(RefCell::new(false)),
            scanner: Rc::new(RefCell::new(None)),
            toast: ReactiveState::new(None),
        }
    }

    /// Consulta actual (búsqueda + chip de estado)
    pub fn query(&self) -> PackageQuery {
        PackageQuery::new(&self.search.borrow(), *self.status_filter.borrow())
    }

    pub fn lang(&self) -> String {
        self.language.borrow().clone()
    }

    /// Establecer language y guardar en localStorage
    pub fn set_language(&self, lang: &str) {
        *self.language.borrow_mut() = lang.to_string();
        if let Err(e) = save_pref(LANGUAGE_PREF_KEY, lang) {
            log::warn!("⚠️ [STATE] {}", e);
        }
    }

    pub fn show_toast(&self, message: String) {
        self.toast.set(Some(message));
    }
}
