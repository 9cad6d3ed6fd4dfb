// ============================================================================
// PACKAGE VIEWMODEL - Intenciones de la UI sobre el registro
// ============================================================================
// Muta AppState + registro y devuelve qué parte del DOM hay que actualizar.
// No toca el DOM: las views llaman a rerender_app_with_type con el resultado.
// ============================================================================

use crate::models::{NewPackage, Package, RegistryError, StatusFilter};
use crate::state::app_state::{ActiveView, AppState, IncrementalUpdate, UpdateType};
use crate::utils::format::status_toast;
use crate::utils::i18n::t;

/// Valores del formulario de registro (la foto viene de AppState)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegistrationForm {
    pub tracking: String,
    pub recipient: String,
    pub location: String,
    pub kind: String,
}

pub struct PackageViewModel {
    state: AppState,
}

impl PackageViewModel {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Registrar la encomenda del formulario
    pub fn register(&self, form: RegistrationForm) -> Option<UpdateType> {
        let lang = self.state.lang();
        let fields = NewPackage {
            tracking: Some(form.tracking),
            recipient: form.recipient,
            location: form.location,
            kind: form.kind,
            photo: self.state.pending_photo.borrow().clone(),
        };

        let result = self.state.registry.borrow_mut().register(fields);
        match result {
            Ok(_) => {
                self.back_to_dashboard();
                self.state.show_toast(t("toast_registrada", &lang));
                Some(UpdateType::FullRender)
            }
            Err(RegistryError::Validation(field)) => {
                // El formulario queda como está (foto incluida)
                let message = status_toast(
                    &t("toast_campo_obrigatorio", &lang),
                    &t(&format!("campo_{}", field), &lang),
                );
                self.state.show_toast(message);
                None
            }
            Err(e) if e.is_storage() => {
                // El registro quedó en memoria
                self.back_to_dashboard();
                self.state.show_toast(t("toast_nao_salvo", &lang));
                Some(UpdateType::FullRender)
            }
            Err(e) => {
                log::error!("❌ [VM] Registro inesperadamente rechazado: {}", e);
                None
            }
        }
    }

    /// Avanzar la encomenda abierta en el action sheet
    pub fn advance_active(&self, signature: Option<String>) -> Option<UpdateType> {
        let id = self.state.active_package_id.borrow().clone()?;
        let lang = self.state.lang();

        let result = self.state.registry.borrow_mut().advance(&id, signature);
        match result {
            Ok(pkg) => {
                self.close_sheet_state();
                self.state.show_toast(status_toast(
                    &t("toast_status", &lang),
                    &t(pkg.status.i18n_key(), &lang),
                ));
                Some(UpdateType::FullRender)
            }
            Err(RegistryError::NotFound(missing)) => {
                // Sin feedback al usuario: el sheet se cierra y nada cambia
                log::warn!("⚠️ [VM] Encomenda {} no existe, acción ignorada", missing);
                self.close_sheet_state();
                Some(UpdateType::FullRender)
            }
            Err(e @ RegistryError::InvalidTransition { .. }) => {
                log::warn!("⚠️ [VM] {}", e);
                None
            }
            Err(e) if e.is_storage() => {
                self.close_sheet_state();
                self.state.show_toast(t("toast_nao_salvo", &lang));
                Some(UpdateType::FullRender)
            }
            Err(e) => {
                log::error!("❌ [VM] {}", e);
                None
            }
        }
    }

    pub fn open_package(&self, id: &str) -> UpdateType {
        *self.state.active_package_id.borrow_mut() = Some(id.to_string());
        UpdateType::Incremental(IncrementalUpdate::ActionSheet)
    }

    pub fn close_package(&self) -> UpdateType {
        self.close_sheet_state();
        UpdateType::Incremental(IncrementalUpdate::ActionSheet)
    }

    pub fn set_search(&self, search: &str) -> UpdateType {
        *self.state.search.borrow_mut() = search.to_string();
        UpdateType::Incremental(IncrementalUpdate::PackageList)
    }

    pub fn set_filter(&self, filter: StatusFilter) -> UpdateType {
        *self.state.status_filter.borrow_mut() = filter;
        UpdateType::FullRender
    }

    pub fn navigate(&self, view: ActiveView) -> UpdateType {
        match view {
            ActiveView::Register => {
                self.close_sheet_state();
                *self.state.view.borrow_mut() = ActiveView::Register;
            }
            ActiveView::Dashboard => self.back_to_dashboard(),
        }
        UpdateType::FullRender
    }

    /// Foto elegida (o quitada) en el formulario
    pub fn set_photo(&self, data_url: Option<String>) -> UpdateType {
        *self.state.pending_photo.borrow_mut() = data_url;
        UpdateType::Incremental(IncrementalUpdate::PhotoPreview)
    }

    pub fn open_scanner(&self) -> UpdateType {
        *self.state.show_scanner.borrow_mut() = true;
        UpdateType::Incremental(IncrementalUpdate::Scanner)
    }

    pub fn close_scanner(&self) -> UpdateType {
        *self.state.show_scanner.borrow_mut() = false;
        UpdateType::Incremental(IncrementalUpdate::Scanner)
    }

    /// Código leído por el scanner: se cierra el modal y se avisa.
    /// El código es un candidato opaco para el campo de rastreio.
    pub fn scanned_code(&self, code: String) -> (String, UpdateType) {
        log::info!("📱 [VM] Código leído: {}", code);
        self.state.show_toast(t("toast_codigo_lido", &self.state.lang()));
        (code, self.close_scanner())
    }

    pub fn set_language(&self, lang: &str) -> UpdateType {
        self.state.set_language(lang);
        UpdateType::FullRender
    }

    /// Encomendas visibles con la búsqueda y el filtro actuales
    pub fn visible_packages(&self) -> Vec<Package> {
        let query = self.state.query();
        let registry = self.state.registry.borrow();
        registry.list(&query).cloned().collect()
    }

    pub fn active_package(&self) -> Option<Package> {
        let id = self.state.active_package_id.borrow().clone()?;
        let registry = self.state.registry.borrow();
        registry.get(&id).cloned()
    }

    fn back_to_dashboard(&self) {
        *self.state.view.borrow_mut() = ActiveView::Dashboard;
        *self.state.pending_photo.borrow_mut() = None;
    }

    fn close_sheet_state(&self) {
        *self.state.active_package_id.borrow_mut() = None;
        if let Some(pad) = self.state.signature_pad.borrow_mut().take() {
            pad.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PackageRegistry, PackageStatus};
    use crate::services::offline_service::InMemoryStore;
    use pretty_assertions::assert_eq;

    fn view_model() -> (PackageViewModel, AppState) {
        let registry = PackageRegistry::load(Box::new(InMemoryStore::new()));
        let state = AppState::with_registry(registry, "PT".to_string());
        (PackageViewModel::new(state.clone()), state)
    }

    fn form(recipient: &str, location: &str) -> RegistrationForm {
        RegistrationForm {
            tracking: "ab-1".to_string(),
            recipient: recipient.to_string(),
            location: location.to_string(),
            kind: "Caixa".to_string(),
        }
    }

    #[test]
    fn register_returns_to_dashboard_with_confirmation() {
        let (vm, state) = view_model();
        vm.navigate(ActiveView::Register);
        vm.set_photo(Some("data:image/png;base64,FOTO".into()));

        assert_eq!(vm.register(form("Ana", "Bloco B")), Some(UpdateType::FullRender));
        assert_eq!(*state.view.borrow(), ActiveView::Dashboard);
        assert_eq!(*state.pending_photo.borrow(), None);
        assert_eq!(state.toast.get().as_deref(), Some("Encomenda registrada!"));

        let pkg = &vm.visible_packages()[0];
        assert_eq!(pkg.photo.as_deref(), Some("data:image/png;base64,FOTO"));
        assert_eq!(pkg.tracking.as_deref(), Some("AB-1"));
    }

    #[test]
    fn invalid_form_keeps_the_register_view() {
        let (vm, state) = view_model();
        vm.navigate(ActiveView::Register);
        vm.set_photo(Some("data:foto".into()));

        assert_eq!(vm.register(form("Ana", "")), None);
        assert_eq!(*state.view.borrow(), ActiveView::Register);
        assert_eq!(state.pending_photo.borrow().as_deref(), Some("data:foto"));
        assert_eq!(state.toast.get().as_deref(), Some("Preencha o campo: Local"));
        assert!(state.registry.borrow().is_empty());
    }

    #[test]
    fn advance_walks_the_active_package_to_delivered() {
        let (vm, state) = view_model();
        vm.register(form("Ana", "Bloco B"));
        let id = vm.visible_packages()[0].id.clone();

        vm.open_package(&id);
        assert_eq!(vm.advance_active(None), Some(UpdateType::FullRender));
        assert_eq!(*state.active_package_id.borrow(), None);
        assert_eq!(
            state.toast.get().as_deref(),
            Some("Status atualizado: Disponível para Retirada")
        );

        vm.open_package(&id);
        vm.advance_active(Some("data:sig".into()));
        let pkg = state.registry.borrow().get(&id).cloned().unwrap();
        assert_eq!(pkg.status, PackageStatus::Delivered);
        assert_eq!(pkg.signature.as_deref(), Some("data:sig"));

        // Entregue es terminal: la acción no hace nada
        vm.open_package(&id);
        assert_eq!(vm.advance_active(None), None);
        assert_eq!(state.registry.borrow().get(&id).unwrap().history.len(), 3);
    }

    #[test]
    fn missing_package_is_a_silent_no_op() {
        let (vm, state) = view_model();
        vm.register(form("Ana", "Bloco B"));
        state.toast.set(None);

        vm.open_package("fantasma");
        assert_eq!(vm.active_package(), None);
        assert_eq!(vm.advance_active(None), Some(UpdateType::FullRender));
        assert_eq!(state.toast.get(), None);
        assert_eq!(*state.active_package_id.borrow(), None);
    }

    #[test]
    fn search_and_filter_shape_the_visible_list() {
        let (vm, _state) = view_model();
        vm.register(form("Ana", "Bloco B"));
        vm.register(form("Bruno", "Sala 12"));

        assert_eq!(
            vm.set_search("sala"),
            UpdateType::Incremental(IncrementalUpdate::PackageList)
        );
        let names: Vec<_> = vm.visible_packages().into_iter().map(|p| p.recipient).collect();
        assert_eq!(names, vec!["Bruno".to_string()]);

        vm.set_search("");
        vm.set_filter(StatusFilter::Only(PackageStatus::Delivered));
        assert!(vm.visible_packages().is_empty());
    }

    #[test]
    fn leaving_the_form_discards_the_photo() {
        let (vm, state) = view_model();
        vm.navigate(ActiveView::Register);
        vm.set_photo(Some("data:foto".into()));
        vm.navigate(ActiveView::Dashboard);
        assert_eq!(*state.pending_photo.borrow(), None);
    }

    #[test]
    fn scanned_code_closes_the_scanner() {
        let (vm, state) = view_model();
        vm.open_scanner();
        let (code, update) = vm.scanned_code("QR-123".to_string());
        assert_eq!(code, "QR-123");
        assert_eq!(update, UpdateType::Incremental(IncrementalUpdate::Scanner));
        assert!(!*state.show_scanner.borrow());
        assert_eq!(state.toast.get().as_deref(), Some("Código lido com sucesso!"));
    }
}
