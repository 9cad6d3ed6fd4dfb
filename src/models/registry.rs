// ============================================================================
// PACKAGE REGISTRY - Dueño de la colección de encomendas
// ============================================================================
// Orden de la colección = orden de registro, más reciente primero.
// Cada mutación persiste la colección completa.
// ============================================================================

use chrono::Utc;

use crate::models::error::{RegistryError, RegistryResult};
use crate::models::package::{NewPackage, Package, PackageStatus};
use crate::models::query::{PackageQuery, StatusCounts};
use crate::services::offline_service::{PackageStore, StoredRecord};

pub struct PackageRegistry {
    packages: Vec<Package>,
    /// Registros guardados que no se pudieron interpretar; se reescriben tal cual
    unreadable: Vec<StoredRecord>,
    /// El slot tenía datos ilegibles que no se pudieron respaldar: no se escribe
    write_locked: bool,
    store: Box<dyn PackageStore>,
}

impl PackageRegistry {
    /// Cargar la colección desde el store (una sola vez al iniciar).
    ///
    /// Ningún dato guardado se descarta: un registro ilegible se conserva
    /// tal cual y vuelve al slot en cada guardado. Si el slot completo es
    /// ilegible se copia a un slot de respaldo antes de sobrescribirlo, y si
    /// la copia falla el registro queda en modo solo lectura.
    pub fn load(store: Box<dyn PackageStore>) -> Self {
        let mut write_locked = false;
        let records = match store.load() {
            Ok(Some(records)) => records,
            Ok(None) => Vec::new(),
            Err(e) => {
                log::error!("❌ [REGISTRY] No se pudo leer la colección guardada: {}", e);
                if let Err(backup_err) = store.backup_unreadable() {
                    log::error!(
                        "❌ [REGISTRY] Sin respaldo de los datos ilegibles ({}), no se guardarán cambios",
                        backup_err
                    );
                    write_locked = true;
                }
                Vec::new()
            }
        };

        let mut packages = Vec::with_capacity(records.len());
        let mut unreadable = Vec::new();
        for record in records {
            match serde_json::from_value::<Package>(record.clone()) {
                Ok(package) => packages.push(package),
                Err(e) => {
                    log::warn!("⚠️ [REGISTRY] Registro ilegible conservado sin cambios: {}", e);
                    unreadable.push(record);
                }
            }
        }

        let repaired = packages.iter_mut().map(|p| p.repair()).filter(|r| *r).count();
        if repaired > 0 {
            log::warn!("⚠️ [REGISTRY] {} registros reparados al cargar", repaired);
        }

        log::info!("📦 [REGISTRY] Registro iniciado con {} encomendas", packages.len());
        Self {
            packages,
            unreadable,
            write_locked,
            store,
        }
    }

    /// Registrar una nueva encomenda (estado inicial Na Portaria)
    pub fn register(&mut self, fields: NewPackage) -> RegistryResult<Package> {
        fields.validate()?;

        let package = Package::received(self.fresh_id(), fields, Utc::now());
        log::info!(
            "📥 [REGISTRY] Registrada {} para {} ({})",
            package.id,
            package.recipient,
            package.location
        );
        self.packages.insert(0, package.clone());
        self.persist()?;
        Ok(package)
    }

    /// Cambiar el estado de una encomenda.
    ///
    /// Solo se acepta el siguiente paso de la máquina lineal; la firma solo
    /// se guarda al pasar a Entregue.
    pub fn transition(
        &mut self,
        id: &str,
        new_status: PackageStatus,
        signature: Option<String>,
    ) -> RegistryResult<Package> {
        let package = self
            .packages
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;

        package.apply_transition(new_status, signature, Utc::now())?;
        let updated = package.clone();
        log::info!("🔄 [REGISTRY] {} -> {}", updated.id, updated.status);

        self.persist()?;
        Ok(updated)
    }

    /// Avanzar al siguiente estado (acción única del action sheet)
    pub fn advance(&mut self, id: &str, signature: Option<String>) -> RegistryResult<Package> {
        let current = self
            .get(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?
            .status;
        let next = current.next().ok_or(RegistryError::InvalidTransition {
            from: current,
            to: current,
        })?;
        self.transition(id, next, signature)
    }

    /// Vista perezosa y reiniciable (Clone) sobre la colección filtrada
    pub fn list<'a>(
        &'a self,
        query: &'a PackageQuery,
    ) -> impl Iterator<Item = &'a Package> + Clone + 'a {
        self.packages.iter().filter(move |p| query.matches(p))
    }

    pub fn get(&self, id: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.id == id)
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for pkg in &self.packages {
            counts.add(pkg.status);
        }
        counts
    }

    /// Guardar la colección completa; un reintento antes de reportar el error
    fn persist(&self) -> RegistryResult<()> {
        if self.write_locked {
            log::error!("❌ [REGISTRY] Colección no guardada: hay datos ilegibles sin respaldo");
            return Err(RegistryError::Storage(
                "datos guardados ilegibles sin respaldo".to_string(),
            ));
        }

        let mut records = self
            .packages
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        records.extend(self.unreadable.iter().cloned());

        if let Err(first) = self.store.save(&records) {
            log::warn!("⚠️ [REGISTRY] Error guardando ({}), reintentando...", first);
            if let Err(e) = self.store.save(&records) {
                log::error!("❌ [REGISTRY] Colección no guardada: {}", e);
                return Err(e);
            }
        }
        Ok(())
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = uuid::Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::query::StatusFilter;
    use crate::services::offline_service::InMemoryStore;
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    fn new_package(recipient: &str, location: &str) -> NewPackage {
        NewPackage {
            tracking: None,
            recipient: recipient.to_string(),
            location: location.to_string(),
            kind: "Caixa".to_string(),
            photo: None,
        }
    }

    fn registry() -> (PackageRegistry, Rc<InMemoryStore>) {
        let store = Rc::new(InMemoryStore::new());
        (PackageRegistry::load(Box::new(store.clone())), store)
    }

    fn assert_history_invariants(pkg: &Package) {
        assert_eq!(pkg.history.first().map(|h| h.status), Some(PackageStatus::ReceivedAtDesk));
        assert_eq!(pkg.history.last().map(|h| h.status), Some(pkg.status));
    }

    #[test]
    fn register_starts_at_the_desk() {
        let (mut registry, store) = registry();
        let pkg = registry.register(new_package("Ana", "Bloco B")).unwrap();

        assert_eq!(pkg.status, PackageStatus::ReceivedAtDesk);
        assert_eq!(pkg.history.len(), 1);
        assert_eq!(pkg.signature, None);
        assert_history_invariants(&pkg);
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn register_rejects_empty_fields_without_touching_storage() {
        let (mut registry, store) = registry();
        let err = registry.register(new_package("", "Bloco B")).unwrap_err();
        assert!(matches!(err, RegistryError::Validation("recipient")));
        assert!(registry.is_empty());
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn full_lifecycle_records_history_and_signature() {
        let (mut registry, _store) = registry();
        let id = registry.register(new_package("Ana", "Bloco B")).unwrap().id;

        let pkg = registry
            .transition(&id, PackageStatus::AvailableForPickup, None)
            .unwrap();
        assert_eq!(pkg.status, PackageStatus::AvailableForPickup);
        assert_eq!(pkg.history.len(), 2);
        assert_eq!(pkg.signature, None);

        let pkg = registry
            .transition(&id, PackageStatus::Delivered, Some("data:image/png;base64,AAA".into()))
            .unwrap();
        assert_eq!(pkg.status, PackageStatus::Delivered);
        assert_eq!(pkg.history.len(), 3);
        assert_eq!(pkg.signature.as_deref(), Some("data:image/png;base64,AAA"));
        assert_history_invariants(&pkg);
    }

    #[test]
    fn unknown_id_is_not_found_and_changes_nothing() {
        let (mut registry, store) = registry();
        registry.register(new_package("Ana", "Bloco B")).unwrap();
        let before = registry.packages().to_vec();

        let err = registry
            .transition("nope", PackageStatus::AvailableForPickup, None)
            .unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(ref id) if id == "nope"));
        assert_eq!(registry.packages(), before.as_slice());
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn delivered_is_terminal_and_backward_moves_are_rejected() {
        let (mut registry, _store) = registry();
        let id = registry.register(new_package("Ana", "Bloco B")).unwrap().id;
        registry.advance(&id, None).unwrap();

        assert!(registry
            .transition(&id, PackageStatus::ReceivedAtDesk, None)
            .is_err());

        registry.advance(&id, None).unwrap();
        assert!(matches!(
            registry.advance(&id, None),
            Err(RegistryError::InvalidTransition { from: PackageStatus::Delivered, .. })
        ));
        assert!(registry
            .transition(&id, PackageStatus::Delivered, Some("sig".into()))
            .is_err());

        let pkg = registry.get(&id).unwrap();
        assert_eq!(pkg.history.len(), 3);
        assert_eq!(pkg.signature, None);
    }

    #[test]
    fn list_all_is_newest_first() {
        let (mut registry, _store) = registry();
        for name in ["Ana", "Bruno", "Carla"] {
            registry.register(new_package(name, "Torre A")).unwrap();
        }
        let query = PackageQuery::default();
        let names: Vec<_> = registry.list(&query).map(|p| p.recipient.as_str()).collect();
        assert_eq!(names, vec!["Carla", "Bruno", "Ana"]);
    }

    #[test]
    fn list_searches_recipient_and_location_case_insensitively() {
        let (mut registry, _store) = registry();
        registry.register(new_package("Ana Souza", "Bloco B")).unwrap();
        registry.register(new_package("Bruno", "Sala 12")).unwrap();
        registry.register(new_package("Carla", "bloco c")).unwrap();

        let query = PackageQuery::new("BLOCO", StatusFilter::All);
        let names: Vec<_> = registry.list(&query).map(|p| p.recipient.as_str()).collect();
        assert_eq!(names, vec!["Carla", "Ana Souza"]);

        let query = PackageQuery::new("souza", StatusFilter::All);
        assert_eq!(registry.list(&query).count(), 1);
    }

    #[test]
    fn list_combines_search_and_status_filter() {
        let (mut registry, _store) = registry();
        let ana = registry.register(new_package("Ana", "Bloco B")).unwrap().id;
        registry.register(new_package("Ana Paula", "Bloco C")).unwrap();
        registry.advance(&ana, None).unwrap();

        let query = PackageQuery::new(
            "ana",
            StatusFilter::Only(PackageStatus::AvailableForPickup),
        );
        let view = registry.list(&query);
        // La vista es reiniciable
        assert_eq!(view.clone().count(), 1);
        assert_eq!(view.map(|p| p.id.as_str()).collect::<Vec<_>>(), vec![ana.as_str()]);
    }

    #[test]
    fn collection_survives_a_reload() {
        let store = Rc::new(InMemoryStore::new());
        let mut registry = PackageRegistry::load(Box::new(store.clone()));
        let id = registry
            .register(NewPackage {
                tracking: Some("qr-991".into()),
                photo: Some("data:image/jpeg;base64,BBB".into()),
                ..new_package("Ana", "Bloco B")
            })
            .unwrap()
            .id;
        registry.advance(&id, None).unwrap();
        registry.advance(&id, Some("data:sig".into())).unwrap();

        let reloaded = PackageRegistry::load(Box::new(store.clone()));
        assert_eq!(reloaded.packages(), registry.packages());
        assert_eq!(reloaded.get(&id).unwrap().tracking.as_deref(), Some("QR-991"));
    }

    #[test]
    fn a_single_failed_write_is_retried() {
        let (mut registry, store) = registry();
        store.fail_next_writes(1);
        registry.register(new_package("Ana", "Bloco B")).unwrap();
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn persistent_write_failure_keeps_the_change_in_memory() {
        let (mut registry, store) = registry();
        store.fail_next_writes(2);
        let err = registry.register(new_package("Ana", "Bloco B")).unwrap_err();
        assert!(err.is_storage());
        assert_eq!(registry.len(), 1);
        assert_eq!(store.writes(), 0);
    }

    const READABLE_AND_BROKEN: &str = r#"[
        {"id": "b-1", "type": "Caixa", "recipient": "Bruno", "location": "Bloco C",
         "status": "Na Portaria", "createdAt": "2024-05-29T16:26:40.000Z",
         "history": [{"status": "Na Portaria", "timestamp": "2024-05-29T16:26:40.000Z"}]},
        {"id": "c-1", "type": "Envelope", "recipient": "Carla", "location": "Bloco D",
         "status": "Na Portaria"}
    ]"#;

    #[test]
    fn unreadable_records_survive_the_next_save() {
        let store = Rc::new(InMemoryStore::with_json(READABLE_AND_BROKEN));
        let mut registry = PackageRegistry::load(Box::new(store.clone()));
        assert_eq!(registry.len(), 1);

        registry.register(new_package("Ana", "Bloco B")).unwrap();

        let saved: Vec<serde_json::Value> =
            serde_json::from_str(&store.raw().unwrap()).unwrap();
        let recipients: Vec<_> = saved.iter().map(|r| r["recipient"].as_str()).collect();
        assert_eq!(recipients, vec![Some("Ana"), Some("Bruno"), Some("Carla")]);
        // El registro ilegible vuelve sin tocar
        assert_eq!(
            saved[2],
            serde_json::json!({"id": "c-1", "type": "Envelope", "recipient": "Carla",
                               "location": "Bloco D", "status": "Na Portaria"})
        );

        let reloaded = PackageRegistry::load(Box::new(store.clone()));
        assert_eq!(reloaded.len(), 2);
    }

    #[test]
    fn unreadable_slot_is_backed_up_before_writing() {
        let store = Rc::new(InMemoryStore::with_json("{not json"));
        let mut registry = PackageRegistry::load(Box::new(store.clone()));
        assert!(registry.is_empty());
        assert_eq!(store.backup().as_deref(), Some("{not json"));

        registry.register(new_package("Ana", "Bloco B")).unwrap();
        assert_eq!(store.writes(), 1);
        assert_eq!(store.backup().as_deref(), Some("{not json"));
    }

    #[test]
    fn unreadable_slot_without_backup_is_never_overwritten() {
        let store = Rc::new(InMemoryStore::with_json("{not json"));
        store.fail_backups();
        let mut registry = PackageRegistry::load(Box::new(store.clone()));

        let err = registry.register(new_package("Ana", "Bloco B")).unwrap_err();
        assert!(err.is_storage());
        assert_eq!(registry.len(), 1);
        assert_eq!(store.writes(), 0);
        assert_eq!(store.raw().as_deref(), Some("{not json"));
    }

    #[test]
    fn legacy_records_are_repaired_on_load() {
        let store = InMemoryStore::with_json(
            r#"[{"id": "d-1", "type": "Caixa", "recipient": "Davi", "location": "Bloco A",
                 "tracking": "", "status": "Entregue",
                 "createdAt": "2024-05-29T16:26:40.000Z", "history": []}]"#,
        );
        let registry = PackageRegistry::load(Box::new(store));
        let pkg = registry.get("d-1").unwrap();
        assert_history_invariants(pkg);
        assert_eq!(pkg.tracking, None);
        assert_eq!(
            pkg.history.iter().map(|h| h.status).collect::<Vec<_>>(),
            vec![PackageStatus::ReceivedAtDesk, PackageStatus::Delivered]
        );
    }

    #[test]
    fn counts_follow_transitions() {
        let (mut registry, _store) = registry();
        let a = registry.register(new_package("Ana", "B")).unwrap().id;
        registry.register(new_package("Bruno", "C")).unwrap();
        registry.advance(&a, None).unwrap();

        let counts = registry.counts();
        assert_eq!(counts.received, 1);
        assert_eq!(counts.available, 1);
        assert_eq!(counts.delivered, 0);
    }
}
