// ============================================================================
// OFFLINE SERVICE - Persistencia de la colección en el navegador
// ============================================================================
// La colección completa se guarda como una sola unidad (array JSON) en un
// slot de localStorage. Sin escrituras parciales ni versionado.
// ============================================================================

use std::cell::{Cell, RefCell};

use gloo_storage::errors::StorageError;
use gloo_storage::{LocalStorage, Storage};

use crate::models::error::{RegistryError, RegistryResult};
use crate::utils::storage::get_local_storage;

/// Un registro tal como está en el slot (sin interpretar)
pub type StoredRecord = serde_json::Value;

/// Sufijo del slot donde se copia un contenido ilegible antes de sobrescribirlo
pub const UNREADABLE_BACKUP_SUFFIX: &str = "_corrupt";

/// Almacenamiento durable de la colección de encomendas
pub trait PackageStore {
    /// Leer los registros (None si el slot nunca se escribió).
    /// Falla si el slot no es un array JSON.
    fn load(&self) -> RegistryResult<Option<Vec<StoredRecord>>>;

    /// Sobrescribir la colección completa
    fn save(&self, records: &[StoredRecord]) -> RegistryResult<()>;

    /// Copiar el contenido actual del slot, tal cual, al slot de respaldo
    fn backup_unreadable(&self) -> RegistryResult<()>;
}

fn storage_error(e: StorageError) -> RegistryError {
    match e {
        StorageError::SerdeError(e) => RegistryError::Serialization(e),
        other => RegistryError::Storage(other.to_string()),
    }
}

/// Store sobre localStorage (slot único)
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// localStorage puede estar deshabilitado (modo privado, políticas)
    pub fn is_available() -> bool {
        get_local_storage().is_some()
    }
}

impl PackageStore for LocalStorageStore {
    fn load(&self) -> RegistryResult<Option<Vec<StoredRecord>>> {
        match LocalStorage::get::<Vec<StoredRecord>>(&self.key) {
            Ok(records) => {
                log::info!("📋 [STORAGE] {} registros leídos de '{}'", records.len(), self.key);
                Ok(Some(records))
            }
            Err(StorageError::KeyNotFound(_)) => {
                log::info!("ℹ️ [STORAGE] Slot '{}' vacío", self.key);
                Ok(None)
            }
            Err(e) => Err(storage_error(e)),
        }
    }

    fn save(&self, records: &[StoredRecord]) -> RegistryResult<()> {
        LocalStorage::set(&self.key, records).map_err(storage_error)?;
        log::info!("💾 [STORAGE] {} registros guardados", records.len());
        Ok(())
    }

    fn backup_unreadable(&self) -> RegistryResult<()> {
        let storage = LocalStorage::raw();
        let backup_key = format!("{}{}", self.key, UNREADABLE_BACKUP_SUFFIX);
        let raw = storage
            .get_item(&self.key)
            .map_err(|e| RegistryError::Storage(format!("{:?}", e)))?;
        if let Some(raw) = raw {
            storage
                .set_item(&backup_key, &raw)
                .map_err(|e| RegistryError::Storage(format!("{:?}", e)))?;
            log::warn!("🗄️ [STORAGE] Contenido ilegible copiado a '{}'", backup_key);
        }
        Ok(())
    }
}

/// Store en memoria: fallback cuando no hay localStorage y store de tests.
/// Guarda el JSON serializado para que el round trip sea real.
#[derive(Default)]
pub struct InMemoryStore {
    slot: RefCell<Option<String>>,
    backup: RefCell<Option<String>>,
    failing_writes: Cell<u32>,
    failing_backup: Cell<bool>,
    writes: Cell<u32>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store con un JSON ya guardado
    #[cfg(test)]
    pub fn with_json(json: impl Into<String>) -> Self {
        let store = Self::default();
        *store.slot.borrow_mut() = Some(json.into());
        store
    }

    /// Las próximas `n` escrituras fallan
    #[cfg(test)]
    pub fn fail_next_writes(&self, n: u32) {
        self.failing_writes.set(n);
    }

    #[cfg(test)]
    pub fn fail_backups(&self) {
        self.failing_backup.set(true);
    }

    /// Número de escrituras que llegaron al slot
    #[cfg(test)]
    pub fn writes(&self) -> u32 {
        self.writes.get()
    }

    #[cfg(test)]
    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    #[cfg(test)]
    pub fn backup(&self) -> Option<String> {
        self.backup.borrow().clone()
    }
}

impl PackageStore for InMemoryStore {
    fn load(&self) -> RegistryResult<Option<Vec<StoredRecord>>> {
        match self.slot.borrow().as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, records: &[StoredRecord]) -> RegistryResult<()> {
        let pending_failures = self.failing_writes.get();
        if pending_failures > 0 {
            self.failing_writes.set(pending_failures - 1);
            return Err(RegistryError::Storage("escritura rechazada".to_string()));
        }
        let json = serde_json::to_string(records)?;
        *self.slot.borrow_mut() = Some(json);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn backup_unreadable(&self) -> RegistryResult<()> {
        if self.failing_backup.get() {
            return Err(RegistryError::Storage("respaldo rechazado".to_string()));
        }
        *self.backup.borrow_mut() = self.slot.borrow().clone();
        Ok(())
    }
}

impl<S: PackageStore + ?Sized> PackageStore for std::rc::Rc<S> {
    fn load(&self) -> RegistryResult<Option<Vec<StoredRecord>>> {
        (**self).load()
    }

    fn save(&self, records: &[StoredRecord]) -> RegistryResult<()> {
        (**self).save(records)
    }

    fn backup_unreadable(&self) -> RegistryResult<()> {
        (**self).backup_unreadable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_memory_store_loads_nothing() {
        let store = InMemoryStore::new();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn corrupt_json_is_a_serialization_error() {
        let store = InMemoryStore::with_json("{not json");
        assert!(matches!(store.load(), Err(RegistryError::Serialization(_))));
    }

    #[test]
    fn records_are_loaded_without_interpretation() {
        let store = InMemoryStore::with_json(r#"[{"id": 1}, {"recipient": "Ana"}]"#);
        let records = store.load().unwrap().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["id"], 1);
    }

    #[test]
    fn backup_copies_the_slot_verbatim() {
        let store = InMemoryStore::with_json("{not json");
        store.backup_unreadable().unwrap();
        assert_eq!(store.backup().as_deref(), Some("{not json"));
        assert_eq!(store.raw().as_deref(), Some("{not json"));
    }

    #[test]
    fn failing_writes_are_counted_down() {
        let store = InMemoryStore::new();
        store.fail_next_writes(1);
        assert!(store.save(&[]).is_err());
        assert!(store.save(&[]).is_ok());
        assert_eq!(store.writes(), 1);
        assert_eq!(store.raw().as_deref(), Some("[]"));
    }
}
