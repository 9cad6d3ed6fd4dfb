use thiserror::Error;

use crate::models::package::PackageStatus;

/// Errores del registro de encomendas
#[derive(Debug, Error)]
pub enum RegistryError {
    /// El id no existe en la colección (la colección queda intacta)
    #[error("Encomenda no encontrada: {0}")]
    NotFound(String),

    /// Campo obligatorio vacío en el registro
    #[error("Campo obligatorio vacío: {0}")]
    Validation(&'static str),

    /// Transición fuera de la máquina lineal (retroceso, salto o estado terminal)
    #[error("Transición inválida: {from} -> {to}")]
    InvalidTransition {
        from: PackageStatus,
        to: PackageStatus,
    },

    #[error("Error de almacenamiento: {0}")]
    Storage(String),

    #[error("Error serializando encomendas: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RegistryError {
    /// Errores de persistencia (el cambio en memoria se mantiene)
    pub fn is_storage(&self) -> bool {
        matches!(self, RegistryError::Storage(_) | RegistryError::Serialization(_))
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;
