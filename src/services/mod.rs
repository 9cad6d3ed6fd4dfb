// Persistencia de la colección

pub mod offline_service;

pub use offline_service::{InMemoryStore, LocalStorageStore, PackageStore};
