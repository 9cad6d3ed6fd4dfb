use web_sys::{window, Storage};

/// Slot de la preferencia de idioma
pub const LANGUAGE_PREF_KEY: &str = "mail_desk_language";

pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// Guardar una preferencia simple (string)
pub fn save_pref(key: &str, value: &str) -> Result<(), String> {
    let storage = get_local_storage().ok_or("No se pudo acceder a localStorage")?;
    storage
        .set_item(key, value)
        .map_err(|_| format!("Error guardando preferencia '{}'", key))
}

/// Cargar una preferencia simple (None si no existe o no hay storage)
pub fn load_pref(key: &str) -> Option<String> {
    get_local_storage()?.get_item(key).ok()?
}
