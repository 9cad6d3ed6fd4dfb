#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub enable_logging: bool,
    /// Slot de localStorage con la colección completa de encomendas
    pub storage_key: String,
    pub default_language: String,
    pub ui_config: UIConfig,
    pub scanner_config: ScannerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            enable_logging: true,
            storage_key: "facilities_mail_db".to_string(),
            default_language: "PT".to_string(),
            ui_config: UIConfig::default(),
            scanner_config: ScannerConfig::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UIConfig {
    pub toast_duration_ms: u32,
    /// Duración de la animación del action sheet (abrir/cerrar)
    pub sheet_animation_ms: u32,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            toast_duration_ms: 3000,
            sheet_animation_ms: 300,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScannerConfig {
    pub fps: u32,
    pub qrbox_size: u32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            fps: 10,
            qrbox_size: 250,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self::from_values(|key| match key {
            "ENVIRONMENT" => option_env!("ENVIRONMENT"),
            "ENABLE_LOGGING" => option_env!("ENABLE_LOGGING"),
            "STORAGE_KEY" => option_env!("STORAGE_KEY"),
            "DEFAULT_LANGUAGE" => option_env!("DEFAULT_LANGUAGE"),
            "TOAST_DURATION_MS" => option_env!("TOAST_DURATION_MS"),
            "SHEET_ANIMATION_MS" => option_env!("SHEET_ANIMATION_MS"),
            "SCANNER_FPS" => option_env!("SCANNER_FPS"),
            "SCANNER_QRBOX_SIZE" => option_env!("SCANNER_QRBOX_SIZE"),
            _ => None,
        })
    }

    /// Construye la configuración a partir de un lookup de valores;
    /// los valores ausentes o mal formados caen al default
    fn from_values<'a, F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let defaults = Self::default();
        let parsed = |key: &str, default: u32| {
            lookup(key).and_then(|v| v.parse().ok()).unwrap_or(default)
        };

        Self {
            environment: lookup("ENVIRONMENT")
                .map(str::to_string)
                .unwrap_or(defaults.environment),
            enable_logging: lookup("ENABLE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enable_logging),
            storage_key: lookup("STORAGE_KEY")
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .unwrap_or(defaults.storage_key),
            default_language: lookup("DEFAULT_LANGUAGE")
                .map(str::to_uppercase)
                .unwrap_or(defaults.default_language),
            ui_config: UIConfig {
                toast_duration_ms: parsed("TOAST_DURATION_MS", defaults.ui_config.toast_duration_ms),
                sheet_animation_ms: parsed("SHEET_ANIMATION_MS", defaults.ui_config.sheet_animation_ms),
            },
            scanner_config: ScannerConfig {
                fps: parsed("SCANNER_FPS", defaults.scanner_config.fps),
                qrbox_size: parsed("SCANNER_QRBOX_SIZE", defaults.scanner_config.qrbox_size),
            },
        }
    }

    /// Verifica si el modo de logging está habilitado
    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_fall_back_to_defaults() {
        let config = AppConfig::from_values(|_| None);
        assert_eq!(config.storage_key, "facilities_mail_db");
        assert_eq!(config.ui_config.toast_duration_ms, 3000);
        assert_eq!(config.scanner_config.fps, 10);
        assert_eq!(config.default_language, "PT");
        assert!(config.is_logging_enabled());
    }

    #[test]
    fn malformed_numbers_are_ignored() {
        let config = AppConfig::from_values(|key| match key {
            "TOAST_DURATION_MS" => Some("rápido"),
            "SCANNER_FPS" => Some("15"),
            "DEFAULT_LANGUAGE" => Some("es"),
            "STORAGE_KEY" => Some(""),
            _ => None,
        });
        assert_eq!(config.ui_config.toast_duration_ms, 3000);
        assert_eq!(config.scanner_config.fps, 15);
        assert_eq!(config.default_language, "ES");
        assert_eq!(config.storage_key, "facilities_mail_db");
    }
}
