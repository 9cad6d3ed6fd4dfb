use std::env;
use std::fs;
use std::path::Path;

/// Variables que config.rs lee con option_env!
const CONFIG_KEYS: &[&str] = &[
    "ENVIRONMENT",
    "ENABLE_LOGGING",
    "STORAGE_KEY",
    "TOAST_DURATION_MS",
    "SHEET_ANIMATION_MS",
    "SCANNER_FPS",
    "SCANNER_QRBOX_SIZE",
    "DEFAULT_LANGUAGE",
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env");

    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    let env_file = Path::new(".env");
    let Ok(contents) = fs::read_to_string(env_file) else {
        // Sin .env: config.rs usa sus valores por defecto
        return;
    };

    for (key, value) in contents.lines().filter_map(parse_env_line) {
        // El entorno real tiene prioridad sobre el .env
        if env::var(key).is_err() {
            println!("cargo:rustc-env={}={}", key, value);
        }
    }
}

/// Parsear una línea KEY=VALUE (ignora comentarios y líneas vacías)
fn parse_env_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    let value = value.trim().trim_matches('"');
    Some((key.trim(), value))
}
