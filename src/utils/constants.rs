/// Tipos de encomenda del formulario: (valor guardado, clave i18n)
pub const PACKAGE_KINDS: [(&str, &str); 4] = [
    ("Caixa", "tipo_caixa"),
    ("Envelope", "tipo_envelope"),
    ("Pacote", "tipo_pacote"),
    ("Outro", "tipo_outro"),
];

// IDs del DOM usados por las actualizaciones incrementales
pub const ROOT_ID: &str = "app";
pub const PACKAGES_LIST_ID: &str = "packages-list";
pub const ACTION_SHEET_ID: &str = "action-sheet";
pub const SIGNATURE_CANVAS_ID: &str = "signature-canvas";
pub const SCANNER_MODAL_ID: &str = "scanner-modal";
pub const SCANNER_READER_ID: &str = "reader";
pub const TOAST_ID: &str = "toast";
pub const TRACKING_INPUT_ID: &str = "tracking-input";
pub const PHOTO_PREVIEW_ID: &str = "photo-preview";
