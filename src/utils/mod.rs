// Utils compartidos

pub mod constants;
pub mod format;
pub mod i18n;
pub mod photo_reader;
pub mod qr_scanner_ffi;
pub mod signature_pad;
pub mod storage;

pub use constants::*;
pub use i18n::t;
