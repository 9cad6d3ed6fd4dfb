pub mod package_viewmodel;

pub use package_viewmodel::{PackageViewModel, RegistrationForm};
