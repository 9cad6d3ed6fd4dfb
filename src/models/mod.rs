pub mod error;
pub mod package;
pub mod query;
pub mod registry;

pub use error::{RegistryError, RegistryResult};
pub use package::{HistoryEntry, NewPackage, Package, PackageStatus};
pub use query::{PackageQuery, StatusCounts, StatusFilter};
pub use registry::PackageRegistry;
