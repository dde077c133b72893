//! Benefit packages: CRUD plus the filtered, sorted and paginated listing.

pub mod domain;
pub mod query;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{PackageDto, PackageEntity, PackagePayrollFrequency, PackageStatus, PackageType};
pub use query::{PackageFilter, PackageFilterParams, PackageQuery, PackageSort, PackageSortField};
pub use router::package_router;
pub use service::{PackageRepository, PackageService};
