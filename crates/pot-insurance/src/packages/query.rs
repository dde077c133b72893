use std::cmp::Ordering;

use serde::Deserialize;

use super::domain::{PackageEntity, PackageStatus};
use crate::repository::{PageRequest, SortDirection, DEFAULT_PAGE_SIZE};
use crate::validation::{ValidationError, Validator};

/// Raw `GET /v1/packages/filtered` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageFilterParams {
    pub name: Option<String>,
    pub status: Option<PackageStatus>,
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

/// Conjunctive match over the supplied criteria; `None` matches everything.
/// Name matching folds ASCII case only, the same as SQLite `LIKE`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageFilter {
    pub name: Option<String>,
    pub status: Option<PackageStatus>,
}

impl PackageFilter {
    pub fn matches(&self, package: &PackageEntity) -> bool {
        let name_matches = match &self.name {
            Some(needle) => package
                .name
                .to_ascii_lowercase()
                .contains(&needle.to_ascii_lowercase()),
            None => true,
        };
        let status_matches = self.status.map_or(true, |status| package.status == status);
        name_matches && status_matches
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageSortField {
    Name,
    Status,
    PayrollFrequency,
    Type,
    StartDate,
    EndDate,
    Contributions,
}

impl PackageSortField {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "name" => Some(Self::Name),
            "status" => Some(Self::Status),
            "payrollFrequency" => Some(Self::PayrollFrequency),
            "type" => Some(Self::Type),
            "startDate" => Some(Self::StartDate),
            "endDate" => Some(Self::EndDate),
            "contributions" => Some(Self::Contributions),
            _ => None,
        }
    }

    /// Column name; only ever interpolated from this whitelist.
    pub fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Status => "status",
            Self::PayrollFrequency => "payroll_frequency",
            Self::Type => "package_type",
            Self::StartDate => "start_date",
            Self::EndDate => "end_date",
            Self::Contributions => "contributions",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageSort {
    pub field: PackageSortField,
    pub direction: SortDirection,
}

impl Default for PackageSort {
    fn default() -> Self {
        Self {
            field: PackageSortField::Name,
            direction: SortDirection::Ascending,
        }
    }
}

impl PackageSort {
    /// Parses `field` or `field,dir`.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let (field, direction) = match raw.split_once(',') {
            Some((field, direction)) => (field, Some(direction)),
            None => (raw, None),
        };

        let field = PackageSortField::parse(field).ok_or_else(|| {
            ValidationError::single("sort", format!("Unsupported sort field '{}'", field.trim()))
        })?;
        let direction = match direction {
            Some(direction) => SortDirection::parse(direction).ok_or_else(|| {
                ValidationError::single(
                    "sort",
                    format!("Unsupported sort direction '{}'", direction.trim()),
                )
            })?,
            None => SortDirection::Ascending,
        };

        Ok(Self { field, direction })
    }

    /// Stored values compare the way the SQL `ORDER BY` sees them: labels
    /// and ISO dates as text.
    pub fn compare(&self, left: &PackageEntity, right: &PackageEntity) -> Ordering {
        let ordering = match self.field {
            PackageSortField::Name => left.name.cmp(&right.name),
            PackageSortField::Status => left.status.as_str().cmp(right.status.as_str()),
            PackageSortField::PayrollFrequency => left
                .payroll_frequency
                .as_str()
                .cmp(right.payroll_frequency.as_str()),
            PackageSortField::Type => left.package_type.as_str().cmp(right.package_type.as_str()),
            PackageSortField::StartDate => left.start_date.cmp(&right.start_date),
            PackageSortField::EndDate => left.end_date.cmp(&right.end_date),
            PackageSortField::Contributions => left.contributions.total_cmp(&right.contributions),
        };

        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Validated filter, sort and page window.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackageQuery {
    pub filter: PackageFilter,
    pub sort: PackageSort,
    pub page: PageRequest,
}

impl PackageQuery {
    pub fn from_params(params: PackageFilterParams) -> Result<Self, ValidationError> {
        let mut validator = Validator::new();

        let sort = match params.sort.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => match PackageSort::parse(raw) {
                Ok(sort) => sort,
                Err(err) => {
                    for violation in err.violations {
                        validator.reject(violation.field, violation.message);
                    }
                    PackageSort::default()
                }
            },
            _ => PackageSort::default(),
        };

        let size = params.size.unwrap_or(DEFAULT_PAGE_SIZE);
        if size == 0 {
            validator.reject("size", "Page size must be greater than zero");
        }
        validator.finish()?;

        let name = params
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        Ok(Self {
            filter: PackageFilter {
                name,
                status: params.status,
            },
            sort,
            page: PageRequest::new(params.page.unwrap_or(0), size),
        })
    }
}
