use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repository::Entity;
use crate::validation::{ValidationError, Validator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageStatus {
    Active,
    Deactivated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackagePayrollFrequency {
    Weekly,
    BiWeekly,
    SemiMonthly,
    Monthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageType {
    Standard,
    Premium,
    Custom,
}

/// Unrecognised enum label read back from storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! labelled_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($label => Ok(Self::$variant),)+
                    other => Err(UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

labelled_enum!(PackageStatus, "package status", {
    Active => "ACTIVE",
    Deactivated => "DEACTIVATED",
});

labelled_enum!(PackagePayrollFrequency, "payroll frequency", {
    Weekly => "WEEKLY",
    BiWeekly => "BI_WEEKLY",
    SemiMonthly => "SEMI_MONTHLY",
    Monthly => "MONTHLY",
});

labelled_enum!(PackageType, "package type", {
    Standard => "STANDARD",
    Premium => "PREMIUM",
    Custom => "CUSTOM",
});

/// Stored package row.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageEntity {
    pub id: Uuid,
    pub name: String,
    pub status: PackageStatus,
    pub payroll_frequency: PackagePayrollFrequency,
    pub package_type: PackageType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub contributions: f64,
}

impl Entity for PackageEntity {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Wire shape for `/v1/packages`.
///
/// `endDate` is not checked against `startDate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDto {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: Option<PackageStatus>,
    pub payroll_frequency: PackagePayrollFrequency,
    #[serde(rename = "type")]
    pub package_type: PackageType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub contributions: f64,
}

impl PackageDto {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut validator = Validator::new();
        validator.not_blank("name", &self.name, "Name is required");
        if !self.contributions.is_finite() || self.contributions < 0.0 {
            validator.reject("contributions", "Contributions must be zero or greater");
        }
        validator.finish()
    }

    pub(crate) fn into_entity(self, id: Uuid, status: PackageStatus) -> PackageEntity {
        PackageEntity {
            id,
            name: self.name.trim().to_string(),
            status,
            payroll_frequency: self.payroll_frequency,
            package_type: self.package_type,
            start_date: self.start_date,
            end_date: self.end_date,
            contributions: self.contributions,
        }
    }
}

impl From<PackageEntity> for PackageDto {
    fn from(entity: PackageEntity) -> Self {
        Self {
            id: Some(entity.id),
            name: entity.name,
            status: Some(entity.status),
            payroll_frequency: entity.payroll_frequency,
            package_type: entity.package_type,
            start_date: entity.start_date,
            end_date: entity.end_date,
            contributions: entity.contributions,
        }
    }
}
