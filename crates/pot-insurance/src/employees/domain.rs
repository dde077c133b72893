use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repository::Entity;
use crate::validation::{ValidationError, Validator};

/// Stored employee row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeEntity {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: Option<NaiveDate>,
    pub active: bool,
}

impl Entity for EmployeeEntity {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Wire shape for `/v1/employees`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl EmployeeDto {
    pub fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .not_blank("firstName", &self.first_name, "First name is required")
            .not_blank("lastName", &self.last_name, "Last name is required")
            .email("email", &self.email, "Email must be a valid address")
            .finish()
    }

    pub(crate) fn into_entity(self, id: Uuid, active: bool) -> EmployeeEntity {
        EmployeeEntity {
            id,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            date_of_birth: self.date_of_birth,
            active,
        }
    }
}

impl From<EmployeeEntity> for EmployeeDto {
    fn from(entity: EmployeeEntity) -> Self {
        Self {
            id: Some(entity.id),
            first_name: entity.first_name,
            last_name: entity.last_name,
            email: entity.email,
            date_of_birth: entity.date_of_birth,
            active: entity.active,
        }
    }
}
