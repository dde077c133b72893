use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repository::Entity;
use crate::validation::{ValidationError, Validator};

/// Status written by the delete endpoint. Other statuses are opaque labels
/// owned by whoever submits the claim.
pub const DEACTIVATED_STATUS: &str = "DEACTIVATED";

/// Stored claim row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimEntity {
    pub id: Uuid,
    pub claim_number: String,
    pub consumer: String,
    pub employer: String,
    pub date_of_service: NaiveDate,
    pub plan: String,
    pub amount: Decimal,
    pub status: String,
}

impl Entity for ClaimEntity {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Wire shape for `/v1/claims`. Missing fields deserialize to empty values
/// so validation can name each one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClaimDto {
    pub id: Option<Uuid>,
    pub claim_number: String,
    pub consumer: String,
    pub employer: String,
    pub date_of_service: Option<NaiveDate>,
    pub plan: String,
    pub amount: Option<Decimal>,
    pub status: String,
}

impl ClaimDto {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut validator = Validator::new();
        validator
            .not_blank("claimNumber", &self.claim_number, "Claim number is required")
            .not_blank("consumer", &self.consumer, "Consumer is required")
            .not_blank("employer", &self.employer, "Employer is required")
            .required(
                "dateOfService",
                self.date_of_service.as_ref(),
                "Date of service is required",
            )
            .not_blank("plan", &self.plan, "Plan is required");

        match self.amount {
            None => {
                validator.reject("amount", "Amount is required");
            }
            Some(amount) if amount <= Decimal::ZERO => {
                validator.reject("amount", "Amount must be greater than zero");
            }
            Some(_) => {}
        }

        validator
            .not_blank("status", &self.status, "Status is required")
            .finish()
    }

    /// Only valid after [`ClaimDto::validate`] succeeded.
    pub(crate) fn into_entity(self, id: Uuid) -> Result<ClaimEntity, ValidationError> {
        let date_of_service = self.date_of_service.ok_or_else(|| {
            ValidationError::single("dateOfService", "Date of service is required")
        })?;
        let amount = self
            .amount
            .ok_or_else(|| ValidationError::single("amount", "Amount is required"))?;

        Ok(ClaimEntity {
            id,
            claim_number: self.claim_number.trim().to_string(),
            consumer: self.consumer.trim().to_string(),
            employer: self.employer.trim().to_string(),
            date_of_service,
            plan: self.plan.trim().to_string(),
            amount,
            status: self.status.trim().to_string(),
        })
    }
}

impl From<ClaimEntity> for ClaimDto {
    fn from(entity: ClaimEntity) -> Self {
        Self {
            id: Some(entity.id),
            claim_number: entity.claim_number,
            consumer: entity.consumer,
            employer: entity.employer,
            date_of_service: Some(entity.date_of_service),
            plan: entity.plan,
            amount: Some(entity.amount),
            status: entity.status,
        }
    }
}
