use std::fmt;

use serde::Serialize;

/// A single rejected field on an inbound DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

/// Every violation found on a payload; never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            violations: vec![FieldViolation {
                field,
                message: message.into(),
            }],
        }
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|violation| violation.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self
            .violations
            .iter()
            .map(|violation| violation.message.as_str())
            .collect();
        write!(f, "validation failed: {}", messages.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Accumulates violations so callers see every problem in one response.
#[derive(Debug, Default)]
pub struct Validator {
    violations: Vec<FieldViolation>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject(&mut self, field: &'static str, message: impl Into<String>) -> &mut Self {
        self.violations.push(FieldViolation {
            field,
            message: message.into(),
        });
        self
    }

    pub fn not_blank(&mut self, field: &'static str, value: &str, message: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.reject(field, message);
        }
        self
    }

    pub fn required<T>(
        &mut self,
        field: &'static str,
        value: Option<&T>,
        message: &str,
    ) -> &mut Self {
        if value.is_none() {
            self.reject(field, message);
        }
        self
    }

    /// Address must parse the way the mail transport will parse it.
    pub fn email(&mut self, field: &'static str, value: &str, message: &str) -> &mut Self {
        if value.trim().parse::<lettre::Address>().is_err() {
            self.reject(field, message);
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                violations: std::mem::take(&mut self.violations),
            })
        }
    }
}
