//! Insurance administration backend: employees, claims, benefit packages and
//! outbound email notifications behind a layered router → service → repository
//! stack.

pub mod claims;
pub mod config;
pub mod employees;
pub mod error;
pub mod notifications;
pub mod packages;
pub mod repository;
pub mod router;
pub mod storage;
pub mod telemetry;
pub mod validation;
