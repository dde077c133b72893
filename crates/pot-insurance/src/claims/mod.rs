//! Claim submissions. Amounts are exact decimals and must be positive.

pub mod domain;
pub mod router;
pub mod service;

pub use domain::{ClaimDto, ClaimEntity, DEACTIVATED_STATUS};
pub use router::claim_router;
pub use service::ClaimService;
