//! Employee profiles. Deleting an employee only clears its `active` flag.

pub mod domain;
pub mod router;
pub mod service;

pub use domain::{EmployeeDto, EmployeeEntity};
pub use router::employee_router;
pub use service::EmployeeService;
