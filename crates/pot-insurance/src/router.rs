use std::sync::Arc;

use axum::Router;

use crate::claims::{claim_router, ClaimEntity, ClaimService};
use crate::employees::{employee_router, EmployeeEntity, EmployeeService};
use crate::notifications::{notification_router, MailTransport, NotificationService};
use crate::packages::{package_router, PackageEntity, PackageRepository, PackageService};
use crate::repository::Repository;
use crate::storage::{MemoryRepository, SqliteRepository};

/// Services behind the `/v1` resource routes, type-erased over their stores.
#[derive(Clone)]
pub struct ApiServices {
    pub employees: Arc<EmployeeService<dyn Repository<EmployeeEntity>>>,
    pub claims: Arc<ClaimService<dyn Repository<ClaimEntity>>>,
    pub packages: Arc<PackageService<dyn PackageRepository>>,
    pub notifications: Arc<NotificationService<dyn MailTransport>>,
}

impl ApiServices {
    pub fn new(
        employees: Arc<dyn Repository<EmployeeEntity>>,
        claims: Arc<dyn Repository<ClaimEntity>>,
        packages: Arc<dyn PackageRepository>,
        mailer: Arc<dyn MailTransport>,
        sender: impl Into<String>,
    ) -> Self {
        Self {
            employees: Arc::new(EmployeeService::new(employees)),
            claims: Arc::new(ClaimService::new(claims)),
            packages: Arc::new(PackageService::new(packages)),
            notifications: Arc::new(NotificationService::new(mailer, sender)),
        }
    }

    /// Process-local stores; contents are lost on restart.
    pub fn in_memory(mailer: Arc<dyn MailTransport>, sender: impl Into<String>) -> Self {
        Self::new(
            Arc::new(MemoryRepository::<EmployeeEntity>::default()),
            Arc::new(MemoryRepository::<ClaimEntity>::default()),
            Arc::new(MemoryRepository::<PackageEntity>::default()),
            mailer,
            sender,
        )
    }

    /// All three resources share one connection pool.
    pub fn sqlite(
        repository: SqliteRepository,
        mailer: Arc<dyn MailTransport>,
        sender: impl Into<String>,
    ) -> Self {
        Self::new(
            Arc::new(repository.clone()),
            Arc::new(repository.clone()),
            Arc::new(repository),
            mailer,
            sender,
        )
    }
}

/// Every resource route of the API merged into one router.
pub fn api_router(services: &ApiServices) -> Router {
    Router::new()
        .merge(employee_router(services.employees.clone()))
        .merge(claim_router(services.claims.clone()))
        .merge(package_router(services.packages.clone()))
        .merge(notification_router(services.notifications.clone()))
}
