use std::sync::Arc;

use async_trait::async_trait;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;
use uuid::Uuid;

use crate::packages::{
    PackageDto, PackageEntity, PackagePayrollFrequency, PackageQuery, PackageRepository,
    PackageService, PackageStatus, PackageType,
};
use crate::repository::{Page, Repository, RepositoryError};
use crate::storage::MemoryRepository;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn package_dto(name: &str) -> PackageDto {
    PackageDto {
        id: None,
        name: name.to_string(),
        status: None,
        payroll_frequency: PackagePayrollFrequency::Monthly,
        package_type: PackageType::Standard,
        start_date: date(2024, 1, 1),
        end_date: date(2024, 12, 31),
        contributions: 100.0,
    }
}

pub(super) fn package_entity(name: &str, status: PackageStatus, contributions: f64) -> PackageEntity {
    PackageEntity {
        id: Uuid::new_v4(),
        name: name.to_string(),
        status,
        payroll_frequency: PackagePayrollFrequency::Monthly,
        package_type: PackageType::Standard,
        start_date: date(2024, 1, 1),
        end_date: date(2024, 12, 31),
        contributions,
    }
}

pub(super) fn build_service() -> (
    PackageService<MemoryRepository<PackageEntity>>,
    Arc<MemoryRepository<PackageEntity>>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = PackageService::new(repository.clone());
    (service, repository)
}

/// Five active packages out of name order plus one deactivated package.
pub(super) async fn seed(repository: &MemoryRepository<PackageEntity>) -> Vec<PackageEntity> {
    let rows = vec![
        package_entity("Package D", PackageStatus::Active, 400.0),
        package_entity("Package B", PackageStatus::Active, 200.0),
        package_entity("Package E", PackageStatus::Active, 500.0),
        package_entity("Package A", PackageStatus::Active, 100.0),
        package_entity("Package C", PackageStatus::Active, 300.0),
        package_entity("Package Archived", PackageStatus::Deactivated, 50.0),
    ];
    for row in &rows {
        repository.insert(row.clone()).await.expect("seeded");
    }
    rows
}

pub(super) struct UnavailableRepository;

#[async_trait]
impl Repository<PackageEntity> for UnavailableRepository {
    async fn insert(&self, _entity: PackageEntity) -> Result<PackageEntity, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn update(&self, _entity: PackageEntity) -> Result<PackageEntity, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn fetch(&self, _id: Uuid) -> Result<Option<PackageEntity>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn list(&self) -> Result<Vec<PackageEntity>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[async_trait]
impl PackageRepository for UnavailableRepository {
    async fn filtered(&self, _query: &PackageQuery) -> Result<Page<PackageEntity>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn names(page: &Value) -> Vec<String> {
    page["content"]
        .as_array()
        .expect("content array")
        .iter()
        .map(|package| package["name"].as_str().expect("name").to_string())
        .collect()
}
