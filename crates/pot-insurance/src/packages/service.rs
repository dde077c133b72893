use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use super::domain::{PackageDto, PackageEntity, PackageStatus};
use super::query::PackageQuery;
use crate::error::ServiceError;
use crate::repository::{Page, Repository, RepositoryError};
use crate::validation::ValidationError;

/// Package storage adds the filtered listing on top of plain CRUD.
#[async_trait]
pub trait PackageRepository: Repository<PackageEntity> {
    async fn filtered(&self, query: &PackageQuery) -> Result<Page<PackageEntity>, RepositoryError>;
}

/// Service composing package validation, status rules, and the repository.
pub struct PackageService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R> PackageService<R>
where
    R: PackageRepository + ?Sized,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// New packages always start out active.
    pub async fn add(&self, dto: PackageDto) -> Result<PackageDto, ServiceError> {
        dto.validate()?;
        let entity = dto.into_entity(Uuid::new_v4(), PackageStatus::Active);
        let stored = self.repository.insert(entity).await?;
        info!(package_id = %stored.id, name = %stored.name, "package added");
        Ok(stored.into())
    }

    pub async fn get(&self, id: Uuid) -> Result<PackageDto, ServiceError> {
        debug!(package_id = %id, "fetching package");
        Ok(self.fetch(id).await?.into())
    }

    pub async fn list(&self) -> Result<Vec<PackageDto>, ServiceError> {
        let packages = self.repository.list().await?;
        Ok(packages.into_iter().map(PackageDto::from).collect())
    }

    pub async fn filtered(&self, query: &PackageQuery) -> Result<Page<PackageDto>, ServiceError> {
        debug!(?query, "filtering packages");
        let page = self.repository.filtered(query).await?;
        Ok(page.map(PackageDto::from))
    }

    /// Replace an existing package. Status only changes through [`Self::deactivate`].
    pub async fn update(&self, id: Uuid, dto: PackageDto) -> Result<PackageDto, ServiceError> {
        dto.validate()?;
        let current = self.fetch(id).await?;
        let updated = self
            .repository
            .update(dto.into_entity(id, current.status))
            .await?;
        info!(package_id = %id, "package updated");
        Ok(updated.into())
    }

    /// Update addressed by the id carried in the body.
    pub async fn update_from_body(&self, dto: PackageDto) -> Result<PackageDto, ServiceError> {
        let id = dto
            .id
            .ok_or_else(|| ValidationError::single("id", "Id is required"))?;
        self.update(id, dto).await
    }

    pub async fn deactivate(&self, id: Uuid) -> Result<PackageDto, ServiceError> {
        let mut package = self.fetch(id).await?;
        if package.status != PackageStatus::Deactivated {
            package.status = PackageStatus::Deactivated;
            package = self.repository.update(package).await?;
            info!(package_id = %id, "package deactivated");
        }
        Ok(package.into())
    }

    async fn fetch(&self, id: Uuid) -> Result<PackageEntity, ServiceError> {
        self.repository
            .fetch(id)
            .await?
            .ok_or(ServiceError::Repository(RepositoryError::NotFound))
    }
}
