use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use super::domain::{EmployeeDto, EmployeeEntity};
use crate::error::ServiceError;
use crate::repository::{Repository, RepositoryError};

/// Employee CRUD over any [`Repository`] of employee rows.
pub struct EmployeeService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R> EmployeeService<R>
where
    R: Repository<EmployeeEntity> + ?Sized,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn add(&self, dto: EmployeeDto) -> Result<EmployeeDto, ServiceError> {
        dto.validate()?;
        let entity = dto.into_entity(Uuid::new_v4(), true);
        let stored = self.repository.insert(entity).await?;
        info!(employee_id = %stored.id, "employee added");
        Ok(stored.into())
    }

    pub async fn get(&self, id: Uuid) -> Result<EmployeeDto, ServiceError> {
        debug!(employee_id = %id, "fetching employee");
        Ok(self.fetch(id).await?.into())
    }

    pub async fn list(&self) -> Result<Vec<EmployeeDto>, ServiceError> {
        let employees = self.repository.list().await?;
        Ok(employees.into_iter().map(EmployeeDto::from).collect())
    }

    /// Replace the profile of an existing employee; the active flag is kept.
    pub async fn update(&self, id: Uuid, dto: EmployeeDto) -> Result<EmployeeDto, ServiceError> {
        dto.validate()?;
        let current = self.fetch(id).await?;
        let updated = self
            .repository
            .update(dto.into_entity(id, current.active))
            .await?;
        info!(employee_id = %id, "employee updated");
        Ok(updated.into())
    }

    pub async fn deactivate(&self, id: Uuid) -> Result<(), ServiceError> {
        let mut employee = self.fetch(id).await?;
        if employee.active {
            employee.active = false;
            self.repository.update(employee).await?;
            info!(employee_id = %id, "employee deactivated");
        }
        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<EmployeeEntity, ServiceError> {
        self.repository
            .fetch(id)
            .await?
            .ok_or(ServiceError::Repository(RepositoryError::NotFound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryRepository;

    fn jane() -> EmployeeDto {
        EmployeeDto {
            id: None,
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane.doe@example.com".to_string(),
            date_of_birth: chrono::NaiveDate::from_ymd_opt(1988, 4, 12),
            active: true,
        }
    }

    fn service() -> (
        EmployeeService<MemoryRepository<EmployeeEntity>>,
        Arc<MemoryRepository<EmployeeEntity>>,
    ) {
        let repository = Arc::new(MemoryRepository::default());
        (EmployeeService::new(repository.clone()), repository)
    }

    #[tokio::test]
    async fn add_then_get_round_trips_modulo_id() {
        let (service, _) = service();
        let created = service.add(jane()).await.expect("employee added");
        let id = created.id.expect("id assigned");

        let fetched = service.get(id).await.expect("employee fetched");
        assert_eq!(EmployeeDto { id: None, ..fetched }, jane());
    }

    #[tokio::test]
    async fn add_ignores_client_supplied_id() {
        let (service, _) = service();
        let supplied = Uuid::new_v4();
        let created = service
            .add(EmployeeDto {
                id: Some(supplied),
                ..jane()
            })
            .await
            .expect("employee added");
        assert_ne!(created.id, Some(supplied));
    }

    #[tokio::test]
    async fn add_rejects_blank_names() {
        let (service, repository) = service();
        let err = service
            .add(EmployeeDto {
                first_name: " ".to_string(),
                ..jane()
            })
            .await
            .expect_err("blank name rejected");

        match err {
            ServiceError::Validation(err) => assert!(err.has_field("firstName")),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(repository.snapshot().is_empty());
    }

    #[tokio::test]
    async fn update_missing_employee_is_not_found() {
        let (service, repository) = service();
        let err = service
            .update(Uuid::new_v4(), jane())
            .await
            .expect_err("missing employee");

        assert!(matches!(
            err,
            ServiceError::Repository(RepositoryError::NotFound)
        ));
        assert!(repository.snapshot().is_empty());
    }

    #[tokio::test]
    async fn deactivate_is_idempotent_and_keeps_the_row() {
        let (service, repository) = service();
        let id = service.add(jane()).await.expect("added").id.expect("id");

        service.deactivate(id).await.expect("first deactivate");
        service.deactivate(id).await.expect("second deactivate");

        let stored = repository.snapshot();
        assert_eq!(stored.len(), 1);
        assert!(!stored[0].active);
    }

    #[tokio::test]
    async fn update_cannot_reactivate() {
        let (service, _) = service();
        let id = service.add(jane()).await.expect("added").id.expect("id");
        service.deactivate(id).await.expect("deactivated");

        let updated = service
            .update(
                id,
                EmployeeDto {
                    last_name: "Smith".to_string(),
                    active: true,
                    ..jane()
                },
            )
            .await
            .expect("updated");

        assert_eq!(updated.last_name, "Smith");
        assert!(!updated.active);
    }
}
