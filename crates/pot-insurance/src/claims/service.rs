use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use super::domain::{ClaimDto, ClaimEntity, DEACTIVATED_STATUS};
use crate::error::ServiceError;
use crate::repository::{Repository, RepositoryError};

/// Claim CRUD. Validation always runs before the repository is touched.
pub struct ClaimService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R> ClaimService<R>
where
    R: Repository<ClaimEntity> + ?Sized,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn add(&self, dto: ClaimDto) -> Result<ClaimDto, ServiceError> {
        dto.validate()?;
        let entity = dto.into_entity(Uuid::new_v4())?;
        let stored = self.repository.insert(entity).await?;
        info!(claim_id = %stored.id, claim_number = %stored.claim_number, "claim submitted");
        Ok(stored.into())
    }

    pub async fn get(&self, id: Uuid) -> Result<ClaimDto, ServiceError> {
        debug!(claim_id = %id, "fetching claim");
        Ok(self.fetch(id).await?.into())
    }

    pub async fn list(&self) -> Result<Vec<ClaimDto>, ServiceError> {
        let claims = self.repository.list().await?;
        Ok(claims.into_iter().map(ClaimDto::from).collect())
    }

    /// Replace an existing claim. A deactivated claim stays deactivated
    /// whatever status the body carries.
    pub async fn update(&self, id: Uuid, dto: ClaimDto) -> Result<ClaimDto, ServiceError> {
        dto.validate()?;
        let current = self.fetch(id).await?;
        let mut entity = dto.into_entity(id)?;
        if current.status == DEACTIVATED_STATUS {
            entity.status = current.status;
        }
        let updated = self.repository.update(entity).await?;
        info!(claim_id = %id, status = %updated.status, "claim updated");
        Ok(updated.into())
    }

    pub async fn deactivate(&self, id: Uuid) -> Result<(), ServiceError> {
        let mut claim = self.fetch(id).await?;
        if claim.status != DEACTIVATED_STATUS {
            claim.status = DEACTIVATED_STATUS.to_string();
            self.repository.update(claim).await?;
            info!(claim_id = %id, "claim deactivated");
        }
        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<ClaimEntity, ServiceError> {
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
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts every repository call so tests can prove nothing was persisted.
    #[derive(Default)]
    struct CountingRepository {
        inner: MemoryRepository<ClaimEntity>,
        calls: AtomicUsize,
    }

    impl CountingRepository {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Repository<ClaimEntity> for CountingRepository {
        async fn insert(&self, entity: ClaimEntity) -> Result<ClaimEntity, RepositoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.insert(entity).await
        }

        async fn update(&self, entity: ClaimEntity) -> Result<ClaimEntity, RepositoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.update(entity).await
        }

        async fn fetch(&self, id: Uuid) -> Result<Option<ClaimEntity>, RepositoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.fetch(id).await
        }

        async fn list(&self) -> Result<Vec<ClaimEntity>, RepositoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.list().await
        }
    }

    fn claim(amount: Decimal) -> ClaimDto {
        ClaimDto {
            id: None,
            claim_number: "CLM-0042".to_string(),
            consumer: "John Roe".to_string(),
            employer: "Acme Corp".to_string(),
            date_of_service: NaiveDate::from_ymd_opt(2024, 5, 2),
            plan: "Silver HMO".to_string(),
            amount: Some(amount),
            status: "SUBMITTED".to_string(),
        }
    }

    #[tokio::test]
    async fn non_positive_amounts_never_reach_the_repository() {
        let repository = Arc::new(CountingRepository::default());
        let service = ClaimService::new(repository.clone());

        for amount in [Decimal::ZERO, Decimal::new(-2500, 2)] {
            let err = service.add(claim(amount)).await.expect_err("rejected");
            assert!(matches!(err, ServiceError::Validation(_)));
        }
        let err = service
            .update(Uuid::new_v4(), claim(Decimal::ZERO))
            .await
            .expect_err("rejected");
        assert!(matches!(err, ServiceError::Validation(_)));

        assert_eq!(repository.calls(), 0);
    }

    #[tokio::test]
    async fn add_then_get_returns_the_submitted_claim() {
        let service = ClaimService::new(Arc::new(MemoryRepository::default()));
        let created = service
            .add(claim(Decimal::new(9999, 2)))
            .await
            .expect("claim added");

        let fetched = service
            .get(created.id.expect("id assigned"))
            .await
            .expect("claim fetched");
        assert_eq!(
            ClaimDto { id: None, ..fetched },
            claim(Decimal::new(9999, 2))
        );
    }

    #[tokio::test]
    async fn update_replaces_status_as_an_opaque_label() {
        let service = ClaimService::new(Arc::new(MemoryRepository::default()));
        let id = service
            .add(claim(Decimal::ONE))
            .await
            .expect("added")
            .id
            .expect("id");

        let updated = service
            .update(
                id,
                ClaimDto {
                    status: "PENDING_REVIEW".to_string(),
                    ..claim(Decimal::ONE)
                },
            )
            .await
            .expect("updated");
        assert_eq!(updated.status, "PENDING_REVIEW");
        assert_eq!(updated.id, Some(id));
    }

    #[tokio::test]
    async fn update_cannot_reactivate_a_deactivated_claim() {
        let repository = Arc::new(MemoryRepository::default());
        let service = ClaimService::new(repository.clone());
        let id = service
            .add(claim(Decimal::ONE))
            .await
            .expect("added")
            .id
            .expect("id");
        service.deactivate(id).await.expect("deactivated");

        let updated = service
            .update(
                id,
                ClaimDto {
                    plan: "Gold PPO".to_string(),
                    status: "SUBMITTED".to_string(),
                    ..claim(Decimal::ONE)
                },
            )
            .await
            .expect("updated");

        assert_eq!(updated.plan, "Gold PPO");
        assert_eq!(updated.status, DEACTIVATED_STATUS);
        assert_eq!(repository.snapshot()[0].status, DEACTIVATED_STATUS);
    }

    #[tokio::test]
    async fn update_missing_claim_creates_nothing() {
        let repository = Arc::new(MemoryRepository::default());
        let service = ClaimService::new(repository.clone());

        let err = service
            .update(Uuid::new_v4(), claim(Decimal::ONE))
            .await
            .expect_err("missing");
        assert!(matches!(
            err,
            ServiceError::Repository(RepositoryError::NotFound)
        ));
        assert!(repository.snapshot().is_empty());
    }

    #[tokio::test]
    async fn deactivate_keeps_the_row() {
        let repository = Arc::new(MemoryRepository::default());
        let service = ClaimService::new(repository.clone());
        let id = service
            .add(claim(Decimal::ONE))
            .await
            .expect("added")
            .id
            .expect("id");

        service.deactivate(id).await.expect("deactivated");
        service.deactivate(id).await.expect("still deactivated");

        let stored = repository.snapshot();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].status, DEACTIVATED_STATUS);
    }
}
