use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::packages::{PackageEntity, PackageQuery, PackageRepository};
use crate::repository::{Entity, Page, Repository, RepositoryError};

/// Process-local store used when no database is configured and in tests.
/// Rows are kept in insertion order.
#[derive(Clone)]
pub struct MemoryRepository<E> {
    records: Arc<Mutex<Vec<E>>>,
}

impl<E> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<E: Entity> MemoryRepository<E> {
    fn records(&self) -> Result<MutexGuard<'_, Vec<E>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("memory store poisoned".to_string()))
    }

    /// Copy of every stored row, including deactivated ones.
    pub fn snapshot(&self) -> Vec<E> {
        self.records().map(|guard| guard.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn insert(&self, entity: E) -> Result<E, RepositoryError> {
        let mut guard = self.records()?;
        if guard.iter().any(|record| record.id() == entity.id()) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<E, RepositoryError> {
        let mut guard = self.records()?;
        let slot = guard
            .iter_mut()
            .find(|record| record.id() == entity.id())
            .ok_or(RepositoryError::NotFound)?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<E>, RepositoryError> {
        let guard = self.records()?;
        Ok(guard.iter().find(|record| record.id() == id).cloned())
    }

    async fn list(&self) -> Result<Vec<E>, RepositoryError> {
        Ok(self.records()?.clone())
    }
}

#[async_trait]
impl PackageRepository for MemoryRepository<PackageEntity> {
    async fn filtered(&self, query: &PackageQuery) -> Result<Page<PackageEntity>, RepositoryError> {
        let mut matches: Vec<PackageEntity> = self
            .records()?
            .iter()
            .filter(|package| query.filter.matches(package))
            .cloned()
            .collect();
        // Stable sort keeps insertion order for ties.
        matches.sort_by(|left, right| query.sort.compare(left, right));

        let total = matches.len() as u64;
        let offset = usize::try_from(query.page.offset()).unwrap_or(usize::MAX);
        let content = matches
            .into_iter()
            .skip(offset)
            .take(query.page.size as usize)
            .collect();

        Ok(Page::new(content, query.page, total))
    }
}
