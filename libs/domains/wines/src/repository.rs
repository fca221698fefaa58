use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::WineResult;
use crate::models::Wine;

/// Repository trait for Wine persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WineRepository: Send + Sync {
    /// Persist a new wine
    async fn create(&self, wine: Wine) -> WineResult<Wine>;

    /// Get a wine by ID
    async fn get_by_id(&self, id: Uuid) -> WineResult<Option<Wine>>;

    /// List the full catalog, newest first
    async fn list(&self) -> WineResult<Vec<Wine>>;

    /// Update an existing wine
    async fn update(&self, wine: Wine) -> WineResult<Wine>;

    /// Delete a wine by ID
    async fn delete(&self, id: Uuid) -> WineResult<bool>;
}

/// In-memory implementation of WineRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryWineRepository {
    wines: Arc<RwLock<HashMap<Uuid, Wine>>>,
}

impl InMemoryWineRepository {
    pub fn new() -> Self {
        Self {
            wines: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl WineRepository for InMemoryWineRepository {
    async fn create(&self, wine: Wine) -> WineResult<Wine> {
        let mut wines = self.wines.write().await;
        wines.insert(wine.id, wine.clone());

        tracing::info!(wine_id = %wine.id, name = %wine.name, "Created wine");
        Ok(wine)
    }

    async fn get_by_id(&self, id: Uuid) -> WineResult<Option<Wine>> {
        let wines = self.wines.read().await;
        Ok(wines.get(&id).cloned())
    }

    async fn list(&self) -> WineResult<Vec<Wine>> {
        let wines = self.wines.read().await;
        let mut result: Vec<Wine> = wines.values().cloned().collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    async fn update(&self, wine: Wine) -> WineResult<Wine> {
        let mut wines = self.wines.write().await;
        wines.insert(wine.id, wine.clone());

        tracing::info!(wine_id = %wine.id, "Updated wine");
        Ok(wine)
    }

    async fn delete(&self, id: Uuid) -> WineResult<bool> {
        let mut wines = self.wines.write().await;

        if wines.remove(&id).is_some() {
            tracing::info!(wine_id = %id, "Deleted wine");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
