use std::sync::Arc;
use uuid::Uuid;

use crate::error::{WineError, WineResult};
use crate::models::{CreateWine, UpdateWine, Wine};
use crate::repository::WineRepository;

/// Service layer for Wine business logic
#[derive(Clone)]
pub struct WineService<R: WineRepository> {
    repository: Arc<R>,
}

impl<R: WineRepository> WineService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Add a wine to the catalog. Rating starts at 0, in_stock defaults true.
    pub async fn create_wine(&self, input: CreateWine) -> WineResult<Wine> {
        let wine = Wine::new(input);
        self.repository.create(wine).await
    }

    /// Get a wine by ID
    pub async fn get_wine(&self, id: Uuid) -> WineResult<Wine> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(WineError::NotFound(id))
    }

    /// List the full catalog
    pub async fn list_wines(&self) -> WineResult<Vec<Wine>> {
        self.repository.list().await
    }

    /// Partial update; an empty body leaves the wine unchanged.
    pub async fn update_wine(&self, id: Uuid, input: UpdateWine) -> WineResult<Wine> {
        let mut wine = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(WineError::NotFound(id))?;

        wine.apply_update(input);

        self.repository.update(wine).await
    }

    /// Delete a wine; reviews and cart items referencing it go with it.
    pub async fn delete_wine(&self, id: Uuid) -> WineResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(WineError::NotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryWineRepository;

    fn service() -> WineService<InMemoryWineRepository> {
        WineService::new(InMemoryWineRepository::new())
    }

    fn valid_input() -> CreateWine {
        CreateWine {
            name: "Chateau Margaux".to_string(),
            description: Some("Bordeaux blend".to_string()),
            price: 120.0,
            image_url: Some("https://example.com/margaux.jpg".to_string()),
            category: Some("red".to_string()),
            in_stock: Some(true),
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips_all_fields() {
        let service = service();
        let created = service.create_wine(valid_input()).await.unwrap();

        let fetched = service.get_wine(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Chateau Margaux");
        assert_eq!(fetched.price, 120.0);
        assert_eq!(fetched.rating, 0.0);
    }

    #[tokio::test]
    async fn get_unknown_wine_is_not_found() {
        let err = service().get_wine(Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, WineError::NotFound(_)));
    }

    #[tokio::test]
    async fn empty_update_is_a_noop() {
        let service = service();
        let created = service.create_wine(valid_input()).await.unwrap();

        let updated = service
            .update_wine(created.id, UpdateWine::default())
            .await
            .unwrap();

        assert_eq!(updated.name, created.name);
        assert_eq!(updated.price, created.price);
        assert_eq!(updated.in_stock, created.in_stock);
    }

    #[tokio::test]
    async fn partial_update_overwrites_only_supplied_fields() {
        let service = service();
        let created = service.create_wine(valid_input()).await.unwrap();

        let updated = service
            .update_wine(
                created.id,
                UpdateWine {
                    price: Some(99.5),
                    in_stock: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price, 99.5);
        assert!(!updated.in_stock);
        assert_eq!(updated.name, created.name);
    }

    #[tokio::test]
    async fn delete_unknown_wine_is_not_found() {
        let err = service().delete_wine(Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, WineError::NotFound(_)));
    }

    #[tokio::test]
    async fn repository_failures_surface_as_internal_errors() {
        use crate::repository::MockWineRepository;

        let mut repo = MockWineRepository::new();
        repo.expect_list()
            .times(1)
            .returning(|| Err(WineError::Internal("connection reset".to_string())));

        let service = WineService::new(repo);
        let err = service.list_wines().await.unwrap_err();
        assert!(matches!(err, WineError::Internal(_)));
    }
}
