use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use uuid::Uuid;

use crate::{
    entity,
    error::{WineError, WineResult},
    models::Wine,
    repository::WineRepository,
};

pub struct PgWineRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgWineRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl WineRepository for PgWineRepository {
    async fn create(&self, wine: Wine) -> WineResult<Wine> {
        let active_model: entity::ActiveModel = wine.into();

        let model = self
            .base
            .insert(active_model)
            .await
            .map_err(|e| WineError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(wine_id = %model.id, "Created wine");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> WineResult<Option<Wine>> {
        let model = self
            .base
            .find_by_id(id)
            .await
            .map_err(|e| WineError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }

    async fn list(&self) -> WineResult<Vec<Wine>> {
        let models = entity::Entity::find()
            .order_by_desc(entity::Column::CreatedAt)
            .all(self.base.db())
            .await
            .map_err(|e| WineError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, wine: Wine) -> WineResult<Wine> {
        let id = wine.id;
        // Leaves rating/created_at untouched so a concurrent review
        // recompute is not overwritten with a stale value.
        let active_model = entity::update_model(wine);

        let updated = self
            .base
            .update(active_model)
            .await
            .map_err(|e| WineError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(wine_id = %id, "Updated wine");
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> WineResult<bool> {
        let rows_affected = self
            .base
            .delete_by_id(id)
            .await
            .map_err(|e| WineError::Internal(format!("Database error: {}", e)))?;

        if rows_affected > 0 {
            tracing::info!(wine_id = %id, "Deleted wine");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
