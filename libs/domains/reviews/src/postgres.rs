use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DbBackend, FromQueryResult, Statement, TransactionTrait};
use uuid::Uuid;

use crate::error::{ReviewError, ReviewResult};
use crate::models::Review;
use crate::repository::ReviewRepository;

/// PostgreSQL implementation of ReviewRepository using SeaORM
///
/// Mutations run inside a transaction together with a single-statement
/// recompute of the wine's aggregate rating, so concurrent reviews cannot
/// leave a stale mean behind.
#[derive(Clone)]
pub struct PgReviewRepository {
    db: sea_orm::DatabaseConnection,
}

impl PgReviewRepository {
    pub fn new(db: sea_orm::DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct ReviewRow {
    id: Uuid,
    wine_id: Uuid,
    user_id: Uuid,
    rating: i32,
    review_text: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Review {
            id: row.id,
            wine_id: row.wine_id,
            user_id: row.user_id,
            rating: row.rating,
            review_text: row.review_text,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct IdRow {
    id: Uuid,
}

#[derive(Debug, FromQueryResult)]
struct WineIdRow {
    wine_id: Uuid,
}

fn internal(e: sea_orm::DbErr) -> ReviewError {
    ReviewError::Internal(format!("Database error: {}", e))
}

/// Lock the wine row for the rest of the transaction.
///
/// Must run before the review mutation: a transaction that blocks here gets
/// fresh snapshots for its later statements once the lock is granted, so the
/// AVG recompute sees reviews committed by the previous lock holder instead
/// of re-evaluating against a stale snapshot and losing their update.
async fn lock_wine_row<C: ConnectionTrait>(conn: &C, wine_id: Uuid) -> ReviewResult<bool> {
    let stmt = Statement::from_sql_and_values(
        DbBackend::Postgres,
        "SELECT id FROM wines WHERE id = $1 FOR UPDATE",
        [wine_id.into()],
    );

    let row = IdRow::find_by_statement(stmt)
        .one(conn)
        .await
        .map_err(internal)?;

    Ok(row.is_some())
}

/// Recompute the wine's rating from its remaining reviews, 0 when none.
async fn recompute_wine_rating<C: ConnectionTrait>(conn: &C, wine_id: Uuid) -> ReviewResult<()> {
    let stmt = Statement::from_sql_and_values(
        DbBackend::Postgres,
        r#"
            UPDATE wines
            SET rating = COALESCE(
                (SELECT AVG(rating)::float8 FROM reviews WHERE wine_id = $1),
                0
            )
            WHERE id = $1
        "#,
        [wine_id.into()],
    );

    conn.execute_raw(stmt).await.map_err(internal)?;
    Ok(())
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn wine_exists(&self, wine_id: Uuid) -> ReviewResult<bool> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT id FROM wines WHERE id = $1",
            [wine_id.into()],
        );

        let row = IdRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(internal)?;

        Ok(row.is_some())
    }

    async fn list_by_wine(&self, wine_id: Uuid) -> ReviewResult<Vec<Review>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT * FROM reviews WHERE wine_id = $1 ORDER BY created_at DESC",
            [wine_id.into()],
        );

        let rows = ReviewRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(internal)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> ReviewResult<Option<Review>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT * FROM reviews WHERE id = $1",
            [id.into()],
        );

        let row = ReviewRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(internal)?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, review: Review) -> ReviewResult<Review> {
        let txn = self.db.begin().await.map_err(internal)?;

        // Serializes concurrent review mutations for this wine; also covers
        // a wine deleted between the existence check and this transaction.
        if !lock_wine_row(&txn, review.wine_id).await? {
            return Err(ReviewError::Validation(format!(
                "Wine {} does not exist",
                review.wine_id
            )));
        }

        let insert = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
                INSERT INTO reviews (id, wine_id, user_id, rating, review_text, created_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
            "#,
            [
                review.id.into(),
                review.wine_id.into(),
                review.user_id.into(),
                review.rating.into(),
                review.review_text.clone().into(),
                review.created_at.into(),
            ],
        );

        let row = ReviewRow::find_by_statement(insert)
            .one(&txn)
            .await
            .map_err(internal)?
            .ok_or_else(|| ReviewError::Internal("Failed to create review".to_string()))?;

        recompute_wine_rating(&txn, row.wine_id).await?;
        txn.commit().await.map_err(internal)?;

        tracing::info!(review_id = %row.id, wine_id = %row.wine_id, "Created review");
        Ok(row.into())
    }

    async fn update(&self, review: Review) -> ReviewResult<Review> {
        let txn = self.db.begin().await.map_err(internal)?;

        // Wine gone means the review was cascade-deleted with it
        if !lock_wine_row(&txn, review.wine_id).await? {
            return Err(ReviewError::NotFound(review.id));
        }

        let update = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
                UPDATE reviews
                SET rating = $2, review_text = $3
                WHERE id = $1
                RETURNING *
            "#,
            [
                review.id.into(),
                review.rating.into(),
                review.review_text.clone().into(),
            ],
        );

        let row = ReviewRow::find_by_statement(update)
            .one(&txn)
            .await
            .map_err(internal)?
            .ok_or(ReviewError::NotFound(review.id))?;

        recompute_wine_rating(&txn, row.wine_id).await?;
        txn.commit().await.map_err(internal)?;

        tracing::info!(review_id = %row.id, "Updated review");
        Ok(row.into())
    }

    async fn delete(&self, id: Uuid) -> ReviewResult<bool> {
        let txn = self.db.begin().await.map_err(internal)?;

        let find = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT wine_id FROM reviews WHERE id = $1",
            [id.into()],
        );

        let Some(target) = WineIdRow::find_by_statement(find)
            .one(&txn)
            .await
            .map_err(internal)?
        else {
            txn.commit().await.map_err(internal)?;
            return Ok(false);
        };

        // Lock before deleting so the recompute cannot race a concurrent
        // review mutation on the same wine
        lock_wine_row(&txn, target.wine_id).await?;

        let delete = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "DELETE FROM reviews WHERE id = $1",
            [id.into()],
        );
        let result = txn.execute_raw(delete).await.map_err(internal)?;

        if result.rows_affected() == 0 {
            // Cascade-deleted while we waited for the lock
            txn.commit().await.map_err(internal)?;
            return Ok(false);
        }

        recompute_wine_rating(&txn, target.wine_id).await?;
        txn.commit().await.map_err(internal)?;

        tracing::info!(review_id = %id, "Deleted review");
        Ok(true)
    }
}
