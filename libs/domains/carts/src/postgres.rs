use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DbBackend, FromQueryResult, Statement, TransactionTrait};
use uuid::Uuid;

use crate::error::{CartError, CartResult};
use crate::models::CartItem;
use crate::repository::CartRepository;

/// PostgreSQL implementation of CartRepository using SeaORM
#[derive(Clone)]
pub struct PgCartRepository {
    db: sea_orm::DatabaseConnection,
}

impl PgCartRepository {
    pub fn new(db: sea_orm::DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct CartItemRow {
    id: Uuid,
    cart_id: Uuid,
    wine_id: Uuid,
    quantity: i32,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<CartItemRow> for CartItem {
    fn from(row: CartItemRow) -> Self {
        CartItem {
            id: row.id,
            cart_id: row.cart_id,
            wine_id: row.wine_id,
            quantity: row.quantity,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct CartItemOwnerRow {
    id: Uuid,
    cart_id: Uuid,
    wine_id: Uuid,
    quantity: i32,
    created_at: chrono::DateTime<chrono::Utc>,
    user_id: Uuid,
}

#[derive(Debug, FromQueryResult)]
struct IdRow {
    id: Uuid,
}

fn internal(e: sea_orm::DbErr) -> CartError {
    CartError::Internal(format!("Database error: {}", e))
}

#[async_trait]
impl CartRepository for PgCartRepository {
    async fn wine_exists(&self, wine_id: Uuid) -> CartResult<bool> {
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

    async fn list_items(&self, user_id: Uuid) -> CartResult<Vec<CartItem>> {
        let sql = r#"
            SELECT ci.id, ci.cart_id, ci.wine_id, ci.quantity, ci.created_at
            FROM cart_items ci
            JOIN carts c ON c.id = ci.cart_id
            WHERE c.user_id = $1
            ORDER BY ci.created_at
        "#;

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [user_id.into()]);

        let rows = CartItemRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(internal)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn upsert_item(
        &self,
        user_id: Uuid,
        wine_id: Uuid,
        quantity: i32,
    ) -> CartResult<CartItem> {
        let txn = self.db.begin().await.map_err(internal)?;

        // Lazily create the cart; a concurrent creator wins harmlessly.
        let create_cart = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "INSERT INTO carts (id, user_id) VALUES ($1, $2) ON CONFLICT (user_id) DO NOTHING",
            [Uuid::now_v7().into(), user_id.into()],
        );
        txn.execute_raw(create_cart).await.map_err(internal)?;

        let find_cart = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT id FROM carts WHERE user_id = $1",
            [user_id.into()],
        );
        let cart = IdRow::find_by_statement(find_cart)
            .one(&txn)
            .await
            .map_err(internal)?
            .ok_or_else(|| CartError::Internal("Failed to create cart".to_string()))?;

        // Single-statement merge: concurrent adds of the same wine both land,
        // neither overwrites the other.
        let upsert = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
                INSERT INTO cart_items (id, cart_id, wine_id, quantity)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (cart_id, wine_id)
                DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity
                RETURNING *
            "#,
            [
                Uuid::now_v7().into(),
                cart.id.into(),
                wine_id.into(),
                quantity.into(),
            ],
        );

        let row = CartItemRow::find_by_statement(upsert)
            .one(&txn)
            .await
            .map_err(|e| {
                // Wine deleted between the existence check and the insert
                if e.to_string().contains("fk_cart_items_wine_id") {
                    CartError::WineNotFound(wine_id)
                } else {
                    internal(e)
                }
            })?
            .ok_or_else(|| CartError::Internal("Failed to add cart item".to_string()))?;

        txn.commit().await.map_err(internal)?;

        tracing::info!(user_id = %user_id, wine_id = %wine_id, "Added wine to cart");
        Ok(row.into())
    }

    async fn get_item_with_owner(&self, item_id: Uuid) -> CartResult<Option<(CartItem, Uuid)>> {
        let sql = r#"
            SELECT ci.id, ci.cart_id, ci.wine_id, ci.quantity, ci.created_at, c.user_id
            FROM cart_items ci
            JOIN carts c ON c.id = ci.cart_id
            WHERE ci.id = $1
        "#;

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [item_id.into()]);

        let row = CartItemOwnerRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(internal)?;

        Ok(row.map(|r| {
            let owner = r.user_id;
            (
                CartItem {
                    id: r.id,
                    cart_id: r.cart_id,
                    wine_id: r.wine_id,
                    quantity: r.quantity,
                    created_at: r.created_at,
                },
                owner,
            )
        }))
    }

    async fn set_item_quantity(&self, item_id: Uuid, quantity: i32) -> CartResult<CartItem> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "UPDATE cart_items SET quantity = $2 WHERE id = $1 RETURNING *",
            [item_id.into(), quantity.into()],
        );

        let row = CartItemRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(internal)?
            .ok_or(CartError::ItemNotFound(item_id))?;

        tracing::info!(item_id = %item_id, quantity, "Updated cart item");
        Ok(row.into())
    }

    async fn delete_item(&self, item_id: Uuid) -> CartResult<bool> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "DELETE FROM cart_items WHERE id = $1",
            [item_id.into()],
        );

        let result = ConnectionTrait::execute_raw(&self.db, stmt)
            .await
            .map_err(internal)?;

        if result.rows_affected() > 0 {
            tracing::info!(item_id = %item_id, "Removed cart item");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
