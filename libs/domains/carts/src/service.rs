use std::sync::Arc;
use uuid::Uuid;

use crate::error::{CartError, CartResult};
use crate::models::{AddToCart, CartItem, UpdateCartItem};
use crate::repository::CartRepository;

/// Service layer for cart business logic
#[derive(Clone)]
pub struct CartService<R: CartRepository> {
    repository: Arc<R>,
}

impl<R: CartRepository> CartService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// The user's cart contents. A user who never added anything gets an
    /// empty list, not an error.
    pub async fn get_cart(&self, user_id: Uuid) -> CartResult<Vec<CartItem>> {
        self.repository.list_items(user_id).await
    }

    /// Add a wine to the user's cart, merging with any existing item.
    pub async fn add_to_cart(&self, user_id: Uuid, input: AddToCart) -> CartResult<CartItem> {
        if !self.repository.wine_exists(input.wine_id).await? {
            return Err(CartError::WineNotFound(input.wine_id));
        }

        self.repository
            .upsert_item(user_id, input.wine_id, input.quantity_or_default())
            .await
    }

    /// Overwrite an item's quantity. Only the cart's owner may do this.
    pub async fn update_item(
        &self,
        actor: Uuid,
        item_id: Uuid,
        input: UpdateCartItem,
    ) -> CartResult<CartItem> {
        self.authorize_item(actor, item_id).await?;
        self.repository
            .set_item_quantity(item_id, input.quantity)
            .await
    }

    /// Remove an item. Only the cart's owner may do this.
    pub async fn remove_item(&self, actor: Uuid, item_id: Uuid) -> CartResult<()> {
        self.authorize_item(actor, item_id).await?;

        let deleted = self.repository.delete_item(item_id).await?;
        if !deleted {
            return Err(CartError::ItemNotFound(item_id));
        }
        Ok(())
    }

    // Missing items report 404 before ownership is considered, so probing
    // for other users' item ids reveals nothing.
    async fn authorize_item(&self, actor: Uuid, item_id: Uuid) -> CartResult<CartItem> {
        let (item, owner) = self
            .repository
            .get_item_with_owner(item_id)
            .await?
            .ok_or(CartError::ItemNotFound(item_id))?;

        if owner != actor {
            return Err(CartError::Forbidden);
        }

        Ok(item)
    }
}
