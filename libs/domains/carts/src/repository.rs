use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::error::{CartError, CartResult};
use crate::models::CartItem;

/// Repository trait for cart persistence operations
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Whether a wine with this id exists in the catalog.
    async fn wine_exists(&self, wine_id: Uuid) -> CartResult<bool>;

    /// All items in the user's cart, oldest first. Empty when no cart exists.
    async fn list_items(&self, user_id: Uuid) -> CartResult<Vec<CartItem>>;

    /// Lazily create the user's cart and merge `quantity` into the item for
    /// this wine. Adding the same wine again increments the existing item.
    async fn upsert_item(&self, user_id: Uuid, wine_id: Uuid, quantity: i32)
        -> CartResult<CartItem>;

    /// Fetch an item together with the id of the user owning its cart.
    async fn get_item_with_owner(&self, item_id: Uuid) -> CartResult<Option<(CartItem, Uuid)>>;

    async fn set_item_quantity(&self, item_id: Uuid, quantity: i32) -> CartResult<CartItem>;

    async fn delete_item(&self, item_id: Uuid) -> CartResult<bool>;
}

#[derive(Default)]
struct InMemoryState {
    wines: HashSet<Uuid>,
    // user_id -> cart_id
    carts: HashMap<Uuid, Uuid>,
    // item_id -> (item, owning user)
    items: HashMap<Uuid, (CartItem, Uuid)>,
}

/// In-memory implementation of CartRepository for testing
#[derive(Clone, Default)]
pub struct InMemoryCartRepository {
    state: Arc<RwLock<InMemoryState>>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a wine id so add_to_cart accepts it.
    pub fn register_wine(&self, wine_id: Uuid) {
        self.state.write().unwrap().wines.insert(wine_id);
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn wine_exists(&self, wine_id: Uuid) -> CartResult<bool> {
        Ok(self.state.read().unwrap().wines.contains(&wine_id))
    }

    async fn list_items(&self, user_id: Uuid) -> CartResult<Vec<CartItem>> {
        let state = self.state.read().unwrap();
        let mut items: Vec<CartItem> = state
            .items
            .values()
            .filter(|(_, owner)| *owner == user_id)
            .map(|(item, _)| item.clone())
            .collect();
        items.sort_by_key(|item| item.created_at);
        Ok(items)
    }

    async fn upsert_item(
        &self,
        user_id: Uuid,
        wine_id: Uuid,
        quantity: i32,
    ) -> CartResult<CartItem> {
        let mut state = self.state.write().unwrap();

        let cart_id = *state.carts.entry(user_id).or_insert_with(Uuid::now_v7);

        let existing = state
            .items
            .values_mut()
            .find(|(item, _)| item.cart_id == cart_id && item.wine_id == wine_id);

        if let Some((item, _)) = existing {
            item.quantity += quantity;
            return Ok(item.clone());
        }

        let item = CartItem {
            id: Uuid::now_v7(),
            cart_id,
            wine_id,
            quantity,
            created_at: Utc::now(),
        };
        state.items.insert(item.id, (item.clone(), user_id));
        Ok(item)
    }

    async fn get_item_with_owner(&self, item_id: Uuid) -> CartResult<Option<(CartItem, Uuid)>> {
        let state = self.state.read().unwrap();
        Ok(state
            .items
            .get(&item_id)
            .map(|(item, owner)| (item.clone(), *owner)))
    }

    async fn set_item_quantity(&self, item_id: Uuid, quantity: i32) -> CartResult<CartItem> {
        let mut state = self.state.write().unwrap();
        let (item, _) = state
            .items
            .get_mut(&item_id)
            .ok_or(CartError::ItemNotFound(item_id))?;
        item.quantity = quantity;
        Ok(item.clone())
    }

    async fn delete_item(&self, item_id: Uuid) -> CartResult<bool> {
        let mut state = self.state.write().unwrap();
        Ok(state.items.remove(&item_id).is_some())
    }
}
