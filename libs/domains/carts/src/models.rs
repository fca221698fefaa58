use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// One line of a user's cart: a wine and how many bottles of it.
///
/// The (cart_id, wine_id) pair is unique; adding the same wine twice merges
/// into one item with the summed quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartItem {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub wine_id: Uuid,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

/// Request body for POST /cart. Quantity defaults to 1 when omitted.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddToCart {
    pub wine_id: Uuid,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: Option<i32>,
}

impl AddToCart {
    pub fn quantity_or_default(&self) -> i32 {
        self.quantity.unwrap_or(1)
    }
}

/// Request body for PUT /cart/{item_id}. Overwrites the quantity.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCartItem {
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_to_cart_defaults_quantity_to_one() {
        let input = AddToCart {
            wine_id: Uuid::now_v7(),
            quantity: None,
        };
        assert_eq!(input.quantity_or_default(), 1);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn zero_quantity_fails_validation() {
        let input = AddToCart {
            wine_id: Uuid::now_v7(),
            quantity: Some(0),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn update_quantity_must_be_positive() {
        assert!(UpdateCartItem { quantity: -2 }.validate().is_err());
        assert!(UpdateCartItem { quantity: 3 }.validate().is_ok());
    }
}
