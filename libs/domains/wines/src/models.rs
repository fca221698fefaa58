use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Wine catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Wine {
    /// Unique identifier
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Unit price, non-negative
    pub price: f64,
    pub image_url: Option<String>,
    pub category: Option<String>,
    /// Mean of review ratings; 0 when unreviewed. Derived, never set by clients.
    pub rating: f64,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for adding a wine to the catalog
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateWine {
    #[validate(length(min = 1, max = 255, message = "must not be empty"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub price: f64,
    pub image_url: Option<String>,
    pub category: Option<String>,
    /// Defaults to true when omitted
    pub in_stock: Option<bool>,
}

/// DTO for a partial wine update. An empty body is a no-op.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateWine {
    #[validate(length(min = 1, max = 255, message = "must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
}

impl Wine {
    pub fn new(input: CreateWine) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            price: input.price,
            image_url: input.image_url,
            category: input.category,
            rating: 0.0,
            in_stock: input.in_stock.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update. The derived rating is deliberately untouchable.
    pub fn apply_update(&mut self, update: UpdateWine) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(image_url) = update.image_url {
            self.image_url = Some(image_url);
        }
        if let Some(category) = update.category {
            self.category = Some(category);
        }
        if let Some(in_stock) = update.in_stock {
            self.in_stock = in_stock;
        }
        self.updated_at = Utc::now();
    }
}
