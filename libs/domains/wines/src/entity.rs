use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the wines table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub rating: f64,
    pub in_stock: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Wine {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            image_url: model.image_url,
            category: model.category,
            rating: model.rating,
            in_stock: model.in_stock,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<crate::models::Wine> for ActiveModel {
    fn from(wine: crate::models::Wine) -> Self {
        ActiveModel {
            id: Set(wine.id),
            name: Set(wine.name),
            description: Set(wine.description),
            price: Set(wine.price),
            image_url: Set(wine.image_url),
            category: Set(wine.category),
            rating: Set(wine.rating),
            in_stock: Set(wine.in_stock),
            created_at: Set(wine.created_at.into()),
            updated_at: Set(wine.updated_at.into()),
        }
    }
}

/// Active model for catalog updates.
///
/// `rating` is derived from reviews and `created_at` is immutable, so both
/// stay `NotSet`: a catalog update racing a review recompute must not write
/// a stale rating back.
pub fn update_model(wine: crate::models::Wine) -> ActiveModel {
    let mut model: ActiveModel = wine.into();
    model.rating = NotSet;
    model.created_at = NotSet;
    model
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateWine, Wine};

    #[test]
    fn update_model_never_touches_rating_or_created_at() {
        let mut wine = Wine::new(CreateWine {
            name: "Rioja Reserva".to_string(),
            description: None,
            price: 35.0,
            image_url: None,
            category: None,
            in_stock: None,
        });
        wine.rating = 4.5;

        let model = update_model(wine);

        assert!(matches!(model.rating, NotSet));
        assert!(matches!(model.created_at, NotSet));
        assert!(matches!(model.price, Set(p) if p == 35.0));
    }
}
