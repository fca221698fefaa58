use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use axum_helpers::ValidatedJson;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::WineResult;
use crate::models::{CreateWine, UpdateWine, Wine};
use crate::repository::WineRepository;
use crate::service::WineService;

/// Catalog browsing, open to everyone.
pub fn public_router<R: WineRepository + 'static>(service: Arc<WineService<R>>) -> Router {
    Router::new()
        .route("/wines", get(list_wines))
        .route("/wines/{id}", get(get_wine))
        .with_state(service)
}

/// Catalog management, behind the JWT middleware.
pub fn protected_router<R: WineRepository + 'static>(service: Arc<WineService<R>>) -> Router {
    Router::new()
        .route("/wines", post(create_wine))
        .route("/wines/{id}", put(update_wine).delete(delete_wine))
        .with_state(service)
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListWinesResponse {
    pub wines: Vec<Wine>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WineDetailResponse {
    pub wine: Wine,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateWineResponse {
    pub message: String,
    pub wine_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// List the catalog
///
/// GET /wines
async fn list_wines<R: WineRepository>(
    State(service): State<Arc<WineService<R>>>,
) -> WineResult<Json<ListWinesResponse>> {
    let wines = service.list_wines().await?;
    Ok(Json(ListWinesResponse { wines }))
}

/// Get one wine
///
/// GET /wines/:id
async fn get_wine<R: WineRepository>(
    State(service): State<Arc<WineService<R>>>,
    Path(id): Path<Uuid>,
) -> WineResult<Json<WineDetailResponse>> {
    let wine = service.get_wine(id).await?;
    Ok(Json(WineDetailResponse { wine }))
}

/// Add a wine to the catalog
///
/// POST /wines
async fn create_wine<R: WineRepository>(
    State(service): State<Arc<WineService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateWine>,
) -> WineResult<impl IntoResponse> {
    let wine = service.create_wine(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateWineResponse {
            message: "Wine added successfully".to_string(),
            wine_id: wine.id,
        }),
    ))
}

/// Update a wine
///
/// PUT /wines/:id
async fn update_wine<R: WineRepository>(
    State(service): State<Arc<WineService<R>>>,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateWine>,
) -> WineResult<Json<MessageResponse>> {
    service.update_wine(id, input).await?;

    Ok(Json(MessageResponse {
        message: "Wine updated successfully".to_string(),
    }))
}

/// Remove a wine
///
/// DELETE /wines/:id
async fn delete_wine<R: WineRepository>(
    State(service): State<Arc<WineService<R>>>,
    Path(id): Path<Uuid>,
) -> WineResult<Json<MessageResponse>> {
    service.delete_wine(id).await?;

    Ok(Json(MessageResponse {
        message: "Wine deleted successfully".to_string(),
    }))
}
