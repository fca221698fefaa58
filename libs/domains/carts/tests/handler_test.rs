//! Handler tests for the Carts domain
//!
//! The in-memory repository stands in for Postgres; the real JWT middleware
//! is layered on, mirroring the app wiring.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::middleware::from_fn_with_state;
use axum::Router;
use axum_helpers::{jwt_auth_middleware, JwtAuth, JwtConfig};
use domain_carts::*;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt; // for oneshot()
use uuid::Uuid;

struct TestApp {
    app: Router,
    service: Arc<CartService<InMemoryCartRepository>>,
    jwt_auth: JwtAuth,
    wine_id: Uuid,
}

fn carts_app() -> TestApp {
    let repo = InMemoryCartRepository::new();
    let wine_id = Uuid::now_v7();
    repo.register_wine(wine_id);

    let service = Arc::new(CartService::new(repo));
    let jwt_auth =
        JwtAuth::new(&JwtConfig::new("handler-test-secret-handler-test-secret").unwrap());

    let app = handlers::protected_router(service.clone())
        .layer(from_fn_with_state(jwt_auth.clone(), jwt_auth_middleware));

    TestApp {
        app,
        service,
        jwt_auth,
        wine_id,
    }
}

fn token_for(jwt_auth: &JwtAuth, user_id: Uuid) -> String {
    jwt_auth.create_access_token(user_id, "winelover").unwrap()
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn authed_json(method: &str, uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn cart_routes_require_token() {
    let test = carts_app();

    let response = test
        .app
        .oneshot(Request::get("/cart").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn empty_cart_returns_empty_list() {
    let test = carts_app();
    let token = token_for(&test.jwt_auth, Uuid::now_v7());

    let response = test
        .app
        .oneshot(
            Request::get("/cart")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["cart"], json!([]));
}

#[tokio::test]
async fn adding_same_wine_twice_merges_quantities() {
    let test = carts_app();
    let user = Uuid::now_v7();
    let token = token_for(&test.jwt_auth, user);

    let response = test
        .app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/cart",
            &token,
            json!({"wine_id": test.wine_id, "quantity": 2}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Item added to cart successfully");

    let response = test
        .app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/cart",
            &token,
            json!({"wine_id": test.wine_id, "quantity": 3}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = test
        .app
        .oneshot(
            Request::get("/cart")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(response.into_body()).await;
    let cart = body["cart"].as_array().unwrap();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0]["quantity"], 5);
}

#[tokio::test]
async fn adding_unknown_wine_returns_400() {
    let test = carts_app();
    let token = token_for(&test.jwt_auth, Uuid::now_v7());

    let response = test
        .app
        .oneshot(authed_json(
            "POST",
            "/cart",
            &token,
            json!({"wine_id": Uuid::now_v7()}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn zero_quantity_returns_400() {
    let test = carts_app();
    let token = token_for(&test.jwt_auth, Uuid::now_v7());

    let response = test
        .app
        .oneshot(authed_json(
            "POST",
            "/cart",
            &token,
            json!({"wine_id": test.wine_id, "quantity": 0}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn updating_another_users_item_returns_403() {
    let test = carts_app();
    let owner = Uuid::now_v7();

    let item = test
        .service
        .add_to_cart(
            owner,
            AddToCart {
                wine_id: test.wine_id,
                quantity: Some(1),
            },
        )
        .await
        .unwrap();

    let intruder_token = token_for(&test.jwt_auth, Uuid::now_v7());
    let response = test
        .app
        .oneshot(authed_json(
            "PUT",
            &format!("/cart/{}", item.id),
            &intruder_token,
            json!({"quantity": 9}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn updating_missing_item_returns_404() {
    let test = carts_app();
    let token = token_for(&test.jwt_auth, Uuid::now_v7());

    let response = test
        .app
        .oneshot(authed_json(
            "PUT",
            &format!("/cart/{}", Uuid::now_v7()),
            &token,
            json!({"quantity": 2}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn owner_can_update_and_remove_items() {
    let test = carts_app();
    let owner = Uuid::now_v7();
    let token = token_for(&test.jwt_auth, owner);

    let item = test
        .service
        .add_to_cart(
            owner,
            AddToCart {
                wine_id: test.wine_id,
                quantity: Some(2),
            },
        )
        .await
        .unwrap();

    let response = test
        .app
        .clone()
        .oneshot(authed_json(
            "PUT",
            &format!("/cart/{}", item.id),
            &token,
            json!({"quantity": 6}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = test.service.get_cart(owner).await.unwrap();
    assert_eq!(updated[0].quantity, 6);

    let response = test
        .app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/cart/{}", item.id))
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Cart item removed successfully");
    assert!(test.service.get_cart(owner).await.unwrap().is_empty());
}
