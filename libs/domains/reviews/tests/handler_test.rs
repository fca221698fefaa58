//! Handler tests for the Reviews domain
//!
//! In-memory repository with the real JWT middleware on the mutation
//! routes, mirroring the app wiring.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::middleware::from_fn_with_state;
use axum::Router;
use axum_helpers::{jwt_auth_middleware, JwtAuth, JwtConfig};
use domain_reviews::*;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt; // for oneshot()
use uuid::Uuid;

struct TestApp {
    app: Router,
    service: Arc<ReviewService<InMemoryReviewRepository>>,
    repo: InMemoryReviewRepository,
    jwt_auth: JwtAuth,
    wine_id: Uuid,
}

fn reviews_app() -> TestApp {
    let repo = InMemoryReviewRepository::new();
    let wine_id = Uuid::now_v7();
    repo.register_wine(wine_id);

    let service = Arc::new(ReviewService::new(repo.clone()));
    let jwt_auth =
        JwtAuth::new(&JwtConfig::new("handler-test-secret-handler-test-secret").unwrap());

    let protected = handlers::protected_router(service.clone())
        .layer(from_fn_with_state(jwt_auth.clone(), jwt_auth_middleware));

    let app = Router::new()
        .merge(handlers::public_router(service.clone()))
        .merge(protected);

    TestApp {
        app,
        service,
        repo,
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
async fn listing_reviews_is_public() {
    let test = reviews_app();

    let response = test
        .app
        .oneshot(
            Request::get(format!("/wines/{}/reviews", test.wine_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["reviews"], json!([]));
}

#[tokio::test]
async fn listing_reviews_for_unknown_wine_returns_404() {
    let test = reviews_app();

    let response = test
        .app
        .oneshot(
            Request::get(format!("/wines/{}/reviews", Uuid::now_v7()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn posting_a_review_requires_token() {
    let test = reviews_app();

    let response = test
        .app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/wines/{}/reviews", test.wine_id))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({"rating": 4}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn posting_a_review_returns_201_with_review_id() {
    let test = reviews_app();
    let token = token_for(&test.jwt_auth, Uuid::now_v7());

    let response = test
        .app
        .oneshot(authed_json(
            "POST",
            &format!("/wines/{}/reviews", test.wine_id),
            &token,
            json!({"rating": 5, "review_text": "Superb nose"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Review added successfully");
    assert!(body["review_id"].is_string());
}

#[tokio::test]
async fn out_of_range_rating_returns_400() {
    let test = reviews_app();
    let token = token_for(&test.jwt_auth, Uuid::now_v7());

    let response = test
        .app
        .oneshot(authed_json(
            "POST",
            &format!("/wines/{}/reviews", test.wine_id),
            &token,
            json!({"rating": 6}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn review_lifecycle_recomputes_the_wine_rating() {
    let test = reviews_app();
    let first_author = Uuid::now_v7();
    let second_author = Uuid::now_v7();

    let first_token = token_for(&test.jwt_auth, first_author);
    let response = test
        .app
        .clone()
        .oneshot(authed_json(
            "POST",
            &format!("/wines/{}/reviews", test.wine_id),
            &first_token,
            json!({"rating": 5}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let second_token = token_for(&test.jwt_auth, second_author);
    let response = test
        .app
        .clone()
        .oneshot(authed_json(
            "POST",
            &format!("/wines/{}/reviews", test.wine_id),
            &second_token,
            json!({"rating": 3}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let second_id = json_body(response.into_body()).await["review_id"]
        .as_str()
        .unwrap()
        .parse::<Uuid>()
        .unwrap();

    assert_eq!(test.repo.wine_rating(test.wine_id), Some(4.0));

    let response = test
        .app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/wines/{}/reviews/{}", test.wine_id, second_id))
                .header(header::AUTHORIZATION, format!("Bearer {}", second_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(test.repo.wine_rating(test.wine_id), Some(5.0));
}

#[tokio::test]
async fn updating_someone_elses_review_returns_403() {
    let test = reviews_app();
    let author = Uuid::now_v7();

    let review = test
        .service
        .add_review(
            test.wine_id,
            author,
            CreateReview {
                rating: 4,
                review_text: None,
            },
        )
        .await
        .unwrap();

    let intruder_token = token_for(&test.jwt_auth, Uuid::now_v7());
    let response = test
        .app
        .oneshot(authed_json(
            "PUT",
            &format!("/wines/{}/reviews/{}", test.wine_id, review.id),
            &intruder_token,
            json!({"rating": 1}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn updating_a_missing_review_returns_404() {
    let test = reviews_app();
    let token = token_for(&test.jwt_auth, Uuid::now_v7());

    let response = test
        .app
        .oneshot(authed_json(
            "PUT",
            &format!("/wines/{}/reviews/{}", test.wine_id, Uuid::now_v7()),
            &token,
            json!({"rating": 2}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
