//! Handler tests for the coffees domain
//!
//! These drive the coffee router over the in-memory repository:
//! - Request deserialization and validation
//! - Response serialization and status codes
//! - Error responses

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_coffees::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    let service = CoffeeService::new(InMemoryCoffeeRepository::new());
    Router::new().nest("/coffees", handlers::router(service))
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn with_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn create(app: &Router, name: &str, flavors: &[&str]) -> Coffee {
    let response = app
        .clone()
        .oneshot(with_json(
            "POST",
            "/coffees",
            json!({ "name": name, "brand": "Buddy Brew", "flavors": flavors }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_coffee_returns_200_with_flavors() {
    let app = app();

    let coffee = create(&app, "Shipwreck Roast", &["chocolate", "vanilla"]).await;

    assert_eq!(coffee.id, 1);
    assert_eq!(coffee.name, "Shipwreck Roast");
    assert_eq!(coffee.flavor_names(), vec!["chocolate", "vanilla"]);
}

#[tokio::test]
async fn test_create_keeps_request_flavor_order_when_reusing_flavors() {
    let app = app();
    create(&app, "Shipwreck Roast", &["chocolate"]).await;

    let coffee = create(&app, "Tiramisu", &["vanilla", "chocolate"]).await;

    assert_eq!(coffee.flavor_names(), vec!["vanilla", "chocolate"]);
}

#[tokio::test]
async fn test_create_coffee_with_unknown_field_is_rejected() {
    let app = app();

    let response = app
        .clone()
        .oneshot(with_json(
            "POST",
            "/coffees",
            json!({ "name": "Roast", "brand": "Brew", "flavors": [], "isEnabled": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.oneshot(get("/coffees")).await.unwrap();
    let coffees: Vec<Coffee> = json_body(response.into_body()).await;
    assert!(coffees.is_empty());
}

#[tokio::test]
async fn test_create_coffee_with_wrong_types_is_rejected() {
    let response = app()
        .oneshot(with_json(
            "POST",
            "/coffees",
            json!({ "name": "Roast", "brand": 5, "flavors": "vanilla" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_coffee_and_alternate_route_agree() {
    let app = app();
    let created = create(&app, "Roast", &["caramel"]).await;

    for uri in ["/coffees/1", "/coffees/else/1"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let coffee: Coffee = json_body(response.into_body()).await;
        assert_eq!(coffee, created);
    }
}

#[tokio::test]
async fn test_get_missing_coffee_is_404_with_message() {
    let response = app().oneshot(get("/coffees/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "NOT_FOUND");
    assert_eq!(body["message"], "Coffee #42 not found");
}

#[tokio::test]
async fn test_non_integer_id_is_400() {
    let app = app();

    for request in [
        get("/coffees/abc"),
        get("/coffees/else/abc"),
        with_json("PATCH", "/coffees/abc", json!({})),
        Request::builder()
            .method("DELETE")
            .uri("/coffees/abc")
            .body(Body::empty())
            .unwrap(),
    ] {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_list_coffees_paginates() {
    let app = app();
    create(&app, "first", &[]).await;
    create(&app, "second", &[]).await;

    let response = app.clone().oneshot(get("/coffees?limit=1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let coffees: Vec<Coffee> = json_body(response.into_body()).await;
    assert_eq!(coffees.len(), 1);
    assert_eq!(coffees[0].name, "first");

    let response = app
        .clone()
        .oneshot(get("/coffees?limit=5&offset=1"))
        .await
        .unwrap();
    let coffees: Vec<Coffee> = json_body(response.into_body()).await;
    assert_eq!(coffees.len(), 1);
    assert_eq!(coffees[0].name, "second");
}

#[tokio::test]
async fn test_list_coffees_rejects_bad_query() {
    let app = app();

    for uri in [
        "/coffees?limit=0",
        "/coffees?offset=-1",
        "/coffees?limit=ten",
        "/coffees?page=2",
    ] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[tokio::test]
async fn test_patch_updates_fields_and_flavors() {
    let app = app();
    create(&app, "Roast", &["chocolate"]).await;

    let response = app
        .oneshot(with_json(
            "PATCH",
            "/coffees/1",
            json!({ "brand": "Nest", "flavors": ["vanilla", "caramel"] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let coffee: Coffee = json_body(response.into_body()).await;
    assert_eq!(coffee.name, "Roast");
    assert_eq!(coffee.brand, "Nest");
    assert_eq!(coffee.flavor_names(), vec!["vanilla", "caramel"]);
}

#[tokio::test]
async fn test_patch_missing_coffee_is_404() {
    let response = app()
        .oneshot(with_json("PATCH", "/coffees/9", json!({ "name": "Ghost" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_returns_200_with_empty_body_even_when_missing() {
    let app = app();
    create(&app, "Roast", &[]).await;

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/coffees/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }

    let response = app.oneshot(get("/coffees/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
