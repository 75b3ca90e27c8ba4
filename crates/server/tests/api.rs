//! HTTP integration tests over an in-memory recommender.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use canonical::{Preprocessor, StopwordSet};
use http_body_util::BodyExt;
use index::ContentArtifacts;
use ingest::{Catalog, Product, ProductId, RatingRecord, RatingTable, Tables};
use matcher::{MatchConfig, Recommender};
use serde_json::{json, Value};
use server::{build_router, ServerConfig, ServerState};
use tower::ServiceExt;

fn product(id: u64, name: &str, description: &str) -> Product {
    Product {
        product_id: ProductId(id),
        product_name: name.into(),
        image: None,
        link: Some(format!("https://shop.example/p/{id}")),
        processed_description: description.into(),
    }
}

fn test_state() -> Arc<ServerState> {
    let catalog = Catalog::from_products(vec![
        product(101, "Áo thun nam", "áo thun nam"),
        product(102, "Quần jean nam", "quần jean nam"),
        product(103, "Váy hoa", "váy hoa nữ"),
        product(55, "Áo khoác", "áo khoác gió"),
        product(72, "Giày thể thao", "giày thể thao"),
    ])
    .expect("catalog");
    let artifacts = ContentArtifacts::from_corpus(catalog.processed_descriptions());
    let tables = Tables {
        catalog,
        user_recommendations: RatingTable::from_records(vec![
            RatingRecord::new(7, 55, 4.5),
            RatingRecord::new(7, 61, 3.0),
            RatingRecord::new(7, 72, 5.0),
        ]),
        item_recommendations: RatingTable::from_records(vec![
            RatingRecord::new(7, 101, 4.2),
            RatingRecord::new(8, 101, 2.5),
        ]),
        rating_history: RatingTable::from_records(vec![
            RatingRecord::new(7, 103, 5.0).with_user("Lan"),
            RatingRecord::new(7, 102, 4.0).with_user("Lan"),
        ]),
    };
    let recommender = Recommender::new(
        Preprocessor::with_stopwords(StopwordSet::from_lines(["và"], false)),
        artifacts,
        tables,
        MatchConfig::default(),
    )
    .expect("recommender");
    Arc::new(ServerState::with_recommender(
        ServerConfig::default(),
        recommender,
    ))
}

async fn send(state: Arc<ServerState>, request: Request<Body>) -> (StatusCode, Value) {
    let response = build_router(state)
        .oneshot(request)
        .await
        .expect("router response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("response body")
        .to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_and_ready() {
    let state = test_state();
    let (status, body) = send(state.clone(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(state, get("/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["components"]["products"], 5);
    assert_eq!(body["components"]["indexed_documents"], 5);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();
    let response = build_router(test_state()).oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn test_recommend_by_product_id() {
    let (status, body) = send(
        test_state(),
        post_json(
            "/api/v1/content/recommend",
            json!({"query": "101", "count": 5, "threshold": 0.4}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source_product"], 101);
    assert_eq!(body["matches"][0]["product_id"], 101);
    assert_eq!(body["matches"][0]["product_name"], "Áo thun nam");
}

#[tokio::test]
async fn test_recommend_uses_configured_defaults() {
    let (status, body) = send(
        test_state(),
        post_json("/api/v1/content/recommend", json!({"query": "Áo thun nam!"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source_product"], Value::Null);
    assert_eq!(body["processed_query"], "áo thun nam");
    assert!(body["matches"].as_array().unwrap().len() <= 5);
}

#[tokio::test]
async fn test_empty_query_is_bad_request() {
    let (status, body) = send(
        test_state(),
        post_json("/api/v1/content/recommend", json!({"query": "  "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "EMPTY_QUERY");
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let state = test_state();
    let (status, body) = send(
        state.clone(),
        post_json("/api/v1/content/recommend", json!({"query": "999"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "UNKNOWN_PRODUCT");

    let (status, _) = send(state, get("/api/v1/products/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_out_of_range_threshold_is_rejected() {
    let (status, body) = send(
        test_state(),
        post_json(
            "/api/v1/content/recommend",
            json!({"query": "áo", "threshold": 2.0}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_preprocess_endpoint() {
    let (status, body) = send(
        test_state(),
        post_json("/api/v1/preprocess", json!({"text": "Áo thun và quần 2 kg"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], "áo thun quần");
    assert_eq!(body["tokens"], json!(["áo", "thun", "quần"]));
}

#[tokio::test]
async fn test_user_recommendations() {
    let state = test_state();
    let (status, body) = send(
        state.clone(),
        get("/api/v1/users/7/recommendations?count=2&threshold=3.5"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let pairs: Vec<(u64, f64)> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|item| {
            (
                item["product_id"].as_u64().unwrap(),
                item["rating"].as_f64().unwrap(),
            )
        })
        .collect();
    assert_eq!(pairs, vec![(72, 5.0), (55, 4.5)]);

    let (status, body) = send(state, get("/api/v1/users/42/recommendations")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "UNKNOWN_USER");
}

#[tokio::test]
async fn test_item_audience_and_choices() {
    let state = test_state();
    let (status, body) = send(state.clone(), get("/api/v1/items/101/audience")).await;
    assert_eq!(status, StatusCode::OK);
    let members = body.as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["user"], "Lan");
    assert_eq!(members[0]["top_items"][0]["product_id"], 103);

    let (_, body) = send(state.clone(), get("/api/v1/items")).await;
    assert_eq!(body, json!([{"id": 101, "label": "101 - Áo thun nam"}]));

    let (_, body) = send(state, get("/api/v1/users")).await;
    assert_eq!(body, json!([{"id": 7, "label": "7 - Lan"}]));
}

#[tokio::test]
async fn test_history_and_top_raters() {
    let state = test_state();
    let (status, body) = send(state.clone(), get("/api/v1/users/7/ratings?limit=1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["product_name"], "Váy hoa");

    let (_, body) = send(state, get("/api/v1/users/top")).await;
    assert_eq!(body[0]["user_id"], 7);
    assert_eq!(body[0]["ratings"], 2);
}

#[tokio::test]
async fn test_metrics_count_lookups() {
    let state = test_state();
    send(state.clone(), get("/api/v1/users/7/recommendations")).await;
    let (status, body) = send(state, get("/metrics")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lookups"]["user_recommendations"]["requests"], 1);
}

#[tokio::test]
async fn test_unknown_route() {
    let (status, body) = send(test_state(), get("/api/v1/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}
