use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::{
    api,
    persistence::{self, EstateStore, SqliteStore},
    state::{AppState, MemoryStore},
};

fn app_with<S: EstateStore>(store: S) -> Router {
    api::routes().with_state(Arc::new(AppState::new(store)))
}

fn setup_app() -> Router {
    app_with(MemoryStore::new())
}

async fn setup_sqlite_app() -> Router {
    let path = std::env::temp_dir()
        .join(format!("survey-test-{}.db", uuid::Uuid::new_v4()))
        .to_string_lossy()
        .to_string();
    let db = persistence::init_database(&path, 2).await.expect("init db");
    app_with(SqliteStore::new(db))
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn create_estate(app: &Router, width: i64, length: i64) -> String {
    let res = app
        .clone()
        .oneshot(post_json("/estate", json!({ "width": width, "length": length })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    read_json(res).await["id"]
        .as_str()
        .expect("estate id")
        .to_string()
}

async fn plant(app: &Router, estate_id: &str, x: i64, y: i64, height: i64) -> StatusCode {
    app.clone()
        .oneshot(post_json(
            &format!("/estate/{}/tree", estate_id),
            json!({ "x": x, "y": y, "height": height }),
        ))
        .await
        .unwrap()
        .status()
}

#[tokio::test]
async fn health_check() {
    let app = setup_app();
    let res = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn reject_invalid_estate_size() {
    let app = setup_app();
    for (width, length) in [(0, 10), (10, 0), (50_001, 1), (-3, 4)] {
        let res = app
            .clone()
            .oneshot(post_json("/estate", json!({ "width": width, "length": length })))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{width}x{length}");
        assert!(read_json(res).await["error"].is_string());
    }
}

#[tokio::test]
async fn reject_malformed_body() {
    let app = setup_app();
    let res = app
        .oneshot(post_json("/estate", json!({ "width": "wide" })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn plant_trees_with_validation() {
    let app = setup_app();
    let estate_id = create_estate(&app, 5, 10).await;

    assert_eq!(plant(&app, &estate_id, 10, 5, 30).await, StatusCode::OK);
    assert_eq!(plant(&app, &estate_id, 10, 5, 12).await, StatusCode::CONFLICT);
    assert_eq!(plant(&app, &estate_id, 11, 1, 10).await, StatusCode::BAD_REQUEST);
    assert_eq!(plant(&app, &estate_id, 1, 6, 10).await, StatusCode::BAD_REQUEST);
    assert_eq!(plant(&app, &estate_id, 1, 1, 31).await, StatusCode::BAD_REQUEST);
    assert_eq!(plant(&app, &estate_id, 1, 1, 0).await, StatusCode::BAD_REQUEST);
    assert_eq!(plant(&app, "missing", 1, 1, 10).await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn estate_stats() {
    let app = setup_app();
    let estate_id = create_estate(&app, 5, 5).await;

    let res = app
        .clone()
        .oneshot(get(&format!("/estate/{}/stats", estate_id)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    for (x, height) in [(1, 10), (2, 4), (3, 7), (4, 20)] {
        assert_eq!(plant(&app, &estate_id, x, 1, height).await, StatusCode::OK);
    }

    let res = app
        .clone()
        .oneshot(get(&format!("/estate/{}/stats", estate_id)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        read_json(res).await,
        json!({
            "tree_count": 4,
            "max_height": 20,
            "min_height": 4,
            "median_height": 8
        })
    );
}

#[tokio::test]
async fn drone_plan_full_and_truncated() {
    let app = setup_app();
    let estate_id = create_estate(&app, 2, 2).await;
    assert_eq!(plant(&app, &estate_id, 2, 1, 5).await, StatusCode::OK);

    let res = app
        .clone()
        .oneshot(get(&format!("/estate/{}/drone-plan", estate_id)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(read_json(res).await, json!({ "distance": 63 }));

    let res = app
        .clone()
        .oneshot(get(&format!("/estate/{}/drone-plan?max-distance=1", estate_id)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        read_json(res).await,
        json!({ "distance": 1, "rest": { "x": 1, "y": 1 } })
    );

    // Non-positive budgets never truncate
    let res = app
        .clone()
        .oneshot(get(&format!("/estate/{}/drone-plan?max-distance=-4", estate_id)))
        .await
        .unwrap();
    assert_eq!(read_json(res).await, json!({ "distance": 63 }));
}

#[tokio::test]
async fn drone_plan_rejects_bad_budget_and_unknown_estate() {
    let app = setup_app();
    let estate_id = create_estate(&app, 3, 3).await;

    let res = app
        .clone()
        .oneshot(get(&format!("/estate/{}/drone-plan?max-distance=far", estate_id)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app
        .clone()
        .oneshot(get("/estate/unknown/drone-plan"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn sqlite_store_end_to_end() {
    let app = setup_sqlite_app().await;
    let estate_id = create_estate(&app, 1, 5).await;
    assert_eq!(plant(&app, &estate_id, 3, 1, 4).await, StatusCode::OK);
    assert_eq!(plant(&app, &estate_id, 5, 1, 2).await, StatusCode::OK);
    assert_eq!(plant(&app, &estate_id, 5, 1, 9).await, StatusCode::CONFLICT);

    let res = app
        .clone()
        .oneshot(get(&format!("/estate/{}/drone-plan", estate_id)))
        .await
        .unwrap();
    assert_eq!(read_json(res).await, json!({ "distance": 65 }));

    let res = app
        .clone()
        .oneshot(get(&format!("/estate/{}/drone-plan?max-distance=41", estate_id)))
        .await
        .unwrap();
    assert_eq!(
        read_json(res).await,
        json!({ "distance": 41, "rest": { "x": 4, "y": 1 } })
    );
}
