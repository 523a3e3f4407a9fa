//! Router dispatch and session flow tests
//!
//! The database is a SeaORM mock: tests either avoid it entirely or
//! enqueue the exact result sets a route is expected to read.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use folio_common::auth::{hash_password, SessionManager};
use folio_common::cache::CartStore;
use folio_common::config::{AccountConfig, AppConfig};
use folio_common::db::models::{Document, Lecture};
use folio_common::db::{DbPool, Repository};
use folio_common::errors::Result as AppResult;
use folio_common::printing::{PrintBackend, PrintJob, PrintReceipt};
use folio_gateway::{create_router, AppState};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use tower::ServiceExt;

struct StubPrinter;

#[async_trait::async_trait]
impl PrintBackend for StubPrinter {
    async fn submit(&self, job: &PrintJob) -> AppResult<PrintReceipt> {
        Ok(PrintReceipt {
            job_id: "stub-job".to_string(),
            accepted_pages: job.total_pages,
        })
    }
}

fn test_state(conn: DatabaseConnection) -> AppState {
    let mut config = AppConfig::default();
    config.rate_limit.enabled = false;
    config.auth.session_secret = Some("test_secret".to_string());
    config.auth.accounts = vec![AccountConfig {
        username: "kasse".to_string(),
        password_sha256: hash_password("hunter2"),
    }];

    let config = Arc::new(config);
    let db = DbPool {
        primary: Arc::new(conn),
        replica: None,
    };

    AppState {
        config: config.clone(),
        db: db.clone(),
        repo: Repository::new(db, config.pricing.clone()),
        carts: Arc::new(CartStore::new(&config.redis).unwrap()),
        printer: Arc::new(StubPrinter),
        sessions: Arc::new(SessionManager::from_config(&config.auth)),
    }
}

fn empty_mock() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_unmatched_paths_are_not_found() {
    let app = create_router(test_state(empty_mock()));

    let response = app
        .clone()
        .oneshot(get_request("/data/nonexistent"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(get_request("/totally/elsewhere")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_is_always_up() {
    let app = create_router(test_state(empty_mock()));

    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let app = create_router(test_state(empty_mock()));

    let response = app
        .oneshot(json_request(
            "POST",
            "/data/login",
            serde_json::json!({"username": "kasse", "password": "wrong"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_session_roundtrip() {
    let state = test_state(empty_mock());
    let app = create_router(state);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/data/login",
            serde_json::json!({"username": "kasse", "password": "hunter2"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login sets a session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/data/user")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let user: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(user["username"], "kasse");
}

#[tokio::test]
async fn test_user_without_session_is_unauthorized() {
    let app = create_router(test_state(empty_mock()));

    let response = app.oneshot(get_request("/data/user")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_requires_session() {
    let app = create_router(test_state(empty_mock()));

    let response = app.oneshot(get_request("/admin")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_documents_of_missing_lecture_is_not_found() {
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<Lecture>::new()])
        .into_connection();

    let app = create_router(test_state(conn));

    let response = app
        .oneshot(get_request("/data/lectures/42/documents"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_lecture_without_documents_yields_empty_page() {
    let lecture = Lecture {
        id: 42,
        name: "Lineare Algebra I".to_string(),
        aliases: vec!["LA1".to_string()],
        comment: String::new(),
        validated: true,
    };

    let count_row: BTreeMap<&str, sea_orm::Value> =
        [("num_items", sea_orm::Value::BigInt(Some(0)))]
            .into_iter()
            .collect();

    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![lecture]])
        .append_query_results([vec![count_row]])
        .append_query_results([Vec::<Document>::new()])
        .into_connection();

    let app = create_router(test_state(conn));

    let response = app
        .oneshot(get_request("/data/lectures/42/documents"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let page: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(page["total"], 0);
    assert_eq!(page["documents"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_create_lecture_requires_explicit_validated_flag() {
    // The schema has no default for `validated`; the API must not invent
    // one either.
    let app = create_router(test_state(empty_mock()));

    let response = app
        .oneshot(json_request(
            "POST",
            "/data/lectures",
            serde_json::json!({"name": "Analysis I"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
