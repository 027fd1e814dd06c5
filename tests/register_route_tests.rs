use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

use mindwell::db::sqlite::AccountStorage;
use mindwell::router::{AppState, mindwell_router};

struct TestApp {
    app: Router,
    storage: AccountStorage,
    db_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.db_path);
    }
}

async fn spawn_app(tag: &str) -> TestApp {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut db_path = std::env::temp_dir();
    db_path.push(format!(
        "mindwell-{}-{}-{}.sqlite",
        tag,
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", db_path.display());
    let storage = mindwell::db::connect::connect(&database_url)
        .await
        .expect("failed to open test database");

    let app = mindwell_router(AppState::new(storage.clone()));
    TestApp {
        app,
        storage,
        db_path,
    }
}

fn register_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/register")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

async fn body_string(resp: axum::response::Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(bytes.to_vec()).expect("response body was not utf-8")
}

async fn account_count(storage: &AccountStorage) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM accounts")
        .fetch_one(storage.pool())
        .await
        .expect("count query failed");
    count
}

#[tokio::test]
async fn register_succeeds_then_rejects_duplicate() {
    let t = spawn_app("duplicate").await;

    let payload = json!({
        "name": "Ada",
        "email": "ada@example.edu",
        "password": "s3cret!"
    });

    let resp = t
        .app
        .clone()
        .oneshot(register_request(payload.clone()))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value =
        serde_json::from_str(&body_string(resp).await).expect("response was not JSON");
    assert_eq!(
        body,
        json!({"user": {"name": "Ada", "email": "ada@example.edu"}})
    );

    let resp = t
        .app
        .clone()
        .oneshot(register_request(payload))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(body_string(resp).await, "User already exists");

    assert_eq!(account_count(&t.storage).await, 1);
}

#[tokio::test]
async fn stored_hash_verifies_and_is_not_plaintext() {
    let t = spawn_app("hash").await;

    let resp = t
        .app
        .clone()
        .oneshot(register_request(json!({
            "name": "Grace",
            "email": "grace@example.edu",
            "password": "hopper#1906"
        })))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let account = t
        .storage
        .find_by_email("grace@example.edu")
        .await
        .expect("lookup failed")
        .expect("account missing after registration");

    assert_ne!(account.password_hash, "hopper#1906");
    assert!(
        mindwell::service::password::verify("hopper#1906", &account.password_hash)
            .expect("verify failed")
    );
    assert!(
        !mindwell::service::password::verify("wrong-password", &account.password_hash)
            .expect("verify failed")
    );
}

#[tokio::test]
async fn register_rejects_empty_field() {
    let t = spawn_app("empty-field").await;

    let resp = t
        .app
        .clone()
        .oneshot(register_request(json!({
            "name": "",
            "email": "b@x.com",
            "password": "x"
        })))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_string(resp).await, "Missing required fields");

    assert_eq!(account_count(&t.storage).await, 0);
}

#[tokio::test]
async fn register_rejects_omitted_field() {
    let t = spawn_app("omitted-field").await;

    let resp = t
        .app
        .clone()
        .oneshot(register_request(json!({
            "name": "NoPassword",
            "email": "np@example.edu"
        })))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_string(resp).await, "Missing required fields");

    assert_eq!(account_count(&t.storage).await, 0);
}

#[tokio::test]
async fn concurrent_registrations_have_one_winner() {
    let t = spawn_app("race").await;

    let payload = json!({
        "name": "Race",
        "email": "race@example.edu",
        "password": "photo-finish"
    });

    let (a, b) = tokio::join!(
        t.app.clone().oneshot(register_request(payload.clone())),
        t.app.clone().oneshot(register_request(payload)),
    );
    let a = a.expect("first request failed");
    let b = b.expect("second request failed");

    let mut statuses = [a.status(), b.status()];
    statuses.sort_by_key(|s| s.as_u16());
    assert_eq!(statuses, [StatusCode::OK, StatusCode::CONFLICT]);

    assert_eq!(account_count(&t.storage).await, 1);
}

#[tokio::test]
async fn healthz_reports_ok() {
    let t = spawn_app("healthz").await;

    let resp = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "ok");
}
