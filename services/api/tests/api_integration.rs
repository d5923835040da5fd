//! Integration tests for the marketplace API
//!
//! Each test boots an isolated app (fresh store, seeded catalog) on an
//! ephemeral port and drives it over HTTP with reqwest.

use api::{config::ServerConfig, routes, state};
use reqwest::StatusCode;
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Spawn an isolated app instance and return its base URL
async fn spawn_app() -> String {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        session_ttl_seconds: 3600,
    };

    let app_state = state::bootstrap(&config).await.expect("bootstrap failed");
    let app = routes::create_router(app_state);

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().expect("no local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server failed");
    });

    format!("http://{addr}")
}

/// Register a user and return the bearer token
async fn register_user(client: &reqwest::Client, base: &str, username: &str) -> String {
    let response = client
        .post(format!("{base}/api/register"))
        .json(&json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": "a decent password",
        }))
        .send()
        .await
        .expect("register request failed");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("register body");
    body["token"].as_str().expect("token in body").to_string()
}

#[tokio::test]
async fn test_health_check() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{base}/health"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_list_courses_returns_seeded_catalog() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{base}/api/courses"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let courses: Vec<Value> = response.json().await.unwrap();
    assert_eq!(courses.len(), 6);
    assert_eq!(courses[0]["id"], 1);
    assert_eq!(courses[0]["price"], 12999);
    for course in &courses {
        let rating = course["rating"].as_i64().unwrap();
        assert!((0..=50).contains(&rating));
        assert!(course["price"].as_i64().unwrap() > 0);
    }
}

#[tokio::test]
async fn test_get_course_by_id() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{base}/api/courses/2"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let course: Value = response.json().await.unwrap();
    assert_eq!(course["title"], "React & Redux Masterclass");
    assert_eq!(course["isNew"], false);
}

#[tokio::test]
async fn test_non_numeric_course_id_returns_404() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{base}/api/courses/abc"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_course_returns_404() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{base}/api/courses/999"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_protected_routes_require_a_session() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let purchase = client
        .post(format!("{base}/api/purchase"))
        .json(&json!({"purchaseType": "course", "courseId": 1}))
        .send()
        .await
        .unwrap();
    assert_eq!(purchase.status(), StatusCode::UNAUTHORIZED);

    let courses = client
        .get(format!("{base}/api/user/courses"))
        .send()
        .await
        .unwrap();
    assert_eq!(courses.status(), StatusCode::UNAUTHORIZED);

    let garbage_token = client
        .get(format!("{base}/api/user"))
        .bearer_auth("not-a-token")
        .send()
        .await
        .unwrap();
    assert_eq!(garbage_token.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_course_purchase_flow() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_user(&client, &base, "buyer").await;

    let response = client
        .post(format!("{base}/api/purchase"))
        .bearer_auth(&token)
        .json(&json!({"purchaseType": "course", "courseId": 1}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let grant: Value = response.json().await.unwrap();
    assert_eq!(grant["userId"], 1);
    assert_eq!(grant["courseId"], 1);
    assert!(grant["purchasedAt"].is_string());

    let response = client
        .get(format!("{base}/api/user/courses"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let courses: Vec<Value> = response.json().await.unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0]["id"], 1);
    assert_eq!(courses[0]["price"], 12999);
}

#[tokio::test]
async fn test_purchase_of_unknown_course_creates_nothing() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_user(&client, &base, "buyer").await;

    let response = client
        .post(format!("{base}/api/purchase"))
        .bearer_auth(&token)
        .json(&json!({"purchaseType": "course", "courseId": 999}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let courses: Vec<Value> = client
        .get(format!("{base}/api/user/courses"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(courses.is_empty());
}

#[tokio::test]
async fn test_invalid_purchase_type_is_rejected() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_user(&client, &base, "buyer").await;

    let response = client
        .post(format!("{base}/api/purchase"))
        .bearer_auth(&token)
        .json(&json!({"purchaseType": "lifetime"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["field"], "purchaseType");
}

#[tokio::test]
async fn test_course_purchase_without_course_id_is_rejected() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_user(&client, &base, "buyer").await;

    let response = client
        .post(format!("{base}/api/purchase"))
        .bearer_auth(&token)
        .json(&json!({"purchaseType": "course"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["field"], "courseId");
}

#[tokio::test]
async fn test_type_malformed_purchase_payload_returns_400() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_user(&client, &base, "buyer").await;

    let response = client
        .post(format!("{base}/api/purchase"))
        .bearer_auth(&token)
        .json(&json!({"purchaseType": "course", "courseId": "abc"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["field"], "body");

    let courses: Vec<Value> = client
        .get(format!("{base}/api/user/courses"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(courses.is_empty());
}

#[tokio::test]
async fn test_malformed_register_body_returns_400() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/api/register"))
        .json(&json!({"username": "eve"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["field"], "body");
}

#[tokio::test]
async fn test_subscription_replacement_keeps_one_active() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_user(&client, &base, "subscriber").await;

    let monthly = client
        .post(format!("{base}/api/purchase"))
        .bearer_auth(&token)
        .json(&json!({"purchaseType": "monthly"}))
        .send()
        .await
        .unwrap();
    assert_eq!(monthly.status(), StatusCode::CREATED);
    let monthly: Value = monthly.json().await.unwrap();
    assert_eq!(monthly["planType"], "monthly");
    assert_eq!(monthly["active"], true);

    let annual = client
        .post(format!("{base}/api/purchase"))
        .bearer_auth(&token)
        .json(&json!({"purchaseType": "annual"}))
        .send()
        .await
        .unwrap();
    assert_eq!(annual.status(), StatusCode::CREATED);

    let active: Value = client
        .get(format!("{base}/api/user/subscription"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(active["planType"], "annual");
    assert_eq!(active["active"], true);
    assert_ne!(active["id"], monthly["id"]);
}

#[tokio::test]
async fn test_missing_subscription_is_null() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_user(&client, &base, "browser").await;

    let response = client
        .get(format!("{base}/api/user/subscription"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert!(body.is_null());
}

#[tokio::test]
async fn test_login_logout_lifecycle() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    register_user(&client, &base, "carol").await;

    let wrong = client
        .post(format!("{base}/api/login"))
        .json(&json!({"username": "carol", "password": "wrong password"}))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let login: Value = client
        .post(format!("{base}/api/login"))
        .json(&json!({"username": "carol", "password": "a decent password"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let token = login["token"].as_str().unwrap().to_string();

    let me: Value = client
        .get(format!("{base}/api/user"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(me["username"], "carol");
    assert!(me.get("passwordHash").is_none());

    let logout = client
        .post(format!("{base}/api/logout"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(logout.status(), StatusCode::OK);

    let after = client
        .get(format!("{base}/api/user"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(after.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_duplicate_registration_is_rejected() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    register_user(&client, &base, "dave").await;

    let response = client
        .post(format!("{base}/api/register"))
        .json(&json!({
            "username": "dave",
            "email": "dave2@example.com",
            "password": "a decent password",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_registration_validates_fields() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/api/register"))
        .json(&json!({
            "username": "ok_name",
            "email": "not-an-email",
            "password": "a decent password",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["field"], "email");
}
