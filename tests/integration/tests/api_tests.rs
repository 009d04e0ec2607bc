//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn create_user(server: &TestServer, request: &CreateUserRequest) -> UserBody {
    let response = server.post("/api/users", request).await.unwrap();
    let body: Envelope<UserBody> = assert_json(response, StatusCode::CREATED).await.unwrap();
    body.into_data()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/health").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["status"], "OK");
    assert_eq!(body["services"]["database"], "Connected");
}

#[tokio::test]
async fn test_detailed_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/health/detailed").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["services"]["database"]["backend"], "postgres");
    assert!(body["services"]["database"]["poolSize"].is_number());
}

// ============================================================================
// Create / Get Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = CreateUserRequest::unique();
    request.email = request.email.to_uppercase();
    request.address = Some(AddressBody {
        city: Some("Chennai".to_string()),
        ..AddressBody::default()
    });

    let created = create_user(&server, &request).await;
    assert_eq!(created.email, request.email.to_lowercase());
    assert!(created.is_active);
    assert_eq!(created.address.country.as_deref(), Some("India"));
    assert_eq!(created.full_address, "Chennai, India");

    let response = server
        .get(&format!("/api/users/{}", created.id))
        .await
        .unwrap();
    let fetched: Envelope<UserBody> = assert_json(response, StatusCode::OK).await.unwrap();
    let fetched = fetched.into_data();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.created_at, created.created_at);
}

#[tokio::test]
async fn test_create_validation_errors() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post("/api/users", &json!({"name": "x".repeat(101), "email": "bad"}))
        .await
        .unwrap();
    let body: Envelope<Value> = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    assert!(!body.success);
    let fields: Vec<String> = body
        .errors
        .unwrap()
        .into_iter()
        .map(|e| e.field)
        .collect();
    assert_eq!(fields, ["name", "email", "phone"]);
}

#[tokio::test]
async fn test_create_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateUserRequest::unique();
    create_user(&server, &request).await;

    let mut again = CreateUserRequest::unique();
    again.email = request.email.to_uppercase();
    let response = server.post("/api/users", &again).await.unwrap();
    let body: Envelope<Value> = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    assert_eq!(body.field.as_deref(), Some("email"));
    assert_eq!(
        body.message.as_deref(),
        Some("User with this email already exists")
    );
}

#[tokio::test]
async fn test_get_invalid_and_missing_id() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/users/not-an-id").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server.get("/api/users/1").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Update / Activation / Delete Tests
// ============================================================================

#[tokio::test]
async fn test_update_user_partial() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = CreateUserRequest::unique();
    request.address = Some(AddressBody {
        street: Some("12 Lake Road".to_string()),
        ..AddressBody::default()
    });
    let created = create_user(&server, &request).await;

    let response = server
        .put(
            &format!("/api/users/{}", created.id),
            &json!({"phone": "(080) 1234-5678", "address": {"zipCode": "560001"}}),
        )
        .await
        .unwrap();
    let updated: Envelope<UserBody> = assert_json(response, StatusCode::OK).await.unwrap();
    let updated = updated.into_data();

    assert_eq!(updated.phone, "(080) 1234-5678");
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.email, created.email);
    assert_eq!(updated.address.street.as_deref(), Some("12 Lake Road"));
    assert_eq!(updated.address.zip_code.as_deref(), Some("560001"));
}

#[tokio::test]
async fn test_deactivate_is_idempotent() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let created = create_user(&server, &CreateUserRequest::unique()).await;
    let path = format!("/api/users/{}/deactivate", created.id);

    let first: Envelope<UserBody> = assert_json(server.patch(&path).await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(first.message.as_deref(), Some("User deactivated successfully"));
    let first = first.into_data();
    assert!(!first.is_active);

    let second: Envelope<UserBody> = assert_json(server.patch(&path).await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(second.message.as_deref(), Some("User is already inactive"));
    assert_eq!(second.into_data().updated_at, first.updated_at);
}

#[tokio::test]
async fn test_delete_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let created = create_user(&server, &CreateUserRequest::unique()).await;
    let path = format!("/api/users/{}", created.id);

    let deleted: Envelope<DeletedBody> =
        assert_json(server.delete(&path).await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert_eq!(deleted.into_data().id, created.id);

    let response = server.get(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Listing Tests
// ============================================================================

#[tokio::test]
async fn test_list_search_filter_and_paging() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let marker = format!("Lister{}x{}", unique_suffix(), *RUN_TAG);

    let mut ids = Vec::new();
    for _ in 0..12 {
        let user = create_user(&server, &CreateUserRequest::named(&marker)).await;
        ids.push(user.id);
    }
    let inactive = &ids[0];
    assert_status(
        server
            .patch(&format!("/api/users/{inactive}/deactivate"))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();

    let search = marker.to_lowercase();
    let response = server
        .get(&format!("/api/users?search={search}&limit=5&page=2"))
        .await
        .unwrap();
    let page: Envelope<Vec<UserBody>> = assert_json(response, StatusCode::OK).await.unwrap();
    let pagination = page.pagination.as_ref().unwrap();
    assert_eq!(pagination.current_page, 2);
    assert_eq!(pagination.total_pages, 3);
    assert_eq!(pagination.total_users, 12);
    assert!(pagination.has_next_page);
    assert!(pagination.has_prev_page);
    assert_eq!(page.into_data().len(), 5);

    let response = server
        .get(&format!("/api/users?search={search}&active=false"))
        .await
        .unwrap();
    let page: Envelope<Vec<UserBody>> = assert_json(response, StatusCode::OK).await.unwrap();
    let users = page.into_data();
    assert_eq!(users.len(), 1);
    assert_eq!(&users[0].id, inactive);
}
