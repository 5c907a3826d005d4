//! API Integration Tests
//!
//! Every test starts its own server on an ephemeral port backed by the
//! in-memory store. The PostgreSQL tests additionally require
//! `DATABASE_URL` and are skipped without it.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::time::Duration;

use integration_tests::{
    assert_json, assert_status, fixtures::*, postgres_config, test_config, TestServer,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Create Tests
// ============================================================================

#[tokio::test]
async fn test_create_user() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateUser::eshmat();

    let response = server.post("/users", &request).await.unwrap();
    let user: UserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert!(user.id > 0);
    assert_eq!(user.full_name, "Eshmat");
    assert_eq!(user.phone_number, "+998933211232");
    assert_eq!(user.tg_user, "Gap");
    assert_eq!(user.address, None);
    assert!(user.updated_at >= user.created_at);
}

#[tokio::test]
async fn test_create_users_get_distinct_ids() {
    let server = TestServer::start().await.expect("Failed to start server");

    let mut ids = Vec::new();
    for _ in 0..5 {
        let response = server.post("/users", &CreateUser::unique()).await.unwrap();
        let user: UserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
        ids.push(user.id);
    }

    let mut unique = ids.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
}

#[tokio::test]
async fn test_create_user_with_address() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateUser::unique().with_address("b");

    let response = server.post("/users", &request).await.unwrap();
    let user: UserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(user.address.as_deref(), Some("b"));
}

#[tokio::test]
async fn test_create_user_validation_errors() {
    let server = TestServer::start().await.expect("Failed to start server");
    let body = json!({
        "full_name": "   ",
        "phone_number": "12345",
        "tg_user": "@someone"
    });

    let response = server.post("/users", &body).await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    assert_eq!(error.error.code, "VALIDATION_ERROR");
    let details = error.error.details.expect("validation details");
    assert!(details["full_name"].is_array());
    assert!(details["phone_number"].is_array());
    assert!(details.get("tg_user").is_none());
}

#[tokio::test]
async fn test_invalid_phone_is_not_stored() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = CreateUser::eshmat();
    request.phone_number = "+1 555 0100".to_string();

    let response = server.post("/users", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server.get("/users/stats/summary").await.unwrap();
    let stats: UserStatsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(stats.total_users, 0);
}

#[tokio::test]
async fn test_create_user_malformed_body() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.post_raw("/users", "{not json").await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "INVALID_BODY");

    let response = server
        .post("/users", &json!({ "full_name": "Only a name" }))
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "INVALID_BODY");
}

// ============================================================================
// Read Tests
// ============================================================================

#[tokio::test]
async fn test_get_user() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.post("/users", &CreateUser::eshmat()).await.unwrap();
    let created: UserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server.get(&format!("/users/{}", created.id)).await.unwrap();
    let fetched: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_get_unknown_user() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/users/999999").await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();

    assert_eq!(error.error.code, "UNKNOWN_USER");
    assert!(error.error.message.contains("999999"));
}

#[tokio::test]
async fn test_invalid_path_parameter() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/users/abc").await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    assert_eq!(error.error.code, "INVALID_PATH_PARAMETER");
}

#[tokio::test]
async fn test_list_users_pagination() {
    let server = TestServer::start().await.expect("Failed to start server");
    for _ in 0..23 {
        let response = server.post("/users", &CreateUser::unique()).await.unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server.get("/users?page=3&limit=10").await.unwrap();
    let page: UserListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.total, 23);
    assert_eq!(page.page, 3);
    assert_eq!(page.limit, 10);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.users.len(), 3);

    let response = server.get("/users?page=9&limit=10").await.unwrap();
    let beyond: UserListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(beyond.users.is_empty());
    assert_eq!(beyond.total, 23);
}

#[tokio::test]
async fn test_list_users_defaults_and_ordering() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut last_id = 0;
    for _ in 0..3 {
        let response = server.post("/users", &CreateUser::unique()).await.unwrap();
        let user: UserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
        last_id = user.id;
    }

    let response = server.get("/users").await.unwrap();
    let page: UserListResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(page.page, 1);
    assert_eq!(page.limit, 10);
    assert_eq!(page.total_pages, 1);
    // Newest first
    assert_eq!(page.users[0].id, last_id);
}

#[tokio::test]
async fn test_list_users_empty() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/users").await.unwrap();
    let page: UserListResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(page.users.is_empty());
    assert_eq!(page.total, 0);
    assert_eq!(page.total_pages, 0);
}

#[tokio::test]
async fn test_list_users_invalid_query() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/users?page=abc").await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    assert_eq!(error.error.code, "INVALID_QUERY_PARAMETER");
}

#[tokio::test]
async fn test_address_filters() {
    let server = TestServer::start().await.expect("Failed to start server");
    for address in ["a", "a", "b"] {
        let request = CreateUser::unique().with_address(address);
        let response = server.post("/users", &request).await.unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }
    let response = server.post("/users", &CreateUser::unique()).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.get("/users/address-a").await.unwrap();
    let a: UserListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(a.total, 2);
    assert!(a.users.iter().all(|u| u.address.as_deref() == Some("a")));

    let response = server.get("/users/address-b").await.unwrap();
    let b: UserListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(b.total, 1);

    let response = server.get("/users?address=b").await.unwrap();
    let filtered: UserListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(filtered.total, 1);
}

#[tokio::test]
async fn test_list_users_search() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.post("/users", &CreateUser::eshmat()).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
    let response = server.post("/users", &CreateUser::unique()).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.get("/users?search=eshm").await.unwrap();
    let page: UserListResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.users[0].full_name, "Eshmat");
}

#[tokio::test]
async fn test_latest_users() {
    let server = TestServer::start().await.expect("Failed to start server");
    for _ in 0..4 {
        let response = server.post("/users", &CreateUser::unique()).await.unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server.get("/users/latest?limit=2").await.unwrap();
    let users: Vec<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(users.len(), 2);
    assert!(users[0].id > users[1].id);

    let response = server.get("/users/latest?limit=500").await.unwrap();
    let users: Vec<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(users.len(), 4);
}

#[tokio::test]
async fn test_search_by_phone() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.post("/users", &CreateUser::eshmat()).await.unwrap();
    let eshmat: UserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let response = server.post("/users", &CreateUser::unique()).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.get("/users/search/phone?phone=3321").await.unwrap();
    let users: Vec<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(users, vec![eshmat.clone()]);

    // Surrounding whitespace in the term is ignored
    let response = server.get("/users/search/phone?phone=%203321%20").await.unwrap();
    let users: Vec<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(users, vec![eshmat]);

    let response = server.get("/users/search/phone?phone=0000000000").await.unwrap();
    let users: Vec<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_search_by_phone_requires_term() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/users/search/phone").await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "INVALID_QUERY_PARAMETER");

    let response = server.get("/users/search/phone?phone=%20").await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_user_stats() {
    let server = TestServer::start().await.expect("Failed to start server");
    for address in [Some("a"), Some("b"), Some("b"), None] {
        let mut request = CreateUser::unique();
        if let Some(address) = address {
            request = request.with_address(address);
        }
        let response = server.post("/users", &request).await.unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server.get("/users/stats/summary").await.unwrap();
    let stats: UserStatsResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(stats.total_users, 4);
    assert_eq!(stats.address_a_users, 1);
    assert_eq!(stats.address_b_users, 2);
    assert_eq!(stats.today_registrations, 4);
}

// ============================================================================
// Update / Delete Tests
// ============================================================================

#[tokio::test]
async fn test_user_lifecycle() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.post("/users", &CreateUser::eshmat()).await.unwrap();
    let created: UserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let path = format!("/users/{}", created.id);

    let response = server
        .put(&path, &json!({ "full_name": "Yusup" }))
        .await
        .unwrap();
    let updated: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.full_name, "Yusup");
    assert_eq!(updated.phone_number, created.phone_number);
    assert_eq!(updated.tg_user, created.tg_user);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);

    let response = server.delete(&path).await.unwrap();
    let message: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(message["message"], "User deleted successfully");

    let response = server.get(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.delete(&path).await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.error.code, "UNKNOWN_USER");
}

#[tokio::test]
async fn test_update_validation_and_missing() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.post("/users", &CreateUser::eshmat()).await.unwrap();
    let created: UserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .put(
            &format!("/users/{}", created.id),
            &json!({ "phone_number": "not a phone" }),
        )
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "VALIDATION_ERROR");

    let response = server
        .put("/users/424242", &json!({ "full_name": "Nobody" }))
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.error.code, "UNKNOWN_USER");
}

#[tokio::test]
async fn test_update_sets_address() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.post("/users", &CreateUser::unique()).await.unwrap();
    let created: UserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .put(&format!("/users/{}", created.id), &json!({ "address": "a" }))
        .await
        .unwrap();
    let updated: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.address.as_deref(), Some("a"));

    let response = server.get("/users/address-a").await.unwrap();
    let page: UserListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.total, 1);
}

// ============================================================================
// Spreadsheet Sink Tests
// ============================================================================

#[tokio::test]
async fn test_spreadsheet_sink_records_creates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.csv");

    let mut config = test_config();
    config.spreadsheet.enabled = true;
    config.spreadsheet.path = path.clone();
    let server = TestServer::start_with_config(config)
        .await
        .expect("Failed to start server");

    for request in [CreateUser::eshmat(), CreateUser::unique()] {
        let response = server.post("/users", &request).await.unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    // Rows are written in the background
    let mut contents = String::new();
    for _ in 0..50 {
        contents = std::fs::read_to_string(&path).unwrap_or_default();
        if contents.lines().count() >= 3 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3, "unexpected spreadsheet contents: {contents}");
    assert!(lines[0].starts_with("No,"));
    assert!(lines[1].starts_with("1,Eshmat,+998933211232,Gap,"));
    assert!(lines[2].starts_with("2,"));
}

#[tokio::test]
async fn test_unwritable_spreadsheet_does_not_fail_create() {
    let dir = tempfile::tempdir().unwrap();

    let mut config = test_config();
    config.spreadsheet.enabled = true;
    // A directory cannot be appended to
    config.spreadsheet.path = dir.path().to_path_buf();
    let server = TestServer::start_with_config(config)
        .await
        .expect("Failed to start server");

    let response = server.post("/users", &CreateUser::eshmat()).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
}

// ============================================================================
// PostgreSQL Tests
// ============================================================================

#[tokio::test]
async fn test_postgres_round_trip() {
    let Some(config) = postgres_config() else {
        eprintln!("Skipping PostgreSQL test: DATABASE_URL not set");
        return;
    };

    let server = TestServer::start_with_config(config)
        .await
        .expect("Failed to start server");

    let response = server.get("/health/ready").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.post("/users", &CreateUser::unique()).await.unwrap();
    let created: UserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server.get(&format!("/users/{}", created.id)).await.unwrap();
    let fetched: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.phone_number, created.phone_number);

    let response = server.delete(&format!("/users/{}", created.id)).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}
