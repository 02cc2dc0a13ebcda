mod common;

use axum::http::StatusCode;
use common::{empty_request, json_request, send, setup_test_app};
use serde_json::json;

#[tokio::test]
async fn test_list_users_returns_seeded_users() {
    let app = setup_test_app();

    let response = send(&app, empty_request("GET", "/api/users")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], json!(true));
    assert_eq!(response.body["code"], json!(200));
    assert_eq!(response.body["message"], json!("Success"));
    assert_eq!(response.body["data"].as_array().unwrap().len(), 2);
    assert_eq!(
        response.body["pagination"],
        json!({ "page": 1, "limit": 10, "total": 2, "totalPages": 1 })
    );
    assert!(response.body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_create_then_get_user() {
    let app = setup_test_app();

    let created = send(
        &app,
        json_request(
            "POST",
            "/api/users",
            &json!({ "name": "Carol", "email": "carol@example.com", "age": 28 }),
        ),
    )
    .await;

    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["message"], json!("User created successfully"));
    assert_eq!(
        created.body["data"],
        json!({ "id": 3, "name": "Carol", "email": "carol@example.com", "age": 28 })
    );

    let fetched = send(&app, empty_request("GET", "/api/users/3")).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["data"], created.body["data"]);
}

#[tokio::test]
async fn test_create_normalizes_email() {
    let app = setup_test_app();

    let created = send(
        &app,
        json_request(
            "POST",
            "/api/users",
            &json!({ "name": "  Dave  ", "email": "  DAVE@Example.com " }),
        ),
    )
    .await;

    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["name"], json!("Dave"));
    assert_eq!(created.body["data"]["email"], json!("dave@example.com"));
    assert!(created.body["data"].get("age").is_none());
}

#[tokio::test]
async fn test_create_accepts_form_bodies() {
    let app = setup_test_app();

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/users")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(axum::body::Body::from("name=Erin&email=erin%40example.com&age=41"))
        .unwrap();
    let created = send(&app, request).await;

    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["email"], json!("erin@example.com"));
    assert_eq!(created.body["data"]["age"], json!(41));
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let app = setup_test_app();

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/users",
            &json!({ "name": "Alice Two", "email": "ALICE@example.com" }),
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], json!(false));
    assert_eq!(response.body["message"], json!("Email is already in use"));

    let list = send(&app, empty_request("GET", "/api/users")).await;
    assert_eq!(list.body["pagination"]["total"], json!(2));
}

#[tokio::test]
async fn test_validation_failure_lists_errors() {
    let app = setup_test_app();

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/users",
            &json!({ "name": "C", "email": "not-an-email", "age": 200 }),
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], json!("Request validation failed"));

    let errors = response.body["errors"].as_array().unwrap();
    let fields: Vec<&str> = errors
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"age"));
    assert!(errors.iter().all(|e| e["message"].is_string()));
}

#[tokio::test]
async fn test_missing_user_is_not_found() {
    let app = setup_test_app();

    for uri in ["/api/users/99", "/api/users/abc"] {
        let response = send(&app, empty_request("GET", uri)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body["message"], json!("User not found"));
    }
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let app = setup_test_app();

    let response = send(
        &app,
        json_request("PUT", "/api/users/1", &json!({ "age": 26 })),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], json!("User updated successfully"));
    assert_eq!(
        response.body["data"],
        json!({ "id": 1, "name": "Alice", "email": "alice@example.com", "age": 26 })
    );
}

#[tokio::test]
async fn test_update_to_taken_email_is_rejected() {
    let app = setup_test_app();

    let response = send(
        &app,
        json_request("PUT", "/api/users/1", &json!({ "email": "bob@example.com" })),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], json!("Email is already in use"));
}

#[tokio::test]
async fn test_update_missing_user_is_not_found() {
    let app = setup_test_app();

    let response = send(
        &app,
        json_request("PUT", "/api/users/42", &json!({ "name": "Nobody" })),
    )
    .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let app = setup_test_app();

    let deleted = send(&app, empty_request("DELETE", "/api/users/2")).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["message"], json!("User deleted successfully"));
    assert!(deleted.body.get("data").is_none());

    let fetched = send(&app, empty_request("GET", "/api/users/2")).await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);

    let again = send(&app, empty_request("DELETE", "/api/users/2")).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let app = setup_test_app();

    send(&app, empty_request("DELETE", "/api/users/2")).await;
    let created = send(
        &app,
        json_request(
            "POST",
            "/api/users",
            &json!({ "name": "Frank", "email": "frank@example.com" }),
        ),
    )
    .await;

    assert_eq!(created.body["data"]["id"], json!(3));
}

#[tokio::test]
async fn test_search_and_pagination() {
    let app = setup_test_app();

    let search = send(&app, empty_request("GET", "/api/users?search=BOB")).await;
    let data = search.body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], json!("Bob"));
    assert_eq!(search.body["pagination"]["total"], json!(1));

    let page = send(&app, empty_request("GET", "/api/users?page=2&limit=1")).await;
    let data = page.body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], json!(2));
    assert_eq!(
        page.body["pagination"],
        json!({ "page": 2, "limit": 1, "total": 2, "totalPages": 2 })
    );

    let beyond = send(&app, empty_request("GET", "/api/users?page=5")).await;
    assert_eq!(beyond.status, StatusCode::OK);
    assert!(beyond.body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_pagination_falls_back_to_defaults() {
    let app = setup_test_app();

    let response = send(&app, empty_request("GET", "/api/users?page=abc&limit=-3")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["pagination"]["page"], json!(1));
    assert_eq!(response.body["pagination"]["limit"], json!(10));
}

#[tokio::test]
async fn test_quoted_age_is_accepted() {
    let app = setup_test_app();

    let created = send(
        &app,
        json_request(
            "POST",
            "/api/users",
            &json!({ "name": "Carol", "email": "carol@example.com", "age": "30" }),
        ),
    )
    .await;

    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["age"], json!(30));
}

#[tokio::test]
async fn test_unreadable_age_is_reported_with_other_failures() {
    let app = setup_test_app();

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/users",
            &json!({ "name": "C", "email": "bad", "age": "abc" }),
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], json!("Request validation failed"));

    let errors = response.body["errors"].as_array().unwrap();
    let fields: Vec<&str> = errors
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"email"));
    assert!(errors.contains(&json!({
        "field": "age",
        "message": "Age must be an integer between 1 and 150"
    })));
}

#[tokio::test]
async fn test_update_with_quoted_age() {
    let app = setup_test_app();

    let response = send(
        &app,
        json_request("PUT", "/api/users/2", &json!({ "age": "31" })),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["age"], json!(31));
    assert_eq!(response.body["data"]["name"], json!("Bob"));
}
