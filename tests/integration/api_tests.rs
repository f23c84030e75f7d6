//! API integration tests, driven in-process through the router

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::{Days, Local};
use serde_json::{json, Value};
use tower::ServiceExt;

use shelfdesk::{
    api,
    config::{AppConfig, FixturesConfig},
    repository::{InlineSource, Repository},
    AppState,
};

const BOOKS: &str = r#"[
    {"id":1,"isbn":"978-0-00-000001-1","title":"The Left Hand of Darkness","author":"Ursula K. Le Guin",
     "genre":"Science Fiction","totalCopies":2,"availableCopies":2},
    {"id":2,"isbn":"978-0-00-000002-2","title":"Beloved","author":"Toni Morrison",
     "genre":"Literary Fiction","totalCopies":1,"availableCopies":0}
]"#;

const MEMBERS: &str = r#"[
    {"id":1,"name":"Ada Lovelace","email":"ada@example.org","membershipDate":"2023-09-01","isActive":true},
    {"id":2,"name":"Charles Babbage","email":"charles@example.org","membershipDate":"2022-04-12","isActive":false}
]"#;

const TRANSACTIONS: &str = r#"[
    {"id":1,"bookId":2,"memberId":1,"borrowedAt":"2025-01-02","dueAt":"2025-01-16","status":"BORROWED"}
]"#;

fn app_with(repository: Repository) -> Router {
    api::create_router(AppState::new(AppConfig::default(), repository))
}

fn app() -> Router {
    app_with(Repository::from_sources(
        Arc::new(InlineSource::new(BOOKS)),
        Arc::new(InlineSource::new(MEMBERS)),
        Arc::new(InlineSource::new(TRANSACTIONS)),
    ))
}

/// Send one request and decode the JSON body (Null when empty)
async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request"),
        None => builder.body(Body::empty()).expect("Failed to build request"),
    };

    let response = app.clone().oneshot(request).await.expect("Failed to send request");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = get(&app, "/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_ready_with_shipped_fixtures() {
    let app = app_with(Repository::new(&FixturesConfig::default()));
    let (status, body) = get(&app, "/api/v1/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");

    let (_, books) = get(&app, "/api/v1/books").await;
    assert!(!books.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_ready_reports_broken_fixture() {
    let app = app_with(Repository::from_sources(
        Arc::new(InlineSource::new(BOOKS)),
        Arc::new(InlineSource::new("not json")),
        Arc::new(InlineSource::new(TRANSACTIONS)),
    ));
    let (status, body) = get(&app, "/api/v1/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unavailable");

    let (status, body) = get(&app, "/api/v1/members").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "FixtureFailure");
}

#[tokio::test]
async fn test_list_and_search_books() {
    let app = app();
    let (status, body) = get(&app, "/api/v1/books").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, body) = get(&app, "/api/v1/books?search=MORRISON").await;
    let hits = body.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["title"], "Beloved");
}

#[tokio::test]
async fn test_book_detail_and_not_found() {
    let app = app();
    let (status, body) = get(&app, "/api/v1/books/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["availableCopies"], 2);

    let (status, body) = get(&app, "/api/v1/books/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Book not found");
    assert_eq!(body["error"], "NoSuchBook");
}

#[tokio::test]
async fn test_create_and_patch_book() {
    let app = app();
    let (status, body) = post(
        &app,
        "/api/v1/books",
        json!({
            "isbn": "978-0-00-000003-3",
            "title": "Kindred",
            "author": "Octavia E. Butler",
            "genre": "Science Fiction",
            "totalCopies": 1,
            "availableCopies": 1
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 3);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/books/3",
        Some(json!({ "isPopular": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isPopular"], true);
    assert_eq!(body["title"], "Kindred");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/v1/books/42",
        Some(json!({ "title": "Ghost" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, books) = get(&app, "/api/v1/books").await;
    assert_eq!(books.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_create_book_rejects_negative_copies() {
    let app = app();
    let (status, body) = post(
        &app,
        "/api/v1/books",
        json!({
            "isbn": "x",
            "title": "Broken",
            "author": "Nobody",
            "genre": "None",
            "totalCopies": -1,
            "availableCopies": 0
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
async fn test_register_member() {
    let app = app();
    let (status, body) = post(
        &app,
        "/api/v1/members",
        json!({
            "name": "Grace Hopper",
            "email": "grace@example.org",
            "membershipDate": "2025-02-01"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 3);
    assert_eq!(body["isActive"], true);

    let (status, _) = post(
        &app,
        "/api/v1/members",
        json!({ "name": "No Mail", "email": "nope", "membershipDate": "2025-02-01" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_borrow_and_return_require_session() {
    let app = app();

    let (status, body) = get(&app, "/api/v1/borrow").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["redirect"], "/members?redirect=/borrow");
    assert_eq!(body["error"], "NotLoggedIn");

    let (status, body) = post(&app, "/api/v1/return", json!({ "transactionId": 1 })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["redirect"], "/members?redirect=/return");

    // nothing moved
    let (_, book) = get(&app, "/api/v1/books/2").await;
    assert_eq!(book["availableCopies"], 0);
}

#[tokio::test]
async fn test_login_inactive_member() {
    let app = app();
    let (status, body) = post(&app, "/api/v1/session/login", json!({ "memberId": 2 })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "InvalidMember");
    assert_eq!(body["message"], "Invalid or inactive member");

    let (_, session) = get(&app, "/api/v1/session").await;
    assert_eq!(session["loggedIn"], false);
    assert!(session["memberId"].is_null());
}

#[tokio::test]
async fn test_login_requires_member_id() {
    let app = app();
    let (status, _) = post(&app, "/api/v1/session/login", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(&app, "/api/v1/session/login", json!({ "memberId": 0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_logout() {
    let app = app();
    let (status, body) = post(
        &app,
        "/api/v1/session/login?redirect=/return",
        json!({ "memberId": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["redirect"], "/return");
    assert_eq!(body["member"]["name"], "Ada Lovelace");

    let (_, directory) = get(&app, "/api/v1/members").await;
    assert_eq!(directory["loggedInMember"]["id"], 1);

    let (status, _) = send(&app, Method::POST, "/api/v1/session/logout", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, session) = get(&app, "/api/v1/session").await;
    assert_eq!(session["loggedIn"], false);
}

#[tokio::test]
async fn test_borrow_then_return() {
    let app = app();
    let (status, body) = post(
        &app,
        "/api/v1/session/login?redirect=/borrow",
        json!({ "memberId": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["redirect"], "/borrow");

    let borrow_day = Local::now().date_naive();
    let due = borrow_day
        .checked_add_days(Days::new(14))
        .unwrap()
        .format("%Y-%m-%d")
        .to_string();

    let (status, form) = get(&app, "/api/v1/borrow").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(form["defaultDueAt"], due.as_str());
    assert_eq!(form["member"]["id"], 1);
    // only book 1 has copies left
    assert_eq!(form["books"].as_array().unwrap().len(), 1);

    let (status, borrowed) = post(
        &app,
        "/api/v1/borrow",
        json!({ "bookId": 1, "dueAt": due }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(borrowed["message"], "Book borrowed successfully");
    assert_eq!(borrowed["redirect"], "/books/1");
    assert_eq!(borrowed["book"]["availableCopies"], 1);
    assert_eq!(borrowed["transaction"]["status"], "BORROWED");
    assert_eq!(borrowed["transaction"]["borrowedAt"], today());
    assert_eq!(borrowed["transaction"]["dueAt"], due.as_str());
    let tx_id = borrowed["transaction"]["id"].as_i64().unwrap();
    assert_eq!(tx_id, 2);

    let (_, open) = get(&app, "/api/v1/books/1/open-transaction").await;
    assert_eq!(open["id"], tx_id);

    let (status, form) = get(&app, "/api/v1/return").await;
    assert_eq!(status, StatusCode::OK);
    let open_loans = form["openTransactions"].as_array().unwrap();
    assert_eq!(open_loans.len(), 2);
    assert_eq!(open_loans[1]["book"]["title"], "The Left Hand of Darkness");

    let (status, returned) = post(&app, "/api/v1/return", json!({ "transactionId": tx_id })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(returned["message"], "Book returned successfully");
    assert_eq!(returned["redirect"], "/books/1");
    assert_eq!(returned["book"]["availableCopies"], 2);
    assert_eq!(returned["transaction"]["status"], "RETURNED");
    assert_eq!(returned["transaction"]["returnedAt"], today());

    let (status, body) = post(&app, "/api/v1/return", json!({ "transactionId": tx_id })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchTransaction");
    let (_, book) = get(&app, "/api/v1/books/1").await;
    assert_eq!(book["availableCopies"], 2);

    let (_, open) = get(&app, "/api/v1/members/1/transactions").await;
    assert_eq!(open.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_borrow_without_copies() {
    let app = app();
    post(&app, "/api/v1/session/login", json!({ "memberId": 1 })).await;

    let (status, body) = post(
        &app,
        "/api/v1/borrow",
        json!({ "bookId": 2, "dueAt": "2030-01-01" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "No copies available");

    let (_, txs) = get(&app, "/api/v1/transactions").await;
    assert_eq!(txs.as_array().unwrap().len(), 1);
    let (_, book) = get(&app, "/api/v1/books/2").await;
    assert_eq!(book["availableCopies"], 0);
}

#[tokio::test]
async fn test_borrow_requires_book_and_due_date() {
    let app = app();
    post(&app, "/api/v1/session/login", json!({ "memberId": 1 })).await;

    let (status, _) = post(&app, "/api/v1/borrow", json!({ "dueAt": "2030-01-01" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(&app, "/api/v1/borrow", json!({ "bookId": 1 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, book) = get(&app, "/api/v1/books/1").await;
    assert_eq!(book["availableCopies"], 2);
}

#[tokio::test]
async fn test_return_unknown_transaction() {
    let app = app();
    post(&app, "/api/v1/session/login", json!({ "memberId": 1 })).await;
    let (_, before) = get(&app, "/api/v1/books").await;

    let (status, body) = post(&app, "/api/v1/return", json!({ "transactionId": 404 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Transaction not found");
    assert_eq!(body["error"], "NoSuchTransaction");

    let (_, after) = get(&app, "/api/v1/books").await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_update_transaction_status() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/transactions/1/status",
        Some(json!({ "status": "OVERDUE" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OVERDUE");
    assert!(body.get("returnedAt").is_none());

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/v1/transactions/9/status",
        Some(json!({ "status": "RETURNED" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_root_redirects_to_catalog() {
    let app = app();
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()["location"], "/api/v1/books");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = app();
    let (status, body) = get(&app, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Shelfdesk API");
    assert!(body["paths"]["/books/{id}"]["get"].is_object());
}
