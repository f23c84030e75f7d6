//! API handlers for Shelfdesk REST endpoints

pub mod books;
pub mod circulation;
pub mod health;
pub mod members;
pub mod openapi;
pub mod session;
pub mod transactions;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::Redirect,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, services::auth::login_route, AppState};

/// Extractor guarding routes that need a session member.
///
/// Without one the request is rejected with a redirect to the member login
/// route that comes back to the requested path.
pub struct SessionMember(pub i32);

#[async_trait]
impl FromRequestParts<AppState> for SessionMember {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // Inside the nested API router the path is already relative to /api/v1
        state
            .services
            .session
            .member_id()
            .await
            .map(SessionMember)
            .ok_or_else(|| AppError::LoginRequired {
                redirect: login_route(parts.uri.path()),
            })
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Catalog
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/:id", get(books::get_book).put(books::update_book))
        .route("/books/:id/open-transaction", get(books::get_open_transaction))
        // Members
        .route("/members", get(members::list_members).post(members::create_member))
        .route("/members/:id", get(members::get_member).put(members::update_member))
        .route("/members/:id/transactions", get(members::get_open_transactions))
        // Transactions
        .route("/transactions", get(transactions::list_transactions))
        .route("/transactions/:id", get(transactions::get_transaction))
        .route("/transactions/:id/status", put(transactions::update_status))
        // Session
        .route("/session", get(session::get_session))
        .route("/session/login", post(session::login))
        .route("/session/logout", post(session::logout))
        // Borrow / return workflows
        .route("/borrow", get(circulation::borrow_form).post(circulation::borrow))
        .route("/return", get(circulation::return_form).post(circulation::return_book))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .route("/", get(|| async { Redirect::temporary("/api/v1/books") }))
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
