//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, circulation, health, members, session, transactions};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shelfdesk API",
        version = "0.1.0",
        description = "In-memory library lending desk: catalog, members, borrow and return"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::get_open_transaction,
        // Members
        members::list_members,
        members::get_member,
        members::create_member,
        members::update_member,
        members::get_open_transactions,
        // Transactions
        transactions::list_transactions,
        transactions::get_transaction,
        transactions::update_status,
        // Session
        session::get_session,
        session::login,
        session::logout,
        // Circulation
        circulation::borrow_form,
        circulation::borrow,
        circulation::return_form,
        circulation::return_book,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::NewBook,
            crate::models::book::BookPatch,
            // Members
            crate::models::member::Member,
            crate::models::member::NewMember,
            crate::models::member::MemberPatch,
            members::MemberDirectory,
            // Transactions
            crate::models::transaction::Transaction,
            crate::models::transaction::TransactionStatus,
            transactions::UpdateStatusRequest,
            // Session
            session::LoginRequest,
            session::SessionResponse,
            crate::services::auth::LoginOutcome,
            // Circulation
            circulation::BorrowRequest,
            circulation::ReturnRequest,
            crate::services::circulation::BorrowForm,
            crate::services::circulation::BorrowOutcome,
            crate::services::circulation::OpenLoan,
            crate::services::circulation::ReturnForm,
            crate::services::circulation::ReturnOutcome,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Catalog"),
        (name = "members", description = "Member directory"),
        (name = "transactions", description = "Lending transactions"),
        (name = "session", description = "Session member selection"),
        (name = "circulation", description = "Borrow and return workflows")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
