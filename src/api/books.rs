//! Catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{Book, BookPatch, NewBook, Transaction},
};

/// Catalog search query
#[derive(Debug, Deserialize, IntoParams)]
pub struct BookQuery {
    /// Matched against title, author, genre and ISBN, case-insensitively
    pub search: Option<String>,
}

/// List the catalog, optionally filtered
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Matching books", body = Vec<Book>)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state
        .services
        .books
        .search(query.search.as_deref().unwrap_or_default())
        .await?;
    Ok(Json(books))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.require(id).await?;
    Ok(Json(book))
}

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = NewBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(book): Json<NewBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    book.validate()?;
    let created = state.services.books.create(book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Patch a book; absent fields are kept
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = BookPatch,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(patch): Json<BookPatch>,
) -> AppResult<Json<Book>> {
    patch.validate()?;
    let book = state.services.books.update(id, patch).await?;
    Ok(Json(book))
}

/// The open transaction of a book, or null
#[utoipa::path(
    get,
    path = "/books/{id}/open-transaction",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Open transaction or null", body = Option<Transaction>)
    )
)]
pub async fn get_open_transaction(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Option<Transaction>>> {
    let tx = state.services.transactions.open_by_book(id).await?;
    Ok(Json(tx))
}
