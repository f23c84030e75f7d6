//! Catalog service: book lookup, search and copy accounting

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookPatch, EntityKind, NewBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_all(&self) -> AppResult<Vec<Book>> {
        self.repository.books.get_all().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        self.repository.books.get_by_id(id).await
    }

    /// Get a book or fail with "Book not found"
    pub async fn require(&self, id: i32) -> AppResult<Book> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(EntityKind::Book))
    }

    pub async fn create(&self, book: NewBook) -> AppResult<Book> {
        self.repository.books.create(book).await
    }

    pub async fn update(&self, id: i32, patch: BookPatch) -> AppResult<Book> {
        self.repository.books.update(id, patch).await
    }

    /// Take one copy off the shelf
    pub async fn borrow(&self, book_id: i32) -> AppResult<Book> {
        self.repository
            .books
            .modify(book_id, |book| {
                if book.available_copies <= 0 {
                    return Err(AppError::BusinessRule("No copies available".to_string()));
                }
                Ok(BookPatch::available_copies(book.available_copies - 1))
            })
            .await
    }

    /// Put one copy back, never above the total. A return without a matching
    /// borrow is accepted and clamped.
    pub async fn return_copy(&self, book_id: i32) -> AppResult<Book> {
        self.repository
            .books
            .modify(book_id, |book| {
                let next = book.total_copies.min(book.available_copies.saturating_add(1));
                Ok(BookPatch::available_copies(next))
            })
            .await
    }

    /// Books whose title, author, genre or ISBN contain `term`
    pub async fn search(&self, term: &str) -> AppResult<Vec<Book>> {
        Ok(filter_books(self.get_all().await?, term))
    }

    /// Books with at least one copy on the shelf
    pub async fn available(&self) -> AppResult<Vec<Book>> {
        self.repository
            .books
            .filter(|b| b.available_copies > 0)
            .await
    }
}

/// Case-insensitive search over a catalog snapshot; a blank term keeps
/// everything
pub fn filter_books(books: Vec<Book>, term: &str) -> Vec<Book> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return books;
    }
    books.into_iter().filter(|b| b.matches(&term)).collect()
}
