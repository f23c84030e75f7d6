//! Book (catalog entry) model

use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;
use utoipa::ToSchema;
use validator::Validate;

use super::{Entity, EntityKind};

/// Catalog entry with its copy counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i32,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    pub total_copies: i32,
    pub available_copies: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_popular: Option<bool>,
}

impl Book {
    /// Case-insensitive match of an already lowercased term against the
    /// searchable fields
    pub fn matches(&self, term: &str) -> bool {
        [&self.title, &self.author, &self.genre, &self.isbn]
            .iter()
            .any(|field| field.to_lowercase().contains(term))
    }
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub isbn: String,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub author: String,
    pub genre: String,
    pub description: Option<String>,
    pub published_year: Option<i32>,
    pub cover_url: Option<String>,
    #[validate(range(min = 0, message = "Total copies cannot be negative"))]
    pub total_copies: i32,
    #[validate(range(min = 0, message = "Available copies cannot be negative"))]
    pub available_copies: i32,
    pub is_popular: Option<bool>,
}

/// Partial book update; absent fields are left as they are.
///
/// Optional attributes take `null` to clear them.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    pub isbn: Option<String>,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    #[serde(default, with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub published_year: Option<Option<i32>>,
    #[serde(default, with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub cover_url: Option<Option<String>>,
    #[validate(range(min = 0, message = "Total copies cannot be negative"))]
    pub total_copies: Option<i32>,
    #[validate(range(min = 0, message = "Available copies cannot be negative"))]
    pub available_copies: Option<i32>,
    #[serde(default, with = "double_option")]
    #[schema(value_type = Option<bool>)]
    pub is_popular: Option<Option<bool>>,
}

impl BookPatch {
    pub fn available_copies(value: i32) -> Self {
        Self {
            available_copies: Some(value),
            ..Default::default()
        }
    }
}

impl Entity for Book {
    type New = NewBook;
    type Patch = BookPatch;

    const KIND: EntityKind = EntityKind::Book;

    fn id(&self) -> i32 {
        self.id
    }

    fn from_new(id: i32, new: NewBook) -> Self {
        Self {
            id,
            isbn: new.isbn,
            title: new.title,
            author: new.author,
            genre: new.genre,
            description: new.description,
            published_year: new.published_year,
            cover_url: new.cover_url,
            total_copies: new.total_copies,
            available_copies: new.available_copies,
            is_popular: new.is_popular,
        }
    }

    fn apply(&mut self, patch: BookPatch) {
        if let Some(isbn) = patch.isbn {
            self.isbn = isbn;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(author) = patch.author {
            self.author = author;
        }
        if let Some(genre) = patch.genre {
            self.genre = genre;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(year) = patch.published_year {
            self.published_year = year;
        }
        if let Some(cover_url) = patch.cover_url {
            self.cover_url = cover_url;
        }
        if let Some(total) = patch.total_copies {
            self.total_copies = total;
        }
        if let Some(available) = patch.available_copies {
            self.available_copies = available;
        }
        if let Some(popular) = patch.is_popular {
            self.is_popular = popular;
        }
    }
}
