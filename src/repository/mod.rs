//! Repository layer over the fixture-seeded collections

pub mod fixture;

use std::sync::Arc;

use crate::{
    config::FixturesConfig,
    models::{Book, Member, Transaction},
};

pub use fixture::{source_for, FileSource, FixtureSource, FixtureStore, HttpSource, InlineSource};

/// Main repository struct holding the three independent collections
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<FixtureStore<Book>>,
    pub members: Arc<FixtureStore<Member>>,
    pub transactions: Arc<FixtureStore<Transaction>>,
}

impl Repository {
    /// Create a repository reading each fixture from its configured location
    pub fn new(fixtures: &FixturesConfig) -> Self {
        Self::from_sources(
            source_for(&fixtures.books),
            source_for(&fixtures.members),
            source_for(&fixtures.transactions),
        )
    }

    pub fn from_sources(
        books: Arc<dyn FixtureSource>,
        members: Arc<dyn FixtureSource>,
        transactions: Arc<dyn FixtureSource>,
    ) -> Self {
        Self {
            books: Arc::new(FixtureStore::new(books)),
            members: Arc::new(FixtureStore::new(members)),
            transactions: Arc::new(FixtureStore::new(transactions)),
        }
    }
}
