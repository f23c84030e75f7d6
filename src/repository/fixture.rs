//! Fixture sources and the lazily seeded in-memory store

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::Entity,
};

/// Where the seed JSON of a collection comes from
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FixtureSource: Send + Sync {
    /// Human readable location, used in logs and errors
    fn describe(&self) -> String;

    /// Fetch the raw JSON text
    async fn fetch(&self) -> AppResult<String>;
}

/// Fixture read from a local file
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FixtureSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> AppResult<String> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| AppError::FixtureLoad(format!("{}: {}", self.describe(), e)))
    }
}

/// Fixture fetched with a GET request
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl FixtureSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> AppResult<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::FixtureLoad(format!("{}: {}", self.url, e)))?;

        response
            .text()
            .await
            .map_err(|e| AppError::FixtureLoad(format!("{}: {}", self.url, e)))
    }
}

/// Fixture held in memory as JSON text
pub struct InlineSource {
    body: String,
}

impl InlineSource {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

#[async_trait]
impl FixtureSource for InlineSource {
    fn describe(&self) -> String {
        "inline".to_string()
    }

    async fn fetch(&self) -> AppResult<String> {
        Ok(self.body.clone())
    }
}

/// Pick a source for a configured location: http(s) URLs are fetched, anything
/// else is read as a file path
pub fn source_for(location: &str) -> Arc<dyn FixtureSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Arc::new(HttpSource::new(location))
    } else {
        Arc::new(FileSource::new(location))
    }
}

/// In-memory collection seeded once from a fixture.
///
/// The collection is fetched on first use and cached for the lifetime of the
/// store. Every mutation builds the next collection from the current one and
/// swaps it in under the write lock, so a single operation is never observed
/// half done. Nothing spans two operations.
pub struct FixtureStore<T: Entity> {
    source: Arc<dyn FixtureSource>,
    cache: RwLock<Option<Vec<T>>>,
}

impl<T: Entity> FixtureStore<T> {
    pub fn new(source: Arc<dyn FixtureSource>) -> Self {
        Self {
            source,
            cache: RwLock::new(None),
        }
    }

    /// Snapshot of the whole collection
    pub async fn get_all(&self) -> AppResult<Vec<T>> {
        self.ensure_loaded().await?;
        Ok(self.cache.read().await.clone().unwrap_or_default())
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<T>> {
        self.find(|e| e.id() == id).await
    }

    /// First element matching `predicate`
    pub async fn find<F>(&self, predicate: F) -> AppResult<Option<T>>
    where
        F: Fn(&T) -> bool,
    {
        self.ensure_loaded().await?;
        let cache = self.cache.read().await;
        Ok(cache
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|e| predicate(e))
            .cloned())
    }

    /// All elements matching `predicate`, in collection order
    pub async fn filter<F>(&self, predicate: F) -> AppResult<Vec<T>>
    where
        F: Fn(&T) -> bool,
    {
        self.ensure_loaded().await?;
        let cache = self.cache.read().await;
        Ok(cache
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter(|e| predicate(e))
            .cloned()
            .collect())
    }

    /// Append a new record with id `max(0, ids) + 1`
    pub async fn create(&self, new: T::New) -> AppResult<T> {
        let mut cache = self.loaded_for_write().await?;
        let current = cache.as_deref().unwrap_or_default();

        let next_id = current
            .iter()
            .map(|e| e.id())
            .fold(0, i32::max)
            .checked_add(1)
            .ok_or_else(|| AppError::Internal(format!("{} ids exhausted", T::KIND)))?;
        let created = T::from_new(next_id, new);

        let mut next = Vec::with_capacity(current.len() + 1);
        next.extend_from_slice(current);
        next.push(created.clone());
        *cache = Some(next);

        tracing::debug!(kind = %T::KIND, id = next_id, "record created");
        Ok(created)
    }

    /// Merge `patch` into the record with `id`; the collection is untouched
    /// when the id is unknown
    pub async fn update(&self, id: i32, patch: T::Patch) -> AppResult<T> {
        let mut cache = self.loaded_for_write().await?;
        let current = cache.as_deref().unwrap_or_default();

        let idx = current
            .iter()
            .position(|e| e.id() == id)
            .ok_or_else(|| AppError::NotFound(T::KIND))?;

        let mut updated = current[idx].clone();
        updated.apply(patch);

        let mut next = current.to_vec();
        next[idx] = updated.clone();
        *cache = Some(next);

        tracing::debug!(kind = %T::KIND, id, "record updated");
        Ok(updated)
    }

    /// Read-modify-write of one record as a single step: `change` sees the
    /// current record and returns the patch to apply, or an error that leaves
    /// the collection as it was
    pub async fn modify<F>(&self, id: i32, change: F) -> AppResult<T>
    where
        F: FnOnce(&T) -> AppResult<T::Patch>,
    {
        let mut cache = self.loaded_for_write().await?;
        let current = cache.as_deref().unwrap_or_default();

        let idx = current
            .iter()
            .position(|e| e.id() == id)
            .ok_or_else(|| AppError::NotFound(T::KIND))?;

        let patch = change(&current[idx])?;
        let mut updated = current[idx].clone();
        updated.apply(patch);

        let mut next = current.to_vec();
        next[idx] = updated.clone();
        *cache = Some(next);

        Ok(updated)
    }

    /// Whether the fixture has been fetched yet
    pub async fn is_loaded(&self) -> bool {
        self.cache.read().await.is_some()
    }

    async fn ensure_loaded(&self) -> AppResult<()> {
        if self.cache.read().await.is_some() {
            return Ok(());
        }
        self.loaded_for_write().await.map(|_| ())
    }

    /// Write guard over a populated cache; fetches the fixture if this is the
    /// first access. Holding the write lock while fetching means concurrent
    /// first callers wait for one fetch instead of issuing their own.
    async fn loaded_for_write(&self) -> AppResult<tokio::sync::RwLockWriteGuard<'_, Option<Vec<T>>>> {
        let mut cache = self.cache.write().await;
        if cache.is_none() {
            let records = self.load().await?;
            tracing::info!(
                kind = %T::KIND,
                source = %self.source.describe(),
                count = records.len(),
                "fixture loaded"
            );
            *cache = Some(records);
        }
        Ok(cache)
    }

    async fn load(&self) -> AppResult<Vec<T>> {
        let body = self.source.fetch().await?;
        let records: Option<Vec<T>> = serde_json::from_str(&body).map_err(|e| {
            AppError::FixtureLoad(format!("{}: invalid JSON: {}", self.source.describe(), e))
        })?;
        Ok(records.unwrap_or_default())
    }
}
