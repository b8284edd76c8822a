use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::watch;

use crate::models::FavoriteRepository;

/// Persisted set of favorited repositories.
///
/// `observe` is a live query: the full current set is re-delivered on
/// every underlying change, with no incremental diffing. Inserts are
/// upserts keyed by the repository id, so concurrent add/remove of the
/// same id resolves deterministically.
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// Subscribes to the favorites set. The receiver holds the current
    /// set immediately and is updated after every insert or delete.
    fn observe(&self) -> watch::Receiver<Vec<FavoriteRepository>>;

    async fn get_all(&self) -> Result<Vec<FavoriteRepository>>;

    /// Inserts or replaces by id.
    async fn insert(&self, favorite: &FavoriteRepository) -> Result<()>;

    async fn delete(&self, favorite: &FavoriteRepository) -> Result<()>;

    async fn exists_by_id(&self, id: i64) -> Result<bool>;

    async fn get_by_id(&self, id: i64) -> Result<Option<FavoriteRepository>>;
}
