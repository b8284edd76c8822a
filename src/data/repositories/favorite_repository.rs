use anyhow::{Context, Result};
use async_trait::async_trait;
use log::error;
use rusqlite::{params, OptionalExtension, Row};
use tokio::sync::watch;

use crate::base::FavoriteStore;
use crate::data::database::SqlitePool;
use crate::models::FavoriteRepository;

/// SQLite-backed favorites store.
///
/// Mutations requery the whole table and publish it on a watch channel,
/// which gives observers the live-query behavior the view model expects.
pub struct SqliteFavoriteStore {
    pool: SqlitePool,
    changes: watch::Sender<Vec<FavoriteRepository>>,
}

impl SqliteFavoriteStore {
    pub fn new(pool: SqlitePool) -> Result<Self> {
        let initial = query_all(&pool)?;
        let (changes, _) = watch::channel(initial);
        Ok(Self { pool, changes })
    }

    fn publish_current(&self) {
        match query_all(&self.pool) {
            Ok(favorites) => {
                self.changes.send_replace(favorites);
            }
            Err(e) => error!("failed to requery favorites after change: {e:#}"),
        }
    }
}

fn map_row(row: &Row) -> rusqlite::Result<FavoriteRepository> {
    Ok(FavoriteRepository {
        id: row.get(0)?,
        name: row.get(1)?,
        owner: row.get(2)?,
        description: row.get(3)?,
        stars: row.get(4)?,
        forks: row.get(5)?,
        language: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

fn query_all(pool: &SqlitePool) -> Result<Vec<FavoriteRepository>> {
    let conn = pool.get()?;
    let mut stmt = conn.prepare(
        "SELECT id, name, owner, description, stars, forks, language, updated_at
         FROM favorites ORDER BY name COLLATE NOCASE",
    )?;
    let favorites = stmt
        .query_map([], map_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to read favorites")?;
    Ok(favorites)
}

#[async_trait]
impl FavoriteStore for SqliteFavoriteStore {
    fn observe(&self) -> watch::Receiver<Vec<FavoriteRepository>> {
        self.changes.subscribe()
    }

    async fn get_all(&self) -> Result<Vec<FavoriteRepository>> {
        query_all(&self.pool)
    }

    async fn insert(&self, favorite: &FavoriteRepository) -> Result<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT OR REPLACE INTO favorites
             (id, name, owner, description, stars, forks, language, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                favorite.id,
                favorite.name,
                favorite.owner,
                favorite.description,
                favorite.stars,
                favorite.forks,
                favorite.language,
                favorite.updated_at,
            ],
        )
        .context("failed to insert favorite")?;
        drop(conn);

        self.publish_current();
        Ok(())
    }

    async fn delete(&self, favorite: &FavoriteRepository) -> Result<()> {
        let conn = self.pool.get()?;
        conn.execute("DELETE FROM favorites WHERE id = ?", params![favorite.id])
            .context("failed to delete favorite")?;
        drop(conn);

        self.publish_current();
        Ok(())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        let conn = self.pool.get()?;
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM favorites WHERE id = ?)",
            params![id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<FavoriteRepository>> {
        let conn = self.pool.get()?;
        let favorite = conn
            .query_row(
                "SELECT id, name, owner, description, stars, forks, language, updated_at
                 FROM favorites WHERE id = ?",
                params![id],
                map_row,
            )
            .optional()?;
        Ok(favorite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::database::init_in_memory;

    fn favorite(id: i64, name: &str) -> FavoriteRepository {
        FavoriteRepository {
            id,
            name: name.to_string(),
            owner: "octocat".to_string(),
            description: "desc".to_string(),
            stars: 10,
            forks: 2,
            language: "Rust".to_string(),
            updated_at: "2024-02-20".to_string(),
        }
    }

    fn store() -> SqliteFavoriteStore {
        SqliteFavoriteStore::new(init_in_memory().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_is_favorite_tracks_insert_and_delete() -> Result<()> {
        let store = store();
        let fav = favorite(1, "scout");

        assert!(!store.exists_by_id(1).await?);

        store.insert(&fav).await?;
        assert!(store.exists_by_id(1).await?);

        store.delete(&fav).await?;
        assert!(!store.exists_by_id(1).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_twice_is_an_upsert() -> Result<()> {
        let store = store();
        store.insert(&favorite(1, "scout")).await?;

        let mut renamed = favorite(1, "scout");
        renamed.stars = 99;
        store.insert(&renamed).await?;

        let all = store.get_all().await?;
        assert_eq!(all.len(), 1, "same id must not duplicate");
        assert_eq!(all[0].stars, 99, "replace-on-conflict keeps the latest row");
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_row_is_a_noop() -> Result<()> {
        let store = store();
        store.delete(&favorite(42, "ghost")).await?;
        assert!(store.get_all().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_get_by_id_returns_the_row_or_none() -> Result<()> {
        let store = store();
        store.insert(&favorite(7, "seven")).await?;

        let found = store.get_by_id(7).await?.expect("row should exist");
        assert_eq!(found.name, "seven");
        assert!(store.get_by_id(8).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_observe_redelivers_full_set_on_change() -> Result<()> {
        let store = store();
        let mut rx = store.observe();
        assert!(rx.borrow().is_empty());

        store.insert(&favorite(1, "one")).await?;
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().len(), 1);

        store.insert(&favorite(2, "two")).await?;
        rx.changed().await.unwrap();
        let current = rx.borrow_and_update().clone();
        assert_eq!(current.len(), 2, "full set is redelivered, not a diff");

        store.delete(&favorite(1, "one")).await?;
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_add_and_remove_of_same_id_is_deterministic() -> Result<()> {
        let store = std::sync::Arc::new(store());
        let fav = favorite(5, "contended");

        let add = {
            let store = store.clone();
            let fav = fav.clone();
            tokio::spawn(async move { store.insert(&fav).await })
        };
        let remove = {
            let store = store.clone();
            let fav = fav.clone();
            tokio::spawn(async move { store.delete(&fav).await })
        };
        add.await.unwrap()?;
        remove.await.unwrap()?;

        // Either order leaves a consistent row count of zero or one
        let count = store.get_all().await?.len();
        assert!(count <= 1);
        assert_eq!(store.exists_by_id(5).await?, count == 1);
        Ok(())
    }
}
