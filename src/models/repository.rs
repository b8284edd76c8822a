use serde::{Deserialize, Serialize};

/// A GitHub repository as shown to the user.
///
/// Built from API payloads by the mapper in `crate::github::mapper`.
/// Instances are immutable value objects: when new data arrives (for
/// example the README after the detail fetch) the record is superseded
/// with a copy, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    /// GitHub's numeric repository id
    pub id: i64,
    /// Repository name without the owner prefix
    pub name: String,
    /// Owner login
    pub owner: String,
    /// Description, or a placeholder when the API returns none
    pub description: String,
    /// Stargazer count
    pub stars: u32,
    /// Fork count
    pub forks: u32,
    /// Primary language, or a placeholder when the API returns none
    pub language: String,
    /// Last update date, truncated to day precision (YYYY-MM-DD)
    pub updated_at: String,
    /// License name, if any
    pub license: Option<String>,
    /// Repository topics in API order
    pub topics: Vec<String>,
    /// README text; starts as a placeholder until the detail join loads it
    pub readme: String,
}

impl Repository {
    /// Returns a copy of this repository with the README text replaced.
    pub fn with_readme(mut self, readme: impl Into<String>) -> Self {
        self.readme = readme.into();
        self
    }
}

/// The persisted projection of a favorited repository.
///
/// Only scalar fields survive; topics and README are not stored. Rows are
/// keyed by the repository id and live until the user removes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteRepository {
    pub id: i64,
    pub name: String,
    pub owner: String,
    pub description: String,
    pub stars: u32,
    pub forks: u32,
    pub language: String,
    pub updated_at: String,
}

impl From<&Repository> for FavoriteRepository {
    fn from(repo: &Repository) -> Self {
        Self {
            id: repo.id,
            name: repo.name.clone(),
            owner: repo.owner.clone(),
            description: repo.description.clone(),
            stars: repo.stars,
            forks: repo.forks,
            language: repo.language.clone(),
            updated_at: repo.updated_at.clone(),
        }
    }
}
