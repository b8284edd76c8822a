use std::sync::Arc;

use anyhow::Result;
use tokio::sync::watch;

use crate::data::ProfileDataStore;
use crate::github::{GithubGateway, SortField, SortOrder};
use crate::models::{ApiResult, Profile, Repository};

/// Search defaults shared by every caller.
pub const DEFAULT_SORT: SortField = SortField::Stars;
pub const DEFAULT_ORDER: SortOrder = SortOrder::Desc;
pub const DEFAULT_PER_PAGE: u32 = 30;
pub const DEFAULT_PAGE: u32 = 1;

/// Searches repositories with the default sort and paging.
#[derive(Clone)]
pub struct SearchRepositoriesUseCase {
    gateway: Arc<dyn GithubGateway>,
}

impl SearchRepositoriesUseCase {
    pub fn new(gateway: Arc<dyn GithubGateway>) -> Self {
        Self { gateway }
    }

    pub async fn call(&self, query: &str) -> ApiResult<Vec<Repository>> {
        self.gateway
            .search_repositories(query, DEFAULT_SORT, DEFAULT_ORDER, DEFAULT_PER_PAGE, DEFAULT_PAGE)
            .await
    }
}

/// Fetches the detail record of a single repository.
#[derive(Clone)]
pub struct GetRepositoryUseCase {
    gateway: Arc<dyn GithubGateway>,
}

impl GetRepositoryUseCase {
    pub fn new(gateway: Arc<dyn GithubGateway>) -> Self {
        Self { gateway }
    }

    pub async fn call(&self, owner: &str, repo: &str) -> ApiResult<Repository> {
        self.gateway.get_repository(owner, repo).await
    }
}

/// Fetches and decodes a repository README.
#[derive(Clone)]
pub struct GetReadmeUseCase {
    gateway: Arc<dyn GithubGateway>,
}

impl GetReadmeUseCase {
    pub fn new(gateway: Arc<dyn GithubGateway>) -> Self {
        Self { gateway }
    }

    pub async fn call(&self, owner: &str, repo: &str) -> ApiResult<String> {
        self.gateway.get_readme(owner, repo).await
    }
}

/// Live view of the stored profile.
#[derive(Clone)]
pub struct GetProfileUseCase {
    store: Arc<ProfileDataStore>,
}

impl GetProfileUseCase {
    pub fn new(store: Arc<ProfileDataStore>) -> Self {
        Self { store }
    }

    pub fn call(&self) -> watch::Receiver<Profile> {
        self.store.profile()
    }
}

/// Wholesale profile write with confirmation.
#[derive(Clone)]
pub struct SaveProfileUseCase {
    store: Arc<ProfileDataStore>,
}

impl SaveProfileUseCase {
    pub fn new(store: Arc<ProfileDataStore>) -> Self {
        Self { store }
    }

    pub fn call(&self, profile: &Profile) -> Result<()> {
        self.store.save_profile(profile)
    }
}
