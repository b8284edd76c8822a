pub mod base;
pub mod data;
pub mod github;
pub mod models;
pub mod presentation;
pub mod services;
pub mod utils;

// Re-export repository traits
pub use base::FavoriteStore;

// Re-export models
pub use models::{ApiResult, FavoriteRepository, FilterCriteria, Profile, Repository};

// Re-export the remote boundary
pub use github::{
    GithubApi, GithubClient, GithubConfig, GithubGateway, GithubRepositoryGateway, SortField,
    SortOrder,
};

// Re-export use cases and view models selectively
pub use presentation::{ProfileViewModel, RepoViewModel};
pub use services::{
    GetProfileUseCase, GetReadmeUseCase, GetRepositoryUseCase, SaveProfileUseCase,
    SearchRepositoriesUseCase,
};
