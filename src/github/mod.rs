pub mod client;
pub mod error;
pub mod gateway;
pub mod mapper;
pub mod types;

pub use client::{GithubApi, GithubClient, GithubConfig};
pub use error::GithubError;
pub use gateway::{GithubGateway, GithubRepositoryGateway};
pub use types::{SortField, SortOrder};
