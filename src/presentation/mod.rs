pub mod profile_view_model;
pub mod repo_view_model;

pub use profile_view_model::ProfileViewModel;
pub use repo_view_model::{build_search_query, RepoViewModel, DEFAULT_QUERY};
