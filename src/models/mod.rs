pub mod api_result;
pub mod filter;
pub mod profile;
pub mod repository;

pub use api_result::ApiResult;
pub use filter::FilterCriteria;
pub use profile::Profile;
pub use repository::{FavoriteRepository, Repository};
