pub mod database;
pub mod filter_prefs;
pub mod profile_store;
pub mod repositories;

pub use database::{init_database, init_in_memory, SqlitePool};
pub use filter_prefs::FilterPreferences;
pub use profile_store::ProfileDataStore;
pub use repositories::SqliteFavoriteStore;
