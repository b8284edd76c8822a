use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use log::{info, warn};

use gitscout::data::{init_database, FilterPreferences, SqliteFavoriteStore};
use gitscout::github::{GithubClient, GithubConfig, GithubGateway, GithubRepositoryGateway};
use gitscout::presentation::{RepoViewModel, DEFAULT_QUERY};
use gitscout::services::{GetReadmeUseCase, GetRepositoryUseCase, SearchRepositoriesUseCase};
use gitscout::utils;
use gitscout::FavoriteStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Set up logging
    env_logger::init();
    info!("Starting gitscout...");

    // Local persistence lives next to the binary by default
    let database_path = "data/gitscout.db";
    info!("Ensuring data directory exists...");
    utils::ensure_directory_exists(database_path)?;

    info!("Initializing database...");
    let pool = init_database(Path::new(database_path))?;
    let favorites: Arc<dyn FavoriteStore> = Arc::new(SqliteFavoriteStore::new(pool)?);

    let prefs = Arc::new(FilterPreferences::open(PathBuf::from("data/filter_prefs.json"))?);

    // An optional token raises the API rate limit
    let config = GithubConfig {
        token: env::var("GITHUB_TOKEN").ok(),
        ..GithubConfig::default()
    };
    let client = Arc::new(GithubClient::new(config)?);
    let gateway: Arc<dyn GithubGateway> = Arc::new(GithubRepositoryGateway::new(client));

    let view_model = RepoViewModel::new(
        SearchRepositoriesUseCase::new(gateway.clone()),
        GetRepositoryUseCase::new(gateway.clone()),
        GetReadmeUseCase::new(gateway),
        prefs,
        favorites,
    );

    let query = env::args().nth(1).unwrap_or_else(|| DEFAULT_QUERY.to_string());
    info!("Searching repositories for '{query}'...");

    let mut loading = view_model.loading_state();
    view_model.load_repositories(&query);
    let outcome = loading.wait_for(|state| !state.is_loading()).await?.clone();

    match outcome {
        gitscout::ApiResult::Success(()) => {
            let repositories = view_model.repositories().borrow().clone();
            if repositories.is_empty() {
                warn!("No repositories matched '{query}'. Nothing to display.");
                return Ok(());
            }
            for repo in &repositories {
                println!(
                    "{:>7}\u{2605}  {:<12} {}/{} - {}",
                    repo.stars, repo.language, repo.owner, repo.name, repo.description
                );
            }
        }
        gitscout::ApiResult::Error(message) => {
            warn!("Search failed: {message}");
        }
        gitscout::ApiResult::Loading => {}
    }

    Ok(())
}
