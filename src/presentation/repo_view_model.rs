use std::future::Future;
use std::sync::{Arc, Mutex};

use log::error;
use tokio::sync::watch;
use tokio::task::JoinSet;

use crate::base::FavoriteStore;
use crate::data::FilterPreferences;
use crate::models::{ApiResult, FavoriteRepository, FilterCriteria, Repository};
use crate::services::{GetReadmeUseCase, GetRepositoryUseCase, SearchRepositoriesUseCase};

/// Query used before the user has searched for anything.
pub const DEFAULT_QUERY: &str = "android";

/// Builds the search string sent to the API from the base query and the
/// stored filter criteria. Active clauses are appended in a fixed order:
/// base query, language, name, rating. The result is trimmed.
pub fn build_search_query(base: &str, criteria: &FilterCriteria) -> String {
    let mut query = base.to_string();
    if !criteria.language.is_empty() {
        query.push_str(&format!(" language:{}", criteria.language.to_lowercase()));
    }
    if !criteria.name_contains.is_empty() {
        query.push_str(&format!(" {} in:name", criteria.name_contains));
    }
    if criteria.min_rating > 0 {
        query.push_str(&format!(" stars:>={}", criteria.min_rating));
    }
    query.trim().to_string()
}

/// One authoritative copy of each observable field. Consumers subscribe
/// through the accessors on `RepoViewModel`; publication happens on
/// change, through the watch channels.
struct ViewState {
    repositories: watch::Sender<Vec<Repository>>,
    loading_state: watch::Sender<ApiResult<()>>,
    selected_repository: watch::Sender<Option<Repository>>,
    repo_details_state: watch::Sender<ApiResult<()>>,
    favorites: watch::Sender<Vec<FavoriteRepository>>,
    search_query: watch::Sender<String>,
    language: watch::Sender<String>,
    min_rating: watch::Sender<u32>,
    name_contains: watch::Sender<String>,
    filters_active: watch::Sender<bool>,
}

struct Deps {
    search: SearchRepositoriesUseCase,
    details: GetRepositoryUseCase,
    readme: GetReadmeUseCase,
    prefs: Arc<FilterPreferences>,
    favorites: Arc<dyn FavoriteStore>,
}

/// Orchestrates search, filtering, the detail + README join, favorites
/// and preference state into UI-observable streams.
///
/// Every public operation spawns an independent task; callers observe
/// completion through the state streams, never through a return value.
/// Overlapping operations are not sequenced against each other: the last
/// task to finish wins on the shared observables. In-flight tasks are
/// aborted when the view model is dropped.
///
/// Must be created inside a Tokio runtime.
pub struct RepoViewModel {
    deps: Arc<Deps>,
    state: Arc<ViewState>,
    tasks: Mutex<JoinSet<()>>,
}

impl RepoViewModel {
    pub fn new(
        search: SearchRepositoriesUseCase,
        details: GetRepositoryUseCase,
        readme: GetReadmeUseCase,
        prefs: Arc<FilterPreferences>,
        favorites: Arc<dyn FavoriteStore>,
    ) -> Self {
        let criteria = prefs.criteria();
        let state = Arc::new(ViewState {
            repositories: watch::channel(Vec::new()).0,
            loading_state: watch::channel(ApiResult::Loading).0,
            selected_repository: watch::channel(None).0,
            repo_details_state: watch::channel(ApiResult::Success(())).0,
            favorites: watch::channel(Vec::new()).0,
            search_query: watch::channel(DEFAULT_QUERY.to_string()).0,
            language: watch::channel(criteria.language.clone()).0,
            min_rating: watch::channel(criteria.min_rating).0,
            name_contains: watch::channel(criteria.name_contains.clone()).0,
            filters_active: watch::channel(criteria.is_active()).0,
        });

        let view_model = Self {
            deps: Arc::new(Deps {
                search,
                details,
                readme,
                prefs,
                favorites,
            }),
            state,
            tasks: Mutex::new(JoinSet::new()),
        };

        // Favorites are a live query: mirror the store's stream into the
        // view state for the whole lifetime of the view model.
        let mut store_rx = view_model.deps.favorites.observe();
        let state = view_model.state.clone();
        view_model.spawn(async move {
            loop {
                let current = store_rx.borrow_and_update().clone();
                state.favorites.send_replace(current);
                if store_rx.changed().await.is_err() {
                    break;
                }
            }
        });

        view_model
    }

    fn spawn(&self, fut: impl Future<Output = ()> + Send + 'static) {
        let mut tasks = self.tasks.lock().unwrap();
        while tasks.try_join_next().is_some() {}
        tasks.spawn(fut);
    }

    // -- observable state ---------------------------------------------------

    pub fn repositories(&self) -> watch::Receiver<Vec<Repository>> {
        self.state.repositories.subscribe()
    }

    pub fn loading_state(&self) -> watch::Receiver<ApiResult<()>> {
        self.state.loading_state.subscribe()
    }

    pub fn selected_repository(&self) -> watch::Receiver<Option<Repository>> {
        self.state.selected_repository.subscribe()
    }

    pub fn repo_details_state(&self) -> watch::Receiver<ApiResult<()>> {
        self.state.repo_details_state.subscribe()
    }

    pub fn favorites(&self) -> watch::Receiver<Vec<FavoriteRepository>> {
        self.state.favorites.subscribe()
    }

    pub fn search_query(&self) -> watch::Receiver<String> {
        self.state.search_query.subscribe()
    }

    pub fn language(&self) -> watch::Receiver<String> {
        self.state.language.subscribe()
    }

    pub fn min_rating(&self) -> watch::Receiver<u32> {
        self.state.min_rating.subscribe()
    }

    pub fn name_contains(&self) -> watch::Receiver<String> {
        self.state.name_contains.subscribe()
    }

    pub fn filters_active(&self) -> watch::Receiver<bool> {
        self.state.filters_active.subscribe()
    }

    // -- operations ---------------------------------------------------------

    /// Loads the repository list for `query`, augmented with the stored
    /// filter criteria. On failure the previous list stays visible.
    pub fn load_repositories(&self, query: &str) {
        let query = query.to_string();
        let state = self.state.clone();
        let deps = self.deps.clone();
        self.spawn(async move {
            state.loading_state.send_replace(ApiResult::Loading);
            state.search_query.send_replace(query.clone());

            let criteria = deps.prefs.criteria();
            state.filters_active.send_replace(criteria.is_active());

            let augmented = build_search_query(&query, &criteria);
            match deps.search.call(&augmented).await {
                ApiResult::Success(repositories) => {
                    state.repositories.send_replace(repositories);
                    state.loading_state.send_replace(ApiResult::Success(()));
                }
                ApiResult::Error(message) => {
                    // stale-but-visible: the previous list is kept
                    state.loading_state.send_replace(ApiResult::Error(message));
                }
                ApiResult::Loading => {}
            }
        });
    }

    /// Selects a repository and joins its detail record with its README.
    ///
    /// The selection is published immediately so known fields can render
    /// before the detail fetch lands. The README is fetched strictly
    /// after the detail succeeds; a README failure downgrades to an
    /// inline placeholder and still counts as success.
    pub fn select_repository(&self, repository: Repository) {
        let state = self.state.clone();
        let deps = self.deps.clone();
        self.spawn(async move {
            state
                .selected_repository
                .send_replace(Some(repository.clone()));
            state.repo_details_state.send_replace(ApiResult::Loading);

            match deps.details.call(&repository.owner, &repository.name).await {
                ApiResult::Success(detail) => {
                    match deps.readme.call(&repository.owner, &repository.name).await {
                        ApiResult::Success(text) => {
                            state
                                .selected_repository
                                .send_replace(Some(detail.with_readme(text)));
                            state.repo_details_state.send_replace(ApiResult::Success(()));
                        }
                        ApiResult::Error(message) => {
                            let placeholder = format!("readme unavailable: {message}");
                            state
                                .selected_repository
                                .send_replace(Some(detail.with_readme(placeholder)));
                            state.repo_details_state.send_replace(ApiResult::Success(()));
                        }
                        ApiResult::Loading => {}
                    }
                }
                ApiResult::Error(message) => {
                    // the optimistic selection stays in place
                    state.repo_details_state.send_replace(ApiResult::Error(message));
                }
                ApiResult::Loading => {}
            }
        });
    }

    /// Clears the selection and resets the detail state.
    pub fn clear_selection(&self) {
        self.state.selected_repository.send_replace(None);
        self.state.repo_details_state.send_replace(ApiResult::Success(()));
    }

    /// Re-runs the list load with the last submitted query.
    pub fn retry_loading(&self) {
        let query = self.state.search_query.borrow().clone();
        self.load_repositories(&query);
    }

    /// Re-runs the detail join for the current selection; no-op when
    /// nothing is selected.
    pub fn retry_loading_details(&self) {
        let current = self.state.selected_repository.borrow().clone();
        if let Some(repository) = current {
            self.select_repository(repository);
        }
    }

    /// Persists the filter criteria (fire-and-forget), updates the
    /// mirrored observables and re-runs the current search.
    pub fn save_filters(&self, language: &str, min_rating: u32, name_contains: &str) {
        self.deps.prefs.save_filters(language, min_rating, name_contains);
        self.publish_filter_mirrors();
        self.retry_loading();
    }

    /// Persists the filter criteria with confirmation. On a failed write
    /// the mirrors and the reload are skipped and false is returned.
    pub fn save_filters_sync(&self, language: &str, min_rating: u32, name_contains: &str) -> bool {
        if !self
            .deps
            .prefs
            .save_filters_sync(language, min_rating, name_contains)
        {
            return false;
        }
        self.publish_filter_mirrors();
        self.retry_loading();
        true
    }

    fn publish_filter_mirrors(&self) {
        let criteria = self.deps.prefs.criteria();
        self.state.language.send_replace(criteria.language.clone());
        self.state.min_rating.send_replace(criteria.min_rating);
        self.state
            .name_contains
            .send_replace(criteria.name_contains.clone());
        self.state.filters_active.send_replace(criteria.is_active());
    }

    /// Stores a favorite projection of `repository` (upsert by id). The
    /// favorites observable updates through the store's live query.
    pub fn add_to_favorites(&self, repository: &Repository) {
        let favorite = FavoriteRepository::from(repository);
        let deps = self.deps.clone();
        self.spawn(async move {
            if let Err(e) = deps.favorites.insert(&favorite).await {
                error!("failed to add favorite {}: {e:#}", favorite.id);
            }
        });
    }

    pub fn remove_from_favorites(&self, favorite: &FavoriteRepository) {
        let favorite = favorite.clone();
        let deps = self.deps.clone();
        self.spawn(async move {
            if let Err(e) = deps.favorites.delete(&favorite).await {
                error!("failed to remove favorite {}: {e:#}", favorite.id);
            }
        });
    }

    /// Point lookup used to choose the add/remove affordance.
    pub async fn is_favorite(&self, id: i64) -> bool {
        match self.deps.favorites.exists_by_id(id).await {
            Ok(exists) => exists,
            Err(e) => {
                error!("favorite lookup failed for {id}: {e:#}");
                false
            }
        }
    }
}
