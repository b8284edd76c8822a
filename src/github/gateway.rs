use std::sync::Arc;

use async_trait::async_trait;
use log::warn;

use super::client::GithubApi;
use super::error::GithubError;
use super::mapper::{decode_readme, map_repository};
use super::types::{SortField, SortOrder};
use crate::models::{ApiResult, Repository};

/// Repository-domain view of the GitHub API.
///
/// Every operation resolves to an `ApiResult`; implementations never
/// return a raw error to the caller.
#[async_trait]
pub trait GithubGateway: Send + Sync {
    async fn search_repositories(
        &self,
        query: &str,
        sort: SortField,
        order: SortOrder,
        per_page: u32,
        page: u32,
    ) -> ApiResult<Vec<Repository>>;

    async fn get_repository(&self, owner: &str, repo: &str) -> ApiResult<Repository>;

    async fn get_readme(&self, owner: &str, repo: &str) -> ApiResult<String>;
}

/// Default gateway: `GithubApi` + mapper, with all transport, status,
/// not-found and decode failures normalized into `ApiResult::Error`.
pub struct GithubRepositoryGateway {
    api: Arc<dyn GithubApi>,
}

impl GithubRepositoryGateway {
    pub fn new(api: Arc<dyn GithubApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl GithubGateway for GithubRepositoryGateway {
    async fn search_repositories(
        &self,
        query: &str,
        sort: SortField,
        order: SortOrder,
        per_page: u32,
        page: u32,
    ) -> ApiResult<Vec<Repository>> {
        match self
            .api
            .search_repositories(query, sort, order, per_page, page)
            .await
        {
            Ok(response) => {
                let repositories = response.items.into_iter().map(map_repository).collect();
                ApiResult::Success(repositories)
            }
            Err(err) => {
                warn!("repository search failed: {err}");
                ApiResult::Error(format!("failed to load repositories: {err}"))
            }
        }
    }

    async fn get_repository(&self, owner: &str, repo: &str) -> ApiResult<Repository> {
        match self.api.get_repository(owner, repo).await {
            Ok(response) => ApiResult::Success(map_repository(response)),
            Err(GithubError::Status(404)) => {
                ApiResult::Error(GithubError::NotFound("repository").to_string())
            }
            Err(err) => {
                warn!("repository fetch failed for {owner}/{repo}: {err}");
                ApiResult::Error(format!("failed to load repository: {err}"))
            }
        }
    }

    async fn get_readme(&self, owner: &str, repo: &str) -> ApiResult<String> {
        match self.api.get_readme(owner, repo).await {
            Ok(response) => match response.content {
                Some(content) => match decode_readme(&content) {
                    Ok(text) => ApiResult::Success(text),
                    Err(err) => ApiResult::Error(err.to_string()),
                },
                None => ApiResult::Error(GithubError::NotFound("readme").to_string()),
            },
            Err(err) => {
                warn!("readme fetch failed for {owner}/{repo}: {err}");
                ApiResult::Error(format!("failed to load readme: {err}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::github::types::{OwnerResponse, ReadmeResponse, RepoResponse, SearchResponse};

    /// Canned-response stand-in for the real client. Each slot is
    /// consumed by the first call to its method.
    #[derive(Default)]
    struct MockGithubApi {
        search: Mutex<Option<Result<SearchResponse, GithubError>>>,
        repository: Mutex<Option<Result<RepoResponse, GithubError>>>,
        readme: Mutex<Option<Result<ReadmeResponse, GithubError>>>,
    }

    #[async_trait]
    impl GithubApi for MockGithubApi {
        async fn search_repositories(
            &self,
            _query: &str,
            _sort: SortField,
            _order: SortOrder,
            _per_page: u32,
            _page: u32,
        ) -> Result<SearchResponse, GithubError> {
            self.search.lock().unwrap().take().expect("unexpected search call")
        }

        async fn get_repository(
            &self,
            _owner: &str,
            _repo: &str,
        ) -> Result<RepoResponse, GithubError> {
            self.repository.lock().unwrap().take().expect("unexpected repository call")
        }

        async fn get_readme(&self, _owner: &str, _repo: &str) -> Result<ReadmeResponse, GithubError> {
            self.readme.lock().unwrap().take().expect("unexpected readme call")
        }
    }

    fn repo_payload(id: i64, name: &str) -> RepoResponse {
        RepoResponse {
            id,
            name: name.to_string(),
            full_name: format!("octocat/{name}"),
            owner: OwnerResponse {
                login: "octocat".to_string(),
                avatar_url: None,
            },
            description: Some("desc".to_string()),
            stars: 5,
            forks: 1,
            language: Some("Rust".to_string()),
            updated_at: "2024-01-02T03:04:05Z".to_string(),
            license: None,
            topics: None,
            html_url: format!("https://github.com/octocat/{name}"),
        }
    }

    fn gateway_with(api: MockGithubApi) -> GithubRepositoryGateway {
        GithubRepositoryGateway::new(Arc::new(api))
    }

    #[tokio::test]
    async fn test_search_maps_every_item() {
        let api = MockGithubApi::default();
        *api.search.lock().unwrap() = Some(Ok(SearchResponse {
            total_count: 2,
            items: vec![repo_payload(1, "one"), repo_payload(2, "two")],
        }));

        let result = gateway_with(api)
            .search_repositories("rust", SortField::Stars, SortOrder::Desc, 30, 1)
            .await;

        let repos = result.success().expect("search should succeed");
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].name, "one");
        assert_eq!(repos[1].updated_at, "2024-01-02");
    }

    #[tokio::test]
    async fn test_search_empty_result_is_success() {
        let api = MockGithubApi::default();
        *api.search.lock().unwrap() = Some(Ok(SearchResponse {
            total_count: 0,
            items: vec![],
        }));

        let result = gateway_with(api)
            .search_repositories("nothing", SortField::Stars, SortOrder::Desc, 30, 1)
            .await;
        assert_eq!(result, ApiResult::Success(vec![]));
    }

    #[tokio::test]
    async fn test_search_http_failure_embeds_status_code() {
        let api = MockGithubApi::default();
        *api.search.lock().unwrap() = Some(Err(GithubError::Status(503)));

        let result = gateway_with(api)
            .search_repositories("rust", SortField::Stars, SortOrder::Desc, 30, 1)
            .await;

        let message = result.error_message().expect("should be an error");
        assert!(message.contains("503"), "message should embed status: {message}");
    }

    #[tokio::test]
    async fn test_search_transport_failure_embeds_description() {
        let api = MockGithubApi::default();
        *api.search.lock().unwrap() =
            Some(Err(GithubError::Transport("connection timed out".to_string())));

        let result = gateway_with(api)
            .search_repositories("rust", SortField::Stars, SortOrder::Desc, 30, 1)
            .await;

        let message = result.error_message().unwrap();
        assert!(message.contains("connection timed out"));
    }

    #[tokio::test]
    async fn test_get_repository_404_reads_as_not_found() {
        let api = MockGithubApi::default();
        *api.repository.lock().unwrap() = Some(Err(GithubError::Status(404)));

        let result = gateway_with(api).get_repository("octocat", "gone").await;
        assert_eq!(result, ApiResult::Error("repository not found".to_string()));
    }

    #[tokio::test]
    async fn test_get_readme_decodes_base64_content() {
        let api = MockGithubApi::default();
        *api.readme.lock().unwrap() = Some(Ok(ReadmeResponse {
            content: Some("IyBIZWxsbwo=".to_string()),
            encoding: Some("base64".to_string()),
        }));

        let result = gateway_with(api).get_readme("octocat", "scout").await;
        assert_eq!(result, ApiResult::Success("# Hello\n".to_string()));
    }

    #[tokio::test]
    async fn test_get_readme_missing_content_is_not_found() {
        let api = MockGithubApi::default();
        *api.readme.lock().unwrap() = Some(Ok(ReadmeResponse {
            content: None,
            encoding: None,
        }));

        let result = gateway_with(api).get_readme("octocat", "scout").await;
        assert_eq!(result, ApiResult::Error("readme not found".to_string()));
    }

    #[tokio::test]
    async fn test_get_readme_decode_failure_becomes_error_result() {
        let api = MockGithubApi::default();
        *api.readme.lock().unwrap() = Some(Ok(ReadmeResponse {
            content: Some("!!!!".to_string()),
            encoding: Some("base64".to_string()),
        }));

        let result = gateway_with(api).get_readme("octocat", "scout").await;
        let message = result.error_message().expect("decode failure must not panic");
        assert!(message.starts_with("failed to decode readme:"));
    }
}
