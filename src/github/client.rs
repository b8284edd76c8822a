use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use url::Url;

use super::error::GithubError;
use super::types::{ReadmeResponse, RepoResponse, SearchResponse, SortField, SortOrder};

const DEFAULT_BASE_URL: &str = "https://api.github.com/";
const DEFAULT_USER_AGENT: &str = concat!("gitscout/", env!("CARGO_PKG_VERSION"));

/// The three GitHub REST operations this application consumes.
///
/// Implementations return raw API payloads; status and transport failures
/// surface as `GithubError` and are normalized further up by the gateway.
#[async_trait]
pub trait GithubApi: Send + Sync {
    async fn search_repositories(
        &self,
        query: &str,
        sort: SortField,
        order: SortOrder,
        per_page: u32,
        page: u32,
    ) -> Result<SearchResponse, GithubError>;

    async fn get_repository(&self, owner: &str, repo: &str) -> Result<RepoResponse, GithubError>;

    async fn get_readme(&self, owner: &str, repo: &str) -> Result<ReadmeResponse, GithubError>;
}

/// Connection settings for `GithubClient`.
#[derive(Debug, Clone)]
pub struct GithubConfig {
    pub base_url: Url,
    pub user_agent: String,
    /// Optional bearer token; unauthenticated requests share a small
    /// per-IP rate limit.
    pub token: Option<String>,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            token: None,
        }
    }
}

/// `reqwest`-backed implementation of `GithubApi`. Stateless between
/// calls apart from the shared connection pool inside `reqwest::Client`.
pub struct GithubClient {
    http: reqwest::Client,
    base_url: Url,
}

impl GithubClient {
    pub fn new(config: GithubConfig) -> Result<Self, GithubError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| GithubError::Transport(e.to_string()))?,
        );
        if let Some(token) = &config.token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {token}"))
                    .map_err(|e| GithubError::Transport(e.to_string()))?,
            );
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, GithubError> {
        self.base_url
            .join(path)
            .map_err(|e| GithubError::Transport(e.to_string()))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<T, GithubError> {
        debug!("GET {url}");
        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GithubError::Status(status.as_u16()));
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl GithubApi for GithubClient {
    async fn search_repositories(
        &self,
        query: &str,
        sort: SortField,
        order: SortOrder,
        per_page: u32,
        page: u32,
    ) -> Result<SearchResponse, GithubError> {
        let url = self.endpoint("search/repositories")?;
        self.get_json(
            url,
            &[
                ("q", query.to_string()),
                ("sort", sort.as_str().to_string()),
                ("order", order.as_str().to_string()),
                ("per_page", per_page.to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    async fn get_repository(&self, owner: &str, repo: &str) -> Result<RepoResponse, GithubError> {
        let url = self.endpoint(&format!("repos/{owner}/{repo}"))?;
        self.get_json(url, &[]).await
    }

    async fn get_readme(&self, owner: &str, repo: &str) -> Result<ReadmeResponse, GithubError> {
        let url = self.endpoint(&format!("repos/{owner}/{repo}/readme"))?;
        self.get_json(url, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_against_base_url() {
        let client = GithubClient::new(GithubConfig::default()).unwrap();
        let url = client.endpoint("repos/octocat/Hello-World").unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/repos/octocat/Hello-World");
    }

    #[test]
    fn test_config_default_points_at_github() {
        let config = GithubConfig::default();
        assert_eq!(config.base_url.as_str(), "https://api.github.com/");
        assert!(config.token.is_none());
        assert!(config.user_agent.starts_with("gitscout/"));
    }
}
