use serde::Deserialize;

/// Raw repository payload from the GitHub REST API.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoResponse {
    pub id: i64,
    pub name: String,
    pub full_name: String,
    pub owner: OwnerResponse,
    pub description: Option<String>,
    #[serde(rename = "stargazers_count")]
    pub stars: u32,
    #[serde(rename = "forks_count")]
    pub forks: u32,
    pub language: Option<String>,
    pub updated_at: String,
    pub license: Option<LicenseResponse>,
    pub topics: Option<Vec<String>>,
    pub html_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwnerResponse {
    pub login: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LicenseResponse {
    pub name: String,
}

/// Response of `GET search/repositories`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub total_count: u64,
    pub items: Vec<RepoResponse>,
}

/// Response of `GET repos/{owner}/{repo}/readme`.
///
/// `content` is base64 text; GitHub wraps it with newlines every 60
/// characters, which the mapper strips before decoding.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadmeResponse {
    pub content: Option<String>,
    pub encoding: Option<String>,
}

/// Field used to sort search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Stars,
    Forks,
    Updated,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Stars => "stars",
            SortField::Forks => "forks",
            SortField::Updated => "updated",
        }
    }
}

/// Direction used to sort search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}
