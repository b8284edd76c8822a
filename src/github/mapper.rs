use base64::Engine;

use super::error::GithubError;
use super::types::RepoResponse;
use crate::models::Repository;

/// Placeholder shown while the README has not been fetched yet.
pub const README_PENDING: &str = "loading readme...";
/// Placeholder for repositories without a description.
pub const NO_DESCRIPTION: &str = "no description";
/// Placeholder for repositories without a detected language.
pub const LANGUAGE_UNSPECIFIED: &str = "unspecified";

/// Maps a raw API payload to the domain `Repository`.
///
/// Nulls are replaced by placeholders, `updated_at` is cut to day
/// precision. A date shorter than ten bytes (or one whose tenth byte is
/// not a character boundary) is passed through unmodified rather than
/// rejected; the API has never produced one.
pub fn map_repository(payload: RepoResponse) -> Repository {
    let updated_at = match payload.updated_at.get(..10) {
        Some(date) => date.to_string(),
        None => payload.updated_at,
    };

    Repository {
        id: payload.id,
        name: payload.name,
        owner: payload.owner.login,
        description: payload.description.unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        stars: payload.stars,
        forks: payload.forks,
        language: payload.language.unwrap_or_else(|| LANGUAGE_UNSPECIFIED.to_string()),
        updated_at,
        license: payload.license.map(|l| l.name),
        topics: payload.topics.unwrap_or_default(),
        readme: README_PENDING.to_string(),
    }
}

/// Decodes a base64 README body to UTF-8 text.
///
/// GitHub inserts newlines into the base64 stream, so ASCII whitespace is
/// stripped before decoding.
pub fn decode_readme(content: &str) -> Result<String, GithubError> {
    let compact: String = content.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| GithubError::Decode(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| GithubError::Decode(e.to_string()))
}
