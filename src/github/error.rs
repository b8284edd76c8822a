use thiserror::Error;

/// Errors produced at the GitHub boundary.
///
/// All variants are flattened into `ApiResult::Error(message)` by the
/// gateway; nothing here crosses into the orchestrator layer.
#[derive(Debug, Error)]
pub enum GithubError {
    /// Network unreachable, timeout, or a malformed response body.
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("request failed with status {0}")]
    Status(u16),

    /// A valid response without the expected entity.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Malformed base64 or non-UTF-8 text in a README payload.
    #[error("failed to decode readme: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for GithubError {
    fn from(err: reqwest::Error) -> Self {
        GithubError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_embed_the_cause() {
        assert_eq!(
            GithubError::Transport("connection refused".to_string()).to_string(),
            "network error: connection refused"
        );
        assert_eq!(
            GithubError::Status(503).to_string(),
            "request failed with status 503"
        );
        assert_eq!(
            GithubError::NotFound("repository").to_string(),
            "repository not found"
        );
        assert_eq!(
            GithubError::Decode("invalid padding".to_string()).to_string(),
            "failed to decode readme: invalid padding"
        );
    }
}
