//! GitLab API error types.

use thiserror::Error;

/// Errors from the GitLab API client.
#[derive(Debug, Error)]
pub enum GitLabError {
    /// Transport-level failure (connection, timeout, TLS).
    #[error("http error: {0}")]
    Http(String),

    /// The API returned a non-success status.
    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A short, single-line rendering of an error for log lines.
#[must_use]
pub fn short_error_message(err: &GitLabError) -> String {
    match err {
        GitLabError::Api { status, .. } => format!("api status {status}"),
        GitLabError::Http(msg) => {
            let first = msg.lines().next().unwrap_or(msg);
            format!("http: {first}")
        }
        GitLabError::Json(e) => format!("decode: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_status_and_message() {
        let err = GitLabError::Api {
            status: 403,
            message: "insufficient_scope".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("403"));
        assert!(text.contains("insufficient_scope"));
    }

    #[test]
    fn short_error_message_hides_api_body() {
        let err = GitLabError::Api {
            status: 500,
            message: "<html>very long error page</html>".to_string(),
        };
        assert_eq!(short_error_message(&err), "api status 500");
    }

    #[test]
    fn short_error_message_takes_first_line_of_http_error() {
        let err = GitLabError::Http("connection reset\nby peer".to_string());
        assert_eq!(short_error_message(&err), "http: connection reset");
    }
}
