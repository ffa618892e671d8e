//! GitLab API client.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use super::error::GitLabError;
use super::types::{CommitDetail, CommitRef, Project};
use crate::http::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

/// Request timeout for the underlying HTTP client.
const HTTP_TIMEOUT: StdDuration = StdDuration::from_secs(30);

/// GitLab API client.
///
/// A thin client over the REST API, scoped to the endpoints the statistics
/// pipeline needs. All I/O goes through an injected [`HttpTransport`] so
/// tests can run against an in-memory mock.
#[derive(Clone)]
pub struct GitLabClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    token: String,
}

impl GitLabClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `url` - GitLab instance URL (e.g., "https://gitlab.example.com")
    /// * `token` - Personal access token with `read_api` scope
    /// * `api_version` - API version segment (normally "v4")
    pub fn new(url: &str, token: &str, api_version: &str) -> Result<Self, GitLabError> {
        let transport = ReqwestTransport::with_timeout(HTTP_TIMEOUT)
            .map_err(|e| GitLabError::Http(e.to_string()))?;
        Ok(Self::new_with_transport(
            url,
            token,
            api_version,
            Arc::new(transport),
        ))
    }

    pub fn new_with_transport(
        url: &str,
        token: &str,
        api_version: &str,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let base_url = format!("{}/api/{}", url.trim_end_matches('/'), api_version);
        Self {
            transport,
            base_url,
            token: token.to_string(),
        }
    }

    /// Get the resolved API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make an authenticated GET request.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, GitLabError> {
        let request = HttpRequest {
            url: format!("{}{}", self.base_url, path),
            headers: vec![
                ("Accept".to_string(), "application/json".to_string()),
                ("User-Agent".to_string(), "contribstat".to_string()),
                ("PRIVATE-TOKEN".to_string(), self.token.clone()),
            ],
        };

        let response: HttpResponse = self
            .transport
            .send(request)
            .await
            .map_err(|e| GitLabError::Http(e.to_string()))?;

        if !(200..300).contains(&response.status) {
            let message = String::from_utf8_lossy(&response.body).to_string();
            return Err(GitLabError::Api {
                status: response.status,
                message,
            });
        }

        serde_json::from_slice(&response.body).map_err(GitLabError::Json)
    }

    /// Fetch one page of a project's commit history for a date window.
    ///
    /// `since` and `until` are passed straight through as upstream filters;
    /// the returned commits are not re-filtered client-side. An empty page
    /// means the history is exhausted.
    pub async fn list_commits_page(
        &self,
        project_id: u64,
        since: NaiveDate,
        until: NaiveDate,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<CommitRef>, GitLabError> {
        let path = format!(
            "/projects/{project_id}/repository/commits?since={since}&until={until}&all=true&per_page={per_page}&page={page}"
        );
        self.get(&path).await
    }

    /// Fetch a single commit with its diff statistics.
    pub async fn get_commit(
        &self,
        project_id: u64,
        sha: &str,
    ) -> Result<CommitDetail, GitLabError> {
        let path = format!("/projects/{project_id}/repository/commits/{sha}");
        self.get(&path).await
    }

    /// Fetch one page of the projects visible to the token.
    pub async fn list_projects_page(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Project>, GitLabError> {
        let path = format!("/projects?per_page={per_page}&page={page}");
        self.get(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpResponse, MockTransport};

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("test date")
    }

    fn client_with(transport: &MockTransport) -> GitLabClient {
        GitLabClient::new_with_transport(
            "https://gitlab.example.com/",
            "secret-token",
            "v4",
            Arc::new(transport.clone()),
        )
    }

    #[test]
    fn base_url_joins_host_and_api_version() {
        let transport = MockTransport::new();
        let client = client_with(&transport);
        assert_eq!(client.base_url(), "https://gitlab.example.com/api/v4");
    }

    #[tokio::test]
    async fn list_commits_page_builds_url_and_sends_token() {
        let transport = MockTransport::new();
        let client = client_with(&transport);

        let url = "https://gitlab.example.com/api/v4/projects/42/repository/commits?since=2024-01-01&until=2024-01-31&all=true&per_page=100&page=1";
        transport.push_json(
            url,
            r#"[{"id": "abc", "message": "m", "author_name": "dev", "parent_ids": []}]"#,
        );

        let commits = client
            .list_commits_page(42, date("2024-01-01"), date("2024-01-31"), 1, 100)
            .await
            .expect("commits");
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].id, "abc");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert!(
            requests[0]
                .headers
                .iter()
                .any(|(k, v)| k == "PRIVATE-TOKEN" && v == "secret-token")
        );
    }

    #[tokio::test]
    async fn get_commit_returns_stats() {
        let transport = MockTransport::new();
        let client = client_with(&transport);

        transport.push_json(
            "https://gitlab.example.com/api/v4/projects/42/repository/commits/abc",
            r#"{"id": "abc", "stats": {"additions": 3, "deletions": 1, "total": 4}}"#,
        );

        let detail = client.get_commit(42, "abc").await.expect("detail");
        assert_eq!(detail.stats.additions, 3);
        assert_eq!(detail.stats.total, 4);
    }

    #[tokio::test]
    async fn non_success_status_maps_to_api_error() {
        let transport = MockTransport::new();
        let client = client_with(&transport);

        transport.push_response(
            "https://gitlab.example.com/api/v4/projects/42/repository/commits/abc",
            HttpResponse {
                status: 404,
                body: b"{\"message\":\"404 Commit Not Found\"}".to_vec(),
            },
        );

        let err = client.get_commit(42, "abc").await.expect_err("error");
        match err {
            GitLabError::Api { status, message } => {
                assert_eq!(status, 404);
                assert!(message.contains("Not Found"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_maps_to_json_error() {
        let transport = MockTransport::new();
        let client = client_with(&transport);

        transport.push_json(
            "https://gitlab.example.com/api/v4/projects?per_page=100&page=1",
            "not json",
        );

        let err = client.list_projects_page(1, 100).await.expect_err("error");
        assert!(matches!(err, GitLabError::Json(_)));
    }

    #[tokio::test]
    async fn transport_failure_maps_to_http_error() {
        let transport = MockTransport::new();
        let client = client_with(&transport);

        // Nothing registered: the mock reports a transport-level failure.
        let err = client.get_commit(1, "nope").await.expect_err("error");
        assert!(matches!(err, GitLabError::Http(_)));
    }
}
