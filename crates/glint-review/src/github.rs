use std::time::Duration;

use glint_core::{DiffFile, GithubConfig, GlintError, ReviewComment, ReviewSubmissionResult};
use serde::Deserialize;

/// Summary body attached to every posted review.
pub const REVIEW_BODY: &str = "Automated Review by AI.";

/// Review event classification. `COMMENT` is non-blocking: the tool never
/// approves or requests changes on its own.
const REVIEW_EVENT: &str = "COMMENT";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = "glint";

/// GitHub Pull Request client for fetching changed files and posting reviews.
///
/// Both operations are stateless single-shot calls: one outbound request,
/// one attempt, no retries. Network failures never escape as errors — fetch
/// degrades to an empty list and submit reports [`ReviewSubmissionResult::Failed`],
/// with the details visible only in the log output.
///
/// # Examples
///
/// ```
/// use glint_core::GithubConfig;
/// use glint_review::github::GitHubClient;
///
/// let config = GithubConfig::new("ghp_xxxx", "octocat/hello-world", "42").unwrap();
/// let client = GitHubClient::new(config).unwrap();
/// ```
pub struct GitHubClient {
    http: reqwest::Client,
    config: GithubConfig,
}

/// One record from the pull request "files" endpoint.
///
/// Every remote field beyond `filename` is treated as optional; binary and
/// rename-only changes arrive without a `patch`.
#[derive(Debug, Deserialize)]
struct ChangedFileRecord {
    filename: String,
    #[serde(default)]
    patch: Option<String>,
}

impl GitHubClient {
    /// Create a client with the standard 10-second request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`GlintError::Config`] if the HTTP client cannot be built.
    pub fn new(config: GithubConfig) -> Result<Self, GlintError> {
        Self::with_timeout(config, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`GlintError::Config`] if the HTTP client cannot be built.
    pub fn with_timeout(config: GithubConfig, timeout: Duration) -> Result<Self, GlintError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GlintError::Config(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    /// Fetch the pull request's changed files, each with its unified diff.
    ///
    /// Files without a non-empty patch are skipped; the platform's order is
    /// preserved. Any transport failure, non-success status, or undecodable
    /// body is logged and collapses to an empty list — the caller sees
    /// "nothing to review" and cannot distinguish a failed fetch from a PR
    /// with no reviewable changes.
    pub async fn fetch_changed_files(&self) -> Vec<DiffFile> {
        let url = self.config.files_url();

        let response = match self
            .http
            .get(&url)
            .header("Authorization", self.config.auth_header())
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::error!("failed to fetch PR files: {e}");
                return Vec::new();
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("GitHub API error {status} fetching PR files: {body}");
            return Vec::new();
        }

        let records: Vec<ChangedFileRecord> = match response.json().await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!("failed to decode PR file list: {e}");
                return Vec::new();
            }
        };

        records
            .into_iter()
            .filter_map(|record| match record.patch {
                Some(patch) if !patch.is_empty() => Some(DiffFile {
                    filename: record.filename,
                    patch,
                }),
                _ => None,
            })
            .collect()
    }

    /// Post the comments to the pull request as one batched review.
    ///
    /// An empty slice short-circuits to [`ReviewSubmissionResult::NoComments`]
    /// with no network call. Otherwise a single POST carries the fixed
    /// summary body, the `COMMENT` event, and the comments verbatim — either
    /// the whole batch lands or the call fails as a whole. Posting is not
    /// idempotent: calling twice creates two reviews.
    pub async fn submit_review(&self, comments: &[ReviewComment]) -> ReviewSubmissionResult {
        if comments.is_empty() {
            return ReviewSubmissionResult::NoComments;
        }

        let url = self.config.reviews_url();
        let payload = serde_json::json!({
            "body": REVIEW_BODY,
            "event": REVIEW_EVENT,
            "comments": comments,
        });

        let response = match self
            .http
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .json(&payload)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::error!("failed to post review: {e}");
                return ReviewSubmissionResult::Failed(format!("request failed: {e}"));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("GitHub API error {status} posting review: {body}");
            return ReviewSubmissionResult::Failed(format!("GitHub API error {status}"));
        }

        ReviewSubmissionResult::Posted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changed_file_record_with_patch() {
        let json = r#"{"filename": "a.py", "patch": "+x", "status": "modified"}"#;
        let record: ChangedFileRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.filename, "a.py");
        assert_eq!(record.patch.as_deref(), Some("+x"));
    }

    #[test]
    fn changed_file_record_without_patch() {
        let json = r#"{"filename": "logo.png", "status": "added"}"#;
        let record: ChangedFileRecord = serde_json::from_str(json).unwrap();
        assert!(record.patch.is_none());
    }

    #[test]
    fn client_construction_succeeds() {
        let config = GithubConfig::new("tok", "o/r", "1").unwrap();
        assert!(GitHubClient::new(config).is_ok());
    }
}
