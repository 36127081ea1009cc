use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GlintError;

const DEFAULT_API_BASE: &str = "https://api.github.com";

/// The pull request identity: access token, repository slug, PR number.
///
/// Constructed once at process start from the environment (or CLI flags) and
/// passed by reference into every operation that needs it — the operations
/// themselves never read the environment. Immutable after construction; the
/// derived URLs and header are computed on demand from the stored fields.
///
/// # Examples
///
/// ```
/// use glint_core::GithubConfig;
///
/// let config = GithubConfig::new("ghp_xxxx", "octocat/hello-world", "42").unwrap();
/// assert_eq!(
///     config.files_url(),
///     "https://api.github.com/repos/octocat/hello-world/pulls/42/files"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubConfig {
    token: String,
    repo: String,
    pr_number: String,
    api_base: String,
}

impl GithubConfig {
    /// Create a config from the three required settings.
    ///
    /// # Errors
    ///
    /// Returns [`GlintError::Config`] naming the first missing setting if
    /// any of token, repository slug, or PR number is empty.
    pub fn new(
        token: impl Into<String>,
        repo: impl Into<String>,
        pr_number: impl Into<String>,
    ) -> Result<Self, GlintError> {
        let token = token.into();
        let repo = repo.into();
        let pr_number = pr_number.into();

        for (value, name) in [
            (&token, "GITHUB_TOKEN"),
            (&repo, "GITHUB_REPO"),
            (&pr_number, "PR_NUMBER"),
        ] {
            if value.trim().is_empty() {
                return Err(GlintError::Config(format!(
                    "required setting missing: {name}"
                )));
            }
        }

        Ok(Self {
            token,
            repo,
            pr_number,
            api_base: DEFAULT_API_BASE.into(),
        })
    }

    /// Override the API base URL. Used by tests to point at a mock server.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        let base = api_base.into();
        self.api_base = base.trim_end_matches('/').to_string();
        self
    }

    /// Repository slug in `owner/name` form.
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Pull request number as supplied.
    pub fn pr_number(&self) -> &str {
        &self.pr_number
    }

    /// URL of the pull request "files" resource.
    pub fn files_url(&self) -> String {
        format!(
            "{}/repos/{}/pulls/{}/files",
            self.api_base, self.repo, self.pr_number
        )
    }

    /// URL of the pull request "reviews" resource.
    pub fn reviews_url(&self) -> String {
        format!(
            "{}/repos/{}/pulls/{}/reviews",
            self.api_base, self.repo, self.pr_number
        )
    }

    /// Value for the `Authorization` header.
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Top-level configuration loaded from `.glint.toml`.
///
/// Every field is defaulted, so a missing or empty file yields a working
/// configuration. The GitHub settings are NOT part of this file — they come
/// from the environment and become a [`GithubConfig`].
///
/// # Examples
///
/// ```
/// use glint_core::GlintConfig;
///
/// let config = GlintConfig::default();
/// assert_eq!(config.llm.model, "gpt-4o");
/// assert_eq!(config.review.max_comments, 25);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlintConfig {
    /// LLM provider settings.
    #[serde(default)]
    pub llm: LlmConfig,
    /// Review behavior settings.
    #[serde(default)]
    pub review: ReviewConfig,
}

impl GlintConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`GlintError::Io`] if the file cannot be read, or
    /// [`GlintError::Toml`] if the content is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self, GlintError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`GlintError::Toml`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use glint_core::GlintConfig;
    ///
    /// let toml = r#"
    /// [review]
    /// max_comments = 10
    /// "#;
    /// let config = GlintConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.review.max_comments, 10);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, GlintError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }
}

/// LLM provider configuration.
///
/// # Examples
///
/// ```
/// use glint_core::LlmConfig;
///
/// let config = LlmConfig::default();
/// assert_eq!(config.provider, "openai");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider name (e.g. `"openai"`, `"ollama"`).
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// API key for the provider.
    pub api_key: Option<String>,
    /// Custom base URL for API requests.
    pub base_url: Option<String>,
}

fn default_provider() -> String {
    "openai".into()
}

fn default_model() -> String {
    "gpt-4o".into()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            api_key: None,
            base_url: None,
        }
    }
}

/// Review behavior configuration.
///
/// # Examples
///
/// ```
/// use glint_core::ReviewConfig;
///
/// let config = ReviewConfig::default();
/// assert_eq!(config.max_comments, 25);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewConfig {
    /// Coding-standard documents fed into the reviewer prompt.
    #[serde(default = "default_standards_paths")]
    pub standards_paths: Vec<PathBuf>,
    /// Maximum number of comments per review (default: 25).
    #[serde(default = "default_max_comments")]
    pub max_comments: usize,
}

fn default_standards_paths() -> Vec<PathBuf> {
    vec![PathBuf::from("clean_code_standards.md")]
}

fn default_max_comments() -> usize {
    25
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            standards_paths: default_standards_paths(),
            max_comments: default_max_comments(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn github_config_derives_urls_from_fields() {
        let config = GithubConfig::new("tok", "owner/name", "7").unwrap();
        assert_eq!(
            config.files_url(),
            "https://api.github.com/repos/owner/name/pulls/7/files"
        );
        assert_eq!(
            config.reviews_url(),
            "https://api.github.com/repos/owner/name/pulls/7/reviews"
        );
        assert_eq!(config.auth_header(), "Bearer tok");
    }

    #[test]
    fn github_config_is_deterministic() {
        let a = GithubConfig::new("tok", "owner/name", "7").unwrap();
        let b = GithubConfig::new("tok", "owner/name", "7").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.files_url(), b.files_url());
        assert_eq!(a.reviews_url(), b.reviews_url());
        assert_eq!(a.auth_header(), b.auth_header());
    }

    #[test]
    fn missing_token_names_token() {
        let err = GithubConfig::new("", "owner/name", "7").unwrap_err();
        assert!(err.to_string().contains("GITHUB_TOKEN"));
    }

    #[test]
    fn missing_repo_names_repo() {
        let err = GithubConfig::new("tok", "", "7").unwrap_err();
        assert!(err.to_string().contains("GITHUB_REPO"));
    }

    #[test]
    fn missing_pr_number_names_pr_number() {
        let err = GithubConfig::new("tok", "owner/name", "  ").unwrap_err();
        assert!(err.to_string().contains("PR_NUMBER"));
    }

    #[test]
    fn all_missing_names_first_checked() {
        let err = GithubConfig::new("", "", "").unwrap_err();
        assert!(err.to_string().contains("GITHUB_TOKEN"));
    }

    #[test]
    fn api_base_override_trims_trailing_slash() {
        let config = GithubConfig::new("tok", "o/r", "1")
            .unwrap()
            .with_api_base("http://127.0.0.1:8080/");
        assert_eq!(
            config.files_url(),
            "http://127.0.0.1:8080/repos/o/r/pulls/1/files"
        );
    }

    #[test]
    fn default_config_has_expected_values() {
        let config = GlintConfig::default();
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.model, "gpt-4o");
        assert!(config.llm.api_key.is_none());
        assert_eq!(config.review.max_comments, 25);
        assert_eq!(
            config.review.standards_paths,
            vec![PathBuf::from("clean_code_standards.md")]
        );
    }

    #[test]
    fn parse_minimal_toml() {
        let toml = r#"
[review]
max_comments = 5
"#;
        let config = GlintConfig::from_toml(toml).unwrap();
        assert_eq!(config.review.max_comments, 5);
        assert_eq!(config.llm.model, "gpt-4o");
    }

    #[test]
    fn parse_full_toml() {
        let toml = r#"
[llm]
provider = "ollama"
model = "qwen2.5-coder"
base_url = "http://localhost:11434"

[review]
max_comments = 10
standards_paths = ["docs/standards.md", "docs/security.md"]
"#;
        let config = GlintConfig::from_toml(toml).unwrap();
        assert_eq!(config.llm.provider, "ollama");
        assert_eq!(config.llm.base_url.as_deref(), Some("http://localhost:11434"));
        assert_eq!(config.review.max_comments, 10);
        assert_eq!(config.review.standards_paths.len(), 2);
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let config = GlintConfig::from_toml("").unwrap();
        assert_eq!(config.review.max_comments, 25);
        assert_eq!(config.llm.model, "gpt-4o");
    }

    #[test]
    fn invalid_toml_returns_error() {
        let result = GlintConfig::from_toml("{{invalid}}");
        assert!(result.is_err());
    }
}
