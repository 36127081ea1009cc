/// Errors that can occur across the glint workspace.
///
/// Each variant wraps a specific error domain. Library crates use this type
/// directly; the binary crate converts to `miette` diagnostics at the
/// boundary. Network failures inside the GitHub client are deliberately NOT
/// represented here — the client absorbs them and reports a typed result
/// instead (see `ReviewSubmissionResult`).
///
/// # Examples
///
/// ```
/// use glint_core::GlintError;
///
/// let err = GlintError::Config("missing GITHUB_TOKEN".into());
/// assert!(err.to_string().contains("missing GITHUB_TOKEN"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum GlintError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// LLM API or response error.
    #[error("LLM error: {0}")]
    Llm(String),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: GlintError = io_err.into();
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn config_error_displays_message() {
        let err = GlintError::Config("bad value".into());
        assert_eq!(err.to_string(), "configuration error: bad value");
    }

    #[test]
    fn llm_error_displays_message() {
        let err = GlintError::Llm("model unavailable".into());
        assert_eq!(err.to_string(), "LLM error: model unavailable");
    }
}
