//! Core types, configuration, and error handling for glint.
//!
//! This crate provides the shared foundation used by the rest of the
//! workspace:
//! - [`GlintError`] — unified error type using `thiserror`
//! - [`GlintConfig`] — configuration loaded from `.glint.toml`
//! - [`GithubConfig`] — the pull request identity (token, repo, number)
//! - Shared types: [`DiffFile`], [`ReviewComment`], [`ReviewSubmissionResult`]

mod config;
mod error;
mod types;

pub use config::{GithubConfig, GlintConfig, LlmConfig, ReviewConfig};
pub use error::GlintError;
pub use types::{DiffFile, ReviewComment, ReviewSubmissionResult};

/// A convenience `Result` type for glint operations.
pub type Result<T> = std::result::Result<T, GlintError>;
