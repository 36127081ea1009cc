//! Pull request review machinery.
//!
//! Provides the GitHub PR client (fetch changed files, post a batched
//! review), the LLM client, prompt construction, coding-standards loading,
//! and the review pipeline that ties them together.

pub mod github;
pub mod llm;
pub mod pipeline;
pub mod prompt;
pub mod standards;
