use std::fmt;

use glint_core::{DiffFile, GlintError, ReviewComment, ReviewConfig};
use serde::Serialize;

use crate::llm::{ChatMessage, LlmClient, Role};
use crate::prompt;

/// Result of the LLM review step.
///
/// # Examples
///
/// ```
/// use glint_review::pipeline::{ReviewResult, ReviewStats};
///
/// let result = ReviewResult {
///     comments: vec![],
///     stats: ReviewStats {
///         files_reviewed: 0,
///         comments_generated: 0,
///         comments_truncated: 0,
///         model_used: "gpt-4o".into(),
///     },
/// };
/// assert!(result.comments.is_empty());
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResult {
    /// Comments ready for submission, in the order the model produced them.
    pub comments: Vec<ReviewComment>,
    /// Statistics about the review run.
    pub stats: ReviewStats,
}

/// Statistics about a review run.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewStats {
    /// Number of changed files sent to the model.
    pub files_reviewed: usize,
    /// Valid comments the model produced before truncation.
    pub comments_generated: usize,
    /// Comments dropped by the `max_comments` cap.
    pub comments_truncated: usize,
    /// Model identifier used for the review.
    pub model_used: String,
}

/// Review orchestrator for the LLM step.
///
/// Renders the diffs and standards into prompts, makes one chat call, parses
/// the response, and caps the comment count. Fetching the diffs and
/// submitting the review are the caller's moves, before and after.
pub struct ReviewPipeline {
    llm: LlmClient,
    config: ReviewConfig,
}

impl ReviewPipeline {
    /// Create a new pipeline from an LLM client and review config.
    pub fn new(llm: LlmClient, config: ReviewConfig) -> Self {
        Self { llm, config }
    }

    /// Run the review on the given changed files and return the comments.
    ///
    /// Comments beyond `max_comments` are dropped; the survivors keep the
    /// model's order. The files themselves are passed through the prompt
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`GlintError::Llm`] if the chat call fails.
    pub async fn review(
        &self,
        files: &[DiffFile],
        standards: &str,
    ) -> Result<ReviewResult, GlintError> {
        let system = prompt::build_system_prompt(standards);
        let user = prompt::build_review_prompt(files);

        let messages = vec![
            ChatMessage {
                role: Role::System,
                content: system,
            },
            ChatMessage {
                role: Role::User,
                content: user,
            },
        ];

        let response = self.llm.chat(messages).await?;
        let mut comments = prompt::parse_review_response(&response)?;
        let comments_generated = comments.len();

        comments.truncate(self.config.max_comments);

        Ok(ReviewResult {
            stats: ReviewStats {
                files_reviewed: files.len(),
                comments_generated,
                comments_truncated: comments_generated - comments.len(),
                model_used: self.llm.model().to_string(),
            },
            comments,
        })
    }
}

impl fmt::Display for ReviewResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Model: {} | Files: {} | Comments: {} (truncated: {})\n",
            self.stats.model_used,
            self.stats.files_reviewed,
            self.comments.len(),
            self.stats.comments_truncated,
        )?;

        if self.comments.is_empty() {
            writeln!(f, "No issues found.")?;
        } else {
            for c in &self.comments {
                writeln!(f, "{}:{}", c.path, c.line)?;
                writeln!(f, "  {}\n", c.body)?;
            }
        }

        Ok(())
    }
}
