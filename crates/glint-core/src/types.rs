use std::fmt;

use serde::{Deserialize, Serialize};

/// One changed file in a pull request, with its unified diff.
///
/// Only files that actually carry a patch become `DiffFile`s; binary and
/// rename-only changes are filtered out before this type is constructed.
///
/// # Examples
///
/// ```
/// use glint_core::DiffFile;
///
/// let file = DiffFile {
///     filename: "src/auth.rs".into(),
///     patch: "@@ -1,2 +1,3 @@\n+use std::fmt;".into(),
/// };
/// assert!(!file.patch.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffFile {
    /// Path of the file relative to the repository root.
    pub filename: String,
    /// Unified diff text for this file.
    pub patch: String,
}

/// An inline review comment anchored to a line in the new file version.
///
/// The line number is 1-based and counts added and context lines in the new
/// version of the file. Serializes to exactly the `{path, line, body}` shape
/// the review endpoint expects.
///
/// # Examples
///
/// ```
/// use glint_core::ReviewComment;
///
/// let comment = ReviewComment {
///     path: "src/db.rs".into(),
///     line: 14,
///     body: "This query is vulnerable to SQL injection.".into(),
/// };
/// let json = serde_json::to_value(&comment).unwrap();
/// assert_eq!(json["line"], 14);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewComment {
    /// Path to the file being commented on.
    pub path: String,
    /// Line number in the new version of the file (1-based).
    pub line: u32,
    /// Feedback text.
    pub body: String,
}

/// Outcome of a review submission.
///
/// The submitter never raises for ordinary HTTP or transport failures; it
/// always reports one of these tags.
///
/// # Examples
///
/// ```
/// use glint_core::ReviewSubmissionResult;
///
/// let result = ReviewSubmissionResult::Failed("GitHub API error 404".into());
/// assert!(result.to_string().contains("404"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewSubmissionResult {
    /// The review was accepted by the platform.
    Posted,
    /// Nothing to submit; no network call was made.
    NoComments,
    /// The platform rejected the review or the request never completed.
    Failed(String),
}

impl fmt::Display for ReviewSubmissionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewSubmissionResult::Posted => write!(f, "posted"),
            ReviewSubmissionResult::NoComments => write!(f, "no comments"),
            ReviewSubmissionResult::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}
