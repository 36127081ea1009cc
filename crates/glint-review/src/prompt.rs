use glint_core::{DiffFile, GlintError, ReviewComment};
use serde::Deserialize;

const SYSTEM_PROMPT: &str = "\
You are a detail-oriented senior engineer performing focused, actionable, \
standards-driven code reviews of pull requests.

Rules:
- Only comment on added lines (marked with '+'); never on deletions, test \
files, documentation, or unchanged lines
- Line numbers refer to the new version of the file, counting added and \
context lines
- Feedback must be actionable and non-nitpicky: bugs, security issues, \
major logic problems, or clear violations of the coding standards
- Do not comment on subjective style
- If unsure, do not comment

Respond with a JSON object:
{
  \"comments\": [
    {
      \"path\": \"path/to/file.py\",
      \"line\": 42,
      \"body\": \"Clear, actionable feedback\"
    }
  ]
}

If you find nothing worth raising, return: { \"comments\": [] }";

/// Build the system prompt for the reviewer, embedding the coding standards.
///
/// An empty standards text leaves the reviewer on general engineering
/// judgment alone.
///
/// # Examples
///
/// ```
/// use glint_review::prompt::build_system_prompt;
///
/// let prompt = build_system_prompt("Functions must be under 40 lines.");
/// assert!(prompt.contains("under 40 lines"));
/// assert!(prompt.contains("comments"));
/// ```
pub fn build_system_prompt(standards: &str) -> String {
    let mut prompt = SYSTEM_PROMPT.to_string();
    if !standards.trim().is_empty() {
        prompt.push_str("\n\nCoding standards to enforce:\n\n");
        prompt.push_str(standards.trim());
    }
    prompt
}

/// Build the user prompt containing the changed files to review.
///
/// Each file is rendered as a fenced diff block labelled with its path.
///
/// # Examples
///
/// ```
/// use glint_core::DiffFile;
/// use glint_review::prompt::build_review_prompt;
///
/// let files = vec![DiffFile { filename: "a.py".into(), patch: "+x = 1".into() }];
/// let prompt = build_review_prompt(&files);
/// assert!(prompt.contains("a.py"));
/// assert!(prompt.contains("+x = 1"));
/// ```
pub fn build_review_prompt(files: &[DiffFile]) -> String {
    use std::fmt::Write;
    let mut prompt = String::from("Review the following pull request changes:\n");
    for file in files {
        let _ = write!(
            prompt,
            "\n### {}\n```diff\n{}\n```\n",
            file.filename, file.patch
        );
    }
    prompt
}

#[derive(Deserialize)]
struct LlmResponse {
    comments: Vec<LlmComment>,
}

#[derive(Deserialize)]
struct LlmComment {
    path: Option<String>,
    line: Option<serde_json::Value>,
    body: Option<String>,
}

/// Parse the LLM JSON response into validated [`ReviewComment`] entries.
///
/// Handles markdown code fences around JSON. A wholly-unparseable response
/// is logged and yields an empty vec rather than failing the run; individual
/// entries with a missing path or body, or a line that is not a positive
/// number, are skipped.
///
/// # Examples
///
/// ```
/// use glint_review::prompt::parse_review_response;
///
/// let comments = parse_review_response(r#"{"comments":[]}"#).unwrap();
/// assert!(comments.is_empty());
/// ```
pub fn parse_review_response(response: &str) -> Result<Vec<ReviewComment>, GlintError> {
    let cleaned = strip_code_fences(response);

    let parsed: LlmResponse = match serde_json::from_str(cleaned) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!("failed to parse LLM response: {e}");
            return Ok(Vec::new());
        }
    };

    let mut comments = Vec::new();
    for c in parsed.comments {
        let line = match &c.line {
            Some(serde_json::Value::Number(n)) => {
                let Some(l) = n.as_u64() else { continue };
                if l == 0 || l > u64::from(u32::MAX) {
                    continue;
                }
                l as u32
            }
            _ => continue,
        };

        let Some(path) = c.path.filter(|p| !p.trim().is_empty()) else {
            continue;
        };
        let Some(body) = c.body.filter(|b| !b.trim().is_empty()) else {
            continue;
        };

        comments.push(ReviewComment { path, line, body });
    }

    Ok(comments)
}

fn strip_code_fences(s: &str) -> &str {
    let trimmed = s.trim();
    if let Some(rest) = trimmed.strip_prefix("```json") {
        if let Some(inner) = rest.strip_suffix("```") {
            return inner.trim();
        }
    }
    if let Some(rest) = trimmed.strip_prefix("```") {
        if let Some(inner) = rest.strip_suffix("```") {
            return inner.trim();
        }
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_contains_key_instructions() {
        let prompt = build_system_prompt("");
        assert!(prompt.contains("added lines"));
        assert!(prompt.contains("comments"));
        assert!(!prompt.contains("Coding standards to enforce"));
    }

    #[test]
    fn system_prompt_embeds_standards() {
        let prompt = build_system_prompt("No global mutable state.");
        assert!(prompt.contains("Coding standards to enforce"));
        assert!(prompt.contains("No global mutable state."));
    }

    #[test]
    fn review_prompt_labels_each_file() {
        let files = vec![
            DiffFile {
                filename: "src/auth.rs".into(),
                patch: "+let x = 1;".into(),
            },
            DiffFile {
                filename: "src/db.rs".into(),
                patch: "+query(input)".into(),
            },
        ];
        let prompt = build_review_prompt(&files);
        assert!(prompt.contains("### src/auth.rs"));
        assert!(prompt.contains("### src/db.rs"));
        assert!(prompt.contains("```diff"));
        assert!(prompt.contains("+query(input)"));
    }

    #[test]
    fn parse_valid_response() {
        let json = r#"{
            "comments": [
                {"path": "src/auth.py", "line": 42, "body": "Possible null dereference"},
                {"path": "src/db.py", "line": 10, "body": "SQL injection risk"}
            ]
        }"#;
        let comments = parse_review_response(json).unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].path, "src/auth.py");
        assert_eq!(comments[0].line, 42);
        assert_eq!(comments[1].body, "SQL injection risk");
    }

    #[test]
    fn parse_empty_comments() {
        let comments = parse_review_response(r#"{"comments":[]}"#).unwrap();
        assert!(comments.is_empty());
    }

    #[test]
    fn parse_with_code_fences() {
        let fenced = "```json\n{\"comments\":[]}\n```";
        let comments = parse_review_response(fenced).unwrap();
        assert!(comments.is_empty());
    }

    #[test]
    fn parse_malformed_returns_empty() {
        let comments = parse_review_response("this is not json at all").unwrap();
        assert!(comments.is_empty());
    }

    #[test]
    fn parse_skips_invalid_entries() {
        let json = r#"{
            "comments": [
                {"path": "a.py", "line": 0, "body": "zero line"},
                {"path": "b.py", "body": "no line"},
                {"path": "", "line": 3, "body": "empty path"},
                {"path": "c.py", "line": 4, "body": "  "},
                {"path": "d.py", "line": 5, "body": "valid"}
            ]
        }"#;
        let comments = parse_review_response(json).unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].path, "d.py");
        assert_eq!(comments[0].line, 5);
    }

    #[test]
    fn parse_rejects_non_numeric_line() {
        let json = r#"{"comments":[{"path":"a.py","line":"forty-two","body":"x"}]}"#;
        let comments = parse_review_response(json).unwrap();
        assert!(comments.is_empty());
    }
}
