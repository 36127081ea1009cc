use std::path::PathBuf;

/// Concatenate the configured coding-standard documents into one text block.
///
/// Unreadable or empty files are skipped with a logged warning; an empty
/// result is allowed and simply leaves the reviewer without project-specific
/// standards.
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use glint_review::standards::load_standards;
///
/// let text = load_standards(&[PathBuf::from("clean_code_standards.md")]);
/// ```
pub fn load_standards(paths: &[PathBuf]) -> String {
    let mut sections: Vec<String> = Vec::new();
    for path in paths {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let trimmed = content.trim();
                if !trimmed.is_empty() {
                    sections.push(trimmed.to_string());
                }
            }
            Err(e) => {
                tracing::warn!("skipping standards file {}: {e}", path.display());
            }
        }
    }
    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_readable_files_with_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.md");
        let b = dir.path().join("b.md");
        std::fs::write(&a, "# Naming\nUse snake_case.\n").unwrap();
        std::fs::write(&b, "# Errors\nNo bare except.\n").unwrap();

        let text = load_standards(&[a, b]);
        assert!(text.contains("snake_case"));
        assert!(text.contains("bare except"));
        assert!(text.contains("\n\n"));
    }

    #[test]
    fn skips_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("present.md");
        std::fs::write(&present, "rule").unwrap();
        let missing = dir.path().join("missing.md");

        let text = load_standards(&[missing, present]);
        assert_eq!(text, "rule");
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert_eq!(load_standards(&[]), "");
    }

    #[test]
    fn whitespace_only_file_contributes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let blank = dir.path().join("blank.md");
        std::fs::write(&blank, "   \n\n").unwrap();
        assert_eq!(load_standards(&[blank]), "");
    }
}
