use crate::error::Result;
use crate::types::AgentRunResult;
use std::io::Write;
use std::path::Path;

/// Step outputs published for later workflow steps, in write order.
pub fn output_lines(result: &AgentRunResult) -> [(&'static str, &str); 3] {
    [
        ("agent_id", result.id.as_str()),
        ("agent_url", result.web_url.as_str()),
        ("agent_status", result.status.as_str()),
    ]
}

/// Append `key=value` step outputs to the CI output file, creating it if
/// it doesn't exist. Existing content is preserved.
pub fn append_outputs(path: &Path, result: &AgentRunResult) -> Result<()> {
    let mut text = String::new();
    for (key, value) in output_lines(result) {
        text.push_str(key);
        text.push('=');
        text.push_str(value);
        text.push('\n');
    }

    let mut f = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    f.write_all(text.as_bytes())?;
    tracing::debug!(path = %path.display(), "wrote step outputs");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn result() -> AgentRunResult {
        AgentRunResult {
            id: "a1".into(),
            status: "running".into(),
            web_url: "https://x/a1".into(),
        }
    }

    #[test]
    fn writes_three_lines_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("github_output");
        append_outputs(&path, &result()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "agent_id=a1\nagent_url=https://x/a1\nagent_status=running\n"
        );
    }

    #[test]
    fn appends_to_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("github_output");
        std::fs::write(&path, "earlier=step\n").unwrap();
        append_outputs(&path, &result()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("earlier=step\nagent_id=a1\n"));
        assert_eq!(content.lines().count(), 4);
    }

    #[test]
    fn empty_fields_write_empty_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("github_output");
        append_outputs(&path, &AgentRunResult::default()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "agent_id=\nagent_url=\nagent_status=\n");
    }

    #[test]
    fn missing_parent_dir_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope/github_output");
        let err = append_outputs(&path, &result()).unwrap_err();
        assert!(matches!(err, crate::DispatchError::Io(_)));
    }
}
