use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::event::{ActionEvent, ActionLogDocument};

/// Failure categories for action-log loading. Callers are expected to recover
/// from all of these locally (replay proceeds with an empty choice map).
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// Input file does not exist.
    #[error("action log not found: {path}")]
    NotFound { path: PathBuf },

    /// Input file exists but is not a valid action-log document.
    #[error("action log is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Any other read failure.
    #[error("failed to read action log: {0}")]
    Io(io::Error),
}

/// Read and decode the ordered action log at `path`.
pub fn load_action_log(path: &Path) -> Result<Vec<ActionEvent>, LogError> {
    let contents = fs::read_to_string(path).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            LogError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LogError::Io(err)
        }
    })?;

    let document: ActionLogDocument = serde_json::from_str(&contents)?;
    Ok(document.action_log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_ordered_entries() {
        let file = write_fixture(
            r#"{"action_log": [
                {"Action_type": "select_customization_option", "Parameter": "Hair", "New_Value": "a"},
                {"Action_type": "select_customization_option", "Parameter": "Top", "New_Value": "b"}
            ]}"#,
        );

        let events = load_action_log(file.path()).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].parameter, "Hair");
        assert_eq!(events[1].parameter, "Top");
    }

    #[test]
    fn missing_file_is_categorized_not_found() {
        let err = load_action_log(Path::new("/nonexistent/events.json")).unwrap_err();
        assert!(matches!(err, LogError::NotFound { .. }));
    }

    #[test]
    fn invalid_json_is_categorized_parse() {
        let file = write_fixture("{not json");
        let err = load_action_log(file.path()).unwrap_err();
        assert!(matches!(err, LogError::Parse(_)));
    }

    #[test]
    fn document_without_log_field_yields_empty_vec() {
        let file = write_fixture(r#"{"session": "abc"}"#);
        let events = load_action_log(file.path()).unwrap();
        assert!(events.is_empty());
    }
}
