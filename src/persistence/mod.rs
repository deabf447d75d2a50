//! Output file persistence
//!
//! Writes the raw dump and backup documents as pretty-printed JSON. The
//! two artifacts use different indent widths (the raw dump mirrors the
//! upstream tooling's 2-space output, the backup uses the reader's
//! 4-space convention), so the width is a parameter here.

use crate::domain::{Result, SubvaultError};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Serializer;
use std::fs;
use std::path::Path;

/// Write a value as pretty-printed JSON with the given indent width.
///
/// Parent directories are created if missing. Non-ASCII strings are
/// written as-is, not escaped.
///
/// # Errors
///
/// Returns [`SubvaultError::Persistence`] with the offending path when
/// the directory or file cannot be written, or
/// [`SubvaultError::Serialization`] when the value fails to serialize.
pub fn write_json<T: Serialize>(path: &Path, value: &T, indent_width: usize) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                SubvaultError::Persistence(format!(
                    "Failed to create directory '{}': {e}",
                    parent.display()
                ))
            })?;
        }
    }

    let indent = " ".repeat(indent_width);
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);

    value
        .serialize(&mut serializer)
        .map_err(|e| SubvaultError::Serialization(e.to_string()))?;
    buffer.push(b'\n');

    fs::write(path, buffer).map_err(|e| {
        SubvaultError::Persistence(format!("Failed to write '{}': {e}", path.display()))
    })?;

    tracing::debug!(path = %path.display(), "Wrote JSON output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_writes_with_two_space_indent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("raw.json");

        write_json(&path, &json!([{"id": 1}]), 2).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("  \"id\": 1"));
        assert!(contents.ends_with('\n'));
    }

    #[test]
    fn test_writes_with_four_space_indent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("backup.json");

        write_json(&path, &json!({"backupManga": []}), 4).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("    \"backupManga\""));
    }

    #[test]
    fn test_preserves_non_ascii() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cjk.json");

        write_json(&path, &json!({"name": "一拳超人"}), 2).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("一拳超人"));
        assert!(!contents.contains("\\u"));
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/out.json");

        write_json(&path, &json!({}), 2).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_unwritable_path_reports_persistence_error() {
        let dir = TempDir::new().unwrap();
        // The directory itself is not a writable file target
        let err = write_json(dir.path(), &json!({}), 2).unwrap_err();

        match err {
            SubvaultError::Persistence(message) => {
                assert!(message.contains("Failed to write"));
            }
            other => panic!("expected Persistence, got {other:?}"),
        }
    }

    #[test]
    fn test_output_parses_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("round.json");
        let value = json!({"a": [1, 2, 3], "b": {"c": "连载中"}});

        write_json(&path, &value, 4).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, value);
    }
}
