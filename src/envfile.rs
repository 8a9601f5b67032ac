//! Dotenv-style credential persistence.
//!
//! The store is a line-oriented `KEY=VALUE` file. Upserts rewrite the target
//! key in place (or append it), leaving every other line untouched and in
//! its original position. Writes go through a temp file and rename, so a
//! reader never observes a partially written store.
//!
//! Single-writer assumption: concurrent external writers are not guarded
//! against.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvFileError {
    #[error("Failed to read {path}: {source}")]
    Read { path: String, source: io::Error },

    #[error("Failed to write {path}: {source}")]
    Write { path: String, source: io::Error },
}

/// Insert or update `key` in the file at `path`.
///
/// Existing keys keep their relative order. Comment and blank lines are
/// preserved verbatim. The file is created if it does not exist.
pub fn upsert(path: &Path, key: &str, value: &str) -> Result<(), EnvFileError> {
    let existing = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(e) => {
            return Err(EnvFileError::Read {
                path: path.display().to_string(),
                source: e,
            })
        }
    };

    let mut lines: Vec<String> = Vec::new();
    let mut replaced = false;
    for line in existing.lines() {
        if !replaced && line_key(line) == Some(key) {
            lines.push(format!("{}={}", key, value));
            replaced = true;
        } else {
            lines.push(line.to_string());
        }
    }
    if !replaced {
        lines.push(format!("{}={}", key, value));
    }

    let mut contents = lines.join("\n");
    contents.push('\n');

    write_atomic(path, &contents)
}

/// Read the value stored under `key`, if any.
pub fn get(path: &Path, key: &str) -> Result<Option<String>, EnvFileError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(EnvFileError::Read {
                path: path.display().to_string(),
                source: e,
            })
        }
    };

    for line in contents.lines() {
        if line_key(line) == Some(key) {
            let value = line
                .split_once('=')
                .map(|(_, v)| v.trim().to_string())
                .unwrap_or_default();
            return Ok(Some(value));
        }
    }

    Ok(None)
}

/// Extract the key of a `KEY=VALUE` line. Comments and blanks yield `None`.
fn line_key(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    trimmed.split_once('=').map(|(k, _)| k.trim_end())
}

fn write_atomic(path: &Path, contents: &str) -> Result<(), EnvFileError> {
    let tmp_path = tmp_sibling(path);

    std::fs::write(&tmp_path, contents).map_err(|e| EnvFileError::Write {
        path: tmp_path.display().to_string(),
        source: e,
    })?;

    std::fs::rename(&tmp_path, path).map_err(|e| EnvFileError::Write {
        path: path.display().to_string(),
        source: e,
    })
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join(".env")
    }

    #[test]
    fn upsert_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_path(&dir);

        upsert(&path, "CARBON_VOICE_API_KEY", "abc123").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "CARBON_VOICE_API_KEY=abc123\n");
    }

    #[test]
    fn upsert_overwrites_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_path(&dir);
        std::fs::write(&path, "A=1\nCARBON_VOICE_API_KEY=old\nB=2\n").unwrap();

        upsert(&path, "CARBON_VOICE_API_KEY", "new").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "A=1\nCARBON_VOICE_API_KEY=new\nB=2\n");
    }

    #[test]
    fn upsert_twice_leaves_one_record_with_second_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_path(&dir);
        std::fs::write(&path, "A=1\n").unwrap();

        upsert(&path, "TOKEN", "first").unwrap();
        upsert(&path, "TOKEN", "second").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let records: Vec<&str> = contents
            .lines()
            .filter(|l| l.starts_with("TOKEN="))
            .collect();
        assert_eq!(records, ["TOKEN=second"]);
        assert!(contents.starts_with("A=1\n"));
    }

    #[test]
    fn upsert_preserves_comments_and_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_path(&dir);
        std::fs::write(&path, "# credentials\n\nA=1\n").unwrap();

        upsert(&path, "B", "2").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "# credentials\n\nA=1\nB=2\n");
    }

    #[test]
    fn upsert_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_path(&dir);

        upsert(&path, "A", "1").unwrap();

        assert!(!tmp_sibling(&path).exists());
    }

    #[test]
    fn get_reads_back_upserted_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_path(&dir);

        assert_eq!(get(&path, "A").unwrap(), None);
        upsert(&path, "A", "1").unwrap();
        assert_eq!(get(&path, "A").unwrap(), Some("1".to_string()));
    }
}
