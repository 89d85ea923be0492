//! Classifier Artifact Discovery

use crate::InferenceError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Artifact file extension
const ARTIFACT_EXTENSION: &str = ".json";

/// Locate the most recent artifact in `dir` matching `<prefix>*.json`.
///
/// "Most recent" is the lexicographically last filename, not the newest
/// modification time; artifacts are expected to carry a sortable suffix
/// (e.g. a date stamp).
pub fn find_latest_artifact(dir: &Path, prefix: &str) -> Result<PathBuf, InferenceError> {
    let entries = fs::read_dir(dir).map_err(|e| InferenceError::ArtifactDirUnreadable {
        dir: dir.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut names: Vec<String> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| InferenceError::ArtifactDirUnreadable {
            dir: dir.to_path_buf(),
            message: e.to_string(),
        })?;
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with(prefix) && name.ends_with(ARTIFACT_EXTENSION) {
            names.push(name);
        }
    }

    names.sort();
    debug!(candidates = names.len(), "Scanned artifact directory");

    match names.pop() {
        Some(name) => Ok(dir.join(name)),
        None => Err(InferenceError::ArtifactMissing {
            prefix: prefix.to_string(),
            dir: dir.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn touch(dir: &Path, name: &str) {
        let mut file = File::create(dir.join(name)).unwrap();
        file.write_all(b"{}").unwrap();
    }

    #[test]
    fn test_picks_lexicographically_last_not_newest() {
        let dir = tempfile::tempdir().unwrap();
        // Created later, so newer by mtime, but lexicographically earlier
        touch(dir.path(), "model_2015-01-01.json");
        touch(dir.path(), "model_2014-06-30.json");

        let path = find_latest_artifact(dir.path(), "model_").unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "model_2015-01-01.json"
        );
    }

    #[test]
    fn test_ignores_other_prefixes_and_extensions() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "model_a.json");
        touch(dir.path(), "other_z.json");
        touch(dir.path(), "model_z.pkl");

        let path = find_latest_artifact(dir.path(), "model_").unwrap();
        assert_eq!(path.file_name().unwrap().to_str().unwrap(), "model_a.json");
    }

    #[test]
    fn test_missing_artifact_names_prefix_and_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = find_latest_artifact(dir.path(), "model_").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("model_"));
        assert!(message.contains(dir.path().to_str().unwrap()));
    }
}
