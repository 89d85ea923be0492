//! Classifier Loading and Prediction

use crate::artifact::find_latest_artifact;
use crate::model::Ensemble;
use crate::InferenceError;
use feature_engine::EngineeredRecord;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::info;

/// The loaded offer-response classifier.
///
/// Loaded once per process and read-only afterwards; prediction touches no
/// internal mutable state, so the classifier is safely shared across calls.
pub struct Classifier {
    ensemble: Ensemble,
    artifact_path: PathBuf,
}

impl Classifier {
    /// Load the most recent artifact matching `<prefix>*.json` in `dir`
    pub fn load_latest(dir: &Path, prefix: &str) -> Result<Self, InferenceError> {
        let path = find_latest_artifact(dir, prefix)?;
        Self::load(&path)
    }

    /// Load a specific artifact file
    pub fn load(path: &Path) -> Result<Self, InferenceError> {
        let file = File::open(path).map_err(|e| InferenceError::ArtifactLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let ensemble: Ensemble =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| {
                InferenceError::ArtifactLoad {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
            })?;

        if ensemble.trees.is_empty() {
            return Err(InferenceError::EmptyEnsemble);
        }

        info!(
            artifact = %path.display(),
            model = %ensemble.name,
            trees = ensemble.trees.len(),
            "Loaded classifier"
        );

        Ok(Self {
            ensemble,
            artifact_path: path.to_path_buf(),
        })
    }

    /// Predict a 0/1 label for each engineered record.
    ///
    /// The output is the same length and order as the input. Each label is
    /// the majority vote of the ensemble's trees; ties go to 0 (reject).
    pub fn predict(&self, records: &[EngineeredRecord]) -> Result<Vec<u8>, InferenceError> {
        records.iter().map(|r| self.predict_one(r)).collect()
    }

    fn predict_one(&self, record: &EngineeredRecord) -> Result<u8, InferenceError> {
        let mut votes = 0usize;
        for (tree_idx, tree) in self.ensemble.trees.iter().enumerate() {
            votes += tree.classify(record, tree_idx)? as usize;
        }
        Ok(u8::from(votes * 2 > self.ensemble.trees.len()))
    }

    /// Path of the loaded artifact
    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }

    /// Model name carried in the artifact
    pub fn model_name(&self) -> &str {
        &self.ensemble.name
    }

    /// Number of trees voting
    pub fn tree_count(&self) -> usize {
        self.ensemble.trees.len()
    }
}
