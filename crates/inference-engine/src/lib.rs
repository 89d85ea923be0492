//! Offer-Response Inference Engine
//!
//! Loads the latest serialized classifier artifact and predicts binary
//! accept/reject labels over engineered feature records.

mod artifact;
mod engine;
mod model;

pub use artifact::find_latest_artifact;
pub use engine::Classifier;
pub use model::{Ensemble, Node, Tree};

use std::path::PathBuf;
use thiserror::Error;

/// Errors during artifact loading and inference
#[derive(Debug, Error)]
pub enum InferenceError {
    /// No artifact matches the configured prefix in the configured directory
    #[error("no classifier artifact starting with '{prefix}' found in {}", .dir.display())]
    ArtifactMissing { prefix: String, dir: PathBuf },

    /// The artifact directory could not be listed
    #[error("cannot read artifact directory {}: {message}", .dir.display())]
    ArtifactDirUnreadable { dir: PathBuf, message: String },

    /// The selected artifact could not be read or deserialized
    #[error("failed to load artifact {}: {message}", .path.display())]
    ArtifactLoad { path: PathBuf, message: String },

    /// The artifact deserialized but carries no trees
    #[error("artifact contains no trees")]
    EmptyEnsemble,

    /// A tree node references an index outside the node arena
    #[error("tree {tree} references node {node} which does not exist")]
    DanglingNode { tree: usize, node: usize },

    /// A split names a feature the pipeline does not produce
    #[error("'{0}' is not a feature the pipeline produces")]
    UnknownFeature(String),

    /// A split's kind does not match the feature's kind
    #[error("feature '{feature}' is {actual} but the split expects {expected}")]
    WrongFeatureKind {
        feature: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A tree walk did not terminate in a leaf
    #[error("tree {tree} did not reach a leaf")]
    MalformedTree { tree: usize },
}
