//! Decision-Tree Ensemble Model

use crate::InferenceError;
use feature_engine::{EngineeredRecord, FeatureValue};
use serde::{Deserialize, Serialize};

/// A serialized classifier: a voting ensemble of decision trees.
///
/// The format is an implementation detail of the opaque predictor; consumers
/// only see 0/1 labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ensemble {
    /// Human-readable model name carried in the artifact
    pub name: String,
    /// The voting trees
    pub trees: Vec<Tree>,
}

/// One decision tree as a node arena; node 0 is the root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

/// A tree node
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// Continuous split: `value < threshold` goes left, otherwise right
    NumericSplit {
        feature: String,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Categorical split: `value == category` goes left, otherwise right
    CategorySplit {
        feature: String,
        category: String,
        left: usize,
        right: usize,
    },
    /// Terminal label: 0 = reject offer, 1 = accept offer
    Leaf { label: u8 },
}

impl Tree {
    /// Walk the tree for one record, returning the leaf label.
    ///
    /// `tree` is this tree's index in the ensemble, used for error
    /// reporting.
    pub fn classify(&self, record: &EngineeredRecord, tree: usize) -> Result<u8, InferenceError> {
        let mut node_idx = 0;
        // A well-formed tree visits each node at most once
        for _ in 0..=self.nodes.len() {
            let node = self
                .nodes
                .get(node_idx)
                .ok_or(InferenceError::DanglingNode {
                    tree,
                    node: node_idx,
                })?;

            node_idx = match node {
                Node::Leaf { label } => return Ok(*label),
                Node::NumericSplit {
                    feature,
                    threshold,
                    left,
                    right,
                } => match record.feature(feature) {
                    Some(FeatureValue::Numeric(value)) => {
                        if value < *threshold {
                            *left
                        } else {
                            *right
                        }
                    }
                    Some(FeatureValue::Label(_)) => {
                        return Err(InferenceError::WrongFeatureKind {
                            feature: feature.clone(),
                            expected: "numeric",
                            actual: "categorical",
                        })
                    }
                    None => return Err(InferenceError::UnknownFeature(feature.clone())),
                },
                Node::CategorySplit {
                    feature,
                    category,
                    left,
                    right,
                } => match record.feature(feature) {
                    Some(FeatureValue::Label(label)) => {
                        if label == *category {
                            *left
                        } else {
                            *right
                        }
                    }
                    Some(FeatureValue::Numeric(_)) => {
                        return Err(InferenceError::WrongFeatureKind {
                            feature: feature.clone(),
                            expected: "categorical",
                            actual: "numeric",
                        })
                    }
                    None => return Err(InferenceError::UnknownFeature(feature.clone())),
                },
            };
        }

        Err(InferenceError::MalformedTree { tree })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_engine::{AgeGroup, EducationGroup, MaritalGroup};

    fn sample_engineered() -> EngineeredRecord {
        EngineeredRecord {
            income: 46000.0,
            recency: 10,
            num_deals_purchases: 2,
            num_web_purchases: 4,
            num_catalog_purchases: 1,
            num_store_purchases: 6,
            num_web_visits_month: 5,
            spending: 150,
            children: 1,
            age_group: AgeGroup::From35To44,
            tenure: 1.0,
            marital_status: MaritalGroup::InCouple,
            education: EducationGroup::Postgraduate,
            accepted_cmp1: 0,
            accepted_cmp2: 0,
            accepted_cmp3: 0,
            accepted_cmp4: 0,
            accepted_cmp5: 0,
            complained: 0,
        }
    }

    fn income_tree(threshold: f64) -> Tree {
        Tree {
            nodes: vec![
                Node::NumericSplit {
                    feature: "Income".to_string(),
                    threshold,
                    left: 1,
                    right: 2,
                },
                Node::Leaf { label: 0 },
                Node::Leaf { label: 1 },
            ],
        }
    }

    #[test]
    fn test_numeric_split() {
        let record = sample_engineered();
        assert_eq!(income_tree(50_000.0).classify(&record, 0).unwrap(), 0);
        assert_eq!(income_tree(40_000.0).classify(&record, 0).unwrap(), 1);
    }

    #[test]
    fn test_category_split() {
        let tree = Tree {
            nodes: vec![
                Node::CategorySplit {
                    feature: "Marital_Status".to_string(),
                    category: "In couple".to_string(),
                    left: 1,
                    right: 2,
                },
                Node::Leaf { label: 1 },
                Node::Leaf { label: 0 },
            ],
        };
        assert_eq!(tree.classify(&sample_engineered(), 0).unwrap(), 1);
    }

    #[test]
    fn test_dangling_node_index() {
        let tree = Tree {
            nodes: vec![Node::NumericSplit {
                feature: "Income".to_string(),
                threshold: 0.0,
                left: 7,
                right: 7,
            }],
        };
        assert!(matches!(
            tree.classify(&sample_engineered(), 3),
            Err(InferenceError::DanglingNode { tree: 3, node: 7 })
        ));
    }

    #[test]
    fn test_unknown_feature() {
        let tree = Tree {
            nodes: vec![Node::NumericSplit {
                feature: "ShoeSize".to_string(),
                threshold: 0.0,
                left: 0,
                right: 0,
            }],
        };
        assert!(matches!(
            tree.classify(&sample_engineered(), 0),
            Err(InferenceError::UnknownFeature(_))
        ));
    }

    #[test]
    fn test_wrong_feature_kind() {
        let tree = Tree {
            nodes: vec![Node::NumericSplit {
                feature: "Age_Group".to_string(),
                threshold: 40.0,
                left: 0,
                right: 0,
            }],
        };
        assert!(matches!(
            tree.classify(&sample_engineered(), 0),
            Err(InferenceError::WrongFeatureKind { .. })
        ));
    }

    #[test]
    fn test_cyclic_tree_is_malformed() {
        let tree = Tree {
            nodes: vec![Node::CategorySplit {
                feature: "Education".to_string(),
                category: "Postgraduate".to_string(),
                left: 0,
                right: 0,
            }],
        };
        assert!(matches!(
            tree.classify(&sample_engineered(), 0),
            Err(InferenceError::MalformedTree { tree: 0 })
        ));
    }
}
