//! Trained model artifacts: random-forest regressor, feature scaler and
//! categorical label encoders
//!
//! All artifacts are plain serde types so the backend can load them from JSON
//! files. Every artifact has a `validate` step; a bundle is only constructed
//! from artifacts that are individually valid and agree on the feature width.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::features::{preprocess_input, CategoryEncoders, FeatureVector, FEATURE_COUNT};
use crate::models::{clamp_and_round, WeatherObservation};

/// Structural problems found while validating an artifact
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArtifactError {
    #[error("regressor has no trees")]
    NoTrees,

    #[error("tree {tree} has no nodes")]
    EmptyTree { tree: usize },

    #[error("tree {tree} node {node} splits on feature {feature}, width is {width}")]
    FeatureOutOfRange {
        tree: usize,
        node: usize,
        feature: usize,
        width: usize,
    },

    #[error("tree {tree} node {node} has invalid child index {child}")]
    InvalidChild { tree: usize, node: usize, child: usize },

    #[error("{artifact} expects {found} features, pipeline produces {expected}")]
    WidthMismatch {
        artifact: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("label encoder has no classes")]
    EmptyEncoder,

    #[error("label encoder classes must be sorted and unique")]
    UnsortedEncoder,
}

/// A node of a fitted regression tree, stored in pre-order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    fn validate(&self, tree: usize, width: usize) -> Result<(), ArtifactError> {
        if self.nodes.is_empty() {
            return Err(ArtifactError::EmptyTree { tree });
        }
        for (node, entry) in self.nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                left,
                right,
                ..
            } = *entry
            {
                if feature >= width {
                    return Err(ArtifactError::FeatureOutOfRange {
                        tree,
                        node,
                        feature,
                        width,
                    });
                }
                // Children always follow their parent, which rules out cycles.
                for child in [left, right] {
                    if child <= node || child >= self.nodes.len() {
                        return Err(ArtifactError::InvalidChild { tree, node, child });
                    }
                }
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf. Only call on a validated tree.
    fn predict(&self, features: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                TreeNode::Leaf { value } => return value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features[feature] <= threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

/// Averaging ensemble of regression trees
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForestRegressor {
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
}

impl ForestRegressor {
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.n_features != FEATURE_COUNT {
            return Err(ArtifactError::WidthMismatch {
                artifact: "regressor",
                expected: FEATURE_COUNT,
                found: self.n_features,
            });
        }
        if self.trees.is_empty() {
            return Err(ArtifactError::NoTrees);
        }
        self.trees
            .iter()
            .enumerate()
            .try_for_each(|(i, tree)| tree.validate(i, self.n_features))
    }

    pub fn predict(&self, features: &[f64]) -> f64 {
        let total: f64 = self.trees.iter().map(|t| t.predict(features)).sum();
        total / self.trees.len() as f64
    }
}

/// Per-feature standardisation, `(x - mean) / scale`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn validate(&self) -> Result<(), ArtifactError> {
        let widths = [
            ("scaler mean", self.mean.len()),
            ("scaler scale", self.scale.len()),
        ];
        for (artifact, found) in widths {
            if found != FEATURE_COUNT {
                return Err(ArtifactError::WidthMismatch {
                    artifact,
                    expected: FEATURE_COUNT,
                    found,
                });
            }
        }
        Ok(())
    }

    pub fn transform(&self, features: &FeatureVector) -> FeatureVector {
        let mut scaled = *features;
        for (i, value) in scaled.iter_mut().enumerate() {
            let scale = if self.scale[i] == 0.0 { 1.0 } else { self.scale[i] };
            *value = (*value - self.mean[i]) / scale;
        }
        scaled
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("label not seen during training: {0}")]
pub struct UnseenLabel(pub String);

/// Maps category labels to their index in a sorted class list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    /// Build an encoder from arbitrary labels (lowercased, sorted, deduplicated)
    pub fn fit<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut classes: Vec<String> = labels
            .into_iter()
            .map(|l| l.as_ref().to_lowercase())
            .collect();
        classes.sort();
        classes.dedup();
        Self { classes }
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.classes.is_empty() {
            return Err(ArtifactError::EmptyEncoder);
        }
        if self.classes.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ArtifactError::UnsortedEncoder);
        }
        Ok(())
    }

    /// Encode a label; matching is case-insensitive
    pub fn transform(&self, label: &str) -> Result<usize, UnseenLabel> {
        let lower = label.to_lowercase();
        self.classes
            .binary_search(&lower)
            .map_err(|_| UnseenLabel(label.to_string()))
    }
}

/// A fully loaded, mutually consistent set of model artifacts
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedModel {
    pub regressor: ForestRegressor,
    pub scaler: StandardScaler,
    pub location_encoder: LabelEncoder,
    pub season_encoder: LabelEncoder,
}

impl LoadedModel {
    pub fn new(
        regressor: ForestRegressor,
        scaler: StandardScaler,
        location_encoder: LabelEncoder,
        season_encoder: LabelEncoder,
    ) -> Result<Self, ArtifactError> {
        regressor.validate()?;
        scaler.validate()?;
        location_encoder.validate()?;
        season_encoder.validate()?;
        Ok(Self {
            regressor,
            scaler,
            location_encoder,
            season_encoder,
        })
    }

    pub fn encoders(&self) -> CategoryEncoders<'_> {
        CategoryEncoders {
            location: &self.location_encoder,
            season: &self.season_encoder,
        }
    }

    /// Regression estimate in mm, clamped and rounded like the rule-based path
    pub fn estimate(&self, observation: &WeatherObservation) -> f64 {
        let features = preprocess_input(observation, Some(self.encoders()));
        let scaled = self.scaler.transform(&features);
        clamp_and_round(self.regressor.predict(&scaled))
    }
}

/// The optional ML path: either every artifact is present or none is used
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ModelBundle {
    Loaded(Box<LoadedModel>),
    #[default]
    Unavailable,
}

impl ModelBundle {
    pub fn is_available(&self) -> bool {
        matches!(self, ModelBundle::Loaded(_))
    }

    pub fn encoders(&self) -> Option<CategoryEncoders<'_>> {
        match self {
            ModelBundle::Loaded(model) => Some(model.encoders()),
            ModelBundle::Unavailable => None,
        }
    }

    /// Feature vector using the trained encoders when loaded, fallbacks otherwise
    pub fn preprocess(&self, observation: &WeatherObservation) -> FeatureVector {
        preprocess_input(observation, self.encoders())
    }

    pub fn estimate(&self, observation: &WeatherObservation) -> Option<f64> {
        match self {
            ModelBundle::Loaded(model) => Some(model.estimate(observation)),
            ModelBundle::Unavailable => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Season;
    use chrono::NaiveDate;

    fn leaf(value: f64) -> TreeNode {
        TreeNode::Leaf { value }
    }

    fn humidity_stump(threshold: f64, low: f64, high: f64) -> DecisionTree {
        DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 1,
                    threshold,
                    left: 1,
                    right: 2,
                },
                leaf(low),
                leaf(high),
            ],
        }
    }

    fn identity_scaler() -> StandardScaler {
        StandardScaler {
            mean: vec![0.0; FEATURE_COUNT],
            scale: vec![1.0; FEATURE_COUNT],
        }
    }

    fn observation(location: &str, season: &str, humidity: f64) -> WeatherObservation {
        WeatherObservation {
            location: location.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            temperature: 20.0,
            humidity,
            pressure: 1010.0,
            wind_speed: 10.0,
            cloud_cover: 50.0,
            season: season.to_string(),
            time_of_day: "morning".to_string(),
        }
    }

    fn loaded(trees: Vec<DecisionTree>) -> LoadedModel {
        LoadedModel::new(
            ForestRegressor {
                n_features: FEATURE_COUNT,
                trees,
            },
            identity_scaler(),
            LabelEncoder::fit(["London", "New York", "Tokyo", "Sydney"]),
            LabelEncoder::fit(Season::ALL.iter().map(|s| s.as_str())),
        )
        .unwrap()
    }

    #[test]
    fn test_forest_averages_trees() {
        let model = loaded(vec![
            humidity_stump(60.0, 1.0, 10.0),
            humidity_stump(80.0, 2.0, 20.0),
        ]);
        assert_eq!(model.estimate(&observation("London", "summer", 70.0)), 6.0);
        assert_eq!(model.estimate(&observation("London", "summer", 90.0)), 15.0);
        assert_eq!(model.estimate(&observation("London", "summer", 50.0)), 1.5);
    }

    #[test]
    fn test_estimate_is_clamped() {
        let model = loaded(vec![DecisionTree {
            nodes: vec![leaf(-4.0)],
        }]);
        assert_eq!(model.estimate(&observation("London", "summer", 70.0)), 0.0);
    }

    #[test]
    fn test_scaler_transform_treats_zero_scale_as_one() {
        let mut scaler = identity_scaler();
        scaler.mean[0] = 10.0;
        scaler.scale[0] = 2.0;
        scaler.mean[1] = 5.0;
        scaler.scale[1] = 0.0;
        let mut features = [0.0; FEATURE_COUNT];
        features[0] = 20.0;
        features[1] = 8.0;
        let scaled = scaler.transform(&features);
        assert_eq!(scaled[0], 5.0);
        assert_eq!(scaled[1], 3.0);
    }

    #[test]
    fn test_label_encoder_sorted_codes() {
        let encoder = LabelEncoder::fit(["tokyo", "London", "sydney", "new york", "london"]);
        assert_eq!(encoder.classes, vec!["london", "new york", "sydney", "tokyo"]);
        assert_eq!(encoder.transform("LONDON"), Ok(0));
        assert_eq!(encoder.transform("tokyo"), Ok(3));
        assert!(encoder.transform("paris").is_err());
    }

    #[test]
    fn test_label_encoder_rejects_unsorted_classes() {
        let encoder = LabelEncoder {
            classes: vec!["b".to_string(), "a".to_string()],
        };
        assert_eq!(encoder.validate(), Err(ArtifactError::UnsortedEncoder));
        let empty = LabelEncoder { classes: vec![] };
        assert_eq!(empty.validate(), Err(ArtifactError::EmptyEncoder));
    }

    #[test]
    fn test_regressor_validation() {
        let wrong_width = ForestRegressor {
            n_features: 7,
            trees: vec![humidity_stump(50.0, 0.0, 1.0)],
        };
        assert!(matches!(
            wrong_width.validate(),
            Err(ArtifactError::WidthMismatch { .. })
        ));

        let no_trees = ForestRegressor {
            n_features: FEATURE_COUNT,
            trees: vec![],
        };
        assert_eq!(no_trees.validate(), Err(ArtifactError::NoTrees));

        let cyclic = ForestRegressor {
            n_features: FEATURE_COUNT,
            trees: vec![DecisionTree {
                nodes: vec![TreeNode::Split {
                    feature: 0,
                    threshold: 1.0,
                    left: 0,
                    right: 0,
                }],
            }],
        };
        assert!(matches!(
            cyclic.validate(),
            Err(ArtifactError::InvalidChild { .. })
        ));

        let bad_feature = ForestRegressor {
            n_features: FEATURE_COUNT,
            trees: vec![DecisionTree {
                nodes: vec![
                    TreeNode::Split {
                        feature: 12,
                        threshold: 1.0,
                        left: 1,
                        right: 2,
                    },
                    leaf(0.0),
                    leaf(1.0),
                ],
            }],
        };
        assert!(matches!(
            bad_feature.validate(),
            Err(ArtifactError::FeatureOutOfRange { feature: 12, .. })
        ));
    }

    #[test]
    fn test_tree_node_json_shape() {
        let json = r#"{"nodes":[
            {"kind":"split","feature":4,"threshold":60.0,"left":1,"right":2},
            {"kind":"leaf","value":0.5},
            {"kind":"leaf","value":7.25}
        ]}"#;
        let tree: DecisionTree = serde_json::from_str(json).unwrap();
        assert_eq!(tree.nodes.len(), 3);
        assert!(tree.validate(0, FEATURE_COUNT).is_ok());
    }

    #[test]
    fn test_unavailable_bundle() {
        let bundle = ModelBundle::Unavailable;
        assert!(!bundle.is_available());
        assert!(bundle.encoders().is_none());
        assert_eq!(bundle.estimate(&observation("London", "summer", 70.0)), None);
    }

    #[test]
    fn test_loaded_bundle_uses_trained_encoders() {
        let bundle = ModelBundle::Loaded(Box::new(loaded(vec![humidity_stump(
            60.0, 1.0, 10.0,
        )])));
        assert!(bundle.is_available());
        let features = bundle.preprocess(&observation("Tokyo", "winter", 70.0));
        // classes: london, new york, sydney, tokyo
        assert_eq!(features[7], 3.0);
        // classes: autumn, monsoon, post-monsoon, pre-monsoon, spring, summer, winter
        assert_eq!(features[8], 6.0);
    }
}
