use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of positional features the classifier consumes.
pub const FEATURE_COUNT: usize = 20;

/// Training-time feature order. The classifier reads features by position,
/// so every producer of a [`FeatureVector`] must follow this order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "TSH",
    "FTI",
    "TT4",
    "T3",
    "TSH_measured",
    "on_thyroxine",
    "T3_measured",
    "sick",
    "T4U",
    "TT4_measured",
    "on_antithyroid_medication",
    "goitre",
    "thyroid_surgery",
    "query_hypothyroid",
    "pregnant",
    "lithium",
    "psych",
    "T4U_measured",
    "hypopituitary",
];

pub type FeatureVector = [f32; FEATURE_COUNT];

/// Categorical output of a classifier, e.g. `"N"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    pub fn new(label: impl Into<String>) -> Self {
        Label(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Label {
    fn from(label: &str) -> Self {
        Label::new(label)
    }
}

impl From<String> for Label {
    fn from(label: String) -> Self {
        Label::new(label)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub kind: String,
    pub source: String,
    pub input_shape: Vec<usize>,
    pub features: Vec<String>,
    pub classes: Vec<String>,
}

impl ModelInfo {
    pub(crate) fn new(kind: &str, source: &str, classes: &[Label]) -> Self {
        ModelInfo {
            kind: kind.to_string(),
            source: source.to_string(),
            input_shape: vec![1, FEATURE_COUNT],
            features: FEATURE_NAMES.iter().map(|name| name.to_string()).collect(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
        }
    }
}
