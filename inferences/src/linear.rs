use std::fs::read_to_string;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{InferenceError, Result};
use crate::inference::{sigmoid, Classifier};
use crate::types::{FeatureVector, Label, ModelInfo, FEATURE_COUNT};

/// Logistic model stored as JSON: `sigmoid(w·x + b) >= 0.5` selects `classes[1]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub model_name: String,
    pub weights: Vec<f32>,
    pub bias: f32,
    pub classes: [Label; 2],
}

#[derive(Debug, Clone)]
pub struct LinearClassifier {
    model: LinearModel,
    source: String,
}

impl LinearClassifier {
    pub fn new(model: LinearModel, source: impl Into<String>) -> Result<Self> {
        if model.weights.len() != FEATURE_COUNT {
            return Err(InferenceError::Shape {
                expected: model.weights.len(),
                actual: FEATURE_COUNT,
            });
        }
        Ok(Self {
            model,
            source: source.into(),
        })
    }

    pub fn load<P: AsRef<Path>>(model_path: P) -> Result<Self> {
        let path = model_path.as_ref();
        info!("Loading linear model from {}", path.display());

        let load_err = |source: anyhow::Error| InferenceError::Load {
            path: path.to_path_buf(),
            source,
        };
        let text = read_to_string(path).map_err(|e| load_err(e.into()))?;
        let model: LinearModel = serde_json::from_str(&text).map_err(|e| load_err(e.into()))?;

        Self::new(model, path.display().to_string()).map_err(|e| load_err(e.into()))
    }

    pub fn probability(&self, features: &FeatureVector) -> f32 {
        let score = self
            .model
            .weights
            .iter()
            .zip(features.iter())
            .map(|(w, x)| w * x)
            .sum::<f32>();
        sigmoid(score + self.model.bias)
    }
}

impl Classifier for LinearClassifier {
    fn classify(&self, features: &FeatureVector) -> Result<Label> {
        let positive = self.probability(features) >= 0.5;
        Ok(self.model.classes[positive as usize].clone())
    }

    fn classes(&self) -> &[Label] {
        &self.model.classes
    }

    fn describe(&self) -> ModelInfo {
        ModelInfo::new(
            &format!("linear:{}", self.model.model_name),
            &self.source,
            &self.model.classes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn model(weights: Vec<f32>, bias: f32) -> LinearModel {
        LinearModel {
            model_name: "tsh".to_string(),
            weights,
            bias,
            classes: [Label::from("N"), Label::from("P")],
        }
    }

    #[test]
    fn tsh_weight_drives_the_label() {
        let mut weights = vec![0.0; FEATURE_COUNT];
        weights[1] = 1.0;
        let classifier = LinearClassifier::new(model(weights, -10.0), "inline").unwrap();

        let mut features = [0.0; FEATURE_COUNT];
        features[1] = 2.0;
        assert_eq!(classifier.classify(&features).unwrap(), Label::from("N"));

        features[1] = 40.0;
        assert_eq!(classifier.classify(&features).unwrap(), Label::from("P"));
    }

    #[test]
    fn zero_model_sits_on_the_boundary() {
        let classifier =
            LinearClassifier::new(model(vec![0.0; FEATURE_COUNT], 0.0), "inline").unwrap();
        assert_relative_eq!(classifier.probability(&[1.0; FEATURE_COUNT]), 0.5);
        assert_eq!(
            classifier.classify(&[1.0; FEATURE_COUNT]).unwrap(),
            Label::from("P")
        );
    }

    #[test]
    fn weight_count_must_match_features() {
        let err = LinearClassifier::new(model(vec![0.1; 7], 0.0), "inline").unwrap_err();
        assert!(matches!(
            err,
            InferenceError::Shape {
                expected: 7,
                actual: FEATURE_COUNT
            }
        ));
    }
}
