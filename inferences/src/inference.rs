use std::path::Path;

use log::{debug, info};
use tract_onnx::prelude::*;

use crate::error::{InferenceError, Result};
use crate::linear::LinearClassifier;
use crate::types::{FeatureVector, Label, ModelInfo, FEATURE_COUNT};

/// A pre-trained model that maps one ordered feature vector to a label.
///
/// Implementations are loaded once and shared read-only between requests.
pub trait Classifier: Send + Sync {
    fn classify(&self, features: &FeatureVector) -> Result<Label>;

    /// Labels the model is known to produce, in class-index order.
    fn classes(&self) -> &[Label];

    fn describe(&self) -> ModelInfo;
}

/// Load a classifier, picking the adapter from the file extension.
///
/// `classes` names the class indices of an ONNX model whose first output is
/// numeric. JSON models carry their own class list and ignore it.
pub fn load_classifier<P: AsRef<Path>>(
    model_path: P,
    classes: Vec<Label>,
) -> Result<Box<dyn Classifier>> {
    let path = model_path.as_ref();
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("onnx") => {
            Ok(Box::new(OnnxClassifier::load(path, classes)?))
        }
        Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Box::new(LinearClassifier::load(path)?)),
        _ => Err(InferenceError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Turns the first output tensor of a model into a label.
#[derive(Debug, Clone)]
pub struct LabelDecoder {
    classes: Vec<Label>,
}

impl LabelDecoder {
    pub fn new(classes: Vec<Label>) -> Self {
        Self { classes }
    }

    pub fn classes(&self) -> &[Label] {
        &self.classes
    }

    pub fn decode(&self, output: &Tensor) -> Result<Label> {
        match output.datum_type() {
            DatumType::String => {
                let labels = output.as_slice::<String>().map_err(InferenceError::Run)?;
                labels
                    .first()
                    .map(|label| Label::new(label.as_str()))
                    .ok_or(InferenceError::EmptyOutput)
            }
            DatumType::I64 => {
                let index = *output
                    .as_slice::<i64>()
                    .map_err(InferenceError::Run)?
                    .first()
                    .ok_or(InferenceError::EmptyOutput)?;
                self.class_at(index)
            }
            DatumType::I32 => {
                let index = *output
                    .as_slice::<i32>()
                    .map_err(InferenceError::Run)?
                    .first()
                    .ok_or(InferenceError::EmptyOutput)?;
                self.class_at(index as i64)
            }
            DatumType::F32 => {
                let scores = output.as_slice::<f32>().map_err(InferenceError::Run)?;
                let index = match scores {
                    [] => return Err(InferenceError::EmptyOutput),
                    // a lone score is the positive-class logit
                    [logit] => (sigmoid(*logit) >= 0.5) as i64,
                    _ => argmax(scores) as i64,
                };
                self.class_at(index)
            }
            other => Err(InferenceError::UnsupportedOutput(format!("{other:?}"))),
        }
    }

    fn class_at(&self, index: i64) -> Result<Label> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.classes.get(i))
            .cloned()
            .ok_or(InferenceError::ClassOutOfRange {
                index,
                classes: self.classes.len(),
            })
    }
}

type OnnxPlan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

pub struct OnnxClassifier {
    model: OnnxPlan,
    decoder: LabelDecoder,
    source: String,
}

impl OnnxClassifier {
    pub fn load<P: AsRef<Path>>(model_path: P, classes: Vec<Label>) -> Result<Self> {
        let path = model_path.as_ref();
        info!("Loading ONNX model from {}", path.display());

        let model = Self::plan(path).map_err(|source| InferenceError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            model,
            decoder: LabelDecoder::new(classes),
            source: path.display().to_string(),
        })
    }

    fn plan(path: &Path) -> TractResult<OnnxPlan> {
        tract_onnx::onnx()
            .model_for_path(path)?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, FEATURE_COUNT)),
            )?
            .into_optimized()?
            .into_runnable()
    }
}

impl Classifier for OnnxClassifier {
    fn classify(&self, features: &FeatureVector) -> Result<Label> {
        let input = Tensor::from_shape(&[1, FEATURE_COUNT], &features[..])
            .map_err(InferenceError::Run)?;
        let outputs = self
            .model
            .run(tvec!(input.into()))
            .map_err(InferenceError::Run)?;

        let first = outputs.first().ok_or(InferenceError::EmptyOutput)?;
        let label = self.decoder.decode(first)?;
        debug!("ONNX model returned label {label}");
        Ok(label)
    }

    fn classes(&self) -> &[Label] {
        self.decoder.classes()
    }

    fn describe(&self) -> ModelInfo {
        ModelInfo::new("onnx", &self.source, self.decoder.classes())
    }
}

pub(crate) fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

fn argmax(scores: &[f32]) -> usize {
    scores
        .iter()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |(best, max), (i, &s)| {
            if s > max {
                (i, s)
            } else {
                (best, max)
            }
        })
        .0
}
