use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, InferenceError>;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("failed to load model from {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
    #[error("unsupported model format for {0} (expected .onnx or .json)")]
    UnsupportedFormat(PathBuf),
    #[error("model expects {expected} features, got {actual}")]
    Shape { expected: usize, actual: usize },
    #[error("inference failed: {0}")]
    Run(#[source] anyhow::Error),
    #[error("model produced no output")]
    EmptyOutput,
    #[error("unsupported model output type: {0}")]
    UnsupportedOutput(String),
    #[error("class index {index} out of range for {classes} classes")]
    ClassOutOfRange { index: i64, classes: usize },
    #[error("unrecognized label: {0:?}")]
    UnrecognizedLabel(String),
}
