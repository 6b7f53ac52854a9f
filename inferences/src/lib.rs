//! Classifier adapters for hypothyroid risk screening.
//!
//! A model is loaded once through [`load_classifier`] and then only read:
//! [`Classifier::classify`] maps the 20 ordered clinical features to a
//! [`Label`], and a [`LabelPolicy`] turns that label into a [`Verdict`].

pub mod error;
pub mod inference;
pub mod linear;
pub mod types;
pub mod verdict;

pub use error::{InferenceError, Result};
pub use inference::{load_classifier, Classifier, LabelDecoder, OnnxClassifier};
pub use linear::{LinearClassifier, LinearModel};
pub use types::{FeatureVector, Label, ModelInfo, FEATURE_COUNT, FEATURE_NAMES};
pub use verdict::{LabelPolicy, Verdict};
