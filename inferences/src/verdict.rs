use log::warn;
use serde::Serialize;

use crate::error::{InferenceError, Result};
use crate::types::Label;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Negative,
    Positive,
}

/// Reads a classifier label as a two-way verdict.
///
/// The negative label always maps to [`Verdict::Negative`]. With
/// `positive_labels` set, only those labels are positive and anything else is
/// [`InferenceError::UnrecognizedLabel`]. Without it every other label is
/// positive, which is how the screening model has been read so far.
#[derive(Debug, Clone)]
pub struct LabelPolicy {
    negative: Label,
    positive: Option<Vec<Label>>,
}

impl Default for LabelPolicy {
    fn default() -> Self {
        Self::lenient("N")
    }
}

impl LabelPolicy {
    pub fn lenient(negative: impl Into<Label>) -> Self {
        Self {
            negative: negative.into(),
            positive: None,
        }
    }

    pub fn strict(negative: impl Into<Label>, positive: Vec<Label>) -> Self {
        Self {
            negative: negative.into(),
            positive: Some(positive),
        }
    }

    pub fn negative(&self) -> &Label {
        &self.negative
    }

    pub fn is_strict(&self) -> bool {
        self.positive.is_some()
    }

    /// `known` is the class list the model declares; labels outside it are
    /// only logged under the lenient policy.
    pub fn verdict(&self, label: &Label, known: &[Label]) -> Result<Verdict> {
        if *label == self.negative {
            return Ok(Verdict::Negative);
        }
        match &self.positive {
            Some(positive) if positive.contains(label) => Ok(Verdict::Positive),
            Some(_) => Err(InferenceError::UnrecognizedLabel(label.to_string())),
            None => {
                if !known.is_empty() && !known.contains(label) {
                    warn!("Label '{label}' is not a declared model class, reading it as positive");
                }
                Ok(Verdict::Positive)
            }
        }
    }
}
