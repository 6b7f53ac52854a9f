use std::time::Instant;

use serde::{Deserialize, Serialize};
use thyroid_inferences::{FeatureVector, Label, Verdict, FEATURE_COUNT};

use crate::error::ValidationError;

pub const AGE_MIN: u32 = 1;
pub const AGE_MAX: u32 = 100;

/// One form submission: the 20 clinical inputs, named as the model was
/// trained on them. Omitted fields take the form defaults.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PredictionRequest {
    pub age: u32,
    #[serde(rename = "TSH")]
    pub tsh: f32,
    #[serde(rename = "FTI")]
    pub fti: f32,
    #[serde(rename = "TT4")]
    pub tt4: f32,
    #[serde(rename = "T3")]
    pub t3: f32,
    #[serde(rename = "TSH_measured")]
    pub tsh_measured: u8,
    pub on_thyroxine: u8,
    #[serde(rename = "T3_measured")]
    pub t3_measured: u8,
    pub sick: u8,
    #[serde(rename = "T4U")]
    pub t4u: f32,
    #[serde(rename = "TT4_measured")]
    pub tt4_measured: u8,
    pub on_antithyroid_medication: u8,
    pub goitre: u8,
    pub thyroid_surgery: u8,
    pub query_hypothyroid: u8,
    pub pregnant: u8,
    pub lithium: u8,
    pub psych: u8,
    #[serde(rename = "T4U_measured")]
    pub t4u_measured: u8,
    pub hypopituitary: u8,
}

impl Default for PredictionRequest {
    fn default() -> Self {
        PredictionRequest {
            age: 30,
            tsh: 5.08,
            fti: 110.46,
            tt4: 108.32,
            t3: 2.01,
            tsh_measured: 0,
            on_thyroxine: 0,
            t3_measured: 0,
            sick: 0,
            t4u: 0.99,
            tt4_measured: 0,
            on_antithyroid_medication: 0,
            goitre: 0,
            thyroid_surgery: 0,
            query_hypothyroid: 0,
            pregnant: 0,
            lithium: 0,
            psych: 0,
            t4u_measured: 0,
            hypopituitary: 0,
        }
    }
}

impl PredictionRequest {
    /// Re-checks the widget constraints: age range, 0/1 flags, finite labs.
    /// Deliberately no cross-field rules.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(AGE_MIN..=AGE_MAX).contains(&self.age) {
            return Err(ValidationError::AgeOutOfRange {
                age: self.age,
                min: AGE_MIN,
                max: AGE_MAX,
            });
        }

        for (name, value) in self.labs() {
            if !value.is_finite() {
                return Err(ValidationError::NotFinite { field: name, value });
            }
        }

        for (name, value) in self.flags() {
            if value > 1 {
                return Err(ValidationError::InvalidFlag { field: name, value });
            }
        }

        Ok(())
    }

    /// Every input paired with its feature name, in model order.
    pub fn fields(&self) -> [(&'static str, f32); FEATURE_COUNT] {
        [
            ("age", self.age as f32),
            ("TSH", self.tsh),
            ("FTI", self.fti),
            ("TT4", self.tt4),
            ("T3", self.t3),
            ("TSH_measured", self.tsh_measured as f32),
            ("on_thyroxine", self.on_thyroxine as f32),
            ("T3_measured", self.t3_measured as f32),
            ("sick", self.sick as f32),
            ("T4U", self.t4u),
            ("TT4_measured", self.tt4_measured as f32),
            ("on_antithyroid_medication", self.on_antithyroid_medication as f32),
            ("goitre", self.goitre as f32),
            ("thyroid_surgery", self.thyroid_surgery as f32),
            ("query_hypothyroid", self.query_hypothyroid as f32),
            ("pregnant", self.pregnant as f32),
            ("lithium", self.lithium as f32),
            ("psych", self.psych as f32),
            ("T4U_measured", self.t4u_measured as f32),
            ("hypopituitary", self.hypopituitary as f32),
        ]
    }

    pub fn to_array(&self) -> FeatureVector {
        self.fields().map(|(_, value)| value)
    }

    /// Current value of a field, looked up by feature name.
    pub fn value_of(&self, name: &str) -> Option<f32> {
        self.fields()
            .into_iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    fn labs(&self) -> [(&'static str, f32); 5] {
        [
            ("TSH", self.tsh),
            ("FTI", self.fti),
            ("TT4", self.tt4),
            ("T3", self.t3),
            ("T4U", self.t4u),
        ]
    }

    fn flags(&self) -> [(&'static str, u8); 14] {
        [
            ("TSH_measured", self.tsh_measured),
            ("on_thyroxine", self.on_thyroxine),
            ("T3_measured", self.t3_measured),
            ("sick", self.sick),
            ("TT4_measured", self.tt4_measured),
            ("on_antithyroid_medication", self.on_antithyroid_medication),
            ("goitre", self.goitre),
            ("thyroid_surgery", self.thyroid_surgery),
            ("query_hypothyroid", self.query_hypothyroid),
            ("pregnant", self.pregnant),
            ("lithium", self.lithium),
            ("psych", self.psych),
            ("T4U_measured", self.t4u_measured),
            ("hypopituitary", self.hypopituitary),
        ]
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct PredictionResponse {
    pub label: Label,
    pub verdict: Verdict,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub timestamp: String,
    pub execution_time_ms: Option<u64>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
            execution_time_ms: None,
        }
    }

    pub fn error(message: &str) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.to_string()),
            timestamp: chrono::Utc::now().to_rfc3339(),
            execution_time_ms: None,
        }
    }

    pub fn timed(mut self, start: Instant) -> Self {
        self.execution_time_ms = Some(start.elapsed().as_millis() as u64);
        self
    }
}
