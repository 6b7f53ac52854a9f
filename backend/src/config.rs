use std::path::PathBuf;

use thiserror::Error;
use thyroid_inferences::{Label, LabelPolicy};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be a number (got {value:?})")]
    InvalidNumber { key: &'static str, value: String },
    #[error("WORKERS must be at least 1")]
    ZeroWorkers,
    #[error("{0} must list at least one label")]
    EmptyList(&'static str),
}

/// Stylesheet shipped with the crate, independent of the working directory.
pub const DEFAULT_STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Server settings, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub model_path: PathBuf,
    pub model_classes: Vec<Label>,
    pub negative_label: Label,
    pub positive_labels: Option<Vec<Label>>,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_number(&lookup, "PORT", 8080)?;
        let workers = parse_number(&lookup, "WORKERS", 1)?;
        if workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }

        let model_path = lookup("MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("models/hypothyroid.onnx"));
        let model_classes = match lookup("MODEL_CLASSES") {
            Some(raw) => parse_labels("MODEL_CLASSES", &raw)?,
            None => vec![Label::from("N"), Label::from("P")],
        };
        let negative_label = lookup("NEGATIVE_LABEL")
            .map(|l| Label::new(l.trim()))
            .unwrap_or_else(|| Label::from("N"));
        let positive_labels = lookup("POSITIVE_LABELS")
            .map(|raw| parse_labels("POSITIVE_LABELS", &raw))
            .transpose()?;
        let static_dir = lookup("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        Ok(Config {
            host,
            port,
            workers,
            model_path,
            model_classes,
            negative_label,
            positive_labels,
            static_dir,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn label_policy(&self) -> LabelPolicy {
        match &self.positive_labels {
            Some(positive) => LabelPolicy::strict(self.negative_label.clone(), positive.clone()),
            None => LabelPolicy::lenient(self.negative_label.clone()),
        }
    }
}

fn parse_number<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
        None => Ok(default),
    }
}

fn parse_labels(key: &'static str, raw: &str) -> Result<Vec<Label>, ConfigError> {
    let labels: Vec<Label> = raw
        .split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(Label::from)
        .collect();
    if labels.is_empty() {
        Err(ConfigError::EmptyList(key))
    } else {
        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.workers, 1);
        assert_eq!(config.model_path, PathBuf::from("models/hypothyroid.onnx"));
        assert_eq!(config.model_classes, vec![Label::from("N"), Label::from("P")]);
        assert_eq!(config.negative_label, Label::from("N"));
        assert!(!config.label_policy().is_strict());
        assert!(config.static_dir.join("style.css").is_file());
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("WORKERS", "4"),
            ("MODEL_PATH", "/models/thyroid.json"),
            ("MODEL_CLASSES", "negative, hypothyroid ,"),
            ("NEGATIVE_LABEL", "negative"),
            ("POSITIVE_LABELS", "hypothyroid"),
        ])
        .unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.workers, 4);
        assert_eq!(
            config.model_classes,
            vec![Label::from("negative"), Label::from("hypothyroid")]
        );
        assert!(config.label_policy().is_strict());
        assert_eq!(config.label_policy().negative(), &Label::from("negative"));
    }

    #[test]
    fn invalid_values() {
        assert_eq!(
            config(&[("PORT", "http")]).unwrap_err(),
            ConfigError::InvalidNumber {
                key: "PORT",
                value: "http".to_string()
            }
        );
        assert_eq!(config(&[("WORKERS", "0")]).unwrap_err(), ConfigError::ZeroWorkers);
        assert_eq!(
            config(&[("MODEL_CLASSES", " , ")]).unwrap_err(),
            ConfigError::EmptyList("MODEL_CLASSES")
        );
    }
}
