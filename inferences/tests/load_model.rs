//! Loading classifiers from disk and the fixed-vector scenarios the web form
//! can produce.

use std::path::Path;

use thyroid_inferences::{
    load_classifier, InferenceError, Label, LabelPolicy, Verdict, FEATURE_COUNT,
    FEATURE_NAMES,
};

const DEFAULT_LABS: [(usize, f32); 5] = [(1, 5.08), (2, 110.46), (3, 108.32), (4, 2.01), (9, 0.99)];

/// TSH dominates; 20 features, N/P classes.
fn write_linear_model(dir: &Path, weights: usize) -> std::path::PathBuf {
    let mut w = vec![0.0f32; weights];
    if weights > 1 {
        w[1] = 0.5;
    }
    let body = serde_json::json!({
        "model_name": "tsh-only",
        "weights": w,
        "bias": -5.0,
        "classes": ["N", "P"],
    });
    let path = dir.join("model.json");
    std::fs::write(&path, body.to_string()).expect("write");
    path
}

fn flags_set(age: f32) -> [f32; FEATURE_COUNT] {
    let mut features = [1.0; FEATURE_COUNT];
    features[0] = age;
    for (i, v) in DEFAULT_LABS {
        features[i] = v;
    }
    features
}

#[test]
fn feature_order_is_fixed() {
    assert_eq!(FEATURE_NAMES.len(), FEATURE_COUNT);
    assert_eq!(FEATURE_NAMES[0], "age");
    assert_eq!(FEATURE_NAMES[9], "T4U");
    assert_eq!(FEATURE_NAMES[19], "hypopituitary");
}

#[test]
fn load_linear_model_from_json_file() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    let path = write_linear_model(tmp.path(), FEATURE_COUNT);

    let model = load_classifier(&path, vec![]).expect("load");
    let info = model.describe();
    assert_eq!(info.kind, "linear:tsh-only");
    assert_eq!(info.input_shape, vec![1, FEATURE_COUNT]);
    assert_eq!(info.classes, vec!["N", "P"]);
    assert_eq!(info.features.len(), FEATURE_COUNT);
}

#[test]
fn all_zero_vector_with_age_gives_a_known_label() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    let model = load_classifier(write_linear_model(tmp.path(), FEATURE_COUNT), vec![]).expect("load");

    let mut features = [0.0; FEATURE_COUNT];
    features[0] = 30.0;
    let label = model.classify(&features).expect("classify");

    assert!(model.classes().contains(&label));
    let verdict = LabelPolicy::default()
        .verdict(&label, model.classes())
        .expect("verdict");
    assert_eq!(verdict == Verdict::Negative, label == Label::from("N"));
}

#[test]
fn all_flags_set_is_accepted_and_deterministic() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    let model = load_classifier(write_linear_model(tmp.path(), FEATURE_COUNT), vec![]).expect("load");

    let features = flags_set(50.0);
    let first = model.classify(&features).expect("classify");
    for _ in 0..10 {
        assert_eq!(model.classify(&features).expect("classify"), first);
    }
}

#[test]
fn missing_model_file_fails_to_load() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    for name in ["absent.onnx", "absent.json"] {
        let err = load_classifier(tmp.path().join(name), vec![Label::from("N")])
            .err()
            .expect("missing file must not load");
        assert!(matches!(err, InferenceError::Load { .. }), "{name}: {err}");
    }
}

#[test]
fn corrupt_onnx_file_fails_to_load() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    let path = tmp.path().join("model.onnx");
    std::fs::write(&path, b"\x80\x04\x95 not a protobuf").expect("write");

    let err = load_classifier(&path, vec![Label::from("N"), Label::from("P")])
        .err()
        .expect("corrupt file must not load");
    assert!(matches!(err, InferenceError::Load { .. }));
}

#[test]
fn wrong_weight_count_fails_to_load() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    let path = write_linear_model(tmp.path(), 7);

    let err = load_classifier(&path, vec![])
        .err()
        .expect("short model must not load");
    assert!(matches!(err, InferenceError::Load { .. }));
    assert!(err.to_string().contains("model.json"));
}

#[test]
fn pickle_files_are_not_a_supported_format() {
    let err = load_classifier("hypothyroid_model.pkl", vec![])
        .err()
        .expect("pickle must not load");
    assert!(matches!(err, InferenceError::UnsupportedFormat(_)));
}
