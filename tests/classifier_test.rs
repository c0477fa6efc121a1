use std::path::Path;

use tempfile::TempDir;

use wernicke::{ClassifierError, IntentClassifier, LabelMapping};

#[test]
fn label_mapping_loads_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("labels.json");
    std::fs::write(
        &path,
        r#"{"id_to_label": {"0": "greeting", "3": "open_settings"}}"#,
    )
    .unwrap();

    let mapping = LabelMapping::from_file(&path).unwrap();
    assert_eq!(mapping.len(), 2);
    assert_eq!(mapping.label(3), Some("open_settings"));
    assert_eq!(mapping.label(1), None);
}

#[test]
fn corrupt_label_mapping_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("labels.json");
    std::fs::write(&path, "not json at all").unwrap();

    assert!(LabelMapping::from_file(&path).is_err());
}

#[test]
fn builder_rejects_missing_artifacts() {
    let result = IntentClassifier::builder().with_model(
        "/nonexistent/model.onnx",
        "/nonexistent/tokenizer.json",
        None,
    );
    assert!(matches!(result, Err(ClassifierError::BuildError(_))));
}

#[test]
fn build_without_artifacts_fails() {
    assert!(IntentClassifier::builder().build().is_err());
}

// Exercises the full tokenize -> pad -> infer -> label pipeline against the
// artifacts the server loads at startup. Skips when they are not checked out
// locally.
#[test]
fn end_to_end_prediction_with_local_artifacts() {
    let (model, tokenizer, labels_path) = ("model.onnx", "tokenizer.json", "labels.json");
    if ![model, tokenizer, labels_path]
        .iter()
        .all(|p| Path::new(p).exists())
    {
        eprintln!("skipping: local artifacts not present");
        return;
    }

    let labels = LabelMapping::from_file(labels_path).unwrap();
    let classifier = IntentClassifier::builder()
        .with_model(model, tokenizer, Some(50))
        .unwrap()
        .with_labels(labels)
        .unwrap()
        .build()
        .unwrap();

    let prediction = classifier.predict("open settings").unwrap();
    assert!((0.0..=1.0).contains(&prediction.confidence));
    assert!(classifier
        .info()
        .class_labels
        .contains(&prediction.intent));

    // Same input against the same artifacts is deterministic
    let again = classifier.predict("open settings").unwrap();
    assert_eq!(prediction, again);

    // Empty input is rejected before inference
    assert!(matches!(
        classifier.predict(""),
        Err(ClassifierError::ValidationError(_))
    ));

    // Inputs far beyond the fixed sequence length are truncated, not rejected
    let long_text = "open the settings panel and ".repeat(40);
    assert!(classifier.predict(&long_text).is_ok());
}
