mod builder;
mod encoding;
mod error;
mod model;
mod utils;

pub use builder::{ClassifierBuilder, DEFAULT_MAX_SEQUENCE_LENGTH};
pub use error::ClassifierError;
pub use model::IntentClassifier;

/// A single classification outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Human-readable label of the winning intent class
    pub intent: String,
    /// Probability the model assigned to the winning class
    pub confidence: f32,
    /// Index of the winning class in the model's output vector
    pub class_index: usize,
}

/// The prediction seam between the HTTP layer and the classifier.
///
/// Request handlers depend on this trait rather than on [`IntentClassifier`]
/// directly, so the routing layer can be exercised with a stub predictor.
pub trait IntentPredictor: Send + Sync {
    fn predict(&self, text: &str) -> Result<Prediction, ClassifierError>;
}

/// Information about the current state and configuration of a classifier
#[derive(Debug, Clone)]
pub struct ClassifierInfo {
    /// Path to the ONNX model file
    pub model_path: String,
    /// Path to the tokenizer file
    pub tokenizer_path: String,
    /// Number of intent classes in the label mapping
    pub num_classes: usize,
    /// Labels of the classes, ordered by class index
    pub class_labels: Vec<String>,
    /// Fixed input length token sequences are padded or truncated to
    pub max_sequence_length: usize,
}
