use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{error, info};
use ort::session::Session;
use tokenizers::Tokenizer;

use super::error::ClassifierError;
use super::model::IntentClassifier;
use crate::labels::LabelMapping;
use crate::runtime::{create_session_builder, RuntimeConfig};

/// Fixed model input length used when the caller does not override it.
pub const DEFAULT_MAX_SEQUENCE_LENGTH: usize = 50;

/// A builder for constructing an IntentClassifier with a fluent interface.
///
/// Artifacts are loaded and validated eagerly, so a misconfigured path or a
/// broken file fails at startup rather than on the first request.
#[derive(Default, Debug)]
pub struct ClassifierBuilder {
    model_path: Option<PathBuf>,
    tokenizer_path: Option<PathBuf>,
    tokenizer: Option<Tokenizer>,
    session: Option<Session>,
    labels: Option<LabelMapping>,
    max_sequence_length: Option<usize>,
    runtime_config: RuntimeConfig,
}

impl ClassifierBuilder {
    /// Creates a new empty ClassifierBuilder instance with default configuration
    pub fn new() -> Self {
        Self {
            model_path: None,
            tokenizer_path: None,
            tokenizer: None,
            session: None,
            labels: None,
            max_sequence_length: None,
            runtime_config: RuntimeConfig::default(),
        }
    }

    /// Sets the runtime configuration for ONNX model execution
    pub fn with_runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.runtime_config = config;
        self
    }

    /// Loads the model and tokenizer artifacts for the classifier.
    ///
    /// # Arguments
    /// * `model_path` - Path to the ONNX model file
    /// * `tokenizer_path` - Path to the tokenizer file
    /// * `max_sequence_length` - Fixed input length token sequences are padded
    ///   or truncated to. Defaults to [`DEFAULT_MAX_SEQUENCE_LENGTH`].
    ///
    /// # Returns
    /// * `Result<Self, ClassifierError>` - The builder instance if successful, or an error if:
    ///   - The paths are empty or already set
    ///   - The files don't exist
    ///   - The model or tokenizer failed to load
    ///   - The model structure is invalid
    pub fn with_model(
        mut self,
        model_path: impl AsRef<Path>,
        tokenizer_path: impl AsRef<Path>,
        max_sequence_length: Option<usize>,
    ) -> Result<Self, ClassifierError> {
        let model_path = model_path.as_ref();
        let tokenizer_path = tokenizer_path.as_ref();

        if model_path.as_os_str().is_empty() || tokenizer_path.as_os_str().is_empty() {
            return Err(ClassifierError::BuildError(
                "Model and tokenizer paths cannot be empty".to_string(),
            ));
        }
        if self.model_path.is_some() || self.tokenizer_path.is_some() {
            return Err(ClassifierError::BuildError(
                "Model and tokenizer paths already set".to_string(),
            ));
        }
        if let Some(length) = max_sequence_length {
            if length == 0 {
                return Err(ClassifierError::ValidationError(
                    "Maximum sequence length must be at least 1".to_string(),
                ));
            }
            self.max_sequence_length = Some(length);
        }
        if !model_path.exists() {
            return Err(ClassifierError::BuildError(format!(
                "Model file not found: {}",
                model_path.display()
            )));
        }
        if !tokenizer_path.exists() {
            return Err(ClassifierError::BuildError(format!(
                "Tokenizer file not found: {}",
                tokenizer_path.display()
            )));
        }

        let tokenizer = Tokenizer::from_file(tokenizer_path).map_err(|e| {
            error!("Failed to load tokenizer: {}", e);
            ClassifierError::BuildError(format!("Failed to load tokenizer: {}", e))
        })?;
        info!("Tokenizer loaded successfully");

        // Create session using the singleton environment
        let session =
            create_session_builder(&self.runtime_config)?.commit_from_file(model_path)?;

        Self::validate_model(&session)?;
        info!("Model structure validated successfully");

        self.model_path = Some(model_path.to_path_buf());
        self.tokenizer_path = Some(tokenizer_path.to_path_buf());
        self.tokenizer = Some(tokenizer);
        self.session = Some(session);
        Ok(self)
    }

    /// Sets the class-index-to-label mapping.
    ///
    /// # Returns
    /// * `Result<Self, ClassifierError>` - The builder instance if successful, or an error if:
    ///   - A mapping was already set
    ///   - The mapping contains no classes
    pub fn with_labels(mut self, labels: LabelMapping) -> Result<Self, ClassifierError> {
        if self.labels.is_some() {
            return Err(ClassifierError::BuildError(
                "Label mapping already set".to_string(),
            ));
        }
        if labels.is_empty() {
            return Err(ClassifierError::ValidationError(
                "Label mapping must contain at least one class".to_string(),
            ));
        }
        self.labels = Some(labels);
        Ok(self)
    }

    /// Builds and returns the final IntentClassifier instance
    ///
    /// # Returns
    /// * `Result<IntentClassifier, ClassifierError>` - The constructed classifier, or an error if
    ///   the model, tokenizer, or label mapping was never set.
    pub fn build(mut self) -> Result<IntentClassifier, ClassifierError> {
        if self.model_path.is_none() || self.tokenizer_path.is_none() {
            return Err(ClassifierError::BuildError(
                "Model and tokenizer paths must be set".to_string(),
            ));
        }
        let labels = self
            .labels
            .take()
            .ok_or_else(|| ClassifierError::BuildError("A label mapping must be set".into()))?;
        let tokenizer = self
            .tokenizer
            .take()
            .ok_or_else(|| ClassifierError::BuildError("No tokenizer loaded".into()))?;
        let session = self
            .session
            .take()
            .ok_or_else(|| ClassifierError::BuildError("No ONNX model loaded".into()))?;

        Ok(IntentClassifier {
            model_path: self.model_path.take().unwrap(),
            tokenizer_path: self.tokenizer_path.take().unwrap(),
            tokenizer: Arc::new(tokenizer),
            session: Arc::new(session),
            labels: Arc::new(labels),
            max_sequence_length: self
                .max_sequence_length
                .unwrap_or(DEFAULT_MAX_SEQUENCE_LENGTH),
        })
    }

    /// Validates that the model has the expected input/output structure
    fn validate_model(session: &Session) -> Result<(), ClassifierError> {
        if session.inputs.is_empty() {
            return Err(ClassifierError::ModelError(
                "Model must have at least 1 input for the token sequence".to_string(),
            ));
        }
        if session.outputs.is_empty() {
            return Err(ClassifierError::ModelError(
                "Model must have at least 1 output for class probabilities".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn test_labels() -> LabelMapping {
        let mut mapping = HashMap::new();
        mapping.insert(0, "greeting".to_string());
        mapping.insert(1, "open_settings".to_string());
        LabelMapping::new(mapping)
    }

    #[test]
    fn empty_paths_are_rejected() {
        let result = ClassifierBuilder::new().with_model("", "tokenizer.json", None);
        assert!(matches!(result, Err(ClassifierError::BuildError(_))));
    }

    #[test]
    fn missing_model_file_is_rejected() {
        let result = ClassifierBuilder::new().with_model(
            "/nonexistent/model.onnx",
            "/nonexistent/tokenizer.json",
            None,
        );
        assert!(matches!(result, Err(ClassifierError::BuildError(_))));
    }

    #[test]
    fn zero_sequence_length_is_rejected() {
        let result = ClassifierBuilder::new().with_model(
            "/nonexistent/model.onnx",
            "/nonexistent/tokenizer.json",
            Some(0),
        );
        assert!(matches!(result, Err(ClassifierError::ValidationError(_))));
    }

    #[test]
    fn empty_label_mapping_is_rejected() {
        let result = ClassifierBuilder::new().with_labels(LabelMapping::new(HashMap::new()));
        assert!(matches!(result, Err(ClassifierError::ValidationError(_))));
    }

    #[test]
    fn labels_cannot_be_set_twice() {
        let result = ClassifierBuilder::new()
            .with_labels(test_labels())
            .unwrap()
            .with_labels(test_labels());
        assert!(matches!(result, Err(ClassifierError::BuildError(_))));
    }

    #[test]
    fn build_without_a_model_fails() {
        let result = ClassifierBuilder::new()
            .with_labels(test_labels())
            .unwrap()
            .build();
        assert!(matches!(result, Err(ClassifierError::BuildError(_))));
    }
}
