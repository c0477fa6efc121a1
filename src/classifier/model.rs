use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use ndarray::Array2;
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;

use super::encoding;
use super::error::ClassifierError;
use super::utils::argmax;
use super::{ClassifierInfo, IntentPredictor, Prediction};
use crate::labels::LabelMapping;

/// A thread-safe intent classifier backed by an ONNX model.
///
/// # Thread Safety
///
/// This type is automatically `Send + Sync` because all of its fields are
/// thread-safe: `PathBuf` and `usize` are `Send + Sync`, and the tokenizer,
/// session, and label mapping are shared through `Arc`. Prediction takes
/// `&self` and never mutates the loaded artifacts, so concurrent requests
/// need no locking.
#[derive(Debug)]
pub struct IntentClassifier {
    pub model_path: PathBuf,
    pub tokenizer_path: PathBuf,
    pub tokenizer: Arc<Tokenizer>,
    pub session: Arc<Session>,
    pub labels: Arc<LabelMapping>,
    pub max_sequence_length: usize,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<IntentClassifier>();
    }
};

impl IntentClassifier {
    /// Creates a new ClassifierBuilder for fluent construction
    pub fn builder() -> super::builder::ClassifierBuilder {
        super::builder::ClassifierBuilder::new()
    }

    /// Returns information about the classifier's current state
    pub fn info(&self) -> ClassifierInfo {
        ClassifierInfo {
            model_path: self.model_path.display().to_string(),
            tokenizer_path: self.tokenizer_path.display().to_string(),
            num_classes: self.labels.len(),
            class_labels: self.labels.labels().iter().map(|s| s.to_string()).collect(),
            max_sequence_length: self.max_sequence_length,
        }
    }

    /// Predicts the intent of the input text.
    ///
    /// The text is tokenized, truncated at the end to the model's fixed input
    /// length (or padded at the end with zeros), and run through the session.
    /// The class with the highest probability wins; ties resolve to the
    /// lowest class index.
    ///
    /// # Errors
    /// - `ValidationError` if the text is empty
    /// - `TokenizerError` if the text cannot be encoded
    /// - `ModelError` if inference fails
    /// - `PredictionError` if the output is empty or the winning index has no label
    ///
    /// # Example
    /// ```no_run
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # use wernicke::{IntentClassifier, LabelMapping};
    /// # let labels = LabelMapping::from_file("labels.json")?;
    /// # let classifier = IntentClassifier::builder()
    /// #     .with_model("model.onnx", "tokenizer.json", None)?
    /// #     .with_labels(labels)?
    /// #     .build()?;
    /// let prediction = classifier.predict("open settings")?;
    /// println!("{}: {:.2}", prediction.intent, prediction.confidence);
    /// # Ok(())
    /// # }
    /// ```
    pub fn predict(&self, text: &str) -> Result<Prediction, ClassifierError> {
        if text.is_empty() {
            return Err(ClassifierError::ValidationError(
                "Input text cannot be empty".into(),
            ));
        }

        let token_ids = encoding::encode(&self.tokenizer, text)?;
        let input_ids = encoding::pad_to_length(&token_ids, self.max_sequence_length);
        let probabilities = self.run_model(&input_ids)?;

        let (class_index, confidence) = argmax(&probabilities).ok_or_else(|| {
            ClassifierError::PredictionError("Model produced an empty probability vector".into())
        })?;
        let intent = self
            .labels
            .label(class_index)
            .ok_or_else(|| {
                ClassifierError::PredictionError(format!(
                    "No label mapped for class index {}",
                    class_index
                ))
            })?
            .to_string();

        Ok(Prediction {
            intent,
            confidence,
            class_index,
        })
    }

    /// Runs the session on one padded id sequence and returns its probability row.
    ///
    /// # Model Input Format
    /// - input_ids: padded token ids [batch_size=1, sequence_length]
    /// - attention_mask: 1 for real tokens, 0 for padding; fed only when the
    ///   graph declares the input
    ///
    /// # Model Output Format
    /// - Shape: [batch_size=1, num_classes], a probability distribution
    fn run_model(&self, input_ids: &[i64]) -> Result<Vec<f32>, ClassifierError> {
        let input_array = Array2::from_shape_vec((1, input_ids.len()), input_ids.to_vec())
            .map_err(|e| {
                ClassifierError::ModelError(format!("Failed to create input array: {}", e))
            })?;
        let input_dyn = input_array.into_dyn();
        let input_ids_layout = input_dyn.as_standard_layout();

        let mask_array = Array2::from_shape_vec(
            (1, input_ids.len()),
            input_ids
                .iter()
                .map(|&id| if id == encoding::PAD_ID { 0i64 } else { 1i64 })
                .collect(),
        )
        .map_err(|e| ClassifierError::ModelError(format!("Failed to create mask array: {}", e)))?;
        let mask_dyn = mask_array.into_dyn();
        let attention_mask = mask_dyn.as_standard_layout();

        let mut input_tensors = HashMap::new();
        input_tensors.insert(
            "input_ids",
            Tensor::from_array(&input_ids_layout).map_err(|e| {
                ClassifierError::ModelError(format!("Failed to create input tensor: {}", e))
            })?,
        );
        if self
            .session
            .inputs
            .iter()
            .any(|input| input.name == "attention_mask")
        {
            input_tensors.insert(
                "attention_mask",
                Tensor::from_array(&attention_mask).map_err(|e| {
                    ClassifierError::ModelError(format!("Failed to create mask tensor: {}", e))
                })?,
            );
        }

        let outputs = self
            .session
            .run(input_tensors)
            .map_err(|e| ClassifierError::ModelError(format!("Failed to run model: {}", e)))?;
        let output_tensor = outputs[0].try_extract_tensor::<f32>().map_err(|e| {
            ClassifierError::ModelError(format!("Failed to extract output tensor: {}", e))
        })?;

        if output_tensor.ndim() != 2 {
            return Err(ClassifierError::ModelError(format!(
                "Expected output of shape [1, num_classes], got {:?}",
                output_tensor.shape()
            )));
        }

        Ok(output_tensor
            .slice(ndarray::s![0, ..])
            .iter()
            .copied()
            .collect())
    }
}

impl IntentPredictor for IntentClassifier {
    fn predict(&self, text: &str) -> Result<Prediction, ClassifierError> {
        IntentClassifier::predict(self, text)
    }
}
