//! An HTTP service that classifies short text commands into intents using a
//! pre-trained ONNX model.
//!
//! Three artifacts are loaded once at startup and shared read-only across all
//! requests: the ONNX classifier, the tokenizer, and the class-index-to-label
//! mapping.
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use wernicke::{IntentClassifier, LabelMapping};
//!
//! let labels = LabelMapping::from_file("labels.json")?;
//! let classifier = IntentClassifier::builder()
//!     .with_model("model.onnx", "tokenizer.json", Some(50))?
//!     .with_labels(labels)?
//!     .build()?;
//!
//! let prediction = classifier.predict("open settings")?;
//! println!("{} ({:.2})", prediction.intent, prediction.confidence);
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The classifier is `Send + Sync`: every shared artifact lives behind an
//! `Arc` and prediction takes `&self`, so the server hands one instance to
//! all request handlers without locking:
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use std::thread;
//! use wernicke::{IntentClassifier, LabelMapping};
//!
//! let labels = LabelMapping::from_file("labels.json")?;
//! let classifier = Arc::new(
//!     IntentClassifier::builder()
//!         .with_model("model.onnx", "tokenizer.json", None)?
//!         .with_labels(labels)?
//!         .build()?,
//! );
//!
//! let mut handles = vec![];
//! for _ in 0..3 {
//!     let classifier = Arc::clone(&classifier);
//!     handles.push(thread::spawn(move || {
//!         classifier.predict("turn on the lights").unwrap();
//!     }));
//! }
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod labels;
mod runtime;
pub mod server;

pub use classifier::{
    ClassifierBuilder, ClassifierError, ClassifierInfo, IntentClassifier, IntentPredictor,
    Prediction,
};
pub use labels::{LabelError, LabelMapping};
pub use runtime::{create_session_builder, RuntimeConfig};
pub use server::{build_app, run_server, AppState};

/// Initializes the process-wide logger, defaulting to `info` when `RUST_LOG`
/// is unset.
pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
