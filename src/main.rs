use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use log::info;

use wernicke::{run_server, AppState, IntentClassifier, LabelMapping};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind the server to
    #[arg(long, default_value = "0.0.0.0")]
    address: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 5000)]
    port: u16,

    /// Path to the ONNX intent model
    #[arg(long, default_value = "model.onnx")]
    model: PathBuf,

    /// Path to the tokenizer file
    #[arg(long, default_value = "tokenizer.json")]
    tokenizer: PathBuf,

    /// Path to the class-index-to-label mapping
    #[arg(long, default_value = "labels.json")]
    labels: PathBuf,

    /// Fixed input length token sequences are padded or truncated to
    #[arg(long, default_value_t = 50)]
    max_length: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    wernicke::init_logger();
    let args = Args::parse();

    info!("Loading artifacts...");
    let labels = LabelMapping::from_file(&args.labels)?;
    let classifier = IntentClassifier::builder()
        .with_model(&args.model, &args.tokenizer, Some(args.max_length))?
        .with_labels(labels)?
        .build()?;

    let classifier_info = classifier.info();
    info!(
        "Classifier ready: {} classes ({}), max sequence length {}",
        classifier_info.num_classes,
        classifier_info.class_labels.join(", "),
        classifier_info.max_sequence_length
    );

    let addr: SocketAddr = format!("{}:{}", args.address, args.port).parse()?;
    let state = AppState::new(Arc::new(classifier));
    run_server(state, addr).await
}
