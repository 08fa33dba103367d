//! CLI entry point: audit inspection-report text files and print the
//! batch report as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use veridoc::{
    config, BatchDocument, BatchOptions, BatchProcessor, DocumentProcessor, EngineConfig,
    FieldRegistry, HttpLlmClient,
};

#[derive(Parser)]
#[command(name = "veridoc", version, about = "Audit inspection-report text files")]
struct Cli {
    /// Text files to audit, one document per file
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Enable the LLM fallback strategy (needs a running endpoint)
    #[arg(long)]
    use_llm: bool,

    /// Base URL of the Ollama-compatible LLM endpoint
    #[arg(long, default_value = "http://localhost:11434")]
    llm_url: String,

    /// Model to request from the LLM endpoint
    #[arg(long)]
    model: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} v{}", config::APP_NAME, config::APP_VERSION);

    let cli = Cli::parse();

    let mut engine_config = EngineConfig::default();
    if let Some(model) = &cli.model {
        engine_config.model_name = model.clone();
    }
    let llm_timeout = engine_config.llm_timeout_secs;

    let mut processor = DocumentProcessor::new(FieldRegistry::standard(), engine_config);
    if cli.use_llm {
        processor = processor.with_llm(Box::new(HttpLlmClient::new(&cli.llm_url, llm_timeout)));
    }

    let mut documents = Vec::new();
    for path in &cli.files {
        match std::fs::read_to_string(path) {
            Ok(text) => documents.push(BatchDocument {
                text,
                filename: path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string()),
            }),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "cannot read document");
                return ExitCode::FAILURE;
            }
        }
    }

    let batch = BatchProcessor::new(processor);
    let outcome = batch.process_batch(&documents, &BatchOptions { use_llm: cli.use_llm });

    match serde_json::to_string_pretty(&outcome) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "cannot serialize report");
            ExitCode::FAILURE
        }
    }
}
