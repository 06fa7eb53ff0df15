//! Reads a clinical note from a file (or stdin), runs the decision
//! pipeline, and prints the JSON response envelope to stdout.
//!
//! Usage: `paedsrx-agent [NOTE_FILE] [MEDICATION...]`

use std::env;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing_subscriber::EnvFilter;

use paedsrx_core::envelope::respond;
use paedsrx_engine::{Pipeline, PipelineOptions};
use paedsrx_knowledge::KnowledgeStore;

mod config;

use config::AgentConfig;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    // Structured JSON logging on stderr; stdout carries the response
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AgentConfig::from_env()?;
    let mut args = env::args().skip(1);
    let note_path = args.next().filter(|a| a != "-");
    let medications: Vec<String> = args.collect();

    let note = match &note_path {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };

    let source = config.store.source();
    let response = match KnowledgeStore::load(&source).await {
        Ok(store) => {
            tracing::info!(data_dir = %source.dir().display(), "knowledge store ready");
            let pipeline = Pipeline::new(Arc::new(store));
            let options = PipelineOptions {
                severity: None,
                fallback_severity: config.default_severity,
                medications,
            };
            respond(pipeline.run(&note, &options))
        }
        Err(e) => respond::<()>(Err(e)),
    };

    let mut out = serde_json::to_vec_pretty(&response)?;
    out.push(b'\n');
    let mut stdout = tokio::io::stdout();
    stdout.write_all(&out).await?;
    stdout.flush().await?;
    Ok(())
}
