//! HTTP API server command.

use super::build_retriever;
use crate::api::{router, AppState};
use crate::cli::{preflight, Output};
use crate::config::{Prompts, Settings};
use crate::generation::Generator;
use std::sync::Arc;

/// Run the HTTP API server.
pub async fn run_serve(
    host: Option<String>,
    port: Option<u16>,
    settings: Settings,
) -> anyhow::Result<()> {
    if let Err(e) = preflight::check_api_key() {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    // Build the index before binding so no request ever sees a service
    // without a corpus.
    let spinner = Output::spinner("Building FAQ index...");
    let retriever = build_retriever(&settings).await?;
    spinner.finish_and_clear();
    Output::success(&format!("Indexed {} FAQ entries", retriever.len()));

    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;
    let generator = Generator::new(
        settings.generation.clone(),
        settings.summary.clone(),
        prompts,
    );

    let state = Arc::new(AppState::new(
        retriever,
        generator,
        settings.retrieval.top_k,
    ));

    let app = router(state);

    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Svar API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Ask", "POST /ask");
    Output::kv("History", "GET  /history");
    Output::kv("Summarize", "POST /summarize");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}
