//! Search command implementation.

use super::build_retriever;
use crate::cli::{preflight, Output};
use crate::config::Settings;
use anyhow::Result;

/// Run the search command.
pub async fn run_search(query: &str, limit: usize, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check_api_key() {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let spinner = Output::spinner("Building FAQ index...");
    let retriever = build_retriever(&settings).await?;
    spinner.finish_and_clear();

    let spinner = Output::spinner("Searching...");
    let results = retriever.retrieve_scored(query, limit).await;
    spinner.finish_and_clear();

    match results {
        Ok(scored) => {
            if scored.is_empty() {
                Output::warning("No results found matching your query.");
            } else {
                Output::success(&format!("Found {} results", scored.len()));

                for result in &scored {
                    Output::search_result(
                        &result.entry.id,
                        &result.entry.question,
                        result.score,
                        &result.entry.answer,
                    );
                }
            }
        }
        Err(e) => {
            Output::error(&format!("Search failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
