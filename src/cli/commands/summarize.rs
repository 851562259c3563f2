//! Summarize command implementation.

use crate::cli::{preflight, Output};
use crate::config::{Prompts, Settings};
use crate::generation::Generator;
use anyhow::Result;

/// Run the summarize command.
pub async fn run_summarize(answer: &str, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check_api_key() {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    if answer.trim().is_empty() {
        Output::error("Nothing to summarize: the answer text is empty.");
        anyhow::bail!("empty answer text");
    }

    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;
    let generator = Generator::new(
        settings.generation.clone(),
        settings.summary.clone(),
        prompts,
    );

    let spinner = Output::spinner("Summarizing...");
    match generator.summarize(answer).await {
        Ok(summary) => {
            spinner.finish_and_clear();
            println!("\n{}\n", summary);
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to summarize: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
