//! Ask command implementation.

use super::build_retriever;
use crate::cli::{preflight, Output};
use crate::config::{Prompts, Settings};
use crate::generation::Generator;
use anyhow::Result;

/// Run the ask command.
pub async fn run_ask(
    question: &str,
    model: Option<String>,
    top_k: Option<usize>,
    settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check_api_key() {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let spinner = Output::spinner("Building FAQ index...");
    let retriever = build_retriever(&settings).await?;
    spinner.finish_and_clear();

    let top_k = top_k.unwrap_or(settings.retrieval.top_k);

    let mut generation = settings.generation.clone();
    if let Some(m) = model {
        generation.model = m;
    }

    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;
    let generator = Generator::new(generation, settings.summary.clone(), prompts);

    let spinner = Output::spinner("Retrieving contexts...");
    let contexts = match retriever.retrieve(question, top_k).await {
        Ok(contexts) => {
            spinner.finish_and_clear();
            contexts
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Retrieval failed: {}", e));
            return Err(e.into());
        }
    };

    if contexts.is_empty() {
        Output::warning("No relevant FAQ entries found for this question.");
        return Ok(());
    }

    let spinner = Output::spinner("Generating answer...");
    match generator.answer(question, &contexts).await {
        Ok(answer) => {
            spinner.finish_and_clear();

            println!("\n{}\n", answer);

            Output::header("Contexts");
            for context in &contexts {
                Output::list_item(context);
            }
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to generate answer: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
