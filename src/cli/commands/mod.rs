//! CLI command implementations.

mod ask;
mod config;
mod search;
mod serve;
mod summarize;

pub use ask::run_ask;
pub use config::run_config;
pub use search::run_search;
pub use serve::run_serve;
pub use summarize::run_summarize;

use crate::config::Settings;
use crate::embedding::{Embedder, OpenAIEmbedder};
use crate::retriever::Retriever;
use std::sync::Arc;

/// Build the retriever from the configured corpus and embedding model.
///
/// This embeds the whole corpus, so commands should show progress around it.
async fn build_retriever(settings: &Settings) -> anyhow::Result<Arc<Retriever>> {
    let embedder: Arc<dyn Embedder> = Arc::new(OpenAIEmbedder::with_config(
        &settings.embedding.model,
        settings.embedding.dimensions as usize,
    ));

    let retriever = Retriever::build(&settings.corpus_path(), embedder).await?;
    Ok(Arc::new(retriever))
}
