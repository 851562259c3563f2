//! Retrieval over the FAQ corpus.
//!
//! The retriever loads the corpus and embeds every entry exactly once at
//! construction. After that it is read-only and safe to share across tasks
//! behind an `Arc`.

use crate::corpus::{self, FaqEntry};
use crate::embedding::Embedder;
use crate::error::{Result, SvarError};
use crate::index::VectorIndex;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// A retrieved entry with its similarity score.
#[derive(Debug, Clone)]
pub struct ScoredEntry {
    pub entry: FaqEntry,
    pub score: f32,
}

/// Embedding-based retriever for FAQ entries.
pub struct Retriever {
    entries: Vec<FaqEntry>,
    index: VectorIndex,
    embedder: Arc<dyn Embedder>,
}

impl Retriever {
    /// Load the corpus from disk, embed every entry, and build the index.
    ///
    /// This is the one-time blocking construction step; a server must finish
    /// it before accepting traffic.
    #[instrument(skip(embedder))]
    pub async fn build(corpus_path: &Path, embedder: Arc<dyn Embedder>) -> Result<Self> {
        let entries = corpus::load(corpus_path)?;
        info!(
            "Loaded {} FAQ entries from {}",
            entries.len(),
            corpus_path.display()
        );
        Self::from_entries(entries, embedder).await
    }

    /// Build a retriever from already-loaded entries.
    ///
    /// Entries are embedded as `"{question} {answer}"` in a single batched
    /// provider call.
    pub async fn from_entries(
        entries: Vec<FaqEntry>,
        embedder: Arc<dyn Embedder>,
    ) -> Result<Self> {
        let texts: Vec<String> = entries
            .iter()
            .map(|e| format!("{} {}", e.question, e.answer))
            .collect();

        let embeddings = embedder.embed_batch(&texts).await?;
        if embeddings.len() != entries.len() {
            return Err(SvarError::Embedding(format!(
                "Embedded {} texts but provider returned {} vectors",
                entries.len(),
                embeddings.len()
            )));
        }

        let index = VectorIndex::new(embeddings)?;
        debug!("Built vector index over {} entries", index.len());

        Ok(Self {
            entries,
            index,
            embedder,
        })
    }

    /// Number of entries in the corpus.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Retrieve the answer texts of the `top_k` most similar entries, best
    /// match first.
    ///
    /// Empty and whitespace-only queries return an empty list without
    /// touching the embedding provider.
    #[instrument(skip(self))]
    pub async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<String>> {
        Ok(self
            .retrieve_scored(query, top_k)
            .await?
            .into_iter()
            .map(|s| s.entry.answer)
            .collect())
    }

    /// Retrieve the `top_k` most similar entries with their scores.
    pub async fn retrieve_scored(&self, query: &str, top_k: usize) -> Result<Vec<ScoredEntry>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed(query).await?;
        let ranked = self.index.top_k(&query_embedding, top_k.min(self.entries.len()));
        debug!("Ranked {} entries for query", ranked.len());

        Ok(ranked
            .into_iter()
            .map(|(i, score)| ScoredEntry {
                entry: self.entries[i].clone(),
                score,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::testing::HashEmbedder;

    fn entry(id: &str, question: &str, answer: &str) -> FaqEntry {
        FaqEntry {
            id: id.to_string(),
            question: question.to_string(),
            answer: answer.to_string(),
        }
    }

    fn sample_corpus() -> Vec<FaqEntry> {
        vec![
            entry(
                "1",
                "What is this QnA App?",
                "The QnA App is a RAG-powered question-and-answer service combining embedding-based retrieval with AI-generated responses.",
            ),
            entry(
                "2",
                "Which AI models are used?",
                "We use the OpenAI text-embedding-ada-002 model for embeddings and gpt-4o for answer generation and summarization.",
            ),
            entry(
                "3",
                "Is my question history saved?",
                "Question history is kept in memory for the lifetime of the process and cleared on restart.",
            ),
            entry(
                "4",
                "What future features are planned?",
                "Planned features include persistent history storage and uploading custom FAQ documents.",
            ),
        ]
    }

    async fn build_retriever(entries: Vec<FaqEntry>) -> Retriever {
        Retriever::from_entries(entries, Arc::new(HashEmbedder))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_matrix_rows_match_corpus_rows() {
        let retriever = build_retriever(sample_corpus()).await;
        assert_eq!(retriever.len(), 4);

        // Full-scan retrieval covers every entry, so the index must hold
        // one row per corpus entry.
        let all = retriever.retrieve_scored("question history models", 100).await.unwrap();
        assert_eq!(all.len(), 4);
    }

    #[tokio::test]
    async fn test_empty_and_whitespace_queries_return_empty() {
        let retriever = build_retriever(sample_corpus()).await;
        assert!(retriever.retrieve("", 3).await.unwrap().is_empty());
        assert!(retriever.retrieve("   ", 3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_result_length_bounded_by_k_and_corpus() {
        let retriever = build_retriever(sample_corpus()).await;

        for k in [0, 1, 3, 4, 10] {
            let results = retriever.retrieve("history", k).await.unwrap();
            assert!(results.len() <= k.min(retriever.len()));
        }

        // Requesting more than available returns all matches, no error
        let results = retriever.retrieve("history", 99).await.unwrap();
        assert_eq!(results.len(), 4);
    }

    #[tokio::test]
    async fn test_retrieve_is_idempotent() {
        let retriever = build_retriever(sample_corpus()).await;
        let first = retriever.retrieve("Which AI models are used?", 3).await.unwrap();
        let second = retriever.retrieve("Which AI models are used?", 3).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_exact_question_retrieves_its_answer() {
        let retriever = build_retriever(sample_corpus()).await;
        let results = retriever.retrieve("What is this QnA App?", 3).await.unwrap();
        assert!(results.contains(
            &"The QnA App is a RAG-powered question-and-answer service combining embedding-based retrieval with AI-generated responses."
                .to_string()
        ));
    }

    #[tokio::test]
    async fn test_model_question_retrieves_model_answer() {
        let retriever = build_retriever(sample_corpus()).await;
        let results = retriever.retrieve("Which AI models are used?", 3).await.unwrap();
        assert!(results.iter().any(|a| a.contains("text-embedding-ada-002") && a.contains("gpt-4o")));
    }

    #[tokio::test]
    async fn test_scored_results_are_ranked_descending() {
        let retriever = build_retriever(sample_corpus()).await;
        let scored = retriever
            .retrieve_scored("question history", 4)
            .await
            .unwrap();
        for pair in scored.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[tokio::test]
    async fn test_empty_corpus_retrieves_nothing() {
        let retriever = build_retriever(Vec::new()).await;
        assert!(retriever.is_empty());
        assert!(retriever.retrieve("anything", 3).await.unwrap().is_empty());
    }
}
