//! Svar - RAG-powered FAQ question answering
//!
//! A minimal retrieval-augmented QA service: given a natural-language
//! question, Svar finds the most semantically similar entries in a small
//! fixed FAQ corpus and asks a language model to synthesize an answer
//! grounded in them.
//!
//! The name "Svar" comes from the Norwegian word for "answer."
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and prompt templates
//! - `corpus` - FAQ corpus loading from CSV
//! - `embedding` - Embedding generation
//! - `index` - In-memory vector index with cosine-similarity ranking
//! - `retriever` - Query-time retrieval over the corpus
//! - `generation` - Answer generation and summarization
//! - `api` - HTTP API layer
//!
//! The corpus and its embedding matrix are built exactly once at startup
//! and are read-only afterwards; a shared `Retriever` serves any number of
//! concurrent callers.
//!
//! # Example
//!
//! ```rust,no_run
//! use svar::embedding::{Embedder, OpenAIEmbedder};
//! use svar::retriever::Retriever;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let embedder: Arc<dyn Embedder> = Arc::new(OpenAIEmbedder::new());
//!     let retriever = Retriever::build(Path::new("faq.csv"), embedder).await?;
//!
//!     let contexts = retriever.retrieve("What is this QnA App?", 3).await?;
//!     for context in contexts {
//!         println!("- {}", context);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod embedding;
pub mod error;
pub mod generation;
pub mod index;
pub mod openai;
pub mod retriever;

pub use error::{Result, SvarError};
