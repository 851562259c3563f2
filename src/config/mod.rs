//! Configuration module for Svar.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{AnswerPrompts, Prompts, SummaryPrompts};
pub use settings::{
    CorpusSettings, EmbeddingSettings, GeneralSettings, GenerationSettings, PromptSettings,
    RetrievalSettings, ServerSettings, Settings, SummarySettings,
};
