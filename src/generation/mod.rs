//! Answer generation and summarization via the chat completions API.
//!
//! Two agents share one client: an answer generator grounded in retrieved
//! contexts, and a summarizer that condenses a previous answer. Provider
//! failures surface as `SvarError::Generation` so the API layer can return
//! a real error status instead of an error string disguised as an answer.

use crate::config::{GenerationSettings, Prompts, SummarySettings};
use crate::error::{Result, SvarError};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Generation boundary over OpenAI chat completions.
pub struct Generator {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    generation: GenerationSettings,
    summary: SummarySettings,
    prompts: Prompts,
}

impl Generator {
    /// Create a new generator.
    pub fn new(
        generation: GenerationSettings,
        summary: SummarySettings,
        prompts: Prompts,
    ) -> Self {
        Self {
            client: create_client(),
            generation,
            summary,
            prompts,
        }
    }

    /// Format retrieved contexts as a bulleted list for the answer prompt.
    pub fn format_contexts(contexts: &[String]) -> String {
        contexts
            .iter()
            .map(|c| format!("- {}", c))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Generate an answer grounded in the retrieved contexts.
    #[instrument(skip(self, contexts), fields(context_count = contexts.len()))]
    pub async fn answer(&self, question: &str, contexts: &[String]) -> Result<String> {
        let mut vars = HashMap::new();
        vars.insert("contexts".to_string(), Self::format_contexts(contexts));
        vars.insert("question".to_string(), question.to_string());

        let user = self.prompts.render_with_custom(&self.prompts.answer.user, &vars);

        self.complete(
            &self.generation.model,
            &self.prompts.answer.system,
            &user,
            self.generation.max_tokens,
            self.generation.temperature,
        )
        .await
    }

    /// Summarize a previously generated answer.
    #[instrument(skip(self, answer))]
    pub async fn summarize(&self, answer: &str) -> Result<String> {
        let mut vars = HashMap::new();
        vars.insert("answer".to_string(), answer.to_string());

        let user = self.prompts.render_with_custom(&self.prompts.summary.user, &vars);

        self.complete(
            &self.summary.model,
            &self.prompts.summary.system,
            &user,
            self.summary.max_tokens,
            self.summary.temperature,
        )
        .await
    }

    async fn complete(
        &self,
        model: &str,
        system: &str,
        user: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system.to_string())
                .build()
                .map_err(|e| SvarError::Generation(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user.to_string())
                .build()
                .map_err(|e| SvarError::Generation(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .max_tokens(max_tokens)
            .temperature(temperature)
            .build()
            .map_err(|e| SvarError::Generation(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| SvarError::Generation(format!("Chat completion failed: {}", e)))?;

        let text = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| SvarError::Generation("Empty response from model".to_string()))?
            .trim()
            .to_string();

        debug!("Generated {} characters with {}", text.len(), model);
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_contexts_as_bulleted_list() {
        let contexts = vec!["First answer.".to_string(), "Second answer.".to_string()];
        assert_eq!(
            Generator::format_contexts(&contexts),
            "- First answer.\n- Second answer."
        );
        assert_eq!(Generator::format_contexts(&[]), "");
    }

    #[test]
    fn test_answer_prompt_layout() {
        let prompts = Prompts::default();
        let mut vars = HashMap::new();
        vars.insert(
            "contexts".to_string(),
            Generator::format_contexts(&["ctx".to_string()]),
        );
        vars.insert("question".to_string(), "What is this?".to_string());

        let rendered = prompts.render_with_custom(&prompts.answer.user, &vars);
        assert_eq!(rendered, "Contexts:\n- ctx\n\nQuestion: What is this?\nAnswer:");
    }
}
