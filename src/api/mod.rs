//! HTTP API for the QnA service.
//!
//! All state is constructed at startup and injected through
//! `Router::with_state`; the retriever index is fully built before the
//! router exists, so no request can observe a half-initialized service.

use crate::error::SvarError;
use crate::generation::Generator;
use crate::retriever::Retriever;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, warn};

/// Maximum number of Q&A pairs kept in the in-memory history log.
/// Oldest entries are dropped past this cap.
const HISTORY_CAP: usize = 100;

/// Shared application state.
pub struct AppState {
    retriever: Arc<Retriever>,
    generator: Generator,
    top_k: usize,
    history: RwLock<VecDeque<HistoryEntry>>,
}

impl AppState {
    /// Create the shared state for the router.
    pub fn new(retriever: Arc<Retriever>, generator: Generator, top_k: usize) -> Self {
        Self {
            retriever,
            generator,
            top_k,
            history: RwLock::new(VecDeque::new()),
        }
    }

    fn push_history(&self, entry: HistoryEntry) {
        let mut history = self.history.write().unwrap();
        if history.len() == HISTORY_CAP {
            history.pop_front();
        }
        history.push_back(entry);
    }

    fn history_snapshot(&self) -> Vec<HistoryEntry> {
        self.history.read().unwrap().iter().cloned().collect()
    }
}

/// A past question/answer pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub question: String,
    pub answer: String,
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/ask", post(ask))
        .route("/history", get(history))
        .route("/summarize", post(summarize))
        .layer(cors)
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct AskRequest {
    question: Option<String>,
}

#[derive(Serialize)]
struct AskResponse {
    question: String,
    contexts: Vec<String>,
    answer: String,
}

#[derive(Deserialize)]
struct SummarizeRequest {
    answer: Option<String>,
}

#[derive(Serialize)]
struct SummarizeResponse {
    summary: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn ask(State(state): State<Arc<AppState>>, Json(req): Json<AskRequest>) -> Response {
    let question = match req.question.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => q.to_string(),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Missing 'question' in request body".to_string(),
                }),
            )
                .into_response()
        }
    };

    let contexts = match state.retriever.retrieve(&question, state.top_k).await {
        Ok(contexts) => contexts,
        Err(e) => return provider_error(e),
    };
    debug!("Retrieved {} contexts", contexts.len());

    if contexts.is_empty() {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "No relevant context found".to_string(),
            }),
        )
            .into_response();
    }

    let answer = match state.generator.answer(&question, &contexts).await {
        Ok(answer) => answer,
        Err(e) => return provider_error(e),
    };

    state.push_history(HistoryEntry {
        question: question.clone(),
        answer: answer.clone(),
    });

    Json(AskResponse {
        question,
        contexts,
        answer,
    })
    .into_response()
}

async fn history(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.history_snapshot())
}

async fn summarize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SummarizeRequest>,
) -> Response {
    let answer = match req.answer.as_deref().map(str::trim) {
        Some(a) if !a.is_empty() => a.to_string(),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Missing 'answer' in request body".to_string(),
                }),
            )
                .into_response()
        }
    };

    match state.generator.summarize(&answer).await {
        Ok(summary) => Json(SummarizeResponse { summary }).into_response(),
        Err(e) => provider_error(e),
    }
}

/// Map a provider failure to a distinguishable HTTP status.
fn provider_error(err: SvarError) -> Response {
    let status = match err {
        SvarError::Embedding(_) | SvarError::Generation(_) | SvarError::Http(_) => {
            StatusCode::BAD_GATEWAY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    warn!("Request failed: {}", err);
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Prompts;
    use crate::corpus::FaqEntry;
    use crate::embedding::testing::HashEmbedder;

    async fn state_with_corpus(entries: Vec<FaqEntry>) -> Arc<AppState> {
        let retriever = Retriever::from_entries(entries, Arc::new(HashEmbedder))
            .await
            .unwrap();
        let generator = Generator::new(
            Default::default(),
            Default::default(),
            Prompts::default(),
        );
        Arc::new(AppState::new(Arc::new(retriever), generator, 3))
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_ask_without_question_field_is_400() {
        let state = state_with_corpus(Vec::new()).await;
        let response = ask(State(state), Json(AskRequest { question: None })).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_string(response).await;
        assert!(body.contains("Missing 'question' in request body"));
    }

    #[tokio::test]
    async fn test_ask_with_blank_question_is_400() {
        let state = state_with_corpus(Vec::new()).await;
        let response = ask(
            State(state),
            Json(AskRequest {
                question: Some("   ".to_string()),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_ask_with_no_retrievable_context_is_404() {
        // Empty corpus forces retrieval to come back empty.
        let state = state_with_corpus(Vec::new()).await;
        let response = ask(
            State(state),
            Json(AskRequest {
                question: Some("anything".to_string()),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_summarize_without_answer_field_is_400() {
        let state = state_with_corpus(Vec::new()).await;
        let response = summarize(State(state), Json(SummarizeRequest { answer: None })).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_string(response).await;
        assert!(body.contains("Missing 'answer' in request body"));
    }

    #[tokio::test]
    async fn test_history_starts_empty() {
        let state = state_with_corpus(Vec::new()).await;
        assert!(state.history_snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_history_is_bounded() {
        let state = state_with_corpus(Vec::new()).await;

        for i in 0..HISTORY_CAP + 10 {
            state.push_history(HistoryEntry {
                question: format!("q{}", i),
                answer: format!("a{}", i),
            });
        }

        let history = state.history_snapshot();
        assert_eq!(history.len(), HISTORY_CAP);
        // Oldest entries were dropped
        assert_eq!(history[0].question, "q10");
        assert_eq!(history.last().unwrap().question, format!("q{}", HISTORY_CAP + 9));
    }

    #[tokio::test]
    async fn test_health_is_ok() {
        let response = health().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
