//! Trade assistant endpoint

use axum::{extract::State, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};
use trade_routes::{AssistantReply, TradeAssistant};

use super::AppState;
use crate::error::ApiError;

/// A free-text question
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantRequest {
    /// e.g. "Korea to Germany passenger cars"
    pub question: String,
}

/// Display text plus the structured reply
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantResponse {
    /// Rendered answer
    pub message: String,
    /// Structured answer
    pub reply: AssistantReply,
}

/// Build the assistant routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/v1/assistant", post(assistant_handler))
}

/// POST /api/v1/assistant
///
/// Unrecognised questions and missing routes are answers too and come back
/// with 200.
async fn assistant_handler(
    State(state): State<AppState>,
    Json(request): Json<AssistantRequest>,
) -> Result<Json<AssistantResponse>, ApiError> {
    if request.question.trim().is_empty() {
        return Err(ApiError::BadRequest("Question must not be empty".to_string()));
    }

    let assistant = TradeAssistant::with_settings(&state.table, state.config.assistant_settings());
    let reply = assistant.answer(&request.question);
    tracing::info!(
        extractor = %state.config.assistant.extractor,
        answered = matches!(reply, AssistantReply::Answer(_)),
        "Answered trade question"
    );

    Ok(Json(AssistantResponse {
        message: reply.message(),
        reply,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing::{json, post_json, state};
    use axum::http::StatusCode;
    use tower::ServiceExt;

    async fn ask(question: &str) -> (StatusCode, serde_json::Value) {
        let router = routes().with_state(state());
        let body = serde_json::json!({ "question": question }).to_string();
        let response = router
            .oneshot(post_json("/api/v1/assistant", &body))
            .await
            .unwrap();
        let status = response.status();
        (status, json(response).await)
    }

    #[tokio::test]
    async fn test_answer_with_scenarios() {
        let (status, body) = ask("Korea to Germany for passenger cars with higher tariff").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reply"]["status"], "answer");
        assert_eq!(body["reply"]["detail"]["estimatedLocalPrice"], 30_360.0);
        assert_eq!(body["reply"]["detail"]["scenarios"].as_array().unwrap().len(), 7);
        assert!(body["message"].as_str().unwrap().contains("EUR"));
    }

    #[tokio::test]
    async fn test_unrecognized_and_no_route() {
        let (status, body) = ask("what is the weather").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reply"]["status"], "unrecognized");

        let (_, body) = ask("Germany to Korea for passenger cars").await;
        assert_eq!(body["reply"]["status"], "no_route");
        assert_eq!(body["message"], "No matching trade route found.");
    }

    #[tokio::test]
    async fn test_empty_question_rejected() {
        let (status, body) = ask("   ").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }
}
