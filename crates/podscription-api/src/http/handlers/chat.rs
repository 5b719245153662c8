//! Consultation turn endpoint.
//!
//! POST /api/chat
//!
//! Body: `{ "sessionId"?: uuid, "content": string }`. Without a session id a
//! new session is created. Responds with the updated session and the
//! assistant's reply.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;
use uuid::Uuid;

use crate::http::error::AppError;
use crate::http::response::ChatResponse;
use crate::state::AppState;

/// Request body for a consultation turn.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub session_id: Option<Uuid>,
    /// Missing content is an empty message and rejected by the service.
    #[serde(default)]
    pub content: String,
}

/// POST /api/chat - Run one consultation turn.
pub async fn send_message(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let start = Instant::now();
    let Json(req) = payload.map_err(|e| AppError::InvalidPayload(e.body_text()))?;

    let (session, message) = state
        .consultation
        .send_message(req.session_id, &req.content)
        .await?;

    tracing::debug!(
        session_id = %session.id,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Chat request served"
    );

    Ok(Json(ChatResponse { session, message }))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use podscription_types::llm::LlmError;

    use crate::http::router::build_router;
    use crate::http::test_support::{body_json, test_state};

    const CLASSIFICATION: &str = "CATEGORY: pod-issues\nCONFIDENCE: 0.9\nSYMPTOMS: CrashLoopBackOff";
    const DIAGNOSIS: &str = "## Diagnosis: 🩺 Restart Fatigue\n\
1. **Look**: `kubectl describe pod web-0`\n\
### Follow-up Care:\nWatch the restart count.\n*Stay healthy!*";

    fn chat_request(body: &str) -> Request<Body> {
        Request::post("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_chat_creates_session_and_replies() {
        let app = build_router(test_state(vec![
            Ok(CLASSIFICATION.to_string()),
            Ok(DIAGNOSIS.to_string()),
        ]));

        let response = app
            .oneshot(chat_request(r#"{"content":"my pod keeps restarting"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let data = body_json(response).await;
        assert!(data.get("data").is_none());
        assert_eq!(data["session"]["name"], "Session 1");
        assert_eq!(data["session"]["messages"].as_array().unwrap().len(), 2);
        assert_eq!(data["message"]["role"], "assistant");
        assert_eq!(data["message"]["intent"]["category"], "pod-issues");
        assert_eq!(data["message"]["prescription"]["diagnosis"], "🩺 Restart Fatigue");
        assert_eq!(
            data["message"]["prescription"]["commands"],
            serde_json::json!(["kubectl describe pod web-0"])
        );
    }

    #[tokio::test]
    async fn test_chat_continues_existing_session() {
        let state = test_state(vec![
            Ok(CLASSIFICATION.to_string()),
            Ok(DIAGNOSIS.to_string()),
        ]);
        let session = state.consultation.create_session("On call").await.unwrap();
        let app = build_router(state);

        let body = format!(r#"{{"sessionId":"{}","content":"still broken"}}"#, session.id);
        let response = app.oneshot(chat_request(&body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["session"]["id"], session.id.to_string());
        assert_eq!(body["session"]["name"], "On call");
    }

    #[tokio::test]
    async fn test_chat_empty_content_is_invalid_request() {
        let app = build_router(test_state(vec![]));
        let response = app.oneshot(chat_request(r#"{"content":""}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "INVALID_REQUEST");
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_chat_malformed_json_is_invalid_payload() {
        let app = build_router(test_state(vec![]));
        let response = app.oneshot(chat_request("{not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "INVALID_PAYLOAD");
    }

    #[tokio::test]
    async fn test_chat_unknown_session_is_not_found() {
        let app = build_router(test_state(vec![]));
        let body = format!(
            r#"{{"sessionId":"{}","content":"hello"}}"#,
            uuid::Uuid::new_v4()
        );
        let response = app.oneshot(chat_request(&body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "SESSION_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_chat_diagnosis_failure_is_processing_failed() {
        let app = build_router(test_state(vec![
            Ok(CLASSIFICATION.to_string()),
            Err(LlmError::RateLimited),
        ]));
        let response = app
            .oneshot(chat_request(r#"{"content":"nodes not ready"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "PROCESSING_FAILED");
    }

    #[tokio::test]
    async fn test_chat_classification_failure_still_diagnoses() {
        let app = build_router(test_state(vec![
            Err(LlmError::EmptyResponse),
            Ok(DIAGNOSIS.to_string()),
        ]));
        let response = app
            .oneshot(chat_request(r#"{"content":"something odd"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let intent = &body["message"]["intent"];
        assert_eq!(intent["category"], "general");
        assert_eq!(intent["confidence"], 0.5);
        assert_eq!(intent["symptoms"], serde_json::json!(["unknown issue"]));
    }
}
