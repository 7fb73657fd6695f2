//! HTTP surface: the chat endpoint and chart retrieval

use crate::error::ApiError;
use crate::state::AppState;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Body of `POST /chat`
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub user_input: String,
}

/// Body of a successful `POST /chat` response
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Build the application router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat))
        .route("/chart/{ticker}", get(chart))
}

async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    info!(chars = request.user_input.len(), "Chat request received");
    let reply = state.orchestrator.answer(&request.user_input).await?;
    Ok(Json(ChatReply { reply }))
}

async fn chart(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Response, ApiError> {
    let path = state
        .charts
        .path_for(&ticker)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok(([(header::CONTENT_TYPE, "image/png")], bytes).into_response()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ApiError::ChartNotFound(ticker)),
        Err(e) => Err(ApiError::Internal(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::Orchestrator;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use stockchat_llm::{ChatClient, ChatMessage, CompletionRequest, LlmError, ToolCall};
    use stockchat_market::tools::RsiTool;
    use stockchat_market::{ChartStore, DailyBar, MarketData};
    use stockchat_tools::ToolRegistry;
    use tower::ServiceExt;

    struct ScriptedClient {
        responses: Mutex<VecDeque<ChatMessage>>,
    }

    impl ScriptedClient {
        fn new(responses: Vec<ChatMessage>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }
    }

    #[async_trait]
    impl ChatClient for ScriptedClient {
        async fn complete(&self, _request: CompletionRequest) -> stockchat_llm::Result<ChatMessage> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| LlmError::MalformedResponse("script exhausted".to_string()))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    /// Fixed rising price series behind the MarketData seam
    struct RisingSeries;

    #[async_trait]
    impl MarketData for RisingSeries {
        async fn daily_history(&self, _ticker: &str) -> stockchat_market::Result<Vec<DailyBar>> {
            use chrono::{Duration, TimeZone, Utc};
            Ok([1.0, 2.0, 3.0, 4.0]
                .iter()
                .enumerate()
                .map(|(i, &close)| DailyBar {
                    timestamp: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
                        + Duration::days(i as i64),
                    close,
                })
                .collect())
        }
    }

    fn app(responses: Vec<ChatMessage>, charts: ChartStore) -> Router {
        app_with_registry(responses, ToolRegistry::new(), charts)
    }

    fn app_with_registry(
        responses: Vec<ChatMessage>,
        registry: ToolRegistry,
        charts: ChartStore,
    ) -> Router {
        let orchestrator = Arc::new(Orchestrator::new(
            Arc::new(ScriptedClient::new(responses)),
            Arc::new(registry),
            "gpt-4o-mini".to_string(),
        ));
        router().with_state(AppState::new(orchestrator, charts))
    }

    fn temp_store(tag: &str) -> ChartStore {
        ChartStore::new(std::env::temp_dir().join(format!("stockchat-routes-{tag}")))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn chat_returns_reply() {
        let app = app(
            vec![ChatMessage::assistant("AAPL closed at 230.1.")],
            temp_store("chat"),
        );

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/chat")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"user_input":"price of AAPL?"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body, json!({"reply": "AAPL closed at 230.1."}));
    }

    #[tokio::test]
    async fn chat_with_tool_call_round_trips_to_reply() {
        // The model asks for calculate_RSI, the tool runs against the stub
        // series, and the second-round text comes back verbatim as the reply
        let registry = ToolRegistry::new();
        registry.register(Arc::new(RsiTool::new(Arc::new(RisingSeries))));

        let app = app_with_registry(
            vec![
                ChatMessage::assistant_tool_calls(vec![ToolCall::function(
                    "call_1",
                    "calculate_RSI",
                    r#"{"ticker":"AAPL"}"#,
                )]),
                ChatMessage::assistant("AAPL's RSI is 100, deep in overbought territory."),
            ],
            registry,
            temp_store("rsi"),
        );

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/chat")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"user_input":"What is the RSI of AAPL?"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(
            body,
            json!({"reply": "AAPL's RSI is 100, deep in overbought territory."})
        );
    }

    #[tokio::test]
    async fn chat_upstream_failure_is_502_with_generic_detail() {
        // Empty script: the first model round fails
        let app = app(vec![], temp_store("upstream"));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/chat")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"user_input":"hi"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body, json!({"detail": "upstream service failure"}));
    }

    #[tokio::test]
    async fn chart_is_404_before_any_plot() {
        let app = app(vec![], temp_store("missing"));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/chart/NVDA")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body, json!({"detail": "no chart found for NVDA"}));
    }

    #[tokio::test]
    async fn chart_serves_rendered_bytes() {
        use chrono::{Duration, TimeZone, Utc};

        let charts = temp_store("serve");
        let bars: Vec<DailyBar> = (0..5)
            .map(|i| DailyBar {
                timestamp: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
                    + Duration::days(i),
                close: 100.0 + i as f64,
            })
            .collect();
        let rendered = charts.render("AAPL", &bars).unwrap();
        let expected = std::fs::read(&rendered).unwrap();

        let app = app(vec![], charts);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/chart/aapl")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "image/png"
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(bytes.as_ref(), expected.as_slice());

        std::fs::remove_file(rendered).unwrap();
    }

    #[tokio::test]
    async fn unusable_ticker_is_400() {
        let app = app(vec![], temp_store("bad"));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/chart/%20%20")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
