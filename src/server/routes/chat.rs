//! Persona chat endpoint
//!
//! # Flow
//!
//! 1. Validate the message list
//! 2. Rate-limit the caller IP and, when given, the session
//! 3. Screen the last user message, then redact it
//! 4. Build the persona prompt for the redacted message
//! 5. Route to a provider and relay the reply as SSE

use crate::core::persona::build_system_prompt;
use crate::core::router::{ChatResult, StreamingChat};
use crate::core::types::{ChatMessage, MessageRole};
use crate::server::routes::MALFORMED_MESSAGES;
use crate::server::state::AppState;
use crate::server::types::{ChatChunk, ChatRequest, ChunkMeta, Event};
use crate::server::utils::client_ip;
use crate::utils::error::{
    ErrorResponse, GatewayError, Result, SERVICE_UNAVAILABLE_MESSAGE,
};
use actix_web::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use actix_web::{HttpRequest, HttpResponse, web};
use futures::StreamExt;
use futures::stream::{self, BoxStream};
use tracing::{error, info, warn};

/// Message returned when the conversation does not end with the user
pub const LAST_MESSAGE_NOT_USER: &str = "最后一条消息必须是用户消息";

type SseBody = BoxStream<'static, std::result::Result<web::Bytes, GatewayError>>;

/// Configure chat routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/chat", web::post().to(chat));
}

/// Last message of a valid conversation
pub fn validate_messages(messages: &[ChatMessage]) -> Result<&ChatMessage> {
    let last = messages
        .last()
        .ok_or_else(|| GatewayError::invalid_request(MALFORMED_MESSAGES))?;
    if last.role != MessageRole::User {
        return Err(GatewayError::invalid_request(LAST_MESSAGE_NOT_USER));
    }
    Ok(last)
}

/// Chat endpoint
pub async fn chat(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<ChatRequest>,
) -> Result<HttpResponse> {
    let ChatRequest {
        messages,
        preset_id,
        session_id,
    } = body.into_inner();

    let last = validate_messages(&messages)?;

    let ip = client_ip(&req);
    let limit = state
        .rate_limiter
        .check_combined(&ip, session_id.as_deref())
        .await;
    if !limit.allowed {
        info!(ip = %ip, reset_at = limit.reset_at, "Chat request rate limited");
        return Err(GatewayError::rate_limited(
            limit.message.unwrap_or_default(),
            limit.reset_at,
        ));
    }

    let verdict = state.safety.check_safety(&last.content);
    if let Some(reason) = verdict.reason.filter(|_| !verdict.safe) {
        warn!(ip = %ip, reason = %reason, "Chat message blocked by safety filter");
        return Err(GatewayError::content_blocked(reason));
    }

    let sanitized = state.safety.sanitize(&last.content);
    let system_prompt = build_system_prompt(&sanitized, preset_id.as_deref());

    let mut outgoing = messages[..messages.len() - 1].to_vec();
    outgoing.push(ChatMessage::user(sanitized));

    let options = state.router.default_options();
    let body: SseBody = if state.config.router.streaming {
        let opened = state
            .router
            .chat_stream(&outgoing, &system_prompt, &options)
            .await?;
        info!(provider = %opened.provider, "Streaming chat reply");
        relay_stream(opened)
    } else {
        let result = state
            .router
            .chat(&outgoing, &system_prompt, &options)
            .await?;
        info!(provider = %result.provider, "Chat reply completed");
        single_reply(result)
    };

    Ok(HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, "text/event-stream"))
        .insert_header((CACHE_CONTROL, "no-cache"))
        .insert_header(("Connection", "keep-alive"))
        .streaming(body))
}

fn chunk_event(chunk: &ChatChunk) -> Option<web::Bytes> {
    match serde_json::to_string(chunk) {
        Ok(json) => Some(Event::default().data(&json).to_bytes()),
        Err(e) => {
            error!("Failed to serialize chunk: {}", e);
            None
        }
    }
}

fn error_event() -> web::Bytes {
    let body = ErrorResponse {
        error: "ai_service_error".to_string(),
        message: SERVICE_UNAVAILABLE_MESSAGE.to_string(),
        reset_at: None,
    };
    let data = serde_json::to_string(&body).unwrap_or_default();
    Event::default().event("error").data(&data).to_bytes()
}

fn done_event() -> web::Bytes {
    Event::default().data("[DONE]").to_bytes()
}

/// Relay provider deltas as chunks; an upstream failure ends the stream with an `error` event
fn relay_stream(opened: StreamingChat) -> SseBody {
    let StreamingChat {
        provider,
        model,
        mut stream,
    } = opened;
    let meta = ChunkMeta::new(model, provider);

    Box::pin(async_stream::stream! {
        let mut failed = false;
        while let Some(delta) = stream.next().await {
            match delta {
                Ok(content) => {
                    if let Some(bytes) = chunk_event(&meta.content(content)) {
                        yield Ok::<_, GatewayError>(bytes);
                    }
                }
                Err(e) => {
                    error!(provider = %provider, "Stream error: {}", e);
                    yield Ok::<_, GatewayError>(error_event());
                    failed = true;
                    break;
                }
            }
        }

        if !failed {
            if let Some(bytes) = chunk_event(&meta.stop()) {
                yield Ok::<_, GatewayError>(bytes);
            }
        }
        yield Ok::<_, GatewayError>(done_event());
    })
}

/// Whole reply as one content chunk followed by the stop chunk
fn single_reply(result: ChatResult) -> SseBody {
    let meta = ChunkMeta::new(result.model, result.provider);
    let events: Vec<web::Bytes> = [meta.content(result.content), meta.stop()]
        .iter()
        .filter_map(chunk_event)
        .chain(std::iter::once(done_event()))
        .collect();

    Box::pin(stream::iter(
        events.into_iter().map(Ok::<_, GatewayError>),
    ))
}
