//! Wire types of the chat endpoint

use crate::core::providers::ProviderKind;
use crate::core::types::ChatMessage;
use actix_web::web;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub preset_id: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// One streamed chunk, in the OpenAI `chat.completion.chunk` shape plus the serving provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatChunk {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub provider: ProviderKind,
    pub choices: Vec<ChunkChoice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkChoice {
    pub index: u32,
    pub delta: ChunkDelta,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkDelta {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub content: Option<String>,
}

/// Identity of one streamed reply, shared by all of its chunks
#[derive(Debug, Clone)]
pub struct ChunkMeta {
    pub id: String,
    pub created: i64,
    pub model: String,
    pub provider: ProviderKind,
}

impl ChunkMeta {
    pub fn new(model: String, provider: ProviderKind) -> Self {
        Self {
            id: format!("chatcmpl-{}", uuid::Uuid::new_v4()),
            created: chrono::Utc::now().timestamp(),
            model,
            provider,
        }
    }

    fn chunk(&self, delta: ChunkDelta, finish_reason: Option<&str>) -> ChatChunk {
        ChatChunk {
            id: self.id.clone(),
            object: "chat.completion.chunk".to_string(),
            created: self.created,
            model: self.model.clone(),
            provider: self.provider,
            choices: vec![ChunkChoice {
                index: 0,
                delta,
                finish_reason: finish_reason.map(str::to_string),
            }],
        }
    }

    pub fn content(&self, content: String) -> ChatChunk {
        self.chunk(
            ChunkDelta {
                content: Some(content),
            },
            None,
        )
    }

    pub fn stop(&self) -> ChatChunk {
        self.chunk(ChunkDelta::default(), Some("stop"))
    }
}

/// Server-sent event
#[derive(Debug, Clone, Default)]
pub struct Event {
    /// Event type
    pub event: Option<String>,
    /// Event data
    pub data: String,
}

impl Event {
    /// Set the event type
    pub fn event(mut self, event: &str) -> Self {
        self.event = Some(event.to_string());
        self
    }

    /// Set the event data
    pub fn data(mut self, data: &str) -> Self {
        self.data = data.to_string();
        self
    }

    /// Convert event to bytes for SSE transmission
    pub fn to_bytes(&self) -> web::Bytes {
        let mut result = String::new();
        if let Some(event) = &self.event {
            result.push_str(&format!("event: {}\n", event));
        }
        result.push_str(&format!("data: {}\n\n", self.data));
        web::Bytes::from(result)
    }
}
