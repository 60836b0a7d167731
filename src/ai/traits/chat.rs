use std::sync::Arc;

use async_trait::async_trait;
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::ai::error::AiError;
use crate::document::types::ModelRef;

/// Kind of a streamed response chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Error,
    Finished,
    Text,
}

impl Default for MessageType {
    fn default() -> Self {
        MessageType::Text
    }
}

impl<'de> Deserialize<'de> for MessageType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(MessageType::from_str(&s))
    }
}

impl From<MessageType> for &str {
    fn from(value: MessageType) -> Self {
        match value {
            MessageType::Error => "error",
            MessageType::Finished => "finished",
            MessageType::Text => "text",
        }
    }
}

impl MessageType {
    pub fn from_str(value: &str) -> Self {
        match value {
            "error" => MessageType::Error,
            "finished" => MessageType::Finished,
            "text" => MessageType::Text,
            _ => {
                warn!("invalid message type: {}, defaulting to text", value);
                MessageType::Text
            }
        }
    }
}

/// One streamed chunk of a model response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub chunk: String,
    pub r#type: MessageType,
    pub metadata: Option<Value>,
}

impl ChatResponse {
    pub fn new_with_arc(chunk: String, r#type: MessageType, metadata: Option<Value>) -> Arc<Self> {
        Arc::new(Self {
            chunk,
            r#type,
            metadata,
        })
    }
}

/// Role tag on a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A single role-tagged message sent to a model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// A chat-capable model surfaced by the host's discovery interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDetails {
    pub vendor: String,
    pub id: String,
}

impl ModelDetails {
    /// The human-readable picker label.
    pub fn label(&self) -> String {
        format!("{} - {}", self.id, self.vendor)
    }

    /// Whether this model matches a stored `{vendor, id}` selection.
    pub fn matches(&self, selection: &ModelRef) -> bool {
        self.vendor == selection.vendor && self.id == selection.id
    }

    pub fn to_ref(&self) -> ModelRef {
        ModelRef {
            vendor: self.vendor.clone(),
            id: self.id.clone(),
        }
    }
}

/// Callback invoked for every streamed chunk.
pub type ChatCallback = Box<dyn Fn(Arc<ChatResponse>) + Send + 'static>;

/// The model-invocation capability supplied by the environment.
///
/// Implementations bridge to whatever actually serves the models; the
/// engine only ever talks through this seam.
#[async_trait]
pub trait ChatModelProvider: Send + Sync {
    /// Lists chat-capable models, optionally filtered by a stored
    /// `{vendor, id}` selection. An absent filter requests all models.
    async fn list_models(&self, filter: Option<&ModelRef>) -> Result<Vec<ModelDetails>, AiError>;

    /// Opens a conversation against `model` with the given role-tagged
    /// messages, streaming chunks through `callback` as they arrive.
    ///
    /// # Arguments
    /// - `model`: which discovered model to invoke.
    /// - `messages`: the ordered conversation; roles are `system`, `user`
    ///   or `assistant`.
    /// - `callback`: receives every streamed [`ChatResponse`]. A `text`
    ///   chunk carries an incremental fragment; `error` carries a failure;
    ///   `finished` marks the end of the stream.
    ///
    /// # Returns
    /// The full accumulated response text, or an error if the request or
    /// stream failed.
    async fn chat(
        &self,
        model: &ModelDetails,
        messages: Vec<ChatMessage>,
        callback: ChatCallback,
    ) -> Result<String, AiError>;
}
