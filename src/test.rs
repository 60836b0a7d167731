//! Shared mock host capabilities for tests.

use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;

use crate::ai::error::AiError;
use crate::ai::traits::chat::{
    ChatCallback, ChatMessage, ChatModelProvider, ChatResponse, MessageType, ModelDetails,
};
use crate::document::error::DocumentError;
use crate::document::output::CellOutput;
use crate::document::types::{ModelRef, NotebookMetadata};
use crate::execution::host::{CellExecution, DocumentHost, NotebookUi};

pub fn model(vendor: &str, id: &str) -> ModelDetails {
    ModelDetails {
        vendor: vendor.to_string(),
        id: id.to_string(),
    }
}

/// Scripted model capability: a fixed model list plus either a canned
/// stream of fragments or a failure.
pub struct MockProvider {
    pub models: Vec<ModelDetails>,
    pub fragments: Vec<String>,
    pub fail_with: Option<String>,
}

impl MockProvider {
    pub fn streaming(models: Vec<ModelDetails>, fragments: Vec<&str>) -> Self {
        Self {
            models,
            fragments: fragments.into_iter().map(str::to_string).collect(),
            fail_with: None,
        }
    }

    pub fn failing(models: Vec<ModelDetails>, message: &str) -> Self {
        Self {
            models,
            fragments: Vec::new(),
            fail_with: Some(message.to_string()),
        }
    }
}

#[async_trait]
impl ChatModelProvider for MockProvider {
    async fn list_models(&self, filter: Option<&ModelRef>) -> Result<Vec<ModelDetails>, AiError> {
        Ok(self
            .models
            .iter()
            .filter(|m| filter.map_or(true, |f| m.matches(f)))
            .cloned()
            .collect())
    }

    async fn chat(
        &self,
        model: &ModelDetails,
        _messages: Vec<ChatMessage>,
        callback: ChatCallback,
    ) -> Result<String, AiError> {
        if let Some(message) = &self.fail_with {
            callback(ChatResponse::new_with_arc(
                message.clone(),
                MessageType::Error,
                None,
            ));
            return Err(AiError::RequestFailed {
                vendor: model.vendor.clone(),
                model: model.id.clone(),
                details: message.clone(),
            });
        }

        let mut full = String::new();
        for fragment in &self.fragments {
            full.push_str(fragment);
            callback(ChatResponse::new_with_arc(
                fragment.clone(),
                MessageType::Text,
                None,
            ));
        }
        callback(ChatResponse::new_with_arc(
            String::new(),
            MessageType::Finished,
            None,
        ));

        Ok(full)
    }
}

/// What a mock execution handle observed, for assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionEvent {
    Started { order: u32, at: i64 },
    Output(CellOutput),
    Ended { success: bool, at: i64 },
}

/// Execution handle that records every lifecycle call.
#[derive(Clone, Default)]
pub struct RecordingExecution {
    events: Arc<StdMutex<Vec<ExecutionEvent>>>,
}

impl RecordingExecution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ExecutionEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl CellExecution for RecordingExecution {
    fn start(&mut self, order: u32, started_at: i64) {
        self.events.lock().unwrap().push(ExecutionEvent::Started {
            order,
            at: started_at,
        });
    }

    fn replace_output(&mut self, output: CellOutput) {
        self.events
            .lock()
            .unwrap()
            .push(ExecutionEvent::Output(output));
    }

    fn end(&mut self, success: bool, ended_at: i64) {
        self.events.lock().unwrap().push(ExecutionEvent::Ended {
            success,
            at: ended_at,
        });
    }
}

/// In-memory document handle whose metadata edits apply directly.
pub struct MockDocument {
    metadata: StdMutex<NotebookMetadata>,
}

impl MockDocument {
    pub fn new(metadata: NotebookMetadata) -> Self {
        Self {
            metadata: StdMutex::new(metadata),
        }
    }

    pub fn with_model(vendor: &str, id: &str) -> Self {
        Self::new(NotebookMetadata {
            model: Some(ModelRef {
                vendor: vendor.to_string(),
                id: id.to_string(),
            }),
            ..Default::default()
        })
    }

    pub fn current(&self) -> NotebookMetadata {
        self.metadata.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentHost for MockDocument {
    fn metadata(&self) -> NotebookMetadata {
        self.metadata.lock().unwrap().clone()
    }

    async fn update_metadata(&self, metadata: NotebookMetadata) -> Result<(), DocumentError> {
        *self.metadata.lock().unwrap() = metadata;
        Ok(())
    }
}

/// UI double with a scripted pick response; records everything shown.
#[derive(Default)]
pub struct MockUi {
    pick_response: Option<usize>,
    shown: StdMutex<Vec<Vec<String>>>,
    infos: StdMutex<Vec<String>>,
    errors: StdMutex<Vec<String>>,
}

impl MockUi {
    /// A UI whose picker is always dismissed.
    pub fn dismissing() -> Self {
        Self::default()
    }

    /// A UI that always picks the entry at `index`.
    pub fn picking(index: usize) -> Self {
        Self {
            pick_response: Some(index),
            ..Default::default()
        }
    }

    pub fn shown_pickers(&self) -> Vec<Vec<String>> {
        self.shown.lock().unwrap().clone()
    }

    pub fn info_notices(&self) -> Vec<String> {
        self.infos.lock().unwrap().clone()
    }

    pub fn error_notices(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotebookUi for MockUi {
    async fn pick(&self, entries: &[String]) -> Option<usize> {
        self.shown.lock().unwrap().push(entries.to_vec());
        self.pick_response
    }

    fn info(&self, message: &str) {
        self.infos.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}
