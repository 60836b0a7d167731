use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use log::error;
use tokio::sync::mpsc;
use tokio::sync::Mutex;

use crate::ai::traits::chat::{
    ChatCallback, ChatMessage, ChatModelProvider, ChatResponse, MessageType,
};
use crate::ai::traits::stoppable::Stoppable;
use crate::document::output::CellOutput;
use crate::impl_stoppable;
use crate::selector::show_model_selector;

use super::host::{CellExecution, DocumentHost, NotebookUi};

/// One cell queued for execution: its full text plus the host execution
/// handle that will receive lifecycle calls and output replacements.
pub struct CellRun {
    pub text: String,
    pub execution: Box<dyn CellExecution>,
}

impl CellRun {
    pub fn new(text: impl Into<String>, execution: Box<dyn CellExecution>) -> Self {
        Self {
            text: text.into(),
            execution,
        }
    }
}

/// Drives cell executions against the host-supplied model capability.
///
/// Executions are tagged with a monotonically increasing order number
/// scoped to this controller instance (not persisted) and wall-clock
/// start/end timestamps for host-side display.
pub struct NotebookController {
    provider: Arc<dyn ChatModelProvider>,
    execution_order: AtomicU32,
    stop_flag: Arc<Mutex<bool>>,
}

impl_stoppable!(NotebookController);

impl NotebookController {
    pub fn new(provider: Arc<dyn ChatModelProvider>) -> Self {
        Self {
            provider,
            execution_order: AtomicU32::new(0),
            stop_flag: Arc::new(Mutex::new(false)),
        }
    }

    /// Requests that in-flight executions stop at the next fragment
    /// boundary. The flag stays set until cleared with
    /// [`Stoppable::set_stop_flag`].
    pub async fn interrupt(&self) {
        self.set_stop_flag(true).await;
    }

    /// Executes every queued cell. Cells are started concurrently and
    /// complete in whatever order the underlying model calls produce.
    pub async fn execute(
        &self,
        cells: Vec<CellRun>,
        document: &dyn DocumentHost,
        ui: &dyn NotebookUi,
    ) {
        join_all(
            cells
                .into_iter()
                .map(|run| self.execute_cell(run, document, ui)),
        )
        .await;
    }

    /// Executes a single cell as one stateless model call: the cell's full
    /// text becomes the only user message, and each streamed fragment
    /// re-renders the whole output buffer as markdown.
    ///
    /// Without a configured model the cell is not executed: the model
    /// picker is shown instead and the cell's output is left untouched.
    pub async fn execute_cell(
        &self,
        mut run: CellRun,
        document: &dyn DocumentHost,
        ui: &dyn NotebookUi,
    ) {
        let configured = document.metadata().model;

        let models = match self.provider.list_models(configured.as_ref()).await {
            Ok(models) => models,
            Err(e) => {
                error!("model discovery failed: {}", e);
                ui.info("No models available");
                return;
            }
        };

        if configured.is_none() {
            if let Err(e) = show_model_selector(&models, document, ui).await {
                error!("model selection failed: {}", e);
            }
            ui.info("No model selected");
            return;
        }

        if models.is_empty() {
            ui.info("No matching model available");
            return;
        }

        let model = models[0].clone();
        let order = self.execution_order.fetch_add(1, Ordering::SeqCst) + 1;
        run.execution.start(order, Utc::now().timestamp_millis());

        let (tx, mut rx) = mpsc::channel::<Arc<ChatResponse>>(100);
        let callback: ChatCallback = Box::new(move |chunk| {
            if let Err(e) = tx.try_send(chunk) {
                error!("failed to forward stream chunk: {}", e);
            }
        });

        let provider = self.provider.clone();
        let messages = vec![ChatMessage::user(run.text.clone())];
        let call = tokio::spawn(async move { provider.chat(&model, messages, callback).await });

        let mut buffer = String::new();
        let mut failure: Option<String> = None;
        let mut interrupted = false;

        while let Some(chunk) = rx.recv().await {
            if self.should_stop().await {
                interrupted = true;
                break;
            }

            match chunk.r#type {
                MessageType::Text => {
                    buffer.push_str(&chunk.chunk);
                    run.execution
                        .replace_output(CellOutput::markdown(buffer.clone()));
                }
                MessageType::Error => {
                    failure = Some(chunk.chunk.clone());
                    break;
                }
                MessageType::Finished => break,
            }
        }
        drop(rx);

        if failure.is_none() && !interrupted {
            match call.await {
                Ok(Ok(_)) => {}
                Ok(Err(e)) => failure = Some(e.to_string()),
                Err(e) => failure = Some(e.to_string()),
            }
        } else {
            call.abort();
        }

        let success = failure.is_none() && !interrupted;
        if let Some(message) = failure {
            run.execution.replace_output(CellOutput::error("Error", message));
        }
        run.execution.end(success, Utc::now().timestamp_millis());
    }
}
