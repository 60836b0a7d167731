use crate::ai::traits::chat::{ChatModelProvider, ModelDetails};
use crate::error::Result;
use crate::execution::host::{DocumentHost, NotebookUi};

/// The select-model command: lets the user pick the active chat model for
/// the current notebook document.
///
/// Shows a user-visible error when no notebook document is active, and an
/// informational notice when discovery returns nothing.
pub async fn select_model(
    document: Option<&dyn DocumentHost>,
    provider: &dyn ChatModelProvider,
    ui: &dyn NotebookUi,
) -> Result<()> {
    let document = match document {
        Some(document) => document,
        None => {
            ui.error("No AI notebook active");
            return Ok(());
        }
    };

    let models = provider.list_models(None).await?;

    show_model_selector(&models, document, ui).await
}

/// Presents the model picker and records the chosen `{vendor, id}` into
/// the document metadata through the host's edit capability.
///
/// Dismissing the picker is a no-op; an empty model list is reported as an
/// informational notice rather than an error.
pub async fn show_model_selector(
    models: &[ModelDetails],
    document: &dyn DocumentHost,
    ui: &dyn NotebookUi,
) -> Result<()> {
    if models.is_empty() {
        ui.info("No models available");
        return Ok(());
    }

    let entries: Vec<String> = models.iter().map(ModelDetails::label).collect();

    let selected = match ui.pick(&entries).await {
        Some(index) => match models.get(index) {
            Some(model) => model,
            None => return Ok(()),
        },
        None => return Ok(()),
    };

    let mut metadata = document.metadata();
    metadata.model = Some(selected.to_ref());
    document.update_metadata(metadata).await?;

    ui.info(&format!("Model \"{}\" selected", selected.id));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{model, MockDocument, MockProvider, MockUi};

    #[tokio::test]
    async fn records_the_selected_model_into_metadata() {
        let models = vec![model("copilot", "gpt-4o"), model("ollama", "llama3")];
        let document = MockDocument::new(Default::default());
        let ui = MockUi::picking(1);

        show_model_selector(&models, &document, &ui).await.unwrap();

        assert_eq!(document.current().model, Some(models[1].to_ref()));
        assert_eq!(
            ui.shown_pickers(),
            vec![vec![
                "gpt-4o - copilot".to_string(),
                "llama3 - ollama".to_string()
            ]]
        );
        assert!(ui
            .info_notices()
            .contains(&"Model \"llama3\" selected".to_string()));
    }

    #[tokio::test]
    async fn dismissal_leaves_metadata_untouched() {
        let models = vec![model("copilot", "gpt-4o")];
        let document = MockDocument::new(Default::default());
        let ui = MockUi::dismissing();

        show_model_selector(&models, &document, &ui).await.unwrap();

        assert!(document.current().model.is_none());
        assert!(ui.info_notices().is_empty());
    }

    #[tokio::test]
    async fn empty_model_list_reports_an_informational_notice() {
        let document = MockDocument::new(Default::default());
        let ui = MockUi::picking(0);

        show_model_selector(&[], &document, &ui).await.unwrap();

        assert!(document.current().model.is_none());
        assert!(ui.shown_pickers().is_empty());
        assert!(ui
            .info_notices()
            .contains(&"No models available".to_string()));
    }

    #[tokio::test]
    async fn command_without_an_active_document_shows_an_error() {
        let provider = MockProvider::streaming(vec![model("copilot", "gpt-4o")], vec![]);
        let ui = MockUi::picking(0);

        select_model(None, &provider, &ui).await.unwrap();

        assert!(ui
            .error_notices()
            .contains(&"No AI notebook active".to_string()));
        assert!(ui.shown_pickers().is_empty());
    }

    #[tokio::test]
    async fn command_discovers_models_and_applies_the_choice() {
        let provider = MockProvider::streaming(vec![model("copilot", "gpt-4o")], vec![]);
        let document = MockDocument::new(Default::default());
        let ui = MockUi::picking(0);

        select_model(Some(&document), &provider, &ui).await.unwrap();

        assert_eq!(
            document.current().model,
            Some(model("copilot", "gpt-4o").to_ref())
        );
    }
}
