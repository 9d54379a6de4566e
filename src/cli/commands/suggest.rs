//! Suggest command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::{AutocompleteRequest, Orchestrator};
use anyhow::Result;

/// Run the suggest command: a single create-session + autocomplete round.
pub async fn run_suggest(
    url: &str,
    notes: &str,
    top_k: Option<usize>,
    show_context: bool,
    mut settings: Settings,
) -> Result<()> {
    preflight::check(Operation::Suggest, &settings)?;

    if let Some(k) = top_k {
        settings.retrieval.top_k = k;
    }

    let orchestrator = Orchestrator::new(settings)?;

    let spinner = Output::spinner("Fetching and indexing transcript...");
    let created = orchestrator.create_session(url).await;
    spinner.finish_and_clear();
    let created = created?;

    Output::info(&format!(
        "{} ({} chunks indexed)",
        created.title, created.chunk_count
    ));

    let spinner = Output::spinner("Generating suggestion...");
    let suggestion = orchestrator
        .autocomplete(&AutocompleteRequest {
            session_id: created.session_id,
            current_text: notes.to_string(),
            cursor_position: notes.chars().count(),
        })
        .await;
    spinner.finish_and_clear();
    let suggestion = suggestion?;

    Output::suggestion(notes, &suggestion.suggestion);

    if show_context {
        Output::header("Context");
        for (i, chunk) in suggestion.context.lines().enumerate() {
            Output::chunk(i, chunk);
        }
    }

    orchestrator.shutdown().await;
    Ok(())
}
