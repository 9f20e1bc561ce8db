use sarif_explorer_normalize::CodeFlow;
use sarif_explorer_normalize::NavigationCommand;
use sarif_explorer_normalize::Range;
use url::Url;

use crate::session::ExplorerSession;
use crate::verbosity::Verbosity;
use crate::verbosity::step_visible;

/// One navigation marker: where to draw it and what selecting it does.
#[derive(Debug, Clone, PartialEq)]
pub struct StepLens {
    pub range: Option<Range>,
    pub command: NavigationCommand,
}

/// Produces code-flow step markers for a document from the session's
/// active result.
#[derive(Debug, Default, Clone, Copy)]
pub struct CodeFlowLensProvider;

impl CodeFlowLensProvider {
    pub fn new() -> Self {
        Self
    }

    /// Markers for `document_uri`, ordered by flow, then thread, then step.
    /// Empty when no result is selected.
    pub fn provide(&self, session: &ExplorerSession, document_uri: &str) -> Vec<StepLens> {
        match session.active_result() {
            Some(result) => lenses_for_document(&result.code_flows, document_uri, session.verbosity()),
            None => Vec::new(),
        }
    }
}

/// Steps of `code_flows` located in `document_uri` and visible at
/// `verbosity`. Steps without a location are skipped.
pub fn lenses_for_document(
    code_flows: &[CodeFlow],
    document_uri: &str,
    verbosity: Verbosity,
) -> Vec<StepLens> {
    let document = Url::parse(document_uri).ok();

    code_flows
        .iter()
        .flat_map(|flow| flow.threads.iter())
        .flat_map(|thread| thread.steps.iter())
        .filter(|step| step_visible(step.importance, verbosity))
        .filter_map(|step| {
            let location = step.location.as_ref()?;
            if !same_document(&location.uri, document_uri, document.as_ref()) {
                return None;
            }
            Some(StepLens {
                range: location.range,
                command: step.command.clone(),
            })
        })
        .collect()
}

fn same_document(uri: &str, document_uri: &str, document: Option<&Url>) -> bool {
    match (Url::parse(uri).ok(), document) {
        (Some(left), Some(right)) => left == *right,
        _ => uri == document_uri,
    }
}
