use sarif_explorer_schema::ThreadFlowLocation;
use tracing::debug;

use crate::location::LocationResolver;
use crate::message::StringTable;
use crate::message::format_message;
use crate::model::CodeFlow;
use crate::model::NavigationCommand;
use crate::model::SELECT_STEP_COMMAND;
use crate::model::Step;
use crate::model::StepRef;
use crate::model::ThreadFlow;
use crate::ordered::map_in_order;

/// Rebuild the flow → thread → step hierarchy of a result.
///
/// Flows, threads and steps keep their declared order; [`StepRef`] indices in
/// each step's command are positions in the returned vectors.
pub async fn normalize_code_flows(
    resolver: &LocationResolver<'_>,
    code_flows: Option<&[sarif_explorer_schema::CodeFlow]>,
    tables: &[&StringTable],
) -> Vec<CodeFlow> {
    let Some(code_flows) = code_flows else {
        return Vec::new();
    };

    let mut flows = Vec::with_capacity(code_flows.len());
    for (flow_index, code_flow) in code_flows.iter().enumerate() {
        let mut threads = Vec::with_capacity(code_flow.thread_flows.len());
        for (thread_index, thread_flow) in code_flow.thread_flows.iter().enumerate() {
            let steps = map_in_order(
                resolver.config().concurrent_resolution,
                thread_flow.locations.iter().enumerate(),
                |(step_index, thread_flow_location)| {
                    let step_ref = StepRef {
                        code_flow: flow_index,
                        thread_flow: thread_index,
                        step: step_index,
                    };
                    normalize_step(resolver, thread_flow_location, step_ref, tables)
                },
            )
            .await;

            threads.push(ThreadFlow {
                id: thread_flow.id.clone(),
                message: thread_flow
                    .message
                    .as_ref()
                    .and_then(|message| format_message(message, tables, &[])),
                steps,
            });
        }

        flows.push(CodeFlow {
            message: code_flow
                .message
                .as_ref()
                .and_then(|message| format_message(message, tables, &[])),
            threads,
        });
    }

    debug!(
        "Normalized {} code flows ({} steps)",
        flows.len(),
        flows
            .iter()
            .flat_map(|flow| flow.threads.iter())
            .map(|thread| thread.steps.len())
            .sum::<usize>()
    );
    flows
}

async fn normalize_step(
    resolver: &LocationResolver<'_>,
    thread_flow_location: &ThreadFlowLocation,
    step_ref: StepRef,
    tables: &[&StringTable],
) -> Step {
    let location = match &thread_flow_location.location {
        Some(location) => resolver.resolve_location(location, tables).await,
        None => None,
    };

    let title = location
        .as_ref()
        .and_then(|location| location.message.as_ref())
        .map(|message| message.text.clone())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| format!("Step {}", step_ref.step + 1));

    Step {
        command: NavigationCommand {
            command: SELECT_STEP_COMMAND.to_string(),
            title,
            arguments: step_ref,
            target: location.clone(),
        },
        location,
        importance: thread_flow_location.importance.unwrap_or_default(),
        step: thread_flow_location.step,
        kind: thread_flow_location.kind.clone(),
        module: thread_flow_location.module.clone(),
        nesting_level: thread_flow_location.nesting_level,
        execution_order: thread_flow_location.execution_order,
        timestamp: thread_flow_location.timestamp.clone(),
        state: thread_flow_location.state.clone(),
    }
}
