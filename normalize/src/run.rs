use sarif_explorer_schema::Run;
use sarif_explorer_schema::Tool;

use crate::error::NormalizeError;
use crate::error::Result;
use crate::model::RunId;
use crate::model::RunInfo;

/// Flatten one run into its [`RunInfo`].
///
/// Invocation fields come from the first invocation only. A blank tool name
/// is rejected: tool identity has no sensible default.
pub fn normalize_run(run: &Run, run_id: RunId, sarif_file_name: &str) -> Result<RunInfo> {
    let tool = &run.tool;
    if tool.name.trim().is_empty() {
        return Err(NormalizeError::MissingToolName { run_id });
    }

    let invocation = run
        .invocations
        .as_ref()
        .and_then(|invocations| invocations.first());

    Ok(RunInfo {
        run_id,
        tool_name: tool.name.clone(),
        tool_full_name: tool_full_name(tool),
        tool_version: tool
            .semantic_version
            .clone()
            .or_else(|| tool.version.clone()),
        cmd_line: invocation.and_then(|invocation| invocation.command_line.clone()),
        tool_file_name: invocation
            .and_then(|invocation| invocation.executable_location.as_ref())
            .map(|location| location.uri.clone()),
        working_dir: invocation.and_then(|invocation| invocation.working_directory.clone()),
        additional_properties: run.properties.clone(),
        uri_base_ids: run.original_uri_base_ids.clone(),
        sarif_file_name: sarif_file_name.to_string(),
    })
}

/// `fullName`, else `"<name> <semanticVersion>"`, else `name`.
pub fn tool_full_name(tool: &Tool) -> String {
    if let Some(full_name) = &tool.full_name {
        return full_name.clone();
    }
    match &tool.semantic_version {
        Some(version) => format!("{} {version}", tool.name),
        None => tool.name.clone(),
    }
}
