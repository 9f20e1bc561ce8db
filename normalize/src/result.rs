use sarif_explorer_schema::DefaultLevel;
use sarif_explorer_schema::Resources;
use sarif_explorer_schema::ResultLevel;
use sarif_explorer_schema::Rule;
use tracing::debug;

use crate::code_flow::normalize_code_flows;
use crate::location::LocationResolver;
use crate::message::StringTable;
use crate::message::format_message;
use crate::message::format_text;
use crate::message::lookup_message_string;
use crate::model::Attachment;
use crate::model::FormattedMessage;
use crate::model::Location;
use crate::model::ResultInfo;
use crate::model::RunId;
use crate::ordered::map_in_order;

/// Flatten one result into its [`ResultInfo`].
///
/// Rule metadata is bound through `resources.rules[result.ruleId]`. Severity
/// is the explicit level, else the rule's configured default, else
/// `warning`. Nothing here fails: every absent member has a default.
pub async fn normalize_result(
    resolver: &LocationResolver<'_>,
    result: &sarif_explorer_schema::Result,
    run_id: RunId,
    resources: Option<&Resources>,
) -> ResultInfo {
    let rule = bind_rule(result, resources);
    let run_strings = resources.and_then(|resources| resources.message_strings.as_ref());
    let rule_strings = rule.and_then(|rule| rule.message_strings.as_ref());
    let tables: Vec<&StringTable> = rule_strings.into_iter().chain(run_strings).collect();

    let locations = resolver
        .resolve_locations(result.locations.as_deref(), &tables)
        .await;
    let related_locs = resolver
        .resolve_locations(result.related_locations.as_deref(), &tables)
        .await;
    let attachments =
        normalize_attachments(resolver, result.attachments.as_deref(), &tables).await;

    let code_flows = normalize_code_flows(resolver, result.code_flows.as_deref(), &tables).await;

    let candidates: Vec<Option<Location>> = locations
        .iter()
        .chain(related_locs.iter())
        .cloned()
        .collect();

    let severity_level = result
        .level
        .or_else(|| rule_default_level(rule))
        .unwrap_or(ResultLevel::Warning);

    let message = result_message(
        result,
        rule,
        &tables,
        &candidates,
        &resolver.config().missing_message_text,
    );

    let rule_description = rule
        .and_then(|rule| rule.full_description.as_ref().or(rule.short_description.as_ref()))
        .and_then(|description| format_message(description, &tables, &candidates));

    ResultInfo {
        run_id,
        assigned_location: locations.first().cloned().flatten(),
        locations,
        related_locs,
        attachments,
        code_flows,
        rule_id: rule
            .and_then(|rule| rule.id.clone())
            .or_else(|| result.rule_id.clone()),
        rule_name: rule
            .and_then(|rule| rule.name.as_ref())
            .and_then(|name| format_message(name, &tables, &[]))
            .map(|name| name.text),
        rule_help_uri: rule.and_then(|rule| rule.help_uri.clone()),
        rule_description,
        severity_level,
        message,
        additional_properties: result.properties.clone(),
    }
}

fn bind_rule<'a>(
    result: &sarif_explorer_schema::Result,
    resources: Option<&'a Resources>,
) -> Option<&'a Rule> {
    let rule_id = result.rule_id.as_deref()?;
    let rule = resources
        .and_then(|resources| resources.rules.as_ref())
        .and_then(|rules| rules.get(rule_id));
    if rule.is_none() {
        debug!("Rule {rule_id} is not declared in the run resources");
    }
    rule
}

fn rule_default_level(rule: Option<&Rule>) -> Option<ResultLevel> {
    rule?
        .configuration
        .as_ref()?
        .default_level
        .map(DefaultLevel::to_result_level)
}

/// `message.text`, else the `messageId` lookup, else the rule string named by
/// `ruleMessageId`, else `missing_text`.
fn result_message(
    result: &sarif_explorer_schema::Result,
    rule: Option<&Rule>,
    tables: &[&StringTable],
    candidates: &[Option<Location>],
    missing_text: &str,
) -> FormattedMessage {
    let message = result.message.as_ref();
    if let Some(formatted) = message.and_then(|message| format_message(message, tables, candidates)) {
        return formatted;
    }

    let arguments = message
        .and_then(|message| message.arguments.as_deref())
        .unwrap_or_default();
    let rule_string = result.rule_message_id.as_deref().and_then(|id| {
        let rule_strings = rule.and_then(|rule| rule.message_strings.as_ref())?;
        lookup_message_string(id, &[rule_strings])
    });

    match rule_string {
        Some(text) => format_text(text, arguments, candidates),
        None => FormattedMessage::plain(missing_text),
    }
}

async fn normalize_attachments(
    resolver: &LocationResolver<'_>,
    attachments: Option<&[sarif_explorer_schema::Attachment]>,
    tables: &[&StringTable],
) -> Option<Vec<Attachment>> {
    let attachments = attachments.filter(|attachments| !attachments.is_empty())?;

    let mut normalized = Vec::with_capacity(attachments.len());
    for attachment in attachments {
        let file = resolver.resolve(&attachment.file_location, None).await;
        let regions_of_interest = match attachment.regions.as_deref() {
            Some(regions) => Some(
                map_in_order(resolver.config().concurrent_resolution, regions, |region| {
                    resolver.resolve(&attachment.file_location, Some(region))
                })
                .await,
            ),
            None => None,
        };

        normalized.push(Attachment {
            description: attachment
                .description
                .as_ref()
                .and_then(|description| format_message(description, tables, &[])),
            file,
            regions_of_interest,
        });
    }
    Some(normalized)
}
