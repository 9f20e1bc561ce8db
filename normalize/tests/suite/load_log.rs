use anyhow::Result;
use pretty_assertions::assert_eq;
use sarif_explorer_normalize::NormalizeError;
use sarif_explorer_normalize::Normalizer;
use sarif_explorer_normalize::NormalizerConfig;
use sarif_explorer_schema::Importance;
use sarif_explorer_schema::ResultLevel;
use sarif_explorer_schema::SarifLog;
use serde_json::Value;
use serde_json::json;

fn offline_normalizer() -> Normalizer {
    Normalizer::new(NormalizerConfig {
        resolve_files: false,
        ..Default::default()
    })
}

fn thread(steps: usize, essential_at: Option<usize>) -> Value {
    let locations: Vec<Value> = (0..steps)
        .map(|index| {
            let mut step = json!({
                "location": {
                    "physicalLocation": {
                        "fileLocation": { "uri": "src/flow.c", "uriBaseId": "SRCROOT" },
                        "region": { "startLine": index + 1 }
                    }
                }
            });
            if essential_at == Some(index) {
                step["importance"] = json!("essential");
            }
            step
        })
        .collect();
    json!({ "locations": locations })
}

fn sample_log() -> Value {
    json!({
        "version": "2.0.0",
        "runs": [
            {
                "tool": { "name": "Sample", "semanticVersion": "1.0" },
                "originalUriBaseIds": { "SRCROOT": "file:///work/" },
                "resources": {
                    "rules": {
                        "R1": {
                            "configuration": { "defaultLevel": "error" },
                            "messageStrings": { "overflow": "Buffer '{0}' overflows" }
                        }
                    }
                },
                "results": [
                    { "ruleId": "R1", "ruleMessageId": "overflow", "message": { "arguments": ["buf"] } },
                    { "ruleId": "R1", "level": "note", "message": { "text": "Looks fine" } },
                    {
                        "message": { "text": "Tainted data" },
                        "codeFlows": [{
                            "threadFlows": [thread(4, Some(0)), thread(4, None), thread(4, None)]
                        }]
                    }
                ]
            },
            {
                "tool": { "name": "Other", "fullName": "Other Analyzer 2" },
                "results": [{ "message": { "text": "second run" } }]
            }
        ]
    })
}

#[tokio::test]
async fn normalizes_every_run_and_result_in_order() -> Result<()> {
    let log: SarifLog = serde_json::from_value(sample_log())?;
    let loaded = offline_normalizer()
        .normalize_log(&log, "scan.sarif", 10)
        .await?;

    assert_eq!(loaded.sarif_file_name, "scan.sarif");
    assert_eq!(loaded.runs.len(), 2);
    assert_eq!(loaded.result_count(), 4);

    let first = loaded.run(10).expect("run 10");
    assert_eq!(first.tool_full_name, "Sample 1.0");
    let second = loaded.run(11).expect("run 11");
    assert_eq!(second.tool_full_name, "Other Analyzer 2");

    assert_eq!(loaded.results_for_run(10).count(), 3);
    assert_eq!(loaded.results_for_run(11).count(), 1);
    assert_eq!(loaded.results[3].message.text, "second run");

    Ok(())
}

#[tokio::test]
async fn applies_severity_and_message_precedence() -> Result<()> {
    let log: SarifLog = serde_json::from_value(sample_log())?;
    let loaded = offline_normalizer()
        .normalize_log(&log, "scan.sarif", 0)
        .await?;

    let from_rule = &loaded.results[0];
    assert_eq!(from_rule.severity_level, ResultLevel::Error);
    assert_eq!(from_rule.message.text, "Buffer 'buf' overflows");
    assert_eq!(from_rule.locations, vec![None]);

    let explicit = &loaded.results[1];
    assert_eq!(explicit.severity_level, ResultLevel::Note);
    assert_eq!(explicit.message.text, "Looks fine");

    let no_rule = &loaded.results[3];
    assert_eq!(no_rule.severity_level, ResultLevel::Warning);

    Ok(())
}

#[tokio::test]
async fn code_flows_keep_shape_and_default_importance() -> Result<()> {
    let log: SarifLog = serde_json::from_value(sample_log())?;
    let loaded = offline_normalizer()
        .normalize_log(&log, "scan.sarif", 0)
        .await?;

    let result = &loaded.results[2];
    assert_eq!(result.step_count(), 12);
    let threads = &result.code_flows[0].threads;
    assert_eq!(threads.len(), 3);

    for (thread_index, thread) in threads.iter().enumerate() {
        assert_eq!(thread.steps.len(), 4);
        for (step_index, step) in thread.steps.iter().enumerate() {
            let location = step.location.as_ref().expect("step location");
            assert_eq!(location.uri, "file:///work/src/flow.c");
            assert_eq!(
                location.range.and_then(|range| range.start_line()),
                Some(step_index as u32 + 1)
            );
            let expected = if thread_index == 0 && step_index == 0 {
                Importance::Essential
            } else {
                Importance::Important
            };
            assert_eq!(step.importance, expected);
            assert_eq!(step.command.arguments.thread_flow, thread_index);
            assert_eq!(step.command.arguments.step, step_index);
        }
    }

    Ok(())
}

#[tokio::test]
async fn concurrent_resolution_matches_sequential() -> Result<()> {
    let log: SarifLog = serde_json::from_value(sample_log())?;
    let sequential = offline_normalizer()
        .normalize_log(&log, "scan.sarif", 0)
        .await?;
    let concurrent = Normalizer::new(NormalizerConfig {
        resolve_files: false,
        concurrent_resolution: true,
        ..Default::default()
    })
    .normalize_log(&log, "scan.sarif", 0)
    .await?;

    assert_eq!(sequential, concurrent);
    Ok(())
}

#[tokio::test]
async fn blank_tool_name_fails_the_load() -> Result<()> {
    let log: SarifLog = serde_json::from_value(json!({
        "version": "2.0.0",
        "runs": [
            { "tool": { "name": "Fine" } },
            { "tool": { "name": "" } }
        ]
    }))?;

    let err = offline_normalizer()
        .normalize_log(&log, "scan.sarif", 0)
        .await
        .unwrap_err();
    assert!(matches!(err, NormalizeError::MissingToolName { run_id: 1 }));
    Ok(())
}

#[test]
fn rejects_other_schema_versions() {
    let parsed = SarifLog::from_json_str(r#"{ "version": "2.1.0", "runs": [] }"#);
    assert!(parsed.is_err());
}
