use std::time::Duration;

use anyhow::Result;
use pretty_assertions::assert_eq;
use sarif_explorer_code_flow_lens::CodeFlowLensProvider;
use sarif_explorer_code_flow_lens::ExplorerSession;
use sarif_explorer_code_flow_lens::SessionHost;
use sarif_explorer_normalize::LoadedLog;
use sarif_explorer_normalize::Normalizer;
use sarif_explorer_normalize::NormalizerConfig;
use sarif_explorer_normalize::StepRef;
use sarif_explorer_schema::Importance;
use sarif_explorer_schema::SarifLog;
use serde_json::Value;
use serde_json::json;

const MAIN: &str = "file:///work/main.c";
const UTIL: &str = "file:///work/util.c";

fn step(uri: &str, line: u32, importance: &str) -> Value {
    json!({
        "importance": importance,
        "location": {
            "physicalLocation": {
                "fileLocation": { "uri": uri },
                "region": { "startLine": line }
            }
        }
    })
}

async fn load() -> Result<LoadedLog> {
    let log: SarifLog = serde_json::from_value(json!({
        "version": "2.0.0",
        "runs": [{
            "tool": { "name": "Sample" },
            "results": [
                { "message": { "text": "no flows" } },
                {
                    "message": { "text": "flows" },
                    "codeFlows": [{
                        "threadFlows": [
                            {
                                "locations": [
                                    step(MAIN, 1, "essential"),
                                    step(MAIN, 2, "important"),
                                    step(UTIL, 3, "important"),
                                    step(MAIN, 4, "unimportant"),
                                    { "step": 5 }
                                ]
                            },
                            { "locations": [step(MAIN, 10, "unimportant")] }
                        ]
                    }]
                }
            ]
        }]
    }))?;

    let normalizer = Normalizer::new(NormalizerConfig {
        resolve_files: false,
        ..Default::default()
    });
    Ok(normalizer.normalize_log(&log, "scan.sarif", 0).await?)
}

fn lines(session: &ExplorerSession, uri: &str) -> Vec<u32> {
    CodeFlowLensProvider::new()
        .provide(session, uri)
        .iter()
        .filter_map(|lens| lens.range.and_then(|range| range.start_line()))
        .collect()
}

#[tokio::test]
async fn unimportant_verbosity_shows_every_step() -> Result<()> {
    let mut host = SessionHost::new();
    let session = host.load(load().await?);
    session.select_result(1)?;
    session.set_verbosity(Importance::Unimportant);

    assert_eq!(lines(&session, MAIN), vec![1, 2, 4, 10]);
    assert_eq!(lines(&session, UTIL), vec![3]);
    Ok(())
}

#[tokio::test]
async fn default_verbosity_hides_unimportant_steps() -> Result<()> {
    let mut host = SessionHost::new();
    let session = host.load(load().await?);
    session.select_result(1)?;

    assert_eq!(lines(&session, MAIN), vec![1, 2]);

    session.set_verbosity(Importance::Essential);
    assert_eq!(lines(&session, MAIN), vec![1]);
    Ok(())
}

#[tokio::test]
async fn lenses_carry_step_commands() -> Result<()> {
    let mut host = SessionHost::new();
    let session = host.load(load().await?);
    session.select_result(1)?;

    let lenses = CodeFlowLensProvider::new().provide(&session, UTIL);
    assert_eq!(lenses.len(), 1);
    assert_eq!(lenses[0].command.title, "Step 3");
    assert_eq!(
        lenses[0].command.arguments,
        StepRef {
            code_flow: 0,
            thread_flow: 0,
            step: 2,
        }
    );
    Ok(())
}

#[tokio::test]
async fn nothing_selected_or_no_flows() -> Result<()> {
    let mut host = SessionHost::new();
    let session = host.load(load().await?);
    assert!(lines(&session, MAIN).is_empty());

    session.select_result(0)?;
    assert!(lines(&session, MAIN).is_empty());
    Ok(())
}

#[tokio::test]
async fn subscribers_are_notified_of_changes() -> Result<()> {
    let mut host = SessionHost::new();
    let session = host.load(load().await?);
    let mut changes = session.subscribe();

    let watcher = tokio::spawn(async move {
        changes.changed().await?;
        let selection = *changes.borrow_and_update();
        anyhow::Ok(selection)
    });

    session.select_result(1)?;
    let selection = tokio::time::timeout(Duration::from_secs(5), watcher).await???;
    assert_eq!(selection.active_result, Some(1));
    assert_eq!(selection.generation, 1);
    Ok(())
}
