use anyhow::Result;
use predicates::str::contains;
use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;

use super::explorer_command;
use super::write_fixture;

fn step_titles(json: &Value) -> Vec<String> {
    json.as_array()
        .map(|lenses| {
            lenses
                .iter()
                .filter_map(|lens| lens["command"]["title"].as_str())
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn default_verbosity_hides_unimportant_steps() -> Result<()> {
    let dir = TempDir::new()?;
    let log = write_fixture(dir.path())?;

    let output = explorer_command()?
        .arg("steps")
        .arg(&log)
        .args(["--no-resolve-files", "--result", "0", "--document", "src/main.c"])
        .output()?;
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(
        step_titles(&json),
        vec!["argv enters here", "copied without bound"]
    );
    assert_eq!(json[1]["command"]["command"], "sarif.codeFlow.selectStep");
    assert_eq!(json[1]["command"]["arguments"]["step"], 2);
    Ok(())
}

#[test]
fn unimportant_verbosity_shows_all_steps() -> Result<()> {
    let dir = TempDir::new()?;
    let log = write_fixture(dir.path())?;

    let output = explorer_command()?
        .arg("steps")
        .arg(&log)
        .args([
            "--no-resolve-files",
            "--result",
            "0",
            "--document",
            "src/main.c",
            "--verbosity",
            "unimportant",
        ])
        .output()?;
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(step_titles(&json).len(), 3);
    Ok(())
}

#[test]
fn other_documents_have_no_markers() -> Result<()> {
    let dir = TempDir::new()?;
    let log = write_fixture(dir.path())?;

    let output = explorer_command()?
        .arg("steps")
        .arg(&log)
        .args(["--no-resolve-files", "--result", "0", "--document", "src/other.c"])
        .output()?;
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json, serde_json::json!([]));
    Ok(())
}

#[test]
fn rejects_unknown_result_index() -> Result<()> {
    let dir = TempDir::new()?;
    let log = write_fixture(dir.path())?;

    explorer_command()?
        .arg("steps")
        .arg(&log)
        .args(["--no-resolve-files", "--result", "9", "--document", "src/main.c"])
        .assert()
        .failure()
        .stderr(contains("Result 9 does not exist"));
    Ok(())
}
