use anyhow::Result;
use predicates::str::contains;
use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;

use super::explorer_command;
use super::write_fixture;

#[test]
fn prints_the_normalized_log_as_json() -> Result<()> {
    let dir = TempDir::new()?;
    let log = write_fixture(dir.path())?;

    let output = explorer_command()?
        .arg("normalize")
        .arg(&log)
        .arg("--source-root")
        .arg(dir.path())
        .output()?;
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["runs"][0]["toolFullName"], "Sample 1.0");
    assert_eq!(json["runs"][0]["cmdLine"], "sample src");

    let first = &json["results"][0];
    assert_eq!(first["severityLevel"], "error");
    assert_eq!(first["message"]["text"], "Buffer 'buf' may overflow");
    assert_eq!(first["assignedLocation"]["fileStatus"], "mapped");
    assert_eq!(first["assignedLocation"]["snippet"], "strcpy(buf, argv[1]);");

    let second = &json["results"][1];
    assert_eq!(second["severityLevel"], "warning");
    assert_eq!(second["locations"], serde_json::json!([null]));

    Ok(())
}

#[test]
fn skips_file_reads_when_asked() -> Result<()> {
    let dir = TempDir::new()?;
    let log = write_fixture(dir.path())?;

    let output = explorer_command()?
        .arg("normalize")
        .arg(&log)
        .arg("--no-resolve-files")
        .output()?;
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout)?;
    let location = &json["results"][0]["assignedLocation"];
    assert_eq!(location["fileStatus"], "unchecked");
    assert_eq!(location.get("snippet"), None);
    Ok(())
}

#[test]
fn text_output_lists_results() -> Result<()> {
    let dir = TempDir::new()?;
    let log = write_fixture(dir.path())?;

    explorer_command()?
        .arg("normalize")
        .arg(&log)
        .args(["--format", "text", "--no-resolve-files"])
        .assert()
        .success()
        .stdout(contains("1 runs, 2 results"))
        .stdout(contains("Buffer 'buf' may overflow"))
        .stdout(contains("src/main.c:3:5"))
        .stdout(contains("1 code flows, 3 steps"));
    Ok(())
}

#[test]
fn reads_settings_from_config_file() -> Result<()> {
    let dir = TempDir::new()?;
    let log = write_fixture(dir.path())?;
    let config = dir.path().join("explorer.toml");
    std::fs::write(
        &config,
        "resolve_files = false\nmissing_message_text = \"(no message)\"\n",
    )?;

    let output = explorer_command()?
        .arg("normalize")
        .arg(&log)
        .arg("--config")
        .arg(&config)
        .output()?;
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["results"][0]["assignedLocation"]["fileStatus"], "unchecked");

    let silent = dir.path().join("silent.sarif");
    std::fs::write(
        &silent,
        r#"{ "version": "2.0.0", "runs": [{ "tool": { "name": "Quiet" }, "results": [{}] }] }"#,
    )?;
    let output = explorer_command()?
        .arg("normalize")
        .arg(&silent)
        .arg("--config")
        .arg(&config)
        .output()?;
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["results"][0]["message"]["text"], "(no message)");
    Ok(())
}

#[test]
fn resolves_sources_next_to_the_log() -> Result<()> {
    let dir = TempDir::new()?;
    let log = write_fixture(dir.path())?;
    let elsewhere = TempDir::new()?;

    let output = explorer_command()?
        .current_dir(elsewhere.path())
        .arg("normalize")
        .arg(&log)
        .output()?;
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout)?;
    let location = &json["results"][0]["assignedLocation"];
    assert_eq!(location["fileStatus"], "mapped");
    assert_eq!(location["snippet"], "strcpy(buf, argv[1]);");
    Ok(())
}

#[test]
fn reports_unreadable_logs() -> Result<()> {
    let dir = TempDir::new()?;
    let bogus = dir.path().join("bogus.sarif");
    std::fs::write(&bogus, r#"{ "version": "2.1.0", "runs": [] }"#)?;

    explorer_command()?
        .arg("normalize")
        .arg(&bogus)
        .assert()
        .failure()
        .stderr(contains("is not a SARIF 2.0.0 log"));

    explorer_command()?
        .arg("normalize")
        .arg(dir.path().join("missing.sarif"))
        .assert()
        .failure()
        .stderr(contains("Failed to read"));
    Ok(())
}
