use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::PathBuf;
use std::process::Command;

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/climate_sample.csv")
}

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("climate-charts").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("climate-charts"))
        .stdout(predicate::str::contains("--no-export"));
}

#[test]
fn cli_prints_summaries_without_exporting() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("config.json");
    std::fs::write(
        &cfg,
        r#"{
            "line": { "years": [2010, 2011, 2012] },
            "grouped_bar": { "years": [2010, 2012] },
            "stacked": { "years": [2010, 2011, 2012] }
        }"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("climate-charts").unwrap();
    cmd.arg("--config")
        .arg(&cfg)
        .arg("--input")
        .arg(sample_path())
        .arg("--no-export");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Summary: all series"))
        .stdout(predicate::str::contains("2010 [YR2010]"));
}

#[test]
fn cli_fails_on_missing_input() {
    let mut cmd = Command::cargo_bin("climate-charts").unwrap();
    cmd.args(["--input", "/definitely/not/here.csv", "--no-export"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("cannot open"));
}
