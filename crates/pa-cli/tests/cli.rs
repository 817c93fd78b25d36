//! End-to-end CLI tests over saved payload files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn pa() -> Command {
    Command::cargo_bin("pa").expect("pa binary")
}

fn saved(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "{contents}").expect("write fixture");
    file
}

#[test]
fn renders_report_from_saved_envelope() {
    let file = saved(r#"{"success": true, "data": {"Duplicate Transactions": ["T1001"]}}"#);
    pa().args(["--input", file.path().to_str().unwrap(), "-f", "json", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("advisories"))
        .stdout(predicate::str::contains("duplicate transaction"));
}

#[test]
fn renders_report_from_bare_payload() {
    let file = saved(r#"{"Key Events": ["purchase", "sign_up"]}"#);
    pa().args(["--input", file.path().to_str().unwrap(), "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("== Key Events =="))
        .stdout(predicate::str::contains("purchase"));
}

#[test]
fn failed_envelope_exits_nonzero_with_message() {
    let file = saved(r#"{"success": false, "error": "quota exceeded"}"#);
    pa().args(["--input", file.path().to_str().unwrap(), "--quiet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("quota exceeded"));
}

#[test]
fn property_id_required_without_input() {
    pa().args(["--quiet"])
        .env_remove("PA_PROPERTY_ID")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--property-id"));
}

#[test]
fn invalid_date_token_is_rejected() {
    pa().args(["--property-id", "123456", "--start-date", "soonish", "--quiet"])
        .env_remove("PA_PROPERTY_ID")
        .assert()
        .failure()
        .stderr(predicate::str::contains("start_date"));
}

#[test]
fn markdown_format_emits_tables() {
    let file = saved(r#"{"Property Settings": [{"Check": "Currency", "Result": "USD"}]}"#);
    pa().args(["--input", file.path().to_str().unwrap(), "-f", "md", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("| Check | Result |"));
}
