//! Tests for the `doctor` command

use crate::helpers::*;
use anyhow::Result;
use serde_json::Value;

#[test]
fn doctor_json_reports_a_healthy_native_environment() -> Result<()> {
  let stub = StubCli::new("{}")?;

  let output = run_bridge(
    None,
    &["doctor", "--json"],
    &[("CQ_CLI_PATH", stub.path.to_str().unwrap())],
  )?;

  assert!(output.status.success());
  let report: Value = serde_json::from_str(&stdout_of(&output))?;
  assert_eq!("native", report["deployment_mode"]);
  assert_eq!(true, report["binary"]["exists"]);
  assert_eq!(true, report["binary"]["executable"]);
  assert_eq!(false, report["access_token_set"]);
  Ok(())
}

#[test]
fn doctor_reports_sandbox_mode_with_mount_root() -> Result<()> {
  let stub = StubCli::new("{}")?;

  let output = run_bridge(
    None,
    &["doctor"],
    &[
      ("CQ_CLI_PATH", stub.path.to_str().unwrap()),
      ("CQ_MOUNT_PATH", "/mnt/project"),
    ],
  )?;

  assert!(output.status.success());
  let stdout = stdout_of(&output);
  assert!(stdout.contains("sandbox (mount root: /mnt/project)"), "{}", stdout);
  Ok(())
}

#[test]
fn doctor_fails_when_the_binary_is_missing() -> Result<()> {
  let output = run_bridge(None, &["doctor"], &[("CQ_CLI_PATH", "/does/not/exist/cq")])?;

  assert_eq!(Some(2), output.status.code());
  let stdout = stdout_of(&output);
  assert!(stdout.contains("❌ Analysis binary: /does/not/exist/cq (not found)"), "{}", stdout);
  assert!(stdout.contains("Critical issues found"), "{}", stdout);
  Ok(())
}

#[test]
fn doctor_json_reflects_credentials_and_endpoint() -> Result<()> {
  let stub = StubCli::new("{}")?;

  let output = run_bridge(
    None,
    &["doctor", "--json"],
    &[
      ("CQ_CLI_PATH", stub.path.to_str().unwrap()),
      ("CQ_ACCESS_TOKEN", "secret"),
      ("CQ_ONPREM_URL", "https://cq.internal.example"),
    ],
  )?;

  let report: Value = serde_json::from_str(&stdout_of(&output))?;
  assert_eq!(true, report["access_token_set"]);
  assert_eq!("https://cq.internal.example", report["onprem_url"]);
  Ok(())
}
