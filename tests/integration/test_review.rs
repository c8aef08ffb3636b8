//! Tests for the `review` command

use crate::helpers::*;
use anyhow::Result;

const REVIEW_PAYLOAD: &str = r#"{"score": 8.5, "review": []}"#;

#[test]
fn native_review_passes_root_relative_path_and_runs_in_repo() -> Result<()> {
  let repo = TestRepo::new()?;
  let stub = StubCli::new(REVIEW_PAYLOAD)?;

  let output = run_bridge(
    None,
    &["review", repo.file.to_str().unwrap()],
    &[("CQ_CLI_PATH", stub.path.to_str().unwrap())],
  )?;

  assert!(output.status.success());
  assert_eq!(REVIEW_PAYLOAD, stdout_of(&output));

  let recorded = stub.recorded()?;
  assert!(recorded.contains("args: review src/foo.py --output-format=json"), "{}", recorded);
  assert!(recorded.contains(&format!("cwd: {}", repo.path.display())), "{}", recorded);
  Ok(())
}

#[test]
fn invocations_carry_the_adapter_origin_marker() -> Result<()> {
  let repo = TestRepo::new()?;
  let stub = StubCli::new(REVIEW_PAYLOAD)?;

  run_bridge(
    None,
    &["review", repo.file.to_str().unwrap()],
    &[("CQ_CLI_PATH", stub.path.to_str().unwrap())],
  )?;

  assert!(stub.recorded()?.contains("context: cq-bridge"));
  Ok(())
}

#[test]
fn sandbox_review_passes_translated_path() -> Result<()> {
  let stub = StubCli::new(REVIEW_PAYLOAD)?;

  let output = run_bridge(
    None,
    &["review", "/mnt/project/src/foo.py"],
    &[
      ("CQ_CLI_PATH", stub.path.to_str().unwrap()),
      ("CQ_MOUNT_PATH", "/mnt/project"),
    ],
  )?;

  assert!(output.status.success());
  assert!(stub.recorded()?.contains("args: review /mount/src/foo.py --output-format=json"));
  Ok(())
}

#[test]
fn sandbox_review_outside_mount_reports_segment_diagnostic() -> Result<()> {
  let stub = StubCli::new(REVIEW_PAYLOAD)?;

  let output = run_bridge(
    None,
    &["review", "/other/src/foo.py"],
    &[
      ("CQ_CLI_PATH", stub.path.to_str().unwrap()),
      ("CQ_MOUNT_PATH", "/mnt/project"),
    ],
  )?;

  assert_eq!(Some(1), output.status.code());
  let stdout = stdout_of(&output);
  assert!(stdout.starts_with("Error: file_path is not under CQ_MOUNT_PATH"), "{}", stdout);
  assert!(stdout.contains("Path mismatch at segment 1: 'other' (input) vs 'mnt' (mount)."), "{}", stdout);
  Ok(())
}

#[test]
fn native_review_outside_any_repository_is_an_error() -> Result<()> {
  let dir = tempfile::TempDir::new()?;
  let file = dir.path().join("foo.py");
  std::fs::write(&file, "def f():\n    pass\n")?;
  let stub = StubCli::new(REVIEW_PAYLOAD)?;

  let output = run_bridge(
    None,
    &["review", file.to_str().unwrap()],
    &[("CQ_CLI_PATH", stub.path.to_str().unwrap())],
  )?;

  assert_eq!(Some(2), output.status.code());
  assert!(stdout_of(&output).starts_with("Error: Not in a git repository"));
  Ok(())
}

#[test]
fn failing_analysis_surfaces_its_stderr() -> Result<()> {
  let repo = TestRepo::new()?;
  let stub = StubCli::failing("license expired")?;

  let output = run_bridge(
    None,
    &["review", repo.file.to_str().unwrap()],
    &[("CQ_CLI_PATH", stub.path.to_str().unwrap())],
  )?;

  assert_eq!(Some(2), output.status.code());
  assert!(stdout_of(&output).starts_with("Error: CLI command failed: license expired"));
  Ok(())
}

#[test]
fn missing_binary_is_reported_as_plain_text() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_bridge(
    None,
    &["review", repo.file.to_str().unwrap()],
    &[("CQ_CLI_PATH", "/does/not/exist/cq")],
  )?;

  assert_eq!(Some(2), output.status.code());
  assert!(stdout_of(&output).starts_with("Error: Analysis binary not found: /does/not/exist/cq"));
  Ok(())
}

#[test]
fn operator_help_goes_to_stderr_not_stdout() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_bridge(
    None,
    &["review", repo.file.to_str().unwrap()],
    &[("CQ_CLI_PATH", "/does/not/exist/cq")],
  )?;

  // stdout stays machine-readable for the calling agent: the error line
  // and nothing else
  assert_eq!(
    "Error: Analysis binary not found: /does/not/exist/cq\n",
    stdout_of(&output)
  );
  assert!(stderr_of(&output).contains("💡 Help:"));
  Ok(())
}
