//! Tests for the `score` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn score_prints_just_the_number() -> Result<()> {
  let repo = TestRepo::new()?;
  let stub = StubCli::new(r#"{"score": 8.5, "review": []}"#)?;

  let output = run_bridge(
    None,
    &["score", repo.file.to_str().unwrap()],
    &[("CQ_CLI_PATH", stub.path.to_str().unwrap())],
  )?;

  assert!(output.status.success());
  assert_eq!("8.5\n", stdout_of(&output));
  Ok(())
}

#[test]
fn output_without_score_field_is_an_error() -> Result<()> {
  let repo = TestRepo::new()?;
  let stub = StubCli::new(r#"{"review": []}"#)?;

  let output = run_bridge(
    None,
    &["score", repo.file.to_str().unwrap()],
    &[("CQ_CLI_PATH", stub.path.to_str().unwrap())],
  )?;

  assert_eq!(Some(1), output.status.code());
  let stdout = stdout_of(&output);
  assert!(stdout.starts_with("Error: CLI output does not contain a 'score' field"), "{}", stdout);
  Ok(())
}

#[test]
fn non_json_output_is_an_error() -> Result<()> {
  let repo = TestRepo::new()?;
  let stub = StubCli::new("plain text, not json")?;

  let output = run_bridge(
    None,
    &["score", repo.file.to_str().unwrap()],
    &[("CQ_CLI_PATH", stub.path.to_str().unwrap())],
  )?;

  assert_eq!(Some(1), output.status.code());
  assert!(stdout_of(&output).starts_with("Error: JSON error:"));
  Ok(())
}
