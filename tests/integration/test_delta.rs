//! Tests for the `delta` command

use crate::helpers::*;
use anyhow::Result;

const DELTA_PAYLOAD: &str = r#"{"result": [{"name": "foo.py", "old_score": 8.0, "new_score": 7.0}]}"#;

#[test]
fn native_delta_runs_in_the_repository() -> Result<()> {
  let repo = TestRepo::new()?;
  let stub = StubCli::new(DELTA_PAYLOAD)?;

  let output = run_bridge(
    None,
    &["delta", repo.path.to_str().unwrap()],
    &[("CQ_CLI_PATH", stub.path.to_str().unwrap())],
  )?;

  assert!(output.status.success());
  assert_eq!(DELTA_PAYLOAD, stdout_of(&output));

  let recorded = stub.recorded()?;
  // No path argument: the delta subcommand reads its working directory
  assert!(recorded.contains("args: delta --output-format=json"), "{}", recorded);
  assert!(recorded.contains(&format!("cwd: {}", repo.path.display())), "{}", recorded);
  Ok(())
}

#[test]
fn primary_repository_gets_no_gitdir_override() -> Result<()> {
  let repo = TestRepo::new()?;
  let stub = StubCli::new(DELTA_PAYLOAD)?;

  run_bridge(
    None,
    &["delta", repo.path.to_str().unwrap()],
    &[("CQ_CLI_PATH", stub.path.to_str().unwrap())],
  )?;

  assert!(stub.recorded()?.contains("gitdir: \n"));
  Ok(())
}

#[test]
fn worktree_delta_sets_the_gitdir_override() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.as_worktree("/main/.git/worktrees/feature")?;
  let stub = StubCli::new(DELTA_PAYLOAD)?;

  let output = run_bridge(
    None,
    &["delta", repo.path.to_str().unwrap()],
    &[("CQ_CLI_PATH", stub.path.to_str().unwrap())],
  )?;

  assert!(output.status.success());
  assert!(stub.recorded()?.contains("gitdir: /main/.git/worktrees/feature\n"));
  Ok(())
}

#[test]
fn failing_delta_surfaces_its_stderr() -> Result<()> {
  let repo = TestRepo::new()?;
  let stub = StubCli::failing("no uncommitted changes")?;

  let output = run_bridge(
    None,
    &["delta", repo.path.to_str().unwrap()],
    &[("CQ_CLI_PATH", stub.path.to_str().unwrap())],
  )?;

  assert_eq!(Some(2), output.status.code());
  assert!(stdout_of(&output).starts_with("Error: CLI command failed: no uncommitted changes"));
  Ok(())
}
