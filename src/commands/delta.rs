//! Delta command: code-health delta for uncommitted changes in a repository

use crate::core::config::Config;
use crate::core::dispatch;
use crate::core::error::BridgeResult;

/// Run `cq delta` against a repository and print the raw analysis output.
///
/// The delta subcommand reads the repository from its working directory,
/// so the resolved target path becomes the cwd rather than an argument.
pub fn run_delta(repo: &str) -> BridgeResult<()> {
  let config = Config::from_env();
  let output = analyze(&config, repo)?;
  print!("{}", output);
  Ok(())
}

pub fn analyze(config: &Config, repo: &str) -> BridgeResult<String> {
  let target = dispatch::resolve_repo(config, repo)?;
  let args = vec!["delta".to_string(), "--output-format=json".to_string()];
  dispatch::invoke(config, &args, &target)
}
