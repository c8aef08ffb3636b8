//! Review command: full code-health analysis of one file

use crate::core::config::Config;
use crate::core::dispatch;
use crate::core::error::BridgeResult;

/// Run `cq review` on a file and print the raw analysis output.
pub fn run_review(file: &str) -> BridgeResult<()> {
  let config = Config::from_env();
  let output = analyze(&config, file)?;
  print!("{}", output);
  Ok(())
}

/// Resolve the file for the active deployment mode and invoke the binary.
pub fn analyze(config: &Config, file: &str) -> BridgeResult<String> {
  let target = dispatch::resolve_file(config, file)?;
  let args = vec![
    "review".to_string(),
    target.path.clone(),
    "--output-format=json".to_string(),
  ];
  dispatch::invoke(config, &args, &target)
}
