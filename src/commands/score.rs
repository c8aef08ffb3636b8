//! Score command: single code-health number for one file

use serde_json::Value;

use crate::commands::review;
use crate::core::config::Config;
use crate::core::error::{BridgeError, BridgeResult};

/// Run a review and print just the numeric score, 10.0 (best) to 1.0.
pub fn run_score(file: &str) -> BridgeResult<()> {
  let config = Config::from_env();
  let output = review::analyze(&config, file)?;
  println!("{}", score_from_output(&output)?);
  Ok(())
}

/// Extract the numeric `score` field from analysis output.
pub fn score_from_output(output: &str) -> BridgeResult<f64> {
  let document: Value = serde_json::from_str(output)?;
  document
    .get("score")
    .and_then(Value::as_f64)
    .ok_or_else(|| BridgeError::message(format!("CLI output does not contain a 'score' field: {}", output)))
}
