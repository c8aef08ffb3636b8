//! Execution-context assembly and analysis-binary invocation
//!
//! The binary inherits the full process environment (PATH, HOME, locale)
//! with adapter-controlled variables layered on top, then trust-store
//! arguments spliced in when a CA bundle is configured. The context is a
//! plain value so tests can assemble and inspect one without spawning
//! anything.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::process::Command;

use crate::core::config::Config;
use crate::core::error::{BridgeError, BridgeResult, InvocationError};
use crate::core::platform::{self, Platform};
use crate::core::truststore;

/// Marks invocations as adapter-originated, for server-side telemetry.
const CONTEXT_MARKER_ENV: &str = "CQ_CONTEXT";
const CONTEXT_MARKER: &str = "cq-bridge";

/// Everything needed to spawn one analysis-binary invocation.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
  /// Full argument vector, binary path first.
  pub command: Vec<String>,
  /// Complete environment for the child; nothing else is inherited.
  pub env: HashMap<String, String>,
  /// Working directory, when the invocation needs one (native mode).
  pub working_dir: Option<PathBuf>,
}

/// Assemble an execution context.
///
/// Environment layering, later layers win: process environment, adapter
/// variables (context marker, credentials, version-check suppression),
/// platform adjustments, then per-invocation overrides. Trust-store
/// arguments go directly after the binary path, and only when the command
/// actually invokes the analysis binary.
pub fn build(
  config: &Config,
  command: Vec<String>,
  working_dir: Option<PathBuf>,
  extra_env: HashMap<String, String>,
) -> ExecutionContext {
  let mut env: HashMap<String, String> = std::env::vars().collect();

  env.insert(CONTEXT_MARKER_ENV.to_string(), CONTEXT_MARKER.to_string());
  env.insert(
    "CQ_ACCESS_TOKEN".to_string(),
    config.access_token.clone().unwrap_or_default(),
  );
  if let Some(url) = &config.onprem_url {
    env.insert("CQ_ONPREM_URL".to_string(), url.clone());
  }
  // The binary phones home for update checks; pointless per-request
  env.insert("CQ_DISABLE_VERSION_CHECK".to_string(), "1".to_string());

  Platform::current().configure_environment(&mut env);
  env.extend(extra_env);

  let command = with_trust_args(config, command);

  ExecutionContext {
    command,
    env,
    working_dir,
  }
}

/// Splice trust-store arguments after the binary path. No CA bundle, no
/// conversion capability, or a non-analysis command leaves the vector
/// untouched.
fn with_trust_args(config: &Config, command: Vec<String>) -> Vec<String> {
  if config.ca_bundle.is_none() {
    return command;
  }
  match command.first() {
    Some(first) if platform::is_analysis_binary(first) => {
      splice_after_binary(command, truststore::ssl_cli_args(config))
    }
    _ => command,
  }
}

fn splice_after_binary(mut command: Vec<String>, args: Vec<String>) -> Vec<String> {
  for (offset, arg) in args.into_iter().enumerate() {
    command.insert(1 + offset, arg);
  }
  command
}

/// Spawn the context's command and capture its output.
///
/// Returns decoded stdout on success. A non-zero exit becomes a command
/// failure carrying the error stream; a spawn failure with NotFound means
/// the binary itself is missing.
pub fn run(context: &ExecutionContext) -> BridgeResult<String> {
  let (binary, args) = context
    .command
    .split_first()
    .ok_or_else(|| BridgeError::message("empty command"))?;

  let mut command = Command::new(binary);
  command.args(args).env_clear().envs(&context.env);
  if let Some(dir) = &context.working_dir {
    command.current_dir(dir);
  }

  log::debug!("invoking {:?} (cwd: {:?})", context.command, context.working_dir);

  let output = command.output().map_err(|err| {
    if err.kind() == io::ErrorKind::NotFound {
      BridgeError::Invocation(InvocationError::BinaryMissing {
        path: PathBuf::from(binary),
      })
    } else {
      BridgeError::Io(err)
    }
  })?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    return Err(BridgeError::Invocation(InvocationError::CommandFailed { stderr }));
  }

  Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
