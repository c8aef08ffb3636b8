//! Process-environment configuration, read once at startup
//!
//! Every component takes this snapshot explicitly instead of re-reading
//! ambient environment variables at call sites. That keeps the adapter
//! directly constructible in tests and removes hidden global state.

use std::env;
use std::path::PathBuf;

/// CA-bundle variables, checked in fixed precedence order.
const CA_BUNDLE_VARS: [&str; 3] = ["REQUESTS_CA_BUNDLE", "SSL_CERT_FILE", "CURL_CA_BUNDLE"];

/// Immutable configuration snapshot for one process.
#[derive(Debug, Clone, Default)]
pub struct Config {
  /// Host directory bind-mounted into the sandbox. Its presence is the
  /// sandbox-mode signal; there is no separate flag.
  pub mount_root: Option<String>,

  /// Explicit analysis-binary override (escape hatch, always wins).
  pub cli_path_override: Option<PathBuf>,

  /// Access credential forwarded to the analysis binary.
  pub access_token: Option<String>,

  /// Alternate API endpoint forwarded to the analysis binary.
  pub onprem_url: Option<String>,

  /// Operator-supplied PEM CA bundle, first of the recognized variables
  /// that is set. Existence on disk is checked at conversion time.
  pub ca_bundle: Option<PathBuf>,
}

impl Config {
  /// Snapshot the process environment.
  pub fn from_env() -> Self {
    Self {
      mount_root: non_empty(env::var("CQ_MOUNT_PATH").ok()),
      cli_path_override: non_empty(env::var("CQ_CLI_PATH").ok()).map(PathBuf::from),
      access_token: env::var("CQ_ACCESS_TOKEN").ok(),
      onprem_url: non_empty(env::var("CQ_ONPREM_URL").ok()),
      ca_bundle: CA_BUNDLE_VARS
        .iter()
        .find_map(|var| non_empty(env::var(var).ok()))
        .map(PathBuf::from),
    }
  }

  /// Sandbox mode is inferred from mount-root presence.
  pub fn sandbox_mode(&self) -> bool {
    self.mount_root.is_some()
  }
}

fn non_empty(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.is_empty())
}
