//! Doctor command: diagnose the adapter's environment
//!
//! Reports deployment mode, the resolved analysis binary, credential and
//! trust configuration, and the worktree status of the current directory.

use std::env;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::config::Config;
use crate::core::error::{BridgeResult, ExitCode, ResultExt};
use crate::core::locate;
use crate::core::platform::Platform;
use crate::core::worktree;

#[derive(Debug, Serialize)]
struct DoctorReport {
  deployment_mode: String,
  mount_root: Option<String>,
  binary: BinaryReport,
  access_token_set: bool,
  onprem_url: Option<String>,
  ca_bundle: Option<PathBuf>,
  worktree_gitdir: Option<String>,
}

#[derive(Debug, Serialize)]
struct BinaryReport {
  path: PathBuf,
  exists: bool,
  executable: bool,
}

/// Run the doctor command. Exits non-zero when the resolved binary is
/// missing, since nothing else can work without it.
pub fn run_doctor(json: bool) -> BridgeResult<()> {
  let config = Config::from_env();
  let report = build_report(&config)?;

  if json {
    let output = serde_json::to_string_pretty(&report).context("Failed to serialize doctor report")?;
    println!("{}", output);
  } else {
    print_report(&report);
  }

  if !report.binary.exists {
    std::process::exit(ExitCode::System.as_i32());
  }
  Ok(())
}

fn build_report(config: &Config) -> BridgeResult<DoctorReport> {
  let binary_path = locate::locate(config, Platform::current());
  let current_dir = env::current_dir()?;

  Ok(DoctorReport {
    deployment_mode: if config.sandbox_mode() { "sandbox" } else { "native" }.to_string(),
    mount_root: config.mount_root.clone(),
    binary: BinaryReport {
      exists: binary_path.is_file(),
      executable: is_executable(&binary_path),
      path: binary_path,
    },
    access_token_set: config.access_token.as_deref().is_some_and(|t| !t.is_empty()),
    onprem_url: config.onprem_url.clone(),
    ca_bundle: config.ca_bundle.clone(),
    worktree_gitdir: worktree::detect(&current_dir).map(|p| p.gitdir),
  })
}

fn print_report(report: &DoctorReport) {
  println!("🏥 Checking cq environment...\n");

  match &report.mount_root {
    Some(root) => println!("✅ Deployment mode: sandbox (mount root: {})", root),
    None => println!("✅ Deployment mode: native"),
  }

  if report.binary.exists {
    let note = if report.binary.executable { "" } else { " (not executable)" };
    println!("✅ Analysis binary: {}{}", report.binary.path.display(), note);
  } else {
    println!("❌ Analysis binary: {} (not found)", report.binary.path.display());
    println!("   💡 Fix: set CQ_CLI_PATH or install the cq binary on the PATH.");
  }

  if report.access_token_set {
    println!("✅ Access token: set");
  } else {
    println!("❌ Access token: not set");
    println!("   💡 Fix: export CQ_ACCESS_TOKEN to authenticate analysis requests.");
  }

  match &report.onprem_url {
    Some(url) => println!("✅ API endpoint: {}", url),
    None => println!("✅ API endpoint: default"),
  }

  match &report.ca_bundle {
    Some(path) => println!("✅ CA bundle: {}", path.display()),
    None => println!("✅ CA bundle: none (system trust)"),
  }

  match &report.worktree_gitdir {
    Some(gitdir) => println!("✅ Current directory: worktree (gitdir: {})", gitdir),
    None => println!("✅ Current directory: not a worktree"),
  }

  println!();
  if report.binary.exists {
    println!("✨ Environment looks healthy.");
  } else {
    println!("⚠️  Critical issues found. Fix them before running analyses.");
  }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
  use std::os::unix::fs::PermissionsExt;
  std::fs::metadata(path).map(|m| m.permissions().mode() & 0o111 != 0).unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
  path.is_file()
}
