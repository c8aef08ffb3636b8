//! Analysis-binary location across deployment modes
//!
//! Candidates are an ordered sequence of small probe functions, evaluated
//! lazily and short-circuited at the first hit. Location never fails: the
//! fixed sandbox path doubles as the unconditional final fallback, and a
//! missing binary surfaces later as a spawn error with a clear message.

use std::env;
use std::path::{Path, PathBuf};

use crate::core::config::Config;
use crate::core::platform::Platform;

/// Fixed binary location inside sandboxed deployments.
const SANDBOX_BIN_DIR: &str = "/root/.local/bin";

/// How many ancestors of the running executable's directory to probe.
/// Packaging layouts put the analysis binary beside the adapter or up to
/// a couple of levels above it.
const ADJACENT_PROBE_DEPTH: usize = 3;

/// Locate the analysis binary. Ordered candidates, first existing and
/// executable wins; the explicit operator override short-circuits
/// everything and is returned verbatim.
pub fn locate(config: &Config, platform: Platform) -> PathBuf {
  if let Some(override_path) = &config.cli_path_override {
    return override_path.clone();
  }

  let binary = platform.binary_name();
  let sandbox_path = Path::new(SANDBOX_BIN_DIR).join(binary);

  if config.sandbox_mode()
    && let Some(found) = probe(&sandbox_path)
  {
    return found;
  }

  if let Some(found) = probe_adjacent(binary) {
    return found;
  }

  // Development tree: the binary is dropped at the tree root
  if let Ok(cwd) = env::current_dir()
    && let Some(found) = probe(&cwd.join(binary))
  {
    return found;
  }

  // Unconditional final fallback; existence is checked at spawn time
  sandbox_path
}

/// Probe next to the running executable, then its ancestors to a bounded
/// depth.
fn probe_adjacent(binary: &str) -> Option<PathBuf> {
  let exe = env::current_exe().ok()?;
  let exe_dir = exe.parent()?;

  let mut dir = Some(exe_dir);
  for _ in 0..ADJACENT_PROBE_DEPTH {
    let current = dir?;
    if let Some(found) = probe(&current.join(binary)) {
      return Some(found);
    }
    dir = current.parent();
  }
  None
}

/// One candidate probe: the path wins if it exists as a file. Some
/// packaging steps drop the execute bit, so a found candidate that isn't
/// executable gets it granted before being returned.
fn probe(candidate: &Path) -> Option<PathBuf> {
  if !candidate.is_file() {
    return None;
  }
  ensure_executable(candidate);
  Some(candidate.to_path_buf())
}

#[cfg(unix)]
fn ensure_executable(path: &Path) {
  use std::fs;
  use std::os::unix::fs::PermissionsExt;

  let Ok(metadata) = fs::metadata(path) else { return };
  if metadata.permissions().mode() & 0o111 == 0
    && let Err(err) = fs::set_permissions(path, fs::Permissions::from_mode(0o755))
  {
    log::debug!("could not set execute bit on {}: {}", path.display(), err);
  }
}

#[cfg(not(unix))]
fn ensure_executable(_path: &Path) {}
