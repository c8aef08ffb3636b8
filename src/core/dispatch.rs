//! Per-request dispatch across deployment modes
//!
//! Every request branches once on mount-root presence and converges on the
//! same invocation path: resolve the target, locate the binary, build the
//! context, run. File-scoped capabilities (review, score) and
//! repository-scoped ones (delta) resolve differently, so each gets its own
//! entry point producing the same `ResolvedTarget` value.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::config::Config;
use crate::core::error::BridgeResult;
use crate::core::exec;
use crate::core::git_root;
use crate::core::locate;
use crate::core::mount;
use crate::core::platform::Platform;
use crate::core::worktree::{self, GIT_DIR_ENV};

/// A resolved analysis target: the path argument the binary receives plus
/// everything mode-dependent about how to invoke it.
#[derive(Debug, Clone)]
pub struct ResolvedTarget {
  /// Path argument for the analysis binary.
  pub path: String,
  /// Working directory for the invocation, when the mode needs one.
  pub working_dir: Option<PathBuf>,
  /// Environment overlay, applied last (worktree override lives here).
  pub env_overlay: HashMap<String, String>,
  /// Preparation commands run before the analysis invocation. Failures
  /// are non-fatal.
  pub pre_commands: Vec<Vec<String>>,
}

/// Resolve a file-scoped target (review, score).
///
/// Sandbox mode hands the binary the translated absolute path. Native mode
/// hands it a root-relative path with the repository root as working
/// directory, consulting the worktree pointer at that root.
pub fn resolve_file(config: &Config, file: &str) -> BridgeResult<ResolvedTarget> {
  if config.sandbox_mode() {
    return Ok(ResolvedTarget {
      path: mount::translate(config.mount_root.as_deref(), file)?,
      working_dir: None,
      env_overlay: HashMap::new(),
      pre_commands: Vec::new(),
    });
  }

  let root = git_root::find_root(Path::new(file))?;
  let relative = git_root::relative_from_root(Path::new(file), &root)?;
  let env_overlay = gitdir_overlay(worktree::resolve_for_execution(&root, config));

  Ok(ResolvedTarget {
    path: relative,
    working_dir: Some(root),
    env_overlay,
    pre_commands: Vec::new(),
  })
}

/// Resolve a repository-scoped target (delta).
///
/// Sandbox mode runs against the translated repository path, with the
/// worktree pointer read at that location and translated too; the path is
/// registered as a git safe.directory first, since the bind mount's
/// ownership rarely matches the in-container user. Native mode runs in the
/// repository itself with the raw pointer.
pub fn resolve_repo(config: &Config, repo: &str) -> BridgeResult<ResolvedTarget> {
  if config.sandbox_mode() {
    let translated = mount::translate(config.mount_root.as_deref(), repo)?;
    let env_overlay = gitdir_overlay(worktree::resolve_for_execution(Path::new(&translated), config));

    return Ok(ResolvedTarget {
      path: translated.clone(),
      working_dir: Some(PathBuf::from(&translated)),
      env_overlay,
      pre_commands: vec![vec![
        "git".to_string(),
        "config".to_string(),
        "--system".to_string(),
        "--add".to_string(),
        "safe.directory".to_string(),
        translated,
      ]],
    });
  }

  let env_overlay = gitdir_overlay(worktree::resolve_for_execution(Path::new(repo), config));

  Ok(ResolvedTarget {
    path: repo.to_string(),
    working_dir: Some(PathBuf::from(repo)),
    env_overlay,
    pre_commands: Vec::new(),
  })
}

/// Run a resolved target: preparation commands first (failures logged and
/// ignored), then the analysis invocation with `args` appended after the
/// located binary.
pub fn invoke(config: &Config, args: &[String], target: &ResolvedTarget) -> BridgeResult<String> {
  let binary = locate::locate(config, Platform::current());

  for pre in &target.pre_commands {
    let ctx = exec::build(config, pre.clone(), None, target.env_overlay.clone());
    if let Err(err) = exec::run(&ctx) {
      log::debug!("preparation command {:?} failed: {}", pre, err);
    }
  }

  let mut command = vec![binary.to_string_lossy().into_owned()];
  command.extend(args.iter().cloned());

  let ctx = exec::build(config, command, target.working_dir.clone(), target.env_overlay.clone());
  exec::run(&ctx)
}

fn gitdir_overlay(override_path: Option<String>) -> HashMap<String, String> {
  match override_path {
    Some(gitdir) => HashMap::from([(GIT_DIR_ENV.to_string(), gitdir)]),
    None => HashMap::new(),
  }
}
