//! Git worktree detection and metadata-store resolution
//!
//! A worktree's `.git` entry is a regular file containing a single
//! `gitdir: <path>` line pointing at the primary repository's metadata
//! store. The analysis binary needs that store to resolve history, so the
//! adapter passes it along as a `GIT_DIR` environment override. Resolution
//! failures degrade to "no override": the override only matters for
//! worktrees, and a primary-repo request must not fail because a pointer
//! didn't parse.

use std::fs;
use std::path::Path;

use crate::core::config::Config;
use crate::core::mount;

/// Environment variable carrying the metadata-store override.
pub const GIT_DIR_ENV: &str = "GIT_DIR";

/// A detected worktree indirection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorktreePointer {
  /// The referenced metadata-store path, verbatim from the pointer file.
  pub gitdir: String,
}

/// Inspect `.git` at `repo`. A directory means a primary repository (no
/// pointer); a regular file is parsed as a worktree pointer. Unreadable or
/// malformed files yield `None`.
pub fn detect(repo: &Path) -> Option<WorktreePointer> {
  let git_entry = repo.join(".git");
  let metadata = fs::metadata(&git_entry).ok()?;
  if !metadata.is_file() {
    return None;
  }

  let content = match fs::read_to_string(&git_entry) {
    Ok(content) => content,
    Err(err) => {
      log::debug!("unreadable worktree pointer at {}: {}", git_entry.display(), err);
      return None;
    }
  };

  parse_pointer(&content)
}

/// Parse the single `gitdir: <path>` line of a pointer file.
/// Non-ASCII paths pass through untouched; a trailing newline is tolerated.
fn parse_pointer(content: &str) -> Option<WorktreePointer> {
  let line = content.lines().next()?;
  let gitdir = line.strip_prefix("gitdir:")?.trim();
  if gitdir.is_empty() {
    return None;
  }
  Some(WorktreePointer {
    gitdir: gitdir.to_string(),
  })
}

/// Resolve the metadata-store override for executing against `repo`.
///
/// With a mount root configured, the pointer (which typically lives under
/// the main repo's store, itself under the mount root) is translated into
/// its sandbox location; a pointer outside the mount root degrades to no
/// override. Without a mount root the raw pointer value is used directly.
pub fn resolve_for_execution(repo: &Path, config: &Config) -> Option<String> {
  let pointer = detect(repo)?;

  match &config.mount_root {
    Some(mount_root) => match mount::translate(Some(mount_root), &pointer.gitdir) {
      Ok(translated) => Some(translated),
      Err(err) => {
        log::debug!(
          "worktree pointer '{}' not translatable under mount root: {}",
          pointer.gitdir,
          err
        );
        None
      }
    },
    None => Some(pointer.gitdir),
  }
}
