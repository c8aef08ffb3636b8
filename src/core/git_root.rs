//! Git repository root location (native mode)
//!
//! Native-mode binaries expect a repo-relative path plus an explicit
//! working directory rather than an absolute path, so the adapter walks
//! ancestor directories for a `.git` entry. A `.git` *file* counts too:
//! worktrees keep a pointer file where primary repositories keep a
//! directory, and both mark a repository root.

use std::env;
use std::path::{Path, PathBuf};

use crate::core::error::{BridgeError, BridgeResult, GitError, PathError, ResultExt};

/// Find the enclosing repository root for a file or directory.
///
/// The input is resolved to an absolute, symlink-free form first; the walk
/// starts at the parent when the input is a file. Fails at the filesystem
/// root with no `.git` match.
pub fn find_root(path: &Path) -> BridgeResult<PathBuf> {
  let resolved = resolve(path)?;

  let start = if resolved.is_file() {
    resolved.parent().map(Path::to_path_buf).unwrap_or(resolved.clone())
  } else {
    resolved.clone()
  };

  let mut current = start.as_path();
  loop {
    // File or directory, either marks a repository root
    if current.join(".git").exists() {
      return Ok(current.to_path_buf());
    }
    match current.parent() {
      Some(parent) => current = parent,
      None => {
        return Err(BridgeError::Git(GitError::RepoNotFound { path: resolved }));
      }
    }
  }
}

/// Compute the forward-slash-joined path of `path` relative to `root`.
///
/// Relative inputs (including `./` and `../` forms) are resolved against
/// the current directory first, so shell-style invocations behave like
/// their absolute equivalents.
pub fn relative_from_root(path: &Path, root: &Path) -> BridgeResult<String> {
  let resolved = resolve(path)?;
  let root = resolve(root)?;

  let relative = resolved
    .strip_prefix(&root)
    .map_err(|_| {
      BridgeError::Path(PathError::NotUnderGitRoot {
        path: path.display().to_string(),
        root: root.clone(),
      })
    })?;

  Ok(
    relative
      .components()
      .map(|c| c.as_os_str().to_string_lossy().into_owned())
      .collect::<Vec<_>>()
      .join("/"),
  )
}

/// Absolute, symlink-resolved form of `path`. Falls back to joining onto
/// the current directory when the path does not exist yet (canonicalize
/// requires existence).
fn resolve(path: &Path) -> BridgeResult<PathBuf> {
  match path.canonicalize() {
    Ok(resolved) => Ok(resolved),
    Err(_) if path.is_absolute() => Ok(path.to_path_buf()),
    Err(_) => {
      let cwd = env::current_dir().with_context(|| format!("resolving relative path '{}'", path.display()))?;
      Ok(cwd.join(path))
    }
  }
}
