//! Error types for cq-bridge with contextual messages and exit codes
//!
//! A unified error type that categorizes failures and carries a contextual
//! help message where one exists. Capability wrappers turn these into plain
//! `"Error: ..."` text so a calling agent can read and react.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for cq-bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid paths, missing files)
  User = 1,
  /// System error (subprocess, I/O)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for cq-bridge
#[derive(Debug)]
pub enum BridgeError {
  /// Configuration errors
  Config(ConfigError),

  /// Path resolution and containment errors
  Path(PathError),

  /// Git repository errors
  Git(GitError),

  /// Analysis binary invocation errors
  Invocation(InvocationError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
  },
}

impl BridgeError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    BridgeError::Message {
      message: msg.into(),
      context: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      BridgeError::Message { message, context } => BridgeError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
      },
      other => BridgeError::Message {
        message: other.to_string(),
        context: Some(ctx_str),
      },
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      BridgeError::Config(_) | BridgeError::Path(_) | BridgeError::Message { .. } => ExitCode::User,
      BridgeError::Git(_) | BridgeError::Invocation(_) | BridgeError::Io(_) => ExitCode::System,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      BridgeError::Config(e) => e.help_message(),
      BridgeError::Git(e) => e.help_message(),
      BridgeError::Invocation(e) => e.help_message(),
      _ => None,
    }
  }
}

impl fmt::Display for BridgeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BridgeError::Config(e) => write!(f, "{}", e),
      BridgeError::Path(e) => write!(f, "{}", e),
      BridgeError::Git(e) => write!(f, "{}", e),
      BridgeError::Invocation(e) => write!(f, "{}", e),
      BridgeError::Io(e) => write!(f, "I/O error: {}", e),
      BridgeError::Message { message, context } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for BridgeError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      BridgeError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for BridgeError {
  fn from(err: io::Error) -> Self {
    BridgeError::Io(err)
  }
}

impl From<String> for BridgeError {
  fn from(msg: String) -> Self {
    BridgeError::message(msg)
  }
}

impl From<&str> for BridgeError {
  fn from(msg: &str) -> Self {
    BridgeError::message(msg)
  }
}

impl From<serde_json::Error> for BridgeError {
  fn from(err: serde_json::Error) -> Self {
    BridgeError::message(format!("JSON error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Mount root required for a sandbox-mode operation but not configured
  MountRootUnset,
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::MountRootUnset => {
        Some("Set CQ_MOUNT_PATH to the host directory that is bind-mounted into the container.".to_string())
      }
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::MountRootUnset => write!(f, "CQ_MOUNT_PATH not defined."),
    }
  }
}

/// Path resolution and containment errors
#[derive(Debug)]
pub enum PathError {
  /// Input path must be absolute for mount translation
  NotAbsolute { path: String },

  /// Input path is not under the configured mount root
  NotUnderMount {
    /// POSIX rendering of the normalized input path
    path: String,
    /// 1-based index of the first mismatching segment
    segment: usize,
    /// The input-side segment at that index (`<none>` when shorter)
    input_segment: String,
    /// The mount-side segment at that index (`<none>` when shorter)
    mount_segment: String,
  },

  /// File is not under the resolved git root (native mode)
  NotUnderGitRoot { path: String, root: PathBuf },
}

impl fmt::Display for PathError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PathError::NotAbsolute { path } => {
        write!(f, "file_path must be absolute: '{}'", path)
      }
      PathError::NotUnderMount {
        path,
        segment,
        input_segment,
        mount_segment,
      } => {
        write!(
          f,
          "file_path is not under CQ_MOUNT_PATH: '{}'. \
           Path mismatch at segment {}: '{}' (input) vs '{}' (mount). \
           Check for case sensitivity or typos. \
           To fix: ensure your CQ_MOUNT_PATH matches the input path exactly.",
          path, segment, input_segment, mount_segment
        )
      }
      PathError::NotUnderGitRoot { path, root } => {
        write!(f, "file '{}' is not under git root: {}", path, root.display())
      }
    }
  }
}

/// Git repository errors
#[derive(Debug)]
pub enum GitError {
  /// No ancestor directory contains a .git entry
  RepoNotFound { path: PathBuf },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::RepoNotFound { .. } => Some(
        "The analysis needs a repository context. Run inside a git repository or pass a path within one.".to_string(),
      ),
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::RepoNotFound { path } => {
        write!(f, "Not in a git repository: {}", path.display())
      }
    }
  }
}

/// Analysis binary invocation errors
#[derive(Debug)]
pub enum InvocationError {
  /// The binary exited non-zero; carries the captured error stream
  CommandFailed { stderr: String },

  /// The binary could not be spawned at all
  BinaryMissing { path: PathBuf },
}

impl InvocationError {
  fn help_message(&self) -> Option<String> {
    match self {
      InvocationError::BinaryMissing { .. } => Some(
        "The cq analysis binary isn't properly installed. Set CQ_CLI_PATH or install it on the PATH.".to_string(),
      ),
      _ => None,
    }
  }
}

impl fmt::Display for InvocationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      InvocationError::CommandFailed { stderr } => {
        write!(f, "CLI command failed: {}", stderr)
      }
      InvocationError::BinaryMissing { path } => {
        write!(f, "Analysis binary not found: {}", path.display())
      }
    }
  }
}

/// Result type alias for cq-bridge
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> BridgeResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> BridgeResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<BridgeError>,
{
  fn context(self, ctx: impl Into<String>) -> BridgeResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> BridgeResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Render an error for the two audiences of this tool: plain `Error: ...`
/// text on stdout so a calling agent can read and react, and contextual
/// help on stderr for a human operator.
pub fn print_error(error: &BridgeError) {
  println!("Error: {}", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}", help);
  }
}
