//! Platform abstraction for binary naming and environment adjustments
//!
//! The variant set is fixed (Windows family vs everything else), so this is
//! a closed two-variant tagged type rather than a trait hierarchy. Binary
//! name and environment behavior are always queried through it, never
//! hard-coded at call sites.

use std::collections::HashMap;
use std::path::Path;

/// Base names recognized as the analysis binary, any platform.
pub const ANALYSIS_BINARY_NAMES: [&str; 2] = ["cq", "cq.exe"];

/// Well-known Git install directories probed on the Windows family.
/// Bundled executables need git on PATH, and desktop installs often
/// don't put it there.
const WINDOWS_GIT_PATHS: [&str; 4] = [
  "C:\\Program Files\\Git\\cmd",
  "C:\\Program Files (x86)\\Git\\cmd",
  "C:\\Program Files\\Git\\bin",
  "C:\\Program Files (x86)\\Git\\bin",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
  Unix,
  Windows,
}

impl Platform {
  /// The platform the adapter is currently running on.
  pub fn current() -> Self {
    if cfg!(windows) { Platform::Windows } else { Platform::Unix }
  }

  /// Platform-specific analysis binary name.
  pub fn binary_name(self) -> &'static str {
    match self {
      Platform::Unix => "cq",
      Platform::Windows => "cq.exe",
    }
  }

  /// Apply platform adjustments to an environment map.
  ///
  /// Windows: prepend the first Git install directory that exists on disk
  /// and is missing from PATH. Unix needs nothing.
  pub fn configure_environment(self, env: &mut HashMap<String, String>) {
    match self {
      Platform::Unix => {}
      Platform::Windows => {
        let existing = env.get("PATH").cloned().unwrap_or_default();
        for git_path in WINDOWS_GIT_PATHS {
          if Path::new(git_path).exists() && !existing.contains(git_path) {
            env.insert("PATH".to_string(), format!("{};{}", git_path, existing));
            break;
          }
        }
      }
    }
  }
}

/// Whether an executable path refers to the analysis binary.
///
/// The base name is compared case-insensitively after stripping any
/// directory part, accepting both separator styles.
pub fn is_analysis_binary(executable: &str) -> bool {
  if executable.is_empty() {
    return false;
  }
  let base = executable
    .rsplit(['/', '\\'])
    .next()
    .unwrap_or(executable)
    .to_ascii_lowercase();
  ANALYSIS_BINARY_NAMES.contains(&base.as_str())
}
