//! Host-path to sandbox-path translation
//!
//! Sandboxed deployments bind-mount one operator-configured host directory
//! at a fixed in-container location. The mount root comes from operator
//! config and the input path from the caller, so a mismatch (a typo, or a
//! case difference on a case-sensitive filesystem) would otherwise surface
//! as a confusing downstream failure. Divergence is therefore reported with
//! the exact segment index and both differing values.

use crate::core::error::{BridgeError, BridgeResult, ConfigError, PathError};
use crate::core::paths::{self, NormalizedPath};

/// The fixed in-sandbox root all translated paths are rooted under.
pub const MOUNT_SENTINEL: &str = "/mount";

/// Placeholder used in diagnostics when one side runs out of segments.
const MISSING_SEGMENT: &str = "<none>";

/// Translate a host absolute path into its sandbox location.
///
/// The mount root itself maps to the bare sentinel. Output is always
/// POSIX-joined with no trailing slash, regardless of the host platform.
pub fn translate(mount_root: Option<&str>, input: &str) -> BridgeResult<String> {
  let Some(mount_root) = mount_root else {
    return Err(BridgeError::Config(ConfigError::MountRootUnset));
  };
  let mount = paths::normalize(mount_root);
  let user = paths::normalize(input);

  if !user.absolute {
    return Err(BridgeError::Path(PathError::NotAbsolute {
      path: input.to_string(),
    }));
  }

  if !user.starts_with(&mount) {
    return Err(mismatch_error(&user, &mount));
  }

  let remainder = &user.segments[mount.segments.len()..];
  if remainder.is_empty() {
    Ok(MOUNT_SENTINEL.to_string())
  } else {
    Ok(format!("{}/{}", MOUNT_SENTINEL, remainder.join("/")))
  }
}

/// Build the segment-level containment diagnostic.
///
/// Reports the 1-based index of the first mismatching segment; when one
/// side is shorter, its value is rendered as `<none>`.
fn mismatch_error(user: &NormalizedPath, mount: &NormalizedPath) -> BridgeError {
  let limit = user.segments.len().max(mount.segments.len());
  let mut index = limit;
  for i in 0..limit {
    if user.segments.get(i) != mount.segments.get(i) {
      index = i;
      break;
    }
  }

  let at = |segments: &[String]| {
    segments
      .get(index)
      .map(String::as_str)
      .unwrap_or(MISSING_SEGMENT)
      .to_string()
  };

  BridgeError::Path(PathError::NotUnderMount {
    path: user.to_posix(),
    segment: index + 1,
    input_segment: at(&user.segments),
    mount_segment: at(&mount.segments),
  })
}
