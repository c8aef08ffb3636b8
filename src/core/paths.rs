//! Platform-neutral path normalization
//!
//! Callers hand us paths in whatever syntax their host uses: POSIX, Windows
//! with a drive letter, or a mix of separators. Normalization reduces all of
//! them to an ordered segment list so that a mount root typed in one syntax
//! compares correctly against an input arriving in another. Case is
//! preserved deliberately: the containment diagnostics in `mount` report
//! exact mismatches, and folding case would erase them.

/// A path reduced to platform-neutral segments.
///
/// A Windows drive prefix becomes the first segment (upper-cased), so
/// `"C:\a\b"` and `"/C/a/b"` normalize to equal values. The drive is not
/// tracked separately; keeping it only as a segment is what makes the two
/// syntaxes compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPath {
  /// Whether the input was absolute (drive prefix, or leading separator).
  pub absolute: bool,
  /// Ordered segments, drive included as the first entry when present.
  pub segments: Vec<String>,
}

impl NormalizedPath {
  /// POSIX rendering: `/C/a/b` for absolute paths, `a/b` for relative.
  /// An absolute path with no segments renders as `/`.
  pub fn to_posix(&self) -> String {
    if self.absolute {
      format!("/{}", self.segments.join("/"))
    } else {
      self.segments.join("/")
    }
  }

  /// True when `self`'s segments extend `other`'s segments as a prefix.
  pub fn starts_with(&self, other: &NormalizedPath) -> bool {
    self.segments.len() >= other.segments.len()
      && self.segments.iter().zip(other.segments.iter()).all(|(a, b)| a == b)
  }
}

/// Normalize a POSIX- or Windows-styled path string.
pub fn normalize(path: &str) -> NormalizedPath {
  let (drive, rest) = split_drive(path);

  let absolute = drive.is_some() || rest.starts_with('/') || rest.starts_with('\\');

  let mut segments: Vec<String> = Vec::new();
  if let Some(d) = drive {
    segments.push(d.to_string());
  }
  segments.extend(
    rest
      .split(['/', '\\'])
      .filter(|s| !s.is_empty())
      .map(str::to_string),
  );

  NormalizedPath { absolute, segments }
}

/// Detect a two-character drive prefix: ASCII letter + colon.
/// Returns the upper-cased drive tag and the remainder with it stripped.
fn split_drive(path: &str) -> (Option<char>, &str) {
  let bytes = path.as_bytes();
  if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
    (Some(bytes[0].to_ascii_uppercase() as char), &path[2..])
  } else {
    (None, path)
  }
}
