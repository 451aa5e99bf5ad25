//! Path utilities
//!
//! Manifest entries always use forward slashes, whatever the host OS uses.

use std::path::Path;

/// Render a path with forward-slash separators.
pub fn to_posix<P: AsRef<Path>>(path: P) -> String {
    path.as_ref().to_string_lossy().replace('\\', "/")
}

/// A path relative to `base`, rendered POSIX-style.
///
/// Returns `None` if `path` is not located under `base`.
pub fn posix_relative<P: AsRef<Path>>(path: P, base: P) -> Option<String> {
    path.as_ref()
        .strip_prefix(base.as_ref())
        .ok()
        .map(to_posix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_posix_relative() {
        let base = PathBuf::from("/unified");
        let file = base.join("sfx").join("bati").join("bati.awc");
        assert_eq!(
            posix_relative(&file, &base).as_deref(),
            Some("sfx/bati/bati.awc")
        );
    }

    #[test]
    fn test_posix_relative_outside_base() {
        assert_eq!(
            posix_relative(Path::new("/elsewhere/x"), Path::new("/unified")),
            None
        );
    }
}
