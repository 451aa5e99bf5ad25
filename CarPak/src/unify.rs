//! Run orchestration
//!
//! Discovers what to merge, drives the per-resource merge loop, then writes
//! the aggregated names script and the manifest once at the end. Everything
//! is sequential; a failed resource is logged and skipped, never rolled
//! back.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::manifest;
use crate::merge;
use crate::names::NameCollector;

/// Marker file excluding a resource folder from processing. Escrow-protected
/// resources carry one and cannot be merged usefully.
pub const SKIP_MARKER: &str = ".fxap";

/// Filename of the per-run log written to the unified resource root.
pub const OPERATIONS_LOG: &str = "operations.log";

/// Summary of a unify run.
#[derive(Debug, Clone)]
pub struct UnifyResult {
    /// Number of resources merged successfully.
    pub success_count: usize,
    /// Number of resources that failed to merge.
    pub fail_count: usize,
    /// Messages for each resource processed.
    pub results: Vec<String>,
    /// Path of the aggregated names script, if any entries were collected.
    pub script_path: Option<PathBuf>,
    /// Path of the generated manifest.
    pub manifest_path: PathBuf,
}

/// Find the level folders available under a base path.
///
/// A level folder is a bracketed immediate subdirectory, e.g. `[L1]`. The
/// returned names have the brackets removed and are sorted.
pub fn discover_levels(base: &Path) -> Result<Vec<String>> {
    if !base.is_dir() {
        return Err(Error::SourceRootNotFound {
            path: base.to_path_buf(),
        });
    }

    let mut levels = Vec::new();
    for entry in fs::read_dir(base)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('[') && name.ends_with(']') {
            levels.push(name.trim_matches(['[', ']']).to_string());
        }
    }
    levels.sort();

    if levels.is_empty() {
        return Err(Error::NoLevels {
            path: base.to_path_buf(),
        });
    }
    Ok(levels)
}

/// Find the mergeable resource folders under a level source root.
///
/// Every immediate subdirectory counts unless it carries the skip marker.
/// Names are sorted so runs are reproducible across platforms.
pub fn discover_resources(source_root: &Path) -> Result<Vec<String>> {
    if !source_root.is_dir() {
        return Err(Error::SourceRootNotFound {
            path: source_root.to_path_buf(),
        });
    }

    let mut resources = Vec::new();
    for entry in fs::read_dir(source_root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() && !entry.path().join(SKIP_MARKER).is_file() {
            resources.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    resources.sort();

    if resources.is_empty() {
        return Err(Error::NoResources {
            path: source_root.to_path_buf(),
        });
    }
    Ok(resources)
}

/// Reset the destination root to an empty directory.
///
/// This is the only destructive operation against the destination; the
/// merge itself never wipes, so disjoint runs can share one destination
/// root without clobbering each other.
pub fn prepare_destination(dest_root: &Path) -> Result<()> {
    if dest_root.exists() {
        fs::remove_dir_all(dest_root)?;
    }
    fs::create_dir_all(dest_root)?;
    Ok(())
}

/// Merge the given resources into the destination root and synthesize the
/// unified script and manifest.
pub fn unify(source_root: &Path, dest_root: &Path, resources: &[String]) -> Result<UnifyResult> {
    unify_with_progress(source_root, dest_root, resources, |_, _, _| {})
}

/// [`unify`] with a progress callback `(current, total, resource)` invoked
/// before each resource is merged.
///
/// # Errors
///
/// Setup problems (missing source root, empty resource list) and
/// destination collisions are fatal, as is any failure while writing the
/// script or the manifest. Any other per-resource error is contained: it is
/// logged, counted in [`UnifyResult::fail_count`], and the loop advances.
pub fn unify_with_progress<F>(
    source_root: &Path,
    dest_root: &Path,
    resources: &[String],
    progress: F,
) -> Result<UnifyResult>
where
    F: Fn(usize, usize, &str),
{
    if !source_root.is_dir() {
        return Err(Error::SourceRootNotFound {
            path: source_root.to_path_buf(),
        });
    }
    if resources.is_empty() {
        return Err(Error::NoResources {
            path: source_root.to_path_buf(),
        });
    }
    fs::create_dir_all(dest_root)?;

    let total = resources.len();
    let mut names = NameCollector::new();
    let mut success_count = 0;
    let mut fail_count = 0;
    let mut results = Vec::with_capacity(total);

    for (index, resource) in resources.iter().enumerate() {
        progress(index + 1, total, resource);

        match merge::merge_resource(resource, source_root, dest_root, &mut names) {
            Ok(()) => {
                success_count += 1;
                results.push(format!("Merged: {resource}"));
            }
            Err(e @ Error::DestinationCollision { .. }) => {
                tracing::error!("aborting run, destination is not fresh: {e}");
                return Err(e);
            }
            Err(e) => {
                fail_count += 1;
                tracing::error!("failed to merge {resource}: {e}");
                results.push(format!("Failed {resource}: {e}"));
            }
        }
    }

    let script_path = names.write_unified_script(dest_root)?;
    let manifest_path = manifest::write_manifest(dest_root, resources)?;

    Ok(UnifyResult {
        success_count,
        fail_count,
        results,
        script_path,
        manifest_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(path: &Path, content: &[u8]) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_discover_levels_unwraps_brackets() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("[L2]")).unwrap();
        fs::create_dir_all(temp.path().join("[L1]")).unwrap();
        fs::create_dir_all(temp.path().join("L1_Unified")).unwrap();

        let levels = discover_levels(temp.path()).unwrap();
        assert_eq!(levels, ["L1", "L2"]);
    }

    #[test]
    fn test_discover_levels_requires_at_least_one() {
        let temp = TempDir::new().unwrap();
        let err = discover_levels(temp.path()).unwrap_err();
        assert!(matches!(err, Error::NoLevels { .. }));
    }

    #[test]
    fn test_discover_resources_skips_marked_folders() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("bati")).unwrap();
        fs::create_dir_all(temp.path().join("locked")).unwrap();
        fs::write(temp.path().join("locked").join(SKIP_MARKER), b"").unwrap();
        fs::write(temp.path().join("stray.txt"), b"").unwrap();

        let resources = discover_resources(temp.path()).unwrap();
        assert_eq!(resources, ["bati"]);
    }

    #[test]
    fn test_discover_resources_missing_root() {
        let temp = TempDir::new().unwrap();
        let err = discover_resources(&temp.path().join("[L9]")).unwrap_err();
        assert!(matches!(err, Error::SourceRootNotFound { .. }));
    }

    #[test]
    fn test_prepare_destination_destroys_previous_contents() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("L1_Unified");
        write(&dest.join("stale").join("old.txt"), b"old");

        prepare_destination(&dest).unwrap();

        assert!(dest.is_dir());
        assert!(!dest.join("stale").exists());
    }

    #[test]
    fn test_unify_rejects_empty_resource_list() {
        let temp = TempDir::new().unwrap();
        let err = unify(temp.path(), &temp.path().join("out"), &[]).unwrap_err();
        assert!(matches!(err, Error::NoResources { .. }));
    }

    #[test]
    fn test_unify_contains_per_resource_failures() {
        let temp = TempDir::new().unwrap();
        let source_root = temp.path().join("[L1]");
        let dest_root = temp.path().join("L1_Unified");
        write(&source_root.join("bati").join("data").join("vehicles.meta"), b"v");

        // "ghost" is enumerated but its folder is gone by merge time; the
        // failure is contained and the run still completes.
        let resources = vec!["bati".to_string(), "ghost".to_string()];
        let result = unify(&source_root, &dest_root, &resources).unwrap();

        assert_eq!(result.success_count, 1);
        assert_eq!(result.fail_count, 1);
        assert!(result.results.iter().any(|r| r.starts_with("Failed ghost:")));
        assert!(dest_root.join("data/bati/vehicles.meta").is_file());
        assert!(result.manifest_path.is_file());
    }
}
