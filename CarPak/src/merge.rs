//! Per-resource merge operations
//!
//! Copying is split into a pure planning step that maps source files to
//! destination paths and a side-effecting apply step, so the path mapping
//! can be tested without touching the unified tree.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::names::NameCollector;

/// Streamed binary assets (`.ytd`/`.yft`/...), mirrored per resource.
pub const STREAM_DIR: &str = "stream";
/// Flattened metadata files, one folder per resource.
pub const DATA_DIR: &str = "data";
/// Audio configuration (`.rel` files and friends), mirrored per resource.
pub const AUDIOCONFIG_DIR: &str = "audioconfig";
/// Sound-effect wave packs, mirrored per resource.
pub const SFX_DIR: &str = "sfx";

/// Suffix identifying metadata files anywhere in a resource tree.
pub const META_SUFFIX: &str = ".meta";

/// A single planned file copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyJob {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Plan a structure-preserving copy of every file under `src_dir` into
/// `dest_dir`. The walk is lexicographic so plans are reproducible.
pub fn plan_subtree_copy(src_dir: &Path, dest_dir: &Path) -> Result<Vec<CopyJob>> {
    let mut jobs = Vec::new();
    for entry in WalkDir::new(src_dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(src_dir)
            .map_err(|e| Error::InvalidPath(e.to_string()))?;
        jobs.push(CopyJob {
            source: entry.path().to_path_buf(),
            destination: dest_dir.join(relative),
        });
    }
    Ok(jobs)
}

/// Plan a flattened copy of every `.meta` file found anywhere under
/// `resource_src` into `dest_data_dir`.
///
/// Flattening means two files with the same name in different subfolders
/// collide; the later job (lexicographically last visited) overwrites the
/// earlier one when applied. That matches what resource authors shipped for
/// years, so it stays.
pub fn plan_meta_copy(resource_src: &Path, dest_data_dir: &Path) -> Result<Vec<CopyJob>> {
    let mut jobs = Vec::new();
    for entry in WalkDir::new(resource_src).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if name.ends_with(META_SUFFIX) {
            jobs.push(CopyJob {
                source: entry.path().to_path_buf(),
                destination: dest_data_dir.join(name.as_ref()),
            });
        }
    }
    Ok(jobs)
}

/// Apply planned copies, creating destination directories as needed.
fn apply_jobs(jobs: &[CopyJob]) -> Result<()> {
    for job in jobs {
        if let Some(parent) = job.destination.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&job.source, &job.destination)?;
        tracing::info!(
            "copied {} -> {}",
            job.source.display(),
            job.destination.display()
        );
    }
    Ok(())
}

/// Merge one resource folder into the unified tree.
///
/// Name entries are collected first, then every copy is planned, then the
/// plan is applied, so a collision is detected before a single byte moves.
/// On success the resource's source folder is deleted; a deletion failure
/// is logged but the resource still counts as migrated (the copies are
/// already in place).
///
/// # Errors
///
/// [`Error::DestinationCollision`] when the unified tree already contains a
/// per-resource directory this merge would create. Callers treat that as
/// fatal to the whole run; other errors only fail this resource.
pub fn merge_resource(
    resource: &str,
    source_root: &Path,
    dest_root: &Path,
    names: &mut NameCollector,
) -> Result<()> {
    let src = source_root.join(resource);
    tracing::info!("processing resource folder: {}", src.display());

    // Capture name entries before anything gets deleted.
    names.collect_from(resource, &src)?;

    let mut jobs = Vec::new();

    let src_stream = src.join(STREAM_DIR);
    if src_stream.is_dir() {
        let dst = dest_root.join(STREAM_DIR).join(resource);
        if dst.exists() {
            return Err(Error::DestinationCollision { path: dst });
        }
        jobs.extend(plan_subtree_copy(&src_stream, &dst)?);
    }

    // The data folder exists for every resource, metadata or not.
    let dst_data = dest_root.join(DATA_DIR).join(resource);
    jobs.extend(plan_meta_copy(&src, &dst_data)?);

    for category in [AUDIOCONFIG_DIR, SFX_DIR] {
        let src_dir = src.join(category);
        if src_dir.is_dir() {
            let dst_dir = dest_root.join(category).join(resource);
            if dst_dir.exists() {
                return Err(Error::DestinationCollision { path: dst_dir });
            }
            jobs.extend(plan_subtree_copy(&src_dir, &dst_dir)?);
        }
    }

    fs::create_dir_all(&dst_data)?;
    apply_jobs(&jobs)?;

    if let Err(e) = fs::remove_dir_all(&src) {
        tracing::error!("failed to delete original folder {}: {e}", src.display());
    } else {
        tracing::info!("deleted original folder: {}", src.display());
    }

    Ok(())
}
