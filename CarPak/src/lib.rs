//! # CarPak
//!
//! Merge per-car FiveM resource folders into a single unified resource.
//!
//! Server packs often ship one resource per vehicle: a `stream/` folder of
//! binary assets, loose `.meta` files, `audioconfig/` data and `sfx/` wave
//! packs. CarPak folds an entire level of them into one resource tree,
//! aggregates their `AddTextEntry` display names into one script, and
//! generates the `fxmanifest.lua` describing what actually landed on disk.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//!
//! use carpak::unify::{discover_resources, prepare_destination, unify};
//!
//! let source = Path::new("packs/[L1]");
//! let destination = Path::new("packs/L1_Unified");
//!
//! let resources = discover_resources(source)?;
//! prepare_destination(destination)?;
//! let result = unify(source, destination, &resources)?;
//! println!("merged {} resources", result.success_count);
//! # Ok::<(), carpak::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `carpak` command-line binary

pub mod config;
pub mod error;
pub mod manifest;
pub mod merge;
pub mod names;
pub mod unify;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::UnifierConfig;
    pub use crate::error::{Error, Result};
    pub use crate::manifest::{AUDIO_TYPES, META_TYPES, audio_placeholder, write_manifest};
    pub use crate::merge::{CopyJob, merge_resource};
    pub use crate::names::NameCollector;
    pub use crate::unify::{
        UnifyResult, discover_levels, discover_resources, prepare_destination, unify,
        unify_with_progress,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI modules (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod logging;
