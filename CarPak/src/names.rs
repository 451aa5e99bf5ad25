//! Display-name collection and the unified names script
//!
//! Per-car resources register their display names with `AddTextEntry` calls
//! scattered across their client scripts. The collector lifts those lines out
//! of every merged resource so a single aggregated script can replay them.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// Substring identifying a name-registration line in a script.
pub const NAME_ENTRY_MARKER: &str = "AddTextEntry";

/// Filename of the aggregated script written to the unified resource root.
pub const UNIFIED_SCRIPT: &str = "vehicle_names.lua";

/// Lines that *define* `AddTextEntry` rather than call it. The base game
/// already provides the function, so re-declaring it in the aggregated
/// script would shadow it.
const NAME_ENTRY_DEFINITION: &str = "function AddTextEntry";

/// Ordered accumulator of name-registration lines.
///
/// Entries keep their discovery order across all collected resources and are
/// not deduplicated; identical registrations simply replay twice.
#[derive(Debug, Default)]
pub struct NameCollector {
    entries: Vec<String>,
}

impl NameCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The collected entries, in discovery order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Scan all `.lua` files under `dir` for name-registration lines and
    /// append each match, trimmed, to the accumulator.
    ///
    /// A script that cannot be decoded as UTF-8 is logged and skipped; the
    /// scan continues with the remaining files. Returns the number of
    /// entries appended by this call.
    pub fn collect_from(&mut self, resource: &str, dir: &Path) -> Result<usize> {
        let before = self.entries.len();

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let is_script = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("lua"));
            if !is_script {
                continue;
            }

            match fs::read_to_string(path) {
                Ok(text) => {
                    for line in text.lines() {
                        if line.contains(NAME_ENTRY_MARKER) {
                            let trimmed = line.trim();
                            tracing::info!(
                                "[{resource}] found name entry in {}: {trimmed}",
                                path.display()
                            );
                            self.entries.push(trimmed.to_string());
                        }
                    }
                }
                Err(e) => {
                    tracing::error!(
                        "[{resource}] skipping unreadable script {}: {e}",
                        path.display()
                    );
                }
            }
        }

        Ok(self.entries.len() - before)
    }

    /// Write the aggregated names script to the unified resource root.
    ///
    /// Entries are replayed in collection order inside a
    /// `Citizen.CreateThread` wrapper. Lines that are themselves
    /// `AddTextEntry` function definitions are skipped. When nothing was
    /// collected, no file is written and `None` is returned.
    pub fn write_unified_script(&self, dest_root: &Path) -> Result<Option<PathBuf>> {
        if self.entries.is_empty() {
            return Ok(None);
        }

        let mut script = String::from("Citizen.CreateThread(function()\n");
        for entry in &self.entries {
            if entry.starts_with(NAME_ENTRY_DEFINITION) {
                continue;
            }
            script.push_str("    ");
            script.push_str(entry);
            script.push('\n');
        }
        script.push_str("end)\n");

        let path = dest_root.join(UNIFIED_SCRIPT);
        fs::write(&path, script)?;
        tracing::info!("created unified names script: {}", path.display());
        Ok(Some(path))
    }
}
