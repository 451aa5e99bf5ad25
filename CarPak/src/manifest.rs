//! fxmanifest synthesis
//!
//! The manifest is derived from what actually exists in the unified tree
//! after merging, never from source-side bookkeeping: every declaration and
//! file listing points at a path that is physically present.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::merge::{AUDIOCONFIG_DIR, DATA_DIR, SFX_DIR};
use crate::names::UNIFIED_SCRIPT;
use crate::utils::posix_relative;

/// Filename of the generated manifest at the unified resource root.
pub const FX_MANIFEST: &str = "fxmanifest.lua";

/// A metadata filename and the data type it is declared as.
#[derive(Debug, Clone, Copy)]
pub struct MetaType {
    pub filename: &'static str,
    pub data_type: &'static str,
}

/// Metadata filename -> data_file type, in declaration order.
pub const META_TYPES: [MetaType; 5] = [
    MetaType {
        filename: "handling.meta",
        data_type: "HANDLING_FILE",
    },
    MetaType {
        filename: "vehicles.meta",
        data_type: "VEHICLE_METADATA_FILE",
    },
    MetaType {
        filename: "carcols.meta",
        data_type: "CARCOLS_FILE",
    },
    MetaType {
        filename: "carvariations.meta",
        data_type: "VEHICLE_VARIATION_FILE",
    },
    MetaType {
        filename: "vehiclelayouts.meta",
        data_type: "VEHICLE_LAYOUTS_FILE",
    },
];

/// A compound audio suffix and the data type it is declared as.
#[derive(Debug, Clone, Copy)]
pub struct AudioType {
    pub suffix: &'static str,
    pub data_type: &'static str,
}

/// Compound `.rel` suffix -> data_file type, tested in this order.
/// Only these three are declared; anything else in an audioconfig folder is
/// shipped but never declared.
pub const AUDIO_TYPES: [AudioType; 3] = [
    AudioType {
        suffix: ".dat10.rel",
        data_type: "AUDIO_SYNTHDATA",
    },
    AudioType {
        suffix: ".dat151.rel",
        data_type: "AUDIO_GAMEDATA",
    },
    AudioType {
        suffix: ".dat54.rel",
        data_type: "AUDIO_SOUNDDATA",
    },
];

/// Wave packs are declared per directory, not per file.
const WAVEPACK_TYPE: &str = "AUDIO_WAVEPACK";

/// Generic extension the loader expects in audio declarations.
const AUDIO_PLACEHOLDER_EXT: &str = ".dat";

/// Match a filename against the recognized compound audio suffixes.
///
/// On a match, returns the declared data type and the placeholder filename:
/// the real name with the compound suffix replaced by `.dat`. The loader
/// resolves the declaration to whichever sub-format actually shipped, so the
/// declared name must stay stable across `.dat10.rel`/`.dat151.rel`/
/// `.dat54.rel` variants.
///
/// ```
/// use carpak::manifest::audio_placeholder;
///
/// let (data_type, placeholder) = audio_placeholder("siren.dat151.rel").unwrap();
/// assert_eq!(data_type, "AUDIO_GAMEDATA");
/// assert_eq!(placeholder, "siren.dat");
/// assert!(audio_placeholder("siren.nametable").is_none());
/// ```
#[must_use]
pub fn audio_placeholder(filename: &str) -> Option<(&'static str, String)> {
    for audio in &AUDIO_TYPES {
        if let Some(stem) = filename.strip_suffix(audio.suffix) {
            return Some((audio.data_type, format!("{stem}{AUDIO_PLACEHOLDER_EXT}")));
        }
    }
    None
}

/// Regular files directly inside `dir`, sorted by name. No recursion.
fn files_directly_in(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Immediate subdirectories of `dir`, sorted by name.
fn subdirs_of(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Build the manifest text for a unified tree.
///
/// `resources` is the run's enumeration order and drives the section order
/// of the declaration passes; existence on disk decides what is emitted.
pub fn build_manifest(dest_root: &Path, resources: &[String]) -> Result<String> {
    let mut datas: Vec<String> = Vec::new();
    let mut files: Vec<String> = Vec::new();

    // Metadata declarations, in fixed map order per resource.
    for resource in resources {
        datas.push(format!("-- {resource} meta"));
        files.push(format!("-- {resource} meta"));

        for meta in &META_TYPES {
            let meta_path = dest_root.join(DATA_DIR).join(resource).join(meta.filename);
            if meta_path.exists() {
                let rel = format!("{DATA_DIR}/{resource}/{}", meta.filename);
                datas.push(format!("data_file '{}' '{rel}'", meta.data_type));
                files.push(format!("  '{rel}'"));
            }
        }
    }

    // Audio declarations use the .dat placeholder; listings keep the real
    // .rel filename.
    for resource in resources {
        let base = dest_root.join(AUDIOCONFIG_DIR).join(resource);
        if !base.is_dir() {
            continue;
        }
        datas.push(format!("-- {resource} audioconfig"));
        files.push(format!("-- {resource} audioconfig"));

        for name in files_directly_in(&base)? {
            let Some((data_type, placeholder)) = audio_placeholder(&name) else {
                continue;
            };
            datas.push(format!(
                "data_file '{data_type}' '{AUDIOCONFIG_DIR}/{resource}/{placeholder}'"
            ));
            files.push(format!("  '{AUDIOCONFIG_DIR}/{resource}/{name}'"));
        }
    }

    // Wave-pack declarations, one per pack directory.
    for resource in resources {
        let base = dest_root.join(SFX_DIR).join(resource);
        if !base.is_dir() {
            continue;
        }
        datas.push(format!("-- {resource} sfx"));
        for pack in subdirs_of(&base)? {
            datas.push(format!(
                "data_file '{WAVEPACK_TYPE}' '{SFX_DIR}/{resource}/{pack}'"
            ));
        }
    }

    // One listing per shipped sound-effect file, whole category at once.
    let sfx_base = dest_root.join(SFX_DIR);
    if sfx_base.is_dir() {
        files.push(format!("-- {SFX_DIR}"));
        for entry in WalkDir::new(&sfx_base).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = posix_relative(entry.path(), dest_root).ok_or_else(|| {
                Error::InvalidPath(entry.path().display().to_string())
            })?;
            files.push(format!("  '{rel}'"));
        }
    }

    Ok(render(&datas, &files))
}

/// Render the fixed manifest template.
fn render(datas: &[String], files: &[String]) -> String {
    format!(
        "fx_version 'cerulean'\n\
         games {{'gta5'}}\n\
         \n\
         {datas}\n\
         \n\
         files {{\n\
         {files}\n\
         }}\n\
         \n\
         client_script '{script}'\n",
        datas = datas.join("\n"),
        files = files.join(",\n"),
        script = UNIFIED_SCRIPT,
    )
}

/// Build and write the manifest to the unified resource root.
pub fn write_manifest(dest_root: &Path, resources: &[String]) -> Result<PathBuf> {
    let manifest = build_manifest(dest_root, resources)?;
    let path = dest_root.join(FX_MANIFEST);
    fs::write(&path, manifest)?;
    tracing::info!("generated manifest: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn write(path: &Path, content: &[u8]) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_audio_placeholder_matches_in_map_order() {
        assert_eq!(
            audio_placeholder("bati_amp.dat10.rel"),
            Some(("AUDIO_SYNTHDATA", "bati_amp.dat".to_string()))
        );
        assert_eq!(
            audio_placeholder("bati_game.dat151.rel"),
            Some(("AUDIO_GAMEDATA", "bati_game.dat".to_string()))
        );
        assert_eq!(
            audio_placeholder("bati_sounds.dat54.rel"),
            Some(("AUDIO_SOUNDDATA", "bati_sounds.dat".to_string()))
        );
        assert_eq!(audio_placeholder("bati_sounds.nametable"), None);
        assert_eq!(audio_placeholder("readme.txt"), None);
    }

    #[test]
    fn test_manifest_for_a_full_resource() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path();
        write(&dest.join("data/bati/handling.meta"), b"h");
        write(&dest.join("data/bati/vehicles.meta"), b"v");
        write(&dest.join("audioconfig/bati/bati_game.dat151.rel"), b"rel");
        write(&dest.join("audioconfig/bati/readme.txt"), b"ignored");
        write(&dest.join("sfx/bati/dlc_bati/bati.awc"), b"awc");

        let resources = vec!["bati".to_string()];
        let manifest = build_manifest(dest, &resources).unwrap();

        let expected = concat!(
            "fx_version 'cerulean'\n",
            "games {'gta5'}\n",
            "\n",
            "-- bati meta\n",
            "data_file 'HANDLING_FILE' 'data/bati/handling.meta'\n",
            "data_file 'VEHICLE_METADATA_FILE' 'data/bati/vehicles.meta'\n",
            "-- bati audioconfig\n",
            "data_file 'AUDIO_GAMEDATA' 'audioconfig/bati/bati_game.dat'\n",
            "-- bati sfx\n",
            "data_file 'AUDIO_WAVEPACK' 'sfx/bati/dlc_bati'\n",
            "\n",
            "files {\n",
            "-- bati meta,\n",
            "  'data/bati/handling.meta',\n",
            "  'data/bati/vehicles.meta',\n",
            "-- bati audioconfig,\n",
            "  'audioconfig/bati/bati_game.dat151.rel',\n",
            "-- sfx,\n",
            "  'sfx/bati/dlc_bati/bati.awc'\n",
            "}\n",
            "\n",
            "client_script 'vehicle_names.lua'\n",
        );
        assert_eq!(manifest, expected);
    }

    #[test]
    fn test_section_markers_are_emitted_even_when_empty() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path();
        fs::create_dir_all(dest.join("data/ghost")).unwrap();

        let resources = vec!["ghost".to_string()];
        let manifest = build_manifest(dest, &resources).unwrap();

        assert!(manifest.contains("-- ghost meta"));
        assert!(!manifest.contains("data_file"));
        assert!(!manifest.contains("-- ghost audioconfig"));
        assert!(!manifest.contains("-- ghost sfx"));
    }

    #[test]
    fn test_unmapped_metadata_is_not_declared() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path();
        write(&dest.join("data/bati/dlctext.meta"), b"x");

        let manifest = build_manifest(dest, &["bati".to_string()]).unwrap();

        assert!(!manifest.contains("dlctext.meta"));
    }

    #[test]
    fn test_declaration_and_listing_differ_only_in_extension() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path();
        write(&dest.join("audioconfig/bati/siren.dat151.rel"), b"rel");

        let manifest = build_manifest(dest, &["bati".to_string()]).unwrap();

        assert!(manifest.contains("data_file 'AUDIO_GAMEDATA' 'audioconfig/bati/siren.dat'"));
        assert!(manifest.contains("  'audioconfig/bati/siren.dat151.rel'"));
        assert!(!manifest.contains("  'audioconfig/bati/siren.dat'"));
    }
}
