use std::path::Path;

use crate::config::UnifierConfig;
use crate::unify::discover_levels;

pub fn execute(config_path: &Path) -> anyhow::Result<()> {
    let cfg = UnifierConfig::load(config_path)?;
    let levels = discover_levels(&cfg.paths.base)?;

    println!("Base path: {}", cfg.paths.base.display());
    println!("Available levels:");
    for level in &levels {
        if *level == cfg.settings.level {
            println!("  {level} (default)");
        } else {
            println!("  {level}");
        }
    }

    Ok(())
}
