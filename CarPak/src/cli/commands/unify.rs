use std::path::Path;
use std::time::Instant;

use indicatif::ProgressBar;

use crate::cli::progress::{DISK, LOOKING_GLASS, TRUCK, bar_style, print_done, print_step};
use crate::config::UnifierConfig;
use crate::logging;
use crate::unify::{OPERATIONS_LOG, discover_resources, prepare_destination};

pub fn execute(level: Option<String>, config_path: &Path, quiet: bool) -> anyhow::Result<()> {
    let started = Instant::now();

    let cfg = UnifierConfig::load(config_path)?;
    let level = level.unwrap_or(cfg.settings.level);
    let source_root = cfg.paths.base.join(format!("[{level}]"));
    let destination = cfg.paths.base.join(format!("{level}_Unified"));

    if !quiet {
        print_step(
            1,
            2,
            LOOKING_GLASS,
            &format!("Scanning {}...", source_root.display()),
        );
    }
    // Setup failures abort here, before the destination is touched.
    let resources = discover_resources(&source_root)?;

    prepare_destination(&destination)?;
    let _guard = logging::init_operations_log(&destination.join(OPERATIONS_LOG))?;
    tracing::info!("=== starting merge operation ===");

    if !quiet {
        print_step(
            2,
            2,
            TRUCK,
            &format!("Merging {} resource folders...", resources.len()),
        );
    }

    let result = if quiet {
        crate::unify::unify(&source_root, &destination, &resources)?
    } else {
        let bar = ProgressBar::new(resources.len() as u64);
        bar.set_style(bar_style());
        let outcome = crate::unify::unify_with_progress(
            &source_root,
            &destination,
            &resources,
            |current, _total, resource| {
                bar.set_position(current as u64);
                bar.set_message(resource.to_string());
            },
        );
        bar.finish_and_clear();
        outcome?
    };

    tracing::info!("=== merge operation completed ===");

    for line in &result.results {
        println!("  {line}");
    }
    println!(
        "{}Unified resource created at: {}",
        DISK,
        destination.display()
    );
    if result.fail_count > 0 {
        println!(
            "{} of {} resources failed; see {}",
            result.fail_count,
            resources.len(),
            destination.join(OPERATIONS_LOG).display()
        );
    }
    if !quiet {
        print_done(started.elapsed());
    }

    Ok(())
}
