use crate::cli::WatchArgs;
use crate::config::open_linker;
use anyhow::Result;
use autolink_core::{Autolinker, ChangeDetector, SettingsStore};
use std::path::Path;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{error, info, warn};

pub async fn run(args: WatchArgs, settings: &Path) -> Result<()> {
    let mut linker = open_linker(settings)?;
    if !linker.autoscan_active() {
        warn!("autoscan_active_document is off; waiting for `autolink config set --autoscan true`");
    }

    let mut detector = ChangeDetector::new(linker.check_interval(), Instant::now().into_std());
    let mut ticker = ticker_for(&linker);

    info!(
        "Watching {} (quiet period {}ms)",
        args.file.display(),
        linker.check_interval().as_millis()
    );

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        let ticked = tokio::select! {
            _ = ticker.tick() => true,
            _ = &mut shutdown => false,
        };
        if !ticked {
            info!("Shutdown signal received, stopping watch");
            break;
        }

        if let Err(e) = scan_tick(&mut linker, &mut detector, &args.file, Instant::now()).await {
            error!("Autoscan of {} failed: {}", args.file.display(), e);
        }

        if linker.check_interval() != detector.check_interval() {
            detector.set_check_interval(linker.check_interval());
            ticker = ticker_for(&linker);
            info!(
                "Quiet period changed to {}ms",
                linker.check_interval().as_millis()
            );
        }
    }

    Ok(())
}

/// Timer ticking at half the quiet period.
fn ticker_for<S: SettingsStore>(linker: &Autolinker<S>) -> Interval {
    let mut ticker = tokio::time::interval(linker.settings().tick_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// One timer tick: pick up settings written by other commands, then rescan
/// the note if autoscan is on and it has been quiet long enough.
/// Returns true when the file was rewritten.
async fn scan_tick<S: SettingsStore>(
    linker: &mut Autolinker<S>,
    detector: &mut ChangeDetector,
    path: &Path,
    now: Instant,
) -> Result<bool> {
    match linker.reload() {
        Ok(true) => info!("Settings changed on disk, reloaded"),
        Ok(false) => {}
        Err(e) => warn!("Keeping previous settings, reload failed: {}", e),
    }
    if !linker.autoscan_active() {
        return Ok(false);
    }

    let text = tokio::fs::read_to_string(path).await?;
    if !detector.observe(text.len(), now.into_std()) {
        return Ok(false);
    }

    let (rewritten, stats) = linker.scan_with_stats(&text);
    detector.mark_scanned(rewritten.len());
    if rewritten == text {
        return Ok(false);
    }

    tokio::fs::write(path, &rewritten).await?;
    info!(
        "{}: {} links created",
        path.display(),
        stats.links_created
    );
    Ok(true)
}
