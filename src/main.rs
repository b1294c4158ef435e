#![cfg_attr(all(not(debug_assertions), target_os = "windows"), windows_subsystem = "windows")]

use anyhow::anyhow;
use sonic_overlay::assets::{asset_dir, FrameStore};
use sonic_overlay::clock::SystemClock;
use sonic_overlay::config::MascotConfig;
use sonic_overlay::logging;
use sonic_overlay::mascot::Mascot;
use sonic_overlay::surface::{native_options, MascotApp};
use sonic_overlay::watcher::{format_watcher_status, GlobalInputWatcher, RdevHook};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    let config = MascotConfig::default();
    logging::init(config.debug_logging, None);

    let dir = asset_dir();
    let frames = FrameStore::load(&dir, config.sprite_size);
    if frames.is_empty() {
        anyhow::bail!("no sprite frames found in {}", dir.display());
    }
    let missing = frames.missing();
    if !missing.is_empty() {
        tracing::warn!(?missing, "some frames will render blank");
    }

    let mut hook = RdevHook;
    let watcher = GlobalInputWatcher::start(&mut hook, config.click_queue_capacity);
    tracing::info!("{}", format_watcher_status(watcher.status()));

    let options = native_options(&config);
    let mascot = Mascot::new(config, frames, Arc::new(SystemClock));
    eframe::run_native(
        "Sonic",
        options,
        Box::new(move |cc| Box::new(MascotApp::new(cc, mascot, watcher))),
    )
    .map_err(|e| anyhow!("overlay window failed: {e}"))
}
