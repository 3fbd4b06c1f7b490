//! Blue Signal Replay - Main Entry Point
//!
//! Replays a recorded episode through the defender team and writes the
//! per-agent JSONL trace.

use anyhow::{Context, Result};

use blue_signal_core::constants::{APP_NAME, APP_VERSION};
use blue_signal_core::logic::replay::{replay, Episode};
use blue_signal_core::logic::trace::{default_trace_dir, TraceWriter};
use blue_signal_core::{EncoderConfig, ReplayConfig};

fn main() -> Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting {} v{}...", APP_NAME, APP_VERSION);

    let replay_config = ReplayConfig::from_env();
    let episode = Episode::load(&replay_config.episode_path)
        .with_context(|| format!("loading episode {}", replay_config.episode_path.display()))?;

    let config = episode.config.unwrap_or_else(EncoderConfig::from_env);
    log::info!(
        "Encoder config: analyze={} sticky={} decoys={} padded={}",
        config.analyze,
        config.sticky,
        config.decoys,
        config.padded
    );

    let mut writer = if replay_config.trace_enabled {
        let dir = replay_config.trace_dir.clone().unwrap_or_else(default_trace_dir);
        let writer = TraceWriter::from_path(&dir)
            .with_context(|| format!("creating trace directory {}", dir.display()))?;
        log::info!("Trace directory: {}", dir.display());
        Some(writer)
    } else {
        log::info!("Tracing disabled");
        None
    };

    let summary = replay(&episode, config, writer.as_mut()).context("replay failed")?;

    log::info!(
        "Episode {} done: {} steps, {} trace records, max level {}",
        summary.episode,
        summary.steps,
        summary.records,
        summary.max_level
    );
    log::info!(
        "Peer alarms per zone: {:?}, skipped actions: {}",
        summary.alarms,
        summary.skipped_actions
    );

    if let Some(writer) = writer.as_ref() {
        match writer.get_stats() {
            Ok(stats) => log::info!(
                "Trace: {} files, {:.2} MB, current {}",
                stats.total_files,
                stats.total_size_mb,
                stats.current_file
            ),
            Err(e) => log::warn!("Trace stats unavailable: {}", e),
        }
    }

    Ok(())
}
