mod cli;
mod config;
mod error;
mod analysis;
mod audio;
mod render;
mod visualizer;

use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;

use cli::Cli;
use config::Settings;
use error::VisError;
use render::pacer::FramePacer;
use render::terminal::TerminalRenderer;
use visualizer::Visualizer;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut cli = Cli::parse();

    // Load config: explicit --config path, or auto-detect specterm.toml / global config
    let config_path = cli.config.clone().or_else(|| {
        let local = std::path::PathBuf::from("specterm.toml");
        if local.exists() {
            return Some(local);
        }
        if let Some(home) = dirs::home_dir() {
            let xdg = home.join(".config").join("specterm").join("config.toml");
            if xdg.exists() {
                return Some(xdg);
            }
        }
        if let Some(config_dir) = dirs::config_dir() {
            let platform = config_dir.join("specterm").join("config.toml");
            if platform.exists() {
                return Some(platform);
            }
        }
        None
    });
    if let Some(ref path) = config_path {
        if let Some(cfg) = config::load_config(path) {
            log::info!("Loaded config from {}", path.display());
            config::apply_config(&mut cli, cfg);
        } else {
            log::warn!("Failed to load config from {}", path.display());
        }
    }

    let input = cli.input.as_ref().context("Input audio file is required")?;
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let settings = Settings {
        fft_size: cli.fft_size,
        channel: cli.channel,
        delay: Duration::from_millis(cli.delay_ms),
        max_bar_width: cli.max_bar_width,
        scale: cli.scale,
    };
    settings.validate()?;

    log::info!("specterm - terminal audio spectrum visualizer");
    log::info!("Input: {}", input.display());
    log::info!(
        "Settings: fft_size={}, delay={}ms, max_bar_width={}, scale={}, channel={}",
        settings.fft_size,
        cli.delay_ms,
        settings.max_bar_width,
        settings.scale,
        settings.channel
    );

    // 1. Decode audio
    log::info!("Decoding audio...");
    let audio_data = audio::decode::decode_audio(input)?;

    let samples = audio_data.channel(settings.channel).ok_or_else(|| {
        VisError::InvalidConfiguration(format!(
            "channel {} not present (decoded {} channels)",
            settings.channel,
            audio_data.channel_count()
        ))
    })?;

    // 2. Prepare the pipeline
    let mut visualizer = Visualizer::new(&settings)?;
    let total_frames = analysis::frames::total_frames(samples.len(), settings.fft_size);
    log::info!(
        "Total frames: {}, cadence: {}ms ({:.1}s of visualization)",
        total_frames,
        cli.delay_ms,
        total_frames as f32 * cli.delay_ms as f32 / 1000.0
    );

    // 3. Render loop (quit with q, Esc or Ctrl-C)
    let mut renderer = TerminalRenderer::new()?;
    let mut pacer = FramePacer::new(settings.delay);
    let outcome = visualizer.run(samples, &mut renderer, &mut pacer);
    // Restore the terminal before anything else writes to stderr
    drop(renderer);

    let rendered = outcome?;
    log::info!("Done! Rendered {} of {} frames", rendered, total_frames);
    Ok(())
}
