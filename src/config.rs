use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;
use crate::error::{Result, VisError};

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_fft_size")]
    pub fft_size: usize,
    #[serde(default = "default_channel")]
    pub channel: usize,
}

#[derive(Debug, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    #[serde(default = "default_max_bar_width")]
    pub max_bar_width: usize,
    #[serde(default = "default_scale")]
    pub scale: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            fft_size: default_fft_size(),
            channel: default_channel(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            max_bar_width: default_max_bar_width(),
            scale: default_scale(),
        }
    }
}

fn default_fft_size() -> usize { 1024 }
fn default_channel() -> usize { 0 }
fn default_delay_ms() -> u64 { 100 }
fn default_max_bar_width() -> usize { 50 }
fn default_scale() -> f32 { 10.0 }

pub fn load_config(path: &PathBuf) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge: config values apply only when the CLI flag is still at its default.
pub fn apply_config(cli: &mut Cli, cfg: Config) {
    if cli.fft_size == 1024 { cli.fft_size = cfg.analysis.fft_size; }
    if cli.channel == 0 { cli.channel = cfg.analysis.channel; }
    if cli.delay_ms == 100 { cli.delay_ms = cfg.display.delay_ms; }
    if cli.max_bar_width == 50 { cli.max_bar_width = cfg.display.max_bar_width; }
    if cli.scale == 10.0 { cli.scale = cfg.display.scale; }
}

/// Validated runtime settings for one visualization run, merged from CLI
/// flags and the config file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub fft_size: usize,
    pub channel: usize,
    pub delay: Duration,
    pub max_bar_width: usize,
    pub scale: f32,
}

impl Settings {
    /// Reject values the pipeline cannot run with. Checked once at startup;
    /// everything downstream assumes they hold.
    pub fn validate(&self) -> Result<()> {
        if !self.fft_size.is_power_of_two() {
            return Err(VisError::InvalidConfiguration(format!(
                "fft-size must be a power of two, got {}",
                self.fft_size
            )));
        }
        if self.delay.is_zero() {
            return Err(VisError::InvalidConfiguration(
                "delay-ms must be greater than zero".into(),
            ));
        }
        if self.max_bar_width == 0 {
            return Err(VisError::InvalidConfiguration(
                "max-bar-width must be greater than zero".into(),
            ));
        }
        if !(self.scale > 0.0 && self.scale.is_finite()) {
            return Err(VisError::InvalidConfiguration(format!(
                "scale must be a positive finite number, got {}",
                self.scale
            )));
        }
        Ok(())
    }
}
