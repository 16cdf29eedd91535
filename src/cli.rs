use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "specterm", about = "Terminal audio spectrum visualizer")]
pub struct Cli {
    /// Input audio file (WAV, MP3, FLAC, OGG, AAC)
    pub input: Option<PathBuf>,

    /// Config file path (default: specterm.toml, then the user config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Samples per analysis frame (power of two)
    #[arg(long, default_value_t = 1024)]
    pub fft_size: usize,

    /// Delay between rendered frames in milliseconds
    #[arg(long, default_value_t = 100)]
    pub delay_ms: u64,

    /// Longest bar drawn for a single frequency bin
    #[arg(long, default_value_t = 50)]
    pub max_bar_width: usize,

    /// Magnitude-to-bar-length scale factor
    #[arg(long, default_value_t = 10.0)]
    pub scale: f32,

    /// Channel to analyze (0 = first/left)
    #[arg(long, default_value_t = 0)]
    pub channel: usize,
}
