use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;

use crate::constants::{DEBUG_SCREEN_HEIGHT, DEBUG_SCREEN_WIDTH, DEFAULT_FPS};

/// Terminal Asteroids.
#[derive(Debug, Parser)]
#[command(name = "asteroid-field", version)]
pub struct Cli {
    /// Run headless: scripted input, frames dumped to the log.
    #[arg(long)]
    pub debug: bool,

    /// Screen width in cells for debug runs.
    #[arg(long, default_value_t = DEBUG_SCREEN_WIDTH)]
    pub width: u16,

    /// Screen height in cells for debug runs.
    #[arg(long, default_value_t = DEBUG_SCREEN_HEIGHT)]
    pub height: u16,

    /// Stop after this many frames.
    #[arg(long)]
    pub frames: Option<u64>,

    /// Seed for the random generator. Picked at random when absent.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory holding the sprite sheets.
    #[arg(long, default_value = "assets")]
    pub assets: PathBuf,

    #[arg(long, default_value = "asteroid-field.log")]
    pub log_file: PathBuf,

    #[arg(long, default_value_t = LevelFilter::Info, value_parser = parse_level)]
    pub log_level: LevelFilter,

    /// Frame rate cap.
    #[arg(long, default_value_t = DEFAULT_FPS, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,
}

fn parse_level(value: &str) -> Result<LevelFilter, String> {
    value.parse().map_err(|_| format!("unknown log level '{value}'"))
}

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub debug: bool,
    pub debug_screen: (u16, u16),
    pub max_frames: Option<u64>,
    pub seed: u64,
    pub asset_dir: PathBuf,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    pub fps: u32,
}

impl GameConfig {
    pub fn from_cli(cli: Cli) -> Self {
        GameConfig {
            debug: cli.debug,
            debug_screen: (cli.width.max(1), cli.height.max(1)),
            max_frames: cli.frames,
            seed: cli.seed.unwrap_or_else(rand::random),
            asset_dir: cli.assets,
            log_file: cli.log_file,
            log_level: cli.log_level,
            fps: cli.fps,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }
}
