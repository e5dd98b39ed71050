use std::io;

use clap::Parser;
use crossterm::terminal::size;
use log::{error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

mod animation;
mod assets;
mod collision;
mod config;
mod constants;
mod entities;
mod error;
mod game;
mod rendering;
mod terminal_io;
mod types;
mod world;

use animation::SpriteSet;
use assets::AssetCatalog;
use config::{Cli, GameConfig};
use error::GameError;
use game::{Game, Simulation};
use rendering::{OutputTarget, ScreenBuffer};
use terminal_io::{InputCollector, InputSource, SimulatedInput, TerminalGuard};

fn main() -> Result<(), GameError> {
    let config = GameConfig::from_cli(Cli::parse());
    simple_logging::log_to_file(&config.log_file, config.log_level)?;
    info!("Starting asteroid-field with seed {}.", config.seed);

    let catalog = AssetCatalog::load(&config.asset_dir)?;
    let sprites = SpriteSet::standard()?;
    let simulation = Simulation::new(sprites, StdRng::seed_from_u64(config.seed));

    if config.debug {
        let (width, height) = config.debug_screen;
        info!("Debug mode enabled. Resolution {}x{}", width, height);
        let stdout_target = OutputTarget::ScreenBuffer(ScreenBuffer::new(width, height));
        let input = InputCollector::new(InputSource::Simulated(SimulatedInput::demo_script()), false);
        return Game::new(config, stdout_target, input, catalog, simulation, (width, height)).run();
    }

    let guard = TerminalGuard::enter()?;
    let (width, height) = size().map_err(|e| { error!("Failed to get terminal size: {}", e); e })?;
    info!("Terminal size: {}x{}", width, height);

    let input = InputCollector::new(InputSource::Terminal, guard.reports_release());
    let result = Game::new(config, OutputTarget::Stdout(io::stdout()), input, catalog, simulation, (width, height)).run();
    drop(guard);

    if let Err(e) = &result {
        error!("Game ended with an error: {}", e);
    }
    info!("Exiting asteroid-field.");
    result
}
