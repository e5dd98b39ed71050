use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("failed to load asset '{}': {source}", path.display())]
    AssetLoad {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("asset '{}' contains no frames", path.display())]
    EmptySheet { path: PathBuf },

    #[error("animation needs at least one frame, got {frame_count}")]
    InvalidAnimation { frame_count: u32 },

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}
