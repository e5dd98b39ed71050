use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error, info};

use crate::error::GameError;
use crate::types::FrameRect;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sheet {
    Spaceship,
    Rock,
    RockSmall,
    Fire,
    Explosion,
    ShipExplosion,
    HealthPoints,
    Smoke,
}

impl Sheet {
    pub const ALL: [Sheet; 8] = [
        Sheet::Spaceship,
        Sheet::Rock,
        Sheet::RockSmall,
        Sheet::Fire,
        Sheet::Explosion,
        Sheet::ShipExplosion,
        Sheet::HealthPoints,
        Sheet::Smoke,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Sheet::Spaceship => "spaceship.txt",
            Sheet::Rock => "rock.txt",
            Sheet::RockSmall => "rock_small.txt",
            Sheet::Fire => "fire_blue.txt",
            Sheet::Explosion => "explosion_c.txt",
            Sheet::ShipExplosion => "explosion_b.txt",
            Sheet::HealthPoints => "health_points.txt",
            Sheet::Smoke => "smoke.txt",
        }
    }

    pub fn cell_size(self) -> (u32, u32) {
        match self {
            Sheet::Spaceship => (40, 40),
            Sheet::Rock | Sheet::RockSmall => (64, 64),
            Sheet::Fire => (32, 64),
            Sheet::Explosion => (256, 256),
            Sheet::ShipExplosion => (192, 192),
            Sheet::HealthPoints => (225, 225),
            Sheet::Smoke => (32, 32),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Debug)]
pub struct Atlas {
    pub path: PathBuf,
    rows: Vec<Vec<char>>,
    cell_width: u32,
    cell_height: u32,
}

impl Atlas {
    pub fn parse(path: PathBuf, text: &str, cell_size: (u32, u32)) -> Result<Self, GameError> {
        let rows: Vec<Vec<char>> = text
            .lines()
            .map(|line| line.trim_end_matches('\r').chars().collect::<Vec<char>>())
            .filter(|row| !row.is_empty())
            .collect();
        if rows.is_empty() {
            return Err(GameError::EmptySheet { path });
        }
        let (cell_width, cell_height) = cell_size;
        Ok(Atlas { path, rows, cell_width, cell_height })
    }

    // Glyph for an atlas cell; blank when the rectangle falls outside the sheet.
    pub fn glyph(&self, rect: FrameRect) -> char {
        let row = (rect.y / self.cell_height) as usize;
        let col = (rect.x / self.cell_width) as usize;
        self.rows.get(row).and_then(|r| r.get(col)).copied().unwrap_or(' ')
    }

    pub fn frame_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

pub struct AssetCatalog {
    atlases: Vec<Atlas>,
}

impl AssetCatalog {
    pub fn load(dir: &Path) -> Result<Self, GameError> {
        let mut atlases = Vec::with_capacity(Sheet::ALL.len());
        for sheet in Sheet::ALL {
            let path = dir.join(sheet.file_name());
            let text = fs::read_to_string(&path).map_err(|source| {
                error!("Failed to load asset {}: {}", path.display(), source);
                GameError::AssetLoad { path: path.clone(), source }
            })?;
            let atlas = Atlas::parse(path, &text, sheet.cell_size())?;
            debug!("Loaded {:?} from {} ({} frames)", sheet, atlas.path.display(), atlas.frame_count());
            atlases.push(atlas);
        }
        info!("Loaded {} sprite sheets from {}", atlases.len(), dir.display());
        Ok(AssetCatalog { atlases })
    }

    #[cfg(test)]
    pub fn from_sources(sources: [&str; 8]) -> Result<Self, GameError> {
        let mut atlases = Vec::with_capacity(sources.len());
        for (sheet, text) in Sheet::ALL.into_iter().zip(sources) {
            atlases.push(Atlas::parse(PathBuf::from(sheet.file_name()), text, sheet.cell_size())?);
        }
        Ok(AssetCatalog { atlases })
    }

    pub fn atlas(&self, sheet: Sheet) -> &Atlas {
        &self.atlases[sheet.index()]
    }

    pub fn glyph(&self, sheet: Sheet, rect: FrameRect) -> char {
        self.atlas(sheet).glyph(rect)
    }
}
