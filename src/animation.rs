use crate::assets::Sheet;
use crate::error::GameError;
use crate::types::FrameRect;

#[derive(Clone, Debug)]
pub struct Animation {
    sheet: Sheet,
    frames: Vec<FrameRect>,
    cursor: f64,
    speed: f64,
    elapsed: f64,
}

impl Animation {
    pub fn new(sheet: Sheet, x: u32, y: u32, width: u32, height: u32, count: u32, speed: f64) -> Result<Self, GameError> {
        if count == 0 {
            return Err(GameError::InvalidAnimation { frame_count: count });
        }
        let frames = (0..count).map(|i| FrameRect::new(x + i * width, y, width, height)).collect();
        Ok(Animation { sheet, frames, cursor: 0.0, speed, elapsed: 0.0 })
    }

    pub fn advance(&mut self) {
        let n = self.frames.len() as f64;
        self.cursor = (self.cursor + self.speed) % n;
        self.elapsed += self.speed;
    }

    pub fn frame_index(&self) -> usize {
        self.cursor.floor() as usize % self.frames.len()
    }

    pub fn current_frame(&self) -> FrameRect {
        self.frames[self.frame_index()]
    }

    // True once one full pass over the frames has played. Never reverts.
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.frames.len() as f64
    }

    pub fn sheet(&self) -> Sheet {
        self.sheet
    }

    #[cfg(test)]
    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    #[cfg(test)]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

#[derive(Clone, Debug)]
pub struct SpriteSet {
    pub explosion: Animation,
    pub rock: Animation,
    pub rock_small: Animation,
    pub bullet: Animation,
    pub player: Animation,
    pub player_thrust: Animation,
    pub ship_explosion: Animation,
    pub health_pip: Animation,
    pub exhaust: Animation,
}

impl SpriteSet {
    pub fn standard() -> Result<Self, GameError> {
        Ok(SpriteSet {
            explosion: Animation::new(Sheet::Explosion, 0, 0, 256, 256, 48, 0.5)?,
            rock: Animation::new(Sheet::Rock, 0, 0, 64, 64, 16, 0.2)?,
            rock_small: Animation::new(Sheet::RockSmall, 0, 0, 64, 64, 16, 0.2)?,
            bullet: Animation::new(Sheet::Fire, 0, 0, 32, 64, 16, 0.8)?,
            player: Animation::new(Sheet::Spaceship, 40, 0, 40, 40, 1, 0.0)?,
            player_thrust: Animation::new(Sheet::Spaceship, 40, 40, 40, 40, 1, 0.0)?,
            ship_explosion: Animation::new(Sheet::ShipExplosion, 0, 0, 192, 192, 64, 0.5)?,
            health_pip: Animation::new(Sheet::HealthPoints, 0, 0, 225, 225, 1, 0.0)?,
            exhaust: Animation::new(Sheet::Smoke, 0, 0, 32, 32, 4, 0.4)?,
        })
    }
}
