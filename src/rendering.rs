use std::io::{self, Write};

use crossterm::{cursor::MoveTo, execute};
use log::info;

use crate::assets::AssetCatalog;
use crate::entities::{Category, Entity};
use crate::types::Vector2D;
use crate::world::World;

// --- ScreenBuffer for simulated rendering ---
pub struct ScreenBuffer {
    pub buffer: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    pub cursor_x: u16,
    pub cursor_y: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            if self.cursor_y < self.height && self.cursor_x < self.width {
                self.buffer[self.cursor_y as usize][self.cursor_x as usize] = c;
            }
            self.cursor_x = self.cursor_x.saturating_add(1);
        }
    }

    #[cfg(test)]
    pub fn row(&self, y: u16) -> String {
        self.buffer[y as usize].iter().collect()
    }

    pub fn print_to_log(&self) {
        info!("--- Screen Buffer ---");
        for row in &self.buffer {
            info!("{}", row.iter().collect::<String>());
        }
        info!("---------------------");
    }
}

impl Write for ScreenBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        self.write_str(&s);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// --- OutputTarget enum to handle stdout or ScreenBuffer ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn execute_move_to(&mut self, command: MoveTo) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(command.0, command.1);
                Ok(())
            }
        }
    }

    pub fn log_screen(&self) {
        if let OutputTarget::ScreenBuffer(sb) = self {
            sb.print_to_log();
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => sb.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(sb) => sb.flush(),
        }
    }
}

// --- GameGrid: one frame of glyphs, projected from world space ---
pub struct GameGrid {
    pub grid: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
}

impl GameGrid {
    pub fn new(width: u16, height: u16) -> Self {
        GameGrid {
            grid: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
        }
    }

    pub fn set_char(&mut self, x: u16, y: u16, c: char) {
        if y < self.height && x < self.width {
            self.grid[y as usize][x as usize] = c;
        }
    }

    pub fn put_str(&mut self, x: u16, y: u16, s: &str) {
        for (i, c) in s.chars().enumerate() {
            self.set_char(x.saturating_add(i as u16), y, c);
        }
    }

    pub fn put_centered(&mut self, y: u16, s: &str) {
        let x = (self.width / 2).saturating_sub(s.chars().count() as u16 / 2);
        self.put_str(x, y, s);
    }

    pub fn clear(&mut self) {
        for row in &mut self.grid {
            row.fill(' ');
        }
    }

    #[cfg(test)]
    pub fn row(&self, y: u16) -> String {
        self.grid[y as usize].iter().collect()
    }

    pub fn render(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", self.grid[y as usize].iter().collect::<String>())?;
        }
        stdout.flush()
    }

    pub fn clear_screen_manual(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", " ".repeat(self.width as usize))?;
        }
        stdout.execute_move_to(MoveTo(0, 0))?;
        stdout.flush()
    }
}

pub fn project(position: Vector2D, world_width: f64, world_height: f64, cols: u16, rows: u16) -> (u16, u16) {
    let col = (position.x / world_width * f64::from(cols)).floor();
    let row = (position.y / world_height * f64::from(rows)).floor();
    let clamp = |v: f64, cells: u16| v.clamp(0.0, f64::from(cells.saturating_sub(1))) as u16;
    (clamp(col, cols), clamp(row, rows))
}

// Arrow glyph for a heading in degrees (screen space, y down).
pub fn heading_glyph(angle: f64) -> char {
    let octant = ((angle.rem_euclid(360.0) + 22.5) / 45.0).floor() as u32 % 8;
    match octant {
        0 => '>',
        1 => '\\',
        2 => 'v',
        3 => '/',
        4 => '<',
        5 => '\\',
        6 => '^',
        _ => '/',
    }
}

const DRAW_ORDER: [Category; 5] = [Category::None, Category::Explosion, Category::Asteroid, Category::Bullet, Category::Player];
const AIM_DISTANCE: f64 = 40.0;

pub fn draw_world(game_grid: &mut GameGrid, world: &World, catalog: &AssetCatalog) {
    for category in DRAW_ORDER {
        for (_, entity) in world.iter().filter(|(_, e)| e.is_alive() && e.category() == category) {
            draw_entity(game_grid, world, entity, catalog);
        }
    }
}

fn draw_entity(game_grid: &mut GameGrid, world: &World, entity: &Entity, catalog: &AssetCatalog) {
    let (cols, rows) = (game_grid.width, game_grid.height);
    let glyph = catalog.glyph(entity.animation.sheet(), entity.animation.current_frame());
    let (x, y) = project(entity.position, world.width, world.height, cols, rows);
    game_grid.set_char(x, y, glyph);

    if entity.category() == Category::Player {
        let aim = entity.position.add(Vector2D::from_heading(entity.angle).scale(AIM_DISTANCE));
        let (ax, ay) = project(aim, world.width, world.height, cols, rows);
        if (ax, ay) != (x, y) {
            game_grid.set_char(ax, ay, heading_glyph(entity.angle));
        }
    }
}

const CONTROLS_TEXT: [&str; 4] = [
    "Up Arrow   : Thrust",
    "Left/Right : Rotate",
    "Spacebar   : Fire",
    "q / Esc    : Quit",
];

pub fn draw_hud(game_grid: &mut GameGrid, score: u32, health: u32, pip: char) {
    game_grid.put_str(0, 0, &format!("Score: {}", score));

    for i in 0..health.min(u32::from(game_grid.width / 2)) {
        let x = game_grid.width.saturating_sub(2 * (i as u16 + 1));
        game_grid.set_char(x, 0, pip);
    }

    let start_y = game_grid.height.saturating_sub(CONTROLS_TEXT.len() as u16);
    for (i, line) in CONTROLS_TEXT.iter().enumerate() {
        game_grid.put_str(0, start_y.saturating_add(i as u16), line);
    }
}

pub fn draw_game_over(game_grid: &mut GameGrid, score: u32) {
    game_grid.clear();
    let mid = game_grid.height / 2;
    game_grid.put_centered(mid.saturating_sub(2), "GAME OVER!");
    game_grid.put_centered(mid, &format!("Final Score: {}", score));
    game_grid.put_centered(mid + 2, "Press any key to exit...");
}
