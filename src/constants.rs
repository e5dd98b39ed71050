// --- World ---
pub const WORLD_WIDTH: f64 = 1200.0;
pub const WORLD_HEIGHT: f64 = 800.0;

// --- Seeding and spawning ---
pub const INITIAL_ASTEROIDS: usize = 15;
pub const ASTEROID_SPAWN_ONE_IN: u32 = 150; // Per-frame chance of a new large asteroid
pub const ASTEROID_MAX_AXIS_SPEED: i32 = 4;

// --- Radii ---
pub const LARGE_ASTEROID_RADIUS: f64 = 25.0;
pub const SMALL_ASTEROID_RADIUS: f64 = 15.0;
pub const PLAYER_RADIUS: f64 = 20.0;
pub const BULLET_RADIUS: f64 = 10.0;
pub const EFFECT_RADIUS: f64 = 1.0;
pub const FRAGMENTS_PER_ASTEROID: usize = 2;

// --- Player ---
pub const PLAYER_THRUST: f64 = 0.2;
pub const PLAYER_MAX_SPEED: f64 = 15.0;
pub const PLAYER_DAMPING: f64 = 0.99;
pub const PLAYER_TURN_DEGREES: f64 = 3.0; // Per tick while held
pub const PLAYER_START_HEALTH: u32 = 5;
pub const PLAYER_SPAWN_ANGLE: f64 = 0.0;

// --- Bullets ---
pub const BULLET_SPEED: f64 = 6.0;

// --- Exhaust puffs ---
pub const EXHAUST_TTL: u32 = 10; // Frames
pub const EXHAUST_SPEED: f64 = 2.0;

// --- Frame pacing and input ---
pub const DEFAULT_FPS: u32 = 60;
pub const KEY_HOLD_FRAMES: u64 = 8; // Held-key fallback when the terminal reports no releases

// --- Debug screen ---
pub const DEBUG_SCREEN_WIDTH: u16 = 80;
pub const DEBUG_SCREEN_HEIGHT: u16 = 24;
