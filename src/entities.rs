use rand::Rng;

use crate::animation::{Animation, SpriteSet};
use crate::constants::*;
use crate::types::{Vector2D, out_of_bounds, wrap_edge};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Asteroid,
    Player,
    Bullet,
    Explosion,
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AsteroidSize {
    Large,
    Small,
}

impl AsteroidSize {
    pub fn radius(self) -> f64 {
        match self {
            AsteroidSize::Large => LARGE_ASTEROID_RADIUS,
            AsteroidSize::Small => SMALL_ASTEROID_RADIUS,
        }
    }

    pub fn fragment(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerState {
    pub thrust: bool,
    pub max_speed: f64,
    pub damping: f64,
    pub health: u32,
    pub score: u32,
}

impl Default for PlayerState {
    fn default() -> Self {
        PlayerState {
            thrust: false,
            max_speed: PLAYER_MAX_SPEED,
            damping: PLAYER_DAMPING,
            health: PLAYER_START_HEALTH,
            score: 0,
        }
    }
}

impl PlayerState {
    // Takes one hit and returns the health left. Never goes below zero.
    pub fn take_hit(&mut self) -> u32 {
        self.health = self.health.saturating_sub(1);
        self.health
    }

    pub fn add_point(&mut self) {
        self.score += 1;
    }
}

#[derive(Clone, Debug)]
pub enum EntityKind {
    Asteroid(AsteroidSize),
    Bullet,
    Player(PlayerState),
    Explosion,
    Exhaust { ttl: u32 },
}

impl EntityKind {
    pub fn category(&self) -> Category {
        match self {
            EntityKind::Asteroid(_) => Category::Asteroid,
            EntityKind::Bullet => Category::Bullet,
            EntityKind::Player(_) => Category::Player,
            EntityKind::Explosion => Category::Explosion,
            EntityKind::Exhaust { .. } => Category::None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Entity {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub angle: f64, // Degrees
    pub radius: f64,
    pub animation: Animation,
    alive: bool,
    kind: EntityKind,
}

impl Entity {
    fn new(kind: EntityKind, position: Vector2D, angle: f64, radius: f64, animation: Animation) -> Self {
        Entity {
            position,
            velocity: Vector2D::ZERO,
            angle,
            radius,
            animation,
            alive: true,
            kind,
        }
    }

    pub fn asteroid(position: Vector2D, angle: f64, size: AsteroidSize, sprites: &SpriteSet, rng: &mut impl Rng) -> Self {
        let animation = match size {
            AsteroidSize::Large => sprites.rock.clone(),
            AsteroidSize::Small => sprites.rock_small.clone(),
        };
        let mut asteroid = Entity::new(EntityKind::Asteroid(size), position, angle, size.radius(), animation);
        asteroid.velocity = Vector2D::new(
            f64::from(rng.gen_range(-ASTEROID_MAX_AXIS_SPEED..=ASTEROID_MAX_AXIS_SPEED)),
            f64::from(rng.gen_range(-ASTEROID_MAX_AXIS_SPEED..=ASTEROID_MAX_AXIS_SPEED)),
        );
        asteroid
    }

    pub fn bullet(position: Vector2D, angle: f64, sprites: &SpriteSet) -> Self {
        Entity::new(EntityKind::Bullet, position, angle, BULLET_RADIUS, sprites.bullet.clone())
    }

    pub fn player(position: Vector2D, angle: f64, sprites: &SpriteSet) -> Self {
        Entity::new(EntityKind::Player(PlayerState::default()), position, angle, PLAYER_RADIUS, sprites.player.clone())
    }

    pub fn explosion(position: Vector2D, animation: Animation) -> Self {
        Entity::new(EntityKind::Explosion, position, 0.0, EFFECT_RADIUS, animation)
    }

    pub fn exhaust(position: Vector2D, angle: f64, sprites: &SpriteSet) -> Self {
        let mut puff = Entity::new(EntityKind::Exhaust { ttl: EXHAUST_TTL }, position, angle, EFFECT_RADIUS, sprites.exhaust.clone());
        puff.velocity = Vector2D::from_heading(angle).scale(-EXHAUST_SPEED);
        puff
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    pub fn asteroid_size(&self) -> Option<AsteroidSize> {
        match self.kind {
            EntityKind::Asteroid(size) => Some(size),
            _ => None,
        }
    }

    pub fn player_state(&self) -> Option<&PlayerState> {
        match &self.kind {
            EntityKind::Player(state) => Some(state),
            _ => None,
        }
    }

    pub fn player_state_mut(&mut self) -> Option<&mut PlayerState> {
        match &mut self.kind {
            EntityKind::Player(state) => Some(state),
            _ => None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn respawn(&mut self, position: Vector2D, angle: f64) {
        self.position = position;
        self.angle = angle;
        self.velocity = Vector2D::ZERO;
    }

    pub fn update(&mut self, width: f64, height: f64) {
        match &mut self.kind {
            EntityKind::Asteroid(_) => {
                self.position = self.position.add(self.velocity.truncated());
                self.wrap(width, height);
            }
            EntityKind::Bullet => {
                self.velocity = Vector2D::from_heading(self.angle).scale(BULLET_SPEED);
                self.position = self.position.add(self.velocity.truncated());
                if out_of_bounds(self.position, width, height) {
                    self.alive = false;
                }
            }
            EntityKind::Player(state) => {
                if state.thrust {
                    self.velocity = self.velocity.add(Vector2D::from_heading(self.angle).scale(PLAYER_THRUST));
                } else {
                    self.velocity = self.velocity.scale(state.damping);
                }

                let speed = self.velocity.length();
                if speed > state.max_speed {
                    self.velocity = self.velocity.scale(state.max_speed / speed);
                }

                self.position = self.position.add(self.velocity.truncated());
                self.wrap(width, height);
            }
            EntityKind::Explosion => {}
            EntityKind::Exhaust { ttl } => {
                *ttl = ttl.saturating_sub(1);
                self.position = self.position.add(self.velocity.truncated());
                if *ttl == 0 || out_of_bounds(self.position, width, height) {
                    self.alive = false;
                }
            }
        }
    }

    fn wrap(&mut self, width: f64, height: f64) {
        self.position.x = wrap_edge(self.position.x, width);
        self.position.y = wrap_edge(self.position.y, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sprites() -> SpriteSet {
        SpriteSet::standard().unwrap()
    }

    #[test]
    fn asteroid_velocity_is_whole_and_bounded() {
        let sprites = sprites();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let a = Entity::asteroid(Vector2D::new(10.0, 10.0), 0.0, AsteroidSize::Large, &sprites, &mut rng);
            assert!(a.velocity.x.abs() <= 4.0 && a.velocity.y.abs() <= 4.0);
            assert_eq!(a.velocity.x.fract(), 0.0);
            assert_eq!(a.velocity.y.fract(), 0.0);
            assert_eq!(a.radius, 25.0);
            assert_eq!(a.category(), Category::Asteroid);
        }
    }

    #[test]
    fn asteroid_wraps_to_edge_values() {
        let sprites = sprites();
        let mut rng = StdRng::seed_from_u64(1);
        let mut a = Entity::asteroid(Vector2D::new(1198.0, 2.0), 0.0, AsteroidSize::Small, &sprites, &mut rng);
        a.velocity = Vector2D::new(4.0, -4.0);
        a.update(WORLD_WIDTH, WORLD_HEIGHT);
        assert_eq!(a.position, Vector2D::new(0.0, WORLD_HEIGHT));
        assert!(a.is_alive());
    }

    #[test]
    fn bullet_leaving_right_edge_dies() {
        let mut b = Entity::bullet(Vector2D::new(1199.0, 400.0), 0.0, &sprites());
        b.update(WORLD_WIDTH, WORLD_HEIGHT);
        assert!(b.position.x > WORLD_WIDTH);
        assert!(!b.is_alive());
    }

    #[test]
    fn bullet_moves_six_units_along_heading() {
        let mut b = Entity::bullet(Vector2D::new(600.0, 400.0), 90.0, &sprites());
        b.update(WORLD_WIDTH, WORLD_HEIGHT);
        assert_eq!(b.position, Vector2D::new(600.0, 406.0));
        assert!(b.is_alive());
    }

    #[test]
    fn player_thrust_accelerates_and_caps_speed() {
        let mut p = Entity::player(Vector2D::new(600.0, 400.0), 0.0, &sprites());
        p.player_state_mut().unwrap().thrust = true;
        for _ in 0..200 {
            p.update(WORLD_WIDTH, WORLD_HEIGHT);
        }
        assert!(p.velocity.length() <= PLAYER_MAX_SPEED + 1e-9);
        assert!(p.velocity.length() > PLAYER_MAX_SPEED - 0.5);
    }

    #[test]
    fn player_coasting_is_damped() {
        let mut p = Entity::player(Vector2D::new(600.0, 400.0), 0.0, &sprites());
        p.velocity = Vector2D::new(10.0, 0.0);
        p.update(WORLD_WIDTH, WORLD_HEIGHT);
        assert!((p.velocity.x - 9.9).abs() < 1e-9);
        assert_eq!(p.position, Vector2D::new(609.0, 400.0));
    }

    #[test]
    fn player_wraps_like_asteroids() {
        let mut p = Entity::player(Vector2D::new(3.0, 400.0), 180.0, &sprites());
        p.velocity = Vector2D::new(-5.0, 0.0);
        p.update(WORLD_WIDTH, WORLD_HEIGHT);
        assert_eq!(p.position.x, WORLD_WIDTH);
    }

    #[test]
    fn exhaust_expires_after_its_ttl() {
        let mut puff = Entity::exhaust(Vector2D::new(600.0, 400.0), 0.0, &sprites());
        assert_eq!(puff.category(), Category::None);
        for _ in 0..EXHAUST_TTL - 1 {
            puff.update(WORLD_WIDTH, WORLD_HEIGHT);
            assert!(puff.is_alive());
        }
        puff.update(WORLD_WIDTH, WORLD_HEIGHT);
        assert!(!puff.is_alive());
    }

    #[test]
    fn kill_is_permanent() {
        let mut e = Entity::explosion(Vector2D::new(1.0, 1.0), sprites().explosion);
        e.kill();
        e.update(WORLD_WIDTH, WORLD_HEIGHT);
        assert!(!e.is_alive());
    }

    #[test]
    fn take_hit_saturates_at_zero() {
        let mut state = PlayerState { health: 1, ..PlayerState::default() };
        assert_eq!(state.take_hit(), 0);
        assert_eq!(state.take_hit(), 0);
    }
}
