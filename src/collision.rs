use log::debug;
use rand::Rng;

use crate::animation::SpriteSet;
use crate::constants::*;
use crate::entities::{AsteroidSize, Category, Entity};
use crate::types::Vector2D;
use crate::world::{EntityId, World};

#[derive(Clone, Debug, PartialEq)]
pub enum FrameEvent {
    AsteroidDestroyed { position: Vector2D, size: AsteroidSize },
    AsteroidFragmented { position: Vector2D, fragments: Vec<EntityId> },
    PlayerHit { position: Vector2D, health_left: u32 },
    PlayerDestroyed { position: Vector2D, wreck: EntityId },
}

pub fn collide(a: &Entity, b: &Entity) -> bool {
    let reach = a.radius + b.radius;
    a.position.distance_squared(b.position) < reach * reach
}

fn overlapping(world: &World, a: EntityId, b: EntityId) -> bool {
    match (world.get(a), world.get(b)) {
        (Some(a), Some(b)) => a.is_alive() && b.is_alive() && collide(a, b),
        _ => false,
    }
}

/// Applies every collision rule for this frame. Entities spawned here are not
/// tested until the next frame.
pub fn resolve_collisions(world: &mut World, player: EntityId, sprites: &SpriteSet, rng: &mut impl Rng) -> Vec<FrameEvent> {
    let mut events = Vec::new();
    let asteroids = world.alive_ids(Category::Asteroid);
    let bullets = world.alive_ids(Category::Bullet);

    for &asteroid in &asteroids {
        for &bullet in &bullets {
            if overlapping(world, asteroid, bullet) {
                shoot_asteroid(world, asteroid, bullet, player, sprites, rng, &mut events);
            }
        }
    }

    for &asteroid in &asteroids {
        if overlapping(world, player, asteroid) {
            ram_asteroid(world, player, asteroid, sprites, &mut events);
        }
    }

    events
}

fn shoot_asteroid(
    world: &mut World,
    asteroid: EntityId,
    bullet: EntityId,
    player: EntityId,
    sprites: &SpriteSet,
    rng: &mut impl Rng,
    events: &mut Vec<FrameEvent>,
) {
    let Some(rock) = world.get_mut(asteroid) else { return };
    rock.kill();
    let position = rock.position;
    let size = rock.asteroid_size().unwrap_or(AsteroidSize::Small);
    if let Some(b) = world.get_mut(bullet) {
        b.kill();
    }

    world.spawn(Entity::explosion(position, sprites.explosion.clone()));

    if let Some(fragment_size) = size.fragment() {
        let fragments: Vec<EntityId> = (0..FRAGMENTS_PER_ASTEROID)
            .map(|_| {
                let heading = f64::from(rng.gen_range(0..=360_i32));
                world.spawn(Entity::asteroid(position, heading, fragment_size, sprites, &mut *rng))
            })
            .collect();
        debug!("Asteroid split into {} fragments at ({}, {})", fragments.len(), position.x, position.y);
        events.push(FrameEvent::AsteroidFragmented { position, fragments });
    }

    if let Some(state) = world.get_mut(player).and_then(Entity::player_state_mut) {
        state.add_point();
        debug!("Asteroid destroyed. Score: {}", state.score);
    }
    events.push(FrameEvent::AsteroidDestroyed { position, size });
}

fn ram_asteroid(world: &mut World, player: EntityId, asteroid: EntityId, sprites: &SpriteSet, events: &mut Vec<FrameEvent>) {
    if let Some(rock) = world.get_mut(asteroid) {
        rock.kill();
    }

    let spawn_point = Vector2D::new(world.width / 2.0, world.height / 2.0);
    let Some(ship) = world.get_mut(player) else { return };
    let position = ship.position;
    let health_left = match ship.player_state_mut() {
        Some(state) => state.take_hit(),
        None => return,
    };

    if health_left > 0 {
        ship.respawn(spawn_point, PLAYER_SPAWN_ANGLE);
        world.spawn(Entity::explosion(position, sprites.ship_explosion.clone()));
        debug!("Player hit at ({}, {}). Health: {}", position.x, position.y, health_left);
        events.push(FrameEvent::PlayerHit { position, health_left });
    } else {
        ship.kill();
        let wreck = world.spawn(Entity::explosion(position, sprites.ship_explosion.clone()));
        debug!("Player destroyed at ({}, {})", position.x, position.y);
        events.push(FrameEvent::PlayerHit { position, health_left });
        events.push(FrameEvent::PlayerDestroyed { position, wreck });
    }
}
