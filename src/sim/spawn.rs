//! World bootstrap and replacement spawning

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::entity::{Entity, EntityId, Food};
use super::hazard::{BlackHole, WormHole};

/// Monotonic entity id source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdGen {
    next: EntityId,
}

impl Default for IdGen {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdGen {
    pub fn next_id(&mut self) -> EntityId {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Population density knobs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Density {
    /// One food per this many units of world side
    pub food_area_unit: f32,
    /// One enemy per this many units of world side
    pub enemy_area_unit: f32,
}

impl Default for Density {
    fn default() -> Self {
        Self {
            food_area_unit: 40.0,
            enemy_area_unit: 400.0,
        }
    }
}

impl Density {
    pub fn food_count(&self, world_size: f32) -> usize {
        (world_size / self.food_area_unit).floor().max(0.0) as usize
    }

    pub fn enemy_count(&self, world_size: f32) -> usize {
        (world_size / self.enemy_area_unit).floor().max(0.0) as usize
    }
}

/// Food and enemies for a fresh world. Enemy levels are uniform in 1..=5.
pub fn create_initial_entities(
    world_size: f32,
    density: Density,
    ids: &mut IdGen,
    rng: &mut Pcg32,
) -> Vec<Entity> {
    let food_count = density.food_count(world_size);
    let enemy_count = density.enemy_count(world_size);
    let mut entities = Vec::with_capacity(food_count + enemy_count);

    for _ in 0..food_count {
        entities.push(Entity::Food(Food::random(ids.next_id(), world_size, rng)));
    }
    for _ in 0..enemy_count {
        let level = rng.random_range(1..=5);
        entities.push(Entity::Enemy(Enemy::random(ids.next_id(), world_size, level, rng)));
    }

    log::debug!("seeded {food_count} food and {enemy_count} enemies");
    entities
}

/// Black holes plus linked wormhole pairs; wormholes are only ever made in pairs
pub fn create_hazards(
    world_size: f32,
    black_holes: usize,
    wormhole_pairs: usize,
    ids: &mut IdGen,
    rng: &mut Pcg32,
) -> Vec<Entity> {
    let mut hazards = Vec::with_capacity(black_holes + wormhole_pairs * 2);
    for _ in 0..black_holes {
        hazards.push(Entity::BlackHole(BlackHole::random(ids.next_id(), world_size, rng)));
    }
    for _ in 0..wormhole_pairs {
        let first = ids.next_id();
        let second = ids.next_id();
        let (a, b) = WormHole::random_pair(first, second, world_size, rng);
        hazards.push(Entity::WormHole(a));
        hazards.push(Entity::WormHole(b));
    }
    hazards
}

/// Fresh entity of the same kind, used to keep populations constant.
/// Enemies keep their level. Returns `None` for kinds that are not replaced.
pub fn replacement_for(
    entity: &Entity,
    world_size: f32,
    ids: &mut IdGen,
    rng: &mut Pcg32,
) -> Option<Entity> {
    match entity {
        Entity::Food(_) => Some(Entity::Food(Food::random(ids.next_id(), world_size, rng))),
        Entity::Enemy(e) => Some(Entity::Enemy(Enemy::random(
            ids.next_id(),
            world_size,
            e.level,
            rng,
        ))),
        _ => None,
    }
}
