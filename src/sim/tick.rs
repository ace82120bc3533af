//! Per-frame world update
//!
//! Ordering within a frame is load-bearing:
//! input → player move/aim/shoot → clamp player → camera → hazard forces →
//! enemy/projectile/hazard behaviour → combat → cleanup and replacement →
//! progression.
//!
//! Nothing is removed while a list is being walked. Consumed entities are
//! marked inactive and replaced or compacted once combat is done.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::collision::CollisionManager;
use super::entity::{Entity, EntityId, UpdateContext};
use super::hazard::{ExitPortal, ForceTarget, HazardContact};
use super::spawn::replacement_for;
use super::state::{GameEvent, GameState, UpgradeOffer};
use super::upgrades::{upgrades_for_level, UpgradeOption};
use super::vector::VectorExt;
use crate::clamp_to_world;
use crate::consts::MIN_CONTACT_DAMAGE;

/// Input snapshot for one frame, mouse in screen space
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub shooting: bool,
    pub mouse_position: Option<Vec2>,
}

impl TickInput {
    /// Unit movement direction from the held keys, zero when idle or cancelled
    pub fn move_direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir.normalized()
    }
}

/// Advance the world by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Progression gates simulation time
    if state.pending_upgrade.is_some() {
        return;
    }
    if state.player.is_none() {
        log::warn!("frame {}: no player, skipping update", state.frame);
        return;
    }

    state.frame += 1;
    state.elapsed += dt;

    drive_player(state, input, dt);
    apply_hazard_forces(state, dt);
    update_behaviour(state, dt);
    resolve_combat(state);
    cleanup(state);
    check_progression(state);
}

/// Move, aim and fire, then clamp the player and follow it with the camera
fn drive_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let Some(player) = state.player.as_mut() else {
        return;
    };

    player.move_by(input.move_direction(), dt);
    if let Some(mouse) = input.mouse_position {
        player.aim(state.camera.screen_to_world_position(mouse));
    }
    if input.shooting && player.can_shoot() {
        let id = state.ids.next_id();
        let facing = player.facing;
        if let Some(projectile) = player.shoot(id, facing) {
            state.projectiles.push(projectile);
        }
    }
    player.update(dt);

    player.body.pos = clamp_to_world(player.body.pos, player.body.radius, state.world_size);
    state.camera.center_on(player.body.pos);
}

/// Every hazard acts on the player, food, enemies and projectiles
fn apply_hazard_forces(state: &mut GameState, dt: f32) {
    let GameState {
        hazards,
        player,
        entities,
        projectiles,
        rng,
        events,
        ..
    } = state;

    if let Some(player) = player.as_mut()
        && apply_hazards(hazards, player, dt, rng, events)
    {
        log::info!("player crushed by a black hole");
        events.push(GameEvent::PlayerDied);
    }
    for entity in entities.iter_mut() {
        apply_hazards(hazards, entity, dt, rng, events);
    }
    for projectile in projectiles.iter_mut() {
        apply_hazards(hazards, projectile, dt, rng, events);
    }
}

/// Exit data for a wormhole's partner, if it has one
fn exit_portal(hazards: &[Entity], exit_id: Option<EntityId>) -> Option<ExitPortal> {
    let exit_id = exit_id?;
    hazards
        .iter()
        .filter_map(Entity::as_wormhole)
        .find(|w| w.body.id == exit_id)
        .map(|w| w.exit_portal())
}

/// Run one target through every hazard. Returns true if this killed the player.
fn apply_hazards<T: ForceTarget + ?Sized>(
    hazards: &mut [Entity],
    target: &mut T,
    dt: f32,
    rng: &mut Pcg32,
    events: &mut Vec<GameEvent>,
) -> bool {
    let mut killed_player = false;

    for i in 0..hazards.len() {
        if !target.body().active {
            break;
        }
        let exit_id = hazards[i].as_wormhole().and_then(|w| w.exit_id);
        let exit = exit_portal(hazards, exit_id);

        let contact = match &mut hazards[i] {
            Entity::BlackHole(hole) => hole.apply_gravity_to(target, dt),
            Entity::WormHole(worm) => worm.apply_suction_to(target, exit, dt, rng),
            _ => None,
        };

        match contact {
            Some(HazardContact::Crushed { killed_player: killed }) => {
                killed_player |= killed;
                if !target.body().active {
                    events.push(GameEvent::Consumed {
                        entity_id: target.body().id,
                    });
                }
            }
            Some(HazardContact::Teleported { exit_id, .. }) => {
                // Both ends of the pair share the reset
                if let Some(exit) = hazards
                    .iter_mut()
                    .filter_map(Entity::as_wormhole_mut)
                    .find(|w| w.body.id == exit_id)
                {
                    exit.arm_cooldown();
                }
                events.push(GameEvent::Teleported {
                    entity_id: target.body().id,
                    exit_id,
                });
            }
            None => {}
        }
    }
    killed_player
}

fn update_behaviour(state: &mut GameState, dt: f32) {
    let player_pos = state.player.as_ref().map(|p| p.body.pos);
    let mut ctx = UpdateContext {
        player_pos,
        rng: &mut state.rng,
    };

    for entity in state.entities.iter_mut().filter(|e| e.is_active()) {
        entity.update(dt, &mut ctx);
    }
    for projectile in state.projectiles.iter_mut().filter(|p| p.body.active) {
        projectile.update(dt);
    }
    for hazard in state.hazards.iter_mut() {
        hazard.update(dt, &mut ctx);
    }
}

/// Player–food, player–enemy and projectile–enemy rules
fn resolve_combat(state: &mut GameState) {
    let collisions = CollisionManager::new();
    let GameState {
        player,
        entities,
        projectiles,
        rng,
        events,
        score,
        kills,
        world_size,
        ..
    } = state;
    let Some(player) = player.as_mut() else {
        return;
    };

    for entity in entities.iter_mut().filter(|e| e.is_active()) {
        if !collisions.check_collision(&player.body, entity.body()) {
            continue;
        }
        match entity {
            Entity::Food(food) => {
                food.body.active = false;
                *score += u64::from(food.value);
                player.add_xp(food.value);
                events.push(GameEvent::FoodEaten {
                    food_id: food.body.id,
                    value: food.value,
                });
            }
            Entity::Enemy(enemy) => {
                // Every overlapping frame hurts; there is no contact cooldown
                let damage = MIN_CONTACT_DAMAGE.max(enemy.body.radius / 2.0);
                let died = player.take_damage(damage);
                events.push(GameEvent::PlayerHit {
                    enemy_id: enemy.body.id,
                    damage,
                });
                if died {
                    log::info!("player killed by enemy {}", enemy.body.id);
                    events.push(GameEvent::PlayerDied);
                }
            }
            _ => {}
        }
    }

    let player_id = player.body.id;
    for projectile in projectiles
        .iter_mut()
        .filter(|p| p.body.active && p.owner_id == player_id)
    {
        let hit = entities
            .iter_mut()
            .filter(|e| e.is_active())
            .filter_map(Entity::as_enemy_mut)
            .find(|enemy| collisions.check_collision(&projectile.body, &enemy.body));
        let Some(enemy) = hit else {
            continue;
        };

        enemy.take_damage(projectile.damage);
        projectile.body.active = false;

        if enemy.is_dead() {
            let points = enemy.kill_score();
            *score += points;
            player.add_xp(u32::try_from(points).unwrap_or(u32::MAX));
            *kills += 1;
            events.push(GameEvent::EnemyKilled {
                enemy_id: enemy.body.id,
                score: points,
            });
            enemy.respawn(*world_size, rng);
        }
    }
}

/// Drop spent projectiles, replace consumed food and enemies in place
fn cleanup(state: &mut GameState) {
    let world_size = state.world_size;
    state
        .projectiles
        .retain(|p| p.body.active && !p.is_expired() && p.body.in_world(world_size));

    for entity in state.entities.iter_mut().filter(|e| !e.is_active()) {
        if let Some(fresh) = replacement_for(entity, world_size, &mut state.ids, &mut state.rng) {
            *entity = fresh;
        }
    }
    state.entities.retain(Entity::is_active);
}

/// At most one level transition per frame; surplus XP is discarded
fn check_progression(state: &mut GameState) {
    let Some(player) = state.player.as_mut() else {
        return;
    };
    if !player.ready_to_level() {
        return;
    }

    player.level_up();
    let level = player.level;
    log::info!("player reached level {level}");
    state.events.push(GameEvent::LevelUp { level });

    let options = upgrades_for_level(level, Some(player.evolution_path));
    if options.is_empty() {
        return;
    }
    state.events.push(GameEvent::UpgradeOffered { level });
    state.pending_upgrade = Some(UpgradeOffer {
        level,
        path: player.evolution_path,
        options,
    });
}

/// Close a pending offer, applying `choice` if one was made. The world
/// resumes on the next tick either way.
pub fn choose_upgrade(state: &mut GameState, choice: Option<&UpgradeOption>) {
    if state.pending_upgrade.take().is_none() {
        return;
    }
    if let (Some(option), Some(player)) = (choice, state.player.as_mut()) {
        player.apply_upgrade(option);
        log::info!("player evolved into {}", player.particle_type);
    }
}
