//! The player particle and its progression

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, EntityId, Projectile};
use super::upgrades::{EvolutionPath, StatKind, UpgradeOption, STARTING_COLOR};
use super::vector::VectorExt;
use crate::consts::*;

/// The player-controlled particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub speed: f32,
    pub health: f32,
    pub max_health: f32,
    /// Starts at 1
    pub level: u32,
    pub xp: u32,
    pub xp_to_next_level: u32,
    /// Unit aim direction
    pub facing: Vec2,
    /// Seconds between shots
    pub shoot_cooldown: f32,
    /// Seconds until the next shot is allowed
    pub shoot_timer: f32,
    pub projectile_speed: f32,
    pub projectile_damage: f32,
    pub evolution_path: EvolutionPath,
    /// Display label of the current form
    pub particle_type: String,
}

impl Player {
    pub fn new(id: EntityId, pos: Vec2, name: impl Into<String>) -> Self {
        Self {
            body: Body::new(id, pos, PLAYER_RADIUS, STARTING_COLOR).with_name(name),
            speed: PLAYER_SPEED,
            health: PLAYER_HEALTH,
            max_health: PLAYER_HEALTH,
            level: 1,
            xp: 0,
            xp_to_next_level: PLAYER_XP_TO_LEVEL_2,
            facing: Vec2::X,
            shoot_cooldown: PLAYER_SHOOT_COOLDOWN,
            shoot_timer: 0.0,
            projectile_speed: PROJECTILE_SPEED,
            projectile_damage: PROJECTILE_DAMAGE,
            evolution_path: EvolutionPath::default(),
            particle_type: "Electron".to_string(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Move along `direction` (expected unit or zero) at the player's speed
    pub fn move_by(&mut self, direction: Vec2, dt: f32) {
        self.body.pos += direction * self.speed * dt;
    }

    /// Face toward a world-space target; facing is unchanged when the target
    /// coincides with the player
    pub fn aim(&mut self, target: Vec2) {
        let dir = (target - self.body.pos).normalized();
        if dir != Vec2::ZERO {
            self.facing = dir;
        }
    }

    pub fn can_shoot(&self) -> bool {
        self.shoot_timer <= 0.0
    }

    /// Fire along `direction` if the cooldown has elapsed
    pub fn shoot(&mut self, id: EntityId, direction: Vec2) -> Option<Projectile> {
        if !self.can_shoot() {
            return None;
        }
        self.shoot_timer = self.shoot_cooldown;

        let direction = direction.normalized();
        let spawn = self.body.pos + direction * (self.body.radius + 5.0);
        Some(Projectile::new(
            id,
            self.body.id,
            spawn,
            direction,
            self.projectile_speed,
            self.projectile_damage,
            self.body.color,
        ))
    }

    /// Translate by velocity and count down the shot timer
    pub fn update(&mut self, dt: f32) {
        self.body.integrate(dt);
        if self.shoot_timer > 0.0 {
            self.shoot_timer -= dt;
        }
    }

    /// Apply damage, clamping at zero.
    /// Returns true only when this hit took the player from alive to dead.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        let was_alive = self.is_alive();
        self.health = (self.health - amount).max(0.0);
        was_alive && !self.is_alive()
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn add_xp(&mut self, amount: u32) {
        self.xp = self.xp.saturating_add(amount);
    }

    pub fn ready_to_level(&self) -> bool {
        self.xp >= self.xp_to_next_level
    }

    /// One level transition: full heal, bigger, harder next threshold.
    /// Surplus XP is discarded.
    pub fn level_up(&mut self) {
        self.level += 1;
        self.xp = 0;
        self.xp_to_next_level = ((self.xp_to_next_level as f32 * XP_GROWTH).floor() as u32).max(1);
        self.max_health += LEVEL_UP_HEALTH;
        self.health = self.max_health;
        self.body.radius += LEVEL_UP_RADIUS;
    }

    /// Apply a chosen evolution.
    ///
    /// The choice made at level 2 locks the evolution path for later catalog
    /// lookups.
    pub fn apply_upgrade(&mut self, upgrade: &UpgradeOption) {
        if self.level == 2 {
            self.evolution_path = upgrade.path;
        }
        self.particle_type = upgrade.name.to_string();
        self.body.color = upgrade.color;

        for s in upgrade.stats {
            match s.stat {
                StatKind::Health => {
                    self.max_health += s.value;
                    self.health += s.value;
                }
                StatKind::Speed => self.speed += s.value,
                StatKind::Size => self.body.radius = (self.body.radius + s.value).max(1.0),
                StatKind::Damage => self.projectile_damage += s.value,
                StatKind::Reload => {
                    self.shoot_cooldown =
                        (self.shoot_cooldown - s.value / 100.0).max(MIN_SHOOT_COOLDOWN);
                }
                StatKind::Unknown => {}
            }
        }
    }
}
