//! Enemy particles and their behaviours

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{random_position, Body, Color, EntityId};
use super::vector::VectorExt;
use crate::unit_from_angle;

/// How an enemy reacts to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Behavior {
    /// Always wanders
    Passive,
    /// Chases inside aggro range, wanders otherwise
    Neutral,
    /// Always chases
    Aggressive,
}

impl Behavior {
    const BY_TIER: [Behavior; 3] = [Behavior::Passive, Behavior::Neutral, Behavior::Aggressive];

    /// `[passive, neutral, aggressive][min(level / 2, 2)]`
    pub fn for_level(level: u32) -> Self {
        Self::BY_TIER[((level / 2) as usize).min(Self::BY_TIER.len() - 1)]
    }
}

/// Enemy palette by level (1..=5)
const LEVEL_COLORS: [Color; 5] = [
    Color::rgb(0x9b59b6),
    Color::rgb(0x3498db),
    Color::rgb(0xf1c40f),
    Color::rgb(0xe74c3c),
    Color::rgb(0x1abc9c),
];

/// Wandering speed as a fraction of full speed
const WANDER_SPEED_SCALE: f32 = 0.5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    pub speed: f32,
    pub health: f32,
    pub max_health: f32,
    pub level: u32,
    pub behavior: Behavior,
    /// Distance inside which a neutral enemy gives chase (10 × radius)
    pub aggro_range: f32,
    /// Seconds since the wander direction last changed
    pub direction_timer: f32,
    /// Seconds between wander re-rolls (1..3)
    pub direction_change_interval: f32,
}

impl Enemy {
    /// Enemy of `level`, stats scaled by level, placed away from the edges
    pub fn random(id: EntityId, world_size: f32, level: u32, rng: &mut Pcg32) -> Self {
        let level = level.max(1);
        let radius = 15.0 + level as f32 * 3.0;
        let speed = 100.0 + level as f32 * 10.0;
        let health = 30.0 + level as f32 * 20.0;
        let color = LEVEL_COLORS[(level as usize - 1).min(LEVEL_COLORS.len() - 1)];
        let pos = random_position(world_size, radius * 2.0, rng);

        let mut enemy = Self {
            body: Body::new(id, pos, radius, color),
            speed,
            health,
            max_health: health,
            level,
            behavior: Behavior::for_level(level),
            aggro_range: radius * 10.0,
            direction_timer: 0.0,
            direction_change_interval: rng.random_range(1.0..3.0),
        };
        if enemy.behavior != Behavior::Aggressive {
            enemy.body.vel = enemy.random_wander_velocity(rng);
        }
        enemy
    }

    fn random_wander_velocity(&self, rng: &mut Pcg32) -> Vec2 {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        unit_from_angle(angle) * self.speed * WANDER_SPEED_SCALE
    }

    /// Choose a velocity from the behaviour, then move
    pub fn update(&mut self, dt: f32, player_pos: Option<Vec2>, rng: &mut Pcg32) {
        self.direction_timer += dt;

        match (self.behavior, player_pos) {
            (Behavior::Aggressive, Some(target)) => self.chase(target),
            (Behavior::Neutral, Some(target))
                if self.body.pos.distance_to(target) <= self.aggro_range =>
            {
                self.chase(target)
            }
            _ => self.wander(rng),
        }

        self.body.integrate(dt);
    }

    fn chase(&mut self, target: Vec2) {
        self.body.vel = (target - self.body.pos).normalized() * self.speed;
    }

    fn wander(&mut self, rng: &mut Pcg32) {
        if self.direction_timer >= self.direction_change_interval {
            self.body.vel = self.random_wander_velocity(rng);
            self.direction_timer = 0.0;
            self.direction_change_interval = rng.random_range(1.0..3.0);
        }
    }

    /// Apply damage, clamping at zero
    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Points for destroying this enemy: `round(radius * 2 + level * 10)`
    pub fn kill_score(&self) -> u64 {
        (self.body.radius * 2.0 + self.level as f32 * 10.0).round() as u64
    }

    /// Reset in place at a fresh random position; id, level and colour persist
    pub fn respawn(&mut self, world_size: f32, rng: &mut Pcg32) {
        self.body.pos = random_position(world_size, self.body.radius * 2.0, rng);
        self.body.active = true;
        self.health = self.max_health;
        self.behavior = Behavior::for_level(self.level);
        self.direction_timer = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn behavior_tiers() {
        assert_eq!(Behavior::for_level(1), Behavior::Passive);
        assert_eq!(Behavior::for_level(2), Behavior::Neutral);
        assert_eq!(Behavior::for_level(3), Behavior::Neutral);
        assert_eq!(Behavior::for_level(4), Behavior::Aggressive);
        assert_eq!(Behavior::for_level(9), Behavior::Aggressive);
    }

    #[test]
    fn stats_scale_with_level() {
        let e = Enemy::random(1, 4000.0, 3, &mut rng());
        assert_eq!(e.body.radius, 24.0);
        assert_eq!(e.speed, 130.0);
        assert_eq!(e.max_health, 90.0);
        assert_eq!(e.aggro_range, 240.0);
        assert!((1.0..3.0).contains(&e.direction_change_interval));
    }

    #[test]
    fn aggressive_chases_player() {
        let mut r = rng();
        let mut e = Enemy::random(1, 4000.0, 5, &mut r);
        e.body.pos = Vec2::new(100.0, 100.0);
        e.update(0.1, Some(Vec2::new(1000.0, 100.0)), &mut r);
        assert!((e.body.vel - Vec2::new(e.speed, 0.0)).length() < 1e-3);
    }

    #[test]
    fn neutral_only_chases_inside_aggro_range() {
        let mut r = rng();
        let mut e = Enemy::random(1, 4000.0, 2, &mut r);
        e.body.pos = Vec2::new(100.0, 100.0);
        let wander = e.body.vel;

        let far = Vec2::new(100.0 + e.aggro_range + 10.0, 100.0);
        e.update(0.01, Some(far), &mut r);
        assert_eq!(e.body.vel, wander);

        let near = e.body.pos + Vec2::new(e.aggro_range - 10.0, 0.0);
        e.update(0.01, Some(near), &mut r);
        assert!((e.body.vel.length() - e.speed).abs() < 1e-3);
    }

    #[test]
    fn wander_rerolls_after_interval() {
        let mut r = rng();
        let mut e = Enemy::random(1, 4000.0, 1, &mut r);
        let interval = e.direction_change_interval;
        e.update(interval + 0.01, None, &mut r);
        assert_eq!(e.direction_timer, 0.0);
        assert!((e.body.vel.length() - e.speed * 0.5).abs() < 1e-3);
    }

    #[test]
    fn respawn_resets_health_and_behavior() {
        let mut r = rng();
        let mut e = Enemy::random(9, 4000.0, 4, &mut r);
        e.take_damage(1000.0);
        assert!(e.is_dead());
        assert_eq!(e.health, 0.0);
        e.behavior = Behavior::Passive;
        e.respawn(4000.0, &mut r);
        assert_eq!(e.body.id, 9);
        assert_eq!(e.health, e.max_health);
        assert_eq!(e.behavior, Behavior::Aggressive);
    }

    #[test]
    fn kill_score_formula() {
        let e = Enemy::random(1, 4000.0, 2, &mut rng());
        // radius 21, level 2 -> 42 + 20
        assert_eq!(e.kill_score(), 62);
    }
}
