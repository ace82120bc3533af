//! Particle Arena - a top-down arena where a growing particle fights, eats and evolves
//!
//! Core modules:
//! - `sim`: Simulation (entities, hazards, collisions, progression, session)
//! - `game_loop`: Frame scheduler driving update/render
//! - `input`: Input collaborator seam and autopilot
//! - `render`: Read-only rendering collaborator seam
//! - `settings`: JSON configuration
//! - `leaderboard`: Cosmetic leaderboard model

pub mod game_loop;
pub mod input;
pub mod leaderboard;
pub mod render;
pub mod settings;
pub mod sim;

pub use game_loop::{FrameScheduler, GameLoop, ManualScheduler, SleepScheduler, StopHandle};
pub use leaderboard::Leaderboard;
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Largest step handed to `update`, in seconds (bounds stalls)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default square world side
    pub const DEFAULT_WORLD_SIZE: f32 = 4000.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 250.0;
    pub const PLAYER_HEALTH: f32 = 100.0;
    pub const PLAYER_XP_TO_LEVEL_2: u32 = 100;
    pub const PLAYER_SHOOT_COOLDOWN: f32 = 0.5;
    /// Reload upgrades never push the cooldown below this
    pub const MIN_SHOOT_COOLDOWN: f32 = 0.1;
    pub const PROJECTILE_SPEED: f32 = 600.0;
    pub const PROJECTILE_DAMAGE: f32 = 10.0;
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    /// Seconds before a projectile expires
    pub const PROJECTILE_LIFETIME: f32 = 2.0;

    /// Level-up growth
    pub const XP_GROWTH: f32 = 1.5;
    pub const LEVEL_UP_HEALTH: f32 = 10.0;
    pub const LEVEL_UP_RADIUS: f32 = 2.0;

    /// Contact damage floor for enemies touching the player
    pub const MIN_CONTACT_DAMAGE: f32 = 5.0;

    /// Black hole tuning
    pub const BLACK_HOLE_GRAVITY: f32 = 2000.0;
    pub const BLACK_HOLE_EFFECT_SCALE: f32 = 10.0;
    /// Player damage per second inside the kill zone
    pub const BLACK_HOLE_DPS: f32 = 20.0;
    /// Kill zone as a multiple of the hole's radius
    pub const BLACK_HOLE_KILL_SCALE: f32 = 1.5;

    /// Wormhole tuning
    pub const WORMHOLE_SUCTION: f32 = 1000.0;
    pub const WORMHOLE_EFFECT_SCALE: f32 = 5.0;
    pub const WORMHOLE_TRIGGER_SCALE: f32 = 1.2;
    pub const WORMHOLE_EXIT_SCALE: f32 = 2.5;
    pub const WORMHOLE_COOLDOWN: f32 = 3.0;

    /// Entities without velocity get this fraction of a hazard force as a position nudge
    pub const POSITION_NUDGE_SCALE: f32 = 0.1;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    angle.rem_euclid(std::f32::consts::TAU)
}

/// Unit vector pointing along `theta`
#[inline]
pub fn unit_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Clamp a position so a circle of `radius` stays inside the square world
#[inline]
pub fn clamp_to_world(pos: Vec2, radius: f32, world_size: f32) -> Vec2 {
    let lo = radius.min(world_size / 2.0);
    let hi = (world_size - radius).max(lo);
    Vec2::new(pos.x.clamp(lo, hi), pos.y.clamp(lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_angle_stays_in_range() {
        use std::f32::consts::TAU;
        assert!((wrap_angle(TAU + 0.5) - 0.5).abs() < 1e-5);
        assert!((wrap_angle(-0.5) - (TAU - 0.5)).abs() < 1e-5);
    }

    #[test]
    fn clamp_to_world_keeps_circle_inside() {
        let p = clamp_to_world(Vec2::new(-10.0, 5000.0), 20.0, 4000.0);
        assert_eq!(p, Vec2::new(20.0, 3980.0));
    }
}
