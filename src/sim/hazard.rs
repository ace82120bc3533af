//! Gravitational hazards: black holes and paired wormholes
//!
//! Hazards are passive: the frame tick calls `apply_*_to` for each hazard and
//! each affected entity. A hazard never removes an entity; it only marks it
//! inactive, damages it, or moves it.
//!
//! Force law shared by both kinds, with `d` the entity's distance from the
//! hazard centre:
//!
//! ```text
//! |F| = strength * dt / max(d², 1)           (toward the centre)
//! + tangent * |F| * (1 - d / effect_radius) * swirl
//! ```
//!
//! Outside `effect_radius` the force is exactly zero.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Color, Entity, EntityId, Projectile};
use super::player::Player;
use super::vector::VectorExt;
use crate::consts::*;
use crate::{unit_from_angle, wrap_angle};

/// Anything a hazard can push around
pub trait ForceTarget {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;
    /// Forces land on velocity when true, as a damped position nudge otherwise
    fn has_velocity(&self) -> bool;
    /// Reaction to a black hole's crush zone. Returns true if this killed the player.
    fn crush(&mut self, damage: f32) -> bool;
}

impl ForceTarget for Player {
    fn body(&self) -> &Body {
        &self.body
    }
    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
    fn has_velocity(&self) -> bool {
        true
    }
    fn crush(&mut self, damage: f32) -> bool {
        self.take_damage(damage)
    }
}

impl ForceTarget for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }
    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
    fn has_velocity(&self) -> bool {
        true
    }
    fn crush(&mut self, _damage: f32) -> bool {
        self.body.active = false;
        false
    }
}

impl ForceTarget for Entity {
    fn body(&self) -> &Body {
        Entity::body(self)
    }
    fn body_mut(&mut self) -> &mut Body {
        Entity::body_mut(self)
    }
    fn has_velocity(&self) -> bool {
        Entity::has_velocity(self)
    }
    fn crush(&mut self, damage: f32) -> bool {
        match self {
            Entity::Player(p) => p.take_damage(damage),
            other => {
                other.body_mut().active = false;
                false
            }
        }
    }
}

/// Something notable a hazard did to an entity this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HazardContact {
    /// Entity was inside a black hole's crush zone
    Crushed { killed_player: bool },
    /// Entity went through a wormhole; the exit's cooldown must be reset too
    Teleported { exit_id: EntityId, to: Vec2 },
}

/// Pull-plus-swirl force, or `None` outside the field
fn field_force(
    center: Vec2,
    effect_radius: f32,
    strength: f32,
    swirl: f32,
    target: Vec2,
    dt: f32,
) -> Option<(Vec2, f32)> {
    let to_center = center - target;
    let distance = to_center.length();
    if distance > effect_radius {
        return None;
    }

    let magnitude = strength * dt / (distance * distance).max(1.0);
    let rotation_factor = 1.0 - distance / effect_radius;
    let tangent = to_center.perp().normalized();

    let pull = to_center.normalized() * magnitude;
    let spin = tangent * (magnitude * rotation_factor * swirl);
    Some((pull + spin, distance))
}

fn push<T: ForceTarget + ?Sized>(target: &mut T, force: Vec2) {
    if target.has_velocity() {
        target.body_mut().vel += force;
    } else {
        target.body_mut().pos += force * POSITION_NUDGE_SCALE;
    }
}

/// Cosmetic spin plus a radius pulse that also drives the hazard's footprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spin {
    pub rotation_angle: f32,
    pub rotation_speed: f32,
    pub rotation_time: f32,
    pub pulse_speed: f32,
    /// Relative pulse amplitude
    pub pulse_amount: f32,
    /// Radius the pulse oscillates around
    pub base_radius: f32,
}

impl Spin {
    /// Advance and return the pulsed radius
    fn advance(&mut self, dt: f32) -> f32 {
        self.rotation_angle = wrap_angle(self.rotation_angle + self.rotation_speed * dt);
        self.rotation_time += dt;
        let pulse = (self.rotation_time * self.pulse_speed).sin() * self.pulse_amount + 1.0;
        self.base_radius * pulse
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlackHole {
    pub body: Body,
    pub mass: f32,
    pub gravity_strength: f32,
    /// Field of influence (10 × base radius)
    pub effect_radius: f32,
    pub spin: Spin,
}

impl BlackHole {
    pub fn new(id: EntityId, pos: Vec2, radius: f32, mass: f32, rng: &mut Pcg32) -> Self {
        Self {
            body: Body::new(id, pos, radius, Color::rgb(0x000000)),
            mass,
            gravity_strength: BLACK_HOLE_GRAVITY,
            effect_radius: radius * BLACK_HOLE_EFFECT_SCALE,
            spin: Spin {
                rotation_angle: 0.0,
                rotation_speed: rng.random_range(0.005..0.015),
                rotation_time: 0.0,
                pulse_speed: rng.random_range(0.5..1.0),
                pulse_amount: 0.1,
                base_radius: radius,
            },
        }
    }

    /// Away from the centre spawn: 0.2..0.45 of the world from the middle
    pub fn random(id: EntityId, world_size: f32, rng: &mut Pcg32) -> Self {
        let distance = rng.random_range(world_size * 0.2..world_size * 0.45);
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let pos = Vec2::splat(world_size / 2.0) + unit_from_angle(angle) * distance;
        let radius = rng.random_range(50.0..100.0);
        let mass = rng.random_range(400.0..700.0);
        Self::new(id, pos, radius, mass, rng)
    }

    /// Force scale actually used by the field
    pub fn strength(&self) -> f32 {
        self.gravity_strength * self.mass
    }

    /// Pull `target` in; anything within 1.5 × radius is crushed
    pub fn apply_gravity_to<T: ForceTarget + ?Sized>(
        &self,
        target: &mut T,
        dt: f32,
    ) -> Option<HazardContact> {
        let (force, distance) = field_force(
            self.body.pos,
            self.effect_radius,
            self.strength(),
            0.5,
            target.body().pos,
            dt,
        )?;
        push(target, force);

        if distance < self.body.radius * BLACK_HOLE_KILL_SCALE {
            let killed_player = target.crush(BLACK_HOLE_DPS * dt);
            return Some(HazardContact::Crushed { killed_player });
        }
        None
    }

    pub fn update(&mut self, dt: f32) {
        self.body.integrate(dt);
        self.body.radius = self.spin.advance(dt);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WormHole {
    pub body: Body,
    pub suction_strength: f32,
    /// Field of influence (5 × base radius)
    pub effect_radius: f32,
    /// Seconds until this end can teleport again
    pub cooldown: f32,
    pub cooldown_max: f32,
    /// Paired exit, looked up by id
    pub exit_id: Option<EntityId>,
    pub spin: Spin,
}

/// Exit-side data needed to complete a teleport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExitPortal {
    pub id: EntityId,
    pub pos: Vec2,
    pub radius: f32,
}

impl WormHole {
    pub fn new(id: EntityId, pos: Vec2, radius: f32, rng: &mut Pcg32) -> Self {
        Self {
            body: Body::new(id, pos, radius, Color::rgb(0x9370db)),
            suction_strength: WORMHOLE_SUCTION,
            effect_radius: radius * WORMHOLE_EFFECT_SCALE,
            cooldown: 0.0,
            cooldown_max: WORMHOLE_COOLDOWN,
            exit_id: None,
            spin: Spin {
                rotation_angle: 0.0,
                rotation_speed: rng.random_range(0.02..0.07),
                rotation_time: 0.0,
                pulse_speed: rng.random_range(1.0..2.0),
                pulse_amount: 0.2,
                base_radius: radius,
            },
        }
    }

    /// Two linked wormholes on roughly opposite sides of the world centre
    pub fn random_pair(
        first_id: EntityId,
        second_id: EntityId,
        world_size: f32,
        rng: &mut Pcg32,
    ) -> (WormHole, WormHole) {
        use std::f32::consts::{FRAC_PI_4, PI, TAU};

        let center = Vec2::splat(world_size / 2.0);
        let distance_a = rng.random_range(world_size * 0.2..world_size * 0.4);
        let angle_a = rng.random_range(0.0..TAU);
        let distance_b = rng.random_range(world_size * 0.25..world_size * 0.45);
        let angle_b = angle_a + PI + rng.random_range(-FRAC_PI_4..FRAC_PI_4);
        let radius = rng.random_range(30.0..50.0);

        let mut a = WormHole::new(first_id, center + unit_from_angle(angle_a) * distance_a, radius, rng);
        let mut b = WormHole::new(second_id, center + unit_from_angle(angle_b) * distance_b, radius, rng);
        a.link_to(&mut b);
        (a, b)
    }

    /// Pair two wormholes with each other
    pub fn link_to(&mut self, other: &mut WormHole) {
        self.exit_id = Some(other.body.id);
        other.exit_id = Some(self.body.id);
    }

    pub fn exit_portal(&self) -> ExitPortal {
        ExitPortal {
            id: self.body.id,
            pos: self.body.pos,
            radius: self.body.radius,
        }
    }

    pub fn ready(&self) -> bool {
        self.cooldown <= 0.0
    }

    /// Start this end's cooldown
    pub fn arm_cooldown(&mut self) {
        self.cooldown = self.cooldown_max;
    }

    /// Pull `target` in and, once it is inside 1.2 × radius with the
    /// cooldown elapsed, send it out next to `exit`.
    ///
    /// Only this end's cooldown is set here; the caller resets the exit's.
    pub fn apply_suction_to<T: ForceTarget + ?Sized>(
        &mut self,
        target: &mut T,
        exit: Option<ExitPortal>,
        dt: f32,
        rng: &mut Pcg32,
    ) -> Option<HazardContact> {
        let (force, distance) = field_force(
            self.body.pos,
            self.effect_radius,
            self.suction_strength,
            1.0,
            target.body().pos,
            dt,
        )?;
        push(target, force);

        let exit = exit?;
        if distance < self.body.radius * WORMHOLE_TRIGGER_SCALE && self.ready() {
            let to = Self::teleport(target, exit, rng);
            self.arm_cooldown();
            return Some(HazardContact::Teleported {
                exit_id: exit.id,
                to,
            });
        }
        None
    }

    /// Drop the target 2.5 exit-radii from the exit in a random direction and
    /// scatter its heading by up to ±45°
    fn teleport<T: ForceTarget + ?Sized>(target: &mut T, exit: ExitPortal, rng: &mut Pcg32) -> Vec2 {
        use std::f32::consts::{FRAC_PI_4, TAU};

        let direction = unit_from_angle(rng.random_range(0.0..TAU));
        let to = exit.pos + direction * (exit.radius * WORMHOLE_EXIT_SCALE);
        let scatter = rng.random_range(-FRAC_PI_4..FRAC_PI_4);

        let has_velocity = target.has_velocity();
        let body = target.body_mut();
        body.pos = to;
        if has_velocity {
            let speed = body.vel.length();
            body.vel = body.vel.normalized().rotated(scatter) * speed;
        }
        to
    }

    pub fn update(&mut self, dt: f32) {
        self.body.integrate(dt);
        if self.cooldown > 0.0 {
            self.cooldown -= dt;
        }
        self.body.radius = self.spin.advance(dt);
    }
}
