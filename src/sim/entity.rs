//! Entity model
//!
//! Every entity shares a [`Body`] record. The closed set of kinds lives in
//! [`Entity`]; behaviour is dispatched on capabilities (`has_velocity`,
//! `is_hazard`) rather than on the concrete kind.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::hazard::{BlackHole, WormHole};
use super::player::Player;
use super::vector::VectorExt;
use crate::consts::*;

/// Stable identifier for an entity's lifetime
pub type EntityId = u32;

/// Packed 0xRRGGBB colour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const fn rgb(hex: u32) -> Self {
        Self(hex & 0x00ff_ffff)
    }

    /// `#rrggbb` form for renderers
    pub fn to_hex_string(self) -> String {
        format!("#{:06x}", self.0)
    }
}

/// Fields shared by every entity kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: EntityId,
    /// World-space position
    pub pos: Vec2,
    /// World units per second
    pub vel: Vec2,
    /// Always > 0
    pub radius: f32,
    pub color: Color,
    pub name: Option<String>,
    /// Cleared when the entity should leave the live set at frame end
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Body {
    pub fn new(id: EntityId, pos: Vec2, radius: f32, color: Color) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius: radius.max(f32::EPSILON),
            color,
            name: None,
            active: true,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Translate by velocity
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Circle overlap using squared distances (touching counts)
    #[inline]
    pub fn overlaps(&self, other: &Body) -> bool {
        let radius_sum = self.radius + other.radius;
        self.pos.distance_squared_to(other.pos) <= radius_sum * radius_sum
    }

    /// True while the centre lies inside the square `[0, world_size]²`
    #[inline]
    pub fn in_world(&self, world_size: f32) -> bool {
        (0.0..=world_size).contains(&self.pos.x) && (0.0..=world_size).contains(&self.pos.y)
    }
}

/// Collectible pellet; its value feeds score and XP alike
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    pub body: Body,
    pub value: u32,
}

/// Food palette, low value to high
const FOOD_COLORS: [Color; 4] = [
    Color::rgb(0xc39bd3),
    Color::rgb(0x7fb3d5),
    Color::rgb(0xf9e79f),
    Color::rgb(0xf5b041),
];

impl Food {
    pub fn new(id: EntityId, pos: Vec2, radius: f32, value: u32) -> Self {
        let tier = ((value / 4) as usize).min(FOOD_COLORS.len() - 1);
        Self {
            body: Body::new(id, pos, radius, FOOD_COLORS[tier]),
            value,
        }
    }

    /// Random pellet (radius 2..7) anywhere inside the world
    pub fn random(id: EntityId, world_size: f32, rng: &mut Pcg32) -> Self {
        let radius = rng.random_range(2.0..7.0_f32);
        let pos = random_position(world_size, radius, rng);
        Self::new(id, pos, radius, (radius * 2.0).floor() as u32)
    }
}

/// A shot fired by the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Body,
    /// Firer, for lookup only
    pub owner_id: EntityId,
    /// Unit vector
    pub direction: Vec2,
    pub speed: f32,
    pub damage: f32,
    /// Seconds left; expired at <= 0
    pub lifetime: f32,
    pub total_lifetime: f32,
}

impl Projectile {
    pub fn new(
        id: EntityId,
        owner_id: EntityId,
        pos: Vec2,
        direction: Vec2,
        speed: f32,
        damage: f32,
        color: Color,
    ) -> Self {
        let direction = direction.normalized();
        let mut body = Body::new(id, pos, PROJECTILE_RADIUS, color);
        body.vel = direction * speed;
        Self {
            body,
            owner_id,
            direction,
            speed,
            damage,
            lifetime: PROJECTILE_LIFETIME,
            total_lifetime: PROJECTILE_LIFETIME,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.body.integrate(dt);
        self.lifetime -= dt;
    }

    pub fn is_expired(&self) -> bool {
        self.lifetime <= 0.0
    }

    /// Remaining fraction of life (1 = fresh, 0 = expired)
    pub fn lifetime_progress(&self) -> f32 {
        if self.total_lifetime <= 0.0 {
            return 0.0;
        }
        (self.lifetime / self.total_lifetime).max(0.0)
    }
}

/// Context handed to per-entity updates
pub struct UpdateContext<'a> {
    /// Player position, if a player exists this frame
    pub player_pos: Option<Vec2>,
    pub rng: &'a mut Pcg32,
}

/// The closed set of entity kinds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Entity {
    Player(Player),
    Enemy(Enemy),
    Food(Food),
    Projectile(Projectile),
    BlackHole(BlackHole),
    WormHole(WormHole),
}

impl Entity {
    pub fn body(&self) -> &Body {
        match self {
            Entity::Player(p) => &p.body,
            Entity::Enemy(e) => &e.body,
            Entity::Food(f) => &f.body,
            Entity::Projectile(p) => &p.body,
            Entity::BlackHole(h) => &h.body,
            Entity::WormHole(w) => &w.body,
        }
    }

    pub fn body_mut(&mut self) -> &mut Body {
        match self {
            Entity::Player(p) => &mut p.body,
            Entity::Enemy(e) => &mut e.body,
            Entity::Food(f) => &mut f.body,
            Entity::Projectile(p) => &mut p.body,
            Entity::BlackHole(h) => &mut h.body,
            Entity::WormHole(w) => &mut w.body,
        }
    }

    pub fn id(&self) -> EntityId {
        self.body().id
    }

    /// Whether forces act on this entity through its velocity.
    /// Entities without one are nudged by position instead.
    pub fn has_velocity(&self) -> bool {
        !matches!(self, Entity::Food(_))
    }

    /// Stationary field emitters
    pub fn is_hazard(&self) -> bool {
        matches!(self, Entity::BlackHole(_) | Entity::WormHole(_))
    }

    pub fn is_active(&self) -> bool {
        self.body().active
    }

    /// Symmetric circle–circle overlap
    pub fn collides_with(&self, other: &Entity) -> bool {
        self.body().overlaps(other.body())
    }

    /// Generic collision hook. Game rules are resolved by the frame tick;
    /// the base reaction is to do nothing.
    pub fn on_collision(&mut self, _other: &Body) {}

    /// Advance this entity by `dt` seconds
    pub fn update(&mut self, dt: f32, ctx: &mut UpdateContext<'_>) {
        match self {
            Entity::Player(p) => p.update(dt),
            Entity::Enemy(e) => e.update(dt, ctx.player_pos, ctx.rng),
            Entity::Food(f) => f.body.integrate(dt),
            Entity::Projectile(p) => p.update(dt),
            Entity::BlackHole(h) => h.update(dt),
            Entity::WormHole(w) => w.update(dt),
        }
    }

    pub fn as_food(&self) -> Option<&Food> {
        match self {
            Entity::Food(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_enemy(&self) -> Option<&Enemy> {
        match self {
            Entity::Enemy(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_enemy_mut(&mut self) -> Option<&mut Enemy> {
        match self {
            Entity::Enemy(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_wormhole(&self) -> Option<&WormHole> {
        match self {
            Entity::WormHole(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_wormhole_mut(&mut self) -> Option<&mut WormHole> {
        match self {
            Entity::WormHole(w) => Some(w),
            _ => None,
        }
    }
}

/// Uniform position keeping `margin` from every edge
pub fn random_position(world_size: f32, margin: f32, rng: &mut Pcg32) -> Vec2 {
    let lo = margin.min(world_size / 2.0);
    let hi = (world_size - margin).max(lo + f32::EPSILON);
    Vec2::new(rng.random_range(lo..hi), rng.random_range(lo..hi))
}
