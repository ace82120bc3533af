//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - One seeded RNG per world
//! - Entities are marked inactive during a frame and compacted after it
//! - No rendering, audio or platform dependencies

pub mod camera;
pub mod collision;
pub mod enemy;
pub mod entity;
pub mod hazard;
pub mod player;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod upgrades;
pub mod vector;

pub use camera::{Camera, ViewRect};
pub use collision::{CollisionHandler, CollisionManager, CollisionPair, NotifyEntities};
pub use enemy::{Behavior, Enemy};
pub use entity::{random_position, Body, Color, Entity, EntityId, Food, Projectile, UpdateContext};
pub use hazard::{BlackHole, ExitPortal, ForceTarget, HazardContact, WormHole};
pub use player::Player;
pub use session::{
    FirstChoice, GamePhase, PlayerStats, Session, SessionEvent, UpgradeChoice, UpgradeSurface,
};
pub use spawn::{create_hazards, create_initial_entities, replacement_for, Density, IdGen};
pub use state::{GameEvent, GameState, UpgradeOffer, WorldConfig};
pub use tick::{choose_upgrade, tick, TickInput};
pub use upgrades::{find_upgrade, upgrades_for_level, EvolutionPath, StatKind, UpgradeOption};
pub use vector::{Vector, VectorExt};
