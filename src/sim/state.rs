//! World state and core simulation types
//!
//! One `GameState` is one run: the player, the food/enemy population, the
//! projectiles in flight, the hazards, the camera and the run counters.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::camera::Camera;
use super::entity::{Entity, EntityId, Projectile};
use super::player::Player;
use super::spawn::{create_hazards, create_initial_entities, Density, IdGen};
use super::upgrades::{EvolutionPath, UpgradeOption};
use crate::consts::DEFAULT_WORLD_SIZE;

/// Everything needed to build a fresh world
#[derive(Debug, Clone, PartialEq)]
pub struct WorldConfig {
    pub world_size: f32,
    pub viewport: (f32, f32),
    pub density: Density,
    pub black_holes: usize,
    pub wormhole_pairs: usize,
    pub player_name: String,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_size: DEFAULT_WORLD_SIZE,
            viewport: (1280.0, 720.0),
            density: Density::default(),
            black_holes: 2,
            wormhole_pairs: 1,
            player_name: "Player".to_string(),
        }
    }
}

/// Something that happened during a tick, drained by the session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    FoodEaten { food_id: EntityId, value: u32 },
    PlayerHit { enemy_id: EntityId, damage: f32 },
    EnemyKilled { enemy_id: EntityId, score: u64 },
    /// Fired once, on the frame health crosses zero
    PlayerDied,
    LevelUp { level: u32 },
    /// World is paused until an option is chosen or the offer is dismissed
    UpgradeOffered { level: u32 },
    Teleported { entity_id: EntityId, exit_id: EntityId },
    /// Swallowed by a black hole (not the player)
    Consumed { entity_id: EntityId },
}

/// Pending upgrade choice; while present the world does not advance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpgradeOffer {
    pub level: u32,
    pub path: EvolutionPath,
    pub options: Vec<UpgradeOption>,
}

/// Complete world state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed
    pub seed: u64,
    pub rng: Pcg32,
    pub world_size: f32,
    pub density: Density,
    pub player: Option<Player>,
    /// Food and enemies, population kept constant
    pub entities: Vec<Entity>,
    pub projectiles: Vec<Projectile>,
    /// Black holes and wormholes, fixed for the run
    pub hazards: Vec<Entity>,
    pub camera: Camera,
    pub score: u64,
    pub kills: u32,
    /// Simulated seconds
    pub elapsed: f32,
    /// Ticks that advanced the world
    pub frame: u64,
    pub pending_upgrade: Option<UpgradeOffer>,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) ids: IdGen,
}

impl GameState {
    /// Populated world with the player at the centre
    pub fn new(seed: u64, config: &WorldConfig) -> Self {
        let mut state = Self::empty(seed, config);
        let world_size = state.world_size;

        let player_id = state.next_entity_id();
        state.player = Some(Player::new(
            player_id,
            Vec2::splat(world_size / 2.0),
            config.player_name.clone(),
        ));
        state.entities =
            create_initial_entities(world_size, config.density, &mut state.ids, &mut state.rng);
        state.hazards = create_hazards(
            world_size,
            config.black_holes,
            config.wormhole_pairs,
            &mut state.ids,
            &mut state.rng,
        );
        state.camera.center_on(Vec2::splat(world_size / 2.0));
        state
    }

    /// World with no player, entities or hazards; useful for building scenes
    pub fn empty(seed: u64, config: &WorldConfig) -> Self {
        let (view_w, view_h) = config.viewport;
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            world_size: config.world_size,
            density: config.density,
            player: None,
            entities: Vec::new(),
            projectiles: Vec::new(),
            hazards: Vec::new(),
            camera: Camera::new(view_w, view_h, config.world_size),
            score: 0,
            kills: 0,
            elapsed: 0.0,
            frame: 0,
            pending_upgrade: None,
            events: Vec::new(),
            ids: IdGen::default(),
        }
    }

    /// Allocate a new entity id
    pub fn next_entity_id(&mut self) -> EntityId {
        self.ids.next_id()
    }

    pub fn food_count(&self) -> usize {
        self.entities.iter().filter(|e| e.as_food().is_some()).count()
    }

    pub fn enemy_count(&self) -> usize {
        self.entities.iter().filter(|e| e.as_enemy().is_some()).count()
    }

    /// Whether the world is waiting on an upgrade choice
    pub fn is_paused_for_upgrade(&self) -> bool {
        self.pending_upgrade.is_some()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Find a hazard by id
    pub fn hazard(&self, id: EntityId) -> Option<&Entity> {
        self.hazards.iter().find(|h| h.id() == id)
    }
}
