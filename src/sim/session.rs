//! Session: the top-level owner of a run
//!
//! Holds the world, the game phase and the leaderboard. The phase only moves
//! through [`SessionEvent`]s:
//!
//! ```text
//! Ready --Start--> Playing --End--> Ended
//!   any --Restart--> Playing (fresh world)
//! ```

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState, UpgradeOffer, WorldConfig};
use super::tick::{choose_upgrade, tick, TickInput};
use super::upgrades::{EvolutionPath, UpgradeOption};
use crate::leaderboard::Leaderboard;
use crate::render::{Frame, Renderer};

/// Keeps leaderboard rolls off the world RNG stream
const LEADERBOARD_SEED_SALT: u64 = 0x5eed_1ead;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Ready,
    Playing,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Start,
    End,
    Restart,
}

/// What the upgrade surface decided
#[derive(Debug, Clone, PartialEq)]
pub enum UpgradeChoice {
    Pick(UpgradeOption),
    /// Dismissed without choosing
    Close,
}

/// Upgrade-selection collaborator. Shown an offer once, then polled every
/// update until it answers.
pub trait UpgradeSurface {
    fn present(&mut self, offer: &UpgradeOffer);
    fn poll(&mut self) -> Option<UpgradeChoice>;
}

/// Always takes the first option offered
#[derive(Debug, Default)]
pub struct FirstChoice {
    offered: Option<UpgradeOption>,
}

impl UpgradeSurface for FirstChoice {
    fn present(&mut self, offer: &UpgradeOffer) {
        self.offered = offer.options.first().cloned();
    }

    fn poll(&mut self) -> Option<UpgradeChoice> {
        Some(match self.offered.take() {
            Some(option) => UpgradeChoice::Pick(option),
            None => UpgradeChoice::Close,
        })
    }
}

/// Snapshot for HUDs and end-of-run summaries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStats {
    pub name: String,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next_level: u32,
    pub score: u64,
    pub kills: u32,
    pub health: f32,
    pub max_health: f32,
    pub particle_type: String,
    pub evolution_path: EvolutionPath,
}

pub struct Session {
    config: WorldConfig,
    seed: u64,
    restarts: u64,
    opponents: usize,
    state: GameState,
    phase: GamePhase,
    leaderboard: Leaderboard,
    surface: Option<Box<dyn UpgradeSurface>>,
    /// The pending offer has been shown to the surface
    presented: bool,
}

impl Session {
    pub fn new(config: WorldConfig, seed: u64, opponents: usize) -> Self {
        let state = GameState::new(seed, &config);
        let leaderboard = Self::fresh_leaderboard(seed, opponents);
        Self {
            config,
            seed,
            restarts: 0,
            opponents,
            state,
            phase: GamePhase::Ready,
            leaderboard,
            surface: None,
            presented: false,
        }
    }

    pub fn with_upgrade_surface(mut self, surface: Box<dyn UpgradeSurface>) -> Self {
        self.surface = Some(surface);
        self
    }

    fn fresh_leaderboard(seed: u64, opponents: usize) -> Leaderboard {
        let mut rng = Pcg32::seed_from_u64(seed ^ LEADERBOARD_SEED_SALT);
        Leaderboard::with_opponents(opponents, &mut rng)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable world access, for embedding and scenario setup
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    /// Apply a phase transition. Returns false when the event does not apply
    /// to the current phase.
    pub fn handle(&mut self, event: SessionEvent) -> bool {
        let next = match (self.phase, event) {
            (GamePhase::Ready, SessionEvent::Start) => GamePhase::Playing,
            (GamePhase::Playing, SessionEvent::End) => GamePhase::Ended,
            (_, SessionEvent::Restart) => {
                self.restart();
                GamePhase::Playing
            }
            (phase, event) => {
                log::debug!("ignoring {event:?} while {phase:?}");
                return false;
            }
        };
        log::info!("session {:?} -> {:?}", self.phase, next);
        self.phase = next;
        if next == GamePhase::Ended {
            self.sync_leaderboard();
        }
        true
    }

    fn restart(&mut self) {
        self.restarts += 1;
        let seed = self.seed.wrapping_add(self.restarts);
        self.state = GameState::new(seed, &self.config);
        self.leaderboard = Self::fresh_leaderboard(seed, self.opponents);
        self.presented = false;
        log::info!("new world with seed {seed}");
    }

    /// Advance one frame. The world only moves while playing and no upgrade
    /// offer is open. Returns the events produced this frame.
    pub fn update(&mut self, dt: f32, input: &TickInput) -> Vec<GameEvent> {
        if self.phase != GamePhase::Playing {
            return Vec::new();
        }
        if self.state.pending_upgrade.is_some() {
            self.poll_upgrade_surface();
            return Vec::new();
        }

        tick(&mut self.state, input, dt);
        let events = self.state.drain_events();

        if let Some(offer) = self.state.pending_upgrade.as_ref()
            && let Some(surface) = self.surface.as_mut()
        {
            surface.present(offer);
            self.presented = true;
        }
        self.sync_leaderboard();

        if events.contains(&GameEvent::PlayerDied) {
            self.handle(SessionEvent::End);
        }
        events
    }

    fn poll_upgrade_surface(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            log::warn!("upgrade offered with no surface attached; closing it");
            choose_upgrade(&mut self.state, None);
            return;
        };
        if !self.presented {
            if let Some(offer) = self.state.pending_upgrade.as_ref() {
                surface.present(offer);
            }
            self.presented = true;
        }
        match surface.poll() {
            Some(UpgradeChoice::Pick(option)) => {
                choose_upgrade(&mut self.state, Some(&option));
                self.presented = false;
            }
            Some(UpgradeChoice::Close) => {
                choose_upgrade(&mut self.state, None);
                self.presented = false;
            }
            None => {}
        }
    }

    fn sync_leaderboard(&mut self) {
        if let Some(player) = self.state.player.as_ref() {
            let name = player.body.name.as_deref().unwrap_or("Player");
            self.leaderboard.update_player(name, self.state.score, player.level);
        }
    }

    /// Hand a read-only snapshot to `renderer`. Failures are logged and never
    /// reach the simulation.
    pub fn render(&self, renderer: &mut dyn Renderer) {
        let frame = Frame {
            phase: self.phase,
            camera: &self.state.camera,
            player: self.state.player.as_ref(),
            entities: &self.state.entities,
            projectiles: &self.state.projectiles,
            hazards: &self.state.hazards,
            score: self.state.score,
            upgrade: self.state.pending_upgrade.as_ref(),
        };
        if let Err(e) = renderer.render(&frame) {
            log::warn!("render failed: {e}");
        }
    }

    pub fn stats(&self) -> Option<PlayerStats> {
        let player = self.state.player.as_ref()?;
        Some(PlayerStats {
            name: player.body.name.clone().unwrap_or_default(),
            level: player.level,
            xp: player.xp,
            xp_to_next_level: player.xp_to_next_level,
            score: self.state.score,
            kills: self.state.kills,
            health: player.health,
            max_health: player.max_health,
            particle_type: player.particle_type.clone(),
            evolution_path: player.evolution_path,
        })
    }
}
