//! Input seam
//!
//! Raw key and mouse capture is done elsewhere; the session only asks an
//! [`InputSource`] for one [`TickInput`] snapshot per update.

use std::cmp::Ordering;

use glam::Vec2;

use crate::sim::{Entity, GameState, TickInput, VectorExt};

pub trait InputSource {
    /// Snapshot for the next update. Mouse position is in screen space.
    fn next_input(&mut self, state: &GameState) -> TickInput;
}

/// Replays a fixed list of inputs, then idles
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    inputs: Vec<TickInput>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(inputs: Vec<TickInput>) -> Self {
        Self { inputs, cursor: 0 }
    }
}

impl InputSource for ScriptedInput {
    fn next_input(&mut self, _state: &GameState) -> TickInput {
        let input = self.inputs.get(self.cursor).copied().unwrap_or_default();
        self.cursor += 1;
        input
    }
}

/// Demo-mode player: heads for the nearest food and shoots the nearest enemy
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Enemies further than this are ignored
    pub engage_range: f32,
    /// Per-axis dead zone so the player does not jitter over its target
    pub dead_zone: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            engage_range: 600.0,
            dead_zone: 4.0,
        }
    }
}

fn nearest<'a>(from: Vec2, candidates: impl Iterator<Item = &'a Entity>) -> Option<&'a Entity> {
    candidates.min_by(|a, b| {
        from.distance_squared_to(a.body().pos)
            .partial_cmp(&from.distance_squared_to(b.body().pos))
            .unwrap_or(Ordering::Equal)
    })
}

impl InputSource for Autopilot {
    fn next_input(&mut self, state: &GameState) -> TickInput {
        let Some(player) = state.player.as_ref() else {
            return TickInput::default();
        };
        let pos = player.body.pos;
        let mut input = TickInput::default();

        let food = nearest(pos, state.entities.iter().filter(|e| e.is_active() && e.as_food().is_some()));
        if let Some(food) = food {
            let delta = food.body().pos - pos;
            input.left = delta.x < -self.dead_zone;
            input.right = delta.x > self.dead_zone;
            input.up = delta.y < -self.dead_zone;
            input.down = delta.y > self.dead_zone;
        }

        let enemy = nearest(pos, state.entities.iter().filter(|e| e.is_active() && e.as_enemy().is_some()))
            .filter(|e| pos.distance_to(e.body().pos) <= self.engage_range);
        if let Some(enemy) = enemy {
            input.mouse_position = Some(state.camera.world_to_screen_position(enemy.body().pos));
            input.shooting = true;
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Enemy, Food, Player, WorldConfig};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn state() -> GameState {
        let mut state = GameState::empty(1, &WorldConfig::default());
        state.player = Some(Player::new(1, Vec2::splat(2000.0), "bot"));
        state
    }

    #[test]
    fn no_player_means_idle() {
        let empty = GameState::empty(1, &WorldConfig::default());
        assert_eq!(Autopilot::default().next_input(&empty), TickInput::default());
    }

    #[test]
    fn steers_toward_nearest_food() {
        let mut state = state();
        state.entities.push(Entity::Food(Food::new(2, Vec2::new(2300.0, 2000.0), 3.0, 6)));
        state.entities.push(Entity::Food(Food::new(3, Vec2::new(1900.0, 1900.0), 3.0, 6)));
        let input = Autopilot::default().next_input(&state);
        assert!(input.left && input.up);
        assert!(!input.right && !input.down);
        assert!(!input.shooting);
    }

    #[test]
    fn fires_at_enemies_in_range() {
        let mut state = state();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut enemy = Enemy::random(5, 4000.0, 1, &mut rng);
        enemy.body.pos = Vec2::new(2200.0, 2000.0);
        state.entities.push(Entity::Enemy(enemy));

        let input = Autopilot::default().next_input(&state);
        assert!(input.shooting);
        let aim = state.camera.screen_to_world_position(input.mouse_position.unwrap());
        assert!((aim - Vec2::new(2200.0, 2000.0)).length() < 1e-3);

        let mut far = Autopilot {
            engage_range: 100.0,
            ..Default::default()
        };
        assert!(!far.next_input(&state).shooting);
    }

    #[test]
    fn scripted_input_runs_out_to_idle() {
        let state = state();
        let press = TickInput {
            up: true,
            ..Default::default()
        };
        let mut script = ScriptedInput::new(vec![press]);
        assert_eq!(script.next_input(&state), press);
        assert_eq!(script.next_input(&state), TickInput::default());
    }
}
