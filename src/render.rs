//! Rendering seam
//!
//! Drawing lives outside this crate. A renderer receives a borrowed [`Frame`]
//! each update and can only read from it.

use thiserror::Error;

use crate::sim::{Body, Camera, Entity, GamePhase, Player, Projectile, UpgradeOffer};

#[derive(Debug, Error)]
pub enum RenderError {
    /// Surface lost or not yet acquired; the next frame may succeed
    #[error("render surface unavailable")]
    SurfaceUnavailable,
    #[error("renderer failed: {0}")]
    Backend(String),
}

/// Read-only snapshot handed to a renderer
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub phase: GamePhase,
    pub camera: &'a Camera,
    pub player: Option<&'a Player>,
    pub entities: &'a [Entity],
    pub projectiles: &'a [Projectile],
    pub hazards: &'a [Entity],
    pub score: u64,
    pub upgrade: Option<&'a UpgradeOffer>,
}

impl<'a> Frame<'a> {
    /// Every body in the frame that the camera can see. Hazards come first so
    /// they draw underneath.
    pub fn visible_bodies(&self) -> impl Iterator<Item = &'a Body> + '_ {
        let camera = self.camera;
        self.hazards
            .iter()
            .chain(self.entities.iter())
            .map(Entity::body)
            .chain(self.projectiles.iter().map(|p| &p.body))
            .chain(self.player.map(|p| &p.body))
            .filter(move |b| b.active && camera.is_visible(b.pos, b.radius))
    }
}

pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>) -> Result<(), RenderError>;
}

/// Headless renderer; counts what it would have drawn
#[derive(Debug, Default, Clone)]
pub struct NullRenderer {
    pub frames: u64,
    pub last_visible: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &Frame<'_>) -> Result<(), RenderError> {
        self.frames += 1;
        self.last_visible = frame.visible_bodies().count();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Food;
    use glam::Vec2;

    #[test]
    fn culling_skips_off_screen_and_inactive() {
        let camera = Camera::new(1280.0, 720.0, 4000.0);
        let player = Player::new(1, Vec2::splat(2000.0), "p");
        let mut gone = Food::new(3, Vec2::splat(2010.0), 3.0, 6);
        gone.body.active = false;
        let entities = vec![
            Entity::Food(Food::new(2, Vec2::splat(2050.0), 3.0, 6)),
            Entity::Food(gone),
            Entity::Food(Food::new(4, Vec2::splat(100.0), 3.0, 6)),
        ];
        let frame = Frame {
            phase: GamePhase::Playing,
            camera: &camera,
            player: Some(&player),
            entities: &entities,
            projectiles: &[],
            hazards: &[],
            score: 0,
            upgrade: None,
        };
        let ids: Vec<_> = frame.visible_bodies().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 1]);

        let mut renderer = NullRenderer::default();
        renderer.render(&frame).unwrap();
        assert_eq!(renderer.frames, 1);
        assert_eq!(renderer.last_visible, 2);
    }
}
