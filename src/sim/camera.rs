//! Viewport camera
//!
//! Maps between screen pixels and world units and culls off-screen entities
//! for the renderer. The simulation uses it only to turn the mouse position
//! into a world-space aim target.

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 2.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// World-space centre of the view
    pub position: Vec2,
    pub view_width: f32,
    pub view_height: f32,
    pub world_size: f32,
    zoom: f32,
}

/// Axis-aligned world rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Camera {
    /// Camera centred on the world at zoom 1
    pub fn new(view_width: f32, view_height: f32, world_size: f32) -> Self {
        Self {
            position: Vec2::splat(world_size / 2.0),
            view_width,
            view_height,
            world_size,
            zoom: 1.0,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Set zoom, clamped to [0.5, 2.0]
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.clamp_to_world();
    }

    /// Viewport resized
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.view_width = width;
        self.view_height = height;
        self.clamp_to_world();
    }

    /// Follow `pos`, keeping the view inside the world
    pub fn center_on(&mut self, pos: Vec2) {
        self.position = pos;
        self.clamp_to_world();
    }

    /// Half view extents in world units
    fn half_extents(&self) -> Vec2 {
        Vec2::new(self.view_width, self.view_height) / 2.0 / self.zoom
    }

    fn clamp_to_world(&mut self) {
        let half = self.half_extents();
        // A view wider than the world just centres on that axis
        let clamp_axis = |value: f32, half: f32| {
            if half * 2.0 >= self.world_size {
                self.world_size / 2.0
            } else {
                value.clamp(half, self.world_size - half)
            }
        };
        self.position = Vec2::new(
            clamp_axis(self.position.x, half.x),
            clamp_axis(self.position.y, half.y),
        );
    }

    pub fn screen_to_world_position(&self, screen: Vec2) -> Vec2 {
        let half_view = Vec2::new(self.view_width, self.view_height) / 2.0;
        self.position + (screen - half_view) / self.zoom
    }

    pub fn world_to_screen_position(&self, world: Vec2) -> Vec2 {
        let half_view = Vec2::new(self.view_width, self.view_height) / 2.0;
        half_view + (world - self.position) * self.zoom
    }

    /// World rectangle currently on screen
    pub fn view_rect(&self) -> ViewRect {
        let half = self.half_extents();
        ViewRect {
            min: self.position - half,
            max: self.position + half,
        }
    }

    /// Bounding-box visibility with `radius` padding, for render culling
    pub fn is_visible(&self, pos: Vec2, radius: f32) -> bool {
        let rect = self.view_rect();
        pos.x + radius >= rect.min.x
            && pos.x - radius <= rect.max.x
            && pos.y + radius >= rect.min.y
            && pos.y - radius <= rect.max.y
    }
}
