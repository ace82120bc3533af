//! Generic overlap detection
//!
//! The manager only answers "do these circles overlap" and forwards hits to a
//! [`CollisionHandler`]. Game rules (eating, contact damage, projectile hits)
//! are resolved by the frame tick against typed pairs, not here.

use super::entity::{Body, Entity, EntityId};

/// Receives every overlapping pair found by a full scan
pub trait CollisionHandler {
    fn handle_collision(&mut self, a: &mut Entity, b: &mut Entity);
}

/// Default handler: notify both entities through their collision hook
#[derive(Debug, Default, Clone, Copy)]
pub struct NotifyEntities;

impl CollisionHandler for NotifyEntities {
    fn handle_collision(&mut self, a: &mut Entity, b: &mut Entity) {
        a.on_collision(b.body());
        b.on_collision(a.body());
    }
}

/// Result of a check, for diagnostics and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionPair {
    pub a: EntityId,
    pub b: EntityId,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CollisionManager;

impl CollisionManager {
    pub fn new() -> Self {
        Self
    }

    /// Circle–circle test on squared distances (no square root).
    /// Touching counts as a hit.
    #[inline]
    pub fn check_collision(&self, a: &Body, b: &Body) -> bool {
        a.overlaps(b)
    }

    /// Ids of every entity in `others` that overlaps `body`, skipping itself
    pub fn check_collisions_for(&self, body: &Body, others: &[Entity]) -> Vec<EntityId> {
        others
            .iter()
            .map(Entity::body)
            .filter(|other| other.id != body.id && self.check_collision(body, other))
            .map(|other| other.id)
            .collect()
    }

    /// Scan all unique pairs (O(n²)) and hand each hit to `handler`
    pub fn check_all_collisions<H: CollisionHandler>(
        &self,
        entities: &mut [Entity],
        handler: &mut H,
    ) -> Vec<CollisionPair> {
        let mut hits = Vec::new();
        for i in 0..entities.len() {
            let (head, tail) = entities.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                if self.check_collision(a.body(), b.body()) {
                    hits.push(CollisionPair {
                        a: a.id(),
                        b: b.id(),
                    });
                    handler.handle_collision(a, b);
                }
            }
        }
        hits
    }
}
