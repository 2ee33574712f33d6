//! Movement domain: probes against the ground layer and ledge-corner solving.

mod corner;
mod query;
mod shape;
mod world;


pub use corner::{CORNER_EPSILON, CornerSolve, LedgeApproach};
pub use query::CollisionQuery;
pub use shape::ColliderShape;
pub use world::{SpatialWorld, StaticGeometry, ground_filter};

use bevy::prelude::*;

/// Result of a ray cast that hit something.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub distance: f32,
    pub point: Vec2,
}

/// Side-effect free queries against the static/kinematic ground geometry.
///
/// Implementations must treat a non-positive `max_distance` as a miss.
pub trait CollisionWorld {
    fn ray_cast(&self, origin: Vec2, direction: Dir2, max_distance: f32) -> Option<RayHit>;

    fn overlap_circle(&self, center: Vec2, radius: f32) -> bool;
}

/// Per-tick probe results. Recomputed before every use, never persisted as truth.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CollisionSnapshot {
    pub grounded: bool,
    pub touching_wall: bool,
    pub touching_wall_back: bool,
    pub touching_ledge: bool,
    pub touching_ceiling: bool,
    pub ground_edge_ahead: bool,
}
