//! Collision world backends: avian spatial queries and a headless box world.

use avian2d::prelude::*;
use bevy::math::bounding::{Aabb2d, BoundingCircle, IntersectsVolume, RayCast2d};
use bevy::prelude::*;

use super::{CollisionWorld, RayHit};
use crate::movement::GameLayer;

/// Filter to only hit level geometry (not the player, pushables, etc.)
pub fn ground_filter() -> SpatialQueryFilter {
    SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall])
}

/// Live world backed by avian's spatial query pipeline.
pub struct SpatialWorld<'a, 'w, 's> {
    query: &'a SpatialQuery<'w, 's>,
    filter: SpatialQueryFilter,
}

impl<'a, 'w, 's> SpatialWorld<'a, 'w, 's> {
    pub fn new(query: &'a SpatialQuery<'w, 's>) -> Self {
        Self {
            query,
            filter: ground_filter(),
        }
    }
}

impl CollisionWorld for SpatialWorld<'_, '_, '_> {
    fn ray_cast(&self, origin: Vec2, direction: Dir2, max_distance: f32) -> Option<RayHit> {
        if max_distance <= 0.0 {
            return None;
        }
        self.query
            .cast_ray(origin, direction, max_distance, true, &self.filter)
            .map(|hit| RayHit {
                distance: hit.distance,
                point: origin + *direction * hit.distance,
            })
    }

    fn overlap_circle(&self, center: Vec2, radius: f32) -> bool {
        if radius <= 0.0 {
            return false;
        }
        !self
            .query
            .shape_intersections(&Collider::circle(radius), center, 0.0, &self.filter)
            .is_empty()
    }
}

/// Solid axis-aligned boxes, for headless simulation and tests.
#[derive(Debug, Default, Clone)]
pub struct StaticGeometry {
    boxes: Vec<Aabb2d>,
}

impl StaticGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a solid box spanning `min..max`.
    pub fn with_box(mut self, min: Vec2, max: Vec2) -> Self {
        self.add_box(min, max);
        self
    }

    pub fn add_box(&mut self, min: Vec2, max: Vec2) {
        let center = (min + max) * 0.5;
        let half_size = (max - min).abs() * 0.5;
        self.boxes.push(Aabb2d::new(center, half_size));
    }
}

impl CollisionWorld for StaticGeometry {
    fn ray_cast(&self, origin: Vec2, direction: Dir2, max_distance: f32) -> Option<RayHit> {
        if max_distance <= 0.0 {
            return None;
        }
        let ray = RayCast2d::new(origin, direction, max_distance);
        self.boxes
            .iter()
            .filter_map(|aabb| ray.aabb_intersection_at(aabb))
            .min_by(f32::total_cmp)
            .map(|distance| RayHit {
                distance,
                point: origin + *direction * distance,
            })
    }

    fn overlap_circle(&self, center: Vec2, radius: f32) -> bool {
        if radius <= 0.0 {
            return false;
        }
        let circle = BoundingCircle::new(center, radius);
        self.boxes.iter().any(|aabb| aabb.intersects(&circle))
    }
}
