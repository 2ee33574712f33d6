//! Movement domain: push/pull mode running alongside the state machine.

use bevy::prelude::*;

use crate::movement::orientation::FacingDirection;
use crate::movement::resources::PushPullTuning;

#[derive(Component, Debug, Default, Clone)]
pub struct PushPull {
    pub active: bool,
    pub target: Option<Entity>,
    pub weight: f32,
    /// Horizontal speed Move uses instead of its normal speed while active
    pub speed: f32,
}

impl PushPull {
    pub fn engage(&mut self, target: Entity, weight: f32, speed: f32) {
        if self.target != Some(target) {
            debug!("Push/pull engaged: weight={}, speed={}", weight, speed);
        }
        self.active = true;
        self.target = Some(target);
        self.weight = weight;
        self.speed = speed;
    }

    pub fn release(&mut self) {
        if self.active {
            debug!("Push/pull released");
        }
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PushTarget<T> {
    pub id: T,
    pub weight: f32,
    pub distance: f32,
}

/// Movement speed while pushing or pulling an object of `weight`.
pub fn push_pull_speed(base_speed: f32, weight: f32, tuning: &PushPullTuning) -> f32 {
    let penalty = (weight - tuning.minimum_weight).max(0.0) * tuning.weight_penalty_per_unit;
    (base_speed * tuning.base_push_pull_speed_multiplier - penalty).max(tuning.minimum_speed)
}

/// Nearest candidate within the detection radius and roughly in front.
pub fn find_push_target<T: Copy>(
    origin: Vec2,
    facing: FacingDirection,
    candidates: impl IntoIterator<Item = (T, Vec2, f32)>,
    tuning: &PushPullTuning,
) -> Option<PushTarget<T>> {
    let forward = Vec2::new(facing.signum(), 0.0);

    candidates
        .into_iter()
        .filter_map(|(id, position, weight)| {
            let offset = position - origin;
            let distance = offset.length();
            if distance > tuning.detection_radius {
                return None;
            }
            let to_object = offset.normalize_or_zero();
            if to_object.dot(forward) < tuning.facing_dot_threshold {
                return None;
            }
            Some(PushTarget {
                id,
                weight,
                distance,
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}
