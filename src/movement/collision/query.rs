//! Ground, wall, ledge and ceiling probes relative to the character.

use bevy::prelude::*;

use super::corner::CORNER_EPSILON;
use super::{ColliderShape, CollisionSnapshot, CollisionWorld, RayHit};
use crate::movement::orientation::FacingDirection;
use crate::movement::resources::ProbeLayout;

/// Probes for one character at one instant.
///
/// Everything here is a pure function of the world, the body position, the
/// facing direction, the collider shape and the probe layout. A miss is
/// always "condition not met".
#[derive(Clone, Copy)]
pub struct CollisionQuery<'a> {
    pub(super) world: &'a dyn CollisionWorld,
    pub(super) position: Vec2,
    pub(super) facing: FacingDirection,
    pub(super) shape: &'a ColliderShape,
    pub(super) probes: &'a ProbeLayout,
}

impl<'a> CollisionQuery<'a> {
    pub fn new(
        world: &'a dyn CollisionWorld,
        position: Vec2,
        facing: FacingDirection,
        shape: &'a ColliderShape,
        probes: &'a ProbeLayout,
    ) -> Self {
        Self {
            world,
            position,
            facing,
            shape,
            probes,
        }
    }

    pub fn facing(&self) -> FacingDirection {
        self.facing
    }

    /// Bottom-center of the collider in world space.
    pub fn feet(&self) -> Vec2 {
        Vec2::new(
            self.position.x + self.shape.offset.x,
            self.position.y + self.shape.bottom(),
        )
    }

    pub fn wall_check_origin(&self) -> Vec2 {
        self.feet() + Vec2::new(0.0, self.probes.wall_check_height)
    }

    pub fn ledge_check_origin(&self) -> Vec2 {
        self.feet() + Vec2::new(0.0, self.probes.ledge_check_height)
    }

    pub fn ceiling_check_origin(&self) -> Vec2 {
        self.feet() + Vec2::new(0.0, self.probes.ceiling_check_height)
    }

    /// Short downward probe centered under the character.
    pub fn check_is_grounded(&self) -> bool {
        let origin = self.feet() + Vec2::new(0.0, self.probes.skin);
        self.world
            .ray_cast(
                origin,
                Dir2::NEG_Y,
                self.probes.skin + self.probes.ground_check_distance,
            )
            .is_some()
    }

    pub(super) fn wall_hit(&self, direction: FacingDirection) -> Option<RayHit> {
        self.world.ray_cast(
            self.wall_check_origin(),
            direction.dir(),
            self.probes.wall_check_distance,
        )
    }

    /// Horizontal probe at chest height in the facing direction.
    pub fn check_if_touching_wall(&self) -> bool {
        self.wall_hit(self.facing).is_some()
    }

    /// Same probe, behind the character.
    pub fn check_if_touching_wall_back(&self) -> bool {
        self.wall_hit(self.facing.opposite()).is_some()
    }

    pub fn check_wall_in_direction(&self, direction: FacingDirection) -> bool {
        self.wall_hit(direction).is_some()
    }

    /// Horizontal probe above the wall probe. A wall hit without a ledge hit
    /// means the wall has a climbable top within reach.
    pub fn check_touching_ledge(&self) -> bool {
        self.world
            .ray_cast(
                self.ledge_check_origin(),
                self.facing.dir(),
                self.probes.wall_check_distance,
            )
            .is_some()
    }

    /// Overlap test at standing head height; blocks standing up and grabbing.
    pub fn check_for_ceiling(&self) -> bool {
        self.world.overlap_circle(
            self.ceiling_check_origin(),
            self.probes.ceiling_check_radius,
        )
    }

    /// No walkable surface just in front of the feet.
    pub fn check_ground_edge_ahead(&self) -> bool {
        let origin = Vec2::new(
            self.position.x + self.facing.signum() * self.probes.edge_probe_forward,
            self.feet().y + self.probes.skin,
        );
        self.world
            .ray_cast(
                origin,
                Dir2::NEG_Y,
                self.probes.skin + self.probes.edge_probe_depth,
            )
            .is_none()
    }

    /// Probe that starts in front of and below the feet and looks back toward
    /// the character for the face of the ledge being stood on.
    pub(super) fn wall_below_hit(&self) -> Option<RayHit> {
        let origin = self.wall_below_origin();
        self.world
            .ray_cast(
                origin,
                self.facing.opposite().dir(),
                self.probes.edge_probe_forward + self.shape.half_width(),
            )
            // Starting inside geometry means there is no open face to find.
            .filter(|hit| hit.distance > 0.0)
    }

    pub(super) fn wall_below_origin(&self) -> Vec2 {
        Vec2::new(
            self.position.x + self.facing.signum() * self.probes.edge_probe_forward,
            self.feet().y - self.probes.wall_below_depth,
        )
    }

    pub fn check_wall_below(&self) -> bool {
        self.wall_below_hit().is_some()
    }

    /// The character is about to fall past a ledge with a climbable face.
    pub fn should_auto_grab_ledge(&self) -> bool {
        self.check_ground_edge_ahead() && self.check_wall_below()
    }

    /// Free space above a ledge corner for a standing collider of `height`.
    pub fn check_space_above_corner(&self, corner: Vec2, height: f32) -> bool {
        let origin = corner + Vec2::new(self.facing.signum() * CORNER_EPSILON, CORNER_EPSILON);
        self.world.ray_cast(origin, Dir2::Y, height).is_none()
    }

    pub fn snapshot(&self) -> CollisionSnapshot {
        CollisionSnapshot {
            grounded: self.check_is_grounded(),
            touching_wall: self.check_if_touching_wall(),
            touching_wall_back: self.check_if_touching_wall_back(),
            touching_ledge: self.check_touching_ledge(),
            touching_ceiling: self.check_for_ceiling(),
            ground_edge_ahead: self.check_ground_edge_ahead(),
        }
    }
}
