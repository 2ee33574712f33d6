//! Ledge-corner solving.
//!
//! Both solves are two ray casts: one horizontal to find the wall face, one
//! vertical to find the top surface. The second ray starts [`CORNER_EPSILON`]
//! past the face so it lands on the top surface rather than re-hitting the
//! face itself.

use bevy::prelude::*;

use super::CollisionQuery;
use crate::movement::orientation::FacingDirection;
use crate::movement::resources::LedgeTuning;

/// Offset that pushes the vertical corner ray just past the wall face.
pub const CORNER_EPSILON: f32 = 0.015;

/// How the character reached the ledge it is about to grab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LedgeApproach {
    /// Jumped or slid up against the wall below the ledge
    #[default]
    FromSide,
    /// Walked off the ledge top and caught it on the way down
    FromAbove,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerSolve {
    /// Where the wall face meets the top surface
    pub corner: Vec2,
    pub horizontal_distance: f32,
    pub vertical_distance: f32,
    /// Side of the face that is open air
    pub open_side: FacingDirection,
}

impl CollisionQuery<'_> {
    /// Corner of the wall in front of the character.
    ///
    /// `None` when the wall probe misses or the top ray starts embedded in
    /// geometry (the ledge probe is still against the wall).
    pub fn determine_corner_position(&self) -> Option<CornerSolve> {
        let wall_origin = self.wall_check_origin();
        let ledge_origin = self.ledge_check_origin();
        let sign = self.facing.signum();

        let x_hit = self.wall_hit(self.facing)?;
        let x_dist = x_hit.distance;

        let top_origin = ledge_origin + Vec2::new((x_dist + CORNER_EPSILON) * sign, 0.0);
        let drop = ledge_origin.y - wall_origin.y + CORNER_EPSILON;
        let y_hit = self
            .world
            .ray_cast(top_origin, Dir2::NEG_Y, drop)
            .filter(|hit| hit.distance > 0.0)?;
        let y_dist = y_hit.distance;

        Some(CornerSolve {
            corner: Vec2::new(wall_origin.x + x_dist * sign, ledge_origin.y - y_dist),
            horizontal_distance: x_dist,
            vertical_distance: y_dist,
            open_side: self.facing.opposite(),
        })
    }

    /// Corner of the ledge the character is walking off, found from above:
    /// the wall-below probe locates the face, then a ray just behind the face
    /// finds the top surface.
    pub fn determine_corner_position_from_above(&self) -> Option<CornerSolve> {
        let sign = self.facing.signum();
        let face_hit = self.wall_below_hit()?;
        let face_x = self.wall_below_origin().x - sign * face_hit.distance;

        let top_origin = Vec2::new(
            face_x - sign * CORNER_EPSILON,
            self.feet().y + self.probes.from_above_reach,
        );
        let y_hit = self
            .world
            .ray_cast(
                top_origin,
                Dir2::NEG_Y,
                self.probes.from_above_reach + self.probes.wall_below_depth,
            )
            .filter(|hit| hit.distance > 0.0)?;

        Some(CornerSolve {
            corner: Vec2::new(face_x, top_origin.y - y_hit.distance),
            horizontal_distance: face_hit.distance,
            vertical_distance: y_hit.distance,
            open_side: self.facing,
        })
    }

    /// Reject corners the top ray barely reached (shallower than
    /// `min_corner_depth`) and ledges whose face is shorter than
    /// `min_ledge_height`, measured as the clear drop on the open side.
    pub fn is_valid_ledge(&self, solve: &CornerSolve, tuning: &LedgeTuning) -> bool {
        if solve.vertical_distance < tuning.min_corner_depth {
            return false;
        }
        let origin = solve.corner
            + Vec2::new(solve.open_side.signum() * CORNER_EPSILON, -CORNER_EPSILON);
        self.world
            .ray_cast(origin, Dir2::NEG_Y, tuning.min_ledge_height)
            .is_none()
    }

    /// Auto-grab geometry plus a valid, solvable corner.
    pub fn check_can_grab_ledge_from_above(&self, tuning: &LedgeTuning) -> bool {
        self.should_auto_grab_ledge()
            && self
                .determine_corner_position_from_above()
                .is_some_and(|solve| self.is_valid_ledge(&solve, tuning))
    }

    /// A wall in front with a grabbable side corner.
    pub fn check_can_grab_ledge(&self, tuning: &LedgeTuning) -> bool {
        self.determine_corner_position()
            .is_some_and(|solve| self.is_valid_ledge(&solve, tuning))
    }

    /// How far the ledge probe must rise to clear a ledge within `reach`
    /// ahead and `max_height` above it. `None` when there is no such ledge or
    /// the probe already clears it.
    pub fn ledge_assist_rise(&self, reach: f32, max_height: f32, margin: f32) -> Option<f32> {
        let wall_origin = self.wall_check_origin();
        let ledge_origin = self.ledge_check_origin();
        let sign = self.facing.signum();

        let x_hit = self.world.ray_cast(wall_origin, self.facing.dir(), reach)?;
        let top_origin = Vec2::new(
            wall_origin.x + (x_hit.distance + CORNER_EPSILON) * sign,
            ledge_origin.y + max_height,
        );
        let drop = max_height + (ledge_origin.y - wall_origin.y) + CORNER_EPSILON;
        let y_hit = self
            .world
            .ray_cast(top_origin, Dir2::NEG_Y, drop)
            .filter(|hit| hit.distance > 0.0)?;

        let top = top_origin.y - y_hit.distance;
        let rise = top - ledge_origin.y + margin;
        (rise > 0.0).then_some(rise)
    }
}
