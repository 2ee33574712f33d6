//! Hanging from a ledge corner and climbing over it.
//!
//! On entry the corner is solved once and two anchor points are derived from
//! it: `start`, where the body hangs below and beside the corner, and `stop`,
//! where it stands on the top surface after the climb. The body is held at
//! `start` until the climb finishes, then snapped to `stop` on exit.

use bevy::prelude::*;

use super::{LedgeHang, PlayerContext, PlayerState, PlayerStateKind};
use crate::movement::animation::params;
use crate::movement::collision::LedgeApproach;
use crate::movement::events::LocomotionEventKind;

pub(super) struct LedgeClimbState;

impl PlayerState for LedgeClimbState {
    fn enter(&self, ctx: &mut PlayerContext) {
        ctx.set_velocity_zero();
        ctx.velocity.gravity_scale = 0.0;

        let approach = std::mem::take(&mut ctx.memory.ledge_approach);
        let solve = {
            let query = ctx.query();
            let solve = match approach {
                LedgeApproach::FromSide => query.determine_corner_position(),
                LedgeApproach::FromAbove => query.determine_corner_position_from_above(),
            };
            solve.filter(|solve| query.is_valid_ledge(solve, &ctx.data.ledge))
        };
        let Some(solve) = solve else {
            debug!("No grabbable corner on {:?} approach", approach);
            ctx.memory.ledge = None;
            return;
        };

        // Hang facing the wall face.
        ctx.orientation.face(solve.open_side.opposite());
        let facing = ctx.facing().signum();
        let start_offset = ctx.data.ledge.start_offset();
        let stop_offset = ctx.data.ledge.stop_offset();
        let start = solve.corner + Vec2::new(-facing * start_offset.x, -start_offset.y);
        let stop = solve.corner + Vec2::new(facing * stop_offset.x, stop_offset.y);

        ctx.snap_to(start);
        ctx.memory.ledge = Some(LedgeHang {
            corner: solve.corner,
            start,
            stop,
            climbing: false,
            climb_started: 0.0,
            head_room: true,
        });
        ctx.emit(LocomotionEventKind::LedgeGrabbed {
            corner: solve.corner,
        });
        debug!("Ledge grabbed: corner={:?}, approach={:?}", solve.corner, approach);
    }

    fn exit(&self, ctx: &mut PlayerContext) {
        if let Some(hang) = ctx.memory.ledge.take()
            && hang.climbing
        {
            ctx.snap_to(hang.stop);
        }
        ctx.animation.set_bool(params::CLIMB_LEDGE, false);
    }

    fn logic_update(&self, ctx: &mut PlayerContext) -> Option<PlayerStateKind> {
        let Some(mut hang) = ctx.memory.ledge else {
            return Some(PlayerStateKind::InAir);
        };

        if hang.climbing
            && (ctx.memory.animation_finished
                || ctx.now - hang.climb_started >= ctx.data.ledge.climb_time)
        {
            return Some(if hang.head_room {
                PlayerStateKind::Idle
            } else {
                PlayerStateKind::CrouchIdle
            });
        }

        if ctx.set_velocity_zero() {
            ctx.snap_to(hang.start);
        }

        let hanging = ctx.memory.animation_triggered
            || ctx.elapsed() >= ctx.data.ledge.hang_settle_time;
        if hanging && !hang.climbing {
            let facing = ctx.facing();
            if ctx.input.x == facing.sign() {
                hang.head_room = ctx
                    .query()
                    .check_space_above_corner(hang.corner, ctx.data.stand_collider_height);
                hang.climbing = true;
                hang.climb_started = ctx.now;
                ctx.memory.animation_finished = false;
                ctx.animation.set_bool(params::CLIMB_LEDGE, true);
            } else if ctx.input.y == -1 {
                return Some(PlayerStateKind::InAir);
            } else if ctx.jump_requested() {
                ctx.memory.wall_jump_direction = facing.opposite();
                return Some(PlayerStateKind::WallJump);
            }
        }

        ctx.memory.ledge = Some(hang);
        None
    }
}
