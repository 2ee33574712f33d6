//! States that cling to a wall.

use super::{PlayerContext, PlayerState, PlayerStateKind};
use crate::movement::collision::LedgeApproach;

fn wall_enter(ctx: &mut PlayerContext) {
    ctx.velocity.gravity_scale = 0.0;
}

/// Transitions every wall state checks before its own.
fn touching_wall_transitions(ctx: &mut PlayerContext) -> Option<PlayerStateKind> {
    let snapshot = ctx.snapshot;
    let facing = ctx.facing();
    let grab = ctx.input.grab_held;

    if ctx.jump_requested() {
        ctx.memory.wall_jump_direction = facing.opposite();
        return Some(PlayerStateKind::WallJump);
    }
    if snapshot.grounded && !grab {
        return Some(PlayerStateKind::Idle);
    }
    if !snapshot.touching_wall || (ctx.input.x != facing.sign() && !grab) {
        // Letting go still leaves a moment to kick off the wall.
        ctx.memory.wall_jump_direction = facing.opposite();
        ctx.jump
            .start_wall_coyote(ctx.now, ctx.data.wall_jump_coyote_time);
        return Some(PlayerStateKind::InAir);
    }
    if !snapshot.touching_ledge
        && ctx
            .query()
            .check_can_grab_ledge(&ctx.data.ledge)
    {
        ctx.memory.ledge_approach = LedgeApproach::FromSide;
        return Some(PlayerStateKind::LedgeClimb);
    }
    None
}

/// Pin the body where the grab started. Skipped while knockback owns velocity.
fn hold_position(ctx: &mut PlayerContext) {
    if ctx.set_velocity_zero()
        && let Some(position) = ctx.memory.hold_position
    {
        ctx.snap_to(position);
    }
}

pub(super) struct WallGrabState;

impl PlayerState for WallGrabState {
    fn enter(&self, ctx: &mut PlayerContext) {
        wall_enter(ctx);
        ctx.memory.hold_position = Some(ctx.position);
        hold_position(ctx);
    }

    fn exit(&self, ctx: &mut PlayerContext) {
        ctx.memory.hold_position = None;
    }

    fn logic_update(&self, ctx: &mut PlayerContext) -> Option<PlayerStateKind> {
        if let Some(next) = touching_wall_transitions(ctx) {
            return Some(next);
        }
        hold_position(ctx);
        if ctx.input.y > 0 {
            return Some(PlayerStateKind::WallClimb);
        }
        if ctx.input.y < 0 || !ctx.input.grab_held {
            return Some(PlayerStateKind::WallSlide);
        }
        None
    }
}

pub(super) struct WallClimbState;

impl PlayerState for WallClimbState {
    fn enter(&self, ctx: &mut PlayerContext) {
        wall_enter(ctx);
    }

    fn logic_update(&self, ctx: &mut PlayerContext) -> Option<PlayerStateKind> {
        if let Some(next) = touching_wall_transitions(ctx) {
            return Some(next);
        }
        if ctx.input.y != 1 {
            return Some(PlayerStateKind::WallGrab);
        }
        ctx.set_velocity_x(0.0);
        ctx.set_velocity_y(ctx.data.wall_climb_velocity);
        None
    }
}

pub(super) struct WallSlideState;

impl PlayerState for WallSlideState {
    fn enter(&self, ctx: &mut PlayerContext) {
        wall_enter(ctx);
    }

    fn logic_update(&self, ctx: &mut PlayerContext) -> Option<PlayerStateKind> {
        if let Some(next) = touching_wall_transitions(ctx) {
            return Some(next);
        }
        if ctx.input.grab_held && ctx.input.y == 0 {
            return Some(PlayerStateKind::WallGrab);
        }
        ctx.set_velocity_y(-ctx.data.wall_slide_velocity);
        None
    }
}
