//! States that stand on the ground, and the checks they all share.

use super::{PlayerContext, PlayerState, PlayerStateKind};
use crate::movement::animation::params;
use crate::movement::collision::LedgeApproach;

pub(super) fn grounded_enter(ctx: &mut PlayerContext) {
    ctx.jump.reset(ctx.data.amount_of_jumps);
    ctx.memory.is_jumping = false;
    ctx.animation.set_bool(params::GROUNDED, true);
}

pub(super) fn grounded_exit(ctx: &mut PlayerContext) {
    ctx.animation.set_bool(params::GROUNDED, false);
}

/// Transitions every grounded state checks before its own.
///
/// Aim passes `aiming = true`, which keeps it from jumping or re-entering itself.
pub(super) fn grounded_transitions(
    ctx: &mut PlayerContext,
    aiming: bool,
) -> Option<PlayerStateKind> {
    let snapshot = ctx.snapshot;

    if !snapshot.grounded {
        if ctx.can_auto_grab_ledge() {
            ctx.memory.ledge_approach = LedgeApproach::FromAbove;
            return Some(PlayerStateKind::LedgeClimb);
        }
        ctx.jump.start_coyote(ctx.now, ctx.data.coyote_time);
        return Some(PlayerStateKind::InAir);
    }

    if !aiming
        && ctx.jump_requested()
        && ctx.jump.can_jump(ctx.now)
        && !snapshot.touching_ceiling
    {
        return Some(if ctx.data.ledge.ledge_assist {
            PlayerStateKind::LedgeJump
        } else {
            PlayerStateKind::Jump
        });
    }

    if snapshot.touching_wall && ctx.input.grab_held && !snapshot.touching_ceiling {
        return Some(PlayerStateKind::WallGrab);
    }

    if !aiming && ctx.input.aim_held && ctx.loadout.has_active_weapon() {
        return Some(PlayerStateKind::Aim);
    }

    None
}

pub(super) struct IdleState;

impl PlayerState for IdleState {
    fn enter(&self, ctx: &mut PlayerContext) {
        grounded_enter(ctx);
        ctx.set_velocity_x(0.0);
    }

    fn exit(&self, ctx: &mut PlayerContext) {
        grounded_exit(ctx);
    }

    fn logic_update(&self, ctx: &mut PlayerContext) -> Option<PlayerStateKind> {
        if let Some(next) = grounded_transitions(ctx, false) {
            return Some(next);
        }
        if ctx.input.x != 0 {
            return Some(PlayerStateKind::Move);
        }
        if ctx.input.y == -1 {
            return Some(PlayerStateKind::CrouchIdle);
        }
        None
    }
}

pub(super) struct MoveState;

impl PlayerState for MoveState {
    fn enter(&self, ctx: &mut PlayerContext) {
        grounded_enter(ctx);
    }

    fn exit(&self, ctx: &mut PlayerContext) {
        grounded_exit(ctx);
    }

    fn logic_update(&self, ctx: &mut PlayerContext) -> Option<PlayerStateKind> {
        if let Some(next) = grounded_transitions(ctx, false) {
            return Some(next);
        }
        if ctx.input.x == 0 {
            return Some(PlayerStateKind::Idle);
        }
        if ctx.input.y == -1 {
            return Some(PlayerStateKind::CrouchMove);
        }

        // Pushing or pulling keeps the character facing the object.
        let speed = if ctx.push_pull.active {
            ctx.push_pull.speed
        } else {
            ctx.orientation.check_flip(ctx.input.x);
            if ctx.input.run_held {
                ctx.data.run_velocity
            } else {
                ctx.data.movement_velocity
            }
        };
        ctx.set_velocity_x(speed * f32::from(ctx.input.x));
        let vx = ctx.velocity.current().x.abs();
        ctx.animation.set_float(params::X_VELOCITY, vx);
        None
    }
}

/// Short recovery after touching down.
pub(super) struct LandState;

impl PlayerState for LandState {
    fn enter(&self, ctx: &mut PlayerContext) {
        grounded_enter(ctx);
    }

    fn exit(&self, ctx: &mut PlayerContext) {
        grounded_exit(ctx);
    }

    fn logic_update(&self, ctx: &mut PlayerContext) -> Option<PlayerStateKind> {
        if let Some(next) = grounded_transitions(ctx, false) {
            return Some(next);
        }
        if ctx.input.x != 0 {
            return Some(PlayerStateKind::Move);
        }
        if ctx.memory.animation_finished || ctx.elapsed() >= ctx.data.land_duration {
            return Some(PlayerStateKind::Idle);
        }
        None
    }
}
