use super::grounded::{grounded_enter, grounded_exit, grounded_transitions};
use super::{PlayerContext, PlayerState, PlayerStateKind};

fn crouch_enter(ctx: &mut PlayerContext) {
    grounded_enter(ctx);
    ctx.set_collider_height(ctx.data.crouch_collider_height);
}

fn crouch_exit(ctx: &mut PlayerContext) {
    grounded_exit(ctx);
    ctx.set_collider_height(ctx.data.stand_collider_height);
}

/// Standing back up needs the down input released and room overhead.
fn can_stand(ctx: &PlayerContext) -> bool {
    ctx.input.y != -1 && !ctx.snapshot.touching_ceiling
}

pub(super) struct CrouchIdleState;

impl PlayerState for CrouchIdleState {
    fn enter(&self, ctx: &mut PlayerContext) {
        crouch_enter(ctx);
        ctx.set_velocity_zero();
    }

    fn exit(&self, ctx: &mut PlayerContext) {
        crouch_exit(ctx);
    }

    fn logic_update(&self, ctx: &mut PlayerContext) -> Option<PlayerStateKind> {
        if let Some(next) = grounded_transitions(ctx, false) {
            return Some(next);
        }
        if ctx.input.x != 0 {
            return Some(PlayerStateKind::CrouchMove);
        }
        if can_stand(ctx) {
            return Some(PlayerStateKind::Idle);
        }
        None
    }
}

pub(super) struct CrouchMoveState;

impl PlayerState for CrouchMoveState {
    fn enter(&self, ctx: &mut PlayerContext) {
        crouch_enter(ctx);
    }

    fn exit(&self, ctx: &mut PlayerContext) {
        crouch_exit(ctx);
    }

    fn logic_update(&self, ctx: &mut PlayerContext) -> Option<PlayerStateKind> {
        if let Some(next) = grounded_transitions(ctx, false) {
            return Some(next);
        }
        if ctx.input.x == 0 {
            return Some(PlayerStateKind::CrouchIdle);
        }
        if can_stand(ctx) {
            return Some(PlayerStateKind::Move);
        }

        ctx.orientation.check_flip(ctx.input.x);
        let speed = ctx.data.crouch_movement_velocity * ctx.facing().signum();
        ctx.set_velocity_x(speed);
        None
    }
}
