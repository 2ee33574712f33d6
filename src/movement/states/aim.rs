use super::grounded::{grounded_enter, grounded_exit, grounded_transitions};
use super::{PlayerContext, PlayerState, PlayerStateKind};
use crate::movement::animation::params;
use crate::movement::events::LocomotionEventKind;

/// Standing still with a weapon raised. Firing kicks the character back.
pub(super) struct AimState;

impl PlayerState for AimState {
    fn enter(&self, ctx: &mut PlayerContext) {
        grounded_enter(ctx);
        ctx.set_velocity_x(0.0);
    }

    fn exit(&self, ctx: &mut PlayerContext) {
        grounded_exit(ctx);
        ctx.memory.fire_lock.cancel();
    }

    fn logic_update(&self, ctx: &mut PlayerContext) -> Option<PlayerStateKind> {
        if let Some(next) = grounded_transitions(ctx, true) {
            return Some(next);
        }
        if !ctx.input.aim_held || !ctx.loadout.has_active_weapon() {
            return Some(PlayerStateKind::Idle);
        }

        ctx.orientation.check_flip(ctx.input.x);
        ctx.set_velocity_x(0.0);

        let now = ctx.now;
        if ctx.input.fire_just_pressed && !ctx.memory.fire_lock.is_pending(now) {
            ctx.memory.fire_lock.schedule(now, ctx.data.fire_cooldown);
            let facing = ctx.facing();
            ctx.knockback
                .apply_shoot_knockback(now, facing, &ctx.data.knockback);
            ctx.animation.trigger(params::FIRE);
            ctx.emit(LocomotionEventKind::ShotFired { facing });
        }
        if ctx.input.reload_just_pressed {
            ctx.animation.trigger(params::RELOAD);
            ctx.emit(LocomotionEventKind::ReloadRequested);
        }
        None
    }

    /// The shot clip ending frees the trigger early.
    fn animation_finish_trigger(&self, ctx: &mut PlayerContext) {
        ctx.memory.animation_finished = true;
        ctx.memory.fire_lock.cancel();
    }
}
