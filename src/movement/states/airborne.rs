//! Jumps and free flight.

use bevy::prelude::*;

use super::{PlayerContext, PlayerState, PlayerStateKind};
use crate::movement::animation::params;
use crate::movement::collision::LedgeApproach;

/// Where a one-shot ability hands control back once it is done.
fn ability_transitions(ctx: &PlayerContext) -> Option<PlayerStateKind> {
    if !ctx.memory.ability_done {
        return None;
    }
    if ctx.snapshot.grounded && ctx.velocity.current().y < ctx.data.land_velocity_threshold {
        Some(PlayerStateKind::Idle)
    } else {
        Some(PlayerStateKind::InAir)
    }
}

fn start_jump(ctx: &mut PlayerContext, velocity: f32) {
    ctx.input.use_jump_input();
    ctx.jump.consume(ctx.now, ctx.data.jump_cooldown);
    ctx.set_velocity_y(velocity);
    ctx.memory.is_jumping = true;
    ctx.memory.ability_done = true;
}

fn write_air_floats(ctx: &mut PlayerContext) {
    let velocity = ctx.velocity.current();
    ctx.animation.set_float(params::Y_VELOCITY, velocity.y);
    ctx.animation.set_float(params::X_VELOCITY, velocity.x.abs());
}

pub(super) struct JumpState;

impl PlayerState for JumpState {
    fn enter(&self, ctx: &mut PlayerContext) {
        start_jump(ctx, ctx.data.jump_velocity);
    }

    fn logic_update(&self, ctx: &mut PlayerContext) -> Option<PlayerStateKind> {
        ability_transitions(ctx)
    }
}

/// Ground jump that adds just enough height to reach a ledge in front.
pub(super) struct LedgeJumpState;

impl LedgeJumpState {
    fn launch_velocity(ctx: &PlayerContext) -> f32 {
        let tuning = &ctx.data.ledge;
        let base = ctx.data.jump_velocity;
        let Some(rise) = ctx.query().ledge_assist_rise(
            tuning.assist_reach,
            tuning.assist_max_height,
            tuning.assist_margin,
        ) else {
            return base;
        };

        let needed = (2.0 * ctx.data.gravity * rise).sqrt();
        if needed > tuning.max_assisted_jump_velocity {
            debug!("Ledge out of reach: needs {:.2}, max {:.2}", needed, tuning.max_assisted_jump_velocity);
            return base;
        }
        needed.max(base)
    }
}

impl PlayerState for LedgeJumpState {
    fn enter(&self, ctx: &mut PlayerContext) {
        let velocity = Self::launch_velocity(ctx);
        if velocity > ctx.data.jump_velocity {
            debug!("Assisted ledge jump: velocity={:.2}", velocity);
        }
        start_jump(ctx, velocity);
    }

    fn logic_update(&self, ctx: &mut PlayerContext) -> Option<PlayerStateKind> {
        ability_transitions(ctx)
    }
}

pub(super) struct WallJumpState;

impl PlayerState for WallJumpState {
    fn enter(&self, ctx: &mut PlayerContext) {
        ctx.input.use_jump_input();
        ctx.jump.reset(ctx.data.amount_of_jumps);
        ctx.jump.consume(ctx.now, ctx.data.jump_cooldown);

        let direction = ctx.memory.wall_jump_direction;
        let angle = ctx.data.wall_jump_angle();
        ctx.set_velocity_angled(ctx.data.wall_jump_velocity, angle, direction.signum());
        ctx.orientation.face(direction);
        ctx.memory.is_jumping = true;
        // Leaving the wall here must not open a second coyote window.
        ctx.memory.wall_side = None;
    }

    fn logic_update(&self, ctx: &mut PlayerContext) -> Option<PlayerStateKind> {
        write_air_floats(ctx);
        if ctx.elapsed() >= ctx.data.wall_jump_time {
            ctx.memory.ability_done = true;
        }
        ability_transitions(ctx)
    }
}

pub(super) struct InAirState;

impl InAirState {
    /// Releasing jump early cuts the remaining rise.
    fn check_jump_multiplier(ctx: &mut PlayerContext) {
        if !ctx.memory.is_jumping {
            return;
        }
        let vy = ctx.velocity.current().y;
        if !ctx.input.jump_held {
            ctx.set_velocity_y(vy * ctx.data.variable_jump_height_multiplier);
            ctx.memory.is_jumping = false;
        } else if vy <= 0.0 {
            ctx.memory.is_jumping = false;
        }
    }
}

impl PlayerState for InAirState {
    fn logic_update(&self, ctx: &mut PlayerContext) -> Option<PlayerStateKind> {
        let now = ctx.now;
        ctx.jump.check_coyote(now);
        ctx.jump.check_wall_coyote(now);
        if ctx.wall_contact_lost && ctx.velocity.current().y <= 0.0 {
            ctx.jump.start_wall_coyote(now, ctx.data.wall_jump_coyote_time);
        }
        Self::check_jump_multiplier(ctx);

        let snapshot = ctx.snapshot;
        let vy = ctx.velocity.current().y;
        let facing = ctx.facing();

        if snapshot.grounded && vy < ctx.data.land_velocity_threshold {
            return Some(PlayerStateKind::Land);
        }

        if snapshot.touching_wall
            && !snapshot.touching_ledge
            && ctx
                .query()
                .check_can_grab_ledge(&ctx.data.ledge)
        {
            ctx.memory.ledge_approach = LedgeApproach::FromSide;
            return Some(PlayerStateKind::LedgeClimb);
        }

        if vy <= 0.0 && ctx.can_auto_grab_ledge() {
            ctx.memory.ledge_approach = LedgeApproach::FromAbove;
            return Some(PlayerStateKind::LedgeClimb);
        }

        let jump = ctx.jump_requested();
        if jump && (snapshot.touching_wall || snapshot.touching_wall_back) {
            ctx.memory.wall_jump_direction = if snapshot.touching_wall {
                facing.opposite()
            } else {
                facing
            };
            return Some(PlayerStateKind::WallJump);
        }
        // Direction was recorded when the wall was left.
        if jump && ctx.jump.in_wall_coyote(now) {
            return Some(PlayerStateKind::WallJump);
        }
        if jump && ctx.jump.can_jump(now) {
            return Some(PlayerStateKind::Jump);
        }

        if snapshot.touching_wall && ctx.input.grab_held {
            return Some(PlayerStateKind::WallGrab);
        }
        if snapshot.touching_wall && ctx.input.x == facing.sign() && vy <= 0.0 {
            return Some(PlayerStateKind::WallSlide);
        }

        ctx.orientation.check_flip(ctx.input.x);
        ctx.set_velocity_x(ctx.data.movement_velocity * f32::from(ctx.input.x));
        write_air_floats(ctx);
        None
    }

    fn physics_update(&self, ctx: &mut PlayerContext) {
        ctx.velocity.gravity_scale = if ctx.velocity.current().y < 0.0 {
            ctx.data.fall_gravity_multiplier
        } else {
            1.0
        };
    }
}
