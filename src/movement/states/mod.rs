//! Movement domain: the player locomotion state machine.
//!
//! Each state is a zero-sized strategy implementing [`PlayerState`]. States
//! hold no data; anything a state needs to remember between ticks lives in
//! the character's [`StateMemory`] component. Shared "on the ground" and
//! "against a wall" behavior is a plain helper function each concrete state
//! calls first.

mod aim;
mod airborne;
mod context;
mod crouch;
mod death;
mod grounded;
mod ledge;
mod machine;
mod wall;

pub use context::{PlayerContext, TickOutcome};
pub use machine::{StateMachine, TickSignals};

use bevy::prelude::*;

use crate::movement::animation::params;
use crate::movement::collision::LedgeApproach;
use crate::movement::deadline::Deadline;
use crate::movement::orientation::FacingDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerStateKind {
    Idle,
    Move,
    CrouchIdle,
    CrouchMove,
    Land,
    Jump,
    LedgeJump,
    InAir,
    WallJump,
    WallSlide,
    WallGrab,
    WallClimb,
    LedgeClimb,
    Aim,
    Death,
}

impl PlayerStateKind {
    pub const ALL: [PlayerStateKind; 15] = [
        PlayerStateKind::Idle,
        PlayerStateKind::Move,
        PlayerStateKind::CrouchIdle,
        PlayerStateKind::CrouchMove,
        PlayerStateKind::Land,
        PlayerStateKind::Jump,
        PlayerStateKind::LedgeJump,
        PlayerStateKind::InAir,
        PlayerStateKind::WallJump,
        PlayerStateKind::WallSlide,
        PlayerStateKind::WallGrab,
        PlayerStateKind::WallClimb,
        PlayerStateKind::LedgeClimb,
        PlayerStateKind::Aim,
        PlayerStateKind::Death,
    ];

    pub fn behavior(self) -> &'static dyn PlayerState {
        match self {
            PlayerStateKind::Idle => &grounded::IdleState,
            PlayerStateKind::Move => &grounded::MoveState,
            PlayerStateKind::Land => &grounded::LandState,
            PlayerStateKind::CrouchIdle => &crouch::CrouchIdleState,
            PlayerStateKind::CrouchMove => &crouch::CrouchMoveState,
            PlayerStateKind::Jump => &airborne::JumpState,
            PlayerStateKind::LedgeJump => &airborne::LedgeJumpState,
            PlayerStateKind::InAir => &airborne::InAirState,
            PlayerStateKind::WallJump => &airborne::WallJumpState,
            PlayerStateKind::WallSlide => &wall::WallSlideState,
            PlayerStateKind::WallGrab => &wall::WallGrabState,
            PlayerStateKind::WallClimb => &wall::WallClimbState,
            PlayerStateKind::LedgeClimb => &ledge::LedgeClimbState,
            PlayerStateKind::Aim => &aim::AimState,
            PlayerStateKind::Death => &death::DeathState,
        }
    }

    /// Bool parameter raised while this state is current.
    pub fn animation_flag(self) -> &'static str {
        match self {
            PlayerStateKind::Idle => params::IDLE,
            PlayerStateKind::Move => params::MOVE,
            PlayerStateKind::CrouchIdle => params::CROUCH_IDLE,
            PlayerStateKind::CrouchMove => params::CROUCH_MOVE,
            PlayerStateKind::Land => params::LAND,
            PlayerStateKind::Jump
            | PlayerStateKind::LedgeJump
            | PlayerStateKind::InAir
            | PlayerStateKind::WallJump => params::IN_AIR,
            PlayerStateKind::WallSlide => params::WALL_SLIDE,
            PlayerStateKind::WallGrab => params::WALL_GRAB,
            PlayerStateKind::WallClimb => params::WALL_CLIMB,
            PlayerStateKind::LedgeClimb => params::LEDGE_CLIMB_STATE,
            PlayerStateKind::Aim => params::AIM,
            PlayerStateKind::Death => params::DEAD,
        }
    }

    pub fn is_grounded_state(self) -> bool {
        matches!(
            self,
            PlayerStateKind::Idle
                | PlayerStateKind::Move
                | PlayerStateKind::CrouchIdle
                | PlayerStateKind::CrouchMove
                | PlayerStateKind::Land
                | PlayerStateKind::Aim
        )
    }

    /// Reset per-visit memory, raise the animation flag, then run the state's own entry.
    pub fn enter(self, ctx: &mut PlayerContext) {
        ctx.memory.begin(ctx.now);
        ctx.animation.set_bool(self.animation_flag(), true);
        self.behavior().enter(ctx);
    }

    /// Run the state's own exit, then restore gravity and clear the animation flag.
    pub fn exit(self, ctx: &mut PlayerContext) {
        self.behavior().exit(ctx);
        ctx.velocity.gravity_scale = 1.0;
        ctx.animation.set_bool(self.animation_flag(), false);
    }
}

/// Behavior of one locomotion state.
///
/// `logic_update` returns the state to switch to; the machine performs the
/// switch, so nothing can run after a transition has been requested.
pub trait PlayerState: Sync {
    fn enter(&self, _ctx: &mut PlayerContext) {}

    fn exit(&self, _ctx: &mut PlayerContext) {}

    fn do_checks(&self, ctx: &mut PlayerContext) {
        ctx.do_checks();
    }

    fn logic_update(&self, ctx: &mut PlayerContext) -> Option<PlayerStateKind>;

    fn physics_update(&self, _ctx: &mut PlayerContext) {}

    fn animation_trigger(&self, ctx: &mut PlayerContext) {
        ctx.memory.animation_triggered = true;
    }

    fn animation_finish_trigger(&self, ctx: &mut PlayerContext) {
        ctx.memory.animation_finished = true;
    }
}

/// A ledge being hung from or climbed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgeHang {
    pub corner: Vec2,
    pub start: Vec2,
    pub stop: Vec2,
    pub climbing: bool,
    pub climb_started: f32,
    /// Whether a standing collider fits at the stop position
    pub head_room: bool,
}

/// Numbers the states need between ticks, owned by the character.
#[derive(Component, Debug, Default, Clone)]
pub struct StateMemory {
    pub start_time: f32,
    pub animation_triggered: bool,
    pub animation_finished: bool,
    pub ability_done: bool,
    /// Upward velocity still owed to a held jump button
    pub is_jumping: bool,
    /// Side of the last wall contact, kept across states for wall-jump coyote
    pub wall_side: Option<FacingDirection>,
    pub wall_jump_direction: FacingDirection,
    pub hold_position: Option<Vec2>,
    /// Which corner solve LedgeClimb should run on entry
    pub ledge_approach: LedgeApproach,
    pub ledge: Option<LedgeHang>,
    /// Pending while a shot is still playing out
    pub fire_lock: Deadline,
}

impl StateMemory {
    fn begin(&mut self, now: f32) {
        self.start_time = now;
        self.animation_triggered = false;
        self.animation_finished = false;
        self.ability_done = false;
    }
}
