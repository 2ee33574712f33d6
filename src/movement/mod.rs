//! Movement domain: player locomotion state machine, probes and physics plumbing.

mod animation;
mod bootstrap;
mod collision;
mod components;
mod deadline;
#[cfg(feature = "dev-tools")]
mod dev;
mod events;
mod jump;
mod knockback;
mod orientation;
mod push_pull;
mod resources;
mod states;
mod systems;
mod velocity;

#[cfg(test)]
mod tests;

pub use animation::{AnimationCue, AnimationParams, AnimationValue, AnimationWrite, params};
pub use collision::{
    CORNER_EPSILON, ColliderShape, CollisionQuery, CollisionSnapshot, CollisionWorld, CornerSolve,
    LedgeApproach, RayHit, SpatialWorld, StaticGeometry, ground_filter,
};
pub use components::{
    GameLayer, Ground, HitShapeEntity, Loadout, Player, PlayerHitShape, Pushable, Wall,
};
pub use deadline::Deadline;
pub use events::{
    AnimationCueEvent, AnimationParamEvent, LocomotionEvent, LocomotionEventKind,
    PlayerDiedEvent, PlayerRespawnedEvent,
};
pub use jump::JumpAbility;
pub use knockback::{ActiveKnockback, Knockback, KnockbackKind, KnockbackTick, PendingKnockback};
pub use orientation::{FacingDirection, Orientation};
pub use push_pull::{PushPull, PushTarget, find_push_target, push_pull_speed};
pub use resources::{
    KnockbackTuning, LedgeTuning, MovementInput, PlayerData, ProbeLayout, PushPullTuning,
};
pub use states::{
    LedgeHang, PlayerContext, PlayerState, PlayerStateKind, StateMachine, StateMemory,
    TickOutcome, TickSignals,
};
pub use velocity::PhysicsVelocity;

use bevy::prelude::*;

use crate::content::load_player_data;
use crate::core::gameplay_active;

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerData>()
            .init_resource::<MovementInput>()
            .add_message::<LocomotionEvent>()
            .add_message::<PlayerDiedEvent>()
            .add_message::<PlayerRespawnedEvent>()
            .add_message::<AnimationCueEvent>()
            .add_message::<AnimationParamEvent>()
            .add_systems(Startup, bootstrap::spawn_player.after(load_player_data))
            .add_systems(
                Update,
                (
                    systems::read_input,
                    systems::update_push_pull,
                    systems::logic_tick,
                    systems::drag_pushables,
                    systems::sync_hit_shape,
                    systems::forward_animation_params,
                )
                    .chain()
                    .run_if(gameplay_active),
            )
            .add_systems(
                FixedUpdate,
                (systems::physics_tick, systems::apply_gravity)
                    .chain()
                    .run_if(gameplay_active),
            );

        #[cfg(feature = "dev-tools")]
        app.add_systems(Startup, dev::spawn_test_room)
            .add_systems(Update, dev::debug_lifecycle_keys.run_if(gameplay_active));
    }
}
