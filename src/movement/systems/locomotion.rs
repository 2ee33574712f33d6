//! Movement domain: systems driving the locomotion state machine.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use std::collections::HashMap;

use crate::movement::{
    AnimationCueEvent, AnimationParamEvent, AnimationParams, ColliderShape, CollisionSnapshot,
    JumpAbility, Knockback, Loadout, LocomotionEvent, MovementInput, Orientation,
    PhysicsVelocity, Player, PlayerContext, PlayerData, PlayerDiedEvent, PlayerRespawnedEvent,
    PushPull, SpatialWorld, StateMachine, StateMemory, TickSignals,
};

type LocomotionParts<'a> = (
    &'a mut Orientation,
    &'a mut PhysicsVelocity,
    &'a mut Knockback,
    &'a mut ColliderShape,
    &'a mut JumpAbility,
    &'a mut StateMemory,
    &'a mut AnimationParams,
);

/// Route lifecycle messages and animation cues to the character they address.
fn collect_signals(
    cues: &mut MessageReader<AnimationCueEvent>,
    died: &mut MessageReader<PlayerDiedEvent>,
    respawned: &mut MessageReader<PlayerRespawnedEvent>,
) -> HashMap<Entity, TickSignals> {
    let mut signals: HashMap<Entity, TickSignals> = HashMap::new();
    for event in cues.read() {
        signals.entry(event.entity).or_default().cues.push(event.cue);
    }
    for event in died.read() {
        signals.entry(event.entity).or_default().died = true;
    }
    for event in respawned.read() {
        signals.entry(event.entity).or_default().respawned = true;
    }
    signals
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn logic_tick(
    time: Res<Time>,
    data: Res<PlayerData>,
    spatial_query: SpatialQuery,
    mut input: ResMut<MovementInput>,
    mut cues: MessageReader<AnimationCueEvent>,
    mut died: MessageReader<PlayerDiedEvent>,
    mut respawned: MessageReader<PlayerRespawnedEvent>,
    mut events: MessageWriter<LocomotionEvent>,
    mut players: Query<
        (
            Entity,
            &mut Transform,
            &mut LinearVelocity,
            &mut StateMachine,
            LocomotionParts,
            (&PushPull, &Loadout, &mut CollisionSnapshot),
        ),
        With<Player>,
    >,
) {
    let now = time.elapsed_secs();
    let world = SpatialWorld::new(&spatial_query);
    let mut signals = collect_signals(&mut cues, &mut died, &mut respawned);

    for (
        entity,
        mut transform,
        mut body_velocity,
        mut machine,
        (
            mut orientation,
            mut velocity,
            mut knockback,
            mut shape,
            mut jump,
            mut memory,
            mut animation,
        ),
        (push_pull, loadout, mut snapshot),
    ) in &mut players
    {
        velocity.sync_from_body(body_velocity.0);

        let mut ctx = PlayerContext::new(
            now,
            &data,
            &world,
            &mut input,
            transform.translation.truncate(),
            &mut orientation,
            &mut velocity,
            &mut knockback,
            &mut shape,
            &mut jump,
            &mut memory,
            &mut animation,
            push_pull,
            loadout,
        );
        let tick_signals = signals.remove(&entity).unwrap_or_default();
        machine.tick(&mut ctx, &tick_signals);
        let outcome = ctx.finish();

        body_velocity.0 = velocity.current();
        if let Some(position) = outcome.snap_to {
            transform.translation.x = position.x;
            transform.translation.y = position.y;
        }
        *snapshot = outcome.snapshot;
        for kind in outcome.events {
            events.write(LocomotionEvent { entity, kind });
        }
    }
}

/// Fixed-step half of the state: gravity scaling and other physics-rate work.
pub(crate) fn physics_tick(
    time: Res<Time>,
    data: Res<PlayerData>,
    spatial_query: SpatialQuery,
    mut input: ResMut<MovementInput>,
    mut players: Query<
        (
            &Transform,
            &LinearVelocity,
            &mut StateMachine,
            LocomotionParts,
            (&PushPull, &Loadout),
        ),
        With<Player>,
    >,
) {
    let now = time.elapsed_secs();
    let world = SpatialWorld::new(&spatial_query);

    for (
        transform,
        body_velocity,
        mut machine,
        (
            mut orientation,
            mut velocity,
            mut knockback,
            mut shape,
            mut jump,
            mut memory,
            mut animation,
        ),
        (push_pull, loadout),
    ) in &mut players
    {
        velocity.sync_from_body(body_velocity.0);
        let mut ctx = PlayerContext::new(
            now,
            &data,
            &world,
            &mut input,
            transform.translation.truncate(),
            &mut orientation,
            &mut velocity,
            &mut knockback,
            &mut shape,
            &mut jump,
            &mut memory,
            &mut animation,
            push_pull,
            loadout,
        );
        machine.physics_update(&mut ctx);
    }
}

pub(crate) fn apply_gravity(
    time: Res<Time>,
    data: Res<PlayerData>,
    mut query: Query<(&PhysicsVelocity, &Knockback, &mut LinearVelocity), With<Player>>,
) {
    let dt = time.delta_secs();

    for (velocity, knockback, mut body_velocity) in &mut query {
        // Knockback owns the velocity until its window closes
        if knockback.is_active() || velocity.gravity_scale == 0.0 {
            continue;
        }
        let vy = body_velocity.y - data.gravity * velocity.gravity_scale * dt;
        body_velocity.y = vy.max(-data.max_fall_speed);
    }
}

pub(crate) fn forward_animation_params(
    mut query: Query<(Entity, &mut AnimationParams), With<Player>>,
    mut writer: MessageWriter<AnimationParamEvent>,
) {
    for (entity, mut params) in &mut query {
        if params.pending().is_empty() {
            continue;
        }
        for write in params.drain() {
            writer.write(AnimationParamEvent {
                entity,
                name: write.name,
                value: write.value,
            });
        }
    }
}
