//! Movement domain: player bootstrap from loaded locomotion data.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{
    AnimationParams, ColliderShape, CollisionSnapshot, GameLayer, HitShapeEntity, JumpAbility,
    Knockback, Loadout, Orientation, PhysicsVelocity, Player, PlayerData, PlayerHitShape,
    PushPull, StateMachine, StateMemory,
};

const SPAWN_POSITION: Vec3 = Vec3::new(0.0, 2.0, 0.0);

/// Spawn the player body and its hit shape child.
///
/// The state machine starts uninitialized and enters Idle on its first logic tick.
pub(crate) fn spawn_player(
    mut commands: Commands,
    data: Res<PlayerData>,
    existing_player: Query<Entity, With<Player>>,
) {
    // Don't spawn if player already exists
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let size = Vec2::new(data.collider_width, data.stand_collider_height);
    let shape = ColliderShape::new(size);

    let hit_shape = commands
        .spawn((
            PlayerHitShape,
            Collider::rectangle(size.x, size.y),
            Transform::from_translation(shape.offset.extend(0.0)),
            Sprite {
                color: Color::srgb(0.9, 0.9, 0.9),
                custom_size: Some(size),
                ..default()
            },
            CollisionLayers::new(
                GameLayer::Player,
                [GameLayer::Ground, GameLayer::Wall, GameLayer::Pushable],
            ),
        ))
        .id();

    let player = commands
        .spawn((
            // Identity & Locomotion
            (
                Player,
                StateMachine::default(),
                StateMemory::default(),
                Orientation::default(),
                JumpAbility::new(data.amount_of_jumps),
                Knockback::default(),
                PhysicsVelocity::default(),
                shape,
                CollisionSnapshot::default(),
                AnimationParams::default(),
                PushPull::default(),
                Loadout::default(),
                HitShapeEntity(hit_shape),
            ),
            Transform::from_translation(SPAWN_POSITION),
            Visibility::default(),
            // Physics
            (
                RigidBody::Dynamic,
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::default(),
                GravityScale(0.0), // We handle gravity manually for more control
                Friction::new(0.0),
            ),
        ))
        .id();
    commands.entity(player).add_child(hit_shape);

    info!(
        "Spawning player: size={:?}, jumps={}, move_speed={}",
        size, data.amount_of_jumps, data.movement_velocity
    );
}
