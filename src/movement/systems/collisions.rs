//! Movement domain: push/pull detection and hit shape syncing.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{
    ColliderShape, HitShapeEntity, MovementInput, Orientation, PlayerData, PlayerHitShape,
    PlayerStateKind, PushPull, Pushable, StateMachine, find_push_target, push_pull_speed,
};
use crate::movement::Player;

/// States in which the player may grab a pushable object.
fn can_push_pull(state: Option<PlayerStateKind>) -> bool {
    matches!(state, Some(PlayerStateKind::Idle | PlayerStateKind::Move))
}

pub(crate) fn update_push_pull(
    input: Res<MovementInput>,
    data: Res<PlayerData>,
    mut players: Query<(&Transform, &Orientation, &StateMachine, &mut PushPull), With<Player>>,
    pushables: Query<(Entity, &Transform, &Pushable), Without<Player>>,
) {
    for (transform, orientation, machine, mut push_pull) in &mut players {
        if !input.push_pull_held || !can_push_pull(machine.current()) {
            push_pull.release();
            continue;
        }

        let origin = transform.translation.truncate();
        let candidates = pushables
            .iter()
            .map(|(entity, t, pushable)| (entity, t.translation.truncate(), pushable.weight));

        match find_push_target(origin, orientation.facing(), candidates, &data.push_pull) {
            Some(target) => {
                let speed = push_pull_speed(data.movement_velocity, target.weight, &data.push_pull);
                push_pull.engage(target.id, target.weight, speed);
            }
            None => push_pull.release(),
        }
    }
}

/// The grabbed object follows the player's horizontal motion.
pub(crate) fn drag_pushables(
    players: Query<(&PushPull, &LinearVelocity), With<Player>>,
    mut pushables: Query<&mut LinearVelocity, (With<Pushable>, Without<Player>)>,
) {
    for (push_pull, velocity) in &players {
        if !push_pull.active {
            continue;
        }
        if let Some(target) = push_pull.target
            && let Ok(mut target_velocity) = pushables.get_mut(target)
        {
            target_velocity.x = velocity.x;
        }
    }
}

/// Mirror crouch resizing onto the child collider and sprite.
pub(crate) fn sync_hit_shape(
    players: Query<(&ColliderShape, &HitShapeEntity), (With<Player>, Changed<ColliderShape>)>,
    mut hit_shapes: Query<(&mut Collider, &mut Transform, &mut Sprite), With<PlayerHitShape>>,
) {
    for (shape, link) in &players {
        let Ok((mut collider, mut transform, mut sprite)) = hit_shapes.get_mut(link.0) else {
            warn_once!("Player hit shape {:?} missing; crouch resize not applied", link.0);
            continue;
        };
        *collider = Collider::rectangle(shape.size.x, shape.size.y);
        transform.translation.x = shape.offset.x;
        transform.translation.y = shape.offset.y;
        sprite.custom_size = Some(shape.size);
    }
}
