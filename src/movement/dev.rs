//! Movement domain: debug-only test room and lifecycle keys.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::movement::{
    GameLayer, Ground, Loadout, Player, PlayerDiedEvent, PlayerRespawnedEvent, Pushable, Wall,
};

fn spawn_block(
    commands: &mut Commands,
    center: Vec2,
    size: Vec2,
    color: Color,
    layers: CollisionLayers,
) -> Entity {
    commands
        .spawn((
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(center.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            layers,
        ))
        .id()
}

/// Floor, two tall walls for wall jumps, a low ledge, a floating platform,
/// a crawl space and a crate to push.
pub(crate) fn spawn_test_room(mut commands: Commands) {
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);

    let ground_layers = CollisionLayers::new(
        GameLayer::Ground,
        [GameLayer::Player, GameLayer::Pushable],
    );
    let wall_layers = CollisionLayers::new(
        GameLayer::Wall,
        [GameLayer::Player, GameLayer::Pushable],
    );

    // Ground
    let floor = spawn_block(
        &mut commands,
        Vec2::new(0.0, -0.5),
        Vec2::new(40.0, 1.0),
        ground_color,
        ground_layers,
    );
    commands.entity(floor).insert(Ground);

    // Outer walls
    for x in [-20.5, 20.5] {
        let wall = spawn_block(
            &mut commands,
            Vec2::new(x, 6.0),
            Vec2::new(1.0, 12.0),
            wall_color,
            wall_layers,
        );
        commands.entity(wall).insert(Wall);
    }

    // Ledge block, climbable from either side
    let ledge = spawn_block(
        &mut commands,
        Vec2::new(8.0, 1.0),
        Vec2::new(4.0, 2.0),
        wall_color,
        wall_layers,
    );
    commands.entity(ledge).insert(Wall);

    // Floating platform
    let platform = spawn_block(
        &mut commands,
        Vec2::new(-8.0, 3.5),
        Vec2::new(4.0, 0.4),
        platform_color,
        ground_layers,
    );
    commands.entity(platform).insert(Ground);

    // Low ceiling: crouch under it, standing up is blocked
    let ceiling = spawn_block(
        &mut commands,
        Vec2::new(-14.0, 1.6),
        Vec2::new(4.0, 0.4),
        platform_color,
        ground_layers,
    );
    commands.entity(ceiling).insert(Ground);

    // Crate for push/pull
    commands.spawn((
        Pushable { weight: 2.0 },
        Sprite {
            color: Color::srgb(0.6, 0.45, 0.25),
            custom_size: Some(Vec2::splat(1.0)),
            ..default()
        },
        Transform::from_xyz(3.0, 0.5, 0.0),
        RigidBody::Dynamic,
        LockedAxes::ROTATION_LOCKED,
        Collider::rectangle(1.0, 1.0),
        CollisionLayers::new(
            GameLayer::Pushable,
            [GameLayer::Ground, GameLayer::Wall, GameLayer::Player],
        ),
    ));
}

/// Backspace kills, Enter respawns, G toggles a weapon for aiming.
pub(crate) fn debug_lifecycle_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut players: Query<(Entity, &mut Loadout), With<Player>>,
    mut died: MessageWriter<PlayerDiedEvent>,
    mut respawned: MessageWriter<PlayerRespawnedEvent>,
) {
    for (entity, mut loadout) in &mut players {
        if keyboard.just_pressed(KeyCode::Backspace) {
            info!("Debug: killing player");
            died.write(PlayerDiedEvent { entity });
        }
        if keyboard.just_pressed(KeyCode::Enter) {
            info!("Debug: respawning player");
            respawned.write(PlayerRespawnedEvent { entity });
        }
        if keyboard.just_pressed(KeyCode::KeyG) {
            loadout.active_weapon = match loadout.active_weapon {
                Some(_) => None,
                None => Some("debug_pistol".to_string()),
            };
            info!("Debug: active weapon = {:?}", loadout.active_weapon);
        }
    }
}
