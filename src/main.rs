use avian2d::prelude::*;
use bevy::prelude::*;

use olympia_locomotion::content::ContentPlugin;
use olympia_locomotion::core::CorePlugin;
use olympia_locomotion::movement::MovementPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Olympia Locomotion".to_string(),
                resolution: (1280, 720).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .add_plugins((CorePlugin, ContentPlugin, MovementPlugin))
        .run();
}
