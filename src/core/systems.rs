//! Core domain: camera setup and debug pause.

use bevy::prelude::*;

#[cfg(feature = "dev-tools")]
use crate::core::GameplayPaused;

/// World units are roughly one tile; zoom the 2D camera in to match.
const CAMERA_SCALE: f32 = 0.02;

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Transform::from_xyz(0.0, 4.0, 0.0).with_scale(Vec3::splat(CAMERA_SCALE)),
    ));
}

#[cfg(feature = "dev-tools")]
pub(crate) fn toggle_debug_pause(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut paused: ResMut<GameplayPaused>,
) {
    if keyboard.just_pressed(KeyCode::KeyP) {
        let now_paused = paused.toggle("debug");
        info!("Debug pause: {}", now_paused);
    }
}
