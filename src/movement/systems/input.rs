//! Movement domain: input sampling for locomotion.

use bevy::prelude::*;

use crate::movement::MovementInput;

fn axis(keyboard: &ButtonInput<KeyCode>, negative: [KeyCode; 2], positive: [KeyCode; 2]) -> i8 {
    let mut value = 0;
    if keyboard.any_pressed(negative) {
        value -= 1;
    }
    if keyboard.any_pressed(positive) {
        value += 1;
    }
    value
}

pub(crate) fn read_input(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut input: ResMut<MovementInput>,
) {
    // Dead characters get no input until respawn re-enables it
    if !input.enabled {
        return;
    }

    input.x = axis(
        &keyboard,
        [KeyCode::KeyA, KeyCode::ArrowLeft],
        [KeyCode::KeyD, KeyCode::ArrowRight],
    );
    input.y = axis(
        &keyboard,
        [KeyCode::KeyS, KeyCode::ArrowDown],
        [KeyCode::KeyW, KeyCode::ArrowUp],
    );

    // Presses are buffered; the state machine consumes them when it jumps
    if keyboard.any_just_pressed([KeyCode::Space, KeyCode::KeyK]) {
        input.jump_pressed_at = Some(time.elapsed_secs());
    }
    input.jump_held = keyboard.any_pressed([KeyCode::Space, KeyCode::KeyK]);
    input.grab_held = keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::KeyJ]);
    input.run_held = keyboard.pressed(KeyCode::ControlLeft);
    input.aim_held = keyboard.pressed(KeyCode::KeyL);
    input.push_pull_held = keyboard.pressed(KeyCode::KeyE);
    input.fire_just_pressed = keyboard.just_pressed(KeyCode::KeyF);
    input.reload_just_pressed = keyboard.just_pressed(KeyCode::KeyR);
}
