//! Movement domain: per-character jump budget, cooldown and coyote windows.

use bevy::prelude::*;

use crate::movement::deadline::Deadline;

/// Jump bookkeeping owned by one character.
///
/// The cooldown lives here rather than in a shared static so two characters
/// never block each other's jumps.
#[derive(Component, Debug, Default, Clone)]
pub struct JumpAbility {
    jumps_left: u8,
    cooldown: Deadline,
    coyote: Deadline,
    wall_coyote: Deadline,
}

impl JumpAbility {
    pub fn new(amount_of_jumps: u8) -> Self {
        Self {
            jumps_left: amount_of_jumps,
            ..default()
        }
    }

    pub fn jumps_left(&self) -> u8 {
        self.jumps_left
    }

    pub fn reset(&mut self, amount_of_jumps: u8) {
        self.jumps_left = amount_of_jumps;
    }

    pub fn decrease(&mut self) {
        self.jumps_left = self.jumps_left.saturating_sub(1);
    }

    pub fn cooldown_ready(&self, now: f32) -> bool {
        !self.cooldown.is_pending(now)
    }

    pub fn can_jump(&self, now: f32) -> bool {
        self.jumps_left > 0 && self.cooldown_ready(now)
    }

    /// Spend a jump and start the cooldown.
    pub fn consume(&mut self, now: f32, cooldown: f32) {
        self.decrease();
        self.cooldown.schedule(now, cooldown);
        self.coyote.cancel();
        self.wall_coyote.cancel();
    }

    pub fn start_coyote(&mut self, now: f32, duration: f32) {
        self.coyote.schedule(now, duration);
    }

    /// Once the coyote window closes the ground jump is gone.
    pub fn check_coyote(&mut self, now: f32) {
        if self.coyote.take_due(now) {
            self.decrease();
        }
    }

    pub fn start_wall_coyote(&mut self, now: f32, duration: f32) {
        self.wall_coyote.schedule(now, duration);
    }

    pub fn in_wall_coyote(&self, now: f32) -> bool {
        self.wall_coyote.is_pending(now)
    }

    pub fn check_wall_coyote(&mut self, now: f32) {
        self.wall_coyote.take_due(now);
    }
}
