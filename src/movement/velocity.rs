//! Movement domain: the single writable velocity of the character.

use bevy::prelude::*;

use crate::movement::knockback::Knockback;

/// Authoritative character velocity.
///
/// States write through the `set_velocity_*` methods, which consult the
/// [`Knockback`] gate and silently drop the write while a knockback window is
/// active. Only [`PhysicsVelocity::override_with`] bypasses the gate, and only
/// knockback calls it.
#[derive(Component, Debug, Clone)]
pub struct PhysicsVelocity {
    current: Vec2,
    /// Multiplier on manual gravity, set by the active state
    pub gravity_scale: f32,
    dropped_writes: u32,
}

impl Default for PhysicsVelocity {
    fn default() -> Self {
        Self {
            current: Vec2::ZERO,
            gravity_scale: 1.0,
            dropped_writes: 0,
        }
    }
}

impl PhysicsVelocity {
    pub fn current(&self) -> Vec2 {
        self.current
    }

    /// Writes refused because a knockback window was open.
    pub fn dropped_writes(&self) -> u32 {
        self.dropped_writes
    }

    /// Mirror the integrator's velocity at the start of a tick.
    pub fn sync_from_body(&mut self, body_velocity: Vec2) {
        self.current = body_velocity;
    }

    fn gate(&mut self, gate: &Knockback) -> bool {
        if gate.is_active() {
            self.dropped_writes += 1;
            trace!("Velocity write dropped: knockback active");
            false
        } else {
            true
        }
    }

    pub fn set_velocity_x(&mut self, x: f32, gate: &Knockback) -> bool {
        if !self.gate(gate) {
            return false;
        }
        self.current.x = x;
        true
    }

    pub fn set_velocity_y(&mut self, y: f32, gate: &Knockback) -> bool {
        if !self.gate(gate) {
            return false;
        }
        self.current.y = y;
        true
    }

    pub fn set_velocity_zero(&mut self, gate: &Knockback) -> bool {
        if !self.gate(gate) {
            return false;
        }
        self.current = Vec2::ZERO;
        true
    }

    /// Launch at `speed` along `angle`, mirrored horizontally by `direction`.
    pub fn set_velocity_angled(
        &mut self,
        speed: f32,
        angle: Vec2,
        direction: f32,
        gate: &Knockback,
    ) -> bool {
        if !self.gate(gate) {
            return false;
        }
        let angle = angle.normalize_or_zero();
        self.current = Vec2::new(angle.x * speed * direction, angle.y * speed);
        true
    }

    pub(crate) fn override_with(&mut self, velocity: Vec2) {
        self.current = velocity;
    }
}
