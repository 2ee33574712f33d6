//! Movement domain: time-boxed velocity override.

use bevy::prelude::*;

use crate::movement::deadline::Deadline;
use crate::movement::orientation::FacingDirection;
use crate::movement::resources::KnockbackTuning;
use crate::movement::velocity::PhysicsVelocity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnockbackKind {
    /// Weapon recoil, applied after a short delay
    Shoot,
    /// Bounce off a wall, applied immediately
    WallCollision,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingKnockback {
    pub kind: KnockbackKind,
    pub velocity: Vec2,
    pub duration: f32,
    pub fires: Deadline,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveKnockback {
    pub kind: KnockbackKind,
    pub velocity: Vec2,
    pub started_at: f32,
    pub ends: Deadline,
}

/// What changed during a [`Knockback::tick`].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct KnockbackTick {
    pub expired: Option<KnockbackKind>,
    pub started: Option<ActiveKnockback>,
}

/// At most one pending and one active knockback per character.
#[derive(Component, Debug, Default, Clone)]
pub struct Knockback {
    pending: Option<PendingKnockback>,
    active: Option<ActiveKnockback>,
}

impl Knockback {
    /// Whether state-driven velocity writes are currently suppressed.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&ActiveKnockback> {
        self.active.as_ref()
    }

    pub fn pending(&self) -> Option<&PendingKnockback> {
        self.pending.as_ref()
    }

    /// Schedule weapon recoil opposite to `facing`, replacing any pending request.
    pub fn apply_shoot_knockback(
        &mut self,
        now: f32,
        facing: FacingDirection,
        tuning: &KnockbackTuning,
    ) {
        self.cancel_pending();
        let [x, y] = tuning.shoot_velocity;
        self.pending = Some(PendingKnockback {
            kind: KnockbackKind::Shoot,
            velocity: Vec2::new(x * facing.opposite().signum(), y),
            duration: tuning.shoot_duration,
            fires: Deadline::after(now, tuning.shoot_delay),
        });
    }

    /// Push away from a wall right now, replacing anything pending or running.
    pub fn apply_wall_collision_knockback(
        &mut self,
        now: f32,
        away_from_wall: FacingDirection,
        tuning: &KnockbackTuning,
        velocity: &mut PhysicsVelocity,
    ) -> ActiveKnockback {
        self.cancel_pending();
        let [x, y] = tuning.wall_velocity;
        self.start(
            KnockbackKind::WallCollision,
            Vec2::new(x * away_from_wall.signum(), y),
            tuning.wall_duration,
            now,
            velocity,
        )
    }

    /// Drop the pending request, if any.
    pub fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!("Cancelled pending {:?} knockback", pending.kind);
        }
    }

    /// Drop both the pending and the running knockback. Safe to call when idle.
    pub fn cancel_knockback(&mut self) {
        self.cancel_pending();
        if let Some(active) = self.active.take() {
            debug!("Cancelled running {:?} knockback", active.kind);
        }
    }

    /// Expire the running knockback, fire a due pending one and re-assert the
    /// velocity of whichever window is still open.
    pub fn tick(&mut self, now: f32, velocity: &mut PhysicsVelocity) -> KnockbackTick {
        let mut tick = KnockbackTick::default();

        if let Some(active) = self.active
            && active.ends.is_due(now)
        {
            self.active = None;
            tick.expired = Some(active.kind);
            debug!("{:?} knockback expired", active.kind);
        }

        if let Some(pending) = self.pending
            && pending.fires.is_due(now)
        {
            self.pending = None;
            // The shove lands at its scheduled time, not at the tick that noticed it.
            let started_at = pending.fires.at().unwrap_or(now);
            tick.started = Some(self.start(
                pending.kind,
                pending.velocity,
                pending.duration,
                started_at,
                velocity,
            ));
            // A short window can already be over by the time a slow tick sees it.
            if let Some(active) = self.active
                && active.ends.is_due(now)
            {
                self.active = None;
                tick.expired = Some(active.kind);
            }
        }

        // Hold V against anything the body picked up since the last tick.
        if let Some(active) = self.active {
            velocity.override_with(active.velocity);
        }

        tick
    }

    fn start(
        &mut self,
        kind: KnockbackKind,
        knockback_velocity: Vec2,
        duration: f32,
        now: f32,
        velocity: &mut PhysicsVelocity,
    ) -> ActiveKnockback {
        let active = ActiveKnockback {
            kind,
            velocity: knockback_velocity,
            started_at: now,
            ends: Deadline::after(now, duration),
        };
        self.active = Some(active);
        velocity.override_with(knockback_velocity);
        debug!(
            "{:?} knockback started: velocity={:?}, duration={}",
            kind, knockback_velocity, duration
        );
        active
    }
}
