//! Everything a state may read or write during one tick.

use bevy::prelude::*;

use crate::movement::animation::AnimationParams;
use crate::movement::collision::{ColliderShape, CollisionQuery, CollisionSnapshot, CollisionWorld};
use crate::movement::components::Loadout;
use crate::movement::events::LocomotionEventKind;
use crate::movement::jump::JumpAbility;
use crate::movement::knockback::{Knockback, KnockbackKind};
use crate::movement::orientation::{FacingDirection, Orientation};
use crate::movement::push_pull::PushPull;
use crate::movement::resources::{MovementInput, PlayerData};
use crate::movement::states::StateMemory;
use crate::movement::velocity::PhysicsVelocity;

/// Borrowed view of one character for the duration of a tick.
pub struct PlayerContext<'a> {
    pub now: f32,
    pub data: &'a PlayerData,
    pub world: &'a dyn CollisionWorld,
    pub input: &'a mut MovementInput,
    /// Body position; updated in place when a state snaps the body
    pub position: Vec2,
    pub orientation: &'a mut Orientation,
    pub velocity: &'a mut PhysicsVelocity,
    pub knockback: &'a mut Knockback,
    pub shape: &'a mut ColliderShape,
    pub jump: &'a mut JumpAbility,
    pub memory: &'a mut StateMemory,
    pub animation: &'a mut AnimationParams,
    pub push_pull: &'a PushPull,
    pub loadout: &'a Loadout,
    pub snapshot: CollisionSnapshot,
    /// Set by `do_checks` when wall contact was lost since the previous check
    pub wall_contact_lost: bool,
    snap: Option<Vec2>,
    events: Vec<LocomotionEventKind>,
}

/// What a tick asks the outside world to apply.
#[derive(Debug, Default)]
pub struct TickOutcome {
    pub snap_to: Option<Vec2>,
    pub snapshot: CollisionSnapshot,
    pub events: Vec<LocomotionEventKind>,
}

impl<'a> PlayerContext<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        now: f32,
        data: &'a PlayerData,
        world: &'a dyn CollisionWorld,
        input: &'a mut MovementInput,
        position: Vec2,
        orientation: &'a mut Orientation,
        velocity: &'a mut PhysicsVelocity,
        knockback: &'a mut Knockback,
        shape: &'a mut ColliderShape,
        jump: &'a mut JumpAbility,
        memory: &'a mut StateMemory,
        animation: &'a mut AnimationParams,
        push_pull: &'a PushPull,
        loadout: &'a Loadout,
    ) -> Self {
        Self {
            now,
            data,
            world,
            input,
            position,
            orientation,
            velocity,
            knockback,
            shape,
            jump,
            memory,
            animation,
            push_pull,
            loadout,
            snapshot: CollisionSnapshot::default(),
            wall_contact_lost: false,
            snap: None,
            events: Vec::new(),
        }
    }

    pub fn query(&self) -> CollisionQuery<'_> {
        CollisionQuery::new(
            self.world,
            self.position,
            self.orientation.facing(),
            &*self.shape,
            &self.data.probes,
        )
    }

    pub fn refresh_snapshot(&mut self) {
        self.snapshot = self.query().snapshot();
    }

    /// Refresh the collision snapshot and wall-contact bookkeeping.
    pub fn do_checks(&mut self) {
        self.refresh_snapshot();

        let facing = self.facing();
        let wall_side = if self.snapshot.touching_wall {
            Some(facing)
        } else if self.snapshot.touching_wall_back {
            Some(facing.opposite())
        } else {
            None
        };
        self.wall_contact_lost = false;
        if let Some(lost) = self.memory.wall_side
            && wall_side.is_none()
        {
            // A coyote wall jump pushes away from the wall just left.
            self.wall_contact_lost = true;
            self.memory.wall_jump_direction = lost.opposite();
        }
        self.memory.wall_side = wall_side;
    }

    pub fn facing(&self) -> FacingDirection {
        self.orientation.facing()
    }

    /// Seconds since the current state was entered.
    pub fn elapsed(&self) -> f32 {
        self.now - self.memory.start_time
    }

    pub fn jump_requested(&self) -> bool {
        self.input
            .jump_requested(self.now, self.data.jump_input_hold_time)
    }

    pub fn can_auto_grab_ledge(&self) -> bool {
        self.data.ledge.auto_ledge_grab
            && self
                .query()
                .check_can_grab_ledge_from_above(&self.data.ledge)
    }

    pub fn set_velocity_x(&mut self, x: f32) -> bool {
        self.velocity.set_velocity_x(x, &*self.knockback)
    }

    pub fn set_velocity_y(&mut self, y: f32) -> bool {
        self.velocity.set_velocity_y(y, &*self.knockback)
    }

    pub fn set_velocity_zero(&mut self) -> bool {
        self.velocity.set_velocity_zero(&*self.knockback)
    }

    pub fn set_velocity_angled(&mut self, speed: f32, angle: Vec2, direction: f32) -> bool {
        self.velocity
            .set_velocity_angled(speed, angle, direction, &*self.knockback)
    }

    pub fn set_collider_height(&mut self, height: f32) {
        if self.shape.set_collider_height(height) {
            debug!(
                "Collider height -> {}, offset={:?}",
                height, self.shape.offset
            );
        }
    }

    /// Move the body to `position` and ask the integrator to follow.
    pub fn snap_to(&mut self, position: Vec2) {
        self.position = position;
        self.snap = Some(position);
    }

    pub fn emit(&mut self, event: LocomotionEventKind) {
        self.events.push(event);
    }

    /// Expire or fire knockback deadlines; recoil that drives the body into a
    /// wall turns into a bounce off that wall.
    pub fn tick_knockback(&mut self) {
        let tick = self.knockback.tick(self.now, self.velocity);
        if let Some(kind) = tick.expired {
            self.emit(LocomotionEventKind::KnockbackEnded { kind });
        }
        if let Some(active) = tick.started {
            self.emit(LocomotionEventKind::KnockbackStarted {
                kind: active.kind,
                velocity: active.velocity,
            });
        }

        let Some(active) = self.knockback.active().copied() else {
            return;
        };
        if active.kind != KnockbackKind::Shoot {
            return;
        }
        let Some(pushed_toward) = FacingDirection::from_velocity(active.velocity.x) else {
            return;
        };
        if self.query().check_wall_in_direction(pushed_toward) {
            self.emit(LocomotionEventKind::KnockbackEnded { kind: active.kind });
            let bounce = self.knockback.apply_wall_collision_knockback(
                self.now,
                pushed_toward.opposite(),
                &self.data.knockback,
                self.velocity,
            );
            self.emit(LocomotionEventKind::KnockbackStarted {
                kind: bounce.kind,
                velocity: bounce.velocity,
            });
        }
    }

    pub fn finish(self) -> TickOutcome {
        TickOutcome {
            snap_to: self.snap,
            snapshot: self.snapshot,
            events: self.events,
        }
    }
}
