//! Movement domain: messages exchanged with collaborators.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::movement::animation::{AnimationCue, AnimationValue};
use crate::movement::knockback::KnockbackKind;
use crate::movement::orientation::FacingDirection;
use crate::movement::states::PlayerStateKind;

/// Something the locomotion core did that other systems may care about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocomotionEventKind {
    StateChanged {
        from: Option<PlayerStateKind>,
        to: PlayerStateKind,
    },
    ShotFired {
        facing: FacingDirection,
    },
    ReloadRequested,
    KnockbackStarted {
        kind: KnockbackKind,
        velocity: Vec2,
    },
    KnockbackEnded {
        kind: KnockbackKind,
    },
    LedgeGrabbed {
        corner: Vec2,
    },
}

#[derive(Debug)]
pub struct LocomotionEvent {
    pub entity: Entity,
    pub kind: LocomotionEventKind,
}

impl Message for LocomotionEvent {}

/// Sent by the health collaborator when the player dies
#[derive(Debug)]
pub struct PlayerDiedEvent {
    pub entity: Entity,
}

impl Message for PlayerDiedEvent {}

/// Sent by the health collaborator when the player respawns
#[derive(Debug)]
pub struct PlayerRespawnedEvent {
    pub entity: Entity,
}

impl Message for PlayerRespawnedEvent {}

/// Sent by the animation player at clip-authored timestamps
#[derive(Debug)]
pub struct AnimationCueEvent {
    pub entity: Entity,
    pub cue: AnimationCue,
}

impl Message for AnimationCueEvent {}

/// A parameter write forwarded to the animation player
#[derive(Debug)]
pub struct AnimationParamEvent {
    pub entity: Entity,
    pub name: &'static str,
    pub value: AnimationValue,
}

impl Message for AnimationParamEvent {}
