//! Movement domain: animation parameter writes for an external animation player.
//!
//! The locomotion core never plays clips. It records parameter writes keyed
//! by name; a system forwards them as messages, and the animation player
//! answers with trigger / finish cues at clip-authored timestamps.

use bevy::prelude::*;
use std::collections::HashMap;

/// Parameter names written by the locomotion states.
pub mod params {
    pub const IDLE: &str = "idle";
    pub const MOVE: &str = "move";
    pub const CROUCH_IDLE: &str = "crouch-idle";
    pub const CROUCH_MOVE: &str = "crouch-move";
    pub const LAND: &str = "land";
    pub const IN_AIR: &str = "in-air";
    pub const WALL_SLIDE: &str = "wall-slide";
    pub const WALL_GRAB: &str = "wall-grab";
    pub const WALL_CLIMB: &str = "wall-climb";
    pub const LEDGE_CLIMB_STATE: &str = "ledge-climb-state";
    pub const CLIMB_LEDGE: &str = "climb-ledge";
    pub const AIM: &str = "aim";
    pub const DEAD: &str = "dead";
    pub const GROUNDED: &str = "grounded";
    pub const FIRE: &str = "fire";
    pub const RELOAD: &str = "reload";
    pub const X_VELOCITY: &str = "x-velocity";
    pub const Y_VELOCITY: &str = "y-velocity";
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationValue {
    Bool(bool),
    Float(f32),
    Trigger,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationWrite {
    pub name: &'static str,
    pub value: AnimationValue,
}

/// Callbacks from the animation player at clip-authored timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationCue {
    Trigger,
    Finish,
}

/// Current parameter values plus the ordered writes not yet forwarded.
#[derive(Component, Debug, Default, Clone)]
pub struct AnimationParams {
    values: HashMap<&'static str, AnimationValue>,
    pending: Vec<AnimationWrite>,
}

impl AnimationParams {
    pub fn set_bool(&mut self, name: &'static str, value: bool) {
        self.write(name, AnimationValue::Bool(value));
    }

    /// Floats are only recorded when they change.
    pub fn set_float(&mut self, name: &'static str, value: f32) {
        if self.values.get(name) == Some(&AnimationValue::Float(value)) {
            return;
        }
        self.write(name, AnimationValue::Float(value));
    }

    pub fn trigger(&mut self, name: &'static str) {
        self.pending.push(AnimationWrite {
            name,
            value: AnimationValue::Trigger,
        });
    }

    pub fn get_bool(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(AnimationValue::Bool(true)))
    }

    pub fn get_float(&self, name: &str) -> Option<f32> {
        match self.values.get(name) {
            Some(AnimationValue::Float(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn pending(&self) -> &[AnimationWrite] {
        &self.pending
    }

    /// Take the writes recorded since the last drain, in order.
    pub fn drain(&mut self) -> Vec<AnimationWrite> {
        std::mem::take(&mut self.pending)
    }

    fn write(&mut self, name: &'static str, value: AnimationValue) {
        self.values.insert(name, value);
        self.pending.push(AnimationWrite { name, value });
    }
}
