//! Player locomotion for a 2D platformer: a hierarchical state machine over
//! probe-based collision checks, driven by bevy and avian2d.

pub mod content;
pub mod core;
pub mod movement;
