//! Movement domain: system modules for locomotion updates.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod locomotion;

pub(crate) use collisions::{drag_pushables, sync_hit_shape, update_push_pull};
pub(crate) use input::read_input;
pub(crate) use locomotion::{apply_gravity, forward_animation_params, logic_tick, physics_tick};
