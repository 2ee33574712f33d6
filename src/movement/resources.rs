//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// All locomotion tuning for the player character.
///
/// Loaded from `assets/data/player_data.ron` at startup; every field has a
/// default so partial files are accepted.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerData {
    pub movement_velocity: f32,
    pub run_velocity: f32,
    pub crouch_movement_velocity: f32,
    pub jump_velocity: f32,
    pub amount_of_jumps: u8,
    /// Minimum time between two jumps of the same character
    pub jump_cooldown: f32,
    /// How long a jump press stays buffered
    pub jump_input_hold_time: f32,
    pub coyote_time: f32,
    pub wall_jump_coyote_time: f32,
    /// Applied to upward velocity when jump is released early
    pub variable_jump_height_multiplier: f32,
    pub gravity: f32,
    pub fall_gravity_multiplier: f32,
    pub max_fall_speed: f32,
    /// InAir lands once grounded and vertical velocity is below this value
    pub land_velocity_threshold: f32,
    /// Fallback landing time when no animation finish cue arrives
    pub land_duration: f32,
    pub wall_slide_velocity: f32,
    pub wall_climb_velocity: f32,
    pub wall_jump_velocity: f32,
    pub wall_jump_time: f32,
    pub wall_jump_angle: [f32; 2],
    pub collider_width: f32,
    pub stand_collider_height: f32,
    pub crouch_collider_height: f32,
    /// Fallback fire interval when no animation finish cue arrives
    pub fire_cooldown: f32,
    pub probes: ProbeLayout,
    pub ledge: LedgeTuning,
    pub knockback: KnockbackTuning,
    pub push_pull: PushPullTuning,
}

impl Default for PlayerData {
    fn default() -> Self {
        Self {
            movement_velocity: 10.0,
            run_velocity: 14.0,
            crouch_movement_velocity: 5.0,
            jump_velocity: 15.0,
            amount_of_jumps: 1,
            jump_cooldown: 0.2,
            jump_input_hold_time: 0.2,
            coyote_time: 0.2,
            wall_jump_coyote_time: 0.2,
            variable_jump_height_multiplier: 0.5,
            gravity: 45.0,
            fall_gravity_multiplier: 1.5,
            max_fall_speed: 25.0,
            land_velocity_threshold: 0.01,
            land_duration: 0.15,
            wall_slide_velocity: 3.0,
            wall_climb_velocity: 3.0,
            wall_jump_velocity: 20.0,
            wall_jump_time: 0.4,
            wall_jump_angle: [1.0, 2.0],
            collider_width: 0.8,
            stand_collider_height: 1.6,
            crouch_collider_height: 0.8,
            fire_cooldown: 0.25,
            probes: ProbeLayout::default(),
            ledge: LedgeTuning::default(),
            knockback: KnockbackTuning::default(),
            push_pull: PushPullTuning::default(),
        }
    }
}

impl PlayerData {
    pub fn wall_jump_angle(&self) -> Vec2 {
        Vec2::from(self.wall_jump_angle).normalize_or_zero()
    }
}

/// Where the collision probes sit, measured from the bottom-center of the
/// collider (the feet) unless noted otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeLayout {
    /// Probe rays start this far inside the collider
    pub skin: f32,
    pub ground_check_distance: f32,
    /// Horizontal reach of the wall and ledge probes, from the body center
    pub wall_check_distance: f32,
    pub wall_check_height: f32,
    pub ledge_check_height: f32,
    pub ceiling_check_height: f32,
    pub ceiling_check_radius: f32,
    /// Forward offset of the ground-ahead and wall-below probes, from the body center
    pub edge_probe_forward: f32,
    pub edge_probe_depth: f32,
    /// Depth below the feet at which the wall-below probe looks for a face
    pub wall_below_depth: f32,
    /// Height above the feet the from-above corner solve starts its top ray
    pub from_above_reach: f32,
}

impl Default for ProbeLayout {
    fn default() -> Self {
        Self {
            skin: 0.05,
            ground_check_distance: 0.1,
            wall_check_distance: 0.55,
            wall_check_height: 1.1,
            ledge_check_height: 1.55,
            ceiling_check_height: 1.6,
            ceiling_check_radius: 0.3,
            edge_probe_forward: 0.6,
            edge_probe_depth: 0.3,
            wall_below_depth: 0.3,
            from_above_reach: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgeTuning {
    /// Hang position relative to the corner: (away from wall, below corner)
    pub start_offset: [f32; 2],
    /// Position after climbing relative to the corner: (onto ledge, above corner)
    pub stop_offset: [f32; 2],
    /// Corner solves whose top ray travels less than this are rejected
    pub min_corner_depth: f32,
    /// Clear drop required below the open side of the corner
    pub min_ledge_height: f32,
    pub hang_settle_time: f32,
    pub climb_time: f32,
    pub auto_ledge_grab: bool,
    pub ledge_assist: bool,
    pub assist_reach: f32,
    pub assist_max_height: f32,
    pub assist_margin: f32,
    pub max_assisted_jump_velocity: f32,
}

impl Default for LedgeTuning {
    fn default() -> Self {
        Self {
            start_offset: [0.45, 0.6],
            stop_offset: [0.5, 0.85],
            min_corner_depth: 0.05,
            min_ledge_height: 0.5,
            hang_settle_time: 0.1,
            climb_time: 0.5,
            auto_ledge_grab: true,
            ledge_assist: true,
            assist_reach: 1.0,
            assist_max_height: 3.0,
            assist_margin: 0.1,
            max_assisted_jump_velocity: 18.0,
        }
    }
}

impl LedgeTuning {
    pub fn start_offset(&self) -> Vec2 {
        Vec2::from(self.start_offset)
    }

    pub fn stop_offset(&self) -> Vec2 {
        Vec2::from(self.stop_offset)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnockbackTuning {
    /// Recoil applied opposite to facing: (horizontal, vertical)
    pub shoot_velocity: [f32; 2],
    pub shoot_delay: f32,
    pub shoot_duration: f32,
    /// Bounce applied away from a wall: (horizontal, vertical)
    pub wall_velocity: [f32; 2],
    pub wall_duration: f32,
}

impl Default for KnockbackTuning {
    fn default() -> Self {
        Self {
            shoot_velocity: [6.0, 2.0],
            shoot_delay: 0.08,
            shoot_duration: 0.2,
            wall_velocity: [4.0, 3.0],
            wall_duration: 0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushPullTuning {
    pub detection_radius: f32,
    pub facing_dot_threshold: f32,
    pub base_push_pull_speed_multiplier: f32,
    pub minimum_weight: f32,
    pub weight_penalty_per_unit: f32,
    pub minimum_speed: f32,
}

impl Default for PushPullTuning {
    fn default() -> Self {
        Self {
            detection_radius: 1.2,
            facing_dot_threshold: 0.5,
            base_push_pull_speed_multiplier: 0.6,
            minimum_weight: 1.0,
            weight_penalty_per_unit: 0.5,
            minimum_speed: 3.0,
        }
    }
}

/// Input snapshot polled once per logic tick.
#[derive(Resource, Debug)]
pub struct MovementInput {
    /// Horizontal axis in {-1, 0, 1}
    pub x: i8,
    /// Vertical axis in {-1, 0, 1}
    pub y: i8,
    /// Time of the last unconsumed jump press
    pub jump_pressed_at: Option<f32>,
    pub jump_held: bool,
    pub grab_held: bool,
    pub run_held: bool,
    pub aim_held: bool,
    pub push_pull_held: bool,
    pub fire_just_pressed: bool,
    pub reload_just_pressed: bool,
    /// Cleared while the character is dead
    pub enabled: bool,
}

impl Default for MovementInput {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            jump_pressed_at: None,
            jump_held: false,
            grab_held: false,
            run_held: false,
            aim_held: false,
            push_pull_held: false,
            fire_just_pressed: false,
            reload_just_pressed: false,
            enabled: true,
        }
    }
}

impl MovementInput {
    /// Whether a buffered jump press is still fresh at `now`.
    pub fn jump_requested(&self, now: f32, hold_time: f32) -> bool {
        self.jump_pressed_at
            .is_some_and(|pressed| now - pressed <= hold_time)
    }

    pub fn use_jump_input(&mut self) {
        self.jump_pressed_at = None;
    }

    /// Drop everything except the enabled flag.
    pub fn clear(&mut self) {
        *self = Self {
            enabled: self.enabled,
            ..Self::default()
        };
    }
}
