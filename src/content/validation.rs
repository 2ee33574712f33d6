//! Validation for loaded locomotion tuning.

use crate::movement::PlayerData;

/// A validation error with context about what failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: &'static str,
    pub value: f32,
    pub rule: &'static str,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PlayerData field '{}' = {} violates rule: {}",
            self.field, self.value, self.rule
        )
    }
}

/// Helper macro for checking a numeric rule
macro_rules! check {
    ($errors:expr, $field:expr, $value:expr, $ok:expr, $rule:expr) => {
        let value = $value as f32;
        let ok: fn(f32) -> bool = $ok;
        if !ok(value) {
            $errors.push(ValidationError {
                field: $field,
                value,
                rule: $rule,
            });
        }
    };
}

fn positive(v: f32) -> bool {
    v > 0.0
}

fn non_negative(v: f32) -> bool {
    v >= 0.0
}

fn unit_interval(v: f32) -> bool {
    (0.0..=1.0).contains(&v)
}

/// Validate speeds, durations and probe lengths.
/// Returns a list of validation errors, empty if the data is usable.
pub fn validate_player_data(data: &PlayerData) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // Speeds
    check!(errors, "movement_velocity", data.movement_velocity, positive, "must be > 0");
    check!(errors, "run_velocity", data.run_velocity, positive, "must be > 0");
    check!(
        errors,
        "crouch_movement_velocity",
        data.crouch_movement_velocity,
        positive,
        "must be > 0"
    );
    check!(errors, "jump_velocity", data.jump_velocity, positive, "must be > 0");
    check!(errors, "wall_jump_velocity", data.wall_jump_velocity, positive, "must be > 0");
    check!(errors, "wall_slide_velocity", data.wall_slide_velocity, non_negative, "must be >= 0");
    check!(errors, "wall_climb_velocity", data.wall_climb_velocity, non_negative, "must be >= 0");
    check!(errors, "amount_of_jumps", data.amount_of_jumps, |v| v >= 1.0, "must be >= 1");

    // Gravity
    check!(errors, "gravity", data.gravity, positive, "must be > 0");
    check!(errors, "max_fall_speed", data.max_fall_speed, positive, "must be > 0");
    check!(
        errors,
        "fall_gravity_multiplier",
        data.fall_gravity_multiplier,
        positive,
        "must be > 0"
    );
    check!(
        errors,
        "variable_jump_height_multiplier",
        data.variable_jump_height_multiplier,
        unit_interval,
        "must be within [0, 1]"
    );

    // Durations
    for (field, value) in [
        ("jump_cooldown", data.jump_cooldown),
        ("jump_input_hold_time", data.jump_input_hold_time),
        ("coyote_time", data.coyote_time),
        ("wall_jump_coyote_time", data.wall_jump_coyote_time),
        ("land_duration", data.land_duration),
        ("wall_jump_time", data.wall_jump_time),
        ("fire_cooldown", data.fire_cooldown),
        ("ledge.hang_settle_time", data.ledge.hang_settle_time),
        ("ledge.climb_time", data.ledge.climb_time),
        ("knockback.shoot_delay", data.knockback.shoot_delay),
        ("knockback.shoot_duration", data.knockback.shoot_duration),
        ("knockback.wall_duration", data.knockback.wall_duration),
    ] {
        check!(errors, field, value, non_negative, "must be >= 0");
    }

    // Collider
    check!(errors, "collider_width", data.collider_width, positive, "must be > 0");
    check!(
        errors,
        "stand_collider_height",
        data.stand_collider_height,
        positive,
        "must be > 0"
    );
    check!(
        errors,
        "crouch_collider_height",
        data.crouch_collider_height,
        positive,
        "must be > 0"
    );
    if data.crouch_collider_height > data.stand_collider_height {
        errors.push(ValidationError {
            field: "crouch_collider_height",
            value: data.crouch_collider_height,
            rule: "must not exceed stand_collider_height",
        });
    }
    if data.wall_jump_angle() == bevy::math::Vec2::ZERO {
        errors.push(ValidationError {
            field: "wall_jump_angle",
            value: 0.0,
            rule: "must not be the zero vector",
        });
    }

    // Probes
    for (field, value) in [
        ("probes.skin", data.probes.skin),
        ("probes.ground_check_distance", data.probes.ground_check_distance),
        ("probes.wall_check_distance", data.probes.wall_check_distance),
        ("probes.ceiling_check_radius", data.probes.ceiling_check_radius),
        ("probes.edge_probe_depth", data.probes.edge_probe_depth),
        ("probes.wall_below_depth", data.probes.wall_below_depth),
        ("probes.from_above_reach", data.probes.from_above_reach),
    ] {
        check!(errors, field, value, positive, "must be > 0");
    }
    if data.probes.ledge_check_height <= data.probes.wall_check_height {
        errors.push(ValidationError {
            field: "probes.ledge_check_height",
            value: data.probes.ledge_check_height,
            rule: "must be above probes.wall_check_height",
        });
    }

    // Ledges
    check!(
        errors,
        "ledge.min_ledge_height",
        data.ledge.min_ledge_height,
        positive,
        "must be > 0"
    );
    check!(
        errors,
        "ledge.min_corner_depth",
        data.ledge.min_corner_depth,
        non_negative,
        "must be >= 0"
    );
    // The side corner ray never travels further than the gap between the probes.
    if data.ledge.min_corner_depth >= data.probes.ledge_check_height - data.probes.wall_check_height
    {
        errors.push(ValidationError {
            field: "ledge.min_corner_depth",
            value: data.ledge.min_corner_depth,
            rule: "must be below probes.ledge_check_height - probes.wall_check_height",
        });
    }
    if data.ledge.max_assisted_jump_velocity < data.jump_velocity {
        errors.push(ValidationError {
            field: "ledge.max_assisted_jump_velocity",
            value: data.ledge.max_assisted_jump_velocity,
            rule: "must be >= jump_velocity",
        });
    }

    // Push/pull
    check!(
        errors,
        "push_pull.detection_radius",
        data.push_pull.detection_radius,
        positive,
        "must be > 0"
    );
    check!(
        errors,
        "push_pull.facing_dot_threshold",
        data.push_pull.facing_dot_threshold,
        |v| (-1.0..=1.0).contains(&v),
        "must be within [-1, 1]"
    );
    check!(
        errors,
        "push_pull.minimum_speed",
        data.push_pull.minimum_speed,
        non_negative,
        "must be >= 0"
    );

    errors
}
