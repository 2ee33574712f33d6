//! Movement domain: tests for locomotion building blocks and state transitions.

use avian2d::prelude::LinearVelocity;
use bevy::prelude::*;
use std::time::Duration;

use super::systems::apply_gravity;
use super::{
    AnimationCue, AnimationParams, AnimationValue, ColliderShape, Deadline, FacingDirection,
    JumpAbility, Knockback, KnockbackKind, KnockbackTick, Loadout, LocomotionEventKind,
    MovementInput, Orientation, PhysicsVelocity, Player, PlayerContext, PlayerData,
    PlayerStateKind, PushPull, PushPullTuning, StateMachine, StateMemory, StaticGeometry,
    TickSignals, find_push_target, params, push_pull_speed,
};

const EPS: f32 = 1e-3;

fn floor() -> StaticGeometry {
    StaticGeometry::new().with_box(Vec2::new(-50.0, -1.0), Vec2::new(50.0, 0.0))
}

/// Standing on the floor at the origin.
const STANDING: Vec2 = Vec2::new(0.0, 0.8);

/// One character driven tick by tick against headless geometry.
struct Rig {
    now: f32,
    data: PlayerData,
    world: StaticGeometry,
    input: MovementInput,
    position: Vec2,
    orientation: Orientation,
    velocity: PhysicsVelocity,
    knockback: Knockback,
    shape: ColliderShape,
    jump: JumpAbility,
    memory: StateMemory,
    animation: AnimationParams,
    push_pull: PushPull,
    loadout: Loadout,
    machine: StateMachine,
    events: Vec<LocomotionEventKind>,
}

impl Rig {
    fn new(world: StaticGeometry, position: Vec2) -> Self {
        let data = PlayerData::default();
        let shape = ColliderShape::new(Vec2::new(data.collider_width, data.stand_collider_height));
        let jump = JumpAbility::new(data.amount_of_jumps);
        Self {
            now: 1.0,
            data,
            world,
            input: MovementInput::default(),
            position,
            orientation: Orientation::default(),
            velocity: PhysicsVelocity::default(),
            knockback: Knockback::default(),
            shape,
            jump,
            memory: StateMemory::default(),
            animation: AnimationParams::default(),
            push_pull: PushPull::default(),
            loadout: Loadout::default(),
            machine: StateMachine::default(),
            events: Vec::new(),
        }
    }

    fn with<R>(&mut self, f: impl FnOnce(&mut StateMachine, &mut PlayerContext) -> R) -> R {
        let mut ctx = PlayerContext::new(
            self.now,
            &self.data,
            &self.world,
            &mut self.input,
            self.position,
            &mut self.orientation,
            &mut self.velocity,
            &mut self.knockback,
            &mut self.shape,
            &mut self.jump,
            &mut self.memory,
            &mut self.animation,
            &self.push_pull,
            &self.loadout,
        );
        let result = f(&mut self.machine, &mut ctx);
        let outcome = ctx.finish();
        if let Some(position) = outcome.snap_to {
            self.position = position;
        }
        self.events.extend(outcome.events);
        result
    }

    fn start_in(&mut self, kind: PlayerStateKind) {
        self.with(|machine, ctx| machine.initialize(kind, ctx));
    }

    fn tick(&mut self) {
        self.tick_with(&TickSignals::default());
    }

    fn tick_with(&mut self, signals: &TickSignals) {
        self.with(|machine, ctx| machine.tick(ctx, signals));
    }

    fn physics(&mut self) {
        self.with(|machine, ctx| machine.physics_update(ctx));
    }

    fn step(&mut self, dt: f32) {
        self.now += dt;
    }

    fn state(&self) -> Option<PlayerStateKind> {
        self.machine.current()
    }

    fn press_jump(&mut self) {
        self.input.jump_pressed_at = Some(self.now);
        self.input.jump_held = true;
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity.sync_from_body(velocity);
    }

    fn take_events(&mut self) -> Vec<LocomotionEventKind> {
        std::mem::take(&mut self.events)
    }
}

fn assert_vec_near(actual: Vec2, expected: Vec2) {
    assert!(
        (actual - expected).length() < EPS,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

// -----------------------------------------------------------------------------
// Deadline tests
// -----------------------------------------------------------------------------

#[test]
fn test_deadline_lifecycle() {
    let mut deadline = Deadline::default();
    assert!(!deadline.is_scheduled());
    assert!(!deadline.is_due(10.0));
    deadline.cancel();

    deadline.schedule(1.0, 0.5);
    assert!(deadline.is_pending(1.2));
    assert!(!deadline.is_due(1.2));
    assert!(!deadline.take_due(1.2));
    assert!(deadline.is_due(1.5));
    assert!(deadline.take_due(1.6));
    assert!(!deadline.is_scheduled());
}

// -----------------------------------------------------------------------------
// Knockback and velocity gate tests
// -----------------------------------------------------------------------------

#[test]
fn test_velocity_writes_dropped_while_knockback_active() {
    let tuning = PlayerData::default().knockback;
    let mut velocity = PhysicsVelocity::default();
    let mut knockback = Knockback::default();

    assert!(velocity.set_velocity_x(5.0, &knockback));
    knockback.apply_wall_collision_knockback(0.0, FacingDirection::Left, &tuning, &mut velocity);
    assert_eq!(velocity.current(), Vec2::new(-4.0, 3.0));

    assert!(!velocity.set_velocity_x(10.0, &knockback));
    assert!(!velocity.set_velocity_zero(&knockback));
    assert_eq!(velocity.current(), Vec2::new(-4.0, 3.0));
    assert_eq!(velocity.dropped_writes(), 2);
}

#[test]
fn test_shoot_knockback_fires_after_delay() {
    let tuning = PlayerData::default().knockback;
    let mut velocity = PhysicsVelocity::default();
    let mut knockback = Knockback::default();

    knockback.apply_shoot_knockback(1.0, FacingDirection::Right, &tuning);
    assert!(!knockback.is_active());
    assert_eq!(knockback.pending().map(|p| p.velocity), Some(Vec2::new(-6.0, 2.0)));

    let tick = knockback.tick(1.05, &mut velocity);
    assert_eq!(tick.started, None);
    assert!(!knockback.is_active());

    let tick = knockback.tick(1.1, &mut velocity);
    let started = tick.started.expect("recoil should start");
    assert_eq!(started.kind, KnockbackKind::Shoot);
    assert!((started.started_at - 1.08).abs() < EPS);
    assert!(knockback.is_active());
    assert_eq!(velocity.current(), Vec2::new(-6.0, 2.0));

    let tick = knockback.tick(1.3, &mut velocity);
    assert_eq!(tick.expired, Some(KnockbackKind::Shoot));
    assert!(!knockback.is_active());
}

#[test]
fn test_new_shoot_request_replaces_pending() {
    let tuning = PlayerData::default().knockback;
    let mut knockback = Knockback::default();

    knockback.apply_shoot_knockback(1.0, FacingDirection::Right, &tuning);
    knockback.apply_shoot_knockback(1.05, FacingDirection::Left, &tuning);

    let pending = knockback.pending().expect("one request pending");
    assert_eq!(pending.velocity, Vec2::new(6.0, 2.0));
    assert!(pending.fires.is_pending(1.1));
}

#[test]
fn test_late_tick_starts_and_expires_short_window() {
    let tuning = PlayerData::default().knockback;
    let mut velocity = PhysicsVelocity::default();
    let mut knockback = Knockback::default();

    knockback.apply_shoot_knockback(0.0, FacingDirection::Right, &tuning);
    let tick = knockback.tick(0.5, &mut velocity);

    assert!(tick.started.is_some());
    assert_eq!(tick.expired, Some(KnockbackKind::Shoot));
    assert!(!knockback.is_active());
    assert!(knockback.pending().is_none());
}

#[test]
fn test_cancel_knockback_is_safe_when_idle() {
    let tuning = PlayerData::default().knockback;
    let mut velocity = PhysicsVelocity::default();
    let mut knockback = Knockback::default();

    knockback.cancel_knockback();
    knockback.cancel_pending();

    knockback.apply_shoot_knockback(0.0, FacingDirection::Right, &tuning);
    knockback.apply_wall_collision_knockback(0.0, FacingDirection::Right, &tuning, &mut velocity);
    assert!(knockback.pending().is_none());

    knockback.cancel_knockback();
    assert!(!knockback.is_active());
    assert!(velocity.set_velocity_y(1.0, &knockback));
}

#[test]
fn test_knockback_tick_holds_velocity_for_whole_window() {
    let tuning = PlayerData::default().knockback;
    let mut velocity = PhysicsVelocity::default();
    let mut knockback = Knockback::default();

    knockback.apply_wall_collision_knockback(0.0, FacingDirection::Left, &tuning, &mut velocity);
    let v = Vec2::new(-4.0, 3.0);

    // Gravity and contacts erode the body between ticks
    velocity.sync_from_body(Vec2::new(-3.5, 2.3));
    let tick = knockback.tick(0.05, &mut velocity);
    assert_eq!(tick, KnockbackTick::default());
    assert_vec_near(velocity.current(), v);

    velocity.sync_from_body(Vec2::ZERO);
    knockback.tick(0.1, &mut velocity);
    assert_vec_near(velocity.current(), v);

    // Once the window closes the body keeps whatever it has
    velocity.sync_from_body(Vec2::new(-1.0, -2.0));
    let tick = knockback.tick(0.2, &mut velocity);
    assert_eq!(tick.expired, Some(KnockbackKind::WallCollision));
    assert_vec_near(velocity.current(), Vec2::new(-1.0, -2.0));
}

fn gravity_app() -> App {
    let mut time = Time::<()>::default();
    time.advance_by(Duration::from_secs_f32(1.0 / 64.0));

    let mut app = App::new();
    app.insert_resource(time)
        .insert_resource(PlayerData::default())
        .add_systems(Update, apply_gravity);
    app
}

#[test]
fn test_gravity_skips_knocked_back_body() {
    let data = PlayerData::default();
    let mut app = gravity_app();

    let mut velocity = PhysicsVelocity::default();
    let mut knockback = Knockback::default();
    let started = knockback.apply_wall_collision_knockback(
        0.0,
        FacingDirection::Left,
        &data.knockback,
        &mut velocity,
    );
    let knocked = app
        .world_mut()
        .spawn((Player, velocity, knockback, LinearVelocity(started.velocity)))
        .id();
    let falling = app
        .world_mut()
        .spawn((
            Player,
            PhysicsVelocity::default(),
            Knockback::default(),
            LinearVelocity(started.velocity),
        ))
        .id();

    app.update();
    app.update();

    let body = app.world().get::<LinearVelocity>(knocked).map(|v| v.0);
    assert_eq!(body, Some(Vec2::new(-4.0, 3.0)));

    let body = app.world().get::<LinearVelocity>(falling).map(|v| v.0);
    let expected_y = 3.0 - 2.0 * data.gravity / 64.0;
    assert!(body.is_some_and(|v| (v.y - expected_y).abs() < EPS && v.x == -4.0));
}

#[test]
fn test_gravity_resumes_after_knockback_expires() {
    let data = PlayerData::default();
    let mut app = gravity_app();

    let mut velocity = PhysicsVelocity::default();
    let mut knockback = Knockback::default();
    knockback.apply_wall_collision_knockback(
        0.0,
        FacingDirection::Left,
        &data.knockback,
        &mut velocity,
    );
    knockback.tick(1.0, &mut velocity);
    assert!(!knockback.is_active());

    let entity = app
        .world_mut()
        .spawn((Player, velocity, knockback, LinearVelocity(Vec2::new(-4.0, 3.0))))
        .id();
    app.update();

    let body = app.world().get::<LinearVelocity>(entity).map(|v| v.0);
    let expected_y = 3.0 - data.gravity / 64.0;
    assert!(body.is_some_and(|v| (v.y - expected_y).abs() < EPS));
}

#[test]
fn test_angled_velocity_mirrors_horizontally() {
    let gate = Knockback::default();
    let mut velocity = PhysicsVelocity::default();

    velocity.set_velocity_angled(10.0, Vec2::new(3.0, 4.0), -1.0, &gate);
    assert_vec_near(velocity.current(), Vec2::new(-6.0, 8.0));
}

// -----------------------------------------------------------------------------
// Jump ability tests
// -----------------------------------------------------------------------------

#[test]
fn test_jump_cooldown_blocks_second_jump() {
    let mut jump = JumpAbility::new(2);
    assert!(jump.can_jump(0.0));

    jump.consume(0.0, 0.2);
    assert_eq!(jump.jumps_left(), 1);
    assert!(!jump.can_jump(0.1));
    assert!(jump.can_jump(0.25));
}

#[test]
fn test_jump_cooldown_is_per_character() {
    let mut first = JumpAbility::new(1);
    let second = JumpAbility::new(1);

    first.consume(0.0, 0.2);
    assert!(!first.cooldown_ready(0.1));
    assert!(second.can_jump(0.1));
}

#[test]
fn test_coyote_expiry_spends_ground_jump() {
    let mut jump = JumpAbility::new(1);
    jump.start_coyote(0.0, 0.2);

    jump.check_coyote(0.1);
    assert_eq!(jump.jumps_left(), 1);

    jump.check_coyote(0.3);
    assert_eq!(jump.jumps_left(), 0);

    // Only once per window.
    jump.check_coyote(0.4);
    assert_eq!(jump.jumps_left(), 0);
}

#[test]
fn test_consuming_a_jump_closes_coyote_windows() {
    let mut jump = JumpAbility::new(2);
    jump.start_coyote(0.0, 0.2);
    jump.start_wall_coyote(0.0, 0.2);

    jump.consume(0.05, 0.2);
    assert!(!jump.in_wall_coyote(0.1));

    jump.check_coyote(0.3);
    assert_eq!(jump.jumps_left(), 1);
}

#[test]
fn test_jump_buffer_window() {
    let mut input = MovementInput {
        jump_pressed_at: Some(1.0),
        ..default()
    };
    assert!(input.jump_requested(1.15, 0.2));
    assert!(!input.jump_requested(1.25, 0.2));

    input.use_jump_input();
    assert!(!input.jump_requested(1.0, 0.2));
}

#[test]
fn test_input_clear_keeps_enabled_flag() {
    let mut input = MovementInput {
        x: 1,
        grab_held: true,
        enabled: false,
        ..default()
    };
    input.clear();
    assert_eq!(input.x, 0);
    assert!(!input.grab_held);
    assert!(!input.enabled);
}

// -----------------------------------------------------------------------------
// Orientation tests
// -----------------------------------------------------------------------------

#[test]
fn test_check_flip() {
    let mut orientation = Orientation::default();
    assert_eq!(orientation.facing(), FacingDirection::Right);

    assert!(!orientation.check_flip(0));
    assert!(!orientation.check_flip(1));
    assert!(orientation.check_flip(-1));
    assert_eq!(orientation.facing(), FacingDirection::Left);
    assert_eq!(orientation.flips(), 1);

    orientation.face(FacingDirection::Left);
    assert_eq!(orientation.flips(), 1);
    orientation.face(FacingDirection::Right);
    assert_eq!(orientation.flips(), 2);
}

#[test]
fn test_facing_from_velocity() {
    assert_eq!(FacingDirection::from_velocity(-0.5), Some(FacingDirection::Left));
    assert_eq!(FacingDirection::from_velocity(2.0), Some(FacingDirection::Right));
    assert_eq!(FacingDirection::from_velocity(0.0), None);
}

// -----------------------------------------------------------------------------
// Animation parameter tests
// -----------------------------------------------------------------------------

#[test]
fn test_animation_params_record_writes_in_order() {
    let mut animation = AnimationParams::default();
    animation.set_bool(params::IDLE, true);
    animation.set_float(params::X_VELOCITY, 3.0);
    animation.set_float(params::X_VELOCITY, 3.0);
    animation.trigger(params::FIRE);
    animation.trigger(params::FIRE);

    let writes = animation.drain();
    let names: Vec<_> = writes.iter().map(|w| w.name).collect();
    assert_eq!(
        names,
        vec![params::IDLE, params::X_VELOCITY, params::FIRE, params::FIRE]
    );
    assert_eq!(writes[1].value, AnimationValue::Float(3.0));
    assert!(animation.pending().is_empty());

    assert!(animation.get_bool(params::IDLE));
    assert_eq!(animation.get_float(params::X_VELOCITY), Some(3.0));
    assert_eq!(animation.get_float(params::Y_VELOCITY), None);
}

// -----------------------------------------------------------------------------
// Push/pull tests
// -----------------------------------------------------------------------------

#[test]
fn test_push_pull_speed_penalizes_weight() {
    let tuning = PushPullTuning::default();
    assert!((push_pull_speed(10.0, 1.0, &tuning) - 6.0).abs() < EPS);
    assert!((push_pull_speed(10.0, 3.0, &tuning) - 5.0).abs() < EPS);
    // Light objects get no bonus.
    assert!((push_pull_speed(10.0, 0.2, &tuning) - 6.0).abs() < EPS);
    // Heavy objects bottom out at the minimum.
    assert!((push_pull_speed(10.0, 20.0, &tuning) - tuning.minimum_speed).abs() < EPS);
}

#[test]
fn test_find_push_target_prefers_nearest_in_front() {
    let tuning = PushPullTuning::default();
    let candidates = [
        (1u32, Vec2::new(-0.8, 0.0), 1.0),
        (2u32, Vec2::new(1.1, 0.0), 2.0),
        (3u32, Vec2::new(0.9, 0.1), 3.0),
        (4u32, Vec2::new(0.0, 1.0), 1.0),
        (5u32, Vec2::new(5.0, 0.0), 1.0),
    ];

    let target = find_push_target(Vec2::ZERO, FacingDirection::Right, candidates, &tuning)
        .expect("object in front");
    assert_eq!(target.id, 3);
    assert_eq!(target.weight, 3.0);

    let behind = find_push_target(Vec2::ZERO, FacingDirection::Left, candidates, &tuning)
        .expect("object behind becomes the front");
    assert_eq!(behind.id, 1);
}

#[test]
fn test_push_pull_release_resets() {
    let mut push_pull = PushPull::default();
    push_pull.engage(Entity::PLACEHOLDER, 2.0, 5.0);
    assert!(push_pull.active);

    push_pull.release();
    assert!(!push_pull.active);
    assert_eq!(push_pull.target, None);
    assert_eq!(push_pull.speed, 0.0);
}

// -----------------------------------------------------------------------------
// Player data tests
// -----------------------------------------------------------------------------

#[test]
fn test_player_data_derived_values() {
    let data = PlayerData::default();
    assert_vec_near(data.wall_jump_angle(), Vec2::new(1.0, 2.0).normalize());
}

// -----------------------------------------------------------------------------
// State machine tests
// -----------------------------------------------------------------------------

#[test]
fn test_first_tick_initializes_in_idle() {
    let mut rig = Rig::new(floor(), STANDING);
    rig.tick();

    assert_eq!(rig.state(), Some(PlayerStateKind::Idle));
    assert_eq!(rig.machine.transitions(), 0);
    assert_eq!(
        rig.take_events(),
        vec![LocomotionEventKind::StateChanged {
            from: None,
            to: PlayerStateKind::Idle,
        }]
    );
    assert!(rig.animation.get_bool(params::IDLE));
    assert!(rig.animation.get_bool(params::GROUNDED));
}

#[test]
fn test_every_state_raises_only_its_own_flag() {
    for kind in PlayerStateKind::ALL {
        if kind == PlayerStateKind::Idle {
            continue;
        }
        let mut rig = Rig::new(floor(), STANDING);
        rig.start_in(PlayerStateKind::Idle);
        rig.with(|machine, ctx| machine.change_state(kind, ctx));

        assert_eq!(rig.state(), Some(kind));
        assert_eq!(rig.machine.previous(), Some(PlayerStateKind::Idle));
        assert!(rig.animation.get_bool(kind.animation_flag()), "{:?}", kind);
        assert!(!rig.animation.get_bool(params::IDLE), "{:?}", kind);

        rig.with(|machine, ctx| machine.change_state(PlayerStateKind::Idle, ctx));
        assert!(!rig.animation.get_bool(kind.animation_flag()), "{:?}", kind);
        assert!(rig.animation.get_bool(params::IDLE));
        assert_eq!(rig.velocity.gravity_scale, 1.0, "{:?}", kind);
    }
}

#[test]
fn test_state_changed_event_names_both_states() {
    let mut rig = Rig::new(floor(), STANDING);
    rig.start_in(PlayerStateKind::Idle);
    rig.take_events();

    rig.input.x = 1;
    rig.tick();

    assert_eq!(
        rig.take_events(),
        vec![LocomotionEventKind::StateChanged {
            from: Some(PlayerStateKind::Idle),
            to: PlayerStateKind::Move,
        }]
    );
    assert_eq!(rig.machine.transitions(), 1);
}

// -----------------------------------------------------------------------------
// Grounded state tests
// -----------------------------------------------------------------------------

#[test]
fn test_idle_to_move_and_back() {
    let mut rig = Rig::new(floor(), STANDING);
    rig.start_in(PlayerStateKind::Idle);

    rig.input.x = 1;
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::Move));

    rig.tick();
    assert_eq!(rig.velocity.current().x, 10.0);
    assert_eq!(rig.animation.get_float(params::X_VELOCITY), Some(10.0));

    rig.input.run_held = true;
    rig.tick();
    assert_eq!(rig.velocity.current().x, 14.0);

    rig.input.x = 0;
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::Idle));
    assert_eq!(rig.velocity.current().x, 0.0);
}

#[test]
fn test_move_turns_toward_input() {
    let mut rig = Rig::new(floor(), STANDING);
    rig.start_in(PlayerStateKind::Move);

    rig.input.x = -1;
    rig.tick();

    assert_eq!(rig.orientation.facing(), FacingDirection::Left);
    assert_eq!(rig.velocity.current().x, -10.0);
}

#[test]
fn test_push_pull_keeps_facing_and_slows_move() {
    let mut rig = Rig::new(floor(), STANDING);
    rig.push_pull.engage(Entity::PLACEHOLDER, 2.0, 4.0);
    rig.start_in(PlayerStateKind::Move);

    rig.input.x = -1;
    rig.tick();

    assert_eq!(rig.orientation.facing(), FacingDirection::Right);
    assert_eq!(rig.velocity.current().x, -4.0);
}

#[test]
fn test_crouch_shrinks_collider_and_standing_restores_it() {
    let mut rig = Rig::new(floor(), STANDING);
    rig.start_in(PlayerStateKind::Idle);

    rig.input.y = -1;
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::CrouchIdle));
    assert!((rig.shape.height() - 0.8).abs() < EPS);
    assert!((rig.shape.offset.y + 0.4).abs() < EPS);

    rig.input.x = 1;
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::CrouchMove));
    rig.tick();
    assert_eq!(rig.velocity.current().x, 5.0);

    rig.input.x = 0;
    rig.input.y = 0;
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::CrouchIdle));
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::Idle));
    assert!((rig.shape.height() - 1.6).abs() < EPS);
    assert_eq!(rig.shape.offset, Vec2::ZERO);
}

#[test]
fn test_ceiling_keeps_character_crouched() {
    let low_ceiling = floor().with_box(Vec2::new(-2.0, 1.2), Vec2::new(2.0, 2.0));
    let mut rig = Rig::new(low_ceiling, STANDING);
    rig.start_in(PlayerStateKind::Idle);

    rig.input.y = -1;
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::CrouchIdle));

    rig.input.y = 0;
    rig.tick();
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::CrouchIdle));

    rig.world = floor();
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::Idle));
}

#[test]
fn test_ceiling_blocks_jump() {
    let low_ceiling = floor().with_box(Vec2::new(-2.0, 1.7), Vec2::new(2.0, 2.5));
    let mut rig = Rig::new(low_ceiling, STANDING);
    rig.start_in(PlayerStateKind::Idle);

    rig.press_jump();
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::Idle));
    assert_eq!(rig.jump.jumps_left(), 1);
}

// -----------------------------------------------------------------------------
// Jump and air state tests
// -----------------------------------------------------------------------------

#[test]
fn test_jump_then_in_air_then_land() {
    let mut rig = Rig::new(floor(), STANDING);
    rig.data.ledge.ledge_assist = false;
    rig.start_in(PlayerStateKind::Idle);

    rig.press_jump();
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::Jump));
    assert_eq!(rig.velocity.current().y, 15.0);
    assert_eq!(rig.jump.jumps_left(), 0);
    assert_eq!(rig.input.jump_pressed_at, None);
    assert!(rig.memory.is_jumping);

    rig.step(0.02);
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::InAir));

    // Still rising through the ground probe: no landing yet.
    rig.step(0.02);
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::InAir));

    rig.set_velocity(Vec2::new(0.0, -5.0));
    rig.step(0.02);
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::Land));
    assert_eq!(rig.jump.jumps_left(), 1);

    rig.step(0.2);
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::Idle));
}

#[test]
fn test_land_finishes_on_animation_cue() {
    let mut rig = Rig::new(floor(), STANDING);
    rig.start_in(PlayerStateKind::Land);

    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::Land));

    rig.tick_with(&TickSignals {
        cues: vec![AnimationCue::Finish],
        ..default()
    });
    assert_eq!(rig.state(), Some(PlayerStateKind::Idle));
}

#[test]
fn test_releasing_jump_cuts_rise() {
    let mut rig = Rig::new(StaticGeometry::new(), Vec2::new(0.0, 10.0));
    rig.start_in(PlayerStateKind::InAir);
    rig.memory.is_jumping = true;
    rig.set_velocity(Vec2::new(0.0, 10.0));

    rig.input.jump_held = false;
    rig.tick();

    assert_eq!(rig.velocity.current().y, 5.0);
    assert!(!rig.memory.is_jumping);
}

#[test]
fn test_falling_uses_stronger_gravity() {
    let mut rig = Rig::new(StaticGeometry::new(), Vec2::new(0.0, 10.0));
    rig.start_in(PlayerStateKind::InAir);

    rig.set_velocity(Vec2::new(0.0, -1.0));
    rig.physics();
    assert_eq!(rig.velocity.gravity_scale, 1.5);

    rig.set_velocity(Vec2::new(0.0, 1.0));
    rig.physics();
    assert_eq!(rig.velocity.gravity_scale, 1.0);
}

#[test]
fn test_coyote_jump_after_walking_off() {
    let half_floor = StaticGeometry::new().with_box(Vec2::new(-50.0, -1.0), Vec2::new(0.0, 0.0));
    let mut rig = Rig::new(half_floor, Vec2::new(2.0, 0.8));
    rig.data.ledge.ledge_assist = false;
    rig.start_in(PlayerStateKind::Idle);

    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::InAir));

    rig.step(0.1);
    rig.press_jump();
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::Jump));
    assert_eq!(rig.velocity.current().y, 15.0);
}

#[test]
fn test_coyote_window_expires() {
    let half_floor = StaticGeometry::new().with_box(Vec2::new(-50.0, -1.0), Vec2::new(0.0, 0.0));
    let mut rig = Rig::new(half_floor, Vec2::new(2.0, 0.8));
    rig.start_in(PlayerStateKind::Idle);

    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::InAir));

    rig.step(0.25);
    rig.tick();
    assert_eq!(rig.jump.jumps_left(), 0);

    rig.step(0.05);
    rig.press_jump();
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::InAir));
}

#[test]
fn test_ledge_jump_adds_height_for_reachable_ledge() {
    let world = floor().with_box(Vec2::new(1.0, 0.0), Vec2::new(2.0, 4.2));
    let mut rig = Rig::new(world, Vec2::new(0.5, 0.8));
    rig.start_in(PlayerStateKind::Idle);

    rig.press_jump();
    rig.tick();

    assert_eq!(rig.state(), Some(PlayerStateKind::LedgeJump));
    let expected = (2.0f32 * 45.0 * 2.75).sqrt();
    assert!((rig.velocity.current().y - expected).abs() < EPS);
}

#[test]
fn test_ledge_jump_falls_back_when_out_of_reach() {
    let world = floor().with_box(Vec2::new(1.0, 0.0), Vec2::new(2.0, 4.2));
    let mut rig = Rig::new(world, Vec2::new(0.5, 0.8));
    rig.data.ledge.max_assisted_jump_velocity = 15.5;
    rig.start_in(PlayerStateKind::Idle);

    rig.press_jump();
    rig.tick();

    assert_eq!(rig.state(), Some(PlayerStateKind::LedgeJump));
    assert_eq!(rig.velocity.current().y, 15.0);
}

#[test]
fn test_ledge_jump_without_ledge_is_a_normal_jump() {
    let mut rig = Rig::new(floor(), STANDING);
    rig.start_in(PlayerStateKind::Idle);

    rig.press_jump();
    rig.tick();

    assert_eq!(rig.state(), Some(PlayerStateKind::LedgeJump));
    assert_eq!(rig.velocity.current().y, 15.0);
}

// -----------------------------------------------------------------------------
// Wall state tests
// -----------------------------------------------------------------------------

fn tall_wall() -> StaticGeometry {
    floor().with_box(Vec2::new(1.0, 0.0), Vec2::new(2.0, 5.0))
}

/// In the air, facing and touching the tall wall.
const ON_WALL: Vec2 = Vec2::new(0.5, 2.5);

#[test]
fn test_grab_climb_and_release_wall() {
    let mut rig = Rig::new(tall_wall(), ON_WALL);
    rig.start_in(PlayerStateKind::InAir);

    rig.input.grab_held = true;
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::WallGrab));
    assert_eq!(rig.velocity.gravity_scale, 0.0);
    assert_eq!(rig.memory.hold_position, Some(ON_WALL));

    rig.input.y = 1;
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::WallClimb));
    rig.tick();
    assert_eq!(rig.velocity.current(), Vec2::new(0.0, 3.0));

    rig.input.y = 0;
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::WallGrab));
    assert_eq!(rig.velocity.gravity_scale, 0.0);

    rig.input.grab_held = false;
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::InAir));
    assert_eq!(rig.velocity.gravity_scale, 1.0);
    assert_eq!(rig.memory.hold_position, None);
    assert!(rig.jump.in_wall_coyote(rig.now));
}

#[test]
fn test_grab_wall_from_ground() {
    let mut rig = Rig::new(tall_wall(), Vec2::new(0.5, 0.8));
    rig.start_in(PlayerStateKind::Idle);

    rig.input.grab_held = true;
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::WallGrab));

    rig.input.grab_held = false;
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::Idle));
}

#[test]
fn test_slide_down_wall_while_pressing_into_it() {
    let mut rig = Rig::new(tall_wall(), ON_WALL);
    rig.start_in(PlayerStateKind::InAir);

    rig.input.x = 1;
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::WallSlide));

    rig.tick();
    assert_eq!(rig.velocity.current().y, -3.0);
}

#[test]
fn test_wall_jump_pushes_away_from_wall() {
    let mut rig = Rig::new(tall_wall(), ON_WALL);
    rig.start_in(PlayerStateKind::WallSlide);
    rig.jump.reset(0);

    rig.input.x = 1;
    rig.press_jump();
    rig.tick();

    assert_eq!(rig.state(), Some(PlayerStateKind::WallJump));
    let angle = Vec2::new(1.0, 2.0).normalize();
    assert_vec_near(rig.velocity.current(), Vec2::new(-angle.x * 20.0, angle.y * 20.0));
    assert_eq!(rig.orientation.facing(), FacingDirection::Left);
    assert_eq!(rig.jump.jumps_left(), 0);
    assert_eq!(rig.input.jump_pressed_at, None);

    rig.step(0.1);
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::WallJump));

    rig.step(0.4);
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::InAir));
}

#[test]
fn test_wall_coyote_jump_after_letting_go() {
    let mut rig = Rig::new(tall_wall(), ON_WALL);
    rig.start_in(PlayerStateKind::WallSlide);
    rig.set_velocity(Vec2::new(0.0, -3.0));

    rig.input.x = 0;
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::InAir));

    rig.position = Vec2::new(0.0, 2.5);
    rig.step(0.1);
    rig.press_jump();
    rig.tick();

    assert_eq!(rig.state(), Some(PlayerStateKind::WallJump));
    assert_eq!(rig.orientation.facing(), FacingDirection::Left);
    assert!(rig.velocity.current().x < 0.0);
}

#[test]
fn test_wall_coyote_window_expires() {
    let mut rig = Rig::new(tall_wall(), ON_WALL);
    rig.start_in(PlayerStateKind::WallSlide);
    rig.jump.reset(0);
    rig.set_velocity(Vec2::new(0.0, -3.0));

    rig.input.x = 0;
    rig.tick();
    rig.position = Vec2::new(0.0, 2.5);
    rig.step(0.05);
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::InAir));

    rig.step(0.3);
    rig.press_jump();
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::InAir));
}

// -----------------------------------------------------------------------------
// Ledge tests
// -----------------------------------------------------------------------------

fn low_block() -> StaticGeometry {
    floor().with_box(Vec2::new(1.0, 0.0), Vec2::new(2.0, 2.0))
}

/// Jumping beside the low block with the ledge probe above its top.
const BESIDE_LEDGE: Vec2 = Vec2::new(0.5, 1.5);

#[test]
fn test_grab_ledge_from_side_and_climb() {
    let mut rig = Rig::new(low_block(), BESIDE_LEDGE);
    rig.start_in(PlayerStateKind::InAir);
    rig.take_events();

    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::LedgeClimb));
    assert_vec_near(rig.position, Vec2::new(0.55, 1.4));
    assert_eq!(rig.velocity.gravity_scale, 0.0);
    let hang = rig.memory.ledge.expect("hanging from the ledge");
    assert_vec_near(hang.corner, Vec2::new(1.0, 2.0));
    assert_vec_near(hang.stop, Vec2::new(1.5, 2.85));
    assert!(
        rig.take_events()
            .iter()
            .any(|e| matches!(e, LocomotionEventKind::LedgeGrabbed { .. }))
    );

    // Input is ignored until the hang settles.
    rig.input.x = 1;
    rig.step(0.05);
    rig.tick();
    assert!(!rig.memory.ledge.is_some_and(|hang| hang.climbing));

    rig.step(0.1);
    rig.tick();
    assert!(rig.memory.ledge.is_some_and(|hang| hang.climbing));
    assert!(rig.animation.get_bool(params::CLIMB_LEDGE));
    assert_vec_near(rig.position, Vec2::new(0.55, 1.4));

    rig.step(0.6);
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::Idle));
    assert_vec_near(rig.position, Vec2::new(1.5, 2.85));
    assert!(!rig.animation.get_bool(params::CLIMB_LEDGE));
    assert_eq!(rig.velocity.gravity_scale, 1.0);
}

#[test]
fn test_shallow_corner_is_not_grabbed_from_side() {
    let mut rig = Rig::new(low_block(), BESIDE_LEDGE);
    // The top ray travels 0.25 here.
    rig.data.ledge.min_corner_depth = 0.3;
    rig.start_in(PlayerStateKind::InAir);
    rig.take_events();

    rig.tick();
    assert_ne!(rig.state(), Some(PlayerStateKind::LedgeClimb));
    assert_eq!(rig.memory.ledge, None);
    assert!(
        !rig.take_events()
            .iter()
            .any(|e| matches!(e, LocomotionEventKind::LedgeGrabbed { .. }))
    );
}

#[test]
fn test_ledge_climb_ends_crouched_under_low_ceiling() {
    let world = low_block().with_box(Vec2::new(0.9, 3.5), Vec2::new(2.5, 4.0));
    let mut rig = Rig::new(world, BESIDE_LEDGE);
    rig.start_in(PlayerStateKind::InAir);

    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::LedgeClimb));

    rig.input.x = 1;
    rig.tick_with(&TickSignals {
        cues: vec![AnimationCue::Trigger],
        ..default()
    });
    assert!(rig.memory.ledge.is_some_and(|hang| hang.climbing && !hang.head_room));

    rig.tick_with(&TickSignals {
        cues: vec![AnimationCue::Finish],
        ..default()
    });
    assert_eq!(rig.state(), Some(PlayerStateKind::CrouchIdle));
    assert_vec_near(rig.position, Vec2::new(1.5, 2.85));
}

#[test]
fn test_drop_from_ledge() {
    let mut rig = Rig::new(low_block(), BESIDE_LEDGE);
    rig.start_in(PlayerStateKind::InAir);
    rig.tick();

    rig.input.y = -1;
    rig.step(0.15);
    rig.tick();

    assert_eq!(rig.state(), Some(PlayerStateKind::InAir));
    assert_vec_near(rig.position, Vec2::new(0.55, 1.4));
    assert_eq!(rig.memory.ledge, None);
}

#[test]
fn test_jump_off_ledge() {
    let mut rig = Rig::new(low_block(), BESIDE_LEDGE);
    rig.start_in(PlayerStateKind::InAir);
    rig.tick();

    rig.step(0.15);
    rig.press_jump();
    rig.tick();

    assert_eq!(rig.state(), Some(PlayerStateKind::WallJump));
    assert_eq!(rig.orientation.facing(), FacingDirection::Left);
}

#[test]
fn test_grab_ledge_when_walking_off() {
    let ledge = StaticGeometry::new().with_box(Vec2::new(-10.0, -5.0), Vec2::new(1.0, 0.0));
    let mut rig = Rig::new(ledge, Vec2::new(1.05, 0.8));
    rig.start_in(PlayerStateKind::Move);

    rig.input.x = 1;
    rig.tick();

    assert_eq!(rig.state(), Some(PlayerStateKind::LedgeClimb));
    assert_eq!(rig.orientation.facing(), FacingDirection::Left);
    assert_vec_near(rig.position, Vec2::new(1.45, -0.6));
    let hang = rig.memory.ledge.expect("hanging from the ledge");
    assert_vec_near(hang.corner, Vec2::new(1.0, 0.0));
    assert_vec_near(hang.stop, Vec2::new(0.5, 0.85));
}

#[test]
fn test_walking_off_thin_platform_falls() {
    let platform = StaticGeometry::new().with_box(Vec2::new(-10.0, -0.2), Vec2::new(1.0, 0.0));
    let mut rig = Rig::new(platform, Vec2::new(1.05, 0.8));
    rig.start_in(PlayerStateKind::Move);

    rig.input.x = 1;
    rig.tick();

    assert_eq!(rig.state(), Some(PlayerStateKind::InAir));
    assert_eq!(rig.memory.ledge, None);
}

#[test]
fn test_ledge_climb_without_corner_drops_to_air() {
    let mut rig = Rig::new(floor(), Vec2::new(0.0, 3.0));
    rig.start_in(PlayerStateKind::InAir);
    rig.with(|machine, ctx| machine.change_state(PlayerStateKind::LedgeClimb, ctx));
    assert_eq!(rig.memory.ledge, None);

    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::InAir));
}

// -----------------------------------------------------------------------------
// Aim and knockback tests
// -----------------------------------------------------------------------------

fn aiming_rig(world: StaticGeometry) -> Rig {
    let mut rig = Rig::new(world, STANDING);
    rig.loadout.active_weapon = Some("pistol".to_string());
    rig.start_in(PlayerStateKind::Idle);
    rig.input.aim_held = true;
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::Aim));
    rig.take_events();
    rig
}

fn fire(rig: &mut Rig) {
    rig.input.fire_just_pressed = true;
    rig.tick();
    rig.input.fire_just_pressed = false;
}

#[test]
fn test_aim_requires_weapon() {
    let mut rig = Rig::new(floor(), STANDING);
    rig.start_in(PlayerStateKind::Idle);
    rig.input.aim_held = true;
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::Idle));
}

#[test]
fn test_fire_applies_recoil_after_delay() {
    let mut rig = aiming_rig(floor());

    fire(&mut rig);
    assert_eq!(
        rig.take_events(),
        vec![LocomotionEventKind::ShotFired {
            facing: FacingDirection::Right,
        }]
    );
    assert!(!rig.knockback.is_active());

    rig.step(0.1);
    rig.tick();
    assert!(rig.take_events().contains(&LocomotionEventKind::KnockbackStarted {
        kind: KnockbackKind::Shoot,
        velocity: Vec2::new(-6.0, 2.0),
    }));
    // Aim's own zero-velocity write is refused while recoil runs.
    assert_eq!(rig.velocity.current(), Vec2::new(-6.0, 2.0));
    assert!(rig.velocity.dropped_writes() > 0);

    rig.step(0.25);
    rig.tick();
    assert!(
        rig.take_events()
            .contains(&LocomotionEventKind::KnockbackEnded {
                kind: KnockbackKind::Shoot,
            })
    );
    assert_eq!(rig.velocity.current().x, 0.0);
}

#[test]
fn test_fire_is_rate_limited_until_shot_finishes() {
    let mut rig = aiming_rig(floor());

    fire(&mut rig);
    rig.take_events();

    rig.step(0.05);
    fire(&mut rig);
    assert!(
        !rig.take_events()
            .iter()
            .any(|e| matches!(e, LocomotionEventKind::ShotFired { .. }))
    );

    rig.input.fire_just_pressed = true;
    rig.tick_with(&TickSignals {
        cues: vec![AnimationCue::Finish],
        ..default()
    });
    assert!(
        rig.take_events()
            .iter()
            .any(|e| matches!(e, LocomotionEventKind::ShotFired { .. }))
    );
}

#[test]
fn test_reload_request() {
    let mut rig = aiming_rig(floor());
    rig.animation.drain();

    rig.input.reload_just_pressed = true;
    rig.tick();

    assert_eq!(rig.take_events(), vec![LocomotionEventKind::ReloadRequested]);
    assert!(
        rig.animation
            .drain()
            .iter()
            .any(|w| w.name == params::RELOAD && w.value == AnimationValue::Trigger)
    );
}

#[test]
fn test_recoil_into_wall_bounces_off() {
    let wall_behind = floor().with_box(Vec2::new(-1.0, 0.0), Vec2::new(-0.5, 5.0));
    let mut rig = aiming_rig(wall_behind);

    fire(&mut rig);
    rig.take_events();

    rig.step(0.1);
    rig.tick();

    let events = rig.take_events();
    assert_eq!(
        &events[..3],
        &[
            LocomotionEventKind::KnockbackStarted {
                kind: KnockbackKind::Shoot,
                velocity: Vec2::new(-6.0, 2.0),
            },
            LocomotionEventKind::KnockbackEnded {
                kind: KnockbackKind::Shoot,
            },
            LocomotionEventKind::KnockbackStarted {
                kind: KnockbackKind::WallCollision,
                velocity: Vec2::new(4.0, 3.0),
            },
        ]
    );
    assert_eq!(
        rig.knockback.active().map(|k| k.kind),
        Some(KnockbackKind::WallCollision)
    );
    assert_eq!(rig.velocity.current(), Vec2::new(4.0, 3.0));
}

#[test]
fn test_leaving_aim_cancels_fire_lock() {
    let mut rig = aiming_rig(floor());
    fire(&mut rig);
    assert!(rig.memory.fire_lock.is_scheduled());

    rig.input.aim_held = false;
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::Idle));
    assert!(!rig.memory.fire_lock.is_scheduled());
}

// -----------------------------------------------------------------------------
// Death tests
// -----------------------------------------------------------------------------

#[test]
fn test_death_disables_input_until_respawn() {
    let mut rig = aiming_rig(floor());
    fire(&mut rig);
    assert!(rig.knockback.pending().is_some());

    let died = TickSignals {
        died: true,
        ..default()
    };
    rig.tick_with(&died);
    assert_eq!(rig.state(), Some(PlayerStateKind::Death));
    assert!(!rig.input.enabled);
    assert!(!rig.input.aim_held);
    assert!(rig.knockback.pending().is_none());
    assert_eq!(rig.velocity.current(), Vec2::ZERO);
    assert!(rig.animation.get_bool(params::DEAD));

    let transitions = rig.machine.transitions();
    rig.tick_with(&died);
    assert_eq!(rig.machine.transitions(), transitions);

    rig.input.x = 1;
    rig.tick();
    assert_eq!(rig.state(), Some(PlayerStateKind::Death));

    rig.input.x = 0;
    rig.tick_with(&TickSignals {
        respawned: true,
        ..default()
    });
    assert_eq!(rig.state(), Some(PlayerStateKind::Idle));
    assert!(rig.input.enabled);
    assert!(!rig.animation.get_bool(params::DEAD));
}

#[test]
fn test_respawn_ignored_while_alive() {
    let mut rig = Rig::new(floor(), STANDING);
    rig.start_in(PlayerStateKind::Idle);

    rig.tick_with(&TickSignals {
        respawned: true,
        ..default()
    });
    assert_eq!(rig.state(), Some(PlayerStateKind::Idle));
    assert_eq!(rig.machine.transitions(), 0);
}
