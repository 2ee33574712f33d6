use bevy::prelude::*;

use super::{PlayerContext, PlayerStateKind};
use crate::movement::animation::AnimationCue;
use crate::movement::events::LocomotionEventKind;

/// Messages addressed to one character since its previous logic tick.
#[derive(Debug, Default, Clone)]
pub struct TickSignals {
    pub cues: Vec<AnimationCue>,
    pub died: bool,
    pub respawned: bool,
}

/// Holds the current locomotion state and performs transitions.
///
/// During a transition the outgoing state's exit runs before `current`
/// changes, and the incoming state's enter runs after, so no state ever
/// observes another one as current.
#[derive(Component, Debug, Default, Clone)]
pub struct StateMachine {
    current: Option<PlayerStateKind>,
    previous: Option<PlayerStateKind>,
    transitions: u32,
}

impl StateMachine {
    pub fn current(&self) -> Option<PlayerStateKind> {
        self.current
    }

    pub fn previous(&self) -> Option<PlayerStateKind> {
        self.previous
    }

    /// Number of transitions since initialization.
    pub fn transitions(&self) -> u32 {
        self.transitions
    }

    pub fn is_initialized(&self) -> bool {
        self.current.is_some()
    }

    pub fn initialize(&mut self, initial: PlayerStateKind, ctx: &mut PlayerContext) {
        if let Some(current) = self.current {
            warn!(
                "State machine already running in {:?}; re-initializing to {:?}",
                current, initial
            );
            current.exit(ctx);
        }
        self.current = Some(initial);
        initial.enter(ctx);
        ctx.emit(LocomotionEventKind::StateChanged {
            from: None,
            to: initial,
        });
        info!("Locomotion initialized in {:?}", initial);
    }

    pub fn change_state(&mut self, next: PlayerStateKind, ctx: &mut PlayerContext) {
        let from = self.current.take();
        if let Some(from) = from {
            from.exit(ctx);
        }
        self.previous = from;
        self.current = Some(next);
        next.enter(ctx);
        self.transitions += 1;

        debug!("State {:?} -> {:?}", from, next);
        ctx.emit(LocomotionEventKind::StateChanged { from, to: next });
    }

    /// One logic tick: lifecycle messages, animation cues, knockback deadlines,
    /// then the current state's logic.
    pub fn tick(&mut self, ctx: &mut PlayerContext, signals: &TickSignals) {
        if !self.is_initialized() {
            self.initialize(PlayerStateKind::Idle, ctx);
        }
        if signals.died && self.current != Some(PlayerStateKind::Death) {
            self.change_state(PlayerStateKind::Death, ctx);
        }
        if signals.respawned && self.current == Some(PlayerStateKind::Death) {
            self.change_state(PlayerStateKind::Idle, ctx);
        }
        for cue in &signals.cues {
            match cue {
                AnimationCue::Trigger => self.animation_trigger(ctx),
                AnimationCue::Finish => self.animation_finish_trigger(ctx),
            }
        }
        ctx.tick_knockback();
        self.logic_update(ctx);
    }

    /// Refresh checks, then let the current state decide on a transition.
    pub fn logic_update(&mut self, ctx: &mut PlayerContext) {
        let Some(state) = self.current else {
            return;
        };
        let behavior = state.behavior();
        behavior.do_checks(ctx);
        if let Some(next) = behavior.logic_update(ctx) {
            self.change_state(next, ctx);
        }
    }

    pub fn physics_update(&mut self, ctx: &mut PlayerContext) {
        let Some(state) = self.current else {
            return;
        };
        // Wall-contact bookkeeping belongs to the logic tick.
        ctx.refresh_snapshot();
        state.behavior().physics_update(ctx);
    }

    pub fn animation_trigger(&self, ctx: &mut PlayerContext) {
        if let Some(state) = self.current {
            state.behavior().animation_trigger(ctx);
        }
    }

    pub fn animation_finish_trigger(&self, ctx: &mut PlayerContext) {
        if let Some(state) = self.current {
            state.behavior().animation_finish_trigger(ctx);
        }
    }
}
