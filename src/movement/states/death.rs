use bevy::prelude::*;

use super::{PlayerContext, PlayerState, PlayerStateKind};

/// Terminal until the health collaborator respawns the player.
pub(super) struct DeathState;

impl PlayerState for DeathState {
    fn enter(&self, ctx: &mut PlayerContext) {
        ctx.knockback.cancel_knockback();
        ctx.set_velocity_zero();
        ctx.input.clear();
        ctx.input.enabled = false;
        ctx.memory.hold_position = None;
        ctx.memory.ledge = None;
        info!("Player died; locomotion input disabled");
    }

    fn exit(&self, ctx: &mut PlayerContext) {
        ctx.input.enabled = true;
        info!("Player respawned; locomotion input enabled");
    }

    fn logic_update(&self, _ctx: &mut PlayerContext) -> Option<PlayerStateKind> {
        None
    }
}
