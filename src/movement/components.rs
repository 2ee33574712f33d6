//! Movement domain: marker components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms, ledge tops)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
    /// Objects the player can push or pull
    Pushable,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

/// Marker for the child entity carrying the player's collision shape and sprite.
#[derive(Component, Debug)]
pub struct PlayerHitShape;

/// Link from the player body to its [`PlayerHitShape`] child.
#[derive(Component, Debug, Clone, Copy)]
pub struct HitShapeEntity(pub Entity);

/// Narrow contract with the equipment collaborator: the locomotion core only
/// needs to know whether something can be aimed.
#[derive(Component, Debug, Default, Clone)]
pub struct Loadout {
    pub active_weapon: Option<String>,
}

impl Loadout {
    pub fn has_active_weapon(&self) -> bool {
        self.active_weapon.is_some()
    }
}

/// A body the player can push or pull.
#[derive(Component, Debug, Clone, Copy)]
pub struct Pushable {
    pub weight: f32,
}
