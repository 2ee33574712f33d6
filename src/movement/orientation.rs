//! Movement domain: facing direction and flips.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FacingDirection {
    Left,
    #[default]
    Right,
}

impl FacingDirection {
    pub fn sign(self) -> i8 {
        match self {
            FacingDirection::Left => -1,
            FacingDirection::Right => 1,
        }
    }

    pub fn signum(self) -> f32 {
        self.sign() as f32
    }

    pub fn opposite(self) -> Self {
        match self {
            FacingDirection::Left => FacingDirection::Right,
            FacingDirection::Right => FacingDirection::Left,
        }
    }

    pub fn dir(self) -> Dir2 {
        match self {
            FacingDirection::Left => Dir2::NEG_X,
            FacingDirection::Right => Dir2::X,
        }
    }

    /// Direction for a non-zero axis value; `None` for 0.
    pub fn from_axis(x: i8) -> Option<Self> {
        match x.signum() {
            -1 => Some(FacingDirection::Left),
            1 => Some(FacingDirection::Right),
            _ => None,
        }
    }

    pub fn from_velocity(x: f32) -> Option<Self> {
        if x > 0.0 {
            Some(FacingDirection::Right)
        } else if x < 0.0 {
            Some(FacingDirection::Left)
        } else {
            None
        }
    }
}

#[derive(Component, Debug, Default, Clone)]
pub struct Orientation {
    facing: FacingDirection,
    flips: u32,
}

impl Orientation {
    pub fn new(facing: FacingDirection) -> Self {
        Self { facing, flips: 0 }
    }

    pub fn facing(&self) -> FacingDirection {
        self.facing
    }

    /// Total number of flips since spawn.
    pub fn flips(&self) -> u32 {
        self.flips
    }

    pub fn flip(&mut self) {
        self.facing = self.facing.opposite();
        self.flips += 1;
    }

    /// Turn toward a non-zero horizontal input. Returns whether a flip happened.
    pub fn check_flip(&mut self, x_input: i8) -> bool {
        match FacingDirection::from_axis(x_input) {
            Some(wanted) if wanted != self.facing => {
                self.flip();
                true
            }
            _ => false,
        }
    }

    /// Face `direction`, flipping only if needed.
    pub fn face(&mut self, direction: FacingDirection) {
        if self.facing != direction {
            self.flip();
        }
    }
}
