//! Collider dimensions owned by the character.

use bevy::prelude::*;

/// Width/height of the character collider and its offset from the body origin.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct ColliderShape {
    pub size: Vec2,
    pub offset: Vec2,
    /// Shape at the first resize; later resizes are relative to this
    original: Option<(Vec2, Vec2)>,
}

impl ColliderShape {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            offset: Vec2::ZERO,
            original: None,
        }
    }

    pub fn half_width(&self) -> f32 {
        self.size.x * 0.5
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Bottom edge relative to the body origin.
    pub fn bottom(&self) -> f32 {
        self.offset.y - self.size.y * 0.5
    }

    /// Resize vertically while keeping the bottom edge where it was originally.
    ///
    /// Returns whether the shape changed.
    pub fn set_collider_height(&mut self, height: f32) -> bool {
        let (original_size, original_offset) = *self.original.get_or_insert((self.size, self.offset));
        let size = Vec2::new(original_size.x, height);
        let offset = Vec2::new(
            original_offset.x,
            original_offset.y + (height - original_size.y) * 0.5,
        );

        if size == self.size && offset == self.offset {
            return false;
        }
        self.size = size;
        self.offset = offset;
        true
    }
}
