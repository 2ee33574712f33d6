//! Core domain: pause gate and camera.

mod resources;
mod systems;


pub use resources::{GameplayPaused, gameplay_active};

use bevy::prelude::*;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameplayPaused>()
            .add_systems(Startup, systems::setup_camera);

        #[cfg(feature = "dev-tools")]
        app.add_systems(Update, systems::toggle_debug_pause);
    }
}
