//! Content domain: data-driven locomotion tuning loaded from RON at startup.

mod loader;
mod validation;


pub use loader::{ContentLoadError, load_player_data_file, parse_player_data};
pub use validation::{ValidationError, validate_player_data};

use bevy::prelude::*;
use std::path::Path;

use crate::movement::PlayerData;

/// Location of the player tuning file, relative to the working directory.
pub const PLAYER_DATA_PATH: &str = "assets/data/player_data.ron";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_player_data);
    }
}

/// Load and validate `player_data.ron`, keeping the defaults if either step fails.
pub fn load_player_data(mut commands: Commands) {
    let path = Path::new(PLAYER_DATA_PATH);
    let data = match load_player_data_file(path) {
        Ok(data) => data,
        Err(e) => {
            warn!("{}; using default player data", e);
            commands.insert_resource(PlayerData::default());
            return;
        }
    };

    let errors = validate_player_data(&data);
    if !errors.is_empty() {
        for error in &errors {
            warn!("Player data validation: {}", error);
        }
        warn!(
            "{} validation error(s) in {}; using default player data",
            errors.len(),
            PLAYER_DATA_PATH
        );
        commands.insert_resource(PlayerData::default());
        return;
    }

    info!(
        "Loaded player data from {}: move={}, jump={}, gravity={}",
        PLAYER_DATA_PATH, data.movement_velocity, data.jump_velocity, data.gravity
    );
    commands.insert_resource(data);
}
