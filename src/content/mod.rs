//! Content domain: data-driven tuning loaded from RON files.

mod loader;
mod validation;

use bevy::prelude::*;
use std::path::Path;

use crate::content::loader::load_all_tuning;
use crate::content::validation::validate_tuning;

/// Directory the tuning files are read from, relative to the working directory.
pub const DATA_DIR: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_tuning_content);
    }
}

/// Load tuning from disk and insert it as resources. Anything that fails keeps
/// its compiled default.
fn load_tuning_content(mut commands: Commands) {
    let (tuning, errors) = load_all_tuning(Path::new(DATA_DIR));
    for error in &errors {
        warn!("{}; keeping defaults", error);
    }

    let problems = validate_tuning(&tuning);
    for problem in &problems {
        warn!("Tuning validation: {}", problem);
    }

    info!(
        "Tuning loaded from {} ({} load errors, {} validation warnings)",
        DATA_DIR,
        errors.len(),
        problems.len()
    );

    commands.insert_resource(tuning.movement);
    commands.insert_resource(tuning.look);
    commands.insert_resource(tuning.respawn);
    commands.insert_resource(tuning.tooltips);
}

#[cfg(test)]
mod tests;
