//! Loader for RON tuning files at startup.

use ron::Options;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::look::LookTuning;
use crate::movement::MovementTuning;
use crate::respawn::RespawnTuning;
use crate::ui::TooltipTable;

pub const MOVEMENT_FILE: &str = "movement.ron";
pub const LOOK_FILE: &str = "look.ron";
pub const RESPAWN_FILE: &str = "respawn.ron";
pub const TOOLTIPS_FILE: &str = "tooltips.ron";

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ContentLoadError {}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse a single tuning struct from RON text. Fields left out of the text keep
/// their compiled defaults.
pub fn parse_tuning<T>(file: &str, contents: &str) -> Result<T, ContentLoadError>
where
    T: DeserializeOwned,
{
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })
}

/// Load a tuning file. A missing file is not an error and yields `Ok(None)`.
pub fn load_tuning_file<T>(path: &Path) -> Result<Option<T>, ContentLoadError>
where
    T: DeserializeOwned,
{
    if !path.exists() {
        return Ok(None);
    }

    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_tuning(&file_name, &contents).map(Some)
}

/// Every tuning and text resource the game reads, as loaded from disk.
#[derive(Debug, Clone, Default)]
pub struct TuningSet {
    pub movement: MovementTuning,
    pub look: LookTuning,
    pub respawn: RespawnTuning,
    pub tooltips: TooltipTable,
}

/// Load all tuning from assets/data/*.ron. Files that are missing or fail to
/// parse leave the matching defaults in place; failures are returned alongside.
pub fn load_all_tuning(base_path: &Path) -> (TuningSet, Vec<ContentLoadError>) {
    let mut tuning = TuningSet::default();
    let mut errors = Vec::new();

    macro_rules! load_into {
        ($field:expr, $file:expr) => {
            match load_tuning_file(&base_path.join($file)) {
                Ok(Some(loaded)) => $field = loaded,
                Ok(None) => {}
                Err(e) => errors.push(e),
            }
        };
    }

    load_into!(tuning.movement, MOVEMENT_FILE);
    load_into!(tuning.look, LOOK_FILE);
    load_into!(tuning.respawn, RESPAWN_FILE);
    load_into!(tuning.tooltips, TOOLTIPS_FILE);

    (tuning, errors)
}
