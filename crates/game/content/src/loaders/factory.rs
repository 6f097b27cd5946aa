//! Content factory for loading an encounter's data files.

use std::path::{Path, PathBuf};

use game_core::{CombatConfig, Loadout};

use crate::loaders::{ConfigLoader, LoadResult, RosterLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── roster.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The data directory bundled with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load combat tunables from `config.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the enemy roster from `roster.ron`.
    pub fn load_roster(&self) -> LoadResult<Vec<(String, Loadout)>> {
        RosterLoader::load(&self.data_dir.join("roster.ron"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
