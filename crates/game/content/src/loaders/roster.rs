//! Enemy roster loader.

use std::path::Path;

use game_core::{CharacterPreset, Loadout};

use crate::loaders::{LoadResult, read_file};

/// Loader for named enemy loadouts from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load an enemy roster from a RON file.
    ///
    /// RON format: `Vec<(String, Loadout)>`. Every entry must derive a
    /// spawnable preset and names must be unique.
    pub fn load(path: &Path) -> LoadResult<Vec<(String, Loadout)>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<(String, Loadout)>> {
        let roster: Vec<(String, Loadout)> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        for (index, (name, loadout)) in roster.iter().enumerate() {
            if roster[..index].iter().any(|(other, _)| other == name) {
                anyhow::bail!("Duplicate roster entry '{}'", name);
            }
            CharacterPreset::enemy(loadout)
                .validate()
                .map_err(|e| anyhow::anyhow!("Roster entry '{}' is not spawnable: {}", name, e))?;
        }
        tracing::debug!(entries = roster.len(), "loaded enemy roster");

        Ok(roster)
    }
}
