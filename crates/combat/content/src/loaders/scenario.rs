//! Scenario loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::scenario::ScenarioSpec;

/// Loader for scripted scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<ScenarioSpec> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Load one of the scenarios shipped with this crate by name.
    pub fn load_embedded(name: &str) -> LoadResult<ScenarioSpec> {
        let content = match name {
            "duel" => include_str!("../../data/scenarios/duel.ron"),
            "skirmish" => include_str!("../../data/scenarios/skirmish.ron"),
            "last_stand" => include_str!("../../data/scenarios/last_stand.ron"),
            other => anyhow::bail!("No embedded scenario named '{}'", other),
        };
        Self::parse(content)
    }

    pub fn parse(content: &str) -> LoadResult<ScenarioSpec> {
        let mut spec: ScenarioSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;
        spec.normalize().map_err(|e| anyhow::anyhow!(e))?;
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ScriptedAim;

    #[test]
    fn embedded_duel_parses() {
        let duel = ScenarioLoader::load_embedded("duel").unwrap();
        assert_eq!(duel.name, "duel");
        assert_eq!(duel.actors.len(), 2);
        assert_eq!(duel.casts[0].attack, "fireDart");
        assert_eq!(duel.casts[0].aim, ScriptedAim::Actor("rival".into()));
    }

    #[test]
    fn every_embedded_scenario_parses() {
        for name in ["duel", "skirmish", "last_stand"] {
            ScenarioLoader::load_embedded(name).unwrap();
        }
        assert!(ScenarioLoader::load_embedded("nope").is_err());
    }
}
