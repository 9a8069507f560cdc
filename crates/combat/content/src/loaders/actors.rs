//! Actor template loader.

use std::path::Path;

use combat_core::{ActorCatalog, ActorTemplate};

use crate::loaders::{LoadResult, read_file};

/// Loader for actor templates from RON files.
///
/// RON format: `Vec<(String, ActorTemplate)>` keyed by definition id.
pub struct ActorLoader;

impl ActorLoader {
    pub fn load(path: &Path) -> LoadResult<ActorCatalog> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn load_embedded() -> LoadResult<ActorCatalog> {
        Self::parse(include_str!("../../data/actors.ron"))
    }

    pub fn parse(content: &str) -> LoadResult<ActorCatalog> {
        let templates: Vec<(String, ActorTemplate)> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse actor catalog RON: {}", e))?;
        ActorCatalog::new(templates).map_err(|e| anyhow::anyhow!("Invalid actor catalog: {}", e))
    }
}
