//! Loot table loader.

use std::path::Path;

use combat_core::{LootCatalog, LootTable};

use crate::loaders::{LoadResult, read_file};

/// Loader for loot tables from RON files.
///
/// RON format: `Vec<LootTable>`.
pub struct LootLoader;

impl LootLoader {
    pub fn load(path: &Path) -> LoadResult<LootCatalog> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn load_embedded() -> LoadResult<LootCatalog> {
        Self::parse(include_str!("../../data/loot.ron"))
    }

    pub fn parse(content: &str) -> LoadResult<LootCatalog> {
        let tables: Vec<LootTable> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse loot table RON: {}", e))?;
        LootCatalog::new(tables).map_err(|e| anyhow::anyhow!("Invalid loot tables: {}", e))
    }
}
