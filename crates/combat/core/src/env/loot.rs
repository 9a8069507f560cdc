use std::collections::BTreeMap;

use crate::config::CombatConfig;
use crate::state::ItemId;

use super::attacks::{DefinitionError, unit_range};

/// One independent roll of a loot table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootEntry {
    pub item: ItemId,
    /// Chance in `[0, 1]` that this entry drops.
    pub probability: f32,
}

impl LootEntry {
    pub fn new(item: impl Into<String>, probability: f32) -> Self {
        Self {
            item: ItemId::new(item),
            probability,
        }
    }
}

/// Items an actor may drop on death; each entry is rolled independently.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootTable {
    pub id: String,
    pub entries: Vec<LootEntry>,
}

impl LootTable {
    pub fn new(id: impl Into<String>, entries: Vec<LootEntry>) -> Self {
        Self {
            id: id.into(),
            entries,
        }
    }

    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.id.is_empty() {
            return Err(DefinitionError::EmptyId);
        }
        if self.entries.len() > CombatConfig::MAX_LOOT_ENTRIES {
            return Err(DefinitionError::TooManyEntries {
                id: self.id.clone(),
                count: self.entries.len(),
                max: CombatConfig::MAX_LOOT_ENTRIES,
            });
        }
        for entry in &self.entries {
            unit_range(&self.id, "probability", entry.probability)?;
        }
        Ok(())
    }
}

/// Read access to loot tables by id.
pub trait LootOracle: Send + Sync {
    fn table(&self, id: &str) -> Option<&LootTable>;
}

/// In-memory loot table registry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LootCatalog {
    tables: BTreeMap<String, LootTable>,
}

impl LootCatalog {
    pub fn new(tables: impl IntoIterator<Item = LootTable>) -> Result<Self, DefinitionError> {
        let mut map = BTreeMap::new();
        for table in tables {
            table.validate()?;
            let id = table.id.clone();
            if map.insert(id.clone(), table).is_some() {
                return Err(DefinitionError::Duplicate(id));
            }
        }
        Ok(Self { tables: map })
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LootTable> {
        self.tables.values()
    }
}

impl LootOracle for LootCatalog {
    fn table(&self, id: &str) -> Option<&LootTable> {
        self.tables.get(id)
    }
}
