//! Actor templates and the oracle that serves them.
//!
//! Templates describe every spawn-time field of an actor except its id and
//! position. The runtime spawns actors from templates by definition id
//! (e.g. "fah_adept", "goblin").

use std::collections::BTreeMap;

use crate::ledger::{EnergyPool, EnergyPools};
use crate::state::{Actor, ActorId, Faction, Point};

use super::attacks::{DefinitionError, non_negative};

/// Spawn-time shape of one energy pool. Pools start full.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolTemplate {
    pub maximum: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub regen_rate: f32,
}

impl PoolTemplate {
    pub const fn new(maximum: f32, regen_rate: f32) -> Self {
        Self {
            maximum,
            regen_rate,
        }
    }
}

/// Data-driven description of an actor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorTemplate {
    pub faction: Faction,
    pub max_health: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defense: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub speed: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fah: PoolTemplate,
    #[cfg_attr(feature = "serde", serde(default))]
    pub brih: PoolTemplate,
    #[cfg_attr(feature = "serde", serde(default))]
    pub loot_table: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub player_controlled: bool,
}

impl ActorTemplate {
    /// Creates a living actor and its full energy pools from this template.
    pub fn to_actor(&self, id: ActorId, position: Point) -> (Actor, EnergyPools) {
        let mut actor = Actor::new(id, self.faction, position, self.max_health)
            .with_defense(self.defense)
            .with_speed(self.speed);
        if let Some(table) = &self.loot_table {
            actor = actor.with_loot_table(table.clone());
        }
        if self.player_controlled {
            actor = actor.player_controlled();
        }
        let pools = EnergyPools::new(
            EnergyPool::full(self.fah.maximum, self.fah.regen_rate),
            EnergyPool::full(self.brih.maximum, self.brih.regen_rate),
        );
        (actor, pools)
    }

    pub fn validate(&self, id: &str) -> Result<(), DefinitionError> {
        if id.is_empty() {
            return Err(DefinitionError::EmptyId);
        }
        non_negative(id, "max_health", self.max_health)?;
        non_negative(id, "defense", self.defense)?;
        non_negative(id, "speed", self.speed)?;
        non_negative(id, "fah.maximum", self.fah.maximum)?;
        non_negative(id, "brih.maximum", self.brih.maximum)?;
        non_negative(id, "fah.regen_rate", self.fah.regen_rate)?;
        non_negative(id, "brih.regen_rate", self.brih.regen_rate)
    }

    pub fn builder() -> ActorTemplateBuilder {
        ActorTemplateBuilder::default()
    }
}

/// Builder for actor templates, mostly used by tests and tools.
#[derive(Default)]
pub struct ActorTemplateBuilder {
    faction: Option<Faction>,
    max_health: Option<f32>,
    defense: Option<f32>,
    speed: Option<f32>,
    fah: Option<PoolTemplate>,
    brih: Option<PoolTemplate>,
    loot_table: Option<String>,
    player_controlled: bool,
}

impl ActorTemplateBuilder {
    pub fn faction(mut self, faction: Faction) -> Self {
        self.faction = Some(faction);
        self
    }

    pub fn max_health(mut self, max_health: f32) -> Self {
        self.max_health = Some(max_health);
        self
    }

    pub fn defense(mut self, defense: f32) -> Self {
        self.defense = Some(defense);
        self
    }

    pub fn speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn fah(mut self, maximum: f32, regen_rate: f32) -> Self {
        self.fah = Some(PoolTemplate::new(maximum, regen_rate));
        self
    }

    pub fn brih(mut self, maximum: f32, regen_rate: f32) -> Self {
        self.brih = Some(PoolTemplate::new(maximum, regen_rate));
        self
    }

    pub fn loot_table(mut self, table: impl Into<String>) -> Self {
        self.loot_table = Some(table.into());
        self
    }

    pub fn player_controlled(mut self) -> Self {
        self.player_controlled = true;
        self
    }

    pub fn build(self) -> ActorTemplate {
        ActorTemplate {
            faction: self.faction.unwrap_or_default(),
            max_health: self.max_health.unwrap_or(100.0),
            defense: self.defense.unwrap_or(0.0),
            speed: self.speed.unwrap_or(0.0),
            fah: self.fah.unwrap_or_default(),
            brih: self.brih.unwrap_or_default(),
            loot_table: self.loot_table,
            player_controlled: self.player_controlled,
        }
    }
}

/// Read access to actor templates by definition id.
pub trait ActorOracle: Send + Sync {
    fn template(&self, def_id: &str) -> Option<&ActorTemplate>;

    /// All known definition ids, in ascending order.
    fn ids(&self) -> Vec<String>;
}

/// In-memory actor template registry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActorCatalog {
    templates: BTreeMap<String, ActorTemplate>,
}

impl ActorCatalog {
    pub fn new(
        templates: impl IntoIterator<Item = (String, ActorTemplate)>,
    ) -> Result<Self, DefinitionError> {
        let mut map = BTreeMap::new();
        for (id, template) in templates {
            template.validate(&id)?;
            if map.contains_key(&id) {
                return Err(DefinitionError::Duplicate(id));
            }
            map.insert(id, template);
        }
        Ok(Self { templates: map })
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl ActorOracle for ActorCatalog {
    fn template(&self, def_id: &str) -> Option<&ActorTemplate> {
        self.templates.get(def_id)
    }

    fn ids(&self) -> Vec<String> {
        self.templates.keys().cloned().collect()
    }
}
