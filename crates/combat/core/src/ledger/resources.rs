//! Per-actor energy pools.
//!
//! Every actor owns a fah pool and a brih pool. Casting reserves energy from
//! the pools its school requires, and pools regenerate continuously.

use std::collections::BTreeMap;

use crate::env::EnergyCost;
use crate::state::{ActorId, School};

use super::LedgerError;

/// Which energy pool a value refers to.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PoolKind {
    Fah,
    Brih,
}

/// A single energy pool. `current` always lies in `[0, maximum]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnergyPool {
    current: f32,
    maximum: f32,
    /// Energy regained per second.
    pub regen_rate: f32,
}

impl EnergyPool {
    pub fn new(current: f32, maximum: f32, regen_rate: f32) -> Self {
        let maximum = maximum.max(0.0);
        Self {
            current: current.clamp(0.0, maximum),
            maximum,
            regen_rate,
        }
    }

    /// A pool filled to its maximum.
    pub fn full(maximum: f32, regen_rate: f32) -> Self {
        Self::new(maximum, maximum, regen_rate)
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn maximum(&self) -> f32 {
        self.maximum
    }

    pub fn set_current(&mut self, value: f32) {
        self.current = value.clamp(0.0, self.maximum);
    }

    pub fn add(&mut self, amount: f32) {
        self.set_current(self.current + amount);
    }

    #[inline]
    pub fn covers(&self, amount: f32) -> bool {
        self.current >= amount
    }
}

/// Both pools of one actor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnergyPools {
    pub fah: EnergyPool,
    pub brih: EnergyPool,
}

impl EnergyPools {
    pub fn new(fah: EnergyPool, brih: EnergyPool) -> Self {
        Self { fah, brih }
    }

    pub fn get(&self, kind: PoolKind) -> &EnergyPool {
        match kind {
            PoolKind::Fah => &self.fah,
            PoolKind::Brih => &self.brih,
        }
    }

    pub fn get_mut(&mut self, kind: PoolKind) -> &mut EnergyPool {
        match kind {
            PoolKind::Fah => &mut self.fah,
            PoolKind::Brih => &mut self.brih,
        }
    }

    fn regen(&mut self, dt: f32) {
        self.fah.add(self.fah.regen_rate * dt);
        self.brih.add(self.brih.regen_rate * dt);
    }
}

/// Energy pools of every actor, keyed by actor id.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceLedger {
    pools: BTreeMap<ActorId, EnergyPools>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the pools of `actor`.
    pub fn insert(&mut self, actor: ActorId, pools: EnergyPools) {
        self.pools.insert(actor, pools);
    }

    pub fn remove(&mut self, actor: ActorId) -> Option<EnergyPools> {
        self.pools.remove(&actor)
    }

    pub fn pools(&self, actor: ActorId) -> Option<&EnergyPools> {
        self.pools.get(&actor)
    }

    pub fn current(&self, actor: ActorId, kind: PoolKind) -> Option<f32> {
        self.pools(actor).map(|pools| pools.get(kind).current())
    }

    /// Overwrites the current value of one pool, clamped to its maximum.
    pub fn set_current(
        &mut self,
        actor: ActorId,
        kind: PoolKind,
        value: f32,
    ) -> Result<(), LedgerError> {
        let pools = self
            .pools
            .get_mut(&actor)
            .ok_or(LedgerError::UnknownActor(actor))?;
        pools.get_mut(kind).set_current(value);
        Ok(())
    }

    /// Atomically deducts the energy an attack of `school` costs.
    ///
    /// Returns false without touching any pool when a required pool is short.
    /// A zero cost always succeeds, even for actors without pools.
    pub fn try_reserve(&mut self, actor: ActorId, school: School, cost: &EnergyCost) -> bool {
        let (fah, brih) = cost.requirements(school);
        if fah <= 0.0 && brih <= 0.0 {
            return true;
        }
        let Some(pools) = self.pools.get_mut(&actor) else {
            return false;
        };
        if !pools.fah.covers(fah) || !pools.brih.covers(brih) {
            return false;
        }
        pools.fah.add(-fah.max(0.0));
        pools.brih.add(-brih.max(0.0));
        true
    }

    /// Regenerates both pools of `actor` for `dt` seconds.
    pub fn regen(&mut self, actor: ActorId, dt: f32) -> Result<(), LedgerError> {
        let pools = self
            .pools
            .get_mut(&actor)
            .ok_or(LedgerError::UnknownActor(actor))?;
        pools.regen(dt);
        Ok(())
    }

    /// Regenerates the pools of every listed actor. Unknown ids are skipped.
    pub fn regen_all<'a>(&mut self, actors: impl IntoIterator<Item = &'a ActorId>, dt: f32) {
        for actor in actors {
            if let Some(pools) = self.pools.get_mut(actor) {
                pools.regen(dt);
            }
        }
    }

    /// Adds `amount` to every pool of `actor`, clamped to each maximum.
    pub fn restore(&mut self, actor: ActorId, amount: f32) -> Result<(), LedgerError> {
        let pools = self
            .pools
            .get_mut(&actor)
            .ok_or(LedgerError::UnknownActor(actor))?;
        pools.fah.add(amount);
        pools.brih.add(amount);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ActorId, &EnergyPools)> {
        self.pools.iter()
    }
}
