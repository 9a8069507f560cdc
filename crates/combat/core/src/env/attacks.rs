//! Attack definitions and the catalog oracle.
//!
//! Definitions are immutable records loaded once from content data. The
//! engine only reads them through [`AttackOracle`].

use std::collections::BTreeMap;

use crate::state::{AttackId, School, StatusEffectType};

/// Energy an attack consumes when cast.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnergyCost {
    /// Charged to the pool of the attack's school. A combined attack pays
    /// half from each pool.
    Flat(f32),
    /// Explicit amount from each pool, independent of school.
    Split { fah: f32, brih: f32 },
}

impl EnergyCost {
    pub const FREE: Self = Self::Flat(0.0);

    /// Amount required from the (fah, brih) pools for an attack of `school`.
    pub fn requirements(&self, school: School) -> (f32, f32) {
        match (*self, school) {
            (Self::Flat(amount), School::Fah) => (amount, 0.0),
            (Self::Flat(amount), School::Brih) => (0.0, amount),
            (Self::Flat(amount), School::Combined) => (amount / 2.0, amount / 2.0),
            (Self::Split { fah, brih }, _) => (fah, brih),
        }
    }

    pub fn total(&self) -> f32 {
        match *self {
            Self::Flat(amount) => amount,
            Self::Split { fah, brih } => fah + brih,
        }
    }
}

impl Default for EnergyCost {
    fn default() -> Self {
        Self::FREE
    }
}

/// Which visual the presentation layer should spawn for an attack.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum VisualKind {
    #[default]
    Impact,
    Burst,
    Nova,
}

/// Payload of an effect attached to an attack definition.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectSpec {
    Burn {
        damage_per_second: f32,
    },
    Freeze {
        slow_factor: f32,
    },
    Stun,
    Armor {
        damage_reduction: f32,
    },
    Regeneration {
        heal_per_second: f32,
        energy_per_second: f32,
    },
    Elemental {
        damage_per_second: f32,
        slow_factor: f32,
    },
}

impl EffectSpec {
    pub const fn effect_type(&self) -> StatusEffectType {
        match self {
            Self::Burn { .. } => StatusEffectType::Burn,
            Self::Freeze { .. } => StatusEffectType::Freeze,
            Self::Stun => StatusEffectType::Stun,
            Self::Armor { .. } => StatusEffectType::Armor,
            Self::Regeneration { .. } => StatusEffectType::Regeneration,
            Self::Elemental { .. } => StatusEffectType::Elemental,
        }
    }
}

/// A timed effect applied by an attack.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectTemplate {
    /// Seconds the effect lasts once applied.
    pub duration: f32,
    pub effect: EffectSpec,
}

impl EffectTemplate {
    pub const fn new(duration: f32, effect: EffectSpec) -> Self {
        Self { duration, effect }
    }
}

/// Immutable description of an attack.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackDefinition {
    pub id: AttackId,
    pub school: School,
    pub base_damage: f32,
    pub energy_cost: EnergyCost,
    /// Seconds before the same caster may use this attack again.
    pub cooldown: f32,
    /// Area of effect around the aim point, in world units.
    pub radius: f32,
    /// Seconds the attack instance lives after the cast.
    pub visual_lifetime: f32,
    /// Effects applied to every surviving target.
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<EffectTemplate>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub visual: VisualKind,
    /// Effects applied to the caster when the attack resolves.
    #[cfg_attr(feature = "serde", serde(default))]
    pub caster_effects: Vec<EffectTemplate>,
    /// Fraction of damage dealt returned to the caster as health.
    #[cfg_attr(feature = "serde", serde(default))]
    pub lifesteal: f32,
}

/// Reasons a definition is rejected when a catalog is built.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum DefinitionError {
    #[error("definition id is empty")]
    EmptyId,

    #[error("'{id}': {field} must not be negative (got {value})")]
    Negative {
        id: String,
        field: &'static str,
        value: f32,
    },

    #[error("'{id}': {field} must lie in [0, 1] (got {value})")]
    OutOfUnitRange {
        id: String,
        field: &'static str,
        value: f32,
    },

    #[error("'{id}': {count} entries exceed the limit of {max}")]
    TooManyEntries { id: String, count: usize, max: usize },

    #[error("duplicate definition id '{0}'")]
    Duplicate(String),
}

pub(crate) fn non_negative(id: &str, field: &'static str, value: f32) -> Result<(), DefinitionError> {
    if value < 0.0 || value.is_nan() {
        return Err(DefinitionError::Negative {
            id: id.to_owned(),
            field,
            value,
        });
    }
    Ok(())
}

pub(crate) fn unit_range(id: &str, field: &'static str, value: f32) -> Result<(), DefinitionError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(DefinitionError::OutOfUnitRange {
            id: id.to_owned(),
            field,
            value,
        });
    }
    Ok(())
}

impl AttackDefinition {
    /// Creates a definition with no effects, an impact visual and no lifesteal.
    pub fn new(
        id: impl Into<AttackId>,
        school: School,
        base_damage: f32,
        energy_cost: EnergyCost,
        cooldown: f32,
        radius: f32,
        visual_lifetime: f32,
    ) -> Self {
        Self {
            id: id.into(),
            school,
            base_damage,
            energy_cost,
            cooldown,
            radius,
            visual_lifetime,
            effects: Vec::new(),
            visual: VisualKind::Impact,
            caster_effects: Vec::new(),
            lifesteal: 0.0,
        }
    }

    pub fn with_effect(mut self, template: EffectTemplate) -> Self {
        self.effects.push(template);
        self
    }

    pub fn with_caster_effect(mut self, template: EffectTemplate) -> Self {
        self.caster_effects.push(template);
        self
    }

    pub fn with_visual(mut self, visual: VisualKind) -> Self {
        self.visual = visual;
        self
    }

    pub fn with_lifesteal(mut self, fraction: f32) -> Self {
        self.lifesteal = fraction;
        self
    }

    /// Checks numeric ranges of every field.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        let id = self.id.as_str();
        if id.is_empty() {
            return Err(DefinitionError::EmptyId);
        }
        non_negative(id, "base_damage", self.base_damage)?;
        non_negative(id, "cooldown", self.cooldown)?;
        non_negative(id, "radius", self.radius)?;
        non_negative(id, "visual_lifetime", self.visual_lifetime)?;
        match self.energy_cost {
            EnergyCost::Flat(amount) => non_negative(id, "energy_cost", amount)?,
            EnergyCost::Split { fah, brih } => {
                non_negative(id, "energy_cost.fah", fah)?;
                non_negative(id, "energy_cost.brih", brih)?;
            }
        }
        unit_range(id, "lifesteal", self.lifesteal)?;
        for template in self.effects.iter().chain(&self.caster_effects) {
            validate_effect(id, template)?;
        }
        Ok(())
    }
}

fn validate_effect(id: &str, template: &EffectTemplate) -> Result<(), DefinitionError> {
    non_negative(id, "effect.duration", template.duration)?;
    match template.effect {
        EffectSpec::Burn { damage_per_second } => {
            non_negative(id, "burn.damage_per_second", damage_per_second)
        }
        EffectSpec::Freeze { slow_factor } => unit_range(id, "freeze.slow_factor", slow_factor),
        EffectSpec::Stun => Ok(()),
        EffectSpec::Armor { damage_reduction } => {
            non_negative(id, "armor.damage_reduction", damage_reduction)
        }
        EffectSpec::Regeneration {
            heal_per_second,
            energy_per_second,
        } => {
            non_negative(id, "regeneration.heal_per_second", heal_per_second)?;
            non_negative(id, "regeneration.energy_per_second", energy_per_second)
        }
        EffectSpec::Elemental {
            damage_per_second,
            slow_factor,
        } => {
            non_negative(id, "elemental.damage_per_second", damage_per_second)?;
            unit_range(id, "elemental.slow_factor", slow_factor)
        }
    }
}

/// Read access to attack definitions by id.
pub trait AttackOracle: Send + Sync {
    fn attack(&self, id: &str) -> Option<&AttackDefinition>;

    /// All known ids, in ascending order.
    fn ids(&self) -> Vec<AttackId>;
}

/// In-memory attack registry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttackCatalog {
    attacks: BTreeMap<AttackId, AttackDefinition>,
}

impl AttackCatalog {
    /// Builds a catalog, validating every definition and rejecting duplicate ids.
    pub fn new(
        definitions: impl IntoIterator<Item = AttackDefinition>,
    ) -> Result<Self, DefinitionError> {
        let mut attacks = BTreeMap::new();
        for definition in definitions {
            definition.validate()?;
            let id = definition.id.clone();
            if attacks.insert(id.clone(), definition).is_some() {
                return Err(DefinitionError::Duplicate(id.0));
            }
        }
        Ok(Self { attacks })
    }

    pub fn get(&self, id: &str) -> Option<&AttackDefinition> {
        self.attacks.get(id)
    }

    pub fn len(&self) -> usize {
        self.attacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attacks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttackDefinition> {
        self.attacks.values()
    }
}

impl AttackOracle for AttackCatalog {
    fn attack(&self, id: &str) -> Option<&AttackDefinition> {
        self.get(id)
    }

    fn ids(&self) -> Vec<AttackId> {
        self.attacks.keys().cloned().collect()
    }
}
