//! Combat rules applied by the engine: targeting, damage, status effects and death.
mod damage;
mod death;
mod effects;
mod targeting;

pub use damage::DamageCalculator;
pub use death::DeathResolver;
pub use effects::{EffectTick, StatusEffectEngine};
pub use targeting::TargetResolver;
