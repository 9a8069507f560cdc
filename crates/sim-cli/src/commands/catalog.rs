//! Validate content and list attack definitions.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use combat_core::{AttackDefinition, EnergyCost};

use super::content_factory;

/// List attack definitions
#[derive(Parser)]
pub struct Catalog {
    /// Content directory (defaults to the bundled data)
    #[arg(short, long, value_name = "DIR")]
    data: Option<PathBuf>,
}

impl Catalog {
    pub fn execute(self) -> Result<()> {
        let factory = content_factory(self.data);
        let attacks = factory
            .load_attacks()
            .with_context(|| format!("Invalid attack catalog in {}", factory.data_dir().display()))?;
        let loot = factory.load_loot().context("Invalid loot tables")?;
        let actors = factory.load_actors().context("Invalid actor templates")?;

        println!(
            "{:<12} {:<9} {:>6} {:>14} {:>6} {:>6} {:>6}  EFFECTS",
            "ID", "SCHOOL", "DAMAGE", "COST", "CD", "RADIUS", "LIFE"
        );
        for attack in attacks.iter() {
            println!("{}", format_attack(attack));
        }
        println!();
        println!(
            "{} attacks, {} loot tables, {} actor templates",
            attacks.len(),
            loot.len(),
            actors.len()
        );
        Ok(())
    }
}

fn format_attack(attack: &AttackDefinition) -> String {
    let cost = match attack.energy_cost {
        EnergyCost::Flat(amount) => format!("{amount}"),
        EnergyCost::Split { fah, brih } => format!("{fah} fah+{brih} brih"),
    };
    let effects: Vec<String> = attack
        .effects
        .iter()
        .map(|t| format!("{}({}s)", t.effect.effect_type(), t.duration))
        .chain(
            attack
                .caster_effects
                .iter()
                .map(|t| format!("self:{}({}s)", t.effect.effect_type(), t.duration)),
        )
        .collect();
    format!(
        "{:<12} {:<9} {:>6} {:>14} {:>6} {:>6} {:>6}  {}",
        attack.id.as_str(),
        attack.school.to_string(),
        attack.base_damage,
        cost,
        attack.cooldown,
        attack.radius,
        attack.visual_lifetime,
        if effects.is_empty() {
            "-".to_owned()
        } else {
            effects.join(", ")
        }
    )
}

#[cfg(test)]
mod tests {
    use combat_core::{EffectSpec, EffectTemplate, School};

    use super::*;

    #[test]
    fn formats_effects_and_split_costs() {
        let attack = AttackDefinition::new(
            "stormfang",
            School::Combined,
            18.0,
            EnergyCost::Split {
                fah: 8.0,
                brih: 8.0,
            },
            2.0,
            1.5,
            0.4,
        )
        .with_effect(EffectTemplate::new(
            2.0,
            EffectSpec::Elemental {
                damage_per_second: 2.0,
                slow_factor: 0.25,
            },
        ));
        let line = format_attack(&attack);
        assert!(line.starts_with("stormfang"));
        assert!(line.contains("8 fah+8 brih"));
        assert!(line.contains("elemental(2s)"));
    }
}
