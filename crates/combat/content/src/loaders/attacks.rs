//! Attack catalog loader.

use std::path::Path;

use combat_core::{AttackCatalog, AttackDefinition};

use crate::loaders::{LoadResult, read_file};

/// Loader for attack definitions from RON files.
///
/// RON format: `Vec<AttackDefinition>`.
pub struct AttackLoader;

impl AttackLoader {
    /// Load and validate an attack catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<AttackCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Load the attack catalog shipped with this crate.
    pub fn load_embedded() -> LoadResult<AttackCatalog> {
        Self::parse(include_str!("../../data/attacks.ron"))
    }

    /// Parse and validate attack definitions from RON text.
    pub fn parse(content: &str) -> LoadResult<AttackCatalog> {
        let definitions: Vec<AttackDefinition> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse attack catalog RON: {}", e))?;
        AttackCatalog::new(definitions)
            .map_err(|e| anyhow::anyhow!("Invalid attack catalog: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use combat_core::{AttackOracle, EffectSpec, EnergyCost, School, VisualKind};

    use super::*;

    #[test]
    fn embedded_catalog_contains_fire_dart() {
        let catalog = AttackLoader::load_embedded().unwrap();
        let dart = catalog.attack("fireDart").unwrap();
        assert_eq!(dart.school, School::Fah);
        assert_eq!(dart.base_damage, 15.0);
        assert_eq!(dart.energy_cost, EnergyCost::Flat(10.0));
        assert_eq!(dart.cooldown, 0.5);
        assert_eq!(dart.effects.len(), 1);
        assert_eq!(
            dart.effects[0].effect,
            EffectSpec::Burn {
                damage_per_second: 3.0
            }
        );
        assert_eq!(dart.effects[0].duration, 2.0);
    }

    #[test]
    fn optional_fields_default() {
        let catalog = AttackLoader::parse(
            r#"[
                (
                    id: "plain",
                    school: Brih,
                    base_damage: 4.0,
                    energy_cost: Split(fah: 1.0, brih: 2.0),
                    cooldown: 0.0,
                    radius: 1.0,
                    visual_lifetime: 0.2,
                ),
            ]"#,
        )
        .unwrap();
        let plain = catalog.attack("plain").unwrap();
        assert!(plain.effects.is_empty());
        assert!(plain.caster_effects.is_empty());
        assert_eq!(plain.visual, VisualKind::Impact);
        assert_eq!(plain.lifesteal, 0.0);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let one = r#"(id: "x", school: Fah, base_damage: 1.0, energy_cost: Flat(1.0),
                      cooldown: 0.0, radius: 1.0, visual_lifetime: 0.1)"#;
        let err = AttackLoader::parse(&format!("[{one}, {one}]")).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn rejects_negative_cooldown_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[(id: "bad", school: Fah, base_damage: 1.0, energy_cost: Flat(1.0),
                 cooldown: -1.0, radius: 1.0, visual_lifetime: 0.1)]"#
        )
        .unwrap();
        let err = AttackLoader::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("cooldown"));
    }
}
