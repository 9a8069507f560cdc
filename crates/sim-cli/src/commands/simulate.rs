//! Run a scenario and print the report.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use combat_content::{ScenarioLoader, ScenarioSpec};
use combat_runtime::{OracleManager, RuntimeConfig, ScenarioReport, ScenarioRunner};

use super::content_factory;

/// Run a scenario to completion
#[derive(Parser)]
pub struct Simulate {
    /// Scenario name under `<data>/scenarios/`, or a path to a scenario file
    #[arg(value_name = "SCENARIO")]
    scenario: String,

    /// Content directory (defaults to the bundled data)
    #[arg(short, long, value_name = "DIR")]
    data: Option<PathBuf>,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,

    /// Let area attacks hit the caster's own faction
    #[arg(long)]
    pvp: bool,

    /// Override the scenario seed
    #[arg(long, value_name = "SEED", conflicts_with = "random_seed")]
    seed: Option<u64>,

    /// Roll a fresh seed instead of the scenario's
    #[arg(long)]
    random_seed: bool,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let factory = content_factory(self.data.clone());
        let oracles = OracleManager::from_factory(&factory)
            .with_context(|| format!("Failed to load content from {}", factory.data_dir().display()))?;

        let mut spec = self.load_spec(&factory)?;
        if self.pvp {
            spec.pvp = Some(true);
        }
        if let Some(seed) = self.seed {
            spec.seed = Some(seed);
        } else if self.random_seed {
            let seed = rand::random::<u64>();
            tracing::info!(seed, "rolled scenario seed");
            spec.seed = Some(seed);
        }

        let env_config = RuntimeConfig::from_env();
        let mut combat = oracles.combat_config().clone();
        combat.pvp_enabled |= env_config.combat.pvp_enabled;
        let config = env_config.with_combat(combat);

        let report = ScenarioRunner::new(oracles, config)
            .run(&spec)
            .with_context(|| format!("Scenario '{}' failed", spec.name))?;

        if self.json {
            println!("{}", report.to_json()?);
        } else {
            print_summary(&report);
        }
        Ok(())
    }

    fn load_spec(&self, factory: &combat_content::ContentFactory) -> Result<ScenarioSpec> {
        let path = Path::new(&self.scenario);
        if path.is_file() {
            return ScenarioLoader::load(path);
        }
        factory.load_scenario(&self.scenario)
    }
}

fn print_summary(report: &ScenarioReport) {
    println!(
        "Scenario '{}' (seed {}, pvp {})",
        report.scenario,
        report.seed,
        if report.pvp { "on" } else { "off" }
    );
    println!(
        "  {} frames, {:.2}s simulated{}",
        report.frames,
        report.elapsed,
        if report.game_over { ", GAME OVER" } else { "" }
    );
    println!();
    println!(
        "  {:<12} {:<12} {:>5} {:>15} {:>7} {:>7} {:>8} {:>8} {:>5}",
        "ACTOR", "TEMPLATE", "ALIVE", "HEALTH", "FAH", "BRIH", "DEALT", "TAKEN", "KILLS"
    );
    for actor in &report.actors {
        println!(
            "  {:<12} {:<12} {:>5} {:>15} {:>7.1} {:>7.1} {:>8.1} {:>8.1} {:>5}",
            actor.label,
            actor.template,
            if actor.alive { "yes" } else { "no" },
            format!("{:.1}/{:.1}", actor.health, actor.max_health),
            actor.fah,
            actor.brih,
            actor.stats.damage_dealt,
            actor.stats.damage_taken,
            actor.stats.kills,
        );
    }

    if !report.ground_items.is_empty() {
        println!();
        println!("  Loot on the ground:");
        for item in &report.ground_items {
            println!(
                "    {} at {} (dropped by {})",
                item.item, item.position, item.dropped_by
            );
        }
    }
    if report.unfired_casts > 0 {
        println!();
        println!("  {} scripted casts never fired", report.unfired_casts);
    }
}
