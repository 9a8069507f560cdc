use combat_content::{ContentFactory, ScenarioActor, ScenarioLoader, ScenarioSpec, ScriptedAim, ScriptedCast};
use combat_core::Point;
use combat_runtime::{OracleManager, RuntimeConfig, RuntimeError, ScenarioRunner};

fn runner() -> ScenarioRunner {
    let oracles = OracleManager::from_factory(&ContentFactory::new(
        ContentFactory::bundled_data_dir(),
    ))
    .expect("bundled content loads");
    let config = RuntimeConfig::default().with_combat(oracles.combat_config().clone());
    ScenarioRunner::new(oracles, config)
}

fn actor(label: &str, template: &str, x: f32, y: f32) -> ScenarioActor {
    ScenarioActor {
        label: label.into(),
        template: template.into(),
        position: Point::new(x, y),
    }
}

#[test]
fn duel_report_matches_hand_computation() {
    let spec = ScenarioLoader::load_embedded("duel").unwrap();
    let report = runner().run(&spec).unwrap();

    assert_eq!(report.scenario, "duel");
    assert_eq!(report.seed, 7);
    assert_eq!(report.frames, 180);
    assert!(!report.game_over);
    assert_eq!(report.unfired_casts, 0);

    let rival = report.actor("rival").unwrap();
    assert!(rival.alive);
    assert!((rival.health - 73.5).abs() < 0.01, "rival health {}", rival.health);
    assert!((rival.stats.damage_taken - 26.5).abs() < 0.01);

    let caster = report.actor("caster").unwrap();
    assert_eq!(caster.stats.casts, 1);
    assert_eq!(caster.fah, 100.0);
}

#[test]
fn skirmish_clears_both_goblins() {
    let spec = ScenarioLoader::load_embedded("skirmish").unwrap();
    let report = runner().run(&spec).unwrap();

    assert!(!report.game_over);
    assert!(!report.actor("goblin_a").unwrap().alive);
    assert!(!report.actor("goblin_b").unwrap().alive);
    let hero = report.actor("hero").unwrap();
    assert!(hero.alive);
    assert_eq!(hero.stats.kills, 2);

    let bystander = report.actor("bystander").unwrap();
    assert_eq!(bystander.health, bystander.max_health);

    let coins = report
        .ground_items
        .iter()
        .filter(|item| item.item.as_str() == "copper_coin")
        .count();
    assert_eq!(coins, 2);
}

#[test]
fn last_stand_ends_in_game_over() {
    let spec = ScenarioLoader::load_embedded("last_stand").unwrap();
    let report = runner().run(&spec).unwrap();

    assert!(report.game_over);
    assert!(report.frames < 1800);
    assert!(report.unfired_casts > 0);
    let hero = report.actor("hero").unwrap();
    assert!(!hero.alive);
    assert_eq!(hero.health, 0.0);
    assert!(report.casualties.iter().any(|c| c.actor == hero.id));
}

#[test]
fn runs_are_deterministic() {
    let spec = ScenarioLoader::load_embedded("skirmish").unwrap();
    let runner = runner();
    assert_eq!(runner.run(&spec).unwrap(), runner.run(&spec).unwrap());
}

#[test]
fn friendly_fire_follows_scenario_override() {
    let mut spec = ScenarioSpec {
        name: "crossfire".into(),
        duration: 0.1,
        seed: None,
        pvp: None,
        actors: vec![
            actor("caster", "fah_adept", 0.0, 0.0),
            actor("ally", "fah_adept", 5.0, 1.0),
            actor("enemy", "brih_adept", 6.0, 0.0),
        ],
        casts: vec![ScriptedCast {
            at: 0.0,
            caster: "caster".into(),
            attack: "emberNova".into(),
            aim: ScriptedAim::Point(Point::new(5.0, 0.0)),
        }],
    };
    let runner = runner();

    let report = runner.run(&spec).unwrap();
    assert!(!report.pvp);
    assert_eq!(report.actor("ally").unwrap().health, 100.0);
    assert_eq!(report.actor("enemy").unwrap().health, 87.0);

    spec.pvp = Some(true);
    let report = runner.run(&spec).unwrap();
    assert!(report.pvp);
    assert_eq!(report.actor("ally").unwrap().health, 90.0);
    assert_eq!(report.actor("enemy").unwrap().health, 87.0);
}

#[test]
fn unknown_attack_is_refused_before_running() {
    let spec = ScenarioSpec {
        name: "typo".into(),
        duration: 1.0,
        seed: None,
        pvp: None,
        actors: vec![actor("caster", "fah_adept", 0.0, 0.0)],
        casts: vec![ScriptedCast {
            at: 0.5,
            caster: "caster".into(),
            attack: "fireDrat".into(),
            aim: ScriptedAim::Point(Point::ORIGIN),
        }],
    };
    let err = runner().run(&spec).unwrap_err();
    assert!(matches!(err, RuntimeError::UnknownAttack(id) if id.as_str() == "fireDrat"));
}

#[test]
fn report_serializes_to_json() {
    let spec = ScenarioLoader::load_embedded("duel").unwrap();
    let json = runner().run(&spec).unwrap().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["scenario"], "duel");
    assert_eq!(value["actors"].as_array().unwrap().len(), 2);
}
