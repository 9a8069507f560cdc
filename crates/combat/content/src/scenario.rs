//! Scripted combat scenarios.
//!
//! A scenario places actors from templates, schedules casts at fixed
//! timestamps and runs for a bounded duration. Actors are referred to by
//! their scenario label, never by runtime id.

use combat_core::Point;

/// An actor placed at scenario start.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioActor {
    /// Unique name used by scripted casts and reports.
    pub label: String,
    /// Actor template definition id.
    pub template: String,
    pub position: Point,
}

/// Where a scripted cast is aimed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScriptedAim {
    /// A fixed world position.
    Point(Point),
    /// The position of a labelled actor when the cast fires.
    Actor(String),
}

/// A cast issued once the simulation clock reaches `at`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScriptedCast {
    /// Seconds since scenario start.
    pub at: f32,
    pub caster: String,
    pub attack: String,
    pub aim: ScriptedAim,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioSpec {
    pub name: String,
    /// Simulated seconds to run unless the game ends first.
    pub duration: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,
    /// Overrides the configured friendly-fire setting when present.
    #[cfg_attr(feature = "serde", serde(default))]
    pub pvp: Option<bool>,
    pub actors: Vec<ScenarioActor>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub casts: Vec<ScriptedCast>,
}

impl ScenarioSpec {
    pub fn actor(&self, label: &str) -> Option<&ScenarioActor> {
        self.actors.iter().find(|actor| actor.label == label)
    }

    /// Checks labels and timestamps, and orders casts by time.
    ///
    /// Casts sharing a timestamp keep their file order.
    pub fn normalize(&mut self) -> Result<(), String> {
        if self.duration.is_nan() || self.duration < 0.0 {
            return Err(format!("scenario '{}': duration must be >= 0", self.name));
        }
        for (index, actor) in self.actors.iter().enumerate() {
            if self.actors[..index].iter().any(|a| a.label == actor.label) {
                return Err(format!(
                    "scenario '{}': duplicate actor label '{}'",
                    self.name, actor.label
                ));
            }
        }
        for cast in &self.casts {
            if cast.at.is_nan() || cast.at < 0.0 {
                return Err(format!(
                    "scenario '{}': cast of '{}' scheduled at negative time",
                    self.name, cast.attack
                ));
            }
            if self.actor(&cast.caster).is_none() {
                return Err(format!(
                    "scenario '{}': unknown caster '{}'",
                    self.name, cast.caster
                ));
            }
            if let ScriptedAim::Actor(label) = &cast.aim {
                if self.actor(label).is_none() {
                    return Err(format!(
                        "scenario '{}': unknown aim target '{}'",
                        self.name, label
                    ));
                }
            }
        }
        self.casts.sort_by(|a, b| a.at.total_cmp(&b.at));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> ScenarioSpec {
        ScenarioSpec {
            name: "test".into(),
            duration: 1.0,
            seed: None,
            pvp: None,
            actors: vec![
                ScenarioActor {
                    label: "a".into(),
                    template: "fah_adept".into(),
                    position: Point::ORIGIN,
                },
                ScenarioActor {
                    label: "b".into(),
                    template: "brih_adept".into(),
                    position: Point::new(1.0, 0.0),
                },
            ],
            casts: vec![
                ScriptedCast {
                    at: 0.5,
                    caster: "a".into(),
                    attack: "fireDart".into(),
                    aim: ScriptedAim::Actor("b".into()),
                },
                ScriptedCast {
                    at: 0.0,
                    caster: "b".into(),
                    attack: "frostLance".into(),
                    aim: ScriptedAim::Point(Point::ORIGIN),
                },
            ],
        }
    }

    #[test]
    fn normalize_sorts_casts_by_time() {
        let mut spec = spec();
        spec.normalize().unwrap();
        assert_eq!(spec.casts[0].caster, "b");
        assert_eq!(spec.casts[1].caster, "a");
    }

    #[test]
    fn normalize_rejects_unknown_labels() {
        let mut spec = spec();
        spec.casts[0].aim = ScriptedAim::Actor("ghost".into());
        assert!(spec.normalize().unwrap_err().contains("ghost"));

        let mut spec = self::spec();
        spec.actors[1].label = "a".into();
        assert!(spec.normalize().is_err());
    }
}
