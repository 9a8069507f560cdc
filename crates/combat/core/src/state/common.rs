use std::borrow::Borrow;
use std::fmt;

/// Unique identifier for any actor tracked in the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActorId(pub u32);

impl ActorId {
    /// Reserved identifier for the player-controlled actor.
    pub const PLAYER: Self = Self(0);

    /// Returns true if this id is the reserved player id.
    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Catalog key of an attack definition (e.g. `"fireDart"`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AttackId(pub String);

impl AttackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AttackId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl Borrow<str> for AttackId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a ground item dropped by a loot roll.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Continuous world position in world units.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(self, other: Point) -> f32 {
        self.distance_squared(other).sqrt()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Elemental affiliation of an attack.
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
pub enum School {
    /// Fire-aligned; counters brih.
    Fah,
    /// Water-aligned; counters fah.
    Brih,
    /// Draws on both pools and has no type advantage.
    Combined,
}

impl School {
    /// Returns true when this school deals bonus damage to `target`.
    ///
    /// The bonus is cross-element only: fah beats brih and brih beats fah.
    pub const fn counters(self, target: Faction) -> bool {
        matches!(
            (self, target),
            (School::Fah, Faction::Brih) | (School::Brih, Faction::Fah)
        )
    }
}

/// Allegiance of an actor, used for friendly-fire filtering and type advantage.
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
pub enum Faction {
    #[default]
    Neutral,
    Fah,
    Brih,
    Hostile,
    Player,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn school_counters_only_cross_element() {
        assert!(School::Fah.counters(Faction::Brih));
        assert!(School::Brih.counters(Faction::Fah));
        assert!(!School::Fah.counters(Faction::Fah));
        assert!(!School::Combined.counters(Faction::Fah));
        assert!(!School::Combined.counters(Faction::Brih));
        assert!(!School::Brih.counters(Faction::Neutral));
    }

    #[test]
    fn parses_lowercase_names() {
        assert_eq!("fah".parse::<School>().unwrap(), School::Fah);
        assert_eq!("Combined".parse::<School>().unwrap(), School::Combined);
        assert_eq!("hostile".parse::<Faction>().unwrap(), Faction::Hostile);
        assert_eq!(Faction::Player.to_string(), "player");
    }

    #[test]
    fn point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.distance_squared(b), 25.0);
    }
}
