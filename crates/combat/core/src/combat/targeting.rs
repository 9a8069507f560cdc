use std::collections::BTreeMap;

use crate::state::{Actor, ActorId, Faction, Point};

/// Area target selection around an aim point.
#[derive(Clone, Copy, Debug, Default)]
pub struct TargetResolver;

impl TargetResolver {
    /// Living actors within `radius` of `origin`, in ascending id order.
    ///
    /// `exclude` (the caster) is never returned. When `friendly_filter` is
    /// set, actors of that faction are skipped as well.
    pub fn find_targets(
        actors: &BTreeMap<ActorId, Actor>,
        origin: Point,
        radius: f32,
        exclude: Option<ActorId>,
        friendly_filter: Option<Faction>,
    ) -> Vec<ActorId> {
        let radius_sq = radius.max(0.0) * radius.max(0.0);
        actors
            .values()
            .filter(|actor| actor.is_alive())
            .filter(|actor| Some(actor.id) != exclude)
            .filter(|actor| friendly_filter != Some(actor.faction))
            .filter(|actor| actor.position.distance_squared(origin) <= radius_sq)
            .map(|actor| actor.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ActorFlags;

    fn table() -> BTreeMap<ActorId, Actor> {
        let mut actors = BTreeMap::new();
        for (id, faction, x) in [
            (1, Faction::Fah, 0.0),
            (4, Faction::Brih, 1.0),
            (2, Faction::Fah, 1.5),
            (3, Faction::Brih, 5.0),
        ] {
            actors.insert(
                ActorId(id),
                Actor::new(ActorId(id), faction, Point::new(x, 0.0), 50.0),
            );
        }
        actors
    }

    #[test]
    fn radius_is_inclusive_and_ordered() {
        let actors = table();
        let hits = TargetResolver::find_targets(&actors, Point::ORIGIN, 1.5, Some(ActorId(1)), None);
        assert_eq!(hits, vec![ActorId(2), ActorId(4)]);
    }

    #[test]
    fn friendly_filter_drops_allies() {
        let actors = table();
        let hits = TargetResolver::find_targets(
            &actors,
            Point::ORIGIN,
            2.0,
            Some(ActorId(1)),
            Some(Faction::Fah),
        );
        assert_eq!(hits, vec![ActorId(4)]);
    }

    #[test]
    fn dead_actors_are_skipped() {
        let mut actors = table();
        if let Some(actor) = actors.get_mut(&ActorId(4)) {
            actor.flags.remove(ActorFlags::ALIVE);
        }
        let hits = TargetResolver::find_targets(&actors, Point::ORIGIN, 10.0, None, None);
        assert_eq!(hits, vec![ActorId(1), ActorId(2), ActorId(3)]);
    }
}
