use crate::catalog::HeroId;
use crate::dataset::Dataset;
use crate::draft::DraftState;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Relation {
    Teammate,
    Opponent,
}

/// One line of a picked hero's matchup breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairScore {
    pub hero_id: HeroId,
    pub name: String,
    pub relation: Relation,
    pub value: f64,
}

/// Lists the matchup value between `hero` and every other picked hero, read
/// from `hero`'s side: synergy for teammates, counter for opponents.
///
/// Teammates come first, then opponents, each in pick order. Returns `None`
/// when `hero` is not picked on either side.
pub fn pair_breakdown(dataset: &Dataset, draft: &DraftState, hero: HeroId) -> Option<Vec<PairScore>> {
    let (team, opponents) = if draft.ally_picks.contains(&hero) {
        (&draft.ally_picks, &draft.enemy_picks)
    } else if draft.enemy_picks.contains(&hero) {
        (&draft.enemy_picks, &draft.ally_picks)
    } else {
        return None;
    };

    let matchups = &dataset.matchups;
    let teammates = team
        .iter()
        .filter(|id| **id != hero)
        .map(|id| (*id, Relation::Teammate, matchups.lookup_synergy(hero, *id)));
    let enemies = opponents
        .iter()
        .map(|id| (*id, Relation::Opponent, matchups.lookup_counter(hero, *id)));

    let pairs = teammates
        .chain(enemies)
        .filter_map(|(id, relation, value)| {
            dataset.catalog.get(id).map(|other| PairScore {
                hero_id: id,
                name: other.name.clone(),
                relation,
                value,
            })
        })
        .collect();

    Some(pairs)
}
