use super::score::Bonus;
use crate::catalog::{HeroCatalog, HeroId, HeroRecord, Role};
use serde::Serialize;

/// Flat synergy bonus for a candidate filling a missing archetype.
pub const DRAFT_BONUS: f64 = 2.0;

// Ally picks needed before a missing archetype counts
const CRUCIAL_TRIGGER_PICKS: usize = 2;
const SECONDARY_TRIGGER_PICKS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DraftNeed {
    Disabler,
    Pusher,
    Initiator,
}

impl DraftNeed {
    /// Evaluation order, which is also the order bonuses are listed in.
    pub const ALL: [DraftNeed; 3] = [DraftNeed::Disabler, DraftNeed::Pusher, DraftNeed::Initiator];

    pub fn role(&self) -> Role {
        match self {
            DraftNeed::Disabler => Role::Disabler,
            DraftNeed::Pusher => Role::Pusher,
            DraftNeed::Initiator => Role::Initiator,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DraftNeed::Disabler => "No disablers in team",
            DraftNeed::Pusher => "No pushers in team",
            DraftNeed::Initiator => "No initiator in team",
        }
    }

    fn trigger_picks(&self) -> usize {
        match self {
            DraftNeed::Initiator => CRUCIAL_TRIGGER_PICKS,
            DraftNeed::Disabler | DraftNeed::Pusher => SECONDARY_TRIGGER_PICKS,
        }
    }
}

/// Archetypes the allied draft is missing at this point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DraftNeeds {
    needs: Vec<DraftNeed>,
}

impl DraftNeeds {
    pub fn detect(ally_picks: &[HeroId], catalog: &HeroCatalog) -> Self {
        let picks = ally_picks.len();
        let allies: Vec<&HeroRecord> = ally_picks.iter().filter_map(|id| catalog.get(*id)).collect();

        let needs = DraftNeed::ALL
            .into_iter()
            .filter(|need| picks >= need.trigger_picks())
            .filter(|need| !allies.iter().any(|ally| ally.has_role(need.role())))
            .collect();

        DraftNeeds { needs }
    }

    pub fn contains(&self, need: DraftNeed) -> bool {
        self.needs.contains(&need)
    }

    pub fn is_empty(&self) -> bool {
        self.needs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = DraftNeed> + '_ {
        self.needs.iter().copied()
    }

    /// One bonus per open need the hero covers.
    pub fn bonuses_for(&self, hero: &HeroRecord) -> Vec<Bonus> {
        self.needs
            .iter()
            .filter(|need| hero.has_role(need.role()))
            .map(|need| Bonus {
                kind: *need,
                label: need.label(),
                amount: DRAFT_BONUS,
            })
            .collect()
    }
}
