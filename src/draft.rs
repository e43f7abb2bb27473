use crate::catalog::HeroId;
use std::collections::HashSet;

pub const TEAM_SIZE: usize = 5;

/// Picks and bans for one draft, owned by the caller.
///
/// The three lists are expected to be disjoint. Nothing here enforces it; the
/// engine reads them literally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftState {
    /// In pick order
    pub ally_picks: Vec<HeroId>,
    /// In pick order
    pub enemy_picks: Vec<HeroId>,
    pub bans: Vec<HeroId>,
}

impl DraftState {
    pub fn new(ally_picks: Vec<HeroId>, enemy_picks: Vec<HeroId>, bans: Vec<HeroId>) -> Self {
        DraftState {
            ally_picks,
            enemy_picks,
            bans,
        }
    }

    /// Both teams at capacity.
    pub fn is_complete(&self) -> bool {
        self.ally_picks.len() == TEAM_SIZE && self.enemy_picks.len() == TEAM_SIZE
    }

    pub fn has_picks(&self) -> bool {
        !self.ally_picks.is_empty() || !self.enemy_picks.is_empty()
    }

    /// Heroes no longer available as candidates.
    pub fn unavailable(&self) -> HashSet<HeroId> {
        self.ally_picks
            .iter()
            .chain(self.enemy_picks.iter())
            .chain(self.bans.iter())
            .copied()
            .collect()
    }
}

/// The user's preferred heroes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeroPool {
    heroes: Vec<HeroId>,
}

impl HeroPool {
    /// Smallest pool that splits suggestions into in-pool and out-of-pool.
    pub const MIN_ACTIVE_SIZE: usize = 3;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: HeroId) -> bool {
        self.heroes.contains(&id)
    }

    /// Adds the hero, or removes it if it is already in the pool.
    /// Returns whether the hero is in the pool afterwards.
    pub fn toggle(&mut self, id: HeroId) -> bool {
        if let Some(pos) = self.heroes.iter().position(|h| *h == id) {
            self.heroes.remove(pos);
            false
        } else {
            self.heroes.push(id);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }

    pub fn is_active(&self) -> bool {
        self.heroes.len() >= Self::MIN_ACTIVE_SIZE
    }

    pub fn iter(&self) -> impl Iterator<Item = HeroId> + '_ {
        self.heroes.iter().copied()
    }
}

impl FromIterator<HeroId> for HeroPool {
    fn from_iter<I: IntoIterator<Item = HeroId>>(iter: I) -> Self {
        let mut pool = HeroPool::new();
        for id in iter {
            if !pool.contains(id) {
                pool.heroes.push(id);
            }
        }
        pool
    }
}
