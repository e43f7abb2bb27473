use crate::catalog::HeroId;
use crate::dataset::models::{RawMatchupEntry, RawMatrix};
use crate::error::AppError;
use std::collections::HashMap;

/// Matchup values seen from one hero's perspective.
#[derive(Debug, Clone, Default)]
pub struct MatchupEntry {
    with: HashMap<HeroId, f64>,
    vs: HashMap<HeroId, f64>,
}

impl MatchupEntry {
    pub fn synergy_with(&self, ally: HeroId) -> f64 {
        self.with.get(&ally).copied().unwrap_or(0.0)
    }

    pub fn counter_vs(&self, enemy: HeroId) -> f64 {
        self.vs.get(&enemy).copied().unwrap_or(0.0)
    }
}

/// Pairwise synergy/counter values keyed by hero.
///
/// Values are directional: `synergy(a, b)` and `synergy(b, a)` are independent
/// data points and are never mirrored.
#[derive(Debug, Clone, Default)]
pub struct MatchupIndex {
    entries: HashMap<HeroId, MatchupEntry>,
}

impl MatchupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_raw(raw: RawMatrix) -> Result<Self, AppError> {
        let mut index = MatchupIndex::new();

        for (key, RawMatchupEntry { with, vs }) in raw {
            let hero: HeroId = key.parse().map_err(|_| {
                AppError::InvalidDataset(format!("matchup key '{}' is not a hero id", key))
            })?;
            let entry = index.entries.entry(hero).or_default();

            for pair in with {
                check_value(hero, pair.hero_id2, pair.synergy)?;
                // First occurrence wins, same as a front-to-back scan would.
                entry.with.entry(HeroId(pair.hero_id2)).or_insert(pair.synergy);
            }
            for pair in vs {
                check_value(hero, pair.hero_id2, pair.synergy)?;
                entry.vs.entry(HeroId(pair.hero_id2)).or_insert(pair.synergy);
            }
        }

        Ok(index)
    }

    pub fn insert_synergy(&mut self, hero: HeroId, ally: HeroId, value: f64) {
        self.entries.entry(hero).or_default().with.insert(ally, value);
    }

    pub fn insert_counter(&mut self, hero: HeroId, enemy: HeroId, value: f64) {
        self.entries.entry(hero).or_default().vs.insert(enemy, value);
    }

    pub fn entry(&self, hero: HeroId) -> Option<&MatchupEntry> {
        self.entries.get(&hero)
    }

    /// Synergy of `hero` when paired with `ally`; 0 when either is unknown.
    pub fn lookup_synergy(&self, hero: HeroId, ally: HeroId) -> f64 {
        self.entry(hero)
            .map(|entry| entry.synergy_with(ally))
            .unwrap_or(0.0)
    }

    /// Counter value of `hero` facing `enemy`; 0 when either is unknown.
    pub fn lookup_counter(&self, hero: HeroId, enemy: HeroId) -> f64 {
        self.entry(hero)
            .map(|entry| entry.counter_vs(enemy))
            .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn check_value(hero: HeroId, other: u32, value: f64) -> Result<(), AppError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AppError::InvalidDataset(format!(
            "non-finite matchup value between {} and {}",
            hero, other
        )))
    }
}
