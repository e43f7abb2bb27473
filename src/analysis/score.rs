use super::draft_needs::DraftNeed;
use crate::catalog::{HeroId, HeroRecord};
use serde::Serialize;

/// One additive adjustment applied on top of the raw synergy sum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bonus {
    pub kind: DraftNeed,
    pub label: &'static str,
    pub amount: f64,
}

/// Engine output for a single hero. Scores are kept at full precision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRecord {
    pub hero_id: HeroId,
    pub name: String,
    pub icon_url: String,
    /// Synergy before bonuses
    pub synergy_base: f64,
    pub synergy_score: f64,
    pub counter_score: f64,
    pub total_score: f64,
    pub bonuses: Vec<Bonus>,
}

impl ScoreRecord {
    pub fn new(hero: &HeroRecord, synergy_base: f64, counter_score: f64, bonuses: Vec<Bonus>) -> Self {
        let synergy_bonus: f64 = bonuses.iter().map(|b| b.amount).sum();
        let synergy_score = synergy_base + synergy_bonus;

        ScoreRecord {
            hero_id: hero.id,
            name: hero.name.clone(),
            icon_url: hero.icon_url.clone(),
            synergy_base,
            synergy_score,
            counter_score,
            total_score: synergy_score + counter_score,
            bonuses,
        }
    }
}

/// Rounds to two decimals, the precision scores are displayed at.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Highest total first. `sort_by` is stable, so equal totals keep catalog order.
pub fn sort_by_total(records: &mut [ScoreRecord]) {
    records.sort_by(|a, b| {
        b.total_score
            .partial_cmp(&a.total_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
