use super::draft_needs::DraftNeeds;
use super::score::{sort_by_total, ScoreRecord};
use super::synergy::{known, SynergyEngine};
use crate::dataset::Dataset;
use crate::draft::{DraftState, HeroPool};
use crate::error::AppError;
use tracing::debug;

/// Scores every hero in the pool against the current draft, for the
/// always-visible pool panel.
///
/// Same per-hero scoring as suggestions, but the pool is the whole universe:
/// no role filter, no in/out split. Heroes already picked or banned are left
/// out. Equal totals keep the order heroes were added to the pool.
pub fn score_pool(
    dataset: &Dataset,
    draft: &DraftState,
    pool: &HeroPool,
) -> Result<Vec<ScoreRecord>, AppError> {
    dataset.ensure_ready()?;

    if pool.is_empty() {
        return Ok(Vec::new());
    }

    let unavailable = draft.unavailable();
    let needs = DraftNeeds::detect(&draft.ally_picks, &dataset.catalog);
    let allies = known(dataset, &draft.ally_picks);
    let enemies = known(dataset, &draft.enemy_picks);

    let mut records: Vec<ScoreRecord> = pool
        .iter()
        .filter(|id| !unavailable.contains(id))
        .filter_map(|id| dataset.catalog.get(id))
        .map(|hero| SynergyEngine::score_candidate(dataset, hero, &allies, &enemies, &needs))
        .collect();

    sort_by_total(&mut records);
    debug!(pool = pool.len(), scored = records.len(), "scored hero pool");

    Ok(records)
}
