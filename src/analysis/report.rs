use super::pool::score_pool;
use super::positions::{predict_positions, Assignment};
use super::score::ScoreRecord;
use super::synergy::{DraftAnalysis, SynergyEngine};
use crate::catalog::{HeroId, Role};
use crate::dataset::Dataset;
use crate::draft::{DraftState, HeroPool};
use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything shown for one draft: the engine result, the pool panel and the
/// predicted enemy lanes, stamped with the dataset they were computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftReport {
    pub analysis: DraftAnalysis,
    pub pool: Vec<ScoreRecord>,
    pub positions: BTreeMap<HeroId, Assignment>,
    pub loaded_at: DateTime<Utc>,
}

impl DraftReport {
    pub fn build(
        dataset: &Dataset,
        draft: &DraftState,
        role_filter: Option<Role>,
        pool: &HeroPool,
    ) -> Result<Self, AppError> {
        let analysis = SynergyEngine::analyze(dataset, draft, role_filter, Some(pool))?;
        let pool = score_pool(dataset, draft, pool)?;
        let positions = predict_positions(&draft.enemy_picks, &dataset.positions);

        Ok(DraftReport {
            analysis,
            pool,
            positions,
            loaded_at: dataset.loaded_at,
        })
    }
}
