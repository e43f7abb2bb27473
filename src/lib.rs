//! Dota 2 draft assistant: scores candidate heroes by synergy with allies and
//! counter value against enemies, and breaks down finished drafts.

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod dataset;
pub mod display;
pub mod draft;
pub mod error;
pub mod matchup;

#[cfg(test)]
mod test_support;

pub use analysis::breakdown::{pair_breakdown, PairScore, Relation};
pub use analysis::draft_needs::{DraftNeed, DraftNeeds};
pub use analysis::pool::score_pool;
pub use analysis::positions::{predict_positions, Assignment, HeroPositions, Position};
pub use analysis::report::DraftReport;
pub use analysis::score::{Bonus, ScoreRecord};
pub use analysis::synergy::{DraftAnalysis, FullDraft, Suggestions, SynergyEngine, TeamBreakdown};
pub use analysis::win_probability::{win_probability, WinProbability};
pub use catalog::{Attribute, HeroCatalog, HeroId, HeroRecord, Role};
pub use dataset::{Dataset, SharedDataset};
pub use draft::{DraftState, HeroPool};
pub use error::AppError;
pub use matchup::MatchupIndex;
