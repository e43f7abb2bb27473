pub mod loader;
pub mod models;

use crate::analysis::positions::HeroPositions;
use crate::catalog::{HeroCatalog, HeroId};
use crate::error::AppError;
use crate::matchup::MatchupIndex;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::info;

/// Everything the engine reads: catalog, matchup index and lane data.
/// Built once per load and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub catalog: HeroCatalog,
    pub matchups: MatchupIndex,
    pub positions: HashMap<HeroId, HeroPositions>,
    pub loaded_at: DateTime<Utc>,
}

impl Dataset {
    pub fn new(
        catalog: HeroCatalog,
        matchups: MatchupIndex,
        positions: HashMap<HeroId, HeroPositions>,
    ) -> Self {
        Dataset {
            catalog,
            matchups,
            positions,
            loaded_at: Utc::now(),
        }
    }

    /// Placeholder before the first load finishes.
    pub fn empty() -> Self {
        Self::new(HeroCatalog::default(), MatchupIndex::new(), HashMap::new())
    }

    pub fn is_ready(&self) -> bool {
        !self.catalog.is_empty() && !self.matchups.is_empty()
    }

    pub fn ensure_ready(&self) -> Result<(), AppError> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(AppError::NotReady)
        }
    }
}

/// Hot-swappable handle to the current dataset.
///
/// Scoring calls take a `snapshot()` and work on that `Arc` for their whole
/// duration, so a concurrent `replace()` never shows them a half-updated index.
#[derive(Debug, Clone)]
pub struct SharedDataset {
    current: Arc<RwLock<Arc<Dataset>>>,
}

impl SharedDataset {
    pub fn new(dataset: Dataset) -> Self {
        SharedDataset {
            current: Arc::new(RwLock::new(Arc::new(dataset))),
        }
    }

    pub fn snapshot(&self) -> Arc<Dataset> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    pub fn replace(&self, dataset: Dataset) {
        info!(
            heroes = dataset.catalog.len(),
            matchups = dataset.matchups.len(),
            "swapping in refreshed dataset"
        );
        let next = Arc::new(dataset);
        match self.current.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }
}

impl Default for SharedDataset {
    fn default() -> Self {
        Self::new(Dataset::empty())
    }
}
