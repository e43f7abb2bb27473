use super::draft_needs::DraftNeeds;
use super::score::{round2, sort_by_total, ScoreRecord};
use super::win_probability::WinProbability;
use crate::catalog::{HeroId, HeroRecord, Role};
use crate::dataset::Dataset;
use crate::draft::{DraftState, HeroPool};
use crate::error::AppError;
use serde::Serialize;
use tracing::debug;

/// Result of scoring a draft. Which variant comes back depends only on
/// whether both teams have a full five picks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum DraftAnalysis {
    Suggestion(Suggestions),
    FullDraft(FullDraft),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestions {
    /// Candidates in the user's hero pool, best first
    pub in_pool: Vec<ScoreRecord>,
    /// Every other candidate, best first
    pub out_pool: Vec<ScoreRecord>,
    pub needs: DraftNeeds,
}

impl Suggestions {
    pub fn len(&self) -> usize {
        self.in_pool.len() + self.out_pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-hero scores for one side of a finished draft, in pick order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamBreakdown {
    pub heroes: Vec<ScoreRecord>,
}

impl TeamBreakdown {
    pub fn total(&self) -> f64 {
        self.heroes.iter().map(|h| h.total_score).sum()
    }

    /// Sum of per-hero totals each rounded to two decimals first, which is
    /// how the totals next to the pick slots add up on screen.
    pub fn display_total(&self) -> f64 {
        self.heroes.iter().map(|h| round2(h.total_score)).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullDraft {
    pub ally: TeamBreakdown,
    pub enemy: TeamBreakdown,
}

impl FullDraft {
    pub fn win_probability(&self) -> WinProbability {
        WinProbability::from_totals(self.ally.total(), self.enemy.total())
    }
}

pub struct SynergyEngine;

impl SynergyEngine {
    /// Scores the draft: suggestions while picks remain, a two-team breakdown
    /// once both teams are full.
    ///
    /// `role_filter` and `pool` only matter for suggestions. The pool splits
    /// results only once it reaches [`HeroPool::MIN_ACTIVE_SIZE`].
    pub fn analyze(
        dataset: &Dataset,
        draft: &DraftState,
        role_filter: Option<Role>,
        pool: Option<&HeroPool>,
    ) -> Result<DraftAnalysis, AppError> {
        dataset.ensure_ready()?;

        if draft.is_complete() {
            debug!("both teams full, scoring complete draft");
            Ok(DraftAnalysis::FullDraft(Self::full_draft(dataset, draft)))
        } else {
            Ok(DraftAnalysis::Suggestion(Self::suggest(
                dataset,
                draft,
                role_filter,
                pool,
            )))
        }
    }

    /// Ranks every available hero by synergy with allies plus counter value
    /// against enemies, including draft-need bonuses.
    pub fn suggest(
        dataset: &Dataset,
        draft: &DraftState,
        role_filter: Option<Role>,
        pool: Option<&HeroPool>,
    ) -> Suggestions {
        let unavailable = draft.unavailable();
        let needs = DraftNeeds::detect(&draft.ally_picks, &dataset.catalog);
        let allies = known(dataset, &draft.ally_picks);
        let enemies = known(dataset, &draft.enemy_picks);

        let mut ranked: Vec<ScoreRecord> = dataset
            .catalog
            .iter()
            .filter(|hero| !unavailable.contains(&hero.id))
            .filter(|hero| role_filter.map_or(true, |role| hero.has_role(role)))
            .map(|hero| Self::score_candidate(dataset, hero, &allies, &enemies, &needs))
            .collect();

        sort_by_total(&mut ranked);

        let active_pool = pool.filter(|p| p.is_active());
        let (in_pool, out_pool): (Vec<_>, Vec<_>) = ranked
            .into_iter()
            .partition(|record| active_pool.map_or(false, |p| p.contains(record.hero_id)));

        debug!(
            candidates = in_pool.len() + out_pool.len(),
            in_pool = in_pool.len(),
            needs = ?needs,
            "ranked suggestions"
        );

        Suggestions {
            in_pool,
            out_pool,
            needs,
        }
    }

    /// Scores one candidate against the current picks.
    pub fn score_candidate(
        dataset: &Dataset,
        hero: &HeroRecord,
        allies: &[HeroId],
        enemies: &[HeroId],
        needs: &DraftNeeds,
    ) -> ScoreRecord {
        let matchups = &dataset.matchups;

        let synergy_base: f64 = allies
            .iter()
            .map(|ally| matchups.lookup_synergy(hero.id, *ally))
            .sum();
        let counter: f64 = enemies
            .iter()
            .map(|enemy| matchups.lookup_counter(hero.id, *enemy))
            .sum();

        ScoreRecord::new(hero, synergy_base, counter, needs.bonuses_for(hero))
    }

    /// Scores each picked hero against its own team and the opposing one.
    /// No draft-need bonuses apply here.
    pub fn full_draft(dataset: &Dataset, draft: &DraftState) -> FullDraft {
        let allies = known(dataset, &draft.ally_picks);
        let enemies = known(dataset, &draft.enemy_picks);

        FullDraft {
            ally: Self::score_team(dataset, &allies, &enemies),
            enemy: Self::score_team(dataset, &enemies, &allies),
        }
    }

    fn score_team(dataset: &Dataset, team: &[HeroId], opponents: &[HeroId]) -> TeamBreakdown {
        let matchups = &dataset.matchups;

        let heroes = team
            .iter()
            .filter_map(|id| dataset.catalog.get(*id))
            .map(|hero| {
                let synergy: f64 = team
                    .iter()
                    .filter(|mate| **mate != hero.id)
                    .map(|mate| matchups.lookup_synergy(hero.id, *mate))
                    .sum();
                let counter: f64 = opponents
                    .iter()
                    .map(|opponent| matchups.lookup_counter(hero.id, *opponent))
                    .sum();

                ScoreRecord::new(hero, synergy, counter, Vec::new())
            })
            .collect();

        TeamBreakdown { heroes }
    }
}

// Picks missing from the catalog are skipped rather than scored
pub(crate) fn known(dataset: &Dataset, picks: &[HeroId]) -> Vec<HeroId> {
    picks
        .iter()
        .copied()
        .filter(|id| {
            let found = dataset.catalog.contains(*id);
            if !found {
                debug!(hero = %id, "skipping pick missing from catalog");
            }
            found
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::draft_needs::{DraftNeed, DRAFT_BONUS};
    use crate::catalog::{Attribute, HeroCatalog};
    use crate::matchup::MatchupIndex;
    use crate::test_support::{hero, ids, sample_dataset};
    use std::collections::{HashMap, HashSet};

    fn suggestions(analysis: DraftAnalysis) -> Suggestions {
        match analysis {
            DraftAnalysis::Suggestion(s) => s,
            DraftAnalysis::FullDraft(_) => panic!("expected suggestion mode"),
        }
    }

    fn full(analysis: DraftAnalysis) -> FullDraft {
        match analysis {
            DraftAnalysis::FullDraft(f) => f,
            DraftAnalysis::Suggestion(_) => panic!("expected full draft mode"),
        }
    }

    /// A(Initiator), B and B2 (no roles), C(Disabler), with an index that
    /// only has a single meaningless entry so the dataset counts as loaded.
    fn zero_dataset() -> Dataset {
        let catalog = HeroCatalog::new(vec![
            hero(1, "A", Attribute::Strength, &[Role::Initiator]),
            hero(2, "B", Attribute::Strength, &[]),
            hero(3, "B2", Attribute::Strength, &[]),
            hero(4, "C", Attribute::Strength, &[Role::Disabler]),
        ])
        .unwrap();
        let mut matchups = MatchupIndex::new();
        matchups.insert_synergy(HeroId(1), HeroId(1), 0.0);
        Dataset::new(catalog, matchups, HashMap::new())
    }

    fn find(records: &[ScoreRecord], id: u32) -> &ScoreRecord {
        records.iter().find(|r| r.hero_id == HeroId(id)).unwrap()
    }

    #[test]
    fn not_ready_without_data() {
        let result = SynergyEngine::analyze(&Dataset::empty(), &DraftState::default(), None, None);
        assert!(matches!(result, Err(AppError::NotReady)));
    }

    #[test]
    fn one_ally_gets_no_bonus() {
        let dataset = zero_dataset();
        let draft = DraftState::new(ids(&[2]), vec![], vec![]);
        let s = suggestions(SynergyEngine::analyze(&dataset, &draft, None, None).unwrap());

        assert_eq!(s.len(), 3);
        assert!(s.out_pool.iter().all(|r| r.total_score == 0.0 && r.bonuses.is_empty()));
    }

    #[test]
    fn two_allies_without_initiator_boost_initiators_only() {
        let dataset = zero_dataset();
        let draft = DraftState::new(ids(&[2, 3]), vec![], vec![]);
        let s = suggestions(SynergyEngine::analyze(&dataset, &draft, None, None).unwrap());

        let a = find(&s.out_pool, 1);
        assert_eq!(a.synergy_score, DRAFT_BONUS);
        assert_eq!(a.total_score, DRAFT_BONUS);
        assert_eq!(a.bonuses.len(), 1);
        assert_eq!(a.bonuses[0].kind, DraftNeed::Initiator);

        let c = find(&s.out_pool, 4);
        assert_eq!(c.synergy_score, 0.0);
        assert!(c.bonuses.is_empty());

        assert_eq!(s.out_pool[0].hero_id, HeroId(1));
    }

    #[test]
    fn every_available_hero_lands_in_exactly_one_bucket() {
        let dataset = sample_dataset();
        let draft = DraftState::new(ids(&[1, 2]), ids(&[3]), ids(&[4]));
        let pool: HeroPool = ids(&[5, 6, 7, 1]).into_iter().collect();

        let s = suggestions(SynergyEngine::analyze(&dataset, &draft, None, Some(&pool)).unwrap());

        let taken = draft.unavailable();
        let expected: HashSet<HeroId> = dataset
            .catalog
            .iter()
            .map(|h| h.id)
            .filter(|id| !taken.contains(id))
            .collect();
        let in_pool: HashSet<HeroId> = s.in_pool.iter().map(|r| r.hero_id).collect();
        let out_pool: HashSet<HeroId> = s.out_pool.iter().map(|r| r.hero_id).collect();

        assert!(in_pool.is_disjoint(&out_pool));
        assert_eq!(&in_pool | &out_pool, expected);
        assert!(in_pool.iter().all(|id| pool.contains(*id)));
        assert_eq!(in_pool.len(), 3);
    }

    #[test]
    fn small_pool_does_not_split_results() {
        let dataset = sample_dataset();
        let draft = DraftState::new(ids(&[1]), vec![], vec![]);
        let pool: HeroPool = ids(&[5, 6]).into_iter().collect();

        let s = suggestions(SynergyEngine::analyze(&dataset, &draft, None, Some(&pool)).unwrap());
        assert!(s.in_pool.is_empty());
        assert_eq!(s.out_pool.len(), dataset.catalog.len() - 1);
    }

    #[test]
    fn role_filter_removes_heroes_from_both_buckets() {
        let dataset = sample_dataset();
        let draft = DraftState::new(ids(&[1]), vec![], vec![]);
        let pool: HeroPool = ids(&[2, 3, 5]).into_iter().collect();

        let s = suggestions(
            SynergyEngine::analyze(&dataset, &draft, Some(Role::Carry), Some(&pool)).unwrap(),
        );
        for record in s.in_pool.iter().chain(s.out_pool.iter()) {
            let hero = dataset.catalog.get(record.hero_id).unwrap();
            assert!(hero.has_role(Role::Carry), "{} is not a carry", hero.name);
        }
        assert!(!s.is_empty());
    }

    #[test]
    fn suggestions_sum_directional_values() {
        let dataset = sample_dataset();
        // Allies 1 and 2, enemy 3; candidate 5 has explicit data in sample_dataset
        let draft = DraftState::new(ids(&[1, 2]), ids(&[3]), vec![]);
        let s = suggestions(SynergyEngine::analyze(&dataset, &draft, None, None).unwrap());

        let record = find(&s.out_pool, 5);
        let m = &dataset.matchups;
        let base = m.lookup_synergy(HeroId(5), HeroId(1)) + m.lookup_synergy(HeroId(5), HeroId(2));
        let counter = m.lookup_counter(HeroId(5), HeroId(3));
        assert_eq!(record.synergy_base, base);
        assert_eq!(record.counter_score, counter);
        assert_eq!(record.total_score, record.synergy_score + counter);
        assert_ne!(base, 0.0);
    }

    #[test]
    fn sorted_best_first() {
        let dataset = sample_dataset();
        let draft = DraftState::new(ids(&[1, 2]), ids(&[3, 4]), vec![]);
        let s = suggestions(SynergyEngine::analyze(&dataset, &draft, None, None).unwrap());

        assert!(s
            .out_pool
            .windows(2)
            .all(|pair| pair[0].total_score >= pair[1].total_score));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let dataset = sample_dataset();
        let draft = DraftState::new(ids(&[1, 2, 3]), ids(&[4]), ids(&[9]));
        let pool: HeroPool = ids(&[5, 6, 7]).into_iter().collect();

        let first = SynergyEngine::analyze(&dataset, &draft, None, Some(&pool)).unwrap();
        let second = SynergyEngine::analyze(&dataset, &draft, None, Some(&pool)).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn unknown_picks_do_not_break_scoring() {
        let dataset = sample_dataset();
        let draft = DraftState::new(ids(&[1, 999]), ids(&[998]), vec![]);
        let s = suggestions(SynergyEngine::analyze(&dataset, &draft, None, None).unwrap());
        assert_eq!(s.len(), dataset.catalog.len() - 1);
    }

    #[test]
    fn full_draft_keeps_pick_order_and_skips_bonuses() {
        let dataset = sample_dataset();
        let draft = DraftState::new(ids(&[5, 1, 3, 2, 4]), ids(&[10, 6, 9, 7, 8]), vec![]);

        let f = full(SynergyEngine::analyze(&dataset, &draft, Some(Role::Carry), None).unwrap());
        assert_eq!(f.ally.heroes.len(), 5);
        assert_eq!(f.enemy.heroes.len(), 5);

        let ally_order: Vec<HeroId> = f.ally.heroes.iter().map(|r| r.hero_id).collect();
        let enemy_order: Vec<HeroId> = f.enemy.heroes.iter().map(|r| r.hero_id).collect();
        assert_eq!(ally_order, draft.ally_picks);
        assert_eq!(enemy_order, draft.enemy_picks);
        assert!(f
            .ally
            .heroes
            .iter()
            .chain(f.enemy.heroes.iter())
            .all(|r| r.bonuses.is_empty() && r.synergy_score == r.synergy_base));
    }

    #[test]
    fn full_draft_excludes_self_synergy() {
        let catalog = HeroCatalog::new(
            (1..=10)
                .map(|id| hero(id, &format!("H{}", id), Attribute::Agility, &[]))
                .collect(),
        )
        .unwrap();
        let mut matchups = MatchupIndex::new();
        matchups.insert_synergy(HeroId(1), HeroId(1), 100.0);
        matchups.insert_synergy(HeroId(1), HeroId(2), 1.0);
        matchups.insert_counter(HeroId(1), HeroId(6), 0.5);
        matchups.insert_counter(HeroId(6), HeroId(1), -0.25);
        let dataset = Dataset::new(catalog, matchups, HashMap::new());

        let draft = DraftState::new(ids(&[1, 2, 3, 4, 5]), ids(&[6, 7, 8, 9, 10]), vec![]);
        let f = SynergyEngine::full_draft(&dataset, &draft);

        let first = &f.ally.heroes[0];
        assert_eq!(first.synergy_score, 1.0);
        assert_eq!(first.counter_score, 0.5);
        assert_eq!(first.total_score, 1.5);
        assert_eq!(f.enemy.heroes[0].total_score, -0.25);
        assert_eq!(f.ally.total(), 1.5);
    }

    #[test]
    fn team_totals_and_win_probability() {
        let make = |id: u32, total: f64| {
            ScoreRecord::new(&hero(id, "H", Attribute::Strength, &[]), total, 0.0, vec![])
        };
        let ally = TeamBreakdown {
            heroes: [1.0, 2.0, -1.0, 0.0, 3.0]
                .iter()
                .enumerate()
                .map(|(i, t)| make(i as u32 + 1, *t))
                .collect(),
        };
        let enemy = TeamBreakdown {
            heroes: vec![make(6, 1.0), make(7, 1.0)],
        };
        let draft = FullDraft { ally, enemy };

        assert_eq!(draft.ally.total(), 5.0);
        let wp = draft.win_probability();
        assert!((wp.ally - 52.2).abs() < 0.05);
        assert!((wp.ally + wp.enemy - 100.0).abs() < 1e-9);
    }

    #[test]
    fn display_total_rounds_each_hero_first() {
        let make = |id: u32, total: f64| {
            ScoreRecord::new(&hero(id, "H", Attribute::Strength, &[]), total, 0.0, vec![])
        };
        let team = TeamBreakdown {
            heroes: vec![make(1, 0.004), make(2, 0.004), make(3, 0.004)],
        };
        assert!((team.total() - 0.012).abs() < 1e-12);
        assert_eq!(team.display_total(), 0.0);
    }

    #[test]
    fn six_picks_stay_in_suggestion_mode() {
        let dataset = sample_dataset();
        let draft = DraftState::new(ids(&[1, 2, 3, 4, 5, 6]), ids(&[7, 8, 9, 10, 11]), vec![]);
        let analysis = SynergyEngine::analyze(&dataset, &draft, None, None).unwrap();
        assert!(matches!(analysis, DraftAnalysis::Suggestion(_)));
    }

    #[test]
    fn hero_listed_on_several_sides_is_never_a_candidate() {
        let dataset = sample_dataset();
        let draft = DraftState::new(ids(&[1, 2]), ids(&[1, 3]), ids(&[1, 4]));
        let pool: HeroPool = ids(&[1, 5, 6]).into_iter().collect();

        let s = suggestions(SynergyEngine::analyze(&dataset, &draft, None, Some(&pool)).unwrap());
        assert!(s
            .in_pool
            .iter()
            .chain(s.out_pool.iter())
            .all(|r| r.hero_id != HeroId(1)));
        assert_eq!(s.len(), dataset.catalog.len() - 4);
    }

    #[test]
    fn unknown_pick_is_left_out_of_full_draft() {
        let dataset = sample_dataset();
        let draft = DraftState::new(ids(&[1, 2, 3, 4, 999]), ids(&[1, 6, 7, 8, 9]), ids(&[1]));

        let f = full(SynergyEngine::analyze(&dataset, &draft, None, None).unwrap());
        let ally: Vec<HeroId> = f.ally.heroes.iter().map(|r| r.hero_id).collect();
        assert_eq!(ally, ids(&[1, 2, 3, 4]));
        assert_eq!(f.enemy.heroes.len(), 5);

        let wp = f.win_probability();
        assert!((20.0..=80.0).contains(&wp.ally));
    }
}
