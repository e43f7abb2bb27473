use crate::catalog::HeroId;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Position {
    Safelane,
    Midlane,
    Offlane,
    Support,
    HardSupport,
}

impl Position {
    pub const ALL: [Position; 5] = [
        Position::Safelane,
        Position::Midlane,
        Position::Offlane,
        Position::Support,
        Position::HardSupport,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Safelane => "safelane",
            Position::Midlane => "midlane",
            Position::Offlane => "offlane",
            Position::Support => "support",
            Position::HardSupport => "hard support",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "Hard  Support" and "hard support" are the same slot
        let normalized = s
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        Position::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| AppError::UnknownPosition(s.to_string()))
    }
}

impl TryFrom<String> for Position {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.as_str().to_string()
    }
}

/// Lane preferences for one hero, as stored in `hero-roles.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroPositions {
    pub primary: Vec<Position>,
    #[serde(default)]
    pub secondary: Vec<Position>,
    #[serde(default)]
    pub fallback: Option<Position>,
}

impl HeroPositions {
    fn options(&self) -> impl Iterator<Item = Position> + '_ {
        self.primary
            .iter()
            .chain(self.secondary.iter())
            .chain(self.fallback.iter())
            .copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment {
    Assigned(Position),
    /// Every option the hero has was already taken.
    Unassigned,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Assignment::Assigned(position) => write!(f, "{}", position),
            Assignment::Unassigned => f.write_str("?"),
        }
    }
}

// Same text as the table column, so JSON readers see "?" for an unplaced hero
impl Serialize for Assignment {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Guesses which lane each enemy hero plays.
///
/// Greedy, most-constrained first: heroes with the fewest primary positions pick
/// first (ties by id), each taking its first free option from primary, then
/// secondary, then fallback. There is no backtracking, so a hero can end up
/// unassigned even when a full assignment exists.
pub fn predict_positions(
    enemies: &[HeroId],
    role_data: &HashMap<HeroId, HeroPositions>,
) -> BTreeMap<HeroId, Assignment> {
    let empty = HeroPositions::default();

    let mut seen = HashSet::new();
    let mut heroes: Vec<(HeroId, &HeroPositions)> = enemies
        .iter()
        .filter(|id| seen.insert(**id))
        .map(|id| (*id, role_data.get(id).unwrap_or(&empty)))
        .collect();

    heroes.sort_by_key(|(id, positions)| (positions.primary.len(), *id));

    let mut taken = HashSet::new();
    let mut assignments = BTreeMap::new();

    for (id, positions) in heroes {
        let assignment = positions
            .options()
            .find(|position| !taken.contains(position))
            .map(Assignment::Assigned)
            .unwrap_or(Assignment::Unassigned);

        if let Assignment::Assigned(position) = assignment {
            taken.insert(position);
        }
        assignments.insert(id, assignment);
    }

    assignments
}

#[cfg(test)]
mod tests {
    use super::*;
    use Position::*;

    fn positions(
        primary: &[Position],
        secondary: &[Position],
        fallback: Option<Position>,
    ) -> HeroPositions {
        HeroPositions {
            primary: primary.to_vec(),
            secondary: secondary.to_vec(),
            fallback,
        }
    }

    #[test]
    fn most_constrained_hero_chooses_first() {
        let mut data = HashMap::new();
        // Hero 1 is flexible, hero 2 can only mid
        data.insert(HeroId(1), positions(&[Midlane, Safelane], &[], None));
        data.insert(HeroId(2), positions(&[Midlane], &[], None));

        let result = predict_positions(&[HeroId(1), HeroId(2)], &data);
        assert_eq!(result[&HeroId(2)], Assignment::Assigned(Midlane));
        assert_eq!(result[&HeroId(1)], Assignment::Assigned(Safelane));
    }

    #[test]
    fn falls_through_secondary_then_fallback() {
        let mut data = HashMap::new();
        data.insert(HeroId(1), positions(&[Offlane], &[], None));
        data.insert(HeroId(2), positions(&[Offlane], &[Offlane], Some(HardSupport)));

        let result = predict_positions(&[HeroId(2), HeroId(1)], &data);
        assert_eq!(result[&HeroId(1)], Assignment::Assigned(Offlane));
        assert_eq!(result[&HeroId(2)], Assignment::Assigned(HardSupport));
    }

    #[test]
    fn exhausted_heroes_get_question_mark_and_slots_stay_unique() {
        let mut data = HashMap::new();
        for id in 1..=6 {
            data.insert(HeroId(id), positions(&[Support], &[HardSupport], None));
        }
        let enemies: Vec<HeroId> = (1..=6).map(HeroId).collect();

        let result = predict_positions(&enemies, &data);
        let assigned: Vec<Position> = result
            .values()
            .filter_map(|a| match a {
                Assignment::Assigned(p) => Some(*p),
                Assignment::Unassigned => None,
            })
            .collect();
        let unique: HashSet<Position> = assigned.iter().copied().collect();

        assert_eq!(assigned.len(), 2);
        assert_eq!(unique.len(), 2);
        assert_eq!(result[&HeroId(1)], Assignment::Assigned(Support));
        assert_eq!(result[&HeroId(2)], Assignment::Assigned(HardSupport));
        assert_eq!(result[&HeroId(3)].to_string(), "?");
    }

    #[test]
    fn greedy_does_not_backtrack() {
        let mut data = HashMap::new();
        // Hero 1 grabs safelane first even though hero 2 needed it.
        data.insert(HeroId(1), positions(&[Safelane], &[Midlane], None));
        data.insert(HeroId(2), positions(&[Safelane], &[], None));

        let result = predict_positions(&[HeroId(1), HeroId(2)], &data);
        assert_eq!(result[&HeroId(1)], Assignment::Assigned(Safelane));
        assert_eq!(result[&HeroId(2)], Assignment::Unassigned);
    }

    #[test]
    fn heroes_without_data_are_unassigned() {
        let result = predict_positions(&[HeroId(42)], &HashMap::new());
        assert_eq!(result[&HeroId(42)], Assignment::Unassigned);
        assert!(predict_positions(&[], &HashMap::new()).is_empty());
    }

    #[test]
    fn parses_role_file_entries() {
        let json = r#"{"primary": ["Hard Support"], "secondary": ["support"], "fallback": null}"#;
        let parsed: HeroPositions = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, positions(&[HardSupport], &[Support], None));

        let bad: Result<HeroPositions, _> = serde_json::from_str(r#"{"primary": ["jungle"]}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn assignments_serialize_as_shown() {
        let mut data = HashMap::new();
        data.insert(HeroId(1), positions(&[HardSupport], &[], None));
        data.insert(HeroId(2), positions(&[HardSupport], &[], None));

        let result = predict_positions(&[HeroId(1), HeroId(2)], &data);
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"1":"hard support","2":"?"}"#);
    }
}
