use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Stable hero identifier, the join key between catalog, matchups and role data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeroId(pub u32);

impl fmt::Display for HeroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HeroId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .filter(|id| *id > 0)
            .map(HeroId)
            .ok_or_else(|| AppError::InvalidDataset(format!("'{}' is not a hero id", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    #[serde(rename = "str", alias = "strength")]
    Strength,
    #[serde(rename = "agi", alias = "agility")]
    Agility,
    #[serde(rename = "int", alias = "intelligence")]
    Intelligence,
    #[serde(rename = "all", alias = "universal")]
    Universal,
}

impl Attribute {
    /// Display order of the attribute groups.
    pub const ALL: [Attribute; 4] = [
        Attribute::Strength,
        Attribute::Agility,
        Attribute::Intelligence,
        Attribute::Universal,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Attribute::Strength => "Strength",
            Attribute::Agility => "Agility",
            Attribute::Intelligence => "Intelligence",
            Attribute::Universal => "Universal",
        }
    }

    fn slot(&self) -> usize {
        match self {
            Attribute::Strength => 0,
            Attribute::Agility => 1,
            Attribute::Intelligence => 2,
            Attribute::Universal => 3,
        }
    }
}

/// Archetype tags a hero can carry. Unrecognised tags are rejected at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    Carry,
    Support,
    Nuker,
    Disabler,
    Jungler,
    Durable,
    Escape,
    Pusher,
    Initiator,
}

impl Role {
    pub const ALL: [Role; 9] = [
        Role::Carry,
        Role::Support,
        Role::Nuker,
        Role::Disabler,
        Role::Jungler,
        Role::Durable,
        Role::Escape,
        Role::Pusher,
        Role::Initiator,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Carry => "Carry",
            Role::Support => "Support",
            Role::Nuker => "Nuker",
            Role::Disabler => "Disabler",
            Role::Jungler => "Jungler",
            Role::Durable => "Durable",
            Role::Escape => "Escape",
            Role::Pusher => "Pusher",
            Role::Initiator => "Initiator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Role::ALL
            .iter()
            .copied()
            .find(|role| role.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AppError::UnknownRole(s.to_string()))
    }
}

impl TryFrom<String> for Role {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

/// One hero as it appears in `heroes.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroRecord {
    #[serde(rename = "HeroId")]
    pub id: HeroId,
    pub name: String,
    #[serde(rename = "primaryAttribute")]
    pub primary_attribute: Attribute,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub icon_url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl HeroRecord {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Case-insensitive substring match on the name or any alias.
    /// A blank query matches every hero.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        self.name.to_lowercase().contains(&query)
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_lowercase().contains(&query))
    }
}

/// Heroes partitioned by primary attribute, each bucket sorted by name.
#[derive(Debug, Clone, Default)]
pub struct AttributeGroups {
    buckets: [Vec<HeroRecord>; 4],
}

impl AttributeGroups {
    pub fn get(&self, attribute: Attribute) -> &[HeroRecord] {
        &self.buckets[attribute.slot()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, &[HeroRecord])> + '_ {
        Attribute::ALL
            .into_iter()
            .map(move |attribute| (attribute, self.get(attribute)))
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn into_flat(self) -> Vec<HeroRecord> {
        self.buckets.into_iter().flatten().collect()
    }
}

pub fn group_heroes(heroes: Vec<HeroRecord>) -> AttributeGroups {
    let mut groups = AttributeGroups::default();

    for hero in heroes {
        groups.buckets[hero.primary_attribute.slot()].push(hero);
    }

    for bucket in groups.buckets.iter_mut() {
        bucket.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
    }

    groups
}

/// Immutable hero catalog. Iteration order is the grouped order
/// (strength, agility, intelligence, universal; by name within a group),
/// which is also the tiebreak order for equal scores.
#[derive(Debug, Clone, Default)]
pub struct HeroCatalog {
    heroes: Vec<HeroRecord>,
    group_ends: [usize; 4],
    by_id: HashMap<HeroId, usize>,
}

impl HeroCatalog {
    pub fn new(heroes: Vec<HeroRecord>) -> Result<Self, AppError> {
        let mut seen = HashSet::new();
        for hero in &heroes {
            if hero.id.0 == 0 {
                return Err(AppError::InvalidDataset(format!(
                    "hero '{}' has id 0",
                    hero.name
                )));
            }
            if !seen.insert(hero.id) {
                return Err(AppError::InvalidDataset(format!(
                    "duplicate hero id {}",
                    hero.id
                )));
            }
        }

        let groups = group_heroes(heroes);
        let mut group_ends = [0; 4];
        let mut end = 0;
        for (slot, (_, bucket)) in groups.iter().enumerate() {
            end += bucket.len();
            group_ends[slot] = end;
        }

        let heroes = groups.into_flat();
        let by_id = heroes
            .iter()
            .enumerate()
            .map(|(idx, hero)| (hero.id, idx))
            .collect();

        Ok(HeroCatalog {
            heroes,
            group_ends,
            by_id,
        })
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }

    pub fn get(&self, id: HeroId) -> Option<&HeroRecord> {
        self.by_id.get(&id).map(|idx| &self.heroes[*idx])
    }

    pub fn contains(&self, id: HeroId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeroRecord> {
        self.heroes.iter()
    }

    pub fn group(&self, attribute: Attribute) -> &[HeroRecord] {
        let slot = attribute.slot();
        let start = if slot == 0 { 0 } else { self.group_ends[slot - 1] };
        &self.heroes[start..self.group_ends[slot]]
    }

    pub fn search<'a>(&'a self, query: &'a str) -> impl Iterator<Item = &'a HeroRecord> + 'a {
        self.heroes.iter().filter(move |hero| hero.matches_query(query))
    }

    /// Resolves a numeric id, or an exact (case-insensitive) name or alias.
    pub fn resolve(&self, input: &str) -> Result<HeroId, AppError> {
        let input = input.trim();

        if let Ok(id) = input.parse::<HeroId>() {
            if self.contains(id) {
                return Ok(id);
            }
        }

        self.heroes
            .iter()
            .find(|hero| {
                hero.name.eq_ignore_ascii_case(input)
                    || hero.aliases.iter().any(|a| a.eq_ignore_ascii_case(input))
            })
            .map(|hero| hero.id)
            .ok_or_else(|| AppError::UnknownHero(input.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct AliasMerge {
    pub heroes: Vec<HeroRecord>,
    pub aliases_merged: usize,
    pub heroes_appended: usize,
}

/// Carries aliases over from the current hero list into a freshly fetched one.
///
/// Fresh records that already have aliases keep them. Heroes that only exist in
/// `existing` are appended at the end.
pub fn merge_aliases(existing: &[HeroRecord], fresh: Vec<HeroRecord>) -> AliasMerge {
    let alias_map: HashMap<HeroId, &Vec<String>> = existing
        .iter()
        .filter(|hero| !hero.aliases.is_empty())
        .map(|hero| (hero.id, &hero.aliases))
        .collect();

    let mut aliases_merged = 0;
    let mut heroes: Vec<HeroRecord> = fresh
        .into_iter()
        .map(|mut hero| {
            if hero.aliases.is_empty() {
                if let Some(aliases) = alias_map.get(&hero.id) {
                    hero.aliases = (*aliases).clone();
                    aliases_merged += 1;
                }
            }
            hero
        })
        .collect();

    let fresh_ids: HashSet<HeroId> = heroes.iter().map(|hero| hero.id).collect();
    let extras: Vec<HeroRecord> = existing
        .iter()
        .filter(|hero| !fresh_ids.contains(&hero.id))
        .cloned()
        .collect();
    let heroes_appended = extras.len();
    heroes.extend(extras);

    AliasMerge {
        heroes,
        aliases_merged,
        heroes_appended,
    }
}
