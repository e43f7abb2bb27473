use crate::analysis::positions::{HeroPositions, Position};
use crate::catalog::{Attribute, HeroCatalog, HeroId, HeroRecord, Role};
use crate::dataset::Dataset;
use crate::matchup::MatchupIndex;
use std::collections::HashMap;

pub fn hero(id: u32, name: &str, attribute: Attribute, roles: &[Role]) -> HeroRecord {
    HeroRecord {
        id: HeroId(id),
        name: name.to_string(),
        primary_attribute: attribute,
        roles: roles.to_vec(),
        icon_url: format!("{}.png", name.to_lowercase().replace(' ', "_")),
        aliases: Vec::new(),
    }
}

pub fn ids(raw: &[u32]) -> Vec<HeroId> {
    raw.iter().copied().map(HeroId).collect()
}

/// Twelve heroes with a dense, deliberately asymmetric matchup table.
pub fn sample_dataset() -> Dataset {
    use Attribute::*;
    use Role::*;

    let heroes = vec![
        hero(1, "Anti-Mage", Agility, &[Carry, Escape, Nuker]),
        hero(2, "Axe", Strength, &[Initiator, Durable, Disabler]),
        hero(3, "Bane", Universal, &[Support, Disabler, Nuker, Durable]),
        hero(4, "Bloodseeker", Agility, &[Carry, Disabler, Nuker, Initiator]),
        hero(5, "Crystal Maiden", Intelligence, &[Support, Disabler, Nuker]),
        hero(6, "Drow Ranger", Agility, &[Carry, Disabler, Pusher]),
        hero(7, "Earthshaker", Strength, &[Support, Initiator, Disabler, Nuker]),
        hero(8, "Juggernaut", Agility, &[Carry, Pusher, Escape]),
        hero(9, "Mirana", Universal, &[Carry, Support, Escape, Nuker, Disabler]),
        hero(10, "Morphling", Agility, &[Carry, Escape, Durable, Nuker]),
        hero(11, "Shadow Fiend", Agility, &[Carry, Nuker]),
        hero(12, "Nature's Prophet", Intelligence, &[Carry, Pusher, Escape, Nuker]),
    ];
    let catalog = HeroCatalog::new(heroes).unwrap();

    let mut matchups = MatchupIndex::new();
    for a in 1..=12u32 {
        for b in 1..=12u32 {
            if a == b {
                continue;
            }
            let with = ((a * 7 + b * 3) % 11) as f64 / 4.0 - 1.0;
            let vs = ((a * 5 + b * 2) % 13) as f64 / 4.0 - 1.5;
            matchups.insert_synergy(HeroId(a), HeroId(b), with);
            matchups.insert_counter(HeroId(a), HeroId(b), vs);
        }
    }

    let mut positions = HashMap::new();
    positions.insert(
        HeroId(1),
        HeroPositions {
            primary: vec![Position::Safelane],
            secondary: vec![],
            fallback: None,
        },
    );
    positions.insert(
        HeroId(2),
        HeroPositions {
            primary: vec![Position::Offlane],
            secondary: vec![Position::Support],
            fallback: None,
        },
    );
    positions.insert(
        HeroId(5),
        HeroPositions {
            primary: vec![Position::HardSupport, Position::Support],
            secondary: vec![],
            fallback: None,
        },
    );

    Dataset::new(catalog, matchups, positions)
}
